use std::collections::HashSet;
use std::fmt;
use std::fs;

use log::error;
use pulldown_cmark::{html, Parser};
use serde::Deserialize;

use crate::config::SiteConfig;
use crate::models::post::Post;

/// Why the posts feed could not be turned into a usable set.
#[derive(Debug)]
pub enum FeedError {
    /// Local file could not be read.
    Io(String),
    /// Remote feed could not be fetched.
    Http(String),
    /// Document is not the expected JSON shape.
    Parse(String),
    /// Document parsed but violates a feed invariant (duplicate id, bad date).
    Invalid(String),
}

impl fmt::Display for FeedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeedError::Io(e) => write!(f, "could not read posts feed: {}", e),
            FeedError::Http(e) => write!(f, "could not fetch posts feed: {}", e),
            FeedError::Parse(e) => write!(f, "posts feed is not valid JSON: {}", e),
            FeedError::Invalid(e) => write!(f, "posts feed is malformed: {}", e),
        }
    }
}

#[derive(Deserialize)]
struct FeedDoc {
    posts: Vec<Post>,
}

/// Load, validate, and sort the posts feed. Called once per page request —
/// the feed is small and the original contract is "refetch on every load,
/// no caching".
pub fn load(config: &SiteConfig) -> Result<Vec<Post>, FeedError> {
    let raw = fetch_raw(config)?;
    let doc: FeedDoc = serde_json::from_str(&raw).map_err(|e| FeedError::Parse(e.to_string()))?;

    let mut posts = doc.posts;
    validate(&posts)?;

    for post in &mut posts {
        if post.content.is_none() {
            if let Some(md) = post.content_markdown.take() {
                post.content = Some(render_markdown(&md));
            }
        }
    }

    // Stable sort, newest first. Validation guaranteed every date parses.
    posts.sort_by(|a, b| b.parsed_date().cmp(&a.parsed_date()));
    Ok(posts)
}

/// Like `load`, but logs the failure. For routes that degrade a section
/// instead of surfacing the error text themselves.
pub fn load_logged(config: &SiteConfig) -> Result<Vec<Post>, FeedError> {
    load(config).map_err(|e| {
        error!("feed load failed: {}", e);
        e
    })
}

fn fetch_raw(config: &SiteConfig) -> Result<String, FeedError> {
    if config.feed_is_remote() {
        let resp = reqwest::blocking::get(&config.content.feed)
            .map_err(|e| FeedError::Http(e.to_string()))?;
        if !resp.status().is_success() {
            return Err(FeedError::Http(format!("feed returned {}", resp.status())));
        }
        resp.text().map_err(|e| FeedError::Http(e.to_string()))
    } else {
        fs::read_to_string(&config.content.feed).map_err(|e| FeedError::Io(e.to_string()))
    }
}

fn validate(posts: &[Post]) -> Result<(), FeedError> {
    let mut seen: HashSet<&str> = HashSet::new();
    for post in posts {
        if post.id.trim().is_empty() {
            return Err(FeedError::Invalid(format!(
                "post {:?} has an empty id",
                post.title
            )));
        }
        if !seen.insert(&post.id) {
            return Err(FeedError::Invalid(format!("duplicate post id {:?}", post.id)));
        }
        if post.parsed_date().is_none() {
            return Err(FeedError::Invalid(format!(
                "post {:?} has unparseable date {:?}",
                post.id, post.date
            )));
        }
    }
    Ok(())
}

fn render_markdown(md: &str) -> String {
    let mut out = String::with_capacity(md.len() * 2);
    html::push_html(&mut out, Parser::new(md));
    out
}

/// Find a post by id (string compare) in an already-sorted set.
pub fn find_by_id<'a>(posts: &'a [Post], id: &str) -> Option<(usize, &'a Post)> {
    posts.iter().enumerate().find(|(_, p)| p.id == id)
}

/// Chronological neighbors of the post at `index` in a newest-first set.
/// Returns (previous = next-older, next = next-newer); edges yield None.
pub fn neighbors(posts: &[Post], index: usize) -> (Option<&Post>, Option<&Post>) {
    let prev = posts.get(index + 1);
    let next = if index > 0 { posts.get(index - 1) } else { None };
    (prev, next)
}
