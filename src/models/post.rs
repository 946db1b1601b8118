use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// One record of the posts feed. The feed is read-only; validation happens
/// once at load (`feed::load`), after which every accessor is infallible.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Post {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub excerpt: String,
    /// Pre-rendered trusted HTML. The only field inserted unescaped.
    #[serde(default)]
    pub content: Option<String>,
    /// Markdown alternative to `content`; rendered to HTML at load time.
    #[serde(default)]
    pub content_markdown: Option<String>,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub tags: Vec<String>,
    /// `YYYY-MM-DD` or `YYYY-MM-DD HH:MM:SS`.
    pub date: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default, alias = "readTime")]
    pub read_time: Option<String>,
}

impl Post {
    /// Parse the post date. Feed validation guarantees this succeeds for any
    /// post that made it past `feed::load`.
    pub fn parsed_date(&self) -> Option<NaiveDateTime> {
        NaiveDateTime::parse_from_str(&self.date, "%Y-%m-%d %H:%M:%S")
            .or_else(|_| {
                NaiveDateTime::parse_from_str(
                    &format!("{} 00:00:00", self.date),
                    "%Y-%m-%d %H:%M:%S",
                )
            })
            .ok()
    }

    /// True when this post matches the given filter slug (category or any tag).
    pub fn matches_slug(&self, slug: &str) -> bool {
        filter_slug(&self.category) == slug || self.tags.iter().any(|t| filter_slug(t) == slug)
    }
}

/// Derive the filter slug of a label: lowercase, whitespace runs → one hyphen.
/// This is the matching contract — punctuation is kept as-is.
pub fn filter_slug(label: &str) -> String {
    label
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
}

/// Derive a consistent hue (0–360) from a label for the placeholder thumb.
pub fn category_hue(label: &str) -> u32 {
    let mut hash: u32 = 0;
    for b in label.bytes() {
        hash = hash.wrapping_mul(31).wrapping_add(b as u32);
    }
    hash % 360
}

/// First character of the category, uppercased, for the placeholder thumb.
pub fn category_initial(label: &str) -> String {
    label
        .chars()
        .next()
        .map(|c| c.to_uppercase().collect::<String>())
        .unwrap_or_else(|| "?".to_string())
}
