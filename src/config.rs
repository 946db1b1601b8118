use log::{info, warn};
use serde::Deserialize;
use std::fs;
use std::path::Path;

pub const CONFIG_FILE: &str = "Portfolite.toml";

/// Site-wide configuration, read once at boot from `Portfolite.toml`.
/// Every field has a default so a missing or partial file still boots.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct SiteConfig {
    pub site: Site,
    pub content: Content,
    pub intro: Intro,
    pub animation: Animation,
    pub contact: Contact,
    pub stats: Vec<StatCounter>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Site {
    pub name: String,
    pub tagline: String,
    pub url: String,
    pub author: String,
    pub description: String,
}

impl Default for Site {
    fn default() -> Self {
        Site {
            name: "Portfolite".to_string(),
            tagline: String::new(),
            url: "http://localhost:8000".to_string(),
            author: String::new(),
            description: String::new(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Content {
    /// Path or http(s) URL of the posts JSON document.
    pub feed: String,
    /// Posts per "load more" page on the blog listing.
    pub page_size: usize,
    /// Posts shown by the homepage teaser (preview mode).
    pub preview_count: usize,
    pub date_format: String,
    pub timezone: String,
}

impl Default for Content {
    fn default() -> Self {
        Content {
            feed: "site/data/posts.json".to_string(),
            page_size: 6,
            preview_count: 3,
            date_format: "%B %d, %Y".to_string(),
            timezone: "UTC".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Intro {
    pub enabled: bool,
    /// Overlay stays up at least this long even if the page is ready sooner.
    pub min_ms: u64,
    /// Hard ceiling — the overlay resolves after this even if assets hang.
    pub max_ms: u64,
    /// How long an explicit "skip" is remembered.
    pub skip_hours: i64,
}

impl Default for Intro {
    fn default() -> Self {
        Intro {
            enabled: true,
            min_ms: 800,
            max_ms: 4000,
            skip_hours: 24,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Animation {
    /// Per-card delay of the staggered card entrance.
    pub stagger_ms: u64,
    /// Duration of the counter count-up.
    pub counter_ms: u64,
}

impl Default for Animation {
    fn default() -> Self {
        Animation {
            stagger_ms: 100,
            counter_ms: 2000,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Contact {
    pub enabled: bool,
    /// Messages are appended here as JSON lines.
    pub outbox: String,
}

impl Default for Contact {
    fn default() -> Self {
        Contact {
            enabled: true,
            outbox: "site/outbox/messages.jsonl".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct StatCounter {
    pub label: String,
    pub target: u64,
}

impl SiteConfig {
    /// Load `Portfolite.toml` from the working directory.
    /// Missing file or bad TOML falls back to compiled defaults.
    pub fn load() -> Self {
        Self::load_from(CONFIG_FILE)
    }

    pub fn load_from(path: &str) -> Self {
        let config = match fs::read_to_string(Path::new(path)) {
            Ok(raw) => match toml::from_str::<SiteConfig>(&raw) {
                Ok(c) => {
                    info!("Loaded config from {}", path);
                    c
                }
                Err(e) => {
                    warn!("{} is not valid TOML ({}), using defaults", path, e);
                    SiteConfig::default()
                }
            },
            Err(_) => {
                warn!("{} not found, using defaults", path);
                SiteConfig::default()
            }
        };

        if url::Url::parse(&config.site.url).is_err() {
            warn!(
                "site.url {:?} is not a valid URL; canonical links will be off",
                config.site.url
            );
        }

        config
    }

    /// True when the feed points at a remote document rather than a local file.
    pub fn feed_is_remote(&self) -> bool {
        self.content.feed.starts_with("http://") || self.content.feed.starts_with("https://")
    }
}
