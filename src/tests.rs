#![cfg(test)]

use std::fs;
use std::path::PathBuf;

use rocket::http::{ContentType, Header};
use rocket::local::blocking::Client;

use crate::chrome::{intro, navbar, scroll};
use crate::config::{SiteConfig, StatCounter};
use crate::feed::{self, FeedError};
use crate::listing::{Filter, Listing};
use crate::models::contact::ContactForm;
use crate::models::post::{category_hue, category_initial, filter_slug, Post};
use crate::render;
use crate::rss;
use crate::seo::{self, PageMeta};

/// Atomic counter for unique temp files so parallel tests don't collide.
static TEST_FILE_COUNTER: std::sync::atomic::AtomicU64 = std::sync::atomic::AtomicU64::new(0);

fn temp_path(ext: &str) -> PathBuf {
    let id = TEST_FILE_COUNTER.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
    std::env::temp_dir().join(format!("portfolite_test_{}_{}.{}", std::process::id(), id, ext))
}

fn write_feed(json: &str) -> PathBuf {
    let path = temp_path("json");
    fs::write(&path, json).unwrap();
    path
}

fn make_post(id: &str, date: &str, category: &str, tags: &[&str]) -> Post {
    Post {
        id: id.to_string(),
        title: format!("Post {}", id),
        excerpt: format!("Excerpt {}", id),
        content: Some(format!("<p>Body {}</p>", id)),
        content_markdown: None,
        author: "Ada".to_string(),
        category: category.to_string(),
        tags: tags.iter().map(|t| t.to_string()).collect(),
        date: date.to_string(),
        image: None,
        read_time: None,
    }
}

fn test_config(feed_path: &std::path::Path) -> SiteConfig {
    let mut config = SiteConfig::default();
    config.content.feed = feed_path.to_string_lossy().to_string();
    config
}

/// Rocket without the file servers (their directories don't exist in tests).
fn test_client(config: SiteConfig) -> Client {
    let rocket = rocket::build()
        .manage(config)
        .mount("/", crate::routes::public::routes())
        .mount("/api", crate::routes::api::routes());
    Client::tracked(rocket).expect("valid rocket instance")
}

const SAMPLE_FEED: &str = r#"{
  "posts": [
    {"id": "1", "title": "Oldest", "excerpt": "first words", "content": "<p>one</p>",
     "author": "Ada", "category": "Rust Lang", "tags": ["systems"], "date": "2024-01-01"},
    {"id": "2", "title": "Middle & <Great>", "excerpt": "e < 3", "content": "<p>two</p>",
     "author": "Ada", "category": "Web", "tags": ["css", "rust lang"], "date": "2024-02-01",
     "readTime": "7 min read"},
    {"id": "3", "title": "Newest", "excerpt": "latest", "content": "<p>three</p>",
     "author": "Ada", "category": "Web", "tags": [], "date": "2024-03-01", "image": "pic.jpg"}
  ]
}"#;

// ═══════════════════════════════════════════════════════════
// Slugs
// ═══════════════════════════════════════════════════════════

#[test]
fn slug_lowercases_and_hyphenates() {
    assert_eq!(filter_slug("Rust Lang"), "rust-lang");
    assert_eq!(filter_slug("  Machine   Learning  "), "machine-learning");
    assert_eq!(filter_slug("CSS"), "css");
}

#[test]
fn slug_keeps_punctuation() {
    assert_eq!(filter_slug("C++ Tips"), "c++-tips");
}

#[test]
fn slug_of_empty_label_is_empty() {
    assert_eq!(filter_slug(""), "");
    assert_eq!(filter_slug("   "), "");
}

#[test]
fn category_hue_is_deterministic_and_bounded() {
    assert_eq!(category_hue("Web"), category_hue("Web"));
    assert!(category_hue("anything at all") < 360);
}

#[test]
fn category_initial_uppercases_first_char() {
    assert_eq!(category_initial("web"), "W");
    assert_eq!(category_initial(""), "?");
}

// ═══════════════════════════════════════════════════════════
// Feed loading
// ═══════════════════════════════════════════════════════════

#[test]
fn feed_sorts_newest_first() {
    let path = write_feed(SAMPLE_FEED);
    let posts = feed::load(&test_config(&path)).unwrap();
    let ids: Vec<&str> = posts.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec!["3", "2", "1"]);
}

#[test]
fn feed_sort_is_stable_for_equal_dates() {
    let path = write_feed(
        r#"{"posts": [
            {"id": "a", "title": "A", "date": "2024-05-01"},
            {"id": "b", "title": "B", "date": "2024-05-01"},
            {"id": "c", "title": "C", "date": "2024-05-01"}
        ]}"#,
    );
    let posts = feed::load(&test_config(&path)).unwrap();
    let ids: Vec<&str> = posts.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec!["a", "b", "c"]);
}

#[test]
fn feed_missing_file_is_io_error() {
    let config = test_config(std::path::Path::new("/nonexistent/posts.json"));
    match feed::load(&config) {
        Err(FeedError::Io(_)) => {}
        other => panic!("expected Io error, got {:?}", other.err()),
    }
}

#[test]
fn feed_bad_json_is_parse_error() {
    let path = write_feed("{not json");
    match feed::load(&test_config(&path)) {
        Err(FeedError::Parse(_)) => {}
        other => panic!("expected Parse error, got {:?}", other.err()),
    }
}

#[test]
fn feed_duplicate_id_is_invalid() {
    let path = write_feed(
        r#"{"posts": [
            {"id": "x", "title": "One", "date": "2024-01-01"},
            {"id": "x", "title": "Two", "date": "2024-01-02"}
        ]}"#,
    );
    match feed::load(&test_config(&path)) {
        Err(FeedError::Invalid(msg)) => assert!(msg.contains("duplicate")),
        other => panic!("expected Invalid error, got {:?}", other.err()),
    }
}

#[test]
fn feed_bad_date_is_invalid() {
    let path = write_feed(r#"{"posts": [{"id": "x", "title": "One", "date": "yesterday"}]}"#);
    match feed::load(&test_config(&path)) {
        Err(FeedError::Invalid(msg)) => assert!(msg.contains("date")),
        other => panic!("expected Invalid error, got {:?}", other.err()),
    }
}

#[test]
fn feed_renders_markdown_when_no_content() {
    let path = write_feed(
        r##"{"posts": [{"id": "m", "title": "Md", "date": "2024-01-01",
            "content_markdown": "# Hello\n\nworld"}]}"##,
    );
    let posts = feed::load(&test_config(&path)).unwrap();
    let content = posts[0].content.as_deref().unwrap();
    assert!(content.contains("<h1>Hello</h1>"));
    assert!(content.contains("<p>world</p>"));
}

#[test]
fn feed_neighbors_at_edges() {
    let path = write_feed(SAMPLE_FEED);
    let posts = feed::load(&test_config(&path)).unwrap();

    // Newest post (index 0): no newer neighbor
    let (prev, next) = feed::neighbors(&posts, 0);
    assert_eq!(prev.map(|p| p.id.as_str()), Some("2"));
    assert!(next.is_none());

    // Oldest post: no older neighbor
    let (prev, next) = feed::neighbors(&posts, posts.len() - 1);
    assert!(prev.is_none());
    assert_eq!(next.map(|p| p.id.as_str()), Some("2"));
}

// ═══════════════════════════════════════════════════════════
// Listing: filter
// ═══════════════════════════════════════════════════════════

#[test]
fn filter_parse() {
    assert_eq!(Filter::parse(None), Filter::All);
    assert_eq!(Filter::parse(Some("")), Filter::All);
    assert_eq!(Filter::parse(Some("all")), Filter::All);
    assert_eq!(Filter::parse(Some("All")), Filter::All);
    assert_eq!(Filter::parse(Some("web")), Filter::Slug("web".to_string()));
}

#[test]
fn filter_all_returns_everything_in_order() {
    let posts = vec![
        make_post("1", "2024-03-01", "Web", &[]),
        make_post("2", "2024-02-01", "Rust", &[]),
        make_post("3", "2024-01-01", "Web", &[]),
    ];
    let listing = Listing::paged(10, Filter::All, 1);
    let ids: Vec<&str> = listing.filtered(&posts).iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec!["1", "2", "3"]);
}

#[test]
fn filter_matches_category_or_tag_slug() {
    let posts = vec![
        make_post("1", "2024-03-01", "Rust Lang", &[]),
        make_post("2", "2024-02-01", "Web", &["rust lang"]),
        make_post("3", "2024-01-01", "Web", &["css"]),
    ];
    let listing = Listing::paged(10, Filter::Slug("rust-lang".to_string()), 1);
    let ids: Vec<&str> = listing.filtered(&posts).iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec!["1", "2"]);
}

#[test]
fn filter_change_resets_page() {
    let mut listing = Listing::paged(5, Filter::All, 1);
    listing.load_more();
    listing.load_more();
    assert_eq!(listing.page, 3);
    listing.set_filter(Filter::Slug("web".to_string()));
    assert_eq!(listing.page, 1);
}

// ═══════════════════════════════════════════════════════════
// Listing: pagination
// ═══════════════════════════════════════════════════════════

#[test]
fn pagination_window_grows_by_page_size() {
    let posts: Vec<Post> = (0..25)
        .map(|i| make_post(&format!("{}", i), &format!("2024-01-{:02}", 25 - i), "Web", &[]))
        .collect();

    let mut listing = Listing::paged(6, Filter::All, 1);
    for n in 0..6 {
        let expected = ((n + 1) * 6).min(25);
        assert_eq!(listing.visible(&posts).len(), expected, "after {} activations", n);
        listing.load_more();
    }
}

#[test]
fn load_more_absent_exactly_when_window_covers_set() {
    let posts: Vec<Post> = (0..12)
        .map(|i| make_post(&format!("{}", i), "2024-01-01", "Web", &[]))
        .collect();

    let listing = Listing::paged(6, Filter::All, 1);
    assert!(listing.has_more(&posts));

    let listing = Listing::paged(6, Filter::All, 2);
    assert!(!listing.has_more(&posts));

    // Exact boundary: 12 posts, window 12
    let listing = Listing::paged(12, Filter::All, 1);
    assert!(!listing.has_more(&posts));
}

#[test]
fn newly_revealed_is_the_appended_slice_only() {
    let posts: Vec<Post> = (0..15)
        .map(|i| make_post(&format!("{}", i), "2024-01-01", "Web", &[]))
        .collect();

    let listing = Listing::paged(6, Filter::All, 2);
    let ids: Vec<&str> = listing.newly_revealed(&posts).iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec!["6", "7", "8", "9", "10", "11"]);

    // Last partial page
    let listing = Listing::paged(6, Filter::All, 3);
    assert_eq!(listing.newly_revealed(&posts).len(), 3);

    // Past the end
    let listing = Listing::paged(6, Filter::All, 4);
    assert!(listing.newly_revealed(&posts).is_empty());
}

#[test]
fn preview_mode_fixed_count_no_load_more() {
    let posts: Vec<Post> = (0..10)
        .map(|i| make_post(&format!("{}", i), "2024-01-01", "Web", &[]))
        .collect();

    let listing = Listing::preview(3);
    assert_eq!(listing.visible(&posts).len(), 3);
    assert!(!listing.has_more(&posts));
    assert!(listing.is_preview());

    // Fewer posts than the preview count
    let listing = Listing::preview(3);
    assert_eq!(listing.visible(&posts[..2]).len(), 2);
}

// ═══════════════════════════════════════════════════════════
// Render helpers
// ═══════════════════════════════════════════════════════════

#[test]
fn html_escape_covers_markup_chars() {
    assert_eq!(
        render::html_escape(r#"<b>"a" & b</b>"#),
        "&lt;b&gt;&quot;a&quot; &amp; b&lt;/b&gt;"
    );
}

#[test]
fn truncate_words_adds_ellipsis() {
    assert_eq!(render::truncate_words("one two three", 2), "one two…");
    assert_eq!(render::truncate_words("one two", 5), "one two");
}

#[test]
fn strip_html_to_text_removes_tags() {
    assert_eq!(
        render::strip_html_to_text("<p>Hello <em>world</em></p>"),
        "Hello world"
    );
}

#[test]
fn format_date_uses_config_format() {
    let config = SiteConfig::default();
    assert_eq!(render::format_date("2024-03-05", &config), "March 05, 2024");
    // Unparseable input falls through untouched
    assert_eq!(render::format_date("soon", &config), "soon");
}

#[test]
fn reading_time_prefers_feed_value() {
    let mut post = make_post("1", "2024-01-01", "Web", &[]);
    post.read_time = Some("7 min read".to_string());
    assert_eq!(render::reading_time_label(&post), "7 min read");

    post.read_time = None;
    post.content = Some("<p>word</p>".repeat(450));
    assert_eq!(render::reading_time_label(&post), "3 min read");
}

#[test]
fn card_escapes_all_text_fields() {
    let config = SiteConfig::default();
    let mut post = make_post("1", "2024-01-01", "Dark <Arts>", &["<tag>"]);
    post.title = "A <script> & more".to_string();
    post.excerpt = "x < y & z".to_string();

    let html = render::render_card(&post, &config, 0, false);
    assert!(html.contains("A &lt;script&gt; &amp; more"));
    assert!(html.contains("x &lt; y &amp; z"));
    assert!(html.contains("Dark &lt;Arts&gt;"));
    assert!(html.contains("&lt;tag&gt;"));
    assert!(!html.contains("<script>"));
}

#[test]
fn card_placeholder_when_no_image() {
    let config = SiteConfig::default();
    let post = make_post("1", "2024-01-01", "Web", &[]);
    let html = render::render_card(&post, &config, 0, false);
    assert!(html.contains("card-thumb-letter"));
    assert!(html.contains(">W</a>"));
}

#[test]
fn cards_are_staggered_unless_reduced() {
    let config = SiteConfig::default();
    let posts = vec![
        make_post("1", "2024-01-02", "Web", &[]),
        make_post("2", "2024-01-01", "Web", &[]),
    ];
    let refs: Vec<&Post> = posts.iter().collect();

    let html = render::render_cards(&refs, &config, false);
    assert!(html.contains("animation-delay:100ms"));

    let html = render::render_cards(&refs, &config, true);
    assert!(!html.contains("animation-delay"));
    assert!(html.contains("reveal visible"));
}

#[test]
fn filter_chips_dedup_and_mark_active() {
    let posts = vec![
        make_post("1", "2024-01-03", "Web", &["css"]),
        make_post("2", "2024-01-02", "Web", &["rust lang"]),
        make_post("3", "2024-01-01", "Rust Lang", &[]),
    ];
    let chips = render::filter_chips(&posts, &Filter::Slug("web".to_string()));
    assert_eq!(chips.matches(">Web<").count(), 1);
    assert_eq!(chips.matches("rust-lang").count(), 1);
    assert!(chips.contains("chip active\">Web"));
}

#[test]
fn post_url_encodes_id() {
    assert_eq!(render::post_url("a b&c"), "/post?id=a%20b%26c");
}

// ═══════════════════════════════════════════════════════════
// SEO meta
// ═══════════════════════════════════════════════════════════

#[test]
fn meta_without_title_uses_site_name() {
    let config = SiteConfig::default();
    let meta = seo::build_meta(&config, &PageMeta { path: "/", ..Default::default() });
    assert!(meta.contains("<title>Portfolite</title>"));
    assert!(!meta.contains("og:image"));
}

#[test]
fn meta_escapes_and_includes_social_image() {
    let config = SiteConfig::default();
    let meta = seo::build_meta(
        &config,
        &PageMeta {
            title: Some("Tips & <Tricks>"),
            description: Some("desc"),
            image: Some("img/cover.png".to_string()),
            path: "/post?id=1",
        },
    );
    assert!(meta.contains("Tips &amp; &lt;Tricks&gt; — Portfolite"));
    assert!(meta.contains("og:image\" content=\"http://localhost:8000/img/cover.png"));
    assert!(meta.contains("twitter:image"));
}

// ═══════════════════════════════════════════════════════════
// Chrome: scroll animation math
// ═══════════════════════════════════════════════════════════

#[test]
fn ease_out_cubic_endpoints_and_shape() {
    assert_eq!(scroll::ease_out_cubic(0.0), 0.0);
    assert_eq!(scroll::ease_out_cubic(1.0), 1.0);
    // Ease-out: front-loaded progress
    assert!(scroll::ease_out_cubic(0.5) > 0.5);
    // Monotonic
    let mut last = 0.0;
    for i in 0..=20 {
        let v = scroll::ease_out_cubic(i as f64 / 20.0);
        assert!(v >= last);
        last = v;
    }
}

#[test]
fn counter_reaches_target_without_overshoot() {
    assert_eq!(scroll::counter_value(100, 0, 2000, false), 0);
    assert_eq!(scroll::counter_value(100, 2000, 2000, false), 100);
    assert_eq!(scroll::counter_value(100, 5000, 2000, false), 100);
    let mid = scroll::counter_value(100, 1000, 2000, false);
    assert!(mid > 0 && mid <= 100);
}

#[test]
fn counter_skips_to_target_under_reduced_motion() {
    assert_eq!(scroll::counter_value(100, 0, 2000, true), 100);
}

#[test]
fn stagger_delays_zero_under_reduced_motion() {
    assert_eq!(scroll::stagger_delays(3, 100, false), vec![0, 100, 200]);
    assert_eq!(scroll::stagger_delays(3, 100, true), vec![0, 0, 0]);
}

#[test]
fn counters_section_emits_final_values_under_reduced_motion() {
    let mut config = SiteConfig::default();
    config.stats = vec![StatCounter { label: "Projects".to_string(), target: 24 }];

    let html = scroll::counters_section(&config, true);
    assert!(html.contains(">24</span>"));
    assert!(html.contains("data-done=\"true\""));

    let html = scroll::counters_section(&config, false);
    assert!(html.contains(">0</span>"));
    assert!(html.contains("data-target=\"24\""));
}

// ═══════════════════════════════════════════════════════════
// Chrome: intro decision
// ═══════════════════════════════════════════════════════════

#[test]
fn intro_shows_by_default() {
    let config = SiteConfig::default();
    let prefs = intro::IntroPrefs::default();
    assert!(intro::should_show(&config.intro, &prefs, 1_700_000_000));
}

#[test]
fn intro_skip_conditions() {
    let config = SiteConfig::default();
    let now = 1_700_000_000;

    let prefs = intro::IntroPrefs { skip_param: true, ..Default::default() };
    assert!(!intro::should_show(&config.intro, &prefs, now));

    let prefs = intro::IntroPrefs { seen_this_session: true, ..Default::default() };
    assert!(!intro::should_show(&config.intro, &prefs, now));

    let prefs = intro::IntroPrefs { reduced_motion: true, ..Default::default() };
    assert!(!intro::should_show(&config.intro, &prefs, now));

    let mut disabled = config.intro.clone();
    disabled.enabled = false;
    assert!(!intro::should_show(&disabled, &intro::IntroPrefs::default(), now));
}

#[test]
fn intro_skip_expires_after_configured_hours() {
    let config = SiteConfig::default(); // 24h
    let now = 1_700_000_000;

    // Skipped one hour ago → still skipped
    let prefs = intro::IntroPrefs { skipped_at: Some(now - 3600), ..Default::default() };
    assert!(!intro::should_show(&config.intro, &prefs, now));

    // Skipped 25 hours ago → shows again
    let prefs = intro::IntroPrefs { skipped_at: Some(now - 25 * 3600), ..Default::default() };
    assert!(intro::should_show(&config.intro, &prefs, now));
}

#[test]
fn skip_cookie_parsing_tolerates_garbage() {
    assert_eq!(intro::parse_skip_cookie(Some("1700000000")), Some(1_700_000_000));
    assert_eq!(intro::parse_skip_cookie(Some("not a number")), None);
    assert_eq!(intro::parse_skip_cookie(None), None);
}

// ═══════════════════════════════════════════════════════════
// Chrome: navbar
// ═══════════════════════════════════════════════════════════

#[test]
fn navbar_active_link_matches_section() {
    assert!(navbar::is_active("/", "/"));
    assert!(!navbar::is_active("/", "/blog"));
    assert!(navbar::is_active("/blog", "/blog"));
    assert!(navbar::is_active("/blog", "/post"));
    assert!(!navbar::is_active("/blog", "/"));
}

// ═══════════════════════════════════════════════════════════
// Contact form
// ═══════════════════════════════════════════════════════════

fn contact_form(name: &str, email: &str, message: &str) -> ContactForm {
    ContactForm {
        name: name.to_string(),
        email: email.to_string(),
        subject: String::new(),
        message: message.to_string(),
        honeypot: None,
    }
}

#[test]
fn contact_validation() {
    assert!(contact_form("Ada", "ada@example.com", "Hi").validate().is_ok());
    assert!(contact_form("", "ada@example.com", "Hi").validate().is_err());
    assert!(contact_form("Ada", "not-an-email", "Hi").validate().is_err());
    assert!(contact_form("Ada", "ada@example.com", "  ").validate().is_err());
}

#[test]
fn contact_honeypot_detection() {
    let mut form = contact_form("Bot", "bot@spam.com", "Buy things");
    assert!(!form.is_honeypot());
    form.honeypot = Some("http://spam".to_string());
    assert!(form.is_honeypot());
}

// ═══════════════════════════════════════════════════════════
// RSS
// ═══════════════════════════════════════════════════════════

#[test]
fn rss_contains_escaped_items_newest_first() {
    let path = write_feed(SAMPLE_FEED);
    let config = test_config(&path);
    let posts = feed::load(&config).unwrap();
    let xml = rss::generate_feed(&config, &posts);

    assert!(xml.contains("<title>Portfolite</title>"));
    assert!(xml.contains("Middle &amp; &lt;Great&gt;"));
    assert!(xml.contains("/post?id=3"));
    let newest = xml.find("<title>Newest</title>").unwrap();
    let oldest = xml.find("<title>Oldest</title>").unwrap();
    assert!(newest < oldest);
}

// ═══════════════════════════════════════════════════════════
// Config
// ═══════════════════════════════════════════════════════════

#[test]
fn config_missing_file_gives_defaults() {
    let config = SiteConfig::load_from("/nonexistent/Portfolite.toml");
    assert_eq!(config.site.name, "Portfolite");
    assert_eq!(config.content.page_size, 6);
    assert!(config.intro.enabled);
}

#[test]
fn config_partial_file_keeps_other_defaults() {
    let path = temp_path("toml");
    fs::write(&path, "[site]\nname = \"My Site\"\n\n[content]\npage_size = 9\n").unwrap();
    let config = SiteConfig::load_from(path.to_str().unwrap());
    assert_eq!(config.site.name, "My Site");
    assert_eq!(config.content.page_size, 9);
    assert_eq!(config.content.preview_count, 3);
    assert_eq!(config.intro.skip_hours, 24);
}

#[test]
fn config_detects_remote_feed() {
    let mut config = SiteConfig::default();
    assert!(!config.feed_is_remote());
    config.content.feed = "https://example.com/posts.json".to_string();
    assert!(config.feed_is_remote());
}

// ═══════════════════════════════════════════════════════════
// Routes
// ═══════════════════════════════════════════════════════════

#[test]
fn detail_renders_matching_post_escaped() {
    let path = write_feed(SAMPLE_FEED);
    let client = test_client(test_config(&path));

    let body = client.get("/post?id=2").dispatch().into_string().unwrap();
    assert!(body.contains("Middle &amp; &lt;Great&gt;"));
    assert!(body.contains("og:title"));
    // Trusted content goes through unescaped
    assert!(body.contains("<p>two</p>"));
}

#[test]
fn detail_not_found_has_no_post_metadata() {
    let path = write_feed(SAMPLE_FEED);
    let client = test_client(test_config(&path));

    let body = client.get("/post?id=99").dispatch().into_string().unwrap();
    assert!(body.contains("could not be found"));
    assert!(body.contains("Back to the blog"));
    assert!(body.contains("<title>Portfolite</title>"));
    assert!(!body.contains("og:image"));

    // Missing id parameter behaves the same
    let body = client.get("/post").dispatch().into_string().unwrap();
    assert!(body.contains("could not be found"));
}

#[test]
fn detail_links_chronological_neighbors() {
    let path = write_feed(SAMPLE_FEED);
    let client = test_client(test_config(&path));

    // Middle post links both ways
    let body = client.get("/post?id=2").dispatch().into_string().unwrap();
    assert!(body.contains("/post?id=1"));
    assert!(body.contains("/post?id=3"));

    // Newest post has no "next newer" link
    let body = client.get("/post?id=3").dispatch().into_string().unwrap();
    assert!(body.contains("/post?id=2"));
    assert!(!body.contains("nav-next"));
}

#[test]
fn blog_lists_cards_with_load_more() {
    let mut posts = String::from("{\"posts\": [");
    for i in 0..10 {
        if i > 0 {
            posts.push(',');
        }
        posts.push_str(&format!(
            "{{\"id\": \"{i}\", \"title\": \"T{i}\", \"date\": \"2024-01-{:02}\", \"category\": \"Web\"}}",
            i + 1
        ));
    }
    posts.push_str("]}");
    let path = write_feed(&posts);
    let client = test_client(test_config(&path)); // page_size 6

    let body = client.get("/blog").dispatch().into_string().unwrap();
    assert_eq!(body.matches("<article").count(), 6);
    assert!(body.contains("load-more-btn"));
    assert!(body.contains("data-page=\"2\""));

    // Second page covers the set → no control
    let body = client.get("/blog?page=2").dispatch().into_string().unwrap();
    assert_eq!(body.matches("<article").count(), 10);
    assert!(!body.contains("load-more-btn"));
}

#[test]
fn blog_filter_narrows_and_resets_window() {
    let path = write_feed(SAMPLE_FEED);
    let client = test_client(test_config(&path));

    let body = client.get("/blog?filter=web").dispatch().into_string().unwrap();
    assert_eq!(body.matches("<article").count(), 2);
    assert!(!body.contains("Oldest"));

    let body = client.get("/blog?filter=rust-lang").dispatch().into_string().unwrap();
    // Matches category "Rust Lang" and tag "rust lang"
    assert_eq!(body.matches("<article").count(), 2);
}

#[test]
fn blog_cards_fragment_returns_slice_and_marker() {
    let mut posts = String::from("{\"posts\": [");
    for i in 0..15 {
        if i > 0 {
            posts.push(',');
        }
        posts.push_str(&format!(
            "{{\"id\": \"{i}\", \"title\": \"T{i}\", \"date\": \"2024-01-{:02}\"}}",
            i + 1
        ));
    }
    posts.push_str("]}");
    let path = write_feed(&posts);
    let client = test_client(test_config(&path));

    let body = client.get("/blog/cards?page=2").dispatch().into_string().unwrap();
    assert_eq!(body.matches("<article").count(), 6);
    assert!(body.contains("data-has-more=\"true\""));
    // No page shell in a fragment
    assert!(!body.contains("<html"));

    let body = client.get("/blog/cards?page=3").dispatch().into_string().unwrap();
    assert_eq!(body.matches("<article").count(), 3);
    assert!(body.contains("data-has-more=\"false\""));
}

#[test]
fn blog_feed_failure_renders_retry_state() {
    let client = test_client(test_config(std::path::Path::new("/nonexistent.json")));
    let body = client.get("/blog").dispatch().into_string().unwrap();
    assert!(body.contains("Could not load posts"));
    assert!(body.contains("Retry"));
}

#[test]
fn homepage_serves_intro_once_per_session() {
    let path = write_feed(SAMPLE_FEED);
    let client = test_client(test_config(&path));

    let response = client.get("/").dispatch();
    let set_cookie = response.cookies().get(intro::SEEN_COOKIE).is_some();
    let body = response.into_string().unwrap();
    assert!(body.contains("intro-overlay"));
    assert!(set_cookie);

    // Tracked client keeps the session cookie
    let body = client.get("/").dispatch().into_string().unwrap();
    assert!(!body.contains("intro-overlay"));
}

#[test]
fn homepage_skip_param_bypasses_intro() {
    let path = write_feed(SAMPLE_FEED);
    let client = test_client(test_config(&path));
    let body = client.get("/?skip=1").dispatch().into_string().unwrap();
    assert!(!body.contains("intro-overlay"));
    // Hero is revealed immediately when no overlay runs
    assert!(body.contains("hero-item visible"));
}

#[test]
fn homepage_reduced_motion_collapses_animation() {
    let path = write_feed(SAMPLE_FEED);
    let mut config = test_config(&path);
    config.stats = vec![StatCounter { label: "Posts".to_string(), target: 42 }];
    let client = test_client(config);

    let body = client
        .get("/")
        .header(Header::new("Sec-CH-Prefers-Reduced-Motion", "reduce"))
        .dispatch()
        .into_string()
        .unwrap();
    assert!(!body.contains("intro-overlay"));
    assert!(body.contains(">42</span>"));
    assert!(!body.contains("animation-delay"));
}

#[test]
fn homepage_preview_has_no_load_more() {
    let path = write_feed(SAMPLE_FEED);
    let client = test_client(test_config(&path));
    let body = client.get("/?skip=1").dispatch().into_string().unwrap();
    assert!(body.matches("<article").count() <= 3);
    assert!(!body.contains("load-more-btn"));
}

#[test]
fn contact_endpoint_accepts_and_stores() {
    let path = write_feed(SAMPLE_FEED);
    let mut config = test_config(&path);
    let outbox = temp_path("jsonl");
    config.contact.outbox = outbox.to_string_lossy().to_string();
    let client = test_client(config);

    let response = client
        .post("/api/contact")
        .header(ContentType::JSON)
        .body(r#"{"name": "Ada", "email": "ada@example.com", "message": "Hello"}"#)
        .dispatch();
    let body = response.into_string().unwrap();
    assert!(body.contains("\"success\":true"));

    let saved = fs::read_to_string(&outbox).unwrap();
    assert!(saved.contains("ada@example.com"));
}

#[test]
fn contact_endpoint_rejects_invalid_and_drops_bots() {
    let path = write_feed(SAMPLE_FEED);
    let mut config = test_config(&path);
    let outbox = temp_path("jsonl");
    config.contact.outbox = outbox.to_string_lossy().to_string();
    let client = test_client(config);

    let body = client
        .post("/api/contact")
        .header(ContentType::JSON)
        .body(r#"{"name": "Ada", "email": "nope", "message": "Hello"}"#)
        .dispatch()
        .into_string()
        .unwrap();
    assert!(body.contains("\"success\":false"));

    // Honeypot: claims success, stores nothing
    let body = client
        .post("/api/contact")
        .header(ContentType::JSON)
        .body(r#"{"name": "Bot", "email": "bot@spam.com", "message": "Spam", "honeypot": "x"}"#)
        .dispatch()
        .into_string()
        .unwrap();
    assert!(body.contains("\"success\":true"));
    assert!(!outbox.exists());
}

#[test]
fn rss_route_serves_xml() {
    let path = write_feed(SAMPLE_FEED);
    let client = test_client(test_config(&path));
    let body = client.get("/feed").dispatch().into_string().unwrap();
    assert!(body.starts_with("<?xml"));
    assert!(body.contains("<rss version=\"2.0\""));
}
