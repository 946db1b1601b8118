use chrono::Utc;
use rocket::http::{Cookie, CookieJar};
use rocket::response::content::{RawHtml, RawXml};
use rocket::State;

use crate::chrome::{self, intro, MotionPrefs};
use crate::config::SiteConfig;
use crate::feed;
use crate::listing::{Filter, Listing};
use crate::models::post::Post;
use crate::render;
use crate::rss;
use crate::seo::{self, PageMeta};

// ── Homepage ───────────────────────────────────────────

#[get("/?<skip>")]
pub fn homepage(
    config: &State<SiteConfig>,
    motion: MotionPrefs,
    cookies: &CookieJar<'_>,
    skip: Option<&str>,
) -> RawHtml<String> {
    let prefs = intro::IntroPrefs {
        skip_param: skip.is_some(),
        seen_this_session: cookies.get(intro::SEEN_COOKIE).is_some(),
        skipped_at: intro::parse_skip_cookie(cookies.get(intro::SKIP_COOKIE).map(|c| c.value())),
        reduced_motion: motion.reduced,
    };
    let show_intro = intro::should_show(&config.intro, &prefs, Utc::now().timestamp());
    if show_intro {
        cookies.add(Cookie::build((intro::SEEN_COOKIE, "1")).path("/"));
    }

    let mut body = String::new();
    if show_intro {
        body.push_str(&intro::overlay(
            &config.intro,
            &config.site.name,
            config.animation.stagger_ms,
        ));
    }

    // Hero. Items start hidden only while the overlay owns the reveal.
    let hero_class = if show_intro { "hero-item" } else { "hero-item visible" };
    body.push_str(&format!(
        "<section id=\"hero\" class=\"hero\">\n\
<h1 class=\"{cls}\" data-hero>{name}</h1>\n\
<p class=\"{cls}\" data-hero>{tagline}</p>\n\
{author}\n\
</section>",
        cls = hero_class,
        name = render::html_escape(&config.site.name),
        tagline = render::html_escape(&config.site.tagline),
        author = chrome::contact::author_line(config),
    ));

    body.push_str(&chrome::scroll::counters_section(config, motion.reduced));

    // Teaser listing: fixed small count, no pagination controls
    body.push_str("<section id=\"latest\" class=\"latest reveal\"><h2>Latest posts</h2>");
    match feed::load_logged(config) {
        Ok(posts) => {
            let listing = Listing::preview(config.content.preview_count);
            let visible = listing.visible(&posts);
            body.push_str("<div class=\"card-grid\">");
            body.push_str(&render::render_cards(&visible, config, motion.reduced));
            body.push_str("</div><a href=\"/blog\" class=\"all-posts-link\">View all posts →</a>");
        }
        Err(_) => {
            body.push_str(&render::error_state(
                "Could not load posts right now.",
                "/",
                "Retry",
            ));
        }
    }
    body.push_str("</section>");

    body.push_str(&chrome::contact::section(config));

    let meta = seo::build_meta(
        config,
        &PageMeta {
            title: None,
            description: Some(&config.site.description),
            image: None,
            path: "/",
        },
    );
    RawHtml(render::page(config, &meta, "/", &body, motion.reduced))
}

// ── Blog listing ───────────────────────────────────────

#[get("/blog?<filter>&<page>")]
pub fn blog_list(
    config: &State<SiteConfig>,
    motion: MotionPrefs,
    filter: Option<&str>,
    page: Option<usize>,
) -> RawHtml<String> {
    let listing = Listing::paged(
        config.content.page_size,
        Filter::parse(filter),
        page.unwrap_or(1),
    );

    let body = match feed::load_logged(config) {
        Ok(posts) => {
            let visible = listing.visible(&posts);
            let grid_body = if visible.is_empty() {
                "<p class=\"empty-state\">No posts match this filter.</p>".to_string()
            } else {
                render::render_cards(&visible, config, motion.reduced)
            };
            format!(
                "<h1>Blog</h1>\n{chips}\n<div id=\"post-grid\" class=\"card-grid\">\n{cards}\n</div>\n{more}",
                chips = render::filter_chips(&posts, &listing.filter),
                cards = grid_body,
                more = render::load_more_control(&listing, &posts),
            )
        }
        Err(_) => {
            let retry = listing
                .filter
                .slug()
                .map(|s| render::filter_url(s))
                .unwrap_or_else(|| "/blog".to_string());
            format!(
                "<h1>Blog</h1>\n{}",
                render::error_state("Could not load posts right now.", &retry, "Retry")
            )
        }
    };

    let meta = seo::build_meta(
        config,
        &PageMeta {
            title: Some("Blog"),
            description: Some(&config.site.description),
            image: None,
            path: "/blog",
        },
    );
    RawHtml(render::page(config, &meta, "/blog", &body, motion.reduced))
}

/// Load-more fragment: only the newly revealed slice of cards, plus a
/// marker telling the client whether another page remains.
#[get("/blog/cards?<filter>&<page>")]
pub fn blog_cards(
    config: &State<SiteConfig>,
    motion: MotionPrefs,
    filter: Option<&str>,
    page: Option<usize>,
) -> RawHtml<String> {
    let listing = Listing::paged(
        config.content.page_size,
        Filter::parse(filter),
        page.unwrap_or(1),
    );

    match feed::load_logged(config) {
        Ok(posts) => {
            let slice = listing.newly_revealed(&posts);
            let mut html = render::render_cards(&slice, config, motion.reduced);
            html.push_str(&format!(
                "\n<div id=\"load-more-state\" data-has-more=\"{}\"></div>",
                listing.has_more(&posts)
            ));
            RawHtml(html)
        }
        Err(_) => RawHtml(render::error_state(
            "Could not load more posts.",
            "/blog",
            "Reload",
        )),
    }
}

// ── Post detail ────────────────────────────────────────

#[get("/post?<id>")]
pub fn post_detail(
    config: &State<SiteConfig>,
    motion: MotionPrefs,
    id: Option<&str>,
) -> RawHtml<String> {
    let posts = match feed::load_logged(config) {
        Ok(p) => p,
        Err(_) => {
            let body = render::error_state("Could not load this post right now.", "/blog", "Retry");
            let meta = seo::build_meta(config, &PageMeta { path: "/post", ..Default::default() });
            return RawHtml(render::page(config, &meta, "/post", &body, motion.reduced));
        }
    };

    let found = id.and_then(|id| feed::find_by_id(&posts, id));
    let (index, post) = match found {
        Some(hit) => hit,
        None => {
            // Not found: message + way back, site-default metadata only
            let body = render::error_state(
                "That post could not be found.",
                "/blog",
                "← Back to the blog",
            );
            let meta = seo::build_meta(config, &PageMeta { path: "/post", ..Default::default() });
            return RawHtml(render::page(config, &meta, "/post", &body, motion.reduced));
        }
    };

    let body = render_post(config, &posts, index, post);
    let path = render::post_url(&post.id);
    let description = if post.excerpt.is_empty() {
        render::truncate_words(
            &render::strip_html_to_text(post.content.as_deref().unwrap_or("")),
            30,
        )
    } else {
        post.excerpt.clone()
    };
    let meta = seo::build_meta(
        config,
        &PageMeta {
            title: Some(&post.title),
            description: Some(&description),
            image: post.image.clone(),
            path: &path,
        },
    );
    RawHtml(render::page(config, &meta, "/post", &body, motion.reduced))
}

fn render_post(config: &SiteConfig, posts: &[Post], index: usize, post: &Post) -> String {
    let date = render::format_date(&post.date, config);
    let author = if post.author.is_empty() {
        String::new()
    } else {
        format!(" · <span>{}</span>", render::html_escape(&post.author))
    };

    let category_html = if post.category.is_empty() {
        String::new()
    } else {
        format!(
            "<a href=\"{}\" class=\"post-category\">{}</a>",
            render::filter_url(&crate::models::post::filter_slug(&post.category)),
            render::html_escape(&post.category)
        )
    };

    // Trusted content is the one unescaped insertion in the whole site
    let content_html = match &post.content {
        Some(html) => html.clone(),
        None => format!("<p>{}</p>", render::html_escape(&post.excerpt)),
    };

    let tags_html: String = post
        .tags
        .iter()
        .map(|t| {
            format!(
                "<a href=\"{}\" class=\"card-tag\">{}</a>",
                render::filter_url(&crate::models::post::filter_slug(t)),
                render::html_escape(t)
            )
        })
        .collect::<Vec<_>>()
        .join(" ");

    let (prev, next) = feed::neighbors(posts, index);
    let mut nav = String::new();
    if let Some(prev) = prev {
        nav.push_str(&format!(
            "<a href=\"{}\" class=\"nav-prev\">&larr; {}</a>",
            render::post_url(&prev.id),
            render::html_escape(&prev.title)
        ));
    }
    if let Some(next) = next {
        nav.push_str(&format!(
            "<a href=\"{}\" class=\"nav-next\">{} &rarr;</a>",
            render::post_url(&next.id),
            render::html_escape(&next.title)
        ));
    }

    format!(
        "<article class=\"post\">\n\
<header class=\"post-header\">\n\
{category}\n\
<h1>{title}</h1>\n\
<div class=\"post-meta\"><time>{date}</time>{author}<span class=\"card-readtime\">{readtime}</span></div>\n\
</header>\n\
<div id=\"post-content\" class=\"post-content\">{content}</div>\n\
<div class=\"post-tags\">{tags}</div>\n\
<nav class=\"post-nav\">{nav}</nav>\n\
</article>",
        category = category_html,
        title = render::html_escape(&post.title),
        date = render::html_escape(&date),
        author = author,
        readtime = render::html_escape(&render::reading_time_label(post)),
        content = content_html,
        tags = tags_html,
        nav = nav,
    )
}

// ── RSS / robots ───────────────────────────────────────

#[get("/feed")]
pub fn rss_feed(config: &State<SiteConfig>) -> RawXml<String> {
    let posts = feed::load_logged(config).unwrap_or_default();
    RawXml(rss::generate_feed(config, &posts))
}

#[get("/robots.txt")]
pub fn robots() -> &'static str {
    "User-agent: *\nAllow: /\n"
}

pub fn routes() -> Vec<rocket::Route> {
    routes![homepage, blog_list, blog_cards, post_detail, rss_feed, robots]
}
