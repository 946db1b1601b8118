use crate::chrome;
use crate::config::SiteConfig;
use crate::listing::{Filter, Listing};
use crate::models::post::{category_hue, category_initial, filter_slug, Post};

pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

pub fn urlencode(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for b in s.bytes() {
        match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(b as char)
            }
            _ => out.push_str(&format!("%{:02X}", b)),
        }
    }
    out
}

/// Format a feed date per the configured format and timezone.
/// Unparseable input falls back to the raw string.
pub fn format_date(raw: &str, config: &SiteConfig) -> String {
    let naive = chrono::NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S").or_else(|_| {
        chrono::NaiveDateTime::parse_from_str(&format!("{} 00:00:00", raw), "%Y-%m-%d %H:%M:%S")
    });

    match naive {
        Ok(ndt) => {
            let utc_dt = chrono::DateTime::<chrono::Utc>::from_naive_utc_and_offset(ndt, chrono::Utc);
            if let Ok(tz) = config.content.timezone.parse::<chrono_tz::Tz>() {
                utc_dt.with_timezone(&tz).format(&config.content.date_format).to_string()
            } else {
                utc_dt.format(&config.content.date_format).to_string()
            }
        }
        Err(_) => raw.to_string(),
    }
}

pub fn truncate_words(text: &str, max_words: usize) -> String {
    let words: Vec<&str> = text.split_whitespace().collect();
    if words.len() <= max_words {
        text.to_string()
    } else {
        let mut result = words[..max_words].join(" ");
        result.push('…');
        result
    }
}

/// Strip tags from an HTML fragment, leaving the text content.
pub fn strip_html_to_text(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let mut in_tag = false;
    for c in html.chars() {
        match c {
            '<' => in_tag = true,
            '>' => {
                in_tag = false;
                out.push(' ');
            }
            c if !in_tag => out.push(c),
            _ => {}
        }
    }
    out.split_whitespace().collect::<Vec<_>>().join(" ")
}

pub fn count_words_html(html: &str) -> usize {
    strip_html_to_text(html).split_whitespace().count()
}

/// The card's read-time label: the feed's own string when present,
/// otherwise an estimate at 200 wpm.
pub fn reading_time_label(post: &Post) -> String {
    if let Some(rt) = &post.read_time {
        return rt.clone();
    }
    let words = post.content.as_deref().map(count_words_html).unwrap_or(0);
    let minutes = ((words as f64) / 200.0).ceil().max(1.0) as i64;
    format!("{} min read", minutes)
}

pub fn post_url(id: &str) -> String {
    format!("/post?id={}", urlencode(id))
}

pub fn filter_url(slug: &str) -> String {
    format!("/blog?filter={}", urlencode(slug))
}

// ── Cards ──────────────────────────────────────────────

/// Render one post card. `delay_ms` drives the staggered entrance;
/// `revealed` renders the card already visible (reduced motion).
pub fn render_card(post: &Post, config: &SiteConfig, delay_ms: u64, revealed: bool) -> String {
    let url = post_url(&post.id);
    let date = format_date(&post.date, config);

    let thumb = match &post.image {
        Some(img) if !img.is_empty() => format!(
            "<a href=\"{}\" class=\"card-thumb\"><img src=\"{}\" alt=\"{}\" loading=\"lazy\"></a>",
            url,
            html_escape(img),
            html_escape(&post.title)
        ),
        _ => format!(
            "<a href=\"{}\" class=\"card-thumb card-thumb-letter\" style=\"background:hsl({},45%,55%)\">{}</a>",
            url,
            category_hue(&post.category),
            html_escape(&category_initial(&post.category))
        ),
    };

    let category_html = if post.category.is_empty() {
        String::new()
    } else {
        format!(
            "<a href=\"{}\" class=\"card-category\">{}</a>",
            filter_url(&filter_slug(&post.category)),
            html_escape(&post.category)
        )
    };

    let tags_html: String = post
        .tags
        .iter()
        .map(|t| {
            format!(
                "<a href=\"{}\" class=\"card-tag\">{}</a>",
                filter_url(&filter_slug(t)),
                html_escape(t)
            )
        })
        .collect::<Vec<_>>()
        .join(" ");

    let class = if revealed { "card reveal visible" } else { "card reveal" };
    let style = if revealed || delay_ms == 0 {
        String::new()
    } else {
        format!(" style=\"animation-delay:{}ms\"", delay_ms)
    };

    format!(
        "<article class=\"{class}\"{style}>\
         {thumb}\
         <div class=\"card-body\">\
         <div class=\"card-meta\">{category}<time>{date}</time><span class=\"card-readtime\">{readtime}</span></div>\
         <h2><a href=\"{url}\">{title}</a></h2>\
         <p class=\"card-excerpt\">{excerpt}</p>\
         <div class=\"card-tags\">{tags}</div>\
         </div>\
         </article>",
        class = class,
        style = style,
        thumb = thumb,
        category = category_html,
        date = html_escape(&date),
        readtime = html_escape(&reading_time_label(post)),
        url = url,
        title = html_escape(&post.title),
        excerpt = html_escape(&truncate_words(&post.excerpt, 40)),
        tags = tags_html,
    )
}

/// Render a run of cards with the configured stagger. The stagger restarts
/// at zero for every run so appended load-more slices animate from the top.
pub fn render_cards(posts: &[&Post], config: &SiteConfig, reduced_motion: bool) -> String {
    let delays = chrome::scroll::stagger_delays(posts.len(), config.animation.stagger_ms, reduced_motion);
    posts
        .iter()
        .zip(delays)
        .map(|(post, delay)| render_card(post, config, delay, reduced_motion))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Filter chips above the grid: "All" plus every category and tag in
/// first-seen order, deduplicated by slug.
pub fn filter_chips(posts: &[Post], active: &Filter) -> String {
    let mut seen: Vec<String> = Vec::new();
    let mut chips = String::from("<div class=\"filter-chips\">");

    let all_class = if *active == Filter::All { "chip active" } else { "chip" };
    chips.push_str(&format!("<a href=\"/blog\" class=\"{}\">All</a>", all_class));

    let mut push_chip = |label: &str, chips: &mut String| {
        let slug = filter_slug(label);
        if slug.is_empty() || seen.iter().any(|s| *s == slug) {
            return;
        }
        seen.push(slug.clone());
        let class = if active.slug() == Some(slug.as_str()) { "chip active" } else { "chip" };
        chips.push_str(&format!(
            "<a href=\"{}\" class=\"{}\">{}</a>",
            filter_url(&slug),
            class,
            html_escape(label)
        ));
    };

    for post in posts {
        if !post.category.is_empty() {
            push_chip(&post.category, &mut chips);
        }
    }
    for post in posts {
        for tag in &post.tags {
            push_chip(tag, &mut chips);
        }
    }

    chips.push_str("</div>");
    chips
}

/// The load-more control plus its fetch-and-append script.
/// Only emitted while the window does not cover the filtered set.
pub fn load_more_control(listing: &Listing, posts: &[Post]) -> String {
    if !listing.has_more(posts) {
        return String::new();
    }
    let filter_param = listing
        .filter
        .slug()
        .map(|s| format!("&filter={}", urlencode(s)))
        .unwrap_or_default();
    format!(
        "<div class=\"load-more-wrap\">\
<button id=\"load-more-btn\" data-page=\"{next}\" data-params=\"{params}\">Load More</button></div>\n\
<script>\n\
(function(){{\n\
var btn=document.getElementById('load-more-btn');\n\
if(!btn)return;\n\
btn.addEventListener('click',function(){{\n\
    btn.disabled=true;btn.textContent='Loading…';\n\
    var page=parseInt(btn.dataset.page);\n\
    fetch('/blog/cards?page='+page+btn.dataset.params)\n\
    .then(function(r){{if(!r.ok)throw new Error(r.status);return r.text()}})\n\
    .then(function(html){{\n\
        var grid=document.getElementById('post-grid');\n\
        var tmp=document.createElement('div');\n\
        tmp.innerHTML=html;\n\
        var more=tmp.querySelector('#load-more-state');\n\
        while(tmp.firstChild){{\n\
            if(tmp.firstChild.id==='load-more-state'){{tmp.removeChild(tmp.firstChild);continue;}}\n\
            grid.appendChild(tmp.firstChild);\n\
        }}\n\
        if(more&&more.dataset.hasMore==='true'){{\n\
            btn.dataset.page=page+1;btn.disabled=false;btn.textContent='Load More';\n\
        }}else{{\n\
            btn.parentNode.removeChild(btn);\n\
        }}\n\
        if(window.portfoliteObserve)window.portfoliteObserve(grid);\n\
    }})\n\
    .catch(function(){{btn.disabled=false;btn.textContent='Load More';}});\n\
}});\n\
}})();\n\
</script>",
        next = listing.page + 1,
        params = filter_param,
    )
}

// ── Error states ───────────────────────────────────────

/// Textual degraded state with a manual action (retry or back-navigation).
pub fn error_state(message: &str, action_href: &str, action_label: &str) -> String {
    format!(
        "<div class=\"error-state\"><p>{}</p><a href=\"{}\" class=\"error-action\">{}</a></div>",
        html_escape(message),
        html_escape(action_href),
        html_escape(action_label)
    )
}

// ── Page shell ─────────────────────────────────────────

/// Assemble a full page: head (meta block), navbar, body, footer,
/// back-to-top, and the shared scroll/observer script.
pub fn page(
    config: &SiteConfig,
    meta_html: &str,
    active_path: &str,
    body: &str,
    reduced_motion: bool,
) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n\
<meta charset=\"utf-8\">\n\
<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
{meta}\n\
<link rel=\"stylesheet\" href=\"/static/css/site.css\">\n\
<link rel=\"alternate\" type=\"application/rss+xml\" title=\"{name}\" href=\"/feed\">\n\
</head>\n<body>\n\
{navbar}\n\
<main id=\"main\">\n{body}\n</main>\n\
<footer class=\"site-footer\"><p>&copy; {year} {name}</p></footer>\n\
{back_to_top}\n\
{observer}\n\
</body>\n</html>",
        meta = meta_html,
        name = html_escape(&config.site.name),
        navbar = chrome::navbar::build(config, active_path),
        body = body,
        year = chrono::Utc::now().format("%Y"),
        back_to_top = chrome::navbar::back_to_top(),
        observer = chrome::scroll::observer_script(config, reduced_motion),
    )
}
