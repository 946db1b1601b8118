use chrono::{DateTime, Utc};

use crate::config::SiteConfig;
use crate::models::post::Post;
use crate::render::urlencode;

/// Generate the RSS 2.0 feed from an already-sorted post set.
pub fn generate_feed(config: &SiteConfig, posts: &[Post]) -> String {
    let site_url = config.site.url.trim_end_matches('/');
    let tz_name = &config.content.timezone;

    // RSS wants RFC 2822 dates, rendered in the configured timezone
    let format_rfc2822 = |ndt: chrono::NaiveDateTime| -> String {
        let utc: DateTime<Utc> = DateTime::from_naive_utc_and_offset(ndt, Utc);
        if let Ok(tz) = tz_name.parse::<chrono_tz::Tz>() {
            utc.with_timezone(&tz)
                .format("%a, %d %b %Y %H:%M:%S %z")
                .to_string()
        } else {
            utc.format("%a, %d %b %Y %H:%M:%S +0000").to_string()
        }
    };

    let last_build = posts
        .first()
        .and_then(|p| p.parsed_date())
        .map(|d| format!("    <lastBuildDate>{}</lastBuildDate>\n", format_rfc2822(d)))
        .unwrap_or_default();

    let mut xml = format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0" xmlns:atom="http://www.w3.org/2005/Atom">
<channel>
    <title>{title}</title>
    <link>{url}</link>
    <description>{desc}</description>
    <atom:link href="{url}/feed" rel="self" type="application/rss+xml"/>
    <language>en</language>
{last_build}"#,
        title = xml_escape(&config.site.name),
        url = xml_escape(site_url),
        desc = xml_escape(&config.site.tagline),
        last_build = last_build,
    );

    for post in posts.iter().take(25) {
        let pub_date = post.parsed_date().map(&format_rfc2822).unwrap_or_default();
        let link = format!("{}/post?id={}", site_url, urlencode(&post.id));

        xml.push_str(&format!(
            r#"    <item>
        <title>{title}</title>
        <link>{link}</link>
        <guid isPermaLink="true">{link}</guid>
        <pubDate>{date}</pubDate>
        <description>{desc}</description>
    </item>
"#,
            title = xml_escape(&post.title),
            link = xml_escape(&link),
            date = pub_date,
            desc = xml_escape(&post.excerpt),
        ));
    }

    xml.push_str("</channel>\n</rss>");
    xml
}

fn xml_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
