use crate::config::SiteConfig;
use crate::render::html_escape;

/// Per-page metadata inputs. `None` fields fall back to site defaults.
#[derive(Debug, Default)]
pub struct PageMeta<'a> {
    pub title: Option<&'a str>,
    pub description: Option<&'a str>,
    pub image: Option<String>,
    pub path: &'a str,
}

/// Build the head meta block: title, description, canonical, Open Graph,
/// Twitter card. Social image tags are only emitted when the page has one.
pub fn build_meta(config: &SiteConfig, meta: &PageMeta) -> String {
    let site_name = &config.site.name;
    let page_title = match meta.title {
        Some(t) => format!("{} — {}", t, site_name),
        None => site_name.clone(),
    };
    let page_desc = meta.description.unwrap_or(&config.site.description);
    let canonical = format!("{}{}", config.site.url.trim_end_matches('/'), meta.path);

    let mut out = format!(
        "<title>{}</title>\n\
<meta name=\"description\" content=\"{}\">\n\
<link rel=\"canonical\" href=\"{}\">",
        html_escape(&page_title),
        html_escape(page_desc),
        html_escape(&canonical),
    );

    out.push_str(&format!(
        "\n<meta property=\"og:title\" content=\"{}\">\n\
<meta property=\"og:description\" content=\"{}\">\n\
<meta property=\"og:url\" content=\"{}\">\n\
<meta property=\"og:site_name\" content=\"{}\">\n\
<meta property=\"og:type\" content=\"website\">",
        html_escape(&page_title),
        html_escape(page_desc),
        html_escape(&canonical),
        html_escape(site_name),
    ));

    out.push_str(&format!(
        "\n<meta name=\"twitter:card\" content=\"summary_large_image\">\n\
<meta name=\"twitter:title\" content=\"{}\">\n\
<meta name=\"twitter:description\" content=\"{}\">",
        html_escape(&page_title),
        html_escape(page_desc),
    ));

    if let Some(image) = &meta.image {
        let absolute = if image.starts_with("http://") || image.starts_with("https://") {
            image.clone()
        } else {
            format!(
                "{}/{}",
                config.site.url.trim_end_matches('/'),
                image.trim_start_matches('/')
            )
        };
        out.push_str(&format!(
            "\n<meta property=\"og:image\" content=\"{img}\">\n\
<meta name=\"twitter:image\" content=\"{img}\">",
            img = html_escape(&absolute),
        ));
    }

    out
}
