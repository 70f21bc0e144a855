//! Shared HTML components for preview pages.
//!
//! The page shell fixes the head emission order: charset/viewport, icon
//! links, analytics bootstrap, title, description, canonical, Open Graph
//! block (with any entity-specific OG tags at its tail), Twitter Card
//! block, then any remaining head extras.

use maud::{DOCTYPE, Markup, PreEscaped, html};

use crate::config::Config;

/// Social-platform snippet limit for meta descriptions.
const DESCRIPTION_LIMIT: usize = 160;

/// Characters kept when a description is truncated (plus `...` = 160).
const DESCRIPTION_KEEP: usize = 157;

/// Open Graph metadata for a page.
pub struct OpenGraphData<'a> {
    /// OG title.
    pub title: &'a str,
    /// OG description (already truncated by the caller).
    pub description: &'a str,
    /// OG type (e.g., "product", "website").
    pub og_type: &'a str,
    /// OG image URL; the caller falls back to the site logo, so this is
    /// always present.
    pub image: &'a str,
    /// Alt text for the OG image.
    pub image_alt: &'a str,
}

/// Render the full HTML page shell with `<head>` metadata and the SPA mount.
///
/// `og_extra` carries entity-specific Open Graph tags (the product price
/// pair) emitted at the tail of the OG block, before the Twitter Card block.
/// `extra_head` carries the rest (product attributes, JSON-LD), emitted
/// after it.
pub fn page_shell(
    title: &str,
    description: &str,
    canonical_url: &str,
    og: OpenGraphData<'_>,
    og_extra: Markup,
    extra_head: Markup,
    config: &Config,
) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                link rel="icon" type="image/svg+xml" href="/favicon.svg";
                link rel="apple-touch-icon" href="/apple-touch-icon.png";

                @if let Some(ga_id) = config.ga_measurement_id.as_deref() {
                    (analytics_bootstrap(ga_id))
                }

                title { (title) }
                meta name="description" content=(description);
                link rel="canonical" href=(canonical_url);

                // Open Graph
                meta property="og:title" content=(og.title);
                meta property="og:description" content=(og.description);
                meta property="og:type" content=(og.og_type);
                meta property="og:site_name" content=(config.site_name);
                meta property="og:locale" content="en_US";
                meta property="og:image" content=(og.image);
                meta property="og:image:alt" content=(og.image_alt);
                meta property="og:url" content=(canonical_url);
                (og_extra)

                // Twitter Card
                meta name="twitter:card" content="summary_large_image";
                meta name="twitter:title" content=(og.title);
                meta name="twitter:description" content=(og.description);
                meta name="twitter:image" content=(og.image);

                (extra_head)
            }
            body {
                div id="root" {}
                script type="module" src=(config.app_script) {}
            }
        }
    }
}

/// Google Analytics bootstrap snippet.
fn analytics_bootstrap(measurement_id: &str) -> Markup {
    html! {
        script async src=(format!("https://www.googletagmanager.com/gtag/js?id={measurement_id}")) {}
        script {
            (PreEscaped(format!(
                "window.dataLayer=window.dataLayer||[];function gtag(){{dataLayer.push(arguments);}}gtag('js',new Date());gtag('config','{measurement_id}');"
            )))
        }
    }
}

/// Embed a JSON-LD structured-data block.
///
/// serde_json escapes quotes but not `<`, so `</script>` sequences inside
/// entity text must be neutralized before embedding.
pub fn json_ld(value: &serde_json::Value) -> Markup {
    let payload = serde_json::to_string(value)
        .unwrap_or_default()
        .replace('<', "\\u003c");
    html! {
        script type="application/ld+json" { (PreEscaped(payload)) }
    }
}

/// Truncate a meta description to the social snippet limit.
///
/// Strings over 160 characters become exactly 160: the first 157 characters
/// plus `...`. Shorter strings pass through verbatim.
pub fn truncate_description(s: &str) -> String {
    if s.chars().count() <= DESCRIPTION_LIMIT {
        return s.to_string();
    }
    let kept: String = s.chars().take(DESCRIPTION_KEEP).collect();
    format!("{kept}...")
}

/// Check if a URL is safe to use in `src`/`content` attributes.
pub fn is_safe_url(url: &str) -> bool {
    url.starts_with("https://") || url.starts_with("http://")
}

/// Format a price with no thousands separators.
///
/// Whole amounts drop the fractional part ("2500"), fractional amounts keep
/// it ("2500.5").
pub fn format_price(price: f64) -> String {
    if price.fract() == 0.0 {
        format!("{}", price as i64)
    } else {
        format!("{price}")
    }
}
