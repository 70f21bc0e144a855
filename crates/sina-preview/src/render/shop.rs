//! Shop preview renderer.
//!
//! Shops carry OG/Twitter metadata only; product attributes and structured
//! data are listing concerns.

use maud::{Markup, html};

use super::components::{OpenGraphData, is_safe_url, page_shell, truncate_description};
use crate::config::Config;
use crate::firestore::ShopSummary;

/// Render a shop preview page.
pub fn render(shop: &ShopSummary, username: &str, config: &Config) -> Markup {
    let title = format!(
        "{} - Shop Authentic Sri Lankan Products | {}",
        shop.name, config.site_name
    );
    let description = truncate_description(&shop.description);
    let canonical = format!("{}/shop/{username}", config.base_url);

    // Cover image first, then logo, then the fixed site logo.
    let image = shop
        .cover
        .as_deref()
        .filter(|url| is_safe_url(url))
        .or_else(|| shop.logo.as_deref().filter(|url| is_safe_url(url)))
        .unwrap_or(&config.default_image);

    let og = OpenGraphData {
        title: &title,
        description: &description,
        og_type: "website",
        image,
        image_alt: &shop.name,
    };

    page_shell(&title, &description, &canonical, og, html! {}, html! {}, config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::firestore::{DEFAULT_SHOP_DESCRIPTION, DEFAULT_SHOP_NAME};

    fn test_config() -> Config {
        Config::for_tests()
    }

    fn artisan() -> ShopSummary {
        ShopSummary {
            name: "Artisan Shop".to_string(),
            description: "Hand-picked crafts from local makers.".to_string(),
            logo: Some("https://x/logo.png".to_string()),
            cover: Some("https://x/cover.jpg".to_string()),
            username: "artisan_shop".to_string(),
        }
    }

    #[test]
    fn shop_title_template() {
        let html = render(&artisan(), "artisan_shop", &test_config()).into_string();
        assert!(html.contains(
            "<title>Artisan Shop - Shop Authentic Sri Lankan Products | Sina.lk</title>"
        ));
    }

    #[test]
    fn shop_cover_preferred_over_logo() {
        let html = render(&artisan(), "artisan_shop", &test_config()).into_string();
        assert!(html.contains(r#"property="og:image" content="https://x/cover.jpg""#));
    }

    #[test]
    fn shop_logo_when_no_cover() {
        let mut shop = artisan();
        shop.cover = None;
        let html = render(&shop, "artisan_shop", &test_config()).into_string();
        assert!(html.contains(r#"property="og:image" content="https://x/logo.png""#));
    }

    #[test]
    fn shop_default_image_when_no_cover_or_logo() {
        let mut shop = artisan();
        shop.cover = None;
        shop.logo = None;
        let html = render(&shop, "artisan_shop", &test_config()).into_string();
        assert!(html.contains(r#"property="og:image" content="https://sina.lk/logo.svg""#));
    }

    #[test]
    fn shop_canonical_url() {
        let html = render(&artisan(), "artisan_shop", &test_config()).into_string();
        assert!(html.contains(r#"property="og:url" content="https://sina.lk/shop/artisan_shop""#));
    }

    #[test]
    fn shop_no_product_metadata() {
        let html = render(&artisan(), "artisan_shop", &test_config()).into_string();
        assert!(!html.contains("product:price"));
        assert!(!html.contains("product:brand"));
        assert!(!html.contains("application/ld+json"));
    }

    #[test]
    fn shop_defaults_render_nonempty_metadata() {
        let shop = ShopSummary {
            name: DEFAULT_SHOP_NAME.to_string(),
            description: DEFAULT_SHOP_DESCRIPTION.to_string(),
            logo: None,
            cover: None,
            username: "artisan_shop".to_string(),
        };
        let html = render(&shop, "artisan_shop", &test_config()).into_string();
        assert!(html.contains("<title>Sri Lankan Shop"));
        assert!(html.contains(r#"property="og:image" content="https://sina.lk/logo.svg""#));
    }

    #[test]
    fn shop_long_description_truncated() {
        let mut shop = artisan();
        shop.description = "x".repeat(300);
        let html = render(&shop, "artisan_shop", &test_config()).into_string();
        let expected = format!("{}...", "x".repeat(157));
        assert!(html.contains(&format!(r#"property="og:description" content="{expected}""#)));
    }
}
