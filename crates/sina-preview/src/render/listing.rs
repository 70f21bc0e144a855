//! Listing preview renderer.
//!
//! Produces a complete HTML document with product-flavored Open Graph and
//! Twitter Card metadata, fixed product attributes, and a JSON-LD
//! `Product`/`Offer` block for priced listings.

use maud::{Markup, html};

use super::components::{
    OpenGraphData, format_price, is_safe_url, json_ld, page_shell, truncate_description,
};
use crate::config::Config;
use crate::firestore::{ListingSummary, ShopSummary};

/// Currency of all listing prices.
const CURRENCY: &str = "LKR";

/// Render a listing preview page.
///
/// `shop` is the listing's related shop, when it could be resolved; its name
/// supplies the product brand.
pub fn render(
    listing: &ListingSummary,
    shop: Option<&ShopSummary>,
    id: &str,
    config: &Config,
) -> Markup {
    let title = format!(
        "{} - Buy Authentic Sri Lankan Products | {}",
        listing.name, config.site_name
    );
    let description = truncate_description(&listing.description);
    let canonical = format!("{}/listing/{id}", config.base_url);

    let image = listing
        .images
        .iter()
        .find(|url| is_safe_url(url))
        .map(String::as_str)
        .unwrap_or(&config.default_image);

    let brand = shop.map(|s| s.name.as_str()).unwrap_or(&config.site_name);
    let priced = listing.price > 0.0;

    let og = OpenGraphData {
        title: &title,
        description: &description,
        og_type: "product",
        image,
        image_alt: &listing.name,
    };

    // Price belongs in the OG block itself, ahead of the Twitter Card tags.
    let og_extra = html! {
        @if priced {
            meta property="product:price:amount" content=(format_price(listing.price));
            meta property="product:price:currency" content=(CURRENCY);
        }
    };

    let extra_head = html! {
        meta property="product:brand" content=(brand);
        meta property="product:availability" content="in stock";
        meta property="product:condition" content="new";
        @if let Some(category) = listing.category.as_deref() {
            meta property="product:category" content=(category);
        }
        @if priced {
            (json_ld(&product_json_ld(listing, brand, &canonical)))
        }
    };

    page_shell(&title, &description, &canonical, og, og_extra, extra_head, config)
}

/// Structured data for a priced listing.
///
/// The image list gets the same scheme filter as `og:image`; entity data is
/// not trusted to hold fetchable URLs.
fn product_json_ld(listing: &ListingSummary, brand: &str, canonical: &str) -> serde_json::Value {
    let images: Vec<&str> = listing
        .images
        .iter()
        .filter(|url| is_safe_url(url))
        .map(String::as_str)
        .collect();

    serde_json::json!({
        "@context": "https://schema.org",
        "@type": "Product",
        "name": listing.name,
        "description": listing.description,
        "image": images,
        "brand": { "@type": "Brand", "name": brand },
        "offers": {
            "@type": "Offer",
            "price": format_price(listing.price),
            "priceCurrency": CURRENCY,
            "availability": "https://schema.org/InStock",
            "url": canonical
        }
    })
}
