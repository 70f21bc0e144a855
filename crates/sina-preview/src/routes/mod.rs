//! Route definitions for the preview service.
//!
//! ## Routes
//!
//! - `GET /listing/{id}` - Listing preview page (crawlers only)
//! - `GET /shop/{username}` - Shop preview page (crawlers only)
//! - `GET /health` - Health check (JSON)
//! - `GET /robots.txt` - Crawler instructions
//! - anything else - empty 200 pass-through to the client application

mod health;
mod preview;

use axum::Router;
use axum::response::IntoResponse;
use axum::routing::get;

use crate::state::AppState;

/// Build the complete preview service router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/robots.txt", get(robots_txt))
        .route("/listing/{id}", get(preview::listing_preview))
        .route("/shop/{username}", get(preview::shop_preview))
        .fallback(preview::passthrough)
        .with_state(state)
}

/// Serve robots.txt allowing all crawlers.
///
/// We want crawlers to fetch these pages for link previews.
async fn robots_txt() -> impl IntoResponse {
    (
        [("content-type", "text/plain; charset=utf-8")],
        "User-agent: *\nAllow: /\n",
    )
}
