//! Preview route handlers.
//!
//! Handles `GET /listing/{id}` and `GET /shop/{username}`. Each request is
//! classified first; only crawler-shaped traffic triggers a fetch and a
//! rendered document. Everything else, including missing entities and any
//! internal failure, gets the empty-body 200 pass-through so the hosting
//! platform serves the client application instead.

use axum::extract::{Path, RawQuery, State};
use axum::http::{HeaderMap, HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};

use crate::detect;
use crate::firestore;
use crate::render;
use crate::state::AppState;

/// Cache lifetime of rendered documents. Listings and shops change
/// infrequently enough that five minutes of staleness is acceptable for
/// crawler consumption.
const CACHE_CONTROL: &str = "public, max-age=300";

/// Handle a listing preview request.
pub async fn listing_preview(
    State(state): State<AppState>,
    Path(id): Path<String>,
    RawQuery(query): RawQuery,
    headers: HeaderMap,
) -> Response {
    if !is_preview_request(&headers, query.as_deref()) {
        return passthrough().await;
    }

    if !detect::is_valid_listing_id(&id) {
        tracing::debug!(id = %id, "listing id outside allowed charset");
        return passthrough().await;
    }

    let Some(listing) = firestore::fetch_listing(&state, &id).await else {
        return passthrough().await;
    };

    // Related shop, for the product brand. Best effort only.
    let shop = match &listing.shop_id {
        Some(shop_id) => firestore::fetch_shop_by_id(&state, shop_id).await,
        None => None,
    };

    let markup = render::listing::render(&listing, shop.as_ref(), &id, &state.config);
    build_response(&markup.into_string())
}

/// Handle a shop preview request.
pub async fn shop_preview(
    State(state): State<AppState>,
    Path(username): Path<String>,
    RawQuery(query): RawQuery,
    headers: HeaderMap,
) -> Response {
    if !is_preview_request(&headers, query.as_deref()) {
        return passthrough().await;
    }

    if !detect::is_valid_shop_username(&username) {
        tracing::debug!(username = %username, "shop username outside allowed charset");
        return passthrough().await;
    }

    let Some(shop) = firestore::fetch_shop(&state, &username).await else {
        return passthrough().await;
    };

    let markup = render::shop::render(&shop, &username, &state.config);
    build_response(&markup.into_string())
}

/// Empty 200 response: the signal to serve the normal application bundle.
///
/// Also registered as the router fallback, so unknown paths fall through
/// unconditionally.
pub async fn passthrough() -> Response {
    StatusCode::OK.into_response()
}

/// Classify the request from its headers and raw query string.
fn is_preview_request(headers: &HeaderMap, query: Option<&str>) -> bool {
    let user_agent = headers
        .get(header::USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");

    let purpose = headers.get("purpose").and_then(|v| v.to_str().ok());

    detect::wants_preview(user_agent, purpose, has_preview_flag(query))
}

/// Check the raw query string for the explicit `preview` flag.
fn has_preview_flag(query: Option<&str>) -> bool {
    query.is_some_and(|q| {
        q.split('&')
            .any(|pair| pair == "preview" || pair.starts_with("preview="))
    })
}

/// Build an HTTP response with HTML content and cache/hygiene headers.
fn build_response(html: &str) -> Response {
    let mut headers = HeaderMap::new();

    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("text/html; charset=utf-8"),
    );
    headers.insert(
        header::CACHE_CONTROL,
        HeaderValue::from_static(CACHE_CONTROL),
    );
    headers.insert(
        header::X_CONTENT_TYPE_OPTIONS,
        HeaderValue::from_static("nosniff"),
    );

    // ETag (xxHash of content)
    let hash = xxhash_rust::xxh3::xxh3_64(html.as_bytes());
    let etag = format!("\"{}\"", hex_fmt::HexFmt(&hash.to_be_bytes()));
    if let Ok(val) = HeaderValue::from_str(&etag) {
        headers.insert(header::ETAG, val);
    }

    (StatusCode::OK, headers, html.to_string()).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::routes::router;
    use axum::body::Body;
    use axum::http::Request;
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    const BROWSER_UA: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) \
                              AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0 Safari/537.36";

    fn app() -> axum::Router {
        router(AppState::new(Config::for_tests()))
    }

    async fn send(uri: &str, user_agent: &str) -> (StatusCode, String) {
        let response = app()
            .oneshot(
                Request::builder()
                    .uri(uri)
                    .header(header::USER_AGENT, user_agent)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        (status, String::from_utf8_lossy(&body).to_string())
    }

    #[tokio::test]
    async fn browser_request_passes_through() {
        let (status, body) = send("/listing/abc123XYZ_-", BROWSER_UA).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.is_empty());
    }

    #[tokio::test]
    async fn crawler_with_invalid_listing_id_passes_through() {
        let (status, body) = send("/listing/bad.id", "Twitterbot/1.0").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.is_empty());
    }

    #[tokio::test]
    async fn crawler_without_credentials_passes_through() {
        // No service account configured: the fetch degrades to None and the
        // handler still answers 200 with an empty body.
        let (status, body) = send("/listing/abc123XYZ_-", "Twitterbot/1.0").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.is_empty());
    }

    #[tokio::test]
    async fn crawler_shop_without_credentials_passes_through() {
        let (status, body) = send("/shop/artisan_shop", "facebookexternalhit/1.1").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.is_empty());
    }

    #[tokio::test]
    async fn unknown_path_passes_through() {
        let (status, body) = send("/wishlist/whatever", "Twitterbot/1.0").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.is_empty());
    }

    #[tokio::test]
    async fn root_path_passes_through() {
        let (status, body) = send("/", BROWSER_UA).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.is_empty());
    }

    #[tokio::test]
    async fn health_endpoint_responds() {
        let (status, body) = send("/health", BROWSER_UA).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains(r#""status":"ok""#));
        assert!(body.contains("sina-preview"));
        assert!(body.contains(r#""time":""#));
    }

    #[tokio::test]
    async fn robots_txt_allows_crawlers() {
        let (status, body) = send("/robots.txt", "Googlebot/2.1").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("Allow: /"));
    }

    #[tokio::test]
    async fn preview_flag_without_crawler_ua_still_classifies() {
        // Explicit preview flag forces classification even for a browser UA;
        // with no credentials the fetch still degrades to pass-through.
        let (status, body) = send("/listing/abc?preview=1", BROWSER_UA).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.is_empty());
    }

    #[test]
    fn preview_flag_parsing() {
        assert!(has_preview_flag(Some("preview")));
        assert!(has_preview_flag(Some("preview=1")));
        assert!(has_preview_flag(Some("utm_source=x&preview=true")));
        assert!(!has_preview_flag(Some("previews=1")));
        assert!(!has_preview_flag(Some("utm_source=preview")));
        assert!(!has_preview_flag(Some("")));
        assert!(!has_preview_flag(None));
    }

    #[test]
    fn build_response_sets_html_cache_and_etag_headers() {
        let response = build_response("<html></html>");
        assert_eq!(response.status(), StatusCode::OK);
        let headers = response.headers();
        assert_eq!(
            headers.get(header::CONTENT_TYPE).unwrap(),
            "text/html; charset=utf-8"
        );
        assert_eq!(
            headers.get(header::CACHE_CONTROL).unwrap(),
            "public, max-age=300"
        );
        assert_eq!(headers.get(header::X_CONTENT_TYPE_OPTIONS).unwrap(), "nosniff");
        assert!(headers.contains_key(header::ETAG));
    }

    #[test]
    fn build_response_etag_is_stable() {
        let a = build_response("<html>same</html>");
        let b = build_response("<html>same</html>");
        assert_eq!(a.headers().get(header::ETAG), b.headers().get(header::ETAG));
    }
}
