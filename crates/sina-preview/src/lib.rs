//! Sina Preview - Crawler-facing preview pages for Sina.lk listings and shops.
//!
//! This crate provides a lightweight HTTP service that renders static HTML
//! documents with SEO/social metadata (Open Graph, Twitter Card, JSON-LD) for
//! marketplace listings and shops, intended for social crawlers and link
//! unfurlers. Ordinary browser traffic gets an empty 200 response so the
//! hosting platform serves the client application bundle instead.
//!
//! # Architecture
//!
//! - **Detect**: Classifies requests by user-agent/headers/query into
//!   "wants a preview document" or "pass through to the SPA"
//! - **Auth**: Exchanges a service-account key for a short-lived bearer token
//!   via the OAuth 2.0 JWT bearer assertion flow (cached until expiry)
//! - **Firestore**: Fetches listing/shop documents over the Firestore REST
//!   API, tolerant of absence and transport failure
//! - **Render**: Generates HTML with Open Graph tags using maud
//!   (compile-time templates)
//!
//! # URL Pattern
//!
//! ```text
//! GET /listing/{id}
//! GET /shop/{username}
//! ```
//!
//! # Failure semantics
//!
//! No failure on this surface ever produces a 4xx/5xx. A missing entity,
//! a misconfigured credential bundle, or a backend outage all degrade to an
//! empty-body 200 so the client application remains the ultimate fallback
//! renderer.
//!
//! # Security
//!
//! - All dynamic content is HTML-escaped by maud
//! - Image URLs are validated (HTTPS/HTTP only) before use in attributes
//! - JSON-LD payloads are made `</script>`-safe before embedding

pub mod auth;
pub mod config;
pub mod detect;
pub mod error;
pub mod firestore;
pub mod render;
pub mod routes;
pub mod state;

pub use config::Config;
pub use routes::router;
pub use state::AppState;
