//! HTML rendering for crawler-facing preview documents.
//!
//! Each entity type has a renderer that produces a complete HTML page with
//! Open Graph / Twitter Card metadata and the SPA mount point, so a crawler
//! gets rich metadata and a real browser hitting the path still boots the
//! client application.
//!
//! All rendering uses [maud](https://maud.lambda.xyz/) for compile-time HTML
//! generation with automatic XSS protection (all dynamic values are escaped).

pub mod components;
pub mod listing;
pub mod shop;
