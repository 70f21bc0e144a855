//! Crawler detection and identifier validation.
//!
//! Pure classification only: the decision to serve a preview document is a
//! function of the user-agent, the `purpose` header, and an explicit preview
//! query flag. Everything else falls through to the client application.

use std::sync::LazyLock;

use regex::Regex;

/// Known social-crawler user-agent signatures (matched case-insensitively
/// as substrings).
const CRAWLER_SIGNATURES: &[&str] = &[
    "facebookexternalhit",
    "twitterbot",
    "linkedinbot",
    "slackbot",
    "whatsapp",
    "telegram",
    "discord",
    "skype",
];

/// Generic bot pattern for crawlers not on the signature list.
static GENERIC_BOT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)bot|crawler|spider|preview").unwrap());

/// Listing ids are opaque document ids: alphanumeric plus `_` and `-`.
static LISTING_ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]+$").unwrap());

/// Shop usernames additionally allow `.`.
static SHOP_USERNAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_.-]+$").unwrap());

/// Decide whether a request should get a server-rendered preview document.
///
/// True when any of:
/// - the user-agent carries a known social-crawler signature
/// - the user-agent matches the generic bot/crawler/spider/preview pattern
/// - the `purpose` header equals `prefetch`
/// - the explicit preview query flag is present
pub fn wants_preview(user_agent: &str, purpose: Option<&str>, preview_flag: bool) -> bool {
    if preview_flag {
        return true;
    }

    if purpose.is_some_and(|p| p.eq_ignore_ascii_case("prefetch")) {
        return true;
    }

    let ua = user_agent.to_lowercase();
    if CRAWLER_SIGNATURES.iter().any(|sig| ua.contains(sig)) {
        return true;
    }

    GENERIC_BOT_RE.is_match(user_agent)
}

/// Validate a listing identifier extracted from `/listing/{id}`.
pub fn is_valid_listing_id(id: &str) -> bool {
    LISTING_ID_RE.is_match(id)
}

/// Validate a shop username extracted from `/shop/{username}`.
pub fn is_valid_shop_username(username: &str) -> bool {
    SHOP_USERNAME_RE.is_match(username)
}
