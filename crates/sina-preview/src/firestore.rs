//! Firestore REST fetch layer for listings and shops.
//!
//! Documents arrive in the Firestore REST envelope, where every field is
//! tagged with its type (`stringValue`, `integerValue`, `arrayValue`, ...).
//! All lookups are single-document point reads or a limit-1 query.
//!
//! The public `fetch_*` wrappers never fail: absence, transport errors,
//! credential problems and malformed payloads all collapse to `None` with a
//! logged diagnostic, so the caller can fall back to the empty pass-through
//! response.

use std::collections::HashMap;

use serde::Deserialize;

use crate::error::PreviewError;
use crate::state::AppState;

/// Firestore REST API base URL.
const FIRESTORE_BASE: &str = "https://firestore.googleapis.com/v1";

/// Fallback copy for listings with no name of their own.
pub const DEFAULT_LISTING_NAME: &str = "Authentic Sri Lankan Product";

/// Fallback copy for listings with no description of their own.
pub const DEFAULT_LISTING_DESCRIPTION: &str =
    "Discover authentic Sri Lankan products, handmade crafts and local services on Sina.lk.";

/// Fallback copy for shops with no name of their own.
pub const DEFAULT_SHOP_NAME: &str = "Sri Lankan Shop";

/// Fallback copy for shops with no description of their own.
pub const DEFAULT_SHOP_DESCRIPTION: &str =
    "Explore authentic Sri Lankan products from local shops and artisans on Sina.lk.";

/// A document in the Firestore REST envelope.
#[derive(Debug, Deserialize)]
pub struct Document {
    /// Typed field map; absent for empty or tombstoned documents.
    pub fields: Option<HashMap<String, FieldValue>>,
}

/// A single typed value in the Firestore REST envelope.
///
/// `integerValue` is string-encoded on the wire (64-bit integers do not fit
/// JSON numbers losslessly).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FieldValue {
    pub string_value: Option<String>,
    pub integer_value: Option<String>,
    pub double_value: Option<f64>,
    pub boolean_value: Option<bool>,
    pub array_value: Option<ArrayValue>,
}

/// Array container in the Firestore REST envelope.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ArrayValue {
    #[serde(default)]
    pub values: Vec<FieldValue>,
}

impl FieldValue {
    /// String coercion.
    fn as_str(&self) -> Option<&str> {
        self.string_value.as_deref()
    }

    /// Numeric coercion: integer first, then double.
    fn as_number(&self) -> Option<f64> {
        if let Some(int) = &self.integer_value
            && let Ok(n) = int.parse::<i64>()
        {
            return Some(n as f64);
        }
        self.double_value
    }

    /// Array-of-strings coercion; non-string elements are skipped.
    fn as_string_array(&self) -> Vec<String> {
        self.array_value
            .as_ref()
            .map(|arr| {
                arr.values
                    .iter()
                    .filter_map(|v| v.string_value.clone())
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// Read-only projection of a listing document, one per request.
#[derive(Debug, Clone)]
pub struct ListingSummary {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub images: Vec<String>,
    pub category: Option<String>,
    pub shop_id: Option<String>,
}

impl ListingSummary {
    /// Build a summary from a document's field map, defaulting missing
    /// name/description so the rendered page is never blank.
    fn from_fields(fields: &HashMap<String, FieldValue>) -> Self {
        let field = |name: &str| fields.get(name);

        Self {
            name: field("name")
                .and_then(FieldValue::as_str)
                .filter(|s| !s.trim().is_empty())
                .unwrap_or(DEFAULT_LISTING_NAME)
                .to_string(),
            description: field("description")
                .and_then(FieldValue::as_str)
                .filter(|s| !s.trim().is_empty())
                .unwrap_or(DEFAULT_LISTING_DESCRIPTION)
                .to_string(),
            price: field("price").and_then(FieldValue::as_number).unwrap_or(0.0),
            images: field("images")
                .map(FieldValue::as_string_array)
                .unwrap_or_default(),
            category: field("category")
                .and_then(FieldValue::as_str)
                .filter(|s| !s.trim().is_empty())
                .map(str::to_string),
            shop_id: field("shopId")
                .and_then(FieldValue::as_str)
                .filter(|s| !s.trim().is_empty())
                .map(str::to_string),
        }
    }
}

/// Read-only projection of a shop document, one per request.
#[derive(Debug, Clone)]
pub struct ShopSummary {
    pub name: String,
    pub description: String,
    pub logo: Option<String>,
    pub cover: Option<String>,
    pub username: String,
}

impl ShopSummary {
    /// Build a summary from a document's field map. `fallback_username` is
    /// the identifier the caller looked the shop up by.
    fn from_fields(fields: &HashMap<String, FieldValue>, fallback_username: &str) -> Self {
        let field = |name: &str| fields.get(name);

        Self {
            name: field("name")
                .and_then(FieldValue::as_str)
                .filter(|s| !s.trim().is_empty())
                .unwrap_or(DEFAULT_SHOP_NAME)
                .to_string(),
            description: field("description")
                .and_then(FieldValue::as_str)
                .filter(|s| !s.trim().is_empty())
                .unwrap_or(DEFAULT_SHOP_DESCRIPTION)
                .to_string(),
            logo: field("logo")
                .and_then(FieldValue::as_str)
                .filter(|s| !s.trim().is_empty())
                .map(str::to_string),
            cover: field("cover")
                .and_then(FieldValue::as_str)
                .filter(|s| !s.trim().is_empty())
                .map(str::to_string),
            username: field("username")
                .and_then(FieldValue::as_str)
                .filter(|s| !s.trim().is_empty())
                .unwrap_or(fallback_username)
                .to_string(),
        }
    }
}

/// One row of a `runQuery` response stream.
#[derive(Debug, Deserialize)]
struct QueryResult {
    document: Option<Document>,
}

/// Fetch a listing by document id. Never fails; see module docs.
pub async fn fetch_listing(state: &AppState, id: &str) -> Option<ListingSummary> {
    match fetch_listing_inner(state, id).await {
        Ok(listing) => listing,
        Err(err) => {
            tracing::warn!(listing = %id, error = %err, "listing fetch failed");
            None
        }
    }
}

/// Fetch a shop by its public username. Never fails; see module docs.
pub async fn fetch_shop(state: &AppState, username: &str) -> Option<ShopSummary> {
    match fetch_shop_inner(state, username).await {
        Ok(shop) => shop,
        Err(err) => {
            tracing::warn!(shop = %username, error = %err, "shop fetch failed");
            None
        }
    }
}

/// Fetch a shop by document id (a listing's related shop). Never fails.
pub async fn fetch_shop_by_id(state: &AppState, id: &str) -> Option<ShopSummary> {
    match fetch_shop_by_id_inner(state, id).await {
        Ok(shop) => shop,
        Err(err) => {
            tracing::warn!(shop_id = %id, error = %err, "shop fetch by id failed");
            None
        }
    }
}

async fn fetch_listing_inner(
    state: &AppState,
    id: &str,
) -> Result<Option<ListingSummary>, PreviewError> {
    let Some(doc) = get_document(state, "listings", id).await? else {
        return Ok(None);
    };
    Ok(doc.fields.as_ref().map(ListingSummary::from_fields))
}

async fn fetch_shop_by_id_inner(
    state: &AppState,
    id: &str,
) -> Result<Option<ShopSummary>, PreviewError> {
    let Some(doc) = get_document(state, "shops", id).await? else {
        return Ok(None);
    };
    Ok(doc
        .fields
        .as_ref()
        .map(|fields| ShopSummary::from_fields(fields, "")))
}

async fn fetch_shop_inner(
    state: &AppState,
    username: &str,
) -> Result<Option<ShopSummary>, PreviewError> {
    let account = state.config.service_account()?;
    let token = state.tokens.bearer(&state.http, account).await?;

    let url = format!(
        "{FIRESTORE_BASE}/projects/{}/databases/(default)/documents:runQuery",
        account.project_id
    );

    let body = serde_json::json!({
        "structuredQuery": {
            "from": [{ "collectionId": "shops" }],
            "where": {
                "fieldFilter": {
                    "field": { "fieldPath": "username" },
                    "op": "EQUAL",
                    "value": { "stringValue": username }
                }
            },
            "limit": 1
        }
    });

    let response = state
        .http
        .post(&url)
        .bearer_auth(&token)
        .json(&body)
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        tracing::debug!(shop = %username, status = %status, "shop query returned non-success");
        return Ok(None);
    }

    let results: Vec<QueryResult> = response.json().await?;

    Ok(results
        .into_iter()
        .find_map(|r| r.document)
        .and_then(|doc| {
            doc.fields
                .as_ref()
                .map(|fields| ShopSummary::from_fields(fields, username))
        }))
}

/// GET a single document by collection and id.
///
/// Non-success statuses (including 404) are treated as "no document".
async fn get_document(
    state: &AppState,
    collection: &str,
    id: &str,
) -> Result<Option<Document>, PreviewError> {
    let account = state.config.service_account()?;
    let token = state.tokens.bearer(&state.http, account).await?;

    let url = format!(
        "{FIRESTORE_BASE}/projects/{}/databases/(default)/documents/{collection}/{id}",
        account.project_id
    );

    let response = state.http.get(&url).bearer_auth(&token).send().await?;

    let status = response.status();
    if !status.is_success() {
        tracing::debug!(collection = %collection, id = %id, status = %status, "document fetch returned non-success");
        return Ok(None);
    }

    Ok(Some(response.json().await?))
}
