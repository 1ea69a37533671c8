//! Pure transformation of a Hudu asset into a full fetch document
//!
//! This is the only place where the complete upstream record survives: the
//! document's `text` is the raw asset re-serialized verbatim.

use serde::{Deserialize, Serialize};

use crate::assets::{Asset, AssetRecord};
use crate::error::HuduError;
use crate::urls::asset_url_from_slug;

// ============================================================================
// Output Models (Domain Model)
// ============================================================================

/// Small descriptive fields lifted out of the raw asset
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct AssetMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub asset_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_mail: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_model: Option<String>,
}

impl AssetMetadata {
    pub fn is_empty(&self) -> bool {
        self.asset_type.is_none()
            && self.company_name.is_none()
            && self.primary_mail.is_none()
            && self.primary_model.is_none()
    }
}

/// Payload of the `fetch` tool
///
/// `metadata` serializes as `null`, not `{}`, when there is nothing to report.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct FetchDocument {
    pub id: String,
    pub title: String,
    pub text: String,
    pub url: String,
    pub metadata: Option<AssetMetadata>,
}

// ============================================================================
// Pure Helper Functions
// ============================================================================

/// Trim the requested id, rejecting blank input before any upstream call
pub fn validate_id(raw: &str) -> Result<String, HuduError> {
    let id = raw.trim();
    if id.is_empty() {
        return Err(HuduError::Input("id is required".to_string()));
    }
    Ok(id.to_string())
}

/// `name`, or `"{asset_type} {id}"` with `Asset` standing in for a missing type
pub fn fetch_title(asset: &Asset, id: &str) -> String {
    match asset.name() {
        Some(name) => name.to_string(),
        None => format!("{} {}", asset.asset_type().unwrap_or("Asset"), id),
    }
}

/// Asset `url`, or a link derived from its `slug`, or empty
pub fn asset_url(asset: &Asset, base_url: &str) -> String {
    if let Some(url) = asset.url() {
        return url.to_string();
    }

    asset
        .slug()
        .map(|slug| asset_url_from_slug(base_url, slug))
        .unwrap_or_default()
}

/// Non-empty descriptive fields, or `None` when there are none
pub fn collect_metadata(asset: &Asset) -> Option<AssetMetadata> {
    let metadata = AssetMetadata {
        asset_type: asset.asset_type().map(str::to_string),
        company_name: asset.company_name().map(str::to_string),
        primary_mail: asset.primary_mail().map(str::to_string),
        primary_model: asset.primary_model().map(str::to_string),
    };

    if metadata.is_empty() {
        None
    } else {
        Some(metadata)
    }
}

/// Expand one record into a document
pub fn build_document(
    record: &AssetRecord,
    requested_id: &str,
    base_url: &str,
) -> Result<FetchDocument, HuduError> {
    let asset = &record.asset;
    let id = asset.id().unwrap_or(requested_id).to_string();

    Ok(FetchDocument {
        title: fetch_title(asset, &id),
        url: asset_url(asset, base_url),
        metadata: collect_metadata(asset),
        text: serde_json::to_string_pretty(&record.raw)?,
        id,
    })
}

// ============================================================================
// Pure Transformation Functions
// ============================================================================

/// Pure transformation: Convert the records returned for an id lookup
///
/// The first record wins when Hudu returns more than one; zero records is
/// [`HuduError::NotFound`].
pub fn transform_fetch_response(
    records: &[AssetRecord],
    requested_id: &str,
    base_url: &str,
) -> Result<FetchDocument, HuduError> {
    let record = records
        .first()
        .ok_or_else(|| HuduError::NotFound(requested_id.to_string()))?;

    build_document(record, requested_id, base_url)
}

// ============================================================================
// Tests
// ============================================================================
