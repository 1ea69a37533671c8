//! Typed view over Hudu asset records
//!
//! Hudu assets are schemaless from our point of view: any key may be missing,
//! ids come back as numbers or strings, and the list itself lives under either
//! `assets` or `data` depending on the endpoint version. This module turns that
//! into explicit optional fields without ever failing on an unexpected shape.

use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::fmt;

// ============================================================================
// Domain Models (Input from API)
// ============================================================================

/// One label/value pair from an asset's custom `fields` list
#[derive(Debug, Deserialize, Clone, PartialEq, Default)]
pub struct AssetField {
    #[serde(default, deserialize_with = "lenient_string")]
    pub label: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub value: Option<String>,
}

/// Hudu asset record with every field optional
///
/// Scalars are read leniently: strings verbatim, numbers and booleans
/// stringified, anything else treated as absent.
#[derive(Debug, Deserialize, Clone, PartialEq, Default)]
pub struct Asset {
    #[serde(default, deserialize_with = "lenient_string")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub display_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub url: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub slug: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub asset_type: Option<String>,
    /// Older payloads name the asset type `type`
    #[serde(default, rename = "type", deserialize_with = "lenient_string")]
    pub kind: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub company_id: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub company_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub primary_mail: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub primary_model: Option<String>,
    #[serde(default, deserialize_with = "lenient_fields")]
    pub fields: Vec<AssetField>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub created_at: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub updated_at: Option<String>,
}

impl Asset {
    pub fn id(&self) -> Option<&str> {
        non_empty(&self.id)
    }

    pub fn name(&self) -> Option<&str> {
        non_empty(&self.name)
    }

    pub fn url(&self) -> Option<&str> {
        non_empty(&self.url)
    }

    pub fn slug(&self) -> Option<&str> {
        non_empty(&self.slug)
    }

    /// `asset_type`, falling back to the legacy `type` key
    pub fn asset_type(&self) -> Option<&str> {
        non_empty(&self.asset_type).or_else(|| non_empty(&self.kind))
    }

    pub fn company_name(&self) -> Option<&str> {
        non_empty(&self.company_name)
    }

    pub fn primary_mail(&self) -> Option<&str> {
        non_empty(&self.primary_mail)
    }

    pub fn primary_model(&self) -> Option<&str> {
        non_empty(&self.primary_model)
    }

    /// Probe `name`, then `title`, then `display_name`
    pub fn display_title(&self) -> Option<&str> {
        non_empty(&self.name)
            .or_else(|| non_empty(&self.title))
            .or_else(|| non_empty(&self.display_name))
    }

    /// Value of the first custom field whose label matches exactly
    pub fn custom_field(&self, label: &str) -> Option<&str> {
        self.fields
            .iter()
            .filter(|field| field.label.as_deref() == Some(label))
            .find_map(|field| non_empty(&field.value))
    }
}

/// An asset together with the exact JSON it was read from
#[derive(Debug, Clone, PartialEq)]
pub struct AssetRecord {
    pub asset: Asset,
    pub raw: Value,
}

impl AssetRecord {
    /// Build a record from one element of the upstream list
    ///
    /// Returns `None` when the element is not a JSON object.
    pub fn from_value(raw: Value) -> Option<Self> {
        if !raw.is_object() {
            return None;
        }
        let asset = Asset::deserialize(&raw).ok()?;
        Some(Self { asset, raw })
    }
}

// ============================================================================
// Envelope Probing
// ============================================================================

/// Envelope keys Hudu may put the asset list under, in probing order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvelopeKey {
    Assets,
    Data,
}

impl EnvelopeKey {
    pub const PROBE_ORDER: [EnvelopeKey; 2] = [EnvelopeKey::Assets, EnvelopeKey::Data];

    pub fn as_str(&self) -> &'static str {
        match self {
            EnvelopeKey::Assets => "assets",
            EnvelopeKey::Data => "data",
        }
    }
}

/// Unexpected payload shapes, absorbed as zero results
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShapeAnomaly {
    /// The body was valid JSON but not an object
    NotAnObject,
    /// Neither `assets` nor `data` was present
    MissingList,
    /// The key was present but did not hold an array
    NotAList(EnvelopeKey),
    /// Elements of the list that were not objects
    NonObjectRecords(usize),
}

impl fmt::Display for ShapeAnomaly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShapeAnomaly::NotAnObject => write!(f, "payload is not a JSON object"),
            ShapeAnomaly::MissingList => write!(f, "payload has neither 'assets' nor 'data'"),
            ShapeAnomaly::NotAList(key) => write!(f, "'{}' is not a list", key.as_str()),
            ShapeAnomaly::NonObjectRecords(count) => {
                write!(f, "skipped {count} list element(s) that are not objects")
            }
        }
    }
}

/// Asset records extracted from one upstream payload
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AssetList {
    pub records: Vec<AssetRecord>,
    /// Key the records were read from, if any list was found
    pub source: Option<EnvelopeKey>,
    pub anomalies: Vec<ShapeAnomaly>,
}

/// Locate the asset list in a Hudu response body
///
/// `assets` is probed before `data`. A non-empty array wins immediately; a
/// missing, null or empty `assets` still lets a populated `data` array through.
/// A non-array value under the first present key ends the probe with zero
/// records. Missing keys and non-array values are anomalies, never errors.
pub fn extract_assets(payload: &Value) -> AssetList {
    let Some(object) = payload.as_object() else {
        return AssetList {
            anomalies: vec![ShapeAnomaly::NotAnObject],
            ..Default::default()
        };
    };

    let mut list = AssetList::default();
    let mut any_key = false;

    for key in EnvelopeKey::PROBE_ORDER {
        match object.get(key.as_str()) {
            None | Some(Value::Null) => {}
            Some(Value::Array(items)) => {
                any_key = true;
                if list.source.is_none() {
                    list.source = Some(key);
                }
                if !items.is_empty() {
                    list.source = Some(key);
                    let total = items.len();
                    list.records = items
                        .iter()
                        .cloned()
                        .filter_map(AssetRecord::from_value)
                        .collect();
                    let skipped = total - list.records.len();
                    if skipped > 0 {
                        list.anomalies.push(ShapeAnomaly::NonObjectRecords(skipped));
                    }
                    return list;
                }
            }
            Some(_) => {
                list.anomalies.push(ShapeAnomaly::NotAList(key));
                return list;
            }
        }
    }

    if !any_key {
        list.anomalies.push(ShapeAnomaly::MissingList);
    }

    list
}

// ============================================================================
// Request Parameters
// ============================================================================

/// Query parameters for `GET /assets`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssetQuery {
    pub search: Option<String>,
    pub id: Option<String>,
    pub page: Option<u32>,
    pub page_size: Option<u32>,
}

impl AssetQuery {
    pub fn search(text: impl Into<String>, page: u32, page_size: u32) -> Self {
        Self {
            search: Some(text.into()),
            page: Some(page),
            page_size: Some(page_size),
            ..Default::default()
        }
    }

    pub fn by_id(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            ..Default::default()
        }
    }

    /// Only the parameters that were set, in a stable order
    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(search) = &self.search {
            params.push(("search", search.clone()));
        }
        if let Some(id) = &self.id {
            params.push(("id", id.clone()));
        }
        if let Some(page) = self.page {
            params.push(("page", page.to_string()));
        }
        if let Some(page_size) = self.page_size {
            params.push(("page_size", page_size.to_string()));
        }
        params
    }
}

// ============================================================================
// Lenient Field Readers
// ============================================================================

/// Stringify a JSON scalar; `None` for null, arrays and objects
pub fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|text| !text.is_empty())
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(scalar_to_string(&value))
}

fn lenient_fields<'de, D>(deserializer: D) -> Result<Vec<AssetField>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let fields = match value {
        Value::Array(items) => items
            .iter()
            .filter_map(|item| AssetField::deserialize(item).ok())
            .collect(),
        _ => Vec::new(),
    };
    Ok(fields)
}

// ============================================================================
// Tests
// ============================================================================
