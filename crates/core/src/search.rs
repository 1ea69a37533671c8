//! Pure transformation of Hudu asset lists into compact search results
//!
//! Search results are deliberately tiny: the host is expected to call
//! `fetch` for the few ids it actually cares about.

use serde::{Deserialize, Serialize};

use crate::assets::{Asset, AssetRecord};
use crate::error::HuduError;

/// Longest snippet emitted, counted in characters
pub const SNIPPET_MAX_CHARS: usize = 220;

pub const SNIPPET_SEPARATOR: &str = " • ";

const ELLIPSIS: char = '…';

// ============================================================================
// Output Models (Domain Model)
// ============================================================================

/// One search hit
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct SearchResult {
    pub id: String,
    pub title: String,
    pub url: String,
    pub snippet: String,
}

/// Failure annotation attached to an otherwise empty result list
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct SearchError {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
}

/// Payload of the `search` tool
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct SearchOutput {
    pub results: Vec<SearchResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<SearchError>,
}

impl SearchOutput {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Empty results carrying the error, so the tool contract holds on failure
    pub fn from_error(err: &HuduError) -> Self {
        Self {
            results: Vec::new(),
            error: Some(SearchError {
                message: err.to_string(),
                status: err.status(),
            }),
        }
    }
}

/// How search titles are built
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TitlePolicy {
    /// `name`, then `title`, then `display_name`
    #[default]
    Plain,
    /// Plain title plus the `Title` custom field and primary mail
    Enriched,
}

// ============================================================================
// Pure Helper Functions
// ============================================================================

/// Join asset type, company name and primary mail into a preview line
pub fn build_snippet(asset: &Asset) -> String {
    let parts: Vec<&str> = [asset.asset_type(), asset.company_name(), asset.primary_mail()]
        .into_iter()
        .flatten()
        .collect();

    truncate_snippet(&parts.join(SNIPPET_SEPARATOR))
}

/// Cut `text` to [`SNIPPET_MAX_CHARS`], ending in `…` when anything was dropped
pub fn truncate_snippet(text: &str) -> String {
    if text.chars().count() <= SNIPPET_MAX_CHARS {
        return text.to_string();
    }

    let mut truncated: String = text.chars().take(SNIPPET_MAX_CHARS - 1).collect();
    truncated.push(ELLIPSIS);
    truncated
}

/// Title for a search hit, empty when the asset has no usable name
pub fn search_title(asset: &Asset, policy: TitlePolicy) -> String {
    let Some(base) = asset.display_title() else {
        return String::new();
    };

    if policy == TitlePolicy::Plain {
        return base.to_string();
    }

    match (asset.custom_field("Title"), asset.primary_mail()) {
        (Some(job_title), Some(mail)) => format!("{base} — {job_title} ({mail})"),
        (Some(job_title), None) => format!("{base} — {job_title}"),
        (None, Some(mail)) => format!("{base} ({mail})"),
        (None, None) => base.to_string(),
    }
}

/// Summarize one asset, or `None` when it has no id, title or url
pub fn summarize_asset(asset: &Asset, policy: TitlePolicy) -> Option<SearchResult> {
    let id = asset.id()?.to_string();
    let url = asset.url()?.to_string();
    let title = search_title(asset, policy);
    if title.is_empty() {
        return None;
    }

    Some(SearchResult {
        id,
        title,
        url,
        snippet: build_snippet(asset),
    })
}

// ============================================================================
// Pure Transformation Functions
// ============================================================================

/// Pure transformation: Convert Hudu asset records into search results
///
/// Upstream order is preserved; records failing the id/title/url gate are
/// dropped silently. The output is never longer than the input.
pub fn transform_search_results(records: &[AssetRecord], policy: TitlePolicy) -> SearchOutput {
    let results = records
        .iter()
        .filter_map(|record| summarize_asset(&record.asset, policy))
        .collect();

    SearchOutput {
        results,
        error: None,
    }
}

// ============================================================================
// Tests
// ============================================================================
