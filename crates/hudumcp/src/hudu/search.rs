use super::HuduClient;
use crate::prelude::{eprintln, println, *};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

// Import domain models and pure functions from core crate
use hudumcp_core::assets::AssetQuery;
use hudumcp_core::sanitize::{is_blank, sanitize_query};
use hudumcp_core::search::transform_search_results;
pub use hudumcp_core::search::SearchOutput;

/// Options for searching Hudu assets
#[derive(Debug, clap::Args, Serialize, Deserialize, Clone)]
#[command(after_help = "EXAMPLES:
  # Find a person by name:
  hudumcp hudu search Emily

  # Find a device by its asset tag, 50 results per page:
  hudumcp hudu search S33381 --page-size 50

  # Second page of results as JSON:
  hudumcp hudu search \"ANEX\" --page 2 --json

NOTES:
  - Quote characters are stripped from the query before it is sent to Hudu
  - Results without an id, a title and a URL are not shown")]
pub struct SearchOptions {
    /// Free text to search for
    #[clap(env = "HUDU_QUERY")]
    pub query: String,

    /// Page number (1-indexed)
    #[arg(short, long, default_value = "1")]
    pub page: u32,

    /// Number of assets per page (defaults to HUDU_DEFAULT_PAGE_SIZE)
    #[arg(long)]
    pub page_size: Option<u32>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Public data function - used by both CLI and MCP
///
/// Never fails: a blank query short-circuits to empty results without calling
/// Hudu, and upstream failures come back as empty results with an `error`.
pub async fn search_assets_data(
    client: &HuduClient,
    query: &str,
    page: Option<u32>,
    page_size: Option<u32>,
) -> SearchOutput {
    let sanitized = sanitize_query(query);
    debug!("search: before cleanup {query:?}, after cleanup {sanitized:?}");

    if is_blank(&sanitized) {
        info!("search({query:?}) -> blank query, Hudu not called");
        return SearchOutput::empty();
    }

    let config = client.config();
    let page = page.unwrap_or(1).max(1);
    let page_size = page_size.unwrap_or(config.page_size).max(1);
    let request = AssetQuery::search(sanitized.trim(), page, page_size);

    match client.list_assets(&request).await {
        Ok(list) => {
            let output = transform_search_results(&list.records, config.title_policy());
            info!(
                "search({query:?}) -> {} results of {} assets (page={page} size={page_size})",
                output.results.len(),
                list.records.len()
            );
            output
        }
        Err(err) => {
            warn!("search({query:?}) failed: {err}");
            SearchOutput::from_error(&err)
        }
    }
}

/// Handle the search command
pub async fn handler(options: SearchOptions, client: &HuduClient) -> Result<()> {
    let data = search_assets_data(
        client,
        &options.query,
        Some(options.page),
        options.page_size,
    )
    .await;

    if options.json {
        println!("{}", serde_json::to_string_pretty(&data)?);
        return Ok(());
    }

    if let Some(error) = &data.error {
        use colored::*;
        eprintln!(
            "{}",
            format!(" Hudu search failed: {} ", error.message)
                .black()
                .on_yellow()
                .bold()
        );
        return Ok(());
    }

    // Human-readable format
    println!("Found {} asset(s):\n", data.results.len());

    if data.results.is_empty() {
        println!("No assets found.");
        return Ok(());
    }

    let mut table = crate::prelude::new_table();
    table.add_row(prettytable::row!["ID", "Title", "Snippet", "URL"]);

    for result in &data.results {
        table.add_row(prettytable::row![
            &result.id,
            &result.title,
            &result.snippet,
            &result.url
        ]);
    }

    table.printstd();

    eprintln!(
        "\nTo fetch the full asset, run:\n  hudumcp hudu fetch {}",
        data.results[0].id
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hudu::fake::{unreachable_base_url, FakeHudu};
    use crate::hudu::{HuduClient, HuduConfig};
    use axum::http::StatusCode;
    use hudumcp_core::envelope::wrap;
    use serde_json::{json, Value};

    fn emily_payload() -> Value {
        json!({"assets": [{
            "id": 12,
            "name": "Emily R Oparowski",
            "url": "https://x/a/emily",
            "asset_type": "Person",
            "primary_mail": "emily@x.edu"
        }]})
    }

    #[tokio::test]
    async fn test_search_emily_scenario() {
        // Arrange
        let fake = FakeHudu::start(StatusCode::OK, emily_payload()).await;

        // Act
        let output = search_assets_data(&fake.client(), "Emily", None, None).await;
        let envelope = wrap(&output).unwrap();

        // Assert
        let inner: Value = serde_json::from_str(envelope.text().unwrap()).unwrap();
        assert_eq!(
            inner,
            json!({"results": [{
                "id": "12",
                "title": "Emily R Oparowski",
                "url": "https://x/a/emily",
                "snippet": "Person • emily@x.edu"
            }]})
        );
    }

    #[tokio::test]
    async fn test_search_blank_query_makes_no_upstream_call() {
        let fake = FakeHudu::start(StatusCode::OK, emily_payload()).await;
        let client = fake.client();

        let empty = search_assets_data(&client, "", None, None).await;
        let quotes_only = search_assets_data(&client, "\"  \"", None, None).await;

        assert_eq!(wrap(&empty).unwrap().text(), Some(r#"{"results":[]}"#));
        assert_eq!(quotes_only, SearchOutput::empty());
        assert!(fake.calls().is_empty());
    }

    #[tokio::test]
    async fn test_search_strips_quotes_before_upstream() {
        let fake = FakeHudu::start(StatusCode::OK, emily_payload()).await;

        search_assets_data(&fake.client(), "\"Emily\"", None, None).await;

        let calls = fake.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].params.get("search").map(String::as_str), Some("Emily"));
    }

    #[tokio::test]
    async fn test_search_uses_default_page_size() {
        let fake = FakeHudu::start(StatusCode::OK, json!({"assets": []})).await;
        let mut config = fake.config();
        config.page_size = 40;
        let client = HuduClient::new(config).unwrap();

        search_assets_data(&client, "Emily", None, None).await;
        search_assets_data(&client, "Emily", Some(3), Some(5)).await;

        let calls = fake.calls();
        assert_eq!(calls[0].params.get("page").map(String::as_str), Some("1"));
        assert_eq!(calls[0].params.get("page_size").map(String::as_str), Some("40"));
        assert_eq!(calls[1].params.get("page").map(String::as_str), Some("3"));
        assert_eq!(calls[1].params.get("page_size").map(String::as_str), Some("5"));
    }

    #[tokio::test]
    async fn test_search_upstream_error_degrades_to_annotated_empty_results() {
        let fake = FakeHudu::start(StatusCode::INTERNAL_SERVER_ERROR, json!({})).await;

        let output = search_assets_data(&fake.client(), "Emily", None, None).await;

        assert!(output.results.is_empty());
        let error = output.error.unwrap();
        assert_eq!(error.status, Some(500));
        assert!(error.message.contains("500"));
    }

    #[tokio::test]
    async fn test_search_connection_failure_has_no_status() {
        let config = HuduConfig::new(&unreachable_base_url().await, "test-key");
        let client = HuduClient::new(config).unwrap();

        let output = search_assets_data(&client, "Emily", None, None).await;
        let inner: Value = serde_json::from_str(wrap(&output).unwrap().text().unwrap()).unwrap();

        assert_eq!(inner["results"], json!([]));
        assert!(inner["error"]["message"].is_string());
        assert!(inner["error"].get("status").is_none());
    }

    #[tokio::test]
    async fn test_search_enriched_titles() {
        let fake = FakeHudu::start(
            StatusCode::OK,
            json!({"assets": [{
                "id": 12,
                "name": "Emily R Oparowski",
                "url": "https://x/a/emily",
                "primary_mail": "emily@x.edu",
                "fields": [{"label": "Title", "value": "Lecturer"}]
            }]}),
        )
        .await;
        let mut config = fake.config();
        config.enrich_titles = true;
        let client = HuduClient::new(config).unwrap();

        let output = search_assets_data(&client, "Emily", None, None).await;

        assert_eq!(
            output.results[0].title,
            "Emily R Oparowski — Lecturer (emily@x.edu)"
        );
    }
}
