use crate::prelude::{eprintln, *};
use hudumcp_core::envelope::{wrap, ToolEnvelope};
use serde::Deserialize;

use super::{JsonRpcError, ServerState};

/// Handle the search tool via MCP
///
/// Upstream failures are part of the result, never a JSON-RPC error.
pub async fn handle_search(
    arguments: Option<serde_json::Value>,
    state: &ServerState,
) -> Result<serde_json::Value, JsonRpcError> {
    #[derive(Deserialize)]
    struct SearchArgs {
        query: String,
        page: Option<u32>,
        page_size: Option<u32>,
    }

    let args: SearchArgs = serde_json::from_value(arguments.unwrap_or(serde_json::Value::Null))
        .map_err(|e| JsonRpcError {
            code: -32602,
            message: format!("Invalid arguments: {e}"),
            data: None,
        })?;

    if state.verbose {
        eprintln!(
            "Calling search: query={:?}, page={:?}, page_size={:?}",
            args.query, args.page, args.page_size
        );
    }

    let search_data = crate::hudu::search::search_assets_data(
        &state.hudu,
        &args.query,
        args.page,
        args.page_size,
    )
    .await;

    envelope_value(wrap(&search_data)?)
}

/// Handle the fetch tool via MCP
pub async fn handle_fetch(
    arguments: Option<serde_json::Value>,
    state: &ServerState,
) -> Result<serde_json::Value, JsonRpcError> {
    #[derive(Deserialize)]
    struct FetchArgs {
        id: String,
    }

    let args: FetchArgs = serde_json::from_value(arguments.unwrap_or(serde_json::Value::Null))
        .map_err(|e| JsonRpcError {
            code: -32602,
            message: format!("Invalid arguments: {e}"),
            data: None,
        })?;

    if state.verbose {
        eprintln!("Calling fetch: id={:?}", args.id);
    }

    let document = crate::hudu::fetch::fetch_asset_data(&state.hudu, &args.id).await?;

    envelope_value(wrap(&document)?)
}

fn envelope_value(envelope: ToolEnvelope) -> Result<serde_json::Value, JsonRpcError> {
    serde_json::to_value(envelope).map_err(|e| JsonRpcError {
        code: -32603,
        message: format!("Internal error: {e}"),
        data: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hudu::fake::FakeHudu;
    use crate::mcp::test_support::state;
    use axum::http::StatusCode;
    use serde_json::{json, Value};

    #[tokio::test]
    async fn test_handle_search_empty_query_skips_upstream() {
        let fake = FakeHudu::start(StatusCode::OK, json!({"assets": [{"id": 1}]})).await;

        let result = handle_search(Some(json!({"query": ""})), &state(&fake))
            .await
            .unwrap();

        assert_eq!(
            result,
            json!({"content": [{"type": "text", "text": "{\"results\":[]}"}]})
        );
        assert!(fake.calls().is_empty());
    }

    #[tokio::test]
    async fn test_handle_search_requires_query() {
        let fake = FakeHudu::start(StatusCode::OK, json!({"assets": []})).await;

        let err = handle_search(Some(json!({"page": 1})), &state(&fake))
            .await
            .unwrap_err();

        assert_eq!(err.code, -32602);
    }

    #[tokio::test]
    async fn test_handle_fetch_wraps_document() {
        // Arrange
        let raw = json!({
            "id": 5,
            "name": "ANEX_007A",
            "url": "https://acme.huducloud.com/a/anex-007a",
            "asset_type": "Location"
        });
        let fake = FakeHudu::start(StatusCode::OK, json!({ "assets": [raw.clone()] })).await;

        // Act
        let result = handle_fetch(Some(json!({"id": "5"})), &state(&fake))
            .await
            .unwrap();

        // Assert
        let content = result["content"].as_array().unwrap();
        assert_eq!(content.len(), 1);
        let doc: Value = serde_json::from_str(content[0]["text"].as_str().unwrap()).unwrap();
        assert_eq!(doc["id"], "5");
        assert_eq!(doc["title"], "ANEX_007A");
        assert_eq!(doc["url"], "https://acme.huducloud.com/a/anex-007a");
        assert_eq!(doc["metadata"], json!({"asset_type": "Location"}));
        let text: Value = serde_json::from_str(doc["text"].as_str().unwrap()).unwrap();
        assert_eq!(text, raw);
    }

    #[tokio::test]
    async fn test_handle_fetch_not_found() {
        let fake = FakeHudu::start(StatusCode::OK, json!({"data": []})).await;

        let err = handle_fetch(Some(json!({"id": "999"})), &state(&fake))
            .await
            .unwrap_err();

        assert_eq!(err.code, crate::mcp::NOT_FOUND_CODE);
    }
}
