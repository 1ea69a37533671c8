mod hudu;

use serde::{Deserialize, Serialize};

// Re-export types needed by tool handlers
pub use super::{JsonRpcError, ServerState, Tool};

const INSTRUCTIONS: &str = "This MCP server exposes Hudu assets (people, devices, locations and \
other IT documentation records). Use `search` to list candidate assets as tiny results with \
snippets, then `fetch` to retrieve the full document only for the ids you need.";

// MCP Protocol types for tools
#[derive(Debug, Serialize)]
pub struct ServerInfo {
    pub name: String,
    pub version: String,
}

#[derive(Debug, Serialize)]
pub struct ServerCapabilities {
    pub tools: Option<ToolsCapability>,
}

#[derive(Debug, Serialize)]
pub struct ToolsCapability {}

#[derive(Debug, Serialize)]
pub struct InitializeResult {
    #[serde(rename = "protocolVersion")]
    pub protocol_version: String,
    pub capabilities: ServerCapabilities,
    #[serde(rename = "serverInfo")]
    pub server_info: ServerInfo,
    pub instructions: String,
}

#[derive(Debug, Serialize)]
pub struct ToolsList {
    pub tools: Vec<Tool>,
}

#[derive(Debug, Deserialize)]
pub struct CallToolParams {
    pub name: String,
    pub arguments: Option<serde_json::Value>,
}

pub fn handle_initialize() -> Result<serde_json::Value, JsonRpcError> {
    let result = InitializeResult {
        protocol_version: "2024-11-05".to_string(),
        capabilities: ServerCapabilities {
            tools: Some(ToolsCapability {}),
        },
        server_info: ServerInfo {
            name: "hudumcp".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
        instructions: INSTRUCTIONS.to_string(),
    };

    serde_json::to_value(result).map_err(|e| JsonRpcError {
        code: -32603,
        message: format!("Internal error: {e}"),
        data: None,
    })
}

pub fn handle_tools_list() -> Result<serde_json::Value, JsonRpcError> {
    let tools = vec![
        Tool {
            name: "search".to_string(),
            description: "Search Hudu assets (people, devices, locations, ...) by free text. Returns one text content item holding a JSON string {\"results\":[{id, title, url, snippet}]}. Results are tiny previews; call fetch with an id to get the full asset. On upstream failure the results list is empty and an error object is included.".to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "query": {
                        "type": "string",
                        "description": "Free text to search for (e.g., a person's name or an asset tag). Quotes are ignored."
                    },
                    "page": {
                        "type": "number",
                        "description": "Page number, 1-indexed (default: 1)"
                    },
                    "page_size": {
                        "type": "number",
                        "description": "Number of assets per page (default: server configured page size)"
                    }
                },
                "required": ["query"]
            }),
        },
        Tool {
            name: "fetch".to_string(),
            description: "Retrieve one Hudu asset by id, as returned by search. Returns one text content item holding a JSON string {id, title, text, url, metadata} where text is the complete asset record as JSON.".to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "id": {
                        "type": "string",
                        "description": "Asset id from a search result"
                    }
                },
                "required": ["id"]
            }),
        },
    ];

    let result = ToolsList { tools };

    serde_json::to_value(result).map_err(|e| JsonRpcError {
        code: -32603,
        message: format!("Internal error: {e}"),
        data: None,
    })
}

pub async fn handle_tools_call(
    params: Option<serde_json::Value>,
    state: &ServerState,
) -> Result<serde_json::Value, JsonRpcError> {
    let params: CallToolParams = serde_json::from_value(params.unwrap_or(serde_json::Value::Null))
        .map_err(|e| JsonRpcError {
            code: -32602,
            message: format!("Invalid params: {e}"),
            data: None,
        })?;

    match params.name.as_str() {
        "search" => hudu::handle_search(params.arguments, state).await,
        "fetch" => hudu::handle_fetch(params.arguments, state).await,
        _ => Err(JsonRpcError {
            code: -32602,
            message: format!("Unknown tool: {}", params.name),
            data: None,
        }),
    }
}
