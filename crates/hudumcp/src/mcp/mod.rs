mod cli;
mod http;
mod stdio;
mod tools;

pub use cli::App;

use crate::hudu::{HuduClient, HuduConfig};
use crate::prelude::*;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

// JSON-RPC 2.0 types
#[derive(Debug, Deserialize)]
pub struct JsonRpcRequest {
    jsonrpc: String,
    id: Option<serde_json::Value>,
    method: String,
    params: Option<serde_json::Value>,
}

#[derive(Debug, Serialize)]
pub struct JsonRpcResponse {
    jsonrpc: String,
    id: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<JsonRpcError>,
}

#[derive(Debug, Serialize)]
pub struct JsonRpcError {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

/// Application defined JSON-RPC code for a fetch that matched nothing
pub const NOT_FOUND_CODE: i32 = -32004;

impl From<HuduError> for JsonRpcError {
    fn from(err: HuduError) -> Self {
        let code = match err {
            HuduError::Input(_) => -32602,
            HuduError::NotFound(_) => NOT_FOUND_CODE,
            HuduError::Upstream { .. } | HuduError::Serialization(_) => -32603,
        };

        JsonRpcError {
            code,
            message: err.to_string(),
            data: Some(serde_json::json!({
                "kind": err.kind(),
                "status": err.status(),
            })),
        }
    }
}

// MCP Protocol types
#[derive(Debug, Serialize)]
pub struct Tool {
    pub name: String,
    pub description: String,
    #[serde(rename = "inputSchema")]
    pub input_schema: serde_json::Value,
}

/// Everything a tool call needs, shared by all in-flight requests
pub struct ServerState {
    pub hudu: HuduClient,
    pub verbose: bool,
}

pub async fn run(app: App, config: HuduConfig, global: crate::Global) -> Result<()> {
    let state = Arc::new(ServerState {
        hudu: HuduClient::new(config)?,
        verbose: global.verbose,
    });

    match app.command {
        cli::Commands::Stdio => stdio::run_stdio(state).await,
        cli::Commands::Http(options) => http::run_http(options, state).await,
    }
}

impl JsonRpcRequest {
    /// Requests without an id are notifications and never get a response
    pub fn is_notification(&self) -> bool {
        self.id.is_none()
    }

    /// Key of the request a `notifications/cancelled` message refers to
    pub fn cancelled_request_key(&self) -> Option<String> {
        if self.method != "notifications/cancelled" {
            return None;
        }
        self.params
            .as_ref()
            .and_then(|params| params.get("requestId"))
            .map(request_key)
    }

    /// Key used to track this request while it is in flight
    pub fn key(&self) -> Option<String> {
        self.id.as_ref().map(request_key)
    }
}

/// Ids `1` and `"1"` are different requests, so the JSON form is the key
fn request_key(id: &serde_json::Value) -> String {
    id.to_string()
}

fn error_response(id: Option<serde_json::Value>, error: JsonRpcError) -> JsonRpcResponse {
    JsonRpcResponse {
        jsonrpc: "2.0".to_string(),
        id,
        result: None,
        error: Some(error),
    }
}

/// Parse one JSON-RPC message, or produce the parse error response
pub fn parse_request(request_str: &str) -> Result<JsonRpcRequest, JsonRpcResponse> {
    serde_json::from_str(request_str).map_err(|e| {
        error_response(
            None,
            JsonRpcError {
                code: -32700,
                message: format!("Parse error: {e}"),
                data: None,
            },
        )
    })
}

pub async fn handle_request(request_str: &str, state: &ServerState) -> Option<JsonRpcResponse> {
    match parse_request(request_str) {
        Ok(request) => dispatch(request, state).await,
        Err(response) => Some(response),
    }
}

pub async fn dispatch(request: JsonRpcRequest, state: &ServerState) -> Option<JsonRpcResponse> {
    if request.jsonrpc != "2.0" {
        return Some(error_response(
            request.id,
            JsonRpcError {
                code: -32600,
                message: format!("Invalid Request: unsupported jsonrpc version {}", request.jsonrpc),
                data: None,
            },
        ));
    }

    if request.method.starts_with("notifications/") {
        return None;
    }

    let notification = request.is_notification();
    let result = match request.method.as_str() {
        "initialize" => tools::handle_initialize(),
        "ping" => Ok(serde_json::json!({})),
        "tools/list" => tools::handle_tools_list(),
        "tools/call" => tools::handle_tools_call(request.params, state).await,
        method => Err(JsonRpcError {
            code: -32601,
            message: format!("Method not found: {method}"),
            data: None,
        }),
    };

    if notification {
        return None;
    }

    match result {
        Ok(value) => Some(JsonRpcResponse {
            jsonrpc: "2.0".to_string(),
            id: request.id,
            result: Some(value),
            error: None,
        }),
        Err(error) => Some(error_response(request.id, error)),
    }
}
