use super::ServerState;
use crate::prelude::{eprintln, *};
use axum::{
    extract::State,
    http::StatusCode,
    response::{
        sse::{Event, Sse},
        IntoResponse, Response,
    },
    routing::{get, post},
    Json, Router,
};
use futures::stream::{self, Stream};
use std::convert::Infallible;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

pub async fn run_http(options: super::cli::HttpOptions, state: Arc<ServerState>) -> Result<()> {
    let addr = format!("{}:{}", options.host, options.port);

    if state.verbose {
        eprintln!("Starting MCP server with HTTP transport on {addr}...");
        eprintln!("JSON-RPC endpoint: http://{addr}/mcp");
        eprintln!("SSE endpoint: http://{addr}/sse");
        eprintln!("Health check: http://{addr}/health");
    }

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| eyre!("Failed to bind to {}: {}", addr, e))?;

    log::info!("MCP server listening on http://{addr}");

    axum::serve(listener, router(state))
        .await
        .map_err(|e| eyre!("Server error: {e}"))?;

    Ok(())
}

pub fn router(state: Arc<ServerState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/mcp", post(message_handler))
        .route("/message", post(message_handler))
        .route("/sse", get(sse_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .with_state(state)
}

async fn health_handler() -> &'static str {
    "OK"
}

async fn sse_handler(
    State(_state): State<Arc<ServerState>>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let stream = stream::once(async { Ok(Event::default().data("MCP SSE endpoint ready")) });
    Sse::new(stream)
}

/// A client that disconnects drops this future, which cancels the tool call.
async fn message_handler(
    State(state): State<Arc<ServerState>>,
    Json(request): Json<serde_json::Value>,
) -> Response {
    let request_str = request.to_string();

    if state.verbose {
        eprintln!("Received: {request_str}");
    }

    match super::handle_request(&request_str, &state).await {
        Some(response) => Json(response).into_response(),
        None => StatusCode::ACCEPTED.into_response(),
    }
}
