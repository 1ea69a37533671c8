use super::{parse_request, JsonRpcResponse, ServerState};
use crate::prelude::{eprintln, *};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::sync::mpsc;
use tokio::task::AbortHandle;

pub async fn run_stdio(state: Arc<ServerState>) -> Result<()> {
    if state.verbose {
        eprintln!("Starting MCP server with stdio transport...");
        eprintln!();
    }

    let reader = BufReader::new(tokio::io::stdin());
    serve_lines(reader, tokio::io::stdout(), state).await
}

/// Serve newline delimited JSON-RPC messages until `reader` hits EOF.
///
/// Each request runs on its own task so a `notifications/cancelled` message
/// can abort it. Responses are written in completion order.
async fn serve_lines<R, W>(mut reader: R, writer: W, state: Arc<ServerState>) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin + Send + 'static,
{
    let (tx, rx) = mpsc::unbounded_channel::<String>();
    let writer = tokio::spawn(write_lines(rx, writer));

    let mut in_flight: HashMap<String, AbortHandle> = HashMap::new();
    let mut line = String::new();

    loop {
        line.clear();
        let bytes_read = reader.read_line(&mut line).await?;

        if bytes_read == 0 {
            break; // EOF
        }

        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        if state.verbose {
            eprintln!("Received: {trimmed}");
        }

        let request = match parse_request(trimmed) {
            Ok(request) => request,
            Err(response) => {
                send(&tx, &response, state.verbose);
                continue;
            }
        };

        if let Some(key) = request.cancelled_request_key() {
            match in_flight.remove(&key) {
                Some(handle) => {
                    handle.abort();
                    log::info!("cancelled request {key}");
                }
                None => log::debug!("cancel for unknown or finished request {key}"),
            }
            continue;
        }

        in_flight.retain(|_, handle| !handle.is_finished());

        let key = request.key();
        let task_state = Arc::clone(&state);
        let task_tx = tx.clone();
        let task = tokio::spawn(async move {
            if let Some(response) = super::dispatch(request, &task_state).await {
                send(&task_tx, &response, task_state.verbose);
            }
        });

        if let Some(key) = key {
            in_flight.insert(key, task.abort_handle());
        }
    }

    // The writer stops once every in-flight task has dropped its sender.
    drop(tx);
    writer.await??;

    Ok(())
}

fn send(tx: &mpsc::UnboundedSender<String>, response: &JsonRpcResponse, verbose: bool) {
    let response_json = match serde_json::to_string(response) {
        Ok(json) => json,
        Err(e) => {
            log::error!("failed to serialize response: {e}");
            return;
        }
    };

    if verbose {
        eprintln!("Sending: {response_json}");
    }

    if tx.send(response_json).is_err() {
        log::warn!("stdout writer closed, dropping response");
    }
}

async fn write_lines<W>(mut rx: mpsc::UnboundedReceiver<String>, mut writer: W) -> std::io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    while let Some(response_json) = rx.recv().await {
        writer.write_all(response_json.as_bytes()).await?;
        writer.write_all(b"\n").await?;
        writer.flush().await?;
    }

    Ok(())
}
