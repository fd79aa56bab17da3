//! JSON-RPC 2.0 over stdio
//!
//! stdout carries protocol frames only; all logging goes to stderr. Each
//! `tools/call` runs on its own task with the blocking filesystem work on the
//! blocking pool, and every outbound frame is funneled through a single
//! writer task so frames never interleave.

use std::sync::Arc;

use anyhow::{Context, Result};
use serde_json::{json, Value};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::sync::mpsc;
use tracing::{info, warn};

use crate::dispatch::{Dispatcher, ToolRequest, ToolResponse};

const PROTOCOL_VERSION: &str = "2024-11-05";
const SERVER_NAME: &str = "fsgate";

/// Serve requests from stdin until EOF.
pub async fn serve(dispatcher: Arc<Dispatcher>) -> Result<()> {
    let (tx, mut rx) = mpsc::unbounded_channel::<String>();

    let writer = tokio::spawn(async move {
        let mut stdout = tokio::io::stdout();
        while let Some(frame) = rx.recv().await {
            if stdout.write_all(frame.as_bytes()).await.is_err() {
                break;
            }
            if stdout.write_all(b"\n").await.is_err() {
                break;
            }
            let _ = stdout.flush().await;
        }
    });

    let stdin = tokio::io::stdin();
    let mut lines = BufReader::new(stdin).lines();

    while let Some(line) = lines
        .next_line()
        .await
        .context("failed to read from stdin")?
    {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let message: Value = match serde_json::from_str(line) {
            Ok(v) => v,
            Err(e) => {
                warn!("JSON parse error: {e}");
                continue;
            }
        };

        let method = message["method"].as_str().unwrap_or("").to_string();
        let id = message["id"].clone();
        let params = message["params"].clone();

        match method.as_str() {
            "initialize" => {
                send_response(
                    &tx,
                    &id,
                    json!({
                        "protocolVersion": PROTOCOL_VERSION,
                        "capabilities": { "tools": {} },
                        "serverInfo": {
                            "name": SERVER_NAME,
                            "version": env!("CARGO_PKG_VERSION"),
                        }
                    }),
                );
            }

            "notifications/initialized" => {
                // No response needed
            }

            "tools/list" => {
                let tools: Vec<Value> = dispatcher
                    .registry()
                    .list_tools()
                    .iter()
                    .map(|t| {
                        json!({
                            "name": t.name,
                            "description": t.description,
                            "inputSchema": t.input_schema,
                        })
                    })
                    .collect();
                send_response(&tx, &id, json!({ "tools": tools }));
            }

            "tools/call" => {
                let request = ToolRequest {
                    name: params["name"].as_str().unwrap_or("").to_string(),
                    arguments: params.get("arguments").cloned().unwrap_or_else(|| json!({})),
                };
                let dispatcher = Arc::clone(&dispatcher);
                let tx = tx.clone();
                tokio::spawn(async move {
                    let outcome =
                        tokio::task::spawn_blocking(move || dispatcher.dispatch(&request)).await;
                    match outcome {
                        Ok(response) => send_response(&tx, &id, call_result(&response)),
                        Err(e) => send_error(&tx, &id, -32603, &format!("tool task failed: {e}")),
                    }
                });
            }

            "ping" => {
                send_response(&tx, &id, json!({}));
            }

            _ => {
                if !id.is_null() {
                    send_error(&tx, &id, -32601, &format!("unknown method: {method}"));
                }
            }
        }
    }

    info!("stdin closed, shutting down");
    drop(tx);
    let _ = writer.await;
    Ok(())
}

/// Map a dispatch outcome to a tool-call result frame body.
fn call_result(response: &ToolResponse) -> Value {
    match response {
        ToolResponse::Success { payload } => json!({
            "content": [{ "type": "text", "text": payload.to_string() }]
        }),
        ToolResponse::Failure { kind, message } => json!({
            "content": [{ "type": "text", "text": format!("{kind}: {message}") }],
            "isError": true,
        }),
    }
}

fn send_response(tx: &mpsc::UnboundedSender<String>, id: &Value, result: Value) {
    let frame = json!({
        "jsonrpc": "2.0",
        "id": id,
        "result": result,
    });
    let _ = tx.send(frame.to_string());
}

fn send_error(tx: &mpsc::UnboundedSender<String>, id: &Value, code: i64, message: &str) {
    let frame = json!({
        "jsonrpc": "2.0",
        "id": id,
        "error": { "code": code, "message": message },
    });
    let _ = tx.send(frame.to_string());
}
