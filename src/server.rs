use std::rc::Rc;

use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::sync::mpsc;
use tokio::task::LocalSet;
use tracing::{debug, info, warn};

use crate::context::ServerContext;
use crate::handlers;
use crate::protocol::{JsonRpcError, JsonRpcRequest, JsonRpcResponse};

/// Maximum bytes per JSON-RPC message (1 MiB).
const MAX_MESSAGE_BYTES: usize = 1024 * 1024;

/// MCP server that communicates over stdio using newline-delimited JSON-RPC 2.0.
///
/// Runs on a single thread. Each `tools/call` is spawned as a local task so
/// calls waiting on the roadmap API interleave; responses are written by
/// one writer task in completion order.
pub struct McpServer {
    ctx: Rc<ServerContext>,
    initialized: bool,
}

impl McpServer {
    pub fn new(ctx: ServerContext) -> Self {
        Self {
            ctx: Rc::new(ctx),
            initialized: false,
        }
    }

    pub async fn run(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        self.run_with(tokio::io::stdin(), tokio::io::stdout()).await
    }

    /// Serve requests read from `input` until EOF, writing responses to `output`.
    ///
    /// Returns once every in-flight tool call has answered.
    pub async fn run_with<R, W>(
        &mut self,
        input: R,
        output: W,
    ) -> Result<(), Box<dyn std::error::Error>>
    where
        R: AsyncRead + Unpin,
        W: AsyncWrite + Unpin + 'static,
    {
        let local = LocalSet::new();
        local.run_until(self.serve(input, output)).await
    }

    async fn serve<R, W>(&mut self, input: R, mut output: W) -> Result<(), Box<dyn std::error::Error>>
    where
        R: AsyncRead + Unpin,
        W: AsyncWrite + Unpin + 'static,
    {
        let (tx, mut rx) = mpsc::unbounded_channel::<JsonRpcResponse>();

        let writer = tokio::task::spawn_local(async move {
            while let Some(resp) = rx.recv().await {
                write_response(&mut output, &resp).await?;
            }
            Ok::<(), Box<dyn std::error::Error>>(())
        });

        let mut reader = BufReader::new(input);
        let mut raw = Vec::new();

        info!(api_url = %self.ctx.config.api_url, "roadmap MCP server ready");

        loop {
            raw.clear();
            let n = reader.read_until(b'\n', &mut raw).await?;
            if n == 0 {
                break;
            }

            if n > MAX_MESSAGE_BYTES {
                warn!("Message too large: {n} bytes (limit {MAX_MESSAGE_BYTES})");
                if tx.send(JsonRpcResponse::error(None, JsonRpcError::parse_error())).is_err() {
                    break;
                }
                continue;
            }

            let trimmed = match std::str::from_utf8(&raw) {
                Ok(s) => s.trim(),
                Err(_) => {
                    if tx.send(JsonRpcResponse::error(None, JsonRpcError::parse_error())).is_err() {
                        break;
                    }
                    continue;
                }
            };

            if trimmed.is_empty() {
                continue;
            }

            let req: JsonRpcRequest = match serde_json::from_str(trimmed) {
                Ok(r) => r,
                Err(e) => {
                    warn!("Parse error: {e}");
                    if tx.send(JsonRpcResponse::error(None, JsonRpcError::parse_error())).is_err() {
                        break;
                    }
                    continue;
                }
            };

            // Validate jsonrpc version
            if req.jsonrpc != "2.0" {
                let resp = JsonRpcResponse::error(req.id.clone(), JsonRpcError::invalid_request());
                if tx.send(resp).is_err() {
                    break;
                }
                continue;
            }

            // Initialization gate: only `initialize` is allowed before handshake completes
            if !self.initialized && req.method != "initialize" {
                if req.id.is_none() {
                    continue;
                }
                let resp = JsonRpcResponse::error(
                    req.id.clone(),
                    JsonRpcError::invalid_request_with("Server not initialized"),
                );
                if tx.send(resp).is_err() {
                    break;
                }
                continue;
            }

            debug!(method = %req.method, "request received");

            if req.method == "tools/call" {
                let ctx = Rc::clone(&self.ctx);
                let tx = tx.clone();
                tokio::task::spawn_local(async move {
                    if let Some(resp) = handlers::dispatch(&req, &ctx).await {
                        // The writer only stops when stdout is gone.
                        let _ = tx.send(resp);
                    }
                });
                continue;
            }

            if let Some(resp) = handlers::dispatch(&req, &self.ctx).await {
                if tx.send(resp).is_err() {
                    break;
                }
            }

            if req.method == "initialize" {
                self.initialized = true;
            }
        }

        // In-flight calls hold sender clones; the writer drains until they finish.
        drop(tx);
        writer.await??;
        info!("input closed, shutting down");
        Ok(())
    }
}

async fn write_response<W: AsyncWrite + Unpin>(
    output: &mut W,
    resp: &JsonRpcResponse,
) -> Result<(), Box<dyn std::error::Error>> {
    let out = serde_json::to_string(resp)?;
    output.write_all(out.as_bytes()).await?;
    output.write_all(b"\n").await?;
    output.flush().await?;
    Ok(())
}
