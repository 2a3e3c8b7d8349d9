use std::sync::Arc;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio_util::sync::CancellationToken;

use crate::config::ServerConfig;
use crate::error::ServerError;
use crate::handlers;
use crate::protocol::{JsonRpcRequest, JsonRpcResponse};
use crate::registry::ToolRegistry;

/// MCP server that communicates over newline-delimited JSON-RPC 2.0.
///
/// Requests are handled one at a time: each response is written and flushed
/// before the next line is read.
pub struct McpServer {
    config: ServerConfig,
    registry: Arc<ToolRegistry>,
    cancel: CancellationToken,
}

impl McpServer {
    pub fn new(config: ServerConfig, registry: Arc<ToolRegistry>) -> Self {
        Self {
            config,
            registry,
            cancel: CancellationToken::new(),
        }
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    pub fn registry(&self) -> &Arc<ToolRegistry> {
        &self.registry
    }

    /// Token cancelled by [`McpServer::shutdown`]. Handlers receive children of it.
    pub fn shutdown_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Stop the serve loop at its next read and signal in-flight handlers.
    pub fn shutdown(&self) {
        self.cancel.cancel();
    }

    /// Serve process stdin/stdout until end of input.
    pub async fn run(&self) -> Result<(), ServerError> {
        let stdin = tokio::io::BufReader::new(tokio::io::stdin());
        let stdout = tokio::io::stdout();
        self.serve(stdin, stdout).await
    }

    /// Serve one stream pair until end of input or shutdown.
    ///
    /// Lines that are blank, oversized, not UTF-8 or not a request are
    /// skipped without a response. Only I/O faults end the loop with an error.
    pub async fn serve<R, W>(&self, mut reader: R, mut writer: W) -> Result<(), ServerError>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        tracing::info!(
            name = %self.config.server_name,
            version = %self.config.server_version,
            tools = self.registry.len(),
            "starting MCP server"
        );

        let max = self.config.max_message_bytes;
        let mut raw = Vec::new();

        loop {
            raw.clear();
            let line = tokio::select! {
                biased;
                _ = self.cancel.cancelled() => {
                    tracing::info!("shutdown requested");
                    break;
                }
                read = read_line_capped(&mut reader, &mut raw, max) => read?,
            };
            match line {
                LineRead::Eof => break,
                LineRead::Oversized(bytes) => {
                    tracing::warn!(bytes, limit = max, "message too large, skipping line");
                    continue;
                }
                LineRead::Line => {}
            }

            let trimmed = match std::str::from_utf8(&raw) {
                Ok(s) => s.trim(),
                Err(e) => {
                    tracing::warn!(error = %e, "line is not valid UTF-8, skipping");
                    continue;
                }
            };

            if trimmed.is_empty() {
                continue;
            }

            let req: JsonRpcRequest = match serde_json::from_str(trimmed) {
                Ok(r) => r,
                Err(e) => {
                    tracing::warn!(error = %e, line = %trimmed, "failed to parse request");
                    continue;
                }
            };

            let resp = handlers::dispatch(&req, &self.registry, &self.config, &self.cancel).await;
            write_response(&mut writer, &resp).await?;
        }

        tracing::info!("MCP server stopping");
        Ok(())
    }
}

enum LineRead {
    Eof,
    Line,
    /// Line content exceeded the limit; carries the number of bytes drained.
    Oversized(usize),
}

/// Read one line into `buf`, keeping at most `limit` content bytes plus the
/// line terminator. Longer lines are drained up to the next `\n` without
/// being stored.
async fn read_line_capped<R>(reader: &mut R, buf: &mut Vec<u8>, limit: usize) -> std::io::Result<LineRead>
where
    R: AsyncBufRead + Unpin,
{
    // Room for a trailing "\r\n".
    let keep = limit.saturating_add(2);
    let mut total = 0usize;
    let mut overflow = false;

    loop {
        let available = reader.fill_buf().await?;
        if available.is_empty() {
            break;
        }

        let (used, done) = match available.iter().position(|&b| b == b'\n') {
            Some(i) => (i + 1, true),
            None => (available.len(), false),
        };

        if !overflow {
            if buf.len() + used > keep {
                overflow = true;
                buf.clear();
            } else {
                buf.extend_from_slice(&available[..used]);
            }
        }
        reader.consume(used);
        total += used;

        if done {
            break;
        }
    }

    if total == 0 {
        return Ok(LineRead::Eof);
    }
    if overflow || content_len(buf) > limit {
        buf.clear();
        return Ok(LineRead::Oversized(total));
    }
    Ok(LineRead::Line)
}

fn content_len(line: &[u8]) -> usize {
    let mut end = line.len();
    if line[..end].ends_with(b"\n") {
        end -= 1;
    }
    if line[..end].ends_with(b"\r") {
        end -= 1;
    }
    end
}

async fn write_response<W>(writer: &mut W, resp: &JsonRpcResponse) -> Result<(), ServerError>
where
    W: AsyncWrite + Unpin,
{
    let out = match serde_json::to_string(resp) {
        Ok(s) => s,
        Err(e) => {
            tracing::error!(error = %e, "failed to encode response");
            return Ok(());
        }
    };
    writer.write_all(out.as_bytes()).await?;
    writer.write_all(b"\n").await?;
    writer.flush().await?;
    Ok(())
}
