pub mod call_tool;
pub mod initialize;
pub mod list_tools;

use tokio_util::sync::CancellationToken;

use crate::config::ServerConfig;
use crate::protocol::{JsonRpcError, JsonRpcRequest, JsonRpcResponse};
use crate::registry::ToolRegistry;

/// Dispatch a JSON-RPC request to the appropriate handler.
///
/// Every request yields exactly one response; failures are reported in-band.
/// `cancel` is the server's shutdown token, handed down to tool handlers.
pub async fn dispatch(
    req: &JsonRpcRequest,
    registry: &ToolRegistry,
    config: &ServerConfig,
    cancel: &CancellationToken,
) -> JsonRpcResponse {
    tracing::debug!(method = %req.method, id = ?req.id, "handling request");

    match req.method.as_str() {
        "initialize" => initialize::handle(req, config),
        "tools/list" => list_tools::handle(req, registry),
        "tools/call" => call_tool::handle(req, registry, cancel).await,
        _ => JsonRpcResponse::error(req.id.clone(), JsonRpcError::method_not_found()),
    }
}
