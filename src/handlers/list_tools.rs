use serde::Serialize;

use crate::protocol::{JsonRpcError, JsonRpcRequest, JsonRpcResponse};
use crate::registry::{ToolDescriptor, ToolRegistry};

#[derive(Debug, Serialize)]
struct ListToolsResult {
    tools: Vec<ToolDescriptor>,
}

/// Handle `tools/list`. Descriptor order follows the registry and is not stable.
pub fn handle(req: &JsonRpcRequest, registry: &ToolRegistry) -> JsonRpcResponse {
    let result = ListToolsResult { tools: registry.list() };
    tracing::debug!(count = result.tools.len(), "listing tools");

    match serde_json::to_value(&result) {
        Ok(value) => JsonRpcResponse::success(req.id.clone(), value),
        Err(e) => {
            tracing::error!(error = %e, "failed to encode tools/list result");
            JsonRpcResponse::error(req.id.clone(), JsonRpcError::internal_error(e.to_string()))
        }
    }
}
