use std::time::Instant;

use serde_json::{Map, Value};
use tokio_util::sync::CancellationToken;

use crate::protocol::{JsonRpcError, JsonRpcRequest, JsonRpcResponse, ToolCallResult};
use crate::registry::ToolRegistry;
use crate::tool::{Arguments, CallContext};

/// Handle a `tools/call` request.
///
/// `params` must be an object with a string `name`. A missing or non-object
/// `arguments` member is replaced by an empty map; whether that is acceptable
/// is up to the handler.
pub async fn handle(
    req: &JsonRpcRequest,
    registry: &ToolRegistry,
    cancel: &CancellationToken,
) -> JsonRpcResponse {
    let id = req.id.clone();

    let params = match req.params.as_ref().and_then(Value::as_object) {
        Some(p) => p,
        None => return JsonRpcResponse::error(id, JsonRpcError::invalid_params()),
    };

    let name = match params.get("name").and_then(Value::as_str) {
        Some(n) => n,
        None => return JsonRpcResponse::error(id, JsonRpcError::invalid_tool_name()),
    };

    let handler = match registry.lookup(name) {
        Ok(Some(h)) => h,
        Ok(None) => {
            tracing::debug!(tool = %name, "tool not found");
            return JsonRpcResponse::error(id, JsonRpcError::tool_not_found());
        }
        Err(e) => {
            tracing::debug!(error = %e, "rejected tool call");
            return JsonRpcResponse::error(id, JsonRpcError::invalid_tool_name());
        }
    };

    let arguments = extract_arguments(params);
    let ctx = CallContext::new(name, id.clone(), cancel.child_token());

    let start = Instant::now();
    let outcome = handler.call(ctx, arguments).await;
    let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;

    match outcome {
        Ok(value) => {
            tracing::debug!(tool = %name, elapsed_ms, "tool executed successfully");
            let result = ToolCallResult::text(render_result(&value));
            match serde_json::to_value(&result) {
                Ok(v) => JsonRpcResponse::success(id, v),
                Err(e) => {
                    tracing::error!(tool = %name, error = %e, "failed to encode tool result");
                    JsonRpcResponse::error(id, JsonRpcError::internal_error(e.to_string()))
                }
            }
        }
        Err(e) => {
            tracing::error!(tool = %name, error = %e, elapsed_ms, "tool execution failed");
            JsonRpcResponse::error(id, JsonRpcError::internal_error(e.to_string()))
        }
    }
}

fn extract_arguments(params: &Map<String, Value>) -> Arguments {
    match params.get("arguments") {
        Some(Value::Object(args)) => args.clone(),
        _ => Arguments::new(),
    }
}

/// Serialize a handler result for the text content block, falling back to
/// the value's display form.
fn render_result(value: &Value) -> String {
    serde_json::to_string(value).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "failed to serialize tool result, using display form");
        value.to_string()
    })
}
