use serde::Serialize;

use crate::config::{ServerConfig, PROTOCOL_VERSION};
use crate::protocol::{JsonRpcError, JsonRpcRequest, JsonRpcResponse};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct InitializeResult<'a> {
    protocol_version: &'static str,
    capabilities: Capabilities,
    server_info: ServerInfo<'a>,
}

#[derive(Debug, Serialize)]
struct Capabilities {
    tools: ToolsCapability,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ToolsCapability {
    list_changed: bool,
}

#[derive(Debug, Serialize)]
struct ServerInfo<'a> {
    name: &'a str,
    version: &'a str,
}

/// Handle `initialize`: advertise identity and capabilities.
///
/// The server never pushes notifications, so `listChanged` is always false.
pub fn handle(req: &JsonRpcRequest, config: &ServerConfig) -> JsonRpcResponse {
    let result = InitializeResult {
        protocol_version: PROTOCOL_VERSION,
        capabilities: Capabilities {
            tools: ToolsCapability { list_changed: false },
        },
        server_info: ServerInfo {
            name: &config.server_name,
            version: &config.server_version,
        },
    };

    match serde_json::to_value(&result) {
        Ok(value) => JsonRpcResponse::success(req.id.clone(), value),
        Err(e) => {
            tracing::error!(error = %e, "failed to encode initialize result");
            JsonRpcResponse::error(req.id.clone(), JsonRpcError::internal_error(e.to_string()))
        }
    }
}
