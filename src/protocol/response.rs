use serde::Serialize;
use serde_json::Value;

// ---------------------------------------------------------------------------
// JSON-RPC error codes
// ---------------------------------------------------------------------------

/// Unknown top-level method, or a `tools/call` naming an unregistered tool.
pub const METHOD_NOT_FOUND: i32 = -32601;
/// `params` is not an object, or the tool name is missing or invalid.
pub const INVALID_PARAMS: i32 = -32602;
/// A tool handler returned a failure.
pub const INTERNAL_ERROR: i32 = -32603;

// ---------------------------------------------------------------------------
// JSON-RPC 2.0 response layer
// ---------------------------------------------------------------------------

/// JSON-RPC 2.0 response envelope.
///
/// `id` is always written, as `null` when the request carried none.
/// At most one of `result` and `error` is present.
#[derive(Debug, Clone, Serialize)]
pub struct JsonRpcResponse {
    pub jsonrpc: String,
    pub id: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
}

impl JsonRpcResponse {
    pub fn success(id: Option<Value>, result: Value) -> Self {
        Self {
            jsonrpc: "2.0".into(),
            id,
            result: Some(result),
            error: None,
        }
    }

    /// Success without a body.
    pub fn empty(id: Option<Value>) -> Self {
        Self {
            jsonrpc: "2.0".into(),
            id,
            result: None,
            error: None,
        }
    }

    pub fn error(id: Option<Value>, error: JsonRpcError) -> Self {
        Self {
            jsonrpc: "2.0".into(),
            id,
            result: None,
            error: Some(error),
        }
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

/// JSON-RPC 2.0 error object.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JsonRpcError {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl JsonRpcError {
    pub fn method_not_found() -> Self {
        Self { code: METHOD_NOT_FOUND, message: "Method not found".into(), data: None }
    }

    pub fn tool_not_found() -> Self {
        Self { code: METHOD_NOT_FOUND, message: "Tool not found".into(), data: None }
    }

    pub fn invalid_params() -> Self {
        Self { code: INVALID_PARAMS, message: "Invalid params".into(), data: None }
    }

    pub fn invalid_tool_name() -> Self {
        Self { code: INVALID_PARAMS, message: "Invalid tool name".into(), data: None }
    }

    /// Handler failure. The cause is carried as a string in `data`.
    pub fn internal_error(cause: impl Into<String>) -> Self {
        Self {
            code: INTERNAL_ERROR,
            message: "Internal error".into(),
            data: Some(Value::String(cause.into())),
        }
    }
}

// ---------------------------------------------------------------------------
// MCP tool result layer (returned inside a *successful* JSON-RPC response)
// ---------------------------------------------------------------------------

/// `tools/call` success payload.
#[derive(Debug, Clone, Serialize)]
pub struct ToolCallResult {
    pub content: Vec<ContentBlock>,
}

/// A single content block inside a tool result.
#[derive(Debug, Clone, Serialize)]
pub struct ContentBlock {
    #[serde(rename = "type")]
    pub content_type: String,
    pub text: String,
}

impl ToolCallResult {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            content: vec![ContentBlock {
                content_type: "text".into(),
                text: text.into(),
            }],
        }
    }
}
