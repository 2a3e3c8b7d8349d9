use serde::Deserialize;
use serde_json::Value;

/// JSON-RPC 2.0 request envelope.
///
/// `id` is opaque: whatever scalar the client sent (or nothing) is echoed
/// back unchanged. `jsonrpc` is informational and never validated. A missing
/// `method` decodes as the empty string and is answered as an unknown method.
#[derive(Debug, Clone, Deserialize)]
pub struct JsonRpcRequest {
    #[serde(default)]
    pub jsonrpc: String,
    #[serde(default)]
    pub id: Option<Value>,
    #[serde(default)]
    pub method: String,
    #[serde(default)]
    pub params: Option<Value>,
}

impl JsonRpcRequest {
    pub fn new(id: Option<Value>, method: impl Into<String>, params: Option<Value>) -> Self {
        Self {
            jsonrpc: "2.0".into(),
            id,
            method: method.into(),
            params,
        }
    }
}
