//! The contract between the dispatch engine and the code that actually
//! does the work behind a tool name.

use std::future::Future;

use async_trait::async_trait;
use serde_json::{Map, Value};
use tokio_util::sync::CancellationToken;

/// Tool arguments: the `arguments` object of a `tools/call` request.
pub type Arguments = Map<String, Value>;

/// Failure returned by a tool handler.
///
/// The dispatcher reports every variant as an internal error and carries
/// the rendered message in `error.data`.
#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    #[error("missing required argument: {0}")]
    MissingArgument(String),
    #[error("invalid argument {name}: {reason}")]
    InvalidArgument { name: String, reason: String },
    #[error("{0}")]
    Failed(String),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Other(#[from] Box<dyn std::error::Error + Send + Sync>),
}

impl ToolError {
    pub fn failed(message: impl Into<String>) -> Self {
        Self::Failed(message.into())
    }

    pub fn invalid_argument(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            name: name.into(),
            reason: reason.into(),
        }
    }
}

/// Per-call execution context handed to a handler.
#[derive(Debug, Clone)]
pub struct CallContext {
    tool: String,
    request_id: Option<Value>,
    cancel: CancellationToken,
}

impl CallContext {
    pub fn new(tool: impl Into<String>, request_id: Option<Value>, cancel: CancellationToken) -> Self {
        Self {
            tool: tool.into(),
            request_id,
            cancel,
        }
    }

    /// Name the tool was invoked under.
    pub fn tool(&self) -> &str {
        &self.tool
    }

    /// Correlation id of the originating request, if any.
    pub fn request_id(&self) -> Option<&Value> {
        self.request_id.as_ref()
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Resolves once the server is shutting down.
    pub async fn cancelled(&self) {
        self.cancel.cancelled().await
    }

    /// Token for work the handler spawns itself.
    pub fn token(&self) -> &CancellationToken {
        &self.cancel
    }
}

/// A unit of behavior bound to a tool name.
#[async_trait]
pub trait ToolHandler: Send + Sync {
    async fn call(&self, ctx: CallContext, args: Arguments) -> Result<Value, ToolError>;
}

#[async_trait]
impl<F, Fut> ToolHandler for F
where
    F: Fn(CallContext, Arguments) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Value, ToolError>> + Send + 'static,
{
    async fn call(&self, ctx: CallContext, args: Arguments) -> Result<Value, ToolError> {
        (self)(ctx, args).await
    }
}

// ---------------------------------------------------------------------------
// Argument helpers
// ---------------------------------------------------------------------------

pub fn required_str<'a>(args: &'a Arguments, name: &str) -> Result<&'a str, ToolError> {
    match args.get(name) {
        None | Some(Value::Null) => Err(ToolError::MissingArgument(name.to_string())),
        Some(Value::String(s)) => Ok(s),
        Some(_) => Err(ToolError::invalid_argument(name, "expected a string")),
    }
}

pub fn optional_str<'a>(args: &'a Arguments, name: &str) -> Result<Option<&'a str>, ToolError> {
    match args.get(name) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(_) => Err(ToolError::invalid_argument(name, "expected a string")),
    }
}

pub fn optional_i64(args: &Arguments, name: &str) -> Result<Option<i64>, ToolError> {
    match args.get(name) {
        None | Some(Value::Null) => Ok(None),
        Some(v) => v
            .as_i64()
            .map(Some)
            .ok_or_else(|| ToolError::invalid_argument(name, "expected an integer")),
    }
}

pub fn optional_bool(args: &Arguments, name: &str) -> Result<Option<bool>, ToolError> {
    match args.get(name) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Bool(b)) => Ok(Some(*b)),
        Some(_) => Err(ToolError::invalid_argument(name, "expected a boolean")),
    }
}
