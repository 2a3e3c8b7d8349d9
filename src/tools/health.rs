use std::sync::{Arc, Weak};

use async_trait::async_trait;
use serde::Serialize;
use serde_json::{json, Value};

use crate::config::ServerConfig;
use crate::registry::ToolRegistry;
use crate::tool::{Arguments, CallContext, ToolError, ToolHandler};

pub const NAME: &str = "health_check";

pub fn input_schema() -> Value {
    json!({
        "type": "object",
        "properties": {}
    })
}

#[derive(Debug, Serialize)]
struct HealthReport<'a> {
    status: &'static str,
    server: &'a str,
    version: &'a str,
    tools: usize,
}

/// Reports liveness and the number of registered tools.
///
/// Holds the registry weakly since it is itself stored in that registry.
pub struct HealthCheck {
    registry: Weak<ToolRegistry>,
    server: String,
    version: String,
}

impl HealthCheck {
    pub fn new(registry: &Arc<ToolRegistry>, config: &ServerConfig) -> Self {
        Self {
            registry: Arc::downgrade(registry),
            server: config.server_name.clone(),
            version: config.server_version.clone(),
        }
    }
}

#[async_trait]
impl ToolHandler for HealthCheck {
    async fn call(&self, ctx: CallContext, _args: Arguments) -> Result<Value, ToolError> {
        if ctx.is_cancelled() {
            return Err(ToolError::failed("server is shutting down"));
        }
        let registry = self
            .registry
            .upgrade()
            .ok_or_else(|| ToolError::failed("tool registry is no longer available"))?;

        let report = HealthReport {
            status: "healthy",
            server: &self.server,
            version: &self.version,
            tools: registry.len(),
        };
        Ok(serde_json::to_value(report)?)
    }
}
