//! Storage-free tools shipped with the binary.

pub mod echo;
pub mod health;

use std::sync::Arc;

use crate::config::ServerConfig;
use crate::registry::ToolRegistry;

/// Register `echo` and `health_check` on `registry`.
pub fn register_builtin_tools(registry: &Arc<ToolRegistry>, config: &ServerConfig) {
    registry.register(
        echo::NAME,
        "Return the supplied arguments unchanged",
        echo::input_schema(),
        echo::handle,
    );
    registry.register(
        health::NAME,
        "Perform a health check on the server",
        health::input_schema(),
        health::HealthCheck::new(registry, config),
    );
}
