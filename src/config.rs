use crate::error::ConfigError;

/// Default cap on a single inbound line (1 MiB).
pub const DEFAULT_MAX_MESSAGE_BYTES: usize = 1024 * 1024;

/// Protocol revision advertised by `initialize`.
pub const PROTOCOL_VERSION: &str = "2024-11-05";

const DEFAULT_SERVER_NAME: &str = "mcp-tool-server";
const DEFAULT_LOG_FILTER: &str = "info";

/// Server identity and transport limits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub server_name: String,
    pub server_version: String,
    pub max_message_bytes: usize,
    pub log_filter: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            server_name: DEFAULT_SERVER_NAME.into(),
            server_version: env!("CARGO_PKG_VERSION").into(),
            max_message_bytes: DEFAULT_MAX_MESSAGE_BYTES,
            log_filter: DEFAULT_LOG_FILTER.into(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment.
    ///
    /// - `MCP_SERVER_NAME` (optional): name reported in `serverInfo`
    /// - `MCP_SERVER_VERSION` (optional): version reported in `serverInfo`
    /// - `MCP_MAX_MESSAGE_BYTES` (optional, default 1 MiB): longest accepted line,
    ///   not counting the terminator
    /// - `MCP_LOG` (optional, default `info`): log filter when `RUST_LOG` is unset
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`ServerConfig::from_env`], reading variables through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(name) = lookup("MCP_SERVER_NAME") {
            config.server_name = non_empty("MCP_SERVER_NAME", name)?;
        }
        if let Some(version) = lookup("MCP_SERVER_VERSION") {
            config.server_version = non_empty("MCP_SERVER_VERSION", version)?;
        }
        if let Some(raw) = lookup("MCP_MAX_MESSAGE_BYTES") {
            config.max_message_bytes = match raw.trim().parse::<usize>() {
                Ok(n) if n > 0 => n,
                _ => {
                    return Err(ConfigError::NotPositiveInteger {
                        var: "MCP_MAX_MESSAGE_BYTES",
                        value: raw,
                    })
                }
            };
        }
        if let Some(filter) = lookup("MCP_LOG") {
            config.log_filter = non_empty("MCP_LOG", filter)?;
        }

        Ok(config)
    }
}

fn non_empty(var: &'static str, value: String) -> Result<String, ConfigError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ConfigError::Empty { var });
    }
    Ok(trimmed.to_string())
}
