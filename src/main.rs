use std::sync::Arc;

use mcp_tool_server::config::ServerConfig;
use mcp_tool_server::registry::ToolRegistry;
use mcp_tool_server::server::McpServer;
use mcp_tool_server::tools::register_builtin_tools;
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let config = match ServerConfig::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("mcp-tool-server: configuration error: {e}");
            std::process::exit(1);
        }
    };

    // stdout carries protocol traffic, so logs go to stderr.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.log_filter)),
        )
        .init();

    let registry = Arc::new(ToolRegistry::new());
    register_builtin_tools(&registry, &config);

    let server = Arc::new(McpServer::new(config, registry));

    let signal_server = Arc::clone(&server);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            signal_server.shutdown();
        }
    });

    if let Err(e) = server.run().await {
        tracing::error!(error = %e, "fatal transport error");
        eprintln!("mcp-tool-server: fatal error: {e}");
        std::process::exit(1);
    }
}
