//! Golden transcript: a recorded client session replayed through the
//! transport loop must produce the recorded responses, line for line.

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use mcp_tool_server::config::ServerConfig;
use mcp_tool_server::registry::ToolRegistry;
use mcp_tool_server::server::McpServer;
use mcp_tool_server::tools::echo;
use serde_json::Value;

fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/golden/fixtures")
        .join(name)
}

fn expected_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/golden/expected")
        .join(name)
}

fn parse_lines(text: &str) -> Vec<Value> {
    text.lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| serde_json::from_str(line).expect("golden line must be JSON"))
        .collect()
}

fn golden_server() -> McpServer {
    let config = ServerConfig {
        server_name: "golden-server".into(),
        server_version: "0.0.0".into(),
        ..ServerConfig::default()
    };
    let registry = Arc::new(ToolRegistry::new());
    registry.register(
        echo::NAME,
        "Return the supplied arguments unchanged",
        echo::input_schema(),
        echo::handle,
    );
    McpServer::new(config, registry)
}

async fn replay(server: &McpServer, input: &[u8]) -> String {
    let mut out = Vec::new();
    server.serve(input, &mut out).await.expect("replay must end cleanly");
    String::from_utf8(out).expect("output must be UTF-8")
}

#[tokio::test]
async fn session_transcript_matches_golden() {
    let input = fs::read(fixture_path("session.jsonl")).expect("fixture missing");
    let expected = fs::read_to_string(expected_path("session.jsonl")).expect("expected file missing");

    let actual = replay(&golden_server(), &input).await;

    let actual_lines = parse_lines(&actual);
    let expected_lines = parse_lines(&expected);
    assert_eq!(
        actual_lines.len(),
        expected_lines.len(),
        "response count mismatch:\n{actual}"
    );
    for (i, (got, want)) in actual_lines.iter().zip(&expected_lines).enumerate() {
        assert_eq!(got, want, "response {i} differs");
    }
}

#[tokio::test]
async fn replay_is_byte_identical_across_runs() {
    let input = fs::read(fixture_path("session.jsonl")).expect("fixture missing");
    let server = golden_server();

    let first = replay(&server, &input).await;
    let second = replay(&server, &input).await;
    assert_eq!(first, second, "replay output must be stable across runs");
}
