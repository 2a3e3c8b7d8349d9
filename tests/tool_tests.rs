//! Handler-side helpers: argument accessors and the call context.

use std::sync::Arc;

use mcp_tool_server::config::ServerConfig;
use mcp_tool_server::handlers;
use mcp_tool_server::protocol::JsonRpcRequest;
use mcp_tool_server::registry::ToolRegistry;
use mcp_tool_server::server::McpServer;
use mcp_tool_server::tool::{
    optional_bool, optional_i64, optional_str, required_str, Arguments, CallContext, ToolError,
};
use serde_json::{json, Value};
use tokio_util::sync::CancellationToken;

fn args(value: Value) -> Arguments {
    match value {
        Value::Object(map) => map,
        other => panic!("test arguments must be an object, got {other}"),
    }
}

fn assert_invalid(err: ToolError, expected_name: &str) {
    match err {
        ToolError::InvalidArgument { name, .. } => assert_eq!(name, expected_name),
        other => panic!("expected InvalidArgument, got {other:?}"),
    }
}

// ---------------------------------------------------------------------------
// argument helpers
// ---------------------------------------------------------------------------

#[test]
fn required_str_cases() {
    let a = args(json!({"s": "value", "n": null, "i": 3}));

    assert_eq!(required_str(&a, "s").unwrap(), "value");
    assert!(matches!(required_str(&a, "absent"), Err(ToolError::MissingArgument(n)) if n == "absent"));
    assert!(matches!(required_str(&a, "n"), Err(ToolError::MissingArgument(n)) if n == "n"));
    assert_invalid(required_str(&a, "i").unwrap_err(), "i");
}

#[test]
fn optional_str_cases() {
    let a = args(json!({"s": "value", "n": null, "b": true}));

    assert_eq!(optional_str(&a, "s").unwrap(), Some("value"));
    assert_eq!(optional_str(&a, "absent").unwrap(), None);
    assert_eq!(optional_str(&a, "n").unwrap(), None);
    assert_invalid(optional_str(&a, "b").unwrap_err(), "b");
}

#[test]
fn optional_i64_cases() {
    let a = args(json!({"i": -12, "n": null, "f": 1.5, "s": "12"}));

    assert_eq!(optional_i64(&a, "i").unwrap(), Some(-12));
    assert_eq!(optional_i64(&a, "absent").unwrap(), None);
    assert_eq!(optional_i64(&a, "n").unwrap(), None);
    assert_invalid(optional_i64(&a, "f").unwrap_err(), "f");
    assert_invalid(optional_i64(&a, "s").unwrap_err(), "s");
}

#[test]
fn optional_bool_cases() {
    let a = args(json!({"t": true, "f": false, "n": null, "s": "true"}));

    assert_eq!(optional_bool(&a, "t").unwrap(), Some(true));
    assert_eq!(optional_bool(&a, "f").unwrap(), Some(false));
    assert_eq!(optional_bool(&a, "absent").unwrap(), None);
    assert_eq!(optional_bool(&a, "n").unwrap(), None);
    assert_invalid(optional_bool(&a, "s").unwrap_err(), "s");
}

#[test]
fn invalid_argument_message_names_the_argument() {
    let a = args(json!({"limit": "ten"}));
    let err = optional_i64(&a, "limit").unwrap_err();
    assert_eq!(err.to_string(), "invalid argument limit: expected an integer");
}

// ---------------------------------------------------------------------------
// call context
// ---------------------------------------------------------------------------

async fn wait_for_shutdown(ctx: CallContext, _args: Arguments) -> Result<Value, ToolError> {
    ctx.cancelled().await;
    Ok(json!({"stopped": ctx.is_cancelled()}))
}

async fn token_state(ctx: CallContext, _args: Arguments) -> Result<Value, ToolError> {
    let child = ctx.token().child_token();
    Ok(json!({"token": ctx.token().is_cancelled(), "child": child.is_cancelled()}))
}

fn server_with_context_tools() -> McpServer {
    let registry = Arc::new(ToolRegistry::new());
    registry.register("wait_for_shutdown", "Blocks until shutdown", json!({}), wait_for_shutdown);
    registry.register("token_state", "Reports token state", json!({}), token_state);
    McpServer::new(ServerConfig::default(), registry)
}

async fn call(server: &McpServer, tool: &str) -> Value {
    let req = JsonRpcRequest::new(Some(json!(1)), "tools/call", Some(json!({"name": tool})));
    let resp = handlers::dispatch(&req, server.registry(), server.config(), &server.shutdown_token()).await;
    serde_json::to_value(&resp).unwrap()
}

fn payload(resp: &Value) -> Value {
    serde_json::from_str(resp["result"]["content"][0]["text"].as_str().unwrap()).unwrap()
}

#[tokio::test]
async fn handler_waiting_on_cancellation_resumes_after_shutdown() {
    let server = server_with_context_tools();

    let trigger = async {
        tokio::task::yield_now().await;
        server.shutdown();
    };
    let (resp, ()) = tokio::join!(call(&server, "wait_for_shutdown"), trigger);

    assert_eq!(payload(&resp), json!({"stopped": true}));
}

#[tokio::test]
async fn context_token_follows_server_shutdown() {
    let server = server_with_context_tools();

    let before = call(&server, "token_state").await;
    assert_eq!(payload(&before), json!({"token": false, "child": false}));

    server.shutdown();
    let after = call(&server, "token_state").await;
    assert_eq!(payload(&after), json!({"token": true, "child": true}));
}

#[test]
fn call_context_accessors() {
    let cancel = CancellationToken::new();
    let ctx = CallContext::new("lookup", Some(json!("req-9")), cancel.clone());

    assert_eq!(ctx.tool(), "lookup");
    assert_eq!(ctx.request_id(), Some(&json!("req-9")));
    assert!(!ctx.is_cancelled());

    cancel.cancel();
    assert!(ctx.is_cancelled());
    assert!(ctx.token().is_cancelled());
}
