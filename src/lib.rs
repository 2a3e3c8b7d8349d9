//! Embeddable MCP tool-dispatch server.
//!
//! Speaks newline-delimited JSON-RPC 2.0 over any async byte stream
//! (stdio by default) and routes `initialize`, `tools/list` and
//! `tools/call` against a [`registry::ToolRegistry`] of named tools.

pub mod config;
pub mod error;
pub mod handlers;
pub mod protocol;
pub mod registry;
pub mod server;
pub mod tool;
pub mod tools;
