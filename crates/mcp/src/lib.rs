//! MCP (Model Context Protocol) server library.
//!
//! This crate serves registered tools over the legacy HTTP+SSE transport:
//! clients subscribe at `/mcp/sse` and POST JSON-RPC messages to `/mcp`.
//!
//! # Example
//!
//! ```no_run
//! use async_trait::async_trait;
//! use mcp::{McpServer, Tool, ToolHandler};
//! use serde_json::{Value, json};
//!
//! struct Echo;
//!
//! #[async_trait]
//! impl ToolHandler for Echo {
//!     fn definition(&self) -> Tool {
//!         Tool {
//!             name: "echo".to_string(),
//!             description: Some("echoes its arguments".to_string()),
//!             input_schema: json!({"type": "object"}),
//!         }
//!     }
//!
//!     async fn call(&self, arguments: Value) -> mcp::Result<String> {
//!         Ok(arguments.to_string())
//!     }
//! }
//!
//! # async fn example() -> mcp::Result<()> {
//! let server = McpServer::new("example", "1.0.0").with_tool(Echo);
//! mcp::sse::serve(server, "127.0.0.1:8000".parse().expect("addr")).await?;
//! # Ok(())
//! # }
//! ```

mod error;
mod protocol;
mod server;
pub mod sse;

pub use error::{Error, Result};
pub use protocol::{
    CallToolParams, CallToolResult, INTERNAL_ERROR, INVALID_PARAMS, INVALID_REQUEST,
    InitializeResult, JsonRpcError, JsonRpcRequest, JsonRpcResponse, ListToolsResult,
    METHOD_NOT_FOUND, PARSE_ERROR, RequestId, ServerCapabilities, ServerInfo, Tool, ToolContent,
    ToolsCapability,
};
pub use server::{McpServer, PROTOCOL_VERSION, ToolHandler};
