//! Tool registry and JSON-RPC dispatch.

use std::collections::HashMap;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;

use crate::error::{Error, Result};
use crate::protocol::{
    CallToolParams, CallToolResult, INTERNAL_ERROR, INVALID_PARAMS, INVALID_REQUEST,
    InitializeResult, JsonRpcRequest, JsonRpcResponse, ListToolsResult, METHOD_NOT_FOUND,
    PARSE_ERROR, RequestId, ServerCapabilities, ServerInfo, Tool, ToolsCapability,
};

/// MCP protocol version implemented by this server.
pub const PROTOCOL_VERSION: &str = "2024-11-05";

/// A tool exposed over MCP.
///
/// Implementations provide their definition for tools/list and execute
/// tools/call invocations. This is the boundary between the transport and
/// the tool's own logic.
#[async_trait]
pub trait ToolHandler: Send + Sync {
    /// Tool definition advertised by tools/list.
    fn definition(&self) -> Tool;

    /// Execute the tool with the given arguments.
    async fn call(&self, arguments: Value) -> Result<String>;
}

/// An MCP server holding registered tools.
pub struct McpServer {
    name: String,
    version: String,
    tools: HashMap<String, Box<dyn ToolHandler>>,
}

impl McpServer {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            tools: HashMap::new(),
        }
    }

    /// Register a tool under the name from its definition.
    pub fn with_tool(mut self, handler: impl ToolHandler + 'static) -> Self {
        let name = handler.definition().name;
        self.tools.insert(name, Box::new(handler));
        self
    }

    /// Handle a single JSON-RPC message.
    ///
    /// Returns `None` for notifications, which expect no response.
    pub async fn handle(&self, raw: &str) -> Option<JsonRpcResponse> {
        let request: JsonRpcRequest = match serde_json::from_str(raw) {
            Ok(r) => r,
            Err(e) => return Some(JsonRpcResponse::error(None, PARSE_ERROR, e.to_string())),
        };

        if request.jsonrpc != "2.0" {
            return Some(JsonRpcResponse::error(
                request.id,
                INVALID_REQUEST,
                format!("unsupported jsonrpc version: {}", request.jsonrpc),
            ));
        }

        if request.is_notification() {
            tracing::debug!(method = %request.method, "notification");
            return None;
        }

        Some(self.dispatch(request).await)
    }

    async fn dispatch(&self, request: JsonRpcRequest) -> JsonRpcResponse {
        let id = request.id.clone();
        tracing::debug!(method = %request.method, "dispatching request");

        match request.method.as_str() {
            "initialize" => respond(id, self.initialize_result()),
            "ping" => JsonRpcResponse::success(id, Value::Object(Default::default())),
            "tools/list" => respond(
                id,
                ListToolsResult {
                    tools: self.tools.values().map(|t| t.definition()).collect(),
                },
            ),
            "tools/call" => self.call_tool(id, request.params).await,
            other => {
                JsonRpcResponse::error(id, METHOD_NOT_FOUND, format!("method not found: {other}"))
            }
        }
    }

    fn initialize_result(&self) -> InitializeResult {
        InitializeResult {
            protocol_version: PROTOCOL_VERSION.to_string(),
            capabilities: ServerCapabilities {
                tools: ToolsCapability {
                    list_changed: false,
                },
            },
            server_info: ServerInfo {
                name: self.name.clone(),
                version: self.version.clone(),
            },
        }
    }

    async fn call_tool(&self, id: Option<RequestId>, params: Value) -> JsonRpcResponse {
        let params: CallToolParams = match serde_json::from_value(params) {
            Ok(p) => p,
            Err(e) => return JsonRpcResponse::error(id, INVALID_PARAMS, e.to_string()),
        };

        let Some(handler) = self.tools.get(&params.name) else {
            let e = Error::UnknownTool(params.name);
            return JsonRpcResponse::error(id, METHOD_NOT_FOUND, e.to_string());
        };

        let arguments = params.arguments.unwrap_or(Value::Null);
        match handler.call(arguments).await {
            Ok(text) => respond(id, CallToolResult::text(text)),
            Err(Error::InvalidParams(message)) => {
                JsonRpcResponse::error(id, INVALID_PARAMS, message)
            }
            Err(e) => JsonRpcResponse::error(id, INTERNAL_ERROR, e.to_string()),
        }
    }
}

fn respond(id: Option<RequestId>, result: impl Serialize) -> JsonRpcResponse {
    match serde_json::to_value(result) {
        Ok(value) => JsonRpcResponse::success(id, value),
        Err(e) => JsonRpcResponse::error(id, INTERNAL_ERROR, e.to_string()),
    }
}
