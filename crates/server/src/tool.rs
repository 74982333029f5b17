//! The `historical_events` tool.

use async_trait::async_trait;
use mcp::{Tool, ToolHandler};
use runtime::{Completion, EventsHandler};
use serde_json::{Value, json};

/// MCP adapter around the runtime's events handler.
pub struct HistoricalEventsTool<C> {
    handler: EventsHandler<C>,
}

impl<C: Completion> HistoricalEventsTool<C> {
    pub fn new(client: C) -> Self {
        Self {
            handler: EventsHandler::new(client),
        }
    }
}

#[async_trait]
impl<C: Completion + 'static> ToolHandler for HistoricalEventsTool<C> {
    fn definition(&self) -> Tool {
        Tool {
            name: "historical_events".to_string(),
            description: Some(
                "Gets exactly 2 historical events that happened on a given date".to_string(),
            ),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "date": {
                        "type": "string",
                        "description": "Date in YYYY-MM-DD format"
                    }
                },
                "required": ["date"]
            }),
        }
    }

    async fn call(&self, arguments: Value) -> mcp::Result<String> {
        self.handler.handle(arguments).await.map_err(|e| match e {
            runtime::Error::InvalidArgument(message) => mcp::Error::InvalidParams(message),
            other => mcp::Error::ToolCallFailed(other.to_string()),
        })
    }
}
