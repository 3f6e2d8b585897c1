//! Tool source abstraction: declare tools and call them by name.
//!
//! The clyde tools (`search`, `imagine`) are thin stubs over an external `Bridge`;
//! `ClydeTools` exposes them as one `ToolSource` for `ToolNode` and for binding to
//! the model.

mod bridge;
mod stubs;

pub use bridge::{Bridge, BridgeCall, BridgeError, HttpBridge, MockBridge};
pub use stubs::{ClydeTools, ImagineTool, SearchTool};

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

/// Tool declaration: what the model sees when deciding to call a tool.
///
/// **Interaction**: Returned by `ToolSource::list_tools()`; bound to the model with
/// `ChatOllama::bind_tools`.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolSpec {
    pub name: String,
    /// Natural-language description for the model.
    pub description: String,
    /// JSON Schema for arguments.
    pub input_schema: Value,
}

impl ToolSpec {
    /// Spec for a tool taking one required string parameter.
    pub fn single_string(
        name: impl Into<String>,
        description: impl Into<String>,
        param: &str,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": { param: { "type": "string" } },
                "required": [param]
            }),
        }
    }
}

/// Errors from listing or calling tools.
#[derive(Debug, Error)]
pub enum ToolSourceError {
    #[error("tool not found: {0}")]
    NotFound(String),
    #[error("invalid arguments: {0}")]
    InvalidInput(String),
    #[error(transparent)]
    Bridge(#[from] BridgeError),
}

/// Tool source: list tools and call a tool.
///
/// **Interaction**: `ToolNode` uses `call_tool`; graph assembly uses `list_tools` to
/// bind declarations to the model.
#[async_trait]
pub trait ToolSource: Send + Sync {
    async fn list_tools(&self) -> Result<Vec<ToolSpec>, ToolSourceError>;

    /// Calls a tool by name with JSON arguments; returns its raw result.
    async fn call_tool(&self, name: &str, arguments: Value) -> Result<Value, ToolSourceError>;
}
