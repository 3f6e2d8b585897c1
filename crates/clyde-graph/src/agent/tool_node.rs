//! Tool node: execute the last assistant message's tool calls and append the results.
//!
//! Aligns with LangGraph's prebuilt `ToolNode`. A single failing call fails the step.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::AgentError;
use crate::graph::{Next, Node};
use crate::message::Message;
use crate::state::MessagesState;
use crate::tool_source::ToolSource;

/// Executes pending tool calls, one `Message::Tool` per call, in request order.
///
/// **Interaction**: Implements `Node<MessagesState>`; holds a `ToolSource`
/// (e.g. `ClydeTools`). Reached through `Route::Tools`.
pub struct ToolNode {
    tools: Arc<dyn ToolSource>,
}

impl ToolNode {
    pub const ID: &'static str = "tools";

    pub fn new(tools: Arc<dyn ToolSource>) -> Self {
        Self { tools }
    }
}

fn result_text(value: Value) -> String {
    match value {
        Value::String(s) => s,
        other => other.to_string(),
    }
}

#[async_trait]
impl Node<MessagesState> for ToolNode {
    fn id(&self) -> &str {
        Self::ID
    }

    async fn run(&self, mut state: MessagesState) -> Result<(MessagesState, Next), AgentError> {
        let calls = state
            .last()
            .map(|m| m.tool_calls().to_vec())
            .unwrap_or_default();
        for call in calls {
            tracing::debug!(tool = %call.name, id = %call.id, "calling tool");
            let value = self.tools.call_tool(&call.name, call.arguments).await?;
            state
                .messages
                .push(Message::tool(call.id, call.name, result_text(value)));
        }
        Ok((state, Next::Continue))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_results_are_not_quoted() {
        assert_eq!(result_text(Value::String("hi".into())), "hi");
        assert_eq!(result_text(serde_json::json!({"a": 1})), r#"{"a":1}"#);
    }
}
