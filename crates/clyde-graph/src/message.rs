//! Message types for the conversation state.
//!
//! Roles follow LangChain: System (usually first), User, Assistant, plus Tool for
//! results fed back after a tool call. Only `Assistant` carries tool-call requests.
//! Used by `MessagesState::messages` and by nodes that read/append messages.

use std::fmt;

use serde_json::Value;

/// A tool invocation requested by the model inside an assistant message.
///
/// `name` references a `ToolSpec` registered with the model; `arguments` is the
/// JSON object the model produced for it. `id` correlates with `Message::Tool::call_id`.
///
/// **Interaction**: Written by `LlmClient` implementations into `LlmResponse`;
/// read by `should_continue` and `ToolNode`.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolCall {
    pub id: String,
    pub name: String,
    pub arguments: Value,
}

/// A single message in the conversation.
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    /// System prompt; typically placed first in the message list.
    System(String),
    /// Human input.
    User(String),
    /// Model reply, with any tool calls it requested.
    Assistant {
        content: String,
        tool_calls: Vec<ToolCall>,
    },
    /// Result of executing one tool call.
    Tool {
        call_id: String,
        name: String,
        content: String,
    },
}

impl Message {
    /// Builds a system message.
    pub fn system(content: impl Into<String>) -> Self {
        Self::System(content.into())
    }

    /// Builds a user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self::User(content.into())
    }

    /// Builds an assistant message without tool calls.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::Assistant {
            content: content.into(),
            tool_calls: Vec::new(),
        }
    }

    /// Builds an assistant message carrying tool-call requests.
    pub fn assistant_with_tool_calls(content: impl Into<String>, tool_calls: Vec<ToolCall>) -> Self {
        Self::Assistant {
            content: content.into(),
            tool_calls,
        }
    }

    /// Builds a tool result message.
    pub fn tool(
        call_id: impl Into<String>,
        name: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self::Tool {
            call_id: call_id.into(),
            name: name.into(),
            content: content.into(),
        }
    }

    /// Text content regardless of role.
    pub fn content(&self) -> &str {
        match self {
            Self::System(s) | Self::User(s) => s,
            Self::Assistant { content, .. } | Self::Tool { content, .. } => content,
        }
    }

    /// Role name as used on the wire (`system`, `user`, `assistant`, `tool`).
    pub fn role(&self) -> &'static str {
        match self {
            Self::System(_) => "system",
            Self::User(_) => "user",
            Self::Assistant { .. } => "assistant",
            Self::Tool { .. } => "tool",
        }
    }

    pub fn is_assistant(&self) -> bool {
        matches!(self, Self::Assistant { .. })
    }

    /// Tool calls requested by this message; empty for anything but `Assistant`.
    pub fn tool_calls(&self) -> &[ToolCall] {
        match self {
            Self::Assistant { tool_calls, .. } => tool_calls,
            _ => &[],
        }
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::System(s) => write!(f, "[System] {s}"),
            Self::User(s) => write!(f, "[User] {s}"),
            Self::Assistant {
                content,
                tool_calls,
            } => {
                write!(f, "[Assistant] {content}")?;
                for tc in tool_calls {
                    write!(f, " <tool_call {} {}({})>", tc.id, tc.name, tc.arguments)?;
                }
                Ok(())
            }
            Self::Tool { name, content, .. } => write!(f, "[Tool {name}] {content}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tool_calls_only_on_assistant() {
        let call = ToolCall {
            id: "call-1".into(),
            name: "search".into(),
            arguments: serde_json::json!({"query": "rust"}),
        };
        let m = Message::assistant_with_tool_calls("", vec![call]);
        assert_eq!(m.tool_calls().len(), 1);
        assert!(Message::user("hi").tool_calls().is_empty());
        assert!(Message::tool("call-1", "search", "ok").tool_calls().is_empty());
    }

    #[test]
    fn display_includes_role_and_calls() {
        let m = Message::assistant_with_tool_calls(
            "looking",
            vec![ToolCall {
                id: "c".into(),
                name: "imagine".into(),
                arguments: serde_json::json!({"prompt": "cat"}),
            }],
        );
        let s = m.to_string();
        assert!(s.starts_with("[Assistant] looking"));
        assert!(s.contains("imagine"));
        assert_eq!(Message::user("x").to_string(), "[User] x");
    }
}
