//! Agent nodes for `StateGraph<MessagesState>`.
//!
//! - `ChatNode`: the turn handler; one model call per run
//! - `ToolNode`: executes the tool calls of the last assistant message
//! - `should_continue` / `Route`: picks tools or end after a model turn
//!
//! Only `ChatNode` is wired into the clyde graph; the other two are building blocks.

mod chat_node;
mod route;
mod tool_node;

pub use chat_node::ChatNode;
pub use route::{should_continue, Route};
pub use tool_node::ToolNode;
