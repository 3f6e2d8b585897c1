//! Clyde: a single-node conversational agent graph in Rust.
//!
//! A LangGraph-style `StateGraph<MessagesState>` with one chat node ("clyde") that
//! calls a tool-bound model once per invocation, compiled with an in-memory
//! checkpointer keyed by thread id. The model sees two tool declarations, `search`
//! and `imagine`, whose implementations live behind an external `Bridge`.
//!
//! `ToolNode` and `should_continue` are provided for callers that want a tool loop;
//! the assembled clyde graph does not use them.

pub mod agent;
pub mod clyde;
pub mod config;
pub mod error;
pub mod graph;
pub mod llm;
pub mod memory;
pub mod message;
pub mod state;
pub mod tool_source;

pub use agent::{should_continue, ChatNode, Route, ToolNode};
pub use clyde::{bind_model, build_graph, Clyde, DEFAULT_THREAD_ID};
pub use config::{ClydeConfig, ConfigError, DEFAULT_CONFIG_FILE};
pub use error::AgentError;
pub use graph::{CompilationError, CompiledStateGraph, Next, Node, StateGraph, END, START};
pub use llm::{ChatOllama, LlmClient, LlmError, LlmResponse, MockLlm, OllamaConfig};
pub use memory::{
    Checkpoint, CheckpointError, CheckpointListItem, CheckpointMetadata, CheckpointSource,
    Checkpointer, MemorySaver, RunnableConfig,
};
pub use message::{Message, ToolCall};
pub use state::{GraphState, MessagesState, MessagesUpdate};
pub use tool_source::{
    Bridge, BridgeCall, BridgeError, ClydeTools, HttpBridge, ImagineTool, MockBridge, SearchTool,
    ToolSource, ToolSourceError, ToolSpec,
};
