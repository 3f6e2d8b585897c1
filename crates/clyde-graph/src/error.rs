//! Graph execution error.
//!
//! `AgentError` is what `CompiledStateGraph::invoke` and `Node::run` return. Failures
//! from the model, tools and checkpointer are wrapped transparently so the original
//! error stays reachable through `source()`.

use thiserror::Error;

use crate::llm::LlmError;
use crate::memory::CheckpointError;
use crate::tool_source::ToolSourceError;

/// Errors raised while running a graph.
#[derive(Debug, Error)]
pub enum AgentError {
    /// Execution failed, with a reason.
    #[error("execution failed: {0}")]
    ExecutionFailed(String),

    #[error(transparent)]
    Llm(#[from] LlmError),

    #[error(transparent)]
    Tool(#[from] ToolSourceError),

    #[error(transparent)]
    Checkpoint(#[from] CheckpointError),

    /// The run took more node steps than allowed.
    #[error("recursion limit of {0} steps reached")]
    RecursionLimit(usize),

    /// The final message had no text.
    #[error("empty reply")]
    EmptyReply,
}
