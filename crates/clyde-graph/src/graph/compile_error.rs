//! Graph compilation error.

use thiserror::Error;

/// Error when compiling a state graph.
///
/// Returned by `StateGraph::compile()` and `compile_with_checkpointer()`.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CompilationError {
    /// An edge endpoint was not registered via `add_node`.
    #[error("node not found: {0}")]
    NodeNotFound(String),
    /// No edge leaves `START`; call `set_entry_point` or `add_edge(START, id)`.
    #[error("graph has no entry point")]
    MissingEntryPoint,
}
