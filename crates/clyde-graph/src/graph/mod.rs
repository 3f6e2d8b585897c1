//! State graph: nodes, static edges, entry point, compile and invoke.
//!
//! Aligns with LangGraph `StateGraph`: add nodes and edges, compile (optionally with a
//! checkpointer), then invoke with state and a thread config.

mod compile_error;
mod compiled;
mod next;
mod node;
mod state_graph;

pub use compile_error::CompilationError;
pub use compiled::{CompiledStateGraph, DEFAULT_RECURSION_LIMIT};
pub use next::Next;
pub use node::Node;
pub use state_graph::{StateGraph, END, START};
