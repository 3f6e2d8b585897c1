//! State graph builder: nodes plus static edges.
//!
//! Add nodes with `add_node`, wire them with `add_edge` / `set_entry_point`, then
//! `compile` or `compile_with_checkpointer` to get a `CompiledStateGraph`.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use crate::graph::compile_error::CompilationError;
use crate::graph::compiled::CompiledStateGraph;
use crate::graph::node::Node;
use crate::memory::Checkpointer;

/// Virtual source node; the edge leaving it is the entry point.
pub const START: &str = "__start__";
/// Virtual sink node; an edge into it ends the run.
pub const END: &str = "__end__";

/// State graph: nodes plus at most one static outgoing edge per node.
///
/// Generic over state type `S`. Nodes may still route dynamically by returning
/// `Next::Node(id)` or `Next::End`; static edges are what `Next::Continue` follows.
///
/// **Interaction**: Accepts `Arc<dyn Node<S>>`; produces `CompiledStateGraph<S>`.
pub struct StateGraph<S> {
    nodes: HashMap<String, Arc<dyn Node<S>>>,
    /// from -> to. `START` as source marks the entry point.
    edges: BTreeMap<String, String>,
}

impl<S> Default for StateGraph<S>
where
    S: Clone + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<S> StateGraph<S>
where
    S: Clone + Send + Sync + 'static,
{
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self {
            nodes: HashMap::new(),
            edges: BTreeMap::new(),
        }
    }

    /// Adds a node; replaces any node registered under the same id.
    pub fn add_node(&mut self, id: impl Into<String>, node: Arc<dyn Node<S>>) -> &mut Self {
        self.nodes.insert(id.into(), node);
        self
    }

    /// Adds a static edge. A second edge from the same source replaces the first.
    ///
    /// `from` may be `START`; `to` may be `END`. Endpoints are checked at compile time.
    pub fn add_edge(&mut self, from: impl Into<String>, to: impl Into<String>) -> &mut Self {
        self.edges.insert(from.into(), to.into());
        self
    }

    /// Sets the node the run starts at. Same as `add_edge(START, id)`.
    pub fn set_entry_point(&mut self, id: impl Into<String>) -> &mut Self {
        self.add_edge(START, id)
    }

    /// Builds the executable graph without persistence.
    pub fn compile(self) -> Result<CompiledStateGraph<S>, CompilationError> {
        self.compile_with_checkpointer_opt(None)
    }

    /// Builds the executable graph with a checkpointer.
    ///
    /// Aligns with LangGraph `graph.compile(checkpointer=...)`. When `invoke` is given a
    /// config with `thread_id`, state is restored before the run and saved after it.
    pub fn compile_with_checkpointer(
        self,
        checkpointer: Arc<dyn Checkpointer<S>>,
    ) -> Result<CompiledStateGraph<S>, CompilationError> {
        self.compile_with_checkpointer_opt(Some(checkpointer))
    }

    fn compile_with_checkpointer_opt(
        self,
        checkpointer: Option<Arc<dyn Checkpointer<S>>>,
    ) -> Result<CompiledStateGraph<S>, CompilationError> {
        let entry = self
            .edges
            .get(START)
            .cloned()
            .ok_or(CompilationError::MissingEntryPoint)?;
        for (from, to) in &self.edges {
            if from != START && !self.nodes.contains_key(from) {
                return Err(CompilationError::NodeNotFound(from.clone()));
            }
            if to != END && !self.nodes.contains_key(to) {
                return Err(CompilationError::NodeNotFound(to.clone()));
            }
        }
        if entry == END {
            return Err(CompilationError::MissingEntryPoint);
        }
        Ok(CompiledStateGraph {
            nodes: self.nodes,
            edges: self.edges,
            entry,
            checkpointer,
        })
    }
}
