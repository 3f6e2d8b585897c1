//! Graph node trait: one step in a StateGraph.

use async_trait::async_trait;

use crate::error::AgentError;

use super::Next;

/// One step in a graph: state in, (state out, next step).
///
/// Aligns with LangGraph node `(state) -> partial`; nodes apply their partial update
/// themselves and return the full `S` plus routing.
///
/// **Interaction**: Registered with `StateGraph::add_node`; run by
/// `CompiledStateGraph::invoke`. Implemented by `ChatNode` and `ToolNode`.
#[async_trait]
pub trait Node<S>: Send + Sync
where
    S: Clone + Send + Sync + 'static,
{
    /// Node id (e.g. `"clyde"`, `"tools"`). Must be unique within a graph.
    fn id(&self) -> &str;

    /// One step: state in, (state out, next step).
    async fn run(&self, state: S) -> Result<(S, Next), AgentError>;
}
