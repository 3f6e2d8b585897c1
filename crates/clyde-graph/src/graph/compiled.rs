//! Compiled state graph: immutable, supports invoke only.
//!
//! Built by `StateGraph::compile`. Runs from the entry node, follows each node's
//! `Next`, and persists the final state through the checkpointer when the config
//! names a thread.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use crate::error::AgentError;
use crate::memory::{Checkpoint, CheckpointSource, Checkpointer, RunnableConfig};
use crate::state::GraphState;

use super::state_graph::{END, START};
use super::Next;
use super::Node;

/// Maximum node steps per invoke unless `RunnableConfig::recursion_limit` says otherwise.
pub const DEFAULT_RECURSION_LIMIT: usize = 25;

/// Compiled graph: immutable structure, supports invoke only.
///
/// **Interaction**: Built from `StateGraph`; callers use `invoke(state, config)`.
/// Holds an optional `Checkpointer` (e.g. `MemorySaver`).
pub struct CompiledStateGraph<S> {
    pub(super) nodes: HashMap<String, Arc<dyn Node<S>>>,
    pub(super) edges: BTreeMap<String, String>,
    pub(super) entry: String,
    pub(super) checkpointer: Option<Arc<dyn Checkpointer<S>>>,
}

impl<S> CompiledStateGraph<S>
where
    S: Clone + Send + Sync + 'static,
{
    /// Id of the first node run by `invoke`.
    pub fn entry_point(&self) -> &str {
        &self.entry
    }

    /// Node ids reachable from the entry point by static edges, in visiting order.
    ///
    /// Dynamic jumps (`Next::Node`) are not known until run time and are not counted.
    pub fn reachable_nodes(&self) -> Vec<String> {
        let mut seen: Vec<String> = Vec::new();
        let mut current = Some(self.entry.clone());
        while let Some(id) = current {
            if id == END || id == START || seen.contains(&id) {
                break;
            }
            current = self.edges.get(&id).cloned();
            seen.push(id);
        }
        seen
    }

    /// Number of registered nodes, reachable or not.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn has_checkpointer(&self) -> bool {
        self.checkpointer.is_some()
    }

    /// The checkpointer the graph was compiled with, if any.
    pub fn checkpointer(&self) -> Option<&Arc<dyn Checkpointer<S>>> {
        self.checkpointer.as_ref()
    }
}

impl<S> CompiledStateGraph<S>
where
    S: GraphState,
{
    /// Runs the graph with the given state.
    ///
    /// With a checkpointer and `config.thread_id`, the latest checkpoint of that thread
    /// is loaded first and `state` is folded into it via `GraphState::resume`; the final
    /// state is saved as a new checkpoint.
    ///
    /// - `Next::Continue`: follow the node's static edge, or end if it has none.
    /// - `Next::Node(id)`: run the node with that id next.
    /// - `Next::End`: stop and return current state.
    pub async fn invoke(&self, state: S, config: Option<RunnableConfig>) -> Result<S, AgentError> {
        let config = config.unwrap_or_default();
        let mut state = self.restore(&config, state).await?;
        let limit = config.recursion_limit.unwrap_or(DEFAULT_RECURSION_LIMIT);
        let mut current_id = self.entry.clone();
        let mut steps = 0usize;

        loop {
            if steps >= limit {
                return Err(AgentError::RecursionLimit(limit));
            }
            let node = self
                .nodes
                .get(&current_id)
                .ok_or_else(|| AgentError::ExecutionFailed(format!("node not found: {current_id}")))?;
            tracing::debug!(node = %current_id, step = steps, "running node");
            let (new_state, next) = node.run(state).await?;
            state = new_state;
            steps += 1;

            let target = match next {
                Next::End => None,
                Next::Node(id) => Some(id),
                Next::Continue => self.edges.get(&current_id).cloned(),
            };
            match target {
                Some(id) if id != END => current_id = id,
                _ => break,
            }
        }

        self.save(&config, &state, steps).await?;
        Ok(state)
    }

    async fn restore(&self, config: &RunnableConfig, input: S) -> Result<S, AgentError> {
        let (Some(checkpointer), Some(_)) = (&self.checkpointer, &config.thread_id) else {
            return Ok(input);
        };
        match checkpointer.get_tuple(config).await? {
            Some((checkpoint, _)) => Ok(checkpoint.state.resume(input)),
            None => Ok(input),
        }
    }

    async fn save(&self, config: &RunnableConfig, state: &S, steps: usize) -> Result<(), AgentError> {
        let (Some(checkpointer), Some(thread_id)) = (&self.checkpointer, &config.thread_id) else {
            return Ok(());
        };
        let checkpoint = Checkpoint::from_state(state.clone(), CheckpointSource::Loop, steps as u64);
        let id = checkpointer.put(config, &checkpoint).await?;
        tracing::info!(thread_id = %thread_id, checkpoint_id = %id, "saved checkpoint");
        Ok(())
    }
}
