//! Checkpoint and metadata types.

use std::time::SystemTime;

/// Metadata for a single checkpoint.
#[derive(Debug, Clone)]
pub struct CheckpointMetadata {
    pub source: CheckpointSource,
    /// Node steps taken by the run that produced this checkpoint.
    pub step: u64,
    pub created_at: Option<SystemTime>,
}

/// Source of the checkpoint. Aligns with LangGraph checkpoint `metadata.source`;
/// the graph only writes checkpoints at the end of its loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckpointSource {
    Loop,
}

/// One checkpoint: state snapshot plus id/ts.
///
/// **Interaction**: Produced by `CompiledStateGraph::invoke` after a run; stored by
/// `Checkpointer::put`, returned by `get_tuple`.
#[derive(Debug, Clone)]
pub struct Checkpoint<S> {
    pub id: String,
    /// Milliseconds since the Unix epoch, as text.
    pub ts: String,
    pub state: S,
    pub metadata: CheckpointMetadata,
}

/// Item returned by `Checkpointer::list`.
#[derive(Debug, Clone)]
pub struct CheckpointListItem {
    pub checkpoint_id: String,
    pub metadata: CheckpointMetadata,
}

impl<S> Checkpoint<S> {
    /// Builds a checkpoint from current state. Uses current time for ts and a fresh uuid for id.
    pub fn from_state(state: S, source: CheckpointSource, step: u64) -> Self {
        let now = SystemTime::now();
        let ts = now
            .duration_since(SystemTime::UNIX_EPOCH)
            .map(|d| d.as_millis())
            .unwrap_or(0)
            .to_string();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            ts,
            state,
            metadata: CheckpointMetadata {
                source,
                step,
                created_at: Some(now),
            },
        }
    }
}
