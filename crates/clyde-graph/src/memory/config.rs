//! Invoke config: thread_id, checkpoint_id, checkpoint_ns, recursion limit.
//!
//! Aligns with LangGraph's `config["configurable"]`. Used by `CompiledStateGraph::invoke`
//! and `Checkpointer`.

/// Config for a single invoke. Identifies the thread and optional checkpoint.
///
/// When the graph has a checkpointer, `thread_id` selects which conversation is
/// restored and saved; without it the run is stateless.
#[derive(Debug, Clone, Default)]
pub struct RunnableConfig {
    /// Unique id for this conversation/thread.
    pub thread_id: Option<String>,
    /// If set, load state from this checkpoint instead of the latest.
    pub checkpoint_id: Option<String>,
    /// Optional namespace for checkpoints. Default is empty.
    pub checkpoint_ns: String,
    /// Max node steps for this run; `None` uses `DEFAULT_RECURSION_LIMIT`.
    pub recursion_limit: Option<usize>,
}

impl RunnableConfig {
    /// Config for the given thread, everything else default.
    pub fn thread(thread_id: impl Into<String>) -> Self {
        Self {
            thread_id: Some(thread_id.into()),
            ..Self::default()
        }
    }

    pub fn with_recursion_limit(mut self, limit: usize) -> Self {
        self.recursion_limit = Some(limit);
        self
    }
}
