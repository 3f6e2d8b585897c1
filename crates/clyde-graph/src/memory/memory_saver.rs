//! In-memory checkpointer. Aligns with LangGraph MemorySaver. Not persistent.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::memory::checkpoint::{Checkpoint, CheckpointListItem, CheckpointMetadata};
use crate::memory::checkpointer::{CheckpointError, Checkpointer};
use crate::memory::config::RunnableConfig;

/// (thread_id, checkpoint_ns)
type ThreadKey = (String, String);

fn thread_key(config: &RunnableConfig) -> Result<ThreadKey, CheckpointError> {
    let thread_id = config
        .thread_id
        .clone()
        .ok_or(CheckpointError::ThreadIdRequired)?;
    Ok((thread_id, config.checkpoint_ns.clone()))
}

/// In-memory checkpointer: per-thread list of checkpoints, oldest first.
///
/// **Interaction**: Used as `Arc<dyn Checkpointer<S>>` in
/// `StateGraph::compile_with_checkpointer`; the clyde graph is compiled with one.
pub struct MemorySaver<S> {
    inner: Arc<RwLock<HashMap<ThreadKey, Vec<Checkpoint<S>>>>>,
}

impl<S> MemorySaver<S> {
    /// Creates an empty saver.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl<S> Default for MemorySaver<S> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<S> Checkpointer<S> for MemorySaver<S>
where
    S: Clone + Send + Sync + 'static,
{
    async fn put(
        &self,
        config: &RunnableConfig,
        checkpoint: &Checkpoint<S>,
    ) -> Result<String, CheckpointError> {
        let key = thread_key(config)?;
        self.inner
            .write()
            .await
            .entry(key)
            .or_default()
            .push(checkpoint.clone());
        Ok(checkpoint.id.clone())
    }

    async fn get_tuple(
        &self,
        config: &RunnableConfig,
    ) -> Result<Option<(Checkpoint<S>, CheckpointMetadata)>, CheckpointError> {
        let key = thread_key(config)?;
        let guard = self.inner.read().await;
        let Some(checkpoints) = guard.get(&key) else {
            return match &config.checkpoint_id {
                Some(id) => Err(CheckpointError::NotFound(id.clone())),
                None => Ok(None),
            };
        };
        let found = match &config.checkpoint_id {
            Some(id) => Some(
                checkpoints
                    .iter()
                    .find(|c| &c.id == id)
                    .ok_or_else(|| CheckpointError::NotFound(id.clone()))?,
            ),
            None => checkpoints.last(),
        };
        Ok(found.map(|c| (c.clone(), c.metadata.clone())))
    }

    async fn list(
        &self,
        config: &RunnableConfig,
        limit: Option<usize>,
    ) -> Result<Vec<CheckpointListItem>, CheckpointError> {
        let key = thread_key(config)?;
        let guard = self.inner.read().await;
        let items = guard
            .get(&key)
            .map(|checkpoints| {
                checkpoints
                    .iter()
                    .rev()
                    .take(limit.unwrap_or(usize::MAX))
                    .map(|c| CheckpointListItem {
                        checkpoint_id: c.id.clone(),
                        metadata: c.metadata.clone(),
                    })
                    .collect()
            })
            .unwrap_or_default();
        Ok(items)
    }
}
