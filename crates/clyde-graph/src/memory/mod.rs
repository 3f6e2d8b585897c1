//! Memory: invoke config, checkpoint, checkpointer, in-memory saver.
//!
//! Aligns with LangGraph Checkpointer. Only in-memory persistence is provided;
//! nothing survives a process restart.

mod checkpoint;
mod checkpointer;
mod config;
mod memory_saver;

pub use checkpoint::{Checkpoint, CheckpointListItem, CheckpointMetadata, CheckpointSource};
pub use checkpointer::{CheckpointError, Checkpointer};
pub use config::RunnableConfig;
pub use memory_saver::MemorySaver;
