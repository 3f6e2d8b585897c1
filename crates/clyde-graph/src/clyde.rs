//! The clyde graph: one chat node, entry point set, in-memory checkpoints.
//!
//! The model is bound to the `search` and `imagine` declarations, but no tool node
//! or conditional edge is registered, so every run is exactly one model call.
//! `Clyde` wraps the compiled graph for thread-based invocation.

use std::sync::Arc;

use serde_json::Value;

use crate::agent::ChatNode;
use crate::config::ClydeConfig;
use crate::error::AgentError;
use crate::graph::{CompilationError, CompiledStateGraph, StateGraph};
use crate::llm::{ChatOllama, LlmClient, OllamaConfig};
use crate::memory::{MemorySaver, RunnableConfig};
use crate::message::Message;
use crate::state::MessagesState;
use crate::tool_source::{Bridge, ClydeTools, HttpBridge, ToolSource};

/// Thread used when the caller does not name one.
pub const DEFAULT_THREAD_ID: &str = "42";

/// Ollama model bound to the clyde tool declarations.
pub fn bind_model(config: OllamaConfig) -> ChatOllama {
    ChatOllama::new(config).bind_tools(ClydeTools::specs())
}

/// Assembles and compiles the clyde graph around `model`.
pub fn build_graph(
    model: Arc<dyn LlmClient>,
    echo: bool,
) -> Result<CompiledStateGraph<MessagesState>, CompilationError> {
    let mut graph = StateGraph::<MessagesState>::new();
    graph
        .add_node(ChatNode::ID, Arc::new(ChatNode::new(model).with_echo(echo)))
        .set_entry_point(ChatNode::ID);
    graph.compile_with_checkpointer(Arc::new(MemorySaver::<MessagesState>::new()))
}

/// Compiled clyde graph plus the tool set its model is bound to.
pub struct Clyde {
    graph: CompiledStateGraph<MessagesState>,
    tools: Arc<dyn ToolSource>,
}

impl Clyde {
    pub fn new(graph: CompiledStateGraph<MessagesState>, tools: Arc<dyn ToolSource>) -> Self {
        Self { graph, tools }
    }

    /// Builds an Ollama-backed clyde with an HTTP bridge, both from `config`.
    pub fn from_config(config: &ClydeConfig) -> Result<Self, CompilationError> {
        let bridge: Arc<dyn Bridge> = Arc::new(HttpBridge::new(config.bridge.base_url.clone()));
        let model = Arc::new(bind_model(config.model.to_ollama()));
        let graph = build_graph(model, config.agent.echo)?;
        Ok(Self::new(graph, Arc::new(ClydeTools::new(bridge))))
    }

    pub fn graph(&self) -> &CompiledStateGraph<MessagesState> {
        &self.graph
    }

    /// Runs one turn on `thread_id` and returns the last message's text, trimmed.
    pub async fn invoke(
        &self,
        messages: impl IntoIterator<Item = Message>,
        thread_id: &str,
    ) -> Result<String, AgentError> {
        let state = MessagesState::new(messages.into_iter().collect());
        let out = self
            .graph
            .invoke(state, Some(RunnableConfig::thread(thread_id)))
            .await?;
        let reply = out
            .last()
            .map(|m| m.content().trim().to_string())
            .unwrap_or_default();
        if reply.is_empty() {
            return Err(AgentError::EmptyReply);
        }
        Ok(reply)
    }

    /// Conversation saved for `thread_id`, empty if the thread has not run yet.
    pub async fn history(&self, thread_id: &str) -> Result<Vec<Message>, AgentError> {
        let Some(checkpointer) = self.graph.checkpointer() else {
            return Ok(Vec::new());
        };
        let saved = checkpointer
            .get_tuple(&RunnableConfig::thread(thread_id))
            .await?;
        Ok(saved
            .map(|(checkpoint, _)| checkpoint.state.messages)
            .unwrap_or_default())
    }

    /// Calls one of the bound tools directly through the bridge.
    pub async fn call_tool(&self, name: &str, arguments: Value) -> Result<Value, AgentError> {
        Ok(self.tools.call_tool(name, arguments).await?)
    }
}
