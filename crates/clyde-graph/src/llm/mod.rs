//! LLM client abstraction and implementations.
//!
//! - `LlmClient`: one async chat call over a message list
//! - `LlmResponse`: assistant text plus requested tool calls
//! - `MockLlm`: fixed replies for tests and examples
//! - `ChatOllama`: local Ollama endpoint with JSON output and prompt-based tool calling

mod error;
mod mock;
mod ollama;

pub use error::LlmError;
pub use mock::MockLlm;
pub use ollama::{ChatOllama, OllamaConfig, CONVERSATIONAL_RESPONSE_TOOL};

use async_trait::async_trait;

use crate::message::{Message, ToolCall};

/// Model output for one call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LlmResponse {
    pub content: String,
    pub tool_calls: Vec<ToolCall>,
}

impl LlmResponse {
    /// Converts into the assistant message appended to the conversation.
    pub fn into_message(self) -> Message {
        Message::assistant_with_tool_calls(self.content, self.tool_calls)
    }
}

/// Chat model bound (optionally) to a set of tools.
///
/// **Interaction**: Held by `ChatNode` as `Arc<dyn LlmClient>`; implemented by
/// `ChatOllama` and `MockLlm`.
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Sends the whole history and returns the model's reply.
    async fn invoke(&self, messages: &[Message]) -> Result<LlmResponse, LlmError>;
}
