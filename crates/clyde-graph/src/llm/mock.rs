//! Mock LLM for tests and examples.
//!
//! Returns a fixed assistant message and optional fixed tool calls, records every
//! history it was invoked with, and can be configured to fail.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::llm::{LlmClient, LlmError, LlmResponse};
use crate::message::{Message, ToolCall};

/// Mock LLM: fixed assistant text and optional tool_calls.
///
/// Stateful mode (`first_tool_call_then`): the first call returns the tool call,
/// later calls return plain text, so a tool loop terminates.
///
/// **Interaction**: Implements `LlmClient`; used by `ChatNode` in tests.
pub struct MockLlm {
    content: String,
    tool_calls: Vec<ToolCall>,
    /// Reply for calls after the first, when set.
    then_content: Option<String>,
    error: Option<LlmError>,
    call_count: AtomicUsize,
    seen: Mutex<Vec<Vec<Message>>>,
}

impl MockLlm {
    /// Mock that returns `content` and the given tool calls on every call.
    pub fn new(content: impl Into<String>, tool_calls: Vec<ToolCall>) -> Self {
        Self {
            content: content.into(),
            tool_calls,
            then_content: None,
            error: None,
            call_count: AtomicUsize::new(0),
            seen: Mutex::new(Vec::new()),
        }
    }

    /// Mock that answers with plain text.
    pub fn with_no_tool_calls(content: impl Into<String>) -> Self {
        Self::new(content, Vec::new())
    }

    /// Mock that requests one `search` call.
    pub fn with_search_call(query: &str) -> Self {
        Self::new(
            "",
            vec![ToolCall {
                id: "call-1".to_string(),
                name: "search".to_string(),
                arguments: serde_json::json!({ "query": query }),
            }],
        )
    }

    /// First call returns `call`, every later call returns `then_content` with no tool calls.
    pub fn first_tool_call_then(call: ToolCall, then_content: impl Into<String>) -> Self {
        Self {
            then_content: Some(then_content.into()),
            ..Self::new("", vec![call])
        }
    }

    /// Mock whose every call fails with `error`.
    pub fn failing(error: LlmError) -> Self {
        Self {
            error: Some(error),
            ..Self::new("", Vec::new())
        }
    }

    /// Number of `invoke` calls so far.
    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    /// Histories passed to `invoke`, in call order.
    pub fn seen(&self) -> Vec<Vec<Message>> {
        self.seen
            .lock()
            .map(|g| g.clone())
            .unwrap_or_else(|e| e.into_inner().clone())
    }
}

#[async_trait]
impl LlmClient for MockLlm {
    async fn invoke(&self, messages: &[Message]) -> Result<LlmResponse, LlmError> {
        let n = self.call_count.fetch_add(1, Ordering::SeqCst);
        match self.seen.lock() {
            Ok(mut g) => g.push(messages.to_vec()),
            Err(e) => e.into_inner().push(messages.to_vec()),
        }
        if let Some(err) = &self.error {
            return Err(err.clone());
        }
        match (&self.then_content, n) {
            (Some(then), n) if n > 0 => Ok(LlmResponse {
                content: then.clone(),
                tool_calls: Vec::new(),
            }),
            _ => Ok(LlmResponse {
                content: self.content.clone(),
                tool_calls: self.tool_calls.clone(),
            }),
        }
    }
}
