//! Graph state: the running conversation.
//!
//! `MessagesState` aligns with LangGraph `MessagesState`: one list of messages that
//! nodes only ever append to. `GraphState` is the hook the compiled graph uses to
//! fold caller input into state restored from a checkpoint.

use crate::message::Message;

/// State types usable with a checkpointed `CompiledStateGraph`.
///
/// `resume` is called with the state loaded from the latest checkpoint (`self`)
/// and the state passed to `invoke` (`input`).
pub trait GraphState: Clone + Send + Sync + 'static {
    fn resume(self, input: Self) -> Self;
}

/// Partial update returned by a node: messages to append.
#[derive(Debug, Clone, Default)]
pub struct MessagesUpdate {
    pub messages: Vec<Message>,
}

impl MessagesUpdate {
    /// Update carrying a single message.
    pub fn one(message: Message) -> Self {
        Self {
            messages: vec![message],
        }
    }
}

/// Ordered, append-only conversation history.
///
/// **Interaction**: Consumed and produced by `ChatNode` and `ToolNode`; persisted by
/// `MemorySaver` between invocations on the same thread.
#[derive(Debug, Clone, Default)]
pub struct MessagesState {
    pub messages: Vec<Message>,
}

impl MessagesState {
    pub fn new(messages: Vec<Message>) -> Self {
        Self { messages }
    }

    /// Appends the update's messages in order.
    pub fn apply(&mut self, update: MessagesUpdate) {
        self.messages.extend(update.messages);
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }
}

impl GraphState for MessagesState {
    fn resume(mut self, input: Self) -> Self {
        self.messages.extend(input.messages);
        self
    }
}
