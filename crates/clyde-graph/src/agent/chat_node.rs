//! Chat node: read messages, call the model once, append its reply.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::AgentError;
use crate::graph::{Next, Node};
use crate::llm::LlmClient;
use crate::state::{MessagesState, MessagesUpdate};

/// Turn handler: one model call over the full history.
///
/// The reply is printed to stdout before the node returns (switch off with
/// `with_echo(false)`). Model failures propagate; there is no retry.
///
/// **Interaction**: Implements `Node<MessagesState>`; holds the bound model as
/// `Arc<dyn LlmClient>` (e.g. `ChatOllama` with the clyde tools).
pub struct ChatNode {
    llm: Arc<dyn LlmClient>,
    echo: bool,
}

impl ChatNode {
    pub const ID: &'static str = "clyde";

    pub fn new(llm: Arc<dyn LlmClient>) -> Self {
        Self { llm, echo: true }
    }

    /// Whether to print each reply to stdout.
    pub fn with_echo(mut self, echo: bool) -> Self {
        self.echo = echo;
        self
    }

    /// Calls the model with `state.messages` and returns the reply as a one-message update.
    pub async fn turn(&self, state: &MessagesState) -> Result<MessagesUpdate, AgentError> {
        let response = self.llm.invoke(&state.messages).await?;
        let reply = response.into_message();
        tracing::debug!(
            history = state.messages.len(),
            tool_calls = reply.tool_calls().len(),
            "model replied"
        );
        if self.echo {
            println!("{reply}");
        }
        Ok(MessagesUpdate::one(reply))
    }
}

#[async_trait]
impl Node<MessagesState> for ChatNode {
    fn id(&self) -> &str {
        Self::ID
    }

    async fn run(&self, mut state: MessagesState) -> Result<(MessagesState, Next), AgentError> {
        let update = self.turn(&state).await?;
        state.apply(update);
        Ok((state, Next::Continue))
    }
}
