//! Continuation policy after a model turn.

use crate::graph::Next;
use crate::state::MessagesState;

/// Where to go after the model replied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// Execute the pending tool calls.
    Tools,
    End,
}

impl From<Route> for Next {
    fn from(route: Route) -> Self {
        match route {
            Route::Tools => Next::Node(crate::agent::ToolNode::ID.to_string()),
            Route::End => Next::End,
        }
    }
}

/// Inspects the last message: tool calls on an assistant message route to tools,
/// anything else (including an empty history) ends the run.
pub fn should_continue(state: &MessagesState) -> Route {
    match state.last() {
        Some(m) if m.is_assistant() && !m.tool_calls().is_empty() => Route::Tools,
        _ => Route::End,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn route_converts_to_next() {
        assert_eq!(Next::from(Route::Tools), Next::Node("tools".into()));
        assert_eq!(Next::from(Route::End), Next::End);
    }

    #[test]
    fn empty_history_ends() {
        assert_eq!(should_continue(&MessagesState::default()), Route::End);
    }
}
