//! Tests for ChatNode, ToolNode and the continuation policy.

use std::sync::Arc;

use clyde_graph::{
    should_continue, AgentError, BridgeCall, ChatNode, ClydeTools, LlmError, Message,
    MessagesState, MockBridge, MockLlm, Next, Node, Route, ToolCall, ToolNode, ToolSourceError,
};
use serde_json::json;

fn call(id: &str, name: &str, arguments: serde_json::Value) -> ToolCall {
    ToolCall {
        id: id.into(),
        name: name.into(),
        arguments,
    }
}

#[tokio::test]
async fn chat_node_calls_model_once_with_full_history() {
    let llm = Arc::new(MockLlm::with_no_tool_calls("hello there"));
    let node = ChatNode::new(llm.clone()).with_echo(false);
    let history = vec![Message::system("be brief"), Message::user("hi")];

    let (state, next) = node.run(MessagesState::new(history.clone())).await.unwrap();

    assert_eq!(next, Next::Continue);
    assert_eq!(llm.call_count(), 1);
    assert_eq!(llm.seen(), vec![history]);
    assert_eq!(state.messages.len(), 3);
    assert_eq!(state.last(), Some(&Message::assistant("hello there")));
}

#[tokio::test]
async fn chat_node_turn_returns_single_message_update() {
    let llm = Arc::new(MockLlm::with_search_call("rust"));
    let node = ChatNode::new(llm).with_echo(false);
    let state = MessagesState::new(vec![Message::user("find rust")]);

    let update = node.turn(&state).await.unwrap();
    assert_eq!(update.messages.len(), 1);
    assert_eq!(update.messages[0].tool_calls()[0].name, "search");
    assert_eq!(state.messages.len(), 1);
}

#[tokio::test]
async fn chat_node_works_on_empty_history() {
    let llm = Arc::new(MockLlm::with_no_tool_calls("?"));
    let node = ChatNode::new(llm.clone()).with_echo(false);
    let (state, _) = node.run(MessagesState::default()).await.unwrap();
    assert_eq!(state.messages.len(), 1);
    assert_eq!(llm.seen(), vec![Vec::<Message>::new()]);
}

#[tokio::test]
async fn chat_node_propagates_model_failure() {
    let llm = Arc::new(MockLlm::failing(LlmError::Network("refused".into())));
    let node = ChatNode::new(llm).with_echo(false);
    let err = node
        .run(MessagesState::new(vec![Message::user("hi")]))
        .await
        .unwrap_err();
    assert!(matches!(err, AgentError::Llm(LlmError::Network(_))));
}

#[test]
fn should_continue_routes_on_last_message() {
    let ends = [
        Message::user("hi"),
        Message::system("sys"),
        Message::assistant("done"),
        Message::tool("call-1", "search", "result"),
    ];
    for m in ends {
        let state = MessagesState::new(vec![m.clone()]);
        assert_eq!(should_continue(&state), Route::End, "{m}");
    }

    let pending = MessagesState::new(vec![
        Message::user("look it up"),
        Message::assistant_with_tool_calls("", vec![call("c1", "search", json!({"query": "x"}))]),
    ]);
    assert_eq!(should_continue(&pending), Route::Tools);
}

#[test]
fn should_continue_only_looks_at_the_last_message() {
    let state = MessagesState::new(vec![
        Message::assistant_with_tool_calls("", vec![call("c1", "search", json!("x"))]),
        Message::tool("c1", "search", "found"),
    ]);
    assert_eq!(should_continue(&state), Route::End);
}

#[tokio::test]
async fn tool_node_appends_one_result_per_call_in_order() {
    let bridge = Arc::new(MockBridge::new(json!("web results"), json!({"prompt": "x"})));
    let node = ToolNode::new(Arc::new(ClydeTools::new(bridge.clone())));
    let state = MessagesState::new(vec![Message::assistant_with_tool_calls(
        "",
        vec![
            call("c1", "search", json!({"query": "otters"})),
            call("c2", "imagine", json!({"prompt": "otter"})),
        ],
    )]);

    let (state, next) = node.run(state).await.unwrap();

    assert_eq!(next, Next::Continue);
    assert_eq!(
        bridge.calls(),
        vec![
            BridgeCall::Search("otters".into()),
            BridgeCall::Imagine("otter".into())
        ]
    );
    assert_eq!(state.messages.len(), 3);
    assert_eq!(state.messages[1], Message::tool("c1", "search", "web results"));
    assert_eq!(
        state.messages[2],
        Message::tool("c2", "imagine", r#"{"prompt":"x"}"#)
    );
}

#[tokio::test]
async fn tool_node_without_pending_calls_is_a_no_op() {
    let bridge = Arc::new(MockBridge::new(json!(null), json!(null)));
    let node = ToolNode::new(Arc::new(ClydeTools::new(bridge.clone())));
    let (state, _) = node
        .run(MessagesState::new(vec![Message::user("hi")]))
        .await
        .unwrap();
    assert_eq!(state.messages.len(), 1);
    assert!(bridge.calls().is_empty());
}

#[tokio::test]
async fn tool_node_propagates_bridge_failure() {
    let node = ToolNode::new(Arc::new(ClydeTools::new(Arc::new(MockBridge::failing(
        "timeout",
    )))));
    let state = MessagesState::new(vec![Message::assistant_with_tool_calls(
        "",
        vec![call("c1", "search", json!({"query": "x"}))],
    )]);
    let err = node.run(state).await.unwrap_err();
    assert!(matches!(err, AgentError::Tool(ToolSourceError::Bridge(_))));
}
