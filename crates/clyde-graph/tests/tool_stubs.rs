//! Tests for the search/imagine stubs over a mock bridge.

use std::sync::Arc;

use clyde_graph::{
    BridgeCall, BridgeError, ClydeTools, ImagineTool, MockBridge, SearchTool, ToolSource,
    ToolSourceError,
};
use serde_json::json;

fn bridge() -> Arc<MockBridge> {
    Arc::new(MockBridge::new(
        json!({"results": ["a", "b"]}),
        json!("a lighthouse at dusk, volumetric fog"),
    ))
}

#[tokio::test]
async fn search_forwards_query_once_and_returns_result_unchanged() {
    let bridge = bridge();
    let tool = SearchTool::new(bridge.clone());

    let out = tool.call("rust async").await.unwrap();
    assert_eq!(out, json!({"results": ["a", "b"]}));
    assert_eq!(bridge.calls(), vec![BridgeCall::Search("rust async".into())]);
}

#[tokio::test]
async fn imagine_forwards_prompt_once_and_returns_result_unchanged() {
    let bridge = bridge();
    let tool = ImagineTool::new(bridge.clone());

    let out = tool.call("lighthouse").await.unwrap();
    assert_eq!(out, json!("a lighthouse at dusk, volumetric fog"));
    assert_eq!(bridge.calls(), vec![BridgeCall::Imagine("lighthouse".into())]);
}

#[tokio::test]
async fn empty_input_is_passed_through() {
    let bridge = bridge();
    SearchTool::new(bridge.clone()).call("").await.unwrap();
    assert_eq!(bridge.calls(), vec![BridgeCall::Search(String::new())]);
}

#[tokio::test]
async fn bridge_failure_propagates() {
    let bridge = Arc::new(MockBridge::failing("backend down"));
    let err = SearchTool::new(bridge.clone()).call("q").await.unwrap_err();
    assert!(matches!(
        err,
        ToolSourceError::Bridge(BridgeError::Remote(msg)) if msg == "backend down"
    ));
    assert_eq!(bridge.calls().len(), 1);

    let err = ImagineTool::new(bridge).call("p").await.unwrap_err();
    assert!(matches!(err, ToolSourceError::Bridge(_)));
}

#[tokio::test]
async fn clyde_tools_lists_both_declarations() {
    let tools = ClydeTools::new(bridge());
    let names: Vec<_> = tools
        .list_tools()
        .await
        .unwrap()
        .into_iter()
        .map(|s| s.name)
        .collect();
    assert_eq!(names, ["search", "imagine"]);
}

#[tokio::test]
async fn clyde_tools_dispatches_by_name() {
    let bridge = bridge();
    let tools = ClydeTools::new(bridge.clone());

    tools
        .call_tool("search", json!({"query": "weather"}))
        .await
        .unwrap();
    tools.call_tool("imagine", json!("a cat")).await.unwrap();

    assert_eq!(
        bridge.calls(),
        vec![
            BridgeCall::Search("weather".into()),
            BridgeCall::Imagine("a cat".into())
        ]
    );
}

#[tokio::test]
async fn unknown_tool_and_bad_arguments_never_reach_the_bridge() {
    let bridge = bridge();
    let tools = ClydeTools::new(bridge.clone());

    assert!(matches!(
        tools.call_tool("browse", json!({"query": "x"})).await,
        Err(ToolSourceError::NotFound(name)) if name == "browse"
    ));
    assert!(matches!(
        tools.call_tool("search", json!({"prompt": "x"})).await,
        Err(ToolSourceError::InvalidInput(_))
    ));
    assert!(matches!(
        tools.call_tool("imagine", json!(null)).await,
        Err(ToolSourceError::InvalidInput(_))
    ));
    assert!(bridge.calls().is_empty());
}
