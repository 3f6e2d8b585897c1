//! Two turns on one thread against a mock model, no Ollama or bridge needed.
//!
//! Run: `cargo run -p clyde-graph --example mock_turn`

use std::sync::Arc;

use clyde_graph::{build_graph, Clyde, ClydeTools, Message, MockBridge, MockLlm, DEFAULT_THREAD_ID};
use serde_json::json;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let llm = Arc::new(MockLlm::with_no_tool_calls("Hello from clyde."));
    let bridge = Arc::new(MockBridge::new(json!("no results"), json!("a quiet harbor")));
    let clyde = Clyde::new(build_graph(llm, true)?, Arc::new(ClydeTools::new(bridge)));

    println!("nodes: {:?}", clyde.graph().reachable_nodes());
    for prompt in ["hi", "what can you do?"] {
        let reply = clyde.invoke([Message::user(prompt)], DEFAULT_THREAD_ID).await?;
        println!("reply: {reply}");
    }

    let history = clyde.history(DEFAULT_THREAD_ID).await?;
    println!("thread {DEFAULT_THREAD_ID} has {} messages", history.len());
    println!("imagine -> {}", clyde.call_tool("imagine", json!("harbor")).await?);
    Ok(())
}
