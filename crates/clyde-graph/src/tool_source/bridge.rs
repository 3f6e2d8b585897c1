//! Bridge to the external search and image-prompt backends.
//!
//! The tool stubs treat the bridge as a black box: one call per tool invocation,
//! result passed back as-is, failures propagated.

use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

/// Errors from a bridge call.
#[derive(Debug, Error)]
pub enum BridgeError {
    #[error("bridge http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("bridge returned {status}: {body}")]
    Status { status: u16, body: String },

    /// Failure reported by the backend itself.
    #[error("bridge error: {0}")]
    Remote(String),
}

/// External module providing the concrete search and imagine capabilities.
///
/// **Interaction**: Held by `SearchTool` / `ImagineTool` as `Arc<dyn Bridge>`.
#[async_trait]
pub trait Bridge: Send + Sync {
    async fn bridged_search(&self, query: &str) -> Result<Value, BridgeError>;

    async fn bridged_imagine(&self, prompt: &str) -> Result<Value, BridgeError>;
}

/// Bridge over HTTP: `POST {base_url}/search {"query"}` and `POST {base_url}/imagine {"prompt"}`.
#[derive(Debug, Clone)]
pub struct HttpBridge {
    base_url: String,
    client: reqwest::Client,
}

impl HttpBridge {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    async fn post(&self, path: &str, body: Value) -> Result<Value, BridgeError> {
        let url = format!("{}/{}", self.base_url, path);
        tracing::debug!(%url, "bridge call");
        let res = self.client.post(&url).json(&body).send().await?;
        let status = res.status();
        if !status.is_success() {
            let body = match res.text().await {
                Ok(body) => body,
                Err(e) => {
                    tracing::debug!(%url, error = %e, "failed to read bridge error body");
                    format!("<unreadable body: {e}>")
                }
            };
            return Err(BridgeError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(res.json::<Value>().await?)
    }
}

#[async_trait]
impl Bridge for HttpBridge {
    async fn bridged_search(&self, query: &str) -> Result<Value, BridgeError> {
        self.post("search", serde_json::json!({ "query": query })).await
    }

    async fn bridged_imagine(&self, prompt: &str) -> Result<Value, BridgeError> {
        self.post("imagine", serde_json::json!({ "prompt": prompt })).await
    }
}

/// Which bridge function a `MockBridge` call went to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BridgeCall {
    Search(String),
    Imagine(String),
}

/// In-process bridge for tests: fixed results, recorded calls, optional failure.
pub struct MockBridge {
    search_result: Value,
    imagine_result: Value,
    fail_with: Option<String>,
    calls: Mutex<Vec<BridgeCall>>,
}

impl MockBridge {
    pub fn new(search_result: Value, imagine_result: Value) -> Self {
        Self {
            search_result,
            imagine_result,
            fail_with: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Bridge whose every call fails with `BridgeError::Remote(message)`.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            fail_with: Some(message.into()),
            ..Self::new(Value::Null, Value::Null)
        }
    }

    /// Calls received so far, in order.
    pub fn calls(&self) -> Vec<BridgeCall> {
        match self.calls.lock() {
            Ok(g) => g.clone(),
            Err(e) => e.into_inner().clone(),
        }
    }

    fn record(&self, call: BridgeCall) -> Result<(), BridgeError> {
        match self.calls.lock() {
            Ok(mut g) => g.push(call),
            Err(e) => e.into_inner().push(call),
        }
        match &self.fail_with {
            Some(msg) => Err(BridgeError::Remote(msg.clone())),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl Bridge for MockBridge {
    async fn bridged_search(&self, query: &str) -> Result<Value, BridgeError> {
        self.record(BridgeCall::Search(query.to_string()))?;
        Ok(self.search_result.clone())
    }

    async fn bridged_imagine(&self, prompt: &str) -> Result<Value, BridgeError> {
        self.record(BridgeCall::Imagine(prompt.to_string()))?;
        Ok(self.imagine_result.clone())
    }
}
