//! Ollama chat client (`POST /api/chat`) implementing `LlmClient`.
//!
//! Tool calling is prompt-based, the way LangChain's `OllamaFunctions` does it: bound
//! tools are described in a system message, the model is forced into JSON output and
//! must answer `{"tool": ..., "tool_input": ...}`. A `__conversational_response`
//! pseudo-tool carries plain replies.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::llm::{LlmClient, LlmError, LlmResponse};
use crate::message::{Message, ToolCall};
use crate::tool_source::ToolSpec;

/// Pseudo-tool the model selects when it wants to answer without calling a real tool.
pub const CONVERSATIONAL_RESPONSE_TOOL: &str = "__conversational_response";

const DEFAULT_BASE_URL: &str = "http://localhost:11434";
const DEFAULT_MODEL: &str = "gemma2";

const TOOL_SYSTEM_TEMPLATE: &str = "You have access to the following tools:

{tools}

You must always select one of the above tools and respond with only a JSON object matching the following schema:

{
  \"tool\": <name of the selected tool>,
  \"tool_input\": <parameters for the selected tool, matching the tool's JSON schema>
}
";

/// Ollama endpoint configuration.
#[derive(Debug, Clone)]
pub struct OllamaConfig {
    /// Base URL, default `http://localhost:11434`.
    pub base_url: String,
    /// Model name, e.g. `gemma2`, `llama3`.
    pub model: String,
    /// Output format passed to Ollama; `Some("json")` constrains output to JSON.
    pub format: Option<String>,
    pub temperature: Option<f32>,
}

impl Default for OllamaConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            format: Some("json".to_string()),
            temperature: None,
        }
    }
}

#[derive(Debug, Serialize)]
struct OllamaMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Serialize)]
struct OllamaOptions {
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct OllamaRequestBody<'a> {
    model: &'a str,
    messages: Vec<OllamaMessage>,
    stream: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    format: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    options: Option<OllamaOptions>,
}

#[derive(Debug, Deserialize)]
struct OllamaMessageOut {
    #[serde(default)]
    content: String,
}

#[derive(Debug, Deserialize)]
struct OllamaResponse {
    message: OllamaMessageOut,
}

/// Function call the model is asked to emit when tools are bound.
#[derive(Debug, Deserialize, Serialize)]
struct FunctionCall {
    tool: String,
    #[serde(default)]
    tool_input: Value,
}

/// Ollama chat client.
///
/// **Interaction**: Implements `LlmClient`; bound to the clyde tool declarations with
/// `bind_tools` and handed to `ChatNode`.
#[derive(Debug)]
pub struct ChatOllama {
    config: OllamaConfig,
    client: reqwest::Client,
    tools: Vec<ToolSpec>,
}

impl ChatOllama {
    pub fn new(config: OllamaConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
            tools: Vec::new(),
        }
    }

    /// Enables function calling over the given tools.
    pub fn bind_tools(mut self, tools: Vec<ToolSpec>) -> Self {
        self.tools = tools;
        self
    }

    fn build_body(&self, messages: &[Message]) -> Result<OllamaRequestBody<'_>, LlmError> {
        let mut out = Vec::with_capacity(messages.len() + 1);
        if !self.tools.is_empty() {
            out.push(OllamaMessage {
                role: "system",
                content: tool_system_prompt(&self.tools)?,
            });
        }
        for m in messages {
            out.push(OllamaMessage {
                role: m.role(),
                content: wire_content(m)?,
            });
        }
        Ok(OllamaRequestBody {
            model: &self.config.model,
            messages: out,
            stream: false,
            format: self.config.format.as_deref(),
            options: self
                .config
                .temperature
                .map(|temperature| OllamaOptions { temperature }),
        })
    }
}

/// Assistant turns that only called tools are replayed as the JSON the model emitted.
fn wire_content(message: &Message) -> Result<String, LlmError> {
    match message {
        Message::Assistant {
            content,
            tool_calls,
        } if content.is_empty() && !tool_calls.is_empty() => {
            let call = &tool_calls[0];
            serde_json::to_string(&FunctionCall {
                tool: call.name.clone(),
                tool_input: call.arguments.clone(),
            })
            .map_err(|e| LlmError::InvalidRequest(e.to_string()))
        }
        other => Ok(other.content().to_string()),
    }
}

fn conversational_tool() -> ToolSpec {
    ToolSpec {
        name: CONVERSATIONAL_RESPONSE_TOOL.to_string(),
        description: "Respond conversationally if no other tools should be called for a given query."
            .to_string(),
        input_schema: serde_json::json!({
            "type": "object",
            "properties": {
                "response": {
                    "type": "string",
                    "description": "Conversational response to the user."
                }
            },
            "required": ["response"]
        }),
    }
}

/// System message listing the bound tools plus the conversational pseudo-tool.
fn tool_system_prompt(tools: &[ToolSpec]) -> Result<String, LlmError> {
    let described = tools
        .iter()
        .cloned()
        .chain(std::iter::once(conversational_tool()))
        .map(|t| {
            serde_json::to_string_pretty(&serde_json::json!({
                "name": t.name,
                "description": t.description,
                "parameters": t.input_schema,
            }))
        })
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| LlmError::InvalidRequest(e.to_string()))?;
    Ok(TOOL_SYSTEM_TEMPLATE.replace("{tools}", &described.join("\n")))
}

/// Strips an optional ```json ... ``` wrapper.
fn strip_code_fence(content: &str) -> &str {
    let content = content.trim();
    content
        .strip_prefix("```json")
        .or_else(|| content.strip_prefix("```"))
        .and_then(|s| s.strip_suffix("```"))
        .map(str::trim)
        .unwrap_or(content)
}

/// Parses the model's JSON answer into assistant text or one tool call.
pub(crate) fn parse_function_call(content: &str, tools: &[ToolSpec]) -> Result<LlmResponse, LlmError> {
    let call: FunctionCall = serde_json::from_str(strip_code_fence(content)).map_err(|e| {
        LlmError::Parsing(format!("failed to parse a function call from model output: {e}; raw: {content}"))
    })?;

    if call.tool == CONVERSATIONAL_RESPONSE_TOOL {
        let response = match &call.tool_input {
            Value::Object(map) => map.get("response").cloned(),
            Value::String(_) => Some(call.tool_input.clone()),
            _ => None,
        }
        .ok_or_else(|| LlmError::Parsing(format!("conversational response without text: {content}")))?;
        let text = match response {
            Value::String(s) => s,
            other => other.to_string(),
        };
        return Ok(LlmResponse {
            content: text,
            tool_calls: Vec::new(),
        });
    }

    if !tools.iter().any(|t| t.name == call.tool) {
        return Err(LlmError::Parsing(format!(
            "model called unknown tool `{}`",
            call.tool
        )));
    }

    Ok(LlmResponse {
        content: String::new(),
        tool_calls: vec![ToolCall {
            id: format!("call_{}", uuid::Uuid::new_v4().simple()),
            name: call.tool,
            arguments: call.tool_input,
        }],
    })
}

#[async_trait]
impl LlmClient for ChatOllama {
    async fn invoke(&self, messages: &[Message]) -> Result<LlmResponse, LlmError> {
        let url = format!("{}/api/chat", self.config.base_url.trim_end_matches('/'));
        let body = self.build_body(messages)?;
        tracing::debug!(model = %self.config.model, messages = body.messages.len(), "ollama chat request");

        let res = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| LlmError::Network(e.to_string()))?;
        let status = res.status();
        let text = res.text().await.map_err(|e| LlmError::Network(e.to_string()))?;
        if !status.is_success() {
            return Err(match status.as_u16() {
                401 | 403 => LlmError::Auth(text),
                429 => LlmError::RateLimit(text),
                400..=499 => LlmError::InvalidRequest(text),
                _ => LlmError::ApiError(text),
            });
        }
        let parsed: OllamaResponse = serde_json::from_str(&text)
            .map_err(|e| LlmError::Parsing(format!("{e}: {text}")))?;
        let content = parsed.message.content;

        if self.tools.is_empty() {
            return Ok(LlmResponse {
                content,
                tool_calls: Vec::new(),
            });
        }
        parse_function_call(&content, &self.tools)
    }
}
