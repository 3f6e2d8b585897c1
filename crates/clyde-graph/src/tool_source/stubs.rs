//! `search` and `imagine` tool stubs and the `ClydeTools` source combining them.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::tool_source::{Bridge, ToolSource, ToolSourceError, ToolSpec};

/// Pulls the single string parameter out of the call arguments.
///
/// A bare JSON string is accepted too, since some models emit `"tool_input": "..."`.
fn string_arg<'a>(tool: &str, arguments: &'a Value, param: &str) -> Result<&'a str, ToolSourceError> {
    match arguments {
        Value::String(s) => Ok(s),
        Value::Object(map) => map.get(param).and_then(Value::as_str).ok_or_else(|| {
            ToolSourceError::InvalidInput(format!("{tool}: missing or non-string '{param}'"))
        }),
        _ => Err(ToolSourceError::InvalidInput(format!(
            "{tool}: expected an object with '{param}'"
        ))),
    }
}

/// Web search tool. Delegates to `Bridge::bridged_search`.
pub struct SearchTool {
    bridge: Arc<dyn Bridge>,
}

impl SearchTool {
    pub const NAME: &'static str = "search";

    pub fn new(bridge: Arc<dyn Bridge>) -> Self {
        Self { bridge }
    }

    pub fn spec() -> ToolSpec {
        ToolSpec::single_string(Self::NAME, "Surf the web", "query")
    }

    pub async fn call(&self, query: &str) -> Result<Value, ToolSourceError> {
        Ok(self.bridge.bridged_search(query).await?)
    }
}

/// Stable-diffusion prompt tool. Delegates to `Bridge::bridged_imagine`.
pub struct ImagineTool {
    bridge: Arc<dyn Bridge>,
}

impl ImagineTool {
    pub const NAME: &'static str = "imagine";

    pub fn new(bridge: Arc<dyn Bridge>) -> Self {
        Self { bridge }
    }

    pub fn spec() -> ToolSpec {
        ToolSpec::single_string(Self::NAME, "Imagine a stable diffusion prompt", "prompt")
    }

    pub async fn call(&self, prompt: &str) -> Result<Value, ToolSourceError> {
        Ok(self.bridge.bridged_imagine(prompt).await?)
    }
}

/// The clyde tool set: `search` and `imagine` over one bridge.
///
/// **Interaction**: Implements `ToolSource`; its specs are bound to the model at graph
/// assembly and `ToolNode` can execute its calls.
pub struct ClydeTools {
    search: SearchTool,
    imagine: ImagineTool,
}

impl ClydeTools {
    pub fn new(bridge: Arc<dyn Bridge>) -> Self {
        Self {
            search: SearchTool::new(bridge.clone()),
            imagine: ImagineTool::new(bridge),
        }
    }

    /// Declarations in registration order.
    pub fn specs() -> Vec<ToolSpec> {
        vec![SearchTool::spec(), ImagineTool::spec()]
    }
}

#[async_trait]
impl ToolSource for ClydeTools {
    async fn list_tools(&self) -> Result<Vec<ToolSpec>, ToolSourceError> {
        Ok(Self::specs())
    }

    async fn call_tool(&self, name: &str, arguments: Value) -> Result<Value, ToolSourceError> {
        match name {
            SearchTool::NAME => {
                let query = string_arg(name, &arguments, "query")?;
                self.search.call(query).await
            }
            ImagineTool::NAME => {
                let prompt = string_arg(name, &arguments, "prompt")?;
                self.imagine.call(prompt).await
            }
            other => Err(ToolSourceError::NotFound(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_arg_accepts_object_and_bare_string() {
        let obj = serde_json::json!({"query": "rust"});
        assert_eq!(string_arg("search", &obj, "query").unwrap(), "rust");
        let bare = serde_json::json!("rust");
        assert_eq!(string_arg("search", &bare, "query").unwrap(), "rust");
    }

    #[test]
    fn string_arg_rejects_missing_and_wrong_type() {
        let missing = serde_json::json!({});
        assert!(matches!(
            string_arg("search", &missing, "query"),
            Err(ToolSourceError::InvalidInput(_))
        ));
        let number = serde_json::json!({"query": 3});
        assert!(string_arg("search", &number, "query").is_err());
        assert!(string_arg("search", &serde_json::json!(3), "query").is_err());
    }

    #[test]
    fn specs_declare_one_required_string() {
        let specs = ClydeTools::specs();
        assert_eq!(specs.len(), 2);
        assert_eq!(specs[0].name, "search");
        assert_eq!(specs[0].description, "Surf the web");
        assert_eq!(specs[0].input_schema["required"][0], "query");
        assert_eq!(specs[1].name, "imagine");
        assert_eq!(specs[1].input_schema["properties"]["prompt"]["type"], "string");
    }
}
