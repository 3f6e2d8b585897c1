//! Configuration: model endpoint, bridge endpoint, agent options.
//!
//! Loaded from a TOML file (missing file means defaults), then overridden from the
//! environment: `OLLAMA_BASE_URL`, `CLYDE_MODEL`, `CLYDE_BRIDGE_URL`. Caller should
//! run `dotenv::dotenv().ok()` first.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::llm::OllamaConfig;

/// Default config file name, looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "clyde.toml";

const DEFAULT_BRIDGE_URL: &str = "http://127.0.0.1:8765";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("parse config: {0}")]
    Toml(#[from] toml::de::Error),
}

/// `[model]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    pub base_url: String,
    pub name: String,
    /// `"json"` forces JSON output; function calling relies on it.
    pub format: Option<String>,
    pub temperature: Option<f32>,
}

impl Default for ModelConfig {
    fn default() -> Self {
        let ollama = OllamaConfig::default();
        Self {
            base_url: ollama.base_url,
            name: ollama.model,
            format: ollama.format,
            temperature: ollama.temperature,
        }
    }
}

impl ModelConfig {
    pub fn to_ollama(&self) -> OllamaConfig {
        OllamaConfig {
            base_url: self.base_url.clone(),
            model: self.name.clone(),
            format: self.format.clone(),
            temperature: self.temperature,
        }
    }
}

/// `[bridge]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BridgeConfig {
    pub base_url: String,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BRIDGE_URL.to_string(),
        }
    }
}

/// `[agent]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    /// Prepended as a System message by the CLI when `--system` is not given.
    pub system_prompt: Option<String>,
    /// Print each model reply to stdout from inside the node.
    pub echo: bool,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            system_prompt: None,
            echo: true,
        }
    }
}

/// Resolved configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ClydeConfig {
    pub model: ModelConfig,
    pub bridge: BridgeConfig,
    pub agent: AgentConfig,
}

impl ClydeConfig {
    /// Reads `path`; a missing file yields defaults.
    pub fn read(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::debug!(path = %path.display(), "config file not found, using defaults");
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Applies `OLLAMA_BASE_URL`, `CLYDE_MODEL`, `CLYDE_BRIDGE_URL` from the process environment.
    pub fn apply_env(self) -> Self {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Applies overrides from `lookup` (keyed by env var name); empty values are ignored.
    pub fn apply_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        if let Some(v) = get("OLLAMA_BASE_URL") {
            self.model.base_url = v;
        }
        if let Some(v) = get("CLYDE_MODEL") {
            self.model.name = v;
        }
        if let Some(v) = get("CLYDE_BRIDGE_URL") {
            self.bridge.base_url = v;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_gives_defaults() {
        let cfg = ClydeConfig::from_toml_str("").unwrap();
        assert_eq!(cfg.model.name, "gemma2");
        assert_eq!(cfg.model.format.as_deref(), Some("json"));
        assert_eq!(cfg.model.base_url, "http://localhost:11434");
        assert!(cfg.agent.echo);
        assert!(cfg.agent.system_prompt.is_none());
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let cfg = ClydeConfig::from_toml_str(
            r#"
            [model]
            name = "llama3"
            temperature = 0.2

            [agent]
            echo = false
            "#,
        )
        .unwrap();
        assert_eq!(cfg.model.name, "llama3");
        assert_eq!(cfg.model.temperature, Some(0.2));
        assert_eq!(cfg.model.base_url, "http://localhost:11434");
        assert!(!cfg.agent.echo);
        assert_eq!(cfg.bridge.base_url, "http://127.0.0.1:8765");
    }

    #[test]
    fn bad_toml_is_an_error() {
        assert!(matches!(
            ClydeConfig::from_toml_str("[model\nname = 1"),
            Err(ConfigError::Toml(_))
        ));
    }

    #[test]
    fn overrides_replace_non_empty_values() {
        let cfg = ClydeConfig::default().apply_overrides(|key| match key {
            "CLYDE_MODEL" => Some("mistral".into()),
            "CLYDE_BRIDGE_URL" => Some("  ".into()),
            _ => None,
        });
        assert_eq!(cfg.model.name, "mistral");
        assert_eq!(cfg.bridge.base_url, "http://127.0.0.1:8765");
    }

    #[test]
    fn missing_file_gives_defaults() {
        let cfg = ClydeConfig::read("/nonexistent/clyde.toml").unwrap();
        assert_eq!(cfg.model.name, "gemma2");
    }
}
