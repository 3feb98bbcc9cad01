//! Configuration settings for Vakt.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct Settings {
    pub general: GeneralSettings,
    pub llm: LlmSettings,
    pub chat: ChatSettings,
    pub agent: AgentSettings,
    pub server: ServerSettings,
    pub prompts: PromptSettings,
}


/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralSettings {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// LLM backend settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmSettings {
    /// Ollama API endpoint.
    pub endpoint: String,
    /// Model to use for chat and extraction.
    pub model: String,
    /// Sampling temperature for conversational replies.
    pub chat_temperature: f32,
    /// Sampling temperature for structured extraction. Kept low so the
    /// model returns the JSON it was asked for.
    pub extract_temperature: f32,
    /// Request timeout in seconds.
    pub timeout_seconds: u64,
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:11434".to_string(),
            model: "phi3".to_string(),
            chat_temperature: 0.8,
            extract_temperature: 0.0,
            timeout_seconds: 120,
        }
    }
}

/// Interactive chat settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatSettings {
    /// Maximum transcript messages kept before trimming older turns.
    pub max_history_messages: usize,
}

impl Default for ChatSettings {
    fn default() -> Self {
        Self {
            max_history_messages: 30,
        }
    }
}

/// Tool-calling agent settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentSettings {
    /// Maximum LLM round-trips before the agent gives up.
    pub max_iterations: usize,
}

impl Default for AgentSettings {
    fn default() -> Self {
        Self { max_iterations: 3 }
    }
}

/// HTTP API server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    /// Host to bind to.
    pub host: String,
    /// Port to bind to.
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8000,
        }
    }
}

/// Prompt customization settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct PromptSettings {
    /// Directory for custom prompts (overrides defaults).
    pub custom_dir: Option<String>,
    /// Custom variables available in all prompts as {{variable_name}}.
    pub variables: std::collections::HashMap<String, String>,
}


impl Settings {
    /// Load settings from the default configuration file.
    pub fn load() -> crate::error::Result<Self> {
        Self::load_from(None)
    }

    /// Load settings from a specific path, or default location if None.
    pub fn load_from(path: Option<&PathBuf>) -> crate::error::Result<Self> {
        let config_path = match path {
            Some(p) => p.clone(),
            None => Self::default_config_path(),
        };

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let settings: Settings = toml::from_str(&content)?;
            Ok(settings)
        } else {
            Ok(Settings::default())
        }
    }

    /// Save settings to the default configuration file.
    pub fn save(&self) -> crate::error::Result<()> {
        self.save_to(&Self::default_config_path())
    }

    /// Save settings to a specific path.
    pub fn save_to(&self, path: &PathBuf) -> crate::error::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)
            .map_err(|e| crate::error::VaktError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Get the default configuration file path.
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("vakt")
            .join("config.toml")
    }

    /// Set a configuration value by dotted key (e.g., "llm.model").
    pub fn set_value(&mut self, key: &str, value: &str) -> crate::error::Result<()> {
        match key {
            "general.log_level" => self.general.log_level = value.to_string(),
            "llm.endpoint" => self.llm.endpoint = value.to_string(),
            "llm.model" => self.llm.model = value.to_string(),
            "llm.chat_temperature" => {
                self.llm.chat_temperature = parse_value(key, value)?;
            }
            "llm.extract_temperature" => {
                self.llm.extract_temperature = parse_value(key, value)?;
            }
            "llm.timeout_seconds" => {
                self.llm.timeout_seconds = parse_value(key, value)?;
            }
            "chat.max_history_messages" => {
                self.chat.max_history_messages = parse_value(key, value)?;
            }
            "agent.max_iterations" => {
                self.agent.max_iterations = parse_value(key, value)?;
            }
            "server.host" => self.server.host = value.to_string(),
            "server.port" => self.server.port = parse_value(key, value)?,
            _ => {
                return Err(crate::error::VaktError::Config(format!(
                    "Unknown configuration key: {}",
                    key
                )))
            }
        }
        Ok(())
    }
}

fn parse_value<T: std::str::FromStr>(key: &str, value: &str) -> crate::error::Result<T> {
    value.parse().map_err(|_| {
        crate::error::VaktError::Config(format!("Invalid value '{}' for key {}", value, key))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.llm.endpoint, "http://localhost:11434");
        assert_eq!(settings.llm.model, "phi3");
        assert_eq!(settings.server.port, 8000);
        assert_eq!(settings.agent.max_iterations, 3);
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut settings = Settings::default();
        settings.llm.model = "llama3".to_string();
        settings.server.port = 9000;
        settings.save_to(&path).unwrap();

        let loaded = Settings::load_from(Some(&path)).unwrap();
        assert_eq!(loaded.llm.model, "llama3");
        assert_eq!(loaded.server.port, 9000);
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let path = PathBuf::from("/nonexistent/vakt/config.toml");
        let settings = Settings::load_from(Some(&path)).unwrap();
        assert_eq!(settings.llm.model, "phi3");
    }

    #[test]
    fn test_set_value() {
        let mut settings = Settings::default();
        settings.set_value("llm.model", "mistral").unwrap();
        assert_eq!(settings.llm.model, "mistral");

        settings.set_value("server.port", "8080").unwrap();
        assert_eq!(settings.server.port, 8080);

        assert!(settings.set_value("server.port", "not-a-port").is_err());
        assert!(settings.set_value("does.not.exist", "x").is_err());
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let settings: Settings = toml::from_str("[llm]\nmodel = \"qwen\"\n").unwrap();
        assert_eq!(settings.llm.model, "qwen");
        assert_eq!(settings.llm.endpoint, "http://localhost:11434");
        assert_eq!(settings.chat.max_history_messages, 30);
    }
}
