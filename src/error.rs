//! Error types for Vakt.

use thiserror::Error;

/// Library-level error type for Vakt operations.
#[derive(Error, Debug)]
pub enum VaktError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("LLM backend error: {0}")]
    Llm(String),

    #[error("Model '{0}' not found. Pull it with: ollama pull {0}")]
    ModelNotFound(String),

    #[error("Agent error: {0}")]
    Agent(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type alias for Vakt operations.
pub type Result<T> = std::result::Result<T, VaktError>;
