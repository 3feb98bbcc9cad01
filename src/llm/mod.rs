//! LLM backend abstraction.
//!
//! All natural-language understanding is delegated to a local model served
//! by Ollama. The `TextGenerator` trait is the seam between the plumbing
//! (chat, extraction, agent) and the backend, so callers can be tested with
//! canned completions.

mod ollama;

pub use ollama::OllamaClient;

use crate::error::Result;
use async_trait::async_trait;

/// A text-completion backend.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generate a completion for the given prompt.
    async fn generate(&self, prompt: &str) -> Result<String>;

    /// Human-readable description of the backing model, for diagnostics.
    fn model_info(&self) -> String;
}
