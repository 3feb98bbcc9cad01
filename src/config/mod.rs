//! Configuration module for Vakt.
//!
//! Handles loading and managing application settings and prompt templates.

mod prompts;
mod settings;

pub use prompts::{AgentPrompts, ChatPrompts, ExtractionPrompts, Prompts};
pub use settings::{
    AgentSettings, ChatSettings, GeneralSettings, LlmSettings, PromptSettings, ServerSettings,
    Settings,
};
