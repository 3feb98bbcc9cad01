//! Vakt - Natural-Language Shift Scheduling
//!
//! A local-first CLI and API for scheduling shifts in plain language.
//!
//! The name "Vakt" comes from the Norwegian/Scandinavian word for "shift"
//! or "watch duty."
//!
//! # Overview
//!
//! Vakt allows you to:
//! - Chat with a scheduling assistant that gathers shift details turn by turn
//! - Extract structured shift data (date, day, start/end time) from free text
//! - Run a tool-calling agent that confirms shifts conversationally
//! - Expose the extraction logic over a small HTTP API
//!
//! The language understanding is delegated to a local Ollama model; the code
//! here is prompt assembly, JSON scraping, and the deterministic calendar
//! arithmetic that turns "tonight", "tomorrow", or a weekday name into a
//! concrete date.
//!
//! # Architecture
//!
//! The library is organized into several modules:
//!
//! - `config` - Configuration and prompt templates
//! - `llm` - Ollama backend behind the `TextGenerator` seam
//! - `schedule` - Shift domain type, date resolution, extraction
//! - `chat` - Conversational session with in-memory transcript
//! - `agent` - Tool-calling agent wrapping the extractor
//! - `cli` - Command-line interface and the HTTP server
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use vakt::config::{Prompts, Settings};
//! use vakt::llm::OllamaClient;
//! use vakt::schedule::ShiftExtractor;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let settings = Settings::load()?;
//!     let client = OllamaClient::new(
//!         &settings.llm.endpoint,
//!         &settings.llm.model,
//!         settings.llm.extract_temperature,
//!     )?;
//!
//!     let extractor = ShiftExtractor::new(Arc::new(client), Prompts::default());
//!     if let Some(shift) = extractor.extract("work tomorrow 9am to 5pm").await? {
//!         println!("Booked: {}", shift);
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod agent;
pub mod chat;
pub mod cli;
pub mod config;
pub mod error;
pub mod llm;
pub mod schedule;

pub use error::{Result, VaktError};
