//! One-shot extraction command.

use crate::cli::{preflight, Output};
use crate::config::{Prompts, Settings};
use crate::llm::OllamaClient;
use crate::schedule::ShiftExtractor;
use std::sync::Arc;
use std::time::Duration;

/// Run the extract command: one query in, structured shift (or failure) out.
pub async fn run_extract(
    query: &str,
    model: Option<String>,
    settings: Settings,
) -> anyhow::Result<()> {
    if let Err(e) = preflight::check(&settings) {
        Output::error(&format!("{}", e));
        Output::info("Run 'vakt doctor' for detailed diagnostics.");
        return Err(e.into());
    }

    let model = model.unwrap_or_else(|| settings.llm.model.clone());
    let client = OllamaClient::with_timeout(
        &settings.llm.endpoint,
        &model,
        settings.llm.extract_temperature,
        Duration::from_secs(settings.llm.timeout_seconds),
    )?;

    let prompts = Prompts::load(
        settings.prompts.custom_dir.as_deref(),
        Some(&settings.prompts.variables),
    )?;

    let extractor = ShiftExtractor::new(Arc::new(client), prompts);

    let spinner = Output::spinner("Extracting shift details...");
    let result = extractor.extract(query).await;
    spinner.finish_and_clear();

    match result? {
        Some(shift) => {
            Output::success(&format!("Extracted shift: {}", shift));
            println!("{}", serde_json::to_string_pretty(&shift)?);
        }
        None => {
            Output::warning("Couldn't extract shift details from that request.");
            Output::info("Try something like: 'Schedule me for Tuesday 10am to 4pm'.");
            std::process::exit(1);
        }
    }

    Ok(())
}
