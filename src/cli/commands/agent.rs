//! Agent command implementation.

use crate::agent::{Agent, ToolContext};
use crate::cli::{preflight, Output};
use crate::config::{Prompts, Settings};
use crate::llm::OllamaClient;
use crate::schedule::ShiftExtractor;
use console::style;
use std::sync::Arc;
use std::time::Duration;

/// Run the tool-calling agent on a single task.
pub async fn run_agent(task: &str, model: Option<String>, settings: Settings) -> anyhow::Result<()> {
    if let Err(e) = preflight::check(&settings) {
        Output::error(&format!("{}", e));
        Output::info("Run 'vakt doctor' for detailed diagnostics.");
        return Err(e.into());
    }

    let model = model.unwrap_or_else(|| settings.llm.model.clone());
    let timeout = Duration::from_secs(settings.llm.timeout_seconds);

    // Conversational replies and structured extraction want different
    // temperatures, so the agent and its tool get separate clients.
    let agent_client = OllamaClient::with_timeout(
        &settings.llm.endpoint,
        &model,
        settings.llm.chat_temperature,
        timeout,
    )?;
    let extract_client = OllamaClient::with_timeout(
        &settings.llm.endpoint,
        &model,
        settings.llm.extract_temperature,
        timeout,
    )?;

    let prompts = Prompts::load(
        settings.prompts.custom_dir.as_deref(),
        Some(&settings.prompts.variables),
    )?;

    let extractor = ShiftExtractor::new(Arc::new(extract_client), prompts.clone());
    let agent = Agent::new(Arc::new(agent_client), ToolContext::new(extractor), prompts)
        .with_max_iterations(settings.agent.max_iterations);

    let spinner = Output::spinner("Agent working...");
    let result = agent.run(task).await;
    spinner.finish_and_clear();

    let response = result?;

    for record in &response.tool_calls {
        println!("{}", style(format!("  [{}]", record)).dim());
    }

    println!("\n{} {}\n", style("Agent:").cyan().bold(), response.content);

    Ok(())
}
