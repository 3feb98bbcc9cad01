//! Interactive chat command.

use crate::chat::ChatSession;
use crate::cli::{preflight, Output};
use crate::config::{Prompts, Settings};
use crate::llm::OllamaClient;
use console::style;
use std::io::{self, BufRead, Write};
use std::sync::Arc;
use std::time::Duration;

/// Run the interactive chat command.
pub async fn run_chat(model: Option<String>, settings: Settings) -> anyhow::Result<()> {
    if let Err(e) = preflight::check(&settings) {
        Output::error(&format!("{}", e));
        Output::info("Run 'vakt doctor' for detailed diagnostics.");
        return Err(e.into());
    }

    let model = model.unwrap_or_else(|| settings.llm.model.clone());
    let client = OllamaClient::with_timeout(
        &settings.llm.endpoint,
        &model,
        settings.llm.chat_temperature,
        Duration::from_secs(settings.llm.timeout_seconds),
    )?;

    let prompts = Prompts::load(
        settings.prompts.custom_dir.as_deref(),
        Some(&settings.prompts.variables),
    )?;

    let today = chrono::Local::now().date_naive();
    let mut session = ChatSession::new(
        Arc::new(client),
        &prompts,
        today,
        settings.chat.max_history_messages,
    );

    println!("\n{}", style("Vakt Scheduling Assistant").bold().cyan());
    println!("{}", style(format!("Today is {}.", today.format("%A, %B %d, %Y"))).dim());
    println!(
        "{}\n",
        style("Describe the shift you want to book, or 'exit' to quit. Use 'clear' to reset the conversation.").dim()
    );

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("{} ", style("You:").green().bold());
        stdout.flush()?;

        let mut input = String::new();
        if stdin.lock().read_line(&mut input)? == 0 {
            break;
        }

        let input = input.trim();

        if input.is_empty() {
            continue;
        }

        if input.eq_ignore_ascii_case("exit")
            || input.eq_ignore_ascii_case("quit")
            || input.eq_ignore_ascii_case("bye")
        {
            Output::info("Thank you! Have a great day!");
            break;
        }

        if input.eq_ignore_ascii_case("clear") {
            session.clear();
            Output::info("Conversation history cleared.");
            continue;
        }

        let spinner = Output::spinner("Thinking...");
        let result = session.send(input).await;
        spinner.finish_and_clear();

        match result {
            Ok(reply) => {
                println!("\n{} {}\n", style("Vakt:").cyan().bold(), reply);
            }
            Err(e) => {
                Output::error(&format!("Error: {}", e));
                Output::info("Please try again.");
            }
        }
    }

    Ok(())
}
