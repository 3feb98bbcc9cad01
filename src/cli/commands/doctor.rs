//! Doctor command - verify the backend and configuration.

use crate::cli::Output;
use crate::config::Settings;
use crate::llm::OllamaClient;
use console::style;
use std::time::Duration;

/// Check result for a single item.
#[derive(Debug)]
pub struct CheckResult {
    pub name: String,
    pub status: CheckStatus,
    pub message: String,
    pub hint: Option<String>,
}

#[derive(Debug, PartialEq)]
pub enum CheckStatus {
    Ok,
    Warning,
    Error,
}

impl CheckResult {
    fn ok(name: &str, message: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Ok,
            message: message.to_string(),
            hint: None,
        }
    }

    fn warning(name: &str, message: &str, hint: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Warning,
            message: message.to_string(),
            hint: Some(hint.to_string()),
        }
    }

    fn error(name: &str, message: &str, hint: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Error,
            message: message.to_string(),
            hint: Some(hint.to_string()),
        }
    }

    fn print(&self) {
        let icon = match self.status {
            CheckStatus::Ok => style("✓").green(),
            CheckStatus::Warning => style("!").yellow(),
            CheckStatus::Error => style("✗").red(),
        };

        println!("  {} {} - {}", icon, style(&self.name).bold(), self.message);

        if let Some(hint) = &self.hint {
            println!("    {} {}", style("→").dim(), style(hint).dim());
        }
    }
}

/// Run all diagnostic checks.
pub async fn run_doctor(settings: &Settings) -> anyhow::Result<()> {
    Output::header("Vakt Doctor");
    println!();
    println!("Checking backend and configuration...\n");

    let mut checks = Vec::new();

    println!("{}", style("Ollama Backend").bold());
    let backend_checks = check_backend(settings).await;
    for check in &backend_checks {
        check.print();
    }
    checks.extend(backend_checks);

    println!();

    println!("{}", style("Configuration").bold());
    let config_check = check_config_file();
    config_check.print();
    checks.push(config_check);

    println!();

    // Summary
    let errors = checks.iter().filter(|c| c.status == CheckStatus::Error).count();
    let warnings = checks.iter().filter(|c| c.status == CheckStatus::Warning).count();

    if errors > 0 {
        Output::error(&format!(
            "{} error(s) found. Please fix them before using Vakt.",
            errors
        ));
        std::process::exit(1);
    } else if warnings > 0 {
        Output::warning(&format!("All checks passed with {} warning(s).", warnings));
    } else {
        Output::success("All checks passed! Vakt is ready to use.");
    }

    Ok(())
}

/// Check that Ollama is reachable and the configured model is pulled.
async fn check_backend(settings: &Settings) -> Vec<CheckResult> {
    let mut results = Vec::new();

    let client = match OllamaClient::with_timeout(
        &settings.llm.endpoint,
        &settings.llm.model,
        0.0,
        Duration::from_secs(5),
    ) {
        Ok(client) => client,
        Err(e) => {
            results.push(CheckResult::error(
                "Client",
                &format!("failed to build: {}", e),
                "Check llm.endpoint in your config",
            ));
            return results;
        }
    };

    match client.health_check().await {
        Ok(true) => {
            results.push(CheckResult::ok(
                "Server",
                &format!("reachable at {}", settings.llm.endpoint),
            ));
        }
        Ok(false) => {
            results.push(CheckResult::error(
                "Server",
                &format!("not responding at {}", settings.llm.endpoint),
                "Start it with: ollama serve",
            ));
            return results;
        }
        Err(e) => {
            results.push(CheckResult::error(
                "Server",
                &format!("health check failed: {}", e),
                "Check llm.endpoint in your config",
            ));
            return results;
        }
    }

    match client.list_models().await {
        Ok(models) => {
            if models.iter().any(|m| model_matches(m, &settings.llm.model)) {
                results.push(CheckResult::ok(
                    "Model",
                    &format!("'{}' is available", settings.llm.model),
                ));
            } else {
                results.push(CheckResult::error(
                    "Model",
                    &format!("'{}' is not pulled", settings.llm.model),
                    &format!("Pull it with: ollama pull {}", settings.llm.model),
                ));
            }
        }
        Err(e) => {
            results.push(CheckResult::warning(
                "Model",
                &format!("could not list models: {}", e),
                "Model availability will be checked on first use",
            ));
        }
    }

    results
}

/// Check if config file exists.
fn check_config_file() -> CheckResult {
    let config_path = Settings::default_config_path();
    if config_path.exists() {
        CheckResult::ok("Config file", &format!("{}", config_path.display()))
    } else {
        CheckResult::warning(
            "Config file",
            "using defaults",
            "Create with: vakt config edit",
        )
    }
}

/// Match a configured model name against a pulled model tag.
///
/// Ollama reports tags like "phi3:latest"; a bare configured name matches
/// any tag of that model.
fn model_matches(available: &str, configured: &str) -> bool {
    available == configured
        || available
            .split_once(':')
            .is_some_and(|(name, _)| name == configured)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_result_ok() {
        let result = CheckResult::ok("test", "passed");
        assert_eq!(result.status, CheckStatus::Ok);
        assert!(result.hint.is_none());
    }

    #[test]
    fn test_check_result_error() {
        let result = CheckResult::error("test", "failed", "fix it");
        assert_eq!(result.status, CheckStatus::Error);
        assert_eq!(result.hint, Some("fix it".to_string()));
    }

    #[test]
    fn test_model_matches() {
        assert!(model_matches("phi3:latest", "phi3"));
        assert!(model_matches("phi3", "phi3"));
        assert!(model_matches("phi3:3.8b", "phi3"));
        assert!(!model_matches("llama3:latest", "phi3"));
    }
}
