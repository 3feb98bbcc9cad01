//! Pre-flight checks before LLM-backed operations.
//!
//! Validates the backend configuration before starting operations that
//! would otherwise fail midway with a less helpful error.

use crate::config::Settings;
use crate::error::{Result, VaktError};
use url::Url;

/// Check that the configured backend looks usable.
///
/// Every command that talks to the model runs this first. Deeper checks
/// (is the server actually up, is the model pulled) live in `vakt doctor`.
pub fn check(settings: &Settings) -> Result<()> {
    check_endpoint(&settings.llm.endpoint)?;
    check_model(&settings.llm.model)?;
    Ok(())
}

/// Check that the Ollama endpoint is a well-formed http(s) URL.
fn check_endpoint(endpoint: &str) -> Result<()> {
    let url = Url::parse(endpoint).map_err(|e| {
        VaktError::Config(format!(
            "Invalid llm.endpoint '{}': {}. Expected e.g. http://localhost:11434",
            endpoint, e
        ))
    })?;

    match url.scheme() {
        "http" | "https" => Ok(()),
        other => Err(VaktError::Config(format!(
            "Invalid llm.endpoint scheme '{}': expected http or https",
            other
        ))),
    }
}

/// Check that a model is configured.
fn check_model(model: &str) -> Result<()> {
    if model.trim().is_empty() {
        return Err(VaktError::Config(
            "llm.model is empty. Set it with: vakt config set llm.model phi3".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings_pass() {
        assert!(check(&Settings::default()).is_ok());
    }

    #[test]
    fn test_bad_endpoint_fails() {
        let mut settings = Settings::default();
        settings.llm.endpoint = "localhost:11434".to_string();
        assert!(check(&settings).is_err());

        settings.llm.endpoint = "ftp://localhost".to_string();
        assert!(check(&settings).is_err());
    }

    #[test]
    fn test_empty_model_fails() {
        let mut settings = Settings::default();
        settings.llm.model = "  ".to_string();
        assert!(check(&settings).is_err());
    }
}
