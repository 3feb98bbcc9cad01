//! Ollama HTTP client for local LLM inference.

use super::TextGenerator;
use crate::error::{Result, VaktError};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Default request timeout for Ollama API calls (2 minutes).
const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Client for a local Ollama server.
///
/// Thread-safe; clone or wrap in `Arc` to share across tasks. The underlying
/// `reqwest::Client` pools connections.
#[derive(Debug, Clone)]
pub struct OllamaClient {
    endpoint: String,
    model: String,
    temperature: f32,
    http_client: Client,
    timeout: Duration,
}

impl OllamaClient {
    /// Create a new client with the default timeout.
    pub fn new(endpoint: &str, model: &str, temperature: f32) -> Result<Self> {
        Self::with_timeout(
            endpoint,
            model,
            temperature,
            Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        )
    }

    /// Create a new client with a custom timeout.
    pub fn with_timeout(
        endpoint: &str,
        model: &str,
        temperature: f32,
        timeout: Duration,
    ) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| VaktError::Llm(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            endpoint: endpoint.trim_end_matches('/').to_string(),
            model: model.to_string(),
            temperature,
            http_client,
            timeout,
        })
    }

    /// Check if the Ollama server is reachable.
    ///
    /// Returns `Ok(false)` for connection failures and timeouts rather than
    /// an error, so callers can report "not running" distinctly.
    pub async fn health_check(&self) -> Result<bool> {
        let url = format!("{}/api/tags", self.endpoint);

        debug!("Checking Ollama health at {}", url);

        match self.http_client.get(&url).send().await {
            Ok(response) => Ok(response.status().is_success()),
            Err(e) if e.is_timeout() || e.is_connect() => {
                warn!("Ollama unreachable at {}: {}", self.endpoint, e);
                Ok(false)
            }
            Err(e) => Err(VaktError::Llm(format!("Health check failed: {}", e))),
        }
    }

    /// List model names available on the server.
    pub async fn list_models(&self) -> Result<Vec<String>> {
        let url = format!("{}/api/tags", self.endpoint);

        let response: TagsResponse = self
            .http_client
            .get(&url)
            .send()
            .await?
            .error_for_status()
            .map_err(|e| VaktError::Llm(format!("Failed to list models: {}", e)))?
            .json()
            .await?;

        Ok(response.models.into_iter().map(|m| m.name).collect())
    }

    /// The configured model name.
    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl TextGenerator for OllamaClient {
    async fn generate(&self, prompt: &str) -> Result<String> {
        let url = format!("{}/api/generate", self.endpoint);

        let request = GenerateRequest {
            model: self.model.clone(),
            prompt: prompt.to_string(),
            stream: false,
            options: GenerateOptions {
                temperature: self.temperature,
            },
        };

        debug!(
            "Sending request to Ollama: model={}, prompt_length={}",
            self.model,
            prompt.len()
        );

        let start = Instant::now();

        let response = self
            .http_client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    VaktError::Llm(format!(
                        "Ollama request timed out after {}s",
                        self.timeout.as_secs()
                    ))
                } else if e.is_connect() {
                    VaktError::Llm(format!(
                        "Cannot connect to Ollama at {}. Is it running?",
                        self.endpoint
                    ))
                } else {
                    VaktError::Llm(format!("Request failed: {}", e))
                }
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();

            if status.as_u16() == 404 && body.contains("model") {
                return Err(VaktError::ModelNotFound(self.model.clone()));
            }

            return Err(VaktError::Llm(format!("HTTP {}: {}", status, body)));
        }

        let generated: GenerateResponse = response
            .json()
            .await
            .map_err(|e| VaktError::Llm(format!("Invalid response from Ollama: {}", e)))?;

        if !generated.done {
            warn!("Ollama response indicates incomplete generation");
        }

        info!(
            "Ollama generation completed in {:.2}s (model={})",
            start.elapsed().as_secs_f64(),
            self.model
        );

        Ok(generated.response)
    }

    fn model_info(&self) -> String {
        format!("{} @ {}", self.model, self.endpoint)
    }
}

/// Request body for the Ollama generate API.
#[derive(Debug, Clone, Serialize)]
struct GenerateRequest {
    model: String,
    prompt: String,
    stream: bool,
    options: GenerateOptions,
}

#[derive(Debug, Clone, Serialize)]
struct GenerateOptions {
    temperature: f32,
}

/// Response body from the Ollama generate API (non-streaming).
#[derive(Debug, Clone, Deserialize)]
struct GenerateResponse {
    response: String,
    done: bool,
}

/// Response body from the Ollama tags API.
#[derive(Debug, Clone, Deserialize)]
struct TagsResponse {
    #[serde(default)]
    models: Vec<ModelTag>,
}

#[derive(Debug, Clone, Deserialize)]
struct ModelTag {
    name: String,
}
