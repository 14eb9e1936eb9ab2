//! Ollama provider implementation
//!
//! This module implements the Provider trait for Ollama, connecting to a local
//! or remote Ollama server through its `/api/chat` endpoint.

use crate::config::OllamaConfig;
use crate::error::{AssistantError, Result};
use crate::providers::{Provider, Turn};

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Ollama API provider
///
/// # Examples
///
/// ```
/// use profile_assistant::config::OllamaConfig;
/// use profile_assistant::providers::OllamaProvider;
///
/// let config = OllamaConfig {
///     host: "http://localhost:11434".to_string(),
///     model: "llama3.2:latest".to_string(),
/// };
/// let provider = OllamaProvider::new(config).unwrap();
/// assert_eq!(provider.host(), "http://localhost:11434");
/// ```
pub struct OllamaProvider {
    client: Client,
    config: OllamaConfig,
}

/// Request structure for Ollama API
#[derive(Debug, Serialize)]
struct OllamaRequest {
    model: String,
    messages: Vec<OllamaMessage>,
    stream: bool,
}

/// Message structure for Ollama API
#[derive(Debug, Serialize, Deserialize)]
struct OllamaMessage {
    role: String,
    #[serde(default)]
    content: String,
}

/// Response structure from Ollama API
#[derive(Debug, Deserialize)]
struct OllamaResponse {
    message: OllamaMessage,
    #[serde(default)]
    done: bool,
    #[serde(default)]
    prompt_eval_count: usize,
    #[serde(default)]
    eval_count: usize,
}

impl OllamaProvider {
    /// Create a new Ollama provider instance
    ///
    /// # Errors
    ///
    /// Returns error if HTTP client initialization fails
    pub fn new(config: OllamaConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(120))
            .user_agent(concat!("profile-assistant/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| {
                AssistantError::Configuration(format!("Failed to create HTTP client: {}", e))
            })?;

        tracing::info!(
            "Initialized Ollama provider: host={}, model={}",
            config.host,
            config.model
        );

        Ok(Self { client, config })
    }

    /// Get the configured Ollama host
    pub fn host(&self) -> &str {
        &self.config.host
    }

    /// Ollama accepts all three roles natively, so the system instruction
    /// simply leads the message list.
    fn convert_turns(&self, system_instruction: &str, turns: &[Turn]) -> Vec<OllamaMessage> {
        let system = (!system_instruction.is_empty()).then(|| OllamaMessage {
            role: "system".to_string(),
            content: system_instruction.to_string(),
        });

        system
            .into_iter()
            .chain(turns.iter().map(|t| OllamaMessage {
                role: t.role().as_str().to_string(),
                content: t.text().to_string(),
            }))
            .collect()
    }
}

#[async_trait]
impl Provider for OllamaProvider {
    fn name(&self) -> &str {
        "ollama"
    }

    fn model(&self) -> String {
        self.config.model.clone()
    }

    async fn generate(&self, system_instruction: &str, turns: &[Turn]) -> Result<String> {
        let url = format!("{}/api/chat", self.config.host.trim_end_matches('/'));

        let request = OllamaRequest {
            model: self.config.model.clone(),
            messages: self.convert_turns(system_instruction, turns),
            stream: false,
        };

        tracing::debug!("Sending Ollama request: {} messages", request.messages.len());

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| AssistantError::Gateway(format!("Ollama request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(AssistantError::Gateway(format!(
                "Ollama returned error {}: {}",
                status, error_text
            )));
        }

        let parsed: OllamaResponse = response.json().await.map_err(|e| {
            AssistantError::Gateway(format!("Failed to parse Ollama response: {}", e))
        })?;

        tracing::debug!(
            "Ollama response: done={}, prompt_tokens={}, completion_tokens={}",
            parsed.done,
            parsed.prompt_eval_count,
            parsed.eval_count
        );

        if parsed.message.content.trim().is_empty() {
            return Err(AssistantError::Gateway(
                "Ollama response contained no text".to_string(),
            ));
        }

        Ok(parsed.message.content)
    }
}
