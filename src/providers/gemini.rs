//! Google Gemini provider implementation
//!
//! This module implements the Provider trait against the Gemini
//! `generateContent` REST endpoint. The API key travels in the
//! `x-goog-api-key` header so it never ends up in URLs or error text.

use crate::config::GeminiConfig;
use crate::error::{AssistantError, Result};
use crate::providers::{Provider, Role, Turn};

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Gemini API provider
///
/// Construction never fails for a missing API key; the key is checked on
/// every [`Provider::generate`] call instead, so an unconfigured process can
/// still boot and serve lookups.
///
/// # Examples
///
/// ```no_run
/// use profile_assistant::config::GeminiConfig;
/// use profile_assistant::providers::{GeminiProvider, Provider, Turn};
///
/// # async fn example() -> profile_assistant::error::Result<()> {
/// let config = GeminiConfig {
///     api_key: Some("my-key".to_string()),
///     ..GeminiConfig::default()
/// };
/// let provider = GeminiProvider::new(config)?;
/// let reply = provider
///     .generate("You are concise.", &[Turn::user("Hello!")])
///     .await?;
/// # Ok(())
/// # }
/// ```
pub struct GeminiProvider {
    client: Client,
    config: GeminiConfig,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content>,
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    max_output_tokens: u32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    #[serde(default)]
    content: Option<Content>,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    #[serde(default)]
    block_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ApiError,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    #[serde(default)]
    message: String,
}

impl Content {
    fn text(role: Option<&str>, text: &str) -> Self {
        Self {
            role: role.map(str::to_string),
            parts: vec![Part {
                text: Some(text.to_string()),
            }],
        }
    }
}

/// Gemini only knows "user" and "model"; stray system turns are sent as user text
fn gemini_role(role: Role) -> &'static str {
    match role {
        Role::Assistant => "model",
        Role::User | Role::System => "user",
    }
}

impl GeminiProvider {
    /// Create a new Gemini provider instance
    ///
    /// # Errors
    ///
    /// Returns error if HTTP client initialization fails
    pub fn new(config: GeminiConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(concat!("profile-assistant/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| {
                AssistantError::Configuration(format!("Failed to create HTTP client: {}", e))
            })?;

        tracing::info!(
            "Initialized Gemini provider: model={}, credential_present={}",
            config.model,
            config.api_key.is_some()
        );

        Ok(Self { client, config })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.api_base.trim_end_matches('/'),
            self.config.model
        )
    }

    fn build_request(&self, system_instruction: &str, turns: &[Turn]) -> GenerateContentRequest {
        let system_instruction = if system_instruction.is_empty() {
            None
        } else {
            Some(Content::text(None, system_instruction))
        };

        GenerateContentRequest {
            system_instruction,
            contents: turns
                .iter()
                .map(|t| Content::text(Some(gemini_role(t.role())), t.text()))
                .collect(),
            generation_config: GenerationConfig {
                temperature: self.config.temperature,
                max_output_tokens: self.config.max_output_tokens,
            },
        }
    }

    fn extract_text(response: GenerateContentResponse) -> Result<String> {
        if let Some(reason) = response
            .prompt_feedback
            .and_then(|feedback| feedback.block_reason)
        {
            return Err(AssistantError::Gateway(format!(
                "Gemini blocked the prompt: {}",
                reason
            )));
        }

        let candidate = response.candidates.into_iter().next().ok_or_else(|| {
            AssistantError::Gateway("Gemini response contained no candidates".to_string())
        })?;

        let text: String = candidate
            .content
            .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
            .unwrap_or_default();

        if text.trim().is_empty() {
            return Err(AssistantError::Gateway(format!(
                "Gemini response contained no text (finish reason: {})",
                candidate.finish_reason.as_deref().unwrap_or("unknown")
            )));
        }

        Ok(text)
    }
}

#[async_trait]
impl Provider for GeminiProvider {
    fn name(&self) -> &str {
        "gemini"
    }

    fn model(&self) -> String {
        self.config.model.clone()
    }

    fn is_configured(&self) -> bool {
        self.config.api_key.is_some()
    }

    async fn generate(&self, system_instruction: &str, turns: &[Turn]) -> Result<String> {
        let api_key = self.config.api_key.as_deref().ok_or_else(|| {
            AssistantError::Configuration(
                "Gemini API key is not set. Export GOOGLE_API_KEY or GEMINI_API_KEY".to_string(),
            )
        })?;

        let request = self.build_request(system_instruction, turns);

        tracing::debug!(
            "Sending Gemini request: model={}, {} turns",
            self.config.model,
            request.contents.len()
        );

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| AssistantError::Gateway(format!("Gemini request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let detail = serde_json::from_str::<ErrorEnvelope>(&body)
                .map(|envelope| envelope.error.message)
                .unwrap_or(body);
            return Err(AssistantError::Gateway(format!(
                "Gemini returned error {}: {}",
                status, detail
            )));
        }

        let parsed: GenerateContentResponse = response.json().await.map_err(|e| {
            AssistantError::Gateway(format!("Failed to parse Gemini response: {}", e))
        })?;

        Self::extract_text(parsed)
    }
}
