//! Configuration management for the profile assistant
//!
//! This module handles loading, parsing, validating, and managing
//! configuration from files, environment variables, and CLI overrides.
//! The model credential is read from the environment only; it is never
//! written back out and never appears in `Debug` output.

use crate::error::{AssistantError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Environment variables consulted for the Gemini credential, in order
pub const API_KEY_ENV_VARS: [&str; 2] = ["GOOGLE_API_KEY", "GEMINI_API_KEY"];

/// Longest accepted idle timeout (one year)
pub const MAX_SESSION_TIMEOUT_MINUTES: u64 = 365 * 24 * 60;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Model provider configuration
    #[serde(default)]
    pub provider: ProviderConfig,
    /// Conversation window and timeout settings
    #[serde(default)]
    pub conversation: ConversationConfig,
    /// Session lifetime settings
    #[serde(default)]
    pub session: SessionConfig,
    /// HTTP server settings
    #[serde(default)]
    pub server: ServerConfig,
}

/// Provider configuration
///
/// Specifies which model backend to use and its settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Type of provider to use ("gemini" or "ollama")
    #[serde(rename = "type", default = "default_provider_type")]
    pub provider_type: String,

    /// Google Gemini configuration
    #[serde(default)]
    pub gemini: GeminiConfig,

    /// Ollama configuration
    #[serde(default)]
    pub ollama: OllamaConfig,
}

fn default_provider_type() -> String {
    "gemini".to_string()
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            provider_type: default_provider_type(),
            gemini: GeminiConfig::default(),
            ollama: OllamaConfig::default(),
        }
    }
}

/// Google Gemini provider configuration
#[derive(Clone, Serialize, Deserialize)]
pub struct GeminiConfig {
    /// Model to use
    #[serde(default = "default_gemini_model")]
    pub model: String,

    /// API base URL (overridable for tests and proxies)
    #[serde(default = "default_gemini_api_base")]
    pub api_base: String,

    /// Sampling temperature
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Upper bound on generated tokens
    #[serde(default = "default_max_output_tokens")]
    pub max_output_tokens: u32,

    /// HTTP client timeout (seconds)
    #[serde(default = "default_http_timeout")]
    pub timeout_seconds: u64,

    /// API key, populated from the environment
    #[serde(skip)]
    pub api_key: Option<String>,
}

fn default_gemini_model() -> String {
    "gemini-2.5-flash".to_string()
}

fn default_gemini_api_base() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}

fn default_temperature() -> f32 {
    0.7
}

fn default_max_output_tokens() -> u32 {
    2048
}

fn default_http_timeout() -> u64 {
    120
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            model: default_gemini_model(),
            api_base: default_gemini_api_base(),
            temperature: default_temperature(),
            max_output_tokens: default_max_output_tokens(),
            timeout_seconds: default_http_timeout(),
            api_key: None,
        }
    }
}

impl fmt::Debug for GeminiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeminiConfig")
            .field("model", &self.model)
            .field("api_base", &self.api_base)
            .field("temperature", &self.temperature)
            .field("max_output_tokens", &self.max_output_tokens)
            .field("timeout_seconds", &self.timeout_seconds)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Ollama provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OllamaConfig {
    /// Ollama server host
    #[serde(default = "default_ollama_host")]
    pub host: String,

    /// Model to use for Ollama
    #[serde(default = "default_ollama_model")]
    pub model: String,
}

fn default_ollama_host() -> String {
    "http://localhost:11434".to_string()
}

fn default_ollama_model() -> String {
    "llama3.2:latest".to_string()
}

impl Default for OllamaConfig {
    fn default() -> Self {
        Self {
            host: default_ollama_host(),
            model: default_ollama_model(),
        }
    }
}

/// Conversation window configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationConfig {
    /// Non-system turns kept per session
    #[serde(default = "default_max_history")]
    pub max_history: usize,

    /// Upper bound on a single model call (seconds)
    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: u64,
}

fn default_max_history() -> usize {
    10
}

fn default_request_timeout() -> u64 {
    60
}

impl Default for ConversationConfig {
    fn default() -> Self {
        Self {
            max_history: default_max_history(),
            request_timeout_seconds: default_request_timeout(),
        }
    }
}

/// Session lifetime configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Idle time after which a session is swept (minutes)
    #[serde(default = "default_session_timeout")]
    pub timeout_minutes: u64,

    /// Session id used when a request does not name one
    #[serde(default = "default_session_id")]
    pub default_session_id: String,

    /// Period of the background sweep (seconds)
    #[serde(default = "default_sweep_interval")]
    pub sweep_interval_seconds: u64,
}

fn default_session_timeout() -> u64 {
    30
}

pub(crate) fn default_session_id() -> String {
    "default".to_string()
}

fn default_sweep_interval() -> u64 {
    60
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            timeout_minutes: default_session_timeout(),
            default_session_id: default_session_id(),
            sweep_interval_seconds: default_sweep_interval(),
        }
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind address
    #[serde(default = "default_host")]
    pub host: String,

    /// Bind port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Allowed CORS origins; `"*"` allows any
    #[serde(default = "default_cors_origins")]
    pub cors_origins: Vec<String>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_cors_origins() -> Vec<String> {
    vec!["*".to_string()]
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: default_cors_origins(),
        }
    }
}

impl Config {
    /// Load configuration from file with environment and CLI overrides
    ///
    /// A missing file is not an error; defaults are used instead.
    ///
    /// # Errors
    ///
    /// Returns error if the file exists but cannot be read or parsed
    pub fn load(path: &str, cli: &crate::cli::Cli) -> Result<Self> {
        let mut config = if Path::new(path).exists() {
            Self::from_file(path)?
        } else {
            tracing::warn!("Config file not found at {}, using defaults", path);
            Self::default()
        };

        config.apply_env_vars();
        config.apply_cli_overrides(cli);

        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml(&contents)
    }

    /// Parses a YAML document into a configuration
    ///
    /// # Errors
    ///
    /// Returns [`AssistantError::Yaml`] when the document does not parse
    pub fn from_yaml(contents: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(contents)?)
    }

    /// Applies `PROFILE_ASSISTANT_*` overrides and picks up the API key
    pub fn apply_env_vars(&mut self) {
        if let Ok(provider_type) = std::env::var("PROFILE_ASSISTANT_PROVIDER") {
            self.provider.provider_type = provider_type;
        }

        if let Ok(model) = std::env::var("PROFILE_ASSISTANT_GEMINI_MODEL") {
            self.provider.gemini.model = model;
        }

        if let Ok(host) = std::env::var("PROFILE_ASSISTANT_OLLAMA_HOST") {
            self.provider.ollama.host = host;
        }

        if let Ok(model) = std::env::var("PROFILE_ASSISTANT_OLLAMA_MODEL") {
            self.provider.ollama.model = model;
        }

        if let Ok(max_history) = std::env::var("PROFILE_ASSISTANT_MAX_HISTORY") {
            if let Ok(value) = max_history.parse() {
                self.conversation.max_history = value;
            } else {
                tracing::warn!("Invalid PROFILE_ASSISTANT_MAX_HISTORY: {}", max_history);
            }
        }

        if let Ok(timeout) = std::env::var("PROFILE_ASSISTANT_SESSION_TIMEOUT_MINUTES") {
            if let Ok(value) = timeout.parse() {
                self.session.timeout_minutes = value;
            } else {
                tracing::warn!(
                    "Invalid PROFILE_ASSISTANT_SESSION_TIMEOUT_MINUTES: {}",
                    timeout
                );
            }
        }

        if let Ok(host) = std::env::var("PROFILE_ASSISTANT_HOST") {
            self.server.host = host;
        }

        if let Ok(port) = std::env::var("PROFILE_ASSISTANT_PORT") {
            if let Ok(value) = port.parse() {
                self.server.port = value;
            } else {
                tracing::warn!("Invalid PROFILE_ASSISTANT_PORT: {}", port);
            }
        }

        let api_key = API_KEY_ENV_VARS
            .iter()
            .filter_map(|name| std::env::var(name).ok())
            .map(|value| value.trim().to_string())
            .find(|value| !value.is_empty());
        if api_key.is_some() {
            tracing::debug!("Gemini API key found in environment");
            self.provider.gemini.api_key = api_key;
        }
    }

    fn apply_cli_overrides(&mut self, cli: &crate::cli::Cli) {
        if let Some(provider) = &cli.provider {
            self.provider.provider_type = provider.clone();
        }
        if let Some(max_history) = cli.max_history {
            self.conversation.max_history = max_history;
        }
    }

    /// Validate the configuration
    ///
    /// A missing API key is deliberately not checked here: the process must
    /// boot unconfigured and report the problem on first use.
    ///
    /// # Errors
    ///
    /// Returns error if any validation check fails
    pub fn validate(&self) -> Result<()> {
        let valid_providers = ["gemini", "ollama"];
        if !valid_providers.contains(&self.provider.provider_type.as_str()) {
            return Err(AssistantError::Configuration(format!(
                "Invalid provider type: {}. Must be one of: {}",
                self.provider.provider_type,
                valid_providers.join(", ")
            )));
        }

        if self.conversation.max_history == 0 {
            return Err(AssistantError::Configuration(
                "conversation.max_history must be greater than 0".to_string(),
            ));
        }

        if self.conversation.request_timeout_seconds == 0 {
            return Err(AssistantError::Configuration(
                "conversation.request_timeout_seconds must be greater than 0".to_string(),
            ));
        }

        if self.session.timeout_minutes == 0 {
            return Err(AssistantError::Configuration(
                "session.timeout_minutes must be greater than 0".to_string(),
            ));
        }

        if self.session.timeout_minutes > MAX_SESSION_TIMEOUT_MINUTES {
            return Err(AssistantError::Configuration(format!(
                "session.timeout_minutes must be at most {}",
                MAX_SESSION_TIMEOUT_MINUTES
            )));
        }

        if self.session.sweep_interval_seconds == 0 {
            return Err(AssistantError::Configuration(
                "session.sweep_interval_seconds must be greater than 0".to_string(),
            ));
        }

        if self.session.default_session_id.trim().is_empty() {
            return Err(AssistantError::Configuration(
                "session.default_session_id cannot be empty".to_string(),
            ));
        }

        if self.server.port == 0 {
            return Err(AssistantError::Configuration(
                "server.port must be greater than 0".to_string(),
            ));
        }

        if !(0.0..=2.0).contains(&self.provider.gemini.temperature) {
            return Err(AssistantError::Configuration(
                "provider.gemini.temperature must be between 0.0 and 2.0".to_string(),
            ));
        }

        Ok(())
    }

    /// Idle timeout as a chrono duration
    ///
    /// Values above [`MAX_SESSION_TIMEOUT_MINUTES`] are clamped to it.
    pub fn session_timeout(&self) -> chrono::Duration {
        let minutes = self.session.timeout_minutes.min(MAX_SESSION_TIMEOUT_MINUTES);
        chrono::Duration::minutes(minutes as i64)
    }

    /// Model name of the configured provider
    pub fn active_model(&self) -> &str {
        match self.provider.provider_type.as_str() {
            "ollama" => &self.provider.ollama.model,
            _ => &self.provider.gemini.model,
        }
    }
}
