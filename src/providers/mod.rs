//! Model providers
//!
//! This module contains the model gateway abstraction and its
//! implementations for Google Gemini and Ollama.

pub mod base;
pub mod gemini;
pub mod ollama;

pub use base::{Provider, Role, Turn};
pub use gemini::GeminiProvider;
pub use ollama::OllamaProvider;

use crate::config::ProviderConfig;
use crate::error::{AssistantError, Result};
use std::sync::Arc;

/// Create a provider instance based on configuration
///
/// # Errors
///
/// Returns error if the provider type is unknown or HTTP client setup fails.
/// A missing API key is not an error here.
///
/// # Examples
///
/// ```
/// use profile_assistant::config::ProviderConfig;
/// use profile_assistant::providers::create_provider;
///
/// let provider = create_provider(&ProviderConfig::default()).unwrap();
/// assert_eq!(provider.name(), "gemini");
/// ```
pub fn create_provider(config: &ProviderConfig) -> Result<Arc<dyn Provider>> {
    match config.provider_type.as_str() {
        "gemini" => Ok(Arc::new(GeminiProvider::new(config.gemini.clone())?)),
        "ollama" => Ok(Arc::new(OllamaProvider::new(config.ollama.clone())?)),
        other => Err(AssistantError::Configuration(format!(
            "Unknown provider type: {}",
            other
        ))),
    }
}
