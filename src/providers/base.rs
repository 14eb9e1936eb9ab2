//! Base provider trait and the turn types exchanged with it
//!
//! This module defines the [`Provider`] trait every model backend implements,
//! along with the closed [`Role`] enum and the immutable [`Turn`] record that
//! make up a conversation.

use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Author of a turn
///
/// Exactly three roles exist. Deserializing any other role string fails
/// instead of silently dropping the turn.
///
/// # Examples
///
/// ```
/// use profile_assistant::providers::Role;
///
/// let role: Role = serde_json::from_str("\"assistant\"").unwrap();
/// assert_eq!(role, Role::Assistant);
/// assert!(serde_json::from_str::<Role>("\"tool\"").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

impl Role {
    /// Lower-case wire name
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::System => "system",
            Self::User => "user",
            Self::Assistant => "assistant",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One message in a conversation
///
/// Fields are private so a turn cannot be edited after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    role: Role,
    text: String,
}

impl Turn {
    /// Creates a turn with an explicit role
    pub fn new(role: Role, text: impl Into<String>) -> Self {
        Self {
            role,
            text: text.into(),
        }
    }

    /// Creates a system turn
    ///
    /// # Examples
    ///
    /// ```
    /// use profile_assistant::providers::{Role, Turn};
    ///
    /// let turn = Turn::system("You are a helpful assistant");
    /// assert_eq!(turn.role(), Role::System);
    /// ```
    pub fn system(text: impl Into<String>) -> Self {
        Self::new(Role::System, text)
    }

    /// Creates a user turn
    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Role::User, text)
    }

    /// Creates an assistant turn
    pub fn assistant(text: impl Into<String>) -> Self {
        Self::new(Role::Assistant, text)
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns true for the system role
    pub fn is_system(&self) -> bool {
        self.role == Role::System
    }
}

/// Model gateway implemented by every backend
///
/// A single call takes the system instruction and the ordered non-system
/// turns, and returns the generated reply text. Implementations report a
/// missing credential as [`crate::error::AssistantError::Configuration`] and
/// every transport, quota, or decoding failure as
/// [`crate::error::AssistantError::Gateway`].
///
/// # Examples
///
/// ```no_run
/// use profile_assistant::providers::{Provider, Turn};
/// use profile_assistant::error::Result;
/// use async_trait::async_trait;
///
/// struct EchoProvider;
///
/// #[async_trait]
/// impl Provider for EchoProvider {
///     fn name(&self) -> &str {
///         "echo"
///     }
///
///     fn model(&self) -> String {
///         "echo-1".to_string()
///     }
///
///     async fn generate(&self, _system: &str, turns: &[Turn]) -> Result<String> {
///         Ok(turns.last().map(|t| t.text().to_string()).unwrap_or_default())
///     }
/// }
/// ```
#[async_trait]
pub trait Provider: Send + Sync {
    /// Short backend identifier ("gemini", "ollama")
    fn name(&self) -> &str;

    /// Name of the model requests are sent to
    fn model(&self) -> String;

    /// Whether the backend has the credentials it needs
    ///
    /// Used by health reporting only; `generate` still enforces it.
    fn is_configured(&self) -> bool {
        true
    }

    /// Generates a reply for the given conversation
    ///
    /// # Arguments
    ///
    /// * `system_instruction` - Instruction text of the leading system turn
    /// * `turns` - Ordered user/assistant turns following the system turn
    ///
    /// # Errors
    ///
    /// Returns a configuration error when credentials are missing and a
    /// gateway error when the call fails or the response is malformed.
    async fn generate(&self, system_instruction: &str, turns: &[Turn]) -> Result<String>;
}
