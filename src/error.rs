//! Error types for the profile assistant
//!
//! This module defines the error type returned by every core operation,
//! using `thiserror` for ergonomic error handling. The four domain kinds
//! (configuration, gateway, invalid request, not found) are kept distinct so
//! the HTTP layer and the CLI can map them without string matching.

use thiserror::Error;

/// Main error type for assistant operations
#[derive(Error, Debug)]
pub enum AssistantError {
    /// Missing or invalid configuration, including an absent credential.
    ///
    /// Raised at first use of the affected component, never at process start.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The model gateway call failed or timed out
    #[error("Gateway error: {0}")]
    Gateway(String),

    /// The request was rejected before touching session state
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// A session or record does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Reading the configuration file failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The configuration file is not valid YAML for [`crate::config::Config`]
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Coarse classification of an [`AssistantError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Configuration or credential problem
    Configuration,
    /// External model failure
    Gateway,
    /// Caller supplied a bad request
    InvalidRequest,
    /// Unknown session or record
    NotFound,
}

impl AssistantError {
    /// Returns the domain kind of this error
    ///
    /// IO and YAML failures only arise while loading configuration, so they
    /// classify as configuration errors.
    ///
    /// # Examples
    ///
    /// ```
    /// use profile_assistant::error::{AssistantError, ErrorKind};
    ///
    /// let err = AssistantError::Gateway("quota exceeded".to_string());
    /// assert_eq!(err.kind(), ErrorKind::Gateway);
    /// ```
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Gateway(_) => ErrorKind::Gateway,
            Self::InvalidRequest(_) => ErrorKind::InvalidRequest,
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::Configuration(_) | Self::Io(_) | Self::Yaml(_) => ErrorKind::Configuration,
        }
    }

    /// Message safe to show to an end user
    ///
    /// Configuration and gateway failures collapse to a generic message so
    /// that credential values and upstream payloads never reach the caller.
    /// Invalid requests and missing records keep their detail.
    pub fn public_message(&self) -> String {
        match self.kind() {
            ErrorKind::Configuration => {
                "The assistant is not configured correctly. Please try again later.".to_string()
            }
            ErrorKind::Gateway => {
                "The assistant could not generate a response. Please try again.".to_string()
            }
            ErrorKind::InvalidRequest | ErrorKind::NotFound => self.to_string(),
        }
    }
}

/// Result type alias for assistant operations
pub type Result<T> = std::result::Result<T, AssistantError>;
