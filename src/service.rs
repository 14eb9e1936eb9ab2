//! Service boundary for the assistant
//!
//! [`AssistantService`] wires the profile, session store and conversation
//! manager together and exposes the operations the HTTP server and the CLI
//! call. Errors from the core are logged here, once, before being returned.

use crate::agent::{Conversation, ConversationManager};
use crate::config::Config;
use crate::context::ContextResolver;
use crate::error::{AssistantError, Result};
use crate::profile::{Category, Profile};
use crate::prompts::build_system_prompt;
use crate::providers::{create_provider, Provider};
use crate::session::{SessionStore, SessionSummary};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Reply to a chat message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    pub response: String,
    pub success: bool,
    pub timestamp: DateTime<Utc>,
    /// Non-system turns retained after this exchange
    pub message_count: usize,
}

/// One profile category returned without calling the model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuickInfoResponse {
    #[serde(rename = "type")]
    pub info_type: String,
    pub data: Value,
    pub success: bool,
}

/// Acknowledgement of a reset
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResetResponse {
    pub message: String,
    pub success: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionsResponse {
    pub sessions: Vec<SessionSummary>,
    pub count: usize,
    pub memory_limit_per_session: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub model: String,
    pub active_sessions: usize,
    pub memory_limit: usize,
    pub timestamp: DateTime<Utc>,
}

/// Result of a manual sweep
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CleanupResponse {
    pub message: String,
    pub removed: usize,
    pub active: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileResponse {
    pub profile: Profile,
    pub success: bool,
}

/// Retained turns of one session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryResponse {
    pub session_id: String,
    pub messages: Conversation,
    pub message_count: usize,
    pub last_activity: DateTime<Utc>,
}

/// Name, role and portfolio link shown on the landing document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileCard {
    pub name: String,
    pub role: String,
    pub portfolio: String,
}

/// Landing document describing the running service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceInfo {
    pub message: String,
    pub version: String,
    pub status: String,
    pub profile: ProfileCard,
    pub features: Vec<String>,
    pub endpoints: BTreeMap<String, String>,
}

/// Composition root shared by every request
#[derive(Debug)]
pub struct AssistantService {
    profile: Arc<Profile>,
    store: SessionStore,
    manager: ConversationManager,
    model: String,
    default_session_id: String,
    session_timeout: chrono::Duration,
}

impl AssistantService {
    /// Builds the service from configuration
    ///
    /// The provider is created without checking credentials, so an
    /// unconfigured process still starts and serves lookups.
    ///
    /// # Errors
    ///
    /// Returns a configuration error for an unknown provider type or when the
    /// HTTP client cannot be built.
    pub fn new(config: &Config) -> Result<Self> {
        let provider = create_provider(&config.provider)?;
        if !provider.is_configured() {
            warn!(
                provider = provider.name(),
                "Model credentials are missing; chat will fail until they are set"
            );
        }
        Ok(Self::with_provider(config, provider))
    }

    /// Builds the service around an existing provider
    pub fn with_provider(config: &Config, provider: Arc<dyn Provider>) -> Self {
        let profile = Arc::new(Profile::builtin());
        let system_prompt = build_system_prompt(&profile);
        let manager = ConversationManager::new(
            provider,
            ContextResolver::new(Arc::clone(&profile)),
            system_prompt,
            &config.conversation,
        );

        info!(
            provider = manager.provider().name(),
            model = %manager.provider().model(),
            max_history = config.conversation.max_history,
            "Assistant service ready"
        );

        Self {
            profile,
            store: SessionStore::new(),
            manager,
            model: config.active_model().to_string(),
            default_session_id: config.session.default_session_id.clone(),
            session_timeout: config.session_timeout(),
        }
    }

    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    pub fn profile_data(&self) -> &Profile {
        &self.profile
    }

    pub fn manager(&self) -> &ConversationManager {
        &self.manager
    }

    pub fn default_session_id(&self) -> &str {
        &self.default_session_id
    }

    fn session_id<'a>(&'a self, session_id: Option<&'a str>) -> &'a str {
        session_id
            .filter(|id| !id.trim().is_empty())
            .unwrap_or(&self.default_session_id)
    }

    /// Runs one chat turn for a session
    ///
    /// Turns on the same session are serialized; the session is only updated
    /// when the model call succeeds.
    ///
    /// # Errors
    ///
    /// Returns an invalid-request error for a blank message, and a gateway or
    /// configuration error when the model call fails.
    pub async fn chat(&self, message: &str, session_id: Option<&str>) -> Result<ChatResponse> {
        if message.trim().is_empty() {
            return Err(AssistantError::InvalidRequest(
                "Message cannot be empty".to_string(),
            ));
        }

        let session_id = self.session_id(session_id);
        let mut session = self.store.lock(session_id).await;

        let outcome = match self.manager.turn(&session.conversation, message).await {
            Ok(outcome) => outcome,
            Err(e) => {
                error!(session_id = %session_id, error = %e, "Chat turn failed");
                return Err(e);
            }
        };

        session.conversation = outcome.conversation;
        session.touch();
        let message_count = session.conversation.message_count();
        debug!(session_id = %session_id, message_count, "Chat turn stored");

        Ok(ChatResponse {
            response: outcome.reply,
            success: true,
            timestamp: Utc::now(),
            message_count,
        })
    }

    /// Returns one profile category by exact name
    ///
    /// # Errors
    ///
    /// Returns an invalid-request error naming the accepted categories when
    /// `info_type` is not one of them.
    pub fn quick_info(&self, info_type: &str) -> Result<QuickInfoResponse> {
        let Some(data) = self.profile.lookup(info_type) else {
            warn!(info_type = %info_type, "Unknown quick-info type");
            return Err(AssistantError::InvalidRequest(format!(
                "Invalid info_type. Choose from: {}",
                Category::accepted_names()
            )));
        };

        Ok(QuickInfoResponse {
            info_type: info_type.to_string(),
            data,
            success: true,
        })
    }

    /// Drops a session's history
    ///
    /// Resetting a session that does not exist succeeds.
    pub fn reset(&self, session_id: Option<&str>) -> ResetResponse {
        let session_id = self.session_id(session_id);
        let message = if self.store.delete(session_id) {
            info!(session_id = %session_id, "Conversation reset");
            format!("Conversation reset for session: {}", session_id)
        } else {
            format!("No active conversation found for session: {}", session_id)
        };

        ResetResponse {
            message,
            success: true,
        }
    }

    /// Removes idle sessions; returns how many were dropped
    pub fn sweep(&self) -> usize {
        self.store.sweep(self.session_timeout)
    }

    /// Lists live sessions after sweeping idle ones
    ///
    /// Sessions mid-turn are listed without waiting for the turn to finish.
    pub fn sessions(&self) -> SessionsResponse {
        self.sweep();
        let sessions = self.store.list();
        SessionsResponse {
            count: sessions.len(),
            sessions,
            memory_limit_per_session: self.manager.max_history(),
        }
    }

    /// Reports liveness after sweeping idle sessions
    pub fn health(&self) -> HealthResponse {
        self.sweep();
        HealthResponse {
            status: "healthy".to_string(),
            model: self.model.clone(),
            active_sessions: self.store.len(),
            memory_limit: self.manager.max_history(),
            timestamp: Utc::now(),
        }
    }

    /// Sweeps idle sessions and reports the counts
    pub fn cleanup(&self) -> CleanupResponse {
        let removed = self.sweep();
        CleanupResponse {
            message: "Cleanup completed".to_string(),
            removed,
            active: self.store.len(),
        }
    }

    /// Returns the full profile
    pub fn profile(&self) -> ProfileResponse {
        ProfileResponse {
            profile: (*self.profile).clone(),
            success: true,
        }
    }

    /// Retained turns of an existing session
    ///
    /// # Errors
    ///
    /// Returns a not-found error for an unknown session id
    pub async fn history(&self, session_id: &str) -> Result<HistoryResponse> {
        let session = self.store.get(session_id).await?;
        Ok(HistoryResponse {
            session_id: session.id,
            message_count: session.conversation.message_count(),
            messages: session.conversation,
            last_activity: session.last_activity,
        })
    }

    /// Landing document for the root route
    pub fn root(&self) -> ServiceInfo {
        let contact = &self.profile.contact;
        let endpoints = [
            ("chat", "/chat"),
            ("quick_info", "/quick-info"),
            ("reset", "/reset"),
            ("health", "/health"),
            ("sessions", "/sessions"),
            ("cleanup", "/sessions/cleanup"),
            ("profile", "/profile"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        ServiceInfo {
            message: format!("Welcome to the {} profile assistant", contact.name),
            version: env!("CARGO_PKG_VERSION").to_string(),
            status: "running".to_string(),
            profile: ProfileCard {
                name: contact.name.clone(),
                role: contact.role.clone(),
                portfolio: contact.portfolio.clone(),
            },
            features: vec![
                format!("{}-message conversation memory", self.manager.max_history()),
                format!("Responses from {}", self.model),
                "Keyword-matched profile context".to_string(),
                "Quick info lookups without the model".to_string(),
            ],
            endpoints,
        }
    }
}
