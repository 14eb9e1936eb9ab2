//! Turn protocol for a single conversation
//!
//! The [`ConversationManager`] takes a stored history and a raw user message,
//! attaches profile context to the outgoing prompt, calls the model provider
//! under a timeout and returns the bounded history to persist. It never
//! touches the session store itself; callers persist the returned
//! conversation only when the turn succeeds.

use crate::agent::Conversation;
use crate::config::ConversationConfig;
use crate::context::ContextResolver;
use crate::error::{AssistantError, Result};
use crate::providers::{Provider, Turn};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Separator placed between the user's text and the attached profile context
pub const CONTEXT_SEPARATOR: &str = "\n\nRelevant Information:\n";

/// Result of a successful turn
#[derive(Debug, Clone, PartialEq)]
pub struct TurnOutcome {
    /// Reply text from the model
    pub reply: String,
    /// History to persist, already trimmed
    pub conversation: Conversation,
}

/// Runs turns against a model provider
pub struct ConversationManager {
    provider: Arc<dyn Provider>,
    resolver: ContextResolver,
    system_prompt: String,
    max_history: usize,
    request_timeout: Duration,
}

impl ConversationManager {
    /// Creates a manager
    ///
    /// # Arguments
    ///
    /// * `provider` - Model backend used for every turn
    /// * `resolver` - Keyword resolver for prompt enrichment
    /// * `system_prompt` - Instruction seeded as the first turn
    /// * `config` - Window size and model call timeout
    pub fn new(
        provider: Arc<dyn Provider>,
        resolver: ContextResolver,
        system_prompt: impl Into<String>,
        config: &ConversationConfig,
    ) -> Self {
        Self {
            provider,
            resolver,
            system_prompt: system_prompt.into(),
            max_history: config.max_history,
            request_timeout: Duration::from_secs(config.request_timeout_seconds),
        }
    }

    /// Overrides the model call timeout
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn provider(&self) -> &Arc<dyn Provider> {
        &self.provider
    }

    pub fn system_prompt(&self) -> &str {
        &self.system_prompt
    }

    /// Non-system turns retained per conversation
    pub fn max_history(&self) -> usize {
        self.max_history
    }

    /// Attaches resolved profile context to the user's text
    ///
    /// Returns the text unchanged when no keyword category matches.
    pub fn enrich(&self, user_text: &str) -> String {
        let context = self.resolver.resolve(user_text);
        if context.is_empty() {
            user_text.to_string()
        } else {
            format!("{}{}{}", user_text, CONTEXT_SEPARATOR, context)
        }
    }

    /// Builds the bounded prompt sent to the provider
    ///
    /// The stored history is healed and trimmed, the enriched user turn is
    /// appended, and the result is trimmed again so the provider never sees
    /// more than `1 + max_history` turns.
    pub fn build_prompt(&self, history: &Conversation, user_text: &str) -> Conversation {
        let mut prompt = history.clone();
        prompt.ensure_system(&self.system_prompt);
        prompt.trim(self.max_history);
        prompt.push(Turn::user(self.enrich(user_text)));
        prompt.trim(self.max_history);
        prompt
    }

    /// Runs one turn
    ///
    /// The returned conversation holds the raw user text, not the enriched
    /// prompt. On error nothing is returned to persist, so the caller's
    /// stored history stays as it was.
    ///
    /// # Errors
    ///
    /// Returns [`AssistantError::InvalidRequest`] for a blank message,
    /// [`AssistantError::Gateway`] when the provider fails or exceeds the
    /// request timeout, and [`AssistantError::Configuration`] when the
    /// provider lacks credentials.
    pub async fn turn(&self, history: &Conversation, user_text: &str) -> Result<TurnOutcome> {
        if user_text.trim().is_empty() {
            return Err(AssistantError::InvalidRequest(
                "Message cannot be empty".to_string(),
            ));
        }

        let mut conversation = history.clone();
        if conversation.ensure_system(&self.system_prompt) && !history.is_empty() {
            warn!("Stored conversation lacked a system turn; restored it");
        }
        conversation.trim(self.max_history);

        let prompt = self.build_prompt(&conversation, user_text);
        let (system_instruction, turns) = prompt.split_system();
        debug!(
            provider = self.provider.name(),
            prompt_turns = prompt.len(),
            "Sending turn to model"
        );

        let reply = tokio::time::timeout(
            self.request_timeout,
            self.provider.generate(system_instruction, turns),
        )
        .await
        .map_err(|_| {
            AssistantError::Gateway(format!(
                "Model call timed out after {}s",
                self.request_timeout.as_secs_f32()
            ))
        })??;

        conversation.push(Turn::user(user_text));
        conversation.push(Turn::assistant(reply.clone()));
        conversation.trim(self.max_history);

        debug!(
            reply_chars = reply.len(),
            history_len = conversation.len(),
            "Turn complete"
        );

        Ok(TurnOutcome {
            reply,
            conversation,
        })
    }
}

impl std::fmt::Debug for ConversationManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConversationManager")
            .field("provider", &self.provider.name())
            .field("max_history", &self.max_history)
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}
