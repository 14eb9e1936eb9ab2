//! Sessions and the in-memory session store
//!
//! A session pairs a caller-supplied id with its bounded conversation and the
//! time it was last used. Sessions live only in process memory.

pub mod store;

pub use store::SessionStore;

use crate::agent::Conversation;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Conversation state for one caller identity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    /// Caller-supplied identifier
    pub id: String,
    /// Bounded history, system turn first
    pub conversation: Conversation,
    /// Last time the session was fetched or saved
    pub last_activity: DateTime<Utc>,
}

impl Session {
    /// Creates an empty session stamped with the current time
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            conversation: Conversation::new(),
            last_activity: Utc::now(),
        }
    }

    /// Refreshes `last_activity`
    pub fn touch(&mut self) {
        self.last_activity = Utc::now();
    }

    /// True when idle for strictly longer than `timeout` as of `now`
    pub fn is_expired(&self, timeout: Duration, now: DateTime<Utc>) -> bool {
        now - self.last_activity > timeout
    }

    /// Listing row for this session
    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            session_id: self.id.clone(),
            message_count: self.conversation.message_count(),
            last_activity: self.last_activity,
        }
    }
}

/// One row of a session listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub session_id: String,
    /// Non-system turns currently retained
    pub message_count: usize,
    pub last_activity: DateTime<Utc>,
}
