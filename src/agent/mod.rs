//! Conversation state and the turn protocol
//!
//! [`Conversation`] is the bounded history of one session and
//! [`ConversationManager`] runs a single user turn against the model
//! provider.

pub mod conversation;
pub mod manager;

pub use conversation::Conversation;
pub use manager::{ConversationManager, TurnOutcome, CONTEXT_SEPARATOR};
