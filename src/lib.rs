//! Profile assistant - conversational assistant library
//!
//! This library answers questions about a single professional profile by
//! pairing a bounded per-session conversation with a hosted language model.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//!
//! - `profile`: Built-in profile record and exact-name category lookups
//! - `context`: Keyword resolver that attaches profile data to prompts
//! - `agent`: Bounded conversation history and the turn protocol
//! - `session`: In-memory session store with idle eviction
//! - `providers`: Model gateway abstraction (Gemini, Ollama)
//! - `service`: Operations exposed to the HTTP server and the CLI
//! - `server`: axum routes over the service
//! - `config`: Configuration management and validation
//! - `error`: Error types and result aliases
//! - `cli`: Command-line interface definition
//!
//! # Example
//!
//! ```no_run
//! use profile_assistant::{AssistantService, Config};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::default();
//!     config.validate()?;
//!
//!     let service = AssistantService::new(&config)?;
//!     let reply = service.chat("What projects has he built?", None).await?;
//!     println!("{}", reply.response);
//!     Ok(())
//! }
//! ```

pub mod agent;
pub mod cli;
pub mod commands;
pub mod config;
pub mod context;
pub mod error;
pub mod profile;
pub mod prompts;
pub mod providers;
pub mod server;
pub mod service;
pub mod session;

// Re-export commonly used types
pub use agent::{Conversation, ConversationManager};
pub use config::Config;
pub use error::{AssistantError, Result};
pub use profile::{Category, Profile};
pub use service::AssistantService;
pub use session::{Session, SessionStore};
