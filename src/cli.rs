//! Command-line interface definition
//!
//! This module defines the CLI structure using clap's derive API,
//! providing commands to serve the HTTP API, chat interactively,
//! run quick lookups, and check the configuration.

use clap::{Parser, Subcommand};

/// Profile assistant - answer questions about a professional profile
#[derive(Parser, Debug, Clone)]
#[command(name = "profile-assistant")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, env = "PROFILE_ASSISTANT_CONFIG")]
    pub config: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub json_logs: bool,

    /// Override the provider from config (gemini, ollama)
    #[arg(short, long, global = true)]
    pub provider: Option<String>,

    /// Override the number of non-system turns kept per session
    #[arg(long, global = true)]
    pub max_history: Option<usize>,

    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Serve the HTTP API
    Serve {
        /// Bind address (overrides config)
        #[arg(long)]
        host: Option<String>,

        /// Bind port (overrides config)
        #[arg(long)]
        port: Option<u16>,
    },

    /// Start an interactive chat session in the terminal
    Chat {
        /// Session identifier to chat under
        #[arg(short, long)]
        session: Option<String>,
    },

    /// Print one profile category without calling the model
    Info {
        /// Category name (contact, projects, skills, education, experience, achievements, summary)
        category: String,
    },

    /// Verify configuration, credentials, and profile data
    Check,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
