//! Profile assistant - conversational assistant for a professional profile
//!
#![doc = "Main entry point for the profile assistant application."]

use anyhow::Result;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use profile_assistant::cli::{Cli, Commands};
use profile_assistant::commands;
use profile_assistant::config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    // Pick up GOOGLE_API_KEY and friends from a local .env before anything reads the environment
    let dotenv = dotenvy::dotenv();

    // Parse command line arguments
    let cli = Cli::parse_args();

    init_tracing(cli.verbose, cli.json_logs);
    if let Ok(path) = dotenv {
        tracing::debug!("Loaded environment from {}", path.display());
    }

    // Load configuration
    let config_path = cli.config.as_deref().unwrap_or("config/config.yaml");
    let config = Config::load(config_path, &cli)?;

    // The check command reports validation problems instead of aborting on them
    if let Commands::Check = cli.command {
        return commands::check::run_check(&config);
    }

    config.validate()?;

    match cli.command {
        Commands::Serve { host, port } => {
            tracing::info!("Starting HTTP server");
            commands::serve::run_serve(config, host, port).await
        }
        Commands::Chat { session } => {
            tracing::info!("Starting interactive chat mode");
            commands::chat::run_chat(config, session).await
        }
        Commands::Info { category } => commands::info::run_info(&category),
        Commands::Check => commands::check::run_check(&config),
    }
}

/// Initialize tracing subscriber with environment filter
fn init_tracing(verbose: bool, json: bool) {
    let default_directive = if verbose {
        "profile_assistant=debug"
    } else {
        "profile_assistant=info"
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    let registry = tracing_subscriber::registry().with(env_filter);
    if json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}
