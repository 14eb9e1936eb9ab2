/*!
Command handlers for the CLI

This module provides the handlers invoked by the CLI entrypoint:

- `serve` - Run the HTTP API
- `chat`  - Interactive chat in the terminal
- `info`  - Print one profile category as JSON
- `check` - Verify configuration, credentials, and profile data
*/

use crate::config::Config;
use crate::service::AssistantService;
use std::sync::Arc;

// HTTP server command handler
pub mod serve {
    //! Starts the HTTP API with the configured provider.

    use super::*;

    /// Serve the API until interrupted
    ///
    /// # Arguments
    ///
    /// * `config` - Global configuration (consumed)
    /// * `host` - Optional bind address override
    /// * `port` - Optional bind port override
    pub async fn run_serve(
        mut config: Config,
        host: Option<String>,
        port: Option<u16>,
    ) -> anyhow::Result<()> {
        if let Some(host) = host {
            config.server.host = host;
        }
        if let Some(port) = port {
            config.server.port = port;
        }

        let service = Arc::new(AssistantService::new(&config)?);
        crate::server::serve(service, &config).await
    }
}

// Interactive chat command handler
pub mod chat {
    //! Interactive chat mode handler.
    //!
    //! Runs a readline loop against an in-process session. Lines starting
    //! with `/` are local commands and never reach the model.

    use super::*;
    use colored::Colorize;
    use rustyline::error::ReadlineError;
    use rustyline::DefaultEditor;

    /// Local command typed at the chat prompt
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum ChatCommand {
        /// Forget the current conversation
        Reset,
        /// Print one profile category
        Info(String),
        /// Show available commands
        Help,
        /// Leave the chat
        Quit,
        /// Anything else starting with `/`
        Unknown(String),
        /// A message for the assistant
        Message(String),
    }

    /// Parses one line of chat input
    ///
    /// # Examples
    ///
    /// ```
    /// use profile_assistant::commands::chat::{parse_chat_command, ChatCommand};
    ///
    /// assert_eq!(parse_chat_command("/info skills"), ChatCommand::Info("skills".to_string()));
    /// assert_eq!(parse_chat_command("exit"), ChatCommand::Quit);
    /// ```
    pub fn parse_chat_command(line: &str) -> ChatCommand {
        let trimmed = line.trim();
        let mut parts = trimmed.splitn(2, char::is_whitespace);
        let head = parts.next().unwrap_or_default();
        let rest = parts.next().unwrap_or_default().trim();

        match head {
            "/reset" => ChatCommand::Reset,
            "/info" => ChatCommand::Info(rest.to_string()),
            "/help" => ChatCommand::Help,
            "/quit" | "/exit" | "exit" | "quit" => ChatCommand::Quit,
            cmd if cmd.starts_with('/') => ChatCommand::Unknown(cmd.to_string()),
            _ => ChatCommand::Message(trimmed.to_string()),
        }
    }

    fn print_welcome(service: &AssistantService, session_id: &str) {
        let contact = &service.profile_data().contact;
        println!("\n{}", format!("Chatting about {}", contact.name).bold());
        println!("{} · session {}", contact.role, session_id.cyan());
        println!("Type '/help' for commands, '/quit' to leave\n");
    }

    fn print_help() {
        println!("/reset          Forget this conversation");
        println!("/info <type>    Show profile data (contact, projects, skills, education, experience, achievements, summary)");
        println!("/help           Show this help");
        println!("/quit           Leave the chat\n");
    }

    /// Start interactive chat mode
    ///
    /// # Arguments
    ///
    /// * `config` - Global configuration (consumed)
    /// * `session` - Optional session id; the configured default otherwise
    pub async fn run_chat(config: Config, session: Option<String>) -> anyhow::Result<()> {
        let service = AssistantService::new(&config)?;
        let session_id = session.unwrap_or_else(|| service.default_session_id().to_string());

        let mut rl = DefaultEditor::new()?;
        print_welcome(&service, &session_id);

        loop {
            match rl.readline(&format!("{} ", "you>".green().bold())) {
                Ok(line) => {
                    if line.trim().is_empty() {
                        continue;
                    }
                    rl.add_history_entry(line.trim())?;

                    match parse_chat_command(&line) {
                        ChatCommand::Quit => break,
                        ChatCommand::Help => print_help(),
                        ChatCommand::Reset => {
                            let ack = service.reset(Some(&session_id));
                            println!("{}\n", ack.message.yellow());
                        }
                        ChatCommand::Info(info_type) => match service.quick_info(&info_type) {
                            Ok(info) => {
                                println!("{}\n", serde_json::to_string_pretty(&info.data)?)
                            }
                            Err(e) => eprintln!("{}\n", e.public_message().red()),
                        },
                        ChatCommand::Unknown(cmd) => {
                            eprintln!("{}\n", format!("Unknown command: {}", cmd).red());
                        }
                        ChatCommand::Message(message) => {
                            match service.chat(&message, Some(&session_id)).await {
                                Ok(reply) => println!("\n{}\n", reply.response),
                                Err(e) => {
                                    eprintln!("{}\n", format!("Error: {}", e).red());
                                }
                            }
                        }
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    println!("CTRL-C");
                    break;
                }
                Err(ReadlineError::Eof) => {
                    println!("CTRL-D");
                    break;
                }
                Err(err) => {
                    eprintln!("Error: {:?}", err);
                    break;
                }
            }
        }

        println!("Goodbye!");
        Ok(())
    }

}

// Quick lookup command handler
pub mod info {
    //! Prints one profile category without calling the model.

    use crate::profile::{Category, Profile};

    /// Renders a category as pretty JSON
    ///
    /// # Errors
    ///
    /// Returns an error naming the accepted categories for an unknown name
    pub fn render_info(category: &str) -> anyhow::Result<String> {
        let category: Category = category.parse()?;
        let data = Profile::builtin().get(category);
        Ok(serde_json::to_string_pretty(&data)?)
    }

    /// Print a category to stdout
    pub fn run_info(category: &str) -> anyhow::Result<()> {
        println!("{}", render_info(category)?);
        Ok(())
    }

}

// Configuration check command handler
pub mod check {
    //! Verifies configuration, credentials, and the built-in profile.

    use super::*;
    use crate::profile::{Category, Profile};
    use crate::providers::create_provider;
    use colored::Colorize;

    /// Outcome of one check
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum CheckStatus {
        Pass,
        Warn,
        Fail,
    }

    /// One line of the check report
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct CheckItem {
        pub label: String,
        pub status: CheckStatus,
        pub detail: String,
    }

    impl CheckItem {
        fn new(label: &str, status: CheckStatus, detail: impl Into<String>) -> Self {
            Self {
                label: label.to_string(),
                status,
                detail: detail.into(),
            }
        }
    }

    /// Runs every check against a loaded configuration
    pub fn run_checks(config: &Config) -> Vec<CheckItem> {
        let mut items = Vec::new();

        match config.validate() {
            Ok(()) => items.push(CheckItem::new(
                "configuration",
                CheckStatus::Pass,
                format!(
                    "provider {}, model {}",
                    config.provider.provider_type,
                    config.active_model()
                ),
            )),
            Err(e) => items.push(CheckItem::new(
                "configuration",
                CheckStatus::Fail,
                e.to_string(),
            )),
        }

        match create_provider(&config.provider) {
            Ok(provider) if provider.is_configured() => items.push(CheckItem::new(
                "credentials",
                CheckStatus::Pass,
                format!("{} is ready", provider.name()),
            )),
            Ok(provider) => items.push(CheckItem::new(
                "credentials",
                CheckStatus::Fail,
                format!(
                    "{} has no API key; set {}",
                    provider.name(),
                    crate::config::API_KEY_ENV_VARS.join(" or ")
                ),
            )),
            Err(e) => items.push(CheckItem::new(
                "credentials",
                CheckStatus::Fail,
                e.to_string(),
            )),
        }

        let profile = Profile::builtin();
        let empty: Vec<&str> = Category::ALL
            .iter()
            .filter(|c| is_empty_value(&profile.get(**c)))
            .map(|c| c.as_str())
            .collect();
        if empty.is_empty() {
            items.push(CheckItem::new(
                "profile",
                CheckStatus::Pass,
                format!(
                    "{}: {} projects, {} skill groups",
                    profile.contact.name,
                    profile.projects.len(),
                    profile.technical_skills.len()
                ),
            ));
        } else {
            items.push(CheckItem::new(
                "profile",
                CheckStatus::Warn,
                format!("empty categories: {}", empty.join(", ")),
            ));
        }

        items.push(CheckItem::new(
            "sessions",
            CheckStatus::Pass,
            format!(
                "{} turns kept, idle timeout {} min",
                config.conversation.max_history, config.session.timeout_minutes
            ),
        ));

        items
    }

    fn is_empty_value(value: &serde_json::Value) -> bool {
        match value {
            serde_json::Value::Null => true,
            serde_json::Value::String(s) => s.is_empty(),
            serde_json::Value::Array(a) => a.is_empty(),
            serde_json::Value::Object(o) => o.is_empty(),
            _ => false,
        }
    }

    /// Print the report; fails when any check failed
    pub fn run_check(config: &Config) -> anyhow::Result<()> {
        let items = run_checks(config);
        for item in &items {
            let mark = match item.status {
                CheckStatus::Pass => "✓".green(),
                CheckStatus::Warn => "!".yellow(),
                CheckStatus::Fail => "✗".red(),
            };
            println!("{} {:<14} {}", mark, item.label.bold(), item.detail);
        }

        let failures = items
            .iter()
            .filter(|i| i.status == CheckStatus::Fail)
            .count();
        if failures > 0 {
            anyhow::bail!("{} check(s) failed", failures);
        }
        println!("\n{}", "All checks passed".green());
        Ok(())
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        fn status_of(items: &[CheckItem], label: &str) -> CheckStatus {
            items.iter().find(|i| i.label == label).unwrap().status
        }

        #[test]
        fn test_missing_key_fails_credentials() {
            let mut config = Config::default();
            config.provider.gemini.api_key = None;
            let items = run_checks(&config);
            assert_eq!(status_of(&items, "configuration"), CheckStatus::Pass);
            assert_eq!(status_of(&items, "credentials"), CheckStatus::Fail);
            assert_eq!(status_of(&items, "profile"), CheckStatus::Pass);
        }

        #[test]
        fn test_configured_key_passes() {
            let mut config = Config::default();
            config.provider.gemini.api_key = Some("test-key".to_string());
            let items = run_checks(&config);
            assert!(items.iter().all(|i| i.status == CheckStatus::Pass));
        }

        #[test]
        fn test_invalid_config_fails() {
            let mut config = Config::default();
            config.conversation.max_history = 0;
            let items = run_checks(&config);
            assert_eq!(status_of(&items, "configuration"), CheckStatus::Fail);
        }
    }
}
