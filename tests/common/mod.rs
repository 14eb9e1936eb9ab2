//! Shared helpers for integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use profile_assistant::config::Config;
use profile_assistant::error::{AssistantError, Result};
use profile_assistant::providers::{Provider, Turn};
use profile_assistant::service::AssistantService;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// One call seen by a [`ScriptedProvider`]
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub system_instruction: String,
    pub turns: Vec<Turn>,
}

/// Provider that replays scripted outcomes and records its inputs
///
/// `Err(message)` entries become gateway errors. Once the script runs out
/// every call replies with `"ok"`.
#[derive(Default)]
pub struct ScriptedProvider {
    script: Mutex<VecDeque<std::result::Result<String, String>>>,
    calls: Mutex<Vec<RecordedCall>>,
    delay: Option<Duration>,
}

impl ScriptedProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_script(
        script: impl IntoIterator<Item = std::result::Result<&'static str, &'static str>>,
    ) -> Self {
        let script = script
            .into_iter()
            .map(|step| step.map(str::to_string).map_err(str::to_string))
            .collect();
        Self {
            script: Mutex::new(script),
            ..Self::default()
        }
    }

    /// Sleeps before every reply
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Provider for ScriptedProvider {
    fn name(&self) -> &str {
        "scripted"
    }

    fn model(&self) -> String {
        "scripted-1".to_string()
    }

    async fn generate(&self, system_instruction: &str, turns: &[Turn]) -> Result<String> {
        self.calls.lock().unwrap().push(RecordedCall {
            system_instruction: system_instruction.to_string(),
            turns: turns.to_vec(),
        });

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        let step = self.script.lock().unwrap().pop_front();
        match step {
            Some(Ok(reply)) => Ok(reply),
            Some(Err(message)) => Err(AssistantError::Gateway(message)),
            None => Ok("ok".to_string()),
        }
    }
}

/// Default configuration with the given history window
pub fn test_config(max_history: usize) -> Config {
    let mut config = Config::default();
    config.conversation.max_history = max_history;
    config
}

/// Service wired to a shared provider
pub fn service_with(provider: Arc<dyn Provider>, max_history: usize) -> AssistantService {
    AssistantService::with_provider(&test_config(max_history), provider)
}
