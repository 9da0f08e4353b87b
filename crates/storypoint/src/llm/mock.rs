//! Mock LLM provider for testing.

use std::sync::Mutex;

use crate::error::{Result, StorypointError};

use super::provider::{LlmConfig, LlmProvider};

/// Canned answer returned when no other response is configured.
pub const MOCK_RESPONSE: &str = "Estimated Story Points: 5\n\
Rationale: Comparable in scope to the closest historical examples.\n\
Confidence Level: Medium\n\
Similar Stories: see historical examples";

/// Mock provider that returns a fixed response and records every prompt.
pub struct MockProvider {
    config: LlmConfig,
    response: std::result::Result<String, String>,
    prompts: Mutex<Vec<String>>,
}

impl MockProvider {
    /// Create a mock that answers with [`MOCK_RESPONSE`].
    pub fn new() -> Self {
        Self::with_response(MOCK_RESPONSE)
    }

    /// Create a mock that answers with `response`.
    pub fn with_response(response: impl Into<String>) -> Self {
        Self {
            config: LlmConfig::default(),
            response: Ok(response.into()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Create a mock whose every call fails with a transport error.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            config: LlmConfig::default(),
            response: Err(message.into()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Create with custom configuration.
    pub fn with_config(mut self, config: LlmConfig) -> Self {
        self.config = config;
        self
    }

    /// Prompts received so far, oldest first.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts
            .lock()
            .map(|p| p.clone())
            .unwrap_or_default()
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl LlmProvider for MockProvider {
    fn generate(&self, prompt: &str) -> Result<String> {
        if let Ok(mut prompts) = self.prompts.lock() {
            prompts.push(prompt.to_string());
        }
        self.response
            .clone()
            .map_err(StorypointError::Transport)
    }

    fn config(&self) -> &LlmConfig {
        &self.config
    }

    fn name(&self) -> &str {
        "mock"
    }
}
