//! Application state for the web server.

use std::sync::Arc;

use storypoint::{EstimatorConfig, LlmProvider};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Pipeline configuration shared by every request.
    pub config: Arc<EstimatorConfig>,
    /// Key used when a request leaves the API key blank.
    pub api_key: Option<String>,
    /// Provider override. When set, requests skip building a Gemini client.
    pub llm_provider: Option<Arc<dyn LlmProvider>>,
}

impl AppState {
    /// Create new application state.
    pub fn new(config: EstimatorConfig, api_key: Option<String>) -> Self {
        Self {
            config: Arc::new(config),
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            llm_provider: None,
        }
    }

    /// Route every estimate through `provider`.
    pub fn with_llm(mut self, provider: Arc<dyn LlmProvider>) -> Self {
        self.llm_provider = Some(provider);
        self
    }

    /// The request's key, falling back to the server's.
    pub fn resolve_api_key(&self, requested: Option<&str>) -> Option<String> {
        requested
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .map(str::to_string)
            .or_else(|| self.api_key.clone())
    }
}
