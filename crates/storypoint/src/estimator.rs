//! Main Estimator struct and public API.

use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::diagnostics::DiagnosticSink;
use crate::error::{Result, StorypointError};
use crate::input::ParserConfig;
use crate::llm::{GeminiModel, LlmConfig, LlmProvider};
use crate::prompt::{Prompt, PromptBuilder, PromptConfig};
use crate::sanitize::{Sanitizer, SanitizerConfig};
use crate::schema::{NewStoryRequest, StoryTable};
use crate::validation::{self, SchemaError};

/// Configuration for an estimation pipeline.
#[derive(Debug, Clone, Default)]
pub struct EstimatorConfig {
    /// Parser configuration for uploads.
    pub parser: ParserConfig,
    /// Sanitizer configuration.
    pub sanitizer: SanitizerConfig,
    /// Prompt template configuration.
    pub prompt: PromptConfig,
    /// Model configuration.
    pub llm: LlmConfig,
}

/// Result of one estimation request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Estimation {
    /// The model's answer, unparsed.
    pub response: String,
    /// Model the request was sent to.
    pub model: GeminiModel,
    /// Provider name.
    pub provider: String,
    /// Historical examples included in the prompt.
    pub examples_used: usize,
    /// The prompt that was sent.
    pub prompt: String,
}

/// Runs the clean → prompt → model pipeline.
pub struct Estimator {
    config: EstimatorConfig,
    builder: PromptBuilder,
    llm_provider: Option<Arc<dyn LlmProvider>>,
}

impl Estimator {
    /// Create a new Estimator with default configuration.
    pub fn new() -> Self {
        Self::with_config(EstimatorConfig::default())
    }

    /// Create an Estimator with custom configuration.
    pub fn with_config(config: EstimatorConfig) -> Self {
        let builder = PromptBuilder::new(
            config.prompt.clone(),
            Sanitizer::with_config(config.sanitizer),
        );
        Self {
            config,
            builder,
            llm_provider: None,
        }
    }

    /// Attach the provider estimates are sent to.
    pub fn with_llm(mut self, provider: impl LlmProvider + 'static) -> Self {
        self.llm_provider = Some(Arc::new(provider));
        self
    }

    /// Attach a shared provider.
    pub fn with_shared_llm(mut self, provider: Arc<dyn LlmProvider>) -> Self {
        self.llm_provider = Some(provider);
        self
    }

    pub fn config(&self) -> &EstimatorConfig {
        &self.config
    }

    /// Load and clean historical data from a CSV file.
    pub fn load_history(
        &self,
        path: impl AsRef<Path>,
        sink: &mut dyn DiagnosticSink,
    ) -> std::result::Result<StoryTable, SchemaError> {
        validation::load_history(path, &self.config.parser, sink)
    }

    /// Load and clean historical data from uploaded bytes.
    pub fn load_history_bytes(
        &self,
        bytes: &[u8],
        sink: &mut dyn DiagnosticSink,
    ) -> std::result::Result<StoryTable, SchemaError> {
        validation::load_history_bytes(bytes, &self.config.parser, sink)
    }

    /// Build the prompt for `story` without calling the model.
    pub fn build_prompt(
        &self,
        story: &NewStoryRequest,
        history: &StoryTable,
        sink: &mut dyn DiagnosticSink,
    ) -> Prompt {
        self.builder.build_from_stories(story, history, sink)
    }

    /// Estimate `story` against `history` with one model call.
    pub fn estimate(
        &self,
        story: &NewStoryRequest,
        history: &StoryTable,
        sink: &mut dyn DiagnosticSink,
    ) -> Result<Estimation> {
        if story.is_missing_summary() {
            return Err(StorypointError::Config("Summary is required".to_string()));
        }

        let provider = self
            .llm_provider
            .as_ref()
            .ok_or_else(|| StorypointError::Config("No LLM provider configured".to_string()))?;

        let prompt = self.build_prompt(story, history, sink);
        let response = provider.generate(prompt.as_str())?;

        Ok(Estimation {
            response,
            model: provider.config().model,
            provider: provider.name().to_string(),
            examples_used: prompt.examples_used,
            prompt: prompt.text,
        })
    }
}

impl Default for Estimator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::{Diagnostics, NullSink};
    use crate::llm::MockProvider;

    const HISTORY: &[u8] = b"Summary,Description,AcceptanceCriteria,StoryPoints\n\
Login Page,Create login,User can login,5\n";

    #[test]
    fn test_estimate_with_mock() {
        let mock = Arc::new(MockProvider::with_response(
            "Estimated Story Points: 5\nRationale: Test rationale",
        ));
        let estimator = Estimator::new().with_shared_llm(mock.clone());

        let history = estimator.load_history_bytes(HISTORY, &mut NullSink).unwrap();
        let story = NewStoryRequest::new("Logout Feature", "Add logout button", "User can logout");
        let estimation = estimator.estimate(&story, &history, &mut NullSink).unwrap();

        assert!(estimation.response.contains("Estimated Story Points"));
        assert_eq!(estimation.examples_used, 1);
        assert_eq!(estimation.provider, "mock");
        assert_eq!(mock.prompts().len(), 1);
        assert!(mock.prompts()[0].contains("Logout Feature"));
    }

    #[test]
    fn test_estimate_requires_summary() {
        let mock = Arc::new(MockProvider::new());
        let estimator = Estimator::new().with_shared_llm(mock.clone());
        let story = NewStoryRequest::new("", "desc", "ac");

        let err = estimator
            .estimate(&story, &StoryTable::default(), &mut NullSink)
            .unwrap_err();
        assert!(matches!(err, StorypointError::Config(_)));
        assert!(mock.prompts().is_empty());
    }

    #[test]
    fn test_estimate_requires_provider() {
        let story = NewStoryRequest::new("A", "B", "C");
        let err = Estimator::new()
            .estimate(&story, &StoryTable::default(), &mut NullSink)
            .unwrap_err();
        assert!(matches!(err, StorypointError::Config(_)));
    }

    #[test]
    fn test_provider_failure_is_terminal() {
        let estimator = Estimator::new().with_llm(MockProvider::failing("auth failed"));
        let story = NewStoryRequest::new("A", "B", "C");
        let err = estimator
            .estimate(&story, &StoryTable::default(), &mut NullSink)
            .unwrap_err();
        assert!(err.to_string().contains("auth failed"));
    }

    #[test]
    fn test_sanitizer_config_is_applied() {
        let config = EstimatorConfig {
            sanitizer: SanitizerConfig { max_len: 10 },
            ..EstimatorConfig::default()
        };
        let estimator = Estimator::with_config(config);
        let story = NewStoryRequest::new("x".repeat(50), "d", "ac");
        let mut sink = Diagnostics::new();

        let prompt = estimator.build_prompt(&story, &StoryTable::default(), &mut sink);
        assert!(prompt.text.contains(&format!("**Summary:** {}...", "x".repeat(10))));
        assert!(!sink.is_empty());
    }
}
