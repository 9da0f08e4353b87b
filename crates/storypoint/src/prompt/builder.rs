//! Composes the instruction header, historical examples and the new story.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::template::{EXAMPLES_MARKER, NEW_STORY_MARKER, PromptConfig};
use crate::diagnostics::{Diagnostic, DiagnosticSink};
use crate::input::DataTable;
use crate::sanitize::Sanitizer;
use crate::schema::{HistoricalStory, NewStoryRequest, StoryTable};
use crate::validation::clean;

/// Maximum historical examples placed in a prompt.
pub const MAX_EXAMPLES: usize = 5;

/// A finished prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Prompt {
    pub text: String,
    pub examples_used: usize,
}

impl Prompt {
    pub fn as_str(&self) -> &str {
        &self.text
    }
}

impl fmt::Display for Prompt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Builds estimation prompts.
#[derive(Debug, Clone, Default)]
pub struct PromptBuilder {
    config: PromptConfig,
    sanitizer: Sanitizer,
}

impl PromptBuilder {
    pub fn new(config: PromptConfig, sanitizer: Sanitizer) -> Self {
        Self { config, sanitizer }
    }

    /// Build from a raw or already cleaned table.
    ///
    /// The table is cleaned again; if it fails validation the prompt is
    /// built without examples.
    pub fn build(
        &self,
        story: &NewStoryRequest,
        history: &DataTable,
        sink: &mut dyn DiagnosticSink,
    ) -> Prompt {
        match clean(history, sink) {
            Ok(table) => self.build_from_stories(story, &table, sink),
            Err(e) => {
                sink.record(Diagnostic::ExamplesUnavailable {
                    reason: e.to_string(),
                });
                self.render(story, &[], sink)
            }
        }
    }

    /// Build from a validated table.
    pub fn build_from_stories(
        &self,
        story: &NewStoryRequest,
        history: &StoryTable,
        sink: &mut dyn DiagnosticSink,
    ) -> Prompt {
        if history.is_empty() {
            sink.record(Diagnostic::ExamplesUnavailable {
                reason: "historical table is empty".to_string(),
            });
        }
        self.render(story, history.first(MAX_EXAMPLES), sink)
    }

    fn render(
        &self,
        story: &NewStoryRequest,
        examples: &[HistoricalStory],
        sink: &mut dyn DiagnosticSink,
    ) -> Prompt {
        let summary = self.sanitizer.sanitize(Some(&story.summary), sink);
        let description = self.sanitizer.sanitize(Some(&story.description), sink);
        let acceptance = self.sanitizer.sanitize(Some(&story.acceptance_criteria), sink);

        let mut text = self.config.header();

        if !examples.is_empty() {
            text.push_str("\n\n");
            text.push_str(EXAMPLES_MARKER);
            text.push('\n');
            for example in examples {
                text.push_str(&self.example_block(example, sink));
            }
        }

        text.push_str(&format!(
            "\n\n{}\n**Summary:** {}\n**Description:** {}\n**Acceptance Criteria:** {}\n",
            NEW_STORY_MARKER, summary, description, acceptance
        ));

        Prompt {
            text,
            examples_used: examples.len(),
        }
    }

    fn example_block(&self, example: &HistoricalStory, sink: &mut dyn DiagnosticSink) -> String {
        let actual_time = example
            .actual_time
            .as_deref()
            .map(|t| self.sanitizer.sanitize(Some(t), sink))
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| "N/A".to_string());

        format!(
            "\n- **Summary:** {}\n  **Description:** {}\n  **Acceptance Criteria:** {}\n  \
             **Actual Story Points:** {}\n  **Actual Time:** {}\n",
            self.sanitizer.sanitize(Some(&example.summary), sink),
            self.sanitizer.sanitize(Some(&example.description), sink),
            self.sanitizer.sanitize(Some(&example.acceptance_criteria), sink),
            example.story_points,
            actual_time
        )
    }
}
