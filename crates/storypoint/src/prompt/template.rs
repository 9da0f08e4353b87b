//! Fixed text of the estimation prompt.

use std::fs;
use std::path::Path;

use crate::error::{Result, StorypointError};
use crate::validation::reference_sequence_label;

/// Instruction paragraph used when no custom one is configured.
pub const DEFAULT_INSTRUCTIONS: &str =
    r#"You are an AI Story Point Estimator for an agile software team.

Estimate the effort of the new story by comparing it with the historical
examples provided. Weigh complexity, uncertainty and effort, and pick the
closest value on the story point scale."#;

/// Fields the model is asked to return.
pub const OUTPUT_FIELDS: [&str; 4] = [
    "Estimated Story Points: one of the allowed values",
    "Rationale: why this estimate fits the story",
    "Confidence Level: Low, Medium or High",
    "Similar Stories: the historical examples that informed the estimate",
];

/// Heading of the historical examples section.
pub const EXAMPLES_MARKER: &str = "### Historical Examples:";

/// Heading of the story being estimated.
pub const NEW_STORY_MARKER: &str = "### NEW STORY TO ESTIMATE:";

/// Prompt template configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptConfig {
    /// Free-text instructions at the top of the prompt.
    pub instructions: String,
}

impl Default for PromptConfig {
    fn default() -> Self {
        Self {
            instructions: DEFAULT_INSTRUCTIONS.to_string(),
        }
    }
}

impl PromptConfig {
    /// Use custom instructions.
    pub fn with_instructions(instructions: impl Into<String>) -> Self {
        Self {
            instructions: instructions.into(),
        }
    }

    /// Load custom instructions from a file.
    ///
    /// Line endings are normalized and runs of spaces or tabs within a line
    /// become one space.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let instructions = fs::read_to_string(path).map_err(|e| StorypointError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Ok(Self::with_instructions(normalize_instructions(&instructions)))
    }

    /// Render the header: instructions, the allowed values and the
    /// expected response fields.
    pub fn header(&self) -> String {
        let fields = OUTPUT_FIELDS
            .iter()
            .map(|f| format!("- {}", f))
            .collect::<Vec<_>>()
            .join("\n");

        format!(
            "{}\n\nAllowed story point values (Fibonacci): {}\n\nRespond with:\n{}",
            self.instructions.trim(),
            reference_sequence_label(),
            fields
        )
    }
}

/// Unix line endings, single spaces within a line, no control characters.
fn normalize_instructions(text: &str) -> String {
    text.lines()
        .map(|line| {
            line.split_whitespace()
                .map(|word| word.chars().filter(|c| !c.is_control()).collect::<String>())
                .filter(|word| !word.is_empty())
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}
