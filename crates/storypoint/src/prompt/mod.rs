//! Estimation prompt construction.

mod builder;
mod template;

pub use builder::{MAX_EXAMPLES, Prompt, PromptBuilder};
pub use template::{
    DEFAULT_INSTRUCTIONS, EXAMPLES_MARKER, NEW_STORY_MARKER, OUTPUT_FIELDS, PromptConfig,
};
