//! Storypoint: LLM-assisted story point estimation for agile teams.
//!
//! Historical stories are uploaded as CSV, checked and cleaned, and the
//! first few are placed as examples in a prompt together with the story to
//! estimate. The prompt goes to a hosted model and its answer is returned
//! as-is.
//!
//! # Pipeline
//!
//! - **Validation**: required columns, row cleaning, story points snapped
//!   to the Fibonacci scale `1, 2, 3, 5, 8, 13, 21`
//! - **Sanitization**: whitespace, override phrases, length bound
//! - **Prompt**: fixed header, up to five examples, the new story
//!
//! # Example
//!
//! ```no_run
//! use storypoint::{Estimator, GeminiProvider, NewStoryRequest, NullSink};
//!
//! let estimator = Estimator::new().with_llm(GeminiProvider::from_env().unwrap());
//! let history = estimator
//!     .load_history("data/historical_stories.csv", &mut NullSink)
//!     .unwrap();
//!
//! let story = NewStoryRequest::new(
//!     "Add Login Page",
//!     "Email and password form",
//!     "User can log in",
//! );
//! let estimation = estimator.estimate(&story, &history, &mut NullSink).unwrap();
//! println!("{}", estimation.response);
//! ```

pub mod diagnostics;
pub mod error;
pub mod input;
pub mod llm;
pub mod prompt;
pub mod sanitize;
pub mod schema;
pub mod validation;

mod estimator;

pub use crate::estimator::{Estimation, Estimator, EstimatorConfig};
pub use diagnostics::{Diagnostic, DiagnosticSink, Diagnostics, NullSink};
pub use error::{Result, StorypointError};
pub use input::{DataTable, Parser, ParserConfig, SourceMetadata};
pub use llm::{GeminiModel, GeminiProvider, LlmConfig, LlmProvider, MockProvider};
pub use prompt::{Prompt, PromptBuilder, PromptConfig};
pub use sanitize::{Sanitizer, SanitizerConfig, sanitize_text};
pub use schema::{HistoricalStory, NewStoryRequest, StoryPoints, StoryTable, TableSummary};
pub use validation::{REFERENCE_SEQUENCE, SchemaError, clean, snap_to_fibonacci};
