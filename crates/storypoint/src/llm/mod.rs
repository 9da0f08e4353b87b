//! LLM provider integration for story point estimation.
//!
//! The prompt is sent as-is and the answer comes back as opaque text; no
//! structure is assumed in the response.
//!
//! # Supported Providers
//!
//! - **Gemini** - Google Gemini models via API (requires `GEMINI_API_KEY`)
//! - **Mock** - fixed responses for tests
//!
//! # Example
//!
//! ```no_run
//! use storypoint::{GeminiProvider, LlmProvider};
//!
//! let provider = GeminiProvider::from_env().unwrap();
//! let answer = provider.generate("Estimate this story...").unwrap();
//! println!("{}", answer);
//! ```

mod gemini;
mod mock;
mod provider;

pub use gemini::{API_KEY_ENV, GEMINI_BASE_URL, GeminiProvider};
pub use mock::{MOCK_RESPONSE, MockProvider};
pub use provider::{GeminiModel, LlmConfig, LlmProvider};
