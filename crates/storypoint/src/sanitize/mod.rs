//! Text sanitization for user-supplied story fields.

mod sanitizer;

pub use sanitizer::{
    DEFAULT_MAX_LEN, INJECTION_PHRASES, Sanitizer, SanitizerConfig, TRUNCATION_SUFFIX,
    sanitize_text,
};
