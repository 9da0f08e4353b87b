//! CLI command implementations.

pub mod estimate;
pub mod input;
pub mod models;
pub mod prompt;
pub mod serve;
pub mod validate;
