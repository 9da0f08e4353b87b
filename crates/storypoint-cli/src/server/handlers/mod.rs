//! API request handlers.

mod data;
mod estimate;
mod models;

pub use data::*;
pub use estimate::*;
pub use models::*;
