//! Web server for the estimation form.

pub mod app;
pub mod error;
pub mod handlers;
pub mod state;
