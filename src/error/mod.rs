//! Error handling
//!
//! Defines error types and handling for LiteBox.

pub mod handlers;
pub mod types;

pub use types::*;
