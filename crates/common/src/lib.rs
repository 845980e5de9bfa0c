//! Shared building blocks for the peaks workspace: logging setup,
//! response payload types and runtime environment checks.

pub mod types;
pub mod utils;
pub mod env;
