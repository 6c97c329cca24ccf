//! Foundational data structures, error types, and tag definitions.

pub mod error;
pub mod models;
pub mod tag;
