//! Core content-file record module
//!
//! Data flows bottom-up through the submodules:
//!
//! ```text
//! bytes → format (framing, subrecords) → records (codecs) → collection
//! ```
//!
//! [`loader::Content`] ties the layers together for whole files.

pub mod collection;
pub mod format;
pub mod loader;
pub mod records;
pub mod types;
pub mod utils;

pub use types::error::{EsmError, Result};
