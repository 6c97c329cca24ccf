//! Custom error types for the esm-records crate.

use thiserror::Error;

use super::tag::Tag;

/// The primary error type for all operations in this crate.
///
/// Every decode-time variant carries enough context (record id, tag, sizes)
/// to locate the offending bytes without re-parsing the file.
#[derive(Debug, Error)]
pub enum EsmError {
    /// An error originating from I/O operations.
    #[error("I/O error: {0:?}")]
    Io(#[from] std::io::Error),

    /// The mandatory id subrecord is absent or not the first subrecord,
    /// or a record header is cut short.
    #[error("Framing error in {record_type} record: expected {expected}, found {found}")]
    Framing {
        record_type: Tag,
        expected: Tag,
        found: String,
    },

    /// A subrecord tag the record schema does not recognize.
    #[error("Unknown subrecord {tag} in record '{record_id}'")]
    UnknownSubrecord { tag: Tag, record_id: String },

    /// A subrecord marked mandatory by the schema was never seen.
    #[error("Missing mandatory field {field} in record '{record_id}'")]
    MissingMandatoryField {
        field: &'static str,
        record_id: String,
    },

    /// A payload length disagrees with the schema or runs past the record.
    #[error("Truncated payload for {tag} in record '{record_id}': expected {expected} bytes, found {actual} bytes")]
    TruncatedPayload {
        tag: Tag,
        record_id: String,
        expected: usize,
        actual: usize,
    },

    /// A codec-raised failure with a free-form message.
    #[error("Malformed record '{record_id}' at {tag}: {message}")]
    Malformed {
        record_id: String,
        tag: Tag,
        message: String,
    },

    /// A subrecord payload whose length does not fit the 32-bit size field.
    #[error("Payload for {tag} is too large to encode: {size} bytes")]
    PayloadTooLarge { tag: Tag, size: usize },

    /// The stream is structurally invalid at the record level.
    #[error("Invalid format: {0}")]
    InvalidFormat(String),
}

/// A convenience `Result` type alias using the crate's `EsmError` type.
pub type Result<T> = std::result::Result<T, EsmError>;
