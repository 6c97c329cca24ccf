//! Wire format layer for content files.
//!
//! This module sits between raw byte streams and the record codecs:
//!
//! - [`framing`]: 16-byte record headers, [`EsmReader`](framing::EsmReader)
//! - [`subrecord`]: tagged, length-delimited chunks inside a record body
//! - [`writer`]: the encoding mirror of both
//! - [`payload`]: fixed-size typed payloads
//!
//! ```text
//! File Structure:
//! ┌─────────────────┐
//! │ Record header   │ ← framing::EsmReader::next_record()
//! ├─────────────────┤
//! │  NAME subrecord │ ← subrecord::SubrecordReader (id, always first)
//! │  DELE subrecord │   (optional tombstone, ends the record)
//! │  field subs ... │
//! ├─────────────────┤
//! │ Record header   │
//! │  ...            │
//! └─────────────────┘
//! ```

pub mod framing;
pub mod payload;
pub mod subrecord;
pub mod writer;
