//! Text encoding helpers

use encoding_rs::{Encoding, WINDOWS_1250, WINDOWS_1251, WINDOWS_1252};
use log::warn;

/// Resolve an encoding name to an `encoding_rs` encoding.
///
/// Accepts the short code-page names used by content tools (`win1250`,
/// `win1251`, `win1252`) as well as any WHATWG label. Unknown names fall
/// back to Windows-1252.
pub fn parse_encoding(label: &str) -> &'static Encoding {
    match label.trim().to_ascii_lowercase().as_str() {
        "win1250" => WINDOWS_1250,
        "win1251" => WINDOWS_1251,
        "win1252" => WINDOWS_1252,
        other => Encoding::for_label(other.as_bytes()).unwrap_or_else(|| {
            warn!("Unknown encoding '{}', falling back to windows-1252", label);
            WINDOWS_1252
        }),
    }
}

/// Decode a string payload, dropping trailing NUL terminators.
pub fn decode_text(bytes: &[u8], encoding: &'static Encoding) -> String {
    let end = bytes
        .iter()
        .rposition(|&byte| byte != 0)
        .map_or(0, |pos| pos + 1);
    let (text, _) = encoding.decode_without_bom_handling(&bytes[..end]);
    text.into_owned()
}

/// Encode a string for writing. Characters the code page cannot represent
/// are replaced by `encoding_rs` with numeric character references.
pub fn encode_text(text: &str, encoding: &'static Encoding) -> Vec<u8> {
    let (bytes, _, had_errors) = encoding.encode(text);
    if had_errors {
        warn!("String '{}' is not representable in {}", text, encoding.name());
    }
    bytes.into_owned()
}
