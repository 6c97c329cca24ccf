//! Hand-assembled record bytes for tests.
#![allow(dead_code)]

/// One subrecord: tag, little-endian length, payload.
pub fn sub(tag: &[u8; 4], payload: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(8 + payload.len());
    out.extend_from_slice(tag);
    out.extend_from_slice(&(payload.len() as u32).to_le_bytes());
    out.extend_from_slice(payload);
    out
}

/// NUL-terminated string payload.
pub fn cstr(text: &str) -> Vec<u8> {
    let mut out = text.as_bytes().to_vec();
    out.push(0);
    out
}

pub fn sub_str(tag: &[u8; 4], text: &str) -> Vec<u8> {
    sub(tag, &cstr(text))
}

pub fn dele() -> Vec<u8> {
    sub(b"DELE", &[0, 0, 0, 0])
}

pub fn concat(parts: &[Vec<u8>]) -> Vec<u8> {
    parts.concat()
}

/// A framed record: 16-byte header then body.
pub fn record(tag: &[u8; 4], body: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(16 + body.len());
    out.extend_from_slice(tag);
    out.extend_from_slice(&(body.len() as u32).to_le_bytes());
    out.extend_from_slice(&0u32.to_le_bytes());
    out.extend_from_slice(&0u32.to_le_bytes());
    out.extend_from_slice(body);
    out
}

pub fn info_data() -> Vec<u8> {
    let mut out = Vec::new();
    out.extend_from_slice(&0i32.to_le_bytes());
    out.extend_from_slice(&30i32.to_le_bytes());
    out.extend_from_slice(&[0xFF, 0xFF, 0xFF, 0]);
    out
}

pub fn sound_body(id: &str, file: &str, data: [u8; 3]) -> Vec<u8> {
    concat(&[sub_str(b"NAME", id), sub_str(b"FNAM", file), sub(b"DATA", &data)])
}

pub fn body_part_body(id: &str, model: &str, data: [u8; 4]) -> Vec<u8> {
    concat(&[sub_str(b"NAME", id), sub_str(b"MODL", model), sub(b"BYDT", &data)])
}

pub fn dial_body(id: &str) -> Vec<u8> {
    concat(&[sub_str(b"NAME", id), sub(b"DATA", &[0])])
}

pub fn info_body(id: &str, prev: &str, next: &str, response: &str) -> Vec<u8> {
    concat(&[
        sub_str(b"INAM", id),
        sub_str(b"PNAM", prev),
        sub_str(b"NNAM", next),
        sub(b"DATA", &info_data()),
        sub(b"NAME", response.as_bytes()),
    ])
}
