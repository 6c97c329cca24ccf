mod common;

use common::*;
use encoding_rs::WINDOWS_1252;
use esm_records::{EsmError, EsmReader, EsmWriter, SoundData, SubrecordReader, SubrecordWriter, Tag};

const SOUN: Tag = Tag::new(b"SOUN");

#[test]
fn reads_subrecords_in_order() {
    let body = concat(&[sub_str(b"NAME", "alarm"), sub_str(b"FNAM", "fx/alarm.wav")]);
    let mut reader = SubrecordReader::new(SOUN, &body, WINDOWS_1252);

    assert!(reader.has_more_subs());
    assert_eq!(reader.peek_tag(), Some(Tag::new(b"NAME")));
    assert_eq!(reader.next_sub().expect("NAME header"), Tag::new(b"NAME"));
    assert_eq!(reader.read_string(), "alarm");

    assert_eq!(reader.next_sub().expect("FNAM header"), Tag::new(b"FNAM"));
    assert_eq!(reader.read_string(), "fx/alarm.wav");
    assert!(!reader.has_more_subs(), "body should be exhausted");
    assert_eq!(reader.peek_tag(), None);
}

#[test]
fn peek_does_not_consume() {
    let body = sub_str(b"NAME", "x");
    let reader = SubrecordReader::new(SOUN, &body, WINDOWS_1252);
    assert_eq!(reader.peek_tag(), Some(Tag::new(b"NAME")));
    assert_eq!(reader.remaining_len(), body.len());
}

#[test]
fn strings_without_terminator_are_accepted() {
    let body = sub(b"NAME", b"plain");
    let mut reader = SubrecordReader::new(SOUN, &body, WINDOWS_1252);
    reader.next_sub().expect("header");
    assert_eq!(reader.read_string(), "plain");
}

#[test]
fn declared_length_past_record_end_is_truncated() {
    let mut body = sub(b"FNAM", b"abcdef");
    body.truncate(body.len() - 2);
    let mut reader = SubrecordReader::new(SOUN, &body, WINDOWS_1252);

    match reader.next_sub() {
        Err(EsmError::TruncatedPayload { tag, expected, actual, .. }) => {
            assert_eq!(tag, Tag::new(b"FNAM"));
            assert_eq!(expected, 6);
            assert_eq!(actual, 4);
        }
        other => panic!("expected TruncatedPayload, got {:?}", other),
    }
}

#[test]
fn cut_header_is_truncated() {
    let body = b"DAT".to_vec();
    let mut reader = SubrecordReader::new(SOUN, &body, WINDOWS_1252);
    assert!(matches!(
        reader.next_sub(),
        Err(EsmError::TruncatedPayload { expected: 8, actual: 3, .. })
    ));
}

#[test]
fn fixed_payload_size_must_match_exactly() {
    let body = concat(&[sub_str(b"NAME", "bell"), sub(b"DATA", &[1, 2, 3, 4])]);
    let mut reader = SubrecordReader::new(SOUN, &body, WINDOWS_1252);
    let id = reader.get_hn_string(Tag::new(b"NAME")).expect("id");
    reader.set_record_id(&id);
    reader.next_sub().expect("DATA header");

    match reader.read_fixed::<SoundData>() {
        Err(EsmError::TruncatedPayload { tag, record_id, expected, actual }) => {
            assert_eq!(tag, Tag::new(b"DATA"));
            assert_eq!(record_id, "bell");
            assert_eq!(expected, 3);
            assert_eq!(actual, 4);
        }
        other => panic!("expected TruncatedPayload, got {:?}", other),
    }
}

#[test]
fn id_must_come_first() {
    let body = concat(&[sub(b"DATA", &[1, 2, 3]), sub_str(b"NAME", "late")]);
    let mut reader = SubrecordReader::new(SOUN, &body, WINDOWS_1252);

    match reader.get_hn_string(Tag::new(b"NAME")) {
        Err(EsmError::Framing { record_type, expected, found }) => {
            assert_eq!(record_type, SOUN);
            assert_eq!(expected, Tag::new(b"NAME"));
            assert_eq!(found, "DATA");
        }
        other => panic!("expected Framing, got {:?}", other),
    }
}

#[test]
fn empty_body_has_no_id() {
    let mut reader = SubrecordReader::new(SOUN, &[], WINDOWS_1252);
    assert!(!reader.has_more_subs());
    assert!(matches!(
        reader.get_hn_string(Tag::new(b"NAME")),
        Err(EsmError::Framing { .. })
    ));
}

#[test]
fn fail_carries_record_and_tag() {
    let body = concat(&[sub_str(b"NAME", "door"), sub(b"XXXX", &[])]);
    let mut reader = SubrecordReader::new(SOUN, &body, WINDOWS_1252);
    let id = reader.get_hn_string(Tag::new(b"NAME")).expect("id");
    reader.set_record_id(&id);
    reader.next_sub().expect("header");

    let message = reader.fail("Unknown subrecord").to_string();
    assert!(message.contains("door"), "message should name the record: {}", message);
    assert!(message.contains("XXXX"), "message should name the tag: {}", message);
    assert!(message.contains("Unknown subrecord"), "message should carry the text: {}", message);
}

#[test]
fn tombstone_is_consumed_only_when_present() {
    let body = concat(&[dele(), sub(b"DATA", &[1, 2, 3])]);
    let mut reader = SubrecordReader::new(SOUN, &body, WINDOWS_1252);
    assert!(reader.read_deleted().expect("DELE"));
    assert!(!reader.read_deleted().expect("no second DELE"));
    assert_eq!(reader.peek_tag(), Some(Tag::new(b"DATA")));
}

#[test]
fn writer_string_variants() {
    let mut writer = SubrecordWriter::new(WINDOWS_1252);
    writer.write_hn_c_string(Tag::new(b"NAME"), "id").expect("c string");
    writer.write_hn_oc_string(Tag::new(b"FNAM"), "").expect("omitted");
    writer.write_hn_string(Tag::new(b"SCVR"), "01").expect("plain");

    let expected = concat(&[sub(b"NAME", b"id\0"), sub(b"SCVR", b"01")]);
    assert_eq!(writer.as_bytes(), expected.as_slice());
}

#[test]
fn writer_encodes_with_code_page() {
    let mut writer = SubrecordWriter::new(WINDOWS_1252);
    writer.write_hn_string(Tag::new(b"NAME"), "Café").expect("write");
    assert_eq!(writer.into_bytes(), sub(b"NAME", &[b'C', b'a', b'f', 0xE9]));

    let body = sub(b"NAME", &[b'C', b'a', b'f', 0xE9, 0]);
    let mut reader = SubrecordReader::new(SOUN, &body, WINDOWS_1252);
    reader.next_sub().expect("header");
    assert_eq!(reader.read_string(), "Café");
}

#[test]
fn framed_records_are_read_until_eof() {
    let mut bytes = record(b"SOUN", &sound_body("a", "a.wav", [1, 2, 3]));
    bytes.extend(record(b"TES3", &[]));
    let mut reader = EsmReader::new(bytes.as_slice(), WINDOWS_1252);

    let first = reader.next_record().expect("first").expect("some");
    assert_eq!(first.tag, SOUN);
    assert_eq!(first.offset, 0);
    assert_eq!(first.body, sound_body("a", "a.wav", [1, 2, 3]));

    let second = reader.next_record().expect("second").expect("some");
    assert_eq!(second.tag, Tag::new(b"TES3"));
    assert_eq!(second.offset, 16 + first.body.len() as u64);
    assert!(second.body.is_empty());

    assert!(reader.next_record().expect("eof").is_none());
}

#[test]
fn framed_record_cut_short_is_an_error() {
    let mut bytes = record(b"SOUN", &sound_body("a", "a.wav", [1, 2, 3]));
    bytes.truncate(bytes.len() - 1);
    let mut reader = EsmReader::new(bytes.as_slice(), WINDOWS_1252);
    assert!(matches!(reader.next_record(), Err(EsmError::TruncatedPayload { .. })));

    let header_only = b"SOUN\x10\x00".to_vec();
    let mut reader = EsmReader::new(header_only.as_slice(), WINDOWS_1252);
    assert!(matches!(
        reader.next_record(),
        Err(EsmError::TruncatedPayload { expected: 16, actual: 6, .. })
    ));
}

#[test]
fn huge_declared_record_length_fails_on_missing_bytes() {
    let mut bytes = b"SOUN".to_vec();
    bytes.extend_from_slice(&u32::MAX.to_le_bytes());
    bytes.extend_from_slice(&[0; 8]);
    bytes.extend_from_slice(b"only a few bytes");
    let mut reader = EsmReader::new(bytes.as_slice(), WINDOWS_1252);

    match reader.next_record() {
        Err(EsmError::TruncatedPayload { tag, expected, actual, .. }) => {
            assert_eq!(tag, SOUN);
            assert_eq!(expected, u32::MAX as usize);
            assert_eq!(actual, 16);
        }
        other => panic!("expected TruncatedPayload, got {:?}", other.map(|r| r.map(|r| r.tag))),
    }
}

#[test]
fn writer_frames_records() {
    let mut writer = EsmWriter::new(Vec::new(), WINDOWS_1252);
    let mut body = writer.body();
    body.write_hn_c_string(Tag::new(b"NAME"), "a").expect("name");
    writer.write_record(SOUN, 0, body.as_bytes()).expect("record");
    assert_eq!(writer.records_written(), 1);

    let bytes = writer.into_inner();
    assert_eq!(bytes, record(b"SOUN", &sub_str(b"NAME", "a")));
}
