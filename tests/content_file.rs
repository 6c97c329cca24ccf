mod common;

use common::*;
use encoding_rs::WINDOWS_1252;
use esm_records::{
    Content, ErrorPolicy, EsmError, EsmReader, EsmWriter, LoadOptions, RecordState, Tag,
};

fn base_file() -> Vec<u8> {
    concat(&[
        record(b"TES3", &sub(b"HEDR", &[0; 300])),
        record(b"BODY", &body_part_body("head", "head.nif", [0, 0, 0, 0])),
        record(b"SOUN", &sound_body("bell", "fx/bell.wav", [100, 0, 200])),
        record(b"SOUN", &sound_body("door", "fx/door.wav", [90, 5, 60])),
        record(b"DIAL", &dial_body("Rumors")),
        record(b"INFO", &info_body("r1", "", "r2", "I heard a thing.")),
        record(b"INFO", &info_body("r2", "r1", "", "And another.")),
        record(b"DIAL", &dial_body("Greeting")),
        record(b"INFO", &info_body("g1", "", "", "Hello.")),
        record(b"NPC_", &sub_str(b"NAME", "fargoth")),
    ])
}

fn load(bytes: &[u8], options: &LoadOptions) -> Result<(Content, esm_records::LoadStats), EsmError> {
    let mut content = Content::new();
    let mut reader = EsmReader::new(bytes, options.encoding);
    let stats = content.load(&mut reader, options)?;
    Ok((content, stats))
}

#[test]
fn loads_a_whole_file() {
    let (content, stats) = load(&base_file(), &LoadOptions::default()).expect("load");

    assert_eq!(stats.loaded, 8);
    assert_eq!(stats.deleted, 0);
    assert_eq!(stats.failed, 0);
    assert_eq!(stats.skipped(), 2);
    assert_eq!(stats.skipped_types.get(&Tag::new(b"NPC_")), Some(&1));

    assert_eq!(content.body_parts.len(), 1);
    assert_eq!(content.sounds.len(), 2);
    assert_eq!(content.dialogues.len(), 2);
    assert_eq!(content.infos.len(), 3);

    let rumors: Vec<&str> = content
        .infos
        .get_topic_range("rumors")
        .iter()
        .map(|r| r.get().response.as_str())
        .collect();
    assert_eq!(rumors, ["I heard a thing.", "And another."]);
    assert_eq!(content.infos.get_topic_range("Greeting").len(), 1);
}

#[test]
fn response_before_any_topic_is_rejected() {
    let bytes = concat(&[
        record(b"INFO", &info_body("orphan", "", "", "")),
        record(b"SOUN", &sound_body("bell", "", [1, 2, 3])),
    ]);

    match load(&bytes, &LoadOptions::default()) {
        Err(EsmError::InvalidFormat(message)) => assert!(message.contains("orphan"), "{}", message),
        other => panic!("expected InvalidFormat, got {:?}", other.map(|(_, s)| s)),
    }

    let options = LoadOptions::default().with_error_policy(ErrorPolicy::SkipRecord);
    let (content, stats) = load(&bytes, &options).expect("skip policy");
    assert_eq!(stats.failed, 1);
    assert!(content.infos.is_empty());
    assert_eq!(content.sounds.len(), 1);
}

#[test]
fn error_policy_decides_abort_or_skip() {
    let bytes = concat(&[
        record(b"SOUN", &concat(&[sub_str(b"NAME", "broken"), sub_str(b"FNAM", "x.wav")])),
        record(b"SOUN", &sound_body("fine", "fine.wav", [1, 2, 3])),
    ]);

    assert!(matches!(
        load(&bytes, &LoadOptions::default()),
        Err(EsmError::MissingMandatoryField { field: "DATA", .. })
    ));

    let options = LoadOptions::default().with_error_policy(ErrorPolicy::SkipRecord);
    let (content, stats) = load(&bytes, &options).expect("skip policy");
    assert_eq!(stats.failed, 1);
    assert_eq!(stats.loaded, 1);
    assert!(content.sounds.get("broken").is_none());
    assert!(content.sounds.get("fine").is_some());
}

#[test]
fn responses_after_a_bad_topic_are_not_misfiled() {
    let bytes = concat(&[
        record(b"DIAL", &dial_body("Good")),
        record(b"INFO", &info_body("1", "", "", "")),
        record(b"DIAL", &sub_str(b"NAME", "Bad")),
        record(b"INFO", &info_body("2", "", "", "")),
    ]);
    let options = LoadOptions::default().with_error_policy(ErrorPolicy::SkipRecord);
    let (content, stats) = load(&bytes, &options).expect("skip policy");

    assert_eq!(stats.failed, 2);
    assert_eq!(content.infos.get_topic_range("good").len(), 1);
}

#[test]
fn save_and_reload_round_trip() {
    let (content, _) = load(&base_file(), &LoadOptions::default()).expect("load");

    let mut writer = EsmWriter::new(Vec::new(), WINDOWS_1252);
    content.save(&mut writer).expect("save");
    assert_eq!(writer.records_written(), 8);
    let bytes = writer.into_inner();

    let (reloaded, stats) = load(&bytes, &LoadOptions::default()).expect("reload");
    assert_eq!(stats.loaded, 8);
    assert_eq!(stats.skipped(), 0);

    let before: Vec<_> = content.infos.infos().iter().map(|r| r.get().clone()).collect();
    let after: Vec<_> = reloaded.infos.infos().iter().map(|r| r.get().clone()).collect();
    assert_eq!(before, after);
    assert_eq!(reloaded.sounds.get("door"), content.sounds.get("door"));
    assert_eq!(reloaded.body_parts.get("head"), content.body_parts.get("head"));
}

#[test]
fn override_file_merges_onto_base() {
    let (mut content, _) = load(&base_file(), &LoadOptions::default()).expect("base");

    let patch = concat(&[
        record(b"SOUN", &sound_body("bell", "fx/new_bell.wav", [50, 0, 100])),
        record(b"BODY", &concat(&[sub_str(b"NAME", "head"), dele()])),
        record(b"DIAL", &dial_body("Rumors")),
        record(b"INFO", &info_body("r3", "r1", "r2", "Squeezed in.")),
        record(b"INFO", &concat(&[sub_str(b"INAM", "r2"), dele()])),
    ]);
    let options = LoadOptions::default().as_override();
    let mut reader = EsmReader::new(patch.as_slice(), options.encoding);
    let stats = content.load(&mut reader, &options).expect("override");
    assert_eq!(stats.loaded, 3);
    assert_eq!(stats.deleted, 2);

    let bell = content.sounds.get_record("bell").expect("bell");
    assert_eq!(bell.state(), RecordState::Modified);
    assert_eq!(bell.get().sound, "fx/new_bell.wav");
    assert_eq!(content.sounds.search_id("bell"), Some(0));

    assert_eq!(content.body_parts.get_record("head").map(|r| r.state()), Some(RecordState::Deleted));

    let rumors: Vec<(&str, bool)> = content
        .infos
        .get_topic_range("Rumors")
        .iter()
        .map(|r| (r.get().id.as_str(), r.is_deleted()))
        .collect();
    assert_eq!(rumors, [("r1", false), ("r3", false), ("r2", true)]);
    assert_eq!(content.infos.get_topic_range("Greeting").len(), 1);
}

#[test]
fn tolerant_reader_stops_at_broken_framing() {
    let mut bytes = base_file();
    bytes.extend_from_slice(b"SOUN\xff\x00\x00\x00");
    let options = LoadOptions::default().with_error_policy(ErrorPolicy::SkipRecord);
    assert!(matches!(load(&bytes, &options), Err(EsmError::TruncatedPayload { .. })));
}

#[test]
fn save_file_and_load_file() {
    let (content, _) = load(&base_file(), &LoadOptions::default()).expect("load");
    let path = std::env::temp_dir().join(format!("esm-records-{}.esp", std::process::id()));

    content.save_file(&path, &LoadOptions::default()).expect("save file");
    let mut reloaded = Content::new();
    let stats = reloaded.load_file(&path, &LoadOptions::default()).expect("load file");
    std::fs::remove_file(&path).ok();

    assert_eq!(stats.loaded, 8);
    assert_eq!(reloaded.infos.len(), 3);
}

#[test]
fn record_without_id_aborts_under_any_policy() {
    let bytes = concat(&[
        record(b"SOUN", &sound_body("a", "a.wav", [1, 2, 3])),
        record(b"SOUN", &sub(b"DATA", &[1, 2, 3])),
        record(b"SOUN", &sound_body("b", "b.wav", [1, 2, 3])),
    ]);

    for policy in [ErrorPolicy::Abort, ErrorPolicy::SkipRecord] {
        let options = LoadOptions::default().with_error_policy(policy);
        match load(&bytes, &options) {
            Err(EsmError::Framing { expected, found, .. }) => {
                assert_eq!(expected, Tag::new(b"NAME"));
                assert_eq!(found, "DATA");
            }
            other => panic!("{:?}: expected Framing, got {:?}", policy, other.map(|(_, s)| s)),
        }
    }
}

#[test]
fn deleting_a_topic_drops_its_responses() {
    let (mut content, _) = load(&base_file(), &LoadOptions::default()).expect("base");

    let master = record(b"DIAL", &concat(&[sub_str(b"NAME", "Rumors"), dele()]));
    let mut reader = EsmReader::new(master.as_slice(), WINDOWS_1252);
    let stats = content.load(&mut reader, &LoadOptions::default()).expect("second master");
    assert_eq!(stats.deleted, 1);

    assert!(content.dialogues.get("rumors").is_none());
    assert!(content.infos.get_topic_range("Rumors").is_empty());
    assert_eq!(content.infos.len(), 1);
    assert_eq!(content.infos.topic_range("Greeting"), 0..1);

    let mut writer = EsmWriter::new(Vec::new(), WINDOWS_1252);
    content.save(&mut writer).expect("save");
    assert_eq!(writer.records_written(), 5);
}
