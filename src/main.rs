use esm_records::esm::utils::parse_encoding;
use esm_records::{Content, ErrorPolicy, LoadOptions, SelectValue};
use std::env;

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: {} <content-file> [--encoding <NAME>] [--skip-bad] [--topic <TOPIC>]", args[0]);
        std::process::exit(1);
    }

    let path = &args[1];
    let mut options = LoadOptions::default();
    let mut topic: Option<&str> = None;

    let mut rest = args[2..].iter();
    while let Some(arg) = rest.next() {
        match arg.as_str() {
            "--encoding" => match rest.next() {
                Some(name) => options = options.with_encoding(parse_encoding(name)),
                None => {
                    eprintln!("ERROR: --encoding flag requires an argument.");
                    std::process::exit(1);
                }
            },
            "--skip-bad" => options = options.with_error_policy(ErrorPolicy::SkipRecord),
            "--topic" => match rest.next() {
                Some(name) => topic = Some(name.as_str()),
                None => {
                    eprintln!("ERROR: --topic flag requires an argument.");
                    std::process::exit(1);
                }
            },
            other => {
                eprintln!("ERROR: Unknown argument '{}'", other);
                std::process::exit(1);
            }
        }
    }

    println!("Reading content file: {}", path);
    println!("  Encoding: {}", options.encoding.name());
    println!("{}", "=".repeat(60));

    let mut content = Content::new();
    let stats = match content.load_file(path, &options) {
        Ok(stats) => stats,
        Err(e) => {
            eprintln!("\nERROR: Failed to read content file");
            eprintln!("  {}", e);
            std::process::exit(1);
        }
    };

    println!("\nStatistics:");
    println!("  Records loaded: {}", stats.loaded);
    println!("  Deletions: {}", stats.deleted);
    println!("  Failed records: {}", stats.failed);
    println!("  Body parts: {}", content.body_parts.len());
    println!("  Sounds: {}", content.sounds.len());
    println!("  Topics: {}", content.dialogues.len());
    println!("  Responses: {}", content.infos.len());

    if !stats.skipped_types.is_empty() {
        println!("\nRecord types without a codec:");
        for (tag, count) in &stats.skipped_types {
            println!("  {}: {}", tag, count);
        }
    }

    if let Some(topic) = topic {
        let responses = content.infos.get_topic_range(topic);
        println!("\nResponses for topic '{}' ({}):", topic, responses.len());
        for (i, record) in responses.iter().enumerate() {
            let info = record.get();
            println!("  {}. [{}] {}", i + 1, info.id, info.response);
            for rule in &info.select_rules {
                match rule.value {
                    SelectValue::Int(v) => println!("       if {} {}", rule.rule, v),
                    SelectValue::Float(v) => println!("       if {} {}", rule.rule, v),
                }
            }
        }
    }
}
