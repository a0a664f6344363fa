//! `fieldbind-view` — render the grouped read-only view of a record.
//!
//! Usage:
//!   fieldbind-view <schema.json>
//!
//! The schema is read from the file given as the first argument; the record
//! is read from stdin as JSON. Sections print in schema order, one heading
//! and its fields per block.

use std::io::{self, Read};

use fieldbind::schema::codec::registry_from_json;
use fieldbind::view::render;
use serde_json::Value;

fn main() {
    let args: Vec<String> = std::env::args().collect();
    let schema_path = match args.get(1) {
        Some(p) => p.clone(),
        None => {
            eprintln!("First argument must be a schema JSON file.");
            std::process::exit(1);
        }
    };

    let schema_text = match std::fs::read_to_string(&schema_path) {
        Ok(text) => text,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    };
    let schema_json: Value = match serde_json::from_str(&schema_text) {
        Ok(v) => v,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    };
    let registry = match registry_from_json(&schema_json) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    };

    let mut buf = String::new();
    if let Err(e) = io::stdin().read_to_string(&mut buf) {
        eprintln!("{e}");
        std::process::exit(1);
    }
    let record: Value = match serde_json::from_str(buf.trim()) {
        Ok(v) => v,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    };

    for section in render(&record, &registry) {
        if let Some(title) = &section.title {
            println!("{title}");
        }
        for field in &section.fields {
            println!("  {}: {}", field.label, field.value);
        }
        println!();
    }
}
