//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `soiree_core` linkage with deterministic output.
//! - Decode a stored notes value for quick inspection:
//!   `soiree_cli decode '<raw notes field>'`.
//! - `soiree_cli check '<raw>'` exits 0 for a structured envelope, 1 otherwise.
//! - `soiree_cli fields` lists the backend/client field renames.

use soiree_core::{decode, is_structured, ExtendedAttributes, LEDGER_ENTRY_FIELDS, WALLET_FIELDS};
use std::process::ExitCode;

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().skip(1).collect();

    match args.first().map(String::as_str) {
        None => {
            println!("soiree_core ping={}", soiree_core::ping());
            println!("soiree_core version={}", soiree_core::core_version());
            ExitCode::SUCCESS
        }
        Some("decode") => {
            let decoded = decode(args.get(1).map(String::as_str));
            let typed = ExtendedAttributes::from_bag(&decoded.attributes);
            println!("format={:?}", decoded.format);
            println!("notes={:?}", decoded.notes);
            match serde_json::to_string(&decoded.attributes) {
                Ok(json) => println!("attributes={json}"),
                Err(err) => println!("attributes=<unprintable: {err}>"),
            }
            println!("recognized={typed:?}");
            ExitCode::SUCCESS
        }
        Some("check") => match args.get(1) {
            Some(raw) if is_structured(raw) => ExitCode::SUCCESS,
            _ => ExitCode::from(1),
        },
        Some("fields") => {
            for (entity, mapper) in [("wallet", WALLET_FIELDS), ("ledger_entry", LEDGER_ENTRY_FIELDS)] {
                for pair in mapper.pairs() {
                    println!("{entity} backend={} client={}", pair.backend, pair.client);
                }
            }
            ExitCode::SUCCESS
        }
        Some(other) => {
            eprintln!(
                "unknown command `{other}`; expected no arguments, `decode <raw>`, `check <raw>` or `fields`"
            );
            ExitCode::from(2)
        }
    }
}
