//! Decode every match in a directory.

use std::path::Path;

use anyhow::Result;
use serde_json::{Map, Value as JsonValue, json};
use tracing::{info, warn};
use wrpl_core::export::to_json_value;
use wrpl_core::{NationLookup, NationResolver, ReplayDecoder, ReplayLayout};

use crate::cli::Parity;
use crate::commands::{load_catalog, write_output};
use crate::input;

/// Decode each entry of `dir` on its own.
///
/// One resolver is shared by the whole batch. A failing entry is logged and
/// written as `{ "error": ... }` without stopping the batch.
pub fn run(
    layout: ReplayLayout,
    dir: &Path,
    catalog: Option<&Path>,
    parity: Option<Parity>,
    output: Option<&Path>,
) -> Result<()> {
    let decoder = ReplayDecoder::new(layout);
    let mut resolver = NationResolver::new(load_catalog(catalog)?);

    let mut results = Map::new();
    let mut failed = 0;
    let entries = input::batch_entries(dir)?;
    let total = entries.len();

    for (name, path) in entries {
        match decode_entry(&decoder, &mut resolver, &path, parity) {
            Ok(record) => {
                results.insert(name, record);
            }
            Err(e) => {
                warn!("Failed to decode {}: {:#}", name, e);
                failed += 1;
                results.insert(name, json!({ "error": format!("{:#}", e) }));
            }
        }
    }

    info!(
        "Decoded {}/{} entries, {} catalog lookups",
        total - failed,
        total,
        resolver.catalog_queries()
    );
    if failed > 0 {
        eprintln!("{} of {} entries failed to decode", failed, total);
    }

    let content = serde_json::to_string_pretty(&JsonValue::Object(results))?;
    write_output(output, &content)
}

fn decode_entry<L: NationLookup>(
    decoder: &ReplayDecoder,
    resolver: &mut NationResolver<L>,
    path: &Path,
    parity: Option<Parity>,
) -> Result<JsonValue> {
    let replay = input::read_replay(path, parity)?;
    let record = decoder.decode(&replay, resolver)?;
    Ok(to_json_value(&record)?)
}
