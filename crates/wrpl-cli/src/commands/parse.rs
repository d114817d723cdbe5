//! Decode a single match.

use std::path::Path;

use anyhow::{Context, Result};
use wrpl_core::export::{format_console, to_json_string};
use wrpl_core::{NationResolver, ReplayDecoder, ReplayLayout};

use crate::cli::{OutputFormat, Parity};
use crate::commands::{load_catalog, write_output};
use crate::input;

pub fn run(
    layout: ReplayLayout,
    path: &Path,
    catalog: Option<&Path>,
    parity: Option<Parity>,
    format: OutputFormat,
    output: Option<&Path>,
) -> Result<()> {
    let replay = input::read_replay(path, parity)?;
    let mut resolver = NationResolver::new(load_catalog(catalog)?);

    let record = ReplayDecoder::new(layout)
        .decode(&replay, &mut resolver)
        .with_context(|| format!("Failed to decode {}", path.display()))?;

    let content = match format {
        OutputFormat::Console => format_console(&record),
        OutputFormat::Json => to_json_string(&record)?,
    };
    write_output(output, &content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use wrpl_core::fixture::{ReplayBuilder, ScoreRow};

    #[test]
    fn test_parse_chunk_folder_to_json() {
        let replay = ReplayBuilder::new()
            .player(7, "Alice", None, ScoreRow::team(1))
            .vehicle(0, "us_p47")
            .winner(0)
            .build();
        let (first, second) = replay.split_at(replay.len() / 2);

        let dir = tempfile::tempdir().unwrap();
        let chunks = dir.path().join("match");
        fs::create_dir(&chunks).unwrap();
        fs::write(chunks.join("0001.wrpl"), first).unwrap();
        fs::write(chunks.join("0003.wrpl"), second).unwrap();
        fs::write(chunks.join("0002.wrpl"), b"unrelated").unwrap();
        let output = dir.path().join("out.json");

        run(
            ReplayLayout::default(),
            &chunks,
            None,
            Some(Parity::Odd),
            OutputFormat::Json,
            Some(&output),
        )
        .unwrap();

        let json: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
        assert_eq!(json["players"]["7"]["nation"], "USA");
        assert_eq!(json["players"]["7"]["win"], true);
    }

    #[test]
    fn test_parse_reports_missing_marker() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.wrpl");
        fs::write(&path, b"not a replay").unwrap();

        let err = run(
            ReplayLayout::default(),
            &path,
            None,
            None,
            OutputFormat::Console,
            None,
        )
        .unwrap_err();
        assert!(format!("{:#}", err).contains("marker for the header section not found"));
    }
}
