//! Replay input: single files and folders of chunk files.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use tracing::{debug, info};

use crate::cli::Parity;

/// Read one match into a single buffer.
///
/// A folder is read as a set of chunk files concatenated in file name order.
pub fn read_replay(path: &Path, parity: Option<Parity>) -> Result<Vec<u8>> {
    if !path.is_dir() {
        return fs::read(path).with_context(|| format!("Failed to read {}", path.display()));
    }

    let chunks = chunk_files(path, parity)?;
    let mut buffer = Vec::new();
    for chunk in &chunks {
        let bytes =
            fs::read(chunk).with_context(|| format!("Failed to read {}", chunk.display()))?;
        buffer.extend(bytes);
    }

    info!(
        "Read {} chunks ({} bytes) from {}",
        chunks.len(),
        buffer.len(),
        path.display()
    );
    Ok(buffer)
}

/// Chunk files of a folder, sorted by file name.
///
/// With a parity filter only files whose stem is a number of that parity are
/// kept.
pub fn chunk_files(dir: &Path, parity: Option<Parity>) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in
        fs::read_dir(dir).with_context(|| format!("Failed to list {}", dir.display()))?
    {
        let path = entry?.path();
        if !path.is_file() {
            continue;
        }
        match parity {
            Some(parity) if !stem_number(&path).is_some_and(|n| parity.matches(n)) => {
                debug!("Skipping chunk {}", path.display());
            }
            _ => files.push(path),
        }
    }

    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

    if files.is_empty() {
        bail!("No replay chunks found in {}", dir.display());
    }
    Ok(files)
}

/// Batch entries of a directory by name: every file or sub-folder.
pub fn batch_entries(dir: &Path) -> Result<Vec<(String, PathBuf)>> {
    let mut entries = Vec::new();
    for entry in
        fs::read_dir(dir).with_context(|| format!("Failed to list {}", dir.display()))?
    {
        let entry = entry?;
        let name = entry.file_name().to_string_lossy().into_owned();
        entries.push((name, entry.path()));
    }
    entries.sort();
    Ok(entries)
}

fn stem_number(path: &Path) -> Option<u64> {
    path.file_stem()?.to_str()?.parse().ok()
}
