//! CLI command implementations.

pub mod batch;
pub mod layout;
pub mod nation;
pub mod parse;

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::{info, warn};
use wrpl_core::{NationCatalog, ReplayLayout};

/// The layout from `--layout`, or the built-in default.
pub fn load_layout(path: Option<&Path>) -> Result<ReplayLayout> {
    match path {
        Some(path) => {
            let layout = ReplayLayout::load(path)
                .with_context(|| format!("Failed to load layout from {}", path.display()))?;
            info!("Loaded layout from {}", path.display());
            Ok(layout)
        }
        None => Ok(ReplayLayout::default()),
    }
}

/// The nation catalog, or an empty one that resolves prefixed names only.
pub fn load_catalog(path: Option<&Path>) -> Result<NationCatalog> {
    match path {
        Some(path) => {
            let catalog = NationCatalog::load(path)
                .with_context(|| format!("Failed to load nation catalog from {}", path.display()))?;
            info!(
                "Loaded {} vehicles in {} groups from {}",
                catalog.len(),
                catalog.nations().len(),
                path.display()
            );
            Ok(catalog)
        }
        None => {
            warn!("No nation catalog given, only prefixed vehicle names will resolve");
            Ok(NationCatalog::new())
        }
    }
}

pub fn write_output(output: Option<&Path>, content: &str) -> Result<()> {
    match output {
        Some(path) => {
            fs::write(path, content)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            eprintln!("Written to: {}", path.display());
        }
        None => println!("{}", content),
    }
    Ok(())
}
