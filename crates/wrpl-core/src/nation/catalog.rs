use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use tracing::warn;

use crate::error::Result;

/// Anything that can name the catalog group a vehicle belongs to.
pub trait NationLookup {
    fn lookup(&self, vehicle: &str) -> Option<&str>;
}

impl<T: NationLookup + ?Sized> NationLookup for &T {
    fn lookup(&self, vehicle: &str) -> Option<&str> {
        (**self).lookup(vehicle)
    }
}

impl<T: NationLookup + ?Sized> NationLookup for Arc<T> {
    fn lookup(&self, vehicle: &str) -> Option<&str> {
        (**self).lookup(vehicle)
    }
}

/// Vehicle name to nation catalog
///
/// File format:
/// - `==== <Nation> ====` starts a block
/// - Every other non-empty line in a block is a vehicle name
/// - Lines starting with `#` are comments
#[derive(Debug, Clone, Default)]
pub struct NationCatalog {
    vehicles: HashMap<String, String>,
    nations: Vec<String>,
}

impl NationCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(Self::parse(&content))
    }

    pub fn parse(content: &str) -> Self {
        let mut catalog = Self::new();
        let mut current: Option<String> = None;

        for (line_number, line) in content.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            if line.starts_with("====") {
                match parse_block_title(line) {
                    Some(title) => {
                        if !catalog.nations.iter().any(|n| n == title) {
                            catalog.nations.push(title.to_string());
                        }
                        current = Some(title.to_string());
                    }
                    None => {
                        warn!("Malformed nation header on line {}: '{}'", line_number + 1, line)
                    }
                }
                continue;
            }

            match &current {
                Some(nation) => {
                    catalog
                        .vehicles
                        .entry(line.to_string())
                        .or_insert_with(|| nation.clone());
                }
                None => warn!(
                    "Vehicle '{}' on line {} is outside any nation block",
                    line,
                    line_number + 1
                ),
            }
        }

        catalog
    }

    /// Block titles in file order.
    pub fn nations(&self) -> &[String] {
        &self.nations
    }

    pub fn len(&self) -> usize {
        self.vehicles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vehicles.is_empty()
    }
}

impl NationLookup for NationCatalog {
    fn lookup(&self, vehicle: &str) -> Option<&str> {
        self.vehicles.get(vehicle).map(String::as_str)
    }
}

fn parse_block_title(line: &str) -> Option<&str> {
    let title = line.strip_prefix("====")?.strip_suffix("====")?.trim();
    (!title.is_empty()).then_some(title)
}
