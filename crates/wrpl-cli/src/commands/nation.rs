//! Resolve one vehicle name.

use std::path::Path;

use anyhow::{Result, bail};
use wrpl_core::NationResolver;

use crate::commands::load_catalog;

pub fn run(vehicle: &str, catalog: &Path) -> Result<()> {
    let mut resolver = NationResolver::new(load_catalog(Some(catalog))?);
    match resolver.resolve(vehicle) {
        Some(nation) => {
            println!("{}", nation);
            Ok(())
        }
        None => bail!("No nation found for '{}'", vehicle),
    }
}
