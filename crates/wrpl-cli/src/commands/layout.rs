//! Write the default layout as a starting point for a custom one.

use std::path::Path;

use anyhow::Result;
use wrpl_core::ReplayLayout;

use crate::commands::write_output;

pub fn run(output: Option<&Path>) -> Result<()> {
    let content = serde_json::to_string_pretty(&ReplayLayout::default())?;
    write_output(output, &content)
}
