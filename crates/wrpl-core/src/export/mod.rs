//! Export formats for decoded matches.

mod console;

pub use console::{format_console, format_player_line};

use serde_json::Value as JsonValue;

use crate::error::Result;
use crate::record::MatchRecord;

pub fn to_json_value(record: &MatchRecord) -> Result<JsonValue> {
    Ok(serde_json::to_value(record)?)
}

pub fn to_json_string(record: &MatchRecord) -> Result<String> {
    Ok(serde_json::to_string_pretty(record)?)
}
