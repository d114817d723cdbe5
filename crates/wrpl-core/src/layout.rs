//! Replay layout: markers, strides and field offsets.
//!
//! The defaults describe the known format. A JSON layout file may override any
//! subset of the fields; keys that are absent keep their default value.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::scan::BytePattern;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ReplayLayout {
    /// Start of the results table. The header begins right after it.
    pub results_table_marker: BytePattern,
    pub table_header_size: usize,
    pub players_end_marker: BytePattern,
    pub scores_marker: BytePattern,
    pub score_row: ScoreRowLayout,
    /// Precedes a chat record; the name length byte follows immediately.
    pub chat_marker: BytePattern,
    pub vehicle_marker: BytePattern,
    /// Distance from the vehicle marker back to the raw player index byte.
    pub vehicle_index_back_offset: usize,
    /// Literal text near the winning player's index.
    pub win_streak_marker: String,
    /// Distance from the win-streak marker back to the winner's table index.
    pub winner_index_back_offset: usize,
    /// Vehicle name used for an empty slot / spectator.
    pub empty_vehicle: String,
}

impl Default for ReplayLayout {
    fn default() -> Self {
        Self {
            results_table_marker: BytePattern::exact(&[0x01, 0x16, 0xC6, 0x01]),
            table_header_size: 211,
            players_end_marker: BytePattern::exact(&[0x00, 0x00, 0x00, 0x00]),
            scores_marker: BytePattern::exact(&[0x03, 0x00, 0x00, 0x01]),
            score_row: ScoreRowLayout::default(),
            chat_marker: BytePattern::exact(&[0x22, 0x01, 0x3C]),
            vehicle_marker: BytePattern::new(vec![
                Some(0x0F),
                Some(0x09),
                None,
                None,
                Some(0x58),
                Some(0x07),
            ]),
            vehicle_index_back_offset: 1,
            win_streak_marker: "winStreak".to_string(),
            winner_index_back_offset: 5,
            empty_vehicle: "dummy_plane".to_string(),
        }
    }
}

impl ReplayLayout {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    pub fn win_streak_pattern(&self) -> BytePattern {
        BytePattern::exact(self.win_streak_marker.as_bytes())
    }
}

/// Byte offsets inside one fixed-stride score row.
///
/// Kill counters are 4-byte little-endian integers; the remaining counters
/// are single bytes. The score is split into a low and a high byte.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ScoreRowLayout {
    pub stride: usize,
    pub air_kills: usize,
    pub ground_kills: usize,
    pub naval_kills: usize,
    pub team_kills: usize,
    pub ai_air_kills: usize,
    pub ai_ground_kills: usize,
    pub ai_naval_kills: usize,
    pub assists: usize,
    pub deaths: usize,
    pub captures: usize,
    pub score_low: usize,
    pub score_high: usize,
    pub squad: usize,
    pub auto_squad: usize,
    pub team: usize,
}

impl Default for ScoreRowLayout {
    fn default() -> Self {
        Self {
            stride: 152,
            air_kills: 16,
            ground_kills: 24,
            naval_kills: 32,
            team_kills: 40,
            ai_air_kills: 48,
            ai_ground_kills: 56,
            ai_naval_kills: 64,
            assists: 72,
            deaths: 80,
            captures: 88,
            score_low: 104,
            score_high: 105,
            squad: 128,
            auto_squad: 136,
            team: 144,
        }
    }
}
