//! Final per-player match records.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::chat::ChatMessage;
use crate::player::PlayerTable;
use crate::report::{DecodeReport, EntryOutcome};
use crate::score::PlayerStats;
use crate::vehicle::VehicleUsage;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayerRecord {
    pub id: u64,
    pub name: String,
    pub clan_tag: Option<String>,
    pub table_index: usize,
    pub stats: PlayerStats,
    pub vehicles: Vec<String>,
    pub nation: Option<String>,
    pub win: bool,
    pub outcome: EntryOutcome,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchRecord {
    /// Players keyed by id.
    pub players: BTreeMap<u64, PlayerRecord>,
    pub messages: Vec<ChatMessage>,
    pub winning_team: Option<u8>,
    pub report: DecodeReport,
}

impl MatchRecord {
    /// Players in table order.
    pub fn players_by_table_index(&self) -> Vec<&PlayerRecord> {
        let mut players: Vec<_> = self.players.values().collect();
        players.sort_by_key(|p| p.table_index);
        players
    }

    pub fn player_by_name(&self, name: &str) -> Option<&PlayerRecord> {
        self.players.values().find(|p| p.name == name)
    }
}

/// Everything the extractors produced, addressed by table index.
pub struct MatchParts {
    pub table: PlayerTable,
    /// One entry per table index.
    pub stats: Vec<PlayerStats>,
    pub usage: VehicleUsage,
    /// One entry per table index.
    pub nations: Vec<Option<String>>,
    pub winning_team: Option<u8>,
    pub messages: Vec<ChatMessage>,
    pub report: DecodeReport,
}

/// Join the extractor outputs into one record per player.
///
/// Every player in the table gets a record; enrichment missing for a player
/// is left empty or absent. Empty table slots produce no record.
pub fn assemble(parts: MatchParts) -> MatchRecord {
    let MatchParts {
        table,
        stats,
        usage,
        mut nations,
        winning_team,
        messages,
        report,
    } = parts;

    let mut stats: Vec<Option<PlayerStats>> = stats.into_iter().map(Some).collect();

    let players = table
        .iter()
        .map(|identity| {
            let index = identity.table_index;
            let stats = stats
                .get_mut(index)
                .and_then(Option::take)
                .unwrap_or_default();
            let nation = nations.get_mut(index).and_then(Option::take);
            let win = winning_team.is_some() && stats.team == winning_team;
            let record = PlayerRecord {
                id: identity.id,
                name: identity.name.clone(),
                clan_tag: identity.clan_tag.clone(),
                table_index: index,
                stats,
                vehicles: usage.vehicles(index).to_vec(),
                nation,
                win,
                outcome: report.outcome_for(index),
            };
            (identity.id, record)
        })
        .collect();

    MatchRecord {
        players,
        messages,
        winning_team,
        report,
    }
}
