//! Replay decoding pipeline.

use std::time::Instant;

use tracing::{debug, info, warn};

use crate::chat::extract_messages;
use crate::error::Result;
use crate::layout::ReplayLayout;
use crate::nation::{NationLookup, NationResolver};
use crate::player::decode_player_table;
use crate::record::{MatchParts, MatchRecord, assemble};
use crate::report::{DecodeIssue, DecodeReport};
use crate::scan::locate_sections;
use crate::score::decode_score_rows;
use crate::vehicle::{VehicleUsage, resolve_winning_team, scan_vehicle_records};

/// Decodes replay buffers with one layout.
///
/// The decoder holds no per-replay state; the same instance can decode any
/// number of replays, and decoding the same bytes twice gives equal records.
#[derive(Debug, Clone, Default)]
pub struct ReplayDecoder {
    layout: ReplayLayout,
}

impl ReplayDecoder {
    pub fn new(layout: ReplayLayout) -> Self {
        Self { layout }
    }

    pub fn layout(&self) -> &ReplayLayout {
        &self.layout
    }

    /// Decode one complete replay buffer.
    ///
    /// Fails only when a section boundary cannot be found. Every other
    /// problem is recorded in the record's report and on the affected player.
    pub fn decode<L: NationLookup>(
        &self,
        replay: &[u8],
        resolver: &mut NationResolver<L>,
    ) -> Result<MatchRecord> {
        let layout = &self.layout;
        debug!("Decoding replay of {} bytes", replay.len());
        let started = Instant::now();

        let sections = locate_sections(replay, layout)?;
        debug!("Sections located after {:?}", started.elapsed());

        let players = decode_player_table(sections.players.slice(replay))?;
        let table = players.table;
        let mut issues = players.issues;
        debug!("Player table decoded after {:?}", started.elapsed());

        let stats = decode_score_rows(
            sections.scores.slice(replay),
            &layout.score_row,
            table.slot_count(),
            &mut issues,
        );
        debug!("Score rows decoded after {:?}", started.elapsed());

        let chat = extract_messages(sections.messages.slice(replay), &layout.chat_marker, &table);
        debug!("Chat scanned after {:?}", started.elapsed());

        let records = scan_vehicle_records(sections.vehicles.slice(replay), layout);
        let usage = VehicleUsage::from_records(&records, table.slot_count(), &mut issues);

        let winning_team = resolve_winning_team(replay, layout, &stats, &mut issues);
        debug!("Vehicles and outcome scanned after {:?}", started.elapsed());

        let nations = (0..table.slot_count())
            .map(|index| {
                table.get(index)?;
                let vehicle = usage.primary_vehicle(index, &layout.empty_vehicle)?;
                let nation = resolver.resolve(vehicle);
                if nation.is_none() {
                    warn!("No nation for vehicle '{}' (table index {})", vehicle, index);
                    issues.push(DecodeIssue::NationNotFound {
                        table_index: index,
                        vehicle: vehicle.to_string(),
                    });
                }
                nation
            })
            .collect();

        let mut report = DecodeReport::new();
        report.issues = issues;
        report.unmatched_messages = chat.unmatched;

        let record = assemble(MatchParts {
            table,
            stats,
            usage,
            nations,
            winning_team,
            messages: chat.messages,
            report,
        });

        info!(
            "Decoded {} players, {} messages, {} issues in {:?}",
            record.players.len(),
            record.messages.len(),
            record.report.issues.len(),
            started.elapsed()
        );

        Ok(record)
    }
}
