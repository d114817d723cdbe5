//! Fixed-stride score rows.
//!
//! Rows follow the scores marker in table order: row `i` belongs to the player
//! with table index `i`. The section runs to the end of the buffer, so rows
//! past the player count are other data and are never decoded.

use tracing::{debug, warn};

use crate::layout::ScoreRowLayout;
use crate::report::DecodeIssue;
use crate::scan::ByteBuffer;
use crate::score::PlayerStats;

/// Decode one [`PlayerStats`] per player, indexed by table index.
///
/// Players without a row get empty stats and a `MissingScoreRow` issue; a row
/// too short for a field leaves only that field absent.
pub fn decode_score_rows(
    section: &[u8],
    layout: &ScoreRowLayout,
    player_count: usize,
    issues: &mut Vec<DecodeIssue>,
) -> Vec<PlayerStats> {
    let rows: Vec<&[u8]> = if layout.stride == 0 {
        warn!("Score row stride is zero, no rows decoded");
        Vec::new()
    } else {
        section.chunks(layout.stride).take(player_count).collect()
    };

    debug!(
        "Decoding {} score rows for {} players ({} bytes in section)",
        rows.len(),
        player_count,
        section.len()
    );

    (0..player_count)
        .map(|table_index| match rows.get(table_index) {
            Some(row) => {
                let mut reader = RowReader {
                    buf: ByteBuffer::new(row),
                    table_index,
                    issues: &mut *issues,
                };
                reader.decode(layout)
            }
            None => {
                issues.push(DecodeIssue::MissingScoreRow { table_index });
                PlayerStats::default()
            }
        })
        .collect()
}

struct RowReader<'a, 'i> {
    buf: ByteBuffer<'a>,
    table_index: usize,
    issues: &'i mut Vec<DecodeIssue>,
}

impl RowReader<'_, '_> {
    fn decode(&mut self, layout: &ScoreRowLayout) -> PlayerStats {
        let score = match (
            self.buf.read_u8_at(layout.score_low),
            self.buf.read_u8_at(layout.score_high),
        ) {
            (Ok(low), Ok(high)) => Some(low as u32 + high as u32 * 256),
            _ => {
                self.short("score", layout.score_low.max(layout.score_high) + 1);
                None
            }
        };

        PlayerStats {
            air_kills: self.word("air_kills", layout.air_kills),
            ground_kills: self.word("ground_kills", layout.ground_kills),
            naval_kills: self.word("naval_kills", layout.naval_kills),
            team_kills: self.word("team_kills", layout.team_kills),
            ai_air_kills: self.word("ai_air_kills", layout.ai_air_kills),
            ai_ground_kills: self.word("ai_ground_kills", layout.ai_ground_kills),
            ai_naval_kills: self.word("ai_naval_kills", layout.ai_naval_kills),
            assists: self.byte("assists", layout.assists),
            deaths: self.byte("deaths", layout.deaths),
            captures: self.byte("captures", layout.captures),
            squad: self.byte("squad", layout.squad),
            auto_squad: self.byte("auto_squad", layout.auto_squad),
            team: self.byte("team", layout.team),
            score,
        }
    }

    fn word(&mut self, field: &'static str, offset: usize) -> Option<u32> {
        let value = self.buf.read_u32_at(offset).ok();
        if value.is_none() {
            self.short(field, offset + 4);
        }
        value
    }

    fn byte(&mut self, field: &'static str, offset: usize) -> Option<u8> {
        let value = self.buf.read_u8_at(offset).ok();
        if value.is_none() {
            self.short(field, offset + 1);
        }
        value
    }

    fn short(&mut self, field: &'static str, needed: usize) {
        self.issues.push(DecodeIssue::ShortRow {
            table_index: self.table_index,
            field,
            needed,
            available: self.buf.remaining(),
        });
    }
}
