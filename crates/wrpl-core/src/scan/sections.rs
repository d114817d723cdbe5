//! Section discovery.
//!
//! The results table has no length fields. Its sections are delimited by
//! marker sequences found in this order:
//!
//! ```text
//! [results marker] [header, fixed size] [players ...] [players end marker]
//!     ... [scores marker] [score rows ... end of buffer]
//! ```

use std::ops::Range;

use serde::Serialize;
use strum::{Display, IntoStaticStr};
use tracing::debug;

use crate::error::{Error, Result};
use crate::layout::ReplayLayout;
use crate::scan::{BytePattern, locate_pattern};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display, IntoStaticStr)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SectionKind {
    Header,
    Players,
    Scores,
    Messages,
    Vehicles,
}

/// A byte range of the full replay buffer, tagged with what it holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SectionRange {
    pub kind: SectionKind,
    pub start: usize,
    pub end: usize,
}

impl SectionRange {
    pub fn new(kind: SectionKind, start: usize, end: usize) -> Self {
        Self { kind, start, end }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    pub fn slice<'a>(&self, buffer: &'a [u8]) -> &'a [u8] {
        &buffer[self.range()]
    }
}

/// Section bounds of one replay. Chat and vehicle records have no section of
/// their own and are scanned across the whole buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ReplaySections {
    pub header: SectionRange,
    pub players: SectionRange,
    pub scores: SectionRange,
    pub messages: SectionRange,
    pub vehicles: SectionRange,
}

/// Locate the header, players and scores sections.
///
/// A missing marker is fatal: without the boundary nothing downstream can be
/// decoded, so the error names the section that was being located.
pub fn locate_sections(buffer: &[u8], layout: &ReplayLayout) -> Result<ReplaySections> {
    let table_start = find_after(buffer, 0, &layout.results_table_marker, SectionKind::Header)?;

    let header_end = table_start
        .checked_add(layout.table_header_size)
        .filter(|&end| end <= buffer.len())
        .ok_or(Error::SectionTruncated {
            section: SectionKind::Header,
            needed: layout.table_header_size,
            available: buffer.len() - table_start,
        })?;
    let header = SectionRange::new(SectionKind::Header, table_start, header_end);

    let players_end = find_at(
        buffer,
        header_end,
        &layout.players_end_marker,
        SectionKind::Players,
    )?;
    let players = SectionRange::new(SectionKind::Players, header_end, players_end);

    let remainder_start = players_end + layout.players_end_marker.len();
    let scores_start = find_after(
        buffer,
        remainder_start,
        &layout.scores_marker,
        SectionKind::Scores,
    )?;
    let scores = SectionRange::new(SectionKind::Scores, scores_start, buffer.len());

    debug!(
        "Sections: header {:#x}..{:#x}, players {:#x}..{:#x}, scores {:#x}..{:#x}",
        header.start, header.end, players.start, players.end, scores.start, scores.end
    );

    Ok(ReplaySections {
        header,
        players,
        scores,
        messages: SectionRange::new(SectionKind::Messages, 0, buffer.len()),
        vehicles: SectionRange::new(SectionKind::Vehicles, 0, buffer.len()),
    })
}

/// Absolute offset of the first match at or after `from`.
fn find_at(
    buffer: &[u8],
    from: usize,
    pattern: &BytePattern,
    section: SectionKind,
) -> Result<usize> {
    buffer
        .get(from..)
        .and_then(|rest| locate_pattern(rest, pattern))
        .map(|relative| from + relative)
        .ok_or(Error::MarkerNotFound { section })
}

/// Absolute offset just past the first match at or after `from`.
fn find_after(
    buffer: &[u8],
    from: usize,
    pattern: &BytePattern,
    section: SectionKind,
) -> Result<usize> {
    find_at(buffer, from, pattern, section).map(|start| start + pattern.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_layout() -> ReplayLayout {
        ReplayLayout {
            table_header_size: 3,
            ..Default::default()
        }
    }

    #[test]
    fn test_locate_sections() {
        let mut buffer = vec![0xAA, 0xBB];
        buffer.extend([0x01, 0x16, 0xC6, 0x01]); // results marker, table at 6
        buffer.extend([0x11, 0x11, 0x11]); // header 6..9
        buffer.extend(b"Bob\x00777"); // players 9..16
        buffer.extend([0x00, 0x00, 0x00, 0x00]);
        buffer.extend([0x7E, 0x03, 0x00, 0x00, 0x01]); // scores marker at 21
        buffer.extend([0x05; 4]); // scores 25..29

        let sections = locate_sections(&buffer, &small_layout()).unwrap();

        assert_eq!(sections.header.range(), 6..9);
        assert_eq!(sections.players.range(), 9..16);
        assert_eq!(sections.players.slice(&buffer), b"Bob\x00777");
        assert_eq!(sections.scores.range(), 25..29);
        assert_eq!(sections.scores.len(), 4);
        assert_eq!(sections.messages.range(), 0..29);
    }

    #[test]
    fn test_missing_results_marker() {
        let err = locate_sections(&[0x00; 32], &small_layout()).unwrap_err();
        assert!(matches!(
            err,
            Error::MarkerNotFound {
                section: SectionKind::Header
            }
        ));
        assert!(err.to_string().contains("header"));
    }

    #[test]
    fn test_truncated_header() {
        let buffer = [0x01, 0x16, 0xC6, 0x01, 0x11];
        let err = locate_sections(&buffer, &small_layout()).unwrap_err();
        assert!(matches!(
            err,
            Error::SectionTruncated {
                section: SectionKind::Header,
                needed: 3,
                available: 1
            }
        ));
    }

    #[test]
    fn test_missing_players_end() {
        let mut buffer = vec![0x01, 0x16, 0xC6, 0x01, 0x11, 0x11, 0x11];
        buffer.extend(b"Bob\x00777");
        let err = locate_sections(&buffer, &small_layout()).unwrap_err();
        assert!(matches!(
            err,
            Error::MarkerNotFound {
                section: SectionKind::Players
            }
        ));
    }

    #[test]
    fn test_scores_marker_searched_after_players() {
        // A scores marker inside the header must not be picked up.
        let layout = ReplayLayout {
            table_header_size: 4,
            ..Default::default()
        };
        let mut buffer = vec![0x01, 0x16, 0xC6, 0x01, 0x03, 0x00, 0x00, 0x01];
        buffer.extend(b"Bob\x00777");
        buffer.extend([0x00, 0x00, 0x00, 0x00]);
        let err = locate_sections(&buffer, &layout).unwrap_err();
        assert!(matches!(
            err,
            Error::MarkerNotFound {
                section: SectionKind::Scores
            }
        ));
    }
}
