use tracing::{debug, warn};

use crate::layout::ReplayLayout;
use crate::report::{DecodeIssue, WinnerFault};
use crate::scan::locate_pattern;
use crate::score::PlayerStats;

/// Table index of one player on the winning side.
///
/// The win-streak bookkeeping record names a winner a fixed distance before
/// its marker text.
pub fn find_winner_index(buffer: &[u8], layout: &ReplayLayout) -> Result<usize, WinnerFault> {
    let marker = layout.win_streak_pattern();
    let start =
        locate_pattern(buffer, &marker).ok_or_else(|| WinnerFault::MarkerNotFound {
            marker: layout.win_streak_marker.clone(),
        })?;

    start
        .checked_sub(layout.winner_index_back_offset)
        .map(|pos| buffer[pos] as usize)
        .ok_or(WinnerFault::NoIndexByte { offset: start })
}

/// The team id shared by every winning player.
///
/// Failures are recorded and leave every player without a win.
pub fn resolve_winning_team(
    buffer: &[u8],
    layout: &ReplayLayout,
    stats: &[PlayerStats],
    issues: &mut Vec<DecodeIssue>,
) -> Option<u8> {
    let team = find_winner_index(buffer, layout).and_then(|index| {
        let player = stats.get(index).ok_or(WinnerFault::IndexOutOfRange {
            index,
            count: stats.len(),
        })?;
        player.team.ok_or(WinnerFault::NoTeam { index })
    });

    match team {
        Ok(team) => {
            debug!("Winning team: {}", team);
            Some(team)
        }
        Err(fault) => {
            warn!("Could not determine winning team: {}", fault);
            issues.push(DecodeIssue::WinnerUnresolved { fault });
            None
        }
    }
}
