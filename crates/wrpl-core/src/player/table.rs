//! Player table tokenizer.
//!
//! The players section is a run of null-separated tokens. Each player is
//! written as `name [clan tag] id`, where the id is all ASCII digits and the
//! clan tag is optional:
//!
//! ```text
//! Alice \0 12345 \0 Bob \0 -TAG- \0 67890
//! ```
//!
//! Names carry no marker of their own, so the table is read backwards,
//! anchored on the id tokens.

use std::collections::HashSet;

use tracing::{debug, warn};

use crate::error::Result;
use crate::player::{PlayerIdentity, PlayerTable};
use crate::report::{DecodeIssue, TokenFault};
use crate::scan::{decode_text_strict, is_digit_token};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerTableDecode {
    pub table: PlayerTable,
    /// Entries that were skipped.
    pub issues: Vec<DecodeIssue>,
}

struct Entry {
    id: u64,
    name: String,
    clan_tag: Option<String>,
}

/// Decode the players section into a table indexed by original position.
///
/// Tokens are visited last to first. For an id token at reversed position
/// `i`: if the token at `i + 2` is also an id (or the table starts there),
/// `i + 1` is the name and there is no clan tag; otherwise `i + 1` is the
/// clan tag and `i + 2` the name.
///
/// A name consisting only of digits is indistinguishable from an id and is
/// decoded as one; that ambiguity is inherent to the format.
///
/// Every id token owns a table slot, so a rejected entry leaves a hole
/// instead of shifting the players before it onto other score rows.
pub fn decode_player_table(section: &[u8]) -> Result<PlayerTableDecode> {
    let mut tokens: Vec<&[u8]> = section.split(|&b| b == 0).collect();
    tokens.reverse();

    let slot_count = tokens.iter().filter(|token| is_digit_token(token)).count();
    let mut identities = Vec::new();
    let mut seen_ids = HashSet::new();
    let mut issues = Vec::new();

    let id_positions = tokens
        .iter()
        .enumerate()
        .filter(|(_, token)| is_digit_token(token))
        .map(|(position, _)| position);

    // Ids are met last-first; flip the provisional order back.
    for (provisional, position) in id_positions.enumerate() {
        let table_index = slot_count - 1 - provisional;

        match decode_entry(&tokens, position) {
            Ok(entry) => {
                if !seen_ids.insert(entry.id) {
                    warn!(
                        "Player id {} listed twice, dropping table index {}",
                        entry.id, table_index
                    );
                    issues.push(DecodeIssue::DuplicatePlayerId {
                        id: entry.id,
                        table_index,
                    });
                    continue;
                }
                identities.push(PlayerIdentity {
                    id: entry.id,
                    name: entry.name,
                    clan_tag: entry.clan_tag,
                    table_index,
                });
            }
            Err(fault) => {
                warn!(
                    "Skipping player token at reversed position {} (table index {}): {}",
                    position, table_index, fault
                );
                issues.push(DecodeIssue::MalformedPlayerToken {
                    position,
                    table_index,
                    fault,
                });
            }
        }
    }

    let table = PlayerTable::with_slots(identities, slot_count)?;
    debug!(
        "Decoded {} players into {} slots from {} tokens",
        table.len(),
        table.slot_count(),
        tokens.len()
    );

    Ok(PlayerTableDecode { table, issues })
}

fn decode_entry(tokens: &[&[u8]], position: usize) -> std::result::Result<Entry, TokenFault> {
    let id = std::str::from_utf8(tokens[position])
        .ok()
        .and_then(|digits| digits.parse::<u64>().ok())
        .ok_or(TokenFault::IdOverflow)?;

    let next = *tokens
        .get(position + 1)
        .ok_or(TokenFault::MissingNeighbor)?;

    let (name, clan_tag) = match tokens.get(position + 2) {
        Some(after) if !is_digit_token(after) => (*after, Some(next)),
        _ => (next, None),
    };

    let name = decode_text_strict(name).ok_or(TokenFault::InvalidText)?;
    if name.is_empty() {
        return Err(TokenFault::EmptyName);
    }
    let clan_tag = match clan_tag {
        Some(tag) => Some(
            decode_text_strict(tag)
                .ok_or(TokenFault::InvalidText)?
                .into_owned(),
        ),
        None => None,
    };

    Ok(Entry {
        id,
        name: name.into_owned(),
        clan_tag,
    })
}
