//! Non-fatal decode issues and per-player outcomes.
//!
//! The format varies between game versions, so most problems degrade a single
//! field or a single player instead of aborting the decode. Every such problem
//! is recorded here so callers can see what was skipped.

use serde::Serialize;
use strum::Display;
use thiserror::Error;

/// Why a player table token could not be decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum TokenFault {
    /// The ID token has no name token next to it.
    MissingNeighbor,
    /// The name or clan tag is not valid UTF-8.
    InvalidText,
    /// The ID does not fit in 64 bits.
    IdOverflow,
    EmptyName,
}

/// Why the winning team could not be determined.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum WinnerFault {
    #[error("'{marker}' marker not found")]
    MarkerNotFound { marker: String },

    #[error("marker at {offset:#x} has no index before it")]
    NoIndexByte { offset: usize },

    #[error("winner index {index} outside table of {count} slots")]
    IndexOutOfRange { index: usize, count: usize },

    #[error("winner at table index {index} has no team")]
    NoTeam { index: usize },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DecodeIssue {
    #[error("player table entry {table_index} (reversed token {position}): {fault}")]
    MalformedPlayerToken {
        position: usize,
        table_index: usize,
        fault: TokenFault,
    },

    #[error("player id {id} at table index {table_index} was already taken by a later entry")]
    DuplicatePlayerId { id: u64, table_index: usize },

    #[error("no score row for table index {table_index}")]
    MissingScoreRow { table_index: usize },

    #[error(
        "score row {table_index} too short for {field} (needs {needed} bytes, has {available})"
    )]
    ShortRow {
        table_index: usize,
        field: &'static str,
        needed: usize,
        available: usize,
    },

    #[error("vehicle record at {offset:#x} points to unknown table index {table_index}")]
    UnknownVehicleIndex { offset: usize, table_index: usize },

    #[error("no nation found for vehicle '{vehicle}' (table index {table_index})")]
    NationNotFound { table_index: usize, vehicle: String },

    #[error("winning team could not be determined: {fault}")]
    WinnerUnresolved { fault: WinnerFault },
}

impl DecodeIssue {
    /// The player this issue belongs to, if it can be tied to one.
    pub fn table_index(&self) -> Option<usize> {
        match self {
            Self::MalformedPlayerToken { table_index, .. }
            | Self::DuplicatePlayerId { table_index, .. }
            | Self::MissingScoreRow { table_index }
            | Self::ShortRow { table_index, .. }
            | Self::NationNotFound { table_index, .. } => Some(*table_index),
            Self::UnknownVehicleIndex { .. }
            | Self::WinnerUnresolved { .. } => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum EntryOutcome {
    Complete,
    Partial { issues: Vec<DecodeIssue> },
    Failed { reason: DecodeIssue },
}

impl EntryOutcome {
    pub fn is_complete(&self) -> bool {
        matches!(self, Self::Complete)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DecodeReport {
    pub issues: Vec<DecodeIssue>,
    /// Chat pattern matches whose speaker is not a known player.
    pub unmatched_messages: usize,
}

impl DecodeReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, issue: DecodeIssue) {
        self.issues.push(issue);
    }

    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }

    /// Outcome for the player at `table_index`.
    pub fn outcome_for(&self, table_index: usize) -> EntryOutcome {
        let issues: Vec<DecodeIssue> = self
            .issues
            .iter()
            .filter(|issue| issue.table_index() == Some(table_index))
            .cloned()
            .collect();

        if issues.is_empty() {
            EntryOutcome::Complete
        } else {
            EntryOutcome::Partial { issues }
        }
    }

    /// Player table entries that were dropped entirely.
    pub fn rejected_entries(&self) -> Vec<EntryOutcome> {
        self.issues
            .iter()
            .filter(|issue| {
                matches!(
                    issue,
                    DecodeIssue::MalformedPlayerToken { .. } | DecodeIssue::DuplicatePlayerId { .. }
                )
            })
            .map(|issue| EntryOutcome::Failed {
                reason: issue.clone(),
            })
            .collect()
    }
}
