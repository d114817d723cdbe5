use std::collections::BTreeMap;

use serde::Serialize;

use crate::error::{Error, Result};

/// One participant as listed in the player table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayerIdentity {
    pub id: u64,
    pub name: String,
    pub clan_tag: Option<String>,
    /// Position in the original left-to-right table order. Score rows and
    /// vehicle records address players by this index.
    pub table_index: usize,
}

/// Players addressed by table index.
///
/// Every id token in the players section owns one slot, so slot `i` always
/// lines up with score row `i`. Entries that were rejected while decoding
/// leave their slot empty instead of shifting the players after them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlayerTable {
    slots: Vec<Option<PlayerIdentity>>,
}

impl PlayerTable {
    /// Builds a table with no empty slots, checking that the indices are a
    /// permutation of `0..identities.len()`.
    pub fn from_identities(identities: Vec<PlayerIdentity>) -> Result<Self> {
        let count = identities.len();
        Self::with_slots(identities, count)
    }

    /// Builds a table of `slot_count` slots. Slots no identity claims stay
    /// empty.
    pub fn with_slots(identities: Vec<PlayerIdentity>, slot_count: usize) -> Result<Self> {
        let mut slots: Vec<Option<PlayerIdentity>> = vec![None; slot_count];

        for identity in identities {
            let index = identity.table_index;
            let slot = slots.get_mut(index).ok_or(Error::TableIndexOutOfRange {
                index,
                count: slot_count,
            })?;
            if slot.is_some() {
                return Err(Error::DuplicateTableIndex(index));
            }
            *slot = Some(identity);
        }

        Ok(Self { slots })
    }

    /// Number of decoded players.
    pub fn len(&self) -> usize {
        self.slots.iter().flatten().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of slots, including rejected ones. Score rows and vehicle
    /// records are addressed against this count.
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    pub fn get(&self, table_index: usize) -> Option<&PlayerIdentity> {
        self.slots.get(table_index)?.as_ref()
    }

    pub fn by_name(&self, name: &str) -> Option<&PlayerIdentity> {
        self.iter().find(|p| p.name == name)
    }

    /// Players in table order, skipping empty slots.
    pub fn iter(&self) -> impl Iterator<Item = &PlayerIdentity> {
        self.slots.iter().flatten()
    }

    /// Table indices of slots whose entry was rejected.
    pub fn empty_slots(&self) -> impl Iterator<Item = usize> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.is_none())
            .map(|(index, _)| index)
    }

    /// Players keyed by their numeric id.
    pub fn by_id(&self) -> BTreeMap<u64, &PlayerIdentity> {
        self.iter().map(|p| (p.id, p)).collect()
    }
}
