//! Vehicle selection records.
//!
//! Each time a player spawns in a vehicle the replay stores
//!
//! ```text
//! [raw index u8] ... [marker, 6 bytes incl. 2 unknown] [name len u8] [name]
//! ```
//!
//! The raw index is the player's table index plus a per-replay constant. The
//! constant is taken to be the smallest raw index seen, which holds as long as
//! the first player in the table spawned at least once.

use serde::Serialize;
use tracing::{debug, trace};

use crate::layout::ReplayLayout;
use crate::report::DecodeIssue;
use crate::scan::{ByteBuffer, decode_text_strict, locate_all};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VehicleRecord {
    /// Offset of the marker in the replay buffer.
    pub offset: usize,
    pub raw_index: u8,
    pub vehicle: String,
}

pub fn scan_vehicle_records(buffer: &[u8], layout: &ReplayLayout) -> Vec<VehicleRecord> {
    let marker = &layout.vehicle_marker;

    let records: Vec<VehicleRecord> = locate_all(buffer, marker)
        .into_iter()
        .filter_map(|offset| {
            let record =
                decode_record(buffer, offset, marker.len(), layout.vehicle_index_back_offset);
            if record.is_none() {
                trace!("Discarding vehicle candidate at {:#x}", offset);
            }
            record
        })
        .collect();

    debug!("Found {} vehicle records", records.len());
    records
}

fn decode_record(
    buffer: &[u8],
    offset: usize,
    marker_len: usize,
    back_offset: usize,
) -> Option<VehicleRecord> {
    let raw_index = *buffer.get(offset.checked_sub(back_offset)?)?;

    let mut buf = ByteBuffer::at(buffer, offset + marker_len).ok()?;
    let name = decode_text_strict(buf.read_length_prefixed().ok()?)?;
    if name.is_empty() {
        return None;
    }

    Some(VehicleRecord {
        offset,
        raw_index,
        vehicle: name.into_owned(),
    })
}

/// Vehicles used by each player, by table index, in first-use order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct VehicleUsage {
    by_index: Vec<Vec<String>>,
}

impl VehicleUsage {
    /// Normalise raw indices against their minimum and group names per player.
    ///
    /// Records that land outside the player table are reported and dropped.
    pub fn from_records(
        records: &[VehicleRecord],
        player_count: usize,
        issues: &mut Vec<DecodeIssue>,
    ) -> Self {
        let mut by_index = vec![Vec::new(); player_count];
        let Some(base) = records.iter().map(|r| r.raw_index).min() else {
            return Self { by_index };
        };

        for record in records {
            let table_index = (record.raw_index - base) as usize;
            match by_index.get_mut(table_index) {
                Some(vehicles) => {
                    if !vehicles.contains(&record.vehicle) {
                        vehicles.push(record.vehicle.clone());
                    }
                }
                None => issues.push(DecodeIssue::UnknownVehicleIndex {
                    offset: record.offset,
                    table_index,
                }),
            }
        }

        Self { by_index }
    }

    pub fn vehicles(&self, table_index: usize) -> &[String] {
        self.by_index
            .get(table_index)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// First vehicle that is not the empty-slot sentinel.
    pub fn primary_vehicle(&self, table_index: usize, empty_vehicle: &str) -> Option<&str> {
        self.vehicles(table_index)
            .iter()
            .map(String::as_str)
            .find(|&name| name != empty_vehicle)
    }
}
