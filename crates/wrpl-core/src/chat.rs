//! Chat message extraction.
//!
//! Chat records have no section of their own. They are found by scanning the
//! whole buffer for a short marker followed by
//!
//! ```text
//! [name len u8] [name] [body len u8] [body] [scope u8]
//! ```
//!
//! The marker is short enough to match unrelated bytes, so a candidate is only
//! kept when its name is a player from the player table.

use serde::Serialize;
use strum::{Display, IntoStaticStr};
use tracing::{debug, trace};

use crate::player::PlayerTable;
use crate::scan::{ByteBuffer, BytePattern, decode_text_lossy, decode_text_strict, locate_all};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display, IntoStaticStr)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ChatScope {
    All,
    Team,
    Squad,
    /// The scope byte lies past the end of the buffer.
    Unknown,
}

impl ChatScope {
    pub fn from_byte(value: u8) -> Self {
        match value {
            1 => Self::All,
            2 => Self::Squad,
            _ => Self::Team,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatMessage {
    pub speaker: String,
    pub body: String,
    pub scope: ChatScope,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChatScan {
    /// Accepted messages in buffer order. Not necessarily chronological, and
    /// overlapping marker matches may yield duplicates.
    pub messages: Vec<ChatMessage>,
    /// Candidates discarded because the speaker is not a known player.
    pub unmatched: usize,
}

pub fn extract_messages(buffer: &[u8], marker: &BytePattern, players: &PlayerTable) -> ChatScan {
    let mut scan = ChatScan::default();

    for offset in locate_all(buffer, marker) {
        match decode_candidate(buffer, offset + marker.len()) {
            Some(message) if players.by_name(&message.speaker).is_some() => {
                scan.messages.push(message);
            }
            _ => {
                trace!("Discarding chat candidate at {:#x}", offset);
                scan.unmatched += 1;
            }
        }
    }

    debug!(
        "Chat scan: {} messages, {} unmatched candidates",
        scan.messages.len(),
        scan.unmatched
    );
    scan
}

/// Decode a chat record whose name length byte is at `start`.
pub fn decode_candidate(buffer: &[u8], start: usize) -> Option<ChatMessage> {
    let mut buf = ByteBuffer::at(buffer, start).ok()?;

    let speaker = decode_text_strict(buf.read_length_prefixed().ok()?)?.into_owned();
    let body = decode_text_lossy(buf.read_length_prefixed().ok()?);
    let scope = match buf.read_u8() {
        Ok(value) => ChatScope::from_byte(value),
        Err(_) => ChatScope::Unknown,
    };

    Some(ChatMessage {
        speaker,
        body,
        scope,
    })
}
