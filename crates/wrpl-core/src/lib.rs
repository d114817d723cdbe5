pub mod chat;
pub mod decoder;
pub mod error;
pub mod export;
#[doc(hidden)]
pub mod fixture;
pub mod layout;
pub mod nation;
pub mod player;
pub mod record;
pub mod report;
pub mod scan;
pub mod score;
pub mod vehicle;

pub use chat::{ChatMessage, ChatScope};
pub use decoder::ReplayDecoder;
pub use error::{Error, Result};
pub use layout::{ReplayLayout, ScoreRowLayout};
pub use nation::{NationCatalog, NationLookup, NationResolver};
pub use player::{PlayerIdentity, PlayerTable};
pub use record::{MatchRecord, PlayerRecord};
pub use report::{DecodeIssue, DecodeReport, EntryOutcome, TokenFault, WinnerFault};
pub use scan::{BytePattern, SectionKind};
pub use score::PlayerStats;
pub use vehicle::{VehicleRecord, VehicleUsage};
