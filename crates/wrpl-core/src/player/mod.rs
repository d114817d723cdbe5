//! Player identities and the player table decoder.

mod identity;
mod table;

pub use identity::*;
pub use table::*;
