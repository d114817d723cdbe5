//! Vehicle usage and match outcome.

mod outcome;
mod records;

pub use outcome::*;
pub use records::*;
