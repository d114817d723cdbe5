//! Score table: per-player counters decoded from fixed-stride rows.

mod rows;
mod stats;

pub use rows::*;
pub use stats::*;
