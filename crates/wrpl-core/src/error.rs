use thiserror::Error;

use crate::scan::SectionKind;

/// Fatal decode errors. Anything recoverable is reported as a
/// [`DecodeIssue`](crate::report::DecodeIssue) instead.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Malformed or unsupported replay: marker for the {section} section not found")]
    MarkerNotFound { section: SectionKind },

    #[error(
        "Malformed or unsupported replay: {section} section needs {needed} bytes, only {available} available"
    )]
    SectionTruncated {
        section: SectionKind,
        needed: usize,
        available: usize,
    },

    #[error("Read of {len} bytes at offset {offset} exceeds buffer length {available}")]
    OutOfBounds {
        offset: usize,
        len: usize,
        available: usize,
    },

    #[error("Table index {index} is out of range for {count} players")]
    TableIndexOutOfRange { index: usize, count: usize },

    #[error("Table index {0} is assigned to more than one player")]
    DuplicateTableIndex(usize),

    #[error("Invalid byte pattern: {0}")]
    InvalidPattern(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
