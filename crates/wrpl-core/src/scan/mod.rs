//! Byte-level scanning: pattern search, offset reads and section discovery.

mod bytes;
pub mod pattern;
mod sections;

pub use bytes::{ByteBuffer, decode_text_lossy, decode_text_strict, is_digit_token};
pub use pattern::{BytePattern, locate, locate_all, locate_pattern};
pub use sections::{ReplaySections, SectionKind, SectionRange, locate_sections};
