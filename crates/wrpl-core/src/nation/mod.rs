//! Vehicle to nation resolution.

mod catalog;
mod resolver;

pub use catalog::*;
pub use resolver::*;
