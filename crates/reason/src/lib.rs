//! Failure Reasons
//!
//! Provides the reason tree recorded by health reporters, the formatter that
//! flattens it into one delimited line, and the parser that reads such a
//! line back into a chain.

mod format;
mod parse;
mod reason;

pub use format::{Formatter, DELIMITER_ASCII, DELIMITER_UNICODE, SIBLING_SEPARATOR};
pub use parse::parse;
pub use reason::{Context, Nested, Node, Reason, MAX_SERIALIZE_DEPTH};
