//! Formatted Line Parsing
//!
//! Reads a line produced by [`Formatter`](crate::Formatter) back into a
//! reason chain: `[key=value]` fragments become the context of the
//! innermost node and the remaining text is split on the delimiter.
//! Sibling lists are not recovered; `"; "` is not escaped in the line.

use regex::Regex;
use std::sync::OnceLock;

use crate::reason::{Context, Node, Reason};

fn context_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"\[(?P<key>[^=\]]+)=(?P<value>[^\]]+)\]")
            .expect("context pattern is a valid regex")
    })
}

/// Parse a formatted line using the given hierarchy delimiter
pub fn parse(row: &str, delimiter: &str) -> Reason {
    let pattern = context_pattern();

    let mut context = Context::new();
    for captures in pattern.captures_iter(row) {
        context.push(&captures["key"], &captures["value"]);
    }
    let message = pattern.replace_all(row, "");

    let segments: Vec<&str> = if delimiter.is_empty() {
        vec![&*message]
    } else {
        message.split(delimiter).collect()
    };

    let mut segments = segments.into_iter().rev().map(str::trim);
    let innermost = segments.next().unwrap_or_default();

    let reason = Reason::Node(Node {
        message: innermost.to_string(),
        context,
        nested: None,
    });

    segments.fold(reason, |inner, segment| Reason::new(segment).reason(inner))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Formatter, Nested, DELIMITER_UNICODE};

    #[test]
    fn test_parse_plain_message() {
        assert_eq!(
            parse("time is a flat circle", DELIMITER_UNICODE),
            Reason::new("time is a flat circle")
        );
    }

    #[test]
    fn test_parse_chain_with_context() {
        let reason = parse("can't sync → connection refused [host=db1] [port=5432]", " → ");

        assert_eq!(reason.message(), "can't sync");
        let inner = match reason.nested() {
            Some(Nested::Single(inner)) => inner,
            other => panic!("unexpected nested reason: {:?}", other),
        };
        assert_eq!(inner.message(), "connection refused");
        let pairs: Vec<_> = inner.context().unwrap().iter().collect();
        assert_eq!(pairs, vec![("host", "db1"), ("port", "5432")]);
    }

    #[test]
    fn test_parse_inverts_format_for_chains() {
        let formatter = Formatter::new(": ");
        let original = Reason::new("a")
            .reason(Reason::new("b").reason(Reason::new("c").describe("real", "talk")));

        let line = formatter.format(&original);
        assert_eq!(parse(&line, formatter.delimiter()), original);
    }

    #[test]
    fn test_parse_empty_delimiter_keeps_line() {
        let reason = parse("a: b", "");
        assert_eq!(reason, Reason::new("a: b"));
    }

    #[test]
    fn test_parse_empty_row() {
        assert_eq!(parse("", DELIMITER_UNICODE), Reason::new(""));
    }
}
