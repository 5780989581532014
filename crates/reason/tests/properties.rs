use proptest::prelude::*;
use reason::{parse, Formatter, Reason, DELIMITER_ASCII, DELIMITER_UNICODE, SIBLING_SEPARATOR};

fn message() -> impl Strategy<Value = String> {
    "[a-z][a-z ]{0,10}[a-z]"
}

fn pairs() -> impl Strategy<Value = Vec<(String, String)>> {
    prop::collection::vec(("[a-z]{1,5}", "[a-z0-9]{1,5}"), 0..3)
}

/// Chain of single causes, outermost first, context only on the innermost
fn chain(messages: &[String], context: &[(String, String)]) -> Reason {
    let (innermost, outer) = messages.split_last().expect("at least one message");
    let mut reason = Reason::new(innermost.as_str());
    for (key, value) in context {
        reason = reason.describe(key.as_str(), value);
    }
    outer
        .iter()
        .rev()
        .fold(reason, |inner, message| Reason::new(message.as_str()).reason(inner))
}

// ── Formatted chains parse back into the same tree ────────────────────────

proptest! {
    #[test]
    fn parse_inverts_format_for_chains(
        messages in prop::collection::vec(message(), 1..6),
        context in pairs(),
        ascii in any::<bool>(),
    ) {
        let delimiter = if ascii { DELIMITER_ASCII } else { DELIMITER_UNICODE };
        prop_assume!(messages.iter().all(|m| !m.contains(delimiter.trim())));

        let original = chain(&messages, &context);
        let line = Formatter::new(delimiter).format(&original);

        prop_assert_eq!(parse(&line, delimiter), original);
    }
}

// ── Segment and pair counts survive flattening ────────────────────────────

proptest! {
    #[test]
    fn format_emits_every_segment_and_pair(
        messages in prop::collection::vec(message(), 1..6),
        context in pairs(),
    ) {
        let line = Formatter::new(" | ").format(&chain(&messages, &context));

        prop_assert_eq!(line.matches(" | ").count(), messages.len() - 1);
        prop_assert_eq!(line.matches('[').count(), context.len());
    }

    #[test]
    fn siblings_are_joined_in_order(leaves in prop::collection::vec(message(), 1..5)) {
        let fanout = Reason::push("", leaves.iter().map(|leaf| Reason::from(leaf.as_str())));
        let line = Formatter::default().format(&fanout);

        prop_assert_eq!(line, leaves.join(SIBLING_SEPARATOR));
    }
}
