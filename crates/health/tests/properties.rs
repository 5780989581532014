use health::{Health, Reason, STATUS_FAILING, STATUS_OK};
use proptest::prelude::*;
use std::collections::BTreeMap;

#[derive(Debug, Clone)]
enum Op {
    Alert(Vec<String>, String),
    Resolve(Vec<String>),
}

fn key_parts() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("[a-c]{0,2}", 0..3)
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (key_parts(), "[a-z ]{0,8}").prop_map(|(parts, message)| Op::Alert(parts, message)),
        key_parts().prop_map(Op::Resolve),
    ]
}

// ── Status is exactly store emptiness ─────────────────────────────────────

proptest! {
    #[test]
    fn status_matches_model_emptiness(ops in prop::collection::vec(op(), 0..40)) {
        let health = Health::new();
        let mut model: BTreeMap<String, usize> = BTreeMap::new();

        for op in ops {
            match op {
                Op::Alert(parts, message) => {
                    *model.entry(parts.join("@")).or_default() += 1;
                    health.alert(message, &parts);
                }
                Op::Resolve(parts) => {
                    model.remove(&parts.join("@"));
                    health.resolve(&parts);
                }
            }

            let expected = if model.is_empty() { STATUS_OK } else { STATUS_FAILING };
            prop_assert_eq!(health.status(), expected);
            prop_assert_eq!(health.has_errors(), !model.is_empty());
            prop_assert_eq!(health.len(), model.values().sum::<usize>());
            prop_assert_eq!(health.response().errors.is_none(), model.is_empty());
        }
    }
}

// ── Alert followed by resolve is a round trip ─────────────────────────────

proptest! {
    #[test]
    fn alert_then_resolve_restores_errors(
        existing in prop::collection::vec((key_parts(), "[a-z]{1,6}"), 0..6),
        parts in key_parts(),
        message in "[a-z]{1,6}",
    ) {
        let health = Health::new();
        for (key, text) in &existing {
            health.alert(text.as_str(), key);
        }

        let key = parts.join("@");
        prop_assume!(!health.keys().contains(&key));

        let before = health.errors();
        health.alert(Reason::new(message).describe("probe", 1), &parts);
        health.resolve(&parts);

        prop_assert_eq!(health.errors(), before);
    }
}

// ── Resolving an unknown key changes nothing ──────────────────────────────

proptest! {
    #[test]
    fn resolve_unknown_key_is_noop(
        existing in prop::collection::vec((key_parts(), "[a-z]{1,6}"), 0..6),
        unknown in "[x-z]{1,3}",
    ) {
        let health = Health::new();
        for (key, text) in &existing {
            health.alert(text.as_str(), key);
        }

        let before = health.response();
        health.resolve([unknown.as_str()]);

        prop_assert_eq!(health.response(), before);
    }
}
