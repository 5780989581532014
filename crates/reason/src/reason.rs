//! Reason Tree Types

use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};
use std::error::Error;
use std::fmt;

use crate::format::Formatter;

/// Ordered key/value pairs attached to a single reason node
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Context {
    pairs: Vec<(String, String)>,
}

impl Context {
    /// Create an empty context
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a pair, keeping attachment order
    pub fn push(&mut self, key: impl Into<String>, value: impl ToString) {
        self.pairs.push((key.into(), value.to_string()));
    }

    /// Iterate pairs in attachment order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

impl Serialize for Context {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.pairs.len()))?;
        for (key, value) in &self.pairs {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// What a node was caused by
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Nested {
    /// A single underlying cause
    Single(Box<Reason>),
    /// Several parallel causes fanned out from one failure
    Siblings(Vec<Reason>),
}

impl Drop for Nested {
    // Unlinks the chain iteratively; the derived drop would recurse once per level.
    fn drop(&mut self) {
        let mut pending = match self {
            Nested::Single(reason) => vec![std::mem::take(&mut **reason)],
            Nested::Siblings(reasons) => std::mem::take(reasons),
        };

        while let Some(reason) = pending.pop() {
            if let Reason::Node(mut node) = reason {
                if let Some(mut nested) = node.nested.take() {
                    match &mut nested {
                        Nested::Single(inner) => pending.push(std::mem::take(&mut **inner)),
                        Nested::Siblings(siblings) => pending.append(siblings),
                    }
                }
            }
        }
    }
}

/// Structured reason: a message, its context and an optional cause
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Node {
    pub message: String,
    pub context: Context,
    pub nested: Option<Nested>,
}

impl Serialize for Node {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serialize_node(self, 0, serializer)
    }
}

/// A reported failure.
///
/// Either an opaque error known only by its display string, or a structured
/// node that may wrap further reasons. Opaque reasons serialize as plain
/// strings, nodes as `{"message", "context", "reason"}` objects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reason {
    Opaque(String),
    Node(Node),
}

impl Reason {
    /// Start a structured reason with the given message
    pub fn new(message: impl Into<String>) -> Self {
        Reason::Node(Node {
            message: message.into(),
            ..Default::default()
        })
    }

    /// Structured reason fanning out into several sibling causes
    pub fn push(message: impl Into<String>, reasons: impl IntoIterator<Item = Reason>) -> Self {
        Reason::Node(Node {
            message: message.into(),
            context: Context::new(),
            nested: Some(Nested::Siblings(reasons.into_iter().collect())),
        })
    }

    /// Attach a context pair.
    ///
    /// An opaque reason is promoted to a node with the opaque text as its
    /// message, so the rendered output is the same text plus the pair.
    pub fn describe(self, key: impl Into<String>, value: impl ToString) -> Self {
        let mut node = self.into_node();
        node.context.push(key, value);
        Reason::Node(node)
    }

    /// Set the single underlying cause of this reason
    pub fn reason(self, nested: impl Into<Reason>) -> Self {
        let mut node = self.into_node();
        node.nested = Some(Nested::Single(Box::new(nested.into())));
        Reason::Node(node)
    }

    /// Opaque reason carrying only the error's display string
    pub fn from_error(err: &dyn Error) -> Self {
        Reason::Opaque(err.to_string())
    }

    /// Structured chain following `Error::source` links.
    ///
    /// Each error in the chain becomes a node whose cause is the next one.
    pub fn from_error_chain(err: &dyn Error) -> Self {
        let mut messages = vec![err.to_string()];
        let mut source = err.source();
        while let Some(next) = source {
            messages.push(next.to_string());
            source = next.source();
        }

        let mut chain: Option<Reason> = None;
        for message in messages.into_iter().rev() {
            let node = Reason::new(message);
            chain = Some(match chain {
                Some(inner) => node.reason(inner),
                None => node,
            });
        }
        chain.unwrap_or_default()
    }

    /// Message of a node, or the text of an opaque reason
    pub fn message(&self) -> &str {
        match self {
            Reason::Opaque(text) => text,
            Reason::Node(node) => &node.message,
        }
    }

    /// Context pairs of a node; opaque reasons have none
    pub fn context(&self) -> Option<&Context> {
        match self {
            Reason::Opaque(_) => None,
            Reason::Node(node) => Some(&node.context),
        }
    }

    /// Cause of a node, if any
    pub fn nested(&self) -> Option<&Nested> {
        match self {
            Reason::Opaque(_) => None,
            Reason::Node(node) => node.nested.as_ref(),
        }
    }

    fn into_node(self) -> Node {
        match self {
            Reason::Node(node) => node,
            Reason::Opaque(text) => Node {
                message: text,
                ..Default::default()
            },
        }
    }
}

impl Default for Reason {
    /// Missing cause: an empty opaque reason
    fn default() -> Self {
        Reason::Opaque(String::new())
    }
}

impl From<&str> for Reason {
    fn from(text: &str) -> Self {
        Reason::Opaque(text.to_string())
    }
}

impl From<String> for Reason {
    fn from(text: String) -> Self {
        Reason::Opaque(text)
    }
}

impl From<Node> for Reason {
    fn from(node: Node) -> Self {
        Reason::Node(node)
    }
}

impl From<Option<Reason>> for Reason {
    fn from(reason: Option<Reason>) -> Self {
        reason.unwrap_or_default()
    }
}

impl fmt::Display for Reason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&Formatter::default().format(self))
    }
}

impl Serialize for Reason {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        Bounded {
            reason: self,
            depth: 0,
        }
        .serialize(serializer)
    }
}

/// Nesting depth at which the rest of a tree is serialized as its
/// formatted line. Objects and sibling arrays each count one level, which
/// keeps the output readable by serde_json's 128-level recursion limit.
pub const MAX_SERIALIZE_DEPTH: usize = 100;

struct Bounded<'a> {
    reason: &'a Reason,
    depth: usize,
}

impl Serialize for Bounded<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.reason {
            Reason::Opaque(text) => serializer.serialize_str(text),
            Reason::Node(_) if self.depth >= MAX_SERIALIZE_DEPTH => {
                serializer.serialize_str(&Formatter::default().format(self.reason))
            }
            Reason::Node(node) => serialize_node(node, self.depth, serializer),
        }
    }
}

struct BoundedSiblings<'a> {
    siblings: &'a [Reason],
    depth: usize,
}

impl Serialize for BoundedSiblings<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.siblings.len()))?;
        for reason in self.siblings {
            seq.serialize_element(&Bounded {
                reason,
                depth: self.depth + 1,
            })?;
        }
        seq.end()
    }
}

fn serialize_node<S: Serializer>(node: &Node, depth: usize, serializer: S) -> Result<S::Ok, S::Error> {
    let len = 1 + usize::from(!node.context.is_empty()) + usize::from(node.nested.is_some());
    let mut map = serializer.serialize_map(Some(len))?;

    map.serialize_entry("message", &node.message)?;
    if !node.context.is_empty() {
        map.serialize_entry("context", &node.context)?;
    }
    match &node.nested {
        Some(Nested::Single(inner)) => map.serialize_entry(
            "reason",
            &Bounded {
                reason: inner,
                depth: depth + 1,
            },
        )?,
        Some(Nested::Siblings(siblings)) => map.serialize_entry(
            "reason",
            &BoundedSiblings {
                siblings,
                depth: depth + 1,
            },
        )?,
        None => {}
    }

    map.end()
}
