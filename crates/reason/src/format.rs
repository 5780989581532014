//! Reason Flattening
//!
//! Walks a reason tree depth-first and renders it as one line:
//! `outer<delimiter>inner [key=value] ...`. Sibling causes are joined
//! with `"; "`. The walk keeps its own work stack, so arbitrarily deep
//! chains are rendered without recursion.

use crate::reason::{Context, Nested, Node, Reason};

/// Default hierarchy delimiter
pub const DELIMITER_UNICODE: &str = " → ";
/// Plain ASCII hierarchy delimiter
pub const DELIMITER_ASCII: &str = ": ";
/// Separator between formatted sibling causes
pub const SIBLING_SEPARATOR: &str = "; ";

/// Renders reasons with a fixed hierarchy delimiter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Formatter {
    delimiter: String,
}

/// Pending work for the explicit walk
enum Step<'a> {
    /// Render this reason and push its text onto the value stack
    Visit(&'a Reason),
    /// Pop the rendered cause and prefix it with the node's message
    Wrap(&'a Node),
    /// Pop `count` rendered siblings and join them
    Join(&'a Node, usize),
}

impl Formatter {
    /// Create a formatter with the given hierarchy delimiter
    pub fn new(delimiter: impl Into<String>) -> Self {
        Self {
            delimiter: delimiter.into(),
        }
    }

    /// Formatter using the plain ASCII delimiter
    pub fn ascii() -> Self {
        Self::new(DELIMITER_ASCII)
    }

    pub fn delimiter(&self) -> &str {
        &self.delimiter
    }

    /// Flatten a reason tree into a single line
    pub fn format(&self, reason: &Reason) -> String {
        let mut steps = vec![Step::Visit(reason)];
        let mut values: Vec<String> = Vec::new();

        while let Some(step) = steps.pop() {
            match step {
                Step::Visit(Reason::Opaque(text)) => values.push(text.clone()),
                Step::Visit(Reason::Node(node)) => match &node.nested {
                    None => values.push(with_context(node.message.clone(), &node.context)),
                    Some(Nested::Single(inner)) => {
                        steps.push(Step::Wrap(node));
                        steps.push(Step::Visit(&**inner));
                    }
                    Some(Nested::Siblings(siblings)) => {
                        steps.push(Step::Join(node, siblings.len()));
                        // reversed so siblings are rendered, and land on the stack, in order
                        steps.extend(siblings.iter().rev().map(Step::Visit));
                    }
                },
                Step::Wrap(node) => {
                    let inner = values.pop().unwrap_or_default();
                    let message = if node.message.is_empty() {
                        inner
                    } else {
                        format!("{}{}{}", node.message, self.delimiter, inner)
                    };
                    values.push(with_context(message, &node.context));
                }
                Step::Join(node, count) => {
                    let rendered = values.split_off(values.len().saturating_sub(count));
                    let message = rendered.join(SIBLING_SEPARATOR);
                    values.push(with_context(message, &node.context));
                }
            }
        }

        values.pop().unwrap_or_default()
    }
}

impl Default for Formatter {
    fn default() -> Self {
        Self::new(DELIMITER_UNICODE)
    }
}

fn with_context(mut message: String, context: &Context) -> String {
    if context.is_empty() {
        return message;
    }

    let pairs: Vec<String> = context
        .iter()
        .map(|(key, value)| format!("[{}={}]", key, value))
        .collect();

    message.push(' ');
    message.push_str(&pairs.join(" "));
    message
}
