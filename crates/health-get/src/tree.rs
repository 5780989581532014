//! Tree Rendering
//!
//! Lays a health document out as an indented tree. Each formatted error is
//! parsed back into its chain, one level per hierarchy segment, with
//! context pairs as leaves of the innermost cause.

use health::Response;
use reason::{Nested, Reason};

const BOLD_GREEN: &str = "\x1b[1;32m";
const BOLD_RED: &str = "\x1b[1;31m";
const RESET: &str = "\x1b[0m";

struct TreeNode {
    label: String,
    children: Vec<TreeNode>,
}

impl TreeNode {
    fn leaf(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            children: Vec::new(),
        }
    }

    fn from_reason(reason: &Reason) -> Self {
        let mut children = Vec::new();
        match reason.nested() {
            Some(Nested::Single(inner)) => children.push(Self::from_reason(inner)),
            Some(Nested::Siblings(siblings)) => {
                children.extend(siblings.iter().map(Self::from_reason))
            }
            None => {}
        }
        if let Some(context) = reason.context() {
            children.extend(
                context
                    .iter()
                    .map(|(key, value)| Self::leaf(format!("{}: {}", key, value))),
            );
        }

        Self {
            label: reason.message().to_string(),
            children,
        }
    }

    fn write_children(&self, prefix: &str, lines: &mut Vec<String>) {
        for (index, child) in self.children.iter().enumerate() {
            let last = index + 1 == self.children.len();
            let (branch, indent) = if last { ("└─ ", "   ") } else { ("├─ ", "│  ") };

            lines.push(format!("{}{}{}", prefix, branch, child.label));
            child.write_children(&format!("{}{}", prefix, indent), lines);
        }
    }
}

fn paint(text: &str, color: &str) -> String {
    format!("{}{}{}", color, text, RESET)
}

/// Render `response`, fetched from `target`, as a coloured tree.
///
/// `delimiter` must be the one the serving aggregator formatted with.
pub fn render(target: &str, response: &Response, delimiter: &str) -> String {
    let mut children = Vec::new();

    if response.is_healthy() {
        children.push(TreeNode::leaf(format!("status: {}", paint("ok", BOLD_GREEN))));
    } else {
        children.push(TreeNode::leaf(format!("status: {}", paint("error", BOLD_RED))));

        let errors = response.errors.as_deref().unwrap_or_default();
        children.push(TreeNode {
            label: format!("errors: {}", errors.len()),
            children: errors
                .iter()
                .map(|row| TreeNode::from_reason(&reason::parse(row, delimiter)))
                .collect(),
        });
    }

    let root = TreeNode {
        label: target.to_string(),
        children,
    };

    let mut lines = vec![root.label.clone()];
    root.write_children("", &mut lines);
    lines.join("\n")
}
