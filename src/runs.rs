use crate::node::Node;
use crate::style::{resolve, StyleSet};

pub const DEFAULT_FONT: &str = "맑은 고딕";
/// Half-points (10pt).
pub const DEFAULT_SIZE: u32 = 20;

/// A span of text sharing one exact style.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextRun {
    pub text: String,
    pub style: StyleSet,
    pub font: &'static str,
    pub size: u32,
}

impl TextRun {
    pub fn new(text: impl Into<String>, style: StyleSet) -> Self {
        Self {
            text: text.into(),
            style,
            font: DEFAULT_FONT,
            size: DEFAULT_SIZE,
        }
    }
}

/// Flattens a subtree into styled runs, one per text leaf, in document order.
///
/// Each element merges its own contribution into the style inherited from its
/// ancestors before its children are visited. Empty text nodes still produce
/// a run.
pub fn extract_runs(node: &Node, inherited: StyleSet) -> Vec<TextRun> {
    let mut runs = Vec::new();
    let mut stack: Vec<(&Node, StyleSet)> = vec![(node, inherited)];

    while let Some((node, style)) = stack.pop() {
        match node {
            Node::Text(text) => runs.push(TextRun::new(text.as_str(), style)),
            Node::Element { tag, children } => {
                let child_style = style.merge(resolve(tag));
                stack.extend(children.iter().rev().map(|c| (c, child_style)));
            }
            Node::Other => {}
        }
    }

    runs
}
