use log::debug;

use crate::block::{convert_top_level, ListKind, Paragraph, LIST_LEVEL};
use crate::html::parse_fragment;
use crate::node::Node;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberFormat {
    Bullet,
    Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alignment {
    Start,
}

/// A named list marker scheme that list paragraphs refer to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumberingDefinition {
    pub reference: &'static str,
    pub kind: ListKind,
    pub level: u32,
    pub format: NumberFormat,
    pub text: &'static str,
    pub alignment: Alignment,
}

pub const BULLET_LIST: NumberingDefinition = NumberingDefinition {
    reference: "bullet-list",
    kind: ListKind::Bullet,
    level: LIST_LEVEL,
    format: NumberFormat::Bullet,
    text: "•",
    alignment: Alignment::Start,
};

pub const NUMBER_LIST: NumberingDefinition = NumberingDefinition {
    reference: "number-list",
    kind: ListKind::Decimal,
    level: LIST_LEVEL,
    format: NumberFormat::Decimal,
    text: "%1.",
    alignment: Alignment::Start,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub numbering: [NumberingDefinition; 2],
    pub paragraphs: Vec<Paragraph>,
}

impl Document {
    pub fn new(paragraphs: Vec<Paragraph>) -> Self {
        Self {
            numbering: [BULLET_LIST, NUMBER_LIST],
            paragraphs,
        }
    }

    /// Position of the definition for `kind` in [`Document::numbering`].
    pub fn numbering_index(&self, kind: ListKind) -> usize {
        match kind {
            ListKind::Bullet => 0,
            ListKind::Decimal => 1,
        }
    }

    pub fn numbering_for(&self, kind: ListKind) -> &NumberingDefinition {
        &self.numbering[self.numbering_index(kind)]
    }
}

/// Converts every top-level node in order and collects the paragraphs.
pub fn build_document(nodes: &[Node]) -> Document {
    let paragraphs: Vec<Paragraph> = nodes.iter().flat_map(convert_top_level).collect();
    debug!(
        "assembled {} paragraphs from {} top-level nodes",
        paragraphs.len(),
        nodes.len()
    );
    Document::new(paragraphs)
}

pub fn build_document_from_html(html: &str) -> Document {
    build_document(&parse_fragment(html))
}
