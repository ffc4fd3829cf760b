use crate::node::Node;
use crate::runs::{extract_runs, TextRun};
use crate::style::StyleSet;

/// Nested lists are not supported; every list paragraph sits on this level.
pub const LIST_LEVEL: u32 = 0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListKind {
    Bullet,
    Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListMembership {
    pub kind: ListKind,
    pub level: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paragraph {
    pub runs: Vec<TextRun>,
    pub list: Option<ListMembership>,
}

impl Paragraph {
    pub fn plain(runs: Vec<TextRun>) -> Self {
        Self { runs, list: None }
    }

    pub fn list_item(runs: Vec<TextRun>, kind: ListKind) -> Self {
        Self {
            runs,
            list: Some(ListMembership {
                kind,
                level: LIST_LEVEL,
            }),
        }
    }

    /// Concatenated text of all runs.
    pub fn text(&self) -> String {
        self.runs.iter().map(|r| r.text.as_str()).collect()
    }
}

/// How a top-level node turns into paragraphs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    List(ListKind),
    /// Everything else, headings and quotes included, becomes one plain paragraph.
    Generic,
}

impl BlockKind {
    pub fn classify(node: &Node) -> Self {
        match node.tag().map(str::to_ascii_lowercase).as_deref() {
            Some("ul") => BlockKind::List(ListKind::Bullet),
            Some("ol") => BlockKind::List(ListKind::Decimal),
            _ => BlockKind::Generic,
        }
    }
}

/// Converts one top-level node into zero or more paragraphs.
///
/// Only direct `li` children of a list are kept; anything else inside a
/// `ul`/`ol` is dropped.
pub fn convert_top_level(node: &Node) -> Vec<Paragraph> {
    match BlockKind::classify(node) {
        BlockKind::List(kind) => node
            .children()
            .iter()
            .filter(|c| c.tag().is_some_and(|t| t.eq_ignore_ascii_case("li")))
            .map(|li| Paragraph::list_item(extract_runs(li, StyleSet::EMPTY), kind))
            .collect(),
        BlockKind::Generic => vec![Paragraph::plain(extract_runs(node, StyleSet::EMPTY))],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn el(tag: &str, children: Vec<Node>) -> Node {
        Node::element(tag, children)
    }

    fn li(text: &str) -> Node {
        el("li", vec![Node::text(text)])
    }

    #[test]
    fn bullet_list_yields_one_paragraph_per_item() {
        let ul = el("ul", vec![li("a"), li("b")]);
        let paragraphs = convert_top_level(&ul);
        assert_eq!(paragraphs.len(), 2);
        assert_eq!(paragraphs[0].text(), "a");
        assert_eq!(paragraphs[1].text(), "b");
        for p in &paragraphs {
            assert_eq!(
                p.list,
                Some(ListMembership {
                    kind: ListKind::Bullet,
                    level: 0
                })
            );
        }
    }

    #[test]
    fn ordered_list_references_decimal() {
        let paragraphs = convert_top_level(&el("ol", vec![li("x")]));
        assert_eq!(paragraphs.len(), 1);
        assert_eq!(paragraphs[0].list.map(|l| l.kind), Some(ListKind::Decimal));
    }

    #[test]
    fn non_li_list_children_are_dropped() {
        let ul = el(
            "ul",
            vec![Node::text("\n"), li("a"), el("p", vec![Node::text("stray")]), Node::Other, li("b")],
        );
        let texts: Vec<String> = convert_top_level(&ul).iter().map(Paragraph::text).collect();
        assert_eq!(texts, ["a", "b"]);
    }

    #[test]
    fn empty_list_yields_nothing() {
        assert!(convert_top_level(&el("ol", vec![])).is_empty());
    }

    #[test]
    fn list_items_keep_inline_styles() {
        let ul = el("ul", vec![el("li", vec![el("strong", vec![Node::text("bold")])])]);
        let paragraphs = convert_top_level(&ul);
        assert!(paragraphs[0].runs[0].style.bold);
    }

    // Headings are flattened on purpose: no heading style survives conversion.
    #[test]
    fn headings_and_quotes_flatten_to_plain_paragraphs() {
        for tag in ["h1", "h2", "blockquote", "div", "p"] {
            let paragraphs = convert_top_level(&el(tag, vec![Node::text("t")]));
            assert_eq!(paragraphs.len(), 1);
            assert_eq!(paragraphs[0].list, None);
            assert!(paragraphs[0].runs[0].style.is_plain());
        }
    }

    #[test]
    fn nested_lists_flatten_into_the_outer_item() {
        let ul = el(
            "ul",
            vec![el("li", vec![Node::text("outer"), el("ol", vec![li("inner")])])],
        );
        let paragraphs = convert_top_level(&ul);
        assert_eq!(paragraphs.len(), 1);
        assert_eq!(paragraphs[0].text(), "outerinner");
        assert_eq!(paragraphs[0].list.map(|l| l.kind), Some(ListKind::Bullet));
    }

    #[test]
    fn top_level_text_is_wrapped() {
        let paragraphs = convert_top_level(&Node::text("loose"));
        assert_eq!(paragraphs, vec![Paragraph::plain(vec![TextRun::new("loose", StyleSet::EMPTY)])]);
    }

    #[test]
    fn top_level_comment_is_an_empty_paragraph() {
        assert_eq!(convert_top_level(&Node::Other), vec![Paragraph::plain(Vec::new())]);
    }

    #[test]
    fn classification() {
        assert_eq!(BlockKind::classify(&el("ul", vec![])), BlockKind::List(ListKind::Bullet));
        assert_eq!(BlockKind::classify(&el("ol", vec![])), BlockKind::List(ListKind::Decimal));
        assert_eq!(BlockKind::classify(&el("li", vec![])), BlockKind::Generic);
        assert_eq!(BlockKind::classify(&Node::Other), BlockKind::Generic);
    }
}
