use html5ever::parse_document;
use html5ever::tendril::TendrilSink;
use lazy_static::lazy_static;
use markup5ever_rcdom::{Handle, NodeData, RcDom};
use regex::Regex;

use crate::node::Node;

lazy_static! {
    static ref RE_HTML_OPEN: Regex = Regex::new(r"(?i)<html[\s>]").unwrap();
}

fn html5_parse(input: &str) -> RcDom {
    parse_document(RcDom::default(), Default::default()).one(input)
}

fn tag_lower(node: &Handle) -> Option<String> {
    match &node.data {
        NodeData::Element { name, .. } => Some(name.local.to_string().to_ascii_lowercase()),
        _ => None,
    }
}

fn find_body(node: &Handle) -> Option<Handle> {
    if tag_lower(node).as_deref() == Some("body") {
        return Some(node.clone());
    }
    for c in node.children.borrow().iter() {
        if let Some(body) = find_body(c) {
            return Some(body);
        }
    }
    None
}

/// Parses editor HTML and returns the top-level nodes under `<body>`.
pub fn parse_fragment(input_html: &str) -> Vec<Node> {
    let wrapped = if RE_HTML_OPEN.is_match(input_html) {
        input_html.to_string()
    } else {
        format!(
            "<!doctype html><html><head><meta charset=\"utf-8\"></head><body>{}</body></html>",
            input_html
        )
    };

    let dom = html5_parse(&wrapped);
    let roots: Vec<Handle> = match find_body(&dom.document) {
        Some(body) => body.children.borrow().iter().cloned().collect(),
        None => dom.document.children.borrow().iter().cloned().collect(),
    };
    roots.iter().map(lower).collect()
}

enum Frame {
    Enter(Handle),
    Exit { tag: String, arity: usize },
}

/// Copies an rcdom subtree into an owned [`Node`] tree.
///
/// Uses a work stack instead of recursion; deep markup stays off the call stack.
fn lower(root: &Handle) -> Node {
    let mut work = vec![Frame::Enter(root.clone())];
    let mut done: Vec<Node> = Vec::new();

    while let Some(frame) = work.pop() {
        match frame {
            Frame::Enter(handle) => match &handle.data {
                NodeData::Text { contents } => done.push(Node::Text(contents.borrow().to_string())),
                NodeData::Element { name, .. } => {
                    let children = handle.children.borrow();
                    work.push(Frame::Exit {
                        tag: name.local.to_string().to_ascii_lowercase(),
                        arity: children.len(),
                    });
                    for c in children.iter().rev() {
                        work.push(Frame::Enter(c.clone()));
                    }
                }
                _ => done.push(Node::Other),
            },
            Frame::Exit { tag, arity } => {
                let children = done.split_off(done.len() - arity);
                done.push(Node::Element { tag, children });
            }
        }
    }

    done.pop().unwrap_or(Node::Other)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fragment_yields_body_children_in_order() {
        let nodes = parse_fragment("<h1>Title</h1><div>Body</div>");
        assert_eq!(
            nodes,
            vec![
                Node::element("h1", vec![Node::text("Title")]),
                Node::element("div", vec![Node::text("Body")]),
            ]
        );
    }

    #[test]
    fn tags_are_lowercased() {
        let nodes = parse_fragment("<P><STRONG>x</STRONG></P>");
        assert_eq!(nodes[0].tag(), Some("p"));
        assert_eq!(nodes[0].children()[0].tag(), Some("strong"));
    }

    #[test]
    fn comments_lower_to_other() {
        let nodes = parse_fragment("<p>a<!-- note -->b</p>");
        assert_eq!(
            nodes[0].children(),
            &[Node::text("a"), Node::Other, Node::text("b")]
        );
    }

    #[test]
    fn full_documents_are_accepted() {
        let nodes = parse_fragment("<html><body><p>hi</p></body></html>");
        assert_eq!(nodes, vec![Node::element("p", vec![Node::text("hi")])]);
    }

    #[test]
    fn html_tag_detection_is_anchored() {
        let nodes = parse_fragment("<HTML lang=\"ko\"><body><p>hi</p></body></HTML>");
        assert_eq!(nodes, vec![Node::element("p", vec![Node::text("hi")])]);

        let nodes = parse_fragment("<p>a</p><htmlfoo>b</htmlfoo>");
        assert_eq!(nodes.len(), 2);
        assert_eq!(nodes[1].tag(), Some("htmlfoo"));
    }

    #[test]
    fn empty_input_has_no_nodes() {
        assert!(parse_fragment("").is_empty());
    }

    #[test]
    fn deep_nesting_does_not_overflow() {
        let depth = 5_000;
        let html = format!("<b>{}x{}</b>", "<span>".repeat(depth), "</span>".repeat(depth));
        let nodes = parse_fragment(&html);
        assert_eq!(nodes.len(), 1);
        let runs = crate::runs::extract_runs(&nodes[0], crate::style::StyleSet::EMPTY);
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0].text, "x");
        assert!(runs[0].style.bold);
    }
}
