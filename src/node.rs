/// Read-only tree node the converter walks.
///
/// Element tags are stored lowercased.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element { tag: String, children: Vec<Node> },
    Text(String),
    /// Comments, doctypes, processing instructions.
    Other,
}

impl Node {
    pub fn element(tag: &str, children: Vec<Node>) -> Self {
        Node::Element {
            tag: tag.to_ascii_lowercase(),
            children,
        }
    }

    pub fn text(text: impl Into<String>) -> Self {
        Node::Text(text.into())
    }

    pub fn tag(&self) -> Option<&str> {
        match self {
            Node::Element { tag, .. } => Some(tag),
            _ => None,
        }
    }

    pub fn children(&self) -> &[Node] {
        match self {
            Node::Element { children, .. } => children,
            _ => &[],
        }
    }
}

impl Drop for Node {
    fn drop(&mut self) {
        let Node::Element { children, .. } = self else {
            return;
        };
        let mut pending = std::mem::take(children);
        while let Some(mut node) = pending.pop() {
            if let Node::Element { children, .. } = &mut node {
                pending.append(children);
            }
        }
    }
}
