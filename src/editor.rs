use lazy_static::lazy_static;
use pulldown_cmark::{html, CowStr, Event, Options, Parser};
use regex::Regex;

lazy_static! {
    static ref RE_CODE: Regex = Regex::new(r"(?is)<code\b[^>]*>.*?</code>").unwrap();
    static ref RE_BLOCKQUOTE: Regex = Regex::new(r"(?is)<blockquote\b[^>]*>.*?</blockquote>").unwrap();
    static ref RE_BLOCK_GAP: Regex = Regex::new(r">\n+<").unwrap();
}

/// The rich-text editing surface, seen only through its content.
pub trait Editor {
    /// Current content as HTML, `None` when the editor has nothing loaded.
    fn html(&self) -> Option<String>;

    fn set_html(&mut self, html: String);

    /// Drops inline code and block quotes from the current content.
    fn sanitize(&mut self) {
        if let Some(html) = self.html() {
            self.set_html(sanitize_html(&html));
        }
    }
}

/// Removes every `<code>` and `<blockquote>` span, content included.
pub fn sanitize_html(html: &str) -> String {
    let html = RE_CODE.replace_all(html, "");
    RE_BLOCKQUOTE.replace_all(&html, "").into_owned()
}

/// Renders uploaded text the way the editor loads its initial value.
///
/// Soft line breaks become spaces and no whitespace is left between block
/// tags, so every top-level node of the result is an element.
pub fn markdown_to_editor_html(md: &str) -> String {
    let mut opts = Options::empty();
    opts.insert(Options::ENABLE_STRIKETHROUGH);
    let parser = Parser::new_ext(md, opts).map(|event| match event {
        Event::SoftBreak => Event::Text(CowStr::Borrowed(" ")),
        other => other,
    });
    let mut out = String::new();
    html::push_html(&mut out, parser);
    RE_BLOCK_GAP.replace_all(out.trim_end(), "><").into_owned()
}

/// In-memory editor state.
#[derive(Debug, Clone, Default)]
pub struct EditorBuffer {
    html: Option<String>,
}

impl EditorBuffer {
    pub fn from_markdown(text: &str) -> Self {
        Self {
            html: Some(markdown_to_editor_html(text)),
        }
    }

    pub fn from_html(html: impl Into<String>) -> Self {
        Self {
            html: Some(html.into()),
        }
    }
}

impl Editor for EditorBuffer {
    fn html(&self) -> Option<String> {
        self.html.clone()
    }

    fn set_html(&mut self, html: String) {
        self.html = Some(html);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_code_and_blockquote() {
        let html = "<p>keep <code>x = 1</code>this</p><BlockQuote class=\"q\"><p>gone</p>\n</BlockQuote><p>tail</p>";
        assert_eq!(sanitize_html(html), "<p>keep this</p><p>tail</p>");
    }

    #[test]
    fn sanitize_is_non_greedy() {
        let html = "<code>a</code>b<code>c</code>";
        assert_eq!(sanitize_html(html), "b");
    }

    #[test]
    fn markdown_has_no_gaps_between_blocks() {
        let html = markdown_to_editor_html("# Title\n\nfirst\nsecond\n\n- a\n- b\n\n1. x\n");
        assert_eq!(
            html,
            "<h1>Title</h1><p>first second</p><ul><li>a</li><li>b</li></ul><ol><li>x</li></ol>"
        );
    }

    #[test]
    fn markdown_inline_styles() {
        let html = markdown_to_editor_html("**b** *i* ~~s~~");
        assert_eq!(html, "<p><strong>b</strong> <em>i</em> <del>s</del></p>");
    }

    #[test]
    fn plain_text_is_escaped() {
        let html = markdown_to_editor_html("a < b & c");
        assert_eq!(html, "<p>a &lt; b &amp; c</p>");
    }

    #[test]
    fn empty_buffer_has_no_content() {
        let mut editor = EditorBuffer::default();
        assert_eq!(editor.html(), None);
        editor.sanitize();
        assert_eq!(editor.html(), None);
    }

    #[test]
    fn sanitize_goes_through_set_html() {
        let mut editor = EditorBuffer::from_markdown("text `code` more\n\n> quoted\n");
        editor.sanitize();
        let html = editor.html().unwrap();
        assert!(!html.contains("code"));
        assert!(!html.contains("quoted"));
        assert!(html.contains("text"));
    }
}
