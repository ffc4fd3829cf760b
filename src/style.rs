/// Inline text style flags carried by a run.
///
/// Styles only ever accumulate while descending the tree; nothing in the
/// converter clears a flag once an ancestor has set it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct StyleSet {
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub strike: bool,
}

impl StyleSet {
    pub const EMPTY: StyleSet = StyleSet {
        bold: false,
        italic: false,
        underline: false,
        strike: false,
    };

    /// Flag-wise union of two style sets.
    pub fn merge(self, other: StyleSet) -> StyleSet {
        StyleSet {
            bold: self.bold || other.bold,
            italic: self.italic || other.italic,
            underline: self.underline || other.underline,
            strike: self.strike || other.strike,
        }
    }

    pub fn is_plain(&self) -> bool {
        *self == Self::EMPTY
    }
}

/// Returns the style contribution of a single element tag.
///
/// Unknown tags contribute nothing.
pub fn resolve(tag: &str) -> StyleSet {
    let mut style = StyleSet::EMPTY;
    match tag.to_ascii_lowercase().as_str() {
        "strong" | "b" => style.bold = true,
        "em" | "i" => style.italic = true,
        "u" => style.underline = true,
        "del" | "s" => style.strike = true,
        _ => {}
    }
    style
}
