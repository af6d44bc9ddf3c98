//! Terminal color escapes and width-aware justification.
//!
//! Padding is computed from the visible width of a cell: escape sequences
//! are stripped and the remaining text is measured in terminal columns. A
//! styled cell and a plain cell padded to the same width therefore occupy
//! the same number of columns.

use std::sync::OnceLock;

use regex::Regex;
use unicode_width::UnicodeWidthStr;

const ESC_RESET: &str = "\x1B[0m";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
}

impl Color {
    fn escape(self) -> &'static str {
        match self {
            Color::Red => "\x1B[31m",
            Color::Green => "\x1B[32m",
            Color::Yellow => "\x1B[33m",
            Color::Blue => "\x1B[34m",
            Color::Magenta => "\x1B[35m",
            Color::Cyan => "\x1B[36m",
            Color::White => "\x1B[37m",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Attr {
    Bold,
}

impl Attr {
    fn escape(self) -> &'static str {
        match self {
            Attr::Bold => "\x1B[1m",
        }
    }
}

/// Color and attributes applied to one cell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Style {
    pub color: Option<Color>,
    pub attrs: &'static [Attr],
}

impl Style {
    pub const PLAIN: Style = Style {
        color: None,
        attrs: &[],
    };

    pub fn bold(color: Color) -> Self {
        Style {
            color: Some(color),
            attrs: &[Attr::Bold],
        }
    }

    pub fn is_plain(&self) -> bool {
        self.color.is_none() && self.attrs.is_empty()
    }

    /// Wrap `text` in this style's escapes. A plain style returns the text
    /// unchanged, with no reset.
    pub fn paint(&self, text: &str) -> String {
        if self.is_plain() {
            return text.to_string();
        }

        let mut out = String::with_capacity(text.len() + 16);
        if let Some(color) = self.color {
            out.push_str(color.escape());
        }
        for attr in self.attrs {
            out.push_str(attr.escape());
        }
        out.push_str(text);
        out.push_str(ESC_RESET);
        out
    }
}

fn escape_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"\x1B\[[0-9;:?]*[ -/]*[@-~]").expect("escape pattern is valid")
    })
}

/// Number of terminal columns `s` occupies once escape sequences are removed.
pub fn visible_width(s: &str) -> usize {
    escape_pattern().replace_all(s, "").width()
}

/// Left-justify `s` to `width` visible columns. Wider text is left as is.
pub fn ljust(s: &str, width: usize) -> String {
    let pad = width.saturating_sub(visible_width(s));
    let mut out = String::with_capacity(s.len() + pad);
    out.push_str(s);
    out.extend(std::iter::repeat(' ').take(pad));
    out
}

/// Render one display cell: `text` painted with `style`, padded to `width`
/// visible columns.
pub fn cell(text: &str, style: Style, width: usize) -> String {
    ljust(&style.paint(text), width)
}
