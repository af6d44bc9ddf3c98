//! Syntax highlighting of the blamed file's content.
//!
//! A highlighter turns raw file bytes into display strings, one per line,
//! with color escapes already embedded. The language is picked from the
//! file name suffix; unrecognized files are passed through undecorated.

use std::path::Path;

use syntect::easy::HighlightLines;
use syntect::highlighting::{Theme, ThemeSet};
use syntect::parsing::SyntaxSet;
use syntect::util::{as_24_bit_terminal_escaped, LinesWithEndings};

use crate::error::{Error, Result};

pub const DEFAULT_THEME: &str = "base16-ocean.dark";

const C_FAMILY_SUFFIXES: &[&str] = &["c", "cc", "cpp", "h", "hh", "hpp"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    CFamily,
    Python,
    Plain,
}

impl Language {
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if C_FAMILY_SUFFIXES.contains(&ext) => Language::CFamily,
            Some("py") => Language::Python,
            _ => Language::Plain,
        }
    }

    /// Extension used to look the grammar up in syntect's default set.
    fn syntax_extension(self) -> Option<&'static str> {
        match self {
            Language::CFamily => Some("cpp"),
            Language::Python => Some("py"),
            Language::Plain => None,
        }
    }

    /// Build the highlighter for this language. The theme name is checked
    /// for every language, including plain text which never uses it.
    pub fn highlighter(self, theme: &str) -> Result<Box<dyn Highlighter>> {
        let theme = load_theme(theme)?;
        match self.syntax_extension() {
            Some(extension) => Ok(Box::new(SyntectHighlighter::new(extension, theme))),
            None => Ok(Box::new(PlainText)),
        }
    }
}

pub trait Highlighter {
    /// Render `code` as one display string per line.
    fn highlight(&self, code: &[u8]) -> Result<Vec<String>>;
}

/// Decodes the content and splits it into lines, adding no color.
#[derive(Debug, Default, Clone, Copy)]
pub struct PlainText;

impl Highlighter for PlainText {
    fn highlight(&self, code: &[u8]) -> Result<Vec<String>> {
        Ok(String::from_utf8_lossy(code)
            .lines()
            .map(str::to_string)
            .collect())
    }
}

pub struct SyntectHighlighter {
    syntax_set: SyntaxSet,
    theme: Theme,
    extension: &'static str,
}

impl SyntectHighlighter {
    fn new(extension: &'static str, theme: Theme) -> Self {
        SyntectHighlighter {
            syntax_set: SyntaxSet::load_defaults_newlines(),
            theme,
            extension,
        }
    }
}

/// Look a theme up in syntect's bundled set.
fn load_theme(name: &str) -> Result<Theme> {
    ThemeSet::load_defaults()
        .themes
        .remove(name)
        .ok_or_else(|| Error::UnknownTheme(name.to_string()))
}

impl Highlighter for SyntectHighlighter {
    fn highlight(&self, code: &[u8]) -> Result<Vec<String>> {
        let text = String::from_utf8_lossy(code);
        let syntax = self
            .syntax_set
            .find_syntax_by_extension(self.extension)
            .unwrap_or_else(|| self.syntax_set.find_syntax_plain_text());
        tracing::debug!(syntax = %syntax.name, "highlighting file content");

        let mut highlighter = HighlightLines::new(syntax, &self.theme);
        let mut lines = Vec::new();

        for line in LinesWithEndings::from(&text) {
            let ranges = highlighter
                .highlight_line(line, &self.syntax_set)
                .map_err(|e| Error::Highlight(e.to_string()))?;
            let escaped = as_24_bit_terminal_escaped(&ranges, false);
            let mut display = escaped.trim_end_matches(['\n', '\r']).to_string();
            display.push_str("\x1B[0m");
            lines.push(display);
        }

        Ok(lines)
    }
}
