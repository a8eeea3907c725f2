//! Syntax highlighting and terminal colors for cheatlist.
//!
//! Highlights the TOML and JSON that `cheatlist` prints, and styles headers, badges and
//! status messages.

#![warn(missing_docs)]

use syntect::{
    easy::HighlightLines,
    highlighting::Style,
    parsing::SyntaxSet,
    util::{LinesWithEndings, as_24_bit_terminal_escaped},
};
use two_face::{
    syntax::extra_newlines as extra_syntaxes,
    theme::{EmbeddedLazyThemeSet, EmbeddedThemeName, extra as extra_themes},
};

/// A syntax highlighter for terminal output.
pub struct Highlighter {
    /// Language definitions, including TOML and JSON.
    syntax_set: SyntaxSet,
    /// Color themes.
    theme_set: EmbeddedLazyThemeSet,
    /// The theme in use.
    theme: EmbeddedThemeName,
}

impl Default for Highlighter {
    fn default() -> Self {
        Self::new()
    }
}

impl Highlighter {
    /// Creates a new highlighter with the Dracula theme.
    pub fn new() -> Self {
        Self {
            syntax_set: extra_syntaxes(),
            theme_set: extra_themes(),
            theme: EmbeddedThemeName::Dracula,
        }
    }

    /// Highlights TOML content.
    pub fn highlight_toml(&self, content: &str) -> String {
        self.highlight(content, "toml")
    }

    /// Highlights JSON content.
    pub fn highlight_json(&self, content: &str) -> String {
        self.highlight(content, "json")
    }

    /// Highlights content with the named syntax.
    ///
    /// Unknown syntaxes fall back to plain text.
    pub fn highlight(&self, content: &str, syntax_name: &str) -> String {
        let syntax = self
            .syntax_set
            .find_syntax_by_extension(syntax_name)
            .or_else(|| self.syntax_set.find_syntax_by_name(syntax_name))
            .unwrap_or_else(|| self.syntax_set.find_syntax_plain_text());

        let theme = self.theme_set.get(self.theme);
        let mut highlighter = HighlightLines::new(syntax, theme);

        let mut output = String::new();
        for line in LinesWithEndings::from(content) {
            let ranges: Vec<(Style, &str)> = highlighter
                .highlight_line(line, &self.syntax_set)
                .unwrap_or_else(|_| vec![(Style::default(), line)]);
            output.push_str(&as_24_bit_terminal_escaped(&ranges[..], false));
        }
        output.push_str(colors::RESET);
        output
    }
}

/// ANSI escape sequences used by the style helpers.
pub mod colors {
    /// Bold.
    pub const BOLD: &str = "\x1b[1m";
    /// Faint.
    pub const DIM: &str = "\x1b[2m";
    /// Cyan foreground, for titles.
    pub const CYAN: &str = "\x1b[36m";
    /// Green foreground, for available formats.
    pub const GREEN: &str = "\x1b[32m";
    /// Yellow foreground, for partial availability and warnings.
    pub const YELLOW: &str = "\x1b[33m";
    /// Clears every attribute.
    pub const RESET: &str = "\x1b[0m";
}

/// How strongly a badge signals availability.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    /// Available.
    Good,
    /// Partly available.
    Warn,
    /// Not available.
    Off,
}

impl Tone {
    /// Returns the dot drawn in front of a badge label.
    fn dot(self) -> String {
        match self {
            Self::Good => paint(&[colors::GREEN], "●"),
            Self::Warn => paint(&[colors::YELLOW], "●"),
            Self::Off => paint(&[colors::DIM], "○"),
        }
    }
}

/// Wraps `text` in the given escape sequences and a trailing reset.
fn paint(codes: &[&str], text: &str) -> String {
    let mut out = codes.concat();
    out.push_str(text);
    out.push_str(colors::RESET);
    out
}

/// Styles a record title or section heading: bold cyan.
pub fn header(text: &str) -> String {
    paint(&[colors::BOLD, colors::CYAN], text)
}

/// Styles a label: bold.
pub fn subheader(text: &str) -> String {
    paint(&[colors::BOLD], text)
}

/// Styles secondary text: faint.
pub fn dim(text: &str) -> String {
    paint(&[colors::DIM], text)
}

/// Styles a warning: yellow.
pub fn warning(text: &str) -> String {
    paint(&[colors::YELLOW], text)
}

/// Formats a badge: a colored dot followed by its label.
pub fn badge(label: &str, tone: Tone) -> String {
    format!("{} {label}", tone.dot())
}

/// Returns a faint horizontal rule `width` cells wide.
pub fn rule(width: usize) -> String {
    dim(&"─".repeat(width))
}

/// Indents every non-empty line of `content` by `width` spaces.
pub fn indent(content: &str, width: usize) -> String {
    let pad = " ".repeat(width);
    content
        .lines()
        .map(|line| {
            if line.is_empty() {
                String::new()
            } else {
                format!("{pad}{line}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
