//! Two-mode LaTeX escaping.
//!
//! Content that already carries LaTeX commands gets [`EscapeMode::Markup`]:
//! only text-level specials are escaped so the commands survive. Everything
//! else gets [`EscapeMode::Plain`]: all ten specials are escaped and
//! non-ASCII characters are dropped. The mode is decided once per string.

use std::sync::LazyLock;

use regex::Regex;

static RE_COMMAND: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\\[a-zA-Z]+\{").expect("valid command regex"));
static RE_BLANK_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n\s*\n").expect("valid blank run regex"));
static RE_LEADING_WS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^[ \t]+").expect("valid leading whitespace regex"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EscapeMode {
    /// Already marked up: escape `& # $ % _ ^ ~` only.
    Markup,
    /// Raw text: escape `# $ % & _ { } ^ ~ \` and drop non-ASCII.
    Plain,
}

impl EscapeMode {
    /// `Markup` when the text contains a command such as `\section{`.
    pub fn detect(content: &str) -> Self {
        if RE_COMMAND.is_match(content) {
            Self::Markup
        } else {
            Self::Plain
        }
    }

    pub fn escape(self, text: &str) -> String {
        match self {
            Self::Markup => escape_markup(text),
            Self::Plain => escape_plain(text),
        }
    }
}

/// Escape every LaTeX special and drop characters outside ASCII.
pub fn escape_plain(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + text.len() / 8);
    for c in text.chars() {
        match c {
            '#' => out.push_str(r"\#"),
            '$' => out.push_str(r"\$"),
            '%' => out.push_str(r"\%"),
            '&' => out.push_str(r"\&"),
            '_' => out.push_str(r"\_"),
            '{' => out.push_str(r"\{"),
            '}' => out.push_str(r"\}"),
            '^' => out.push_str(r"\textasciicircum{}"),
            '~' => out.push_str(r"\textasciitilde{}"),
            '\\' => out.push_str(r"\textbackslash{}"),
            c if c.is_ascii() => out.push(c),
            _ => {}
        }
    }
    out
}

/// Escape text-level specials while leaving commands, groups and already
/// escaped characters untouched.
pub fn escape_markup(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + text.len() / 8);
    let mut prev = None;
    for c in text.chars() {
        if prev == Some('\\') {
            out.push(c);
        } else {
            match c {
                '&' | '#' | '$' | '%' | '_' => {
                    out.push('\\');
                    out.push(c);
                }
                '^' => out.push_str(r"\textasciicircum{}"),
                '~' => out.push_str(r"\textasciitilde{}"),
                c => out.push(c),
            }
        }
        // A doubled backslash is a line break, not an escape prefix.
        prev = if prev == Some('\\') && c == '\\' {
            None
        } else {
            Some(c)
        };
    }
    out
}

/// Escape content with the detected mode, then [`clean_layout`].
pub fn clean_content(content: &str) -> String {
    clean_layout(&EscapeMode::detect(content).escape(content))
}

/// Collapse blank-line runs to one blank line and drop leading indentation.
pub fn clean_layout(content: &str) -> String {
    let collapsed = RE_BLANK_RUN.replace_all(content, "\n\n");
    RE_LEADING_WS.replace_all(&collapsed, "").into_owned()
}
