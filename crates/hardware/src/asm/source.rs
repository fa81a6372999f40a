//! Program file format.
//!
//! Plain text. An optional first line of exactly `#HEX` or `#DEC` (trimmed,
//! any case) selects the numeral base for the rest of the file. Comments start
//! with `;` and run to the end of the line.

use crate::common::Base;

/// A program as read from, or written to, a text file.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SourceFile {
    /// Numeral base for literals and operands.
    pub base: Base,
    /// Source lines without line terminators.
    pub lines: Vec<String>,
}

impl SourceFile {
    /// Creates a source file from lines.
    pub fn new<S: Into<String>>(base: Base, lines: impl IntoIterator<Item = S>) -> Self {
        Self {
            base,
            lines: lines.into_iter().map(Into::into).collect(),
        }
    }

    /// Parses file contents.
    ///
    /// A recognized header line is consumed and sets the base; otherwise
    /// `default_base` applies and the first line is kept as source.
    /// Both `\n` and `\r\n` line endings are accepted, and a trailing line
    /// terminator is ignored.
    pub fn parse(text: &str, default_base: Base) -> Self {
        let mut lines: Vec<String> = text
            .split('\n')
            .map(|l| l.strip_suffix('\r').unwrap_or(l).to_string())
            .collect();
        // A final line terminator does not start another line.
        if lines.len() > 1 && lines.last().is_some_and(String::is_empty) {
            let _ = lines.pop();
        }

        let header = lines.first().and_then(|first| Base::from_header(first));
        let base = match header {
            Some(base) => {
                let _ = lines.remove(0);
                base
            }
            None => default_base,
        };
        Self { base, lines }
    }

    /// Renders the file with its base header on the first line.
    pub fn render(&self) -> String {
        let mut out = String::from(self.base.header());
        for line in &self.lines {
            out.push('\n');
            out.push_str(line);
        }
        out
    }
}
