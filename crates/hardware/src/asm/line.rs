//! Source line scanning.
//!
//! Shared by the assembler, layout helpers and base converter so that every
//! pass agrees on what a line contains.

use crate::common::constants::COMMENT_CHAR;
use crate::isa::instruction::Mnemonic;

/// Returns the code portion of a line: everything before the first `;`, trimmed.
pub fn code(line: &str) -> &str {
    line.split(COMMENT_CHAR).next().unwrap_or_default().trim()
}

/// Returns the comment portion of a line (text after the first `;`), if any.
pub fn comment(line: &str) -> Option<&str> {
    line.split_once(COMMENT_CHAR).map(|(_, rest)| rest)
}

#[inline]
fn is_separator(c: char) -> bool {
    c.is_whitespace() || c == ','
}

/// Splits trimmed code on runs of whitespace and commas.
///
/// The first token is always present and may be empty when the code begins
/// with a comma. Later tokens are never empty.
pub fn tokens(code: &str) -> Vec<&str> {
    let mut parts = code.split(is_separator);
    let first = parts.next().unwrap_or_default();
    std::iter::once(first)
        .chain(parts.filter(|t| !t.is_empty()))
        .collect()
}

/// What a single non-blank line assembles to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind<'a> {
    /// Blank or comment-only line: one zero cell.
    Blank,
    /// A mnemonic, with its operand token if one was written.
    Instruction {
        /// Decoded mnemonic.
        mnemonic: Mnemonic,
        /// Second token, unparsed.
        operand: Option<&'a str>,
    },
    /// Anything else is a data literal (the whole trimmed code).
    Literal(&'a str),
}

/// Classifies a source line.
pub fn classify(line: &str) -> LineKind<'_> {
    let code = code(line);
    if code.is_empty() {
        return LineKind::Blank;
    }
    let tokens = tokens(code);
    let candidate = tokens.first().copied().unwrap_or_default().to_uppercase();
    match Mnemonic::from_name(&candidate) {
        Some(mnemonic) => LineKind::Instruction {
            mnemonic,
            operand: tokens.get(1).copied(),
        },
        None => LineKind::Literal(code),
    }
}
