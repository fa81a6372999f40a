//! Base conversion of source text.
//!
//! Rewrites literal and operand tokens from one base to another without
//! changing the values they assemble to. Lines are handled independently:
//! 1. **Blank or comment-only lines** are returned unchanged.
//! 2. **Instruction lines** are re-joined with single spaces; the operand token
//!    is rewritten when it parses in the old base.
//! 3. **Data lines** are replaced by the converted literal when the first token
//!    parses in the old base, otherwise left unchanged.
//!
//! Comments are kept, re-attached as ` ;<comment>`.

use tracing::debug;

use super::line;
use super::numeral;
use crate::common::Base;
use crate::common::constants::COMMENT_CHAR;
use crate::isa::instruction::Mnemonic;

/// Converts every line from `old` to `new`.
pub fn convert_base<S: AsRef<str>>(lines: &[S], old: Base, new: Base) -> Vec<String> {
    debug!(from = %old, to = %new, lines = lines.len(), "converting source base");
    lines
        .iter()
        .map(|l| convert_line(l.as_ref(), old, new))
        .collect()
}

/// Converts a single line from `old` to `new`.
pub fn convert_line(line: &str, old: Base, new: Base) -> String {
    let code = line::code(line);
    if code.is_empty() {
        return line.to_string();
    }
    let suffix = line::comment(line)
        .map(|c| format!(" {COMMENT_CHAR}{c}"))
        .unwrap_or_default();

    let mut tokens: Vec<String> = line::tokens(code).into_iter().map(str::to_string).collect();
    let is_instruction = tokens
        .first()
        .is_some_and(|t| Mnemonic::from_name(&t.to_uppercase()).is_some());

    if is_instruction {
        if let Some(operand) = tokens.get_mut(1) {
            if let Some(value) = numeral::parse(operand, old) {
                *operand = numeral::format(value, new);
            }
        }
        return tokens.join(" ") + &suffix;
    }

    match tokens.first().and_then(|t| numeral::parse(t, old)) {
        Some(value) => data_literal(value, new) + &suffix,
        None => line.to_string(),
    }
}

/// Formats a data cell so it never reads back as a mnemonic (`0xADD` is `0ADD`).
fn data_literal(value: i64, base: Base) -> String {
    let text = numeral::format(value, base);
    if Mnemonic::from_name(&text.to_uppercase()).is_some() {
        format!("0{text}")
    } else {
        text
    }
}
