//! Assembler.
//!
//! Turns source lines into a 256-byte memory image in a single forward pass
//! with a write cursor starting at 0:
//! 1. **Blank lines** write one zero cell.
//! 2. **Instructions** write their opcode (tagged with its display category) and,
//!    for operand instructions, the operand byte parsed in the current base.
//! 3. **Anything else** is a data literal parsed in the current base.
//!
//! Assembly stops when the cursor reaches the end of memory, or before an
//! operand instruction that would need a cell past the end. Neither case is an
//! error; the program is simply shorter than its source.

use tracing::debug;

use super::line::{self, LineKind};
use super::numeral;
use crate::common::constants::{OPERAND_INSTRUCTION_SIZE, SIMPLE_INSTRUCTION_SIZE};
use crate::common::{Base, MEMORY_SIZE};
use crate::isa::instruction::Arity;
use crate::memory::Memory;

/// Result of one assembly pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assembly {
    /// The assembled image and its classification tags.
    pub memory: Memory,
    /// Outcome counters.
    pub report: AssemblyReport,
}

/// Summary of how much of the source made it into memory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize)]
pub struct AssemblyReport {
    /// Final write cursor: number of cells the program occupies.
    pub cells_used: usize,
    /// Number of leading source lines that were assembled.
    pub lines_assembled: usize,
    /// True when some source lines were left out because memory was full.
    pub truncated: bool,
}

/// Returns the number of cells a single line occupies (1 or 2).
///
/// Computed in isolation, and always agrees with what [`assemble`] writes for
/// the same line.
pub fn instruction_size(line: &str) -> usize {
    match line::classify(line) {
        LineKind::Instruction { mnemonic, .. } if mnemonic.arity() == Arity::Address => {
            OPERAND_INSTRUCTION_SIZE
        }
        _ => SIMPLE_INSTRUCTION_SIZE,
    }
}

/// Assembles `lines` into a fresh memory image.
///
/// Deterministic: the same lines and base always produce the same image.
pub fn assemble<S: AsRef<str>>(lines: &[S], base: Base) -> Assembly {
    let mut memory = Memory::new();
    let mut cursor = 0usize;
    let mut assembled = 0usize;

    for line in lines {
        if cursor >= MEMORY_SIZE {
            break;
        }
        match line::classify(line.as_ref()) {
            // Memory starts zeroed, so a blank line only moves the cursor.
            LineKind::Blank => cursor += 1,
            LineKind::Instruction { mnemonic, operand } => {
                let takes_operand = mnemonic.arity() == Arity::Address;
                if takes_operand && cursor + OPERAND_INSTRUCTION_SIZE > MEMORY_SIZE {
                    break;
                }
                let at = cursor as u8;
                memory.write(at, mnemonic.opcode());
                memory.set_class(at, mnemonic.category());
                cursor += 1;

                if takes_operand {
                    if let Some(token) = operand {
                        memory.write(cursor as u8, numeral::parse_literal(token, base));
                    }
                    cursor += 1;
                }
            }
            LineKind::Literal(text) => {
                memory.write(cursor as u8, numeral::parse_literal(text, base));
                cursor += 1;
            }
        }
        assembled += 1;
    }

    let report = AssemblyReport {
        cells_used: cursor,
        lines_assembled: assembled,
        truncated: assembled < lines.len(),
    };
    debug!(
        cells = report.cells_used,
        lines = report.lines_assembled,
        truncated = report.truncated,
        %base,
        "assembled program"
    );
    Assembly { memory, report }
}
