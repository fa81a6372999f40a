//! Memory Disassembler.
//!
//! Renders memory cells as human-readable text for listings, tracing and test
//! diagnostics. Cells tagged by the assembler are decoded as instructions
//! (consuming the following operand cell where the instruction takes one);
//! untagged cells are shown as data values.
//!
//! # Usage
//!
//! ```
//! use neander_core::asm::assemble;
//! use neander_core::common::Base;
//! use neander_core::isa::disasm::listing;
//!
//! let image = assemble(&["LDA 10", "HLT"], Base::Dec);
//! let rows = listing(&image.memory, Base::Dec);
//! assert_eq!(rows[0].text, "LDA 10");
//! assert_eq!(rows[1].text, "HLT");
//! ```

use serde::Serialize;

use crate::asm::numeral;
use crate::common::{Base, MEMORY_SIZE};
use crate::isa::instruction::{Arity, Category, Mnemonic};
use crate::memory::Memory;

/// One row of a memory listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListingRow {
    /// Address of the first cell of the row.
    pub address: u8,
    /// Number of cells the row covers (1 or 2).
    pub size: usize,
    /// Rendered text.
    pub text: String,
    /// Classification tag of the first cell.
    pub category: Option<Category>,
}

/// Renders an instruction and its operand.
pub fn format_instruction(mnemonic: Mnemonic, operand: Option<u8>, base: Base) -> String {
    match operand {
        Some(value) => format!("{mnemonic} {}", numeral::format(value, base)),
        None => mnemonic.to_string(),
    }
}

/// Disassembles the row starting at `addr`.
///
/// Returns the rendered text and the number of cells consumed. An operand
/// instruction in the last cell reads its missing operand as 0, as the
/// engine does.
pub fn disassemble_at(memory: &Memory, addr: u8, base: Base) -> (String, usize) {
    let value = memory.read(addr);
    let decoded = memory
        .class(addr)
        .and_then(|_| Mnemonic::from_opcode(value));

    match decoded {
        Some(mnemonic) if mnemonic.arity() == Arity::Address => {
            let operand = addr.checked_add(1).map_or(0, |next| memory.read(next));
            let size = if addr.checked_add(1).is_some() { 2 } else { 1 };
            (format_instruction(mnemonic, Some(operand), base), size)
        }
        Some(mnemonic) => (format_instruction(mnemonic, None, base), 1),
        None => (numeral::format(value, base), 1),
    }
}

/// Lists the whole memory, following instruction sizes from address 0.
pub fn listing(memory: &Memory, base: Base) -> Vec<ListingRow> {
    let mut rows = Vec::new();
    let mut addr = 0usize;
    while addr < MEMORY_SIZE {
        let at = addr as u8;
        let (text, size) = disassemble_at(memory, at, base);
        rows.push(ListingRow {
            address: at,
            size,
            text,
            category: memory.class(at),
        });
        addr += size;
    }
    rows
}
