//! Instruction Set Architecture (ISA) Definitions.
//!
//! The opcode space is fixed and closed: eleven scalar accumulator
//! instructions and seven vector-unit instructions. HLT (240) sits directly
//! below the vector block at 241–247.
//!
//! # Modules
//!
//! * `instruction`: mnemonic/opcode bijection, arity and display category.
//! * `disasm`: memory listing and instruction rendering.

/// Memory disassembler for listings and diagnostics.
pub mod disasm;

/// Instruction table: opcodes, arity, categories.
pub mod instruction;

pub use instruction::{
    Arity, Category, Group, Mnemonic, arity_of, display_category_of, mnemonic_of, opcode_of,
};
