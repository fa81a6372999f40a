//! Assembler and source-text tooling.
//!
//! Everything that reads or rewrites program text lives here:
//! 1. **Numerals:** Permissive base-aware parsing and rendering.
//! 2. **Assembly:** Source lines to a 256-cell memory image with classification tags.
//! 3. **Layout:** Per-line sizes and addresses for editors.
//! 4. **Conversion:** Rewriting literals from one base to another.
//! 5. **Files:** The `#HEX`/`#DEC` program file format.

/// Single-pass assembler.
pub mod assembler;

/// Base conversion of source lines.
pub mod convert;

/// Per-line addresses and overflow checks.
pub mod layout;

/// Line scanning shared by every pass.
pub mod line;

/// Numeral parsing and formatting.
pub mod numeral;

/// Program file format.
pub mod source;

pub use assembler::{Assembly, AssemblyReport, assemble, instruction_size};
pub use convert::convert_base;
pub use layout::{fit_lines, line_addresses};
pub use numeral::{format, parse_literal};
pub use source::SourceFile;
