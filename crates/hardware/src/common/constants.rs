//! Global Machine Constants.
//!
//! This module defines machine-wide constants used across the simulator. It includes:
//! 1. **Memory Constants:** Size of the byte-addressable memory.
//! 2. **Register Constants:** Vector register width and flag bit positions.
//! 3. **Cache Constants:** Block sizes of the instruction and data caches.
//! 4. **Simulation Constants:** The step-count guard applied in run mode.

/// Number of byte cells in main memory.
pub const MEMORY_SIZE: usize = 256;

/// Number of 8-bit lanes in the vector accumulator (VAC).
pub const VECTOR_LANES: usize = 4;

/// Bit of AC that drives the negative (N) flag.
pub const SIGN_BIT: u8 = 0x80;

/// Instruction cache block size in bytes.
pub const ICACHE_BLOCK_BYTES: usize = 8;

/// Data cache block size in bytes.
pub const DCACHE_BLOCK_BYTES: usize = 16;

/// Maximum number of steps taken by a single run before it is stopped.
pub const LOOP_GUARD: u32 = 10_000;

/// Number of cells consumed by an instruction that takes an address operand.
pub const OPERAND_INSTRUCTION_SIZE: usize = 2;

/// Number of cells consumed by an implied instruction, a data literal, or a blank line.
pub const SIMPLE_INSTRUCTION_SIZE: usize = 1;

/// First-line header selecting hexadecimal literals in a program file.
pub const HEX_HEADER: &str = "#HEX";

/// First-line header selecting decimal literals in a program file.
pub const DEC_HEADER: &str = "#DEC";

/// Character that starts a comment running to the end of the line.
pub const COMMENT_CHAR: char = ';';
