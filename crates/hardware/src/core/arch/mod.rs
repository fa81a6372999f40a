//! Architectural state.
//!
//! The machine has one 8-bit accumulator, a program counter and a single
//! 4-lane vector accumulator. The Z and N flags are derived from AC on
//! demand and never stored.

/// Register file implementation.
pub mod registers;

pub use registers::Registers;
