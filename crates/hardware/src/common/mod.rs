//! Common types and constants shared across the simulator.
//!
//! This module provides the building blocks used by every other component:
//! 1. **Constants:** Memory size, vector width, cache block sizes, and the run-mode loop guard.
//! 2. **Numeral Base:** The decimal/hexadecimal setting shared by the assembler and the driver.
//! 3. **Error Handling:** Engine faults and host-side error types.

/// Numeral base shared by parsing and rendering.
pub mod base;

/// Common constants used throughout the simulator.
pub mod constants;

/// Error types and engine fault definitions.
pub mod error;

pub use base::Base;
pub use constants::{MEMORY_SIZE, VECTOR_LANES};
pub use error::{ConfigError, Fault, IsaError, LoadError};
