//! Fault and error definitions.
//!
//! This module defines the error handling for the simulator. It provides:
//! 1. **Engine Faults:** Fatal conditions that stop execution, returned as values from `step`/`run`.
//! 2. **Table Errors:** Failed lookups in the instruction table.
//! 3. **Host Errors:** Program-file I/O and configuration failures.
//!
//! Assembly never fails: unparsable numerals become zero and overflowing
//! programs are truncated, so there is no assembler error type.

use std::io;
use std::path::PathBuf;

use serde::Serialize;

/// Fatal engine fault.
///
/// A fault moves the machine into the FAULTED state. It is reported through
/// the step outcome rather than as an `Err`, so drivers can branch on it directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, thiserror::Error)]
#[serde(tag = "kind")]
pub enum Fault {
    /// The program counter left the 0–255 range. There is no wraparound.
    #[error("Program Counter out of bounds ({pc})")]
    PcOutOfBounds {
        /// The offending program counter.
        pc: u16,
    },

    /// The fetched byte is not one of the machine's opcodes.
    #[error("Invalid opcode {opcode} at address {pc}")]
    InvalidOpcode {
        /// The byte that failed to decode.
        opcode: u8,
        /// Address it was fetched from.
        pc: u8,
    },
}

/// Instruction table lookup failure.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IsaError {
    /// The name is not one of the machine's mnemonics.
    #[error("unknown mnemonic '{0}'")]
    UnknownMnemonic(String),

    /// The byte is not one of the machine's opcodes.
    #[error("invalid opcode {0}")]
    InvalidOpcode(u8),
}

/// Program file could not be read or written.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// Underlying filesystem error.
    #[error("could not access program file '{}': {source}", path.display())]
    Io {
        /// Path of the program file.
        path: PathBuf,
        /// OS error.
        #[source]
        source: io::Error,
    },
}

/// Simulator configuration could not be loaded.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The JSON document is malformed or has fields of the wrong type.
    #[error("invalid configuration: {0}")]
    Parse(#[from] serde_json::Error),

    /// The configuration file could not be read.
    #[error("could not read configuration file '{}': {source}", path.display())]
    Io {
        /// Path of the configuration file.
        path: PathBuf,
        /// OS error.
        #[source]
        source: io::Error,
    },

    /// A cache block size is zero, not a power of two, or larger than memory.
    #[error("{cache} block size {size} must be a power of two between 1 and 256")]
    InvalidBlockSize {
        /// Which cache was misconfigured.
        cache: &'static str,
        /// The rejected size.
        size: usize,
    },

    /// The run-mode loop guard must allow at least one step.
    #[error("loop guard must be at least 1")]
    ZeroLoopGuard,
}
