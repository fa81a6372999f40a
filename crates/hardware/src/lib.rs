//! NeanderWeb-V simulator library.
//!
//! This crate implements an 8-bit accumulator machine extended with a 4-lane
//! vector unit and a pedagogical cache model. It provides the following:
//! 1. **ISA:** The fixed 18-instruction table, decoding, and a disassembler.
//! 2. **Assembler:** Source text to a 256-cell memory image, base conversion, and the program file format.
//! 3. **Memory:** The 256-byte memory with per-cell classification tags.
//! 4. **Core:** AC/PC/VAC registers, single-block instruction and data caches, and the step engine.
//! 5. **Simulation:** The simulator context, file loading, configuration, and statistics.
//!
//! ```
//! use neander_core::{Config, Simulator};
//! use neander_core::common::Base;
//!
//! let mut sim = Simulator::new(&Config::default());
//! let _ = sim.assemble(&["LDA 6", "ADD 7", "HLT", "", "2", "3"], Base::Dec);
//! sim.reset();
//! let report = sim.run();
//! assert_eq!(report.steps, 3);
//! assert_eq!(sim.cpu.regs.ac(), 5);
//! ```

/// Assembler, numeral parser, base conversion, and program file format.
pub mod asm;
/// Common types and constants (numeral base, machine sizes, errors).
pub mod common;
/// Simulator configuration (defaults, JSON loading, validation).
pub mod config;
/// CPU core (registers, caches, step engine).
pub mod core;
/// Instruction set (opcode table, disassembler).
pub mod isa;
/// 256-cell memory with classification tags.
pub mod memory;
/// Simulator context, snapshots, and file loading.
pub mod sim;
/// Simulation statistics collection and reporting.
pub mod stats;

/// Root configuration type; use `Config::default()` or load from JSON.
pub use crate::config::Config;
/// Machine state; holds registers, memory, caches, and stats.
pub use crate::core::Cpu;
/// Top-level simulator context used by drivers.
pub use crate::sim::Simulator;
