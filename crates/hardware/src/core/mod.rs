//! Core processor implementation.
//!
//! This module contains the accumulator machine itself: its architectural
//! registers, the two single-block caches that sit in front of memory, and
//! the fetch-decode-execute engine that ties them together.

/// Architectural state (AC, PC, VAC and the derived flags).
pub mod arch;

/// CPU container and the step engine.
pub mod cpu;

/// Functional units (instruction and data caches).
pub mod units;

pub use self::cpu::{Cpu, ExecState};
