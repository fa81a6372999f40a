//! CPU Core Definition and Initialization.
//!
//! This module defines the central `Cpu` structure, which owns the entire
//! machine state. It coordinates the following:
//! 1. **State Management:** Registers and the RUNNING/HALTED/FAULTED execution state.
//! 2. **Memory Hierarchy:** Main memory behind the instruction and data caches.
//! 3. **Observability:** Statistics and an optional in-memory execution trace.
//!
//! The engine and the assembler never hold copies of this state; they operate
//! on a `Cpu` passed by reference.

/// Fetch-decode-execute engine.
pub mod execution;

/// Cache-mediated memory access helpers.
pub mod memory;

use serde::Serialize;

use crate::common::Fault;
use crate::config::Config;
use crate::core::arch::Registers;
use crate::core::units::cache::{DataCache, InstructionCache};
use crate::isa::instruction::Mnemonic;
use crate::memory::Memory;
use crate::stats::SimStats;

/// Execution state of the machine.
///
/// RUNNING is the initial state after reset. HALTED and FAULTED are terminal
/// until the next reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "state")]
pub enum ExecState {
    /// Ready to execute the instruction at PC.
    #[default]
    Running,
    /// An HLT instruction was executed.
    Halted,
    /// A fatal fault stopped execution.
    Faulted {
        /// What went wrong.
        fault: Fault,
    },
}

impl ExecState {
    /// Returns whether the state is HALTED or FAULTED.
    pub const fn is_terminal(self) -> bool {
        !matches!(self, Self::Running)
    }
}

/// One entry of the execution trace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TraceEntry {
    /// Address the instruction was fetched from.
    pub pc: u8,
    /// Decoded instruction.
    pub mnemonic: Mnemonic,
    /// Operand byte, for instructions that take one.
    pub operand: Option<u8>,
}

/// Machine state: registers, memory, both caches and bookkeeping.
#[derive(Debug, Clone)]
pub struct Cpu {
    /// AC, PC and VAC.
    pub regs: Registers,
    /// Main memory with classification tags.
    pub memory: Memory,
    /// Instruction fetch cache.
    pub icache: InstructionCache,
    /// Operand data cache.
    pub dcache: DataCache,
    /// Current execution state.
    pub state: ExecState,
    /// Performance statistics.
    pub stats: SimStats,
    /// Enable the in-memory execution trace.
    pub trace: bool,
    /// Recorded execution trace (only filled while `trace` is set).
    pub trace_log: Vec<TraceEntry>,
    trace_capacity: usize,
}

impl Cpu {
    /// Creates a CPU with zeroed memory and registers and empty caches.
    ///
    /// # Arguments
    ///
    /// * `config` - Supplies cache block sizes, tracing and the trace capacity.
    pub fn new(config: &Config) -> Self {
        Self {
            regs: Registers::new(),
            memory: Memory::new(),
            icache: InstructionCache::new(config.cache.icache.block_bytes),
            dcache: DataCache::new(config.cache.dcache.block_bytes),
            state: ExecState::Running,
            stats: SimStats::default(),
            trace: config.general.trace_instructions,
            trace_log: Vec::new(),
            trace_capacity: config.execution.loop_guard as usize,
        }
    }

    /// Zeroes AC/PC/VAC, invalidates both caches and returns to RUNNING.
    ///
    /// Memory is untouched.
    pub fn reset(&mut self) {
        self.regs.reset();
        self.icache.invalidate();
        self.dcache.invalidate();
        self.state = ExecState::Running;
        self.stats = SimStats::default();
        self.trace_log.clear();
    }

    /// Appends to the execution trace, dropping entries beyond capacity.
    fn record(&mut self, entry: TraceEntry) {
        if self.trace && self.trace_log.len() < self.trace_capacity {
            self.trace_log.push(entry);
        }
    }
}
