//! Serializable view of the whole machine.

use serde::Serialize;

use crate::common::{Base, VECTOR_LANES};
use crate::core::ExecState;
use crate::core::units::cache::CacheStats;
use crate::memory::Memory;

/// Point-in-time copy of registers, flags, caches and memory.
///
/// Drivers render this after a core call returns; the CLI prints it as JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    /// Accumulator.
    pub ac: u8,
    /// Program counter (may exceed 255 once the machine has faulted).
    pub pc: u16,
    /// Vector accumulator lanes.
    pub vac: [u8; VECTOR_LANES],
    /// Zero flag.
    pub zero: bool,
    /// Negative flag.
    pub negative: bool,
    /// Execution state.
    pub state: ExecState,
    /// Numeral base the program was assembled with.
    pub base: Base,
    /// Instruction cache view.
    pub icache: CacheStats,
    /// Data cache view.
    pub dcache: CacheStats,
    /// Memory cells and their classification tags.
    pub memory: Memory,
}
