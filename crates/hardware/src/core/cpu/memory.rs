//! Cache-mediated memory access.
//!
//! Every memory access made while executing goes through here: fetches through
//! the instruction cache, operand loads and stores through the data cache.
//! Only the assembler writes memory directly.

use super::Cpu;
use crate::common::VECTOR_LANES;

impl Cpu {
    /// Fetches an instruction or operand byte through the instruction cache.
    #[inline]
    pub(crate) fn fetch(&mut self, addr: u8) -> u8 {
        self.icache.read(addr, &self.memory)
    }

    /// Loads a data byte through the data cache.
    #[inline]
    pub(crate) fn load(&mut self, addr: u8) -> u8 {
        self.dcache.read(addr, &self.memory)
    }

    /// Stores a data byte through the data cache and clears the cell's tag.
    ///
    /// The instruction cache snoops the store so a later fetch of the same
    /// cell sees the new byte.
    pub(crate) fn store(&mut self, addr: u8, value: u8) {
        self.dcache.write(addr, value, &mut self.memory);
        self.icache.snoop(addr, value);
        self.memory.clear_class(addr);
    }

    /// Addresses of the vector lanes starting at `start`.
    ///
    /// Lanes that would fall past the end of memory are `None` and are skipped
    /// by every vector instruction.
    pub(crate) fn lane_addresses(start: u8) -> [Option<u8>; VECTOR_LANES] {
        std::array::from_fn(|lane| start.checked_add(lane as u8))
    }
}
