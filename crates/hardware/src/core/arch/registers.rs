//! Register File.
//!
//! This module implements the machine's programmer-visible registers. It performs the following:
//! 1. **Storage:** Holds AC, PC and the four VAC lanes.
//! 2. **Invariant Enforcement:** AC is a byte, so it is always in 0–255, and the flags
//!    are computed from it on every read, never stored.
//! 3. **Debugging:** Provides a one-line state dump for tracing.

use serde::Serialize;

use crate::asm::numeral;
use crate::common::constants::SIGN_BIT;
use crate::common::{Base, VECTOR_LANES};

/// Programmer-visible registers.
///
/// PC is wider than a byte: an instruction at 254 or 255 can advance it past
/// the end of memory, which faults on the next fetch instead of wrapping.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Registers {
    ac: u8,
    /// Program counter.
    pub pc: u16,
    /// Vector accumulator lanes.
    pub vac: [u8; VECTOR_LANES],
}

impl Registers {
    /// Creates a register file with every register zeroed.
    ///
    /// # Returns
    ///
    /// A new `Registers` with AC = 0 (so Z is set), PC = 0 and VAC = [0, 0, 0, 0].
    pub const fn new() -> Self {
        Self {
            ac: 0,
            pc: 0,
            vac: [0; VECTOR_LANES],
        }
    }

    /// Returns the accumulator.
    #[inline]
    pub const fn ac(&self) -> u8 {
        self.ac
    }

    /// Writes the accumulator. Z and N follow immediately.
    #[inline]
    pub const fn set_ac(&mut self, value: u8) {
        self.ac = value;
    }

    /// Zero flag: set iff AC is 0.
    #[inline]
    pub const fn zero(&self) -> bool {
        self.ac == 0
    }

    /// Negative flag: set iff bit 7 of AC is set.
    #[inline]
    pub const fn negative(&self) -> bool {
        self.ac & SIGN_BIT != 0
    }

    /// Zeroes AC, PC and every VAC lane.
    pub const fn reset(&mut self) {
        *self = Self::new();
    }

    /// Renders the registers on one line in `base`.
    ///
    /// # Arguments
    ///
    /// * `base` - Numeral base for AC, PC and the VAC lanes.
    ///
    /// # Returns
    ///
    /// A string like `AC=10 PC=4 VAC=[1, 2, 3, 4] N=0 Z=0`.
    pub fn dump(&self, base: Base) -> String {
        let lanes: Vec<String> = self.vac.iter().map(|&v| numeral::format(v, base)).collect();
        format!(
            "AC={} PC={} VAC=[{}] N={} Z={}",
            numeral::format(self.ac, base),
            numeral::format(self.pc, base),
            lanes.join(", "),
            u8::from(self.negative()),
            u8::from(self.zero()),
        )
    }
}
