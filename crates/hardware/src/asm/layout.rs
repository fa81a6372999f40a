//! Layout helpers for editors.
//!
//! Pre-validate where each source line lands without running a full assembly.
//! Both helpers are built on [`instruction_size`], so they never disagree with
//! the assembler.

use super::assembler::instruction_size;
use crate::common::MEMORY_SIZE;

/// Returns the start address of every line.
///
/// Lines that begin at or past the end of memory get `None`.
pub fn line_addresses<S: AsRef<str>>(lines: &[S]) -> Vec<Option<u8>> {
    let mut addr = 0usize;
    lines
        .iter()
        .map(|line| {
            let start = u8::try_from(addr).ok();
            addr += instruction_size(line.as_ref());
            start
        })
        .collect()
}

/// Returns how many leading lines fit in memory.
///
/// An editor that truncates its buffer to this many lines holds exactly the
/// program the assembler will build.
pub fn fit_lines<S: AsRef<str>>(lines: &[S]) -> usize {
    let mut used = 0usize;
    lines
        .iter()
        .take_while(|line| {
            let size = instruction_size(line.as_ref());
            if used + size > MEMORY_SIZE {
                false
            } else {
                used += size;
                true
            }
        })
        .count()
}
