//! Main Memory.
//!
//! This module provides the machine's 256-cell byte memory. It holds:
//! 1. **Cells:** 256 bytes, addressable by any `u8`.
//! 2. **Classification:** An optional display tag per cell, produced by the assembler.
//!
//! Memory is rebuilt wholesale on every assembly. At run time only store
//! instructions change it, and each stored cell loses its tag.

use std::ops::Index;

use serde::Serialize;

use crate::common::MEMORY_SIZE;
use crate::isa::instruction::Category;

/// Byte-addressable memory image with per-cell classification tags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Memory {
    #[serde(serialize_with = "cells_serde::serialize")]
    cells: [u8; MEMORY_SIZE],
    #[serde(serialize_with = "classes_serde::serialize")]
    classes: [Option<Category>; MEMORY_SIZE],
}

impl Default for Memory {
    fn default() -> Self {
        Self::new()
    }
}

impl Memory {
    /// Creates a zeroed, untagged memory.
    pub const fn new() -> Self {
        Self {
            cells: [0; MEMORY_SIZE],
            classes: [None; MEMORY_SIZE],
        }
    }

    /// Reads a cell.
    #[inline]
    pub const fn read(&self, addr: u8) -> u8 {
        self.cells[addr as usize]
    }

    /// Writes a cell, leaving its tag untouched.
    #[inline]
    pub const fn write(&mut self, addr: u8, value: u8) {
        self.cells[addr as usize] = value;
    }

    /// Reads a cell by wide index, returning `None` past the end of memory.
    #[inline]
    pub fn get(&self, index: usize) -> Option<u8> {
        self.cells.get(index).copied()
    }

    /// Returns the classification tag of a cell.
    #[inline]
    pub const fn class(&self, addr: u8) -> Option<Category> {
        self.classes[addr as usize]
    }

    /// Sets the classification tag of a cell.
    #[inline]
    pub const fn set_class(&mut self, addr: u8, class: Category) {
        self.classes[addr as usize] = Some(class);
    }

    /// Clears the classification tag of a cell.
    #[inline]
    pub const fn clear_class(&mut self, addr: u8) {
        self.classes[addr as usize] = None;
    }

    /// Returns all cells.
    pub const fn cells(&self) -> &[u8; MEMORY_SIZE] {
        &self.cells
    }

    /// Returns all classification tags.
    pub const fn classes(&self) -> &[Option<Category>; MEMORY_SIZE] {
        &self.classes
    }

    /// Zeroes every cell and clears every tag.
    pub fn clear(&mut self) {
        self.cells.fill(0);
        self.classes.fill(None);
    }
}

impl Index<u8> for Memory {
    type Output = u8;

    fn index(&self, addr: u8) -> &u8 {
        &self.cells[usize::from(addr)]
    }
}

/// Serializes the cell array as a sequence (serde has no impl for `[T; 256]`).
mod cells_serde {
    use serde::Serializer;

    use crate::common::MEMORY_SIZE;

    pub fn serialize<S: Serializer>(cells: &[u8; MEMORY_SIZE], s: S) -> Result<S::Ok, S::Error> {
        s.collect_seq(cells.iter())
    }
}

mod classes_serde {
    use serde::Serializer;

    use crate::common::MEMORY_SIZE;
    use crate::isa::instruction::Category;

    pub fn serialize<S: Serializer>(
        classes: &[Option<Category>; MEMORY_SIZE],
        s: S,
    ) -> Result<S::Ok, S::Error> {
        s.collect_seq(classes.iter())
    }
}
