//! Single-Block Direct-Mapped Cache.
//!
//! This module implements the machine's deliberately minimal cache model:
//! each cache holds exactly one resident, address-aligned block. For an
//! address `a` and block size `B`, `offset = a mod B` and `tag = a - offset`.
//!
//! 1. **Reads:** hit when the resident block has the same tag, otherwise miss and
//!    refill the whole block from memory.
//! 2. **Writes:** the data cache is write-through; memory is always updated and the
//!    resident copy is patched in place when it holds the block. Writes never touch
//!    the hit/miss counters.
//! 3. **Instruction cache:** fetch-only. Stores reach it only through [`InstructionCache::snoop`],
//!    which keeps a resident copy coherent with memory.
//!
//! The bookkeeping never changes a value: every read and write observes
//! exactly what direct memory access would.

use std::fmt;
use std::ops::Deref;

use serde::Serialize;
use tracing::trace;

use crate::memory::Memory;

/// Identifies one of the two caches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum CacheKind {
    /// Instruction fetch cache.
    Instruction,
    /// Operand data cache.
    Data,
}

impl fmt::Display for CacheKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Instruction => write!(f, "I-Cache"),
            Self::Data => write!(f, "D-Cache"),
        }
    }
}

/// Point-in-time view of a cache, for drivers and statistics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    /// Which cache this is.
    pub kind: CacheKind,
    /// Monotonic hit counter.
    pub hits: u64,
    /// Monotonic miss counter.
    pub misses: u64,
    /// Whether a block is resident.
    pub valid: bool,
    /// Start address of the resident block, if any.
    pub tag: Option<u8>,
    /// Copy of the resident block (all zeros when invalid).
    pub data: Vec<u8>,
}

impl CacheStats {
    /// Hit rate in percent, or 0 when there have been no accesses.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            100.0 * self.hits as f64 / total as f64
        }
    }
}

/// One resident block plus its hit/miss counters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockCache {
    kind: CacheKind,
    valid: bool,
    tag: u8,
    data: Vec<u8>,
    hits: u64,
    misses: u64,
}

impl BlockCache {
    /// Creates an empty (invalid) cache with the given block size.
    ///
    /// # Arguments
    ///
    /// * `kind` - Which cache this is (used for tracing and statistics).
    /// * `block_bytes` - Block size; zero is treated as 1.
    pub fn new(kind: CacheKind, block_bytes: usize) -> Self {
        Self {
            kind,
            valid: false,
            tag: 0,
            data: vec![0; block_bytes.max(1)],
            hits: 0,
            misses: 0,
        }
    }

    /// Block size in bytes.
    #[inline]
    pub fn block_bytes(&self) -> usize {
        self.data.len()
    }

    /// Splits an address into its block tag and offset.
    #[inline]
    fn locate(&self, addr: u8) -> (u8, usize) {
        let offset = usize::from(addr) % self.block_bytes();
        (addr - offset as u8, offset)
    }

    /// Returns whether the block holding `addr` is resident.
    pub fn contains(&self, addr: u8) -> bool {
        let (tag, _) = self.locate(addr);
        self.valid && self.tag == tag
    }

    /// Reads one byte through the cache.
    ///
    /// # Arguments
    ///
    /// * `addr` - Address to read.
    /// * `memory` - Backing memory used to refill on a miss.
    ///
    /// # Returns
    ///
    /// A tuple `(value, hit)` where `hit` tells whether the resident block served the read.
    pub fn access(&mut self, addr: u8, memory: &Memory) -> (u8, bool) {
        let (tag, offset) = self.locate(addr);

        if self.valid && self.tag == tag {
            self.hits += 1;
            trace!(cache = %self.kind, address = addr, "HIT");
            return (self.data[offset], true);
        }

        self.misses += 1;
        trace!(cache = %self.kind, address = addr, "MISS");
        let start = usize::from(tag);
        for (i, slot) in self.data.iter_mut().enumerate() {
            // Source bytes past the end of memory read as zero.
            *slot = memory.get(start + i).unwrap_or(0);
        }
        self.tag = tag;
        self.valid = true;
        (self.data[offset], false)
    }

    /// Reads one byte through the cache, discarding the hit flag.
    #[inline]
    pub fn read(&mut self, addr: u8, memory: &Memory) -> u8 {
        self.access(addr, memory).0
    }

    /// Patches the resident copy of `addr` if its block is resident.
    fn patch(&mut self, addr: u8, value: u8) {
        let (tag, offset) = self.locate(addr);
        if self.valid && self.tag == tag {
            self.data[offset] = value;
        }
    }

    /// Clears the valid flag, zeroes the block and the counters.
    pub fn invalidate(&mut self) {
        self.valid = false;
        self.tag = 0;
        self.data.fill(0);
        self.hits = 0;
        self.misses = 0;
    }

    /// Returns whether a block is resident.
    pub const fn valid(&self) -> bool {
        self.valid
    }

    /// Returns the hit counter.
    pub const fn hits(&self) -> u64 {
        self.hits
    }

    /// Returns the miss counter.
    pub const fn misses(&self) -> u64 {
        self.misses
    }

    /// Returns a snapshot of the counters, tag and block contents.
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            kind: self.kind,
            hits: self.hits,
            misses: self.misses,
            valid: self.valid,
            tag: self.valid.then_some(self.tag),
            data: self.data.clone(),
        }
    }
}

/// Fetch-only instruction cache.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstructionCache {
    block: BlockCache,
}

impl InstructionCache {
    /// Creates an empty instruction cache.
    pub fn new(block_bytes: usize) -> Self {
        Self {
            block: BlockCache::new(CacheKind::Instruction, block_bytes),
        }
    }

    /// Fetches one byte.
    #[inline]
    pub fn read(&mut self, addr: u8, memory: &Memory) -> u8 {
        self.block.read(addr, memory)
    }

    /// Fetches one byte and reports whether it hit.
    #[inline]
    pub fn access(&mut self, addr: u8, memory: &Memory) -> (u8, bool) {
        self.block.access(addr, memory)
    }

    /// Observes a store to memory so a resident copy never goes stale.
    ///
    /// Counters are untouched.
    pub fn snoop(&mut self, addr: u8, value: u8) {
        self.block.patch(addr, value);
    }

    /// Clears the cache and its counters.
    pub fn invalidate(&mut self) {
        self.block.invalidate();
    }
}

impl Deref for InstructionCache {
    type Target = BlockCache;

    fn deref(&self) -> &BlockCache {
        &self.block
    }
}

/// Write-through data cache.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataCache {
    block: BlockCache,
}

impl DataCache {
    /// Creates an empty data cache.
    pub fn new(block_bytes: usize) -> Self {
        Self {
            block: BlockCache::new(CacheKind::Data, block_bytes),
        }
    }

    /// Reads one byte.
    #[inline]
    pub fn read(&mut self, addr: u8, memory: &Memory) -> u8 {
        self.block.read(addr, memory)
    }

    /// Reads one byte and reports whether it hit.
    #[inline]
    pub fn access(&mut self, addr: u8, memory: &Memory) -> (u8, bool) {
        self.block.access(addr, memory)
    }

    /// Writes one byte through to memory.
    ///
    /// The resident copy is updated in place when it holds the block; a write
    /// to any other block does not allocate.
    pub fn write(&mut self, addr: u8, value: u8, memory: &mut Memory) {
        trace!(cache = %CacheKind::Data, address = addr, value, "WRITE");
        memory.write(addr, value);
        self.block.patch(addr, value);
    }

    /// Observes a write made to memory behind the cache's back.
    ///
    /// Counters are untouched and memory is not written.
    pub fn snoop(&mut self, addr: u8, value: u8) {
        self.block.patch(addr, value);
    }

    /// Clears the cache and its counters.
    pub fn invalidate(&mut self) {
        self.block.invalidate();
    }
}

impl Deref for DataCache {
    type Target = BlockCache;

    fn deref(&self) -> &BlockCache {
        &self.block
    }
}
