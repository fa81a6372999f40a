//! Functional units.
//!
//! Each memory access made by the engine goes through one of two
//! direct-mapped, single-block caches: instruction fetches through the
//! instruction cache and operand accesses through the data cache.

/// Single-block instruction and data caches.
pub mod cache;
