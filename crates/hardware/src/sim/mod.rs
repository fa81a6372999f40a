//! Simulation context and program loading.
//!
//! Provides the [`Simulator`] that drivers talk to, the serializable
//! [`Snapshot`] of its state, and utilities for reading program files.

/// Program file loading and saving.
pub mod loader;

/// Top-level simulator context.
pub mod simulator;

/// Serializable machine state.
pub mod snapshot;

pub use loader::{load_source, save_source};
pub use simulator::Simulator;
pub use snapshot::Snapshot;
