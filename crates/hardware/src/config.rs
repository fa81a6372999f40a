//! Configuration system for the NeanderWeb-V simulator.
//!
//! This module defines the configuration structures used to parameterize
//! the simulator. It provides:
//! 1. **Defaults:** Baseline machine constants (cache block sizes, loop guard).
//! 2. **Structures:** Hierarchical config for general, execution, and cache settings.
//! 3. **Loading:** JSON parsing from strings or files, with validation.
//!
//! Every field is optional in JSON; omitted fields take the machine defaults,
//! so `Config::default()` describes the reference NeanderWeb-V machine.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::common::{Base, ConfigError, MEMORY_SIZE};

/// Default configuration constants for the simulator.
mod defaults {
    use crate::common::constants;

    /// Instruction cache block size in bytes.
    pub const ICACHE_BLOCK_BYTES: usize = constants::ICACHE_BLOCK_BYTES;

    /// Data cache block size in bytes.
    pub const DCACHE_BLOCK_BYTES: usize = constants::DCACHE_BLOCK_BYTES;

    /// Maximum number of steps a single run may execute.
    pub const LOOP_GUARD: u32 = constants::LOOP_GUARD;
}

/// Root configuration structure.
///
/// # Examples
///
/// ```
/// use neander_core::config::Config;
/// use neander_core::common::Base;
///
/// let json = r#"{
///     "general": { "trace_instructions": true, "base": "Hex" },
///     "execution": { "loop_guard": 500 },
///     "cache": { "dcache": { "block_bytes": 32 } }
/// }"#;
///
/// let config = Config::from_json(json).unwrap();
/// assert!(config.general.trace_instructions);
/// assert_eq!(config.general.base, Base::Hex);
/// assert_eq!(config.execution.loop_guard, 500);
/// assert_eq!(config.cache.icache.block_bytes, 8);
/// assert_eq!(config.cache.dcache.block_bytes, 32);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Config {
    /// General simulation settings
    #[serde(default)]
    pub general: GeneralConfig,
    /// Run-mode settings
    #[serde(default)]
    pub execution: ExecutionConfig,
    /// Cache configuration
    #[serde(default)]
    pub cache: CacheHierarchyConfig,
}

impl Config {
    /// Parses and validates a JSON configuration document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON and a validation
    /// error for out-of-range values.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a JSON configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] when the file cannot be read, otherwise the
    /// same errors as [`Config::from_json`].
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }

    /// Checks block sizes and the loop guard.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBlockSize`] when a block size is not a
    /// power of two in `1..=256`, and [`ConfigError::ZeroLoopGuard`] when the
    /// guard is zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (cache, size) in [
            ("icache", self.cache.icache.block_bytes),
            ("dcache", self.cache.dcache.block_bytes),
        ] {
            if !size.is_power_of_two() || size > MEMORY_SIZE {
                return Err(ConfigError::InvalidBlockSize { cache, size });
            }
        }
        if self.execution.loop_guard == 0 {
            return Err(ConfigError::ZeroLoopGuard);
        }
        Ok(())
    }
}

/// General simulation settings and options.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct GeneralConfig {
    /// Record an in-memory execution trace of every executed instruction
    #[serde(default)]
    pub trace_instructions: bool,

    /// Numeral base used when a program file has no `#HEX`/`#DEC` header
    #[serde(default)]
    pub base: Base,
}

/// Run-mode settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ExecutionConfig {
    /// Steps after which a run stops and reports an infinite loop
    #[serde(default = "ExecutionConfig::default_loop_guard")]
    pub loop_guard: u32,
}

impl ExecutionConfig {
    /// Returns the default loop guard.
    const fn default_loop_guard() -> u32 {
        defaults::LOOP_GUARD
    }
}

impl Default for ExecutionConfig {
    fn default() -> Self {
        Self {
            loop_guard: defaults::LOOP_GUARD,
        }
    }
}

/// Instruction and data cache configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CacheHierarchyConfig {
    /// Instruction cache
    #[serde(default = "CacheHierarchyConfig::default_icache")]
    pub icache: CacheConfig,
    /// Data cache
    #[serde(default = "CacheHierarchyConfig::default_dcache")]
    pub dcache: CacheConfig,
}

impl CacheHierarchyConfig {
    fn default_icache() -> CacheConfig {
        CacheConfig {
            block_bytes: defaults::ICACHE_BLOCK_BYTES,
        }
    }

    fn default_dcache() -> CacheConfig {
        CacheConfig {
            block_bytes: defaults::DCACHE_BLOCK_BYTES,
        }
    }
}

impl Default for CacheHierarchyConfig {
    fn default() -> Self {
        Self {
            icache: Self::default_icache(),
            dcache: Self::default_dcache(),
        }
    }
}

/// Configuration for one single-block cache.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CacheConfig {
    /// Size of the resident block in bytes (power of two, at most 256)
    pub block_bytes: usize,
}
