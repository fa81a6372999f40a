//! Numeral base setting.
//!
//! A single base governs how operand and data literals are parsed from source
//! text and how values are rendered back. The assembler and the driver must use
//! the same base within one assembly.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::constants::{DEC_HEADER, HEX_HEADER};

/// Radix used for literals in source text and for rendering values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum Base {
    /// Base 10 (plain digits).
    #[default]
    #[serde(alias = "DEC", alias = "dec")]
    Dec,
    /// Base 16 (uppercase digits when rendered).
    #[serde(alias = "HEX", alias = "hex")]
    Hex,
}

impl Base {
    /// Returns the numeric radix (10 or 16).
    pub const fn radix(self) -> u32 {
        match self {
            Self::Dec => 10,
            Self::Hex => 16,
        }
    }

    /// Returns the program-file header line that selects this base.
    pub const fn header(self) -> &'static str {
        match self {
            Self::Dec => DEC_HEADER,
            Self::Hex => HEX_HEADER,
        }
    }

    /// Recognizes a program-file header line (`#HEX` or `#DEC`).
    ///
    /// The line is trimmed and compared case-insensitively.
    pub fn from_header(line: &str) -> Option<Self> {
        let line = line.trim();
        if line.eq_ignore_ascii_case(HEX_HEADER) {
            Some(Self::Hex)
        } else if line.eq_ignore_ascii_case(DEC_HEADER) {
            Some(Self::Dec)
        } else {
            None
        }
    }
}

impl fmt::Display for Base {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Dec => write!(f, "DEC"),
            Self::Hex => write!(f, "HEX"),
        }
    }
}

/// Error returned when a base name is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown numeral base '{0}' (expected dec, hex, 10 or 16)")]
pub struct ParseBaseError(pub String);

impl FromStr for Base {
    type Err = ParseBaseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dec" | "10" | "decimal" => Ok(Self::Dec),
            "hex" | "16" | "hexadecimal" => Ok(Self::Hex),
            _ => Err(ParseBaseError(s.to_string())),
        }
    }
}
