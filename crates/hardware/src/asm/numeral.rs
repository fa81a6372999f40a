//! Numeral Parser.
//!
//! Permissive base-aware integer parsing shared by the assembler, the base
//! converter and the driver. Parsing reads an optional sign, an optional `0x`
//! prefix when the base is hexadecimal, and then the longest run of valid
//! digits. Anything after that run is ignored. A token with no leading digits
//! has no value.
//!
//! [`parse_literal`] never fails: a token without a value assembles as zero.

use crate::common::Base;

/// Parses the leading integer of `token` in `base`.
///
/// Returns `None` when no digits can be read. Leading whitespace is skipped.
/// Accumulation wraps on overflow; only the low byte matters to callers.
pub fn parse(token: &str, base: Base) -> Option<i64> {
    let radix = base.radix();
    let mut rest = token.trim_start();

    let negative = match rest.as_bytes().first() {
        Some(b'-') => {
            rest = &rest[1..];
            true
        }
        Some(b'+') => {
            rest = &rest[1..];
            false
        }
        _ => false,
    };

    if base == Base::Hex {
        if let Some(stripped) = rest.strip_prefix("0x").or_else(|| rest.strip_prefix("0X")) {
            rest = stripped;
        }
    }

    let mut value: i64 = 0;
    let mut digits = 0usize;
    for digit in rest.chars().map_while(|c| c.to_digit(radix)) {
        value = value.wrapping_mul(i64::from(radix)).wrapping_add(i64::from(digit));
        digits += 1;
    }

    if digits == 0 {
        return None;
    }
    Some(if negative { value.wrapping_neg() } else { value })
}

/// Parses a literal and masks it to one byte, defaulting to 0.
///
/// Empty tokens and tokens without leading digits produce 0. Negative values
/// wrap (`-1` becomes 255).
pub fn parse_literal(token: &str, base: Base) -> u8 {
    parse(token, base).map_or(0, |v| (v & 0xFF) as u8)
}

/// Renders a value: plain digits in decimal, uppercase digits in hexadecimal.
///
/// No zero padding and no prefix. Negative values get a leading `-`.
pub fn format<T: Into<i64>>(value: T, base: Base) -> String {
    let value: i64 = value.into();
    let sign = if value < 0 { "-" } else { "" };
    let magnitude = value.unsigned_abs();
    match base {
        Base::Dec => format!("{sign}{magnitude}"),
        Base::Hex => format!("{sign}{magnitude:X}"),
    }
}
