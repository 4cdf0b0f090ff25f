//! Value masking.
//!
//! Invariants:
//! - Output has exactly one mask character per input character (Unicode scalar).
//! - The empty string masks to the empty string.

use crate::constants::MASK_CHAR;

/// Replace every character of `value` with [`MASK_CHAR`], preserving length.
pub fn mask(value: &str) -> String {
    std::iter::repeat_n(MASK_CHAR, value.chars().count()).collect()
}
