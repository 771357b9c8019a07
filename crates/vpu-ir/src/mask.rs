//! # Mask codec
//!
//! Layer descriptions carry per-axis flags as text, e.g. `"1,0,1"`. The target IR
//! stores them as a packed `u32` where bit `i` is set iff the `i`-th flag is `1`.
//! Axis 0 maps to bit 0.

use crate::error::{Error, Result};

/// Separator between per-axis flags. Does not advance the axis counter.
pub const MASK_SEPARATOR: char = ',';

/// Maximum number of axes a packed mask can describe.
pub const MAX_MASK_AXES: u32 = u32::BITS;

/// Packs a textual per-axis mask into an integer bitmask.
///
/// The empty string encodes to `0`. Characters other than `'0'`, `'1'` and
/// [`MASK_SEPARATOR`] are rejected; no whitespace trimming is performed.
pub fn encode_mask(text: &str) -> Result<u32> {
    let mut result = 0u32;
    let mut idx = 0u32;

    for character in text.chars() {
        match character {
            MASK_SEPARATOR => continue,
            '1' | '0' => {
                if idx >= MAX_MASK_AXES {
                    return Err(Error::MaskTooLong {
                        max_axes: MAX_MASK_AXES,
                    });
                }
                if character == '1' {
                    result |= 1 << idx;
                }
                idx += 1;
            }
            _ => return Err(Error::MaskFormat { character }),
        }
    }

    Ok(result)
}
