//! `uflt16`: an unsigned 16-bit float with a 4-bit exponent and a 12-bit
//! fraction.
//!
//! ```text
//!  15    12 11                    0
//! +--------+-----------------------+
//! |  exp   |       fraction        |
//! +--------+-----------------------+
//! value = (fraction / 4096) * 2^(exp - 15)
//! ```
//!
//! There is no sign bit and no implicit leading one, so the representable
//! range is `[0, 1)` and small values lose precision gradually. There is no
//! NaN or infinity.

const EXPONENT_BIAS: i32 = 15;
const FRACTION_BITS: u32 = 12;
const FRACTION_ONE: f64 = (1u32 << FRACTION_BITS) as f64;
const FRACTION_MASK: u16 = (1 << FRACTION_BITS) - 1;
const MAX_EXPONENT: u16 = 0xF;

/// Decode a raw `uflt16`. The result is always in `[0, 1)`.
pub fn decode_uflt16(raw: u16) -> f32 {
    let exponent = i32::from(raw >> FRACTION_BITS);
    let fraction = f64::from(raw & FRACTION_MASK) / FRACTION_ONE;

    (fraction * 2f64.powi(exponent - EXPONENT_BIAS)) as f32
}

/// Encode `value` as a `uflt16`, rounding to the nearest representable value.
///
/// Values outside of `[0, 1)` are clamped: negative values and `NaN` encode
/// as `0x0000`, values of `1.0` and above encode as `0xFFFF`.
pub fn encode_uflt16(value: f32) -> u16 {
    let value = f64::from(value);

    if value.is_nan() || value <= 0.0 {
        if value < 0.0 || value.is_nan() {
            log::warn!("uflt16 cannot represent {value}, encoding as 0");
        }
        return 0;
    }

    if value >= 1.0 {
        log::warn!("uflt16 cannot represent {value}, encoding as the maximum");
        return u16::MAX;
    }

    // Pick the smallest exponent that keeps the fraction below one, which
    // leaves the most significant fraction bit set whenever possible.
    let mut exponent = MAX_EXPONENT;
    while exponent > 0 && value < 2f64.powi(i32::from(exponent) - 1 - EXPONENT_BIAS) {
        exponent -= 1;
    }

    let scaled = value * 2f64.powi(EXPONENT_BIAS - i32::from(exponent));
    let mut fraction = (scaled * FRACTION_ONE).round() as u16;

    // Rounding can carry into the next binade.
    if fraction > FRACTION_MASK {
        if exponent < MAX_EXPONENT {
            exponent += 1;
            fraction >>= 1;
        } else {
            fraction = FRACTION_MASK;
        }
    }

    (exponent << FRACTION_BITS) | fraction
}
