//! Big-endian fixed point of `N` bytes.
//!
//! `N` must be in `1..=4`, any other width fails to build. Encoding rounds
//! half away from zero and saturates at the bounds of the wire integer. `NaN`
//! encodes as zero.
//!
//! ```compile_fail
//! let _ = telemetry_codec::codec::encode_signed::<0>(1.0, 1.0);
//! ```
//!
//! ```compile_fail
//! let _ = telemetry_codec::codec::decode_unsigned::<9>([0; 9], 1.0);
//! ```

struct Width<const N: usize>;

impl<const N: usize> Width<N> {
    const BITS: u32 = {
        assert!(N >= 1 && N <= 4, "fixed point fields are 1 to 4 bytes wide");
        8 * N as u32
    };
}

fn signed_bounds<const N: usize>() -> (i64, i64) {
    let bits = Width::<N>::BITS;
    (-(1i64 << (bits - 1)), (1i64 << (bits - 1)) - 1)
}

fn unsigned_max<const N: usize>() -> i64 {
    (1i64 << Width::<N>::BITS) - 1
}

fn quantize(value: f32, scale: f32, min: i64, max: i64) -> i64 {
    let raw = (f64::from(value) / f64::from(scale)).round();

    if raw.is_nan() {
        return 0;
    }

    if raw < min as f64 || raw > max as f64 {
        log::warn!("Value {value} does not fit the wire range [{min}, {max}] and was clamped");
    }

    // `as` saturates for infinities, the clamp takes care of the rest.
    (raw as i64).clamp(min, max)
}

fn to_be<const N: usize>(raw: i64) -> [u8; N] {
    let bytes = raw.to_be_bytes();
    let mut out = [0u8; N];
    out.copy_from_slice(&bytes[bytes.len() - N..]);
    out
}

fn from_be<const N: usize>(bytes: [u8; N]) -> i64 {
    bytes
        .iter()
        .fold(0i64, |acc, &byte| (acc << 8) | i64::from(byte))
}

/// Encode `value` as a big-endian two's complement integer of `round(value / scale)`.
pub fn encode_signed<const N: usize>(value: f32, scale: f32) -> [u8; N] {
    let (min, max) = signed_bounds::<N>();
    to_be(quantize(value, scale, min, max))
}

/// Decode a big-endian two's complement integer and multiply it by `scale`.
pub fn decode_signed<const N: usize>(bytes: [u8; N], scale: f32) -> f32 {
    let shift = 64 - Width::<N>::BITS;
    let raw = (from_be(bytes) << shift) >> shift;
    (raw as f64 * f64::from(scale)) as f32
}

/// Encode `value` as a big-endian unsigned integer of `round(value / scale)`.
pub fn encode_unsigned<const N: usize>(value: f32, scale: f32) -> [u8; N] {
    to_be(quantize(value, scale, 0, unsigned_max::<N>()))
}

/// Decode a big-endian unsigned integer and multiply it by `scale`.
pub fn decode_unsigned<const N: usize>(bytes: [u8; N], scale: f32) -> f32 {
    let _ = Width::<N>::BITS;
    (from_be(bytes) as f64 * f64::from(scale)) as f32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{HUMIDITY_SCALE, TEMPERATURE_SCALE, VOLTAGE_SCALE};

    #[test]
    fn signed_known_values() {
        assert_eq!([0x18, 0x00], encode_signed::<2>(1.5, VOLTAGE_SCALE));
        assert_eq!([0xF8, 0x00], encode_signed::<2>(-0.5, VOLTAGE_SCALE));
        assert_eq!(1.5, decode_signed([0x18, 0x00], VOLTAGE_SCALE));
        assert_eq!(-0.5, decode_signed([0xF8, 0x00], VOLTAGE_SCALE));
        assert_eq!(-1.0, decode_signed([0xFF], 1.0));
    }

    #[test]
    fn signed_saturates() {
        assert_eq!([0x7F, 0xFF], encode_signed::<2>(100.0, VOLTAGE_SCALE));
        assert_eq!([0x80, 0x00], encode_signed::<2>(-100.0, VOLTAGE_SCALE));
        assert_eq!([0x7F], encode_signed::<1>(f32::INFINITY, 1.0));
        assert_eq!([0x80], encode_signed::<1>(f32::NEG_INFINITY, 1.0));
        assert_eq!([0x00, 0x00], encode_signed::<2>(f32::NAN, VOLTAGE_SCALE));
    }

    #[test]
    fn signed_rounds_to_nearest() {
        // 25.55 / (1/256) = 6540.8
        assert_eq!([0x19, 0x8D], encode_signed::<2>(25.55, TEMPERATURE_SCALE));
    }

    #[test]
    fn unsigned_known_values() {
        assert_eq!([0xFF, 0xFF], encode_unsigned::<2>(100.0, HUMIDITY_SCALE));
        assert_eq!(100.0, decode_unsigned([0xFF, 0xFF], HUMIDITY_SCALE));
        assert_eq!(0.0, decode_unsigned([0x00, 0x00], HUMIDITY_SCALE));
        assert_eq!([0x8E, 0x14], encode_unsigned::<2>(55.5, HUMIDITY_SCALE));
    }

    #[test]
    fn unsigned_saturates() {
        assert_eq!([0x00, 0x00], encode_unsigned::<2>(-3.0, HUMIDITY_SCALE));
        assert_eq!([0xFF, 0xFF], encode_unsigned::<2>(140.0, HUMIDITY_SCALE));
        assert_eq!([0xFF], encode_unsigned::<1>(300.0, 1.0));
    }

    #[test]
    fn narrowest_and_widest_fields() {
        assert_eq!([0xFF], encode_signed::<1>(-1.0, 1.0));
        assert_eq!([0xFF], encode_unsigned::<1>(255.0, 1.0));

        assert_eq!([0x80, 0x00, 0x00, 0x00], encode_signed::<4>(-1e12, 1.0));
        assert_eq!([0x7F, 0xFF, 0xFF, 0xFF], encode_signed::<4>(1e12, 1.0));
        assert_eq!([0xFF; 4], encode_unsigned::<4>(1e12, 1.0));

        assert_eq!(-2147483648.0, decode_signed([0x80, 0x00, 0x00, 0x00], 1.0));
        assert_eq!(-1.0, decode_signed([0xFF; 4], 1.0));
        assert_eq!(4294967295.0, decode_unsigned([0xFF; 4], 1.0));
    }

    #[test]
    fn every_16_bit_pattern_round_trips() {
        for raw in 0..=u16::MAX {
            let bytes = raw.to_be_bytes();

            let value = decode_signed(bytes, VOLTAGE_SCALE);
            assert_eq!(bytes, encode_signed::<2>(value, VOLTAGE_SCALE));

            let value = decode_unsigned(bytes, HUMIDITY_SCALE);
            assert_eq!(bytes, encode_unsigned::<2>(value, HUMIDITY_SCALE));
        }
    }
}
