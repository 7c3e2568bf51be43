//! Scalar codecs shared by the record encoder and decoder.
//!
//! All codecs are total: every bit pattern decodes to a value, and every
//! input value encodes to some bit pattern (out-of-range values saturate).

mod fixed;
pub use fixed::{decode_signed, decode_unsigned, encode_signed, encode_unsigned};

mod uflt16;
pub use uflt16::{decode_uflt16, encode_uflt16};

/// Scale of voltage fields: one LSB is 1/4096 V.
pub const VOLTAGE_SCALE: f32 = 1.0 / 4096.0;

/// Scale of temperature fields: one LSB is 1/256 °C.
pub const TEMPERATURE_SCALE: f32 = 1.0 / 256.0;

/// Scale of the humidity field, chosen so that `0xFFFF` is exactly 100 %.
pub const HUMIDITY_SCALE: f32 = 100.0 / 65535.0;

/// Light channels are divided by this before [`encode_uflt16`] and multiplied
/// by it after [`decode_uflt16`].
pub const LIGHT_SCALE: f32 = (1u32 << 24) as f32;
