//! telemetry-codec: the uplink record format of a battery-powered
//! environmental sensor node.
//!
//! A record is a presence bitmap followed by the fields it announces, in bit
//! order. The [`codec`] module holds the scalar encodings the fields are
//! built from, [`record`] encodes and decodes whole records, and [`derived`]
//! computes dew point and heat index from decoded temperature and humidity.
//!
//! ```
//! use telemetry_codec::{decode, Readings};
//!
//! let record = Readings::builder()
//!     .battery_voltage(3.9)
//!     .boot_counter(7)
//!     .environment(31.0, 60.0)
//!     .encode();
//!
//! let readings = decode(record.as_bytes()).unwrap();
//! assert_eq!(Some(7), readings.boot_counter);
//!
//! let derived = readings.derived().unwrap();
//! assert!(derived.heat_index.is_some());
//! ```

pub mod codec;

pub mod derived;
pub use derived::Derived;

mod error;
pub use error::DecodeError;

pub mod record;
pub use record::{
    decode, decode_with, encode, DecodeOptions, Environment, Field, FieldSet, Light, Readings,
    Record, ScalarValue, TrailingData,
};

pub mod units;
pub use units::Unit;

#[macro_use]
mod fmt;

pub use fmt::{LogItem, LogOutput, Loggable, Logger};
