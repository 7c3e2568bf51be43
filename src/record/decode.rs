use crate::{
    codec::{
        decode_signed, decode_uflt16, decode_unsigned, HUMIDITY_SCALE, LIGHT_SCALE,
        TEMPERATURE_SCALE, VOLTAGE_SCALE,
    },
    DecodeError,
};

use super::{Environment, Field, FieldSet, Light, Readings};

/// What to do with bytes that follow the last field announced by the bitmap.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TrailingData {
    /// Skip them. Newer nodes may append data that older decoders do not know.
    #[default]
    Ignore,
    /// Fail with [`DecodeError::TrailingData`].
    Reject,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecodeOptions {
    pub trailing_data: TrailingData,
}

impl DecodeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn trailing_data(mut self, trailing_data: TrailingData) -> Self {
        self.trailing_data = trailing_data;
        self
    }
}

/// Decode a record, ignoring trailing data.
pub fn decode(data: &[u8]) -> Result<Readings, DecodeError> {
    decode_with(data, &DecodeOptions::default())
}

/// Decode a record with the given options.
pub fn decode_with(data: &[u8], options: &DecodeOptions) -> Result<Readings, DecodeError> {
    let (&bitmap, mut rest) = data.split_first().ok_or(DecodeError::MalformedRecord)?;

    if bitmap & 0x80 == 0x80 {
        log::debug!("Reserved bit 7 is set in bitmap 0x{bitmap:02X}, ignoring it");
    }

    let fields = FieldSet::from_bits_truncate(bitmap);

    // Check the length up front so that no field is produced for a
    // truncated record.
    let mut needed = 1;
    for field in fields.fields() {
        needed += field.width();
        if needed > data.len() {
            return Err(DecodeError::TruncatedRecord {
                field,
                needed,
                available: data.len(),
            });
        }
    }

    if needed < data.len() {
        match options.trailing_data {
            TrailingData::Ignore => log::debug!(
                "Ignoring {} trailing bytes after {fields:?}",
                data.len() - needed
            ),
            TrailingData::Reject => {
                return Err(DecodeError::TrailingData {
                    expected: needed,
                    actual: data.len(),
                })
            }
        }
    }

    let mut readings = Readings::default();

    for field in fields.fields() {
        let (bytes, remaining) = rest.split_at(field.width());
        rest = remaining;

        match field {
            Field::BatteryVoltage => readings.battery_voltage = Some(voltage(bytes)),
            Field::SystemVoltage => readings.system_voltage = Some(voltage(bytes)),
            Field::BootCounter => readings.boot_counter = Some(bytes[0]),
            Field::Environment => {
                readings.environment = Some(Environment {
                    temperature: decode_signed([bytes[0], bytes[1]], TEMPERATURE_SCALE),
                    humidity: decode_unsigned([bytes[2], bytes[3]], HUMIDITY_SCALE),
                })
            }
            Field::Light => {
                let channel = |i: usize| {
                    let raw = u16::from_be_bytes([bytes[2 * i], bytes[2 * i + 1]]);
                    decode_uflt16(raw) * LIGHT_SCALE
                };

                readings.light = Some(Light {
                    infrared: channel(0),
                    white: channel(1),
                    ultraviolet: channel(2),
                })
            }
            Field::BusVoltage => readings.bus_voltage = Some(voltage(bytes)),
            Field::ProbeTemperature => {
                let temperature = decode_signed([bytes[0], bytes[1]], TEMPERATURE_SCALE);
                readings.probe_temperature = Some(temperature);
            }
        }

        log::trace!("Decoded {field} from {bytes:02X?}");
    }

    Ok(readings)
}

fn voltage(bytes: &[u8]) -> f32 {
    decode_signed([bytes[0], bytes[1]], VOLTAGE_SCALE)
}
