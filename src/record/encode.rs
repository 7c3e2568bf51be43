use crate::codec::{
    encode_signed, encode_uflt16, encode_unsigned, HUMIDITY_SCALE, LIGHT_SCALE, TEMPERATURE_SCALE,
    VOLTAGE_SCALE,
};

use super::{Environment, Field, Light, Readings, Record};

/// Encode `readings` into a record.
///
/// Encoding cannot fail. Values that do not fit their field are clamped to
/// the closest representable value.
pub fn encode(readings: &Readings) -> Record {
    let fields = readings.fields();

    let mut bytes = Vec::with_capacity(1 + fields.data_len());
    bytes.push(fields.bits());

    for field in fields.fields() {
        let before = bytes.len();

        match field {
            Field::BatteryVoltage => voltage(&mut bytes, readings.battery_voltage),
            Field::SystemVoltage => voltage(&mut bytes, readings.system_voltage),
            Field::BootCounter => bytes.extend(readings.boot_counter),
            Field::Environment => {
                if let Some(Environment {
                    temperature,
                    humidity,
                }) = readings.environment
                {
                    bytes.extend(encode_signed::<2>(temperature, TEMPERATURE_SCALE));
                    bytes.extend(encode_unsigned::<2>(humidity, HUMIDITY_SCALE));
                }
            }
            Field::Light => {
                if let Some(Light {
                    infrared,
                    white,
                    ultraviolet,
                }) = readings.light
                {
                    for channel in [infrared, white, ultraviolet] {
                        bytes.extend(encode_uflt16(channel / LIGHT_SCALE).to_be_bytes());
                    }
                }
            }
            Field::BusVoltage => voltage(&mut bytes, readings.bus_voltage),
            Field::ProbeTemperature => {
                if let Some(temperature) = readings.probe_temperature {
                    bytes.extend(encode_signed::<2>(temperature, TEMPERATURE_SCALE));
                }
            }
        }

        debug_assert_eq!(field.width(), bytes.len() - before);
    }

    log::trace!("Encoded {:?} into {} bytes", fields, bytes.len());

    Record { bytes }
}

fn voltage(bytes: &mut Vec<u8>, value: Option<f32>) {
    if let Some(value) = value {
        bytes.extend(encode_signed::<2>(value, VOLTAGE_SCALE));
    }
}

/// Collects readings over a measurement cycle.
///
/// Only the last value given for a field is kept.
#[derive(Debug, Clone, Default)]
pub struct ReadingsBuilder {
    readings: Readings,
}

impl ReadingsBuilder {
    pub fn battery_voltage(mut self, volts: f32) -> Self {
        self.readings.battery_voltage = Some(volts);
        self
    }

    pub fn system_voltage(mut self, volts: f32) -> Self {
        self.readings.system_voltage = Some(volts);
        self
    }

    /// The boot counter is transmitted modulo 256.
    pub fn boot_counter(mut self, boots: u32) -> Self {
        self.readings.boot_counter = Some((boots & 0xFF) as u8);
        self
    }

    pub fn environment(mut self, temperature: f32, humidity: f32) -> Self {
        self.readings.environment = Some(Environment {
            temperature,
            humidity,
        });
        self
    }

    pub fn light(mut self, infrared: f32, white: f32, ultraviolet: f32) -> Self {
        self.readings.light = Some(Light {
            infrared,
            white,
            ultraviolet,
        });
        self
    }

    pub fn bus_voltage(mut self, volts: f32) -> Self {
        self.readings.bus_voltage = Some(volts);
        self
    }

    pub fn probe_temperature(mut self, celsius: f32) -> Self {
        self.readings.probe_temperature = Some(celsius);
        self
    }

    pub fn build(self) -> Readings {
        self.readings
    }

    pub fn encode(self) -> Record {
        encode(&self.readings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::FieldSet;

    #[test]
    fn empty() {
        let record = encode(&Readings::default());
        assert_eq!(&[0x00], record.as_bytes());
        assert_eq!(FieldSet::empty(), record.fields());
    }

    #[test]
    fn battery_and_boot() {
        let record = Readings::builder()
            .boot_counter(66)
            .battery_voltage(-0.5)
            .encode();

        assert_eq!(&[0x05, 0xF8, 0x00, 0x42], record.as_bytes());
    }

    #[test]
    fn boot_counter_wraps() {
        let record = Readings::builder().boot_counter(256 + 43).encode();
        assert_eq!(&[0x04, 0x2B], record.as_bytes());
    }

    #[test]
    fn length_matches_fields() {
        let record = Readings::builder()
            .battery_voltage(4.2)
            .system_voltage(3.3)
            .boot_counter(1)
            .environment(21.0, 45.0)
            .light(100.0, 200.0, 3.0)
            .bus_voltage(5.0)
            .probe_temperature(-12.5)
            .encode();

        assert_eq!(0x7F, record.as_bytes()[0]);
        assert_eq!(Record::MAX_LEN, record.len());
    }

    #[test]
    fn reserved_bit_is_clear() {
        let record = Readings::builder().probe_temperature(30.0).encode();
        assert_eq!(0x40, record.as_bytes()[0]);
        assert_eq!(&[0x40, 0x1E, 0x00], record.as_bytes());
    }

    #[test]
    fn light_is_scaled() {
        let record = Readings::builder().light(5.75, 9.125, 0.375).encode();
        // All three are too small to normalise and land in exponent 0.
        assert_eq!(
            &[0x10, 0x00, 0x2E, 0x00, 0x49, 0x00, 0x03],
            record.as_bytes()
        );
    }
}
