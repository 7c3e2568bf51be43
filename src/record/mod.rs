//! The bitmap-gated telemetry record.
//!
//! A record is one presence bitmap byte followed by the encoded bytes of every
//! field whose bit is set, in increasing bit order. Bit 7 is reserved.

mod decode;
pub use decode::{decode, decode_with, DecodeOptions, TrailingData};

mod encode;
pub use encode::{encode, ReadingsBuilder};

use crate::{derived::Derived, units::Unit};

bitflags::bitflags! {
    /// The presence bitmap.
    pub struct FieldSet: u8 {
        const BATTERY_VOLTAGE = 1 << 0;
        const SYSTEM_VOLTAGE = 1 << 1;
        const BOOT_COUNTER = 1 << 2;
        const ENVIRONMENT = 1 << 3;
        const LIGHT = 1 << 4;
        const BUS_VOLTAGE = 1 << 5;
        const PROBE_TEMPERATURE = 1 << 6;
    }
}

impl FieldSet {
    /// The fields in this set, in wire order.
    pub fn fields(&self) -> impl Iterator<Item = Field> + '_ {
        Field::ALL
            .into_iter()
            .filter(move |field| self.contains(field.flag()))
    }

    /// The number of data bytes that follow the bitmap for this set.
    pub fn data_len(&self) -> usize {
        self.fields().map(|field| field.width()).sum()
    }
}

/// A field of the record, identified by its bit in the presence bitmap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Field {
    BatteryVoltage = 0,
    SystemVoltage = 1,
    BootCounter = 2,
    /// Temperature and relative humidity, always transmitted together.
    Environment = 3,
    /// Three light channels: infrared, white and ultraviolet.
    Light = 4,
    BusVoltage = 5,
    ProbeTemperature = 6,
}

impl Field {
    /// Every field, in wire order.
    pub const ALL: [Field; 7] = [
        Field::BatteryVoltage,
        Field::SystemVoltage,
        Field::BootCounter,
        Field::Environment,
        Field::Light,
        Field::BusVoltage,
        Field::ProbeTemperature,
    ];

    pub const fn bit(&self) -> u8 {
        *self as u8
    }

    pub fn flag(&self) -> FieldSet {
        FieldSet::from_bits_truncate(1 << self.bit())
    }

    /// Encoded size of this field in bytes.
    pub const fn width(&self) -> usize {
        match self {
            Field::BatteryVoltage | Field::SystemVoltage | Field::BusVoltage => 2,
            Field::BootCounter => 1,
            Field::Environment => 4,
            Field::Light => 6,
            Field::ProbeTemperature => 2,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Field::BatteryVoltage => "Battery voltage",
            Field::SystemVoltage => "System voltage",
            Field::BootCounter => "Boot counter",
            Field::Environment => "Temperature and humidity",
            Field::Light => "Ambient light",
            Field::BusVoltage => "Bus voltage",
            Field::ProbeTemperature => "Probe temperature",
        }
    }
}

impl TryFrom<u8> for Field {
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Field::ALL
            .into_iter()
            .find(|field| field.bit() == value)
            .ok_or(value)
    }
}

impl core::fmt::Display for Field {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{} (bit {})", self.name(), self.bit())
    }
}

/// Air temperature and relative humidity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Environment {
    /// Degrees Celsius.
    pub temperature: f32,
    /// Percent, 0 to 100.
    pub humidity: f32,
}

/// Irradiance per light channel, in W/m².
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Light {
    pub infrared: f32,
    pub white: f32,
    pub ultraviolet: f32,
}

/// The readings of one reporting cycle.
///
/// A `None` field is absent from the record. This is both the encoder input
/// and the decoder output.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Readings {
    /// Volts.
    pub battery_voltage: Option<f32>,
    /// Volts.
    pub system_voltage: Option<f32>,
    pub boot_counter: Option<u8>,
    pub environment: Option<Environment>,
    pub light: Option<Light>,
    /// Volts.
    pub bus_voltage: Option<f32>,
    /// Degrees Celsius.
    pub probe_temperature: Option<f32>,
}

impl Readings {
    pub fn builder() -> ReadingsBuilder {
        ReadingsBuilder::default()
    }

    /// The presence bitmap these readings encode to.
    pub fn fields(&self) -> FieldSet {
        let mut set = FieldSet::empty();

        set.set(FieldSet::BATTERY_VOLTAGE, self.battery_voltage.is_some());
        set.set(FieldSet::SYSTEM_VOLTAGE, self.system_voltage.is_some());
        set.set(FieldSet::BOOT_COUNTER, self.boot_counter.is_some());
        set.set(FieldSet::ENVIRONMENT, self.environment.is_some());
        set.set(FieldSet::LIGHT, self.light.is_some());
        set.set(FieldSet::BUS_VOLTAGE, self.bus_voltage.is_some());
        set.set(FieldSet::PROBE_TEMPERATURE, self.probe_temperature.is_some());

        set
    }

    /// Dew point and heat index, if temperature and humidity are present.
    pub fn derived(&self) -> Option<Derived> {
        self.environment
            .map(|env| Derived::new(env.temperature, env.humidity))
    }

    /// Every present value, flattened, in wire order.
    pub fn values(&self) -> Vec<ScalarValue> {
        let mut values = Vec::new();
        let mut push = |field, quantity, unit, value| {
            values.push(ScalarValue {
                field,
                quantity,
                unit,
                value,
            })
        };

        if let Some(v) = self.battery_voltage {
            push(Field::BatteryVoltage, "Battery voltage", Unit::Volt, v);
        }

        if let Some(v) = self.system_voltage {
            push(Field::SystemVoltage, "System voltage", Unit::Volt, v);
        }

        if let Some(v) = self.boot_counter {
            push(Field::BootCounter, "Boot counter", Unit::Boot, f32::from(v));
        }

        if let Some(env) = self.environment {
            let field = Field::Environment;
            push(field, "Temperature", Unit::DegreesCelsius, env.temperature);
            push(field, "Humidity", Unit::Percent, env.humidity);
        }

        if let Some(light) = self.light {
            let (field, unit) = (Field::Light, Unit::WattPerSquareMeter);
            push(field, "Infrared light", unit, light.infrared);
            push(field, "White light", unit, light.white);
            push(field, "Ultraviolet light", unit, light.ultraviolet);
        }

        if let Some(v) = self.bus_voltage {
            push(Field::BusVoltage, "Bus voltage", Unit::Volt, v);
        }

        if let Some(v) = self.probe_temperature {
            push(
                Field::ProbeTemperature,
                "Probe temperature",
                Unit::DegreesCelsius,
                v,
            );
        }

        values
    }
}

/// One decoded engineering value and the field it came from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScalarValue {
    pub field: Field,
    pub quantity: &'static str,
    pub unit: Unit,
    pub value: f32,
}

impl ScalarValue {
    pub fn display(&self, short: bool) -> String {
        self.unit.display(short, self.value)
    }
}

/// An encoded record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    bytes: Vec<u8>,
}

impl Record {
    /// The largest possible record: the bitmap and every field.
    pub const MAX_LEN: usize = 20;

    pub fn fields(&self) -> FieldSet {
        FieldSet::from_bits_truncate(self.bytes[0])
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Always `false`: a record holds at least its bitmap.
    pub fn is_empty(&self) -> bool {
        false
    }
}

impl AsRef<[u8]> for Record {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

impl From<Record> for Vec<u8> {
    fn from(value: Record) -> Self {
        value.bytes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_table() {
        for (bit, field) in Field::ALL.iter().enumerate() {
            assert_eq!(bit as u8, field.bit());
            assert_eq!(Ok(*field), Field::try_from(bit as u8));
        }

        assert_eq!(Err(7), Field::try_from(7));
        assert_eq!(19, FieldSet::all().data_len());
        assert_eq!(Record::MAX_LEN, 1 + FieldSet::all().data_len());
    }

    #[test]
    fn reserved_bit_is_dropped() {
        let set = FieldSet::from_bits_truncate(0x81);
        assert_eq!(FieldSet::BATTERY_VOLTAGE, set);
        assert_eq!(vec![Field::BatteryVoltage], set.fields().collect::<Vec<_>>());
    }

    #[test]
    fn fields_follow_readings() {
        let readings = Readings {
            boot_counter: Some(3),
            bus_voltage: Some(5.0),
            ..Default::default()
        };

        assert_eq!(FieldSet::BOOT_COUNTER | FieldSet::BUS_VOLTAGE, readings.fields());
        assert_eq!(3, readings.fields().data_len());
        assert!(readings.derived().is_none());
    }

    #[test]
    fn values_are_in_wire_order() {
        let readings = Readings {
            probe_temperature: Some(4.0),
            battery_voltage: Some(3.3),
            environment: Some(Environment {
                temperature: 20.0,
                humidity: 40.0,
            }),
            ..Default::default()
        };

        let fields: Vec<_> = readings.values().iter().map(|v| v.field).collect();
        assert_eq!(
            vec![
                Field::BatteryVoltage,
                Field::Environment,
                Field::Environment,
                Field::ProbeTemperature
            ],
            fields
        );
    }
}
