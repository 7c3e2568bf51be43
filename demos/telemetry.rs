use std::io::ErrorKind;

use clap::{Parser, Subcommand};
use telemetry_codec::{decode_with, DecodeOptions, LogOutput, Logger, Readings, TrailingData};

#[derive(Parser)]
pub struct Command {
    /// Write the dump to this file instead of the log
    #[clap(long, short)]
    output: Option<std::path::PathBuf>,

    #[clap(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
pub enum Action {
    /// Decode a record given as hex, e.g. `3D43A72B...` or `3D 43 A7 2B ...`
    Decode {
        #[clap(required = true)]
        record: Vec<String>,
        /// Fail if bytes follow the last announced field
        #[clap(long)]
        reject_trailing: bool,
    },
    /// Encode readings into a record and print it as hex
    Encode {
        /// Battery voltage in volts
        #[clap(long)]
        battery: Option<f32>,
        /// System voltage in volts
        #[clap(long)]
        system: Option<f32>,
        /// Boot counter, transmitted modulo 256
        #[clap(long)]
        boot: Option<u32>,
        /// Air temperature in °C, requires --humidity
        #[clap(long, requires = "humidity")]
        temperature: Option<f32>,
        /// Relative humidity in %, requires --temperature
        #[clap(long, requires = "temperature")]
        humidity: Option<f32>,
        /// Infrared, white and ultraviolet irradiance in W/m²
        #[clap(long, num_args = 3, value_names = ["IR", "WHITE", "UV"])]
        light: Option<Vec<f32>>,
        /// Bus voltage in volts
        #[clap(long)]
        bus: Option<f32>,
        /// Probe temperature in °C
        #[clap(long)]
        probe: Option<f32>,
    },
}

fn error<T>(val: T) -> std::io::Error
where
    T: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    std::io::Error::new(ErrorKind::Other, val)
}

fn main() -> std::io::Result<()> {
    pretty_env_logger::formatted_builder()
        .parse_filters(&std::env::var("RUST_LOG").unwrap_or("info".to_string()))
        .init();

    let command = Command::parse();

    let output = match &command.output {
        Some(path) => LogOutput::file(path)?,
        None => LogOutput::LogTarget(log::Level::Info, "telemetry".into()),
    };

    match command.action {
        Action::Decode {
            record,
            reject_trailing,
        } => {
            let text: String = record.concat().split_whitespace().collect();
            let data = hex::decode(&text)
                .map_err(|e| error(format!("Could not parse '{text}' as hex: {e}")))?;

            let trailing_data = if reject_trailing {
                TrailingData::Reject
            } else {
                TrailingData::Ignore
            };
            let options = DecodeOptions::new().trailing_data(trailing_data);

            let readings = decode_with(&data, &options).map_err(|e| {
                log::error!("Decoding failed: {e}");
                error(e)
            })?;

            Logger::log(&output, &readings);
        }
        Action::Encode {
            battery,
            system,
            boot,
            temperature,
            humidity,
            light,
            bus,
            probe,
        } => {
            let mut builder = Readings::builder();

            if let Some(v) = battery {
                builder = builder.battery_voltage(v);
            }
            if let Some(v) = system {
                builder = builder.system_voltage(v);
            }
            if let Some(v) = boot {
                builder = builder.boot_counter(v);
            }
            if let (Some(t), Some(rh)) = (temperature, humidity) {
                builder = builder.environment(t, rh);
            }
            if let Some([ir, white, uv]) = light.as_deref() {
                builder = builder.light(*ir, *white, *uv);
            }
            if let Some(v) = bus {
                builder = builder.bus_voltage(v);
            }
            if let Some(v) = probe {
                builder = builder.probe_temperature(v);
            }

            let record = builder.encode();

            Logger::log(&output, &record);
            println!("{}", hex::encode_upper(record.as_bytes()));
        }
    }

    Ok(())
}
