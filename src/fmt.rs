//! Human-readable dumps of records and readings.

use crate::{
    derived::{fahrenheit, Derived},
    record::{Readings, Record},
    units::Unit,
};

/// Where [`Logger`] writes its lines.
#[derive(Debug, Clone)]
pub enum LogOutput {
    Log(log::Level),
    LogTarget(log::Level, String),
    StdOut,
    StdErr,
    #[cfg(feature = "log-to-file")]
    File(std::sync::Arc<parking_lot::Mutex<std::fs::File>>),
}

impl From<log::Level> for LogOutput {
    fn from(value: log::Level) -> Self {
        Self::Log(value)
    }
}

impl LogOutput {
    #[cfg(feature = "log-to-file")]
    pub fn file(path: impl AsRef<std::path::Path>) -> std::io::Result<Self> {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)?;

        Ok(Self::File(std::sync::Arc::new(parking_lot::Mutex::new(file))))
    }

    fn print(&self, msg: &str) {
        match self {
            LogOutput::Log(level) => log::log!(*level, "{}", msg),
            LogOutput::LogTarget(level, target) => {
                log::log!(target: target, *level, "{}", msg)
            }
            LogOutput::StdOut => println!("{}", msg),
            LogOutput::StdErr => eprintln!("{}", msg),
            #[cfg(feature = "log-to-file")]
            LogOutput::File(file) => {
                use std::io::Write;

                let mut file = file.lock();
                file.write_all(msg.as_bytes()).ok();
                file.write_all(b"\n").ok();
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LogItem {
    level: usize,
    title: String,
    value: Option<String>,
}

impl LogItem {
    pub fn new<T: Into<String>, V: Into<String>>(level: usize, title: T, value: Option<V>) -> Self {
        Self {
            level,
            title: title.into(),
            value: value.map(Into::into),
        }
    }
}

impl<T: ToString, V: ToString> From<(usize, T, V)> for LogItem {
    fn from((level, title, value): (usize, T, V)) -> Self {
        Self::new(level, title.to_string(), Some(value.to_string()))
    }
}

impl<T: ToString> From<(usize, T)> for LogItem {
    fn from((level, value): (usize, T)) -> Self {
        Self::new::<_, String>(level, value.to_string(), None)
    }
}

pub struct Logger;

impl Logger {
    pub fn log<T>(output: &LogOutput, loggable: &T)
    where
        T: Loggable,
    {
        Self::lines(&loggable.as_log())
            .iter()
            .for_each(|line| output.print(line));
    }

    /// Render items as lines: the first item is the heading, the others are
    /// indented by level and have their values aligned per level.
    fn lines(items: &[LogItem]) -> Vec<String> {
        let mut lines = Vec::with_capacity(items.len());

        let Some((first, rest)) = items.split_first() else {
            return lines;
        };

        lines.push(first.title.clone());

        let right_align = |level: usize| {
            rest.iter()
                .filter(|i| i.level == level && i.value.is_some())
                .map(|i| i.title.len())
                .max()
                .unwrap_or(0)
        };

        for LogItem {
            level,
            title,
            value,
        } in rest
        {
            let front_padding = " ".repeat(level * 2);

            let line = if let Some(value) = value {
                let value_padding = " ".repeat(right_align(*level).saturating_sub(title.len()));
                format!("{front_padding}{title}: {value_padding}{value}")
            } else {
                format!("{front_padding}{title}")
            };

            lines.push(line);
        }

        lines
    }
}

pub trait Loggable {
    fn as_log(&self) -> Vec<LogItem>;
}

#[macro_export]
macro_rules ! log_vec {
    [$($msg:tt)*] => {
        $crate::to_log!(vec: $($msg)*)
    }
}

#[macro_export]
macro_rules! to_log {
    ([$($array:tt)*],) => {
        vec![$($array)*]
    };

    ([$($array:tt)*], ($level:literal, $title:expr, $value:expr)) => {
        $crate::to_log!([$($array)* $crate::LogItem::from(($level, $title, $value)),],)
    };

    ([$($array:tt)*], ($level:literal, $title:expr)) => {
        $crate::to_log!([$($array)* $crate::LogItem::from(($level, $title)),],)
    };

    ([$($array:tt)*], ($level:literal, $title:expr, $value:expr), $($msg:tt)*) => {
        $crate::to_log!([$($array)* $crate::LogItem::from(($level, $title, $value)),], $($msg)*)
    };

    ([$($array:tt)*], ($level:literal, $title:expr), $($msg:tt)*) => {
        $crate::to_log!([$($array)* $crate::LogItem::from(($level, $title)),], $($msg)*)
    };

    (vec: $($msg:tt)*) => {
        $crate::to_log!([], $($msg)*)
    };
}

impl Loggable for Readings {
    fn as_log(&self) -> Vec<LogItem> {
        let mut log = log_vec![
            (0, "Telemetry readings"),
            (1, "Fields", format!("0x{:02X}", self.fields().bits())),
        ];

        let values = self.values();

        if values.is_empty() {
            log.push((1, "No fields present").into());
        }

        values
            .iter()
            .for_each(|v| log.push((1, v.quantity, v.display(true)).into()));

        if let Some(derived) = self.derived() {
            log.extend(derived.as_log().into_iter().skip(1));
        }

        log
    }
}

impl Loggable for Derived {
    fn as_log(&self) -> Vec<LogItem> {
        let celsius = Unit::DegreesCelsius;

        let heat_index = match self.heat_index {
            Some(hi) => format!(
                "{} ({})",
                celsius.display(true, hi),
                Unit::DegreesFahrenheit.display(true, fahrenheit(hi))
            ),
            None => "Not applicable".into(),
        };

        log_vec![
            (0, "Derived values"),
            (1, "Dew point", celsius.display(true, self.dew_point)),
            (1, "Heat index", heat_index),
        ]
    }
}

impl Loggable for Record {
    fn as_log(&self) -> Vec<LogItem> {
        let bytes: Vec<_> = self.as_bytes().iter().map(|b| format!("{b:02X}")).collect();

        let mut log = log_vec![
            (0, "Telemetry record"),
            (1, "Length", self.len()),
            (1, "Bytes", bytes.join(" ")),
        ];

        self.fields()
            .fields()
            .for_each(|field| log.push((2, field).into()));

        log
    }
}
