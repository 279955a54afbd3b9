use crate::DEFAULT_LOG_LEVEL;

use std::str::FromStr;

use log::LevelFilter;
use serde::{Deserialize, Deserializer};

/// Verbosity setting parsed from the config file or the SIQ_LOG_LEVEL
/// override. Parsing is forgiving: an unrecognized value falls back to
/// the default instead of refusing to start the server.
#[derive(Debug, Clone, Copy)]
pub struct LogLevel(pub LevelFilter);

impl LogLevel {
    fn parse(value: &str) -> LevelFilter {
        match value.to_ascii_lowercase().as_str() {
            "off" => LevelFilter::Off,
            "error" => LevelFilter::Error,
            "warn" => LevelFilter::Warn,
            "info" => LevelFilter::Info,
            "debug" => LevelFilter::Debug,
            "trace" => LevelFilter::Trace,
            _ => DEFAULT_LOG_LEVEL,
        }
    }
}

impl<'de> Deserialize<'de> for LogLevel {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Ok(LogLevel(Self::parse(&value)))
    }
}

impl FromStr for LogLevel {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(LogLevel(Self::parse(s)))
    }
}
