use std::{fmt, str::FromStr};

use serde::Deserialize;

use crate::logger::error::LoggerError;

/// Output format of the global subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub enum LoggerFormat {
    Text,
    Json,
    Journald,
}

impl LoggerFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            LoggerFormat::Text => "text",
            LoggerFormat::Json => "json",
            LoggerFormat::Journald => "journald",
        }
    }
}

impl fmt::Display for LoggerFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LoggerFormat {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(LoggerFormat::Text),
            "json" => Ok(LoggerFormat::Json),
            "journald" | "journal" => {
                if cfg!(all(target_os = "linux", feature = "journald")) {
                    Ok(LoggerFormat::Journald)
                } else {
                    Err(LoggerError::JournaldNotSupported)
                }
            }
            _ => Err(LoggerError::InvalidFormat(s.to_string())),
        }
    }
}

impl TryFrom<String> for LoggerFormat {
    type Error = LoggerError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}
