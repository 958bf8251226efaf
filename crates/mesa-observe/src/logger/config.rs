use std::io::IsTerminal;

use serde::Deserialize;

use crate::logger::format::LoggerFormat;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    pub format: LoggerFormat,
    /// `EnvFilter` directives, e.g. `"info,mesa_api=debug"`.
    pub level: String,
    pub with_targets: bool,
    pub use_color: bool,
    /// Emit an event when a command span closes, with its busy/idle time.
    pub span_timings: bool,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        let use_color = cfg!(test) || std::io::stdout().is_terminal();
        Self {
            format: LoggerFormat::Text,
            level: "info".to_string(),
            with_targets: true,
            use_color,
            span_timings: false,
        }
    }
}
