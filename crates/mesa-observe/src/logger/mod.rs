mod config;
mod error;
mod format;
mod log;

pub use config::LoggerConfig;
pub use error::LoggerError;
pub use format::LoggerFormat;

/// Install the global subscriber described by `cfg`.
///
/// Fails with [`LoggerError::AlreadyInitialized`] when a subscriber is already set.
pub fn logger_init(cfg: &LoggerConfig) -> Result<(), LoggerError> {
    match cfg.format {
        LoggerFormat::Text => log::Logger::text(cfg),
        LoggerFormat::Json => log::Logger::json(cfg),
        LoggerFormat::Journald => log::Logger::journald(cfg),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_init_is_rejected() {
        let cfg = LoggerConfig {
            level: "debug".into(),
            ..LoggerConfig::default()
        };

        // Another test binary may have installed a subscriber already; only the
        // second call has a guaranteed outcome.
        let _ = logger_init(&cfg);
        assert!(matches!(
            logger_init(&cfg),
            Err(LoggerError::AlreadyInitialized)
        ));
    }

    #[test]
    fn invalid_level_is_reported_before_install() {
        let cfg = LoggerConfig {
            level: "info,mesa_api=loud".into(),
            ..LoggerConfig::default()
        };
        assert!(matches!(
            logger_init(&cfg),
            Err(LoggerError::InvalidLogLevel(_))
        ));
    }
}
