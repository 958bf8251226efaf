//! Logging setup for mesa services.
//!
//! ```no_run
//! use mesa_observe::{LoggerConfig, logger_init};
//!
//! let cfg = LoggerConfig::default();
//! logger_init(&cfg).expect("logger");
//! ```

mod logger;
pub use logger::*;
