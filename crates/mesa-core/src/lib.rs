pub mod auth;
pub use auth::{Authorizer, CredentialValidator, Grant, Requirement, StaticCredentials};

pub mod config;
pub use config::{ParseLimits, ParsedConfiguration, apply_defaults_if_unset, parse_job};

pub mod error;
pub use error::{AuthError, ConfigError, ScheduleError, StorageError};

pub mod metrics;
pub use metrics::{MetricsBackend, NoopMetrics};

pub mod ports;
pub use ports::{CronRegistry, MaintenanceCoordinator, QuotaLedger, SchedulerCore, TaskStore};

pub mod state;
pub use state::{StoreSnapshot, TaskState};
