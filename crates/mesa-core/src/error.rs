use thiserror::Error;

/// Credential check failure.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("{0}")]
    Denied(String),
}

/// Scheduler rejection. The message is caller-facing and propagated verbatim.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ScheduleError {
    #[error("{0}")]
    Rejected(String),
}

impl ScheduleError {
    pub fn rejected(message: impl Into<String>) -> Self {
        ScheduleError::Rejected(message.into())
    }
}

/// Infrastructure failure in a storage-backed collaborator.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StorageError {
    #[error("storage failure: {0}")]
    Failure(String),
    #[error("task state lock poisoned")]
    Poisoned,
}

impl StorageError {
    pub fn failure(message: impl Into<String>) -> Self {
        StorageError::Failure(message.into())
    }
}

/// Rejection raised by the job validation pipeline.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("job must declare a positive instance count")]
    MissingInstanceCount,
    #[error("instance count must be positive, got {0}")]
    NonPositiveInstanceCount(i32),
    #[error("job must declare a task template")]
    MissingTaskConfig,
    #[error("instance count {count} exceeds the limit of {max} tasks per job")]
    TooManyTasks { count: usize, max: usize },
    #[error("{field} is not a valid identifier: {value:?}")]
    BadIdentifier { field: &'static str, value: String },
    #[error("job key role {key_role:?} does not match owner role {owner_role:?}")]
    RoleMismatch { key_role: String, owner_role: String },
    #[error("instance {instance}: {resource} must be positive")]
    NonPositiveResource {
        instance: u32,
        resource: &'static str,
    },
    #[error("only one value may be used with the dedicated attribute, got {0}")]
    MultipleDedicatedValues(usize),
    #[error("a limit constraint may not be used with the dedicated attribute")]
    DedicatedLimit,
    #[error("role {role:?} may not use dedicated hosts {value:?}")]
    UnauthorizedDedicated { role: String, value: String },
    #[error("value constraint on {0:?} must name at least one value")]
    EmptyValueConstraint(String),
    #[error("limit constraint on {name:?} must be positive, got {limit}")]
    NonPositiveLimit { name: String, limit: i32 },
}
