use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    #[error("unknown capability: {0}")]
    UnknownCapability(String),
    #[error("unknown schedule status: {0}")]
    UnknownStatus(String),
}
