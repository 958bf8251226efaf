use thiserror::Error;

use mesa_core::{AuthError, ConfigError, ScheduleError, StorageError};
use mesa_model::{ModelError, Response, ResponseCode};

/// Failure of a gateway command, one variant per non-OK response code.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApiError {
    #[error("{0}")]
    AuthFailed(String),

    #[error("{0}")]
    InvalidRequest(String),

    /// Well-formed request that could not be honored.
    #[error("{0}")]
    Warning(String),

    #[error("{0}")]
    Error(String),
}

impl ApiError {
    pub fn code(&self) -> ResponseCode {
        match self {
            ApiError::AuthFailed(_) => ResponseCode::AuthFailed,
            ApiError::InvalidRequest(_) => ResponseCode::InvalidRequest,
            ApiError::Warning(_) => ResponseCode::Warning,
            ApiError::Error(_) => ResponseCode::Error,
        }
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        ApiError::InvalidRequest(message.into())
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        ApiError::AuthFailed(err.to_string())
    }
}

impl From<ConfigError> for ApiError {
    fn from(err: ConfigError) -> Self {
        ApiError::InvalidRequest(err.to_string())
    }
}

impl From<ScheduleError> for ApiError {
    fn from(err: ScheduleError) -> Self {
        ApiError::InvalidRequest(err.to_string())
    }
}

impl From<StorageError> for ApiError {
    fn from(err: StorageError) -> Self {
        ApiError::Error(err.to_string())
    }
}

impl From<ModelError> for ApiError {
    fn from(err: ModelError) -> Self {
        ApiError::InvalidRequest(err.to_string())
    }
}

impl<T> From<ApiError> for Response<T> {
    fn from(err: ApiError) -> Self {
        let code = err.code();
        Response::with_code(code, err.to_string())
    }
}
