use std::fmt;

use serde::{Deserialize, Serialize};

/// Fixed response vocabulary shared by every command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResponseCode {
    Ok,
    /// Well-formed request that could not be honored because of state the caller does not control.
    Warning,
    /// Request must be corrected before it can succeed.
    InvalidRequest,
    /// Credential check failed; nothing was executed.
    AuthFailed,
    /// Operational failure; the same request may succeed later.
    Error,
}

impl ResponseCode {
    /// Returns `true` if retrying the identical request later may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ResponseCode::Error)
    }

    /// Returns `true` if the caller must change the request or its credentials.
    pub fn is_fatal(&self) -> bool {
        matches!(self, ResponseCode::InvalidRequest | ResponseCode::AuthFailed)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ResponseCode::Ok => "OK",
            ResponseCode::Warning => "WARNING",
            ResponseCode::InvalidRequest => "INVALID_REQUEST",
            ResponseCode::AuthFailed => "AUTH_FAILED",
            ResponseCode::Error => "ERROR",
        }
    }
}

impl fmt::Display for ResponseCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
