mod code;
pub use code::ResponseCode;

use serde::{Deserialize, Serialize};

/// Envelope returned by every gateway command.
///
/// Exactly one code per invocation; `result` carries the command-specific payload
/// and is only populated when the command produced one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response<T> {
    pub code: ResponseCode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<T>,
}

impl<T> Response<T> {
    /// Successful response carrying a payload.
    pub fn ok(result: T) -> Self {
        Self {
            code: ResponseCode::Ok,
            message: None,
            result: Some(result),
        }
    }

    /// Response with a code and neither message nor payload.
    pub fn empty(code: ResponseCode) -> Self {
        Self {
            code,
            message: None,
            result: None,
        }
    }

    /// Response with a code and message but no payload.
    pub fn with_code(code: ResponseCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: Some(message.into()),
            result: None,
        }
    }

    pub fn is_ok(&self) -> bool {
        self.code == ResponseCode::Ok
    }
}
