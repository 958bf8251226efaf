use serde::{Deserialize, Serialize};

/// Caller credential presented with every command.
///
/// The gateway never interprets the token itself; it hands the session to the
/// credential validator.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionKey {
    pub user: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub token: String,
}

impl SessionKey {
    pub fn new(user: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            token: String::new(),
        }
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = token.into();
        self
    }
}
