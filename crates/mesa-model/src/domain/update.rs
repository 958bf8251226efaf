use serde::{Deserialize, Serialize};

/// Payload of a successful update start.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartUpdateResult {
    /// Token identifying the rolling update; absent for cron jobs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub update_token: Option<String>,
    pub rolling_update_required: bool,
}

impl StartUpdateResult {
    pub fn from_token(token: Option<String>) -> Self {
        Self {
            rolling_update_required: token.is_some(),
            update_token: token,
        }
    }
}
