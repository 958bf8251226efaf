use serde::{Deserialize, Serialize};

/// Owner of a job: the accounting role plus the user acting for it.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Identity {
    pub role: String,
    pub user: String,
}

impl Identity {
    pub fn new(role: impl Into<String>, user: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            user: user.into(),
        }
    }
}
