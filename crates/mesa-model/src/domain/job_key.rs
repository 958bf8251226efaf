use std::fmt;

use serde::{Deserialize, Serialize};

/// Globally unique job identity: `(role, environment, name)`.
///
/// The role is both the resource-accounting and the authorization principal.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct JobKey {
    pub role: String,
    pub environment: String,
    pub name: String,
}

impl JobKey {
    pub fn new(
        role: impl Into<String>,
        environment: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            role: role.into(),
            environment: environment.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for JobKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.role, self.environment, self.name)
    }
}
