use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::ModelError;

/// Administrative privilege held independently of role ownership.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Capability {
    /// Full cluster administration.
    Root,
    /// Allowed to provision quota.
    Provisioner,
}

impl Capability {
    pub fn as_str(&self) -> &'static str {
        match self {
            Capability::Root => "ROOT",
            Capability::Provisioner => "PROVISIONER",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Capability {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "root" => Ok(Capability::Root),
            "provisioner" => Ok(Capability::Provisioner),
            _ => Err(ModelError::UnknownCapability(s.to_string())),
        }
    }
}
