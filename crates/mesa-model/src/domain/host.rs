use serde::{Deserialize, Serialize};

/// Maintenance state of a host, owned by the maintenance coordinator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MaintenanceMode {
    None,
    Scheduled,
    Draining,
    Drained,
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct HostStatus {
    pub host: String,
    pub mode: MaintenanceMode,
}

impl HostStatus {
    pub fn new(host: impl Into<String>, mode: MaintenanceMode) -> Self {
        Self {
            host: host.into(),
            mode,
        }
    }
}
