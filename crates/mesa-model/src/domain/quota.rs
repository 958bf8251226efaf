use serde::{Deserialize, Serialize};

/// Per-role resource ceiling.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quota {
    pub num_cpus: f64,
    pub ram_mb: i64,
    pub disk_mb: i64,
}

impl Quota {
    pub fn new(num_cpus: f64, ram_mb: i64, disk_mb: i64) -> Self {
        Self {
            num_cpus,
            ram_mb,
            disk_mb,
        }
    }

    /// Returns `true` if no component is negative.
    pub fn is_non_negative(&self) -> bool {
        self.num_cpus >= 0.0 && self.ram_mb >= 0 && self.disk_mb >= 0
    }
}
