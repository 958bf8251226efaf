use std::{collections::BTreeSet, fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::ModelError;

/// Runtime state of a scheduled task, owned by the cluster state store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ScheduleStatus {
    /// Accepted by the store, not yet eligible for placement.
    Init,
    /// Waiting for a host.
    Pending,
    /// Placed on a host, not yet started.
    Assigned,
    /// Host is preparing the sandbox.
    Starting,
    /// Task is executing.
    Running,
    /// Task is being preempted by a higher-priority task.
    Preempting,
    /// Task is being restarted.
    Restarting,
    /// Kill requested, waiting for the host to confirm.
    Killing,
    /// Task exited successfully.
    Finished,
    /// Task exited with an error.
    Failed,
    /// Task was killed.
    Killed,
    /// Host stopped reporting the task.
    Lost,
}

impl ScheduleStatus {
    /// Returns `true` if the task is in a terminal state (won't transition further).
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            ScheduleStatus::Finished
                | ScheduleStatus::Failed
                | ScheduleStatus::Killed
                | ScheduleStatus::Lost
        )
    }

    /// Returns `true` if the task still occupies its instance slot.
    pub fn is_active(&self) -> bool {
        !self.is_terminal()
    }

    /// All non-terminal states.
    pub fn active_states() -> BTreeSet<ScheduleStatus> {
        Self::ALL.iter().copied().filter(|s| s.is_active()).collect()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ScheduleStatus::Init => "INIT",
            ScheduleStatus::Pending => "PENDING",
            ScheduleStatus::Assigned => "ASSIGNED",
            ScheduleStatus::Starting => "STARTING",
            ScheduleStatus::Running => "RUNNING",
            ScheduleStatus::Preempting => "PREEMPTING",
            ScheduleStatus::Restarting => "RESTARTING",
            ScheduleStatus::Killing => "KILLING",
            ScheduleStatus::Finished => "FINISHED",
            ScheduleStatus::Failed => "FAILED",
            ScheduleStatus::Killed => "KILLED",
            ScheduleStatus::Lost => "LOST",
        }
    }

    const ALL: [ScheduleStatus; 12] = [
        ScheduleStatus::Init,
        ScheduleStatus::Pending,
        ScheduleStatus::Assigned,
        ScheduleStatus::Starting,
        ScheduleStatus::Running,
        ScheduleStatus::Preempting,
        ScheduleStatus::Restarting,
        ScheduleStatus::Killing,
        ScheduleStatus::Finished,
        ScheduleStatus::Failed,
        ScheduleStatus::Killed,
        ScheduleStatus::Lost,
    ];
}

impl fmt::Display for ScheduleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ScheduleStatus {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let norm = s.trim().to_ascii_uppercase();
        Self::ALL
            .iter()
            .copied()
            .find(|status| status.as_str() == norm)
            .ok_or_else(|| ModelError::UnknownStatus(s.to_string()))
    }
}
