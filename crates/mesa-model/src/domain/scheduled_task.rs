use serde::{Deserialize, Serialize};

use crate::{InstanceId, JobKey, ScheduleStatus, TaskConfig, TaskId};

/// Live runtime record of one task instance, as held by the state store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledTask {
    pub task_id: TaskId,
    pub status: ScheduleStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_host: Option<String>,
    /// Fully resolved template the task was created (or rewritten) with.
    pub task: TaskConfig,
}

impl ScheduledTask {
    pub fn new(task_id: impl Into<TaskId>, status: ScheduleStatus, task: TaskConfig) -> Self {
        Self {
            task_id: task_id.into(),
            status,
            assigned_host: None,
            task,
        }
    }

    pub fn job_key(&self) -> Option<JobKey> {
        self.task.job_key()
    }

    pub fn role(&self) -> Option<&str> {
        self.task.owner.as_ref().map(|o| o.role.as_str())
    }

    pub fn instance_id(&self) -> InstanceId {
        self.task.instance_id.unwrap_or(0)
    }
}
