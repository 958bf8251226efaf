use serde::{Deserialize, Serialize};

use crate::{Identity, JobKey, TaskConfig};

/// A job submission: identity, owner, desired instance count and one template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobConfig {
    pub key: JobKey,
    pub owner: Identity,
    /// Desired number of instances; absent, zero or negative is rejected.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instance_count: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_config: Option<TaskConfig>,
    /// Present for declarative (cron) jobs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cron_schedule: Option<String>,
}

impl JobConfig {
    pub fn new(key: JobKey, owner: Identity) -> Self {
        Self {
            key,
            owner,
            instance_count: None,
            task_config: None,
            cron_schedule: None,
        }
    }

    pub fn with_instance_count(mut self, count: i32) -> Self {
        self.instance_count = Some(count);
        self
    }

    pub fn with_task_config(mut self, task: TaskConfig) -> Self {
        self.task_config = Some(task);
        self
    }

    pub fn with_cron_schedule(mut self, schedule: impl Into<String>) -> Self {
        self.cron_schedule = Some(schedule.into());
        self
    }
}
