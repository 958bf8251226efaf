use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::{InstanceId, JobKey, ScheduleStatus, ScheduledTask, TaskId};

/// Filter over scheduled tasks.
///
/// Every field is optional; an unset field matches everything. Set fields are combined with AND.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub environment: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instance_ids: Option<BTreeSet<InstanceId>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_ids: Option<BTreeSet<TaskId>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub statuses: Option<BTreeSet<ScheduleStatus>>,
}

impl TaskQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tasks with the given identifier.
    pub fn by_id(id: impl Into<TaskId>) -> Self {
        Self::new().with_task_ids([id.into()])
    }

    /// Every task owned by `role`.
    pub fn role_scoped(role: impl Into<String>) -> Self {
        Self::new().with_role(role)
    }

    /// Every task of one job.
    pub fn job_scoped(key: &JobKey) -> Self {
        Self::new()
            .with_role(key.role.clone())
            .with_environment(key.environment.clone())
            .with_job_name(key.name.clone())
    }

    /// Tasks at one instance index of one job.
    pub fn shard_scoped(key: &JobKey, instance_id: InstanceId) -> Self {
        Self::job_scoped(key).with_instance_ids([instance_id])
    }

    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = Some(role.into());
        self
    }

    pub fn with_environment(mut self, environment: impl Into<String>) -> Self {
        self.environment = Some(environment.into());
        self
    }

    pub fn with_job_name(mut self, name: impl Into<String>) -> Self {
        self.job_name = Some(name.into());
        self
    }

    pub fn with_instance_ids(mut self, ids: impl IntoIterator<Item = InstanceId>) -> Self {
        self.instance_ids = Some(ids.into_iter().collect());
        self
    }

    pub fn with_task_ids(mut self, ids: impl IntoIterator<Item = TaskId>) -> Self {
        self.task_ids = Some(ids.into_iter().collect());
        self
    }

    pub fn with_statuses(mut self, statuses: impl IntoIterator<Item = ScheduleStatus>) -> Self {
        self.statuses = Some(statuses.into_iter().collect());
        self
    }

    /// Restrict the query to non-terminal tasks.
    ///
    /// A status filter already present is narrowed, never widened.
    pub fn active(mut self) -> Self {
        self.statuses = Some(match self.statuses.take() {
            Some(statuses) => statuses.into_iter().filter(ScheduleStatus::is_active).collect(),
            None => ScheduleStatus::active_states(),
        });
        self
    }

    /// Returns `true` when a job name is present but blank.
    pub fn has_blank_job_name(&self) -> bool {
        self.job_name
            .as_deref()
            .is_some_and(|name| name.trim().is_empty())
    }

    pub fn matches(&self, task: &ScheduledTask) -> bool {
        let config = &task.task;

        if let Some(role) = &self.role
            && config.owner.as_ref().map(|o| &o.role) != Some(role)
        {
            return false;
        }
        if let Some(env) = &self.environment
            && config.environment.as_ref() != Some(env)
        {
            return false;
        }
        if let Some(name) = &self.job_name
            && config.job_name.as_ref() != Some(name)
        {
            return false;
        }
        if let Some(ids) = &self.instance_ids
            && !ids.contains(&task.instance_id())
        {
            return false;
        }
        if let Some(ids) = &self.task_ids
            && !ids.contains(&task.task_id)
        {
            return false;
        }
        if let Some(statuses) = &self.statuses
            && !statuses.contains(&task.status)
        {
            return false;
        }
        true
    }
}
