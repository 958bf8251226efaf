use std::collections::BTreeSet;

use async_trait::async_trait;

use mesa_model::{InstanceId, JobKey, ScheduleStatus, TaskQuery};

use crate::{config::ParsedConfiguration, error::ScheduleError};

/// Admission and lifecycle control of scheduled work.
///
/// Every rejection is caller-correctable; its message reaches the caller unchanged.
#[async_trait]
pub trait SchedulerCore: Send + Sync + 'static {
    /// Admit a parsed job (fails on duplicates or insufficient capacity).
    async fn create_job(&self, job: ParsedConfiguration) -> Result<(), ScheduleError>;

    /// Kill every task matching `query` on behalf of `user`.
    async fn kill_tasks(&self, query: &TaskQuery, user: &str) -> Result<(), ScheduleError>;

    /// Move the matching tasks to `status`, recording `message` as the reason.
    async fn set_task_status(
        &self,
        query: &TaskQuery,
        status: ScheduleStatus,
        message: Option<String>,
    ) -> Result<(), ScheduleError>;

    /// Begin an update. Returns the rolling update token, or `None` when the job is
    /// replaced in place (cron jobs).
    async fn initiate_job_update(
        &self,
        job: ParsedConfiguration,
    ) -> Result<Option<String>, ScheduleError>;

    async fn restart_shards(
        &self,
        key: &JobKey,
        shards: &BTreeSet<InstanceId>,
        user: &str,
    ) -> Result<(), ScheduleError>;

    async fn start_cron_job(&self, key: &JobKey) -> Result<(), ScheduleError>;
}
