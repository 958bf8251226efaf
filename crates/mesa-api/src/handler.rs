use std::collections::BTreeSet;

use async_trait::async_trait;

use mesa_model::{
    ConfigRewrite, HostStatus, Hosts, InstanceId, JobConfig, JobKey, Quota, Response,
    RewriteResult, ScheduleStatus, ScheduledTask, SessionKey, StartUpdateResult, TaskConfig,
    TaskId, TaskQuery,
};

/// Command surface of the scheduler.
///
/// Every command returns exactly one [`Response`]; failures are expressed through its
/// code, never as a Rust error. Mutating commands take the caller's [`SessionKey`].
#[async_trait]
pub trait SchedulerApi: Send + Sync + 'static {
    /// Validate and admit a new job.
    async fn create_job(&self, job: JobConfig, session: &SessionKey) -> Response<()>;

    /// Run the validation pipeline and return the defaulted template, without side effects.
    async fn populate_job_config(&self, job: JobConfig) -> Response<TaskConfig>;

    async fn start_cron_job(&self, key: &JobKey, session: &SessionKey) -> Response<()>;

    async fn start_update(&self, job: JobConfig, session: &SessionKey)
    -> Response<StartUpdateResult>;

    async fn restart_shards(
        &self,
        key: &JobKey,
        shards: BTreeSet<InstanceId>,
        session: &SessionKey,
    ) -> Response<()>;

    /// Kill the tasks matching `query` and wait for them to leave active states.
    async fn kill_tasks(&self, query: TaskQuery, session: &SessionKey) -> Response<()>;

    async fn get_tasks_status(&self, query: TaskQuery) -> Response<Vec<ScheduledTask>>;

    /// Jobs visible to `role`, merged from the cron registry and live tasks.
    async fn get_jobs(&self, role: &str) -> Response<Vec<JobConfig>>;

    async fn set_quota(&self, role: &str, quota: Quota, session: &SessionKey) -> Response<()>;

    async fn get_quota(&self, role: &str) -> Response<Quota>;

    async fn force_task_state(
        &self,
        task_id: TaskId,
        status: ScheduleStatus,
        session: &SessionKey,
    ) -> Response<()>;

    async fn perform_backup(&self, session: &SessionKey) -> Response<()>;

    /// Apply a batch of compare-and-swap rewrites, reporting one result per item.
    async fn rewrite_configs(
        &self,
        rewrites: Vec<ConfigRewrite>,
        session: &SessionKey,
    ) -> Response<Vec<RewriteResult>>;

    async fn maintenance_status(
        &self,
        hosts: Hosts,
        session: &SessionKey,
    ) -> Response<BTreeSet<HostStatus>>;

    async fn start_maintenance(
        &self,
        hosts: Hosts,
        session: &SessionKey,
    ) -> Response<BTreeSet<HostStatus>>;

    async fn drain_hosts(&self, hosts: Hosts, session: &SessionKey)
    -> Response<BTreeSet<HostStatus>>;

    async fn end_maintenance(
        &self,
        hosts: Hosts,
        session: &SessionKey,
    ) -> Response<BTreeSet<HostStatus>>;
}
