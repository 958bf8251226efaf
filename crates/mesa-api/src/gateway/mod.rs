//! The command gateway.
//!
//! [`SchedulerGateway`] implements [`SchedulerApi`] by wrapping every command body in a
//! guard that authorizes, maps failures to a response code, logs the outcome and
//! reports it to the metrics backend.

mod admin;
mod guard;
mod jobs;
mod kill;
mod outcome;

use std::{collections::BTreeSet, sync::Arc};

use async_trait::async_trait;

use mesa_core::{
    Authorizer, CronRegistry, MaintenanceCoordinator, MetricsBackend, NoopMetrics, QuotaLedger,
    Requirement, SchedulerCore, TaskStore,
};
use mesa_model::{
    Capability, ConfigRewrite, HostStatus, Hosts, InstanceId, JobConfig, JobKey, Quota, Response,
    RewriteResult, ScheduleStatus, ScheduledTask, SessionKey, StartUpdateResult, TaskConfig,
    TaskId, TaskQuery,
};

use crate::{config::GatewayConfig, error::ApiError, handler::SchedulerApi};

/// External collaborators driven by the gateway.
#[derive(Clone)]
pub struct Collaborators {
    pub scheduler: Arc<dyn SchedulerCore>,
    pub store: Arc<dyn TaskStore>,
    pub quotas: Arc<dyn QuotaLedger>,
    pub maintenance: Arc<dyn MaintenanceCoordinator>,
    pub cron: Arc<dyn CronRegistry>,
}

/// Stateless command gateway; safe to share across concurrent callers.
pub struct SchedulerGateway {
    authorizer: Authorizer,
    scheduler: Arc<dyn SchedulerCore>,
    pub(crate) store: Arc<dyn TaskStore>,
    quotas: Arc<dyn QuotaLedger>,
    maintenance: Arc<dyn MaintenanceCoordinator>,
    pub(crate) cron: Arc<dyn CronRegistry>,
    pub(crate) metrics: Arc<dyn MetricsBackend>,
    config: GatewayConfig,
}

impl SchedulerGateway {
    pub fn new(authorizer: Authorizer, collaborators: Collaborators) -> Self {
        let Collaborators {
            scheduler,
            store,
            quotas,
            maintenance,
            cron,
        } = collaborators;

        Self {
            authorizer,
            scheduler,
            store,
            quotas,
            maintenance,
            cron,
            metrics: Arc::new(NoopMetrics),
            config: GatewayConfig::default(),
        }
    }

    pub fn with_metrics(mut self, metrics: Arc<dyn MetricsBackend>) -> Self {
        self.metrics = metrics;
        self
    }

    pub fn with_config(mut self, config: GatewayConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }
}

fn root() -> Requirement {
    Requirement::capability(Capability::Root)
}

#[async_trait]
impl SchedulerApi for SchedulerGateway {
    async fn create_job(&self, job: JobConfig, session: &SessionKey) -> Response<()> {
        let requirement = Requirement::role(job.key.role.clone());
        self.guarded("create_job", session, requirement, || {
            self.create_job_body(job)
        })
        .await
    }

    async fn populate_job_config(&self, job: JobConfig) -> Response<TaskConfig> {
        self.run("populate_job_config", self.populate_body(job))
            .await
    }

    async fn start_cron_job(&self, key: &JobKey, session: &SessionKey) -> Response<()> {
        let requirement = Requirement::role(key.role.clone());
        self.guarded("start_cron_job", session, requirement, || {
            self.start_cron_job_body(key)
        })
        .await
    }

    async fn start_update(
        &self,
        job: JobConfig,
        session: &SessionKey,
    ) -> Response<StartUpdateResult> {
        let requirement = Requirement::role(job.key.role.clone());
        self.guarded("start_update", session, requirement, || {
            self.start_update_body(job)
        })
        .await
    }

    async fn restart_shards(
        &self,
        key: &JobKey,
        shards: BTreeSet<InstanceId>,
        session: &SessionKey,
    ) -> Response<()> {
        let requirement = Requirement::role(key.role.clone());
        self.guarded("restart_shards", session, requirement, || {
            self.restart_shards_body(key, shards, session)
        })
        .await
    }

    async fn kill_tasks(&self, query: TaskQuery, session: &SessionKey) -> Response<()> {
        self.run("kill_tasks", self.kill_tasks_body(query, session))
            .await
    }

    async fn get_tasks_status(&self, query: TaskQuery) -> Response<Vec<ScheduledTask>> {
        self.run("get_tasks_status", self.get_tasks_status_body(query))
            .await
    }

    async fn get_jobs(&self, role: &str) -> Response<Vec<JobConfig>> {
        self.run("get_jobs", self.get_jobs_body(role)).await
    }

    async fn set_quota(&self, role: &str, quota: Quota, session: &SessionKey) -> Response<()> {
        let requirement =
            Requirement::AnyCapability(vec![Capability::Root, Capability::Provisioner]);
        self.guarded("set_quota", session, requirement, || {
            self.set_quota_body(role, quota)
        })
        .await
    }

    async fn get_quota(&self, role: &str) -> Response<Quota> {
        self.run("get_quota", self.get_quota_body(role)).await
    }

    async fn force_task_state(
        &self,
        task_id: TaskId,
        status: ScheduleStatus,
        session: &SessionKey,
    ) -> Response<()> {
        self.guarded("force_task_state", session, root(), || {
            self.force_task_state_body(task_id, status, session)
        })
        .await
    }

    async fn perform_backup(&self, session: &SessionKey) -> Response<()> {
        self.guarded("perform_backup", session, root(), || {
            self.perform_backup_body()
        })
        .await
    }

    async fn rewrite_configs(
        &self,
        rewrites: Vec<ConfigRewrite>,
        session: &SessionKey,
    ) -> Response<Vec<RewriteResult>> {
        self.guarded("rewrite_configs", session, root(), || {
            self.rewrite_batch(rewrites)
        })
        .await
    }

    async fn maintenance_status(
        &self,
        hosts: Hosts,
        session: &SessionKey,
    ) -> Response<BTreeSet<HostStatus>> {
        self.guarded("maintenance_status", session, root(), || async move {
            self.maintenance
                .get_status(&hosts)
                .await
                .map(Response::ok)
                .map_err(ApiError::from)
        })
        .await
    }

    async fn start_maintenance(
        &self,
        hosts: Hosts,
        session: &SessionKey,
    ) -> Response<BTreeSet<HostStatus>> {
        self.guarded("start_maintenance", session, root(), || async move {
            self.maintenance
                .start_maintenance(&hosts)
                .await
                .map(Response::ok)
                .map_err(ApiError::from)
        })
        .await
    }

    async fn drain_hosts(
        &self,
        hosts: Hosts,
        session: &SessionKey,
    ) -> Response<BTreeSet<HostStatus>> {
        self.guarded("drain_hosts", session, root(), || async move {
            self.maintenance
                .drain(&hosts)
                .await
                .map(Response::ok)
                .map_err(ApiError::from)
        })
        .await
    }

    async fn end_maintenance(
        &self,
        hosts: Hosts,
        session: &SessionKey,
    ) -> Response<BTreeSet<HostStatus>> {
        self.guarded("end_maintenance", session, root(), || async move {
            self.maintenance
                .end_maintenance(&hosts)
                .await
                .map(Response::ok)
                .map_err(ApiError::from)
        })
        .await
    }
}
