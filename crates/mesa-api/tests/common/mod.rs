#![allow(dead_code)]

use std::{
    collections::BTreeSet,
    sync::{Arc, Mutex},
    time::Duration,
};

use async_trait::async_trait;

use mesa_api::{Collaborators, GatewayConfig, KillWaitConfig, SchedulerGateway};
use mesa_core::{
    Authorizer, CronRegistry, Grant, MaintenanceCoordinator, MetricsBackend, ParsedConfiguration,
    QuotaLedger, ScheduleError, SchedulerCore, StaticCredentials, StorageError, TaskState,
    TaskStore,
};
use mesa_model::{
    Capability, HostStatus, Hosts, Identity, InstanceId, JobConfig, JobKey, MaintenanceMode,
    Quota, ResponseCode, RewriteReason, ScheduleStatus, ScheduledTask, SessionKey, TaskConfig,
    TaskId, TaskQuery,
};

pub const ROLE: &str = "bar_role";
pub const USER: &str = "foo_user";
pub const JOB_NAME: &str = "job_foo";

pub fn job_key() -> JobKey {
    JobKey::new(ROLE, "devel", JOB_NAME)
}

pub fn owner() -> Identity {
    Identity::new(ROLE, USER)
}

/// 1 CPU, 1024 MB RAM, 1024 MB disk, production.
pub fn production_task() -> TaskConfig {
    TaskConfig::new()
        .with_resources(1.0, 1024, 1024)
        .with_production(true)
}

pub fn job(instances: i32) -> JobConfig {
    JobConfig::new(job_key(), owner())
        .with_instance_count(instances)
        .with_task_config(production_task())
}

pub fn role_session() -> SessionKey {
    SessionKey::new(USER)
}

pub fn root_session() -> SessionKey {
    SessionKey::new("admin").with_token("root-token")
}

pub fn provisioner_session() -> SessionKey {
    SessionKey::new("provisioner")
}

pub fn nobody() -> SessionKey {
    SessionKey::new("nobody")
}

pub fn credentials() -> StaticCredentials {
    StaticCredentials::new()
        .with_user(USER, Grant::new().with_role(ROLE))
        .with_user(
            "admin",
            Grant::new()
                .with_token("root-token")
                .with_capability(Capability::Root),
        )
        .with_user(
            "provisioner",
            Grant::new().with_capability(Capability::Provisioner),
        )
        .with_user("nobody", Grant::new())
}

/// Stored, fully defaulted template of instance `instance` of the test job.
pub fn stored_template(instance: InstanceId) -> TaskConfig {
    let parsed = mesa_core::parse_job(&job(instance as i32 + 1), &Default::default())
        .expect("test job is valid");
    parsed.task_configs()[instance as usize].clone()
}

// ============================================================================
// Spies
// ============================================================================

#[derive(Default)]
pub struct SpyScheduler {
    pub calls: Mutex<Vec<String>>,
    pub created: Mutex<Vec<ParsedConfiguration>>,
    pub reject_with: Mutex<Option<String>>,
    pub update_token: Mutex<Option<String>>,
    pub status_messages: Mutex<Vec<Option<String>>>,
    /// When set, kills mark matching tasks as KILLED in this store.
    pub kill_into: Mutex<Option<TaskState>>,
}

impl SpyScheduler {
    pub fn rejecting(message: &str) -> Self {
        let spy = Self::default();
        *spy.reject_with.lock().unwrap() = Some(message.to_string());
        spy
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: &str) -> Result<(), ScheduleError> {
        self.calls.lock().unwrap().push(call.to_string());
        match self.reject_with.lock().unwrap().clone() {
            Some(msg) => Err(ScheduleError::rejected(msg)),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl SchedulerCore for SpyScheduler {
    async fn create_job(&self, job: ParsedConfiguration) -> Result<(), ScheduleError> {
        self.record("create_job")?;
        self.created.lock().unwrap().push(job);
        Ok(())
    }

    async fn kill_tasks(&self, query: &TaskQuery, _user: &str) -> Result<(), ScheduleError> {
        self.record("kill_tasks")?;
        let store = self.kill_into.lock().unwrap().clone();
        if let Some(store) = store {
            for task in store.query(query).unwrap() {
                store
                    .update_status(&task.task_id, ScheduleStatus::Killed)
                    .unwrap();
            }
        }
        Ok(())
    }

    async fn set_task_status(
        &self,
        _query: &TaskQuery,
        _status: ScheduleStatus,
        message: Option<String>,
    ) -> Result<(), ScheduleError> {
        self.record("set_task_status")?;
        self.status_messages.lock().unwrap().push(message);
        Ok(())
    }

    async fn initiate_job_update(
        &self,
        _job: ParsedConfiguration,
    ) -> Result<Option<String>, ScheduleError> {
        self.record("initiate_job_update")?;
        Ok(self.update_token.lock().unwrap().clone())
    }

    async fn restart_shards(
        &self,
        _key: &JobKey,
        _shards: &BTreeSet<InstanceId>,
        _user: &str,
    ) -> Result<(), ScheduleError> {
        self.record("restart_shards")
    }

    async fn start_cron_job(&self, _key: &JobKey) -> Result<(), ScheduleError> {
        self.record("start_cron_job")
    }
}

#[derive(Default)]
pub struct SpyQuotas {
    pub set_calls: Mutex<Vec<(String, Quota)>>,
}

impl SpyQuotas {
    pub fn set_count(&self) -> usize {
        self.set_calls.lock().unwrap().len()
    }
}

#[async_trait]
impl QuotaLedger for SpyQuotas {
    async fn set_quota(&self, role: &str, quota: Quota) -> Result<(), StorageError> {
        self.set_calls.lock().unwrap().push((role.to_string(), quota));
        Ok(())
    }

    async fn get_quota(&self, role: &str) -> Result<Quota, StorageError> {
        Ok(self
            .set_calls
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|(r, _)| r == role)
            .map(|(_, q)| *q)
            .unwrap_or_default())
    }
}

/// Reports every addressed host in a fixed mode per command.
#[derive(Default)]
pub struct SpyMaintenance {
    pub calls: Mutex<Vec<&'static str>>,
}

impl SpyMaintenance {
    fn answer(
        &self,
        call: &'static str,
        hosts: &Hosts,
        mode: MaintenanceMode,
    ) -> BTreeSet<HostStatus> {
        self.calls.lock().unwrap().push(call);
        hosts.iter().map(|h| HostStatus::new(h.clone(), mode)).collect()
    }
}

#[async_trait]
impl MaintenanceCoordinator for SpyMaintenance {
    async fn get_status(&self, hosts: &Hosts) -> Result<BTreeSet<HostStatus>, StorageError> {
        Ok(self.answer("status", hosts, MaintenanceMode::None))
    }

    async fn start_maintenance(
        &self,
        hosts: &Hosts,
    ) -> Result<BTreeSet<HostStatus>, StorageError> {
        Ok(self.answer("start", hosts, MaintenanceMode::Scheduled))
    }

    async fn drain(&self, hosts: &Hosts) -> Result<BTreeSet<HostStatus>, StorageError> {
        Ok(self.answer("drain", hosts, MaintenanceMode::Draining))
    }

    async fn end_maintenance(&self, hosts: &Hosts) -> Result<BTreeSet<HostStatus>, StorageError> {
        Ok(self.answer("end", hosts, MaintenanceMode::None))
    }
}

#[derive(Default)]
pub struct SpyCron {
    pub jobs: Mutex<Vec<JobConfig>>,
}

#[async_trait]
impl CronRegistry for SpyCron {
    async fn get_jobs(&self) -> Result<Vec<JobConfig>, StorageError> {
        Ok(self.jobs.lock().unwrap().clone())
    }
}

/// Store whose every operation fails.
pub struct BrokenStore;

#[async_trait]
impl TaskStore for BrokenStore {
    async fn fetch_tasks(&self, _query: &TaskQuery) -> Result<Vec<ScheduledTask>, StorageError> {
        Err(StorageError::failure("store offline"))
    }

    async fn modify_in_place(
        &self,
        _id: &TaskId,
        _config: TaskConfig,
    ) -> Result<bool, StorageError> {
        Err(StorageError::failure("store offline"))
    }

    async fn snapshot(&self) -> Result<(), StorageError> {
        Err(StorageError::failure("store offline"))
    }
}

/// Store that loses every task between read and write.
pub struct VanishingStore(pub TaskState);

#[async_trait]
impl TaskStore for VanishingStore {
    async fn fetch_tasks(&self, query: &TaskQuery) -> Result<Vec<ScheduledTask>, StorageError> {
        self.0.fetch_tasks(query).await
    }

    async fn modify_in_place(
        &self,
        id: &TaskId,
        config: TaskConfig,
    ) -> Result<bool, StorageError> {
        self.0.remove_task(id)?;
        self.0.modify_in_place(id, config).await
    }

    async fn snapshot(&self) -> Result<(), StorageError> {
        self.0.snapshot().await
    }
}

#[derive(Default)]
pub struct SpyMetrics {
    pub commands: Mutex<Vec<(&'static str, ResponseCode)>>,
    pub rewrites: Mutex<Vec<RewriteReason>>,
}

impl MetricsBackend for SpyMetrics {
    fn record_command(&self, command: &'static str, code: ResponseCode, _elapsed: Duration) {
        self.commands.lock().unwrap().push((command, code));
    }

    fn record_rewrite(&self, reason: RewriteReason) {
        self.rewrites.lock().unwrap().push(reason);
    }
}

// ============================================================================
// Harness
// ============================================================================

pub struct Harness {
    pub gateway: SchedulerGateway,
    pub scheduler: Arc<SpyScheduler>,
    pub state: TaskState,
    pub quotas: Arc<SpyQuotas>,
    pub maintenance: Arc<SpyMaintenance>,
    pub cron: Arc<SpyCron>,
    pub metrics: Arc<SpyMetrics>,
}

impl Harness {
    pub fn new() -> Self {
        Self::build(SpyScheduler::default(), None)
    }

    pub fn with_scheduler(scheduler: SpyScheduler) -> Self {
        Self::build(scheduler, None)
    }

    pub fn with_store(store: Arc<dyn TaskStore>) -> Self {
        Self::build(SpyScheduler::default(), Some(store))
    }

    fn build(scheduler: SpyScheduler, store: Option<Arc<dyn TaskStore>>) -> Self {
        let state = TaskState::new();
        let scheduler = Arc::new(scheduler);
        let quotas = Arc::new(SpyQuotas::default());
        let maintenance = Arc::new(SpyMaintenance::default());
        let cron = Arc::new(SpyCron::default());
        let metrics = Arc::new(SpyMetrics::default());

        let collaborators = Collaborators {
            scheduler: scheduler.clone(),
            store: store.unwrap_or_else(|| Arc::new(state.clone()) as Arc<dyn TaskStore>),
            quotas: quotas.clone(),
            maintenance: maintenance.clone(),
            cron: cron.clone(),
        };
        let config = GatewayConfig {
            max_tasks_per_job: 4000,
            kill_wait: KillWaitConfig {
                first_ms: 10,
                max_ms: 40,
                max_attempts: 3,
            },
        };
        let gateway = SchedulerGateway::new(Authorizer::new(Arc::new(credentials())), collaborators)
            .with_metrics(metrics.clone())
            .with_config(config);

        Self {
            gateway,
            scheduler,
            state,
            quotas,
            maintenance,
            cron,
            metrics,
        }
    }

    /// Store one live task for each instance of the test job.
    pub fn seed(&self, instances: u32, status: ScheduleStatus) -> Vec<TaskId> {
        (0..instances)
            .map(|i| {
                let id = TaskId::from(format!("task-{i}"));
                self.state
                    .insert(ScheduledTask::new(id.clone(), status, stored_template(i)))
                    .unwrap();
                id
            })
            .collect()
    }
}
