use std::{
    collections::HashMap,
    sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard},
    time::SystemTime,
};

use async_trait::async_trait;
use tracing::{debug, instrument};
use uuid::Uuid;

use mesa_model::{JobKey, ScheduleStatus, ScheduledTask, TaskConfig, TaskId, TaskQuery};

use crate::{error::StorageError, ports::TaskStore};

/// Point-in-time copy of every stored task.
#[derive(Debug, Clone)]
pub struct StoreSnapshot {
    pub id: Uuid,
    pub taken_at: SystemTime,
    pub tasks: Vec<ScheduledTask>,
}

/// In-memory task store.
#[derive(Clone)]
pub struct TaskState {
    inner: Arc<RwLock<TaskStateInner>>,
}

#[derive(Default)]
struct TaskStateInner {
    /// Tasks indexed by TaskId.
    tasks: HashMap<TaskId, ScheduledTask>,
    /// Index: job key -> ids of the tasks of that job.
    by_job: HashMap<JobKey, Vec<TaskId>>,
    last_snapshot: Option<StoreSnapshot>,
}

impl TaskStateInner {
    fn index(&mut self, task: &ScheduledTask) {
        if let Some(key) = task.job_key() {
            self.by_job.entry(key).or_default().push(task.task_id.clone());
        }
    }

    fn unindex(&mut self, task: &ScheduledTask) {
        if let Some(key) = task.job_key()
            && let Some(ids) = self.by_job.get_mut(&key)
        {
            ids.retain(|id| *id != task.task_id);
            if ids.is_empty() {
                self.by_job.remove(&key);
            }
        }
    }
}

impl TaskState {
    /// Create empty task state.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(TaskStateInner::default())),
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, TaskStateInner>, StorageError> {
        self.inner.read().map_err(|_| StorageError::Poisoned)
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, TaskStateInner>, StorageError> {
        self.inner.write().map_err(|_| StorageError::Poisoned)
    }

    /// Store `task`, replacing any task with the same id.
    pub fn insert(&self, task: ScheduledTask) -> Result<(), StorageError> {
        let mut inner = self.write()?;
        if let Some(old) = inner.tasks.remove(&task.task_id) {
            inner.unindex(&old);
        }
        inner.index(&task);
        inner.tasks.insert(task.task_id.clone(), task);
        Ok(())
    }

    /// Store a new task built from `config` under a fresh id.
    pub fn add_task(
        &self,
        config: TaskConfig,
        status: ScheduleStatus,
    ) -> Result<TaskId, StorageError> {
        let id = TaskId::from(Uuid::new_v4().to_string());
        self.insert(ScheduledTask::new(id.clone(), status, config))?;
        Ok(id)
    }

    /// Get task by ID.
    pub fn get(&self, id: &TaskId) -> Result<Option<ScheduledTask>, StorageError> {
        Ok(self.read()?.tasks.get(id).cloned())
    }

    /// Returns `false` when the task does not exist.
    pub fn update_status(&self, id: &TaskId, status: ScheduleStatus) -> Result<bool, StorageError> {
        let mut inner = self.write()?;
        Ok(match inner.tasks.get_mut(id) {
            Some(task) => {
                task.status = status;
                true
            }
            None => false,
        })
    }

    pub fn remove_task(&self, id: &TaskId) -> Result<Option<ScheduledTask>, StorageError> {
        let mut inner = self.write()?;
        let removed = inner.tasks.remove(id);
        if let Some(task) = &removed {
            inner.unindex(task);
        }
        Ok(removed)
    }

    /// Tasks matching `q`, ordered by id.
    ///
    /// A query naming a whole job key is served from the `by_job` index.
    pub fn query(&self, q: &TaskQuery) -> Result<Vec<ScheduledTask>, StorageError> {
        let inner = self.read()?;

        let iter: Box<dyn Iterator<Item = &ScheduledTask>> =
            match (&q.role, &q.environment, &q.job_name) {
                (Some(role), Some(env), Some(name)) => {
                    let key = JobKey::new(role.clone(), env.clone(), name.clone());
                    match inner.by_job.get(&key) {
                        Some(ids) => Box::new(ids.iter().filter_map(|id| inner.tasks.get(id))),
                        None => return Ok(Vec::new()),
                    }
                }
                _ => Box::new(inner.tasks.values()),
            };

        let mut items: Vec<ScheduledTask> = iter.filter(|t| q.matches(t)).cloned().collect();
        items.sort_by(|a, b| a.task_id.cmp(&b.task_id));
        Ok(items)
    }

    /// Replace the template of task `id`, re-indexing when its job identity changes.
    ///
    /// Returns `false` when the task does not exist.
    pub fn replace_config(&self, id: &TaskId, config: TaskConfig) -> Result<bool, StorageError> {
        let mut inner = self.write()?;
        let Some(mut task) = inner.tasks.remove(id) else {
            return Ok(false);
        };
        inner.unindex(&task);
        task.task = config;
        inner.index(&task);
        inner.tasks.insert(id.clone(), task);
        Ok(true)
    }

    /// Capture every stored task.
    pub fn take_snapshot(&self) -> Result<StoreSnapshot, StorageError> {
        let mut inner = self.write()?;
        let mut tasks: Vec<ScheduledTask> = inner.tasks.values().cloned().collect();
        tasks.sort_by(|a, b| a.task_id.cmp(&b.task_id));

        let snapshot = StoreSnapshot {
            id: Uuid::new_v4(),
            taken_at: SystemTime::now(),
            tasks,
        };
        inner.last_snapshot = Some(snapshot.clone());
        Ok(snapshot)
    }

    pub fn last_snapshot(&self) -> Result<Option<StoreSnapshot>, StorageError> {
        Ok(self.read()?.last_snapshot.clone())
    }

    pub fn len(&self) -> Result<usize, StorageError> {
        Ok(self.read()?.tasks.len())
    }

    pub fn is_empty(&self) -> Result<bool, StorageError> {
        Ok(self.read()?.tasks.is_empty())
    }
}

impl Default for TaskState {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TaskStore for TaskState {
    async fn fetch_tasks(&self, query: &TaskQuery) -> Result<Vec<ScheduledTask>, StorageError> {
        self.query(query)
    }

    #[instrument(level = "debug", skip(self, config), fields(task_id = %id))]
    async fn modify_in_place(
        &self,
        id: &TaskId,
        config: TaskConfig,
    ) -> Result<bool, StorageError> {
        let replaced = self.replace_config(id, config)?;
        debug!(replaced, "task config replaced");
        Ok(replaced)
    }

    async fn snapshot(&self) -> Result<(), StorageError> {
        let snapshot = self.take_snapshot()?;
        debug!(snapshot = %snapshot.id, tasks = snapshot.tasks.len(), "store snapshot taken");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use mesa_model::Identity;

    use super::*;

    fn config(role: &str, job: &str, instance: u32) -> TaskConfig {
        let mut task = TaskConfig::new()
            .with_owner(Identity::new(role, "user"))
            .with_environment("devel")
            .with_job_name(job)
            .with_resources(1.0, 1024, 1024);
        task.instance_id = Some(instance);
        task
    }

    fn task(
        id: &str,
        status: ScheduleStatus,
        role: &str,
        job: &str,
        instance: u32,
    ) -> ScheduledTask {
        ScheduledTask::new(id, status, config(role, job, instance))
    }

    fn setup_query_state() -> TaskState {
        let state = TaskState::new();
        // role-a/web: 3 tasks (2 running, 1 pending)
        state.insert(task("a1", ScheduleStatus::Running, "role-a", "web", 0)).unwrap();
        state.insert(task("a2", ScheduleStatus::Running, "role-a", "web", 1)).unwrap();
        state.insert(task("a3", ScheduleStatus::Pending, "role-a", "web", 2)).unwrap();

        // role-b/db: 2 tasks (1 failed, 1 pending)
        state.insert(task("b1", ScheduleStatus::Failed, "role-b", "db", 0)).unwrap();
        state.insert(task("b2", ScheduleStatus::Pending, "role-b", "db", 1)).unwrap();

        state
    }

    #[test]
    fn add_and_get_task() {
        let state = TaskState::new();
        let id = state.add_task(config("r", "j", 0), ScheduleStatus::Pending).unwrap();

        let info = state.get(&id).unwrap().expect("task should exist");
        assert_eq!(info.task_id, id);
        assert_eq!(info.status, ScheduleStatus::Pending);
        assert_eq!(info.job_key(), Some(JobKey::new("r", "devel", "j")));
    }

    #[test]
    fn update_status_changes_task_state() {
        let state = setup_query_state();
        assert!(state.update_status(&TaskId::from("a3"), ScheduleStatus::Running).unwrap());
        assert!(!state.update_status(&TaskId::from("missing"), ScheduleStatus::Running).unwrap());

        let info = state.get(&TaskId::from("a3")).unwrap().unwrap();
        assert_eq!(info.status, ScheduleStatus::Running);
    }

    #[test]
    fn remove_task_deletes_from_state_and_index() {
        let state = setup_query_state();
        let key = JobKey::new("role-b", "devel", "db");

        state.remove_task(&TaskId::from("b1")).unwrap();
        state.remove_task(&TaskId::from("b2")).unwrap();

        assert!(state.get(&TaskId::from("b1")).unwrap().is_none());
        assert!(state.query(&TaskQuery::job_scoped(&key)).unwrap().is_empty());
        assert_eq!(state.len().unwrap(), 3);
    }

    #[test]
    fn query_no_filters_returns_all_sorted() {
        let state = setup_query_state();
        let ids: Vec<_> = state
            .query(&TaskQuery::new())
            .unwrap()
            .into_iter()
            .map(|t| t.task_id.to_string())
            .collect();
        assert_eq!(ids, vec!["a1", "a2", "a3", "b1", "b2"]);
    }

    #[test]
    fn query_by_role_only() {
        let state = setup_query_state();
        assert_eq!(state.query(&TaskQuery::role_scoped("role-a")).unwrap().len(), 3);
    }

    #[test]
    fn query_active_excludes_terminal() {
        let state = setup_query_state();
        let items = state.query(&TaskQuery::role_scoped("role-b").active()).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].task_id, TaskId::from("b2"));
    }

    #[test]
    fn query_by_shard() {
        let state = setup_query_state();
        let key = JobKey::new("role-a", "devel", "web");
        let items = state.query(&TaskQuery::shard_scoped(&key, 1)).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].task_id, TaskId::from("a2"));
    }

    #[test]
    fn query_unknown_job_returns_empty() {
        let state = setup_query_state();
        let key = JobKey::new("role-a", "devel", "nonexistent");
        assert!(state.query(&TaskQuery::job_scoped(&key)).unwrap().is_empty());
    }

    #[test]
    fn replace_config_reindexes_on_identity_change() {
        let state = setup_query_state();
        let moved = config("role-a", "api", 0);

        assert!(state.replace_config(&TaskId::from("a1"), moved.clone()).unwrap());
        assert!(!state.replace_config(&TaskId::from("missing"), moved).unwrap());

        let web = JobKey::new("role-a", "devel", "web");
        let api = JobKey::new("role-a", "devel", "api");
        assert_eq!(state.query(&TaskQuery::job_scoped(&web)).unwrap().len(), 2);
        assert_eq!(state.query(&TaskQuery::job_scoped(&api)).unwrap().len(), 1);
    }

    #[test]
    fn snapshot_copies_every_task() {
        let state = setup_query_state();
        assert!(state.last_snapshot().unwrap().is_none());

        let snap = state.take_snapshot().unwrap();
        state.remove_task(&TaskId::from("a1")).unwrap();

        assert_eq!(snap.tasks.len(), 5);
        assert_eq!(state.last_snapshot().unwrap().map(|s| s.id), Some(snap.id));
    }

    #[tokio::test]
    async fn store_port_modifies_in_place() {
        let state = setup_query_state();
        let store: &dyn TaskStore = &state;
        let mut cfg = config("role-a", "web", 0);
        cfg.executor_config = b"rewritten".to_vec();

        assert!(store.modify_in_place(&TaskId::from("a1"), cfg.clone()).await.unwrap());
        assert!(!store.modify_in_place(&TaskId::from("nope"), cfg.clone()).await.unwrap());

        let got = store.fetch_tasks(&TaskQuery::by_id("a1")).await.unwrap();
        assert_eq!(got[0].task, cfg);
        store.snapshot().await.unwrap();
        assert!(state.last_snapshot().unwrap().is_some());
    }
}
