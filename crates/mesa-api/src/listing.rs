use std::collections::BTreeMap;

use tracing::debug;

use mesa_model::{JobConfig, JobKey, Response, ScheduledTask, TaskQuery};

use crate::{error::ApiError, gateway::SchedulerGateway};

impl SchedulerGateway {
    pub(crate) async fn get_jobs_body(
        &self,
        role: &str,
    ) -> Result<Response<Vec<JobConfig>>, ApiError> {
        let declared = self.cron.get_jobs().await?;
        let live = self
            .store
            .fetch_tasks(&TaskQuery::role_scoped(role).active())
            .await?;

        let jobs = reconcile(role, declared, &live);
        debug!(role, jobs = jobs.len(), "jobs listed");
        Ok(Response::ok(jobs))
    }
}

/// Merge declared definitions with jobs synthesized from live tasks.
///
/// On a shared key the live shape wins; only the cron schedule is taken from the
/// declared definition. Output is ordered by job key.
pub(crate) fn reconcile(
    role: &str,
    declared: Vec<JobConfig>,
    live: &[ScheduledTask],
) -> Vec<JobConfig> {
    let mut merged: BTreeMap<JobKey, JobConfig> = declared
        .into_iter()
        .filter(|job| job.key.role == role)
        .map(|job| (job.key.clone(), job))
        .collect();

    let mut groups: BTreeMap<JobKey, Vec<&ScheduledTask>> = BTreeMap::new();
    for task in live {
        if let Some(key) = task.job_key()
            && key.role == role
        {
            groups.entry(key).or_default().push(task);
        }
    }

    for (key, tasks) in groups {
        let Some(sample) = tasks.first() else {
            continue;
        };
        let Some(owner) = sample.task.owner.clone() else {
            continue;
        };

        let mut job = JobConfig::new(key.clone(), owner)
            .with_instance_count(tasks.len() as i32)
            .with_task_config(sample.task.clone());
        if let Some(declared) = merged.get(&key) {
            job.cron_schedule = declared.cron_schedule.clone();
        }
        merged.insert(key, job);
    }

    merged.into_values().collect()
}
