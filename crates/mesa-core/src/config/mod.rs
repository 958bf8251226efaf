//! Validation and normalization of job submissions.
//!
//! [`parse_job`] turns an untrusted [`JobConfig`] into a [`ParsedConfiguration`]: one
//! fully defaulted template per instance. Every rejection is a [`ConfigError`].

mod constraints;
pub use constraints::{host_limit_constraint, rack_limit_constraint};

mod defaults;
pub use defaults::{
    DEFAULT_HEALTH_CHECK_INTERVAL_SECS, DEFAULT_MAX_TASK_FAILURES, DEFAULT_PRIORITY,
    apply_defaults_if_unset,
};

use serde::Deserialize;
use tracing::debug;

use mesa_model::{InstanceId, JobConfig, TaskConfig};

use crate::error::ConfigError;

pub const DEFAULT_MAX_TASKS_PER_JOB: usize = 4000;

/// Bounds applied while parsing a job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct ParseLimits {
    pub max_tasks_per_job: usize,
}

impl Default for ParseLimits {
    fn default() -> Self {
        Self {
            max_tasks_per_job: DEFAULT_MAX_TASKS_PER_JOB,
        }
    }
}

/// A validated job paired with its expanded, defaulted templates.
///
/// `job.task_config` holds the defaulted template of instance 0.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedConfiguration {
    job: JobConfig,
    task_configs: Vec<TaskConfig>,
}

impl ParsedConfiguration {
    pub fn job(&self) -> &JobConfig {
        &self.job
    }

    pub fn task_configs(&self) -> &[TaskConfig] {
        &self.task_configs
    }

    pub fn instance_count(&self) -> usize {
        self.task_configs.len()
    }

    pub fn into_parts(self) -> (JobConfig, Vec<TaskConfig>) {
        (self.job, self.task_configs)
    }
}

/// Validate `job` and expand it into one defaulted template per instance.
pub fn parse_job(
    job: &JobConfig,
    limits: &ParseLimits,
) -> Result<ParsedConfiguration, ConfigError> {
    let count = match job.instance_count {
        None => return Err(ConfigError::MissingInstanceCount),
        Some(n) if n <= 0 => return Err(ConfigError::NonPositiveInstanceCount(n)),
        Some(n) => n as usize,
    };
    let template = job.task_config.as_ref().ok_or(ConfigError::MissingTaskConfig)?;

    if count > limits.max_tasks_per_job {
        return Err(ConfigError::TooManyTasks {
            count,
            max: limits.max_tasks_per_job,
        });
    }

    check_identity(job)?;
    constraints::check_sanity(template)?;
    constraints::check_dedicated(template, &job.owner.role)?;

    let mut task_configs = Vec::with_capacity(count);
    for instance in 0..count as InstanceId {
        let mut task = template.clone();
        task.owner = Some(job.owner.clone());
        task.environment = Some(job.key.environment.clone());
        task.job_name = Some(job.key.name.clone());
        task.instance_id = Some(instance);

        check_resources(&task, instance)?;
        apply_defaults_if_unset(&mut task);
        constraints::apply_constraint_defaults(&mut task);
        task_configs.push(task);
    }

    let mut parsed = job.clone();
    parsed.task_config = task_configs.first().cloned();

    debug!(job = %job.key, instances = count, "job parsed");
    Ok(ParsedConfiguration {
        job: parsed,
        task_configs,
    })
}

fn check_identity(job: &JobConfig) -> Result<(), ConfigError> {
    check_identifier("role", &job.key.role)?;
    check_identifier("environment", &job.key.environment)?;
    check_identifier("name", &job.key.name)?;

    if job.key.role != job.owner.role {
        return Err(ConfigError::RoleMismatch {
            key_role: job.key.role.clone(),
            owner_role: job.owner.role.clone(),
        });
    }
    Ok(())
}

fn check_identifier(field: &'static str, value: &str) -> Result<(), ConfigError> {
    let valid = !value.is_empty()
        && value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'));

    if valid {
        Ok(())
    } else {
        Err(ConfigError::BadIdentifier {
            field,
            value: value.to_string(),
        })
    }
}

fn check_resources(task: &TaskConfig, instance: InstanceId) -> Result<(), ConfigError> {
    let rejected = |resource| ConfigError::NonPositiveResource { instance, resource };

    if !task.num_cpus.is_some_and(|cpus| cpus > 0.0) {
        return Err(rejected("num_cpus"));
    }
    if !task.ram_mb.is_some_and(|ram| ram > 0) {
        return Err(rejected("ram_mb"));
    }
    if !task.disk_mb.is_some_and(|disk| disk > 0) {
        return Err(rejected("disk_mb"));
    }
    Ok(())
}
