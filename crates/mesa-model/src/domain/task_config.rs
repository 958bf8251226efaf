use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::{Constraint, Identity, InstanceId, JobKey};

/// Template describing one task instance of a job.
///
/// Optional fields are the ones the validation pipeline fills in when absent.
/// Equality is structural: two templates are equal only if every field matches,
/// which is what compare-and-swap rewrites rely on.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<Identity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub environment: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_name: Option<String>,

    /// Requested CPU cores; must be strictly positive.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub num_cpus: Option<f64>,
    /// Requested RAM in megabytes; must be strictly positive.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ram_mb: Option<i64>,
    /// Requested disk in megabytes; must be strictly positive.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disk_mb: Option<i64>,

    #[serde(default)]
    pub production: bool,
    #[serde(default)]
    pub is_service: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub constraints: Option<BTreeSet<Constraint>>,

    /// Opaque executor payload; never interpreted by the gateway.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub executor_config: Vec<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_email: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub health_check_interval_secs: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instance_id: Option<InstanceId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_task_failures: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requested_ports: Option<BTreeSet<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_links: Option<BTreeMap<String, String>>,
}

impl TaskConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_owner(mut self, owner: Identity) -> Self {
        self.owner = Some(owner);
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

    pub fn with_resources(mut self, num_cpus: f64, ram_mb: i64, disk_mb: i64) -> Self {
        self.num_cpus = Some(num_cpus);
        self.ram_mb = Some(ram_mb);
        self.disk_mb = Some(disk_mb);
        self
    }

    pub fn with_production(mut self, production: bool) -> Self {
        self.production = production;
        self
    }

    pub fn with_constraint(mut self, constraint: Constraint) -> Self {
        self.constraints
            .get_or_insert_with(BTreeSet::new)
            .insert(constraint);
        self
    }

    pub fn with_executor_config(mut self, payload: impl Into<Vec<u8>>) -> Self {
        self.executor_config = payload.into();
        self
    }

    /// Job identity encoded in the template, if fully populated.
    pub fn job_key(&self) -> Option<JobKey> {
        let owner = self.owner.as_ref()?;
        Some(JobKey::new(
            owner.role.clone(),
            self.environment.clone()?,
            self.job_name.clone()?,
        ))
    }

    /// Constraints declared on the template, empty when unset.
    pub fn constraints(&self) -> impl Iterator<Item = &Constraint> {
        self.constraints.iter().flatten()
    }
}
