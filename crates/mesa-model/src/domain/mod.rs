mod constants;
pub use constants::{DEDICATED_ATTRIBUTE, DEFAULT_ENVIRONMENT, HOST_ATTRIBUTE, RACK_ATTRIBUTE};

mod identity;
pub use identity::Identity;

mod job_key;
pub use job_key::JobKey;

mod shard_key;
pub use shard_key::ShardKey;

mod task_id;
pub use task_id::TaskId;

mod task_status;
pub use task_status::ScheduleStatus;

mod constraint;
pub use constraint::{Constraint, TaskConstraint};

mod task_config;
pub use task_config::TaskConfig;

mod job_config;
pub use job_config::JobConfig;

mod scheduled_task;
pub use scheduled_task::ScheduledTask;

mod task_query;
pub use task_query::TaskQuery;

mod quota;
pub use quota::Quota;

mod host;
pub use host::{HostStatus, MaintenanceMode};

mod session;
pub use session::SessionKey;

mod capability;
pub use capability::Capability;

mod rewrite;
pub use rewrite::{
    ConfigRewrite, JobConfigRewrite, RewriteReason, RewriteResult, ShardConfigRewrite,
};

mod update;
pub use update::StartUpdateResult;

/// Set of hostnames addressed by a maintenance command.
pub type Hosts = std::collections::BTreeSet<String>;

/// Zero-based index of a job instance.
pub type InstanceId = u32;
