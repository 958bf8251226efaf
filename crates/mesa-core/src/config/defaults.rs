use std::collections::{BTreeMap, BTreeSet};

use mesa_model::{DEFAULT_ENVIRONMENT, TaskConfig};

pub const DEFAULT_HEALTH_CHECK_INTERVAL_SECS: u32 = 30;
pub const DEFAULT_PRIORITY: i32 = 0;
pub const DEFAULT_MAX_TASK_FAILURES: i32 = 1;

/// Fill every unset optional field of `task` with its default.
///
/// Fields that are already set are left untouched, so the operation is idempotent.
pub fn apply_defaults_if_unset(task: &mut TaskConfig) {
    task.health_check_interval_secs
        .get_or_insert(DEFAULT_HEALTH_CHECK_INTERVAL_SECS);
    task.instance_id.get_or_insert(0);
    task.priority.get_or_insert(DEFAULT_PRIORITY);
    task.max_task_failures
        .get_or_insert(DEFAULT_MAX_TASK_FAILURES);
    task.requested_ports.get_or_insert_with(BTreeSet::new);
    task.task_links.get_or_insert_with(BTreeMap::new);
    task.constraints.get_or_insert_with(BTreeSet::new);
    task.environment
        .get_or_insert_with(|| DEFAULT_ENVIRONMENT.to_string());
}
