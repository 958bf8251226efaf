use mesa_model::{
    Constraint, DEDICATED_ATTRIBUTE, HOST_ATTRIBUTE, RACK_ATTRIBUTE, TaskConfig, TaskConstraint,
};

use crate::error::ConfigError;

/// At most one instance of the job per host.
pub fn host_limit_constraint() -> Constraint {
    Constraint::limit(HOST_ATTRIBUTE, 1)
}

/// At most one instance of the job per rack.
pub fn rack_limit_constraint() -> Constraint {
    Constraint::limit(RACK_ATTRIBUTE, 1)
}

/// Reject constraints with an impossible shape.
pub(crate) fn check_sanity(task: &TaskConfig) -> Result<(), ConfigError> {
    for c in task.constraints() {
        match &c.constraint {
            TaskConstraint::Value { values, .. } if values.is_empty() => {
                return Err(ConfigError::EmptyValueConstraint(c.name.clone()));
            }
            TaskConstraint::Limit { limit } if *limit <= 0 => {
                return Err(ConfigError::NonPositiveLimit {
                    name: c.name.clone(),
                    limit: *limit,
                });
            }
            _ => {}
        }
    }
    Ok(())
}

/// Enforce the dedicated-host rules for a template owned by `role`.
pub(crate) fn check_dedicated(task: &TaskConfig, role: &str) -> Result<(), ConfigError> {
    for c in task.constraints().filter(|c| c.name == DEDICATED_ATTRIBUTE) {
        match &c.constraint {
            TaskConstraint::Limit { .. } => return Err(ConfigError::DedicatedLimit),
            TaskConstraint::Value { values, .. } => {
                if values.len() != 1 {
                    return Err(ConfigError::MultipleDedicatedValues(values.len()));
                }
                if let Some(value) = values.first()
                    && !dedicated_allowed(role, value)
                {
                    return Err(ConfigError::UnauthorizedDedicated {
                        role: role.to_string(),
                        value: value.clone(),
                    });
                }
            }
        }
    }
    Ok(())
}

/// `value` names a dedicated pool of `role` when it is the role itself or `role/<anything>`.
fn dedicated_allowed(role: &str, value: &str) -> bool {
    value
        .strip_prefix(role)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
}

/// Add host/rack co-location limits unless the template carries its own.
pub(crate) fn apply_constraint_defaults(task: &mut TaskConfig) {
    let has_limit = |task: &TaskConfig, name: &str| {
        task.constraints()
            .any(|c| c.name == name && matches!(c.constraint, TaskConstraint::Limit { .. }))
    };

    let add_host = !has_limit(task, HOST_ATTRIBUTE);
    let add_rack = !has_limit(task, RACK_ATTRIBUTE);

    let constraints = task.constraints.get_or_insert_with(Default::default);
    if add_host {
        constraints.insert(host_limit_constraint());
    }
    if add_rack {
        constraints.insert(rack_limit_constraint());
    }
}
