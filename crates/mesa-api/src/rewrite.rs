//! Compare-and-swap rewrites of stored task templates.
//!
//! Items are independent: each is read, compared and written on its own, and the
//! store's conditional in-place update is the only concurrency control. A batch is not
//! a transaction.

use tracing::{debug, warn};

use mesa_core::apply_defaults_if_unset;
use mesa_model::{
    ConfigRewrite, Response, ResponseCode, RewriteReason, RewriteResult, ShardConfigRewrite,
    ShardKey, TaskConfig, TaskQuery,
};

use crate::{error::ApiError, gateway::SchedulerGateway};

pub(crate) const JOB_REWRITE_UNSUPPORTED: &str = "Job rewrites are not yet implemented.";

impl SchedulerGateway {
    pub(crate) async fn rewrite_batch(
        &self,
        rewrites: Vec<ConfigRewrite>,
    ) -> Result<Response<Vec<RewriteResult>>, ApiError> {
        let mut results = Vec::with_capacity(rewrites.len());
        for rewrite in rewrites {
            let result = match rewrite {
                ConfigRewrite::Job(_) => RewriteResult::rejected(
                    RewriteReason::JobRewriteUnsupported,
                    JOB_REWRITE_UNSUPPORTED,
                ),
                ConfigRewrite::Shard(shard) => self.rewrite_shard(shard).await,
            };
            self.metrics.record_rewrite(result.reason);
            results.push(result);
        }

        Ok(aggregate(results))
    }

    async fn rewrite_shard(&self, rewrite: ShardConfigRewrite) -> RewriteResult {
        let ShardConfigRewrite {
            shard_key,
            old_task,
            rewritten_task,
        } = rewrite;
        let shard = describe(&shard_key);
        let query = TaskQuery::shard_scoped(&shard_key.job_key, shard_key.instance_id).active();

        let mut tasks = match self.store.fetch_tasks(&query).await {
            Ok(tasks) => tasks,
            Err(e) => return store_failed(&shard, e),
        };
        let task = match tasks.len() {
            0 => {
                return RewriteResult::rejected(
                    RewriteReason::TaskMissing,
                    format!("Task does not exist: {shard}"),
                );
            }
            1 => tasks.remove(0),
            n => {
                return RewriteResult::rejected(
                    RewriteReason::AmbiguousShard,
                    format!("Expected one active task for {shard}, found {n}"),
                );
            }
        };

        if task.task != old_task {
            return RewriteResult::rejected(
                RewriteReason::CasMismatch,
                format!("CAS compare failed for {shard}"),
            );
        }

        let mut desired = rewritten_task;
        adopt_identity(&mut desired, &task.task, &shard_key);
        if desired.job_key().as_ref() != Some(&shard_key.job_key)
            || desired.instance_id != Some(shard_key.instance_id)
        {
            return RewriteResult::rejected(
                RewriteReason::IdentityMismatch,
                format!("Rewritten template does not belong to {shard}"),
            );
        }
        apply_defaults_if_unset(&mut desired);

        match self.store.modify_in_place(&task.task_id, desired).await {
            Ok(true) => {
                debug!(shard = %shard, task_id = %task.task_id, "task config rewritten");
                RewriteResult::applied()
            }
            Ok(false) => RewriteResult::rejected(
                RewriteReason::RaceLost,
                format!(
                    "Task {} for {shard} vanished before it could be rewritten",
                    task.task_id
                ),
            ),
            Err(e) => store_failed(&shard, e),
        }
    }
}

fn describe(key: &ShardKey) -> String {
    format!("{}/{}", key.job_key, key.instance_id)
}

/// Stored templates stay self-identifying: unset identity is taken from the current task.
fn adopt_identity(desired: &mut TaskConfig, current: &TaskConfig, shard_key: &ShardKey) {
    if desired.owner.is_none() {
        desired.owner = current.owner.clone();
    }
    if desired.environment.is_none() {
        desired.environment = current.environment.clone();
    }
    if desired.job_name.is_none() {
        desired.job_name = current.job_name.clone();
    }
    desired.instance_id.get_or_insert(shard_key.instance_id);
}

fn store_failed(shard: &str, err: impl std::fmt::Display) -> RewriteResult {
    warn!(shard, error = %err, "rewrite aborted by storage failure");
    RewriteResult::rejected(
        RewriteReason::StoreFailed,
        format!("Failed to rewrite {shard}: {err}"),
    )
}

/// ERROR when any item hit storage, else WARNING when any item was not applied.
fn aggregate(results: Vec<RewriteResult>) -> Response<Vec<RewriteResult>> {
    let code = if results.iter().any(|r| r.reason == RewriteReason::StoreFailed) {
        ResponseCode::Error
    } else if results.iter().any(|r| !r.reason.is_applied()) {
        ResponseCode::Warning
    } else {
        ResponseCode::Ok
    };

    let messages: Vec<&str> = results.iter().filter_map(|r| r.message.as_deref()).collect();
    let message = (!messages.is_empty()).then(|| messages.join("\n"));

    Response {
        code,
        message,
        result: Some(results),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn any_warning_makes_the_batch_warn() {
        let resp = aggregate(vec![
            RewriteResult::applied(),
            RewriteResult::rejected(RewriteReason::CasMismatch, "CAS compare failed"),
        ]);
        assert_eq!(resp.code, ResponseCode::Warning);
        assert_eq!(resp.message.as_deref(), Some("CAS compare failed"));
        assert_eq!(resp.result.map(|r| r.len()), Some(2));
    }

    #[test]
    fn storage_failure_dominates() {
        let resp = aggregate(vec![
            RewriteResult::rejected(RewriteReason::TaskMissing, "missing"),
            RewriteResult::rejected(RewriteReason::StoreFailed, "boom"),
        ]);
        assert_eq!(resp.code, ResponseCode::Error);
        assert_eq!(resp.message.as_deref(), Some("missing\nboom"));
    }

    #[test]
    fn all_applied_is_ok() {
        let resp = aggregate(vec![RewriteResult::applied(), RewriteResult::applied()]);
        assert_eq!(resp.code, ResponseCode::Ok);
        assert!(resp.message.is_none());
    }

    #[test]
    fn empty_batch_is_ok() {
        let resp = aggregate(Vec::new());
        assert_eq!(resp.code, ResponseCode::Ok);
        assert_eq!(resp.result, Some(Vec::new()));
    }
}
