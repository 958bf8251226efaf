use serde::{Deserialize, Serialize};

use crate::{JobConfig, ShardKey, TaskConfig};

/// One item of a configuration rewrite batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "kind")]
pub enum ConfigRewrite {
    Job(JobConfigRewrite),
    Shard(ShardConfigRewrite),
}

/// Whole-job rewrite request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobConfigRewrite {
    pub old_job: JobConfig,
    pub rewritten_job: JobConfig,
}

/// Compare-and-swap rewrite of a single instance's template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShardConfigRewrite {
    pub shard_key: ShardKey,
    /// Template the caller believes is stored.
    pub old_task: TaskConfig,
    /// Template to store when `old_task` still matches.
    pub rewritten_task: TaskConfig,
}

/// Why a rewrite item ended the way it did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RewriteReason {
    /// Template replaced.
    Applied,
    /// Whole-job rewrites are not supported.
    JobRewriteUnsupported,
    /// No active task at the shard key.
    TaskMissing,
    /// More than one active task at the shard key.
    AmbiguousShard,
    /// Stored template differs from the expected one.
    CasMismatch,
    /// Rewritten template names another job or instance.
    IdentityMismatch,
    /// Task vanished between read and write.
    RaceLost,
    /// Storage layer failed while processing the item.
    StoreFailed,
}

impl RewriteReason {
    pub fn is_applied(&self) -> bool {
        matches!(self, RewriteReason::Applied)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RewriteReason::Applied => "applied",
            RewriteReason::JobRewriteUnsupported => "job_rewrite_unsupported",
            RewriteReason::TaskMissing => "task_missing",
            RewriteReason::AmbiguousShard => "ambiguous_shard",
            RewriteReason::CasMismatch => "cas_mismatch",
            RewriteReason::IdentityMismatch => "identity_mismatch",
            RewriteReason::RaceLost => "race_lost",
            RewriteReason::StoreFailed => "store_failed",
        }
    }
}

/// Outcome of one rewrite item, reported in request order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewriteResult {
    pub reason: RewriteReason,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl RewriteResult {
    pub fn applied() -> Self {
        Self {
            reason: RewriteReason::Applied,
            message: None,
        }
    }

    pub fn rejected(reason: RewriteReason, message: impl Into<String>) -> Self {
        Self {
            reason,
            message: Some(message.into()),
        }
    }
}
