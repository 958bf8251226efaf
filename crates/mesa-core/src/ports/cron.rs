use async_trait::async_trait;

use mesa_model::JobConfig;

use crate::error::StorageError;

/// Registry of declarative (cron) job definitions.
#[async_trait]
pub trait CronRegistry: Send + Sync + 'static {
    /// Every known definition, for all roles.
    async fn get_jobs(&self) -> Result<Vec<JobConfig>, StorageError>;
}
