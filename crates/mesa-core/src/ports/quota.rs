use async_trait::async_trait;

use mesa_model::Quota;

use crate::error::StorageError;

/// Per-role resource quota storage.
#[async_trait]
pub trait QuotaLedger: Send + Sync + 'static {
    async fn set_quota(&self, role: &str, quota: Quota) -> Result<(), StorageError>;

    /// Quota of `role`; zero when none was ever set.
    async fn get_quota(&self, role: &str) -> Result<Quota, StorageError>;
}
