use std::collections::BTreeSet;

use async_trait::async_trait;

use mesa_model::{HostStatus, Hosts};

use crate::error::StorageError;

/// Owner of the host maintenance state machine.
///
/// Every method returns the resulting status of the addressed hosts.
#[async_trait]
pub trait MaintenanceCoordinator: Send + Sync + 'static {
    async fn get_status(&self, hosts: &Hosts) -> Result<BTreeSet<HostStatus>, StorageError>;

    async fn start_maintenance(&self, hosts: &Hosts)
    -> Result<BTreeSet<HostStatus>, StorageError>;

    async fn drain(&self, hosts: &Hosts) -> Result<BTreeSet<HostStatus>, StorageError>;

    async fn end_maintenance(&self, hosts: &Hosts) -> Result<BTreeSet<HostStatus>, StorageError>;
}
