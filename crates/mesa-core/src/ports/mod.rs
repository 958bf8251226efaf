//! Collaborators the gateway drives.
//!
//! Each port is an object-safe async trait so the gateway can hold them as
//! `Arc<dyn ...>` injected at construction.

mod scheduler;
pub use scheduler::SchedulerCore;

mod store;
pub use store::TaskStore;

mod quota;
pub use quota::QuotaLedger;

mod maintenance;
pub use maintenance::MaintenanceCoordinator;

mod cron;
pub use cron::CronRegistry;
