//! Prometheus metrics backend for the mesa command gateway.
//!
//! [`PrometheusMetrics`] implements [`mesa_core::MetricsBackend`]; inject it with
//! `SchedulerGateway::with_metrics`.
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use mesa_prometheus::PrometheusMetrics;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let metrics = PrometheusMetrics::new()?;
//! let handle: Arc<dyn mesa_core::MetricsBackend> = Arc::new(metrics.clone());
//!
//! // Serve `metrics.encode_text()?` from your `/metrics` route.
//! # let _ = handle;
//! # Ok(())
//! # }
//! ```
//!
//! ## Metrics
//! - `mesa_commands_total{command, code}` - Counter
//! - `mesa_command_duration_seconds{command}` - Histogram
//! - `mesa_rewrite_items_total{reason}` - Counter
//!
//! This crate does NOT serve `/metrics`; mount [`PrometheusMetrics::encode_text`] on
//! the application's HTTP router.

mod backend;
pub use backend::PrometheusMetrics;

pub use prometheus::{Encoder, Registry, TextEncoder};
