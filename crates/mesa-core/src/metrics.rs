use std::time::Duration;

use mesa_model::{ResponseCode, RewriteReason};

/// Sink for gateway metrics.
///
/// Implementations must be cheap and non-blocking: they are called inline on every command.
pub trait MetricsBackend: Send + Sync {
    /// One command finished with `code` after `elapsed`.
    fn record_command(&self, command: &'static str, code: ResponseCode, elapsed: Duration);

    /// One rewrite item finished with `reason`.
    fn record_rewrite(&self, _reason: RewriteReason) {}
}

/// Backend that discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopMetrics;

impl MetricsBackend for NoopMetrics {
    #[inline]
    fn record_command(&self, _command: &'static str, _code: ResponseCode, _elapsed: Duration) {}
}
