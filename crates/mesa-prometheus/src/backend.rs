use std::time::Duration;

use prometheus::{
    Encoder, HistogramOpts, HistogramVec, IntCounterVec, Opts, Registry, TextEncoder,
    proto::MetricFamily,
};

use mesa_core::MetricsBackend;
use mesa_model::{ResponseCode, RewriteReason};

const DURATION_BUCKETS: &[f64] = &[0.001, 0.005, 0.01, 0.05, 0.1, 0.5, 1.0, 5.0, 15.0, 60.0];

/// Gateway metrics registered in their own [`Registry`].
///
/// Cloning shares the underlying collectors.
#[derive(Clone)]
pub struct PrometheusMetrics {
    registry: Registry,
    commands: IntCounterVec,
    durations: HistogramVec,
    rewrites: IntCounterVec,
}

impl PrometheusMetrics {
    pub fn new() -> Result<Self, prometheus::Error> {
        Self::with_registry(Registry::new())
    }

    /// Register the collectors in an existing registry.
    pub fn with_registry(registry: Registry) -> Result<Self, prometheus::Error> {
        let commands = IntCounterVec::new(
            Opts::new("mesa_commands_total", "Gateway commands by outcome"),
            &["command", "code"],
        )?;
        let durations = HistogramVec::new(
            HistogramOpts::new("mesa_command_duration_seconds", "Gateway command latency")
                .buckets(DURATION_BUCKETS.to_vec()),
            &["command"],
        )?;
        let rewrites = IntCounterVec::new(
            Opts::new("mesa_rewrite_items_total", "Config rewrite items by reason"),
            &["reason"],
        )?;

        registry.register(Box::new(commands.clone()))?;
        registry.register(Box::new(durations.clone()))?;
        registry.register(Box::new(rewrites.clone()))?;

        Ok(Self {
            registry,
            commands,
            durations,
            rewrites,
        })
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn gather(&self) -> Vec<MetricFamily> {
        self.registry.gather()
    }

    /// Text exposition format of every registered metric.
    pub fn encode_text(&self) -> Result<String, prometheus::Error> {
        let mut buffer = Vec::new();
        TextEncoder::new().encode(&self.gather(), &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()))
    }
}

impl MetricsBackend for PrometheusMetrics {
    fn record_command(&self, command: &'static str, code: ResponseCode, elapsed: Duration) {
        self.commands
            .with_label_values(&[command, code.as_str()])
            .inc();
        self.durations
            .with_label_values(&[command])
            .observe(elapsed.as_secs_f64());
    }

    fn record_rewrite(&self, reason: RewriteReason) {
        self.rewrites.with_label_values(&[reason.as_str()]).inc();
    }
}
