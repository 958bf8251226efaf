use std::time::Duration;

use serde::Deserialize;

use mesa_core::{ParseLimits, config::DEFAULT_MAX_TASKS_PER_JOB};

/// Gateway settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
    /// Upper bound on the expanded instance count of one job.
    pub max_tasks_per_job: usize,
    /// Backoff used while waiting for killed tasks to leave active states.
    pub kill_wait: KillWaitConfig,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            max_tasks_per_job: DEFAULT_MAX_TASKS_PER_JOB,
            kill_wait: KillWaitConfig::default(),
        }
    }
}

impl GatewayConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.max_tasks_per_job == 0 {
            return Err("max_tasks_per_job must be positive".into());
        }
        self.kill_wait.validate()
    }

    pub fn limits(&self) -> ParseLimits {
        ParseLimits {
            max_tasks_per_job: self.max_tasks_per_job,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct KillWaitConfig {
    /// Delay before the first re-check (default: 1 second).
    pub first_ms: u64,
    /// Ceiling of the doubling delay (default: 5 seconds).
    pub max_ms: u64,
    /// Number of re-checks before giving up (default: 10).
    pub max_attempts: u32,
}

impl Default for KillWaitConfig {
    fn default() -> Self {
        Self {
            first_ms: 1_000,
            max_ms: 5_000,
            max_attempts: 10,
        }
    }
}

impl KillWaitConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.max_attempts == 0 {
            return Err("kill_wait.max_attempts must be positive".into());
        }
        if self.first_ms > self.max_ms {
            return Err(format!(
                "kill_wait.first_ms ({}) exceeds kill_wait.max_ms ({})",
                self.first_ms, self.max_ms
            ));
        }
        Ok(())
    }

    /// Delay before re-check number `attempt` (0-based).
    pub fn delay(&self, attempt: u32) -> Duration {
        let ms = self
            .first_ms
            .saturating_mul(1u64 << attempt.min(32))
            .min(self.max_ms);
        Duration::from_millis(ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let cfg = GatewayConfig::default();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.limits().max_tasks_per_job, 4000);
    }

    #[test]
    fn backoff_doubles_up_to_ceiling() {
        let wait = KillWaitConfig::default();
        let delays: Vec<_> = (0..5).map(|i| wait.delay(i).as_millis()).collect();
        assert_eq!(delays, vec![1000, 2000, 4000, 5000, 5000]);
        assert_eq!(wait.delay(u32::MAX).as_millis(), 5000);
    }

    #[test]
    fn invalid_values_are_reported() {
        let zero_tasks = GatewayConfig {
            max_tasks_per_job: 0,
            ..Default::default()
        };
        let inverted = KillWaitConfig {
            first_ms: 10,
            max_ms: 1,
            max_attempts: 1,
        };

        assert!(zero_tasks.validate().is_err());
        assert!(inverted.validate().is_err());
    }

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let cfg: GatewayConfig =
            serde_json::from_str(r#"{"kill_wait":{"max_attempts":3}}"#).unwrap();
        assert_eq!(cfg.max_tasks_per_job, 4000);
        assert_eq!(cfg.kill_wait.max_attempts, 3);
        assert_eq!(cfg.kill_wait.first_ms, 1000);
    }
}
