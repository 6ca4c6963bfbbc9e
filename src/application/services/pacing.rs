use crate::config::PacingConfig;
use rand::Rng;
use std::time::Duration;
use tracing::warn;

/// Wait inserted after the `iteration`-th candidate, before the next one.
pub trait PacingPolicy: Send + Sync {
    fn delay(&self, iteration: usize) -> Duration;
}

/// Uniformly random whole-second delay, re-drawn on every call.
#[derive(Debug, Clone, Copy)]
pub struct RandomPacing {
    min_secs: u64,
    max_secs: u64,
}

impl RandomPacing {
    pub fn new(min_secs: u64, max_secs: u64) -> Self {
        if min_secs > max_secs {
            warn!(
                "Pacing bounds inverted ({} > {}), swapping them",
                min_secs, max_secs
            );
            return Self {
                min_secs: max_secs,
                max_secs: min_secs,
            };
        }
        Self { min_secs, max_secs }
    }

    pub fn bounds(&self) -> (Duration, Duration) {
        (
            Duration::from_secs(self.min_secs),
            Duration::from_secs(self.max_secs),
        )
    }
}

impl From<PacingConfig> for RandomPacing {
    fn from(config: PacingConfig) -> Self {
        Self::new(config.min_secs, config.max_secs)
    }
}

impl PacingPolicy for RandomPacing {
    fn delay(&self, _iteration: usize) -> Duration {
        Duration::from_secs(rand::thread_rng().gen_range(self.min_secs..=self.max_secs))
    }
}

/// No wait at all.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPacing;

impl PacingPolicy for NoPacing {
    fn delay(&self, _iteration: usize) -> Duration {
        Duration::ZERO
    }
}
