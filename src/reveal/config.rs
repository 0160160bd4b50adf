//! Reveal configuration.

use super::error::ConfigError;
use std::time::Duration;

/// Default delay between two revealed characters.
pub const DEFAULT_CADENCE: Duration = Duration::from_millis(20);

/// Default number of characters between two scroll-sync requests.
pub const DEFAULT_SCROLL_STRIDE: usize = 5;

/// Configuration for a [`RevealScheduler`](super::RevealScheduler).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevealConfig {
    /// Time between two revealed characters.
    pub cadence: Duration,
    /// Deferral between `start` and the reveal entering `Running`.
    ///
    /// Gives the consumer a chance to finish mounting before the first
    /// character tick is scheduled.
    pub initial_delay: Duration,
    /// Characters between two scroll-sync requests.
    pub scroll_stride: usize,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            cadence: DEFAULT_CADENCE,
            initial_delay: Duration::ZERO,
            scroll_stride: DEFAULT_SCROLL_STRIDE,
        }
    }
}

impl RevealConfig {
    /// Set the per-character cadence.
    #[must_use]
    pub const fn with_cadence(mut self, cadence: Duration) -> Self {
        self.cadence = cadence;
        self
    }

    /// Set the initial deferral.
    #[must_use]
    pub const fn with_initial_delay(mut self, delay: Duration) -> Self {
        self.initial_delay = delay;
        self
    }

    /// Set the scroll-sync stride.
    #[must_use]
    pub const fn with_scroll_stride(mut self, stride: usize) -> Self {
        self.scroll_stride = stride;
        self
    }

    /// Check the configuration for values the scheduler cannot run with.
    pub const fn validate(&self) -> Result<(), ConfigError> {
        if self.cadence.is_zero() {
            return Err(ConfigError::ZeroCadence);
        }
        if self.scroll_stride == 0 {
            return Err(ConfigError::ZeroStride);
        }
        Ok(())
    }
}
