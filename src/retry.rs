//! Bounded retry with exponential backoff for popup initialization

use crate::config::LoadConfig;
use crate::error::{Result, SelectorError};
use crate::i18n;
use log::{debug, info};
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct RetryController {
    attempts: u32,
    max_retries: u32,
    base_delay: Duration,
    max_delay: Duration,
}

impl RetryController {
    pub fn new(config: &LoadConfig) -> Self {
        Self {
            attempts: 0,
            max_retries: config.max_retries,
            base_delay: config.retry_base_delay,
            max_delay: config.retry_max_delay,
        }
    }

    /// Delay before the given 1-based attempt: `base * 2^(attempt-1)`, capped.
    pub fn backoff(&self, attempt: u32) -> Duration {
        let exponent = attempt.saturating_sub(1).min(31);
        self.base_delay
            .checked_mul(1u32 << exponent)
            .map_or(self.max_delay, |delay| delay.min(self.max_delay))
    }

    /// Claim the next attempt and return how long to wait before it.
    ///
    /// Fails once every retry has been used; the caller must not reload then.
    pub fn begin(&mut self) -> Result<Duration> {
        if self.exhausted() {
            info!("Maximum retry attempts reached");
            return Err(SelectorError::Unknown(format!(
                "maximum of {} retries reached",
                self.max_retries
            )));
        }
        self.attempts += 1;
        debug!("Retry attempt {}/{}", self.attempts, self.max_retries);
        Ok(self.backoff(self.attempts))
    }

    pub fn reset(&mut self) {
        self.attempts = 0;
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    pub fn max_retries(&self) -> u32 {
        self.max_retries
    }

    pub fn exhausted(&self) -> bool {
        self.attempts >= self.max_retries
    }

    pub fn label(&self) -> String {
        i18n::retry_label(self.attempts, self.max_retries)
    }
}
