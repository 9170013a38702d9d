use std::time::Duration;
use tokio_retry::strategy::ExponentialBackoff;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BackoffOptions {
    pub initial: Duration,
    pub max: Duration,
}

impl Default for BackoffOptions {
    fn default() -> Self {
        Self {
            initial: Duration::from_millis(crate::constants::RECONNECT_INITIAL_MS),
            max: Duration::from_millis(crate::constants::RECONNECT_MAX_MS),
        }
    }
}

/// Delays between event stream reconnect attempts: `initial`, doubling on
/// every consecutive failure, capped at `max`.
pub struct ReconnectBackoff {
    options: BackoffOptions,
    strategy: ExponentialBackoff,
}

impl ReconnectBackoff {
    pub fn new(options: BackoffOptions) -> Self {
        Self {
            strategy: Self::strategy(&options),
            options,
        }
    }

    // `from_millis(2).factor(f)` yields 2f, 4f, 8f... so the configured values are
    // doubled here and halved in `next_delay`.
    fn strategy(options: &BackoffOptions) -> ExponentialBackoff {
        let initial_ms = options.initial.as_millis().max(1) as u64;
        ExponentialBackoff::from_millis(2)
            .factor(initial_ms)
            .max_delay(options.max.saturating_mul(2))
    }

    pub fn next_delay(&mut self) -> Duration {
        self.strategy
            .next()
            .map(|delay| delay / 2)
            .unwrap_or(self.options.max)
            .min(self.options.max)
    }

    /// Back to `initial` after a successful connection.
    pub fn reset(&mut self) {
        self.strategy = Self::strategy(&self.options);
    }
}
