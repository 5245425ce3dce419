//! Reconnect timing for [`crate::StreamClient`].

use std::time::Duration;

/// Delay used by the default policy.
pub const DEFAULT_RECONNECT_DELAY: Duration = Duration::from_secs(5);

/// How long to wait before each reconnection attempt.
///
/// Retries are never capped in count; the client keeps trying until stopped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReconnectPolicy {
    /// Same delay before every attempt.
    Fixed(Duration),
    /// Delay doubles per consecutive failure, starting at `initial` and
    /// never exceeding `max`.
    Backoff { initial: Duration, max: Duration },
}

impl ReconnectPolicy {
    /// Delay before the given reconnection attempt.
    ///
    /// `attempt` is 1-based and counts failures since the last successful open.
    #[must_use]
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        match *self {
            Self::Fixed(delay) => delay,
            Self::Backoff { initial, max } => {
                let mut delay = initial.min(max);
                for _ in 1..attempt {
                    delay = delay.saturating_mul(2).min(max);
                    if delay == max {
                        break;
                    }
                }
                delay
            }
        }
    }
}

impl Default for ReconnectPolicy {
    fn default() -> Self {
        Self::Fixed(DEFAULT_RECONNECT_DELAY)
    }
}

/// Client configuration.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StreamConfig {
    pub reconnect: ReconnectPolicy,
}

impl StreamConfig {
    #[must_use]
    pub fn with_reconnect(mut self, reconnect: ReconnectPolicy) -> Self {
        self.reconnect = reconnect;
        self
    }
}

#[cfg(test)]
#[path = "reconnect_test.rs"]
mod tests;
