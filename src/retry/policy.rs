//! Retry delay policies.

use std::time::Duration;

/// Upper bound applied to exponential delays when none is configured.
pub const DEFAULT_MAX_DELAY: Duration = Duration::from_secs(60);

/// How long to wait before an automatic retry.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum RetryPolicy {
    /// The same delay before every attempt (page boundary).
    Fixed { delay: Duration },
    /// `base * multiplier^attempt`, capped at `max` (service boundary).
    Exponential {
        base: Duration,
        multiplier: f64,
        max: Duration,
    },
}

impl Default for RetryPolicy {
    fn default() -> Self {
        RetryPolicy::Fixed {
            delay: Duration::from_millis(3000),
        }
    }
}

impl RetryPolicy {
    pub fn fixed(delay: Duration) -> Self {
        RetryPolicy::Fixed { delay }
    }

    /// Exponential backoff. Multipliers below 1.0 are treated as 1.0.
    pub fn exponential(base: Duration, multiplier: f64) -> Self {
        RetryPolicy::Exponential {
            base,
            multiplier: if multiplier.is_finite() {
                multiplier.max(1.0)
            } else {
                1.0
            },
            max: DEFAULT_MAX_DELAY.max(base),
        }
    }

    pub fn with_max_delay(self, max: Duration) -> Self {
        match self {
            RetryPolicy::Exponential {
                base, multiplier, ..
            } => RetryPolicy::Exponential {
                base,
                multiplier,
                max,
            },
            fixed => fixed,
        }
    }

    /// Delay before the retry that follows `attempt` completed attempts.
    pub fn delay_for(&self, attempt: u32) -> Duration {
        match *self {
            RetryPolicy::Fixed { delay } => delay,
            RetryPolicy::Exponential {
                base,
                multiplier,
                max,
            } => {
                // Cap the exponent so powi cannot overflow to infinity.
                let exponent = attempt.min(64) as i32;
                let millis = base.as_millis() as f64 * multiplier.powi(exponent);
                let capped = millis.min(max.as_millis() as f64);
                Duration::from_millis(capped.round() as u64)
            }
        }
    }
}

/// Whole seconds shown on the countdown for `delay`, rounded up.
pub fn countdown_seconds(delay: Duration) -> u32 {
    let millis = delay.as_millis();
    let seconds = millis.div_ceil(1000);
    u32::try_from(seconds).unwrap_or(u32::MAX)
}
