//! Delay strategies for step execution
//!
//! Every step suspends exactly once before it is evaluated. The length of
//! that suspension comes from a [`DelayStrategy`]: either a fixed duration
//! or a uniformly random duration within a bounded range.
//!
//! ```yaml
//! delay:
//!   mode: fixed
//!   fixed_ms: 2000
//! ```
//!
//! ```yaml
//! delay:
//!   mode: random
//!   min_ms: 1000
//!   max_ms: 4000
//! ```

use std::time::Duration;

/// Default delay for the fixed strategy (2 seconds)
pub const DEFAULT_FIXED_DELAY: Duration = Duration::from_millis(2000);

/// Default lower bound for the random strategy
pub const DEFAULT_RANDOM_MIN: Duration = Duration::from_millis(1000);

/// Default upper bound for the random strategy
pub const DEFAULT_RANDOM_MAX: Duration = Duration::from_millis(4000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DelayStrategy {
    Fixed(Duration),
    /// Uniform in `[min, max)`
    Random { min: Duration, max: Duration },
}

impl Default for DelayStrategy {
    fn default() -> Self {
        DelayStrategy::Fixed(DEFAULT_FIXED_DELAY)
    }
}

impl DelayStrategy {
    pub fn fixed(delay: Duration) -> Self {
        DelayStrategy::Fixed(delay)
    }

    pub fn random(min: Duration, max: Duration) -> Self {
        DelayStrategy::Random { min, max }
    }

    /// Random strategy over the default 1000–4000 ms range
    pub fn default_random() -> Self {
        DelayStrategy::Random {
            min: DEFAULT_RANDOM_MIN,
            max: DEFAULT_RANDOM_MAX,
        }
    }

    /// Draw the delay for one step
    pub fn next_delay(&self) -> Duration {
        match *self {
            DelayStrategy::Fixed(delay) => delay,
            DelayStrategy::Random { min, max } => {
                let min_ms = min.as_millis() as u64;
                let max_ms = max.as_millis() as u64;
                if max_ms <= min_ms {
                    return min;
                }
                Duration::from_millis(fastrand::u64(min_ms..max_ms))
            }
        }
    }

    /// Upper bound on any delay this strategy can produce
    pub fn max_delay(&self) -> Duration {
        match *self {
            DelayStrategy::Fixed(delay) => delay,
            DelayStrategy::Random { min, max } => min.max(max),
        }
    }
}
