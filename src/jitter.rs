//! # Jitter policies and the delay transform.
//!
//! [`Jitter`] adds randomness to backoff delays to prevent thundering herd
//! effects when many callers retry simultaneously:
//!
//! - [`Jitter::Full`] — random delay in `[0, d]` (default, most aggressive)
//! - [`Jitter::None`] — no randomization, predictable delays
//! - [`Jitter::Equal`] — `d/2 + random[0, d/2]` (balanced)
//! - [`Jitter::Custom`] — any caller-supplied `Fn(Duration) -> Duration`
//!
//! [`transform`] is the pure function the attempt loop applies to every raw
//! schedule value: jitter first, then clamp into `[min, max]`.

use rand::Rng;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// Policy controlling randomization of retry delays.
///
/// ## Trade-offs
/// - **Full**: maximum randomness, aggressive load spreading (default)
/// - **None**: predictable, but risks synchronized retry storms
/// - **Equal**: preserves ~75% of the original delay on average
/// - **Custom**: caller-defined strategy, no shape requirement beyond
///   accepting and returning a `Duration`
#[derive(Clone)]
pub enum Jitter {
    /// Full jitter: random delay in `[0, d]`.
    Full,
    /// No jitter: use the raw schedule delay.
    None,
    /// Equal jitter: `d/2 + random[0, d/2]`.
    Equal,
    /// Caller-supplied jitter function, applied verbatim.
    Custom(Arc<dyn Fn(Duration) -> Duration + Send + Sync>),
}

impl Default for Jitter {
    /// Returns [`Jitter::Full`].
    fn default() -> Self {
        Jitter::Full
    }
}

impl fmt::Debug for Jitter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Jitter::Full => f.write_str("Full"),
            Jitter::None => f.write_str("None"),
            Jitter::Equal => f.write_str("Equal"),
            Jitter::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

impl Jitter {
    /// Applies the policy to the given delay.
    pub fn apply(&self, delay: Duration) -> Duration {
        match self {
            Jitter::Full => full_jitter(delay),
            Jitter::None => delay,
            Jitter::Equal => equal_jitter(delay),
            Jitter::Custom(f) => f(delay),
        }
    }
}

/// Transforms a raw schedule delay into the actual wait duration.
///
/// Applies `jitter` first, then clamps with `max(min, ·)` followed by
/// `min(max, ·)` — so when `min > max`, `max` wins. Pure, no suspension.
///
/// # Example
/// ```
/// use std::time::Duration;
/// use rebound::{transform, Jitter};
///
/// let t = transform(
///     Duration::from_millis(5),
///     &Jitter::None,
///     Duration::from_millis(20),
///     Duration::from_secs(10),
/// );
/// assert_eq!(t, Duration::from_millis(20));
/// ```
pub fn transform(raw: Duration, jitter: &Jitter, min: Duration, max: Duration) -> Duration {
    jitter.apply(raw).max(min).min(max)
}

/// Full jitter: random[0, delay]
fn full_jitter(delay: Duration) -> Duration {
    let mut rng = rand::rng();
    let ms = delay.as_millis() as u64;
    if ms == 0 {
        return Duration::ZERO;
    }
    Duration::from_millis(rng.random_range(0..=ms))
}

/// Equal jitter: delay/2 + random[0, delay/2]
fn equal_jitter(delay: Duration) -> Duration {
    let mut rng = rand::rng();
    let ms = delay.as_millis() as u64;
    if ms == 0 {
        return Duration::ZERO;
    }
    let half = ms / 2;
    let jitter = if half == 0 {
        0
    } else {
        rng.random_range(0..=half)
    };
    Duration::from_millis(half + jitter)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_jitter_bounds() {
        let d = Duration::from_millis(1000);
        for _ in 0..100 {
            let out = Jitter::Full.apply(d);
            assert!(out <= d, "full jitter {:?} exceeds base {:?}", out, d);
        }
    }

    #[test]
    fn test_equal_jitter_bounds() {
        let d = Duration::from_millis(1000);
        for _ in 0..100 {
            let out = Jitter::Equal.apply(d);
            assert!(out >= Duration::from_millis(500));
            assert!(out <= d);
        }
    }

    #[test]
    fn test_none_is_identity() {
        let d = Duration::from_millis(123);
        assert_eq!(Jitter::None.apply(d), d);
    }

    #[test]
    fn test_custom_is_applied_verbatim() {
        let double = Jitter::Custom(Arc::new(|d| d * 2));
        assert_eq!(
            double.apply(Duration::from_millis(10)),
            Duration::from_millis(20)
        );
    }

    #[test]
    fn test_zero_delay_stays_zero() {
        assert_eq!(Jitter::Full.apply(Duration::ZERO), Duration::ZERO);
        assert_eq!(Jitter::Equal.apply(Duration::ZERO), Duration::ZERO);
    }

    #[test]
    fn test_transform_raises_to_min() {
        let t = transform(
            Duration::from_millis(5),
            &Jitter::None,
            Duration::from_millis(50),
            Duration::from_secs(10),
        );
        assert_eq!(t, Duration::from_millis(50));
    }

    #[test]
    fn test_transform_caps_at_max() {
        let t = transform(
            Duration::from_secs(60),
            &Jitter::None,
            Duration::ZERO,
            Duration::from_millis(200),
        );
        assert_eq!(t, Duration::from_millis(200));
    }

    #[test]
    fn test_transform_max_wins_over_min() {
        let t = transform(
            Duration::from_millis(5),
            &Jitter::None,
            Duration::from_millis(100),
            Duration::from_millis(10),
        );
        assert_eq!(t, Duration::from_millis(10));
    }

    #[test]
    fn test_transform_clamps_jitter_output() {
        let huge = Jitter::Custom(Arc::new(|_| Duration::from_secs(3600)));
        let t = transform(
            Duration::from_millis(10),
            &huge,
            Duration::ZERO,
            Duration::from_millis(25),
        );
        assert_eq!(t, Duration::from_millis(25));

        let zero = Jitter::Custom(Arc::new(|_| Duration::ZERO));
        let t = transform(
            Duration::from_millis(10),
            &zero,
            Duration::from_millis(15),
            Duration::from_secs(1),
        );
        assert_eq!(t, Duration::from_millis(15));
    }

    #[test]
    fn test_transform_bounds_hold_under_full_jitter() {
        let min = Duration::from_millis(10);
        let max = Duration::from_millis(40);
        for _ in 0..200 {
            let t = transform(Duration::from_millis(100), &Jitter::Full, min, max);
            assert!(t >= min && t <= max, "delay {:?} outside [{:?}, {:?}]", t, min, max);
        }
    }
}
