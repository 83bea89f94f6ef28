//! # Delay schedule cursor.
//!
//! A [`Schedule`] is the pull-based sequence of base delays consumed one per
//! retry. `None` means exhausted: no more retries are permitted, regardless of
//! any remaining time budget.
//!
//! Both producer shapes hide behind the one trait:
//! - any `Iterator<Item = Duration> + Send` is a synchronous schedule — its
//!   `next` completes without suspending;
//! - [`StreamSchedule`] wraps a `futures::Stream` for delays that are
//!   themselves computed on demand (rate-limited, fetched, etc.). The attempt
//!   loop races every pull against the cancellation signal, so a canceled run
//!   never leaves a pull outstanding.
//!
//! The executor never generates delay values; exponential/linear growth and
//! retry caps are whatever the caller's sequence encodes (`.take(n)` on an
//! iterator bounds the retry count).

use std::time::Duration;

use async_trait::async_trait;
use futures::{Stream, StreamExt};

/// # Pull-based sequence of base retry delays.
///
/// Advanced once per retry by the attempt loop. Exhaustion is final.
///
/// # Example
/// ```
/// use std::time::Duration;
/// use rebound::Schedule;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let mut schedule = [10u64, 20].into_iter().map(Duration::from_millis);
/// assert_eq!(Schedule::next(&mut schedule).await, Some(Duration::from_millis(10)));
/// assert_eq!(Schedule::next(&mut schedule).await, Some(Duration::from_millis(20)));
/// assert_eq!(Schedule::next(&mut schedule).await, None);
/// # }
/// ```
#[async_trait]
pub trait Schedule: Send {
    /// Returns the next base delay, or `None` when the schedule is exhausted.
    async fn next(&mut self) -> Option<Duration>;
}

#[async_trait]
impl<I> Schedule for I
where
    I: Iterator<Item = Duration> + Send,
{
    async fn next(&mut self) -> Option<Duration> {
        Iterator::next(self)
    }
}

/// Asynchronous schedule backed by a `futures::Stream`.
///
/// Each pull suspends until the stream yields the next delay; the attempt loop
/// makes that suspension abortable by racing it against the shared signal.
pub struct StreamSchedule<St> {
    inner: St,
}

impl<St> StreamSchedule<St> {
    /// Wraps a stream of delays as a schedule.
    pub fn new(stream: St) -> Self {
        Self { inner: stream }
    }
}

#[async_trait]
impl<St> Schedule for StreamSchedule<St>
where
    St: Stream<Item = Duration> + Send + Unpin,
{
    async fn next(&mut self) -> Option<Duration> {
        self.inner.next().await
    }
}
