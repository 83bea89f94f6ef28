//! # Backoff executor: configuration and the attempt loop.
//!
//! [`Backoff`] holds one run's immutable configuration (schedule, clamp
//! bounds, jitter, signal) and [`Backoff::run`] drives the attempts:
//!
//! ```text
//! run(task)
//!
//! loop {
//!   ├─► signal already fired? ──► Err(Canceled)
//!   ├─► task(ctx)  (raced against signal)
//!   │     ├─ Outcome::Ok(v)     ──► Ok(v)
//!   │     ├─ Outcome::Err(e)    ──► Err(Task(e))
//!   │     └─ Outcome::Retry(req)
//!   │           ├─ duplicate?        ──► Err(RetryAlreadyCalled)
//!   │           ├─ schedule.next()  (raced against signal)
//!   │           │     └─ None        ──► Err(Task(req.err))  (exhausted)
//!   │           ├─ transform(raw)   (jitter, clamp [min, max])
//!   │           └─ wait(delay)      (raced against signal)
//!   └─► next attempt
//! }
//! ```
//!
//! ## Rules
//! - Attempts run **strictly sequentially**; attempt N+1 never starts before
//!   attempt N has settled or its backoff delay has elapsed.
//! - One cancellation signal is shared across the whole run; every suspension
//!   point races against it.
//! - The executor never decides *what* is retryable — only an explicit
//!   [`AttemptCtx::retry`] call schedules a retry.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::attempt::{AttemptCtx, AttemptState, Outcome};
use crate::error::BackoffError;
use crate::jitter::{Jitter, transform};
use crate::race::{race, wait};
use crate::schedule::Schedule;

/// # Retry-with-backoff executor.
///
/// Immutable for the lifetime of one [`run`](Backoff::run) call. Defaults:
/// no minimum delay, no maximum delay, [`Jitter::Full`], and a fresh
/// never-triggered cancellation signal.
///
/// # Example
/// ```
/// use std::time::Duration;
/// use rebound::{Backoff, Jitter, Outcome};
///
/// #[tokio::main(flavor = "current_thread")]
/// async fn main() {
///     let schedule = [10u64, 20, 30].into_iter().map(Duration::from_millis);
///
///     let mut probes_left = 2u32;
///     let result = Backoff::new(schedule)
///         .with_jitter(Jitter::None)
///         .run(|ctx| {
///             probes_left = probes_left.saturating_sub(1);
///             let ready = probes_left == 0;
///             async move {
///                 if ready {
///                     Outcome::Ok("connected")
///                 } else {
///                     ctx.retry("connection refused")
///                 }
///             }
///         })
///         .await;
///
///     assert_eq!(result.unwrap(), "connected");
/// }
/// ```
#[derive(Debug)]
pub struct Backoff<S> {
    schedule: S,
    min_timeout: Duration,
    max_timeout: Duration,
    jitter: Jitter,
    signal: CancellationToken,
}

impl<S: Schedule> Backoff<S> {
    /// Creates an executor over the given delay schedule.
    pub fn new(schedule: S) -> Self {
        Self {
            schedule,
            min_timeout: Duration::ZERO,
            max_timeout: Duration::MAX,
            jitter: Jitter::default(),
            signal: CancellationToken::new(),
        }
    }

    /// Lower clamp bound for transformed delays (default: zero).
    pub fn with_min_timeout(mut self, min: Duration) -> Self {
        self.min_timeout = min;
        self
    }

    /// Upper clamp bound for transformed delays (default: unbounded).
    pub fn with_max_timeout(mut self, max: Duration) -> Self {
        self.max_timeout = max;
        self
    }

    /// Jitter policy applied to every raw schedule delay (default: full).
    pub fn with_jitter(mut self, jitter: Jitter) -> Self {
        self.jitter = jitter;
        self
    }

    /// Shares an external cancellation signal with the run.
    ///
    /// The same token is observed at every suspension point across all
    /// attempts; triggering it settles the run as canceled.
    pub fn with_signal(mut self, signal: CancellationToken) -> Self {
        self.signal = signal;
        self
    }

    /// Runs the task, retrying on request until it settles, the schedule is
    /// exhausted, or the signal fires.
    ///
    /// The task is invoked once per attempt with a fresh [`AttemptCtx`]; it
    /// settles the attempt by returning an [`Outcome`]. The delay schedule is
    /// advanced once per retry and is never consulted when the task settles
    /// terminally.
    pub async fn run<T, E, F, Fut>(mut self, mut task: F) -> Result<T, BackoffError<E>>
    where
        F: FnMut(AttemptCtx) -> Fut,
        Fut: Future<Output = Outcome<T, E>>,
    {
        let mut attempt: u64 = 0;

        loop {
            if self.signal.is_cancelled() {
                return Err(BackoffError::Canceled);
            }
            attempt += 1;

            let state = Arc::new(AttemptState::default());
            let ctx = AttemptCtx::new(self.signal.clone(), Arc::clone(&state));
            let out = race(&self.signal, task(ctx)).await?;
            state.settle();

            let req = match out {
                Outcome::Ok(v) => return Ok(v),
                Outcome::Err(e) => return Err(BackoffError::Task(e)),
                Outcome::Retry(req) => req,
            };

            if req.duplicate {
                warn!(attempt, "retry called twice within one attempt");
                return Err(BackoffError::RetryAlreadyCalled);
            }

            let raw = match race(&self.signal, self.schedule.next()).await? {
                Some(raw) => raw,
                None => {
                    debug!(attempt, "delay schedule exhausted");
                    return Err(BackoffError::Task(req.err));
                }
            };

            let delay = transform(raw, &self.jitter, self.min_timeout, self.max_timeout);
            debug!(
                attempt,
                raw_ms = raw.as_millis() as u64,
                delay_ms = delay.as_millis() as u64,
                "backoff scheduled"
            );
            wait(delay, &self.signal).await?;
        }
    }
}
