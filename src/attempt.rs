//! # Per-attempt context and the task calling convention.
//!
//! A task is an async closure receiving an [`AttemptCtx`] and returning an
//! [`Outcome`]: terminal success, terminal failure, or a retry request
//! obtained from [`AttemptCtx::retry`]. One convention, no exception-style
//! signaling — mixing the two is what produces double-settlement hazards.
//!
//! The context also carries the run's shared [`CancellationToken`], so the
//! task can make its own suspension points abortable.
//!
//! ## Arbitration rules
//! For any single attempt, the first-observed completion path wins:
//! - a task that arms a retry but then returns [`Outcome::Ok`]/[`Outcome::Err`]
//!   directly settles with that value; the armed request is discarded silently
//!   (a *lost race*, not an error);
//! - a `retry` call issued after the attempt has settled (through a cloned
//!   context that escaped the attempt) records nothing and its request is
//!   inert;
//! - a second `retry` call within one live attempt is misuse and surfaces as
//!   [`BackoffError::RetryAlreadyCalled`](crate::BackoffError::RetryAlreadyCalled),
//!   never as a second retry cycle.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio_util::sync::CancellationToken;

/// # What a single attempt of the task produced.
///
/// [`Outcome::Ok`] and [`Outcome::Err`] are terminal; the executor never
/// retries them on its own. [`Outcome::Retry`] asks the loop to back off and
/// re-attempt, and can only be built through [`AttemptCtx::retry`].
#[derive(Debug)]
pub enum Outcome<T, E> {
    /// Terminal success; becomes the run's result.
    Ok(T),
    /// Terminal failure; propagated unchanged, never retried.
    Err(E),
    /// Back off and re-attempt. Construct via [`AttemptCtx::retry`].
    Retry(RetryRequest<E>),
}

/// A recorded retry request, carrying the attempt's error.
///
/// Opaque: only [`AttemptCtx::retry`] can create one, which is how the
/// executor observes retry *calls* (not just returned values) and enforces
/// the once-per-attempt rule.
#[derive(Debug)]
pub struct RetryRequest<E> {
    pub(crate) err: E,
    pub(crate) duplicate: bool,
}

/// Mutable flags for one attempt. Created fresh per attempt, so a
/// structurally identical retry in a later attempt can never be mistaken
/// for a duplicate of an earlier one.
#[derive(Debug, Default)]
pub(crate) struct AttemptState {
    requested: AtomicBool,
    settled: AtomicBool,
}

impl AttemptState {
    /// Marks the attempt settled. Retry calls recorded after this point are
    /// inert (lost race).
    pub(crate) fn settle(&self) {
        self.settled.store(true, Ordering::SeqCst);
    }
}

/// # Capability surface handed to the task for one attempt.
///
/// Carries the shared cancellation signal and the per-attempt retry
/// bookkeeping. Cheap to clone; clones share the same attempt state.
#[derive(Clone, Debug)]
pub struct AttemptCtx {
    signal: CancellationToken,
    state: Arc<AttemptState>,
}

impl AttemptCtx {
    pub(crate) fn new(signal: CancellationToken, state: Arc<AttemptState>) -> Self {
        Self { signal, state }
    }

    /// The run's shared cancellation signal.
    ///
    /// Tasks should race their own long suspensions against it so a canceled
    /// run winds down promptly.
    pub fn signal(&self) -> &CancellationToken {
        &self.signal
    }

    /// Requests a retry for this attempt, recording `err` as the failure.
    ///
    /// Returns the [`Outcome`] to yield from the task. The eventual result of
    /// the whole run is then the result of the retry chain the loop drives.
    ///
    /// Calling this twice within one live attempt poisons the request; the
    /// run fails with `RetryAlreadyCalled` instead of scheduling again. A call
    /// made after the attempt has already settled records nothing.
    pub fn retry<T, E>(&self, err: E) -> Outcome<T, E> {
        if self.state.settled.load(Ordering::SeqCst) {
            // attempt already settled: lost race, request is inert
            return Outcome::Retry(RetryRequest {
                err,
                duplicate: false,
            });
        }
        let duplicate = self.state.requested.swap(true, Ordering::SeqCst);
        Outcome::Retry(RetryRequest { err, duplicate })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx() -> (AttemptCtx, Arc<AttemptState>) {
        let state = Arc::new(AttemptState::default());
        (
            AttemptCtx::new(CancellationToken::new(), Arc::clone(&state)),
            state,
        )
    }

    #[test]
    fn test_first_retry_is_not_duplicate() {
        let (ctx, _state) = ctx();
        match ctx.retry::<(), _>("boom") {
            Outcome::Retry(req) => {
                assert!(!req.duplicate);
                assert_eq!(req.err, "boom");
            }
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_second_retry_is_poisoned() {
        let (ctx, _state) = ctx();
        let _first = ctx.retry::<(), _>("one");
        match ctx.retry::<(), _>("two") {
            Outcome::Retry(req) => assert!(req.duplicate),
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_retry_after_settlement_is_inert() {
        let (ctx, state) = ctx();
        state.settle();
        match ctx.retry::<(), _>("late") {
            Outcome::Retry(req) => assert!(!req.duplicate),
            _ => unreachable!(),
        }
        // nothing was recorded: a second late call is still not a duplicate
        match ctx.retry::<(), _>("later") {
            Outcome::Retry(req) => assert!(!req.duplicate),
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_clones_share_attempt_state() {
        let (ctx, _state) = ctx();
        let clone = ctx.clone();
        let _first = ctx.retry::<(), _>("one");
        match clone.retry::<(), _>("two") {
            Outcome::Retry(req) => assert!(req.duplicate),
            _ => unreachable!(),
        }
    }
}
