//! # rebound
//!
//! **Rebound** is a retry-with-backoff executor for async Rust.
//!
//! It runs a caller-supplied async task; when the task explicitly requests a
//! retry, the executor waits an increasing, jittered delay before re-running
//! it, consuming delays from a caller-supplied schedule. The executor never
//! decides *what* is retryable — that decision belongs entirely to the task.
//!
//! ## Architecture
//! ```text
//!                 ┌────────────────────────────┐
//!                 │       Backoff::run()       │
//!                 │       (attempt loop)       │
//!                 └──────┬──────────────┬──────┘
//!          task(ctx) ▼              │ Outcome::Retry
//!            ┌──────────────┐       ▼
//!            │  AttemptCtx  │   ┌──────────────┐   ┌──────────────┐
//!            │ retry/signal │   │   Schedule   │──►│  transform   │
//!            └──────────────┘   │ (next delay) │   │ jitter+clamp │
//!                               └──────────────┘   └──────┬───────┘
//!                                                         ▼
//!                                                  wait(delay, signal)
//!
//!  every suspension point ──races──► shared CancellationToken
//! ```
//!
//! ### Lifecycle
//! ```text
//! Backoff::new(schedule) ──► run(task)
//!
//! loop {
//!   ├─► task(ctx)                    (raced against signal)
//!   │     ├─ Outcome::Ok(v)    ─► Ok(v)
//!   │     ├─ Outcome::Err(e)   ─► Err(Task(e))
//!   │     └─ ctx.retry(err)    ─► schedule.next()   (raced)
//!   │            ├─ exhausted  ─► Err(Task(err))
//!   │            └─ delay      ─► jitter ─► clamp ─► sleep (raced)
//!   └─► next attempt (strictly sequential)
//! }
//! ```
//!
//! ## Features
//! | Area             | Description                                             | Key types                        |
//! |------------------|---------------------------------------------------------|----------------------------------|
//! | **Executor**     | Drives attempts, arbitrates outcomes, applies delays.   | [`Backoff`]                      |
//! | **Tasks**        | Async closures settling with a tagged outcome.          | [`AttemptCtx`], [`Outcome`]      |
//! | **Schedules**    | Pull-based delay sequences, sync (iterator) or async.   | [`Schedule`], [`StreamSchedule`] |
//! | **Jitter**       | Randomization policies plus caller-supplied functions.  | [`Jitter`], [`transform`]        |
//! | **Cancellation** | One shared signal raced at every suspension point.      | [`race`], [`wait`]               |
//! | **Errors**       | Typed final outcomes with stable log labels.            | [`BackoffError`]                 |
//!
//! ## Example
//! ```rust
//! use std::time::Duration;
//! use rebound::{Backoff, Outcome};
//! use tokio_util::sync::CancellationToken;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() {
//!     let signal = CancellationToken::new();
//!     let schedule = [10u64, 20, 40].into_iter().map(Duration::from_millis);
//!
//!     let mut failures_left = 1u32;
//!     let result = Backoff::new(schedule)
//!         .with_max_timeout(Duration::from_millis(50))
//!         .with_signal(signal)
//!         .run(|ctx| {
//!             let fail = failures_left > 0;
//!             failures_left = failures_left.saturating_sub(1);
//!             async move {
//!                 if fail {
//!                     ctx.retry("upstream unavailable")
//!                 } else {
//!                     Outcome::Ok(42)
//!                 }
//!             }
//!         })
//!         .await;
//!
//!     assert_eq!(result.unwrap(), 42);
//! }
//! ```

mod attempt;
mod backoff;
mod error;
mod jitter;
mod race;
mod schedule;

pub use attempt::{AttemptCtx, Outcome, RetryRequest};
pub use backoff::Backoff;
pub use error::BackoffError;
pub use jitter::{Jitter, transform};
pub use race::{Canceled, race, wait};
pub use schedule::{Schedule, StreamSchedule};
