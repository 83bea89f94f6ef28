//! Error types produced by a backoff run.
//!
//! A run settles with exactly one [`BackoffError`] when it does not succeed:
//!
//! - [`BackoffError::Task`] — the task failed terminally, or requested a retry
//!   after the delay schedule ran out; carries the task's own error unchanged.
//! - [`BackoffError::RetryAlreadyCalled`] — misuse: `retry` was invoked twice
//!   within one attempt.
//! - [`BackoffError::Canceled`] — the shared cancellation signal fired while a
//!   suspension point was outstanding.
//!
//! The type provides [`as_label`](BackoffError::as_label) for logs/metrics and
//! small accessors for the common match arms.

use thiserror::Error;

use crate::race::Canceled;

/// # Final error of a backoff run.
///
/// `E` is the task's own error type; the executor never inspects it and never
/// infers retryability from it — retries happen only on an explicit
/// [`AttemptCtx::retry`](crate::AttemptCtx::retry) call.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum BackoffError<E> {
    /// The task failed without requesting a retry, or requested one after the
    /// schedule was exhausted. The inner error is propagated unchanged.
    #[error("task failed: {0}")]
    Task(E),

    /// `retry` was called a second time within the same attempt, before the
    /// first request's backoff had run. Distinct from a lost race, which is
    /// discarded silently.
    #[error("retry already called for this attempt")]
    RetryAlreadyCalled,

    /// The shared cancellation signal fired; the in-flight suspension lost its
    /// race and the run was abandoned.
    #[error("operation canceled")]
    Canceled,
}

impl<E> BackoffError<E> {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use rebound::BackoffError;
    ///
    /// let err: BackoffError<String> = BackoffError::Canceled;
    /// assert_eq!(err.as_label(), "canceled");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            BackoffError::Task(_) => "task_failed",
            BackoffError::RetryAlreadyCalled => "retry_already_called",
            BackoffError::Canceled => "canceled",
        }
    }

    /// Returns `true` if the run was abandoned by the cancellation signal.
    pub fn is_canceled(&self) -> bool {
        matches!(self, BackoffError::Canceled)
    }

    /// Extracts the task's own error, if this is a task failure.
    ///
    /// # Example
    /// ```
    /// use rebound::BackoffError;
    ///
    /// let err = BackoffError::Task("boom");
    /// assert_eq!(err.into_task_error(), Some("boom"));
    /// ```
    pub fn into_task_error(self) -> Option<E> {
        match self {
            BackoffError::Task(e) => Some(e),
            _ => None,
        }
    }
}

impl<E> From<Canceled> for BackoffError<E> {
    fn from(_: Canceled) -> Self {
        BackoffError::Canceled
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels_are_stable() {
        assert_eq!(BackoffError::Task("e").as_label(), "task_failed");
        assert_eq!(
            BackoffError::<()>::RetryAlreadyCalled.as_label(),
            "retry_already_called"
        );
        assert_eq!(BackoffError::<()>::Canceled.as_label(), "canceled");
    }

    #[test]
    fn test_canceled_conversion() {
        let err: BackoffError<&str> = Canceled.into();
        assert!(err.is_canceled());
        assert_eq!(err.into_task_error(), None);
    }
}
