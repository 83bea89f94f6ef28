//! # Cancellation-race helpers.
//!
//! Every suspension point in a backoff run is expressed as "race this future
//! against the shared [`CancellationToken`]; whichever settles first wins".
//! [`race`] is that helper; [`wait`] is the abortable delay timer built on it.
//!
//! One token is shared across the entire run, including all retries; it is
//! never created per attempt. Once it fires, the outstanding future loses its
//! race and is dropped — already-started underlying work is abandoned, not
//! forcibly terminated.

use std::future::Future;
use std::time::Duration;

use tokio::time;
use tokio_util::sync::CancellationToken;

/// Marker for a suspension point that lost its race against the signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Canceled;

/// Races a future against the cancellation signal.
///
/// Resolves with the future's output, or with [`Canceled`] if the signal fires
/// first. The losing future is dropped.
pub async fn race<F>(signal: &CancellationToken, future: F) -> Result<F::Output, Canceled>
where
    F: Future,
{
    tokio::select! {
        out = future => Ok(out),
        _ = signal.cancelled() => Err(Canceled),
    }
}

/// Sleeps for `duration`, abortable via the cancellation signal.
pub async fn wait(duration: Duration, signal: &CancellationToken) -> Result<(), Canceled> {
    race(signal, time::sleep(duration)).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_race_yields_future_output() {
        let signal = CancellationToken::new();
        let out = race(&signal, async { 7 }).await;
        assert_eq!(out, Ok(7));
    }

    #[tokio::test]
    async fn test_race_loses_to_triggered_signal() {
        let signal = CancellationToken::new();
        signal.cancel();
        let out = race(&signal, std::future::pending::<u32>()).await;
        assert_eq!(out, Err(Canceled));
    }

    #[tokio::test(start_paused = true)]
    async fn test_wait_completes_when_signal_is_silent() {
        let signal = CancellationToken::new();
        let started = time::Instant::now();
        wait(Duration::from_millis(250), &signal).await.unwrap();
        assert_eq!(started.elapsed(), Duration::from_millis(250));
    }

    #[tokio::test(start_paused = true)]
    async fn test_wait_aborts_on_cancel() {
        let signal = CancellationToken::new();
        let trigger = signal.clone();
        tokio::spawn(async move {
            time::sleep(Duration::from_millis(10)).await;
            trigger.cancel();
        });

        let started = time::Instant::now();
        let out = wait(Duration::from_secs(3600), &signal).await;
        assert_eq!(out, Err(Canceled));
        assert_eq!(started.elapsed(), Duration::from_millis(10));
    }
}
