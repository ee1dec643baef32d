//! Shared utilities for use cases.
//!
//! Contains cancellation checking and the bounded, cancellable await used
//! for every outbound stage call (classify, respond, evaluate).

use std::future::Future;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// How a bounded stage call ended.
#[derive(Debug)]
pub(crate) enum StageWait<T> {
    Completed(T),
    TimedOut,
    Cancelled,
}

/// Check if cancellation has been requested.
pub(crate) fn is_cancelled(token: &Option<CancellationToken>) -> bool {
    token.as_ref().is_some_and(|t| t.is_cancelled())
}

/// Await `future` under a timeout, racing it against the cancellation token.
///
/// The future is dropped (and its outbound request abandoned) on timeout or
/// cancellation.
pub(crate) async fn await_stage<F, T>(
    future: F,
    limit: Duration,
    cancellation: &Option<CancellationToken>,
) -> StageWait<T>
where
    F: Future<Output = T>,
{
    let bounded = tokio::time::timeout(limit, future);
    match cancellation {
        Some(token) => {
            tokio::select! {
                biased;
                _ = token.cancelled() => StageWait::Cancelled,
                result = bounded => match result {
                    Ok(value) => StageWait::Completed(value),
                    Err(_) => StageWait::TimedOut,
                },
            }
        }
        None => match bounded.await {
            Ok(value) => StageWait::Completed(value),
            Err(_) => StageWait::TimedOut,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_completed() {
        let out = await_stage(async { 7 }, Duration::from_secs(1), &None).await;
        assert!(matches!(out, StageWait::Completed(7)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_timed_out() {
        let slow = tokio::time::sleep(Duration::from_secs(60));
        let out = await_stage(slow, Duration::from_secs(1), &None).await;
        assert!(matches!(out, StageWait::TimedOut));
    }

    #[tokio::test]
    async fn test_cancelled_wins() {
        let token = CancellationToken::new();
        token.cancel();
        let out = await_stage(
            std::future::pending::<()>(),
            Duration::from_secs(60),
            &Some(token),
        )
        .await;
        assert!(matches!(out, StageWait::Cancelled));
    }

    #[test]
    fn test_is_cancelled() {
        assert!(!is_cancelled(&None));
        let token = CancellationToken::new();
        let opt = Some(token.clone());
        assert!(!is_cancelled(&opt));
        token.cancel();
        assert!(is_cancelled(&opt));
    }
}
