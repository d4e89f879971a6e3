//! Bounded execution for repository calls

use std::future::Future;
use std::time::Duration;

use tracing::warn;

use social_core::{DomainError, RepoResult};

/// Run `operation` under `limit`, reporting [`DomainError::Timeout`] when it
/// elapses
///
/// The in-flight future is dropped on timeout. Any open transaction inside
/// it is rolled back when its connection is returned to the pool.
pub async fn with_deadline<T, F>(limit: Duration, operation: &'static str, fut: F) -> RepoResult<T>
where
    F: Future<Output = RepoResult<T>>,
{
    if let Ok(result) = tokio::time::timeout(limit, fut).await {
        result
    } else {
        warn!(
            operation,
            timeout_ms = limit.as_millis() as u64,
            "repository call exceeded its deadline"
        );
        Err(DomainError::Timeout(limit))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_completes_within_deadline() {
        let result = with_deadline(Duration::from_secs(1), "fast", async { Ok(7) }).await;
        assert_eq!(result.unwrap(), 7);
    }

    #[tokio::test]
    async fn test_inner_error_passes_through() {
        let result: RepoResult<()> = with_deadline(Duration::from_secs(1), "failing", async {
            Err(DomainError::InvitationNotFound)
        })
        .await;
        assert!(matches!(result, Err(DomainError::InvitationNotFound)));
    }

    #[tokio::test]
    async fn test_slow_operation_times_out() {
        let limit = Duration::from_millis(20);
        let result = with_deadline(limit, "slow", async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok(())
        })
        .await;

        match result {
            Err(DomainError::Timeout(elapsed)) => assert_eq!(elapsed, limit),
            other => panic!("expected timeout, got {other:?}"),
        }
    }
}
