//! Bounded-time background computations.
//!
//! Work that may block (fetching a remote image, reading a large file) runs
//! on the blocking pool. The caller waits at most `deadline` and proceeds
//! without the result when the work is slow or fails.

use std::time::Duration;

use toolwin_common::errors::Cancelled;
use toolwin_common::ToolwinError;
use tracing::{debug, warn};

/// Run `work` on the blocking pool and wait at most `deadline`.
///
/// Timeouts and failures yield `Ok(None)`; the work keeps running detached
/// after a timeout and its result is discarded. A `Cancelled` error from
/// the work, or cancellation of the task itself, is returned as `Err`.
pub async fn compute_with_deadline<T, F>(deadline: Duration, work: F) -> Result<Option<T>, Cancelled>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T, ToolwinError> + Send + 'static,
{
    let handle = tokio::task::spawn_blocking(work);

    match tokio::time::timeout(deadline, handle).await {
        Err(_) => {
            debug!(deadline_ms = deadline.as_millis() as u64, "background computation timed out");
            Ok(None)
        }
        Ok(Err(join_error)) if join_error.is_cancelled() => Err(Cancelled),
        Ok(Err(join_error)) => {
            warn!(error = %join_error, "background computation panicked");
            Ok(None)
        }
        Ok(Ok(Ok(value))) => Ok(Some(value)),
        Ok(Ok(Err(ToolwinError::Cancelled(c)))) => Err(c),
        Ok(Ok(Err(e))) => {
            debug!(error = %e, "background computation failed");
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn returns_value_within_deadline() {
        let result = compute_with_deadline(Duration::from_millis(500), || Ok(vec![1u8, 2, 3])).await;
        assert_eq!(result, Ok(Some(vec![1, 2, 3])));
    }

    #[tokio::test]
    async fn io_failure_is_no_result() {
        let result: Result<Option<Vec<u8>>, Cancelled> =
            compute_with_deadline(Duration::from_millis(500), || {
                Err(std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused").into())
            })
            .await;
        assert_eq!(result, Ok(None));
    }

    #[tokio::test]
    async fn timeout_is_no_result() {
        let result = compute_with_deadline(Duration::from_millis(20), || {
            std::thread::sleep(Duration::from_millis(300));
            Ok(1u32)
        })
        .await;
        assert_eq!(result, Ok(None));
    }

    #[tokio::test]
    async fn cancellation_is_propagated() {
        let result: Result<Option<u32>, Cancelled> =
            compute_with_deadline(Duration::from_millis(500), || Err(Cancelled.into())).await;
        assert_eq!(result, Err(Cancelled));
    }
}
