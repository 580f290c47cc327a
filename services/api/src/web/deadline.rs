//! Bounds gateway calls in time.

use remed_lakay_core::ports::{PortError, PortResult};
use std::future::Future;
use std::time::Duration;

/// Awaits `call` for at most `limit`. Expiry becomes `PortError::Timeout`.
pub async fn bounded<T, F>(limit: Duration, call: F) -> PortResult<T>
where
    F: Future<Output = PortResult<T>>,
{
    match tokio::time::timeout(limit, call).await {
        Ok(outcome) => outcome,
        Err(_) => Err(PortError::Timeout(limit)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn fast_calls_pass_through() {
        let outcome = bounded(Duration::from_secs(1), async { Ok::<_, PortError>(7) }).await;
        assert_eq!(outcome, Ok(7));
    }

    #[tokio::test]
    async fn slow_calls_time_out() {
        let outcome: PortResult<()> = bounded(Duration::from_millis(10), async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok(())
        })
        .await;
        assert_eq!(outcome, Err(PortError::Timeout(Duration::from_millis(10))));
    }
}
