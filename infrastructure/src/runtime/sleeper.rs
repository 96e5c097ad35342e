//! Real cooldown waits on the tokio timer.

use async_trait::async_trait;
use cascade_application::ports::sleeper::Sleeper;
use std::time::Duration;

/// Suspends only the calling session; other sessions keep running.
pub struct TokioSleeper;

#[async_trait]
impl Sleeper for TokioSleeper {
    async fn sleep(&self, delay: Duration) {
        tokio::time::sleep(delay).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_sleeps_for_requested_delay() {
        let before = tokio::time::Instant::now();
        TokioSleeper.sleep(Duration::from_millis(750)).await;
        assert!(before.elapsed() >= Duration::from_millis(750));
    }
}
