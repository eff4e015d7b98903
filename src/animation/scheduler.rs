//! Delay primitives the animator waits on between phases.
//!
//! The animator runs on a tokio task; cancelling it drops whatever delay
//! future is pending, which releases the underlying timer.

use std::time::Duration;

use async_trait::async_trait;

/// Waits for a delay between traversal phases.
#[async_trait]
pub trait Scheduler: Send + Sync + 'static {
    /// Resolves once `duration` has elapsed.
    async fn delay(&self, duration: Duration);
}

/// Real delays on the tokio clock.
///
/// Under `#[tokio::test(start_paused = true)]` this follows the paused clock,
/// so tests can step time with `tokio::time::advance`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioScheduler;

#[async_trait]
impl Scheduler for TokioScheduler {
    async fn delay(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Ignores delays and only yields to the runtime.
///
/// Useful for non-interactive runs where only the sequence of frames matters.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImmediateScheduler;

#[async_trait]
impl Scheduler for ImmediateScheduler {
    async fn delay(&self, _duration: Duration) {
        tokio::task::yield_now().await;
    }
}
