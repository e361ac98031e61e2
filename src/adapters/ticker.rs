//! Periodic display timer.
//!
//! A [`Ticker`] owns the task driving its callback. `shutdown` stops it and
//! waits for the task to finish; dropping the ticker aborts the task, so a
//! discarded view never leaves an orphaned timer behind.

use std::time::Duration;

use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::trace;

pub const DEFAULT_TICK: Duration = Duration::from_secs(1);

pub struct Ticker {
    cancel: Option<oneshot::Sender<()>>,
    task: Option<JoinHandle<()>>,
}

impl Ticker {
    /// Start calling `on_tick` with the 1-based tick number every `period`.
    /// The first tick fires immediately. Must be called inside a tokio runtime.
    pub fn spawn<F>(period: Duration, mut on_tick: F) -> Self
    where
        F: FnMut(u64) + Send + 'static,
    {
        let (cancel_tx, mut cancel_rx) = oneshot::channel::<()>();
        let task = tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
            let mut count = 0u64;
            loop {
                tokio::select! {
                    biased;
                    _ = &mut cancel_rx => break,
                    _ = interval.tick() => {
                        count += 1;
                        trace!(tick = count, "tick");
                        on_tick(count);
                    }
                }
            }
        });
        Ticker {
            cancel: Some(cancel_tx),
            task: Some(task),
        }
    }

    /// Ticker that delivers tick numbers over a channel. The channel closes
    /// once the ticker stops.
    pub fn channel(period: Duration) -> (Self, mpsc::UnboundedReceiver<u64>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let ticker = Ticker::spawn(period, move |n| {
            let _ = tx.send(n);
        });
        (ticker, rx)
    }

    pub fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|t| !t.is_finished())
    }

    /// Stop ticking and wait for the timer task to exit.
    pub async fn shutdown(mut self) {
        if let Some(cancel) = self.cancel.take() {
            let _ = cancel.send(());
        }
        if let Some(task) = self.task.take() {
            let _ = task.await;
        }
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::sync::Arc;

    #[tokio::test(start_paused = true)]
    async fn delivers_numbered_ticks_each_period() {
        let start = tokio::time::Instant::now();
        let (ticker, mut ticks) = Ticker::channel(DEFAULT_TICK);

        assert_eq!(ticks.recv().await, Some(1));
        assert_eq!(ticks.recv().await, Some(2));
        assert_eq!(ticks.recv().await, Some(3));
        assert!(start.elapsed() >= Duration::from_secs(2));
        assert!(ticker.is_running());

        ticker.shutdown().await;
        assert_eq!(ticks.recv().await, None);
    }

    #[tokio::test(start_paused = true)]
    async fn drop_releases_timer() {
        let count = Arc::new(AtomicU64::new(0));
        let seen = Arc::clone(&count);
        let ticker = Ticker::spawn(DEFAULT_TICK, move |_| {
            seen.fetch_add(1, Ordering::SeqCst);
        });

        tokio::time::sleep(Duration::from_millis(2500)).await;
        drop(ticker);
        let at_drop = count.load(Ordering::SeqCst);
        assert!(at_drop >= 2);

        tokio::time::sleep(Duration::from_secs(5)).await;
        assert_eq!(count.load(Ordering::SeqCst), at_drop);
    }

    #[tokio::test(start_paused = true)]
    async fn shutdown_before_first_poll() {
        let (ticker, mut ticks) = Ticker::channel(DEFAULT_TICK);
        ticker.shutdown().await;
        // At most the immediate first tick can have fired.
        let mut received = Vec::new();
        while let Some(n) = ticks.recv().await {
            received.push(n);
        }
        assert!(received.len() <= 1);
    }
}
