//! Repeating background fetches.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use flume::Sender;
use log::{debug, info};
use slotboard_states::{TaskHandle, TaskId};
use tokio::runtime::Handle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

/// Callback run after a result has been queued, typically a repaint request.
pub type Waker = Arc<dyn Fn() + Send + Sync>;

/// Runs `fetch` immediately and then every `interval`, sending each result on `tx`.
///
/// The loop ends when the returned handle is cancelled or the receiver is dropped.
pub fn spawn_poller<T, F, Fut>(
    runtime: &Handle,
    id: TaskId,
    interval: Duration,
    fetch: F,
    tx: Sender<T>,
    wake: Waker,
) -> TaskHandle
where
    T: Send + 'static,
    F: Fn() -> Fut + Send + 'static,
    Fut: Future<Output = T> + Send + 'static,
{
    let handle = TaskHandle::new(id, CancellationToken::new());
    let token = handle.cancellation_token();
    runtime.spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        info!("Poller {id:?} started, every {interval:?}");
        loop {
            tokio::select! {
                biased;
                _ = token.cancelled() => break,
                _ = ticker.tick() => {}
            }
            let result = tokio::select! {
                biased;
                _ = token.cancelled() => break,
                result = fetch() => result,
            };
            if tx.send_async(result).await.is_err() {
                debug!("Poller {id:?} receiver dropped");
                break;
            }
            wake();
        }
        info!("Poller {id:?} stopped");
    });
    handle
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    struct Poll;

    #[tokio::test(start_paused = true)]
    async fn polls_immediately_then_on_every_tick() {
        let calls = Arc::new(AtomicUsize::new(0));
        let (tx, rx) = flume::unbounded();
        let counter = calls.clone();
        let handle = spawn_poller(
            &Handle::current(),
            TaskId::of::<Poll>(0),
            Duration::from_secs(5),
            move || {
                let counter = counter.clone();
                async move { counter.fetch_add(1, Ordering::SeqCst) }
            },
            tx,
            Arc::new(|| {}),
        );

        assert_eq!(rx.recv_async().await.ok(), Some(0));
        tokio::time::advance(Duration::from_secs(5)).await;
        assert_eq!(rx.recv_async().await.ok(), Some(1));

        handle.cancel();
        tokio::time::advance(Duration::from_secs(20)).await;
        assert!(rx.recv_async().await.is_err(), "sender dropped after cancel");
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }
}
