use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};
use std::time::Instant;

use tokio::sync::Notify;
use tokio::task::JoinHandle;

use crate::store::ScrollStore;

/// Watchdog that forces the idle classification after a quiet period on the
/// sample stream.
///
/// The sample path re-arms the timer implicitly by stamping the store's
/// last-sample instant; this task re-checks the deadline whenever it wakes,
/// so nothing crosses contexts per sample. The wake signal fires only when a
/// gesture starts or idle support is re-enabled.
pub(crate) struct IdleDetector {
    wake: Arc<Notify>,
    running: Arc<AtomicBool>,
    handle: JoinHandle<()>,
}

impl IdleDetector {
    /// Spawn the watchdog for `store`. Must be called within a Tokio
    /// runtime.
    pub fn spawn(store: Weak<ScrollStore>, wake: Arc<Notify>) -> Self {
        let running = Arc::new(AtomicBool::new(true));

        let task_wake = wake.clone();
        let task_running = running.clone();
        let handle = tokio::spawn(async move {
            Self::run(store, task_wake, task_running).await;
        });

        Self {
            wake,
            running,
            handle,
        }
    }

    async fn run(store: Weak<ScrollStore>, wake: Arc<Notify>, running: Arc<AtomicBool>) {
        log::debug!("Idle watchdog started");
        loop {
            if !running.load(Ordering::Relaxed) {
                break;
            }
            // The scope dropping the store ends the loop; upgrading per
            // iteration means a wake can never write into torn-down state
            let Some(store) = store.upgrade() else {
                break;
            };

            if !store.is_scrolling() {
                drop(store);
                wake.notified().await;
                continue;
            }

            let deadline = store.idle_deadline();
            if Instant::now() >= deadline {
                // Quiet for the full window. When idle support is off this
                // does nothing, and the watchdog parks until the next wake.
                store.force_idle();
                drop(store);
                wake.notified().await;
                continue;
            }
            drop(store);

            tokio::select! {
                _ = tokio::time::sleep_until(tokio::time::Instant::from_std(deadline)) => {}
                _ = wake.notified() => {}
            }
        }
        log::debug!("Idle watchdog stopped");
    }
}

impl Drop for IdleDetector {
    fn drop(&mut self) {
        self.running.store(false, Ordering::Relaxed);
        self.wake.notify_one();
        self.handle.abort();
    }
}
