use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::{Mutex, RwLock};
use tokio::sync::{broadcast, Notify};

use crate::classifier::{self, DirectionAnchor};
use crate::config::MotionConfig;
use crate::direction::{DirectionEvent, ScrollDirection};
use crate::sample::ScrollSample;

/// Capacity of the low-frequency direction-change channel
const DIRECTION_CHANNEL_CAPACITY: usize = 64;

/// Shared scroll state snapshot published to consumers
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollState {
    /// Current clamped scroll offset in pixels
    pub offset_y: f32,
    /// Current gesture classification
    pub direction: ScrollDirection,
    /// True between the first sample of a gesture and the idle timeout
    pub is_scrolling: bool,
}

/// Scroll state store with two fan-out tiers.
///
/// The sample path is the single writer. High-frequency consumers (style
/// bindings) call `snapshot` every frame, which is one lock read and no
/// messaging. Low-frequency consumers `subscribe` and only hear about
/// discrete direction changes.
pub struct ScrollStore {
    state: RwLock<ScrollState>,
    anchor: Mutex<DirectionAnchor>,
    scrolling: AtomicBool,
    threshold: RwLock<f32>,
    support_idle: AtomicBool,
    idle_timeout: RwLock<Duration>,
    last_sample_at: RwLock<Instant>,
    idle_wake: Arc<Notify>,
    direction_tx: broadcast::Sender<DirectionEvent>,
}

impl ScrollStore {
    pub(crate) fn new(config: &MotionConfig) -> Self {
        let (direction_tx, _) = broadcast::channel(DIRECTION_CHANNEL_CAPACITY);
        Self {
            state: RwLock::new(ScrollState::default()),
            anchor: Mutex::new(DirectionAnchor::default()),
            scrolling: AtomicBool::new(false),
            threshold: RwLock::new(config.threshold.max(0.0)),
            support_idle: AtomicBool::new(config.support_idle),
            idle_timeout: RwLock::new(config.idle_timeout()),
            last_sample_at: RwLock::new(Instant::now()),
            idle_wake: Arc::new(Notify::new()),
            direction_tx,
        }
    }

    /// Feed one scroll sample through the classifier.
    ///
    /// Runs synchronously on the caller's context. The only cross-context
    /// signals are a direction-change event (on change, not per sample) and
    /// an idle watchdog wake when a new gesture starts.
    pub(crate) fn apply_sample(&self, sample: &ScrollSample) {
        let threshold = *self.threshold.read();
        let was_scrolling = self.scrolling.load(Ordering::Relaxed);

        let outcome = {
            let mut anchor = self.anchor.lock();
            let current = self.state.read().direction;
            classifier::classify(sample, &mut anchor, threshold, was_scrolling, current)
        };

        *self.last_sample_at.write() = Instant::now();
        self.scrolling.store(true, Ordering::Relaxed);

        let changed = {
            let mut state = self.state.write();
            let changed = state.direction != outcome.direction;
            state.offset_y = outcome.offset_y;
            state.direction = outcome.direction;
            state.is_scrolling = true;
            changed
        };

        if changed {
            // Nobody listening is fine, the hand-off is one-way
            let _ = self.direction_tx.send(DirectionEvent {
                direction: outcome.direction,
                offset_y: outcome.offset_y,
            });
        }

        if outcome.started_gesture {
            self.idle_wake.notify_one();
        }
    }

    /// Current state, one lock read, no allocation
    pub fn snapshot(&self) -> ScrollState {
        *self.state.read()
    }

    /// Low-frequency tier: fires only on discrete direction changes
    pub fn subscribe(&self) -> broadcast::Receiver<DirectionEvent> {
        self.direction_tx.subscribe()
    }

    /// Update the reverse-movement threshold. Non-positive values are a
    /// defined no-op; the previous value is kept. Takes effect on the next
    /// sample.
    pub fn set_threshold(&self, value: f32) {
        if value <= 0.0 {
            log::debug!("Ignoring non-positive scroll threshold {value}");
            return;
        }
        *self.threshold.write() = value;
    }

    pub fn threshold(&self) -> f32 {
        *self.threshold.read()
    }

    /// Enable or disable the idle classification
    pub fn set_support_idle(&self, enabled: bool) {
        self.support_idle.store(enabled, Ordering::Relaxed);
        if enabled {
            // Re-arm the watchdog in case a gesture is already in flight
            self.idle_wake.notify_one();
        }
    }

    pub fn support_idle(&self) -> bool {
        self.support_idle.load(Ordering::Relaxed)
    }

    /// Change the quiet period required before an active gesture goes idle
    pub fn set_idle_timeout(&self, timeout: Duration) {
        *self.idle_timeout.write() = timeout;
    }

    pub fn idle_timeout(&self) -> Duration {
        *self.idle_timeout.read()
    }

    pub(crate) fn idle_deadline(&self) -> Instant {
        *self.last_sample_at.read() + self.idle_timeout()
    }

    pub(crate) fn is_scrolling(&self) -> bool {
        self.scrolling.load(Ordering::Relaxed)
    }

    pub(crate) fn idle_wake(&self) -> Arc<Notify> {
        self.idle_wake.clone()
    }

    /// The quiet period elapsed: force the idle classification and end the
    /// gesture. No-op when idle support is disabled or no gesture is active.
    pub(crate) fn force_idle(&self) {
        if !self.support_idle() {
            return;
        }
        if !self.scrolling.swap(false, Ordering::Relaxed) {
            return;
        }

        self.anchor.lock().clear_gesture();

        let (changed, offset_y) = {
            let mut state = self.state.write();
            let changed = state.direction != ScrollDirection::Idle;
            state.direction = ScrollDirection::Idle;
            state.is_scrolling = false;
            (changed, state.offset_y)
        };

        if changed {
            let _ = self.direction_tx.send(DirectionEvent {
                direction: ScrollDirection::Idle,
                offset_y,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> ScrollStore {
        ScrollStore::new(&MotionConfig::default())
    }

    fn sample(offset: f32) -> ScrollSample {
        ScrollSample::new(offset, 2000.0, 800.0)
    }

    fn feed(store: &ScrollStore, offsets: &[f32]) {
        for &offset in offsets {
            store.apply_sample(&sample(offset));
        }
    }

    #[test]
    fn test_snapshot_tracks_samples() {
        let store = store();
        feed(&store, &[0.0, 40.0, 120.0]);

        let state = store.snapshot();
        assert_eq!(state.offset_y, 120.0);
        assert_eq!(state.direction, ScrollDirection::Down);
        assert!(state.is_scrolling);
    }

    #[test]
    fn test_offset_stays_clamped() {
        let store = store();
        feed(&store, &[0.0, 5000.0]);
        assert_eq!(store.snapshot().offset_y, 1200.0);
    }

    #[test]
    fn test_subscribe_fires_on_change_only() {
        let store = store();
        let mut rx = store.subscribe();

        feed(&store, &[0.0, 50.0, 100.0, 150.0]);

        // One transition: idle -> down at the 50 sample
        let event = rx.try_recv().unwrap();
        assert_eq!(event.direction, ScrollDirection::Down);
        assert_eq!(event.offset_y, 50.0);
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_threshold_change_applies_to_next_sample() {
        let store = store();
        feed(&store, &[0.0, 50.0, 100.0]);
        assert_eq!(store.snapshot().direction, ScrollDirection::Down);

        // 10 px of reverse movement would flip with the default threshold
        // of 8, but the raised threshold is already in force
        store.set_threshold(30.0);
        feed(&store, &[90.0]);
        assert_eq!(store.snapshot().direction, ScrollDirection::Down);

        feed(&store, &[60.0]);
        assert_eq!(store.snapshot().direction, ScrollDirection::Up);
    }

    #[test]
    fn test_non_positive_threshold_rejected() {
        let store = store();
        store.set_threshold(0.0);
        assert_eq!(store.threshold(), 8.0);
        store.set_threshold(-4.0);
        assert_eq!(store.threshold(), 8.0);
        store.set_threshold(12.0);
        assert_eq!(store.threshold(), 12.0);
    }

    #[test]
    fn test_force_idle_requires_support() {
        let store = store();
        feed(&store, &[0.0, 50.0]);

        store.force_idle();
        assert_eq!(store.snapshot().direction, ScrollDirection::Down);
        assert!(store.snapshot().is_scrolling);

        store.set_support_idle(true);
        store.force_idle();
        let state = store.snapshot();
        assert_eq!(state.direction, ScrollDirection::Idle);
        assert!(!state.is_scrolling);
    }

    #[test]
    fn test_gesture_restarts_after_idle() {
        let store = store();
        store.set_support_idle(true);
        feed(&store, &[0.0, 50.0, 100.0]);
        store.force_idle();

        // The next sample starts a fresh gesture with no stale accumulation
        feed(&store, &[90.0]);
        assert_eq!(store.snapshot().direction, ScrollDirection::Idle);
        feed(&store, &[80.0]);
        assert_eq!(store.snapshot().direction, ScrollDirection::Up);
    }

    #[test]
    fn test_force_idle_emits_event() {
        let store = store();
        store.set_support_idle(true);
        feed(&store, &[0.0, 50.0]);

        let mut rx = store.subscribe();
        store.force_idle();
        let event = rx.try_recv().unwrap();
        assert_eq!(event.direction, ScrollDirection::Idle);
    }
}
