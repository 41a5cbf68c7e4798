use std::sync::{Arc, Weak};
use std::time::Duration;

use tokio::sync::broadcast;

use crate::config::MotionConfig;
use crate::direction::{DirectionEvent, ScrollDirection};
use crate::error::MotionError;
use crate::idle::IdleDetector;
use crate::sample::ScrollSample;
use crate::store::{ScrollState, ScrollStore};

/// An initialized provider scope owning the scroll state and the idle
/// watchdog.
///
/// Scopes are independent; several can coexist in one process, each with its
/// own state and configuration. Creation must happen within a Tokio runtime
/// because the idle watchdog runs on it. Dropping the scope cancels the
/// watchdog and invalidates every handle it produced.
pub struct MotionScope {
    // Declared before the store so teardown cancels the watchdog first
    _idle: IdleDetector,
    store: Arc<ScrollStore>,
}

impl MotionScope {
    /// Create a scope with the given configuration
    pub fn new(config: MotionConfig) -> Self {
        let store = Arc::new(ScrollStore::new(&config));
        let idle = IdleDetector::spawn(Arc::downgrade(&store), store.idle_wake());
        Self { _idle: idle, store }
    }

    /// Feed one scroll sample from the host surface
    pub fn on_scroll(&self, sample: ScrollSample) {
        self.store.apply_sample(&sample);
    }

    /// Current state snapshot (the high-frequency read path)
    pub fn state(&self) -> ScrollState {
        self.store.snapshot()
    }

    /// Subscribe to discrete direction changes (the low-frequency tier)
    pub fn subscribe(&self) -> broadcast::Receiver<DirectionEvent> {
        self.store.subscribe()
    }

    /// Shared store handle for consumers that read every frame
    pub fn store(&self) -> Arc<ScrollStore> {
        self.store.clone()
    }

    /// Hand out a weak handle for consumers inside this scope
    pub fn handle(&self) -> MotionHandle {
        MotionHandle {
            store: Arc::downgrade(&self.store),
        }
    }

    pub fn set_threshold(&self, value: f32) {
        self.store.set_threshold(value);
    }

    pub fn set_support_idle(&self, enabled: bool) {
        self.store.set_support_idle(enabled);
    }

    pub fn set_idle_timeout(&self, timeout: Duration) {
        self.store.set_idle_timeout(timeout);
    }
}

/// Weak reference into a provider scope.
///
/// Handles are cheap to clone and hand to consumers; every operation fails
/// with `NotInitialized` once the owning scope is gone.
#[derive(Clone)]
pub struct MotionHandle {
    store: Weak<ScrollStore>,
}

impl MotionHandle {
    fn store(&self) -> Result<Arc<ScrollStore>, MotionError> {
        self.store.upgrade().ok_or(MotionError::NotInitialized)
    }

    /// Feed one scroll sample from the host surface
    pub fn on_scroll(&self, sample: ScrollSample) -> Result<(), MotionError> {
        self.store()?.apply_sample(&sample);
        Ok(())
    }

    /// Current state snapshot
    pub fn state(&self) -> Result<ScrollState, MotionError> {
        Ok(self.store()?.snapshot())
    }

    /// Current direction only
    pub fn direction(&self) -> Result<ScrollDirection, MotionError> {
        Ok(self.state()?.direction)
    }

    /// Subscribe to discrete direction changes
    pub fn subscribe(&self) -> Result<broadcast::Receiver<DirectionEvent>, MotionError> {
        Ok(self.store()?.subscribe())
    }

    pub fn set_threshold(&self, value: f32) -> Result<(), MotionError> {
        self.store()?.set_threshold(value);
        Ok(())
    }

    pub fn set_support_idle(&self, enabled: bool) -> Result<(), MotionError> {
        self.store()?.set_support_idle(enabled);
        Ok(())
    }

    pub fn set_idle_timeout(&self, timeout: Duration) -> Result<(), MotionError> {
        self.store()?.set_idle_timeout(timeout);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(offset: f32) -> ScrollSample {
        ScrollSample::new(offset, 2000.0, 800.0)
    }

    fn idle_config(timeout_ms: u64) -> MotionConfig {
        MotionConfig {
            support_idle: true,
            idle_timeout_ms: timeout_ms,
            ..MotionConfig::default()
        }
    }

    async fn settle(ms: u64) {
        tokio::time::sleep(Duration::from_millis(ms)).await;
    }

    #[tokio::test]
    async fn test_idle_timeout_forces_idle() {
        let scope = MotionScope::new(idle_config(100));
        scope.on_scroll(sample(0.0));
        scope.on_scroll(sample(50.0));
        assert_eq!(scope.state().direction, ScrollDirection::Down);

        settle(300).await;
        let state = scope.state();
        assert_eq!(state.direction, ScrollDirection::Idle);
        assert!(!state.is_scrolling);
    }

    #[tokio::test]
    async fn test_idle_disabled_holds_direction() {
        let scope = MotionScope::new(MotionConfig::default());
        scope.on_scroll(sample(0.0));
        scope.on_scroll(sample(50.0));

        settle(300).await;
        let state = scope.state();
        assert_eq!(state.direction, ScrollDirection::Down);
        assert!(state.is_scrolling);
    }

    #[tokio::test]
    async fn test_disabling_idle_cancels_pending_timeout() {
        let scope = MotionScope::new(idle_config(100));
        scope.on_scroll(sample(0.0));
        scope.on_scroll(sample(50.0));
        scope.set_support_idle(false);

        settle(300).await;
        assert_eq!(scope.state().direction, ScrollDirection::Down);
    }

    #[tokio::test]
    async fn test_reenabling_idle_rearms_for_active_gesture() {
        let scope = MotionScope::new(idle_config(100));
        scope.set_support_idle(false);
        scope.on_scroll(sample(0.0));
        scope.on_scroll(sample(50.0));
        settle(300).await;
        assert_eq!(scope.state().direction, ScrollDirection::Down);

        scope.set_support_idle(true);
        settle(300).await;
        assert_eq!(scope.state().direction, ScrollDirection::Idle);
    }

    #[tokio::test]
    async fn test_new_gesture_after_idle() {
        let scope = MotionScope::new(idle_config(100));
        scope.on_scroll(sample(0.0));
        scope.on_scroll(sample(100.0));
        settle(300).await;
        assert_eq!(scope.state().direction, ScrollDirection::Idle);

        // Second gesture starts fresh and goes idle again on its own
        scope.on_scroll(sample(90.0));
        scope.on_scroll(sample(80.0));
        assert_eq!(scope.state().direction, ScrollDirection::Up);
        settle(300).await;
        assert_eq!(scope.state().direction, ScrollDirection::Idle);
    }

    #[tokio::test]
    async fn test_handle_fails_after_teardown() {
        let scope = MotionScope::new(MotionConfig::default());
        let handle = scope.handle();
        scope.on_scroll(sample(0.0));
        assert!(handle.state().is_ok());

        drop(scope);
        assert!(matches!(handle.state(), Err(MotionError::NotInitialized)));
        assert!(matches!(
            handle.on_scroll(sample(10.0)),
            Err(MotionError::NotInitialized)
        ));
        assert!(matches!(
            handle.set_threshold(10.0),
            Err(MotionError::NotInitialized)
        ));
    }

    #[tokio::test]
    async fn test_teardown_with_pending_idle_timer() {
        let scope = MotionScope::new(idle_config(100));
        scope.on_scroll(sample(0.0));
        scope.on_scroll(sample(50.0));
        let handle = scope.handle();

        // Tear the scope down while the quiet-period timer is pending
        drop(scope);
        settle(300).await;
        assert!(matches!(handle.state(), Err(MotionError::NotInitialized)));
    }

    #[tokio::test]
    async fn test_scopes_are_independent() {
        let a = MotionScope::new(MotionConfig::default());
        let b = MotionScope::new(MotionConfig::default());

        a.on_scroll(sample(0.0));
        a.on_scroll(sample(50.0));
        b.on_scroll(sample(100.0));
        b.on_scroll(sample(40.0));

        assert_eq!(a.state().direction, ScrollDirection::Down);
        assert_eq!(b.state().direction, ScrollDirection::Up);
    }

    #[tokio::test]
    async fn test_handle_subscribe_sees_direction_changes() {
        let scope = MotionScope::new(MotionConfig::default());
        let handle = scope.handle();
        let mut rx = handle.subscribe().unwrap();

        scope.on_scroll(sample(0.0));
        scope.on_scroll(sample(50.0));

        let event = rx.try_recv().unwrap();
        assert_eq!(event.direction, ScrollDirection::Down);
        assert_eq!(handle.direction().unwrap(), ScrollDirection::Down);
    }

    #[tokio::test]
    async fn test_idle_event_reaches_subscribers() {
        let scope = MotionScope::new(idle_config(100));
        let mut rx = scope.subscribe();
        scope.on_scroll(sample(0.0));
        scope.on_scroll(sample(50.0));

        settle(300).await;
        assert_eq!(rx.recv().await.unwrap().direction, ScrollDirection::Down);
        assert_eq!(rx.recv().await.unwrap().direction, ScrollDirection::Idle);
    }
}
