//! Cancellable debounce timer, one per popover.
//!
//! There is no handle to an in-flight timer task on wasm, so cancellation is
//! modeled as a generation counter: every keystroke bumps the generation and
//! schedules a sleep holding the new value; when the sleep wakes it checks
//! whether its generation is still the latest. Older timers wake, see a newer
//! generation, and do nothing.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use dioxus::prelude::*;

#[derive(Clone, Default)]
pub struct Debouncer {
    generation: Arc<AtomicU64>,
}

impl Debouncer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Invalidate any pending timer and return the token a newly scheduled
    /// timer should hold
    pub fn bump(&self) -> u64 {
        self.generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Invalidate any pending timer without scheduling a new one
    /// (Enter and Escape paths)
    pub fn cancel(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
    }

    pub fn is_current(&self, token: u64) -> bool {
        self.generation.load(Ordering::SeqCst) == token
    }

    /// Sleep for `ms` milliseconds, then report whether this timer is still
    /// the latest one. `false` means a newer keystroke superseded it.
    pub async fn wait(&self, token: u64, ms: u32) -> bool {
        sleep_ms(ms).await;
        self.is_current(token)
    }
}

async fn sleep_ms(ms: u32) {
    #[cfg(target_family = "wasm")]
    {
        gloo_timers::future::TimeoutFuture::new(ms).await;
    }
    #[cfg(not(target_family = "wasm"))]
    {
        tokio::time::sleep(std::time::Duration::from_millis(ms as u64)).await;
    }
}

/// Hook form: one debouncer owned by the calling component for its lifetime
pub fn use_debouncer() -> Debouncer {
    use_hook(Debouncer::new)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicU32;

    #[test]
    fn test_bump_supersedes_older_token() {
        let d = Debouncer::new();
        let first = d.bump();
        let second = d.bump();
        assert!(!d.is_current(first));
        assert!(d.is_current(second));
    }

    #[test]
    fn test_cancel_invalidates_pending() {
        let d = Debouncer::new();
        let token = d.bump();
        d.cancel();
        assert!(!d.is_current(token));
    }

    // Keystrokes at 100ms intervals for 500ms must produce exactly one
    // fire, 250ms after the last keystroke.
    #[tokio::test]
    async fn test_burst_fires_once() {
        let d = Debouncer::new();
        let fired = Arc::new(AtomicU32::new(0));

        let mut handles = Vec::new();
        for _ in 0..6 {
            let token = d.bump();
            let d = d.clone();
            let fired = fired.clone();
            handles.push(tokio::spawn(async move {
                if d.wait(token, 250).await {
                    fired.fetch_add(1, Ordering::SeqCst);
                }
            }));
            tokio::time::sleep(std::time::Duration::from_millis(100)).await;
        }

        for handle in handles {
            handle.await.unwrap();
        }
        assert_eq!(fired.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_cancel_during_burst_suppresses_all() {
        let d = Debouncer::new();
        let fired = Arc::new(AtomicU32::new(0));

        let token = d.bump();
        let d2 = d.clone();
        let fired2 = fired.clone();
        let handle = tokio::spawn(async move {
            if d2.wait(token, 50).await {
                fired2.fetch_add(1, Ordering::SeqCst);
            }
        });
        // Enter arrives before the timer elapses
        d.cancel();

        handle.await.unwrap();
        assert_eq!(fired.load(Ordering::SeqCst), 0);
    }
}
