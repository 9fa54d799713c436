//! Trailing-edge debouncer on the tokio timer.
//!
//! `Idle → Pending` on [`Debouncer::trigger`]; a trigger while `Pending`
//! cancels the outstanding timer and starts a new one. When the quiescence
//! window elapses the operation is spawned (`Fired`) and the debouncer returns
//! to `Idle`. [`Debouncer::cancel`] and `Drop` discard a pending timer so a
//! stale operation never runs after teardown.

use std::{
    future::Future,
    sync::{Arc, Mutex, MutexGuard},
    time::Duration,
};

use tokio::task::JoinHandle;
use tracing::trace;

/// Quiescence window used by every trigger site.
pub const DEFAULT_QUIESCENCE: Duration = Duration::from_millis(300);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DebounceState {
    Idle,
    Pending,
}

#[derive(Default)]
struct Slot {
    /// Bumped on every trigger/cancel; a timer only fires if it still owns the latest generation.
    generation: u64,
    timer: Option<JoinHandle<()>>,
}

/// Collapses bursts of triggers into one call per quiescence window.
///
/// Must be used from within a tokio runtime.
pub struct Debouncer {
    quiescence: Duration,
    slot: Arc<Mutex<Slot>>,
}

impl Debouncer {
    pub fn new(quiescence: Duration) -> Self {
        Self {
            quiescence,
            slot: Arc::new(Mutex::new(Slot::default())),
        }
    }

    pub fn quiescence(&self) -> Duration {
        self.quiescence
    }

    /// Schedules `operation` to run once no further trigger arrives for the
    /// quiescence window. Any previously pending operation is discarded.
    pub fn trigger<F, Fut>(&self, operation: F)
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let mut slot = lock(&self.slot);
        if let Some(prev) = slot.timer.take() {
            prev.abort();
            trace!("debounce: pending timer restarted");
        }
        slot.generation = slot.generation.wrapping_add(1);

        let generation = slot.generation;
        let quiescence = self.quiescence;
        let shared = Arc::clone(&self.slot);

        slot.timer = Some(tokio::spawn(async move {
            tokio::time::sleep(quiescence).await;
            {
                let mut slot = lock(&shared);
                if slot.generation != generation {
                    return;
                }
                slot.timer = None;
            }
            trace!("debounce: fired");
            // Detached so a later trigger cannot abort an operation already in flight.
            tokio::spawn(operation());
        }));
    }

    /// Discards the pending operation, if any.
    pub fn cancel(&self) {
        let mut slot = lock(&self.slot);
        slot.generation = slot.generation.wrapping_add(1);
        if let Some(timer) = slot.timer.take() {
            timer.abort();
            trace!("debounce: pending timer cancelled");
        }
    }

    pub fn state(&self) -> DebounceState {
        let slot = lock(&self.slot);
        match &slot.timer {
            Some(timer) if !timer.is_finished() => DebounceState::Pending,
            _ => DebounceState::Idle,
        }
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(DEFAULT_QUIESCENCE)
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}

fn lock(slot: &Mutex<Slot>) -> MutexGuard<'_, Slot> {
    // The guarded data stays consistent even if a holder panicked.
    slot.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[tokio::test(start_paused = true)]
    async fn burst_fires_once_with_last_arguments() {
        let debouncer = Debouncer::default();
        let calls = Arc::new(AtomicUsize::new(0));
        let last = Arc::new(Mutex::new(None::<usize>));

        for i in 0..5 {
            let calls = Arc::clone(&calls);
            let last = Arc::clone(&last);
            debouncer.trigger(move || async move {
                calls.fetch_add(1, Ordering::SeqCst);
                *last.lock().unwrap() = Some(i);
            });
            tokio::time::sleep(Duration::from_millis(100)).await;
        }
        assert_eq!(debouncer.state(), DebounceState::Pending);
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        tokio::time::sleep(Duration::from_millis(400)).await;
        tokio::task::yield_now().await;

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(*last.lock().unwrap(), Some(4));
        assert_eq!(debouncer.state(), DebounceState::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn spaced_triggers_each_fire() {
        let debouncer = Debouncer::new(Duration::from_millis(300));
        let calls = Arc::new(AtomicUsize::new(0));

        for _ in 0..2 {
            let calls = Arc::clone(&calls);
            debouncer.trigger(move || async move {
                calls.fetch_add(1, Ordering::SeqCst);
            });
            tokio::time::sleep(Duration::from_millis(350)).await;
            tokio::task::yield_now().await;
        }

        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_prevents_stale_fire() {
        let debouncer = Debouncer::default();
        let calls = Arc::new(AtomicUsize::new(0));

        let c = Arc::clone(&calls);
        debouncer.trigger(move || async move {
            c.fetch_add(1, Ordering::SeqCst);
        });
        tokio::time::sleep(Duration::from_millis(200)).await;
        debouncer.cancel();
        assert_eq!(debouncer.state(), DebounceState::Idle);

        tokio::time::sleep(Duration::from_secs(1)).await;
        tokio::task::yield_now().await;
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn drop_cancels_pending_timer() {
        let calls = Arc::new(AtomicUsize::new(0));
        {
            let debouncer = Debouncer::default();
            let c = Arc::clone(&calls);
            debouncer.trigger(move || async move {
                c.fetch_add(1, Ordering::SeqCst);
            });
        }
        tokio::time::sleep(Duration::from_secs(1)).await;
        tokio::task::yield_now().await;
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }
}
