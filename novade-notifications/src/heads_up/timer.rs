//! Cancellable dismissal timer.
//!
//! Each schedule gets a generation number. Cancelling or rescheduling bumps the
//! timer's generation and drops the pending callback, so a [`ScheduledDismissal`]
//! that fires afterwards is a no-op. A callback that has already started is not
//! interrupted.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::warn;

type DismissCallback = Box<dyn FnOnce() + Send + 'static>;
type CallbackSlot = Arc<Mutex<Option<DismissCallback>>>;

/// One scheduled dismissal. Cloning shares the same underlying callback.
#[derive(Clone)]
pub struct ScheduledDismissal {
    generation: u64,
    current_generation: Arc<AtomicU64>,
    callback: CallbackSlot,
}

impl ScheduledDismissal {
    /// Runs the callback if this schedule is still current and has not run yet.
    ///
    /// Returns `true` when the callback ran.
    pub fn fire(&self) -> bool {
        let callback = {
            let mut slot = self.callback.lock().unwrap_or_else(PoisonError::into_inner);
            if self.current_generation.load(Ordering::SeqCst) != self.generation {
                return false;
            }
            slot.take()
        };
        match callback {
            Some(callback) => {
                callback();
                true
            }
            None => false,
        }
    }

    /// Whether the timer was cancelled or rescheduled after this schedule was made.
    pub fn is_cancelled(&self) -> bool {
        self.current_generation.load(Ordering::SeqCst) != self.generation
    }

    /// Whether this is the live schedule of `timer`: made by it and not superseded.
    pub fn is_current_for(&self, timer: &DismissTimer) -> bool {
        Arc::ptr_eq(&self.current_generation, &timer.generation) && !self.is_cancelled()
    }
}

impl std::fmt::Debug for ScheduledDismissal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScheduledDismissal")
            .field("generation", &self.generation)
            .field("cancelled", &self.is_cancelled())
            .finish()
    }
}

#[derive(Default)]
struct Pending {
    task: Option<JoinHandle<()>>,
    callback: Option<CallbackSlot>,
}

/// Timer owned by a single heads-up entry.
#[derive(Default)]
pub struct DismissTimer {
    generation: Arc<AtomicU64>,
    pending: Mutex<Pending>,
}

impl DismissTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedules `on_dismiss` to run after `delay`, replacing any earlier schedule.
    ///
    /// Must be called from within a Tokio runtime; otherwise nothing is scheduled
    /// and the returned handle only fires when called directly.
    pub fn schedule<F>(&self, delay: Duration, on_dismiss: F) -> ScheduledDismissal
    where
        F: FnOnce() + Send + 'static,
    {
        let mut pending = self.pending.lock().unwrap_or_else(PoisonError::into_inner);
        Self::release(&mut pending);

        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let callback: CallbackSlot = Arc::new(Mutex::new(Some(Box::new(on_dismiss))));
        let scheduled = ScheduledDismissal {
            generation,
            current_generation: Arc::clone(&self.generation),
            callback: Arc::clone(&callback),
        };

        match Handle::try_current() {
            Ok(handle) => {
                let fired = scheduled.clone();
                pending.task = Some(handle.spawn(async move {
                    tokio::time::sleep(delay).await;
                    fired.fire();
                }));
            }
            Err(_) => warn!("No Tokio runtime available, heads-up dismissal will not fire on its own"),
        }
        pending.callback = Some(callback);
        scheduled
    }

    /// Cancels the pending dismissal, if any. Returns `true` if one was pending.
    pub fn cancel(&self) -> bool {
        self.generation.fetch_add(1, Ordering::SeqCst);
        let mut pending = self.pending.lock().unwrap_or_else(PoisonError::into_inner);
        Self::release(&mut pending)
    }

    /// Whether a scheduled dismissal is still waiting to fire.
    pub fn is_pending(&self) -> bool {
        let pending = self.pending.lock().unwrap_or_else(PoisonError::into_inner);
        match &pending.callback {
            Some(slot) => slot.lock().unwrap_or_else(PoisonError::into_inner).is_some(),
            None => false,
        }
    }

    fn release(pending: &mut Pending) -> bool {
        if let Some(task) = pending.task.take() {
            task.abort();
        }
        match pending.callback.take() {
            Some(slot) => slot.lock().unwrap_or_else(PoisonError::into_inner).take().is_some(),
            None => false,
        }
    }
}

impl Drop for DismissTimer {
    fn drop(&mut self) {
        self.cancel();
    }
}

impl std::fmt::Debug for DismissTimer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DismissTimer")
            .field("generation", &self.generation.load(Ordering::SeqCst))
            .field("pending", &self.is_pending())
            .finish()
    }
}
