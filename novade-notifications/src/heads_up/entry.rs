use std::any::Any;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};

use super::timer::{DismissTimer, ScheduledDismissal};
use crate::types::NotificationRecord;

/// Source of the current wall-clock time.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// [`Clock`] backed by the system time.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A notification currently presented as a heads-up.
///
/// The entry refers to its notification by key only; the record itself stays
/// in the store. Dropping the entry cancels its dismissal timer.
pub struct HeadsUpEntry {
    key: String,
    post_time: DateTime<Utc>,
    clock: Arc<dyn Clock>,
    timer: DismissTimer,
    is_new: bool,
    is_alerting_again: bool,
    view: Option<Box<dyn Any + Send>>,
}

impl HeadsUpEntry {
    pub fn new(record: &NotificationRecord, clock: Arc<dyn Clock>) -> Self {
        Self {
            key: record.key().to_string(),
            post_time: clock.now(),
            clock,
            timer: DismissTimer::new(),
            is_new: false,
            is_alerting_again: false,
            view: None,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn post_time(&self) -> DateTime<Utc> {
        self.post_time
    }

    /// Resets the post time to the clock's current time.
    pub fn refresh_post_time(&mut self) {
        self.post_time = self.clock.now();
    }

    pub fn timer(&self) -> &DismissTimer {
        &self.timer
    }

    /// Schedules auto-dismissal, replacing any earlier schedule.
    pub fn schedule_dismissal<F>(&self, delay: Duration, on_dismiss: F) -> ScheduledDismissal
    where
        F: FnOnce() + Send + 'static,
    {
        self.timer.schedule(delay, on_dismiss)
    }

    pub fn is_new(&self) -> bool {
        self.is_new
    }

    pub fn set_new(&mut self, is_new: bool) {
        self.is_new = is_new;
    }

    pub fn is_alerting_again(&self) -> bool {
        self.is_alerting_again
    }

    pub fn set_alerting_again(&mut self, is_alerting_again: bool) {
        self.is_alerting_again = is_alerting_again;
    }

    /// Attaches an opaque UI object to the entry.
    pub fn set_view(&mut self, view: Box<dyn Any + Send>) {
        self.view = Some(view);
    }

    pub fn view(&self) -> Option<&(dyn Any + Send)> {
        self.view.as_deref()
    }

    pub fn take_view(&mut self) -> Option<Box<dyn Any + Send>> {
        self.view.take()
    }
}

impl Drop for HeadsUpEntry {
    fn drop(&mut self) {
        self.timer.cancel();
    }
}

impl fmt::Debug for HeadsUpEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HeadsUpEntry")
            .field("key", &self.key)
            .field("post_time", &self.post_time)
            .field("is_new", &self.is_new)
            .field("is_alerting_again", &self.is_alerting_again)
            .field("has_view", &self.view.is_some())
            .field("timer", &self.timer)
            .finish()
    }
}
