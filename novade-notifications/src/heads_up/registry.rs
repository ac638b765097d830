use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::time::Duration;

use novade_core::HeadsUpConfig;
use tracing::{debug, trace};

use super::entry::{Clock, HeadsUpEntry};
use super::timer::ScheduledDismissal;
use super::{HeadsUpController, HeadsUpPolicy};
use crate::ranking::RankingSnapshot;
use crate::types::NotificationRecord;

type EntryMap = HashMap<String, HeadsUpEntry>;

/// Whether [`HeadsUpRegistry::show`] created an entry or refreshed one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShowOutcome {
    New,
    AlertingAgain,
}

/// Owns the live heads-up entries, at most one per notification key.
///
/// Each entry dismisses itself after the configured timeout unless it is
/// cleared or shown again first.
pub struct HeadsUpRegistry {
    entries: Arc<Mutex<EntryMap>>,
    clock: Arc<dyn Clock>,
    dismiss_timeout: Duration,
}

impl HeadsUpRegistry {
    pub fn new(clock: Arc<dyn Clock>, dismiss_timeout: Duration) -> Self {
        Self {
            entries: Arc::new(Mutex::new(HashMap::new())),
            clock,
            dismiss_timeout,
        }
    }

    pub fn from_config(config: &HeadsUpConfig, clock: Arc<dyn Clock>) -> Self {
        Self::new(clock, config.dismiss_timeout())
    }

    pub fn dismiss_timeout(&self) -> Duration {
        self.dismiss_timeout
    }

    /// Shows `record` as a heads-up, or refreshes the entry already shown for its key.
    ///
    /// `on_dismiss` receives the key once the entry times out. It is not called
    /// when the entry is cleared or superseded by another `show`.
    pub fn show<F>(&self, record: &NotificationRecord, on_dismiss: F) -> ShowOutcome
    where
        F: FnOnce(String) + Send + 'static,
    {
        let mut entries = self.lock();
        self.show_in(&mut entries, record, on_dismiss)
    }

    fn show_in<F>(&self, entries: &mut EntryMap, record: &NotificationRecord, on_dismiss: F) -> ShowOutcome
    where
        F: FnOnce(String) + Send + 'static,
    {
        let key = record.key().to_string();
        let outcome = match entries.get_mut(&key) {
            Some(entry) => {
                entry.set_new(false);
                entry.set_alerting_again(true);
                entry.refresh_post_time();
                ShowOutcome::AlertingAgain
            }
            None => {
                let mut entry = HeadsUpEntry::new(record, Arc::clone(&self.clock));
                entry.set_new(true);
                entries.insert(key.clone(), entry);
                ShowOutcome::New
            }
        };

        if let Some(entry) = entries.get(&key) {
            // Filled before the map lock is released, so the callback always finds it.
            let own_schedule: Arc<Mutex<Option<ScheduledDismissal>>> = Arc::default();
            let schedule_slot = Arc::clone(&own_schedule);
            let weak_entries = Arc::downgrade(&self.entries);
            let dismissed_key = key.clone();
            let scheduled = entry.schedule_dismissal(self.dismiss_timeout, move || {
                if Self::remove_from(&weak_entries, &dismissed_key, &schedule_slot) {
                    debug!("Heads-up for '{}' dismissed after timeout", dismissed_key);
                    on_dismiss(dismissed_key);
                }
            });
            *own_schedule.lock().unwrap_or_else(PoisonError::into_inner) = Some(scheduled);
        }
        debug!("Heads-up for '{}' shown ({:?})", key, outcome);
        outcome
    }

    /// Removes the entry for `key`, cancelling its timer. Returns `true` if one existed.
    pub fn clear(&self, key: &str) -> bool {
        let removed = self.lock().remove(key);
        match removed {
            Some(entry) => {
                drop(entry);
                debug!("Heads-up for '{}' cleared", key);
                true
            }
            None => false,
        }
    }

    pub fn clear_all(&self) {
        let drained: Vec<HeadsUpEntry> = self.lock().drain().map(|(_, entry)| entry).collect();
        debug!("Cleared {} heads-up entries", drained.len());
    }

    pub fn contains(&self, key: &str) -> bool {
        self.lock().contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Runs `f` against the entry for `key` while holding the registry lock.
    pub fn with_entry<R>(&self, key: &str, f: impl FnOnce(&mut HeadsUpEntry) -> R) -> Option<R> {
        self.lock().get_mut(key).map(f)
    }

    fn lock(&self) -> MutexGuard<'_, EntryMap> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Removes `key` only if the entry still belongs to `own_schedule`.
    ///
    /// The check runs under the map lock, the same lock every reschedule and
    /// clear takes, so a timer that fired just before a re-alert or a
    /// clear-then-show cannot remove the newer entry.
    fn remove_from(
        entries: &Weak<Mutex<EntryMap>>,
        key: &str,
        own_schedule: &Mutex<Option<ScheduledDismissal>>,
    ) -> bool {
        let Some(entries) = entries.upgrade() else {
            trace!("Heads-up registry dropped before '{}' timed out", key);
            return false;
        };
        let mut entries = entries.lock().unwrap_or_else(PoisonError::into_inner);
        let scheduled = own_schedule.lock().unwrap_or_else(PoisonError::into_inner).take();
        let still_current = match (scheduled, entries.get(key)) {
            (Some(scheduled), Some(entry)) => scheduled.is_current_for(entry.timer()),
            _ => false,
        };
        if !still_current {
            trace!("Stale heads-up dismissal for '{}' ignored", key);
            return false;
        }
        let removed = entries.remove(key);
        drop(entries);
        removed.is_some()
    }
}

impl HeadsUpController for HeadsUpRegistry {
    fn clear_heads_up(&self, key: &str) -> bool {
        self.clear(key)
    }
}

/// Shows every posted notification and drops the entry when its notification is removed.
impl HeadsUpPolicy for HeadsUpRegistry {
    fn maybe_show_heads_up(&self, record: &NotificationRecord, _ranking: &RankingSnapshot) {
        self.show(record, |_| {});
    }

    fn on_notification_removed(&self, key: &str) {
        self.clear(key);
    }
}

impl std::fmt::Debug for HeadsUpRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HeadsUpRegistry")
            .field("entries", &self.len())
            .field("dismiss_timeout", &self.dismiss_timeout)
            .finish()
    }
}
