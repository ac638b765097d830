//! Heads-up presentation of newly posted notifications.
//!
//! The store hands every post to a [`HeadsUpPolicy`], which decides whether to
//! present it. Presented notifications live as [`HeadsUpEntry`] values, each with
//! its own cancellable [`DismissTimer`]. The dispatcher clears an entry through
//! [`HeadsUpController`] when the user taps its notification.

pub mod entry;
pub mod registry;
pub mod timer;

pub use entry::{Clock, HeadsUpEntry, SystemClock};
pub use registry::{HeadsUpRegistry, ShowOutcome};
pub use timer::{DismissTimer, ScheduledDismissal};

use crate::ranking::RankingSnapshot;
use crate::types::NotificationRecord;

/// Display policy deciding whether a posted notification alerts as a heads-up.
pub trait HeadsUpPolicy: Send + Sync {
    fn maybe_show_heads_up(&self, record: &NotificationRecord, ranking: &RankingSnapshot);

    /// Called after a notification left the live set.
    fn on_notification_removed(&self, _key: &str) {}
}

/// Removes a heads-up from screen.
pub trait HeadsUpController: Send + Sync {
    /// Returns `true` if an entry for `key` was shown.
    fn clear_heads_up(&self, key: &str) -> bool;
}
