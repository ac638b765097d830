//! Events flowing into and out of the notification store.

use crate::ranking::RankingSnapshot;
use crate::types::NotificationRecord;

/// Event delivered to in-process consumers subscribed to the store.
#[derive(Debug, Clone)]
pub enum ListenerEvent {
    /// A notification was posted or re-posted.
    NotificationAdded(NotificationRecord),
    /// The live set or the ranking changed; re-read the store.
    NotificationsChanged,
}

/// Inbound event from the notification authority, applied in arrival order.
#[derive(Debug, Clone)]
pub enum AuthorityEvent {
    /// The listener (re)connected; carries the full active set.
    Connected {
        records: Vec<NotificationRecord>,
        ranking: RankingSnapshot,
    },
    Posted {
        record: NotificationRecord,
        ranking: Option<RankingSnapshot>,
    },
    Removed {
        key: String,
    },
    RankingUpdate(RankingSnapshot),
    Disconnected,
}
