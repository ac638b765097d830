//! Interfaces to the notification authority.
//!
//! [`NotificationAuthority`] is the inbound side used to seed the store on
//! connection. [`StatusBarService`] receives the outbound acknowledgments the
//! dispatcher sends after user interactions.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::AuthorityError;
use crate::ranking::RankingSnapshot;
use crate::types::{InlineAction, NotificationRecord, UserId};

/// Describes which notification was acted on and whether it was visible.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationVisibility {
    pub key: String,
    pub rank: i32,
    pub count: i32,
    pub visible: bool,
}

impl NotificationVisibility {
    /// Sentinel for rank and count when they are not computed locally.
    pub const UNKNOWN: i32 = -1;

    /// A visible notification whose rank and count are unknown.
    pub fn unranked(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            rank: Self::UNKNOWN,
            count: Self::UNKNOWN,
            visible: true,
        }
    }
}

/// Surface a notification was dismissed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DismissalSurface {
    Unknown,
    Peek,
    Aod,
    Shade,
}

impl DismissalSurface {
    pub fn code(self) -> i32 {
        match self {
            DismissalSurface::Unknown => -1,
            DismissalSurface::Peek => 1,
            DismissalSurface::Aod => 2,
            DismissalSurface::Shade => 3,
        }
    }
}

/// The user's attitude towards a dismissed notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DismissalSentiment {
    Unknown,
    Negative,
    Neutral,
    Positive,
}

impl DismissalSentiment {
    pub fn code(self) -> i32 {
        match self {
            DismissalSentiment::Unknown => -1000,
            DismissalSentiment::Negative => 0,
            DismissalSentiment::Neutral => 1,
            DismissalSentiment::Positive => 2,
        }
    }
}

/// Arguments of the "notification cleared" acknowledgment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationClearRequest {
    pub package_name: String,
    pub tag: Option<String>,
    pub id: i32,
    pub user_id: UserId,
    pub key: String,
    pub dismissal_surface: DismissalSurface,
    pub dismissal_sentiment: DismissalSentiment,
    pub visibility: NotificationVisibility,
}

impl NotificationClearRequest {
    /// Clear request for a notification dismissed from the shade with neutral sentiment.
    pub fn dismissed_from_shade(record: &NotificationRecord, visibility: NotificationVisibility) -> Self {
        Self {
            package_name: record.package_name().to_string(),
            tag: record.tag().map(str::to_string),
            id: record.id(),
            user_id: record.user_id(),
            key: record.key().to_string(),
            dismissal_surface: DismissalSurface::Shade,
            dismissal_sentiment: DismissalSentiment::Neutral,
            visibility,
        }
    }
}

/// Source of truth for the live notification set.
#[async_trait]
pub trait NotificationAuthority: Send + Sync {
    /// Every notification currently active for the listener.
    async fn active_notifications(&self) -> Result<Vec<NotificationRecord>, AuthorityError>;

    async fn current_ranking(&self) -> Result<RankingSnapshot, AuthorityError>;
}

/// Bookkeeping endpoint of the notification authority.
#[async_trait]
pub trait StatusBarService: Send + Sync {
    async fn on_notification_click(
        &self,
        key: &str,
        visibility: NotificationVisibility,
    ) -> Result<(), AuthorityError>;

    async fn on_notification_clear(&self, request: NotificationClearRequest) -> Result<(), AuthorityError>;

    async fn on_notification_action_click(
        &self,
        key: &str,
        action_index: usize,
        action: &InlineAction,
        visibility: NotificationVisibility,
        generated_by_assistant: bool,
    ) -> Result<(), AuthorityError>;

    async fn on_clear_all_notifications(&self, user_id: UserId) -> Result<(), AuthorityError>;
}
