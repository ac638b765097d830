//! Notification record types.
//!
//! A [`NotificationRecord`] is one live notification instance as reported by the
//! notification authority. Records are identified by their key alone: two records
//! with the same key are the same notification, whatever their content.

use std::fmt;
use std::sync::Arc;

use bitflags::bitflags;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::pending_action::PendingAction;

/// Identifier of the user a notification belongs to.
pub type UserId = i32;

bitflags! {
    /// Flags carried by a notification.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct NotificationFlags: u32 {
        const ONGOING_EVENT = 0x0000_0002;
        const INSISTENT = 0x0000_0004;
        const ONLY_ALERT_ONCE = 0x0000_0008;
        /// Cancel the notification when the user taps it.
        const AUTO_CANCEL = 0x0000_0010;
        const NO_CLEAR = 0x0000_0020;
        /// The notification belongs to a running foreground service.
        const FOREGROUND_SERVICE = 0x0000_0040;
        const GROUP_SUMMARY = 0x0000_0200;
    }
}

/// Presentation style the posting application chose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum NotificationStyle {
    #[default]
    Default,
    BigText,
    BigPicture,
    Inbox,
    Messaging,
    Media,
    Call,
}

/// Semantic meaning an application attached to an inline action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum SemanticAction {
    #[default]
    None,
    Reply,
    MarkAsRead,
    MarkAsUnread,
    Delete,
    Archive,
    Mute,
    Unmute,
    ThumbsUp,
    ThumbsDown,
    Call,
}

impl fmt::Display for SemanticAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SemanticAction::None => "none",
            SemanticAction::Reply => "reply",
            SemanticAction::MarkAsRead => "mark_as_read",
            SemanticAction::MarkAsUnread => "mark_as_unread",
            SemanticAction::Delete => "delete",
            SemanticAction::Archive => "archive",
            SemanticAction::Mute => "mute",
            SemanticAction::Unmute => "unmute",
            SemanticAction::ThumbsUp => "thumbs_up",
            SemanticAction::ThumbsDown => "thumbs_down",
            SemanticAction::Call => "call",
        };
        f.write_str(name)
    }
}

/// Free-form input field attached to an inline action (e.g. a reply box).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteInput {
    /// Key under which the entered text is handed back to the application.
    pub result_key: String,
    pub label: String,
}

impl RemoteInput {
    pub fn new(result_key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            result_key: result_key.into(),
            label: label.into(),
        }
    }
}

/// A button shown on a notification.
#[derive(Debug, Clone)]
pub struct InlineAction {
    title: String,
    semantic_action: SemanticAction,
    remote_input: Option<RemoteInput>,
    pending_action: Arc<dyn PendingAction>,
}

impl InlineAction {
    pub fn new(title: impl Into<String>, pending_action: Arc<dyn PendingAction>) -> Self {
        Self {
            title: title.into(),
            semantic_action: SemanticAction::None,
            remote_input: None,
            pending_action,
        }
    }

    pub fn with_semantic_action(mut self, semantic_action: SemanticAction) -> Self {
        self.semantic_action = semantic_action;
        self
    }

    pub fn with_remote_input(mut self, remote_input: RemoteInput) -> Self {
        self.remote_input = Some(remote_input);
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn semantic_action(&self) -> SemanticAction {
        self.semantic_action
    }

    pub fn remote_input(&self) -> Option<&RemoteInput> {
        self.remote_input.as_ref()
    }

    pub fn pending_action(&self) -> &Arc<dyn PendingAction> {
        &self.pending_action
    }
}

/// One live notification.
///
/// Only `override_group_key` changes after creation, and only through ranking
/// updates applied by the store.
#[derive(Debug, Clone)]
pub struct NotificationRecord {
    key: String,
    package_name: String,
    tag: Option<String>,
    id: i32,
    user_id: UserId,
    flags: NotificationFlags,
    style: NotificationStyle,
    content_action: Option<Arc<dyn PendingAction>>,
    full_screen_action: Option<Arc<dyn PendingAction>>,
    actions: Vec<InlineAction>,
    override_group_key: Option<String>,
    post_time: DateTime<Utc>,
}

impl NotificationRecord {
    /// Creates a record with no flags, no actions and user 0.
    pub fn new(key: impl Into<String>, package_name: impl Into<String>, id: i32) -> Self {
        Self {
            key: key.into(),
            package_name: package_name.into(),
            tag: None,
            id,
            user_id: 0,
            flags: NotificationFlags::empty(),
            style: NotificationStyle::Default,
            content_action: None,
            full_screen_action: None,
            actions: Vec::new(),
            override_group_key: None,
            post_time: Utc::now(),
        }
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    pub fn with_user_id(mut self, user_id: UserId) -> Self {
        self.user_id = user_id;
        self
    }

    pub fn with_flags(mut self, flags: NotificationFlags) -> Self {
        self.flags = flags;
        self
    }

    pub fn with_style(mut self, style: NotificationStyle) -> Self {
        self.style = style;
        self
    }

    pub fn with_content_action(mut self, action: Arc<dyn PendingAction>) -> Self {
        self.content_action = Some(action);
        self
    }

    pub fn with_full_screen_action(mut self, action: Arc<dyn PendingAction>) -> Self {
        self.full_screen_action = Some(action);
        self
    }

    pub fn with_action(mut self, action: InlineAction) -> Self {
        self.actions.push(action);
        self
    }

    pub fn with_override_group_key(mut self, group_key: impl Into<String>) -> Self {
        self.override_group_key = Some(group_key.into());
        self
    }

    pub fn with_post_time(mut self, post_time: DateTime<Utc>) -> Self {
        self.post_time = post_time;
        self
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn package_name(&self) -> &str {
        &self.package_name
    }

    pub fn tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }

    pub fn id(&self) -> i32 {
        self.id
    }

    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    pub fn flags(&self) -> NotificationFlags {
        self.flags
    }

    pub fn style(&self) -> NotificationStyle {
        self.style
    }

    pub fn content_action(&self) -> Option<&Arc<dyn PendingAction>> {
        self.content_action.as_ref()
    }

    pub fn full_screen_action(&self) -> Option<&Arc<dyn PendingAction>> {
        self.full_screen_action.as_ref()
    }

    pub fn actions(&self) -> &[InlineAction] {
        &self.actions
    }

    pub fn override_group_key(&self) -> Option<&str> {
        self.override_group_key.as_deref()
    }

    pub fn post_time(&self) -> DateTime<Utc> {
        self.post_time
    }

    pub(crate) fn set_override_group_key(&mut self, group_key: Option<String>) {
        self.override_group_key = group_key;
    }

    /// The action launched when the notification body is tapped: the content
    /// action, or the full-screen action when there is no content action.
    pub fn click_action(&self) -> Option<&Arc<dyn PendingAction>> {
        self.content_action.as_ref().or(self.full_screen_action.as_ref())
    }

    /// Identity test used for deduplication: key equality only.
    pub fn is_same_notification(&self, other: &NotificationRecord) -> bool {
        self.key == other.key
    }

    /// Whether tapping the notification should also clear it.
    ///
    /// Foreground service notifications are never auto-cancelled.
    pub fn auto_cancel(&self) -> bool {
        self.flags.contains(NotificationFlags::AUTO_CANCEL)
            && !self.flags.contains(NotificationFlags::FOREGROUND_SERVICE)
    }

    /// Key under which mute state for this notification's conversation is kept.
    pub fn conversation_key(&self) -> &str {
        &self.key
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PendingActionError;
    use crate::pending_action::{LaunchResult, ReplyPayload};
    use rstest::rstest;

    #[derive(Debug)]
    struct NoopAction;

    impl PendingAction for NoopAction {
        fn send(&self, _reply: Option<&ReplyPayload>) -> Result<LaunchResult, PendingActionError> {
            Ok(LaunchResult::SUCCESS)
        }
    }

    #[rstest]
    #[case(NotificationFlags::AUTO_CANCEL, true)]
    #[case(NotificationFlags::AUTO_CANCEL | NotificationFlags::FOREGROUND_SERVICE, false)]
    #[case(NotificationFlags::empty(), false)]
    #[case(NotificationFlags::FOREGROUND_SERVICE, false)]
    #[case(NotificationFlags::AUTO_CANCEL | NotificationFlags::ONGOING_EVENT, true)]
    fn auto_cancel_policy(#[case] flags: NotificationFlags, #[case] expected: bool) {
        let record = NotificationRecord::new("k", "com.example", 1).with_flags(flags);
        assert_eq!(record.auto_cancel(), expected);
    }

    #[test]
    fn identity_is_key_equality_only() {
        let a = NotificationRecord::new("0|com.example|7|null|10", "com.example", 7);
        let b = NotificationRecord::new("0|com.example|7|null|10", "com.other", 99).with_tag("chat");
        let c = NotificationRecord::new("0|com.example|8|null|10", "com.example", 7);
        assert!(a.is_same_notification(&b));
        assert!(!a.is_same_notification(&c));
    }

    #[test]
    fn click_action_prefers_content_action() {
        let content: Arc<dyn PendingAction> = Arc::new(NoopAction);
        let full_screen: Arc<dyn PendingAction> = Arc::new(NoopAction);

        let both = NotificationRecord::new("k", "p", 1)
            .with_content_action(content.clone())
            .with_full_screen_action(full_screen.clone());
        assert!(Arc::ptr_eq(both.click_action().unwrap(), &content));

        let only_full_screen = NotificationRecord::new("k", "p", 1).with_full_screen_action(full_screen.clone());
        assert!(Arc::ptr_eq(only_full_screen.click_action().unwrap(), &full_screen));

        assert!(NotificationRecord::new("k", "p", 1).click_action().is_none());
    }

    #[test]
    fn inline_action_builder() {
        let action = InlineAction::new("Reply", Arc::new(NoopAction))
            .with_semantic_action(SemanticAction::Reply)
            .with_remote_input(RemoteInput::new("reply_text", "Reply"));
        assert_eq!(action.title(), "Reply");
        assert_eq!(action.semantic_action(), SemanticAction::Reply);
        assert_eq!(action.remote_input().map(|r| r.result_key.as_str()), Some("reply_text"));
        assert_eq!(action.semantic_action().to_string(), "reply");
    }

    #[test]
    fn new_record_defaults() {
        let record = NotificationRecord::new("k", "com.example", 3);
        assert_eq!(record.tag(), None);
        assert_eq!(record.user_id(), 0);
        assert_eq!(record.flags(), NotificationFlags::empty());
        assert_eq!(record.style(), NotificationStyle::Default);
        assert!(record.actions().is_empty());
        assert_eq!(record.override_group_key(), None);
        assert!(record.post_time() <= Utc::now());
    }
}
