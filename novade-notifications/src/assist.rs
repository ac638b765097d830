//! Voice assistant integration.

use async_trait::async_trait;

use crate::error::AssistantError;
use crate::types::{NotificationRecord, NotificationStyle, SemanticAction};

/// Outcome the assistant reports for a read-aloud request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssistantResult {
    Success,
    Failed,
}

#[async_trait]
pub trait AssistantClient: Send + Sync {
    /// Asks the assistant to read `record` aloud.
    async fn request_read_aloud(&self, record: &NotificationRecord) -> Result<AssistantResult, AssistantError>;
}

/// Whether the assistant can read and answer `record`.
///
/// That takes a messaging-style notification with a reply action that accepts
/// remote input, plus a mark-as-read action.
pub fn is_assistant_compatible_messaging(record: &NotificationRecord) -> bool {
    if record.style() != NotificationStyle::Messaging {
        return false;
    }
    let actions = record.actions();
    let has_reply = actions
        .iter()
        .any(|a| a.semantic_action() == SemanticAction::Reply && a.remote_input().is_some());
    let has_mark_as_read = actions
        .iter()
        .any(|a| a.semantic_action() == SemanticAction::MarkAsRead);
    has_reply && has_mark_as_read
}
