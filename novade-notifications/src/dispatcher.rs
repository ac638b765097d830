//! Routing of user interactions with notifications.
//!
//! The [`InteractionDispatcher`] invokes the deferred action behind a tap or an
//! inline action and sends the matching acknowledgments to the status bar
//! service. It only reads records; removing a notification is left to the
//! authority, which reports it back through the store.

use std::sync::Arc;

use novade_core::DispatchConfig;
use tracing::{debug, error, info, warn};

use crate::assist::{is_assistant_compatible_messaging, AssistantClient, AssistantResult};
use crate::authority::{NotificationClearRequest, NotificationVisibility, StatusBarService};
use crate::error::{AuthorityError, DispatchError, PendingActionError};
use crate::heads_up::HeadsUpController;
use crate::mute::{MuteAffordance, MuteLabel, MuteStateManager};
use crate::pending_action::{LaunchResult, PendingAction, ReplyPayload};
use crate::types::{InlineAction, NotificationRecord, SemanticAction, UserId};

/// Receives the result of a dispatched tap or generic inline action.
pub trait ClickCallback: Send + Sync {
    fn on_notification_clicked(&self, result: LaunchResult);
}

/// Transient confirmation messages shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toast {
    MessageSent,
    AssistActionFailed,
}

pub trait FeedbackPresenter: Send + Sync {
    fn show_toast(&self, toast: Toast);
}

/// What [`InteractionDispatcher::handle_action`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    /// Generic action invoked; the completion callback got the result.
    Invoked(LaunchResult),
    /// Canned reply sent through a messaging reply action.
    Replied(LaunchResult),
    /// Reply action without an input field; nothing was invoked.
    ReplySkipped,
}

impl ActionOutcome {
    fn is_aborted(self) -> bool {
        match self {
            ActionOutcome::Invoked(result) | ActionOutcome::Replied(result) => result.is_aborted(),
            ActionOutcome::ReplySkipped => false,
        }
    }
}

pub struct InteractionDispatcher {
    status_bar: Arc<dyn StatusBarService>,
    click_callback: Option<Arc<dyn ClickCallback>>,
    feedback: Arc<dyn FeedbackPresenter>,
    current_user: UserId,
    canned_reply_message: String,
    heads_up_controller: Option<Arc<dyn HeadsUpController>>,
    mute_states: Option<Arc<dyn MuteStateManager>>,
    assistant: Option<Arc<dyn AssistantClient>>,
}

impl InteractionDispatcher {
    pub fn new(
        status_bar: Arc<dyn StatusBarService>,
        click_callback: Option<Arc<dyn ClickCallback>>,
        feedback: Arc<dyn FeedbackPresenter>,
        current_user: UserId,
        config: &DispatchConfig,
    ) -> Self {
        Self {
            status_bar,
            click_callback,
            feedback,
            current_user,
            canned_reply_message: config.canned_reply_message.clone(),
            heads_up_controller: None,
            mute_states: None,
            assistant: None,
        }
    }

    pub fn set_heads_up_controller(&mut self, controller: Arc<dyn HeadsUpController>) {
        self.heads_up_controller = Some(controller);
    }

    pub fn set_mute_state_manager(&mut self, mute_states: Arc<dyn MuteStateManager>) {
        self.mute_states = Some(mute_states);
    }

    pub fn set_assistant(&mut self, assistant: Arc<dyn AssistantClient>) {
        self.assistant = Some(assistant);
    }

    pub fn current_user(&self) -> UserId {
        self.current_user
    }

    /// Handles a tap on the notification body.
    ///
    /// Returns `None` without side effects when the record has neither a content
    /// nor a full-screen action.
    pub async fn handle_click(&self, record: &NotificationRecord) -> Option<LaunchResult> {
        let Some(action) = record.click_action() else {
            debug!("Notification '{}' has no click action", record.key());
            return None;
        };

        if let Some(controller) = &self.heads_up_controller {
            if controller.clear_heads_up(record.key()) {
                debug!("Cleared heads-up for '{}' before launching it", record.key());
            }
        }

        let result = Self::send(action.as_ref(), None, record.key());
        info!("Notification '{}' clicked: {}", record.key(), result);

        if let Err(e) = self.acknowledge_click(record).await {
            error!("Failed to acknowledge click on '{}': {}", record.key(), e);
        }
        self.notify_click_callback(result);
        Some(result)
    }

    /// Handles a tap on the inline action at `index`.
    pub async fn handle_action(
        &self,
        record: &NotificationRecord,
        index: usize,
    ) -> Result<ActionOutcome, DispatchError> {
        let Some(action) = record.actions().get(index) else {
            let err = DispatchError::ActionIndexOutOfRange {
                key: record.key().to_string(),
                index,
                len: record.actions().len(),
            };
            debug!("{}", err);
            return Err(err);
        };

        let outcome = if action.semantic_action() == SemanticAction::Reply && is_assistant_compatible_messaging(record) {
            self.send_canned_reply(record, action)
        } else {
            let result = Self::send(action.pending_action().as_ref(), None, record.key());
            self.notify_click_callback(result);
            ActionOutcome::Invoked(result)
        };
        debug!("Action {} ({}) on '{}': {:?}", index, action.semantic_action(), record.key(), outcome);

        if outcome.is_aborted() {
            debug!("Skipping action acknowledgment for '{}', invocation aborted", record.key());
        } else if let Err(e) = self
            .status_bar
            .on_notification_action_click(
                record.key(),
                index,
                action,
                NotificationVisibility::unranked(record.key()),
                false,
            )
            .await
        {
            error!("Failed to acknowledge action {} on '{}': {}", index, record.key(), e);
        }
        Ok(outcome)
    }

    /// Asks the assistant to read a messaging notification aloud.
    pub async fn handle_play_action(&self, record: &NotificationRecord) {
        if !is_assistant_compatible_messaging(record) {
            debug!("Notification '{}' cannot be read aloud", record.key());
            return;
        }
        let Some(assistant) = &self.assistant else {
            debug!("No assistant available to read '{}' aloud", record.key());
            return;
        };

        match assistant.request_read_aloud(record).await {
            Ok(AssistantResult::Success) => debug!("Assistant is reading '{}' aloud", record.key()),
            Ok(AssistantResult::Failed) => {
                error!("Assistant failed to read aloud notification '{}'", record.key());
                self.feedback.show_toast(Toast::AssistActionFailed);
            }
            Err(e) => {
                error!("Assistant request for '{}' failed: {}", record.key(), e);
                self.feedback.show_toast(Toast::AssistActionFailed);
            }
        }
    }

    /// Toggles mute for the record's conversation and relabels `button`.
    pub fn handle_mute(&self, record: &NotificationRecord, button: &dyn MuteAffordance) {
        let Some(mute_states) = &self.mute_states else {
            debug!("No mute state manager, ignoring mute for '{}'", record.key());
            return;
        };
        let conversation_key = record.conversation_key();
        mute_states.toggle_mute(conversation_key);
        let label = if mute_states.is_muted(conversation_key) {
            MuteLabel::Unmute
        } else {
            MuteLabel::Mute
        };
        button.set_label(label);
    }

    /// Asks the authority to clear every notification of the current user.
    pub async fn clear_all_notifications(&self) {
        if let Err(e) = self.status_bar.on_clear_all_notifications(self.current_user).await {
            error!("Failed to clear all notifications for user {}: {}", self.current_user, e);
        }
    }

    fn send_canned_reply(&self, record: &NotificationRecord, action: &InlineAction) -> ActionOutcome {
        let Some(remote_input) = action.remote_input() else {
            warn!("Cannot add canned reply to action without remote input on '{}'", record.key());
            return ActionOutcome::ReplySkipped;
        };
        let payload = ReplyPayload {
            result_key: remote_input.result_key.clone(),
            text: self.canned_reply_message.clone(),
        };
        let result = Self::send(action.pending_action().as_ref(), Some(&payload), record.key());
        if result.is_success() {
            self.feedback.show_toast(Toast::MessageSent);
        }
        ActionOutcome::Replied(result)
    }

    async fn acknowledge_click(&self, record: &NotificationRecord) -> Result<(), AuthorityError> {
        let visibility = NotificationVisibility::unranked(record.key());
        self.status_bar
            .on_notification_click(record.key(), visibility.clone())
            .await?;
        if record.auto_cancel() {
            self.status_bar
                .on_notification_clear(NotificationClearRequest::dismissed_from_shade(record, visibility))
                .await?;
        }
        Ok(())
    }

    fn send(action: &dyn PendingAction, reply: Option<&ReplyPayload>, key: &str) -> LaunchResult {
        match action.send(reply) {
            Ok(result) => result,
            Err(PendingActionError::Cancelled) => {
                warn!("Sending pending action for '{}' failed: token cancelled", key);
                LaunchResult::ABORTED
            }
        }
    }

    fn notify_click_callback(&self, result: LaunchResult) {
        if let Some(callback) = &self.click_callback {
            callback.on_notification_clicked(result);
        }
    }
}
