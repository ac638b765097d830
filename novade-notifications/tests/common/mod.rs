#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use novade_notifications::{
    AuthorityError, ClickCallback, FeedbackPresenter, InlineAction, LaunchResult, NotificationClearRequest,
    NotificationVisibility, PendingAction, PendingActionError, ReplyPayload, StatusBarService, Toast, UserId,
};

/// Acknowledgment recorded by [`RecordingStatusBar`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Ack {
    Click { key: String, visibility: NotificationVisibility },
    Clear(NotificationClearRequest),
    Action { key: String, index: usize, semantic: String, generated_by_assistant: bool },
    ClearAll(UserId),
}

#[derive(Default)]
pub struct RecordingStatusBar {
    acks: Mutex<Vec<Ack>>,
}

impl RecordingStatusBar {
    pub fn acks(&self) -> Vec<Ack> {
        self.acks.lock().unwrap().clone()
    }
}

#[async_trait]
impl StatusBarService for RecordingStatusBar {
    async fn on_notification_click(&self, key: &str, visibility: NotificationVisibility) -> Result<(), AuthorityError> {
        self.acks.lock().unwrap().push(Ack::Click { key: key.to_string(), visibility });
        Ok(())
    }

    async fn on_notification_clear(&self, request: NotificationClearRequest) -> Result<(), AuthorityError> {
        self.acks.lock().unwrap().push(Ack::Clear(request));
        Ok(())
    }

    async fn on_notification_action_click(
        &self,
        key: &str,
        action_index: usize,
        action: &InlineAction,
        _visibility: NotificationVisibility,
        generated_by_assistant: bool,
    ) -> Result<(), AuthorityError> {
        self.acks.lock().unwrap().push(Ack::Action {
            key: key.to_string(),
            index: action_index,
            semantic: action.semantic_action().to_string(),
            generated_by_assistant,
        });
        Ok(())
    }

    async fn on_clear_all_notifications(&self, user_id: UserId) -> Result<(), AuthorityError> {
        self.acks.lock().unwrap().push(Ack::ClearAll(user_id));
        Ok(())
    }
}

/// Pending action returning a fixed result and recording every payload it got.
#[derive(Debug)]
pub struct RecordingAction {
    result: Result<LaunchResult, PendingActionError>,
    sent: Mutex<Vec<Option<ReplyPayload>>>,
}

impl RecordingAction {
    pub fn succeeding() -> Arc<Self> {
        Self::with_result(Ok(LaunchResult::SUCCESS))
    }

    pub fn cancelled() -> Arc<Self> {
        Self::with_result(Err(PendingActionError::Cancelled))
    }

    pub fn with_result(result: Result<LaunchResult, PendingActionError>) -> Arc<Self> {
        Arc::new(Self { result, sent: Mutex::new(Vec::new()) })
    }

    pub fn sent(&self) -> Vec<Option<ReplyPayload>> {
        self.sent.lock().unwrap().clone()
    }
}

impl PendingAction for RecordingAction {
    fn send(&self, reply: Option<&ReplyPayload>) -> Result<LaunchResult, PendingActionError> {
        self.sent.lock().unwrap().push(reply.cloned());
        self.result
    }
}

#[derive(Default)]
pub struct RecordingShade {
    results: Mutex<Vec<LaunchResult>>,
    toasts: Mutex<Vec<Toast>>,
}

impl RecordingShade {
    pub fn results(&self) -> Vec<LaunchResult> {
        self.results.lock().unwrap().clone()
    }

    pub fn toasts(&self) -> Vec<Toast> {
        self.toasts.lock().unwrap().clone()
    }
}

impl ClickCallback for RecordingShade {
    fn on_notification_clicked(&self, result: LaunchResult) {
        self.results.lock().unwrap().push(result);
    }
}

impl FeedbackPresenter for RecordingShade {
    fn show_toast(&self, toast: Toast) {
        self.toasts.lock().unwrap().push(toast);
    }
}
