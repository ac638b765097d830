use thiserror::Error;

/// Failure of a call to the notification authority.
///
/// Acknowledgments are best-effort: callers log these and carry on.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthorityError {
    #[error("Notification authority is unavailable: {0}")]
    Unavailable(String),

    #[error("Remote call '{call}' failed: {reason}")]
    RemoteCall { call: String, reason: String },
}

/// Failure to invoke a deferred action token.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingActionError {
    #[error("Pending action was cancelled by its owner")]
    Cancelled,
}

/// Failure reported by the voice assistant integration.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AssistantError {
    #[error("Assistant is unavailable: {0}")]
    Unavailable(String),

    #[error("Assistant rejected the request: {0}")]
    Rejected(String),
}

/// Caller errors of the interaction dispatcher.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DispatchError {
    #[error("Action index {index} out of range for notification '{key}' with {len} actions")]
    ActionIndexOutOfRange { key: String, index: usize, len: usize },
}
