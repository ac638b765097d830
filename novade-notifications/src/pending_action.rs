//! Deferred action tokens.
//!
//! A [`PendingAction`] is an opaque, revocable handle to an action an application
//! registered ahead of time. Sending it runs that action in the owning
//! application; the dispatcher only observes the immediate [`LaunchResult`].

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::PendingActionError;

/// Result code of a deferred action invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LaunchResult(i32);

impl LaunchResult {
    pub const SUCCESS: LaunchResult = LaunchResult(0);
    /// The token was cancelled or the launch was refused.
    pub const ABORTED: LaunchResult = LaunchResult(102);

    pub const fn from_code(code: i32) -> Self {
        LaunchResult(code)
    }

    pub const fn code(self) -> i32 {
        self.0
    }

    pub fn is_success(self) -> bool {
        self == Self::SUCCESS
    }

    pub fn is_aborted(self) -> bool {
        self == Self::ABORTED
    }
}

impl fmt::Display for LaunchResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::SUCCESS => write!(f, "success"),
            Self::ABORTED => write!(f, "aborted"),
            LaunchResult(code) => write!(f, "code {}", code),
        }
    }
}

/// Reply text handed back to the application through an action's remote input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplyPayload {
    pub result_key: String,
    pub text: String,
}

/// An action token owned by the application that posted the notification.
pub trait PendingAction: Send + Sync + fmt::Debug {
    /// Invokes the action, optionally attaching a reply.
    ///
    /// Returns [`PendingActionError::Cancelled`] when the owner revoked the token.
    fn send(&self, reply: Option<&ReplyPayload>) -> Result<LaunchResult, PendingActionError>;
}
