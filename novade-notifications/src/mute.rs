//! Conversation mute state.

use std::collections::HashSet;
use std::sync::{Mutex, PoisonError};

use tracing::debug;

/// Tracks which conversations are muted.
pub trait MuteStateManager: Send + Sync {
    fn toggle_mute(&self, conversation_key: &str);

    fn is_muted(&self, conversation_key: &str) -> bool;
}

/// Label shown on a mute button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MuteLabel {
    Mute,
    Unmute,
}

impl MuteLabel {
    pub fn text(self) -> &'static str {
        match self {
            MuteLabel::Mute => "Mute",
            MuteLabel::Unmute => "Unmute",
        }
    }
}

/// The on-screen mute button of a notification.
pub trait MuteAffordance: Send + Sync {
    fn set_label(&self, label: MuteLabel);
}

/// [`MuteStateManager`] kept in memory for the lifetime of the process.
#[derive(Debug, Default)]
pub struct InMemoryMuteStates {
    muted: Mutex<HashSet<String>>,
}

impl InMemoryMuteStates {
    pub fn new() -> Self {
        Self::default()
    }
}

impl MuteStateManager for InMemoryMuteStates {
    fn toggle_mute(&self, conversation_key: &str) {
        let mut muted = self.muted.lock().unwrap_or_else(PoisonError::into_inner);
        if !muted.remove(conversation_key) {
            muted.insert(conversation_key.to_string());
        }
        debug!("Conversation '{}' muted: {}", conversation_key, muted.contains(conversation_key));
    }

    fn is_muted(&self, conversation_key: &str) -> bool {
        self.muted
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(conversation_key)
    }
}
