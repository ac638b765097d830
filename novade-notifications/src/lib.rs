//! # NovaDE Notifications (`novade-notifications`)
//!
//! Core of the notification listener:
//!
//! - [`NotificationStore`] mirrors the authority's live notification set and
//!   ranking, and broadcasts [`ListenerEvent`]s to in-process consumers.
//! - [`heads_up`] holds the per-alert [`HeadsUpEntry`] with its cancellable
//!   dismissal timer, and a [`HeadsUpRegistry`] owning the live entries.
//! - [`InteractionDispatcher`] turns taps, inline actions, play and mute
//!   requests into deferred action invocations and authority acknowledgments.
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use novade_core::ConfigLoader;
//! use novade_notifications::{HeadsUpRegistry, NotificationStore, SystemClock};
//!
//! let config = ConfigLoader::load()?;
//! let registry = Arc::new(HeadsUpRegistry::from_config(&config.heads_up, Arc::new(SystemClock)));
//! let store = Arc::new(NotificationStore::from_config(&config).with_heads_up_policy(registry.clone()));
//! let (tx, rx) = tokio::sync::mpsc::channel(config.event_channel_capacity);
//! tokio::spawn(novade_notifications::run_authority_events(store.clone(), rx));
//! ```

pub mod assist;
pub mod authority;
pub mod dispatcher;
pub mod error;
pub mod events;
pub mod heads_up;
pub mod mute;
pub mod pending_action;
pub mod ranking;
pub mod store;
pub mod types;

pub use assist::{is_assistant_compatible_messaging, AssistantClient, AssistantResult};
pub use authority::{
    DismissalSentiment, DismissalSurface, NotificationAuthority, NotificationClearRequest, NotificationVisibility,
    StatusBarService,
};
pub use dispatcher::{ActionOutcome, ClickCallback, FeedbackPresenter, InteractionDispatcher, Toast};
pub use error::{AssistantError, AuthorityError, DispatchError, PendingActionError};
pub use events::{AuthorityEvent, ListenerEvent};
pub use heads_up::{
    Clock, DismissTimer, HeadsUpController, HeadsUpEntry, HeadsUpPolicy, HeadsUpRegistry, ScheduledDismissal,
    ShowOutcome, SystemClock,
};
pub use mute::{InMemoryMuteStates, MuteAffordance, MuteLabel, MuteStateManager};
pub use pending_action::{LaunchResult, PendingAction, ReplyPayload};
pub use ranking::{Ranking, RankingSnapshot};
pub use store::{run_authority_events, NotificationStore};
pub use types::{
    InlineAction, NotificationFlags, NotificationRecord, NotificationStyle, RemoteInput, SemanticAction, UserId,
};
