//! Local mirror of the live notification set.
//!
//! The store applies the authority's callbacks one at a time, keeps at most one
//! record per key in arrival order, and tells subscribers about every change
//! through a broadcast channel.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use novade_core::NotificationsConfig;
use tokio::sync::{broadcast, mpsc, RwLock, RwLockReadGuard};
use tracing::{debug, error, info, trace, warn};

use crate::authority::NotificationAuthority;
use crate::events::{AuthorityEvent, ListenerEvent};
use crate::heads_up::HeadsUpPolicy;
use crate::ranking::RankingSnapshot;
use crate::types::NotificationRecord;

pub struct NotificationStore {
    notifications: RwLock<Vec<NotificationRecord>>,
    ranking: RwLock<Arc<RankingSnapshot>>,
    initialized: AtomicBool,
    heads_up_policy: Option<Arc<dyn HeadsUpPolicy>>,
    event_publisher: broadcast::Sender<ListenerEvent>,
}

impl NotificationStore {
    /// Creates an empty, uninitialized store. Adds are ignored until the first
    /// successful [`reseed`](Self::reseed). A zero `event_capacity` is raised to one.
    pub fn new(event_capacity: usize) -> Self {
        let (event_publisher, _) = broadcast::channel(event_capacity.max(1));
        Self {
            notifications: RwLock::new(Vec::new()),
            ranking: RwLock::new(Arc::new(RankingSnapshot::new())),
            initialized: AtomicBool::new(false),
            heads_up_policy: None,
            event_publisher,
        }
    }

    /// Creates a store sized from a validated configuration.
    pub fn from_config(config: &NotificationsConfig) -> Self {
        Self::new(config.event_channel_capacity)
    }

    pub fn with_heads_up_policy(mut self, policy: Arc<dyn HeadsUpPolicy>) -> Self {
        self.heads_up_policy = Some(policy);
        self
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized.load(Ordering::SeqCst)
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ListenerEvent> {
        self.event_publisher.subscribe()
    }

    /// Read access to the live records in arrival order.
    ///
    /// This is a view, not a copy: hold the guard only briefly, updates wait for it.
    pub async fn current_notifications(&self) -> RwLockReadGuard<'_, Vec<NotificationRecord>> {
        self.notifications.read().await
    }

    pub async fn current_ranking(&self) -> Arc<RankingSnapshot> {
        Arc::clone(&*self.ranking.read().await)
    }

    pub async fn notification(&self, key: &str) -> Option<NotificationRecord> {
        self.notifications.read().await.iter().find(|r| r.key() == key).cloned()
    }

    /// Replaces the whole state with the authority's active set.
    ///
    /// Later duplicates of a key win, at the position of their last occurrence.
    pub async fn reseed(&self, records: Vec<NotificationRecord>, ranking: RankingSnapshot) {
        let mut deduped: Vec<NotificationRecord> = Vec::with_capacity(records.len());
        for record in records {
            deduped.retain(|existing| !existing.is_same_notification(&record));
            deduped.push(record);
        }
        let count = deduped.len();
        *self.notifications.write().await = deduped;
        *self.ranking.write().await = Arc::new(ranking);
        self.initialized.store(true, Ordering::SeqCst);
        info!("Notification store seeded with {} active notifications", count);
        self.publish_event(ListenerEvent::NotificationsChanged);
    }

    /// Seeds the store from `authority` after the listener connected.
    pub async fn on_listener_connected(&self, authority: &dyn NotificationAuthority) {
        info!("Notification listener connected");
        let fetched = match authority.active_notifications().await {
            Ok(records) => authority.current_ranking().await.map(|ranking| (records, ranking)),
            Err(e) => Err(e),
        };
        match fetched {
            Ok((records, ranking)) => self.reseed(records, ranking).await,
            Err(e) => {
                error!("Failed to fetch active notifications: {}", e);
                self.notifications.write().await.clear();
                *self.ranking.write().await = Arc::new(RankingSnapshot::new());
                self.initialized.store(false, Ordering::SeqCst);
                self.publish_event(ListenerEvent::NotificationsChanged);
            }
        }
    }

    pub fn on_listener_disconnected(&self) {
        info!("Notification listener disconnected");
    }

    /// Applies a posted (or re-posted) notification.
    pub async fn apply_add(&self, record: NotificationRecord, ranking: Option<RankingSnapshot>) {
        if !self.is_initialized() {
            debug!("Ignoring notification '{}' posted before the store was seeded", record.key());
            return;
        }

        {
            let mut notifications = self.notifications.write().await;
            notifications.retain(|existing| !existing.is_same_notification(&record));
            notifications.push(record.clone());
        }
        let ranking = match ranking {
            Some(ranking) => {
                let ranking = Arc::new(ranking);
                *self.ranking.write().await = Arc::clone(&ranking);
                ranking
            }
            None => self.current_ranking().await,
        };
        debug!("Notification '{}' added", record.key());

        if let Some(policy) = &self.heads_up_policy {
            policy.maybe_show_heads_up(&record, &ranking);
        }
        self.publish_event(ListenerEvent::NotificationAdded(record));
    }

    /// Removes the notification with `key`. Unknown keys only trigger the change event.
    pub async fn apply_remove(&self, key: &str) {
        let removed = {
            let mut notifications = self.notifications.write().await;
            let before = notifications.len();
            notifications.retain(|existing| existing.key() != key);
            before != notifications.len()
        };

        if removed {
            debug!("Notification '{}' removed", key);
            if let Some(policy) = &self.heads_up_policy {
                policy.on_notification_removed(key);
            }
        } else {
            trace!("Removal of unknown notification '{}'", key);
        }
        self.publish_event(ListenerEvent::NotificationsChanged);
    }

    /// Replaces the ranking and copies override group keys onto the ranked records.
    pub async fn apply_ranking_update(&self, snapshot: RankingSnapshot) {
        let snapshot = Arc::new(snapshot);
        *self.ranking.write().await = Arc::clone(&snapshot);

        let mut updated = 0usize;
        {
            let mut notifications = self.notifications.write().await;
            for record in notifications.iter_mut() {
                let Some(ranking) = snapshot.ranking(record.key()) else {
                    continue;
                };
                if record.override_group_key() != ranking.override_group_key.as_deref() {
                    record.set_override_group_key(ranking.override_group_key.clone());
                    updated += 1;
                }
            }
        }
        debug!("Ranking updated ({} entries, {} group keys changed)", snapshot.len(), updated);
        self.publish_event(ListenerEvent::NotificationsChanged);
    }

    /// Applies one inbound authority event.
    pub async fn apply(&self, event: AuthorityEvent) {
        match event {
            AuthorityEvent::Connected { records, ranking } => {
                info!("Notification listener connected");
                self.reseed(records, ranking).await;
            }
            AuthorityEvent::Posted { record, ranking } => self.apply_add(record, ranking).await,
            AuthorityEvent::Removed { key } => self.apply_remove(&key).await,
            AuthorityEvent::RankingUpdate(snapshot) => self.apply_ranking_update(snapshot).await,
            AuthorityEvent::Disconnected => self.on_listener_disconnected(),
        }
    }

    fn publish_event(&self, event: ListenerEvent) {
        if let Err(e) = self.event_publisher.send(event) {
            trace!("No subscribers for listener event: {:?}", e.0);
        }
    }
}

impl std::fmt::Debug for NotificationStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotificationStore")
            .field("initialized", &self.is_initialized())
            .field("has_heads_up_policy", &self.heads_up_policy.is_some())
            .field("subscribers", &self.event_publisher.receiver_count())
            .finish()
    }
}

/// Applies authority events in arrival order until the sending side closes.
pub async fn run_authority_events(store: Arc<NotificationStore>, mut events: mpsc::Receiver<AuthorityEvent>) {
    while let Some(event) = events.recv().await {
        store.apply(event).await;
    }
    warn!("Authority event stream closed");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AuthorityError;
    use crate::ranking::Ranking;
    use async_trait::async_trait;
    use mockall::mock;
    use pretty_assertions::assert_eq;
    use std::sync::Mutex;
    use tokio::sync::broadcast::error::TryRecvError;

    mock! {
        Authority {}

        #[async_trait]
        impl NotificationAuthority for Authority {
            async fn active_notifications(&self) -> Result<Vec<NotificationRecord>, AuthorityError>;
            async fn current_ranking(&self) -> Result<RankingSnapshot, AuthorityError>;
        }
    }

    #[derive(Default)]
    struct RecordingPolicy {
        shown: Mutex<Vec<String>>,
        removed: Mutex<Vec<String>>,
    }

    impl HeadsUpPolicy for RecordingPolicy {
        fn maybe_show_heads_up(&self, record: &NotificationRecord, _ranking: &RankingSnapshot) {
            self.shown.lock().unwrap().push(record.key().to_string());
        }

        fn on_notification_removed(&self, key: &str) {
            self.removed.lock().unwrap().push(key.to_string());
        }
    }

    fn record(key: &str) -> NotificationRecord {
        NotificationRecord::new(key, "com.example", 1)
    }

    async fn keys(store: &NotificationStore) -> Vec<String> {
        store.current_notifications().await.iter().map(|r| r.key().to_string()).collect()
    }

    async fn seeded(keys: &[&str]) -> NotificationStore {
        let store = NotificationStore::new(16);
        store.reseed(keys.iter().map(|k| record(k)).collect(), RankingSnapshot::new()).await;
        store
    }

    #[tokio::test]
    async fn add_before_seed_is_ignored() {
        let store = NotificationStore::new(16);
        let mut rx = store.subscribe();
        store.apply_add(record("a"), None).await;
        assert!(keys(&store).await.is_empty());
        assert!(matches!(rx.try_recv(), Err(TryRecvError::Empty)));
    }

    #[tokio::test]
    async fn zero_capacity_store_still_publishes() {
        let store = NotificationStore::new(0);
        let mut rx = store.subscribe();
        store.reseed(Vec::new(), RankingSnapshot::new()).await;
        assert!(matches!(rx.try_recv(), Ok(ListenerEvent::NotificationsChanged)));

        store.apply_add(record("a"), None).await;
        assert!(matches!(rx.try_recv(), Ok(ListenerEvent::NotificationAdded(r)) if r.key() == "a"));
        assert_eq!(keys(&store).await, vec!["a"]);
    }

    #[tokio::test]
    async fn reseed_dedups_keeping_last_occurrence() {
        let store = NotificationStore::new(16);
        let records = vec![
            record("a"),
            record("b"),
            NotificationRecord::new("a", "com.example", 2),
        ];
        store.reseed(records, RankingSnapshot::new()).await;
        assert!(store.is_initialized());
        assert_eq!(keys(&store).await, vec!["b", "a"]);
        assert_eq!(store.notification("a").await.map(|r| r.id()), Some(2));
    }

    #[tokio::test]
    async fn repost_moves_record_to_end() {
        let store = seeded(&["a", "b", "c"]).await;
        let mut rx = store.subscribe();
        store.apply_add(record("a"), None).await;

        assert_eq!(keys(&store).await, vec!["b", "c", "a"]);
        match rx.try_recv() {
            Ok(ListenerEvent::NotificationAdded(r)) => assert_eq!(r.key(), "a"),
            other => panic!("unexpected event: {:?}", other),
        }
        assert!(matches!(rx.try_recv(), Err(TryRecvError::Empty)));
    }

    #[tokio::test]
    async fn add_replaces_ranking_only_when_given() {
        let store = seeded(&[]).await;
        let snapshot: RankingSnapshot = vec![Ranking::new("a", 0)].into_iter().collect();
        store.apply_add(record("a"), Some(snapshot.clone())).await;
        assert_eq!(*store.current_ranking().await, snapshot);

        store.apply_add(record("b"), None).await;
        assert_eq!(*store.current_ranking().await, snapshot);
    }

    #[tokio::test]
    async fn remove_unknown_key_still_notifies_once() {
        let store = seeded(&["a"]).await;
        let mut rx = store.subscribe();
        store.apply_remove("zzz").await;
        assert_eq!(keys(&store).await, vec!["a"]);
        assert!(matches!(rx.try_recv(), Ok(ListenerEvent::NotificationsChanged)));
        assert!(matches!(rx.try_recv(), Err(TryRecvError::Empty)));
    }

    #[tokio::test]
    async fn heads_up_policy_sees_posts_and_removals() {
        let policy = Arc::new(RecordingPolicy::default());
        let store = NotificationStore::new(16).with_heads_up_policy(policy.clone());
        store.reseed(Vec::new(), RankingSnapshot::new()).await;

        store.apply_add(record("a"), None).await;
        store.apply_add(record("a"), None).await;
        store.apply_remove("a").await;
        store.apply_remove("a").await;

        assert_eq!(*policy.shown.lock().unwrap(), vec!["a", "a"]);
        assert_eq!(*policy.removed.lock().unwrap(), vec!["a"]);
    }

    #[tokio::test]
    async fn ranking_update_only_touches_ranked_records() {
        let store = NotificationStore::new(16);
        store
            .reseed(
                vec![record("a"), record("b").with_override_group_key("old")],
                RankingSnapshot::new(),
            )
            .await;
        let mut rx = store.subscribe();

        let snapshot: RankingSnapshot = vec![Ranking::new("a", 0).with_override_group_key("G")].into_iter().collect();
        store.apply_ranking_update(snapshot).await;

        assert_eq!(store.notification("a").await.unwrap().override_group_key(), Some("G"));
        assert_eq!(store.notification("b").await.unwrap().override_group_key(), Some("old"));
        assert!(matches!(rx.try_recv(), Ok(ListenerEvent::NotificationsChanged)));
        assert!(matches!(rx.try_recv(), Err(TryRecvError::Empty)));
    }

    #[tokio::test]
    async fn ranking_without_group_key_clears_it() {
        let store = NotificationStore::new(16);
        store
            .reseed(vec![record("a").with_override_group_key("old")], RankingSnapshot::new())
            .await;
        store
            .apply_ranking_update(vec![Ranking::new("a", 0)].into_iter().collect())
            .await;
        assert_eq!(store.notification("a").await.unwrap().override_group_key(), None);
    }

    #[tokio::test]
    async fn connect_seeds_from_authority() {
        let mut authority = MockAuthority::new();
        authority
            .expect_active_notifications()
            .times(1)
            .returning(|| Ok(vec![record("a"), record("b")]));
        authority
            .expect_current_ranking()
            .times(1)
            .returning(|| Ok(vec![Ranking::new("a", 1), Ranking::new("b", 0)].into_iter().collect()));

        let store = NotificationStore::new(16);
        store.on_listener_connected(&authority).await;
        assert!(store.is_initialized());
        assert_eq!(keys(&store).await, vec!["a", "b"]);
        assert_eq!(store.current_ranking().await.ordered_keys(), vec!["b", "a"]);
    }

    #[tokio::test]
    async fn failed_connect_leaves_store_empty_and_uninitialized() {
        let mut authority = MockAuthority::new();
        authority
            .expect_active_notifications()
            .times(1)
            .returning(|| Err(AuthorityError::Unavailable("service not bound".to_string())));
        authority.expect_current_ranking().never();

        let store = seeded(&["stale"]).await;
        store.on_listener_connected(&authority).await;
        assert!(!store.is_initialized());
        assert!(keys(&store).await.is_empty());

        store.apply_add(record("a"), None).await;
        assert!(keys(&store).await.is_empty());
    }

    #[tokio::test]
    async fn event_stream_is_applied_in_order() {
        let store = Arc::new(NotificationStore::new(16));
        let (tx, rx) = mpsc::channel(8);
        let runner = tokio::spawn(run_authority_events(Arc::clone(&store), rx));

        tx.send(AuthorityEvent::Connected { records: vec![record("a")], ranking: RankingSnapshot::new() })
            .await
            .unwrap();
        tx.send(AuthorityEvent::Posted { record: record("b"), ranking: None }).await.unwrap();
        tx.send(AuthorityEvent::Removed { key: "a".to_string() }).await.unwrap();
        tx.send(AuthorityEvent::Disconnected).await.unwrap();
        drop(tx);
        runner.await.unwrap();

        assert_eq!(keys(&store).await, vec!["b"]);
    }
}
