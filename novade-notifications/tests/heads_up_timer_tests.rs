use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use novade_notifications::{HeadsUpEntry, HeadsUpRegistry, NotificationRecord, ShowOutcome, SystemClock};

fn record(key: &str) -> NotificationRecord {
    NotificationRecord::new(key, "com.example", 1)
}

#[tokio::test(start_paused = true)]
async fn cancelled_then_fired_directly_is_a_safe_no_op() {
    let entry = Arc::new(Mutex::new(Some(HeadsUpEntry::new(&record("A"), Arc::new(SystemClock)))));
    let mutations = Arc::new(AtomicUsize::new(0));

    let scheduled = {
        let target = Arc::clone(&entry);
        let count = Arc::clone(&mutations);
        let guard = entry.lock().unwrap();
        guard.as_ref().unwrap().schedule_dismissal(Duration::from_secs(8), move || {
            count.fetch_add(1, Ordering::SeqCst);
            target.lock().unwrap().take();
        })
    };

    assert!(entry.lock().unwrap().as_ref().unwrap().timer().cancel());
    assert!(!scheduled.fire());

    tokio::time::sleep(Duration::from_secs(10)).await;
    assert_eq!(mutations.load(Ordering::SeqCst), 0);
    assert!(entry.lock().unwrap().is_some());
}

#[tokio::test(start_paused = true)]
async fn fired_timer_runs_once_even_if_fired_again() {
    let entry = HeadsUpEntry::new(&record("A"), Arc::new(SystemClock));
    let count = Arc::new(AtomicUsize::new(0));
    let inner = Arc::clone(&count);
    let scheduled = entry.schedule_dismissal(Duration::from_secs(1), move || {
        inner.fetch_add(1, Ordering::SeqCst);
    });

    tokio::time::sleep(Duration::from_secs(2)).await;
    assert!(!scheduled.fire());
    assert_eq!(count.load(Ordering::SeqCst), 1);
    assert!(!entry.timer().is_pending());
}

#[tokio::test(start_paused = true)]
async fn realert_keeps_entry_and_refreshes_post_time() {
    let registry = HeadsUpRegistry::new(Arc::new(SystemClock), Duration::from_secs(8));
    assert_eq!(registry.show(&record("A"), |_| {}), ShowOutcome::New);
    let first_post = registry.with_entry("A", |e| e.post_time()).unwrap();

    tokio::time::sleep(Duration::from_secs(3)).await;
    assert_eq!(registry.show(&record("A"), |_| {}), ShowOutcome::AlertingAgain);

    let (is_new, alerting_again, post_time) = registry
        .with_entry("A", |e| (e.is_new(), e.is_alerting_again(), e.post_time()))
        .unwrap();
    assert!(!is_new);
    assert!(alerting_again);
    assert!(post_time >= first_post);
    assert_eq!(registry.len(), 1);
}

#[tokio::test(start_paused = true)]
async fn timeout_only_dismisses_its_own_entry() {
    let registry = HeadsUpRegistry::new(Arc::new(SystemClock), Duration::from_secs(5));
    let dismissed = Arc::new(Mutex::new(Vec::new()));

    let sink = Arc::clone(&dismissed);
    registry.show(&record("A"), move |key| sink.lock().unwrap().push(key));
    tokio::time::sleep(Duration::from_secs(3)).await;
    let sink = Arc::clone(&dismissed);
    registry.show(&record("B"), move |key| sink.lock().unwrap().push(key));

    tokio::time::sleep(Duration::from_secs(3)).await;
    assert!(!registry.contains("A"));
    assert!(registry.contains("B"));

    tokio::time::sleep(Duration::from_secs(3)).await;
    assert!(registry.is_empty());
    assert_eq!(*dismissed.lock().unwrap(), vec!["A".to_string(), "B".to_string()]);
}
