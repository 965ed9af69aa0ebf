use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use vectorkit_designer::coalescer::{Priority, UpdateCoalescer};
use vectorkit_settings::CoalescerSettings;

type Log = Arc<Mutex<Vec<String>>>;

fn push(log: &Log, entry: &str) -> impl FnOnce() + Send + 'static {
    let log = Arc::clone(log);
    let entry = entry.to_string();
    move || log.lock().push(entry)
}

/// Long enough for a default 16ms frame to have fired.
async fn wait_past_frame() {
    tokio::time::sleep(Duration::from_millis(80)).await;
}

#[tokio::test]
async fn test_high_priority_runs_first() {
    let coalescer = UpdateCoalescer::new(CoalescerSettings::default());
    let log: Log = Arc::default();

    coalescer.enqueue(push(&log, "n1"), Priority::Normal);
    coalescer.enqueue(push(&log, "h1"), Priority::High);
    coalescer.enqueue(push(&log, "n2"), Priority::Normal);
    coalescer.enqueue(push(&log, "h2"), Priority::High);
    assert_eq!(coalescer.pending(), 4);

    coalescer.flush().await;
    assert_eq!(*log.lock(), vec!["h1", "h2", "n1", "n2"]);
    assert_eq!(coalescer.pending(), 0);
    assert!(!coalescer.is_scheduled());
}

#[tokio::test]
async fn test_scheduled_flush_runs_after_frame() {
    let coalescer = UpdateCoalescer::new(CoalescerSettings::default());
    let log: Log = Arc::default();

    coalescer.enqueue(push(&log, "a"), Priority::Normal);
    coalescer.enqueue(push(&log, "b"), Priority::Normal);
    assert!(coalescer.is_scheduled());
    assert!(log.lock().is_empty());

    wait_past_frame().await;
    assert_eq!(*log.lock(), vec!["a", "b"]);
    assert!(!coalescer.is_scheduled());

    // The next enqueue schedules a fresh frame.
    coalescer.enqueue(push(&log, "c"), Priority::High);
    assert!(coalescer.is_scheduled());
    wait_past_frame().await;
    assert_eq!(log.lock().len(), 3);
}

#[tokio::test]
async fn test_flush_with_nothing_pending() {
    let coalescer = UpdateCoalescer::new(CoalescerSettings::default());
    coalescer.flush().await;
    assert_eq!(coalescer.pending(), 0);
}

#[tokio::test]
async fn test_clear_drops_pending_updates() {
    let coalescer = UpdateCoalescer::new(CoalescerSettings::default());
    let log: Log = Arc::default();

    coalescer.enqueue(push(&log, "dropped"), Priority::High);
    coalescer.clear();
    assert_eq!(coalescer.pending(), 0);
    assert!(!coalescer.is_scheduled());

    wait_past_frame().await;
    assert!(log.lock().is_empty());
}

#[tokio::test]
async fn test_drop_discards_pending_updates() {
    let log: Log = Arc::default();
    {
        let coalescer = UpdateCoalescer::new(CoalescerSettings::default());
        coalescer.enqueue(push(&log, "dropped"), Priority::Normal);
    }
    wait_past_frame().await;
    assert!(log.lock().is_empty());
}

#[tokio::test]
async fn test_large_queue_is_flushed_in_batches() {
    let coalescer = UpdateCoalescer::new(CoalescerSettings::default());
    let order = Arc::new(Mutex::new(Vec::new()));
    let high_runs = Arc::new(AtomicUsize::new(0));

    for i in 0..250usize {
        let order = Arc::clone(&order);
        coalescer.enqueue(move || order.lock().push(i), Priority::Normal);
    }
    let counter = Arc::clone(&high_runs);
    coalescer.enqueue(
        move || {
            counter.fetch_add(1, Ordering::SeqCst);
        },
        Priority::High,
    );

    coalescer.flush().await;
    assert_eq!(high_runs.load(Ordering::SeqCst), 1);
    assert_eq!(*order.lock(), (0..250).collect::<Vec<_>>());
}

#[tokio::test]
async fn test_large_queue_yields_between_batches() {
    let coalescer = UpdateCoalescer::new(CoalescerSettings::default());
    let order = Arc::new(Mutex::new(Vec::new()));
    for i in 0..250usize {
        let order = Arc::clone(&order);
        coalescer.enqueue(move || order.lock().push(i), Priority::Normal);
    }

    // Records how far the flush got when another task first got a turn.
    let seen_at = Arc::new(Mutex::new(None));
    let observer = tokio::spawn({
        let order = Arc::clone(&order);
        let seen_at = Arc::clone(&seen_at);
        async move {
            *seen_at.lock() = Some(order.lock().len());
        }
    });

    coalescer.flush().await;
    observer.await.unwrap();
    assert_eq!(*seen_at.lock(), Some(50));
    assert_eq!(order.lock().len(), 250);
}
