//! Frame-based update coalescing.
//!
//! Mutations produced while a gesture or chunked transform is running are
//! queued here and applied together once per frame instead of one by one.

use std::sync::Arc;

use parking_lot::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, trace};
use vectorkit_core::Callback;
use vectorkit_settings::CoalescerSettings;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Priority {
    /// Flushed before any normal update.
    High,
    #[default]
    Normal,
}

#[derive(Default)]
struct Pending {
    high: Vec<Callback>,
    normal: Vec<Callback>,
    scheduled: Option<JoinHandle<()>>,
}

impl Pending {
    fn len(&self) -> usize {
        self.high.len() + self.normal.len()
    }
}

/// Queues deferred callbacks and runs them on the next frame tick.
///
/// Must be used from within a tokio runtime; the first enqueue after a
/// flush spawns the frame task.
pub struct UpdateCoalescer {
    inner: Arc<Mutex<Pending>>,
    settings: CoalescerSettings,
}

impl UpdateCoalescer {
    pub fn new(settings: CoalescerSettings) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Pending::default())),
            settings,
        }
    }

    /// Records `update` and schedules a flush if none is pending.
    pub fn enqueue(&self, update: impl FnOnce() + Send + 'static, priority: Priority) {
        let mut pending = self.inner.lock();
        match priority {
            Priority::High => pending.high.push(Box::new(update)),
            Priority::Normal => pending.normal.push(Box::new(update)),
        }

        if pending.scheduled.is_none() {
            let inner = Arc::clone(&self.inner);
            let settings = self.settings.clone();
            pending.scheduled = Some(tokio::spawn(async move {
                tokio::time::sleep(settings.frame_interval()).await;
                run_flush(&inner, &settings).await;
            }));
        }
    }

    /// Flushes immediately instead of waiting for the frame tick.
    pub async fn flush(&self) {
        let scheduled = self.inner.lock().scheduled.take();
        if let Some(handle) = scheduled {
            handle.abort();
        }
        run_flush(&self.inner, &self.settings).await;
    }

    /// Aborts the scheduled flush and drops every pending callback.
    pub fn clear(&self) {
        let mut pending = self.inner.lock();
        if let Some(handle) = pending.scheduled.take() {
            handle.abort();
        }
        let dropped = pending.len();
        pending.high.clear();
        pending.normal.clear();
        if dropped > 0 {
            debug!(dropped, "Cleared pending updates");
        }
    }

    pub fn pending(&self) -> usize {
        self.inner.lock().len()
    }

    pub fn is_scheduled(&self) -> bool {
        self.inner.lock().scheduled.is_some()
    }
}

impl Drop for UpdateCoalescer {
    fn drop(&mut self) {
        self.clear();
    }
}

/// Takes everything queued and runs it outside the lock.
async fn run_flush(inner: &Mutex<Pending>, settings: &CoalescerSettings) {
    let (high, normal) = {
        let mut pending = inner.lock();
        pending.scheduled = None;
        (
            std::mem::take(&mut pending.high),
            std::mem::take(&mut pending.normal),
        )
    };

    if high.is_empty() && normal.is_empty() {
        return;
    }
    trace!(high = high.len(), normal = normal.len(), "Flushing updates");

    for update in high {
        update();
    }

    if normal.len() > settings.batch_threshold {
        let batch_size = settings.batch_size.max(1);
        let mut remaining = normal.into_iter().peekable();
        while remaining.peek().is_some() {
            for update in remaining.by_ref().take(batch_size) {
                update();
            }
            if remaining.peek().is_some() {
                tokio::task::yield_now().await;
            }
        }
    } else {
        for update in normal {
            update();
        }
    }
}
