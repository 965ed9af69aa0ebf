//! Multi-selection transform flow.
//!
//! When a transform gesture ends, the final group transform is mapped onto
//! every selected element through the chunked scheduler, the resulting
//! updates are committed to the store on the next frame, and the
//! rendering host resets its manipulator so the committed geometry is what
//! gets drawn.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};
use vectorkit_core::{AttachError, Error, ProgressCallback, Result, ThreadSafe};
use vectorkit_settings::{AttachSettings, EditorConfig};

use crate::coalescer::{Priority, UpdateCoalescer};
use crate::geometry::{group_bounds, GroupTransform};
use crate::model::{Element, ElementId};
use crate::scheduler::{transform_all, ChunkedTransformer};
use crate::store::EditorStore;

/// The rendering side of a transform gesture.
pub trait TransformHost: Send + Sync {
    /// How many of `ids` currently have a mounted node.
    fn mounted_nodes(&self, ids: &[ElementId]) -> usize;

    /// Clears the manipulator's own scale/rotation after a commit.
    fn reset_transform(&self);
}

/// Runs `attempt` up to `attempts` times, sleeping `base_delay`, then twice
/// that, and so on between failures. Returns the last error on exhaustion.
pub async fn retry_with_backoff<T, E, F, Fut>(
    attempts: u32,
    base_delay: Duration,
    mut attempt: F,
) -> std::result::Result<T, E>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = std::result::Result<T, E>>,
{
    let attempts = attempts.max(1);
    let mut delay = base_delay;
    let mut n = 1;
    loop {
        match attempt(n).await {
            Ok(value) => return Ok(value),
            Err(err) if n >= attempts => return Err(err),
            Err(_) => {
                tokio::time::sleep(delay).await;
                delay = delay.saturating_mul(2);
                n += 1;
            }
        }
    }
}

pub struct SelectionTransformer {
    store: ThreadSafe<EditorStore>,
    scheduler: ChunkedTransformer,
    coalescer: UpdateCoalescer,
    attach: AttachSettings,
}

impl SelectionTransformer {
    pub fn new(store: ThreadSafe<EditorStore>, config: &EditorConfig) -> Self {
        Self {
            store,
            scheduler: ChunkedTransformer::new(config.scheduler.clone()),
            coalescer: UpdateCoalescer::new(config.coalescer.clone()),
            attach: config.attach.clone(),
        }
    }

    pub fn store(&self) -> &ThreadSafe<EditorStore> {
        &self.store
    }

    pub fn is_processing(&self) -> bool {
        self.scheduler.is_processing()
    }

    fn selected(&self) -> Vec<Element> {
        let snapshot = self.store.lock().snapshot();
        snapshot.selected_elements().cloned().collect()
    }

    /// Waits for the host to mount a node for every selected element.
    ///
    /// Returns the node count, or [`AttachError::NodesMissing`] after the
    /// configured number of attempts.
    pub async fn attach_selection(&self, host: &dyn TransformHost) -> Result<usize> {
        let ids: Vec<ElementId> = self.selected().into_iter().map(|el| el.id).collect();
        let expected = ids.len();
        let attempts = self.attach.attempts.max(1);

        let result = retry_with_backoff(attempts, self.attach.base_delay(), |n| {
            let found = host.mounted_nodes(&ids);
            async move {
                if found >= expected {
                    Ok(found)
                } else {
                    debug!(attempt = n, found, expected, "Transform nodes not mounted yet");
                    Err(found)
                }
            }
        })
        .await;

        result.map_err(|found| {
            warn!(found, expected, attempts, "Transform nodes never mounted");
            Error::Attach(AttachError::NodesMissing {
                expected,
                found,
                attempts,
            })
        })
    }

    /// Commits the end-of-gesture `transform` for the current selection.
    ///
    /// The pivot is the centre of the selection's combined bounds. If the
    /// chunked run is cancelled, the updates are recomputed synchronously so
    /// the gesture still lands. The store update is queued at high priority
    /// and applied on the next flush. Returns the number of elements
    /// transformed.
    pub async fn apply_gesture(
        &self,
        transform: GroupTransform,
        host: Option<&dyn TransformHost>,
        progress: Option<&ProgressCallback>,
    ) -> Result<usize> {
        let selected = self.selected();
        let Some(bounds) = group_bounds(&selected) else {
            return Ok(0);
        };
        let pivot = bounds.center();

        let updates = match self
            .scheduler
            .transform(&selected, transform, pivot, progress)
            .await
            .map_err(Error::from)
        {
            Ok(updates) => updates,
            Err(err) if err.is_cancelled() => {
                warn!(
                    count = selected.len(),
                    "Chunked transform cancelled, applying synchronously"
                );
                transform_all(&selected, &transform, pivot)
            }
            Err(err) => return Err(err),
        };

        let count = updates.len();
        let store = Arc::clone(&self.store);
        self.coalescer.enqueue(
            move || {
                store.lock().update_multiple_elements(&updates);
            },
            Priority::High,
        );
        if let Some(host) = host {
            host.reset_transform();
        }
        debug!(count, ?transform, "Gesture transform queued");
        Ok(count)
    }

    /// Stops an in-flight chunked run at its next chunk boundary.
    pub fn cancel(&self) {
        self.scheduler.cancel();
    }

    /// Applies every queued update now.
    pub async fn flush(&self) {
        self.coalescer.flush().await;
    }

    /// Drops queued updates without applying them.
    pub fn teardown(&self) {
        self.coalescer.clear();
    }
}
