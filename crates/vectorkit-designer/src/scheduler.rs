//! Chunked transform scheduler.
//!
//! Small batches are transformed inline. Larger ones are split into chunks
//! with a cooperative yield after each. A chunk that runs past the frame
//! budget also yields mid-chunk, so a transform over hundreds of elements
//! never holds the runtime for much more than a frame.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

use tracing::debug;
use vectorkit_core::{ProgressCallback, TransformError};
use vectorkit_settings::SchedulerSettings;

use crate::geometry::{transform_element, GroupTransform};
use crate::model::{Element, ElementId, ElementUpdate, Point};

/// Per-element results in input order.
pub type TransformBatch = Vec<(ElementId, ElementUpdate)>;

/// Resets the processing flag when a run ends, however it ends.
struct RunGuard<'a>(&'a AtomicBool);

impl Drop for RunGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

#[derive(Debug, Default)]
pub struct ChunkedTransformer {
    settings: SchedulerSettings,
    processing: AtomicBool,
    cancel_requested: AtomicBool,
}

impl ChunkedTransformer {
    pub fn new(settings: SchedulerSettings) -> Self {
        Self {
            settings,
            processing: AtomicBool::new(false),
            cancel_requested: AtomicBool::new(false),
        }
    }

    pub fn settings(&self) -> &SchedulerSettings {
        &self.settings
    }

    pub fn is_processing(&self) -> bool {
        self.processing.load(Ordering::Acquire)
    }

    /// Asks the in-flight run to stop at its next chunk boundary.
    ///
    /// Has no effect when nothing is running.
    pub fn cancel(&self) {
        if self.is_processing() {
            self.cancel_requested.store(true, Ordering::Release);
        }
    }

    /// Transforms every element about `pivot`.
    ///
    /// Fails with [`TransformError::AlreadyProcessing`] while another run is
    /// in flight, and with [`TransformError::Cancelled`] if [`cancel`] was
    /// called before this run finished. A cancelled run returns no partial
    /// results.
    ///
    /// [`cancel`]: ChunkedTransformer::cancel
    pub async fn transform(
        &self,
        elements: &[Element],
        transform: GroupTransform,
        pivot: Point,
        progress: Option<&ProgressCallback>,
    ) -> Result<TransformBatch, TransformError> {
        if self
            .processing
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Err(TransformError::AlreadyProcessing);
        }
        let _guard = RunGuard(&self.processing);
        self.cancel_requested.store(false, Ordering::Release);

        let total = elements.len();
        if total <= self.settings.sync_threshold {
            let batch = transform_all(elements, &transform, pivot);
            if let Some(report) = progress {
                report(total, total);
            }
            return Ok(batch);
        }

        let chunk_size = self.settings.chunk_size(total);
        let budget = self.settings.frame_budget();
        debug!(total, chunk_size, "Transforming in chunks");

        let mut results = Vec::with_capacity(total);
        for chunk in elements.chunks(chunk_size) {
            if self.is_cancel_requested() {
                debug!(processed = results.len(), total, "Chunked transform cancelled");
                return Err(TransformError::Cancelled);
            }

            // A chunk that runs past the frame budget gives the runtime a
            // turn before it continues.
            let mut started = Instant::now();
            for element in chunk {
                results.push((element.id.clone(), transform_element(element, &transform, pivot)));
                let elapsed = started.elapsed();
                if elapsed > budget {
                    debug!(?elapsed, processed = results.len(), "Frame budget exceeded, yielding");
                    tokio::task::yield_now().await;
                    started = Instant::now();
                }
            }

            if let Some(report) = progress {
                report(results.len(), total);
            }
            tokio::task::yield_now().await;
        }

        if self.is_cancel_requested() {
            return Err(TransformError::Cancelled);
        }
        Ok(results)
    }

    fn is_cancel_requested(&self) -> bool {
        self.cancel_requested.load(Ordering::Acquire)
    }
}

/// The synchronous path, also used as the cancellation fallback.
pub fn transform_all(elements: &[Element], transform: &GroupTransform, pivot: Point) -> TransformBatch {
    elements
        .iter()
        .map(|el| (el.id.clone(), transform_element(el, transform, pivot)))
        .collect()
}
