//! Type aliases for commonly used complex types.
//!
//! The editor store is shared between the action layer and the deferred
//! callbacks the update coalescer runs, so it lives behind a
//! `parking_lot::Mutex` inside an `Arc`.
//!
//! ```rust,ignore
//! use vectorkit_core::types::*;
//!
//! let store: ThreadSafe<EditorStore> = thread_safe(EditorStore::new());
//! store.lock().undo();
//! ```

use parking_lot::Mutex;
use std::sync::Arc;

/// A thread-safe, mutex-protected wrapper for cross-task sharing.
///
/// Uses `parking_lot::Mutex` so locking never returns a poison error.
pub type ThreadSafe<T> = Arc<Mutex<T>>;

/// A one-shot deferred mutation, run by the update coalescer.
pub type Callback = Box<dyn FnOnce() + Send + 'static>;

/// A progress callback receiving (processed, total) values.
pub type ProgressCallback = Box<dyn Fn(usize, usize) + Send + Sync>;

/// Create a new `ThreadSafe<T>` from a value.
pub fn thread_safe<T>(value: T) -> ThreadSafe<T> {
    Arc::new(Mutex::new(value))
}
