//! # VectorKit Core
//!
//! Core types shared by every VectorKit crate: the layered error
//! taxonomy and the aliases used for shared state and callbacks.

pub mod error;
pub mod types;

pub use error::{AttachError, Error, Result, SvgError, TransformError};

pub use types::{thread_safe, Callback, ProgressCallback, ThreadSafe};
