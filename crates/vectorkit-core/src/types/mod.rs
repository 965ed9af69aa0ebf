//! Type system utilities and aliases.
//!
//! - [`aliases`]: Type aliases for `Arc<Mutex<T>>` and callbacks.

pub mod aliases;

pub use aliases::*;
