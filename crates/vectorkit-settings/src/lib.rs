//! VectorKit Settings Crate
//!
//! Holds the tunables of the editing engine (history depth, chunking,
//! frame coalescing, canvas fit) and their file persistence.

pub mod config;
pub mod error;

pub use config::{
    default_config_path, AttachSettings, CanvasSettings, CoalescerSettings, EditorConfig,
    HistorySettings, SchedulerSettings, ViewportSettings,
};
pub use error::{SettingsError, SettingsResult};
