//! Configuration for the VectorKit editing engine
//!
//! Configuration is organized into logical sections:
//! - History depth
//! - Chunked transform scheduling
//! - Per-frame update coalescing
//! - Canvas bounds used when fitting imported documents
//! - Viewport zoom limits
//! - Retry policy for attaching the transform manipulator
//!
//! Files are JSON or TOML, chosen by extension.

use crate::error::{SettingsError, SettingsResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Undo history settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistorySettings {
    /// Maximum number of recorded undo steps
    pub limit: usize,
}

impl Default for HistorySettings {
    fn default() -> Self {
        Self { limit: 50 }
    }
}

/// Chunked transform scheduler settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerSettings {
    /// Element counts at or below this are transformed synchronously
    pub sync_threshold: usize,
    /// Smallest chunk size
    pub min_chunk: usize,
    /// Largest chunk size
    pub max_chunk: usize,
    /// Chunk size is the element count divided by this, then clamped
    pub chunk_divisor: usize,
    /// Time a chunk may take before the scheduler yields
    pub frame_budget_ms: u64,
}

impl Default for SchedulerSettings {
    fn default() -> Self {
        Self {
            sync_threshold: 100,
            min_chunk: 25,
            max_chunk: 75,
            chunk_divisor: 10,
            frame_budget_ms: 16,
        }
    }
}

impl SchedulerSettings {
    /// Chunk size for a run over `total` elements.
    pub fn chunk_size(&self, total: usize) -> usize {
        let min = self.min_chunk.max(1);
        (total / self.chunk_divisor.max(1)).clamp(min, self.max_chunk.max(min))
    }

    pub fn frame_budget(&self) -> Duration {
        Duration::from_millis(self.frame_budget_ms)
    }
}

/// Update coalescer settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoalescerSettings {
    /// Delay between a first enqueue and its flush
    pub frame_interval_ms: u64,
    /// Normal-priority queues longer than this are flushed in sub-batches
    pub batch_threshold: usize,
    /// Sub-batch size
    pub batch_size: usize,
}

impl Default for CoalescerSettings {
    fn default() -> Self {
        Self {
            frame_interval_ms: 16,
            batch_threshold: 100,
            batch_size: 50,
        }
    }
}

impl CoalescerSettings {
    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_interval_ms)
    }
}

/// Canvas settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasSettings {
    pub width: f64,
    pub height: f64,
    /// Fraction of the canvas an imported document may fill
    pub fit_ratio: f64,
}

impl Default for CanvasSettings {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
            fit_ratio: 0.7,
        }
    }
}

/// Viewport settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewportSettings {
    pub min_zoom: f64,
    pub max_zoom: f64,
}

impl Default for ViewportSettings {
    fn default() -> Self {
        Self {
            min_zoom: 0.1,
            max_zoom: 5.0,
        }
    }
}

/// Manipulator attach retry settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AttachSettings {
    /// Lookups attempted before giving up
    pub attempts: u32,
    /// Delay before the second attempt; doubles after each failure
    pub base_delay_ms: u64,
}

impl Default for AttachSettings {
    fn default() -> Self {
        Self {
            attempts: 5,
            base_delay_ms: 16,
        }
    }
}

impl AttachSettings {
    pub fn base_delay(&self) -> Duration {
        Duration::from_millis(self.base_delay_ms)
    }
}

/// Complete engine configuration
///
/// Aggregates all settings sections and provides file I/O operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct EditorConfig {
    pub history: HistorySettings,
    pub scheduler: SchedulerSettings,
    pub coalescer: CoalescerSettings,
    pub canvas: CanvasSettings,
    pub viewport: ViewportSettings,
    pub attach: AttachSettings,
}

impl EditorConfig {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let content = std::fs::read_to_string(path)?;

        let config: Self = match extension(path) {
            Some("json") => serde_json::from_str(&content)?,
            Some("toml") => toml::from_str(&content)?,
            other => {
                return Err(SettingsError::UnsupportedFormat(
                    other.unwrap_or("<none>").to_string(),
                ))
            }
        };

        config.validate()?;
        tracing::debug!("Loaded editor config from {}", path.display());
        Ok(config)
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match extension(path) {
            Some("json") => serde_json::to_string_pretty(self)?,
            Some("toml") => toml::to_string_pretty(self)?,
            other => {
                return Err(SettingsError::UnsupportedFormat(
                    other.unwrap_or("<none>").to_string(),
                ))
            }
        };

        std::fs::write(path, content)?;
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> SettingsResult<()> {
        if self.history.limit == 0 {
            return Err(SettingsError::invalid("history.limit", "must be > 0"));
        }

        let s = &self.scheduler;
        if s.min_chunk == 0 || s.max_chunk < s.min_chunk {
            return Err(SettingsError::invalid(
                "scheduler.max_chunk",
                "chunk bounds must satisfy 0 < min_chunk <= max_chunk",
            ));
        }
        if s.chunk_divisor == 0 {
            return Err(SettingsError::invalid("scheduler.chunk_divisor", "must be > 0"));
        }

        if self.coalescer.batch_size == 0 {
            return Err(SettingsError::invalid("coalescer.batch_size", "must be > 0"));
        }

        let c = &self.canvas;
        if c.width <= 0.0 || c.height <= 0.0 {
            return Err(SettingsError::invalid("canvas", "dimensions must be > 0"));
        }
        if !(c.fit_ratio > 0.0 && c.fit_ratio <= 1.0) {
            return Err(SettingsError::invalid("canvas.fit_ratio", "must be in (0, 1]"));
        }

        let v = &self.viewport;
        if v.min_zoom <= 0.0 || v.max_zoom < v.min_zoom {
            return Err(SettingsError::invalid(
                "viewport.max_zoom",
                "zoom bounds must satisfy 0 < min_zoom <= max_zoom",
            ));
        }

        if self.attach.attempts == 0 {
            return Err(SettingsError::invalid("attach.attempts", "must be > 0"));
        }

        Ok(())
    }
}

fn extension(path: &Path) -> Option<&str> {
    path.extension().and_then(|ext| ext.to_str())
}

/// Platform config location, e.g. `~/.config/vectorkit/editor.toml`.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("vectorkit").join("editor.toml"))
}
