//! # VectorKit
//!
//! Editing core for a browser-style vector graphics editor.
//!
//! ## Architecture
//!
//! VectorKit is organized as a workspace with multiple crates:
//!
//! 1. **vectorkit-core** - Error taxonomy and shared-state aliases
//! 2. **vectorkit-settings** - Engine tunables with JSON/TOML persistence
//! 3. **vectorkit-designer** - Element model, geometry kernel, undo history,
//!    chunked scheduler, update coalescer, store and SVG exchange
//! 4. **vectorkit** - Facade library and command-line entry point
//!
//! ## Features
//!
//! - **Group Transforms**: scale and rotate a mixed selection about a shared pivot
//! - **Chunked Updates**: large selections transform in frame-sized chunks
//! - **Undo/Redo**: bounded history with filtering and stroke grouping
//! - **SVG Exchange**: restricted import with canvas fitting, full export

pub use vectorkit_core as core;
pub use vectorkit_designer as designer;
pub use vectorkit_settings as settings;

pub use vectorkit_core::{AttachError, Error, Result, SvgError, TransformError};
pub use vectorkit_designer::{
    EditorState, EditorStore, Element, ElementId, GroupTransform, History, HistoryMode,
    SelectionTransformer,
};
pub use vectorkit_settings::{default_config_path, EditorConfig};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging with the default configuration
///
/// Pretty console output to stderr, filtered by `RUST_LOG` (default `info`).
/// Stdout is left free for exported documents.
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_thread_ids(true)
        .with_line_number(true)
        .pretty();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}
