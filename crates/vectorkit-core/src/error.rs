//! Error handling for VectorKit
//!
//! Provides error types for each layer of the editing core:
//! - SVG errors (import validation and parsing)
//! - Transform errors (chunked transform concurrency misuse and cancellation)
//! - Attach errors (locating rendered nodes for a fresh selection)
//!
//! All error types use `thiserror`. Soft no-op conditions such as updating
//! an unknown element id are not errors and never surface here.

use thiserror::Error;

/// SVG import error type
///
/// Raised synchronously by an import; the document is left unchanged.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SvgError {
    /// The document has no root `<svg>` element
    #[error("Invalid SVG: missing <svg> root element")]
    MissingRoot,

    /// The markup could not be tokenized
    #[error("SVG parse error at byte {offset}: {reason}")]
    Parse {
        /// Byte offset into the source where parsing failed.
        offset: usize,
        /// What the parser expected or found.
        reason: String,
    },

    /// A numeric attribute did not hold a number
    #[error("Invalid number for attribute '{attribute}': {value}")]
    InvalidNumber {
        /// The attribute name.
        attribute: String,
        /// The raw attribute value.
        value: String,
    },

    /// The document contained no supported shapes
    #[error("SVG contains no supported shapes")]
    Empty,
}

/// Chunked transform error type
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransformError {
    /// A second run was started while one is in flight
    #[error("Transform already processing")]
    AlreadyProcessing,

    /// The run was cancelled at a chunk boundary
    #[error("Transform cancelled")]
    Cancelled,
}

/// Rendered-node attachment error type
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AttachError {
    /// The expected nodes never appeared
    #[error("Found {found} of {expected} nodes after {attempts} attempts")]
    NodesMissing {
        /// Number of nodes the selection needs.
        expected: usize,
        /// Number of nodes found on the last attempt.
        found: usize,
        /// Attempts made before giving up.
        attempts: u32,
    },
}

/// Main error type for VectorKit
///
/// Unifies the layer errors returned by the selection transform flow.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// SVG error
    #[error(transparent)]
    Svg(#[from] SvgError),

    /// Transform error
    #[error(transparent)]
    Transform(#[from] TransformError),

    /// Attach error
    #[error(transparent)]
    Attach(#[from] AttachError),
}

impl Error {
    /// Check if this is a cancellation
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Error::Transform(TransformError::Cancelled))
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;
