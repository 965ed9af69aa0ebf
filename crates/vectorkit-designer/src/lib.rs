//! # VectorKit Designer
//!
//! The editing engine: element model, geometry kernel, history, the
//! chunked scheduler and per-frame coalescer, the editor store and SVG
//! exchange.
//!
//! ## Flow
//!
//! A transform gesture ends with a [`GroupTransform`]. The
//! [`SelectionTransformer`] maps it onto every selected element with the
//! [`ChunkedTransformer`], queues the result on the [`UpdateCoalescer`],
//! and the queued callback commits it to the [`EditorStore`] as one undo
//! step.

pub mod coalescer;
pub mod geometry;
pub mod history;
pub mod model;
pub mod scheduler;
pub mod serialization;
pub mod store;
pub mod svg;
pub mod transformer;
pub mod viewport;

pub use coalescer::{Priority, UpdateCoalescer};
pub use geometry::{
    element_bounds, element_center, group_bounds, reflect_element, transform_element,
    translate_element, Axis, Bounds, GroupTransform,
};
pub use history::{History, HistoryMode, Transition};
pub use model::{
    normalize_rotation, Element, ElementId, ElementKind, ElementType, ElementUpdate, NewElement,
    Paint, PathCommand, PathPoint, Point, SelectionMode, ShapeSpec, Tool,
};
pub use scheduler::{ChunkedTransformer, TransformBatch};
pub use serialization::DocumentFile;
pub use store::{history_group, records_history, Alignment, EditorState, EditorStore, Shortcut};
pub use svg::{export_svg, ImportedDesign, SvgImporter};
pub use transformer::{retry_with_backoff, SelectionTransformer, TransformHost};
pub use viewport::Viewport;
