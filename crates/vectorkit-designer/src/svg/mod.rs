//! Restricted SVG exchange.
//!
//! Import understands a root `<svg>` with `rect`, `circle`, `ellipse` and
//! `path` children and fits the result onto the canvas. Export writes every
//! element kind back out with absolute coordinates.

mod export;
mod import;
mod markup;
mod path_data;

pub use export::{export_svg, format_number};
pub use import::{ImportedDesign, SvgImporter};
pub use path_data::parse_path_data;
