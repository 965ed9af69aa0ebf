use serde::{Deserialize, Serialize};
use std::fmt;

mod element;
mod new_element;
mod path;
mod update;

pub use element::{Element, ElementKind, ElementType};
pub use new_element::{NewElement, ShapeSpec};
pub use path::{PathCommand, PathPoint};
pub use update::ElementUpdate;

/// Fallback sizes used when a shape is created without explicit dimensions.
pub const DEFAULT_WIDTH: f64 = 100.0;
pub const DEFAULT_HEIGHT: f64 = 50.0;
pub const DEFAULT_RADIUS: f64 = 30.0;
pub const DEFAULT_RADIUS_X: f64 = 50.0;
pub const DEFAULT_RADIUS_Y: f64 = 30.0;
pub const DEFAULT_STROKE_WIDTH: f64 = 2.0;
pub const DEFAULT_FONT_SIZE: f64 = 16.0;
pub const DEFAULT_LINE_HEIGHT: f64 = 1.2;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Stable element identifier, unique within a document.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementId(String);

impl ElementId {
    /// A fresh random id.
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ElementId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for ElementId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A stroke or fill colour spec.
///
/// `"none"` and `"transparent"` mean no paint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Paint(String);

impl Paint {
    pub fn new(spec: impl Into<String>) -> Self {
        Self(spec.into())
    }

    pub fn none() -> Self {
        Self("none".to_string())
    }

    pub fn is_none(&self) -> bool {
        let spec = self.0.trim();
        spec.is_empty()
            || spec.eq_ignore_ascii_case("none")
            || spec.eq_ignore_ascii_case("transparent")
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Paint {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Which manipulation UI is active for a selected element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionMode {
    Transform,
    Edit,
    Skew,
}

impl SelectionMode {
    /// Next mode when an already singly-selected element is selected again.
    ///
    /// Skew is never entered through this cycle.
    pub fn toggled(self) -> Self {
        match self {
            SelectionMode::Transform => SelectionMode::Edit,
            SelectionMode::Edit | SelectionMode::Skew => SelectionMode::Transform,
        }
    }
}

/// Active editor tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tool {
    #[default]
    Select,
    Rectangle,
    Circle,
    Ellipse,
    Line,
    Drawing,
    Path,
    Text,
    Pan,
}

/// Normalizes an angle in degrees to (-180, 180].
pub fn normalize_rotation(degrees: f64) -> f64 {
    if !degrees.is_finite() {
        return 0.0;
    }
    if degrees > -180.0 && degrees <= 180.0 {
        return degrees;
    }
    let wrapped = degrees.rem_euclid(360.0);
    if wrapped > 180.0 {
        wrapped - 360.0
    } else {
        wrapped
    }
}
