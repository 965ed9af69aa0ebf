use serde::{Deserialize, Serialize};

use super::{
    normalize_rotation, Element, ElementId, ElementKind, Paint, PathPoint, DEFAULT_FONT_SIZE,
    DEFAULT_HEIGHT, DEFAULT_LINE_HEIGHT, DEFAULT_RADIUS, DEFAULT_RADIUS_X, DEFAULT_RADIUS_Y,
    DEFAULT_STROKE_WIDTH, DEFAULT_WIDTH,
};

/// Kind-specific geometry of an element that has not been added yet.
///
/// Absent sizes fall back to the `DEFAULT_*` constants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ShapeSpec {
    Rect {
        width: Option<f64>,
        height: Option<f64>,
    },
    Circle {
        radius: Option<f64>,
    },
    Ellipse {
        radius_x: Option<f64>,
        radius_y: Option<f64>,
    },
    Line {
        x2: f64,
        y2: f64,
    },
    Drawing {
        points: Vec<f64>,
    },
    Path {
        points: Vec<PathPoint>,
    },
    Text {
        content: String,
        width: Option<f64>,
        font_size: Option<f64>,
    },
}

/// A partial element handed to `EditorStore::add_element`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewElement {
    pub x: f64,
    pub y: f64,
    pub shape: ShapeSpec,
    pub rotation: Option<f64>,
    pub stroke: Option<Paint>,
    pub fill: Option<Paint>,
    pub stroke_width: Option<f64>,
    pub stroke_opacity: Option<f64>,
    pub fill_opacity: Option<f64>,
}

impl NewElement {
    pub fn new(x: f64, y: f64, shape: ShapeSpec) -> Self {
        Self {
            x,
            y,
            shape,
            rotation: None,
            stroke: None,
            fill: None,
            stroke_width: None,
            stroke_opacity: None,
            fill_opacity: None,
        }
    }

    pub fn rect(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self::new(
            x,
            y,
            ShapeSpec::Rect {
                width: Some(width),
                height: Some(height),
            },
        )
    }

    pub fn circle(cx: f64, cy: f64, radius: f64) -> Self {
        Self::new(
            cx,
            cy,
            ShapeSpec::Circle {
                radius: Some(radius),
            },
        )
    }

    pub fn ellipse(cx: f64, cy: f64, radius_x: f64, radius_y: f64) -> Self {
        Self::new(
            cx,
            cy,
            ShapeSpec::Ellipse {
                radius_x: Some(radius_x),
                radius_y: Some(radius_y),
            },
        )
    }

    pub fn line(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self::new(x1, y1, ShapeSpec::Line { x2, y2 })
    }

    pub fn drawing(points: Vec<f64>) -> Self {
        Self::new(0.0, 0.0, ShapeSpec::Drawing { points })
    }

    pub fn path(x: f64, y: f64, points: Vec<PathPoint>) -> Self {
        Self::new(x, y, ShapeSpec::Path { points })
    }

    pub fn text(x: f64, y: f64, content: impl Into<String>) -> Self {
        Self::new(
            x,
            y,
            ShapeSpec::Text {
                content: content.into(),
                width: None,
                font_size: None,
            },
        )
    }

    pub fn with_rotation(mut self, degrees: f64) -> Self {
        self.rotation = Some(degrees);
        self
    }

    pub fn with_stroke(mut self, stroke: impl Into<Paint>, width: f64) -> Self {
        self.stroke = Some(stroke.into());
        self.stroke_width = Some(width);
        self
    }

    pub fn with_fill(mut self, fill: impl Into<Paint>) -> Self {
        self.fill = Some(fill.into());
        self
    }

    /// Builds the element under `id`, filling every absent field.
    pub fn into_element(self, id: ElementId) -> Element {
        let kind = match self.shape {
            ShapeSpec::Rect { width, height } => ElementKind::Rect {
                width: width.unwrap_or(DEFAULT_WIDTH),
                height: height.unwrap_or(DEFAULT_HEIGHT),
            },
            ShapeSpec::Circle { radius } => ElementKind::Circle {
                radius: radius.unwrap_or(DEFAULT_RADIUS),
            },
            ShapeSpec::Ellipse { radius_x, radius_y } => ElementKind::Ellipse {
                radius_x: radius_x.unwrap_or(DEFAULT_RADIUS_X),
                radius_y: radius_y.unwrap_or(DEFAULT_RADIUS_Y),
            },
            ShapeSpec::Line { x2, y2 } => ElementKind::Line { x2, y2 },
            ShapeSpec::Drawing { points } => ElementKind::Drawing { points },
            ShapeSpec::Path { points } => ElementKind::Path { points },
            ShapeSpec::Text {
                content,
                width,
                font_size,
            } => ElementKind::Text {
                content,
                width: width.unwrap_or(DEFAULT_WIDTH),
                font_size: font_size.unwrap_or(DEFAULT_FONT_SIZE),
                line_height: DEFAULT_LINE_HEIGHT,
                font_family: "sans-serif".to_string(),
            },
        };

        // Point-based kinds keep absolute (or anchor-relative) coordinates.
        let (x, y) = match kind {
            ElementKind::Drawing { .. } => (0.0, 0.0),
            _ => (self.x, self.y),
        };

        Element {
            id,
            x,
            y,
            rotation: normalize_rotation(self.rotation.unwrap_or(0.0)),
            skew_x: None,
            skew_y: None,
            stroke: self.stroke.unwrap_or_else(|| Paint::new("#000000")),
            fill: self.fill.unwrap_or_else(Paint::none),
            stroke_width: self.stroke_width.unwrap_or(DEFAULT_STROKE_WIDTH),
            stroke_opacity: self.stroke_opacity.unwrap_or(1.0).clamp(0.0, 1.0),
            fill_opacity: self.fill_opacity.unwrap_or(1.0).clamp(0.0, 1.0),
            is_selected: false,
            selection_mode: None,
            kind,
        }
    }
}
