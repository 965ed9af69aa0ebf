use serde::{Deserialize, Serialize};

use super::{ElementId, Paint, PathPoint, SelectionMode};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementType {
    Rect,
    Circle,
    Ellipse,
    Line,
    Drawing,
    Path,
    Text,
}

/// Kind-specific geometry.
///
/// The meaning of the owning element's `x`/`y` anchor depends on the kind:
/// top-left for `Rect` and `Text`, centre for `Circle` and `Ellipse`, start
/// point for `Line`, the reference point that `Path` points are relative
/// to, and unused for `Drawing` whose points are absolute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ElementKind {
    Rect {
        width: f64,
        height: f64,
    },
    Circle {
        radius: f64,
    },
    Ellipse {
        radius_x: f64,
        radius_y: f64,
    },
    Line {
        x2: f64,
        y2: f64,
    },
    /// Freehand stroke as a flat `[x0, y0, x1, y1, ..]` list.
    Drawing {
        points: Vec<f64>,
    },
    Path {
        points: Vec<PathPoint>,
    },
    Text {
        content: String,
        width: f64,
        font_size: f64,
        line_height: f64,
        font_family: String,
    },
}

impl ElementKind {
    pub fn element_type(&self) -> ElementType {
        match self {
            ElementKind::Rect { .. } => ElementType::Rect,
            ElementKind::Circle { .. } => ElementType::Circle,
            ElementKind::Ellipse { .. } => ElementType::Ellipse,
            ElementKind::Line { .. } => ElementType::Line,
            ElementKind::Drawing { .. } => ElementType::Drawing,
            ElementKind::Path { .. } => ElementType::Path,
            ElementKind::Text { .. } => ElementType::Text,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    pub id: ElementId,
    pub x: f64,
    pub y: f64,
    /// Degrees, normalized to (-180, 180]
    pub rotation: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skew_x: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skew_y: Option<f64>,
    pub stroke: Paint,
    pub fill: Paint,
    pub stroke_width: f64,
    pub stroke_opacity: f64,
    pub fill_opacity: f64,
    #[serde(default)]
    pub is_selected: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selection_mode: Option<SelectionMode>,
    #[serde(flatten)]
    pub kind: ElementKind,
}

impl Element {
    pub fn element_type(&self) -> ElementType {
        self.kind.element_type()
    }

    /// Rendered height of a text element: one line box per content line.
    pub fn text_height(font_size: f64, line_height: f64, content: &str) -> f64 {
        let lines = content.lines().count().max(1) as f64;
        font_size * line_height * lines
    }

    /// Compares everything except the selection flag and mode.
    pub fn same_content(&self, other: &Element) -> bool {
        let Element {
            id,
            x,
            y,
            rotation,
            skew_x,
            skew_y,
            stroke,
            fill,
            stroke_width,
            stroke_opacity,
            fill_opacity,
            is_selected: _,
            selection_mode: _,
            kind,
        } = self;

        *id == other.id
            && *x == other.x
            && *y == other.y
            && *rotation == other.rotation
            && *skew_x == other.skew_x
            && *skew_y == other.skew_y
            && *stroke == other.stroke
            && *fill == other.fill
            && *stroke_width == other.stroke_width
            && *stroke_opacity == other.stroke_opacity
            && *fill_opacity == other.fill_opacity
            && *kind == other.kind
    }

    pub(crate) fn select(&mut self, mode: SelectionMode) {
        self.is_selected = true;
        self.selection_mode = Some(mode);
    }

    pub(crate) fn deselect(&mut self) {
        self.is_selected = false;
        self.selection_mode = None;
    }
}
