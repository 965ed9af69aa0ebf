use serde::{Deserialize, Serialize};

use super::{normalize_rotation, Element, ElementKind, Paint, PathPoint};

/// A shallow, partial update to an element.
///
/// Fields that do not apply to the target element's kind (for example a
/// `radius` sent to a rect) are ignored when applied and never count as a
/// change.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ElementUpdate {
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub rotation: Option<f64>,
    pub skew_x: Option<f64>,
    pub skew_y: Option<f64>,
    pub stroke: Option<Paint>,
    pub fill: Option<Paint>,
    pub stroke_width: Option<f64>,
    pub stroke_opacity: Option<f64>,
    pub fill_opacity: Option<f64>,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub radius: Option<f64>,
    pub radius_x: Option<f64>,
    pub radius_y: Option<f64>,
    pub x2: Option<f64>,
    pub y2: Option<f64>,
    pub points: Option<Vec<f64>>,
    pub path_points: Option<Vec<PathPoint>>,
    pub content: Option<String>,
    pub font_size: Option<f64>,
}

/// True when `update` is absent or equals `current`.
fn unchanged<T: PartialEq>(update: &Option<T>, current: &T) -> bool {
    update.as_ref().is_none_or(|value| value == current)
}

fn set<T: Clone>(target: &mut T, update: &Option<T>) {
    if let Some(value) = update {
        *target = value.clone();
    }
}

impl ElementUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn position(x: f64, y: f64) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// True when applying this update would leave `element` unchanged.
    ///
    /// Rotation is compared after normalization, so sending the current
    /// angle plus a full turn is still a no-op.
    pub fn is_noop_for(&self, element: &Element) -> bool {
        let rotation_unchanged = self
            .rotation
            .is_none_or(|r| normalize_rotation(r) == element.rotation);
        let skew_unchanged = self.skew_x.is_none_or(|s| element.skew_x == Some(s))
            && self.skew_y.is_none_or(|s| element.skew_y == Some(s));

        let common = unchanged(&self.x, &element.x)
            && unchanged(&self.y, &element.y)
            && rotation_unchanged
            && skew_unchanged
            && unchanged(&self.stroke, &element.stroke)
            && unchanged(&self.fill, &element.fill)
            && unchanged(&self.stroke_width, &element.stroke_width)
            && unchanged(&self.stroke_opacity, &element.stroke_opacity)
            && unchanged(&self.fill_opacity, &element.fill_opacity);
        if !common {
            return false;
        }

        match &element.kind {
            ElementKind::Rect { width, height } => {
                unchanged(&self.width, width) && unchanged(&self.height, height)
            }
            ElementKind::Circle { radius } => unchanged(&self.radius, radius),
            ElementKind::Ellipse { radius_x, radius_y } => {
                unchanged(&self.radius_x, radius_x) && unchanged(&self.radius_y, radius_y)
            }
            ElementKind::Line { x2, y2 } => unchanged(&self.x2, x2) && unchanged(&self.y2, y2),
            ElementKind::Drawing { points } => unchanged(&self.points, points),
            ElementKind::Path { points } => unchanged(&self.path_points, points),
            ElementKind::Text {
                content,
                width,
                font_size,
                ..
            } => {
                unchanged(&self.content, content)
                    && unchanged(&self.width, width)
                    && unchanged(&self.font_size, font_size)
            }
        }
    }

    /// Merges this update into `element`.
    pub fn apply_to(&self, element: &mut Element) {
        set(&mut element.x, &self.x);
        set(&mut element.y, &self.y);
        if let Some(rotation) = self.rotation {
            element.rotation = normalize_rotation(rotation);
        }
        if self.skew_x.is_some() {
            element.skew_x = self.skew_x;
        }
        if self.skew_y.is_some() {
            element.skew_y = self.skew_y;
        }
        set(&mut element.stroke, &self.stroke);
        set(&mut element.fill, &self.fill);
        set(&mut element.stroke_width, &self.stroke_width);
        if let Some(opacity) = self.stroke_opacity {
            element.stroke_opacity = opacity.clamp(0.0, 1.0);
        }
        if let Some(opacity) = self.fill_opacity {
            element.fill_opacity = opacity.clamp(0.0, 1.0);
        }

        match &mut element.kind {
            ElementKind::Rect { width, height } => {
                set(width, &self.width);
                set(height, &self.height);
            }
            ElementKind::Circle { radius } => set(radius, &self.radius),
            ElementKind::Ellipse { radius_x, radius_y } => {
                set(radius_x, &self.radius_x);
                set(radius_y, &self.radius_y);
            }
            ElementKind::Line { x2, y2 } => {
                set(x2, &self.x2);
                set(y2, &self.y2);
            }
            ElementKind::Drawing { points } => set(points, &self.points),
            ElementKind::Path { points } => set(points, &self.path_points),
            ElementKind::Text {
                content,
                width,
                font_size,
                ..
            } => {
                set(content, &self.content);
                set(width, &self.width);
                set(font_size, &self.font_size);
            }
        }
    }

    /// Returns a copy of `element` with this update merged in.
    pub fn applied(&self, element: &Element) -> Element {
        let mut next = element.clone();
        self.apply_to(&mut next);
        next
    }
}
