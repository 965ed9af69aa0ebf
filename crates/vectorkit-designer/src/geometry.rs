//! Geometry kernel.
//!
//! Pure functions over [`Element`]s: per-kind bounding boxes and centres,
//! group transforms about a shared pivot, reflection and translation. Every
//! function returns an [`ElementUpdate`] instead of mutating, and none of
//! them read clocks or random state, so identical input always yields
//! identical output.

use serde::{Deserialize, Serialize};

use crate::model::{normalize_rotation, Element, ElementKind, ElementUpdate, PathPoint, Point};

/// Rotations smaller than this (degrees) are treated as zero.
pub const ROTATION_EPSILON: f64 = 0.001;
/// Floor for width, height and radius outputs.
pub const MIN_SIZE: f64 = 1.0;
/// Floor for scaled stroke widths.
pub const MIN_STROKE_WIDTH: f64 = 0.5;

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// The box spanned by two opposite corners in any order.
    pub fn from_corners(a: Point, b: Point) -> Self {
        Self::new(a.x.min(b.x), a.y.min(b.y), a.x.max(b.x), a.y.max(b.y))
    }

    /// Smallest box holding every point, or `None` for no points.
    pub fn from_points(points: impl IntoIterator<Item = Point>) -> Option<Self> {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let mut bounds = Self::new(first.x, first.y, first.x, first.y);
        for p in iter {
            bounds.min_x = bounds.min_x.min(p.x);
            bounds.min_y = bounds.min_y.min(p.y);
            bounds.max_x = bounds.max_x.max(p.x);
            bounds.max_y = bounds.max_y.max(p.y);
        }
        Some(bounds)
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    pub fn center(&self) -> Point {
        Point::new(
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }

    pub fn union(&self, other: &Bounds) -> Bounds {
        Bounds::new(
            self.min_x.min(other.min_x),
            self.min_y.min(other.min_y),
            self.max_x.max(other.max_x),
            self.max_y.max(other.max_y),
        )
    }

    /// Edge contact counts as intersection.
    pub fn intersects(&self, other: &Bounds) -> bool {
        self.min_x <= other.max_x
            && self.max_x >= other.min_x
            && self.min_y <= other.max_y
            && self.max_y >= other.min_y
    }
}

/// Scale and rotation accumulated by a transform gesture.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GroupTransform {
    pub scale_x: f64,
    pub scale_y: f64,
    /// Degrees
    pub rotation: f64,
}

impl Default for GroupTransform {
    fn default() -> Self {
        Self::identity()
    }
}

impl GroupTransform {
    pub fn new(scale_x: f64, scale_y: f64, rotation: f64) -> Self {
        Self {
            scale_x,
            scale_y,
            rotation,
        }
    }

    pub fn identity() -> Self {
        Self::new(1.0, 1.0, 0.0)
    }

    pub fn scale(factor: f64) -> Self {
        Self::new(factor, factor, 0.0)
    }

    pub fn rotate(degrees: f64) -> Self {
        Self::new(1.0, 1.0, degrees)
    }

    pub fn is_identity(&self) -> bool {
        self.scale_x == 1.0 && self.scale_y == 1.0 && !self.has_rotation()
    }

    pub fn has_rotation(&self) -> bool {
        self.rotation.abs() > ROTATION_EPSILON
    }

    /// Reciprocal scale and negated rotation.
    ///
    /// Exactly undoes `self` when the scale is uniform or there is no
    /// rotation; a non-uniform scale followed by a rotation does not commute.
    pub fn inverse(&self) -> Self {
        Self::new(1.0 / self.scale_x, 1.0 / self.scale_y, -self.rotation)
    }

    /// Scale then rotate a vector.
    fn apply_vector(&self, dx: f64, dy: f64) -> Point {
        let sx = dx * self.scale_x;
        let sy = dy * self.scale_y;
        if !self.has_rotation() {
            return Point::new(sx, sy);
        }
        let (sin, cos) = self.rotation.to_radians().sin_cos();
        Point::new(sx * cos - sy * sin, sx * sin + sy * cos)
    }

    /// Maps `p` about `pivot`.
    pub fn apply_about(&self, p: Point, pivot: Point) -> Point {
        let v = self.apply_vector(p.x - pivot.x, p.y - pivot.y);
        Point::new(pivot.x + v.x, pivot.y + v.y)
    }

    fn stroke_scale(&self) -> f64 {
        self.scale_x.abs().max(self.scale_y.abs())
    }
}

/// Reflection axis for [`reflect_element`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// Mirror left-right across a vertical line `x = value`.
    Vertical,
    /// Mirror top-bottom across a horizontal line `y = value`.
    Horizontal,
}

fn drawing_points(points: &[f64]) -> impl Iterator<Item = Point> + '_ {
    points.chunks_exact(2).map(|pair| Point::new(pair[0], pair[1]))
}

fn absolute_path_points<'a>(
    anchor: Point,
    points: &'a [PathPoint],
) -> impl Iterator<Item = Point> + 'a {
    points
        .iter()
        .flat_map(PathPoint::coordinates)
        .map(move |p| Point::new(anchor.x + p.x, anchor.y + p.y))
}

/// Per-kind axis-aligned bounding box, ignoring rotation and skew.
pub fn element_bounds(element: &Element) -> Bounds {
    let (x, y) = (element.x, element.y);
    match &element.kind {
        ElementKind::Rect { width, height } => Bounds::new(x, y, x + width, y + height),
        ElementKind::Circle { radius } => Bounds::new(x - radius, y - radius, x + radius, y + radius),
        ElementKind::Ellipse { radius_x, radius_y } => {
            Bounds::new(x - radius_x, y - radius_y, x + radius_x, y + radius_y)
        }
        ElementKind::Line { x2, y2 } => Bounds::from_corners(Point::new(x, y), Point::new(*x2, *y2)),
        ElementKind::Drawing { points } => {
            Bounds::from_points(drawing_points(points)).unwrap_or(Bounds::new(x, y, x, y))
        }
        ElementKind::Path { points } => {
            Bounds::from_points(absolute_path_points(Point::new(x, y), points))
                .unwrap_or(Bounds::new(x, y, x, y))
        }
        ElementKind::Text {
            content,
            width,
            font_size,
            line_height,
            ..
        } => {
            let height = Element::text_height(*font_size, *line_height, content);
            Bounds::new(x, y, x + width, y + height)
        }
    }
}

pub fn element_center(element: &Element) -> Point {
    element_bounds(element).center()
}

/// Union of the bounds of every element, or `None` for an empty group.
pub fn group_bounds<'a>(elements: impl IntoIterator<Item = &'a Element>) -> Option<Bounds> {
    elements
        .into_iter()
        .map(element_bounds)
        .reduce(|acc, b| acc.union(&b))
}

/// The element's current geometry expressed as an update.
///
/// Applying it is a no-op; it is what an identity transform returns.
pub fn geometry_snapshot(element: &Element) -> ElementUpdate {
    let mut update = ElementUpdate {
        x: Some(element.x),
        y: Some(element.y),
        rotation: Some(element.rotation),
        stroke_width: Some(element.stroke_width),
        ..ElementUpdate::default()
    };
    match &element.kind {
        ElementKind::Rect { width, height } => {
            update.width = Some(*width);
            update.height = Some(*height);
        }
        ElementKind::Circle { radius } => update.radius = Some(*radius),
        ElementKind::Ellipse { radius_x, radius_y } => {
            update.radius_x = Some(*radius_x);
            update.radius_y = Some(*radius_y);
        }
        ElementKind::Line { x2, y2 } => {
            update.x2 = Some(*x2);
            update.y2 = Some(*y2);
        }
        ElementKind::Drawing { points } => update.points = Some(points.clone()),
        ElementKind::Path { points } => update.path_points = Some(points.clone()),
        ElementKind::Text {
            width, font_size, ..
        } => {
            update.width = Some(*width);
            update.font_size = Some(*font_size);
        }
    }
    update
}

/// Maps one element through a group transform about `pivot`.
///
/// The element's centre follows the group (scaled and rotated about the
/// pivot) while its own geometry scales and rotates about that centre.
/// Box-like kinds (rect, circle, ellipse, text) accumulate the rotation in
/// their `rotation` field. Point-based kinds (line, drawing, path) bake it
/// into their coordinates and keep their `rotation` field.
pub fn transform_element(element: &Element, t: &GroupTransform, pivot: Point) -> ElementUpdate {
    if t.is_identity() {
        return geometry_snapshot(element);
    }

    let stroke_width = (element.stroke_width * t.stroke_scale()).max(MIN_STROKE_WIDTH);
    let rotation = normalize_rotation(element.rotation + t.rotation);

    let bounds = element_bounds(element);
    let local_center = bounds.center();
    let new_center = t.apply_about(local_center, pivot);
    // Point kinds scale/rotate about their own centre, then follow the pivot offset.
    let local = |p: Point| {
        let v = t.apply_vector(p.x - local_center.x, p.y - local_center.y);
        Point::new(new_center.x + v.x, new_center.y + v.y)
    };

    let mut update = ElementUpdate {
        stroke_width: Some(stroke_width),
        ..ElementUpdate::default()
    };

    match &element.kind {
        ElementKind::Rect { width, height } => {
            let w = (width * t.scale_x).max(MIN_SIZE);
            let h = (height * t.scale_y).max(MIN_SIZE);
            update.x = Some(new_center.x - w / 2.0);
            update.y = Some(new_center.y - h / 2.0);
            update.width = Some(w);
            update.height = Some(h);
            update.rotation = Some(rotation);
        }
        ElementKind::Circle { radius } => {
            let scale = t.scale_x.max(t.scale_y);
            update.x = Some(new_center.x);
            update.y = Some(new_center.y);
            update.radius = Some((radius * scale).max(MIN_SIZE));
            update.rotation = Some(rotation);
        }
        ElementKind::Ellipse { radius_x, radius_y } => {
            update.x = Some(new_center.x);
            update.y = Some(new_center.y);
            update.radius_x = Some((radius_x * t.scale_x).max(MIN_SIZE));
            update.radius_y = Some((radius_y * t.scale_y).max(MIN_SIZE));
            update.rotation = Some(rotation);
        }
        ElementKind::Text {
            content,
            width,
            font_size,
            line_height,
            ..
        } => {
            let w = (width * t.scale_x).max(MIN_SIZE);
            let fs = (font_size * t.scale_y).max(MIN_SIZE);
            let h = Element::text_height(fs, *line_height, content);
            update.x = Some(new_center.x - w / 2.0);
            update.y = Some(new_center.y - h / 2.0);
            update.width = Some(w);
            update.font_size = Some(fs);
            update.rotation = Some(rotation);
        }
        ElementKind::Line { x2, y2 } => {
            let start = local(Point::new(element.x, element.y));
            let end = local(Point::new(*x2, *y2));
            update.x = Some(start.x);
            update.y = Some(start.y);
            update.x2 = Some(end.x);
            update.y2 = Some(end.y);
        }
        ElementKind::Drawing { points } => {
            let mapped = drawing_points(points)
                .map(local)
                .flat_map(|p| [p.x, p.y])
                .collect();
            update.points = Some(mapped);
        }
        ElementKind::Path { points } => {
            let anchor = Point::new(element.x, element.y);
            let new_anchor = local(anchor);
            let mapped = points
                .iter()
                .map(|pp| {
                    pp.map(|rel| {
                        let abs = local(Point::new(anchor.x + rel.x, anchor.y + rel.y));
                        Point::new(abs.x - new_anchor.x, abs.y - new_anchor.y)
                    })
                })
                .collect();
            update.x = Some(new_anchor.x);
            update.y = Some(new_anchor.y);
            update.path_points = Some(mapped);
        }
    }

    update
}

/// Mirrors an element across the line `x = value` or `y = value`.
///
/// Rotation is negated. Skew is left as is.
pub fn reflect_element(element: &Element, axis: Axis, value: f64) -> ElementUpdate {
    let mirror = |v: f64| 2.0 * value - v;
    let horizontal = axis == Axis::Vertical;

    let mut update = ElementUpdate {
        rotation: Some(normalize_rotation(-element.rotation)),
        ..ElementUpdate::default()
    };

    match &element.kind {
        ElementKind::Rect { width, height } => {
            if horizontal {
                update.x = Some(mirror(element.x) - width);
            } else {
                update.y = Some(mirror(element.y) - height);
            }
        }
        ElementKind::Text {
            content,
            width,
            font_size,
            line_height,
            ..
        } => {
            if horizontal {
                update.x = Some(mirror(element.x) - width);
            } else {
                let height = Element::text_height(*font_size, *line_height, content);
                update.y = Some(mirror(element.y) - height);
            }
        }
        ElementKind::Circle { .. } | ElementKind::Ellipse { .. } => {
            if horizontal {
                update.x = Some(mirror(element.x));
            } else {
                update.y = Some(mirror(element.y));
            }
        }
        ElementKind::Line { x2, y2 } => {
            if horizontal {
                update.x = Some(mirror(element.x));
                update.x2 = Some(mirror(*x2));
            } else {
                update.y = Some(mirror(element.y));
                update.y2 = Some(mirror(*y2));
            }
        }
        ElementKind::Drawing { points } => {
            let mapped = points
                .iter()
                .enumerate()
                .map(|(i, &v)| {
                    let is_x = i % 2 == 0;
                    if is_x == horizontal {
                        mirror(v)
                    } else {
                        v
                    }
                })
                .collect();
            update.points = Some(mapped);
        }
        ElementKind::Path { points } => {
            // Absolute a + r mirrors to (2v - a) + (-r).
            let mapped = points
                .iter()
                .map(|pp| {
                    pp.map(|rel| {
                        if horizontal {
                            Point::new(-rel.x, rel.y)
                        } else {
                            Point::new(rel.x, -rel.y)
                        }
                    })
                })
                .collect();
            if horizontal {
                update.x = Some(mirror(element.x));
            } else {
                update.y = Some(mirror(element.y));
            }
            update.path_points = Some(mapped);
        }
    }

    update
}

/// Moves an element by `(dx, dy)`.
pub fn translate_element(element: &Element, dx: f64, dy: f64) -> ElementUpdate {
    let mut update = ElementUpdate::position(element.x + dx, element.y + dy);
    match &element.kind {
        ElementKind::Line { x2, y2 } => {
            update.x2 = Some(x2 + dx);
            update.y2 = Some(y2 + dy);
        }
        ElementKind::Drawing { points } => {
            update.x = None;
            update.y = None;
            update.points = Some(
                drawing_points(points)
                    .flat_map(|p| [p.x + dx, p.y + dy])
                    .collect(),
            );
        }
        ElementKind::Rect { .. }
        | ElementKind::Circle { .. }
        | ElementKind::Ellipse { .. }
        | ElementKind::Path { .. }
        | ElementKind::Text { .. } => {}
    }
    update
}
