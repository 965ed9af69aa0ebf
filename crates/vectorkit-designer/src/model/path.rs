use serde::{Deserialize, Serialize};

use super::Point;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PathCommand {
    Move,
    Line,
    Curve,
    Close,
}

/// One vertex of a path, relative to the owning element's anchor.
///
/// Curve points carry the two cubic bezier control points leading into
/// the vertex.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathPoint {
    pub command: PathCommand,
    pub x: f64,
    pub y: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub control1: Option<Point>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub control2: Option<Point>,
}

impl PathPoint {
    pub fn move_to(x: f64, y: f64) -> Self {
        Self::plain(PathCommand::Move, x, y)
    }

    pub fn line_to(x: f64, y: f64) -> Self {
        Self::plain(PathCommand::Line, x, y)
    }

    pub fn curve_to(control1: Point, control2: Point, x: f64, y: f64) -> Self {
        Self {
            command: PathCommand::Curve,
            x,
            y,
            control1: Some(control1),
            control2: Some(control2),
        }
    }

    pub fn close(x: f64, y: f64) -> Self {
        Self::plain(PathCommand::Close, x, y)
    }

    fn plain(command: PathCommand, x: f64, y: f64) -> Self {
        Self {
            command,
            x,
            y,
            control1: None,
            control2: None,
        }
    }

    /// The vertex followed by any control points.
    pub fn coordinates(&self) -> impl Iterator<Item = Point> + '_ {
        std::iter::once(Point::new(self.x, self.y))
            .chain(self.control1)
            .chain(self.control2)
    }

    /// Applies `f` to the vertex and both control points.
    pub fn map(&self, mut f: impl FnMut(Point) -> Point) -> Self {
        let p = f(Point::new(self.x, self.y));
        Self {
            command: self.command,
            x: p.x,
            y: p.y,
            control1: self.control1.map(&mut f),
            control2: self.control2.map(&mut f),
        }
    }
}
