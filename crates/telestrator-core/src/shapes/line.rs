//! Straight line shape.

use super::{ShapeId, ShapeStyle, ShapeTrait};
use kurbo::{BezPath, Point, Rect};
use serde::{Deserialize, Serialize};

/// A straight line segment.
///
/// While being drawn, both endpoints start at the press position and the end
/// point follows the drag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Line {
    pub(crate) id: ShapeId,
    /// Start point.
    pub start: Point,
    /// End point.
    pub end: Point,
    /// Style properties.
    pub style: ShapeStyle,
}

impl Line {
    /// Create a new line with both endpoints at the given point.
    pub fn new(start: Point, style: ShapeStyle) -> Self {
        Self {
            id: ShapeId::next(),
            start,
            end: start,
            style,
        }
    }

    /// Create a line between two points.
    pub fn between(start: Point, end: Point, style: ShapeStyle) -> Self {
        Self {
            id: ShapeId::next(),
            start,
            end,
            style,
        }
    }

    /// Move the end point (drag update).
    pub fn set_end(&mut self, end: Point) {
        self.end = end;
    }

    /// Get the length of the segment.
    pub fn length(&self) -> f64 {
        self.start.distance(self.end)
    }
}

impl ShapeTrait for Line {
    fn id(&self) -> ShapeId {
        self.id
    }

    fn bounds(&self) -> Rect {
        Rect::from_points(self.start, self.end)
    }

    fn to_path(&self) -> BezPath {
        let mut path = BezPath::new();
        path.move_to(self.start);
        path.line_to(self.end);
        path
    }

    fn style(&self) -> &ShapeStyle {
        &self.style
    }

    fn style_mut(&mut self) -> &mut ShapeStyle {
        &mut self.style
    }
}
