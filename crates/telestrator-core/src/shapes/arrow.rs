//! Arrow shape.

use super::{ShapeId, ShapeStyle, ShapeTrait};
use kurbo::{BezPath, Point, Rect, Vec2};
use serde::{Deserialize, Serialize};

/// An arrow (line with a derived arrowhead).
///
/// Only the shaft endpoints are stored; the arrowhead triangle is computed
/// from the direction and the stroke width.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Arrow {
    pub(crate) id: ShapeId,
    /// Start point.
    pub start: Point,
    /// End point (where the arrowhead points).
    pub end: Point,
    /// Style properties.
    pub style: ShapeStyle,
}

impl Arrow {
    /// Create a new arrow with both endpoints at the given point.
    pub fn new(start: Point, style: ShapeStyle) -> Self {
        Self {
            id: ShapeId::next(),
            start,
            end: start,
            style,
        }
    }

    /// Create an arrow between two points.
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

    /// Get the direction vector (normalized).
    pub fn direction(&self) -> Vec2 {
        let d = self.end - self.start;
        let len = d.hypot();
        if len < f64::EPSILON {
            Vec2::new(1.0, 0.0)
        } else {
            d / len
        }
    }

    /// Get the length of the arrow shaft.
    pub fn length(&self) -> f64 {
        self.start.distance(self.end)
    }

    /// Arrowhead triangle as `[left wing, tip, right wing]`.
    pub fn head_points(&self) -> [Point; 3] {
        let w = self.style.stroke_width;
        let head_len = (w * 4.0).max(10.0);
        let head_width = (w * 3.0).max(8.0);

        let dir = self.direction();
        let perp = Vec2::new(-dir.y, dir.x);

        let back = self.end - dir * head_len;
        let left = back + perp * (head_width / 2.0);
        let right = back - perp * (head_width / 2.0);

        [left, self.end, right]
    }
}

impl ShapeTrait for Arrow {
    fn id(&self) -> ShapeId {
        self.id
    }

    fn bounds(&self) -> Rect {
        let [left, tip, right] = self.head_points();
        let mut min_x = left.x.min(right.x).min(tip.x).min(self.start.x);
        let mut min_y = left.y.min(right.y).min(tip.y).min(self.start.y);
        let mut max_x = left.x.max(right.x).max(tip.x).max(self.start.x);
        let mut max_y = left.y.max(right.y).max(tip.y).max(self.start.y);
        min_x = min_x.min(self.end.x);
        min_y = min_y.min(self.end.y);
        max_x = max_x.max(self.end.x);
        max_y = max_y.max(self.end.y);
        Rect::new(min_x, min_y, max_x, max_y)
    }

    fn to_path(&self) -> BezPath {
        let mut path = BezPath::new();

        if self.start == self.end {
            return path;
        }

        // Shaft
        path.move_to(self.start);
        path.line_to(self.end);

        // Head triangle
        let [left, tip, right] = self.head_points();
        path.move_to(left);
        path.line_to(tip);
        path.line_to(right);
        path.close_path();

        path
    }

    fn style(&self) -> &ShapeStyle {
        &self.style
    }

    fn style_mut(&mut self) -> &mut ShapeStyle {
        &mut self.style
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arrow_creation() {
        let arrow = Arrow::between(
            Point::new(0.0, 0.0),
            Point::new(100.0, 0.0),
            ShapeStyle::default(),
        );
        assert!((arrow.length() - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_direction() {
        let arrow = Arrow::between(
            Point::new(0.0, 0.0),
            Point::new(100.0, 0.0),
            ShapeStyle::default(),
        );
        let dir = arrow.direction();
        assert!((dir.x - 1.0).abs() < f64::EPSILON);
        assert!(dir.y.abs() < f64::EPSILON);
    }

    #[test]
    fn test_head_points_behind_tip() {
        let arrow = Arrow::between(
            Point::new(0.0, 0.0),
            Point::new(100.0, 0.0),
            ShapeStyle::default(),
        );
        let [left, tip, right] = arrow.head_points();
        assert_eq!(tip, arrow.end);
        assert!(left.x < 100.0);
        assert!(right.x < 100.0);
        // Wings mirror across the shaft
        assert!((left.y + right.y).abs() < f64::EPSILON);
    }

    #[test]
    fn test_head_size_floor() {
        // Thin strokes still get a visible head
        let style = ShapeStyle::new(crate::shapes::SerializableColor::white(), 1.0);
        let arrow = Arrow::between(Point::new(0.0, 0.0), Point::new(100.0, 0.0), style);
        let [left, _, _] = arrow.head_points();
        assert!((100.0 - left.x - 10.0).abs() < f64::EPSILON);
    }
}
