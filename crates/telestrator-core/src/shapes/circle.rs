//! Outline circle shape.

use super::{ShapeId, ShapeStyle, ShapeTrait};
use kurbo::{BezPath, Point, Rect, Shape as KurboShape};
use serde::{Deserialize, Serialize};

/// An outline circle, sized by dragging from its center.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    pub(crate) id: ShapeId,
    /// Center point.
    pub center: Point,
    /// Radius in canvas pixels.
    pub radius: f64,
    /// Style properties.
    pub style: ShapeStyle,
}

impl Circle {
    /// Create a new zero-radius circle at the given center.
    pub fn new(center: Point, style: ShapeStyle) -> Self {
        Self {
            id: ShapeId::next(),
            center,
            radius: 0.0,
            style,
        }
    }

    /// Grow the radius to reach the cursor position.
    pub fn grow_to(&mut self, cursor: Point) {
        self.radius = self.center.distance(cursor);
    }
}

impl ShapeTrait for Circle {
    fn id(&self) -> ShapeId {
        self.id
    }

    fn bounds(&self) -> Rect {
        Rect::new(
            self.center.x - self.radius,
            self.center.y - self.radius,
            self.center.x + self.radius,
            self.center.y + self.radius,
        )
    }

    fn to_path(&self) -> BezPath {
        kurbo::Circle::new(self.center, self.radius).to_path(0.1)
    }

    fn style(&self) -> &ShapeStyle {
        &self.style
    }

    fn style_mut(&mut self) -> &mut ShapeStyle {
        &mut self.style
    }
}
