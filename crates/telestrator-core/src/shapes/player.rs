//! Player marker shape.

use super::{ShapeId, ShapeStyle, ShapeTrait};
use kurbo::{BezPath, Point, Rect, Shape as KurboShape};
use serde::{Deserialize, Serialize};

/// A filled dot marking a player position.
///
/// Committed instantly on tap; there is no drag phase. The radius is derived
/// from the stroke width at creation time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub(crate) id: ShapeId,
    /// Center point.
    pub center: Point,
    /// Radius in canvas pixels.
    pub radius: f64,
    /// Style properties.
    pub style: ShapeStyle,
}

impl Player {
    /// Create a marker at the given center, sized from the style's stroke width.
    pub fn new(center: Point, style: ShapeStyle) -> Self {
        Self {
            id: ShapeId::next(),
            center,
            radius: Self::radius_for_width(style.stroke_width),
            style,
        }
    }

    /// Marker radius for a given stroke width.
    pub fn radius_for_width(stroke_width: f64) -> f64 {
        (stroke_width * 3.0).max(6.0)
    }
}

impl ShapeTrait for Player {
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
