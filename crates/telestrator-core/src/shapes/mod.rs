//! Annotation shape definitions.

mod arrow;
mod circle;
mod line;
mod pen;
mod player;

pub use arrow::Arrow;
pub use circle::Circle;
pub use line::Line;
pub use pen::Pen;
pub use player::Player;

use kurbo::{BezPath, Rect};
use peniko::Color;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Serializable color representation (RGBA8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerializableColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl SerializableColor {
    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn black() -> Self {
        Self::new(0, 0, 0, 255)
    }

    pub fn white() -> Self {
        Self::new(255, 255, 255, 255)
    }
}

impl From<Color> for SerializableColor {
    fn from(color: Color) -> Self {
        let rgba = color.to_rgba8();
        Self {
            r: rgba.r,
            g: rgba.g,
            b: rgba.b,
            a: rgba.a,
        }
    }
}

impl From<SerializableColor> for Color {
    fn from(color: SerializableColor) -> Self {
        Color::from_rgba8(color.r, color.g, color.b, color.a)
    }
}

/// Style properties shared by all annotation shapes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShapeStyle {
    /// Stroke color.
    pub stroke_color: SerializableColor,
    /// Stroke width in canvas pixels.
    pub stroke_width: f64,
}

impl ShapeStyle {
    pub fn new(stroke_color: SerializableColor, stroke_width: f64) -> Self {
        Self {
            stroke_color,
            stroke_width,
        }
    }

    /// Get the stroke color as a peniko Color.
    pub fn stroke(&self) -> Color {
        self.stroke_color.into()
    }

    /// Set the stroke color from a peniko Color.
    pub fn set_stroke(&mut self, color: Color) {
        self.stroke_color = color.into();
    }
}

impl Default for ShapeStyle {
    fn default() -> Self {
        Self {
            stroke_color: SerializableColor::white(),
            stroke_width: 4.0,
        }
    }
}

/// Unique identifier for shapes.
///
/// IDs are monotonic within a process, so the commit order of shapes can be
/// recovered from their IDs alone.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct ShapeId(u64);

impl ShapeId {
    /// Allocate the next shape ID.
    pub fn next() -> Self {
        use std::sync::atomic::{AtomicU64, Ordering};

        static ID_COUNTER: AtomicU64 = AtomicU64::new(1);
        Self(ID_COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    /// Reconstruct an ID from its raw value (for storage).
    pub fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    pub fn raw(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ShapeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Common trait for all shapes.
pub trait ShapeTrait {
    /// Get the unique identifier.
    fn id(&self) -> ShapeId;

    /// Get the bounding box in canvas coordinates.
    fn bounds(&self) -> Rect;

    /// Get the path representation for rendering.
    fn to_path(&self) -> BezPath;

    /// Get the style.
    fn style(&self) -> &ShapeStyle;

    /// Get mutable style.
    fn style_mut(&mut self) -> &mut ShapeStyle;
}

/// Enum wrapper for all shape types (for serialization and the event log).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Shape {
    Pen(Pen),
    Line(Line),
    Circle(Circle),
    Player(Player),
    Arrow(Arrow),
}

impl Shape {
    pub fn id(&self) -> ShapeId {
        match self {
            Shape::Pen(s) => s.id(),
            Shape::Line(s) => s.id(),
            Shape::Circle(s) => s.id(),
            Shape::Player(s) => s.id(),
            Shape::Arrow(s) => s.id(),
        }
    }

    pub fn bounds(&self) -> Rect {
        match self {
            Shape::Pen(s) => s.bounds(),
            Shape::Line(s) => s.bounds(),
            Shape::Circle(s) => s.bounds(),
            Shape::Player(s) => s.bounds(),
            Shape::Arrow(s) => s.bounds(),
        }
    }

    pub fn to_path(&self) -> BezPath {
        match self {
            Shape::Pen(s) => s.to_path(),
            Shape::Line(s) => s.to_path(),
            Shape::Circle(s) => s.to_path(),
            Shape::Player(s) => s.to_path(),
            Shape::Arrow(s) => s.to_path(),
        }
    }

    pub fn style(&self) -> &ShapeStyle {
        match self {
            Shape::Pen(s) => s.style(),
            Shape::Line(s) => s.style(),
            Shape::Circle(s) => s.style(),
            Shape::Player(s) => s.style(),
            Shape::Arrow(s) => s.style(),
        }
    }

    pub fn style_mut(&mut self) -> &mut ShapeStyle {
        match self {
            Shape::Pen(s) => s.style_mut(),
            Shape::Line(s) => s.style_mut(),
            Shape::Circle(s) => s.style_mut(),
            Shape::Player(s) => s.style_mut(),
            Shape::Arrow(s) => s.style_mut(),
        }
    }

    /// Whether the shape is drawn filled rather than stroked.
    pub fn is_filled(&self) -> bool {
        matches!(self, Shape::Player(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Point;

    #[test]
    fn test_shape_id_raw_round_trip() {
        let id = ShapeId::next();
        assert_eq!(ShapeId::from_raw(id.raw()), id);
        assert_eq!(format!("{id}"), id.raw().to_string());
    }

    #[test]
    fn test_only_player_is_filled() {
        let style = ShapeStyle::default();
        let marker = Shape::Player(Player::new(Point::new(0.0, 0.0), style));
        let stroke = Shape::Pen(Pen::new(Point::new(0.0, 0.0), style));

        assert!(marker.is_filled());
        assert!(!stroke.is_filled());
    }

    #[test]
    fn test_color_round_trip_through_peniko() {
        let color = SerializableColor::new(200, 40, 10, 128);
        let back: SerializableColor = Color::from(color).into();
        assert_eq!(back, color);
    }
}
