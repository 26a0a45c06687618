//! Drawing tool state and pointer handling.
//!
//! `ToolController` turns raw pointer events into shape lifecycle actions.
//! It knows nothing about recording: every transition is reported as a
//! [`StrokeAction`] value, which the recording session may timestamp and
//! append to its event log.

use crate::shapes::{Arrow, Circle, Line, Pen, Player, SerializableColor, Shape, ShapeId, ShapeStyle};
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Minimum radius for a dragged circle to be committed.
///
/// Rejects accidental taps with the circle tool.
pub const MIN_CIRCLE_RADIUS: f64 = 3.0;

/// Available drawing tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ToolKind {
    #[default]
    Pen,
    Line,
    Circle,
    Player,
    Arrow,
}

/// A shape lifecycle transition reported by the tool controller.
///
/// `Started` and `Updated` carry the latest full snapshot of the shape, not a
/// delta, so consumers never need to track partial geometry.
#[derive(Debug, Clone, PartialEq)]
pub enum StrokeAction {
    /// A new shape began forming.
    Started { id: ShapeId, shape: Shape },
    /// The in-progress shape's geometry changed.
    Updated { id: ShapeId, shape: Shape },
    /// The shape was finalized.
    Committed { id: ShapeId },
    /// The most recently committed shape was removed.
    Undone,
    /// All shapes were removed.
    Cleared,
}

/// Holds the active tool settings and the drawing surface state.
#[derive(Debug, Clone)]
pub struct ToolController {
    /// Currently selected tool.
    pub active_tool: ToolKind,
    /// Stroke color applied to new shapes.
    pub color: SerializableColor,
    /// Stroke width applied to new shapes.
    pub stroke_width: f64,
    /// Finalized shapes, in commit order.
    committed: Vec<Shape>,
    /// Shape currently being drawn, if any.
    current: Option<Shape>,
}

impl Default for ToolController {
    fn default() -> Self {
        Self {
            active_tool: ToolKind::default(),
            color: SerializableColor::white(),
            stroke_width: 4.0,
            committed: Vec::new(),
            current: None,
        }
    }
}

impl ToolController {
    /// Create a new tool controller with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the active tool. Any in-progress shape is discarded.
    pub fn set_tool(&mut self, tool: ToolKind) {
        self.active_tool = tool;
        self.current = None;
    }

    fn style(&self) -> ShapeStyle {
        ShapeStyle::new(self.color, self.stroke_width)
    }

    /// Handle a pointer press at canvas coordinates.
    pub fn pointer_down(&mut self, x: f64, y: f64) -> Vec<StrokeAction> {
        let p = Point::new(x, y);
        let style = self.style();

        match self.active_tool {
            ToolKind::Pen => self.begin(Shape::Pen(Pen::new(p, style))),
            ToolKind::Line => self.begin(Shape::Line(Line::new(p, style))),
            ToolKind::Circle => self.begin(Shape::Circle(Circle::new(p, style))),
            ToolKind::Arrow => self.begin(Shape::Arrow(Arrow::new(p, style))),
            ToolKind::Player => {
                // No drag phase: the marker is committed immediately.
                let shape = Shape::Player(Player::new(p, style));
                let id = shape.id();
                let started = StrokeAction::Started {
                    id,
                    shape: shape.clone(),
                };
                self.committed.push(shape);
                vec![started, StrokeAction::Committed { id }]
            }
        }
    }

    fn begin(&mut self, shape: Shape) -> Vec<StrokeAction> {
        let id = shape.id();
        let snapshot = shape.clone();
        self.current = Some(shape);
        vec![StrokeAction::Started { id, shape: snapshot }]
    }

    /// Handle a pointer move at canvas coordinates.
    pub fn pointer_move(&mut self, x: f64, y: f64) -> Option<StrokeAction> {
        let p = Point::new(x, y);
        let current = self.current.as_mut()?;

        match current {
            Shape::Pen(pen) => pen.add_point(p),
            Shape::Line(line) => line.set_end(p),
            Shape::Circle(circle) => circle.grow_to(p),
            Shape::Arrow(arrow) => arrow.set_end(p),
            // The player tool never has an in-progress shape.
            Shape::Player(_) => return None,
        }

        Some(StrokeAction::Updated {
            id: current.id(),
            shape: current.clone(),
        })
    }

    /// Handle a pointer release.
    ///
    /// Commits the in-progress shape, except for circles below
    /// [`MIN_CIRCLE_RADIUS`], which are discarded.
    pub fn pointer_up(&mut self) -> Option<StrokeAction> {
        let shape = self.current.take()?;

        if let Shape::Circle(circle) = &shape {
            if circle.radius < MIN_CIRCLE_RADIUS {
                return None;
            }
        }

        let id = shape.id();
        self.committed.push(shape);
        Some(StrokeAction::Committed { id })
    }

    /// Discard the in-progress shape without committing it.
    pub fn cancel(&mut self) {
        self.current = None;
    }

    /// Undo the most recent drawing step.
    ///
    /// Discards any in-progress shape first; otherwise removes the last
    /// committed shape. No-op on an already-empty state.
    pub fn undo(&mut self) -> Option<StrokeAction> {
        if self.current.take().is_some() {
            return None;
        }
        self.committed.pop().map(|_| StrokeAction::Undone)
    }

    /// Remove all committed and in-progress shapes.
    pub fn clear(&mut self) -> StrokeAction {
        self.committed.clear();
        self.current = None;
        StrokeAction::Cleared
    }

    /// Finalized shapes, in commit order.
    pub fn committed_shapes(&self) -> &[Shape] {
        &self.committed
    }

    /// Replace the committed shapes (used when loading a saved session).
    pub fn set_committed_shapes(&mut self, shapes: Vec<Shape>) {
        self.committed = shapes;
        self.current = None;
    }

    /// The shape currently being drawn, if any.
    pub fn current_shape(&self) -> Option<&Shape> {
        self.current.as_ref()
    }

    /// All shapes to draw: committed shapes, then the in-progress one on top.
    pub fn visible_shapes(&self) -> Vec<Shape> {
        let mut out = self.committed.clone();
        if let Some(current) = &self.current {
            out.push(current.clone());
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pen_lifecycle() {
        let mut tc = ToolController::new();

        let actions = tc.pointer_down(10.0, 10.0);
        assert!(matches!(actions.as_slice(), [StrokeAction::Started { .. }]));

        let update = tc.pointer_move(20.0, 20.0).unwrap();
        match update {
            StrokeAction::Updated { shape: Shape::Pen(pen), .. } => assert_eq!(pen.len(), 2),
            other => panic!("unexpected action: {other:?}"),
        }

        assert!(matches!(tc.pointer_up(), Some(StrokeAction::Committed { .. })));
        assert_eq!(tc.committed_shapes().len(), 1);
    }

    #[test]
    fn test_line_endpoints_track_drag() {
        let mut tc = ToolController::new();
        tc.set_tool(ToolKind::Line);

        tc.pointer_down(5.0, 5.0);
        tc.pointer_move(50.0, 60.0);
        tc.pointer_up();

        match &tc.committed_shapes()[0] {
            Shape::Line(line) => {
                assert_eq!(line.start, Point::new(5.0, 5.0));
                assert_eq!(line.end, Point::new(50.0, 60.0));
            }
            other => panic!("unexpected shape: {other:?}"),
        }
    }

    #[test]
    fn test_small_circle_rejected() {
        let mut tc = ToolController::new();
        tc.set_tool(ToolKind::Circle);

        tc.pointer_down(10.0, 10.0);
        tc.pointer_move(12.0, 10.0); // radius 2 < MIN_CIRCLE_RADIUS
        assert!(tc.pointer_up().is_none());
        assert!(tc.committed_shapes().is_empty());
    }

    #[test]
    fn test_large_circle_committed() {
        let mut tc = ToolController::new();
        tc.set_tool(ToolKind::Circle);

        tc.pointer_down(10.0, 10.0);
        tc.pointer_move(20.0, 10.0);
        assert!(tc.pointer_up().is_some());
        assert_eq!(tc.committed_shapes().len(), 1);
    }

    #[test]
    fn test_player_commits_on_down() {
        let mut tc = ToolController::new();
        tc.set_tool(ToolKind::Player);

        let actions = tc.pointer_down(30.0, 30.0);
        assert!(matches!(
            actions.as_slice(),
            [StrokeAction::Started { .. }, StrokeAction::Committed { .. }]
        ));
        assert_eq!(tc.committed_shapes().len(), 1);

        // Move/up are no-ops for this tool
        assert!(tc.pointer_move(40.0, 40.0).is_none());
        assert!(tc.pointer_up().is_none());
        assert_eq!(tc.committed_shapes().len(), 1);
    }

    #[test]
    fn test_undo_discards_in_progress_first() {
        let mut tc = ToolController::new();
        tc.pointer_down(0.0, 0.0);
        tc.pointer_up();

        tc.pointer_down(10.0, 10.0);
        assert!(tc.current_shape().is_some());

        // First undo only cancels the in-progress stroke
        assert!(tc.undo().is_none());
        assert!(tc.current_shape().is_none());
        assert_eq!(tc.committed_shapes().len(), 1);

        // Second undo removes the committed stroke
        assert!(matches!(tc.undo(), Some(StrokeAction::Undone)));
        assert!(tc.committed_shapes().is_empty());
    }

    #[test]
    fn test_cancel_discards_in_progress() {
        let mut tc = ToolController::new();
        tc.pointer_down(0.0, 0.0);
        tc.cancel();

        assert!(tc.current_shape().is_none());
        assert!(tc.pointer_up().is_none());
        assert!(tc.committed_shapes().is_empty());
    }

    #[test]
    fn test_set_committed_shapes_replaces_surface() {
        let mut tc = ToolController::new();
        tc.pointer_down(0.0, 0.0);
        tc.pointer_up();

        let mut other = ToolController::new();
        other.pointer_down(5.0, 5.0);
        other.pointer_up();
        other.pointer_down(9.0, 9.0);

        other.set_committed_shapes(tc.committed_shapes().to_vec());
        assert_eq!(other.committed_shapes().len(), 1);
        assert_eq!(other.committed_shapes()[0].id(), tc.committed_shapes()[0].id());
        assert!(other.current_shape().is_none());
    }

    #[test]
    fn test_undo_on_empty_is_noop() {
        let mut tc = ToolController::new();
        assert!(tc.undo().is_none());
        assert!(tc.undo().is_none());
    }

    #[test]
    fn test_clear() {
        let mut tc = ToolController::new();
        tc.pointer_down(0.0, 0.0);
        tc.pointer_up();
        tc.pointer_down(5.0, 5.0);

        assert!(matches!(tc.clear(), StrokeAction::Cleared));
        assert!(tc.committed_shapes().is_empty());
        assert!(tc.current_shape().is_none());
    }

    #[test]
    fn test_visible_shapes_includes_current_on_top() {
        let mut tc = ToolController::new();
        tc.pointer_down(0.0, 0.0);
        tc.pointer_up();
        tc.pointer_down(5.0, 5.0);

        let visible = tc.visible_shapes();
        assert_eq!(visible.len(), 2);
        assert_eq!(visible[1].id(), tc.current_shape().unwrap().id());
    }
}
