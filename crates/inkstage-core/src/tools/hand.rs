//! Canvas panning.

use super::{ToolHandler, ToolKind};
use crate::canvas::Canvas;
use kurbo::Point;

/// Drags the view. The document point under the pointer at press time stays
/// under the pointer for the whole gesture.
#[derive(Debug, Default)]
pub struct HandTool {
    anchor: Option<Point>,
}

impl HandTool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_panning(&self) -> bool {
        self.anchor.is_some()
    }
}

impl ToolHandler for HandTool {
    fn kind(&self) -> ToolKind {
        ToolKind::Hand
    }

    fn on_pointer_down(&mut self, _canvas: &mut Canvas, point: Point) {
        self.anchor = Some(point);
    }

    fn on_pointer_move(&mut self, canvas: &mut Canvas, point: Point) {
        if let Some(anchor) = self.anchor {
            let offset = canvas.view_offset() + (point - anchor);
            canvas.set_view_offset(offset);
        }
    }

    fn on_pointer_up(&mut self, _canvas: &mut Canvas, _point: Point) {
        self.anchor = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Vec2;

    #[test]
    fn test_pan_moves_offset() {
        let mut canvas = Canvas::default();
        let mut tool = HandTool::new();

        tool.on_pointer_down(&mut canvas, Point::new(100.0, 100.0));
        assert!(tool.is_panning());
        tool.on_pointer_move(&mut canvas, Point::new(130.0, 90.0));
        assert_eq!(canvas.view_offset(), Vec2::new(30.0, -10.0));

        // The host re-maps the pointer with the new offset, so the same
        // screen position now lands back on the anchor.
        tool.on_pointer_move(&mut canvas, Point::new(100.0, 100.0));
        assert_eq!(canvas.view_offset(), Vec2::new(30.0, -10.0));

        tool.on_pointer_up(&mut canvas, Point::new(100.0, 100.0));
        assert!(!tool.is_panning());
        tool.on_pointer_move(&mut canvas, Point::new(500.0, 500.0));
        assert_eq!(canvas.view_offset(), Vec2::new(30.0, -10.0));
        assert!(canvas.elements().is_empty());
        assert_eq!(canvas.undo_depth(), 0);
    }
}
