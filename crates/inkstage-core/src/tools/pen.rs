//! Path drawing with explicit closing.

use super::pencil::{begin_stroke, extend_stroke, finish_stroke};
use super::{ToolHandler, ToolKind};
use crate::canvas::Canvas;
use crate::elements::{Element, ElementKind, ElementPatch};
use kurbo::Point;

/// Accumulates points like the pencil, but can close the path.
///
/// While drawing, returning within the close radius of the start point (after
/// having left it, with at least three points) arms `is_closing_path`. A
/// release or double-click while armed commits a closed path. Proximity to
/// the start decides: a double-click away from the start commits an open
/// path. A double-click with no stroke in progress closes the selected open
/// pen path.
#[derive(Debug, Default)]
pub struct PenTool {
    start: Option<Point>,
    left_start: bool,
}

impl PenTool {
    pub fn new() -> Self {
        Self::default()
    }

    fn finish(&mut self, canvas: &mut Canvas) {
        let closed = canvas.session().is_closing_path;
        let mut patch = ElementPatch::default();
        if closed {
            patch.closed = Some(true);
            patch.fill = canvas.drawing_style().fill;
        }
        self.start = None;
        self.left_start = false;
        finish_stroke(canvas, patch);
    }

    fn close_selected(canvas: &mut Canvas) -> bool {
        let Some(stroke) = canvas.selected_element().and_then(Element::as_stroke) else {
            return false;
        };
        if stroke.base.kind != ElementKind::Pen
            || stroke.closed
            || stroke.point_count() < 3
        {
            return false;
        }
        let id = stroke.base.id().clone();
        let fill = stroke.fill.or(canvas.drawing_style().fill);
        canvas.update_element(
            &id,
            ElementPatch {
                closed: Some(true),
                fill,
                ..Default::default()
            },
        )
    }
}

impl ToolHandler for PenTool {
    fn kind(&self) -> ToolKind {
        ToolKind::Pen
    }

    fn on_pointer_down(&mut self, canvas: &mut Canvas, point: Point) {
        self.start = Some(point);
        self.left_start = false;
        begin_stroke(canvas, ElementKind::Pen, point);
    }

    fn on_pointer_move(&mut self, canvas: &mut Canvas, point: Point) {
        let Some(start) = self.start else {
            return;
        };
        extend_stroke(canvas, point);

        let radius = canvas.config().pen_close_radius;
        let near_start = start.distance(point) <= radius;
        if !near_start {
            self.left_start = true;
        }
        let point_count = canvas
            .session()
            .draft
            .as_ref()
            .and_then(Element::as_stroke)
            .map_or(0, |stroke| stroke.point_count());

        let session = canvas.session_mut();
        session.is_closing_path = self.left_start && near_start && point_count >= 3;
    }

    fn on_pointer_up(&mut self, canvas: &mut Canvas, _point: Point) {
        if canvas.session().is_drawing {
            self.finish(canvas);
        }
    }

    fn on_double_click(&mut self, canvas: &mut Canvas, _point: Point) {
        if canvas.session().is_drawing {
            self.finish(canvas);
        } else if Self::close_selected(canvas) {
            log::debug!("Closed pen path");
        }
    }
}
