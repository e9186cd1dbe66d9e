//! Freehand drawing.

use super::{ToolHandler, ToolKind};
use crate::canvas::Canvas;
use crate::elements::{Element, ElementKind, ElementPatch};
use kurbo::Point;

/// Start a stroke draft at `point`, in document coordinates.
pub(super) fn begin_stroke(canvas: &mut Canvas, kind: ElementKind, point: Point) {
    canvas.select_element(None);
    let style = canvas.drawing_style().clone();
    let draft = Element::create_default(kind, 0.0, 0.0, None).update(ElementPatch {
        points: Some(vec![point.x, point.y]),
        stroke: Some(style.stroke),
        stroke_width: Some(style.stroke_width),
        ..Default::default()
    });
    let session = canvas.session_mut();
    session.draft = Some(draft);
    session.is_drawing = true;
    session.is_closing_path = false;
}

/// Append a point to the stroke draft.
pub(super) fn extend_stroke(canvas: &mut Canvas, point: Point) {
    let session = canvas.session_mut();
    if !session.is_drawing {
        return;
    }
    if let Some(Element::Stroke(stroke)) = &mut session.draft {
        stroke.points.extend([point.x, point.y]);
    }
}

/// Normalize and commit the stroke draft, selecting the new element.
///
/// Strokes with fewer than two points are dropped.
pub(super) fn finish_stroke(canvas: &mut Canvas, patch: ElementPatch) {
    let draft = canvas.session_mut().draft.take();
    canvas.reset_session();

    let Some(Element::Stroke(stroke)) = draft else {
        return;
    };
    let Some(normalized) = stroke.normalized() else {
        log::debug!("Discarded stroke with {} points", stroke.point_count());
        return;
    };

    let element = Element::Stroke(normalized).update(patch);
    let id = element.id().clone();
    match canvas.add_element(element) {
        Ok(()) => {
            canvas.select_element(Some(id));
        }
        Err(err) => log::error!("Failed to commit stroke: {err}"),
    }
}

/// Samples every pointer move into a stroke. Stays active after each stroke.
#[derive(Debug, Default)]
pub struct PencilTool;

impl PencilTool {
    pub fn new() -> Self {
        Self
    }
}

impl ToolHandler for PencilTool {
    fn kind(&self) -> ToolKind {
        ToolKind::Pencil
    }

    fn on_pointer_down(&mut self, canvas: &mut Canvas, point: Point) {
        begin_stroke(canvas, ElementKind::Pencil, point);
    }

    fn on_pointer_move(&mut self, canvas: &mut Canvas, point: Point) {
        extend_stroke(canvas, point);
    }

    fn on_pointer_up(&mut self, canvas: &mut Canvas, _point: Point) {
        if canvas.session().is_drawing {
            finish_stroke(canvas, ElementPatch::default());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elements::SerializableColor;
    use crate::tools::DrawingStyle;

    #[test]
    fn test_stroke_is_normalized() {
        let mut canvas = Canvas::default();
        canvas.set_active_tool(ToolKind::Pencil);
        let mut tool = PencilTool::new();

        tool.on_pointer_down(&mut canvas, Point::new(0.0, 0.0));
        tool.on_pointer_move(&mut canvas, Point::new(10.0, 0.0));
        tool.on_pointer_move(&mut canvas, Point::new(10.0, 10.0));
        tool.on_pointer_up(&mut canvas, Point::new(10.0, 10.0));

        assert_eq!(canvas.elements().len(), 1);
        let stroke = canvas.elements()[0].as_stroke().unwrap();
        assert_eq!(stroke.points, vec![0.0, 0.0, 10.0, 0.0, 10.0, 10.0]);
        assert!(stroke.base.x.abs() < f64::EPSILON);
        assert!((stroke.base.width - 10.0).abs() < f64::EPSILON);
        assert!((stroke.base.height - 10.0).abs() < f64::EPSILON);
        assert_eq!(canvas.active_tool(), ToolKind::Pencil);
        assert_eq!(canvas.selected_id(), Some(stroke.base.id()));
    }

    #[test]
    fn test_single_click_discarded() {
        let mut canvas = Canvas::default();
        let mut tool = PencilTool::new();
        tool.on_pointer_down(&mut canvas, Point::new(5.0, 5.0));
        tool.on_pointer_up(&mut canvas, Point::new(5.0, 5.0));
        assert!(canvas.elements().is_empty());
        assert!(canvas.session().draft.is_none());
        assert!(!canvas.session().is_drawing);
    }

    #[test]
    fn test_uses_drawing_style() {
        let mut canvas = Canvas::default();
        canvas.set_drawing_style(DrawingStyle {
            stroke: SerializableColor::white(),
            stroke_width: 6.0,
            fill: None,
        });
        let mut tool = PencilTool::new();
        tool.on_pointer_down(&mut canvas, Point::new(40.0, 50.0));
        tool.on_pointer_move(&mut canvas, Point::new(60.0, 80.0));
        tool.on_pointer_up(&mut canvas, Point::new(60.0, 80.0));

        let stroke = canvas.elements()[0].as_stroke().unwrap();
        assert_eq!(stroke.stroke, SerializableColor::white());
        assert!((stroke.stroke_width - 6.0).abs() < f64::EPSILON);
        assert!((stroke.base.x - 40.0).abs() < f64::EPSILON);
        assert!((stroke.base.y - 50.0).abs() < f64::EPSILON);
        assert_eq!(stroke.points, vec![0.0, 0.0, 20.0, 30.0]);
    }

    #[test]
    fn test_moves_without_press_ignored() {
        let mut canvas = Canvas::default();
        let mut tool = PencilTool::new();
        tool.on_pointer_move(&mut canvas, Point::new(1.0, 1.0));
        tool.on_pointer_up(&mut canvas, Point::new(1.0, 1.0));
        assert!(canvas.elements().is_empty());
    }
}
