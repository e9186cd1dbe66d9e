//! Box-drawing tool for shapes, text and images.

use super::{ToolHandler, ToolKind};
use crate::canvas::Canvas;
use crate::elements::{Element, ElementKind, ElementPatch};
use kurbo::{Point, Rect};

/// Drags out a new element between the press point and the pointer.
///
/// Releasing after less than the click threshold discards the preview.
/// Either way the canvas returns to the select tool.
#[derive(Debug)]
pub struct DrawTool {
    kind: ElementKind,
    anchor: Option<Point>,
}

impl DrawTool {
    pub fn new(kind: ElementKind) -> Self {
        Self { kind, anchor: None }
    }

    fn frame(anchor: Point, point: Point) -> ElementPatch {
        let rect = Rect::from_points(anchor, point);
        ElementPatch::frame(rect.x0, rect.y0, rect.width(), rect.height())
    }
}

impl ToolHandler for DrawTool {
    fn kind(&self) -> ToolKind {
        ToolKind::Draw(self.kind)
    }

    fn on_pointer_down(&mut self, canvas: &mut Canvas, point: Point) {
        canvas.select_element(None);
        self.anchor = Some(point);
        let draft = Element::create_default(self.kind, point.x, point.y, None)
            .update(ElementPatch::frame(point.x, point.y, 0.0, 0.0));
        let session = canvas.session_mut();
        session.draft = Some(draft);
        session.is_drawing = true;
    }

    fn on_pointer_move(&mut self, canvas: &mut Canvas, point: Point) {
        let Some(anchor) = self.anchor else {
            return;
        };
        let session = canvas.session_mut();
        if let Some(draft) = session.draft.take() {
            session.draft = Some(draft.update(Self::frame(anchor, point)));
        }
    }

    fn on_pointer_up(&mut self, canvas: &mut Canvas, point: Point) {
        let Some(anchor) = self.anchor.take() else {
            return;
        };
        let draft = canvas.session_mut().draft.take();

        if anchor.distance(point) < canvas.config().click_threshold {
            log::debug!("Discarded {} draw below click threshold", self.kind);
            canvas.set_active_tool(ToolKind::Select);
            return;
        }

        if let Some(draft) = draft {
            let element = draft.update(Self::frame(anchor, point));
            let id = element.id().clone();
            match canvas.add_element(element) {
                Ok(()) => {
                    canvas.select_element(Some(id));
                }
                Err(err) => log::error!("Failed to commit drawn element: {err}"),
            }
        }
        canvas.set_active_tool(ToolKind::Select);
    }
}
