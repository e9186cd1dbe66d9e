//! Selection, move and resize.

use super::{ToolHandler, ToolKind};
use crate::canvas::Canvas;
use crate::elements::{Element, ElementId, ElementPatch};
use crate::selection::{self, HANDLE_HIT_TOLERANCE, HandleKind, ResizeTransform};
use crate::snap;
use kurbo::Point;

/// Gesture armed by the last pointer-down.
#[derive(Debug, Clone, Default)]
enum Gesture {
    #[default]
    Idle,
    Move {
        id: ElementId,
        start: Point,
        original: Element,
    },
    Resize {
        id: ElementId,
        handle: HandleKind,
        start: Point,
        original: Element,
        transform: Option<ResizeTransform>,
    },
}

/// Selects, moves and resizes elements, and edits stroke vertices.
///
/// Move and resize gestures preview through the session draft and commit a
/// single recorded transition on release.
#[derive(Debug, Default)]
pub struct SelectTool {
    gesture: Gesture,
}

impl SelectTool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle of the selected, unlocked element under `point`.
    fn selected_handle(canvas: &Canvas, point: Point) -> Option<(ElementId, HandleKind)> {
        let element = canvas.selected_element().filter(|e| !e.is_locked())?;
        selection::handle_at(element, point, HANDLE_HIT_TOLERANCE)
            .map(|handle| (element.id().clone(), handle))
    }

    /// Id of the selected, unlocked pencil or pen element.
    fn selected_stroke(canvas: &Canvas) -> Option<ElementId> {
        canvas
            .selected_element()
            .filter(|e| !e.is_locked() && e.as_stroke().is_some())
            .map(|e| e.id().clone())
    }

    fn drag_preview(canvas: &mut Canvas, id: &ElementId, original: &Element, start: Point, point: Point) {
        let delta = point - start;
        let targets = snap::snap_targets(canvas.elements(), Some(id));
        let result = snap::compute_snap(original.bounds() + delta, &targets, canvas.config());

        let base = original.base();
        let moved = Point::new(base.x, base.y) + delta + result.shift;
        let draft = original.update(ElementPatch::position(moved.x, moved.y));

        let session = canvas.session_mut();
        session.draft = Some(draft);
        session.guidelines = result.guidelines;
    }
}

impl ToolHandler for SelectTool {
    fn kind(&self) -> ToolKind {
        ToolKind::Select
    }

    fn on_pointer_down(&mut self, canvas: &mut Canvas, point: Point) {
        canvas.reset_session();

        // A press on the selected stroke's line body edits its vertices,
        // even where a resize handle overlaps the line.
        if let Some(id) = Self::selected_stroke(canvas) {
            if canvas.insert_stroke_point(&id, point) {
                self.gesture = Gesture::Idle;
                return;
            }
        }

        if let Some((id, handle)) = Self::selected_handle(canvas, point) {
            if let Some(original) = canvas.element(&id).cloned() {
                self.gesture = Gesture::Resize {
                    id,
                    handle,
                    start: point,
                    original,
                    transform: None,
                };
                return;
            }
        }

        let Some(hit) = canvas.element_at(point).cloned() else {
            self.gesture = Gesture::Idle;
            canvas.select_element(None);
            return;
        };
        if hit.is_locked() {
            self.gesture = Gesture::Idle;
            canvas.select_element(None);
            return;
        }

        let id = hit.id().clone();
        canvas.select_element(Some(id.clone()));
        self.gesture = Gesture::Move {
            id,
            start: point,
            original: hit,
        };
    }

    fn on_pointer_move(&mut self, canvas: &mut Canvas, point: Point) {
        match &mut self.gesture {
            Gesture::Idle => {}
            Gesture::Move { id, start, original } => {
                Self::drag_preview(canvas, id, original, *start, point);
            }
            Gesture::Resize {
                handle,
                start,
                original,
                transform,
                ..
            } => {
                let Some(next) = selection::resize_from_handle(original, *handle, *start, point)
                else {
                    return;
                };
                let draft = selection::apply_resize_transform(original, &next, canvas.config());
                canvas.session_mut().draft = Some(draft);
                *transform = Some(next);
            }
        }
    }

    fn on_pointer_up(&mut self, canvas: &mut Canvas, _point: Point) {
        let gesture = std::mem::take(&mut self.gesture);
        let draft = canvas.session_mut().draft.take();
        canvas.reset_session();

        let Some(draft) = draft else {
            return;
        };
        match gesture {
            Gesture::Idle => {}
            Gesture::Move { id, original, .. } => {
                let base = draft.base();
                if (base.x - original.base().x).abs() > f64::EPSILON
                    || (base.y - original.base().y).abs() > f64::EPSILON
                {
                    canvas.update_element(&id, ElementPatch::position(base.x, base.y));
                }
            }
            Gesture::Resize {
                id,
                transform: Some(transform),
                ..
            } => {
                canvas.transform_element(&id, &transform);
            }
            Gesture::Resize { transform: None, .. } => {}
        }
    }

    fn on_double_click(&mut self, canvas: &mut Canvas, point: Point) {
        let Some(hit) = canvas.element_at(point) else {
            return;
        };
        if hit.is_locked() || !hit.kind().is_text_bearing() {
            return;
        }
        let id = hit.id().clone();
        canvas.select_element(Some(id.clone()));
        canvas.set_editing(&id, true);
    }
}
