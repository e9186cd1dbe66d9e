//! Canvas document and editing state.

use crate::config::EngineConfig;
use crate::elements::{Element, ElementId, ElementPatch};
use crate::error::{EngineError, EngineResult};
use crate::history::History;
use crate::selection::{self, ResizeTransform};
use crate::snap::Guideline;
use crate::tools::{DrawingStyle, ToolKind};
use kurbo::{Point, Vec2};
use std::sync::Arc;

/// Shared, immutable element collection.
///
/// Every change builds a new collection, so an unchanged document keeps the
/// same allocation and compares equal by pointer.
pub type Elements = Arc<[Element]>;

/// The ordered element collection (back to front) and its undo history.
#[derive(Debug, Clone)]
pub struct CanvasDocument {
    elements: Elements,
    history: History<Elements>,
}

impl Default for CanvasDocument {
    fn default() -> Self {
        Self::new(EngineConfig::default().history_limit)
    }
}

impl CanvasDocument {
    /// Create a new empty document keeping up to `history_limit` undo steps.
    pub fn new(history_limit: usize) -> Self {
        Self {
            elements: Arc::from(Vec::new()),
            history: History::with_equality(history_limit, Arc::ptr_eq),
        }
    }

    /// Replace the whole collection, dropping history.
    ///
    /// Fails without touching the document if two elements share an id.
    pub fn load(&mut self, elements: Vec<Element>) -> EngineResult<()> {
        for (i, element) in elements.iter().enumerate() {
            if elements[..i].iter().any(|e| e.id() == element.id()) {
                log::error!("Duplicate element id {} in loaded document", element.id());
                return Err(EngineError::DuplicateId(element.id().clone()));
            }
        }
        self.elements = elements.into();
        self.history.clear();
        log::info!("Loaded document with {} elements", self.elements.len());
        Ok(())
    }

    /// Elements back to front.
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    /// The shared collection, for identity comparisons.
    pub fn snapshot(&self) -> Elements {
        Arc::clone(&self.elements)
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn get(&self, id: &ElementId) -> Option<&Element> {
        self.elements.iter().find(|e| e.id() == id)
    }

    pub fn contains(&self, id: &ElementId) -> bool {
        self.get(id).is_some()
    }

    fn index_of(&self, id: &ElementId) -> Option<usize> {
        self.elements.iter().position(|e| e.id() == id)
    }

    /// Elements front to back, as a layer panel lists them.
    pub fn layers(&self) -> impl Iterator<Item = &Element> {
        self.elements.iter().rev()
    }

    fn commit(&mut self, next: Vec<Element>) {
        let previous = std::mem::replace(&mut self.elements, next.into());
        self.history.record(previous, &self.elements);
    }

    fn replace_untracked(&mut self, next: Vec<Element>) {
        self.elements = next.into();
    }

    /// Add an element on top.
    pub fn add(&mut self, element: Element) -> EngineResult<()> {
        if self.contains(element.id()) {
            log::error!("Refusing to add duplicate element id {}", element.id());
            return Err(EngineError::DuplicateId(element.id().clone()));
        }
        let mut next = self.elements.to_vec();
        next.push(element);
        self.commit(next);
        Ok(())
    }

    /// Swap in a new version of the element with `id`.
    ///
    /// Returns false if the element is missing or unchanged. A change that
    /// only flips `is_editing` is not recorded in history.
    pub fn replace(&mut self, id: &ElementId, element: Element) -> bool {
        let Some(index) = self.index_of(id) else {
            return false;
        };
        let current = &self.elements[index];
        if *current == element {
            return false;
        }
        if element.id() != id && self.contains(element.id()) {
            log::error!("Refusing to rename {id} to existing id {}", element.id());
            return false;
        }
        if current.is_locked() && element.is_locked() && moves_geometry(current, &element) {
            log::debug!("Refusing to move or resize locked element {id}");
            return false;
        }

        let mut probe = current.clone();
        probe.base_mut().is_editing = element.is_editing();
        let editing_only = probe == element;

        let mut next = self.elements.to_vec();
        next[index] = element;
        if editing_only {
            self.replace_untracked(next);
        } else {
            self.commit(next);
        }
        true
    }

    /// Merge `patch` into the element with `id`.
    pub fn update(&mut self, id: &ElementId, patch: ElementPatch) -> bool {
        match self.get(id) {
            Some(element) => {
                let updated = element.update(patch);
                self.replace(id, updated)
            }
            None => false,
        }
    }

    pub fn remove(&mut self, id: &ElementId) -> bool {
        let Some(index) = self.index_of(id) else {
            return false;
        };
        let mut next = self.elements.to_vec();
        next.remove(index);
        self.commit(next);
        true
    }

    /// Clear `is_editing` on every element except `keep`, without history.
    pub fn clear_editing(&mut self, keep: Option<&ElementId>) {
        if !self
            .elements
            .iter()
            .any(|e| e.is_editing() && Some(e.id()) != keep)
        {
            return;
        }
        let next = self
            .elements
            .iter()
            .map(|e| {
                let mut e = e.clone();
                if Some(e.id()) != keep {
                    e.base_mut().is_editing = false;
                }
                e
            })
            .collect();
        self.replace_untracked(next);
    }

    fn move_to(&mut self, id: &ElementId, target: impl FnOnce(usize, usize) -> usize) -> bool {
        let Some(index) = self.index_of(id) else {
            return false;
        };
        let target = target(index, self.elements.len());
        if target == index {
            return false;
        }
        let mut next = self.elements.to_vec();
        let element = next.remove(index);
        next.insert(target, element);
        self.commit(next);
        true
    }

    /// Bring an element to the front (topmost).
    pub fn bring_to_front(&mut self, id: &ElementId) -> bool {
        self.move_to(id, |_, len| len - 1)
    }

    /// Send an element to the back (bottommost).
    pub fn send_to_back(&mut self, id: &ElementId) -> bool {
        self.move_to(id, |_, _| 0)
    }

    /// Move an element one layer forward (towards front).
    /// Returns true if the element was moved, false if already at front.
    pub fn bring_forward(&mut self, id: &ElementId) -> bool {
        self.move_to(id, |index, len| (index + 1).min(len - 1))
    }

    /// Move an element one layer backward (towards back).
    /// Returns true if the element was moved, false if already at back.
    pub fn send_backward(&mut self, id: &ElementId) -> bool {
        self.move_to(id, |index, _| index.saturating_sub(1))
    }

    /// Undo the last change.
    /// Returns true if undo was performed, false if nothing to undo.
    pub fn undo(&mut self) -> bool {
        let current = self.snapshot();
        match self.history.undo(current) {
            Ok(previous) => {
                self.elements = previous;
                true
            }
            Err(_) => false,
        }
    }

    /// Redo the last undone change.
    /// Returns true if redo was performed, false if nothing to redo.
    pub fn redo(&mut self) -> bool {
        let current = self.snapshot();
        match self.history.redo(current) {
            Ok(next) => {
                self.elements = next;
                true
            }
            Err(_) => false,
        }
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn undo_depth(&self) -> usize {
        self.history.undo_depth()
    }

    pub fn redo_depth(&self) -> usize {
        self.history.redo_depth()
    }
}

/// Whether `next` places, sizes or reshapes the element differently.
fn moves_geometry(current: &Element, next: &Element) -> bool {
    let (a, b) = (current.base(), next.base());
    let frame_changed = a.x != b.x
        || a.y != b.y
        || a.width != b.width
        || a.height != b.height
        || a.rotation != b.rotation;
    let points_changed = match (current.as_stroke(), next.as_stroke()) {
        (Some(a), Some(b)) => a.points != b.points,
        (None, None) => false,
        _ => true,
    };
    frame_changed || points_changed
}

/// Transient state of the gesture in progress. Never recorded in history.
#[derive(Debug, Clone, Default)]
pub struct ToolSession {
    /// Preview element: a new element being drawn, or a moved/resized copy
    /// of an existing one.
    pub draft: Option<Element>,
    pub is_drawing: bool,
    /// The pen is hovering over the start of its path.
    pub is_closing_path: bool,
    /// Alignment hints for the current drag.
    pub guidelines: Vec<Guideline>,
}

/// Editing state around a document: selection, active tool, view offset.
#[derive(Debug, Clone)]
pub struct Canvas {
    pub document: CanvasDocument,
    selected_id: Option<ElementId>,
    active_tool: ToolKind,
    session: ToolSession,
    /// Pan offset: document = screen / zoom - offset.
    view_offset: Vec2,
    drawing_style: DrawingStyle,
    config: EngineConfig,
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl Canvas {
    /// Create a new canvas with an empty document.
    pub fn new(config: EngineConfig) -> Self {
        Self {
            document: CanvasDocument::new(config.history_limit),
            selected_id: None,
            active_tool: ToolKind::default(),
            session: ToolSession::default(),
            view_offset: Vec2::ZERO,
            drawing_style: DrawingStyle::default(),
            config,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn elements(&self) -> &[Element] {
        self.document.elements()
    }

    pub fn element(&self, id: &ElementId) -> Option<&Element> {
        self.document.get(id)
    }

    pub fn selected_id(&self) -> Option<&ElementId> {
        self.selected_id.as_ref()
    }

    pub fn selected_element(&self) -> Option<&Element> {
        self.selected_id.as_ref().and_then(|id| self.document.get(id))
    }

    pub fn active_tool(&self) -> ToolKind {
        self.active_tool
    }

    pub fn session(&self) -> &ToolSession {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut ToolSession {
        &mut self.session
    }

    /// Drop any in-progress preview.
    pub fn reset_session(&mut self) {
        self.session = ToolSession::default();
    }

    pub fn guidelines(&self) -> &[Guideline] {
        &self.session.guidelines
    }

    pub fn view_offset(&self) -> Vec2 {
        self.view_offset
    }

    pub fn set_view_offset(&mut self, offset: Vec2) {
        self.view_offset = offset;
    }

    pub fn drawing_style(&self) -> &DrawingStyle {
        &self.drawing_style
    }

    pub fn set_drawing_style(&mut self, style: DrawingStyle) {
        self.drawing_style = style;
    }

    /// Add an element on top of the collection.
    pub fn add_element(&mut self, element: Element) -> EngineResult<()> {
        log::debug!("Adding {} {}", element.kind(), element.id());
        self.document.add(element)
    }

    /// Merge a partial update into an element.
    /// Returns true if the collection changed.
    pub fn update_element(&mut self, id: &ElementId, patch: ElementPatch) -> bool {
        self.document.update(id, patch)
    }

    pub fn remove_element(&mut self, id: &ElementId) -> bool {
        let removed = self.document.remove(id);
        if removed && self.selected_id.as_ref() == Some(id) {
            self.selected_id = None;
        }
        removed
    }

    /// Copy an element next to the original and select the copy.
    pub fn duplicate_element(&mut self, id: &ElementId) -> Option<ElementId> {
        let copy = self.document.get(id)?.duplicate(self.config.duplicate_offset);
        let copy_id = copy.id().clone();
        // A fresh uuid cannot collide with an existing id.
        self.document.add(copy).ok()?;
        self.select_element(Some(copy_id.clone()));
        Some(copy_id)
    }

    /// Change the selection. Text editing ends on every other element.
    ///
    /// Selecting a missing id clears the selection and returns false.
    pub fn select_element(&mut self, id: Option<ElementId>) -> bool {
        let id = id.filter(|id| self.document.contains(id));
        let found = id.is_some();
        self.document.clear_editing(id.as_ref());
        self.selected_id = id;
        found
    }

    /// Switch tools, dropping any in-progress gesture.
    pub fn set_active_tool(&mut self, tool: ToolKind) {
        if tool != self.active_tool {
            log::debug!("Tool changed from {:?} to {:?}", self.active_tool, tool);
        }
        self.active_tool = tool;
        self.reset_session();
    }

    /// Enter or leave in-place text editing on an element.
    pub fn set_editing(&mut self, id: &ElementId, editing: bool) -> bool {
        self.document.update(
            id,
            ElementPatch {
                is_editing: Some(editing),
                ..Default::default()
            },
        )
    }

    pub fn toggle_visible(&mut self, id: &ElementId) -> bool {
        let Some(visible) = self.document.get(id).map(Element::is_visible) else {
            return false;
        };
        self.document.update(
            id,
            ElementPatch {
                visible: Some(!visible),
                ..Default::default()
            },
        )
    }

    /// Lock or unlock an element. Locking the selected element deselects it.
    pub fn toggle_locked(&mut self, id: &ElementId) -> bool {
        let Some(locked) = self.document.get(id).map(Element::is_locked) else {
            return false;
        };
        let changed = self.document.update(
            id,
            ElementPatch {
                locked: Some(!locked),
                ..Default::default()
            },
        );
        if changed && !locked && self.selected_id.as_ref() == Some(id) {
            self.select_element(None);
        }
        changed
    }

    pub fn bring_to_front(&mut self, id: &ElementId) -> bool {
        self.document.bring_to_front(id)
    }

    pub fn send_to_back(&mut self, id: &ElementId) -> bool {
        self.document.send_to_back(id)
    }

    pub fn bring_forward(&mut self, id: &ElementId) -> bool {
        self.document.bring_forward(id)
    }

    pub fn send_backward(&mut self, id: &ElementId) -> bool {
        self.document.send_backward(id)
    }

    /// Bake a finished resize/rotate into an element.
    pub fn transform_element(&mut self, id: &ElementId, transform: &ResizeTransform) -> bool {
        let Some(element) = self.document.get(id).filter(|e| !e.is_locked()) else {
            return false;
        };
        let transformed = selection::apply_resize_transform(element, transform, &self.config);
        self.document.replace(id, transformed)
    }

    /// Splice a vertex into a stroke at the document point, if the point
    /// lies on one of its segments.
    pub fn insert_stroke_point(&mut self, id: &ElementId, point: Point) -> bool {
        let Some(stroke) = self
            .document
            .get(id)
            .filter(|e| !e.is_locked())
            .and_then(Element::as_stroke)
        else {
            return false;
        };
        let local = stroke.base.to_local(point);
        match stroke.insert_point(local, self.config.stroke_hit_tolerance) {
            Some(points) => self.document.update(
                id,
                ElementPatch {
                    points: Some(points),
                    ..Default::default()
                },
            ),
            None => false,
        }
    }

    /// Topmost visible element under a document point.
    pub fn element_at(&self, point: Point) -> Option<&Element> {
        selection::element_at(self.elements(), point, self.config.stroke_hit_tolerance)
    }

    /// What the host should draw: the collection with the draft substituted
    /// for the element it previews, or appended when it is a new element.
    pub fn render_list(&self) -> Vec<&Element> {
        let draft = self.session.draft.as_ref();
        let mut substituted = false;
        let mut list: Vec<&Element> = self
            .elements()
            .iter()
            .map(|element| match draft {
                Some(draft) if draft.id() == element.id() => {
                    substituted = true;
                    draft
                }
                _ => element,
            })
            .collect();
        if let Some(draft) = draft {
            if !substituted {
                list.push(draft);
            }
        }
        list
    }

    /// Undo the last document change.
    pub fn undo(&mut self) -> bool {
        let undone = self.document.undo();
        if undone {
            self.after_history_step();
        }
        undone
    }

    /// Redo the last undone document change.
    pub fn redo(&mut self) -> bool {
        let redone = self.document.redo();
        if redone {
            self.after_history_step();
        }
        redone
    }

    fn after_history_step(&mut self) {
        self.reset_session();
        self.document.clear_editing(None);
        if let Some(id) = &self.selected_id {
            if !self.document.contains(id) {
                self.selected_id = None;
            }
        }
    }

    pub fn can_undo(&self) -> bool {
        self.document.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.document.can_redo()
    }

    pub fn undo_depth(&self) -> usize {
        self.document.undo_depth()
    }

    pub fn redo_depth(&self) -> usize {
        self.document.redo_depth()
    }
}
