//! Immutable element model for the canvas.
//!
//! Elements are never mutated in place once they are part of a document.
//! `Element::update` merges a patch over the current state and rebuilds the
//! element through the factory, so the result is always a fresh value.

mod color;
mod image;
mod shape;
mod shape_text;
mod state;
mod stroke;
mod text;

pub use color::{SerializableColor, palette};
pub use image::{ImageElement, PLACEHOLDER_IMAGE_SRC};
pub use shape::{ARROW_STROKE_WIDTH, ShapeAttrs, ShapeElement, StrokeStyle};
pub use shape_text::{
    CHAT_BUBBLE_CORNER_RADIUS, FontStyle, ShapeTextElement, TextAlign, TextDecoration,
    TextTransform, Typography,
};
pub use state::{ElementPatch, ElementState};
pub use stroke::{DEFAULT_STROKE_WIDTH, StrokeElement};
pub use text::{TextAttrs, TextElement};

use crate::geometry::{self, Outline};
use kurbo::{Affine, Point, Rect, Vec2};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for an element.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementId(String);

impl ElementId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate a fresh random id.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The last four characters, used in default names.
    pub fn suffix(&self) -> &str {
        let start = self
            .0
            .char_indices()
            .rev()
            .nth(3)
            .map(|(i, _)| i)
            .unwrap_or(0);
        &self.0[start..]
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ElementId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ElementId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// The `type` tag of an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ElementKind {
    Rectangle,
    Circle,
    Triangle,
    Star,
    Image,
    Text,
    RectangleText,
    CircleText,
    #[serde(alias = "message-square")]
    ChatBubble,
    ArrowLeft,
    ArrowRight,
    Pencil,
    Pen,
    /// Any unrecognized tag. Treated as a plain shape.
    #[serde(other)]
    Unknown,
}

/// Which element variant a kind is built as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementFamily {
    Shape,
    Image,
    Text,
    ShapeText,
    Stroke,
}

impl ElementKind {
    pub const ALL: [ElementKind; 13] = [
        ElementKind::Rectangle,
        ElementKind::Circle,
        ElementKind::Triangle,
        ElementKind::Star,
        ElementKind::Image,
        ElementKind::Text,
        ElementKind::RectangleText,
        ElementKind::CircleText,
        ElementKind::ChatBubble,
        ElementKind::ArrowLeft,
        ElementKind::ArrowRight,
        ElementKind::Pencil,
        ElementKind::Pen,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ElementKind::Rectangle => "rectangle",
            ElementKind::Circle => "circle",
            ElementKind::Triangle => "triangle",
            ElementKind::Star => "star",
            ElementKind::Image => "image",
            ElementKind::Text => "text",
            ElementKind::RectangleText => "rectangle-text",
            ElementKind::CircleText => "circle-text",
            ElementKind::ChatBubble => "chat-bubble",
            ElementKind::ArrowLeft => "arrow-left",
            ElementKind::ArrowRight => "arrow-right",
            ElementKind::Pencil => "pencil",
            ElementKind::Pen => "pen",
            ElementKind::Unknown => "unknown",
        }
    }

    pub fn family(self) -> ElementFamily {
        match self {
            ElementKind::Image => ElementFamily::Image,
            ElementKind::Text => ElementFamily::Text,
            ElementKind::RectangleText
            | ElementKind::CircleText
            | ElementKind::ChatBubble
            | ElementKind::ArrowLeft
            | ElementKind::ArrowRight => ElementFamily::ShapeText,
            ElementKind::Pencil | ElementKind::Pen => ElementFamily::Stroke,
            ElementKind::Rectangle
            | ElementKind::Circle
            | ElementKind::Triangle
            | ElementKind::Star
            | ElementKind::Unknown => ElementFamily::Shape,
        }
    }

    /// Kinds whose text can be edited in place.
    pub fn is_text_bearing(self) -> bool {
        matches!(
            self.family(),
            ElementFamily::Text | ElementFamily::ShapeText
        )
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Attributes shared by every element.
#[derive(Debug, Clone, PartialEq)]
pub struct ElementBase {
    pub(crate) id: ElementId,
    pub kind: ElementKind,
    pub name: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Degrees, clockwise, around `(x, y)`.
    pub rotation: f64,
    pub visible: bool,
    pub locked: bool,
    pub is_editing: bool,
}

impl ElementBase {
    fn from_state(state: &ElementState) -> Self {
        Self {
            id: state.id.clone(),
            kind: state.kind,
            name: state.name.clone(),
            x: state.x,
            y: state.y,
            width: state.width,
            height: state.height,
            rotation: state.rotation,
            visible: state.visible,
            locked: state.locked,
            is_editing: state.is_editing,
        }
    }

    fn to_state(&self) -> ElementState {
        let mut state = ElementState::new(self.id.clone(), self.kind);
        state.name = self.name.clone();
        state.x = self.x;
        state.y = self.y;
        state.width = self.width;
        state.height = self.height;
        state.rotation = self.rotation;
        state.visible = self.visible;
        state.locked = self.locked;
        state.is_editing = self.is_editing;
        state
    }

    pub fn id(&self) -> &ElementId {
        &self.id
    }

    /// Transform from the element's local frame to document coordinates.
    pub fn transform(&self) -> Affine {
        Affine::translate(Vec2::new(self.x, self.y)) * Affine::rotate(self.rotation.to_radians())
    }

    /// Axis-aligned bounds of the (possibly rotated) frame.
    pub fn bounds(&self) -> Rect {
        let local = Rect::new(0.0, 0.0, self.width, self.height);
        if self.rotation == 0.0 {
            return local + Vec2::new(self.x, self.y);
        }
        self.transform().transform_rect_bbox(local)
    }

    /// Map a document point into the element's local frame.
    pub fn to_local(&self, point: Point) -> Point {
        self.transform().inverse() * point
    }
}

/// An element on the canvas.
#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    Shape(ShapeElement),
    Image(ImageElement),
    Text(TextElement),
    ShapeText(ShapeTextElement),
    Stroke(StrokeElement),
}

impl Element {
    /// Build an element from a state, filling variant defaults.
    pub fn create(state: ElementState) -> Self {
        if state.kind == ElementKind::Unknown {
            log::warn!("Unknown type for element {}, building a plain shape", state.id);
        }
        let base = ElementBase::from_state(&state);
        match state.kind.family() {
            ElementFamily::Shape => Element::Shape(ShapeElement::from_state(base, &state)),
            ElementFamily::Image => Element::Image(ImageElement::from_state(base, &state)),
            ElementFamily::Text => Element::Text(TextElement::from_state(base, &state)),
            ElementFamily::ShapeText => {
                Element::ShapeText(ShapeTextElement::from_state(base, &state))
            }
            ElementFamily::Stroke => Element::Stroke(StrokeElement::from_state(base, &state)),
        }
    }

    /// Build a new element of `kind` at `(x, y)` with its default size and style.
    pub fn create_default(kind: ElementKind, x: f64, y: f64, id: Option<ElementId>) -> Self {
        let id = id.unwrap_or_else(ElementId::generate);
        let mut state = ElementState::new(id, kind);
        state.x = x;
        state.y = y;
        state.width = 100.0;
        state.height = 100.0;

        match kind.family() {
            ElementFamily::Shape => {}
            ElementFamily::Image => ImageElement::fill_defaults(&mut state),
            ElementFamily::Text => TextElement::fill_defaults(&mut state),
            ElementFamily::ShapeText => ShapeTextElement::fill_defaults(&mut state),
            ElementFamily::Stroke => StrokeElement::fill_defaults(&mut state),
        }
        Self::create(state)
    }

    /// Flat state of this element.
    pub fn to_state(&self) -> ElementState {
        match self {
            Element::Shape(e) => e.to_state(),
            Element::Image(e) => e.to_state(),
            Element::Text(e) => e.to_state(),
            Element::ShapeText(e) => e.to_state(),
            Element::Stroke(e) => e.to_state(),
        }
    }

    /// New element with the patch merged over this element's state.
    pub fn update(&self, patch: ElementPatch) -> Element {
        let mut state = self.to_state();
        patch.apply_to(&mut state);
        Self::create(state)
    }

    /// Copy with a fresh id, offset position and a "(Copy)" name.
    pub fn duplicate(&self, offset: f64) -> Element {
        let base = self.base();
        self.update(ElementPatch {
            id: Some(ElementId::generate()),
            name: Some(format!("{} (Copy)", base.name)),
            x: Some(base.x + offset),
            y: Some(base.y + offset),
            is_editing: Some(false),
            ..Default::default()
        })
    }

    pub fn base(&self) -> &ElementBase {
        match self {
            Element::Shape(e) => &e.base,
            Element::Image(e) => &e.base,
            Element::Text(e) => &e.base,
            Element::ShapeText(e) => &e.base,
            Element::Stroke(e) => &e.base,
        }
    }

    pub(crate) fn base_mut(&mut self) -> &mut ElementBase {
        match self {
            Element::Shape(e) => &mut e.base,
            Element::Image(e) => &mut e.base,
            Element::Text(e) => &mut e.base,
            Element::ShapeText(e) => &mut e.base,
            Element::Stroke(e) => &mut e.base,
        }
    }

    pub fn id(&self) -> &ElementId {
        &self.base().id
    }

    pub fn kind(&self) -> ElementKind {
        self.base().kind
    }

    pub fn is_visible(&self) -> bool {
        self.base().visible
    }

    pub fn is_locked(&self) -> bool {
        self.base().locked
    }

    pub fn is_editing(&self) -> bool {
        self.base().is_editing
    }

    pub fn bounds(&self) -> Rect {
        self.base().bounds()
    }

    /// Text attributes, for text-bearing elements.
    pub fn text_attrs(&self) -> Option<&TextAttrs> {
        match self {
            Element::Text(e) => Some(&e.text),
            Element::ShapeText(e) => Some(&e.text),
            _ => None,
        }
    }

    pub fn as_stroke(&self) -> Option<&StrokeElement> {
        match self {
            Element::Stroke(e) => Some(e),
            _ => None,
        }
    }

    /// Check if a document point hits this element.
    ///
    /// Boxes hit inside their (rotated) frame. Strokes hit within
    /// `stroke_tolerance` of the line, or inside when filled.
    pub fn hit_test(&self, point: Point, stroke_tolerance: f64) -> bool {
        let base = self.base();
        let local = base.to_local(point);
        match self {
            Element::Stroke(stroke) => stroke.hit_test_local(local, stroke_tolerance),
            _ => {
                local.x >= 0.0 && local.y >= 0.0 && local.x <= base.width && local.y <= base.height
            }
        }
    }

    /// Renderable outline in the element's local frame.
    pub fn outline(&self) -> Outline {
        geometry::outline(self)
    }
}
