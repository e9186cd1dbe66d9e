//! Tool system: one pointer handler per tool.
//!
//! The host converts raw pointer events to document coordinates and feeds
//! them to the active handler. Handlers keep their own gesture anchors and
//! work on the [`Canvas`]: its tool session holds the shared preview state,
//! its document takes the committed elements.

mod draw;
mod hand;
mod pen;
mod pencil;
mod select;

pub use draw::DrawTool;
pub use hand::HandTool;
pub use pen::PenTool;
pub use pencil::PencilTool;
pub use select::SelectTool;

use crate::canvas::Canvas;
use crate::elements::{ElementFamily, ElementKind, SerializableColor};
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Available tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ToolKind {
    #[default]
    Select,
    Hand,
    /// Drag out a box-shaped element of the given kind.
    Draw(ElementKind),
    Pencil,
    Pen,
}

impl ToolKind {
    /// The tool that creates elements of `kind`.
    pub fn for_element(kind: ElementKind) -> Self {
        match kind {
            ElementKind::Pencil => ToolKind::Pencil,
            ElementKind::Pen => ToolKind::Pen,
            kind => ToolKind::Draw(kind),
        }
    }

    /// Keyboard shortcut lookup.
    pub fn from_shortcut(key: char, shift: bool) -> Option<Self> {
        let tool = match (key.to_ascii_lowercase(), shift) {
            ('v', _) => ToolKind::Select,
            ('h', _) => ToolKind::Hand,
            ('p', false) => ToolKind::Pen,
            ('p', true) => ToolKind::Pencil,
            ('r', _) => ToolKind::Draw(ElementKind::Rectangle),
            ('o', _) => ToolKind::Draw(ElementKind::Circle),
            ('t', _) => ToolKind::Draw(ElementKind::Text),
            _ => return None,
        };
        Some(tool)
    }

    /// Whether this tool creates new elements.
    pub fn is_drawing_tool(self) -> bool {
        !matches!(self, ToolKind::Select | ToolKind::Hand)
    }
}

/// Stroke settings applied to new pencil and pen strokes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DrawingStyle {
    pub stroke: SerializableColor,
    pub stroke_width: f64,
    /// Fill for closed pen paths.
    pub fill: Option<SerializableColor>,
}

impl Default for DrawingStyle {
    fn default() -> Self {
        Self {
            stroke: SerializableColor::black(),
            stroke_width: crate::elements::DEFAULT_STROKE_WIDTH,
            fill: None,
        }
    }
}

/// Pointer protocol every tool implements. Points are in document space.
pub trait ToolHandler {
    fn kind(&self) -> ToolKind;

    fn on_pointer_down(&mut self, canvas: &mut Canvas, point: Point);

    fn on_pointer_move(&mut self, canvas: &mut Canvas, point: Point);

    fn on_pointer_up(&mut self, canvas: &mut Canvas, point: Point);

    fn on_double_click(&mut self, _canvas: &mut Canvas, _point: Point) {}
}

/// Create the handler for a tool.
pub fn handler_for(kind: ToolKind) -> Box<dyn ToolHandler> {
    match kind {
        ToolKind::Select => Box::new(SelectTool::new()),
        ToolKind::Hand => Box::new(HandTool::new()),
        ToolKind::Draw(element) => match element.family() {
            ElementFamily::Stroke => handler_for(ToolKind::for_element(element)),
            _ => Box::new(DrawTool::new(element)),
        },
        ToolKind::Pencil => Box::new(PencilTool::new()),
        ToolKind::Pen => Box::new(PenTool::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shortcuts() {
        assert_eq!(ToolKind::from_shortcut('v', false), Some(ToolKind::Select));
        assert_eq!(ToolKind::from_shortcut('H', false), Some(ToolKind::Hand));
        assert_eq!(ToolKind::from_shortcut('p', false), Some(ToolKind::Pen));
        assert_eq!(ToolKind::from_shortcut('P', true), Some(ToolKind::Pencil));
        assert_eq!(
            ToolKind::from_shortcut('r', false),
            Some(ToolKind::Draw(ElementKind::Rectangle))
        );
        assert_eq!(
            ToolKind::from_shortcut('o', false),
            Some(ToolKind::Draw(ElementKind::Circle))
        );
        assert_eq!(
            ToolKind::from_shortcut('t', false),
            Some(ToolKind::Draw(ElementKind::Text))
        );
        assert_eq!(ToolKind::from_shortcut('x', false), None);
    }

    #[test]
    fn test_handler_factory() {
        assert_eq!(handler_for(ToolKind::Select).kind(), ToolKind::Select);
        assert_eq!(handler_for(ToolKind::Hand).kind(), ToolKind::Hand);
        assert_eq!(
            handler_for(ToolKind::Draw(ElementKind::Star)).kind(),
            ToolKind::Draw(ElementKind::Star)
        );
        assert_eq!(
            handler_for(ToolKind::Draw(ElementKind::Pencil)).kind(),
            ToolKind::Pencil
        );
        assert_eq!(handler_for(ToolKind::Pen).kind(), ToolKind::Pen);
    }

    #[test]
    fn test_for_element() {
        assert_eq!(ToolKind::for_element(ElementKind::Pen), ToolKind::Pen);
        assert_eq!(
            ToolKind::for_element(ElementKind::Image),
            ToolKind::Draw(ElementKind::Image)
        );
        assert!(ToolKind::Pen.is_drawing_tool());
        assert!(!ToolKind::Hand.is_drawing_tool());
    }
}
