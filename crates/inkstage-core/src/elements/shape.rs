//! Plain shapes: rectangles, circles, polygons and stars.

use super::{ElementBase, ElementKind, ElementState, SerializableColor, palette};
use serde::{Deserialize, Serialize};

/// Default arrow outline width when none is set.
pub const ARROW_STROKE_WIDTH: f64 = 8.0;

/// Outline stroke style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrokeStyle {
    #[default]
    Solid,
    Dashed,
    Dotted,
}

impl StrokeStyle {
    /// Cycle to the next stroke style.
    pub fn next(self) -> Self {
        match self {
            StrokeStyle::Solid => StrokeStyle::Dashed,
            StrokeStyle::Dashed => StrokeStyle::Dotted,
            StrokeStyle::Dotted => StrokeStyle::Solid,
        }
    }

    /// Dash pattern (on, off) for the renderer. Empty means solid.
    pub fn dash_pattern(self) -> &'static [f64] {
        match self {
            StrokeStyle::Solid => &[],
            StrokeStyle::Dashed => &[10.0, 5.0],
            StrokeStyle::Dotted => &[2.0, 2.0],
        }
    }
}

/// Fill and outline attributes shared by shapes and shapes with text.
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeAttrs {
    pub color: SerializableColor,
    pub stroke: Option<SerializableColor>,
    pub stroke_width: Option<f64>,
    pub stroke_style: Option<StrokeStyle>,
    pub corner_radius: Option<f64>,
    pub sides: Option<u32>,
    /// Percentage (0-100) of the outer radius.
    pub star_inner_radius: Option<f64>,
}

impl ShapeAttrs {
    /// Fill color a kind gets when none is given.
    pub fn default_color(kind: ElementKind) -> SerializableColor {
        match kind {
            ElementKind::Circle => palette::RED,
            ElementKind::Triangle => palette::GREEN,
            ElementKind::Star => palette::AMBER,
            _ => palette::BLUE,
        }
    }

    pub(crate) fn from_state(state: &ElementState) -> Self {
        let (default_sides, default_inner) = match state.kind {
            ElementKind::Star => (Some(5), Some(50.0)),
            ElementKind::Triangle => (Some(3), None),
            _ => (None, None),
        };
        Self {
            color: state
                .color
                .unwrap_or_else(|| Self::default_color(state.kind)),
            stroke: state.stroke,
            stroke_width: state.stroke_width,
            stroke_style: state.stroke_style,
            corner_radius: state.corner_radius,
            sides: state.sides.or(default_sides),
            star_inner_radius: state.star_inner_radius.or(default_inner),
        }
    }

    pub(crate) fn write_state(&self, state: &mut ElementState) {
        state.color = Some(self.color);
        state.stroke = self.stroke;
        state.stroke_width = self.stroke_width;
        state.stroke_style = self.stroke_style;
        state.corner_radius = self.corner_radius;
        state.sides = self.sides;
        state.star_inner_radius = self.star_inner_radius;
    }

    /// Outline color and width as drawn. Arrows fall back to a thick
    /// outline in their fill color.
    pub fn effective_stroke(&self, kind: ElementKind) -> Option<(SerializableColor, f64)> {
        match kind {
            ElementKind::ArrowLeft | ElementKind::ArrowRight => Some((
                self.stroke.unwrap_or(self.color),
                self.stroke_width.unwrap_or(ARROW_STROKE_WIDTH),
            )),
            _ => self
                .stroke
                .map(|stroke| (stroke, self.stroke_width.unwrap_or(1.0))),
        }
    }
}

/// A filled shape.
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeElement {
    pub base: ElementBase,
    pub shape: ShapeAttrs,
}

impl ShapeElement {
    pub(crate) fn from_state(base: ElementBase, state: &ElementState) -> Self {
        Self {
            base,
            shape: ShapeAttrs::from_state(state),
        }
    }

    pub fn to_state(&self) -> ElementState {
        let mut state = self.base.to_state();
        self.shape.write_state(&mut state);
        state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elements::{Element, ElementId};

    fn shape(kind: ElementKind) -> ShapeElement {
        match Element::create(ElementState::new(ElementId::new("s"), kind)) {
            Element::Shape(shape) => shape,
            other => panic!("expected shape, got {other:?}"),
        }
    }

    #[test]
    fn test_default_colors_by_kind() {
        assert_eq!(shape(ElementKind::Circle).shape.color, palette::RED);
        assert_eq!(shape(ElementKind::Triangle).shape.color, palette::GREEN);
        assert_eq!(shape(ElementKind::Star).shape.color, palette::AMBER);
        assert_eq!(shape(ElementKind::Rectangle).shape.color, palette::BLUE);
        assert_eq!(shape(ElementKind::Unknown).shape.color, palette::BLUE);
    }

    #[test]
    fn test_star_and_triangle_defaults() {
        let star = shape(ElementKind::Star);
        assert_eq!(star.shape.sides, Some(5));
        assert_eq!(star.shape.star_inner_radius, Some(50.0));
        assert_eq!(shape(ElementKind::Triangle).shape.sides, Some(3));
        assert_eq!(shape(ElementKind::Rectangle).shape.sides, None);
    }

    #[test]
    fn test_explicit_color_kept() {
        let mut state = ElementState::new(ElementId::new("s"), ElementKind::Circle);
        state.color = Some(SerializableColor::white());
        let Element::Shape(circle) = Element::create(state) else {
            panic!("expected shape");
        };
        assert_eq!(circle.shape.color, SerializableColor::white());
    }

    #[test]
    fn test_stroke_fallback() {
        let mut attrs = shape(ElementKind::Rectangle).shape;
        assert!(attrs.effective_stroke(ElementKind::Rectangle).is_none());

        let (color, width) = attrs.effective_stroke(ElementKind::ArrowRight).unwrap();
        assert_eq!(color, attrs.color);
        assert!((width - ARROW_STROKE_WIDTH).abs() < f64::EPSILON);

        attrs.stroke = Some(SerializableColor::black());
        let (color, width) = attrs.effective_stroke(ElementKind::Rectangle).unwrap();
        assert_eq!(color, SerializableColor::black());
        assert!((width - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_stroke_style_cycle() {
        assert_eq!(StrokeStyle::Solid.next(), StrokeStyle::Dashed);
        assert_eq!(StrokeStyle::Dotted.next(), StrokeStyle::Solid);
        assert_eq!(StrokeStyle::Dashed.dash_pattern(), &[10.0, 5.0]);
    }
}
