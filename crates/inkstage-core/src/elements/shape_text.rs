//! Shapes that carry a text label: labelled rectangles and circles, chat
//! bubbles and block arrows.

use super::text::{TextAttrs, TextDefaults};
use super::{ElementBase, ElementKind, ElementState, SerializableColor, ShapeAttrs, palette};
use serde::{Deserialize, Serialize};

const LABEL_DEFAULTS: TextDefaults = TextDefaults {
    text: "Text",
    font_size: 14.0,
    font_family: "Arial",
    text_color: SerializableColor::white(),
};

/// Default corner radius for chat bubbles.
pub const CHAT_BUBBLE_CORNER_RADIUS: f64 = 20.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontStyle {
    #[default]
    Normal,
    Bold,
    Italic,
    #[serde(rename = "italic bold")]
    ItalicBold,
}

impl FontStyle {
    pub fn is_bold(self) -> bool {
        matches!(self, FontStyle::Bold | FontStyle::ItalicBold)
    }

    pub fn is_italic(self) -> bool {
        matches!(self, FontStyle::Italic | FontStyle::ItalicBold)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    Left,
    #[default]
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TextDecoration {
    #[default]
    #[serde(rename = "")]
    None,
    Underline,
    LineThrough,
    Overline,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextTransform {
    #[default]
    #[serde(rename = "")]
    None,
    Uppercase,
    Lowercase,
}

impl TextTransform {
    /// Text as displayed.
    pub fn apply(self, text: &str) -> String {
        match self {
            TextTransform::None => text.to_string(),
            TextTransform::Uppercase => text.to_uppercase(),
            TextTransform::Lowercase => text.to_lowercase(),
        }
    }
}

/// Label layout and decoration.
#[derive(Debug, Clone, PartialEq)]
pub struct Typography {
    pub text_stroke: Option<SerializableColor>,
    pub text_stroke_width: Option<f64>,
    pub font_style: FontStyle,
    pub align: TextAlign,
    pub line_height: f64,
    pub letter_spacing: f64,
    pub text_decoration: TextDecoration,
    pub text_transform: TextTransform,
}

impl Typography {
    fn from_state(state: &ElementState) -> Self {
        Self {
            text_stroke: state.text_stroke,
            text_stroke_width: state.text_stroke_width,
            font_style: state.font_style.unwrap_or_default(),
            align: state.align.unwrap_or_default(),
            line_height: state.line_height.unwrap_or(1.2),
            letter_spacing: state.letter_spacing.unwrap_or(0.0),
            text_decoration: state.text_decoration.unwrap_or_default(),
            text_transform: state.text_transform.unwrap_or_default(),
        }
    }

    fn write_state(&self, state: &mut ElementState) {
        state.text_stroke = self.text_stroke;
        state.text_stroke_width = self.text_stroke_width;
        state.font_style = Some(self.font_style);
        state.align = Some(self.align);
        state.line_height = Some(self.line_height);
        state.letter_spacing = Some(self.letter_spacing);
        state.text_decoration = Some(self.text_decoration);
        state.text_transform = Some(self.text_transform);
    }
}

/// A shape with a centered label.
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeTextElement {
    pub base: ElementBase,
    pub shape: ShapeAttrs,
    pub text: TextAttrs,
    pub typography: Typography,
}

impl ShapeTextElement {
    pub(crate) fn from_state(base: ElementBase, state: &ElementState) -> Self {
        Self {
            base,
            shape: ShapeAttrs::from_state(state),
            text: TextAttrs::from_state(state, &LABEL_DEFAULTS),
            typography: Typography::from_state(state),
        }
    }

    pub(crate) fn fill_defaults(state: &mut ElementState) {
        state.color = Some(palette::VIOLET);
        state.text = Some("Label".to_string());
        state.text_color = Some(SerializableColor::white());
    }

    pub fn to_state(&self) -> ElementState {
        let mut state = self.base.to_state();
        self.shape.write_state(&mut state);
        self.text.write_state(&mut state);
        self.typography.write_state(&mut state);
        state
    }

    /// Corner radius used for the outline.
    pub fn corner_radius(&self) -> f64 {
        match self.base.kind {
            ElementKind::ChatBubble => self
                .shape
                .corner_radius
                .unwrap_or(CHAT_BUBBLE_CORNER_RADIUS),
            _ => self.shape.corner_radius.unwrap_or(0.0),
        }
    }
}
