//! Free-standing text and the text attributes shared with labelled shapes.

use super::{ElementBase, ElementState, SerializableColor};

/// Text content and font.
#[derive(Debug, Clone, PartialEq)]
pub struct TextAttrs {
    pub text: String,
    pub font_size: f64,
    pub font_family: String,
    pub text_color: SerializableColor,
}

/// Fallbacks used when a state omits text attributes.
pub(crate) struct TextDefaults {
    pub text: &'static str,
    pub font_size: f64,
    pub font_family: &'static str,
    pub text_color: SerializableColor,
}

pub(crate) const TEXT_DEFAULTS: TextDefaults = TextDefaults {
    text: "Double click to edit",
    font_size: 20.0,
    font_family: "Arial",
    text_color: SerializableColor::black(),
};

impl TextAttrs {
    pub(crate) fn from_state(state: &ElementState, defaults: &TextDefaults) -> Self {
        Self {
            text: state
                .text
                .clone()
                .unwrap_or_else(|| defaults.text.to_string()),
            font_size: state
                .font_size
                .filter(|size| *size > 0.0)
                .unwrap_or(defaults.font_size),
            font_family: state
                .font_family
                .clone()
                .filter(|family| !family.is_empty())
                .unwrap_or_else(|| defaults.font_family.to_string()),
            text_color: state.text_color.unwrap_or(defaults.text_color),
        }
    }

    pub(crate) fn write_state(&self, state: &mut ElementState) {
        state.text = Some(self.text.clone());
        state.font_size = Some(self.font_size);
        state.font_family = Some(self.font_family.clone());
        state.text_color = Some(self.text_color);
    }
}

/// A standalone text block.
#[derive(Debug, Clone, PartialEq)]
pub struct TextElement {
    pub base: ElementBase,
    pub text: TextAttrs,
}

impl TextElement {
    pub(crate) fn from_state(base: ElementBase, state: &ElementState) -> Self {
        Self {
            base,
            text: TextAttrs::from_state(state, &TEXT_DEFAULTS),
        }
    }

    pub(crate) fn fill_defaults(state: &mut ElementState) {
        state.width = 200.0;
        state.height = 50.0;
        state.text = Some("Hello World".to_string());
    }

    pub fn to_state(&self) -> ElementState {
        let mut state = self.base.to_state();
        self.text.write_state(&mut state);
        state
    }
}
