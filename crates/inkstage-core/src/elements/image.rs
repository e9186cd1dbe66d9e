//! Raster image elements.

use super::{ElementBase, ElementState};

/// Source used for images created without one.
pub const PLACEHOLDER_IMAGE_SRC: &str = "/placeholder.png";

#[derive(Debug, Clone, PartialEq)]
pub struct ImageElement {
    pub base: ElementBase,
    /// Image URL or data URI.
    pub src: String,
}

impl ImageElement {
    pub(crate) fn from_state(base: ElementBase, state: &ElementState) -> Self {
        Self {
            base,
            src: state.src.clone().unwrap_or_default(),
        }
    }

    pub(crate) fn fill_defaults(state: &mut ElementState) {
        state.width = 200.0;
        state.height = 300.0;
        state.src = Some(PLACEHOLDER_IMAGE_SRC.to_string());
    }

    pub fn to_state(&self) -> ElementState {
        let mut state = self.base.to_state();
        state.src = Some(self.src.clone());
        state
    }
}
