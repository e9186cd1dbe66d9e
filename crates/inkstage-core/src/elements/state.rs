//! Flat element state used for interchange and copy-on-write updates.

use super::{
    ElementId, ElementKind, FontStyle, SerializableColor, StrokeStyle, TextAlign, TextDecoration,
    TextTransform,
};
use serde::{Deserialize, Serialize};

fn default_true() -> bool {
    true
}

/// Every attribute an element can carry, with variant-specific fields optional.
///
/// The factory fills missing variant fields with defaults, so
/// `Element::create(element.to_state())` reproduces the element exactly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementState {
    pub id: ElementId,
    #[serde(rename = "type")]
    pub kind: ElementKind,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
    #[serde(default)]
    pub width: f64,
    #[serde(default)]
    pub height: f64,
    /// Rotation in degrees around the element origin.
    #[serde(default)]
    pub rotation: f64,
    #[serde(default = "default_true")]
    pub visible: bool,
    #[serde(default)]
    pub locked: bool,
    #[serde(default)]
    pub is_editing: bool,

    // Shape
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<SerializableColor>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke: Option<SerializableColor>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke_width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke_style: Option<StrokeStyle>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub corner_radius: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sides: Option<u32>,
    /// Inner radius as a percentage (0-100) of the outer radius.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub star_inner_radius: Option<f64>,

    // Image
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub src: Option<String>,

    // Text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_color: Option<SerializableColor>,

    // Shape with text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_stroke: Option<SerializableColor>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_stroke_width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_style: Option<FontStyle>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub align: Option<TextAlign>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_height: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub letter_spacing: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_decoration: Option<TextDecoration>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_transform: Option<TextTransform>,

    // Stroke
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub points: Option<Vec<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub closed: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill: Option<SerializableColor>,
}

impl ElementState {
    /// A bare state with only the common attributes set.
    pub fn new(id: ElementId, kind: ElementKind) -> Self {
        Self {
            name: format!("{} {}", kind, id.suffix()),
            id,
            kind,
            x: 0.0,
            y: 0.0,
            width: 0.0,
            height: 0.0,
            rotation: 0.0,
            visible: true,
            locked: false,
            is_editing: false,
            color: None,
            stroke: None,
            stroke_width: None,
            stroke_style: None,
            corner_radius: None,
            sides: None,
            star_inner_radius: None,
            src: None,
            text: None,
            font_size: None,
            font_family: None,
            text_color: None,
            text_stroke: None,
            text_stroke_width: None,
            font_style: None,
            align: None,
            line_height: None,
            letter_spacing: None,
            text_decoration: None,
            text_transform: None,
            points: None,
            closed: None,
            fill: None,
        }
    }
}

/// A partial set of attributes merged over an element's state.
///
/// `None` leaves the attribute untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ElementPatch {
    pub id: Option<ElementId>,
    #[serde(rename = "type")]
    pub kind: Option<ElementKind>,
    pub name: Option<String>,
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub rotation: Option<f64>,
    pub visible: Option<bool>,
    pub locked: Option<bool>,
    pub is_editing: Option<bool>,
    pub color: Option<SerializableColor>,
    pub stroke: Option<SerializableColor>,
    pub stroke_width: Option<f64>,
    pub stroke_style: Option<StrokeStyle>,
    pub corner_radius: Option<f64>,
    pub sides: Option<u32>,
    pub star_inner_radius: Option<f64>,
    pub src: Option<String>,
    pub text: Option<String>,
    pub font_size: Option<f64>,
    pub font_family: Option<String>,
    pub text_color: Option<SerializableColor>,
    pub text_stroke: Option<SerializableColor>,
    pub text_stroke_width: Option<f64>,
    pub font_style: Option<FontStyle>,
    pub align: Option<TextAlign>,
    pub line_height: Option<f64>,
    pub letter_spacing: Option<f64>,
    pub text_decoration: Option<TextDecoration>,
    pub text_transform: Option<TextTransform>,
    pub points: Option<Vec<f64>>,
    pub closed: Option<bool>,
    pub fill: Option<SerializableColor>,
}

macro_rules! merge_fields {
    ($patch:ident, $state:ident; required: $($req:ident),*; optional: $($opt:ident),*) => {
        $(if let Some(value) = $patch.$req { $state.$req = value; })*
        $(if let Some(value) = $patch.$opt { $state.$opt = Some(value); })*
    };
}

impl ElementPatch {
    /// Move to a new origin.
    pub fn position(x: f64, y: f64) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
            ..Default::default()
        }
    }

    /// Set origin and size at once.
    pub fn frame(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
            width: Some(width),
            height: Some(height),
            ..Default::default()
        }
    }

    /// True when the patch sets nothing.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Merge this patch over a state.
    pub fn apply_to(self, state: &mut ElementState) {
        let patch = self;
        merge_fields!(patch, state;
            required: id, kind, name, x, y, width, height, rotation, visible, locked, is_editing;
            optional: color, stroke, stroke_width, stroke_style, corner_radius, sides,
                star_inner_radius, src, text, font_size, font_family, text_color, text_stroke,
                text_stroke_width, font_style, align, line_height, letter_spacing,
                text_decoration, text_transform, points, closed, fill);
    }
}
