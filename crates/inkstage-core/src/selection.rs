//! Hit testing, selection handles and the resize/rotate reducers.
//!
//! Handles live on the element's rotated frame. Dragging one produces a
//! [`ResizeTransform`], the same value a host transformer reports when a
//! resize ends, and [`apply_resize_transform`] bakes it into the element.

use crate::config::EngineConfig;
use crate::elements::{Element, ElementPatch};
use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};

/// Handle hit radius in document units.
pub const HANDLE_HIT_TOLERANCE: f64 = 8.0;
/// Distance from the top edge to the rotation handle.
pub const ROTATE_HANDLE_OFFSET: f64 = 25.0;

/// Type of selection handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HandleKind {
    Corner(Corner),
    /// Edge midpoint, resizes one axis.
    Edge(Edge),
    /// Rotation handle above the top edge.
    Rotate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Edge {
    Top,
    Right,
    Bottom,
    Left,
}

/// A selection handle with its position and type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Handle {
    /// Position in document coordinates.
    pub position: Point,
    pub kind: HandleKind,
}

impl Handle {
    pub fn new(position: Point, kind: HandleKind) -> Self {
        Self { position, kind }
    }

    pub fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        self.position.distance(point) <= tolerance
    }
}

/// Handles of an element, following its rotation.
pub fn handles(element: &Element) -> Vec<Handle> {
    let base = element.base();
    let (w, h) = (base.width, base.height);
    let transform = base.transform();
    let at = |x: f64, y: f64, kind| Handle::new(transform * Point::new(x, y), kind);

    vec![
        at(0.0, 0.0, HandleKind::Corner(Corner::TopLeft)),
        at(w, 0.0, HandleKind::Corner(Corner::TopRight)),
        at(0.0, h, HandleKind::Corner(Corner::BottomLeft)),
        at(w, h, HandleKind::Corner(Corner::BottomRight)),
        at(w / 2.0, 0.0, HandleKind::Edge(Edge::Top)),
        at(w, h / 2.0, HandleKind::Edge(Edge::Right)),
        at(w / 2.0, h, HandleKind::Edge(Edge::Bottom)),
        at(0.0, h / 2.0, HandleKind::Edge(Edge::Left)),
        at(w / 2.0, -ROTATE_HANDLE_OFFSET, HandleKind::Rotate),
    ]
}

/// The handle of `element` under `point`, if any.
pub fn handle_at(element: &Element, point: Point, tolerance: f64) -> Option<HandleKind> {
    handles(element)
        .into_iter()
        .find(|handle| handle.hit_test(point, tolerance))
        .map(|handle| handle.kind)
}

/// Topmost visible element under `point`.
pub fn element_at(elements: &[Element], point: Point, tolerance: f64) -> Option<&Element> {
    elements
        .iter()
        .rev()
        .filter(|e| e.is_visible())
        .find(|e| e.hit_test(point, tolerance))
}

/// End state of a resize or rotate gesture.
///
/// `scale_x`/`scale_y` are relative to the element's current size; the
/// position and rotation are absolute.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResizeTransform {
    pub x: f64,
    pub y: f64,
    pub scale_x: f64,
    pub scale_y: f64,
    /// Degrees.
    pub rotation: f64,
}

impl ResizeTransform {
    /// Transform that leaves `element` where it is.
    pub fn identity(element: &Element) -> Self {
        let base = element.base();
        Self {
            x: base.x,
            y: base.y,
            scale_x: 1.0,
            scale_y: 1.0,
            rotation: base.rotation,
        }
    }
}

/// Bake a transform into the element's geometry.
///
/// Scale goes into `width`/`height` (and stroke points) instead of being
/// kept as a factor. Text-bearing elements also rescale `font_size` by the
/// vertical factor. A result smaller than the minimum size on either axis is
/// rejected and the element is returned unchanged.
pub fn apply_resize_transform(
    element: &Element,
    transform: &ResizeTransform,
    config: &EngineConfig,
) -> Element {
    let base = element.base();
    let width = base.width * transform.scale_x;
    let height = base.height * transform.scale_y;
    if width < config.min_element_size || height < config.min_element_size {
        log::debug!(
            "Rejected resize of {} to {width}x{height}",
            base.id()
        );
        return element.clone();
    }

    let mut patch = ElementPatch {
        x: Some(transform.x),
        y: Some(transform.y),
        width: Some(width),
        height: Some(height),
        rotation: Some(transform.rotation),
        ..Default::default()
    };

    if let Element::Stroke(stroke) = element {
        let mut scaled = stroke.clone();
        scaled.scale_points(transform.scale_x, transform.scale_y);
        patch.points = Some(scaled.points);
    }

    if let Some(text) = element.text_attrs() {
        if transform.scale_y != 1.0 {
            patch.font_size = Some(
                (text.font_size * transform.scale_y)
                    .round()
                    .clamp(config.min_font_size, config.max_font_size),
            );
        }
    }

    element.update(patch)
}

/// Transform for dragging `handle` from `start` to `current`.
///
/// Returns `None` for elements with no area to scale from.
/// The rotation handle yields [`rotate_toward`].
pub fn resize_from_handle(
    element: &Element,
    handle: HandleKind,
    start: Point,
    current: Point,
) -> Option<ResizeTransform> {
    let base = element.base();
    if base.width <= 0.0 || base.height <= 0.0 {
        return None;
    }

    let delta: Vec2 = base.to_local(current) - base.to_local(start);
    let (w, h) = (base.width, base.height);
    let (x0, y0, x1, y1) = match handle {
        HandleKind::Rotate => return Some(rotate_toward(element, current)),
        HandleKind::Corner(Corner::TopLeft) => (delta.x, delta.y, w, h),
        HandleKind::Corner(Corner::TopRight) => (0.0, delta.y, w + delta.x, h),
        HandleKind::Corner(Corner::BottomLeft) => (delta.x, 0.0, w, h + delta.y),
        HandleKind::Corner(Corner::BottomRight) => (0.0, 0.0, w + delta.x, h + delta.y),
        HandleKind::Edge(Edge::Top) => (0.0, delta.y, w, h),
        HandleKind::Edge(Edge::Right) => (0.0, 0.0, w + delta.x, h),
        HandleKind::Edge(Edge::Bottom) => (0.0, 0.0, w, h + delta.y),
        HandleKind::Edge(Edge::Left) => (delta.x, 0.0, w, h),
    };

    let origin = base.transform() * Point::new(x0, y0);
    Some(ResizeTransform {
        x: origin.x,
        y: origin.y,
        scale_x: (x1 - x0) / w,
        scale_y: (y1 - y0) / h,
        rotation: base.rotation,
    })
}

/// Rotate about the element center so its top faces `pointer`.
pub fn rotate_toward(element: &Element, pointer: Point) -> ResizeTransform {
    let base = element.base();
    let half = Vec2::new(base.width / 2.0, base.height / 2.0);
    let center = base.transform() * half.to_point();
    let to_pointer = pointer - center;
    // Zero degrees points up.
    let radians = to_pointer.y.atan2(to_pointer.x) + std::f64::consts::FRAC_PI_2;
    let origin = center - (kurbo::Affine::rotate(radians) * half.to_point()).to_vec2();
    ResizeTransform {
        x: origin.x,
        y: origin.y,
        scale_x: 1.0,
        scale_y: 1.0,
        rotation: radians.to_degrees(),
    }
}
