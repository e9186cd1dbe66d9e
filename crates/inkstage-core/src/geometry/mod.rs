//! Procedural outlines for elements.
//!
//! Generators produce a [`PathData`] in the element's local frame (origin at
//! the top-left of its box). Paths can be emitted as SVG path strings or
//! flattened into a kurbo [`BezPath`] for hit testing and rendering.

mod arrow;
mod bubble;
mod polygon;

pub use arrow::{ArrowDirection, arrow_path};
pub use bubble::{BUBBLE_TAIL_HEIGHT, bubble_path};
pub use polygon::{
    RoundedCorner, polygon_path, polygon_vertices, rounded_corners, star_path, star_vertices,
};

use crate::elements::{Element, ElementKind};
use kurbo::{Arc, BezPath, Ellipse, Point, Rect, RoundedRect, Shape, SvgArc, Vec2};
use std::fmt::Write;

/// Flattening tolerance used when converting curves.
const PATH_TOLERANCE: f64 = 0.1;

/// One drawing command.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathCommand {
    MoveTo(Point),
    LineTo(Point),
    /// Quadratic curve through a control point.
    QuadTo(Point, Point),
    /// Circular arc from the current point, small-arc flag always unset.
    ArcTo {
        radius: f64,
        sweep: bool,
        to: Point,
    },
    Close,
}

/// An ordered list of path commands.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PathData {
    commands: Vec<PathCommand>,
}

impl PathData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, command: PathCommand) {
        self.commands.push(command);
    }

    pub fn move_to(&mut self, p: Point) {
        self.push(PathCommand::MoveTo(p));
    }

    pub fn line_to(&mut self, p: Point) {
        self.push(PathCommand::LineTo(p));
    }

    pub fn quad_to(&mut self, ctrl: Point, p: Point) {
        self.push(PathCommand::QuadTo(ctrl, p));
    }

    pub fn arc_to(&mut self, radius: f64, sweep: bool, to: Point) {
        self.push(PathCommand::ArcTo { radius, sweep, to });
    }

    pub fn close(&mut self) {
        self.push(PathCommand::Close);
    }

    pub fn commands(&self) -> &[PathCommand] {
        &self.commands
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// SVG path syntax (`M`, `L`, `Q`, `A`, `Z`).
    pub fn to_svg(&self) -> String {
        let mut out = String::new();
        for command in &self.commands {
            if !out.is_empty() {
                out.push(' ');
            }
            // Writing to a String cannot fail.
            let _ = match command {
                PathCommand::MoveTo(p) => write!(out, "M {} {}", p.x, p.y),
                PathCommand::LineTo(p) => write!(out, "L {} {}", p.x, p.y),
                PathCommand::QuadTo(c, p) => write!(out, "Q {} {} {} {}", c.x, c.y, p.x, p.y),
                PathCommand::ArcTo { radius, sweep, to } => write!(
                    out,
                    "A {radius} {radius} 0 0 {} {} {}",
                    u8::from(*sweep),
                    to.x,
                    to.y
                ),
                PathCommand::Close => write!(out, "Z"),
            };
        }
        out
    }

    /// Convert into a kurbo path, turning arcs into cubic segments.
    pub fn to_bez_path(&self) -> BezPath {
        let mut path = BezPath::new();
        let mut start = Point::ZERO;
        let mut current = Point::ZERO;
        for command in &self.commands {
            match *command {
                PathCommand::MoveTo(p) => {
                    path.move_to(p);
                    start = p;
                    current = p;
                }
                PathCommand::LineTo(p) => {
                    path.line_to(p);
                    current = p;
                }
                PathCommand::QuadTo(c, p) => {
                    path.quad_to(c, p);
                    current = p;
                }
                PathCommand::ArcTo { radius, sweep, to } => {
                    let svg_arc = SvgArc {
                        from: current,
                        to,
                        radii: Vec2::new(radius, radius),
                        x_rotation: 0.0,
                        large_arc: false,
                        sweep,
                    };
                    match Arc::from_svg_arc(&svg_arc) {
                        Some(arc) => {
                            for el in arc.append_iter(PATH_TOLERANCE) {
                                path.push(el);
                            }
                        }
                        None => path.line_to(to),
                    }
                    current = to;
                }
                PathCommand::Close => {
                    path.close_path();
                    current = start;
                }
            }
        }
        path
    }
}

/// Renderable outline of an element, in its local frame.
#[derive(Debug, Clone, PartialEq)]
pub enum Outline {
    Rect { rect: Rect, corner_radius: f64 },
    Ellipse(Ellipse),
    Path(PathData),
    Polyline { points: Vec<Point>, closed: bool },
    Image(Rect),
    Text(Rect),
}

impl Outline {
    pub fn to_bez_path(&self) -> BezPath {
        match self {
            Outline::Rect {
                rect,
                corner_radius,
            } => RoundedRect::from_rect(*rect, *corner_radius).to_path(PATH_TOLERANCE),
            Outline::Ellipse(ellipse) => ellipse.to_path(PATH_TOLERANCE),
            Outline::Path(data) => data.to_bez_path(),
            Outline::Polyline { points, closed } => {
                let mut path = BezPath::new();
                let mut iter = points.iter();
                if let Some(first) = iter.next() {
                    path.move_to(*first);
                    for p in iter {
                        path.line_to(*p);
                    }
                    if *closed {
                        path.close_path();
                    }
                }
                path
            }
            Outline::Image(rect) | Outline::Text(rect) => rect.to_path(PATH_TOLERANCE),
        }
    }
}

/// Build the outline for an element.
pub fn outline(element: &Element) -> Outline {
    let base = element.base();
    let (w, h) = (base.width, base.height);
    let frame = Rect::new(0.0, 0.0, w, h);
    let ellipse = || Ellipse::new((w / 2.0, h / 2.0), (w / 2.0, h / 2.0), 0.0);

    match element {
        Element::Shape(shape) => {
            let radius = shape.shape.corner_radius.unwrap_or(0.0);
            match base.kind {
                ElementKind::Circle => Outline::Ellipse(ellipse()),
                ElementKind::Triangle => {
                    let sides = shape.shape.sides.unwrap_or(3);
                    Outline::Path(polygon_path(w, h, sides, radius))
                }
                ElementKind::Star => {
                    let points = shape.shape.sides.unwrap_or(5);
                    let inner = shape.shape.star_inner_radius.unwrap_or(50.0);
                    Outline::Path(star_path(w, h, points, inner, radius))
                }
                _ => Outline::Rect {
                    rect: frame,
                    corner_radius: radius,
                },
            }
        }
        Element::ShapeText(label) => match base.kind {
            ElementKind::CircleText => Outline::Ellipse(ellipse()),
            ElementKind::ChatBubble => Outline::Path(bubble_path(w, h, label.corner_radius())),
            ElementKind::ArrowLeft => Outline::Path(arrow_path(w, h, ArrowDirection::Left)),
            ElementKind::ArrowRight => Outline::Path(arrow_path(w, h, ArrowDirection::Right)),
            _ => Outline::Rect {
                rect: frame,
                corner_radius: label.corner_radius(),
            },
        },
        Element::Image(_) => Outline::Image(frame),
        Element::Text(_) => Outline::Text(frame),
        Element::Stroke(stroke) => Outline::Polyline {
            points: stroke.local_points(),
            closed: stroke.is_closed_path(),
        },
    }
}

/// Distance from a point to a line segment.
pub fn point_to_segment_dist(point: Point, a: Point, b: Point) -> f64 {
    let seg = b - a;
    let pv = point - a;
    let len_sq = seg.hypot2();
    if len_sq < f64::EPSILON {
        return pv.hypot();
    }
    let t = (pv.dot(seg) / len_sq).clamp(0.0, 1.0);
    point.distance(a + seg * t)
}

/// Even-odd containment test against a closed polygon.
pub fn point_in_polygon(point: Point, polygon: &[Point]) -> bool {
    if polygon.len() < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = polygon.len() - 1;
    for i in 0..polygon.len() {
        let (a, b) = (polygon[i], polygon[j]);
        if (a.y > point.y) != (b.y > point.y)
            && point.x < (b.x - a.x) * (point.y - a.y) / (b.y - a.y) + a.x
        {
            inside = !inside;
        }
        j = i;
    }
    inside
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elements::{ElementPatch, StrokeElement};

    #[test]
    fn test_svg_output() {
        let mut path = PathData::new();
        path.move_to(Point::new(0.0, 1.5));
        path.line_to(Point::new(10.0, 0.0));
        path.arc_to(4.0, true, Point::new(12.0, 3.0));
        path.quad_to(Point::new(1.0, 2.0), Point::new(3.0, 4.0));
        path.close();
        assert_eq!(
            path.to_svg(),
            "M 0 1.5 L 10 0 A 4 4 0 0 1 12 3 Q 1 2 3 4 Z"
        );
    }

    #[test]
    fn test_bez_path_bounds() {
        let mut path = PathData::new();
        path.move_to(Point::new(0.0, 0.0));
        path.line_to(Point::new(10.0, 0.0));
        path.arc_to(5.0, true, Point::new(10.0, 10.0));
        path.line_to(Point::new(0.0, 10.0));
        path.close();
        let bbox = path.to_bez_path().bounding_box();
        assert!(bbox.x0.abs() < 1e-9);
        assert!(bbox.x1 > 14.9 && bbox.x1 < 15.1);
        assert!((bbox.y1 - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_point_to_segment_dist() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(10.0, 0.0);
        assert!((point_to_segment_dist(Point::new(5.0, 3.0), a, b) - 3.0).abs() < 1e-9);
        assert!((point_to_segment_dist(Point::new(13.0, 4.0), a, b) - 5.0).abs() < 1e-9);
        assert!((point_to_segment_dist(Point::new(3.0, 4.0), a, a) - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_point_in_polygon() {
        let square = [
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, 10.0),
            Point::new(0.0, 10.0),
        ];
        assert!(point_in_polygon(Point::new(5.0, 5.0), &square));
        assert!(!point_in_polygon(Point::new(15.0, 5.0), &square));
    }

    #[test]
    fn test_outline_dispatch() {
        let circle = Element::create_default(ElementKind::Circle, 0.0, 0.0, None);
        assert!(matches!(circle.outline(), Outline::Ellipse(_)));

        let star = Element::create_default(ElementKind::Star, 0.0, 0.0, None);
        let Outline::Path(path) = star.outline() else {
            panic!("star should be a path");
        };
        // Ten vertices plus close.
        assert_eq!(path.commands().len(), 11);

        let bubble = Element::create_default(ElementKind::ChatBubble, 0.0, 0.0, None);
        assert!(matches!(bubble.outline(), Outline::Path(p) if !p.is_empty()));

        let rect = Element::create_default(ElementKind::RectangleText, 0.0, 0.0, None);
        assert!(matches!(rect.outline(), Outline::Rect { .. }));
    }

    #[test]
    fn test_stroke_outline() {
        let pen = Element::create_default(ElementKind::Pen, 0.0, 0.0, None).update(ElementPatch {
            points: Some(vec![0.0, 0.0, 5.0, 5.0, 10.0, 0.0]),
            closed: Some(true),
            ..Default::default()
        });
        let stroke: &StrokeElement = pen.as_stroke().unwrap();
        assert_eq!(stroke.point_count(), 3);
        let Outline::Polyline { points, closed } = pen.outline() else {
            panic!("stroke should be a polyline");
        };
        assert_eq!(points.len(), 3);
        assert!(closed);
    }
}
