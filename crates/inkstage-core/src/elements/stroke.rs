//! Freehand (pencil) and path (pen) strokes.

use super::{ElementBase, ElementState, SerializableColor};
use crate::geometry::{point_in_polygon, point_to_segment_dist};
use kurbo::{Point, Rect};

pub const DEFAULT_STROKE_WIDTH: f64 = 2.0;

/// A polyline stored as flat `x, y` pairs relative to the element origin.
#[derive(Debug, Clone, PartialEq)]
pub struct StrokeElement {
    pub base: ElementBase,
    pub points: Vec<f64>,
    pub stroke: SerializableColor,
    pub stroke_width: f64,
    /// Whether the last point connects back to the first.
    pub closed: bool,
    pub fill: Option<SerializableColor>,
}

impl StrokeElement {
    pub(crate) fn from_state(base: ElementBase, state: &ElementState) -> Self {
        Self {
            base,
            points: state.points.clone().unwrap_or_default(),
            stroke: state.stroke.unwrap_or_else(SerializableColor::black),
            stroke_width: state.stroke_width.unwrap_or(DEFAULT_STROKE_WIDTH),
            closed: state.closed.unwrap_or(false),
            fill: state.fill,
        }
    }

    pub(crate) fn fill_defaults(state: &mut ElementState) {
        state.points = Some(Vec::new());
        state.stroke = Some(SerializableColor::black());
        state.stroke_width = Some(DEFAULT_STROKE_WIDTH);
    }

    pub fn to_state(&self) -> ElementState {
        let mut state = self.base.to_state();
        state.points = Some(self.points.clone());
        state.stroke = Some(self.stroke);
        state.stroke_width = Some(self.stroke_width);
        state.closed = Some(self.closed);
        state.fill = self.fill;
        state
    }

    /// Number of complete points.
    pub fn point_count(&self) -> usize {
        self.points.len() / 2
    }

    /// Points in the element's local frame.
    pub fn local_points(&self) -> Vec<Point> {
        self.points
            .chunks_exact(2)
            .map(|pair| Point::new(pair[0], pair[1]))
            .collect()
    }

    /// The path is drawn with a segment back to its start.
    pub fn is_closed_path(&self) -> bool {
        self.closed || self.fill.is_some()
    }

    /// Rebase the points on their bounding box.
    ///
    /// The origin moves to the box's top-left corner and every point becomes
    /// relative to it. Returns `None` for strokes with fewer than two points.
    pub fn normalized(&self) -> Option<Self> {
        let points = self.local_points();
        if points.len() < 2 {
            return None;
        }

        let bbox = points
            .iter()
            .skip(1)
            .fold(Rect::from_points(points[0], points[0]), |rect, p| {
                rect.union_pt(*p)
            });

        let mut normalized = self.clone();
        normalized.points = points
            .iter()
            .flat_map(|p| [p.x - bbox.x0, p.y - bbox.y0])
            .collect();
        normalized.base.x = self.base.x + bbox.x0;
        normalized.base.y = self.base.y + bbox.y0;
        normalized.base.width = bbox.width().max(1.0);
        normalized.base.height = bbox.height().max(1.0);
        Some(normalized)
    }

    /// Scale every point about the local origin.
    pub fn scale_points(&mut self, sx: f64, sy: f64) {
        for pair in self.points.chunks_exact_mut(2) {
            pair[0] *= sx;
            pair[1] *= sy;
        }
    }

    fn segments(&self) -> impl Iterator<Item = (usize, Point, Point)> + '_ {
        let points = self.local_points();
        let closing = (self.is_closed_path() && points.len() >= 3)
            .then(|| (points.len() * 2, points[points.len() - 1], points[0]));
        let open: Vec<_> = points
            .windows(2)
            .enumerate()
            .map(|(i, w)| (i * 2 + 2, w[0], w[1]))
            .collect();
        open.into_iter().chain(closing)
    }

    /// Hit test against a point in the local frame.
    pub fn hit_test_local(&self, point: Point, tolerance: f64) -> bool {
        let reach = tolerance + self.stroke_width / 2.0;
        if self
            .segments()
            .any(|(_, a, b)| point_to_segment_dist(point, a, b) <= reach)
        {
            return true;
        }
        self.fill.is_some() && point_in_polygon(point, &self.local_points())
    }

    /// Points with a new vertex spliced into the nearest segment.
    ///
    /// `point` is in the local frame. Returns `None` when no segment lies
    /// within `tolerance`.
    pub fn insert_point(&self, point: Point, tolerance: f64) -> Option<Vec<f64>> {
        let mut closest: Option<(usize, f64)> = None;
        for (index, a, b) in self.segments() {
            let dist = point_to_segment_dist(point, a, b);
            if closest.is_none_or(|(_, best)| dist < best) {
                closest = Some((index, dist));
            }
        }

        let (index, dist) = closest?;
        if dist > tolerance {
            return None;
        }
        let mut points = self.points.clone();
        points.splice(index..index, [point.x, point.y]);
        Some(points)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elements::{Element, ElementId, ElementKind};

    fn stroke(points: &[f64]) -> StrokeElement {
        let mut state = ElementState::new(ElementId::new("p"), ElementKind::Pen);
        state.points = Some(points.to_vec());
        match Element::create(state) {
            Element::Stroke(stroke) => stroke,
            other => panic!("expected stroke, got {other:?}"),
        }
    }

    #[test]
    fn test_defaults() {
        let s = stroke(&[]);
        assert_eq!(s.stroke, SerializableColor::black());
        assert!((s.stroke_width - DEFAULT_STROKE_WIDTH).abs() < f64::EPSILON);
        assert!(!s.closed);
        assert!(s.fill.is_none());
    }

    #[test]
    fn test_normalize() {
        let normalized = stroke(&[0.0, 0.0, 10.0, 0.0, 10.0, 10.0])
            .normalized()
            .unwrap();
        assert_eq!(normalized.points, vec![0.0, 0.0, 10.0, 0.0, 10.0, 10.0]);
        assert!((normalized.base.width - 10.0).abs() < f64::EPSILON);
        assert!((normalized.base.height - 10.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_normalize_offsets_origin() {
        let normalized = stroke(&[50.0, 40.0, 30.0, 60.0]).normalized().unwrap();
        assert_eq!(normalized.points, vec![20.0, 0.0, 0.0, 20.0]);
        assert!((normalized.base.x - 30.0).abs() < f64::EPSILON);
        assert!((normalized.base.y - 40.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_normalize_straight_line_has_min_size() {
        let normalized = stroke(&[0.0, 5.0, 20.0, 5.0]).normalized().unwrap();
        assert!((normalized.base.width - 20.0).abs() < f64::EPSILON);
        assert!((normalized.base.height - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_normalize_rejects_single_point() {
        assert!(stroke(&[3.0, 4.0]).normalized().is_none());
        assert!(stroke(&[]).normalized().is_none());
    }

    #[test]
    fn test_insert_point_on_segment() {
        let s = stroke(&[0.0, 0.0, 100.0, 0.0, 100.0, 100.0]);
        let points = s.insert_point(Point::new(50.0, 3.0), 10.0).unwrap();
        assert_eq!(points, vec![0.0, 0.0, 50.0, 3.0, 100.0, 0.0, 100.0, 100.0]);
    }

    #[test]
    fn test_insert_point_closing_segment_ignores_dangling_coordinate() {
        let mut s = stroke(&[0.0, 0.0, 100.0, 0.0, 100.0, 100.0, 7.0]);
        s.closed = true;
        let points = s.insert_point(Point::new(50.0, 52.0), 10.0).unwrap();
        assert_eq!(
            points,
            vec![0.0, 0.0, 100.0, 0.0, 100.0, 100.0, 50.0, 52.0, 7.0]
        );
    }

    #[test]
    fn test_insert_point_second_segment() {
        let s = stroke(&[0.0, 0.0, 100.0, 0.0, 100.0, 100.0]);
        let points = s.insert_point(Point::new(98.0, 60.0), 10.0).unwrap();
        assert_eq!(points, vec![0.0, 0.0, 100.0, 0.0, 98.0, 60.0, 100.0, 100.0]);
    }

    #[test]
    fn test_insert_point_closing_segment() {
        let mut s = stroke(&[0.0, 0.0, 100.0, 0.0, 100.0, 100.0]);
        assert!(s.insert_point(Point::new(50.0, 52.0), 10.0).is_none());

        s.closed = true;
        let points = s.insert_point(Point::new(50.0, 52.0), 10.0).unwrap();
        assert_eq!(points.len(), 8);
        assert_eq!(&points[6..], &[50.0, 52.0]);
    }

    #[test]
    fn test_insert_point_out_of_range() {
        let s = stroke(&[0.0, 0.0, 100.0, 0.0]);
        assert!(s.insert_point(Point::new(50.0, 30.0), 10.0).is_none());
    }

    #[test]
    fn test_hit_test_local() {
        let mut s = stroke(&[0.0, 0.0, 100.0, 0.0, 100.0, 100.0]);
        assert!(s.hit_test_local(Point::new(50.0, 4.0), 3.0));
        assert!(!s.hit_test_local(Point::new(60.0, 30.0), 3.0));

        s.fill = Some(SerializableColor::white());
        assert!(s.hit_test_local(Point::new(60.0, 30.0), 3.0));
    }

    #[test]
    fn test_scale_points() {
        let mut s = stroke(&[10.0, 10.0, 20.0, 5.0]);
        s.scale_points(2.0, 0.5);
        assert_eq!(s.points, vec![20.0, 5.0, 40.0, 2.5]);
    }
}
