//! Regular polygons and stars with optionally rounded corners.

use super::PathData;
use kurbo::{Point, Vec2};
use std::f64::consts::PI;

/// Vertices of a regular polygon inscribed in the box, first vertex on top.
pub fn polygon_vertices(width: f64, height: f64, sides: u32) -> Vec<Point> {
    let sides = sides.max(3);
    let center = Point::new(width / 2.0, height / 2.0);
    let radius = width.min(height) / 2.0;
    (0..sides)
        .map(|i| {
            let angle = f64::from(i) * 2.0 * PI / f64::from(sides) - PI / 2.0;
            center + Vec2::from_angle(angle) * radius
        })
        .collect()
}

/// Vertices of a star, alternating outer and inner radius, first vertex on top.
///
/// `inner_percent` is the inner radius as a percentage of the outer radius.
pub fn star_vertices(width: f64, height: f64, points: u32, inner_percent: f64) -> Vec<Point> {
    let points = points.max(2);
    let center = Point::new(width / 2.0, height / 2.0);
    let outer = width.min(height) / 2.0;
    let inner = outer * inner_percent / 100.0;
    (0..points * 2)
        .map(|i| {
            let angle = f64::from(i) * PI / f64::from(points) - PI / 2.0;
            let radius = if i % 2 == 0 { outer } else { inner };
            center + Vec2::from_angle(angle) * radius
        })
        .collect()
}

/// Arc fillet replacing one polygon corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoundedCorner {
    /// Where the arc leaves the incoming edge.
    pub start: Point,
    /// Where the arc joins the outgoing edge.
    pub end: Point,
    /// Distance from the vertex to each tangent point.
    pub tangent_dist: f64,
    /// Half the shorter adjacent edge.
    pub max_tangent_dist: f64,
    /// Radius actually drawn after clamping.
    pub radius: f64,
}

impl RoundedCorner {
    /// Fit an arc of `radius` into the corner at `current`.
    ///
    /// The tangent distance is `radius / tan(θ/2)` where θ is the interior
    /// angle. When that would overrun half of the shorter adjacent edge it is
    /// clamped, and the radius shrinks to match.
    pub fn fit(prev: Point, current: Point, next: Point, radius: f64) -> Self {
        let to_prev = prev - current;
        let to_next = next - current;
        let (len_prev, len_next) = (to_prev.hypot(), to_next.hypot());
        let max_tangent_dist = len_prev.min(len_next) * 0.5;

        if len_prev < f64::EPSILON || len_next < f64::EPSILON {
            return Self {
                start: current,
                end: current,
                tangent_dist: 0.0,
                max_tangent_dist,
                radius: 0.0,
            };
        }

        let dir_prev = to_prev / len_prev;
        let dir_next = to_next / len_next;
        let angle = dir_prev.dot(dir_next).clamp(-1.0, 1.0).acos();
        let half_tan = (angle / 2.0).tan();

        let mut tangent_dist = radius / half_tan;
        let mut radius = radius;
        if !tangent_dist.is_finite() || tangent_dist > max_tangent_dist {
            tangent_dist = max_tangent_dist;
            radius = tangent_dist * half_tan;
        }

        Self {
            start: current + dir_prev * tangent_dist,
            end: current + dir_next * tangent_dist,
            tangent_dist,
            max_tangent_dist,
            radius,
        }
    }
}

/// Fit a fillet at every vertex of a closed polygon.
pub fn rounded_corners(vertices: &[Point], radius: f64) -> Vec<RoundedCorner> {
    let n = vertices.len();
    (0..n)
        .map(|i| {
            RoundedCorner::fit(
                vertices[(i + n - 1) % n],
                vertices[i],
                vertices[(i + 1) % n],
                radius,
            )
        })
        .collect()
}

fn sharp_path(vertices: &[Point]) -> PathData {
    let mut path = PathData::new();
    let mut iter = vertices.iter();
    if let Some(first) = iter.next() {
        path.move_to(*first);
        for v in iter {
            path.line_to(*v);
        }
        path.close();
    }
    path
}

fn rounded_path(vertices: &[Point], radius: f64, sweep: impl Fn(usize) -> bool) -> PathData {
    if radius <= 0.0 {
        return sharp_path(vertices);
    }
    let mut path = PathData::new();
    for (i, corner) in rounded_corners(vertices, radius).iter().enumerate() {
        if i == 0 {
            path.move_to(corner.start);
        }
        path.line_to(corner.start);
        path.arc_to(corner.radius, sweep(i), corner.end);
    }
    if !path.is_empty() {
        path.close();
    }
    path
}

/// Outline of a regular polygon with rounded corners.
pub fn polygon_path(width: f64, height: f64, sides: u32, corner_radius: f64) -> PathData {
    rounded_path(&polygon_vertices(width, height, sides), corner_radius, |_| true)
}

/// Outline of a star. Outer corners bend clockwise, inner corners the other way.
pub fn star_path(
    width: f64,
    height: f64,
    points: u32,
    inner_percent: f64,
    corner_radius: f64,
) -> PathData {
    rounded_path(
        &star_vertices(width, height, points, inner_percent),
        corner_radius,
        |i| i % 2 == 0,
    )
}
