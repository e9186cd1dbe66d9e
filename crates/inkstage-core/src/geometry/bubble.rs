//! Speech bubble with a tail at the bottom left.

use super::PathData;
use kurbo::Point;

/// Space reserved below the body for the tail, and mirrored above it.
pub const BUBBLE_TAIL_HEIGHT: f64 = 15.0;

/// Where the tail leaves the bottom edge.
const TAIL_START_X: f64 = 45.0;
const TAIL_TIP_X: f64 = 15.0;
/// Where the tail rejoins the bottom edge.
const TAIL_END_X: f64 = 25.0;

/// Rounded-rectangle body with quadratic corners and a three-point tail.
///
/// Returns an empty path when the box is too short to hold a body.
pub fn bubble_path(width: f64, height: f64, corner_radius: f64) -> PathData {
    let top = BUBBLE_TAIL_HEIGHT;
    let body_height = height - 2.0 * BUBBLE_TAIL_HEIGHT;
    let mut path = PathData::new();
    if body_height <= 0.0 {
        return path;
    }

    let r = corner_radius.min(width / 2.0).min(body_height / 2.0).max(0.0);
    let bottom = top + body_height;
    let (w, h) = (width, height);

    path.move_to(Point::new(r, top));
    path.line_to(Point::new(w - r, top));
    path.quad_to(Point::new(w, top), Point::new(w, top + r));
    path.line_to(Point::new(w, bottom - r));
    path.quad_to(Point::new(w, bottom), Point::new(w - r, bottom));
    path.line_to(Point::new(TAIL_START_X, bottom));
    path.line_to(Point::new(TAIL_TIP_X, h));
    path.line_to(Point::new(TAIL_END_X, bottom));
    path.line_to(Point::new(r, bottom));
    path.quad_to(Point::new(0.0, bottom), Point::new(0.0, bottom - r));
    path.line_to(Point::new(0.0, top + r));
    path.quad_to(Point::new(0.0, top), Point::new(r, top));
    path.close();
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::PathCommand;

    #[test]
    fn test_bubble_path() {
        let path = bubble_path(100.0, 100.0, 20.0);
        assert_eq!(
            path.to_svg(),
            "M 20 15 L 80 15 Q 100 15 100 35 L 100 65 Q 100 85 80 85 \
             L 45 85 L 15 100 L 25 85 L 20 85 Q 0 85 0 65 L 0 35 Q 0 15 20 15 Z"
        );
    }

    #[test]
    fn test_bubble_radius_clamped_to_body() {
        let path = bubble_path(100.0, 50.0, 40.0);
        // Body is 20 tall, so the radius drops to 10.
        assert_eq!(path.commands()[0], PathCommand::MoveTo(Point::new(10.0, 15.0)));
    }

    #[test]
    fn test_bubble_too_short() {
        assert!(bubble_path(100.0, 30.0, 20.0).is_empty());
        assert!(bubble_path(100.0, 10.0, 20.0).is_empty());
    }
}
