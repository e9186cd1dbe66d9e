//! Block arrows: a rectangular tail and a triangular head.

use super::PathData;
use kurbo::Point;

/// Head length as a fraction of the width.
const HEAD_LENGTH_RATIO: f64 = 0.4;
/// Tail thickness as a fraction of the height.
const TAIL_THICKNESS_RATIO: f64 = 0.5;
/// Head span as a fraction of the height.
const HEAD_SPAN_RATIO: f64 = 0.9;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArrowDirection {
    Left,
    Right,
}

/// Seven-point arrow outline with straight edges.
pub fn arrow_path(width: f64, height: f64, direction: ArrowDirection) -> PathData {
    let head_length = width * HEAD_LENGTH_RATIO;
    let tail_length = width - head_length;
    let cy = height / 2.0;
    let tail_top = cy - height * TAIL_THICKNESS_RATIO / 2.0;
    let tail_bottom = cy + height * TAIL_THICKNESS_RATIO / 2.0;
    let head_top = cy - height * HEAD_SPAN_RATIO / 2.0;
    let head_bottom = cy + height * HEAD_SPAN_RATIO / 2.0;

    let right = [
        (0.0, tail_top),
        (tail_length, tail_top),
        (tail_length, head_top),
        (width, cy),
        (tail_length, head_bottom),
        (tail_length, tail_bottom),
        (0.0, tail_bottom),
    ];

    let mut path = PathData::new();
    for (i, &(x, y)) in right.iter().enumerate() {
        let x = match direction {
            ArrowDirection::Right => x,
            ArrowDirection::Left => width - x,
        };
        if i == 0 {
            path.move_to(Point::new(x, y));
        } else {
            path.line_to(Point::new(x, y));
        }
    }
    path.close();
    path
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_right_arrow_path() {
        let path = arrow_path(100.0, 40.0, ArrowDirection::Right);
        assert_eq!(
            path.to_svg(),
            "M 0 10 L 60 10 L 60 2 L 100 20 L 60 38 L 60 30 L 0 30 Z"
        );
    }

    #[test]
    fn test_left_arrow_mirrors_right() {
        let path = arrow_path(100.0, 40.0, ArrowDirection::Left);
        assert_eq!(
            path.to_svg(),
            "M 100 10 L 40 10 L 40 2 L 0 20 L 40 38 L 40 30 L 100 30 Z"
        );
    }
}
