//! Alignment snapping between element boxes.
//!
//! Each axis is resolved on its own: the candidate's three reference lines
//! (left/center/right, or top/middle/bottom) are compared against the same
//! three lines of every sibling, and the smallest misalignment within the
//! threshold becomes the shift. Guidelines are derived afterwards from the
//! shifted box and never influence the shift.

use crate::config::EngineConfig;
use crate::elements::{Element, ElementId};
use kurbo::{Point, Rect, Vec2};

/// A box other elements can align to.
#[derive(Debug, Clone, PartialEq)]
pub struct SnapTarget {
    pub id: ElementId,
    pub bounds: Rect,
}

impl SnapTarget {
    pub fn new(id: ElementId, bounds: Rect) -> Self {
        Self { id, bounds }
    }
}

/// Collect snap targets: visible, unlocked elements other than `exclude`.
pub fn snap_targets<'a>(
    elements: impl IntoIterator<Item = &'a Element>,
    exclude: Option<&ElementId>,
) -> Vec<SnapTarget> {
    elements
        .into_iter()
        .filter(|e| e.is_visible() && !e.is_locked() && Some(e.id()) != exclude)
        .map(|e| SnapTarget::new(e.id().clone(), e.bounds()))
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuidelineKind {
    /// A vertical line at a fixed x.
    Vertical,
    /// A horizontal line at a fixed y.
    Horizontal,
}

/// A visual alignment hint between the snapped box and one sibling.
#[derive(Debug, Clone, PartialEq)]
pub struct Guideline {
    pub kind: GuidelineKind,
    /// The aligned coordinate (x for vertical, y for horizontal).
    pub position: f64,
    pub start: Point,
    pub end: Point,
    pub target: ElementId,
}

/// Result of a snap operation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SnapResult {
    /// Correction to add to the candidate position.
    pub shift: Vec2,
    pub guidelines: Vec<Guideline>,
}

impl SnapResult {
    /// Check if any snapping occurred.
    pub fn is_snapped(&self) -> bool {
        self.shift != Vec2::ZERO
    }
}

fn x_lines(rect: Rect) -> [f64; 3] {
    [rect.x0, rect.center().x, rect.x1]
}

fn y_lines(rect: Rect) -> [f64; 3] {
    [rect.y0, rect.center().y, rect.y1]
}

/// Smallest shift aligning any candidate line to any target line.
///
/// Ties keep the first pair found.
fn axis_shift(
    candidate: [f64; 3],
    targets: impl Iterator<Item = [f64; 3]>,
    threshold: f64,
) -> f64 {
    let mut best: Option<(f64, f64)> = None;
    for lines in targets {
        for d in candidate {
            for t in lines {
                let diff = (d - t).abs();
                if diff <= threshold && best.is_none_or(|(min, _)| diff < min) {
                    best = Some((diff, t - d));
                }
            }
        }
    }
    best.map_or(0.0, |(_, shift)| shift)
}

/// Compute the correction for `candidate` against `targets`.
pub fn compute_snap(candidate: Rect, targets: &[SnapTarget], config: &EngineConfig) -> SnapResult {
    let threshold = config.snap_threshold;
    let shift = Vec2::new(
        axis_shift(
            x_lines(candidate),
            targets.iter().map(|t| x_lines(t.bounds)),
            threshold,
        ),
        axis_shift(
            y_lines(candidate),
            targets.iter().map(|t| y_lines(t.bounds)),
            threshold,
        ),
    );

    let snapped = candidate + shift;
    let margin = config.guideline_margin;
    let epsilon = config.guideline_epsilon;
    let mut guidelines = Vec::new();

    for target in targets {
        let other = target.bounds;
        for d in x_lines(snapped) {
            for t in x_lines(other) {
                if (d - t).abs() < epsilon {
                    guidelines.push(Guideline {
                        kind: GuidelineKind::Vertical,
                        position: t,
                        start: Point::new(t, snapped.y0.min(other.y0) - margin),
                        end: Point::new(t, snapped.y1.max(other.y1) + margin),
                        target: target.id.clone(),
                    });
                }
            }
        }
        for d in y_lines(snapped) {
            for t in y_lines(other) {
                if (d - t).abs() < epsilon {
                    guidelines.push(Guideline {
                        kind: GuidelineKind::Horizontal,
                        position: t,
                        start: Point::new(snapped.x0.min(other.x0) - margin, t),
                        end: Point::new(snapped.x1.max(other.x1) + margin, t),
                        target: target.id.clone(),
                    });
                }
            }
        }
    }

    if !guidelines.is_empty() {
        log::trace!(
            "Snap shift ({}, {}) with {} guidelines",
            shift.x,
            shift.y,
            guidelines.len()
        );
    }

    SnapResult { shift, guidelines }
}
