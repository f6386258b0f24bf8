//! Winding validation for the spherical-excess method.
//!
//! The excess of a fan triangle is a magnitude, so a cell wound the wrong way
//! still adds a positive amount. Callers that cannot vouch for their mesh use
//! `check_winding` to confirm every fan triangle faces away from the
//! observation point before trusting a spherical-excess total.

use nalgebra::Point3;

use crate::cell::Cell;
use crate::cfg::EDGE_ON_EPS;

/// Fan-triangle counts by orientation relative to an observation point.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WindingSummary {
    /// Counter-clockwise when seen from the point's far side (triple product > 0).
    pub outward: usize,
    /// Wound toward the observation point (triple product < 0).
    pub inward: usize,
    /// Plane passes through the observation point, or the triangle is degenerate.
    pub edge_on: usize,
}

impl WindingSummary {
    #[inline]
    pub fn total(&self) -> usize {
        self.outward + self.inward + self.edge_on
    }

    /// No fan triangle faces the observation point.
    #[inline]
    pub fn is_consistent(&self) -> bool {
        self.inward == 0
    }
}

/// Classify every fan triangle `(0, j, j+1)` of every cell by the sign of
/// `(v1 - p) · ((v2 - p) × (v3 - p))`.
pub fn check_winding<I>(cells: I, observation_point: Point3<f64>) -> WindingSummary
where
    I: IntoIterator,
    I::Item: Cell,
{
    let mut summary = WindingSummary::default();
    for cell in cells {
        let n = cell.vertex_count();
        if n < 3 {
            continue;
        }
        let v0 = cell.vertex(0) - observation_point;
        let mut prev = cell.vertex(1) - observation_point;
        for j in 2..n {
            let next = cell.vertex(j) - observation_point;
            let det = v0.dot(&prev.cross(&next));
            let scale = v0.norm() * prev.norm() * next.norm();
            if det.abs() <= EDGE_ON_EPS * scale {
                summary.edge_on += 1;
            } else if det > 0.0 {
                summary.outward += 1;
            } else {
                summary.inward += 1;
            }
            prev = next;
        }
    }
    summary
}
