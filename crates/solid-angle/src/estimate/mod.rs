//! Solid-angle estimators.
//!
//! Purpose
//! - Sum per-cell solid angles of a polygonal surface as seen from one
//!   observation point, with two interchangeable strategies:
//!   - configuration factor: `max(cos θ, 0) · A / r²` per flat patch
//!     (first order, error shrinks with patch size);
//!   - spherical excess: exact solid angle of each fan triangle via
//!     L'Huilier's formula.
//!
//! Conventions
//! - Cells are traversed once, in the order the caller yields them; the sum is
//!   a plain sequential `f64` accumulation, so results are reproducible.
//! - Spherical excess is unsigned. It equals the true solid angle when the
//!   cells are consistently wound and each ray from the observation point
//!   crosses the surface once; see `winding::check_winding`.
//! - Cells with fewer than 3 vertices contribute nothing.

use std::fmt;

use nalgebra::Point3;
use thiserror::Error;

use crate::cell::{Cell, Patch, Surface};
use crate::sphere::spherical_triangle_solid_angle;

/// Solid angle of the full sphere of directions, 4π sr.
pub const FULL_SPHERE: f64 = 4.0 * std::f64::consts::PI;

/// Errors surfaced by the estimators.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum SolidAngleError {
    /// A vertex coincides with the observation point, so its direction is undefined.
    #[error("vertex {vertex} of cell {cell} coincides with the observation point")]
    DegenerateInput { cell: usize, vertex: usize },
}

/// Flat-patch contribution of a single patch.
///
/// Zero when the centroid coincides with the observation point or when the
/// patch is back-facing or edge-on.
pub fn configuration_factor<P: Patch + ?Sized>(patch: &P, observation_point: Point3<f64>) -> f64 {
    let d = patch.centroid() - observation_point;
    let r = d.norm();
    if r == 0.0 {
        return 0.0;
    }
    let cos_theta = patch.normal().dot(&d) / r;
    cos_theta.max(0.0) * patch.area() / (r * r)
}

/// First-order estimate: sum of `configuration_factor` over all patches.
pub fn estimate_by_configuration_factor<I>(patches: I, observation_point: Point3<f64>) -> f64
where
    I: IntoIterator,
    I::Item: Patch,
{
    let mut total = 0.0;
    for patch in patches {
        total += configuration_factor(&patch, observation_point);
    }
    total
}

/// Exact solid angle of one cell's triangle fan.
///
/// On failure returns the index (within the cell) of the vertex that sits on
/// the observation point.
fn fan_solid_angle<C: Cell + ?Sized>(
    cell: &C,
    observation_point: Point3<f64>,
) -> Result<f64, usize> {
    let n = cell.vertex_count();
    if n < 3 {
        return Ok(0.0);
    }
    let v0 = cell.vertex(0) - observation_point;
    let mut prev = cell.vertex(1) - observation_point;
    let mut omega = 0.0;
    for j in 1..n - 1 {
        let next = cell.vertex(j + 1) - observation_point;
        omega += spherical_triangle_solid_angle(v0, prev, next)
            .map_err(|e| [0, j, j + 1][e.corner])?;
        prev = next;
    }
    Ok(omega)
}

/// Exact estimate: sum of spherical-triangle solid angles over every fan
/// triangle `(0, j, j+1)` of every cell.
///
/// Fails with `DegenerateInput` as soon as a fan triangle has a vertex on the
/// observation point; nothing is silently absorbed.
pub fn estimate_by_spherical_excess<I>(
    cells: I,
    observation_point: Point3<f64>,
) -> Result<f64, SolidAngleError>
where
    I: IntoIterator,
    I::Item: Cell,
{
    let mut total = 0.0;
    for (index, cell) in cells.into_iter().enumerate() {
        total += fan_solid_angle(&cell, observation_point).map_err(|vertex| {
            SolidAngleError::DegenerateInput {
                cell: index,
                vertex,
            }
        })?;
    }
    Ok(total)
}

/// Estimation strategy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Method {
    ConfigurationFactor,
    SphericalExcess,
}

impl Method {
    pub const ALL: [Method; 2] = [Method::ConfigurationFactor, Method::SphericalExcess];

    /// Kebab-case name, stable for CLI flags and reports.
    pub fn name(self) -> &'static str {
        match self {
            Method::ConfigurationFactor => "configuration-factor",
            Method::SphericalExcess => "spherical-excess",
        }
    }

    pub fn estimate<S: Surface>(
        self,
        surface: &S,
        observation_point: Point3<f64>,
    ) -> Result<f64, SolidAngleError> {
        match self {
            Method::ConfigurationFactor => Ok(estimate_by_configuration_factor(
                surface.cells(),
                observation_point,
            )),
            Method::SphericalExcess => {
                estimate_by_spherical_excess(surface.cells(), observation_point)
            }
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests;
