//! Solid angle of a polygonal surface seen from a point.
//!
//! Two interchangeable estimators share one capability interface:
//! - `estimate_by_configuration_factor`: flat-patch first-order sum over
//!   {centroid, normal, area} patches.
//! - `estimate_by_spherical_excess`: exact sum of spherical-triangle solid
//!   angles over a triangle fan of every cell (L'Huilier's formula).
//!
//! Cells are supplied through the `Cell`/`Patch`/`Surface` traits so the core
//! does not depend on any particular mesh container. `IndexedMesh` is the
//! in-crate provider; `shapes` builds the closed fixtures used by tests,
//! benches and the CLI.

mod cfg;
pub mod cell;
pub mod estimate;
pub mod mesh;
pub mod shapes;
pub mod sphere;
pub mod winding;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use cell::{Cell, Patch, Surface};
pub use estimate::{
    estimate_by_configuration_factor, estimate_by_spherical_excess, Method, SolidAngleError,
    FULL_SPHERE,
};
pub use mesh::{IndexedMesh, MeshError, PatchRecord, Polygon};
pub use winding::{check_winding, WindingSummary};
