//! In-crate mesh provider.
//!
//! `IndexedMesh` keeps one shared vertex buffer plus a per-face index list and
//! hands out borrowed `FaceRef` cells. `Polygon` owns its vertices, and
//! `PatchRecord` carries precomputed {centroid, normal, area} for callers that
//! got those from elsewhere.
//!
//! Derived quantities follow the usual mesh-filter conventions: centroid is the
//! vertex mean, normal and area come from the Newell vector (sum of fan cross
//! products), which is exact for planar polygons and points outward for
//! counter-clockwise-from-outside winding.

use nalgebra::{Point3, Unit, Vector3};
use thiserror::Error;

use crate::cell::{Cell, Patch, Surface};
use crate::sphere::normalize;

/// Errors raised while assembling an `IndexedMesh`.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum MeshError {
    #[error("face {face} references vertex {index}, but the mesh has {len} vertices")]
    IndexOutOfRange { face: usize, index: usize, len: usize },
    #[error("face {face} has {count} vertices (needs at least 3)")]
    TooFewVertices { face: usize, count: usize },
}

/// Twice the area times the unit normal of a planar cell.
pub(crate) fn newell_vector<C: Cell + ?Sized>(cell: &C) -> Vector3<f64> {
    let n = cell.vertex_count();
    if n < 3 {
        return Vector3::zeros();
    }
    let p0 = cell.vertex(0);
    let mut acc = Vector3::zeros();
    let mut prev = cell.vertex(1) - p0;
    for j in 2..n {
        let next = cell.vertex(j) - p0;
        acc += prev.cross(&next);
        prev = next;
    }
    acc
}

pub(crate) fn vertex_mean<C: Cell + ?Sized>(cell: &C) -> Point3<f64> {
    let n = cell.vertex_count();
    if n == 0 {
        return Point3::origin();
    }
    let sum = cell
        .vertices()
        .fold(Vector3::zeros(), |acc, p| acc + p.coords);
    Point3::from(sum / n as f64)
}

fn unit_or_zero(v: Vector3<f64>) -> Vector3<f64> {
    normalize(v).map_or_else(Vector3::zeros, Unit::into_inner)
}

/// Precomputed flat-patch data.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PatchRecord {
    pub centroid: Point3<f64>,
    /// Expected to be unit length (or zero for a degenerate patch).
    pub normal: Vector3<f64>,
    pub area: f64,
}

impl PatchRecord {
    #[inline]
    pub fn new(centroid: Point3<f64>, normal: Vector3<f64>, area: f64) -> Self {
        Self {
            centroid,
            normal,
            area,
        }
    }

    /// Snapshot the derived patch of any cell.
    pub fn from_cell<C: Cell + ?Sized>(cell: &C) -> Self {
        let nv = newell_vector(cell);
        Self {
            centroid: vertex_mean(cell),
            normal: unit_or_zero(nv),
            area: 0.5 * nv.norm(),
        }
    }
}

impl Patch for PatchRecord {
    #[inline]
    fn centroid(&self) -> Point3<f64> {
        self.centroid
    }
    #[inline]
    fn normal(&self) -> Vector3<f64> {
        self.normal
    }
    #[inline]
    fn area(&self) -> f64 {
        self.area
    }
}

/// Polygon owning its vertices.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Polygon {
    pub vertices: Vec<Point3<f64>>,
}

impl Polygon {
    #[inline]
    pub fn new(vertices: Vec<Point3<f64>>) -> Self {
        Self { vertices }
    }

    /// Same vertices, opposite winding (first vertex kept).
    pub fn reversed(&self) -> Self {
        let mut vertices = self.vertices.clone();
        if vertices.len() > 1 {
            vertices[1..].reverse();
        }
        Self { vertices }
    }
}

impl Cell for Polygon {
    #[inline]
    fn vertex_count(&self) -> usize {
        self.vertices.len()
    }
    #[inline]
    fn vertex(&self, i: usize) -> Point3<f64> {
        self.vertices[i]
    }
}

impl Patch for Polygon {
    fn centroid(&self) -> Point3<f64> {
        vertex_mean(self)
    }
    fn normal(&self) -> Vector3<f64> {
        unit_or_zero(newell_vector(self))
    }
    fn area(&self) -> f64 {
        0.5 * newell_vector(self).norm()
    }
}

/// Shared-vertex polygon mesh.
///
/// Invariants (checked by `new`):
/// - every face has at least 3 indices;
/// - every index is `< positions.len()`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct IndexedMesh {
    positions: Vec<Point3<f64>>,
    faces: Vec<Vec<usize>>,
}

impl IndexedMesh {
    pub fn new(positions: Vec<Point3<f64>>, faces: Vec<Vec<usize>>) -> Result<Self, MeshError> {
        for (face, indices) in faces.iter().enumerate() {
            if indices.len() < 3 {
                return Err(MeshError::TooFewVertices {
                    face,
                    count: indices.len(),
                });
            }
            if let Some(&index) = indices.iter().find(|&&i| i >= positions.len()) {
                return Err(MeshError::IndexOutOfRange {
                    face,
                    index,
                    len: positions.len(),
                });
            }
        }
        Ok(Self { positions, faces })
    }

    /// Skip validation; for generators whose faces are valid by construction.
    pub(crate) fn from_raw(positions: Vec<Point3<f64>>, faces: Vec<Vec<usize>>) -> Self {
        debug_assert!(Self::new(positions.clone(), faces.clone()).is_ok());
        Self { positions, faces }
    }

    pub fn from_triangles(
        positions: Vec<Point3<f64>>,
        triangles: &[[usize; 3]],
    ) -> Result<Self, MeshError> {
        Self::new(positions, triangles.iter().map(|t| t.to_vec()).collect())
    }

    #[inline]
    pub fn positions(&self) -> &[Point3<f64>] {
        &self.positions
    }
    #[inline]
    pub fn faces(&self) -> &[Vec<usize>] {
        &self.faces
    }
    #[inline]
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    #[inline]
    pub fn face(&self, i: usize) -> Option<FaceRef<'_>> {
        self.faces.get(i).map(|indices| FaceRef {
            positions: &self.positions,
            indices,
        })
    }

    /// Mean of all vertex positions; `None` for a mesh without vertices.
    pub fn vertex_mean(&self) -> Option<Point3<f64>> {
        if self.positions.is_empty() {
            return None;
        }
        let sum = self
            .positions
            .iter()
            .fold(Vector3::zeros(), |acc, p| acc + p.coords);
        Some(Point3::from(sum / self.positions.len() as f64))
    }

    pub fn total_area(&self) -> f64 {
        self.cells().map(|f| f.area()).sum()
    }

    /// Every face with reversed winding (normals flipped).
    pub fn flipped(&self) -> Self {
        let faces = self
            .faces
            .iter()
            .map(|f| {
                let mut g = f.clone();
                g[1..].reverse();
                g
            })
            .collect();
        Self {
            positions: self.positions.clone(),
            faces,
        }
    }

    pub fn translated(&self, offset: Vector3<f64>) -> Self {
        Self {
            positions: self.positions.iter().map(|p| *p + offset).collect(),
            faces: self.faces.clone(),
        }
    }

    /// Precompute one `PatchRecord` per face, in face order.
    pub fn patches(&self) -> Vec<PatchRecord> {
        self.cells().map(|f| PatchRecord::from_cell(&f)).collect()
    }

    pub fn to_polygons(&self) -> Vec<Polygon> {
        self.cells()
            .map(|f| Polygon::new(f.vertices().collect()))
            .collect()
    }
}

/// Borrowed face of an `IndexedMesh`.
#[derive(Clone, Copy, Debug)]
pub struct FaceRef<'a> {
    positions: &'a [Point3<f64>],
    indices: &'a [usize],
}

impl Cell for FaceRef<'_> {
    #[inline]
    fn vertex_count(&self) -> usize {
        self.indices.len()
    }
    #[inline]
    fn vertex(&self, i: usize) -> Point3<f64> {
        self.positions[self.indices[i]]
    }
}

impl Patch for FaceRef<'_> {
    fn centroid(&self) -> Point3<f64> {
        vertex_mean(self)
    }
    fn normal(&self) -> Vector3<f64> {
        unit_or_zero(newell_vector(self))
    }
    fn area(&self) -> f64 {
        0.5 * newell_vector(self).norm()
    }
}

impl Surface for IndexedMesh {
    type Cell<'a> = FaceRef<'a>;

    fn cells(&self) -> impl Iterator<Item = Self::Cell<'_>> {
        self.faces.iter().map(|indices| FaceRef {
            positions: &self.positions,
            indices,
        })
    }
}

impl Surface for Vec<Polygon> {
    type Cell<'a> = &'a Polygon;

    fn cells(&self) -> impl Iterator<Item = Self::Cell<'_>> {
        self.iter()
    }
}
