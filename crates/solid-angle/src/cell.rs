//! Capability interface between mesh providers and the estimators.
//!
//! - `Cell`: ordered vertex positions of a planar polygon (3+ for a useful cell).
//! - `Patch`: the flat-patch view of a cell: centroid, unit outward normal, area.
//! - `Surface`: anything that can hand out its cells in a fixed order.
//!
//! The estimators only see these traits; how positions are stored and how
//! normals or areas are derived stays with the provider.

use nalgebra::{Point3, Vector3};

/// Planar polygon given by its ordered vertices.
///
/// Winding convention: counter-clockwise when seen from outside the surface.
pub trait Cell {
    fn vertex_count(&self) -> usize;
    /// Position of vertex `i`. Callers only pass `i < vertex_count()`.
    fn vertex(&self, i: usize) -> Point3<f64>;

    #[inline]
    fn vertices(&self) -> impl Iterator<Item = Point3<f64>> + '_ {
        (0..self.vertex_count()).map(move |i| self.vertex(i))
    }
}

/// Flat-patch summary of a cell.
pub trait Patch {
    fn centroid(&self) -> Point3<f64>;
    /// Unit outward normal; the zero vector for a degenerate patch.
    fn normal(&self) -> Vector3<f64>;
    fn area(&self) -> f64;
}

/// A surface as a deterministic sequence of cells.
pub trait Surface {
    type Cell<'a>: Cell + Patch
    where
        Self: 'a;

    /// Cells in traversal order. Two calls yield the same sequence.
    fn cells(&self) -> impl Iterator<Item = Self::Cell<'_>>;
}

impl<T: Cell + ?Sized> Cell for &T {
    #[inline]
    fn vertex_count(&self) -> usize {
        (**self).vertex_count()
    }
    #[inline]
    fn vertex(&self, i: usize) -> Point3<f64> {
        (**self).vertex(i)
    }
}

impl<T: Patch + ?Sized> Patch for &T {
    #[inline]
    fn centroid(&self) -> Point3<f64> {
        (**self).centroid()
    }
    #[inline]
    fn normal(&self) -> Vector3<f64> {
        (**self).normal()
    }
    #[inline]
    fn area(&self) -> f64 {
        (**self).area()
    }
}

impl Cell for [Point3<f64>] {
    #[inline]
    fn vertex_count(&self) -> usize {
        self.len()
    }
    #[inline]
    fn vertex(&self, i: usize) -> Point3<f64> {
        self[i]
    }
}

impl<const N: usize> Cell for [Point3<f64>; N] {
    #[inline]
    fn vertex_count(&self) -> usize {
        N
    }
    #[inline]
    fn vertex(&self, i: usize) -> Point3<f64> {
        self[i]
    }
}

impl Cell for Vec<Point3<f64>> {
    #[inline]
    fn vertex_count(&self) -> usize {
        self.len()
    }
    #[inline]
    fn vertex(&self, i: usize) -> Point3<f64> {
        self[i]
    }
}
