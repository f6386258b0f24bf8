//! Closed fixture surfaces used in tests, benchmarks and the CLI.
//!
//! Purpose
//! - Provide small, deterministic, closed polyhedra centred at the origin with
//!   outward counter-clockwise winding, so both estimators can be checked
//!   against the exact 4π.
//! - Cover the cell shapes the estimators must handle: triangles only
//!   (octahedron, icosphere), quads only (cube), and mixed (UV sphere).
//!
//! Conventions
//! - All vertices of the sphere-like shapes lie on the sphere of the given
//!   radius (inscribed polyhedra), except `jittered_icosphere`, which moves
//!   vertices radially and stays star-shaped w.r.t. the origin.

use std::collections::HashMap;
use std::f64::consts::PI;

use nalgebra::{Point3, Vector3};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::mesh::IndexedMesh;

/// Regular octahedron with vertices `±r e_i`; one face per octant.
pub fn octahedron(r: f64) -> IndexedMesh {
    let positions = vec![
        Point3::new(r, 0.0, 0.0),
        Point3::new(-r, 0.0, 0.0),
        Point3::new(0.0, r, 0.0),
        Point3::new(0.0, -r, 0.0),
        Point3::new(0.0, 0.0, r),
        Point3::new(0.0, 0.0, -r),
    ];
    let mut faces = Vec::with_capacity(8);
    for (x, sx) in [(0usize, 1.0), (1, -1.0)] {
        for (y, sy) in [(2usize, 1.0), (3, -1.0)] {
            for (z, sz) in [(4usize, 1.0), (5, -1.0)] {
                // Octant orientation flips with each negative axis.
                if sx * sy * sz > 0.0 {
                    faces.push(vec![x, y, z]);
                } else {
                    faces.push(vec![x, z, y]);
                }
            }
        }
    }
    IndexedMesh::from_raw(positions, faces)
}

/// Axis-aligned cube `[-half, half]^3` with six quad cells.
pub fn cube(half: f64) -> IndexedMesh {
    // Vertex i has coordinates (bit0, bit1, bit2) mapped to ±half.
    let positions = (0..8)
        .map(|i| {
            let s = |bit: usize| if i >> bit & 1 == 1 { half } else { -half };
            Point3::new(s(0), s(1), s(2))
        })
        .collect();
    let faces = vec![
        vec![0, 4, 6, 2], // -x
        vec![1, 3, 7, 5], // +x
        vec![0, 1, 5, 4], // -y
        vec![2, 6, 7, 3], // +y
        vec![0, 2, 3, 1], // -z
        vec![4, 5, 7, 6], // +z
    ];
    IndexedMesh::from_raw(positions, faces)
}

const ICOSAHEDRON_FACES: [[usize; 3]; 20] = [
    [0, 11, 5],
    [0, 5, 1],
    [0, 1, 7],
    [0, 7, 10],
    [0, 10, 11],
    [1, 5, 9],
    [5, 11, 4],
    [11, 10, 2],
    [10, 7, 6],
    [7, 1, 8],
    [3, 9, 4],
    [3, 4, 2],
    [3, 2, 6],
    [3, 6, 8],
    [3, 8, 9],
    [4, 9, 5],
    [2, 4, 11],
    [6, 2, 10],
    [8, 6, 7],
    [9, 8, 1],
];

fn icosahedron_unit() -> Vec<Vector3<f64>> {
    let t = 0.5 * (1.0 + 5f64.sqrt());
    [
        (-1.0, t, 0.0),
        (1.0, t, 0.0),
        (-1.0, -t, 0.0),
        (1.0, -t, 0.0),
        (0.0, -1.0, t),
        (0.0, 1.0, t),
        (0.0, -1.0, -t),
        (0.0, 1.0, -t),
        (t, 0.0, -1.0),
        (t, 0.0, 1.0),
        (-t, 0.0, -1.0),
        (-t, 0.0, 1.0),
    ]
    .into_iter()
    .map(|(x, y, z)| Vector3::new(x, y, z).normalize())
    .collect()
}

/// Unit directions and triangles of an icosphere after `level` 4:1 splits.
fn icosphere_unit(level: u32) -> (Vec<Vector3<f64>>, Vec<[usize; 3]>) {
    let mut dirs = icosahedron_unit();
    let mut tris = ICOSAHEDRON_FACES.to_vec();
    for _ in 0..level {
        let mut midpoints: HashMap<(usize, usize), usize> = HashMap::new();
        let mut midpoint = |a: usize, b: usize, dirs: &mut Vec<Vector3<f64>>| {
            *midpoints.entry((a.min(b), a.max(b))).or_insert_with(|| {
                let mid = (dirs[a] + dirs[b]).normalize();
                dirs.push(mid);
                dirs.len() - 1
            })
        };
        let mut next = Vec::with_capacity(tris.len() * 4);
        for [a, b, c] in tris {
            let ab = midpoint(a, b, &mut dirs);
            let bc = midpoint(b, c, &mut dirs);
            let ca = midpoint(c, a, &mut dirs);
            next.push([a, ab, ca]);
            next.push([b, bc, ab]);
            next.push([c, ca, bc]);
            next.push([ab, bc, ca]);
        }
        tris = next;
    }
    (dirs, tris)
}

/// Geodesic sphere: icosahedron split `level` times, `20 * 4^level` triangles.
pub fn icosphere(level: u32, r: f64) -> IndexedMesh {
    let (dirs, tris) = icosphere_unit(level);
    let positions = dirs.into_iter().map(|d| Point3::from(d * r)).collect();
    IndexedMesh::from_raw(positions, tris.iter().map(|t| t.to_vec()).collect())
}

/// Icosphere whose vertex radii are `r * (1 + u)`, `u` uniform in `[-jitter, jitter]`.
///
/// Directions are untouched, so the surface stays star-shaped w.r.t. the
/// origin. `jitter` is clamped to `[0, 0.9]`; `seed` makes draws reproducible.
pub fn jittered_icosphere(level: u32, r: f64, jitter: f64, seed: u64) -> IndexedMesh {
    let jitter = jitter.clamp(0.0, 0.9);
    let mut rng = StdRng::seed_from_u64(seed);
    let (dirs, tris) = icosphere_unit(level);
    let positions = dirs
        .into_iter()
        .map(|d| {
            let u = if jitter > 0.0 {
                rng.gen_range(-jitter..=jitter)
            } else {
                0.0
            };
            Point3::from(d * (r * (1.0 + u)))
        })
        .collect();
    IndexedMesh::from_raw(positions, tris.iter().map(|t| t.to_vec()).collect())
}

/// Latitude/longitude sphere: triangle fans at the poles, planar quads elsewhere.
///
/// `stacks` is clamped to at least 2 and `slices` to at least 3.
pub fn uv_sphere(stacks: usize, slices: usize, r: f64) -> IndexedMesh {
    let stacks = stacks.max(2);
    let slices = slices.max(3);
    let mut positions = Vec::with_capacity(2 + (stacks - 1) * slices);
    positions.push(Point3::new(0.0, 0.0, r));
    for i in 1..stacks {
        let theta = PI * i as f64 / stacks as f64;
        for j in 0..slices {
            let phi = 2.0 * PI * j as f64 / slices as f64;
            positions.push(Point3::new(
                r * theta.sin() * phi.cos(),
                r * theta.sin() * phi.sin(),
                r * theta.cos(),
            ));
        }
    }
    positions.push(Point3::new(0.0, 0.0, -r));
    let south = positions.len() - 1;
    // Index of ring `i` (1-based), column `j` (wrapping).
    let ring = |i: usize, j: usize| 1 + (i - 1) * slices + j % slices;

    let mut faces = Vec::with_capacity(stacks * slices);
    for j in 0..slices {
        faces.push(vec![0, ring(1, j), ring(1, j + 1)]);
    }
    for i in 1..stacks - 1 {
        for j in 0..slices {
            faces.push(vec![ring(i, j), ring(i + 1, j), ring(i + 1, j + 1), ring(i, j + 1)]);
        }
    }
    for j in 0..slices {
        faces.push(vec![south, ring(stacks - 1, j + 1), ring(stacks - 1, j)]);
    }
    IndexedMesh::from_raw(positions, faces)
}
