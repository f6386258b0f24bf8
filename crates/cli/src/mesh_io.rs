//! JSON mesh input: `{"vertices": [[x, y, z], ...], "faces": [[i, j, k, ...], ...]}`.
//!
//! Faces index into `vertices`, are wound counter-clockwise seen from outside,
//! and may have any vertex count >= 3.

use anyhow::{Context, Result};
use nalgebra::Point3;
use serde::Deserialize;
use solid_angle::IndexedMesh;
use std::fs;
use std::path::Path;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct MeshFile {
    vertices: Vec<[f64; 3]>,
    faces: Vec<Vec<usize>>,
}

pub fn parse_mesh(bytes: &[u8]) -> Result<IndexedMesh> {
    let file: MeshFile = serde_json::from_slice(bytes)?;
    let positions = file
        .vertices
        .into_iter()
        .map(|[x, y, z]| Point3::new(x, y, z))
        .collect();
    Ok(IndexedMesh::new(positions, file.faces)?)
}

pub fn load_mesh(path: &Path) -> Result<IndexedMesh> {
    let bytes = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    parse_mesh(&bytes).with_context(|| format!("parsing mesh {}", path.display()))
}
