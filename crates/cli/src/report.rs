//! Run summary written by `estimate --out`, plus its provenance sidecar.
//!
//! The report lands at the requested path; `<stem>.provenance.json` next to it
//! records which build produced it and with which parameters.

use anyhow::{Context, Result};
use nalgebra::Point3;
use serde::Serialize;
use solid_angle::{Method, WindingSummary, FULL_SPHERE};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Serialize)]
pub struct EstimateRow {
    pub method: String,
    pub estimate: f64,
    pub exact: f64,
    pub abs_error: f64,
    pub rel_error: f64,
}

impl EstimateRow {
    pub fn new(method: Method, estimate: f64) -> Self {
        let abs_error = (estimate - FULL_SPHERE).abs();
        Self {
            method: method.name().to_string(),
            estimate,
            exact: FULL_SPHERE,
            abs_error,
            rel_error: abs_error / FULL_SPHERE,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct WindingCounts {
    pub outward: usize,
    pub inward: usize,
    pub edge_on: usize,
}

impl From<WindingSummary> for WindingCounts {
    fn from(w: WindingSummary) -> Self {
        Self {
            outward: w.outward,
            inward: w.inward,
            edge_on: w.edge_on,
        }
    }
}

/// Command-line parameters of an `estimate` run, using the flag spellings.
#[derive(Clone, Debug, Default, Serialize)]
pub struct RunParams {
    pub mesh: Option<String>,
    pub shape: String,
    pub level: u32,
    pub radius: f64,
    pub method: String,
}

#[derive(Debug, Serialize)]
pub struct Report {
    pub source: String,
    pub faces: usize,
    pub vertices: usize,
    pub observation_point: [f64; 3],
    pub winding: WindingCounts,
    pub estimates: Vec<EstimateRow>,
}

impl Report {
    pub fn new(
        source: String,
        faces: usize,
        vertices: usize,
        point: Point3<f64>,
        winding: WindingSummary,
    ) -> Self {
        Self {
            source,
            faces,
            vertices,
            observation_point: [point.x, point.y, point.z],
            winding: winding.into(),
            estimates: Vec::new(),
        }
    }

    /// Write the report to `out` and the sidecar next to it; returns the sidecar path.
    pub fn write(&self, out: &Path, params: &RunParams) -> Result<PathBuf> {
        if let Some(parent) = out.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
        fs::write(out, serde_json::to_vec_pretty(self)?)
            .with_context(|| format!("writing {}", out.display()))?;

        let sidecar = sidecar_path(out);
        let provenance = Provenance {
            code_rev: code_rev(),
            solid_angle_version: solid_angle::VERSION,
            report: out.display().to_string(),
            observation_point: self.observation_point,
            params,
        };
        fs::write(&sidecar, serde_json::to_vec_pretty(&provenance)?)
            .with_context(|| format!("writing {}", sidecar.display()))?;
        Ok(sidecar)
    }
}

#[derive(Serialize)]
struct Provenance<'a> {
    code_rev: String,
    solid_angle_version: &'static str,
    report: String,
    observation_point: [f64; 3],
    params: &'a RunParams,
}

/// `runs/octa.json` -> `runs/octa.provenance.json`.
fn sidecar_path(out: &Path) -> PathBuf {
    let stem = out
        .file_stem()
        .map_or_else(|| "report".into(), |s| s.to_string_lossy().into_owned());
    out.with_file_name(format!("{stem}.provenance.json"))
}

/// Commit baked in at build time, else taken from the environment.
fn code_rev() -> String {
    option_env!("GIT_COMMIT")
        .map(str::to_string)
        .or_else(|| std::env::var("GIT_COMMIT").ok())
        .filter(|rev| !rev.is_empty())
        .unwrap_or_else(|| "unknown".to_string())
}
