use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use nalgebra::Point3;
use solid_angle::{check_winding, shapes, IndexedMesh, Method, Surface, FULL_SPHERE};
use std::io::Write;
use std::path::PathBuf;
use tracing_subscriber::fmt::SubscriberBuilder;

mod mesh_io;
mod report;

use report::{EstimateRow, Report, RunParams};

#[derive(Parser)]
#[command(name = "cli")]
#[command(about = "Solid angle of a tessellated surface, compared with the exact 4π")]
struct Cmd {
    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Estimate the solid angle of one mesh from an observation point
    Estimate(EstimateArgs),
    /// Configuration-factor error against icosphere refinement
    Convergence {
        #[arg(long, default_value_t = 5)]
        max_level: u32,
        #[arg(long, default_value_t = 1.0)]
        radius: f64,
    },
}

#[derive(Args)]
struct EstimateArgs {
    /// JSON mesh file; overrides --shape
    #[arg(long)]
    mesh: Option<PathBuf>,
    /// Built-in closed surface used when no --mesh is given
    #[arg(long, value_enum, default_value_t = ShapeKind::Icosphere)]
    shape: ShapeKind,
    /// Refinement: icosphere splits, or (level + 1) * 4 UV stacks
    #[arg(long, default_value_t = 3)]
    level: u32,
    #[arg(long, default_value_t = 1.0)]
    radius: f64,
    /// Observation point `x,y,z`; defaults to the mesh vertex mean
    #[arg(long, value_parser = parse_point, allow_hyphen_values = true)]
    point: Option<Point3<f64>>,
    #[arg(long, value_enum, default_value_t = MethodArg::Both)]
    method: MethodArg,
    /// Write a JSON report here, plus a provenance sidecar next to it
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ShapeKind {
    Icosphere,
    UvSphere,
    Octahedron,
    Cube,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum MethodArg {
    ConfigurationFactor,
    SphericalExcess,
    Both,
}

/// The spelling clap accepts for `v`, e.g. `uv-sphere`.
fn value_name<T: ValueEnum>(v: &T) -> String {
    v.to_possible_value()
        .map(|p| p.get_name().to_string())
        .unwrap_or_default()
}

impl EstimateArgs {
    fn run_params(&self) -> RunParams {
        RunParams {
            mesh: self.mesh.as_ref().map(|p| p.display().to_string()),
            shape: value_name(&self.shape),
            level: self.level,
            radius: self.radius,
            method: value_name(&self.method),
        }
    }
}

impl MethodArg {
    fn methods(self) -> Vec<Method> {
        match self {
            MethodArg::ConfigurationFactor => vec![Method::ConfigurationFactor],
            MethodArg::SphericalExcess => vec![Method::SphericalExcess],
            MethodArg::Both => Method::ALL.to_vec(),
        }
    }
}

fn parse_point(s: &str) -> Result<Point3<f64>, String> {
    let coords = s
        .split(',')
        .map(|c| c.trim().parse::<f64>().map_err(|e| format!("bad coordinate {c:?}: {e}")))
        .collect::<Result<Vec<_>, _>>()?;
    match coords.as_slice() {
        &[x, y, z] => Ok(Point3::new(x, y, z)),
        _ => Err(format!("expected x,y,z, got {} values", coords.len())),
    }
}

fn main() -> Result<()> {
    SubscriberBuilder::default()
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
    let cmd = Cmd::parse();
    match cmd.action {
        Action::Estimate(args) => estimate(&args),
        Action::Convergence { max_level, radius } => {
            convergence(&mut std::io::stdout().lock(), max_level, radius)
        }
    }
}

fn build_shape(kind: ShapeKind, level: u32, radius: f64) -> IndexedMesh {
    match kind {
        ShapeKind::Icosphere => shapes::icosphere(level, radius),
        ShapeKind::UvSphere => {
            let stacks = (level as usize + 1) * 4;
            shapes::uv_sphere(stacks, 2 * stacks, radius)
        }
        ShapeKind::Octahedron => shapes::octahedron(radius),
        ShapeKind::Cube => shapes::cube(radius),
    }
}

fn estimate(args: &EstimateArgs) -> Result<()> {
    let (mesh, source) = match &args.mesh {
        Some(path) => (mesh_io::load_mesh(path)?, path.display().to_string()),
        None => (
            build_shape(args.shape, args.level, args.radius),
            format!(
                "{}(level={}, radius={})",
                value_name(&args.shape),
                args.level,
                args.radius
            ),
        ),
    };
    let point = args
        .point
        .or_else(|| mesh.vertex_mean())
        .unwrap_or_else(Point3::origin);
    tracing::info!(
        source,
        faces = mesh.face_count(),
        vertices = mesh.positions().len(),
        point = ?point,
        "mesh ready"
    );

    let report = run_estimates(&mesh, point, args.method.methods(), source)?;
    for row in &report.estimates {
        println!("{} solid angle: {}", row.method, row.estimate);
        println!("exact solid angle: {}", row.exact);
    }
    if let Some(out) = &args.out {
        let sidecar = report.write(out, &args.run_params())?;
        tracing::info!(report = %out.display(), sidecar = %sidecar.display(), "report written");
    }
    Ok(())
}

fn run_estimates(
    mesh: &IndexedMesh,
    point: Point3<f64>,
    methods: Vec<Method>,
    source: String,
) -> Result<Report> {
    let winding = check_winding(mesh.cells(), point);
    if !winding.is_consistent() {
        tracing::warn!(
            outward = winding.outward,
            inward = winding.inward,
            edge_on = winding.edge_on,
            "fan triangles face the observation point; spherical excess assumes outward winding"
        );
    } else if winding.edge_on > 0 {
        tracing::warn!(
            edge_on = winding.edge_on,
            "fan triangles are edge-on to the observation point"
        );
    }

    let mut report = Report::new(
        source,
        mesh.face_count(),
        mesh.positions().len(),
        point,
        winding,
    );
    for method in methods {
        let omega = method
            .estimate(mesh, point)
            .with_context(|| format!("{method} estimate"))?;
        let row = EstimateRow::new(method, omega);
        tracing::info!(
            method = %method,
            estimate = omega,
            rel_error = row.rel_error,
            "estimate"
        );
        report.estimates.push(row);
    }
    Ok(report)
}

fn convergence(out: &mut impl Write, max_level: u32, radius: f64) -> Result<()> {
    tracing::info!(max_level, radius, "convergence");
    writeln!(
        out,
        "{:>5} {:>8} {:>20} {:>12} {:>12}",
        "level", "faces", "estimate", "abs_error", "rel_error"
    )?;
    for level in 0..=max_level {
        let mesh = shapes::icosphere(level, radius);
        let omega = Method::ConfigurationFactor.estimate(&mesh, Point3::origin())?;
        let row = EstimateRow::new(Method::ConfigurationFactor, omega);
        writeln!(
            out,
            "{:>5} {:>8} {:>20.12} {:>12.3e} {:>12.3e}",
            level,
            mesh.face_count(),
            row.estimate,
            row.abs_error,
            row.rel_error
        )?;
    }
    writeln!(out, "exact solid angle: {FULL_SPHERE}")?;
    Ok(())
}
