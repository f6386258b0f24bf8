use super::*;
use crate::mesh::{IndexedMesh, PatchRecord, Polygon};
use crate::shapes;
use crate::winding::check_winding;
use nalgebra::{point, vector, Point3};
use proptest::prelude::*;
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::f64::consts::FRAC_PI_2;

const TOL: f64 = 1e-9;

fn excess<S: Surface>(mesh: &S, p: Point3<f64>) -> f64 {
    Method::SphericalExcess.estimate(mesh, p).unwrap()
}

#[test]
fn empty_input_is_zero_for_both_methods() {
    let o = Point3::origin();
    assert_eq!(estimate_by_configuration_factor(Vec::<PatchRecord>::new(), o), 0.0);
    assert_eq!(estimate_by_spherical_excess(Vec::<Polygon>::new(), o), Ok(0.0));
    let empty = IndexedMesh::default();
    for m in Method::ALL {
        assert_eq!(m.estimate(&empty, o), Ok(0.0));
    }
}

#[test]
fn axis_triangle_is_octant() {
    let tri = [point![1.0, 0.0, 0.0], point![0.0, 1.0, 0.0], point![0.0, 0.0, 1.0]];
    let omega = estimate_by_spherical_excess([tri], Point3::origin()).unwrap();
    assert!((omega - FRAC_PI_2).abs() < 1e-12);
    // Same triangle seen from a shifted point, shifted along with it.
    let shift = vector![3.0, -2.0, 7.5];
    let moved = tri.map(|p| p + shift);
    let omega2 = estimate_by_spherical_excess([moved], Point3::from(shift)).unwrap();
    assert!((omega2 - FRAC_PI_2).abs() < 1e-12);
}

#[test]
fn far_and_near_vertices_are_not_degenerate() {
    for s in [1e200, 1e-200] {
        let tri = [point![s, 0.0, 0.0], point![0.0, 1.0, 0.0], point![0.0, 0.0, 1.0]];
        let omega = estimate_by_spherical_excess([tri], Point3::origin()).unwrap();
        assert!((omega - FRAC_PI_2).abs() < 1e-12, "scale {s}: {omega}");
    }
}

#[test]
fn closed_surfaces_subtend_full_sphere() {
    let o = Point3::origin();
    let meshes = [
        ("octahedron", shapes::octahedron(1.0)),
        ("cube", shapes::cube(0.5)),
        ("icosphere0", shapes::icosphere(0, 1.0)),
        ("icosphere3", shapes::icosphere(3, 4.0)),
        ("uv", shapes::uv_sphere(8, 12, 1.0)),
    ];
    for (name, mesh) in &meshes {
        let omega = excess(mesh, o);
        assert!((omega - FULL_SPHERE).abs() < TOL, "{name}: {omega}");
    }
}

#[test]
fn off_centre_interior_points_still_see_full_sphere() {
    let cube = shapes::cube(0.5);
    let ico = shapes::icosphere(2, 1.0);
    for p in [point![0.3, -0.2, 0.1], point![0.49, 0.49, -0.49], point![-0.1, 0.0, 0.45]] {
        assert!((excess(&cube, p) - FULL_SPHERE).abs() < TOL);
        assert!((excess(&ico, p) - FULL_SPHERE).abs() < TOL);
    }
}

#[test]
fn star_shaped_jittered_spheres_are_exact() {
    for seed in 0..5 {
        let mesh = shapes::jittered_icosphere(2, 1.0, 0.5, seed);
        assert!(check_winding(mesh.cells(), Point3::origin()).is_consistent());
        assert!((excess(&mesh, Point3::origin()) - FULL_SPHERE).abs() < TOL);
    }
}

#[test]
fn excess_ignores_winding_but_configuration_factor_does_not() {
    let mesh = shapes::icosphere(1, 1.0);
    let flipped = mesh.flipped();
    let o = Point3::origin();
    assert!((excess(&flipped, o) - excess(&mesh, o)).abs() < 1e-12);
    // Every flipped patch faces away from the centre.
    assert_eq!(Method::ConfigurationFactor.estimate(&flipped, o), Ok(0.0));
}

#[test]
fn outside_point_breaks_star_shaped_assumption() {
    let cube = shapes::cube(0.5);
    let p = point![2.0, 0.3, 0.1];
    let w = check_winding(cube.cells(), p);
    assert!(w.inward > 0 && w.outward > 0);
    // Unsigned excess counts front and back silhouettes alike.
    let omega = excess(&cube, p);
    assert!(omega > 0.0 && omega < FULL_SPHERE);
}

#[test]
fn configuration_factor_converges_from_above() {
    let o = Point3::origin();
    let mut prev_err = f64::INFINITY;
    for level in 0..=3 {
        let mesh = shapes::icosphere(level, 1.0);
        let est = Method::ConfigurationFactor.estimate(&mesh, o).unwrap();
        let err = est - FULL_SPHERE;
        // Flat inscribed patches sit closer than the sphere they approximate.
        assert!(err > 0.0, "level {level}: {est}");
        assert!(err < prev_err, "level {level}: {err} >= {prev_err}");
        prev_err = err;
    }
    assert!(prev_err / FULL_SPHERE < 5e-3);
}

#[test]
fn configuration_factor_is_radius_independent() {
    let o = Point3::origin();
    let small = Method::ConfigurationFactor
        .estimate(&shapes::icosphere(2, 0.1), o)
        .unwrap();
    let large = Method::ConfigurationFactor
        .estimate(&shapes::icosphere(2, 10.0), o)
        .unwrap();
    assert!((small - large).abs() < 1e-9);
}

#[test]
fn single_patch_contributions() {
    let o = Point3::origin();
    let facing = PatchRecord::new(point![0.0, 0.0, 2.0], vector![0.0, 0.0, 1.0], 0.5);
    assert!((configuration_factor(&facing, o) - 0.125).abs() < 1e-15);

    // 60° obliquity halves it.
    let tilted = PatchRecord::new(
        point![0.0, 0.0, 2.0],
        vector![0.0, 3f64.sqrt() / 2.0, 0.5],
        0.5,
    );
    assert!((configuration_factor(&tilted, o) - 0.0625).abs() < 1e-15);

    let back = PatchRecord::new(point![0.0, 0.0, 2.0], vector![0.0, 0.0, -1.0], 0.5);
    let edge_on = PatchRecord::new(point![0.0, 0.0, 2.0], vector![1.0, 0.0, 0.0], 0.5);
    let no_area = PatchRecord::new(point![0.0, 0.0, 2.0], vector![0.0, 0.0, 1.0], 0.0);
    let at_point = PatchRecord::new(o, vector![0.0, 0.0, 1.0], 0.5);
    for p in [back, edge_on, no_area, at_point] {
        assert_eq!(configuration_factor(&p, o), 0.0);
    }
    let total = estimate_by_configuration_factor([facing, back, no_area, at_point], o);
    assert!((total - 0.125).abs() < 1e-15);
}

#[test]
fn precomputed_patches_match_live_faces() {
    let mesh = shapes::uv_sphere(6, 9, 2.0);
    let o = point![0.1, 0.2, -0.3];
    let live = Method::ConfigurationFactor.estimate(&mesh, o).unwrap();
    let snap = estimate_by_configuration_factor(mesh.patches(), o);
    assert_eq!(live, snap);
    let polys = mesh.to_polygons();
    assert_eq!(
        Method::SphericalExcess.estimate(&polys, o),
        Method::SphericalExcess.estimate(&mesh, o)
    );
}

#[test]
fn vertex_on_observation_point_is_reported() {
    // Octahedron face 0 is [+x, +y, +z]; +z is its third vertex.
    let oct = shapes::octahedron(1.0);
    assert_eq!(
        estimate_by_spherical_excess(oct.cells(), point![0.0, 0.0, 1.0]),
        Err(SolidAngleError::DegenerateInput { cell: 0, vertex: 2 })
    );
    // Cube face 0 is the quad [0, 4, 6, 2]; mesh vertex 2 is its fourth corner,
    // reached through the second fan triangle.
    let cube = shapes::cube(0.5);
    let v2 = cube.positions()[2];
    assert_eq!(
        Method::SphericalExcess.estimate(&cube, v2),
        Err(SolidAngleError::DegenerateInput { cell: 0, vertex: 3 })
    );
    let msg = SolidAngleError::DegenerateInput { cell: 4, vertex: 1 }.to_string();
    assert!(msg.contains("vertex 1 of cell 4"));
}

#[test]
fn short_cells_contribute_nothing() {
    let cells = vec![
        vec![point![1.0, 0.0, 0.0]],
        vec![point![1.0, 0.0, 0.0], point![0.0, 1.0, 0.0]],
        vec![point![1.0, 0.0, 0.0], point![0.0, 1.0, 0.0], point![0.0, 0.0, 1.0]],
    ];
    let omega = estimate_by_spherical_excess(&cells, Point3::origin()).unwrap();
    assert!((omega - FRAC_PI_2).abs() < 1e-12);
}

#[test]
fn cyclic_rotation_keeps_cell_contribution_seeded() {
    let mut rng = StdRng::seed_from_u64(42);
    let cube = shapes::cube(0.5);
    for _ in 0..32 {
        let p = point![
            rng.gen_range(-0.45..0.45),
            rng.gen_range(-0.45..0.45),
            rng.gen_range(-0.45..0.45)
        ];
        for face in cube.to_polygons() {
            let k = rng.gen_range(1..face.vertices.len());
            let mut rotated = face.vertices.clone();
            rotated.rotate_left(k);
            let a = estimate_by_spherical_excess([&face], p).unwrap();
            let b = estimate_by_spherical_excess([rotated], p).unwrap();
            assert!((a - b).abs() < 1e-12, "{a} vs {b}");
        }
    }
}

#[test]
fn method_names_round_trip_through_display() {
    assert_eq!(Method::ConfigurationFactor.to_string(), "configuration-factor");
    assert_eq!(Method::SphericalExcess.to_string(), "spherical-excess");
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn interior_of_icosphere_sees_full_sphere(
        x in -0.5f64..0.5,
        y in -0.5f64..0.5,
        z in -0.5f64..0.5,
    ) {
        let mesh = shapes::icosphere(1, 1.0);
        let omega = excess(&mesh, point![x, y, z]);
        prop_assert!((omega - FULL_SPHERE).abs() < TOL, "omega = {}", omega);
    }

    #[test]
    fn triangle_rotation_is_exactly_symmetric(
        seed in any::<u64>(),
        k in 1usize..3,
    ) {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut tri: Vec<Point3<f64>> = (0..3)
            .map(|_| point![
                rng.gen_range(-1.0..1.0),
                rng.gen_range(-1.0..1.0),
                rng.gen_range(1.0..2.0)
            ])
            .collect();
        let a = estimate_by_spherical_excess([&tri], Point3::origin()).unwrap();
        tri.rotate_left(k);
        let b = estimate_by_spherical_excess([&tri], Point3::origin()).unwrap();
        prop_assert!((a - b).abs() < 1e-12);
    }
}
