mod util;
use periodic_mesh::prelude::*;
use std::f64::consts::{FRAC_PI_2, PI, TAU};
use util::*;

#[test]
fn four_points_over_two_pi() {
    let m = PeriodicMesh::new(4);
    assert_eq!(m.len(), 4);
    assert_close(m.points()[0], 0.0);
    assert_close(m.points()[1], FRAC_PI_2);
    assert_close(m.points()[2], PI);
    assert_close(m.points()[3], 3.0 * FRAC_PI_2);
    assert_close(m.spacing(), FRAC_PI_2);
}

#[test]
fn find_scenario() {
    let m = PeriodicMesh::new(4);
    let loc = m.find(FRAC_PI_2);
    assert!(loc.found);
    assert_eq!(loc.index, 1);
    assert_eq!(loc.weight, 0.0);

    let loc = m.find(TAU - 0.01);
    assert!(loc.found);
    assert_eq!(loc.index, 0);
    assert!(loc.weight < 0.0);
    assert_close(loc.weight, -0.01 / TAU * 4.0);
}

#[test]
fn find_recovers_every_grid_point() {
    for n in [1, 2, 3, 7, 64, 1000] {
        let m = mesh(n, 3.7);
        for p in m.iter() {
            let loc = m.find(p.value);
            assert!(loc.found);
            assert_eq!(loc.index, p.index, "n={n}");
            assert_eq!(loc.weight, 0.0, "n={n} i={}", p.index);
        }
    }
}

#[test]
fn single_point_mesh_wraps_everything_to_zero() {
    let m = mesh(1, 1.0);
    assert_eq!(m.points(), &[0.0]);
    let loc = m.find(0.75);
    assert!(loc.found);
    assert_eq!(loc.index, 0);
    assert_close(loc.weight, -0.25);
}

#[test]
fn find_reports_soft_failure() {
    let m = mesh(5, 1.0);
    let low = m.find(-1e-9);
    assert!(!low.found);
    assert_eq!((low.index, low.weight), (0, 0.0));
    let high = m.find(1.0);
    assert!(!high.found);
    assert_eq!((high.index, high.weight), (5, 0.0));
}

#[test]
fn shift_examples() {
    let m = PeriodicMesh::new(4);
    assert_close(m.shift(PI, TAU), PI);
    assert_close(m.shift(PI, 0.0), PI);
    assert_close(m.shift(FRAC_PI_2, PI), 3.0 * FRAC_PI_2);
    assert_close(m.shift(FRAC_PI_2, -PI), 3.0 * FRAC_PI_2);
    assert_close(m.shift(0.0, -3.0 * TAU), 0.0);
}

#[test]
fn integrate_vector_valued() {
    let m = mesh(32, 2.0);
    let Pair(a, b) = m
        .integrate(|x| Pair(1.0, (PI * x).sin()))
        .expect("non-empty mesh");
    assert_close(a, 1.0);
    assert!(b.abs() < TOL);
}

#[test]
fn integrate_sine_converges() {
    let len = 5.0;
    let f = |x: f64| (TAU * x / len).sin() + 0.5 * (TAU * x / len).cos();
    for n in [3, 10, 100, 1000] {
        let v = mesh(n, len).integrate(f).unwrap();
        assert!(v.abs() < 1e-10, "n={n} mean={v}");
    }
}

#[test]
fn integrate_needs_points() {
    let m = PeriodicMesh::new(0);
    assert_eq!(m.integrate(|x| x), Err(MeshError::EmptyMesh));
}

#[test]
fn evaluate_at_uses_nearest_point() {
    let m = mesh(4, 4.0);
    let data = vec![1.0, 2.0, 3.0, 4.0];
    assert_eq!(*m.evaluate_at(&data, 1.4).unwrap(), 2.0);
    assert_eq!(*m.evaluate_at(&data, 3.9).unwrap(), 1.0);
    assert!(matches!(
        m.evaluate_at(&data[..2], 2.0),
        Err(MeshError::ContainerTooShort { index: 2, len: 2 })
    ));
}

#[test]
fn grid_evaluate_indexes_by_point() {
    let m = mesh(3, 3.0);
    let data = ['a', 'b', 'c'];
    let p = m.point(2).unwrap();
    assert_eq!(*m.evaluate(&data, p).unwrap(), 'c');
}

#[test]
fn invariants_hold_after_construction() {
    for n in [0, 1, 5, 99] {
        let m = mesh(n, 0.3);
        m.validate_invariants().unwrap();
        assert!(m.invariants_hold());
    }
}
