//! Integration tests: fields of a single RWG pair against radiation physics.
//!
//! A PEC RWG pair carrying a uniform amplitude radiates like a small
//! electric dipole along the axis joining its hub vertices. Far from the
//! pair the fields must form an outgoing plane wave with |E|/|H| equal to
//! the impedance of free space, and a periodic array of pairs must equal the
//! explicit sum over Bloch-phased copies.

use std::sync::Arc;

use approx::assert_relative_eq;
use num_complex::Complex64;
use tessera::geometry::{EdgeSpec, Geometry, Lattice, SurfaceSpec};
use tessera::materials::{MaterialModel, Pec};
use tessera::{
    CoefficientVector, EngineConfig, FieldEngine, FieldQuery, FreeSpaceKernel, LatticeSumKernel,
    PeriodicKernel, ZVAC,
};

const PAIR: [[f64; 3]; 4] = [
    [0.0, -0.5, 0.0],
    [0.0, 0.5, 0.0],
    [1.0, 0.0, 0.0],
    [-1.0, 0.0, 0.0],
];

fn pec_pair(index: usize) -> SurfaceSpec {
    let base = 4 * index;
    let pec: Arc<dyn MaterialModel> = Arc::new(Pec);
    SurfaceSpec {
        label: format!("pair{index}"),
        material: pec,
        containing: None,
        panels: vec![[base + 2, base, base + 1], [base, base + 1, base + 3]],
        edges: vec![EdgeSpec {
            v1: base,
            v2: base + 1,
            qp: base + 2,
            qm: base + 3,
            p_panel: 0,
            m_panel: 1,
        }],
    }
}

/// Copies of the pair translated by each of `shifts`.
fn pair_array(shifts: &[[f64; 3]], lattice: Lattice) -> Geometry {
    let vertices = shifts
        .iter()
        .flat_map(|s| PAIR.iter().map(move |v| [v[0] + s[0], v[1] + s[1], v[2] + s[2]]))
        .collect();
    let surfaces = (0..shifts.len()).map(pec_pair).collect();
    Geometry::new(vertices, surfaces, lattice).unwrap()
}

fn engine(geometry: Geometry, kernel: Arc<dyn PeriodicKernel>) -> FieldEngine {
    FieldEngine::new(Arc::new(geometry), kernel)
        .unwrap()
        .with_config(EngineConfig {
            workers: 1,
            exclude_inner_cells: false,
        })
        .unwrap()
}

#[test]
fn test_far_field_is_an_outgoing_plane_wave() {
    let engine = engine(pair_array(&[[0.0; 3]], Lattice::none()), Arc::new(FreeSpaceKernel));
    let kn = CoefficientVector::new(vec![Complex64::new(1.0, 0.0)]);
    let query = FieldQuery::new(Complex64::new(1.0, 0.0), [0.0; 3]).with_coefficients(&kn);

    for z in [200.0, -200.0] {
        let eh = engine.get_fields_at_point(&query, &mut [], [0.0, 0.0, z]).unwrap();
        let (ex, ey, ez, hy) = (eh[0], eh[1], eh[2], eh[4]);

        // E is polarised along the dipole and transverse to the ray.
        assert!(ex.norm() > 0.0);
        assert!(ey.norm() < 1e-6 * ex.norm());
        assert!(ez.norm() < 1e-6 * ex.norm());

        // E_x = ±Z0 H_y for a wave travelling along ±z.
        let ratio = ex / (ZVAC * hy) * z.signum();
        assert_relative_eq!(ratio.re, 1.0, epsilon = 1e-2);
        assert_relative_eq!(ratio.im, 0.0, epsilon = 1e-2);

        // Power flows away from the source.
        let sz = 0.5 * (ex * hy.conj()).re;
        assert_eq!(sz.signum(), z.signum());
    }
}

#[test]
fn test_far_field_decays_inversely_with_distance() {
    let engine = engine(pair_array(&[[0.0; 3]], Lattice::none()), Arc::new(FreeSpaceKernel));
    let kn = CoefficientVector::new(vec![Complex64::new(0.0, 2.0)]);
    let query = FieldQuery::new(Complex64::new(1.0, 0.0), [0.0; 3]).with_coefficients(&kn);

    let near = engine.get_fields_at_point(&query, &mut [], [0.0, 0.0, 400.0]).unwrap();
    let far = engine.get_fields_at_point(&query, &mut [], [0.0, 0.0, 800.0]).unwrap();
    assert_relative_eq!(far[0].norm() / near[0].norm(), 0.5, max_relative = 1e-3);
}

#[test]
fn test_lattice_sum_equals_explicit_bloch_copies() {
    let a = 3.0;
    let n_images = 3;
    let bloch = [0.3, 0.0, 0.0];
    let omega = Complex64::new(0.7, 0.2);
    let amplitude = Complex64::new(0.4, -1.2);
    let x = [0.5, 0.4, 1.5];

    let periodic = engine(
        pair_array(&[[0.0; 3]], Lattice::one_d([a, 0.0, 0.0]).unwrap()),
        Arc::new(LatticeSumKernel::new(n_images)),
    );
    let kn = CoefficientVector::new(vec![amplitude]);
    let query = FieldQuery::new(omega, bloch).with_coefficients(&kn);
    let eh_periodic = periodic.get_fields_at_point(&query, &mut [], x).unwrap();

    let cells: Vec<i32> = (-n_images..=n_images).collect();
    let shifts: Vec<[f64; 3]> = cells.iter().map(|&n| [a * n as f64, 0.0, 0.0]).collect();
    let copies = engine(pair_array(&shifts, Lattice::none()), Arc::new(FreeSpaceKernel));
    let phased = CoefficientVector::new(
        cells
            .iter()
            .map(|&n| amplitude * Complex64::new(0.0, bloch[0] * a * n as f64).exp())
            .collect(),
    );
    let query = FieldQuery::new(omega, bloch).with_coefficients(&phased);
    let eh_copies = copies.get_fields_at_point(&query, &mut [], x).unwrap();

    for j in 0..6 {
        let tol = 1e-9 * eh_copies[j].norm();
        assert!(eh_copies[j].norm() > 0.0);
        assert_relative_eq!((eh_periodic[j] - eh_copies[j]).norm(), 0.0, epsilon = tol);
    }
}
