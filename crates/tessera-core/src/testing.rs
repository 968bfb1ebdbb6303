//! Shared fixtures for unit tests.

use std::sync::Arc;

use tessera_geometry::{EdgeSpec, Geometry, Lattice, SurfaceSpec};
use tessera_materials::{ConstantEpsMu, MaterialModel, Pec};

pub const V1: [f64; 3] = [0.0, -0.5, 0.0];
pub const V2: [f64; 3] = [0.0, 0.5, 0.0];
pub const QP: [f64; 3] = [1.0, 0.0, 0.0];
pub const QM: [f64; 3] = [-1.0, 0.0, 0.0];

/// One RWG pair whose panels mirror each other across the plane x = 0.
pub fn pair_spec(
    label: &str,
    material: Arc<dyn MaterialModel>,
    containing: Option<usize>,
    base: usize,
) -> SurfaceSpec {
    SurfaceSpec {
        label: label.into(),
        material,
        containing,
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

/// Pair vertices translated by `shift`.
pub fn pair_vertices(shift: [f64; 3]) -> Vec<[f64; 3]> {
    [V1, V2, QP, QM]
        .iter()
        .map(|v| [v[0] + shift[0], v[1] + shift[1], v[2] + shift[2]])
        .collect()
}

/// Single PEC RWG pair in vacuum.
pub fn mirrored_pair_geometry() -> Geometry {
    Geometry::new(
        pair_vertices([0.0; 3]),
        vec![pair_spec("pair", Arc::new(Pec), None, 0)],
        Lattice::none(),
    )
    .expect("valid fixture geometry")
}

/// A PEC pair and a dielectric pair nested inside a dielectric pair.
///
/// Surface 0: dielectric shell in the exterior. Surface 1: PEC pair in the
/// exterior. Surface 2: dielectric pair inside surface 0.
pub fn nested_geometry() -> Geometry {
    let mut vertices = pair_vertices([0.0, 0.0, 0.0]);
    vertices.extend(pair_vertices([0.0, 0.0, 1.5]));
    vertices.extend(pair_vertices([0.3, 0.1, -1.2]));
    let glass: Arc<dyn MaterialModel> = Arc::new(ConstantEpsMu::dielectric("glass", 1.5));
    Geometry::new(
        vertices,
        vec![
            pair_spec("shell", glass.clone(), None, 0),
            pair_spec("plate", Arc::new(Pec), None, 4),
            pair_spec("core", glass, Some(0), 8),
        ],
        Lattice::none(),
    )
    .expect("valid fixture geometry")
}
