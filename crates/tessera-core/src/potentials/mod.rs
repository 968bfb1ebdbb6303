//! Reduced potentials of single RWG basis functions.
//!
//! The reduced potentials are the dimensionless scalar and vector potentials
//! of one basis function $\mathbf{f}$ populated with unit strength:
//!
//! $$
//! \mathbf{a}(\mathbf{x}) = \int \bar{G}(\mathbf{x}, \mathbf{y})\,\mathbf{f}(\mathbf{y})\,d\mathbf{y},
//! \qquad
//! p(\mathbf{x}) = \int \bar{G}(\mathbf{x}, \mathbf{y})\,\nabla\cdot\mathbf{f}(\mathbf{y})\,d\mathbf{y}.
//! $$
//!
//! The engine needs $\mathbf{a}$, $\nabla\times\mathbf{a}$ and $\nabla p$,
//! each the positive-panel integral minus the negative-panel integral.
//! Quadrature is a fixed 25-point rule; near-singular behaviour when the
//! observation point approaches a panel is left to the kernel.

pub mod integrand;
pub mod quadrature;

use num_complex::Complex64;
use tessera_geometry::{EdgeVertex, Geometry, Lattice};

use crate::periodic::{GreensValue, PeriodicKernel};
use integrand::IntegrandContext;
use quadrature::integrate_triangle;

/// Everything the periodic kernel needs besides the displacement.
#[derive(Clone, Copy)]
pub struct KernelContext<'a> {
    pub kernel: &'a dyn PeriodicKernel,
    /// Wavenumber in the medium containing the observation point.
    pub k: Complex64,
    pub bloch: [f64; 3],
    pub lattice: &'a Lattice,
    pub exclude_inner_cells: bool,
}

impl KernelContext<'_> {
    pub fn evaluate(&self, r: &[f64; 3]) -> GreensValue {
        self.kernel
            .evaluate(r, self.k, &self.bloch, self.lattice, self.exclude_inner_cells)
    }
}

/// $\mathbf{a}$, $\nabla\times\mathbf{a}$ and $\nabla p$ of one basis
/// function at one point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReducedPotentials {
    pub a: [Complex64; 3],
    pub curl_a: [Complex64; 3],
    pub grad_p: [Complex64; 3],
}

/// Integrate the nine integrand components over triangle `(v0, v1, v2)`
/// with hub vertex `hub`.
pub fn panel_integrals(
    triangle: [&[f64; 3]; 3],
    hub: &[f64; 3],
    prefactor: f64,
    observation: &[f64; 3],
    kernel: &KernelContext<'_>,
) -> [Complex64; 9] {
    let ctx = IntegrandContext {
        source_vertex: *hub,
        prefactor,
        observation: *observation,
        kernel: *kernel,
    };
    let [v0, v1, v2] = triangle;
    integrate_triangle(v0, v1, v2, |x| ctx.evaluate(x))
}

/// Reduced potentials of edge `edge` of surface `surface` at `x`.
pub fn reduced_potentials(
    geometry: &Geometry,
    surface: usize,
    edge: usize,
    x: &[f64; 3],
    kernel: &KernelContext<'_>,
) -> ReducedPotentials {
    let qp = geometry.vertex_of(surface, edge, EdgeVertex::QP);
    let v1 = geometry.vertex_of(surface, edge, EdgeVertex::V1);
    let v2 = geometry.vertex_of(surface, edge, EdgeVertex::V2);
    let qm = geometry.vertex_of(surface, edge, EdgeVertex::QM);
    let (p_area, m_area) = geometry.edge_panel_areas(surface, edge);
    let length = geometry.surface(surface).edges[edge].length;

    let ip = panel_integrals([&qp, &v1, &v2], &qp, length / (2.0 * p_area), x, kernel);
    let im = panel_integrals([&v1, &v2, &qm], &qm, length / (2.0 * m_area), x, kernel);

    let mut out = ReducedPotentials {
        a: [Complex64::new(0.0, 0.0); 3],
        curl_a: [Complex64::new(0.0, 0.0); 3],
        grad_p: [Complex64::new(0.0, 0.0); 3],
    };
    for mu in 0..3 {
        out.a[mu] = ip[mu] - im[mu];
        out.curl_a[mu] = ip[mu + 3] - im[mu + 3];
        out.grad_p[mu] = ip[mu + 6] - im[mu + 6];
    }
    out
}
