//! Integrand of the reduced potentials at one quadrature sample.

use num_complex::Complex64;

use super::KernelContext;

/// Stack-local state for integrating one panel of one RWG basis function.
///
/// Each worker builds its own context per panel; nothing is shared between
/// threads except the read-only kernel and lattice behind [`KernelContext`].
#[derive(Clone, Copy)]
pub struct IntegrandContext<'a> {
    /// Hub vertex $Q$ of the panel (source for $Q^+$, sink for $Q^-$).
    pub source_vertex: [f64; 3],
    /// RWG normalisation $L / (2A)$.
    pub prefactor: f64,
    /// Field evaluation point $X_0$.
    pub observation: [f64; 3],
    pub kernel: KernelContext<'a>,
}

impl IntegrandContext<'_> {
    /// The nine complex integrand components at sample point `x`:
    ///
    /// | Index | Value |
    /// |-------|-------|
    /// | 0..3 | $\mathbf{f}\,\bar{G}$ |
    /// | 3..6 | $\mathbf{f} \times \nabla\bar{G}$ |
    /// | 6..9 | $-2\,(L/2A)\,\nabla\bar{G}$ |
    ///
    /// where $\mathbf{f} = (L/2A)(X - Q)$ and $\bar{G}$ is evaluated at
    /// $X - X_0$.
    pub fn evaluate(&self, x: &[f64; 3]) -> [Complex64; 9] {
        let pre = self.prefactor;
        let q = &self.source_vertex;
        let f_rwg = [pre * (x[0] - q[0]), pre * (x[1] - q[1]), pre * (x[2] - q[2])];

        let x0 = &self.observation;
        let r = [x[0] - x0[0], x[1] - x0[1], x[2] - x0[2]];
        let g = self.kernel.evaluate(&r);
        let phi = g.phi;
        let grad = g.grad;

        [
            f_rwg[0] * phi,
            f_rwg[1] * phi,
            f_rwg[2] * phi,
            f_rwg[1] * grad[2] - f_rwg[2] * grad[1],
            f_rwg[2] * grad[0] - f_rwg[0] * grad[2],
            f_rwg[0] * grad[1] - f_rwg[1] * grad[0],
            -2.0 * pre * grad[0],
            -2.0 * pre * grad[1],
            -2.0 * pre * grad[2],
        ]
    }
}
