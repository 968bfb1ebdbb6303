//! Periodic Green's functions for Bloch-periodic geometries.
//!
//! For a lattice $\{\mathbf{L}\}$ and Bloch wavevector $\mathbf{P}$, the
//! periodic Helmholtz Green's function at source-minus-observer
//! displacement $\mathbf{R}$ sums the source images at $\mathbf{R}+\mathbf{L}$:
//!
//! $$
//! \bar{G}(\mathbf{R}) = \sum_{\mathbf{L}} e^{i\mathbf{P}\cdot\mathbf{L}}
//! \frac{e^{ik|\mathbf{R}+\mathbf{L}|}}{4\pi|\mathbf{R}+\mathbf{L}|}.
//! $$
//!
//! Moving the observer by $\mathbf{L}$ therefore multiplies $\bar{G}$ by
//! $e^{i\mathbf{P}\cdot\mathbf{L}}$, and so the radiated fields are
//! Bloch-periodic.
//! The field engine only needs $\bar{G}$ and its gradient with respect to
//! $\mathbf{R}$, which it obtains through the [`PeriodicKernel`] trait. An
//! Ewald-accelerated implementation plugs in through the same trait; the
//! kernels here are the free-space kernel and a direct image sum that is
//! accurate for lossy wavenumbers.

use num_complex::Complex64;
use tessera_geometry::Lattice;

/// Value and gradient of a (periodic) Green's function at one displacement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GreensValue {
    pub phi: Complex64,
    /// $\nabla_{\mathbf{R}} \bar{G}$.
    pub grad: [Complex64; 3],
}

impl GreensValue {
    pub fn zero() -> Self {
        let zero = Complex64::new(0.0, 0.0);
        Self {
            phi: zero,
            grad: [zero; 3],
        }
    }
}

/// A periodic Helmholtz kernel.
///
/// `r` is the source-minus-observer displacement. Evaluations at `r`
/// coinciding with a lattice image (zero separation) are singular and
/// the result is unspecified unless `exclude_inner_cells` removes that image.
pub trait PeriodicKernel: Send + Sync {
    fn name(&self) -> &str;

    /// Evaluate $\bar{G}$ and $\nabla\bar{G}$ at displacement `r` for
    /// wavenumber `k`, Bloch wavevector `bloch`, and `lattice`.
    ///
    /// With `exclude_inner_cells` set, the images in the innermost cells
    /// ($|n_i| \le 1$ along every lattice direction) are left out.
    fn evaluate(
        &self,
        r: &[f64; 3],
        k: Complex64,
        bloch: &[f64; 3],
        lattice: &Lattice,
        exclude_inner_cells: bool,
    ) -> GreensValue;
}

/// Free-space Helmholtz Green's function $e^{ikR}/(4\pi R)$ and its
/// gradient.
pub fn helmholtz(r: &[f64; 3], k: Complex64) -> GreensValue {
    let r_sq = r[0] * r[0] + r[1] * r[1] + r[2] * r[2];
    let dist = r_sq.sqrt();

    let ikr = Complex64::new(0.0, 1.0) * k * dist;
    let phi = ikr.exp() / (4.0 * std::f64::consts::PI * dist);

    // ∇G = R (ikR − 1) G / R²
    let factor = (ikr - 1.0) * phi / r_sq;
    GreensValue {
        phi,
        grad: [factor * r[0], factor * r[1], factor * r[2]],
    }
}

/// Non-periodic kernel; the lattice and Bloch vector are ignored.
#[derive(Debug, Clone, Copy, Default)]
pub struct FreeSpaceKernel;

impl PeriodicKernel for FreeSpaceKernel {
    fn name(&self) -> &str {
        "free-space"
    }

    fn evaluate(
        &self,
        r: &[f64; 3],
        k: Complex64,
        _bloch: &[f64; 3],
        _lattice: &Lattice,
        exclude_inner_cells: bool,
    ) -> GreensValue {
        if exclude_inner_cells {
            return GreensValue::zero();
        }
        helmholtz(r, k)
    }
}

/// Direct summation over the lattice images $|n_i| \le N$.
///
/// Convergence is exponential for $\operatorname{Im} k > 0$ and only
/// conditional for real $k$, so this kernel is intended for lossy media,
/// imaginary frequencies, and as a reference for accelerated kernels.
#[derive(Debug, Clone, Copy)]
pub struct LatticeSumKernel {
    /// Largest image index $N$ along each lattice direction.
    pub max_image: i32,
}

impl Default for LatticeSumKernel {
    fn default() -> Self {
        Self { max_image: 20 }
    }
}

impl LatticeSumKernel {
    pub fn new(max_image: i32) -> Self {
        Self { max_image }
    }

    /// Whether the image sum converges at wavenumber `k` on a lattice.
    ///
    /// For real $k$ the partial sums oscillate with the cutoff; a lossless
    /// periodic problem needs an Ewald kernel.
    pub fn converges(k: Complex64) -> bool {
        k.im > 0.0
    }
}

impl PeriodicKernel for LatticeSumKernel {
    fn name(&self) -> &str {
        "lattice-sum"
    }

    fn evaluate(
        &self,
        r: &[f64; 3],
        k: Complex64,
        bloch: &[f64; 3],
        lattice: &Lattice,
        exclude_inner_cells: bool,
    ) -> GreensValue {
        let n = self.max_image;
        let (n1_range, n2_range) = match lattice.dimension() {
            0 => (0..=0, 0..=0),
            1 => (-n..=n, 0..=0),
            _ => (-n..=n, -n..=n),
        };

        let mut sum = GreensValue::zero();
        for n1 in n1_range {
            for n2 in n2_range.clone() {
                if exclude_inner_cells && n1.abs() <= 1 && n2.abs() <= 1 {
                    continue;
                }
                let l = lattice.vector([n1, n2]);
                let p_dot_l = bloch[0] * l[0] + bloch[1] * l[1] + bloch[2] * l[2];
                let phase = Complex64::new(0.0, p_dot_l).exp();
                let g = helmholtz(&[r[0] + l[0], r[1] + l[1], r[2] + l[2]], k);
                sum.phi += phase * g.phi;
                for c in 0..3 {
                    sum.grad[c] += phase * g.grad[c];
                }
            }
        }
        sum
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_helmholtz_gradient_matches_finite_difference() {
        let r = [0.7, -0.4, 1.1];
        let k = Complex64::new(2.0, 0.3);
        let g = helmholtz(&r, k);
        let h = 1e-6;

        for c in 0..3 {
            let mut rp = r;
            let mut rm = r;
            rp[c] += h;
            rm[c] -= h;
            let fd = (helmholtz(&rp, k).phi - helmholtz(&rm, k).phi) / (2.0 * h);
            assert_abs_diff_eq!(g.grad[c].re, fd.re, epsilon = 1e-7);
            assert_abs_diff_eq!(g.grad[c].im, fd.im, epsilon = 1e-7);
        }
    }

    #[test]
    fn test_lattice_sum_without_lattice_is_free_space() {
        let r = [0.3, 0.2, -0.5];
        let k = Complex64::new(1.5, 0.0);
        let free = FreeSpaceKernel.evaluate(&r, k, &[0.0; 3], &Lattice::none(), false);
        let sum =
            LatticeSumKernel::default().evaluate(&r, k, &[0.4, 0.0, 0.0], &Lattice::none(), false);
        assert_eq!(free, sum);
    }

    #[test]
    fn test_lattice_sum_is_bloch_periodic() {
        let lattice = Lattice::one_d([1.0, 0.0, 0.0]).unwrap();
        let kernel = LatticeSumKernel::new(40);
        let k = Complex64::new(1.0, 1.0);
        let bloch = [0.6, 0.0, 0.0];
        let r = [0.25, 0.3, 0.1];
        // Observer moved by +a1, so the displacement moves by -a1.
        let shifted = [r[0] - 1.0, r[1], r[2]];

        let g0 = kernel.evaluate(&r, k, &bloch, &lattice, false);
        let g1 = kernel.evaluate(&shifted, k, &bloch, &lattice, false);
        let phase = Complex64::new(0.0, bloch[0]).exp();

        assert_abs_diff_eq!((g1.phi - phase * g0.phi).norm(), 0.0, epsilon = 1e-10);
        for c in 0..3 {
            assert_abs_diff_eq!((g1.grad[c] - phase * g0.grad[c]).norm(), 0.0, epsilon = 1e-10);
        }
    }

    #[test]
    fn test_convergence_requires_decaying_wavenumber() {
        assert!(LatticeSumKernel::converges(Complex64::new(1.0, 0.05)));
        assert!(LatticeSumKernel::converges(Complex64::new(0.0, 2.0)));
        assert!(!LatticeSumKernel::converges(Complex64::new(1.0, 0.0)));
        assert!(!LatticeSumKernel::converges(Complex64::new(3.0, -0.1)));
    }

    #[test]
    fn test_excluding_inner_cells_removes_near_images() {
        let lattice = Lattice::two_d([1.0, 0.0, 0.0], [0.0, 1.0, 0.0]).unwrap();
        let kernel = LatticeSumKernel::new(6);
        let k = Complex64::new(0.5, 2.0);
        let r = [0.1, 0.1, 0.2];

        let full = kernel.evaluate(&r, k, &[0.0; 3], &lattice, false);
        let outer = kernel.evaluate(&r, k, &[0.0; 3], &lattice, true);

        let mut inner = Complex64::new(0.0, 0.0);
        for n1 in -1..=1 {
            for n2 in -1..=1 {
                let l = lattice.vector([n1, n2]);
                inner += helmholtz(&[r[0] - l[0], r[1] - l[1], r[2] - l[2]], k).phi;
            }
        }
        assert_abs_diff_eq!((full.phi - outer.phi - inner).norm(), 0.0, epsilon = 1e-12);
    }
}
