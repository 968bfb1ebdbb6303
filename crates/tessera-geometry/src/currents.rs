//! Surface-current capabilities.
//!
//! A perfect conductor carries one electric surface current amplitude per
//! edge. A penetrable body carries an electric and a magnetic amplitude per
//! edge, stored interleaved as `[K_0, N_0, K_1, N_1, ...]`.

use num_complex::Complex64;

/// Amplitudes of the equivalent surface currents on one edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurrentAmplitudes {
    /// Electric current amplitude.
    pub k_alpha: Complex64,
    /// Magnetic current amplitude; absent on a perfect conductor.
    pub n_alpha: Option<Complex64>,
}

impl CurrentAmplitudes {
    pub fn scaled(self, sign: f64) -> Self {
        Self {
            k_alpha: self.k_alpha * sign,
            n_alpha: self.n_alpha.map(|n| n * sign),
        }
    }
}

/// How a surface's basis-function amplitudes are laid out in a coefficient
/// vector.
pub trait SurfaceCurrents: Send + Sync {
    fn degrees_of_freedom_per_edge(&self) -> usize;

    /// Read the amplitudes of local edge `edge` from a coefficient slice, where
    /// `offset` is the surface's first basis-function index.
    fn read_coefficients(
        &self,
        coefficients: &[Complex64],
        offset: usize,
        edge: usize,
    ) -> CurrentAmplitudes;
}

/// Single electric current per edge.
#[derive(Debug, Clone, Copy, Default)]
pub struct PecCurrents;

/// Interleaved electric and magnetic currents per edge.
#[derive(Debug, Clone, Copy, Default)]
pub struct PenetrableCurrents;

impl SurfaceCurrents for PecCurrents {
    fn degrees_of_freedom_per_edge(&self) -> usize {
        1
    }

    fn read_coefficients(
        &self,
        coefficients: &[Complex64],
        offset: usize,
        edge: usize,
    ) -> CurrentAmplitudes {
        debug_assert!(offset + edge < coefficients.len(), "coefficient index out of range");
        CurrentAmplitudes {
            k_alpha: coefficients[offset + edge],
            n_alpha: None,
        }
    }
}

impl SurfaceCurrents for PenetrableCurrents {
    fn degrees_of_freedom_per_edge(&self) -> usize {
        2
    }

    fn read_coefficients(
        &self,
        coefficients: &[Complex64],
        offset: usize,
        edge: usize,
    ) -> CurrentAmplitudes {
        debug_assert!(
            offset + 2 * edge + 1 < coefficients.len(),
            "coefficient index out of range"
        );
        CurrentAmplitudes {
            k_alpha: coefficients[offset + 2 * edge],
            n_alpha: Some(coefficients[offset + 2 * edge + 1]),
        }
    }
}
