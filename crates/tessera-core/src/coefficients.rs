//! Basis-function coefficient vectors.
//!
//! The coefficient vector is produced by an external BEM solve and holds one
//! amplitude per PEC edge and two (electric, magnetic) per penetrable edge,
//! laid out surface by surface at the offsets recorded in the
//! [`Geometry`].

use ndarray::Array1;
use num_complex::Complex64;
use tessera_geometry::{CurrentAmplitudes, Geometry};

/// Surface-current amplitudes of every basis function in a geometry.
#[derive(Debug, Clone, PartialEq)]
pub struct CoefficientVector {
    values: Vec<Complex64>,
}

impl CoefficientVector {
    pub fn new(values: Vec<Complex64>) -> Self {
        Self { values }
    }

    pub fn zeros(len: usize) -> Self {
        Self::new(vec![Complex64::new(0.0, 0.0); len])
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn as_slice(&self) -> &[Complex64] {
        &self.values
    }

    pub fn as_mut_slice(&mut self) -> &mut [Complex64] {
        &mut self.values
    }

    /// Amplitudes of local edge `edge` on surface `surface`.
    pub fn amplitudes(
        &self,
        geometry: &Geometry,
        surface: usize,
        edge: usize,
    ) -> CurrentAmplitudes {
        geometry.surface(surface).currents().read_coefficients(
            &self.values,
            geometry.offset(surface),
            edge,
        )
    }

    /// $\alpha\,\mathbf{c}$.
    pub fn scaled(&self, alpha: Complex64) -> Self {
        Self::new(self.values.iter().map(|c| alpha * c).collect())
    }

    /// $\alpha\,\mathbf{c} + \mathbf{other}$. Both vectors must have the
    /// same length.
    pub fn axpy(&self, alpha: Complex64, other: &Self) -> Self {
        assert_eq!(self.len(), other.len(), "coefficient vectors differ in length");
        Self::new(
            self.values
                .iter()
                .zip(&other.values)
                .map(|(a, b)| alpha * a + b)
                .collect(),
        )
    }
}

impl From<Array1<Complex64>> for CoefficientVector {
    fn from(values: Array1<Complex64>) -> Self {
        Self::new(values.to_vec())
    }
}

impl From<Vec<Complex64>> for CoefficientVector {
    fn from(values: Vec<Complex64>) -> Self {
        Self::new(values)
    }
}
