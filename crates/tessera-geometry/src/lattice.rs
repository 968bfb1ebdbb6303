//! Lattice descriptor for Bloch-periodic geometries.

use serde::{Deserialize, Serialize};

use crate::geometry::GeometryError;

/// Real-space lattice of a periodic geometry.
///
/// Zero basis vectors describe an isolated (non-periodic) geometry; one or
/// two vectors describe a 1D grating or a 2D periodic slab.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Lattice {
    basis: Vec<[f64; 3]>,
}

impl Lattice {
    /// Non-periodic geometry.
    pub fn none() -> Self {
        Self::default()
    }

    /// Build a lattice from up to two non-zero, non-parallel basis vectors.
    pub fn new(basis: Vec<[f64; 3]>) -> Result<Self, GeometryError> {
        if basis.len() > 2 {
            return Err(GeometryError::InvalidLattice(format!(
                "at most 2 lattice vectors are supported, got {}",
                basis.len()
            )));
        }
        for (i, v) in basis.iter().enumerate() {
            if norm(v) == 0.0 {
                return Err(GeometryError::InvalidLattice(format!(
                    "lattice vector {i} is zero"
                )));
            }
        }
        if basis.len() == 2
            && norm(&cross(&basis[0], &basis[1])) < 1e-12 * norm(&basis[0]) * norm(&basis[1])
        {
            return Err(GeometryError::InvalidLattice(
                "lattice vectors are parallel".into(),
            ));
        }
        Ok(Self { basis })
    }

    /// One-dimensional lattice along `a`.
    pub fn one_d(a: [f64; 3]) -> Result<Self, GeometryError> {
        Self::new(vec![a])
    }

    /// Two-dimensional lattice spanned by `a` and `b`.
    pub fn two_d(a: [f64; 3], b: [f64; 3]) -> Result<Self, GeometryError> {
        Self::new(vec![a, b])
    }

    /// Number of periodic directions (0, 1 or 2).
    pub fn dimension(&self) -> usize {
        self.basis.len()
    }

    pub fn basis(&self) -> &[[f64; 3]] {
        &self.basis
    }

    /// Lattice vector $n_1 \mathbf{a}_1 + n_2 \mathbf{a}_2$. Indices beyond
    /// the lattice dimension are ignored.
    pub fn vector(&self, n: [i32; 2]) -> [f64; 3] {
        let mut l = [0.0; 3];
        for (d, a) in self.basis.iter().enumerate() {
            for c in 0..3 {
                l[c] += n[d] as f64 * a[c];
            }
        }
        l
    }
}

fn norm(v: &[f64; 3]) -> f64 {
    (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt()
}

fn cross(a: &[f64; 3], b: &[f64; 3]) -> [f64; 3] {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lattice_dimension() {
        assert_eq!(Lattice::none().dimension(), 0);
        assert_eq!(Lattice::one_d([1.0, 0.0, 0.0]).unwrap().dimension(), 1);
        let square = Lattice::two_d([1.0, 0.0, 0.0], [0.0, 2.0, 0.0]).unwrap();
        assert_eq!(square.dimension(), 2);
        assert_eq!(square.vector([2, -1]), [2.0, -2.0, 0.0]);
    }

    #[test]
    fn test_lattice_rejects_degenerate_vectors() {
        assert!(Lattice::one_d([0.0, 0.0, 0.0]).is_err());
        assert!(Lattice::two_d([1.0, 0.0, 0.0], [2.0, 0.0, 0.0]).is_err());
        assert!(Lattice::new(vec![[1.0, 0.0, 0.0]; 3]).is_err());
    }
}
