//! Evaluation of field functions over a batch of points.

use ndarray::{Array2, ArrayView2, ArrayViewMut1};
use num_complex::Complex64;
use tessera_compute::{ComputeBackend, ComputeError};
use tessera_geometry::{Geometry, Region};

use crate::coefficients::CoefficientVector;
use crate::engine::FieldError;
use crate::field_functions::FieldFunction;
use crate::fields::FieldContext;
use crate::incident::IncidentField;
use crate::region::RegionResolver;
use crate::types::{six_add_scaled, SixVector, ZERO_SIX};

/// Surface normal passed to field functions; evaluation points do not lie on
/// a surface.
const NO_NORMAL: [f64; 3] = [0.0; 3];

/// Relative permittivity and permeability of a medium.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Medium {
    pub eps: Complex64,
    pub mu: Complex64,
}

/// Media of every region of a geometry at one frequency.
///
/// The exterior must be a medium. Interiors that are not (perfect
/// conductors) are recorded with the reason and only reported if a point
/// is placed there.
#[derive(Debug, Clone)]
pub struct RegionMedia {
    exterior: Medium,
    interiors: Vec<Result<Medium, String>>,
}

impl RegionMedia {
    pub fn resolve(geometry: &Geometry, omega: Complex64) -> Result<Self, FieldError> {
        let (eps, mu) = geometry.exterior_material().eps_mu(omega)?;
        let interiors = geometry
            .surfaces()
            .iter()
            .map(|s| {
                s.material
                    .eps_mu(omega)
                    .map(|(eps, mu)| Medium { eps, mu })
                    .map_err(|e| e.to_string())
            })
            .collect();
        Ok(Self {
            exterior: Medium { eps, mu },
            interiors,
        })
    }

    pub fn get(&self, region: Region) -> Result<Medium, FieldError> {
        match region {
            Region::Exterior => Ok(self.exterior),
            Region::Interior(i) => match self.interiors.get(i) {
                Some(Ok(medium)) => Ok(*medium),
                Some(Err(reason)) => Err(FieldError::NoMedium {
                    region,
                    reason: reason.clone(),
                }),
                None => Err(FieldError::NoMedium {
                    region,
                    reason: "no such surface".into(),
                }),
            },
        }
    }
}

/// Immutable inputs shared by every row of a batch.
pub struct BatchEvaluator<'a> {
    pub fields: FieldContext<'a>,
    pub resolver: &'a dyn RegionResolver,
    pub media: &'a RegionMedia,
    pub coefficients: Option<&'a CoefficientVector>,
    pub incident: &'a [Box<dyn IncidentField>],
    pub functions: &'a [Box<dyn FieldFunction>],
}

impl BatchEvaluator<'_> {
    /// Total fields at `x` and the medium they were evaluated in.
    pub fn total_fields(&self, x: &[f64; 3]) -> Result<(SixVector, Medium), FieldError> {
        let region = self.resolver.containing_region(self.fields.geometry, x);
        let medium = self.media.get(region)?;

        let mut eh = match self.coefficients {
            Some(kn) => self
                .fields
                .scattered_fields(x, region, kn, medium.eps, medium.mu),
            None => ZERO_SIX,
        };
        for source in self.incident.iter().filter(|s| s.region() == region) {
            six_add_scaled(&mut eh, 1.0, &source.fields(x));
        }
        Ok((eh, medium))
    }

    fn fill_row(
        &self,
        x: &[f64; 3],
        mut row: ArrayViewMut1<'_, Complex64>,
    ) -> Result<(), FieldError> {
        let (eh, medium) = self.total_fields(x)?;
        for (cell, f) in row.iter_mut().zip(self.functions) {
            *cell = f.eval(x, &NO_NORMAL, &eh, medium.eps, medium.mu);
        }
        Ok(())
    }

    /// Fill `output[nr, nf]` with function `nf` at point `nr` of `points`
    /// (one point per row, three columns).
    pub fn evaluate(
        &self,
        backend: &dyn ComputeBackend,
        points: ArrayView2<'_, f64>,
        output: &mut Array2<Complex64>,
    ) -> Result<(), FieldError> {
        let row_fn = |nr: usize, row: ArrayViewMut1<'_, Complex64>| {
            let x = [points[[nr, 0]], points[[nr, 1]], points[[nr, 2]]];
            self.fill_row(&x, row).map_err(|e| ComputeError::RowFailed {
                row: nr,
                message: e.to_string(),
            })
        };
        backend.fill_rows(output, &row_fn)?;
        Ok(())
    }
}
