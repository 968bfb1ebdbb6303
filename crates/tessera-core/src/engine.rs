//! Field-evaluation engine.
//!
//! [`FieldEngine`] is the entry point of this crate. It validates a batch of
//! observation points, parses the requested field functions, refreshes the
//! incident fields for the current frequency, and hands the batch to a
//! [`ComputeBackend`].

use std::sync::Arc;

use ndarray::{array, Array2, ArrayView2};
use num_complex::Complex64;
use serde::{Deserialize, Serialize};
use tessera_compute::{create_backend, ComputeBackend, ComputeError};
use tessera_geometry::{Geometry, Region};
use tessera_materials::MaterialError;
use thiserror::Error;

use crate::batch::{BatchEvaluator, RegionMedia};
use crate::coefficients::CoefficientVector;
use crate::field_functions::{
    parse_function_list, FieldFunctionParser, StandardFieldFunctions, DEFAULT_FUNCTIONS,
};
use crate::fields::FieldContext;
use crate::incident::IncidentField;
use crate::periodic::PeriodicKernel;
use crate::region::{ExteriorOnly, RegionResolver};
use crate::types::{SixVector, ZERO_SIX};

/// Errors from field evaluation.
#[derive(Debug, Error)]
pub enum FieldError {
    #[error("Evaluation points must form an N x 3 matrix with N >= 1, got {rows} x {cols}")]
    InvalidPoints { rows: usize, cols: usize },

    #[error("Unknown field function: '{0}'")]
    UnknownFieldFunction(String),

    #[error("Coefficient vector has {found} entries, geometry needs {expected}")]
    CoefficientLength { expected: usize, found: usize },

    #[error("No medium in region {region:?}: {reason}")]
    NoMedium { region: Region, reason: String },

    #[error("Material error: {0}")]
    Material(#[from] MaterialError),

    #[error("Compute error: {0}")]
    Compute(#[from] ComputeError),
}

/// Engine settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Worker count; `0` uses the detected hardware concurrency.
    pub workers: usize,
    /// Drop the lattice cells with every index in {-1, 0, 1} from the
    /// periodic Green's function.
    pub exclude_inner_cells: bool,
}

/// Frequency-dependent inputs of one evaluation.
#[derive(Debug, Clone, Copy)]
pub struct FieldQuery<'a> {
    /// Angular frequency in units of c / (length unit).
    pub omega: Complex64,
    pub bloch: [f64; 3],
    /// Surface-current amplitudes; `None` means no scattered field.
    pub coefficients: Option<&'a CoefficientVector>,
    /// Comma-separated field-function names; `None` means
    /// [`DEFAULT_FUNCTIONS`].
    pub functions: Option<&'a str>,
}

impl<'a> FieldQuery<'a> {
    pub fn new(omega: Complex64, bloch: [f64; 3]) -> Self {
        Self {
            omega,
            bloch,
            coefficients: None,
            functions: None,
        }
    }

    pub fn with_coefficients(mut self, coefficients: &'a CoefficientVector) -> Self {
        self.coefficients = Some(coefficients);
        self
    }

    pub fn with_functions(mut self, functions: &'a str) -> Self {
        self.functions = Some(functions);
        self
    }
}

/// Scattered plus incident field evaluator for one geometry.
pub struct FieldEngine {
    geometry: Arc<Geometry>,
    kernel: Arc<dyn PeriodicKernel>,
    resolver: Arc<dyn RegionResolver>,
    parser: Arc<dyn FieldFunctionParser>,
    backend: Arc<dyn ComputeBackend>,
    config: EngineConfig,
}

impl FieldEngine {
    /// Engine with the default configuration, [`ExteriorOnly`] region
    /// lookup and the [`StandardFieldFunctions`] vocabulary.
    pub fn new(
        geometry: Arc<Geometry>,
        kernel: Arc<dyn PeriodicKernel>,
    ) -> Result<Self, FieldError> {
        let config = EngineConfig::default();
        Ok(Self {
            geometry,
            kernel,
            resolver: Arc::new(ExteriorOnly),
            parser: Arc::new(StandardFieldFunctions),
            backend: create_backend(config.workers)?,
            config,
        })
    }

    /// Apply `config`, rebuilding the backend for its worker count.
    pub fn with_config(mut self, config: EngineConfig) -> Result<Self, FieldError> {
        self.backend = create_backend(config.workers)?;
        self.config = config;
        Ok(self)
    }

    pub fn with_region_resolver(mut self, resolver: Arc<dyn RegionResolver>) -> Self {
        self.resolver = resolver;
        self
    }

    pub fn with_function_parser(mut self, parser: Arc<dyn FieldFunctionParser>) -> Self {
        self.parser = parser;
        self
    }

    pub fn with_backend(mut self, backend: Arc<dyn ComputeBackend>) -> Self {
        self.backend = backend;
        self
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn backend(&self) -> &dyn ComputeBackend {
        self.backend.as_ref()
    }

    /// Evaluate field functions at every row of `points` (an N x 3 matrix)
    /// into a freshly allocated N x M matrix.
    ///
    /// Column `j` holds the `j`-th requested function. Each incident field
    /// is updated for `query.omega` before use and contributes only at
    /// points in its own region.
    pub fn get_fields(
        &self,
        query: &FieldQuery<'_>,
        incident: &mut [Box<dyn IncidentField>],
        points: ArrayView2<'_, f64>,
    ) -> Result<Array2<Complex64>, FieldError> {
        let mut output = Array2::zeros((0, 0));
        self.evaluate(query, incident, points, &mut output, false)?;
        Ok(output)
    }

    /// Like [`get_fields`](Self::get_fields), but writes into the
    /// caller's `output`.
    ///
    /// A matrix of the wrong shape is replaced with a warning. On error
    /// the buffer is untouched, except that [`ComputeError::RowFailed`]
    /// can leave rows of the current batch already written.
    pub fn get_fields_into(
        &self,
        query: &FieldQuery<'_>,
        incident: &mut [Box<dyn IncidentField>],
        points: ArrayView2<'_, f64>,
        output: &mut Array2<Complex64>,
    ) -> Result<(), FieldError> {
        self.evaluate(query, incident, points, output, true)
    }

    fn evaluate(
        &self,
        query: &FieldQuery<'_>,
        incident: &mut [Box<dyn IncidentField>],
        points: ArrayView2<'_, f64>,
        output: &mut Array2<Complex64>,
        warn_on_resize: bool,
    ) -> Result<(), FieldError> {
        let (rows, cols) = points.dim();
        if cols != 3 || rows == 0 {
            return Err(FieldError::InvalidPoints { rows, cols });
        }

        let list = query.functions.unwrap_or(DEFAULT_FUNCTIONS);
        let functions = parse_function_list(self.parser.as_ref(), list)?;

        if let Some(kn) = query.coefficients {
            let expected = self.geometry.total_dof();
            if kn.len() != expected {
                return Err(FieldError::CoefficientLength {
                    expected,
                    found: kn.len(),
                });
            }
        }

        let media = RegionMedia::resolve(&self.geometry, query.omega)?;
        for source in incident.iter_mut() {
            let medium = media.get(source.region())?;
            source.update(query.omega, medium.eps, medium.mu);
        }

        let shape = (rows, functions.len());
        if output.dim() != shape {
            if warn_on_resize {
                log::warn!(
                    "output matrix has shape {:?}, expected {:?}; allocating a new one",
                    output.dim(),
                    shape
                );
            }
            *output = Array2::zeros(shape);
        }

        let evaluator = BatchEvaluator {
            fields: FieldContext {
                geometry: &self.geometry,
                kernel: self.kernel.as_ref(),
                omega: query.omega,
                bloch: query.bloch,
                exclude_inner_cells: self.config.exclude_inner_cells,
            },
            resolver: self.resolver.as_ref(),
            media: &media,
            coefficients: query.coefficients,
            incident,
            functions: &functions,
        };

        log::debug!(
            "evaluating {} function(s) at {} point(s) on {} ({} workers, kernel {})",
            functions.len(),
            rows,
            self.backend.device_info().name,
            self.backend.workers(),
            self.kernel.name()
        );
        evaluator.evaluate(self.backend.as_ref(), points, output)?;
        Ok(())
    }

    /// Total $(\mathbf{E}, \mathbf{H})$ at a single point.
    pub fn get_fields_at_point(
        &self,
        query: &FieldQuery<'_>,
        incident: &mut [Box<dyn IncidentField>],
        x: [f64; 3],
    ) -> Result<SixVector, FieldError> {
        let query = FieldQuery {
            functions: Some(DEFAULT_FUNCTIONS),
            ..*query
        };
        let points = array![[x[0], x[1], x[2]]];
        let out = self.get_fields(&query, incident, points.view())?;

        let mut eh = ZERO_SIX;
        for (dst, src) in eh.iter_mut().zip(out.row(0)) {
            *dst = *src;
        }
        Ok(eh)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::periodic::FreeSpaceKernel;
    use crate::testing::nested_geometry;
    use tessera_compute::SequentialBackend;

    fn engine() -> FieldEngine {
        FieldEngine::new(Arc::new(nested_geometry()), Arc::new(FreeSpaceKernel))
            .unwrap()
            .with_backend(Arc::new(SequentialBackend))
    }

    #[test]
    fn test_two_column_points_are_rejected() {
        let engine = engine();
        let query = FieldQuery::new(Complex64::new(1.0, 0.0), [0.0; 3]);
        let points = Array2::<f64>::zeros((4, 2));
        let err = engine.get_fields(&query, &mut [], points.view()).unwrap_err();
        assert!(matches!(err, FieldError::InvalidPoints { rows: 4, cols: 2 }));
    }

    #[test]
    fn test_empty_batch_is_rejected() {
        let engine = engine();
        let query = FieldQuery::new(Complex64::new(1.0, 0.0), [0.0; 3]);
        let points = Array2::<f64>::zeros((0, 3));
        let err = engine.get_fields(&query, &mut [], points.view()).unwrap_err();
        assert!(matches!(err, FieldError::InvalidPoints { rows: 0, cols: 3 }));
    }

    #[test]
    fn test_short_coefficient_vector_is_rejected() {
        let engine = engine();
        let kn = CoefficientVector::zeros(2);
        let query =
            FieldQuery::new(Complex64::new(1.0, 0.0), [0.0; 3]).with_coefficients(&kn);
        let err = engine
            .get_fields(&query, &mut [], Array2::<f64>::zeros((1, 3)).view())
            .unwrap_err();
        assert!(matches!(err, FieldError::CoefficientLength { expected: 5, found: 2 }));
    }

    #[test]
    fn test_mismatched_output_is_replaced() {
        let engine = engine();
        let query =
            FieldQuery::new(Complex64::new(1.0, 0.0), [0.0; 3]).with_functions("Ex,Hz");
        let mut out = Array2::from_elem((7, 7), Complex64::new(3.0, 3.0));
        engine
            .get_fields_into(&query, &mut [], Array2::<f64>::zeros((3, 3)).view(), &mut out)
            .unwrap();
        assert_eq!(out.dim(), (3, 2));
        assert!(out.iter().all(|v| *v == Complex64::new(0.0, 0.0)));
    }

    #[test]
    fn test_matching_output_is_overwritten_in_place() {
        let engine = engine();
        let query = FieldQuery::new(Complex64::new(1.0, 0.0), [0.0; 3]);
        let mut out = Array2::from_elem((2, 6), Complex64::new(3.0, 3.0));
        let before = out.as_ptr();
        engine
            .get_fields_into(&query, &mut [], Array2::<f64>::zeros((2, 3)).view(), &mut out)
            .unwrap();
        assert_eq!(out.as_ptr(), before);
        assert!(out.iter().all(|v| *v == Complex64::new(0.0, 0.0)));
    }

    #[test]
    fn test_rejected_points_leave_output_untouched() {
        let engine = engine();
        let query = FieldQuery::new(Complex64::new(1.0, 0.0), [0.0; 3]);
        let mut out = Array2::from_shape_fn((4, 6), |(i, j)| {
            Complex64::new(i as f64 + 0.5, -(j as f64))
        });
        let expected = out.clone();
        let err = engine
            .get_fields_into(&query, &mut [], Array2::<f64>::zeros((4, 2)).view(), &mut out)
            .unwrap_err();
        assert!(matches!(err, FieldError::InvalidPoints { rows: 4, cols: 2 }));
        assert_eq!(out, expected);
    }

    #[test]
    fn test_unknown_function_leaves_output_untouched() {
        let engine = engine();
        let query =
            FieldQuery::new(Complex64::new(1.0, 0.0), [0.0; 3]).with_functions("Ex,Bogus");
        let mut out = Array2::from_elem((3, 1), Complex64::new(-1.0, 2.0));
        let expected = out.clone();
        let err = engine
            .get_fields_into(&query, &mut [], Array2::<f64>::zeros((3, 3)).view(), &mut out)
            .unwrap_err();
        assert!(matches!(err, FieldError::UnknownFieldFunction(_)));
        assert_eq!(out, expected);
    }

    #[test]
    fn test_default_config_uses_detected_workers() {
        let config = EngineConfig::default();
        assert_eq!(config.workers, 0);
        assert!(!config.exclude_inner_cells);
    }
}
