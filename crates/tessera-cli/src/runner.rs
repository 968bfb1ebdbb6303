//! Job runner: ties together geometry, materials, incident fields and the
//! field engine.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use ndarray::Array2;
use num_complex::Complex64;
use serde::Serialize;

use tessera_core::{
    CoefficientVector, EngineConfig, FieldEngine, FieldQuery, FreeSpaceKernel, IncidentField,
    LatticeSumKernel, PeriodicKernel, PlaneWave, DEFAULT_FUNCTIONS,
};
use tessera_core::types::wavenumber;
use tessera_geometry::{EdgeSpec, Geometry, Lattice, Region, SurfaceSpec};
use tessera_materials::{MaterialModel, Pec, TabulatedMaterial, Vacuum};

use crate::config::{JobConfig, MaterialConfig, PlaneWaveConfig, PointsConfig};

/// Everything needed to evaluate a job, built from its configuration.
pub struct JobSetup {
    pub geometry: Arc<Geometry>,
    pub kernel: Arc<dyn PeriodicKernel>,
    pub incident: Vec<Box<dyn IncidentField>>,
    pub coefficients: Option<CoefficientVector>,
    pub points: Array2<f64>,
}

/// Result table of a run.
#[derive(Debug, Serialize)]
pub struct FieldTable {
    pub functions: Vec<String>,
    pub points: Vec<[f64; 3]>,
    /// `values[nr][nf]` is function `nf` at point `nr`.
    pub values: Vec<Vec<Complex64>>,
}

/// Build the geometry, kernel, sources and points of a job.
pub fn build_setup(job: &JobConfig) -> Result<JobSetup> {
    let materials = build_materials(&job.material)?;
    let material = |name: &str| -> Result<Arc<dyn MaterialModel>> {
        materials.get(name).cloned().with_context(|| {
            let mut known: Vec<&str> = materials.keys().map(String::as_str).collect();
            known.sort_unstable();
            format!("Unknown material '{}'. Known materials: {}", name, known.join(", "))
        })
    };

    let labels: HashMap<&str, usize> = job
        .geometry
        .surface
        .iter()
        .enumerate()
        .map(|(i, s)| (s.label.as_str(), i))
        .collect();
    let surface_index = |label: &str| -> Result<usize> {
        labels
            .get(label)
            .copied()
            .with_context(|| format!("Unknown surface label '{}'", label))
    };

    let mut specs = Vec::with_capacity(job.geometry.surface.len());
    for s in &job.geometry.surface {
        let containing = s.inside.as_deref().map(surface_index).transpose()?;
        specs.push(SurfaceSpec {
            label: s.label.clone(),
            material: material(&s.material)?,
            containing,
            panels: s.panels.clone(),
            edges: s
                .edges
                .iter()
                .map(|&[v1, v2, qp, qm, p_panel, m_panel]| EdgeSpec {
                    v1,
                    v2,
                    qp,
                    qm,
                    p_panel,
                    m_panel,
                })
                .collect(),
        });
    }

    let lattice = Lattice::new(job.geometry.lattice.clone()).context("Invalid lattice")?;
    let geometry = Geometry::with_exterior(
        job.geometry.vertices.clone(),
        specs,
        material(&job.geometry.exterior)?,
        lattice,
    )
    .context("Invalid geometry")?;

    println!(
        "  Geometry: {} vertices, {} surface(s), {} basis function(s)",
        geometry.vertices().len(),
        geometry.surfaces().len(),
        geometry.total_dof()
    );

    let bloch = job.simulation.bloch;
    if geometry.lattice().dimension() == 0 && bloch.iter().any(|&p| p != 0.0) {
        log::warn!("Bloch vector {:?} is ignored: the geometry has no lattice", bloch);
    }

    let periodic = geometry.lattice().dimension() > 0;
    let kernel: Arc<dyn PeriodicKernel> = match job.simulation.kernel.as_str() {
        "free-space" => Arc::new(FreeSpaceKernel),
        "auto" if !periodic => Arc::new(FreeSpaceKernel),
        "lattice-sum" | "auto" => {
            if periodic {
                check_lattice_sum_converges(&geometry, job.simulation.omega)?;
            }
            Arc::new(LatticeSumKernel::new(job.simulation.max_image))
        }
        other => anyhow::bail!(
            "Unsupported kernel '{}'. Valid kernels: auto, free-space, lattice-sum",
            other
        ),
    };

    let incident = job
        .plane_wave
        .iter()
        .map(|pw| build_plane_wave(pw, &surface_index))
        .collect::<Result<Vec<_>>>()?;

    let coefficients = job
        .coefficients
        .as_ref()
        .map(|c| CoefficientVector::new(c.values.clone()));

    let points = build_points(&job.points)?;

    Ok(JobSetup {
        geometry: Arc::new(geometry),
        kernel,
        incident,
        coefficients,
        points,
    })
}

/// Evaluate the job's field functions at its points.
pub fn run_job(job: &JobConfig) -> Result<FieldTable> {
    let mut setup = build_setup(job)?;

    let config = EngineConfig {
        workers: job.simulation.workers,
        exclude_inner_cells: job.simulation.exclude_inner_cells,
    };
    let engine = FieldEngine::new(setup.geometry.clone(), setup.kernel.clone())?
        .with_config(config)?;

    let functions = job.simulation.functions.as_deref().unwrap_or(DEFAULT_FUNCTIONS);
    let mut query = FieldQuery::new(job.simulation.omega, job.simulation.bloch)
        .with_functions(functions);
    if let Some(kn) = &setup.coefficients {
        query = query.with_coefficients(kn);
    }

    println!(
        "  Evaluating {} at {} point(s) (omega = {}, {} worker(s))",
        functions,
        setup.points.nrows(),
        job.simulation.omega,
        engine.backend().workers()
    );
    let values = engine
        .get_fields(&query, &mut setup.incident, setup.points.view())
        .context("Field evaluation failed")?;

    Ok(FieldTable {
        functions: functions.split(',').map(|f| f.trim().to_string()).collect(),
        points: setup
            .points
            .rows()
            .into_iter()
            .map(|r| [r[0], r[1], r[2]])
            .collect(),
        values: values.rows().into_iter().map(|r| r.to_vec()).collect(),
    })
}

/// The direct image sum only converges when the exterior wave decays.
fn check_lattice_sum_converges(geometry: &Geometry, omega: Complex64) -> Result<()> {
    let exterior = geometry.exterior_material();
    let (eps, mu) = exterior
        .eps_mu(omega)
        .with_context(|| format!("Exterior material '{}'", exterior.name()))?;
    let k = wavenumber(omega, eps, mu);
    if !LatticeSumKernel::converges(k) {
        anyhow::bail!(
            "The lattice-sum kernel does not converge for a lossless exterior \
             (k = {}). Use an imaginary or lossy frequency, or supply an \
             Ewald-summed kernel through the PeriodicKernel trait",
            k
        );
    }
    Ok(())
}

type MaterialTable = HashMap<String, Arc<dyn MaterialModel>>;

fn build_materials(configs: &[MaterialConfig]) -> Result<MaterialTable> {
    let mut materials = MaterialTable::new();
    materials.insert("pec".into(), Arc::new(Pec));
    materials.insert("vacuum".into(), Arc::new(Vacuum));

    for config in configs {
        let model: Arc<dyn MaterialModel> = match config {
            MaterialConfig::Constant(m) => Arc::new(m.clone()),
            MaterialConfig::Drude(m) => Arc::new(m.clone()),
            MaterialConfig::Lorentz(m) => Arc::new(m.clone()),
            MaterialConfig::Tabulated {
                name,
                omega,
                eps_real,
                eps_imag,
            } => {
                let table = TabulatedMaterial::new(
                    name.clone(),
                    omega.clone(),
                    eps_real.clone(),
                    eps_imag.clone(),
                )
                .with_context(|| format!("Invalid tabulated material '{}'", name))?;
                Arc::new(table)
            }
        };
        let name = model.name().to_string();
        if materials.insert(name.clone(), model).is_some() {
            anyhow::bail!("Material '{}' is defined more than once", name);
        }
    }
    Ok(materials)
}

fn build_plane_wave(
    config: &PlaneWaveConfig,
    surface_index: &dyn Fn(&str) -> Result<usize>,
) -> Result<Box<dyn IncidentField>> {
    let region = match config.region.as_str() {
        "exterior" => Region::Exterior,
        label => Region::Interior(surface_index(label)?),
    };
    let norm = config.direction.iter().map(|d| d * d).sum::<f64>().sqrt();
    if norm == 0.0 {
        anyhow::bail!("Plane wave direction must be non-zero");
    }
    Ok(Box::new(
        PlaneWave::new(config.e0, config.direction).in_region(region),
    ))
}

fn build_points(config: &PointsConfig) -> Result<Array2<f64>> {
    let mut points = config.values.clone();
    if let Some(line) = &config.line {
        let n = line.count;
        for i in 0..n {
            let t = if n > 1 { i as f64 / (n - 1) as f64 } else { 0.0 };
            points.push([
                line.start[0] + t * (line.end[0] - line.start[0]),
                line.start[1] + t * (line.end[1] - line.start[1]),
                line.start[2] + t * (line.end[2] - line.start[2]),
            ]);
        }
    }
    if points.is_empty() {
        anyhow::bail!("No evaluation points: give [points] values or a line");
    }
    let flat: Vec<f64> = points.iter().flatten().copied().collect();
    Ok(Array2::from_shape_vec((points.len(), 3), flat)?)
}

/// Write the field table as CSV with a metadata header.
pub fn write_fields_csv(table: &FieldTable, path: &Path) -> Result<()> {
    use std::io::Write;

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let mut file = std::fs::File::create(path)
        .with_context(|| format!("creating {}", path.display()))?;

    writeln!(file, "# Tessera field evaluation")?;
    writeln!(file, "# Version: {}", env!("CARGO_PKG_VERSION"))?;
    writeln!(file, "#")?;

    let mut header = String::from("x,y,z");
    for f in &table.functions {
        header.push_str(&format!(",re({f}),im({f})"));
    }
    writeln!(file, "{}", header)?;

    for (x, row) in table.points.iter().zip(&table.values) {
        write!(file, "{:.6},{:.6},{:.6}", x[0], x[1], x[2])?;
        for v in row {
            write!(file, ",{:.10e},{:.10e}", v.re, v.im)?;
        }
        writeln!(file)?;
    }

    println!("Fields written to: {}", path.display());
    Ok(())
}

/// Write the field table to a JSON file.
pub fn write_fields_json(table: &FieldTable, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let json = serde_json::to_string_pretty(table)
        .map_err(|e| anyhow::anyhow!("JSON serialisation error: {}", e))?;
    std::fs::write(path, json)?;

    println!("Fields (JSON) written to: {}", path.display());
    Ok(())
}
