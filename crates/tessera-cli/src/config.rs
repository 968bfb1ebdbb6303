//! TOML configuration deserialisation for field-evaluation jobs.

use num_complex::Complex64;
use serde::Deserialize;
use tessera_materials::{ConstantEpsMu, Drude, Lorentz};

/// Top-level job configuration.
#[derive(Debug, Deserialize)]
pub struct JobConfig {
    pub simulation: SimulationConfig,
    pub geometry: GeometryConfig,
    #[serde(default)]
    pub material: Vec<MaterialConfig>,
    #[serde(default)]
    pub coefficients: Option<CoefficientsConfig>,
    #[serde(default)]
    pub plane_wave: Vec<PlaneWaveConfig>,
    pub points: PointsConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Frequency, Bloch vector and evaluation settings.
#[derive(Debug, Deserialize)]
pub struct SimulationConfig {
    /// Angular frequency in units of c / (length unit), as `[re, im]`.
    pub omega: Complex64,
    #[serde(default)]
    pub bloch: [f64; 3],
    /// Comma-separated field functions (default: "Ex,Ey,Ez,Hx,Hy,Hz").
    #[serde(default)]
    pub functions: Option<String>,
    /// Worker count; 0 uses every available core.
    #[serde(default)]
    pub workers: usize,
    #[serde(default)]
    pub exclude_inner_cells: bool,
    /// Green's function: "auto", "free-space", or "lattice-sum". Default: "auto".
    /// The lattice sum on a periodic geometry needs a lossy exterior wavenumber.
    #[serde(default = "default_kernel")]
    pub kernel: String,
    /// Image cutoff of the lattice-sum kernel.
    #[serde(default = "default_max_image")]
    pub max_image: i32,
}

fn default_kernel() -> String {
    "auto".into()
}

fn default_max_image() -> i32 {
    20
}

/// Mesh, lattice and exterior medium.
#[derive(Debug, Deserialize)]
pub struct GeometryConfig {
    pub vertices: Vec<[f64; 3]>,
    /// Material name of the unbounded exterior (default: "vacuum").
    #[serde(default = "default_exterior")]
    pub exterior: String,
    /// Zero, one or two lattice basis vectors.
    #[serde(default)]
    pub lattice: Vec<[f64; 3]>,
    pub surface: Vec<SurfaceConfig>,
}

fn default_exterior() -> String {
    "vacuum".into()
}

/// One closed or open surface of the mesh.
#[derive(Debug, Deserialize)]
pub struct SurfaceConfig {
    pub label: String,
    /// Material name: "pec", "vacuum", or a `[[material]]` entry.
    pub material: String,
    /// Label of the surface this one sits inside.
    #[serde(default)]
    pub inside: Option<String>,
    /// Vertex index triples.
    pub panels: Vec<[usize; 3]>,
    /// `[v1, v2, qp, qm, positive_panel, negative_panel]` per RWG edge.
    pub edges: Vec<[usize; 6]>,
}

/// User-defined material model.
#[derive(Debug, Deserialize)]
#[serde(tag = "model", rename_all = "kebab-case")]
pub enum MaterialConfig {
    Constant(ConstantEpsMu),
    Drude(Drude),
    Lorentz(Lorentz),
    Tabulated {
        name: String,
        omega: Vec<f64>,
        eps_real: Vec<f64>,
        eps_imag: Vec<f64>,
    },
}

/// Surface-current amplitudes from a BEM solve, `[re, im]` per entry.
#[derive(Debug, Deserialize)]
pub struct CoefficientsConfig {
    pub values: Vec<Complex64>,
}

/// Incident plane wave.
#[derive(Debug, Deserialize)]
pub struct PlaneWaveConfig {
    /// Polarisation, `[re, im]` per Cartesian component.
    pub e0: [Complex64; 3],
    pub direction: [f64; 3],
    /// "exterior" or the label of the surface whose interior holds the source.
    #[serde(default = "default_region")]
    pub region: String,
}

fn default_region() -> String {
    "exterior".into()
}

/// Evaluation points: an explicit list, a straight line, or both.
#[derive(Debug, Default, Deserialize)]
pub struct PointsConfig {
    #[serde(default)]
    pub values: Vec<[f64; 3]>,
    #[serde(default)]
    pub line: Option<LineConfig>,
}

/// `count` points evenly spaced from `start` to `end` inclusive.
#[derive(Debug, Deserialize)]
pub struct LineConfig {
    pub start: [f64; 3],
    pub end: [f64; 3],
    pub count: usize,
}

/// Output configuration.
#[derive(Debug, Deserialize)]
pub struct OutputConfig {
    /// Output CSV file (default: "./output/fields.csv").
    #[serde(default = "default_output_file")]
    pub file: String,
    /// Whether to also save the table as JSON next to the CSV (default: false).
    #[serde(default)]
    pub save_json: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            file: default_output_file(),
            save_json: false,
        }
    }
}

fn default_output_file() -> String {
    "./output/fields.csv".into()
}

/// Load and parse a TOML job configuration file.
pub fn load_config(path: &std::path::Path) -> anyhow::Result<JobConfig> {
    use anyhow::Context;

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading job file {}", path.display()))?;
    let config: JobConfig = toml::from_str(&content)
        .with_context(|| format!("parsing job file {}", path.display()))?;
    Ok(config)
}
