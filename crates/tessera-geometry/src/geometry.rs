//! Validated RWG geometry.
//!
//! [`Geometry`] owns the vertex table, the surfaces, the exterior medium and
//! the lattice. Construction validates every index and the containment
//! forest, precomputes panel areas and edge lengths, and lays out the
//! per-surface offsets into the basis-function coefficient vector.

use std::sync::Arc;

use tessera_materials::{MaterialModel, Vacuum};
use thiserror::Error;

use crate::lattice::Lattice;
use crate::mesh::{Edge, EdgeVertex, Panel, Surface, SurfaceSpec};

/// Errors raised while assembling a geometry.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("Surface '{surface}': vertex index {index} out of range ({num_vertices} vertices)")]
    VertexOutOfRange {
        surface: String,
        index: usize,
        num_vertices: usize,
    },

    #[error("Surface '{surface}': panel {panel} is degenerate (zero area)")]
    DegeneratePanel { surface: String, panel: usize },

    #[error("Surface '{surface}', edge {edge}: {message}")]
    InvalidEdge {
        surface: String,
        edge: usize,
        message: String,
    },

    #[error("Surface '{surface}': containing surface {container} does not exist")]
    InvalidContainer { surface: String, container: usize },

    #[error("Containment relation has a cycle through surface '{0}'")]
    ContainmentCycle(String),

    #[error("Invalid lattice: {0}")]
    InvalidLattice(String),
}

/// A region of space bounded by surfaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Region {
    /// The unbounded exterior region.
    Exterior,
    /// The interior of the surface with the given index.
    Interior(usize),
}

/// A complete boundary-element geometry.
#[derive(Debug, Clone)]
pub struct Geometry {
    vertices: Vec<[f64; 3]>,
    surfaces: Vec<Surface>,
    exterior: Arc<dyn MaterialModel>,
    lattice: Lattice,
    offsets: Vec<usize>,
    total_dof: usize,
}

impl Geometry {
    /// Build and validate a geometry with a vacuum exterior.
    pub fn new(
        vertices: Vec<[f64; 3]>,
        surfaces: Vec<SurfaceSpec>,
        lattice: Lattice,
    ) -> Result<Self, GeometryError> {
        Self::with_exterior(vertices, surfaces, Arc::new(Vacuum), lattice)
    }

    /// Build and validate a geometry embedded in the given exterior medium.
    pub fn with_exterior(
        vertices: Vec<[f64; 3]>,
        specs: Vec<SurfaceSpec>,
        exterior: Arc<dyn MaterialModel>,
        lattice: Lattice,
    ) -> Result<Self, GeometryError> {
        let num_surfaces = specs.len();
        let mut surfaces = Vec::with_capacity(num_surfaces);

        for (index, spec) in specs.into_iter().enumerate() {
            if let Some(container) = spec.containing {
                if container >= num_surfaces || container == index {
                    return Err(GeometryError::InvalidContainer {
                        surface: spec.label,
                        container,
                    });
                }
            }
            surfaces.push(build_surface(&vertices, index, spec)?);
        }

        check_forest(&surfaces)?;

        let mut offsets = Vec::with_capacity(surfaces.len());
        let mut total_dof = 0;
        for s in &surfaces {
            offsets.push(total_dof);
            total_dof += s.degrees_of_freedom();
        }

        log::debug!(
            "Geometry: {} surfaces, {} vertices, {} basis functions, lattice dimension {}",
            surfaces.len(),
            vertices.len(),
            total_dof,
            lattice.dimension()
        );

        Ok(Self {
            vertices,
            surfaces,
            exterior,
            lattice,
            offsets,
            total_dof,
        })
    }

    pub fn surfaces(&self) -> &[Surface] {
        &self.surfaces
    }

    pub fn surface(&self, index: usize) -> &Surface {
        &self.surfaces[index]
    }

    pub fn vertices(&self) -> &[[f64; 3]] {
        &self.vertices
    }

    pub fn lattice(&self) -> &Lattice {
        &self.lattice
    }

    pub fn exterior_material(&self) -> &dyn MaterialModel {
        self.exterior.as_ref()
    }

    /// Index of the first coefficient belonging to surface `surface`.
    pub fn offset(&self, surface: usize) -> usize {
        self.offsets[surface]
    }

    /// Length of the coefficient vector this geometry expects.
    pub fn total_dof(&self) -> usize {
        self.total_dof
    }

    /// Position of one of the four vertices referenced by an RWG edge.
    pub fn vertex_of(&self, surface: usize, edge: usize, role: EdgeVertex) -> [f64; 3] {
        let e = &self.surfaces[surface].edges[edge];
        self.vertices[e.vertex_index(role)]
    }

    /// Areas of the positive and negative panels of an RWG edge.
    pub fn edge_panel_areas(&self, surface: usize, edge: usize) -> (f64, f64) {
        let s = &self.surfaces[surface];
        let e = &s.edges[edge];
        (s.panels[e.p_panel].area, s.panels[e.m_panel].area)
    }
}

fn build_surface(
    vertices: &[[f64; 3]],
    index: usize,
    spec: SurfaceSpec,
) -> Result<Surface, GeometryError> {
    let check_vertex = |i: usize| {
        if i < vertices.len() {
            Ok(())
        } else {
            Err(GeometryError::VertexOutOfRange {
                surface: spec.label.clone(),
                index: i,
                num_vertices: vertices.len(),
            })
        }
    };

    let mut panels = Vec::with_capacity(spec.panels.len());
    for (np, tri) in spec.panels.iter().enumerate() {
        for &v in tri {
            check_vertex(v)?;
        }
        let area = triangle_area(&vertices[tri[0]], &vertices[tri[1]], &vertices[tri[2]]);
        if area <= 0.0 {
            return Err(GeometryError::DegeneratePanel {
                surface: spec.label.clone(),
                panel: np,
            });
        }
        panels.push(Panel {
            vertices: *tri,
            area,
        });
    }

    let mut edges = Vec::with_capacity(spec.edges.len());
    for (ne, es) in spec.edges.iter().enumerate() {
        for v in [es.v1, es.v2, es.qp, es.qm] {
            check_vertex(v)?;
        }
        let invalid = |message: String| GeometryError::InvalidEdge {
            surface: spec.label.clone(),
            edge: ne,
            message,
        };
        for (which, np, hub) in [
            ("positive", es.p_panel, es.qp),
            ("negative", es.m_panel, es.qm),
        ] {
            let panel = panels
                .get(np)
                .ok_or_else(|| invalid(format!("{which} panel {np} does not exist")))?;
            let has = |v: usize| panel.vertices.contains(&v);
            if !(has(es.v1) && has(es.v2) && has(hub)) {
                return Err(invalid(format!(
                    "{which} panel {np} does not contain the edge and its hub vertex"
                )));
            }
        }
        edges.push(Edge {
            v1: es.v1,
            v2: es.v2,
            qp: es.qp,
            qm: es.qm,
            p_panel: es.p_panel,
            m_panel: es.m_panel,
            length: distance(&vertices[es.v1], &vertices[es.v2]),
        });
    }

    Ok(Surface {
        label: spec.label,
        index,
        material: spec.material,
        containing: spec.containing,
        panels,
        edges,
    })
}

/// Every chain of containing surfaces must terminate at the exterior.
fn check_forest(surfaces: &[Surface]) -> Result<(), GeometryError> {
    for s in surfaces {
        let mut current = s.containing;
        let mut steps = 0;
        while let Some(c) = current {
            steps += 1;
            if steps > surfaces.len() {
                return Err(GeometryError::ContainmentCycle(s.label.clone()));
            }
            current = surfaces[c].containing;
        }
    }
    Ok(())
}

fn distance(a: &[f64; 3], b: &[f64; 3]) -> f64 {
    let d = [a[0] - b[0], a[1] - b[1], a[2] - b[2]];
    (d[0] * d[0] + d[1] * d[1] + d[2] * d[2]).sqrt()
}

fn triangle_area(a: &[f64; 3], b: &[f64; 3], c: &[f64; 3]) -> f64 {
    let u = [b[0] - a[0], b[1] - a[1], b[2] - a[2]];
    let v = [c[0] - a[0], c[1] - a[1], c[2] - a[2]];
    let n = [
        u[1] * v[2] - u[2] * v[1],
        u[2] * v[0] - u[0] * v[2],
        u[0] * v[1] - u[1] * v[0],
    ];
    0.5 * (n[0] * n[0] + n[1] * n[1] + n[2] * n[2]).sqrt()
}
