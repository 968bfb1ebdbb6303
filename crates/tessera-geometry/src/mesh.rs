//! Mesh entities: panels, RWG edges, and surfaces.
//!
//! An RWG basis function lives on the pair of panels sharing an interior
//! edge. Its positive panel is $(Q^+, V_1, V_2)$ and its negative panel is
//! $(V_1, V_2, Q^-)$, where $Q^\pm$ are the "hub" vertices opposite the
//! shared edge $V_1V_2$.

use std::sync::Arc;

use tessera_materials::MaterialModel;

use crate::currents::{PecCurrents, PenetrableCurrents, SurfaceCurrents};
use crate::geometry::Region;

/// A triangular panel with precomputed area.
#[derive(Debug, Clone, PartialEq)]
pub struct Panel {
    /// Indices into the geometry vertex table.
    pub vertices: [usize; 3],
    pub area: f64,
}

/// An RWG edge (one basis function) with precomputed length.
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    pub v1: usize,
    pub v2: usize,
    pub qp: usize,
    pub qm: usize,
    /// Index of the positive panel within the owning surface.
    pub p_panel: usize,
    /// Index of the negative panel within the owning surface.
    pub m_panel: usize,
    pub length: f64,
}

/// Selects one of the four vertices an RWG edge references.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeVertex {
    V1,
    V2,
    /// Hub of the positive panel.
    QP,
    /// Hub of the negative panel.
    QM,
}

impl Edge {
    pub fn vertex_index(&self, role: EdgeVertex) -> usize {
        match role {
            EdgeVertex::V1 => self.v1,
            EdgeVertex::V2 => self.v2,
            EdgeVertex::QP => self.qp,
            EdgeVertex::QM => self.qm,
        }
    }
}

/// Unvalidated edge description, as handed over by a mesh loader.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EdgeSpec {
    pub v1: usize,
    pub v2: usize,
    pub qp: usize,
    pub qm: usize,
    pub p_panel: usize,
    pub m_panel: usize,
}

/// Unvalidated surface description, as handed over by a mesh loader.
#[derive(Debug, Clone)]
pub struct SurfaceSpec {
    pub label: String,
    pub material: Arc<dyn MaterialModel>,
    /// Surface whose interior encloses this one; `None` for a surface in the
    /// unbounded exterior.
    pub containing: Option<usize>,
    pub panels: Vec<[usize; 3]>,
    pub edges: Vec<EdgeSpec>,
}

/// A closed or open body surface: one material, one set of panels and RWG
/// edges, and a place in the containment forest.
#[derive(Debug, Clone)]
pub struct Surface {
    pub label: String,
    /// Position of this surface in the geometry.
    pub index: usize,
    pub material: Arc<dyn MaterialModel>,
    pub containing: Option<usize>,
    pub panels: Vec<Panel>,
    pub edges: Vec<Edge>,
}

impl Surface {
    /// The region bounded by this surface from the inside.
    pub fn interior_region(&self) -> Region {
        Region::Interior(self.index)
    }

    /// The region this surface sits in: its container's interior, or the
    /// unbounded exterior.
    pub fn outer_region(&self) -> Region {
        match self.containing {
            Some(c) => Region::Interior(c),
            None => Region::Exterior,
        }
    }

    /// Current-type capability of this surface.
    pub fn currents(&self) -> &'static dyn SurfaceCurrents {
        if self.material.is_pec() {
            &PecCurrents
        } else {
            &PenetrableCurrents
        }
    }

    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    /// Number of basis-function amplitudes this surface contributes.
    pub fn degrees_of_freedom(&self) -> usize {
        self.edges.len() * self.currents().degrees_of_freedom_per_edge()
    }
}
