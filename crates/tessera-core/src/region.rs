//! Locating evaluation points among the regions of a geometry.
//!
//! Which region contains a point decides which surfaces radiate into it, its
//! medium, and which incident fields reach it. A general point-in-body test
//! is not implemented: [`ExteriorOnly`], the default, places every point in
//! the unbounded exterior, which is correct only for points outside all
//! closed bodies. Callers that know better can supply their own
//! [`RegionResolver`], for example [`FixedRegion`].

use tessera_geometry::{Geometry, Region};

/// Decides which region of a geometry contains a point.
pub trait RegionResolver: Send + Sync {
    fn containing_region(&self, geometry: &Geometry, x: &[f64; 3]) -> Region;
}

/// Places every point in the unbounded exterior.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExteriorOnly;

impl RegionResolver for ExteriorOnly {
    fn containing_region(&self, _geometry: &Geometry, _x: &[f64; 3]) -> Region {
        Region::Exterior
    }
}

/// Places every point in one caller-chosen region.
#[derive(Debug, Clone, Copy)]
pub struct FixedRegion(pub Region);

impl RegionResolver for FixedRegion {
    fn containing_region(&self, _geometry: &Geometry, _x: &[f64; 3]) -> Region {
        self.0
    }
}
