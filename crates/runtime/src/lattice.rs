//! Lattice geometry and per-point state
//!
//! A [`Lattice`] pairs an immutable [`LatticeSpec`] with one [`PointState`]
//! per point, in linear index order. The two are created together and
//! dropped together; the per-point random phases never change while the
//! lattice lives.

use gridpulse_foundation::RngStream;

use crate::error::{Error, Result};
use crate::host::PointInfo;
use crate::types::{LatticeSpec, PointState};

/// Label under which per-point phase streams are derived from a seed.
pub const POINT_PHASE_LABEL: &str = "lattice.point.phase";

/// A built lattice: shape plus per-point state.
#[derive(Debug, Clone, PartialEq)]
pub struct Lattice {
    spec: LatticeSpec,
    points: Vec<PointState>,
}

impl Lattice {
    /// Validate `spec` and draw one uniform random phase per point.
    pub fn generate(spec: LatticeSpec, rng: &mut RngStream) -> Result<Self> {
        spec.validate()?;
        let mut phases = Vec::new();
        rng.fill_uniform(&mut phases, spec.point_count());
        let points = phases
            .into_iter()
            .map(|random_phase| PointState { random_phase })
            .collect();
        Ok(Self { spec, points })
    }

    /// Assemble a lattice from existing point state.
    ///
    /// Used when the random phases come from elsewhere (tests, replays).
    pub fn from_points(spec: LatticeSpec, points: Vec<PointState>) -> Result<Self> {
        spec.validate()?;
        if points.len() != spec.point_count() {
            return Err(Error::PointCountMismatch {
                expected: spec.point_count(),
                actual: points.len(),
            });
        }
        Ok(Self { spec, points })
    }

    pub fn spec(&self) -> &LatticeSpec {
        &self.spec
    }

    pub fn points(&self) -> &[PointState] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Host-facing description of each point, in index order.
    pub fn point_infos(&self) -> impl Iterator<Item = PointInfo> + '_ {
        (0..self.points.len()).map(|index| PointInfo {
            index,
            cell: self.spec.decompose(index),
            position: self.spec.position(index),
            name: self.spec.point_name(index),
        })
    }
}
