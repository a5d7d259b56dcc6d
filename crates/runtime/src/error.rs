//! Runtime errors

use thiserror::Error;

/// Runtime result type
pub type Result<T> = std::result::Result<T, Error>;

/// Runtime errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// Lattice geometry or points were read while no lattice exists.
    #[error("animator does not have a lattice")]
    NoLattice,

    #[error("lattice size must be positive in every axis, got {size:?}")]
    InvalidLatticeSpec { size: [i32; 3] },

    #[error("lattice size {size:?} has more points than can be allocated")]
    LatticeTooLarge { size: [i32; 3] },

    #[error("lattice point template must be provided")]
    MissingOrigin,

    #[error("point state count {actual} does not match lattice size {expected}")]
    PointCountMismatch { expected: usize, actual: usize },
}
