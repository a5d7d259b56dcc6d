//! Gridpulse Runtime
//!
//! Builds a 3D lattice of points and drives their scales from a set of
//! phase-accumulating cosine oscillators.
//!
//! Each step advances six wrapped phases (global, x, y, z, radius, random),
//! then samples every point's scale as the product of the global signal and
//! five spatial signals. Point lifecycle is delegated to a [`PointHost`].

pub mod clock;
pub mod error;
pub mod executor;
pub mod host;
pub mod lattice;
pub mod sampler;
pub mod scenario;
pub mod sink;
pub mod storage;
pub mod types;

pub use clock::PhaseClock;
pub use error::{Error, Result};
pub use executor::{Animator, BuildOutcome, RunOptions, RunReport, run_animation};
pub use host::{NullHost, PointHost, PointInfo, RecordingHost};
pub use lattice::Lattice;
pub use sampler::ScaleSampler;
pub use scenario::{Scenario, ScenarioError};
pub use types::*;
