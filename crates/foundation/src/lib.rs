//! gridpulse Foundation
//!
//! Primitives shared across the gridpulse crates: phase arithmetic on the
//! unit interval, stable label hashing, and the deterministic RNG that
//! draws per-point random phases when a lattice is built.

pub mod phase;
pub mod rng;
pub mod stable_hash;

pub use phase::{advance_phase, wrap01};
pub use rng::RngStream;
pub use stable_hash::{fnv1a64, fnv1a64_str};

/// Animation timestep in seconds.
///
/// Functions that need the frame delta take this as their first parameter.
pub type Dt = f64;
