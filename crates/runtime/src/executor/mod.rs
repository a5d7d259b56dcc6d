//! Step executor
//!
//! Drives one animation step: advance the phase clock once, then sample
//! every lattice point against the frozen step state.
//!
//! [`advance_and_sample`] is the pure core: it takes the animator state and
//! a lattice and returns the scale array. [`Animator`] wraps it with the
//! lattice lifecycle (build, teardown, rebuild) and hands each result to a
//! [`PointHost`].

pub mod parallel;
pub mod run;

pub use parallel::{ChunkConfig, optimal_chunk_size, parallel_chunked_map};
pub use run::{RunError, RunOptions, RunReport, run_animation};

use gridpulse_foundation::RngStream;
use tracing::{debug, info, instrument, trace, warn};

use crate::error::{Error, Result};
use crate::host::PointHost;
use crate::lattice::{Lattice, POINT_PHASE_LABEL};
use crate::sampler::ScaleSampler;
use crate::storage::{ScaleBuffer, ScaleStats};
use crate::types::{AnimatorSettings, AnimatorState, Dt, LatticeSpec};

/// Advance the clock by `dt` and sample every point of `lattice`.
///
/// The phase update happens exactly once, before any point is read. The
/// returned scales are in the lattice's point order.
pub fn advance_and_sample(dt: Dt, state: &mut AnimatorState, lattice: &Lattice) -> Vec<f64> {
    advance_and_sample_with(dt, state, lattice, &ChunkConfig::auto(lattice.len()))
}

/// [`advance_and_sample`] with explicit chunking.
pub fn advance_and_sample_with(
    dt: Dt,
    state: &mut AnimatorState,
    lattice: &Lattice,
    chunks: &ChunkConfig,
) -> Vec<f64> {
    let settings = &state.settings;
    let phases = state.clock.advance(
        dt,
        settings.time_multiplier,
        &settings.oscillators.speeds(),
    );
    let sampler = ScaleSampler::from_settings(*lattice.spec(), &phases, settings);
    sample_lattice(&sampler, lattice, chunks)
}

/// Sample every point of `lattice` with a prepared sampler.
pub fn sample_lattice(sampler: &ScaleSampler, lattice: &Lattice, chunks: &ChunkConfig) -> Vec<f64> {
    parallel_chunked_map(
        lattice.points(),
        |index, point| sampler.sample(index, point.random_phase),
        chunks,
    )
}

/// Result of a [`Animator::build`] request.
#[derive(Debug, Clone, PartialEq)]
pub enum BuildOutcome {
    /// The previous lattice (if any) was torn down and a new one created.
    Built { points: usize },
    /// The request was invalid; nothing changed.
    Rejected(Error),
}

impl BuildOutcome {
    pub fn is_built(&self) -> bool {
        matches!(self, BuildOutcome::Built { .. })
    }
}

/// The lattice currently owned by an [`Animator`], with its host handles.
struct Installed<H: PointHost> {
    lattice: Lattice,
    origin: H::Template,
    handles: Vec<H::Handle>,
}

/// Animation driver for one lattice owner.
///
/// Owns the [`AnimatorState`], the current lattice (if any) and the host
/// that displays it. Building and tearing down take `&mut self`, so no step
/// can observe a lattice mid-rebuild.
pub struct Animator<H: PointHost> {
    state: AnimatorState,
    host: H,
    installed: Option<Installed<H>>,
    /// Random phase source; advances across rebuilds, never rewound
    rng: RngStream,
    scales: ScaleBuffer,
    chunks: Option<ChunkConfig>,
    tick: u64,
    sim_time: f64,
}

impl<H: PointHost> Animator<H> {
    /// Create an animator with no lattice.
    ///
    /// `seed` determines every random phase drawn by later builds.
    pub fn new(settings: AnimatorSettings, host: H, seed: u64) -> Self {
        info!(seed, "animator created");
        Self {
            state: AnimatorState::new(settings),
            host,
            installed: None,
            rng: RngStream::derive(seed, POINT_PHASE_LABEL),
            scales: ScaleBuffer::default(),
            chunks: None,
            tick: 0,
            sim_time: 0.0,
        }
    }

    /// Use a fixed chunk configuration instead of sizing per lattice.
    pub fn with_chunks(mut self, chunks: ChunkConfig) -> Self {
        self.chunks = Some(chunks);
        self
    }

    /// Build a lattice from `origin`, replacing any existing one.
    ///
    /// Invalid requests (missing origin, non-positive or oversized lattice)
    /// are logged at warn level and leave the animator untouched: the new
    /// lattice is fully generated before the old one is released. Phase
    /// accumulators are never reset by a build.
    pub fn build(&mut self, origin: Option<H::Template>, spec: LatticeSpec) -> BuildOutcome {
        let Some(origin) = origin else {
            warn!("build rejected: lattice point template must not be empty");
            return BuildOutcome::Rejected(Error::MissingOrigin);
        };
        if let Err(err) = spec.validate() {
            warn!(size = ?spec.size, "build rejected: {}", err);
            return BuildOutcome::Rejected(err);
        }

        let lattice = match Lattice::generate(spec, &mut self.rng) {
            Ok(lattice) => lattice,
            Err(err) => {
                warn!("build rejected: {}", err);
                return BuildOutcome::Rejected(err);
            }
        };

        self.teardown();

        let handles = lattice
            .point_infos()
            .map(|info| self.host.spawn(&origin, &info))
            .collect();

        let points = lattice.len();
        info!(size = ?spec.size, spacing = ?spec.spacing, points, "lattice built");
        self.installed = Some(Installed {
            lattice,
            origin,
            handles,
        });
        BuildOutcome::Built { points }
    }

    /// Release every point and forget the lattice. Safe without a lattice.
    pub fn teardown(&mut self) {
        let Some(installed) = self.installed.take() else {
            return;
        };
        let count = installed.handles.len();
        for handle in installed.handles {
            self.host.despawn(handle);
        }
        self.scales.clear();
        debug!(points = count, "lattice torn down");
    }

    pub fn has_lattice(&self) -> bool {
        self.installed.is_some()
    }

    fn installed(&self) -> Result<&Installed<H>> {
        self.installed.as_ref().ok_or(Error::NoLattice)
    }

    pub fn lattice(&self) -> Result<&Lattice> {
        self.installed().map(|i| &i.lattice)
    }

    /// Template the current lattice was built from.
    pub fn origin(&self) -> Result<&H::Template> {
        self.installed().map(|i| &i.origin)
    }

    pub fn size(&self) -> Result<[i32; 3]> {
        self.lattice().map(|l| l.spec().size)
    }

    pub fn spacing(&self) -> Result<[f64; 3]> {
        self.lattice().map(|l| l.spec().spacing)
    }

    /// Step from the host frame loop; does nothing when auto update is off.
    pub fn update(&mut self, dt: Dt) -> Option<&[f64]> {
        if !self.state.settings.auto_update {
            trace!("auto update disabled");
            return None;
        }
        self.update_grid(dt)
    }

    /// Advance time and rescale every point.
    ///
    /// Without a lattice this is a no-op: the clock does not advance.
    #[instrument(skip(self), fields(tick = self.tick))]
    pub fn update_grid(&mut self, dt: Dt) -> Option<&[f64]> {
        let installed = self.installed.as_ref()?;
        let chunks = self
            .chunks
            .unwrap_or_else(|| ChunkConfig::auto(installed.lattice.len()));

        let scales = advance_and_sample_with(dt, &mut self.state, &installed.lattice, &chunks);
        for (handle, &scale) in installed.handles.iter().zip(&scales) {
            self.host.apply_scale(handle, scale);
        }
        self.scales.replace(scales);

        self.tick += 1;
        self.sim_time += dt;
        trace!(phases = ?self.state.clock.phases(), "step complete");
        Some(self.scales.as_slice())
    }

    /// Scales from the last step; empty before the first step of a lattice.
    pub fn scales(&self) -> &[f64] {
        self.scales.as_slice()
    }

    pub fn scale_stats(&self) -> Option<ScaleStats> {
        self.scales.stats()
    }

    pub fn state(&self) -> &AnimatorState {
        &self.state
    }

    pub fn settings(&self) -> &AnimatorSettings {
        &self.state.settings
    }

    /// Mutable configuration; changes take effect on the next step.
    pub fn settings_mut(&mut self) -> &mut AnimatorSettings {
        &mut self.state.settings
    }

    /// Zero all phase accumulators.
    pub fn reset_clock(&mut self) {
        debug!("phase clock reset");
        self.state.clock.reset();
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    /// Number of completed steps
    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// Sum of `dt` over completed steps, in seconds
    pub fn sim_time(&self) -> f64 {
        self.sim_time
    }
}

impl<H: PointHost> Drop for Animator<H> {
    fn drop(&mut self) {
        self.teardown();
    }
}
