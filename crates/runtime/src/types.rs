//! Core runtime types
//!
//! Configuration records and lattice shape descriptions consumed by the
//! clock and the sampler. Everything here is plain data; behaviour lives
//! in [`crate::clock`], [`crate::sampler`] and [`crate::executor`].

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::clock::PhaseClock;
use crate::error::{Error, Result};

pub use gridpulse_foundation::Dt;

/// One of the six independent oscillator channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    Global,
    X,
    Y,
    Z,
    Radius,
    Random,
}

impl Channel {
    /// Total number of channels
    pub const COUNT: usize = 6;

    /// All channels in accumulator order
    pub const ALL: [Channel; Self::COUNT] = [
        Channel::Global,
        Channel::X,
        Channel::Y,
        Channel::Z,
        Channel::Radius,
        Channel::Random,
    ];

    /// Position of this channel in phase and speed arrays.
    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Global => "global",
            Self::X => "x",
            Self::Y => "y",
            Self::Z => "z",
            Self::Radius => "radius",
            Self::Random => "random",
        }
    }

    /// Whether the channel has a spatial frequency term.
    ///
    /// Global has no spatial input and Random uses the per-point phase in
    /// place of a coordinate, so neither reads `frequency`.
    pub const fn uses_frequency(self) -> bool {
        matches!(self, Self::X | Self::Y | Self::Z | Self::Radius)
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Wave parameters for a single oscillator channel.
///
/// `intensity` is conventionally in `[0, 1]`. The sampler does not clamp it;
/// range checks happen when a scenario is authored (see
/// [`crate::scenario::Scenario::validate_authoring`]).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OscillatorConfig {
    pub intensity: f64,
    /// Cycles across the unit lattice extent (axis and radius channels only)
    pub frequency: f64,
    /// Cycles per second of accumulated time
    pub speed: f64,
    /// Constant phase offset in cycles
    pub phase: f64,
}

impl Default for OscillatorConfig {
    fn default() -> Self {
        Self {
            intensity: 0.0,
            frequency: 1.0,
            speed: 1.0,
            phase: 0.0,
        }
    }
}

impl OscillatorConfig {
    pub fn with_intensity(mut self, intensity: f64) -> Self {
        self.intensity = intensity;
        self
    }

    pub fn with_frequency(mut self, frequency: f64) -> Self {
        self.frequency = frequency;
        self
    }

    pub fn with_speed(mut self, speed: f64) -> Self {
        self.speed = speed;
        self
    }

    pub fn with_phase(mut self, phase: f64) -> Self {
        self.phase = phase;
        self
    }
}

/// The six oscillator configurations, addressable by [`Channel`].
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Oscillators {
    pub global: OscillatorConfig,
    pub x: OscillatorConfig,
    pub y: OscillatorConfig,
    pub z: OscillatorConfig,
    pub radius: OscillatorConfig,
    pub random: OscillatorConfig,
}

impl Oscillators {
    pub fn get(&self, channel: Channel) -> &OscillatorConfig {
        match channel {
            Channel::Global => &self.global,
            Channel::X => &self.x,
            Channel::Y => &self.y,
            Channel::Z => &self.z,
            Channel::Radius => &self.radius,
            Channel::Random => &self.random,
        }
    }

    pub fn get_mut(&mut self, channel: Channel) -> &mut OscillatorConfig {
        match channel {
            Channel::Global => &mut self.global,
            Channel::X => &mut self.x,
            Channel::Y => &mut self.y,
            Channel::Z => &mut self.z,
            Channel::Radius => &mut self.radius,
            Channel::Random => &mut self.random,
        }
    }

    /// Per-channel speeds in accumulator order.
    pub fn speeds(&self) -> [f64; Channel::COUNT] {
        Channel::ALL.map(|c| self.get(c).speed)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Channel, &OscillatorConfig)> {
        Channel::ALL.into_iter().map(move |c| (c, self.get(c)))
    }
}

/// User-facing animator configuration.
///
/// Every field may be changed between steps; none of them reset the phase
/// accumulators.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AnimatorSettings {
    /// Step automatically from the host's frame loop
    pub auto_update: bool,
    pub time_multiplier: f64,
    pub base_scale: f64,
    #[serde(flatten)]
    pub oscillators: Oscillators,
}

impl Default for AnimatorSettings {
    fn default() -> Self {
        Self {
            auto_update: true,
            time_multiplier: 1.0,
            base_scale: 1.0,
            oscillators: Oscillators::default(),
        }
    }
}

/// Full animation state: configuration plus running phase accumulators.
///
/// Survives lattice rebuilds untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnimatorState {
    pub settings: AnimatorSettings,
    pub clock: PhaseClock,
}

impl AnimatorState {
    pub fn new(settings: AnimatorSettings) -> Self {
        Self {
            settings,
            clock: PhaseClock::new(),
        }
    }
}

/// Shape of a lattice: point counts per axis and spacing between points.
///
/// Dimensions are signed so that a non-positive request can be represented
/// and rejected by [`LatticeSpec::validate`] instead of failing at parse
/// time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatticeSpec {
    pub size: [i32; 3],
    #[serde(default = "unit_spacing")]
    pub spacing: [f64; 3],
}

fn unit_spacing() -> [f64; 3] {
    [1.0, 1.0, 1.0]
}

impl LatticeSpec {
    pub fn new(size: [i32; 3], spacing: [f64; 3]) -> Self {
        Self { size, spacing }
    }

    /// Cubic lattice of `n` points per axis with unit spacing.
    pub fn cube(n: i32) -> Self {
        Self::new([n, n, n], unit_spacing())
    }

    /// Largest point count whose state buffer can be allocated.
    pub const MAX_POINTS: usize = isize::MAX as usize / std::mem::size_of::<PointState>();

    /// Reject any non-positive dimension, or a point count that cannot be
    /// allocated.
    pub fn validate(&self) -> Result<()> {
        if self.size.iter().any(|&n| n <= 0) {
            return Err(Error::InvalidLatticeSpec { size: self.size });
        }
        match self.checked_point_count() {
            Some(count) if count <= Self::MAX_POINTS => Ok(()),
            _ => Err(Error::LatticeTooLarge { size: self.size }),
        }
    }

    pub fn nx(&self) -> usize {
        self.size[0].max(0) as usize
    }

    pub fn ny(&self) -> usize {
        self.size[1].max(0) as usize
    }

    pub fn nz(&self) -> usize {
        self.size[2].max(0) as usize
    }

    /// Number of points, `nx * ny * nz`, saturating at `usize::MAX`.
    pub fn point_count(&self) -> usize {
        self.checked_point_count().unwrap_or(usize::MAX)
    }

    /// `nx * ny * nz`, or `None` on overflow.
    pub fn checked_point_count(&self) -> Option<usize> {
        self.nx().checked_mul(self.ny())?.checked_mul(self.nz())
    }

    /// Linear index of cell `(xi, yi, zi)`; x varies fastest.
    pub fn compose(&self, cell: [usize; 3]) -> usize {
        let [xi, yi, zi] = cell;
        xi + self.nx() * yi + self.nx() * self.ny() * zi
    }

    /// Cell `(xi, yi, zi)` of a linear index.
    ///
    /// Caller guarantees every dimension is positive.
    pub fn decompose(&self, index: usize) -> [usize; 3] {
        let nx = self.nx();
        let plane = nx * self.ny();
        [index % nx, (index % plane) / nx, index / plane]
    }

    /// Normalized lattice coordinate in `[0, 1)` per axis (not centered).
    pub fn normalized(&self, index: usize) -> [f64; 3] {
        let [xi, yi, zi] = self.decompose(index);
        [
            xi as f64 / self.nx() as f64,
            yi as f64 / self.ny() as f64,
            zi as f64 / self.nz() as f64,
        ]
    }

    /// Local position of a point, with the lattice centered on its owner.
    pub fn position(&self, index: usize) -> [f64; 3] {
        let cell = self.decompose(index);
        std::array::from_fn(|axis| {
            let half = 0.5 * (self.size[axis] - 1) as f64 * self.spacing[axis];
            self.spacing[axis] * cell[axis] as f64 - half
        })
    }

    /// Display name handed to the host when a point is spawned.
    pub fn point_name(&self, index: usize) -> String {
        let [xi, yi, zi] = self.decompose(index);
        format!("Point_x{xi}_y{yi}_z{zi}")
    }
}

/// Per-point data fixed for the lifetime of a lattice.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointState {
    /// Uniform random phase in `[0, 1)`, drawn once at build
    pub random_phase: f64,
}
