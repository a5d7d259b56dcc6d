//! Scale sampling
//!
//! Evaluates the six oscillators for a lattice point and multiplies them
//! into one scale factor. Each oscillator is
//!
//! ```text
//! signal(u, I) = cos(2π·u) · I/2 + (1 - I/2)
//! ```
//!
//! which is exactly 1 at intensity 0 and spans `[0, 1]` at intensity 1.
//! Intensity is not clamped: values outside `[0, 1]` are honoured
//! literally and can yield negative or greater-than-one factors.
//!
//! Channel inputs `u`:
//!
//! | channel | input                                         |
//! |---------|-----------------------------------------------|
//! | global  | `phase + config.phase`                        |
//! | x/y/z   | `coord · frequency + phase + config.phase`    |
//! | radius  | `r · frequency + phase + config.phase`        |
//! | random  | `phase + point.random_phase`                  |
//!
//! where coordinates are normalized lattice indices in `[0, 1)` and `r` is
//! the distance from `(0.5, 0.5, 0.5)`. The global signal is multiplied by
//! the base scale.
//!
//! Sampling is pure and reads nothing but its arguments, so the per-point
//! pass can run in parallel.

use std::f64::consts::TAU;

use crate::types::{AnimatorSettings, Channel, LatticeSpec, OscillatorConfig, Oscillators};

/// One oscillator signal for input `u` (in cycles) at `intensity`.
#[inline]
pub fn oscillator_signal(u: f64, intensity: f64) -> f64 {
    let half = 0.5 * intensity;
    (TAU * u).cos() * half + (1.0 - half)
}

/// Distance of a normalized coordinate from the lattice center.
#[inline]
pub fn radial_distance(coord: [f64; 3]) -> f64 {
    let [x, y, z] = coord.map(|c| c - 0.5);
    (x * x + y * y + z * z).sqrt()
}

/// Step-invariant terms of one channel.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Wave {
    half: f64,
    frequency: f64,
    /// Accumulated phase plus the configured phase offset
    offset: f64,
}

impl Wave {
    fn new(config: &OscillatorConfig, phase: f64, frequency: f64) -> Self {
        Self {
            half: 0.5 * config.intensity,
            frequency,
            offset: phase + config.phase,
        }
    }

    #[inline]
    fn eval(&self, coord: f64) -> f64 {
        (TAU * (coord * self.frequency + self.offset)).cos() * self.half + (1.0 - self.half)
    }
}

/// Sampler for one step, with all per-step constants folded in.
///
/// Build it once after the clock advances, then call [`ScaleSampler::sample`]
/// for each point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleSampler {
    spec: LatticeSpec,
    global: f64,
    axes: [Wave; 3],
    radius: Wave,
    random: Wave,
}

impl ScaleSampler {
    pub fn new(
        spec: LatticeSpec,
        phases: &[f64; Channel::COUNT],
        oscillators: &Oscillators,
        base_scale: f64,
    ) -> Self {
        let phase = |c: Channel| phases[c.index()];
        let wave = |c: Channel| {
            let cfg = oscillators.get(c);
            Wave::new(cfg, phase(c), cfg.frequency)
        };

        let global_cfg = &oscillators.global;
        let global = base_scale
            * oscillator_signal(phase(Channel::Global) + global_cfg.phase, global_cfg.intensity);

        Self {
            spec,
            global,
            axes: [wave(Channel::X), wave(Channel::Y), wave(Channel::Z)],
            radius: wave(Channel::Radius),
            // Random has no frequency; the per-point phase is added directly
            // and carries no configured offset.
            random: Wave {
                half: 0.5 * oscillators.random.intensity,
                frequency: 1.0,
                offset: phase(Channel::Random),
            },
        }
    }

    pub fn from_settings(
        spec: LatticeSpec,
        phases: &[f64; Channel::COUNT],
        settings: &AnimatorSettings,
    ) -> Self {
        Self::new(spec, phases, &settings.oscillators, settings.base_scale)
    }

    /// Global signal including the base scale; identical for every point.
    pub fn global(&self) -> f64 {
        self.global
    }

    /// Scale factor for the point at `index` with its fixed random phase.
    #[inline]
    pub fn sample(&self, index: usize, random_phase: f64) -> f64 {
        let coord = self.spec.normalized(index);
        let [xs, ys, zs] = [0, 1, 2].map(|axis| self.axes[axis].eval(coord[axis]));
        let rs = self.radius.eval(radial_distance(coord));
        let ns = self.random.eval(random_phase);
        self.global * xs * ys * zs * rs * ns
    }
}

/// Sample a single point directly from its inputs.
///
/// Equivalent to building a [`ScaleSampler`] and calling
/// [`ScaleSampler::sample`]; prefer the sampler when sampling many points of
/// the same step.
pub fn sample(
    index: usize,
    spec: &LatticeSpec,
    phases: &[f64; Channel::COUNT],
    oscillators: &Oscillators,
    base_scale: f64,
    point_random_phase: f64,
) -> f64 {
    ScaleSampler::new(*spec, phases, oscillators, base_scale).sample(index, point_random_phase)
}
