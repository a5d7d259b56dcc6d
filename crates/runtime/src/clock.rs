//! Phase accumulators
//!
//! Six running phases, one per [`Channel`], each advanced by
//! `dt * time_multiplier * speed` and wrapped into `[0, 1)` every step.
//! The clock is only reset on construction or by an explicit
//! [`PhaseClock::reset`]; rebuilding a lattice leaves it alone.

use gridpulse_foundation::advance_phase;

use crate::types::{Channel, Dt};

/// Running phase per oscillator channel, each in `[0, 1)`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PhaseClock {
    phases: [f64; Channel::COUNT],
}

impl PhaseClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from explicit phases (wrapped into `[0, 1)`).
    pub fn from_phases(phases: [f64; Channel::COUNT]) -> Self {
        Self {
            phases: phases.map(gridpulse_foundation::wrap01),
        }
    }

    /// Advance every channel and return the new phases.
    ///
    /// Never fails. Negative `dt`, multipliers or speeds move phases
    /// backwards and still wrap into `[0, 1)`.
    pub fn advance(
        &mut self,
        dt: Dt,
        time_multiplier: f64,
        speeds: &[f64; Channel::COUNT],
    ) -> [f64; Channel::COUNT] {
        let scaled = dt * time_multiplier;
        for (phase, speed) in self.phases.iter_mut().zip(speeds) {
            *phase = advance_phase(*phase, scaled, *speed);
        }
        self.phases
    }

    pub fn phase(&self, channel: Channel) -> f64 {
        self.phases[channel.index()]
    }

    pub fn phases(&self) -> &[f64; Channel::COUNT] {
        &self.phases
    }

    pub fn reset(&mut self) {
        self.phases = [0.0; Channel::COUNT];
    }
}
