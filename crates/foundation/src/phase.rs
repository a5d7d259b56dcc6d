//! Phase arithmetic on the unit interval.
//!
//! Every oscillator phase in gridpulse is a fraction of a full cycle kept in
//! `[0, 1)`. Wrapping uses a floor-based modulo so that negative speeds and
//! negative time multipliers walk backwards through the cycle instead of
//! producing negative remainders.
//!
//! # Examples
//!
//! ```
//! # use gridpulse_foundation::phase::*;
//! assert_eq!(wrap01(1.25), 0.25);
//! assert_eq!(wrap01(-0.25), 0.75);
//!
//! let p = advance_phase(0.9, 0.5, 0.4);
//! assert!((p - 0.1).abs() < 1e-12);
//! ```

use crate::Dt;

/// Wrap a value into `[0, 1)` using `v - floor(v)`.
///
/// Unlike `%`, the result is never negative. Values that round up to exactly
/// `1.0` (tiny negative inputs) fold back to `0.0`. Non-finite input yields
/// NaN rather than panicking.
#[inline]
pub fn wrap01(v: f64) -> f64 {
    let w = v - v.floor();
    if w >= 1.0 { 0.0 } else { w }
}

/// Advance a phase by `dt * rate` cycles and wrap the result.
///
/// `rate` is the effective cycles-per-second (speed already multiplied by
/// any global time multiplier). Negative `dt` or `rate` is accepted and
/// moves the phase backwards.
#[inline]
pub fn advance_phase(phase: f64, dt: Dt, rate: f64) -> f64 {
    wrap01(phase + dt * rate)
}
