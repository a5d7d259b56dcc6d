//! Scale storage
//!
//! Holds the scale array produced by the most recent step and summary
//! statistics over it.

use serde::{Deserialize, Serialize};

/// Scales from the most recent sampling pass, in point index order.
#[derive(Debug, Default, Clone)]
pub struct ScaleBuffer {
    scales: Vec<f64>,
}

impl ScaleBuffer {
    /// Replace the buffer contents with a freshly sampled pass.
    pub fn replace(&mut self, scales: Vec<f64>) {
        self.scales = scales;
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.scales
    }

    pub fn len(&self) -> usize {
        self.scales.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scales.is_empty()
    }

    /// Drop all samples (lattice torn down)
    pub fn clear(&mut self) {
        self.scales.clear();
    }

    pub fn stats(&self) -> Option<ScaleStats> {
        ScaleStats::from_slice(&self.scales)
    }
}

/// Min / max / mean over one scale array.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScaleStats {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
}

impl ScaleStats {
    /// `None` for an empty slice.
    pub fn from_slice(scales: &[f64]) -> Option<Self> {
        if scales.is_empty() {
            return None;
        }
        let (min, max, sum) = scales.iter().fold(
            (f64::INFINITY, f64::NEG_INFINITY, 0.0),
            |(min, max, sum), &s| (min.min(s), max.max(s), sum + s),
        );
        Some(Self {
            min,
            max,
            mean: sum / scales.len() as f64,
        })
    }
}

/// One step's output as delivered to a sink.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScaleFrame {
    /// Step number (1 for the first step)
    pub tick: u64,
    /// Accumulated animation time in seconds (before time multiplier)
    pub time_seconds: f64,
    /// Per-point scale, same order as the lattice's points
    pub scales: Vec<f64>,
}
