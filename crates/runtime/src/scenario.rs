//! Scenario definitions and loading.
//!
//! A scenario is the configuration-authoring surface: a YAML document that
//! names a lattice shape, a seed, and the animator settings. It is also the
//! one place where oscillator intensities are range-checked; the sampler
//! itself honours whatever it is given.
//!
//! ```yaml
//! apiVersion: gridpulse/v1
//! kind: Scenario
//! metadata:
//!   name: ripple
//! seed: 7
//! lattice:
//!   size: [8, 8, 8]
//!   spacing: [1.0, 1.0, 1.0]
//! animator:
//!   baseScale: 1.0
//!   radius: { intensity: 0.8, frequency: 2.0, speed: 0.5 }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{AnimatorSettings, Channel, LatticeSpec};

const API_VERSION: &str = "gridpulse/v1";
const KIND: &str = "Scenario";

/// Errors that can occur when loading or validating a scenario.
#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("failed to read scenario file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("failed to parse scenario YAML: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("invalid apiVersion: expected 'gridpulse/v1', got '{0}'")]
    InvalidApiVersion(String),

    #[error("invalid kind: expected 'Scenario', got '{0}'")]
    InvalidKind(String),

    #[error("missing required field: {0}")]
    MissingField(String),

    #[error("{channel} intensity {value} is outside [0, 1]")]
    IntensityOutOfRange { channel: Channel, value: f64 },

    #[error("invalid lattice: {0}")]
    InvalidLattice(#[from] crate::error::Error),
}

/// Result type for scenario operations.
pub type ScenarioResult<T> = Result<T, ScenarioError>;

/// A lattice shape plus the animator configuration that drives it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scenario {
    #[serde(default = "default_api_version")]
    pub api_version: String,

    #[serde(default = "default_kind")]
    pub kind: String,

    #[serde(default)]
    pub metadata: ScenarioMetadata,

    /// Seed for the per-point random phase stream
    #[serde(default)]
    pub seed: u64,

    pub lattice: LatticeSpec,

    #[serde(default)]
    pub animator: AnimatorSettings,
}

fn default_api_version() -> String {
    API_VERSION.to_string()
}

fn default_kind() -> String {
    KIND.to_string()
}

/// Metadata for a scenario.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScenarioMetadata {
    /// Machine identifier (lowercase, no spaces)
    pub name: String,

    #[serde(default)]
    pub title: Option<String>,

    #[serde(default)]
    pub description: Option<String>,
}

impl Scenario {
    /// Create a scenario with default animator settings.
    pub fn new(name: impl Into<String>, lattice: LatticeSpec) -> Self {
        Self {
            api_version: default_api_version(),
            kind: default_kind(),
            metadata: ScenarioMetadata {
                name: name.into(),
                title: None,
                description: None,
            },
            seed: 0,
            lattice,
            animator: AnimatorSettings::default(),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.metadata.title = Some(title.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.metadata.description = Some(description.into());
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_animator(mut self, animator: AnimatorSettings) -> Self {
        self.animator = animator;
        self
    }

    /// Load and validate a scenario from a YAML file.
    pub fn load(path: impl AsRef<Path>) -> ScenarioResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse and validate a scenario from a YAML string.
    pub fn from_yaml(yaml: &str) -> ScenarioResult<Self> {
        let scenario: Scenario = serde_yaml::from_str(yaml)?;
        scenario.validate_schema()?;
        scenario.validate_authoring()?;
        Ok(scenario)
    }

    pub fn to_yaml(&self) -> ScenarioResult<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    fn validate_schema(&self) -> ScenarioResult<()> {
        if self.api_version != API_VERSION {
            return Err(ScenarioError::InvalidApiVersion(self.api_version.clone()));
        }
        if self.kind != KIND {
            return Err(ScenarioError::InvalidKind(self.kind.clone()));
        }
        if self.metadata.name.is_empty() {
            return Err(ScenarioError::MissingField("metadata.name".to_string()));
        }
        Ok(())
    }

    /// Check authored values: intensities in `[0, 1]` and a buildable lattice.
    pub fn validate_authoring(&self) -> ScenarioResult<()> {
        for (channel, cfg) in self.animator.oscillators.iter() {
            if !(0.0..=1.0).contains(&cfg.intensity) {
                return Err(ScenarioError::IntensityOutOfRange {
                    channel,
                    value: cfg.intensity,
                });
            }
        }
        self.lattice.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests;
