//! File-based scale sink (JSON format)
//!
//! Writes each emitted frame to `frame_{tick:06}.json` inside a
//! timestamped run directory, and a `manifest.json` describing the run on
//! close.

use std::fs;
use std::path::PathBuf;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::{Result, ScaleSink, SinkError};
use crate::storage::ScaleFrame;
use crate::types::{AnimatorSettings, LatticeSpec, OscillatorConfig};

/// Manifest describing a recorded run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunManifest {
    /// Unique run identifier (timestamp-based)
    pub run_id: String,
    pub created_at: String,
    pub seed: u64,
    pub steps: u64,
    pub stride: u64,
    pub lattice: LatticeSpec,
    pub base_scale: f64,
    pub time_multiplier: f64,
    /// Oscillator settings keyed by channel name, in channel order
    pub channels: IndexMap<String, OscillatorConfig>,
    /// Ticks that were written, in emission order
    pub frames: Vec<u64>,
}

/// File-based sink configuration
#[derive(Debug, Clone)]
pub struct FileSinkConfig {
    /// Base output directory; a run directory is created beneath it
    pub output_dir: PathBuf,
    pub seed: u64,
    pub steps: u64,
    pub stride: u64,
    pub lattice: LatticeSpec,
    pub settings: AnimatorSettings,
}

/// File-based scale sink
pub struct FileSink {
    config: FileSinkConfig,
    run_id: String,
    run_dir: PathBuf,
    frames: Vec<u64>,
    is_closed: bool,
}

impl FileSink {
    pub fn new(config: FileSinkConfig) -> Result<Self> {
        let run_id = chrono::Local::now().format("%Y%m%d_%H%M%S").to_string();
        let run_dir = config.output_dir.join(&run_id);

        fs::create_dir_all(&run_dir).map_err(|e| {
            SinkError::Config(format!("Failed to create output directory: {}", e))
        })?;

        Ok(Self {
            config,
            run_id,
            run_dir,
            frames: Vec::new(),
            is_closed: false,
        })
    }

    fn check_not_closed(&self) -> Result<()> {
        if self.is_closed {
            Err(SinkError::AlreadyClosed)
        } else {
            Ok(())
        }
    }

    fn manifest(&self) -> RunManifest {
        let settings = &self.config.settings;
        RunManifest {
            run_id: self.run_id.clone(),
            created_at: chrono::Local::now().to_rfc3339(),
            seed: self.config.seed,
            steps: self.config.steps,
            stride: self.config.stride,
            lattice: self.config.lattice,
            base_scale: settings.base_scale,
            time_multiplier: settings.time_multiplier,
            channels: settings
                .oscillators
                .iter()
                .map(|(channel, cfg)| (channel.name().to_string(), *cfg))
                .collect(),
            frames: self.frames.clone(),
        }
    }
}

impl ScaleSink for FileSink {
    fn emit_frame(&mut self, frame: ScaleFrame) -> Result<()> {
        self.check_not_closed()?;

        let path = self.run_dir.join(format!("frame_{:06}.json", frame.tick));
        let json = serde_json::to_string(&frame)
            .map_err(|e| SinkError::Serialization(e.to_string()))?;
        fs::write(&path, json)?;

        self.frames.push(frame.tick);
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        if self.is_closed {
            return Ok(());
        }

        let manifest_json = serde_json::to_string_pretty(&self.manifest())
            .map_err(|e| SinkError::Serialization(e.to_string()))?;
        fs::write(self.run_dir.join("manifest.json"), manifest_json)?;

        self.is_closed = true;
        Ok(())
    }

    fn output_path(&self) -> Option<PathBuf> {
        Some(self.run_dir.clone())
    }
}
