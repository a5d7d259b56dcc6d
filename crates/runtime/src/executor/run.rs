//! Animation run orchestration.
//!
//! Drives an [`Animator`] through a fixed number of steps at a constant
//! `dt`, optionally streaming frames to a [`ScaleSink`]. The loop lives
//! outside the animator so that stepping stays free of I/O.

use std::path::PathBuf;

use tracing::{debug, info, warn};

use super::Animator;
use crate::host::PointHost;
use crate::sink::ScaleSink;
use crate::storage::{ScaleFrame, ScaleStats};
use crate::types::Dt;

/// Options for a run.
pub struct RunOptions {
    /// Number of steps to execute
    pub steps: u64,
    /// Seconds per step
    pub dt: Dt,
    /// Log min/max/mean scale after each step
    pub print_stats: bool,
    /// Emit every Nth step to the sink (0 is treated as 1)
    pub stride: u64,
    pub sink: Option<Box<dyn ScaleSink>>,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            steps: 1,
            dt: 1.0 / 60.0,
            print_stats: false,
            stride: 1,
            sink: None,
        }
    }
}

/// Summary of a completed run.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub steps: u64,
    /// Statistics over the final frame
    pub final_stats: Option<ScaleStats>,
    /// Sink output directory, if the sink writes to disk
    pub run_dir: Option<PathBuf>,
}

#[derive(Debug, thiserror::Error)]
pub enum RunError {
    #[error("animator has no lattice to run")]
    NoLattice,
    #[error("sink write failed: {0}")]
    Sink(#[from] crate::sink::SinkError),
}

pub fn run_animation<H: PointHost>(
    animator: &mut Animator<H>,
    mut options: RunOptions,
) -> Result<RunReport, RunError> {
    if !animator.has_lattice() {
        return Err(RunError::NoLattice);
    }
    let stride = options.stride.max(1);
    let run_dir = options.sink.as_ref().and_then(|s| s.output_path());

    debug!(steps = options.steps, dt = options.dt, "starting animation loop");
    for _ in 0..options.steps {
        let scales = animator
            .update_grid(options.dt)
            .ok_or(RunError::NoLattice)?
            .to_vec();
        let tick = animator.tick();

        if options.print_stats {
            if let Some(stats) = ScaleStats::from_slice(&scales) {
                info!(
                    "Tick {:04}: min={:.4} max={:.4} mean={:.4}",
                    tick, stats.min, stats.max, stats.mean
                );
            }
        }

        if let Some(ref mut sink) = options.sink {
            if tick % stride == 0 {
                let frame = ScaleFrame {
                    tick,
                    time_seconds: animator.sim_time(),
                    scales,
                };
                if let Err(err) = sink.emit_frame(frame) {
                    // Finalize what was recorded before reporting the failure
                    if let Err(close_err) = sink.close() {
                        warn!("failed to close sink after write error: {}", close_err);
                    }
                    return Err(err.into());
                }
            }
        }
    }

    if let Some(ref mut sink) = options.sink {
        sink.close()?;
    }

    Ok(RunReport {
        steps: options.steps,
        final_stats: animator.scale_stats(),
        run_dir,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::NullHost;
    use crate::sink::{NullSink, Result as SinkResult, ScaleSink, SinkError};
    use crate::types::{AnimatorSettings, LatticeSpec};
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct MemorySink {
        frames: Arc<Mutex<Vec<ScaleFrame>>>,
        closed: Arc<Mutex<bool>>,
        /// Reject frames once this many have been stored
        capacity: Option<usize>,
    }

    impl ScaleSink for MemorySink {
        fn emit_frame(&mut self, frame: ScaleFrame) -> SinkResult<()> {
            let mut frames = self.frames.lock().unwrap();
            if self.capacity.is_some_and(|cap| frames.len() >= cap) {
                return Err(SinkError::Config("sink is full".to_string()));
            }
            frames.push(frame);
            Ok(())
        }

        fn close(&mut self) -> SinkResult<()> {
            *self.closed.lock().unwrap() = true;
            Ok(())
        }
    }

    #[test]
    fn test_run_requires_lattice() {
        let mut animator = Animator::new(AnimatorSettings::default(), NullHost, 0);
        let err = run_animation(&mut animator, RunOptions::default());
        assert!(matches!(err, Err(RunError::NoLattice)));
    }

    #[test]
    fn test_run_respects_stride() {
        let mut animator = Animator::new(AnimatorSettings::default(), NullHost, 0);
        animator.build(Some(()), LatticeSpec::cube(2));

        let sink = MemorySink::default();
        let report = run_animation(
            &mut animator,
            RunOptions {
                steps: 10,
                dt: 0.1,
                stride: 3,
                sink: Some(Box::new(sink.clone())),
                ..RunOptions::default()
            },
        )
        .unwrap();

        assert_eq!(report.steps, 10);
        assert_eq!(animator.tick(), 10);
        let ticks: Vec<_> = sink.frames.lock().unwrap().iter().map(|f| f.tick).collect();
        assert_eq!(ticks, vec![3, 6, 9]);
        assert!(*sink.closed.lock().unwrap());

        let stats = report.final_stats.unwrap();
        assert_eq!(stats.min, 1.0);
        assert_eq!(stats.max, 1.0);
    }

    #[test]
    fn test_failed_write_still_closes_sink() {
        let mut animator = Animator::new(AnimatorSettings::default(), NullHost, 0);
        animator.build(Some(()), LatticeSpec::cube(2));

        let sink = MemorySink {
            capacity: Some(2),
            ..MemorySink::default()
        };
        let err = run_animation(
            &mut animator,
            RunOptions {
                steps: 10,
                sink: Some(Box::new(sink.clone())),
                ..RunOptions::default()
            },
        );

        assert!(matches!(err, Err(RunError::Sink(SinkError::Config(_)))));
        assert_eq!(animator.tick(), 3);
        assert_eq!(sink.frames.lock().unwrap().len(), 2);
        assert!(*sink.closed.lock().unwrap());
    }

    #[test]
    fn test_run_with_null_sink() {
        let mut animator = Animator::new(AnimatorSettings::default(), NullHost, 0);
        animator.build(Some(()), LatticeSpec::new([3, 2, 1], [1.0; 3]));

        let report = run_animation(
            &mut animator,
            RunOptions {
                steps: 5,
                print_stats: true,
                sink: Some(Box::new(NullSink)),
                ..RunOptions::default()
            },
        )
        .unwrap();

        assert_eq!(report.steps, 5);
        assert!(report.run_dir.is_none());
        assert_eq!(report.final_stats.map(|s| s.mean), Some(1.0));
    }
}
