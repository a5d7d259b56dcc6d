//! Scenario runner.
//!
//! Loads a scenario, builds its lattice on a headless host, and steps the
//! animation at a fixed `dt`.
//!
//! Usage: `gridpulse-run <scenario.yaml> [--steps N] [--dt SECONDS] [--save DIR]
//! [--stride N] [--print]`

use std::path::PathBuf;
use std::process;

use clap::Parser;
use tracing::{error, info};

use gridpulse_runtime::executor::{RunOptions, run_animation};
use gridpulse_runtime::sink::{FileSink, FileSinkConfig, ScaleSink};
use gridpulse_runtime::{Animator, BuildOutcome, NullHost, Scenario};

#[derive(Parser, Debug)]
#[command(name = "gridpulse-run")]
#[command(about = "Animate a gridpulse scenario and optionally record its scale frames")]
struct Args {
    /// Path to the scenario YAML file
    path: PathBuf,

    /// Number of animation steps
    #[arg(long = "steps", default_value = "60")]
    steps: u64,

    /// Seconds per step
    #[arg(long, default_value_t = 1.0 / 60.0)]
    dt: f64,

    /// Directory for recorded frames
    #[arg(long = "save")]
    save_dir: Option<PathBuf>,

    /// Record every Nth step
    #[arg(long = "stride", default_value = "1")]
    stride: u64,

    /// Log min/max/mean scale after every step
    #[arg(long = "print")]
    print: bool,
}

fn main() {
    gridpulse_tools::init_logging();

    let args = Args::parse();

    let scenario = match Scenario::load(&args.path) {
        Ok(s) => {
            info!(
                "Loaded scenario: {} ({})",
                s.metadata.name,
                args.path.display()
            );
            s
        }
        Err(e) => {
            error!("Failed to load scenario '{}': {}", args.path.display(), e);
            process::exit(1);
        }
    };

    let mut animator = Animator::new(scenario.animator, NullHost, scenario.seed);
    match animator.build(Some(()), scenario.lattice) {
        BuildOutcome::Built { points } => {
            info!("  Lattice: {:?} ({} points)", scenario.lattice.size, points);
        }
        BuildOutcome::Rejected(e) => {
            error!("Lattice build failed: {}", e);
            process::exit(1);
        }
    }

    let sink: Option<Box<dyn ScaleSink>> = match args.save_dir {
        Some(ref dir) => {
            let config = FileSinkConfig {
                output_dir: dir.clone(),
                seed: scenario.seed,
                steps: args.steps,
                stride: args.stride,
                lattice: scenario.lattice,
                settings: scenario.animator,
            };
            match FileSink::new(config) {
                Ok(sink) => Some(Box::new(sink)),
                Err(e) => {
                    error!("Failed to create output sink: {}", e);
                    process::exit(1);
                }
            }
        }
        None => None,
    };

    info!("Running {} steps (dt = {})...", args.steps, args.dt);

    let report = match run_animation(
        &mut animator,
        RunOptions {
            steps: args.steps,
            dt: args.dt,
            print_stats: args.print,
            stride: args.stride,
            sink,
        },
    ) {
        Ok(report) => report,
        Err(e) => {
            error!("Run failed: {}", e);
            process::exit(1);
        }
    };

    if let Some(stats) = report.final_stats {
        info!(
            "  Final scales: min={:.4} max={:.4} mean={:.4}",
            stats.min, stats.max, stats.mean
        );
    }
    if let Some(dir) = report.run_dir {
        info!("Frames written to: {}", dir.display());
    }

    info!("Animation complete!");
}
