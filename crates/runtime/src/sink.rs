//! Scale sinks - observer output for computed frames
//!
//! Sinks receive the scale array of a completed step and write it to some
//! backend. They are strictly downstream: nothing a sink does can affect the
//! animation.
//!
//! # Lifecycle
//!
//! 1. Create the sink with backend-specific configuration
//! 2. Call `emit_frame()` after each emitted step
//! 3. Call `close()` once at the end to finalize output, also after a
//!    failed write
//!
//! # Implementations
//!
//! - `FileSink` - one JSON file per frame plus a manifest
//! - `NullSink` - discard output (benchmarks)

pub mod file;

pub use file::{FileSink, FileSinkConfig};

use crate::storage::ScaleFrame;

/// Result type for sink operations
pub type Result<T> = std::result::Result<T, SinkError>;

/// Errors that can occur during sink operations
#[derive(Debug, thiserror::Error)]
pub enum SinkError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Sink configuration error: {0}")]
    Config(String),

    #[error("Sink already closed")]
    AlreadyClosed,
}

/// Destination for computed scale frames.
pub trait ScaleSink: Send {
    fn emit_frame(&mut self, frame: ScaleFrame) -> Result<()>;

    /// Finalize output. The sink must not be used afterwards.
    fn close(&mut self) -> Result<()>;

    /// Directory this sink writes into, if any.
    fn output_path(&self) -> Option<std::path::PathBuf> {
        None
    }
}

/// Sink that discards every frame.
pub struct NullSink;

impl ScaleSink for NullSink {
    fn emit_frame(&mut self, _frame: ScaleFrame) -> Result<()> {
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        Ok(())
    }
}
