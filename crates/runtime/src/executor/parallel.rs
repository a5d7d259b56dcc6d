//! Chunked parallel sampling over lattice points.
//!
//! The per-point pass reads only immutable step data, so it can be split
//! across rayon workers. Results are collected in index order regardless of
//! scheduling, which keeps parallel output bit-identical to the serial pass.

use rayon::prelude::*;

/// Configuration for the per-point pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkConfig {
    /// Points per parallel task
    pub chunk_size: usize,
    /// Lattices with at most this many points are sampled serially
    pub serial_threshold: usize,
}

impl ChunkConfig {
    /// Smallest chunk handed to a worker
    pub const MIN_CHUNK: usize = 64;
    /// Largest chunk handed to a worker
    pub const MAX_CHUNK: usize = 4096;

    pub fn new(chunk_size: usize) -> Self {
        Self {
            chunk_size,
            ..Self::default()
        }
    }

    /// Pick a chunk size for `population` points on the current pool.
    pub fn auto(population: usize) -> Self {
        Self::new(optimal_chunk_size(population))
    }

    /// Force the serial path regardless of lattice size.
    pub fn serial() -> Self {
        Self {
            chunk_size: Self::MAX_CHUNK,
            serial_threshold: usize::MAX,
        }
    }

    /// Chunk size clamped to `[MIN_CHUNK, MAX_CHUNK]`.
    pub fn effective_size(&self) -> usize {
        self.chunk_size.clamp(Self::MIN_CHUNK, Self::MAX_CHUNK)
    }
}

impl Default for ChunkConfig {
    fn default() -> Self {
        Self {
            chunk_size: 256,
            serial_threshold: 1024,
        }
    }
}

/// Chunk size targeting four chunks per worker thread.
pub fn optimal_chunk_size(population: usize) -> usize {
    let threads = rayon::current_num_threads().max(1);
    (population / (threads * 4)).clamp(ChunkConfig::MIN_CHUNK, ChunkConfig::MAX_CHUNK)
}

/// Map `f(index, &value)` over `values`, in parallel chunks when large
/// enough. Output order always matches input order.
pub fn parallel_chunked_map<T, U, F>(values: &[T], f: F, config: &ChunkConfig) -> Vec<U>
where
    T: Sync,
    U: Send,
    F: Fn(usize, &T) -> U + Sync,
{
    if values.len() <= config.serial_threshold {
        return values.iter().enumerate().map(|(i, v)| f(i, v)).collect();
    }

    let chunk_size = config.effective_size();
    values
        .par_chunks(chunk_size)
        .enumerate()
        .flat_map_iter(|(chunk_idx, chunk)| {
            let base = chunk_idx * chunk_size;
            chunk.iter().enumerate().map(move |(i, v)| (base + i, v))
        })
        .map(|(i, v)| f(i, v))
        .collect()
}
