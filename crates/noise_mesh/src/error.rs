//! Error type for the mesh pipeline.
//!
//! Configuration problems never show up here: out-of-range values are clamped
//! when they are set. What remains are resource failures, which the pipeline
//! cannot recover from and hands back to the caller unchanged.

use std::collections::TryReserveError;

use thiserror::Error;

/// Errors surfaced by the mesh pipeline.
#[derive(Error, Debug)]
pub enum MeshError {
  /// A vertex or index buffer could not be allocated.
  #[error("failed to allocate {count} {what}: {source}")]
  Allocation {
    what: &'static str,
    count: usize,
    #[source]
    source: TryReserveError,
  },

  /// The grid needs more vertices or indices than 32-bit counts address.
  #[error("grid of {cols}x{rows} needs {vertices} vertices and {indices} indices, beyond the 32-bit range")]
  GridTooLarge {
    cols: u32,
    rows: u32,
    vertices: u64,
    indices: u64,
  },

  /// A dedicated worker pool could not be created.
  #[error("failed to build worker pool: {0}")]
  ThreadPool(#[from] rayon::ThreadPoolBuildError),

  /// A buffer set was read before any cycle published into it.
  #[error("buffer set for frame {frame} holds no published mesh")]
  Unpublished { frame: u64 },

  /// An in-flight task ended without delivering its result.
  #[error("worker task for frame {frame} ended without a result")]
  WorkerLost { frame: u64 },
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, MeshError>;

/// Reserve exactly `count` elements, reporting failure as
/// [`MeshError::Allocation`].
pub(crate) fn try_reserve<T>(buffer: &mut Vec<T>, count: usize, what: &'static str) -> Result<()> {
  buffer
    .try_reserve_exact(count.saturating_sub(buffer.len()))
    .map_err(|source| MeshError::Allocation {
      what,
      count,
      source,
    })
}
