//! Engine-agnostic timing statistics for the mesh pipeline.
//!
//! Compiled in with the `metrics` feature and toggled at runtime through
//! [`COLLECT_METRICS`]. Without the feature every recording call is a no-op.
//!
//! # Usage
//!
//! ```ignore
//! use noise_mesh::metrics::COLLECT_METRICS;
//!
//! // Compile with --features metrics
//! // Runtime toggle:
//! COLLECT_METRICS.store(false, Ordering::Relaxed);
//!
//! // Each updater records its cycles:
//! let metrics = updater.metrics();
//! println!("{:.1} us per cycle", metrics.avg_cycle_us());
//! ```

use std::collections::VecDeque;
#[cfg(feature = "metrics")]
use std::sync::atomic::Ordering;
use std::sync::atomic::AtomicBool;

use crate::pipeline::CycleStats;

/// Samples kept per timing window.
pub const TIMING_WINDOW: usize = 128;

/// Runtime toggle for metrics collection.
/// Set to false to disable metrics gathering at runtime.
pub static COLLECT_METRICS: AtomicBool = AtomicBool::new(true);

/// Check if metrics collection is enabled (both compile-time and runtime).
#[inline]
pub fn is_enabled() -> bool {
  #[cfg(feature = "metrics")]
  {
    COLLECT_METRICS.load(Ordering::Relaxed)
  }
  #[cfg(not(feature = "metrics"))]
  {
    false
  }
}

/// Fixed-capacity history of recent samples, oldest evicted first.
#[derive(Debug, Clone)]
pub struct RollingWindow<T> {
  buffer: VecDeque<T>,
  capacity: usize,
}

impl<T> RollingWindow<T> {
  /// Create a new rolling window with the given capacity.
  pub fn new(capacity: usize) -> Self {
    Self {
      buffer: VecDeque::with_capacity(capacity),
      capacity,
    }
  }

  /// Push a new value, evicting the oldest if at capacity.
  pub fn push(&mut self, value: T) {
    if self.buffer.len() >= self.capacity {
      self.buffer.pop_front();
    }
    self.buffer.push_back(value);
  }

  /// Get the number of values in the window.
  pub fn len(&self) -> usize {
    self.buffer.len()
  }

  /// Check if the window is empty.
  pub fn is_empty(&self) -> bool {
    self.buffer.is_empty()
  }

  /// Clear all values.
  pub fn clear(&mut self) {
    self.buffer.clear();
  }

  /// Iterate over values (oldest to newest).
  pub fn iter(&self) -> impl Iterator<Item = &T> {
    self.buffer.iter()
  }

  /// Get the most recent value.
  pub fn last(&self) -> Option<&T> {
    self.buffer.back()
  }

  /// Maximum number of samples kept.
  pub fn capacity(&self) -> usize {
    self.capacity
  }
}

impl<T: Copy + Default + std::ops::Add<Output = T>> RollingWindow<T> {
  /// Compute the sum of all values.
  pub fn sum(&self) -> T {
    self.buffer.iter().copied().fold(T::default(), |acc, x| acc + x)
  }
}

impl RollingWindow<u64> {
  /// Compute the average of all values.
  pub fn average(&self) -> f64 {
    if self.buffer.is_empty() {
      0.0
    } else {
      self.sum() as f64 / self.buffer.len() as f64
    }
  }

  /// Smallest and largest sample, `None` when empty.
  pub fn min_max(&self) -> Option<(u64, u64)> {
    let min = self.buffer.iter().min()?;
    let max = self.buffer.iter().max()?;
    Some((*min, *max))
  }
}

impl Default for RollingWindow<u64> {
  fn default() -> Self {
    Self::new(TIMING_WINDOW) // ~2 seconds at 60fps
  }
}

/// Per-updater pipeline statistics, fed from each cycle's stats.
#[derive(Debug, Clone, Default)]
pub struct PipelineMetrics {
  // Timing
  /// Rolling window of whole-cycle times in microseconds.
  pub cycle_timings: RollingWindow<u64>,
  /// Rolling window of vertex job times in microseconds.
  pub vertex_timings: RollingWindow<u64>,
  /// Rolling window of topology build times (rebuild cycles only).
  pub topology_timings: RollingWindow<u64>,

  // Counters
  /// Cycles recorded.
  pub cycles: u64,
  /// Cycles that reallocated their buffer set.
  pub rebuilds: u64,
  /// Rebuilds that adopted the other set's topology.
  pub shared_topologies: u64,
  /// Overlapped frames that blocked on the previous cycle.
  pub barrier_stalls: u64,

  // Last frame snapshot (for UI)
  /// Last cycle time in microseconds.
  pub last_cycle_us: u64,
  /// Vertices in the last recorded cycle.
  pub vertex_count: usize,
  /// Indices in the last recorded cycle.
  pub index_count: usize,
  /// Bytes held by the updater's buffer sets.
  pub memory_bytes: usize,
}

impl PipelineMetrics {
  /// Create new metrics with default values.
  pub fn new() -> Self {
    Self::default()
  }

  /// Reset everything except the cumulative counters.
  pub fn reset(&mut self) {
    self.cycle_timings.clear();
    self.vertex_timings.clear();
    self.topology_timings.clear();
    self.last_cycle_us = 0;
    self.vertex_count = 0;
    self.index_count = 0;
    self.memory_bytes = 0;
  }

  /// Record a completed cycle.
  pub fn record(&mut self, stats: &CycleStats) {
    if !is_enabled() {
      return;
    }

    self.cycle_timings.push(stats.total_us);
    self.vertex_timings.push(stats.vertex_us);
    if stats.rebuilt && !stats.shared_topology {
      self.topology_timings.push(stats.topology_us);
    }

    self.cycles += 1;
    if stats.rebuilt {
      self.rebuilds += 1;
    }
    if stats.shared_topology {
      self.shared_topologies += 1;
    }

    self.last_cycle_us = stats.total_us;
    self.vertex_count = stats.vertex_count;
    self.index_count = stats.index_count;
  }

  /// Record a blocking wait at the overlapped barrier.
  pub fn record_stall(&mut self) {
    if is_enabled() {
      self.barrier_stalls += 1;
    }
  }

  /// Record current buffer memory.
  pub fn set_memory_bytes(&mut self, bytes: usize) {
    if is_enabled() {
      self.memory_bytes = bytes;
    }
  }

  /// Get average cycle timing in microseconds.
  pub fn avg_cycle_us(&self) -> f64 {
    self.cycle_timings.average()
  }

  /// Get average vertex job timing in microseconds.
  pub fn avg_vertex_us(&self) -> f64 {
    self.vertex_timings.average()
  }

  /// Buffer memory in megabytes.
  pub fn memory_mb(&self) -> f64 {
    self.memory_bytes as f64 / 1_048_576.0
  }
}

#[cfg(test)]
#[path = "metrics_test.rs"]
mod metrics_test;
