//! Double-buffered updater with one frame of latency.
//!
//! # Flow
//!
//! ```text
//! advance(N)                            worker
//! ┌──────────────────────────┐
//! │ wait for cycle N-1       │◄──────── cycle N-1 into set (N-1) & 1
//! │ restore its set, publish │
//! └────────────┬─────────────┘
//!              │ lend set N & 1
//!              ▼
//!                                       ┌──────────────────────┐
//!                                       │ cycle N into N & 1   │
//!                                       └──────────────────────┘
//! ┌──────────────────────────┐
//! │ return snapshot of N-1   │ (renderer reads while N computes)
//! └──────────────────────────┘
//! ```
//!
//! The blocking wait happens at the start of the next `advance`, on the
//! previous cycle's work. The very first call has nothing to show yet and
//! computes synchronously.

use super::cycle::{run_cycle, CycleInput};
use super::types::{CycleStats, MeshSnapshot};
use super::updater::MeshUpdater;
use crate::bounds;
use crate::buffers::{BufferArena, MeshBuffers};
use crate::config::{GridConfig, UpdateStrategy};
use crate::error::{MeshError, Result};
use crate::field::VertexField;
use crate::metrics::PipelineMetrics;
use crate::threading::{TaskExecutor, TaskHandle};

type CycleOutput = (MeshBuffers, Result<CycleStats>);

/// A cycle running on the worker pool with its lent buffer set.
#[derive(Debug)]
struct InFlight {
  slot: usize,
  frame: u64,
  handle: TaskHandle<CycleOutput>,
}

/// Published set and the stats it was produced with.
#[derive(Clone, Copy, Debug)]
struct Front {
  slot: usize,
  stats: CycleStats,
}

/// Ping-pong updater: frame N computes on the pool while the renderer draws
/// frame N-1.
#[derive(Debug, Default)]
pub struct OverlappedUpdater {
  executor: TaskExecutor,
  arena: BufferArena,
  in_flight: Option<InFlight>,
  front: Option<Front>,
  frame: u64,
  metrics: PipelineMetrics,
}

impl OverlappedUpdater {
  pub fn new(executor: TaskExecutor) -> Self {
    Self {
      executor,
      arena: BufferArena::new(),
      in_flight: None,
      front: None,
      frame: 0,
      metrics: PipelineMetrics::new(),
    }
  }

  /// True while a cycle is computing on the pool.
  pub fn is_busy(&self) -> bool {
    self.in_flight.is_some()
  }

  pub fn arena(&self) -> &BufferArena {
    &self.arena
  }

  /// Deferred barrier: wait for the in-flight cycle and make it the front.
  fn complete_in_flight(&mut self) -> Result<()> {
    let Some(in_flight) = self.in_flight.take() else {
      return Ok(());
    };

    let output = match in_flight.handle.try_take() {
      Some(output) => Some(output),
      None => {
        tracing::trace!(frame = in_flight.frame, "waiting on in-flight cycle");
        self.metrics.record_stall();
        in_flight.handle.wait()
      }
    };

    let Some((buffers, result)) = output else {
      // The lent set went down with the worker; the slot is refilled lazily
      self.front = None;
      return Err(MeshError::WorkerLost {
        frame: in_flight.frame,
      });
    };

    self.settle(in_flight.slot, buffers, result)
  }

  /// Return a finished set to the arena and publish it as the front.
  ///
  /// A failed cycle leaves its set unpublished. The old front shares that
  /// slot's parity with the next frame, so it is dropped as well and the
  /// next `advance` primes again.
  fn settle(&mut self, slot: usize, buffers: MeshBuffers, result: Result<CycleStats>) -> Result<()> {
    self.arena.restore(slot, buffers);
    let stats = match result {
      Ok(stats) => stats,
      Err(err) => {
        self.front = None;
        return Err(err);
      }
    };

    self.metrics.record(&stats);
    self.front = Some(Front { slot, stats });
    Ok(())
  }
}

impl MeshUpdater for OverlappedUpdater {
  fn advance(&mut self, time: f32, config: &GridConfig) -> Result<MeshSnapshot<'_>> {
    self.complete_in_flight()?;

    let frame = self.frame;
    let slot = BufferArena::slot(frame);
    let input = CycleInput {
      frame,
      layout: config.layout()?,
      field: VertexField::from_config(config, time),
      bounds: bounds::estimate(config),
      shared_topology: self
        .front
        .and_then(|front| self.arena.shared_topology(front.slot)),
    };
    self.frame += 1;

    match self.front {
      // Prime: nothing published yet, compute this frame synchronously
      None => {
        let mut buffers = self.arena.lend(slot);
        let result = self.executor.install(|| run_cycle(&mut buffers, input));
        self.arena.restore(slot, buffers);

        let stats = result?;
        self.metrics.record(&stats);
        self.front = Some(Front { slot, stats });
      }
      Some(_) => {
        let mut buffers = self.arena.lend(slot);
        let handle = self.executor.spawn(move || {
          let result = run_cycle(&mut buffers, input);
          (buffers, result)
        });
        self.in_flight = Some(InFlight {
          slot,
          frame,
          handle,
        });
      }
    }

    self.metrics.set_memory_bytes(self.arena.memory_bytes());

    let front = self.front.ok_or(MeshError::Unpublished { frame })?;
    let buffers = self.arena.published(front.slot, front.stats.frame)?;
    MeshSnapshot::new(buffers, front.stats)
  }

  fn release(&mut self) {
    // Take the lent set back before dropping everything
    if let Some(in_flight) = self.in_flight.take() {
      if let Some((buffers, _)) = in_flight.handle.wait() {
        self.arena.restore(in_flight.slot, buffers);
      }
    }
    self.arena.release();
    self.front = None;
    self.metrics.set_memory_bytes(0);
  }

  fn frames(&self) -> u64 {
    self.frame
  }

  fn strategy(&self) -> UpdateStrategy {
    UpdateStrategy::Overlapped
  }

  fn metrics(&self) -> &PipelineMetrics {
    &self.metrics
  }
}

#[cfg(test)]
#[path = "overlapped_test.rs"]
mod overlapped_test;
