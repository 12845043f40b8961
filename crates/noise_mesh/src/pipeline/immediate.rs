//! Single-buffered updater: every cycle completes before `advance` returns.

use super::cycle::{run_cycle, CycleInput};
use super::types::MeshSnapshot;
use super::updater::MeshUpdater;
use crate::bounds;
use crate::buffers::MeshBuffers;
use crate::config::{GridConfig, UpdateStrategy};
use crate::error::Result;
use crate::field::VertexField;
use crate::metrics::PipelineMetrics;
use crate::threading::TaskExecutor;

/// Runs each cycle synchronously into one buffer set.
///
/// The snapshot returned by [`advance`](MeshUpdater::advance) borrows that
/// set, which is what keeps the next cycle from overwriting it while the
/// renderer still reads.
#[derive(Debug, Default)]
pub struct ImmediateUpdater {
  executor: TaskExecutor,
  buffers: MeshBuffers,
  frame: u64,
  metrics: PipelineMetrics,
}

impl ImmediateUpdater {
  pub fn new(executor: TaskExecutor) -> Self {
    Self {
      executor,
      buffers: MeshBuffers::new(),
      frame: 0,
      metrics: PipelineMetrics::new(),
    }
  }

  pub fn buffers(&self) -> &MeshBuffers {
    &self.buffers
  }
}

impl MeshUpdater for ImmediateUpdater {
  fn advance(&mut self, time: f32, config: &GridConfig) -> Result<MeshSnapshot<'_>> {
    let input = CycleInput {
      frame: self.frame,
      layout: config.layout()?,
      field: VertexField::from_config(config, time),
      bounds: bounds::estimate(config),
      shared_topology: None,
    };
    self.frame += 1;

    let buffers = &mut self.buffers;
    let stats = self.executor.install(|| run_cycle(buffers, input))?;
    self.metrics.record(&stats);
    self.metrics.set_memory_bytes(self.buffers.memory_bytes());

    MeshSnapshot::new(&self.buffers, stats)
  }

  fn release(&mut self) {
    self.buffers.release();
    self.metrics.set_memory_bytes(0);
  }

  fn frames(&self) -> u64 {
    self.frame
  }

  fn strategy(&self) -> UpdateStrategy {
    UpdateStrategy::Immediate
  }

  fn metrics(&self) -> &PipelineMetrics {
    &self.metrics
  }
}

#[cfg(test)]
#[path = "immediate_test.rs"]
mod immediate_test;
