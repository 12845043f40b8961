//! The `MeshUpdater` seam and strategy selection.

use super::immediate::ImmediateUpdater;
use super::overlapped::OverlappedUpdater;
use super::types::MeshSnapshot;
use crate::config::{GridConfig, UpdateStrategy};
use crate::error::Result;
use crate::metrics::PipelineMetrics;
use crate::threading::TaskExecutor;

/// Explicit per-frame state object driving one procedural mesh.
pub trait MeshUpdater: Send {
  /// Run the frame for `time` seconds under `config` and return the mesh the
  /// renderer should draw now.
  fn advance(&mut self, time: f32, config: &GridConfig) -> Result<MeshSnapshot<'_>>;

  /// Drop all buffers. The next `advance` starts from scratch.
  fn release(&mut self);

  /// Cycles started so far.
  fn frames(&self) -> u64;

  fn strategy(&self) -> UpdateStrategy;

  fn metrics(&self) -> &PipelineMetrics;
}

/// Build the updater selected by `config`, with a dedicated pool when the
/// configuration asks for worker threads.
pub fn create_updater(config: &GridConfig) -> Result<Box<dyn MeshUpdater>> {
  let executor = TaskExecutor::with_threads(config.worker_threads())?;

  tracing::debug!(
    strategy = ?config.strategy(),
    threads = executor.num_threads(),
    "creating mesh updater"
  );

  Ok(match config.strategy() {
    UpdateStrategy::Immediate => Box::new(ImmediateUpdater::new(executor)),
    UpdateStrategy::Overlapped => Box::new(OverlappedUpdater::new(executor)),
  })
}
