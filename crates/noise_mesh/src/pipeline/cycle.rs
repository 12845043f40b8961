//! One update cycle as an explicit task graph.
//!
//! ```text
//!            ┌──────────────┐
//!       ┌───►│   topology   │ (only when rebuilding and no shared topology)
//!  prepare   └──────┬───────┘
//!  buffers          │ rayon::join
//!       │    ┌──────┴───────┐
//!       └───►│   vertices   │ (every cycle, in place)
//!            └──────┬───────┘
//!                   ▼
//!            ┌──────────────┐
//!            │   publish    │ topology + submesh + bounds
//!            └──────────────┘
//! ```
//!
//! Publish depends on both branches; `rayon::join` returns only after both
//! finished, so no reader ever sees indices from one layout with vertices
//! from another.

use std::sync::Arc;

use web_time::Instant;

use super::types::CycleStats;
use crate::buffers::{BufferState, MeshBuffers};
use crate::error::Result;
use crate::field::VertexField;
use crate::grid::GridLayout;
use crate::noise::NoiseField;
use crate::topology::{self, Topology};
use crate::types::Aabb;

/// Inputs captured at the start of a cycle.
#[derive(Clone, Debug)]
pub struct CycleInput<N: NoiseField> {
  pub frame: u64,
  pub layout: GridLayout,
  pub field: VertexField<N>,
  pub bounds: Aabb,
  /// Topology another buffer set already built, adopted when its layout
  /// matches instead of rebuilding.
  pub shared_topology: Option<Arc<Topology>>,
}

/// Run one cycle into `buffers`.
#[tracing::instrument(skip_all, name = "pipeline::run_cycle", fields(frame = input.frame))]
pub fn run_cycle<N: NoiseField>(buffers: &mut MeshBuffers, input: CycleInput<N>) -> Result<CycleStats> {
  let start = Instant::now();
  let CycleInput {
    frame,
    layout,
    field,
    bounds,
    shared_topology,
  } = input;

  let rebuilt = buffers.prepare(&layout)? == BufferState::Rebuilding;
  let shared = shared_topology.filter(|topology| rebuilt && topology.layout() == layout);
  let shared_used = shared.is_some();
  let needs_build = rebuilt && !shared_used;

  let vertices = buffers.vertices_mut();
  let (built, vertex_us) = rayon::join(
    || -> Result<(Option<Arc<Topology>>, u64)> {
      if !needs_build {
        return Ok((None, 0));
      }
      let t = Instant::now();
      let topology = topology::build(&layout)?;
      Ok((Some(Arc::new(topology)), t.elapsed().as_micros() as u64))
    },
    || {
      let t = Instant::now();
      field.fill(&layout, vertices);
      t.elapsed().as_micros() as u64
    },
  );
  let (built, topology_us) = built?;

  buffers.publish(built.or(shared), bounds);

  let stats = CycleStats {
    frame,
    rebuilt,
    shared_topology: shared_used,
    vertex_us,
    topology_us,
    total_us: start.elapsed().as_micros() as u64,
    vertex_count: layout.vertex_count(),
    index_count: layout.index_count(),
  };

  tracing::trace!(
    frame,
    rebuilt,
    vertex_us,
    topology_us,
    total_us = stats.total_us,
    "cycle complete"
  );

  Ok(stats)
}

#[cfg(test)]
#[path = "cycle_test.rs"]
mod cycle_test;
