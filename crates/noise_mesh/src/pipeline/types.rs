//! Pipeline I/O types.

use crate::buffers::MeshBuffers;
use crate::error::{MeshError, Result};
use crate::grid::GridLayout;
use crate::topology::Topology;
use crate::types::{Aabb, SubMesh, Vertex};

/// Timing and outcome of one update cycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CycleStats {
  /// Frame counter value the cycle computed.
  pub frame: u64,
  /// Topology was rebuilt (layout changed or first cycle).
  pub rebuilt: bool,
  /// Topology came from the other buffer set instead of a rebuild.
  pub shared_topology: bool,
  /// Vertex field job time in microseconds.
  pub vertex_us: u64,
  /// Topology build time in microseconds (0 when not rebuilt).
  pub topology_us: u64,
  /// Wall time of the whole cycle in microseconds.
  pub total_us: u64,
  /// Vertices written.
  pub vertex_count: usize,
  /// Indices in the published topology.
  pub index_count: usize,
}

/// Read-only view of a published mesh.
///
/// Borrows the updater that produced it, so the buffers it points into
/// cannot be written until the snapshot is dropped.
#[derive(Clone, Copy, Debug)]
pub struct MeshSnapshot<'a> {
  vertices: &'a [Vertex],
  topology: &'a Topology,
  bounds: Aabb,
  stats: CycleStats,
}

impl<'a> MeshSnapshot<'a> {
  /// View a published buffer set.
  pub(crate) fn new(buffers: &'a MeshBuffers, stats: CycleStats) -> Result<Self> {
    let topology = buffers
      .topology()
      .ok_or(MeshError::Unpublished { frame: stats.frame })?;
    Ok(Self {
      vertices: buffers.vertices(),
      topology,
      bounds: buffers.bounds(),
      stats,
    })
  }

  pub fn vertices(&self) -> &'a [Vertex] {
    self.vertices
  }

  pub fn topology(&self) -> &'a Topology {
    self.topology
  }

  pub fn layout(&self) -> GridLayout {
    self.topology.layout()
  }

  /// The single drawable range.
  pub fn submesh(&self) -> SubMesh {
    self.topology.submesh()
  }

  pub fn bounds(&self) -> Aabb {
    self.bounds
  }

  /// Frame the published data was computed for.
  pub fn frame(&self) -> u64 {
    self.stats.frame
  }

  /// True when the renderer must reinitialize its mesh (new layout).
  pub fn rebuilt(&self) -> bool {
    self.stats.rebuilt
  }

  pub fn stats(&self) -> CycleStats {
    self.stats
  }
}
