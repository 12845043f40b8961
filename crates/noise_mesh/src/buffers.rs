//! Buffer lifecycle manager.
//!
//! A [`MeshBuffers`] set owns one live mesh: its vertex array, the topology
//! it was built for, and the bounds published with it. The cached layout
//! decides what a cycle has to do:
//!
//! ```text
//!            layout == cached                 layout != cached
//!         ┌──────────────────┐            ┌─────────────────────┐
//!   ────► │      Stable      │ ─────────► │     Rebuilding      │
//!         │ vertices in place│            │ release storage     │
//!         └──────────────────┘ ◄───────── │ reserve exact sizes │
//!                                publish  │ rebuild topology    │
//!                                         └─────────────────────┘
//! ```
//!
//! [`BufferArena`] holds two sets for ping-pong updates, selected by frame
//! parity. A set can be lent out to a worker for the duration of a cycle and
//! is returned with the result.

use std::sync::Arc;

use crate::error::{try_reserve, MeshError, Result};
use crate::grid::GridLayout;
use crate::topology::Topology;
use crate::types::{Aabb, Vertex};

/// What a buffer set must do to serve a layout.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BufferState {
  /// Cached layout matches: recompute vertices in place.
  Stable,

  /// Layout changed (or nothing built yet): reallocate and rebuild topology.
  Rebuilding,
}

/// One live mesh: vertices, shared topology and bounds.
#[derive(Debug, Default)]
pub struct MeshBuffers {
  vertices: Vec<Vertex>,
  topology: Option<Arc<Topology>>,
  bounds: Aabb,
}

impl MeshBuffers {
  pub fn new() -> Self {
    Self::default()
  }

  /// Layout of the published topology.
  pub fn layout(&self) -> Option<GridLayout> {
    self.topology.as_ref().map(|topology| topology.layout())
  }

  /// Compare the cached layout with `layout`.
  pub fn state_for(&self, layout: &GridLayout) -> BufferState {
    match self.layout() {
      Some(cached) if cached == *layout => BufferState::Stable,
      _ => BufferState::Rebuilding,
    }
  }

  pub fn vertices(&self) -> &[Vertex] {
    &self.vertices
  }

  pub fn topology(&self) -> Option<&Arc<Topology>> {
    self.topology.as_ref()
  }

  pub fn bounds(&self) -> Aabb {
    self.bounds
  }

  /// True once a topology has been published.
  pub fn is_published(&self) -> bool {
    self.topology.is_some()
  }

  /// Bytes held by vertex storage plus the topology's indices.
  pub fn memory_bytes(&self) -> usize {
    let indices = self
      .topology
      .as_ref()
      .map_or(0, |topology| topology.indices().as_bytes().len());
    self.vertices.capacity() * std::mem::size_of::<Vertex>() + indices
  }

  /// Size storage for `layout`.
  ///
  /// Stable layouts keep everything. Rebuilding drops the old storage first,
  /// then reserves exactly the new vertex count; the stale topology is
  /// withdrawn until [`publish`](Self::publish) installs the new one.
  pub(crate) fn prepare(&mut self, layout: &GridLayout) -> Result<BufferState> {
    let state = self.state_for(layout);
    if state == BufferState::Stable {
      return Ok(state);
    }

    let vertex_count = layout.vertex_count();
    self.vertices = Vec::new();
    self.topology = None;
    try_reserve(&mut self.vertices, vertex_count, "vertices")?;
    self.vertices.resize(vertex_count, Vertex::default());

    tracing::debug!(
      cols = layout.cols,
      rows = layout.rows,
      vertices = vertex_count,
      indices = layout.index_count(),
      "reallocated mesh buffers"
    );

    Ok(BufferState::Rebuilding)
  }

  /// Vertex storage for the job to write into.
  pub(crate) fn vertices_mut(&mut self) -> &mut [Vertex] {
    &mut self.vertices
  }

  /// Install the topology (when rebuilt) and this cycle's bounds.
  pub(crate) fn publish(&mut self, topology: Option<Arc<Topology>>, bounds: Aabb) {
    if let Some(topology) = topology {
      self.topology = Some(topology);
    }
    self.bounds = bounds;
  }

  /// Drop all storage. The next cycle rebuilds from scratch.
  pub fn release(&mut self) {
    if self.is_published() || self.vertices.capacity() > 0 {
      tracing::debug!(bytes = self.memory_bytes(), "released mesh buffers");
    }
    *self = Self::default();
  }
}

/// Two buffer sets used in alternation, indexed by frame parity.
#[derive(Debug)]
pub struct BufferArena {
  sets: [Option<MeshBuffers>; 2],
}

impl Default for BufferArena {
  fn default() -> Self {
    Self::new()
  }
}

impl BufferArena {
  pub fn new() -> Self {
    Self {
      sets: [Some(MeshBuffers::new()), Some(MeshBuffers::new())],
    }
  }

  /// Slot used by `frame`.
  #[inline]
  pub const fn slot(frame: u64) -> usize {
    (frame & 1) as usize
  }

  /// Buffer set in `slot`, unless it is lent out.
  pub fn get(&self, slot: usize) -> Option<&MeshBuffers> {
    self.sets[slot & 1].as_ref()
  }

  pub fn get_mut(&mut self, slot: usize) -> Option<&mut MeshBuffers> {
    self.sets[slot & 1].as_mut()
  }

  /// Take the set out of `slot` for a worker. An empty slot yields fresh
  /// buffers.
  pub fn lend(&mut self, slot: usize) -> MeshBuffers {
    self.sets[slot & 1].take().unwrap_or_default()
  }

  /// Put a lent set back.
  pub fn restore(&mut self, slot: usize, buffers: MeshBuffers) {
    self.sets[slot & 1] = Some(buffers);
  }

  /// True while the set in `slot` is lent out.
  pub fn is_lent(&self, slot: usize) -> bool {
    self.sets[slot & 1].is_none()
  }

  /// Topology published by the set in `slot`, for sharing with the other
  /// set when it rebuilds for the same layout.
  pub fn shared_topology(&self, slot: usize) -> Option<Arc<Topology>> {
    self.get(slot).and_then(|set| set.topology().cloned())
  }

  /// Published snapshot data of `slot`, or [`MeshError::Unpublished`].
  pub fn published(&self, slot: usize, frame: u64) -> Result<&MeshBuffers> {
    self
      .get(slot)
      .filter(|set| set.is_published())
      .ok_or(MeshError::Unpublished { frame })
  }

  /// Release both sets that are currently held.
  pub fn release(&mut self) {
    for set in self.sets.iter_mut().flatten() {
      set.release();
    }
  }

  pub fn memory_bytes(&self) -> usize {
    self.sets.iter().flatten().map(MeshBuffers::memory_bytes).sum()
  }
}

#[cfg(test)]
#[path = "buffers_test.rs"]
mod buffers_test;
