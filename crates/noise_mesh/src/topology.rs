//! Grid topology builder.
//!
//! Produces the triangle index list for a [`GridLayout`]. Topology depends on
//! the layout alone, never on the animated displacement, so it is rebuilt
//! only when the layout changes and otherwise shared between frames (and
//! between ping-pong buffer sets) behind an `Arc`.
//!
//! ```text
//! Indexed layout:   triangle t → layout.triangle_corners(t)
//! Faceted layout:   triangle t → (3t, 3t + 1, 3t + 2)
//!
//! Index width:      u16 when vertex_count <= 65 536, else u32
//! ```

use crate::error::{try_reserve, Result};
use crate::grid::GridLayout;
use crate::types::SubMesh;

/// Index storage at the narrowest width that addresses every vertex.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum IndexBuffer {
  U16(Vec<u16>),
  U32(Vec<u32>),
}

impl IndexBuffer {
  pub fn len(&self) -> usize {
    match self {
      IndexBuffer::U16(indices) => indices.len(),
      IndexBuffer::U32(indices) => indices.len(),
    }
  }

  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }

  /// Index at position `i`, widened to u32.
  #[inline]
  pub fn get(&self, i: usize) -> Option<u32> {
    match self {
      IndexBuffer::U16(indices) => indices.get(i).map(|&idx| idx as u32),
      IndexBuffer::U32(indices) => indices.get(i).copied(),
    }
  }

  /// Iterate all indices widened to u32.
  pub fn iter(&self) -> impl Iterator<Item = u32> + '_ {
    (0..self.len()).filter_map(move |i| self.get(i))
  }

  /// Size in bytes of one index.
  pub fn element_size(&self) -> usize {
    match self {
      IndexBuffer::U16(_) => 2,
      IndexBuffer::U32(_) => 4,
    }
  }

  /// Raw little-endian bytes for upload.
  pub fn as_bytes(&self) -> &[u8] {
    match self {
      IndexBuffer::U16(indices) => bytemuck::cast_slice(indices),
      IndexBuffer::U32(indices) => bytemuck::cast_slice(indices),
    }
  }
}

/// Immutable topology for one layout: indices plus the single drawable range.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Topology {
  layout: GridLayout,
  indices: IndexBuffer,
  submesh: SubMesh,
}

impl Topology {
  pub fn layout(&self) -> GridLayout {
    self.layout
  }

  pub fn indices(&self) -> &IndexBuffer {
    &self.indices
  }

  pub fn submesh(&self) -> SubMesh {
    self.submesh
  }

  pub fn triangle_count(&self) -> usize {
    self.indices.len() / 3
  }
}

/// Build the topology for `layout`.
///
/// Sequential: topology changes rarely enough that the per-frame vertex job
/// dominates. Fails only if the index buffer cannot be allocated.
#[tracing::instrument(skip_all, name = "topology::build", fields(cols = layout.cols, rows = layout.rows))]
pub fn build(layout: &GridLayout) -> Result<Topology> {
  let index_count = layout.index_count();

  let indices = if layout.fits_u16() {
    let mut indices = Vec::new();
    try_reserve(&mut indices, index_count, "16-bit indices")?;
    emit(layout, |i| indices.push(i as u16));
    IndexBuffer::U16(indices)
  } else {
    let mut indices = Vec::new();
    try_reserve(&mut indices, index_count, "32-bit indices")?;
    emit(layout, |i| indices.push(i));
    IndexBuffer::U32(indices)
  };

  tracing::debug!(
    cols = layout.cols,
    rows = layout.rows,
    closed = layout.closed,
    faceted = layout.faceted,
    indices = indices.len(),
    wide = !layout.fits_u16(),
    "built topology"
  );

  Ok(Topology {
    layout: *layout,
    submesh: SubMesh {
      index_start: 0,
      index_count: indices.len() as u32,
      vertex_count: layout.vertex_count() as u32,
    },
    indices,
  })
}

/// Emit every index of the layout in triangle order.
fn emit(layout: &GridLayout, mut push: impl FnMut(u32)) {
  let triangles = layout.triangle_count() as u32;

  if layout.faceted {
    for i in 0..triangles * 3 {
      push(i);
    }
    return;
  }

  for t in 0..triangles {
    for corner in layout.triangle_corners(t) {
      push(corner);
    }
  }
}

#[cfg(test)]
#[path = "topology_test.rs"]
mod topology_test;
