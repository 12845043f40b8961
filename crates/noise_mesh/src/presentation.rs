//! Presentation - byte packing and the renderer seam.
//!
//! The pipeline hands out borrowed [`MeshSnapshot`]s. Engine bridges that
//! need owned, FFI-friendly data pack them into [`MeshData`]; renderers
//! implement [`MeshConsumer`] to receive each frame's mesh without this
//! crate depending on any engine.

use crate::config::GridConfig;
use crate::error::{try_reserve, Result};
use crate::pipeline::{CycleStats, MeshSnapshot, MeshUpdater};
use crate::types::{Aabb, CompactVertex, SubMesh, VertexFormat};

/// Byte-level mesh data ready for FFI to game engines.
#[derive(Clone)]
pub struct MeshData {
  /// Vertex data as raw bytes in `format` layout.
  pub vertices: Vec<u8>,

  /// Index data as raw bytes (`index_size` bytes per index).
  pub indices: Vec<u8>,

  /// Vertex packing of `vertices`.
  pub format: VertexFormat,

  /// Bytes per index: 2 or 4.
  pub index_size: usize,

  /// The single drawable range.
  pub submesh: SubMesh,

  /// Mesh bounding box.
  pub bounds: Aabb,

  /// Frame the data was computed for.
  pub frame: u64,

  /// Layout changed: reinitialize vertex and index descriptors.
  pub rebuilt: bool,
}

impl MeshData {
  /// Pack a snapshot into owned bytes.
  pub fn pack(snapshot: &MeshSnapshot<'_>, format: VertexFormat) -> Result<Self> {
    let source = snapshot.vertices();

    let mut vertices = Vec::new();
    try_reserve(&mut vertices, source.len() * format.stride(), "vertex bytes")?;
    match format {
      VertexFormat::Full => vertices.extend_from_slice(bytemuck::cast_slice(source)),
      VertexFormat::CompactNormal => {
        for vertex in source {
          vertices.extend_from_slice(bytemuck::bytes_of(&CompactVertex::pack(vertex)));
        }
      }
    }

    let index_buffer = snapshot.topology().indices();
    let mut indices = Vec::new();
    try_reserve(&mut indices, index_buffer.as_bytes().len(), "index bytes")?;
    indices.extend_from_slice(index_buffer.as_bytes());

    Ok(Self {
      vertices,
      indices,
      format,
      index_size: index_buffer.element_size(),
      submesh: snapshot.submesh(),
      bounds: snapshot.bounds(),
      frame: snapshot.frame(),
      rebuilt: snapshot.rebuilt(),
    })
  }

  pub fn vertex_count(&self) -> usize {
    self.vertices.len() / self.format.stride()
  }

  pub fn index_count(&self) -> usize {
    self.indices.len() / self.index_size
  }
}

impl std::fmt::Debug for MeshData {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("MeshData")
      .field("vertex_count", &self.vertex_count())
      .field("index_count", &self.index_count())
      .field("format", &self.format)
      .field("bounds", &self.bounds)
      .field("frame", &self.frame)
      .finish()
  }
}

/// Callback interface for renderers and engine bridges.
///
/// # Example
///
/// ```ignore
/// struct EngineMesh {
///     handle: MeshHandle,
/// }
///
/// impl MeshConsumer for EngineMesh {
///     fn on_mesh_ready(&mut self, snapshot: &MeshSnapshot<'_>) -> Result<()> {
///         if snapshot.rebuilt() {
///             self.handle.reinitialize(snapshot.layout());
///         }
///         self.handle.upload(snapshot.vertices(), snapshot.topology().indices());
///         Ok(())
///     }
///     // ...
/// }
/// ```
pub trait MeshConsumer {
  /// Called once per frame with the mesh to draw.
  fn on_mesh_ready(&mut self, snapshot: &MeshSnapshot<'_>) -> Result<()>;

  /// Called when the owning object releases its buffers.
  fn on_mesh_released(&mut self);
}

/// No-op implementation for testing and headless operation.
pub struct NullConsumer;

impl MeshConsumer for NullConsumer {
  fn on_mesh_ready(&mut self, _snapshot: &MeshSnapshot<'_>) -> Result<()> {
    // No-op
    Ok(())
  }

  fn on_mesh_released(&mut self) {
    // No-op
  }
}

/// Packs every frame into [`MeshData`] and keeps the latest.
#[derive(Debug, Default)]
pub struct PackingConsumer {
  format: VertexFormat,
  latest: Option<MeshData>,
}

impl PackingConsumer {
  pub fn new(format: VertexFormat) -> Self {
    Self {
      format,
      latest: None,
    }
  }

  /// Pack in the vertex format the configuration selects.
  pub fn from_config(config: &GridConfig) -> Self {
    Self::new(config.vertex_format())
  }

  pub fn format(&self) -> VertexFormat {
    self.format
  }

  pub fn latest(&self) -> Option<&MeshData> {
    self.latest.as_ref()
  }

  pub fn take(&mut self) -> Option<MeshData> {
    self.latest.take()
  }
}

impl MeshConsumer for PackingConsumer {
  fn on_mesh_ready(&mut self, snapshot: &MeshSnapshot<'_>) -> Result<()> {
    self.latest = Some(MeshData::pack(snapshot, self.format)?);
    Ok(())
  }

  fn on_mesh_released(&mut self) {
    self.latest = None;
  }
}

/// One host tick: advance the updater and hand the result to `consumer`.
pub fn present(
  updater: &mut dyn MeshUpdater,
  consumer: &mut dyn MeshConsumer,
  time: f32,
  config: &GridConfig,
) -> Result<CycleStats> {
  let snapshot = updater.advance(time, config)?;
  consumer.on_mesh_ready(&snapshot)?;
  Ok(snapshot.stats())
}

/// Tear down both sides.
pub fn release(updater: &mut dyn MeshUpdater, consumer: &mut dyn MeshConsumer) {
  updater.release();
  consumer.on_mesh_released();
}

#[cfg(test)]
#[path = "presentation_test.rs"]
mod presentation_test;
