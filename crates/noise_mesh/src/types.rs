//! Core data types shared by the vertex job, topology builder and
//! presentation.

use bytemuck::{Pod, Zeroable};
use glam::Vec3;

/// Normal computation mode for the vertex job.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub enum NormalMode {
  /// Tangents from the shape derivatives plus the analytic noise gradient.
  #[default]
  Analytic,

  /// Tangents from four displaced neighbours at ±epsilon along each
  /// parametric axis.
  FiniteDifference,

  /// One normal per triangle from its three displaced corners.
  /// Uses the unindexed layout (three private vertices per triangle).
  Faceted,
}

impl NormalMode {
  /// True when every triangle owns its vertices.
  #[inline]
  pub fn is_faceted(self) -> bool {
    matches!(self, NormalMode::Faceted)
  }
}

/// Vertex packing handed to the renderer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum VertexFormat {
  /// Position and normal as 3×f32 each.
  #[default]
  Full,

  /// Position as 3×f32, normal as signed-normalized 4×i8.
  CompactNormal,
}

impl VertexFormat {
  /// Size in bytes of one packed vertex.
  pub const fn stride(self) -> usize {
    match self {
      VertexFormat::Full => std::mem::size_of::<Vertex>(),
      VertexFormat::CompactNormal => std::mem::size_of::<CompactVertex>(),
    }
  }
}

/// Output vertex with full precision attributes.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Default, Pod, Zeroable)]
pub struct Vertex {
  /// Object-space position.
  pub position: [f32; 3],

  /// Surface normal (unit vector unless the tangent frame is degenerate).
  pub normal: [f32; 3],
}

impl Vertex {
  #[inline]
  pub fn new(position: Vec3, normal: Vec3) -> Self {
    Self {
      position: position.to_array(),
      normal: normal.to_array(),
    }
  }

  #[inline]
  pub fn position(&self) -> Vec3 {
    Vec3::from_array(self.position)
  }

  #[inline]
  pub fn normal(&self) -> Vec3 {
    Vec3::from_array(self.normal)
  }
}

/// Vertex with a snorm8x4 normal (w is always 0).
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Default, Pod, Zeroable)]
pub struct CompactVertex {
  pub position: [f32; 3],
  pub normal: [i8; 4],
}

impl CompactVertex {
  /// Pack a full precision vertex. The position is copied untouched.
  #[inline]
  pub fn pack(vertex: &Vertex) -> Self {
    Self {
      position: vertex.position,
      normal: [
        snorm8(vertex.normal[0]),
        snorm8(vertex.normal[1]),
        snorm8(vertex.normal[2]),
        0,
      ],
    }
  }

  #[inline]
  pub fn position(&self) -> Vec3 {
    Vec3::from_array(self.position)
  }

  /// Decode the normal back to floats (not renormalized).
  #[inline]
  pub fn normal(&self) -> Vec3 {
    Vec3::new(
      self.normal[0] as f32 / 127.0,
      self.normal[1] as f32 / 127.0,
      self.normal[2] as f32 / 127.0,
    )
  }
}

#[inline(always)]
fn snorm8(value: f32) -> i8 {
  (value.clamp(-1.0, 1.0) * 127.0).round() as i8
}

/// Axis-aligned bounding box stored as center and half-extents.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Aabb {
  pub center: [f32; 3],
  pub half_extents: [f32; 3],
}

impl Aabb {
  pub fn new(center: Vec3, half_extents: Vec3) -> Self {
    Self {
      center: center.to_array(),
      half_extents: half_extents.to_array(),
    }
  }

  /// Box centered at the origin from its full size.
  pub fn from_size(size: Vec3) -> Self {
    Self::new(Vec3::ZERO, size * 0.5)
  }

  pub fn min(&self) -> Vec3 {
    Vec3::from_array(self.center) - Vec3::from_array(self.half_extents)
  }

  pub fn max(&self) -> Vec3 {
    Vec3::from_array(self.center) + Vec3::from_array(self.half_extents)
  }

  pub fn size(&self) -> Vec3 {
    Vec3::from_array(self.half_extents) * 2.0
  }

  /// Inclusive containment test with a small tolerance.
  pub fn contains(&self, point: Vec3, tolerance: f32) -> bool {
    let min = self.min() - Vec3::splat(tolerance);
    let max = self.max() + Vec3::splat(tolerance);
    point.cmpge(min).all() && point.cmple(max).all()
  }
}

/// A contiguous drawable range of the index buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct SubMesh {
  /// First index of the range.
  pub index_start: u32,

  /// Number of indices in the range.
  pub index_count: u32,

  /// Number of vertices referenced by the range.
  pub vertex_count: u32,
}

impl SubMesh {
  pub fn triangle_count(&self) -> u32 {
    self.index_count / 3
  }
}

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;
