//! GridConfig - validated configuration for a procedural mesh.
//!
//! All fields are private and every mutation clamps: values outside the valid
//! domain (negative sizes, zero repeat, resolutions below the shape minimum,
//! NaN or infinities) are replaced by the nearest valid minimum. A
//! `GridConfig` is therefore always safe to hand to the pipeline, and
//! configuration problems never surface as errors.

use glam::{UVec2, Vec2};

use crate::constants::{MIN_LATTICE_RESOLUTION, MIN_TUNNEL_RESOLUTION};
use crate::error::Result;
use crate::grid::GridLayout;
use crate::noise::NoiseKind;
use crate::types::{NormalMode, VertexFormat};

/// Base shape the noise displaces.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ShapeKind {
  /// Flat open grid in the XY plane, displaced along +Z.
  #[default]
  Lattice,

  /// Cylinder around the Z axis, closed around its circumference and
  /// displaced radially.
  Tunnel,
}

impl ShapeKind {
  /// Minimum columns and rows.
  pub const fn min_resolution(self) -> u32 {
    match self {
      ShapeKind::Lattice => MIN_LATTICE_RESOLUTION,
      ShapeKind::Tunnel => MIN_TUNNEL_RESOLUTION,
    }
  }

  /// True when the u axis wraps.
  pub const fn is_closed(self) -> bool {
    matches!(self, ShapeKind::Tunnel)
  }
}

/// How the bounding volume is derived from configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum BoundsPolicy {
  /// Fixed conservative box: 5·radius × 5·radius × depth for the tunnel, a
  /// large constant cube for the lattice.
  #[default]
  Fixed,

  /// Undisplaced shape extent padded by the noise amplitude.
  Padded,
}

/// Which [`MeshUpdater`](crate::pipeline::MeshUpdater) implementation drives
/// the mesh.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum UpdateStrategy {
  /// Single buffer set, each cycle completes before `advance` returns.
  #[default]
  Immediate,

  /// Ping-pong buffer sets, the next cycle computes while the renderer
  /// reads the previous one.
  Overlapped,
}

/// Configuration snapshot for one procedural mesh.
#[derive(Clone, Debug, PartialEq)]
pub struct GridConfig {
  shape: ShapeKind,
  resolution: UVec2,
  extent: Vec2,
  radius: f32,
  depth: f32,
  noise_repeat: u32,
  noise_amplitude: f32,
  noise_speed: f32,
  noise: NoiseKind,
  seed: u32,
  normal_mode: NormalMode,
  vertex_format: VertexFormat,
  bounds_policy: BoundsPolicy,
  strategy: UpdateStrategy,
  worker_threads: usize,
}

impl Default for GridConfig {
  fn default() -> Self {
    Self::lattice()
  }
}

impl GridConfig {
  pub fn new() -> Self {
    Self::default()
  }

  /// Flat lattice with flat-shaded facets and Perlin noise.
  pub fn lattice() -> Self {
    Self {
      shape: ShapeKind::Lattice,
      resolution: UVec2::splat(64),
      extent: Vec2::splat(10.0),
      radius: 1.0,
      depth: 10.0,
      noise_repeat: 4,
      noise_amplitude: 0.5,
      noise_speed: 0.5,
      noise: NoiseKind::Perlin,
      seed: 0,
      normal_mode: NormalMode::Faceted,
      vertex_format: VertexFormat::Full,
      bounds_policy: BoundsPolicy::Fixed,
      strategy: UpdateStrategy::Immediate,
      worker_threads: 0,
    }
  }

  /// Tunnel with smooth analytic normals and seamless flow noise.
  pub fn tunnel() -> Self {
    Self {
      shape: ShapeKind::Tunnel,
      resolution: UVec2::new(64, 128),
      noise_repeat: 6,
      noise_amplitude: 0.15,
      noise_speed: 1.0,
      noise: NoiseKind::Flow,
      normal_mode: NormalMode::Analytic,
      ..Self::lattice()
    }
  }

  // ===========================================================================
  // Builders
  // ===========================================================================

  pub fn with_shape(mut self, shape: ShapeKind) -> Self {
    self.set_shape(shape);
    self
  }

  pub fn with_resolution(mut self, cols: u32, rows: u32) -> Self {
    self.set_resolution(cols, rows);
    self
  }

  pub fn with_extent(mut self, x: f32, y: f32) -> Self {
    self.set_extent(x, y);
    self
  }

  pub fn with_radius(mut self, radius: f32) -> Self {
    self.set_radius(radius);
    self
  }

  pub fn with_depth(mut self, depth: f32) -> Self {
    self.set_depth(depth);
    self
  }

  pub fn with_noise_repeat(mut self, repeat: u32) -> Self {
    self.set_noise_repeat(repeat);
    self
  }

  pub fn with_noise_amplitude(mut self, amplitude: f32) -> Self {
    self.set_noise_amplitude(amplitude);
    self
  }

  pub fn with_noise_speed(mut self, speed: f32) -> Self {
    self.set_noise_speed(speed);
    self
  }

  pub fn with_noise(mut self, noise: NoiseKind) -> Self {
    self.noise = noise;
    self
  }

  pub fn with_seed(mut self, seed: u32) -> Self {
    self.seed = seed;
    self
  }

  pub fn with_normal_mode(mut self, mode: NormalMode) -> Self {
    self.normal_mode = mode;
    self
  }

  pub fn with_vertex_format(mut self, format: VertexFormat) -> Self {
    self.vertex_format = format;
    self
  }

  pub fn with_bounds_policy(mut self, policy: BoundsPolicy) -> Self {
    self.bounds_policy = policy;
    self
  }

  pub fn with_strategy(mut self, strategy: UpdateStrategy) -> Self {
    self.strategy = strategy;
    self
  }

  /// Worker threads for a dedicated pool (0 = rayon's global pool).
  pub fn with_worker_threads(mut self, threads: usize) -> Self {
    self.worker_threads = threads;
    self
  }

  // ===========================================================================
  // Clamping mutators
  // ===========================================================================

  /// Change the shape, re-clamping the resolution to its minimum.
  pub fn set_shape(&mut self, shape: ShapeKind) {
    self.shape = shape;
    self.set_resolution(self.resolution.x, self.resolution.y);
  }

  pub fn set_resolution(&mut self, cols: u32, rows: u32) {
    let min = self.shape.min_resolution();
    self.resolution = UVec2::new(cols.max(min), rows.max(min));
  }

  pub fn set_extent(&mut self, x: f32, y: f32) {
    self.extent = Vec2::new(non_negative(x), non_negative(y));
  }

  pub fn set_radius(&mut self, radius: f32) {
    self.radius = non_negative(radius);
  }

  pub fn set_depth(&mut self, depth: f32) {
    self.depth = non_negative(depth);
  }

  pub fn set_noise_repeat(&mut self, repeat: u32) {
    self.noise_repeat = repeat.max(1);
  }

  pub fn set_noise_amplitude(&mut self, amplitude: f32) {
    self.noise_amplitude = finite(amplitude);
  }

  pub fn set_noise_speed(&mut self, speed: f32) {
    self.noise_speed = finite(speed);
  }

  // ===========================================================================
  // Accessors
  // ===========================================================================

  pub fn shape(&self) -> ShapeKind {
    self.shape
  }

  /// `(cols, rows)`.
  pub fn resolution(&self) -> UVec2 {
    self.resolution
  }

  pub fn extent(&self) -> Vec2 {
    self.extent
  }

  pub fn radius(&self) -> f32 {
    self.radius
  }

  pub fn depth(&self) -> f32 {
    self.depth
  }

  pub fn noise_repeat(&self) -> u32 {
    self.noise_repeat
  }

  pub fn noise_amplitude(&self) -> f32 {
    self.noise_amplitude
  }

  pub fn noise_speed(&self) -> f32 {
    self.noise_speed
  }

  pub fn noise(&self) -> NoiseKind {
    self.noise
  }

  pub fn seed(&self) -> u32 {
    self.seed
  }

  pub fn normal_mode(&self) -> NormalMode {
    self.normal_mode
  }

  pub fn vertex_format(&self) -> VertexFormat {
    self.vertex_format
  }

  pub fn bounds_policy(&self) -> BoundsPolicy {
    self.bounds_policy
  }

  pub fn strategy(&self) -> UpdateStrategy {
    self.strategy
  }

  pub fn worker_threads(&self) -> usize {
    self.worker_threads
  }

  // ===========================================================================
  // Derived values
  // ===========================================================================

  /// Topology-defining layout for the current resolution and shading.
  pub fn layout(&self) -> Result<GridLayout> {
    GridLayout::new(
      self.resolution.x,
      self.resolution.y,
      self.shape.is_closed(),
      self.normal_mode.is_faceted(),
    )
  }

  /// Noise animation phase at `time` seconds.
  #[inline]
  pub fn phase(&self, time: f32) -> f32 {
    finite(time) * self.noise_speed
  }

  /// Tiling period in noise space: the tunnel wraps once around its
  /// circumference, the lattice does not tile.
  #[inline]
  pub fn noise_period(&self) -> Vec2 {
    match self.shape {
      ShapeKind::Tunnel => Vec2::new(self.noise_repeat as f32, 0.0),
      ShapeKind::Lattice => Vec2::ZERO,
    }
  }
}

/// Replace negative, NaN and infinite values with 0.
#[inline]
fn non_negative(value: f32) -> f32 {
  if value.is_finite() && value > 0.0 {
    value
  } else {
    0.0
  }
}

/// Replace NaN and infinite values with 0.
#[inline]
fn finite(value: f32) -> f32 {
  if value.is_finite() {
    value
  } else {
    0.0
  }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;
