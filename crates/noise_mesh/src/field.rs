//! Vertex field job: displaced positions and normals for every output vertex.
//!
//! A [`VertexField`] is an immutable snapshot of everything one cycle needs
//! (shape, noise, amplitude, repeat, phase, normal mode). It is shared by
//! reference across rayon workers, and every output vertex is a pure function
//! of its index, so the batch decomposition never changes the result.
//!
//! ```text
//! Shape parameterization (u, v in [0, 1]):
//!
//!   Lattice   B(u, v) = ((u - 1/2)·Ex, (1/2 - v)·Ey, 0)       D = +Z
//!   Tunnel    B(u, v) = (r·cos 2πu, r·sin 2πu, (v - 1/2)·depth)
//!                                          D = (cos 2πu, sin 2πu, 0)
//!
//!   n(u, v) = noise((u·repeat, v·repeat), period, phase)
//!   P(u, v) = B + D · amplitude · n
//!   N(u, v) = normalize(∂P/∂v × ∂P/∂u)
//! ```
//!
//! Normals face the side from which the grid triangles wind counter-clockwise:
//! +Z for the lattice, toward the axis for the tunnel.

use glam::{Vec2, Vec3};
use rayon::prelude::*;

use crate::config::{GridConfig, ShapeKind};
use crate::constants::{BATCH_SIZE, FD_EPSILON_FRACTION, TRIANGLE_BATCH_SIZE};
use crate::grid::GridLayout;
use crate::noise::{NoiseField, NoiseSampler};
use crate::types::{NormalMode, Vertex};

const TAU: f32 = std::f32::consts::TAU;

/// Base shape with its dimensions.
#[derive(Clone, Copy, Debug, PartialEq)]
enum Shape {
  Lattice { extent: Vec2 },
  Tunnel { radius: f32, depth: f32 },
}

/// Base point, displacement direction and their parametric derivatives.
struct Frame {
  point: Vec3,
  direction: Vec3,
  d_point_du: Vec3,
  d_point_dv: Vec3,
  d_direction_du: Vec3,
}

/// Per-cycle vertex evaluator.
#[derive(Clone, Debug)]
pub struct VertexField<N: NoiseField = NoiseSampler> {
  noise: N,
  shape: Shape,
  repeat: f32,
  amplitude: f32,
  period: Vec2,
  phase: f32,
  normal_mode: NormalMode,
}

impl VertexField<NoiseSampler> {
  /// Snapshot the configuration at `time` seconds.
  pub fn from_config(config: &GridConfig, time: f32) -> Self {
    Self::with_noise(config, time, NoiseSampler::new(config.noise(), config.seed()))
  }
}

impl<N: NoiseField> VertexField<N> {
  /// Snapshot the configuration with a caller-provided noise field.
  pub fn with_noise(config: &GridConfig, time: f32, noise: N) -> Self {
    let shape = match config.shape() {
      ShapeKind::Lattice => Shape::Lattice {
        extent: config.extent(),
      },
      ShapeKind::Tunnel => Shape::Tunnel {
        radius: config.radius(),
        depth: config.depth(),
      },
    };

    Self {
      noise,
      shape,
      repeat: config.noise_repeat() as f32,
      amplitude: config.noise_amplitude(),
      period: config.noise_period(),
      phase: config.phase(time),
      normal_mode: config.normal_mode(),
    }
  }

  pub fn normal_mode(&self) -> NormalMode {
    self.normal_mode
  }

  pub fn phase(&self) -> f32 {
    self.phase
  }

  /// Parametric step used by finite-difference normals.
  #[inline]
  pub fn epsilon(&self) -> f32 {
    FD_EPSILON_FRACTION / self.repeat
  }

  #[inline]
  fn is_closed(&self) -> bool {
    matches!(self.shape, Shape::Tunnel { .. })
  }

  #[inline]
  fn noise_point(&self, u: f32, v: f32) -> Vec2 {
    Vec2::new(u * self.repeat, v * self.repeat)
  }

  #[inline]
  fn frame(&self, u: f32, v: f32) -> Frame {
    match self.shape {
      Shape::Lattice { extent } => Frame {
        point: Vec3::new((u - 0.5) * extent.x, (0.5 - v) * extent.y, 0.0),
        direction: Vec3::Z,
        d_point_du: Vec3::new(extent.x, 0.0, 0.0),
        d_point_dv: Vec3::new(0.0, -extent.y, 0.0),
        d_direction_du: Vec3::ZERO,
      },
      Shape::Tunnel { radius, depth } => {
        let (sin, cos) = (TAU * u).sin_cos();
        let direction = Vec3::new(cos, sin, 0.0);
        let d_direction_du = Vec3::new(-sin, cos, 0.0) * TAU;
        Frame {
          point: direction * radius + Vec3::new(0.0, 0.0, (v - 0.5) * depth),
          direction,
          d_point_du: d_direction_du * radius,
          d_point_dv: Vec3::new(0.0, 0.0, depth),
          d_direction_du,
        }
      }
    }
  }

  /// Displaced position at `(u, v)`.
  #[inline]
  pub fn position(&self, u: f32, v: f32) -> Vec3 {
    let frame = self.frame(u, v);
    let n = self.noise.value(self.noise_point(u, v), self.period, self.phase);
    frame.point + frame.direction * (self.amplitude * n)
  }

  /// Vertex at `(u, v)` with a smooth normal.
  ///
  /// `Faceted` has no per-point normal and falls back to the analytic one;
  /// faceted output goes through [`fill`](Self::fill).
  #[inline]
  pub fn sample(&self, u: f32, v: f32) -> Vertex {
    match self.normal_mode {
      NormalMode::FiniteDifference => {
        Vertex::new(self.position(u, v), self.finite_difference_normal(u, v))
      }
      NormalMode::Analytic | NormalMode::Faceted => self.analytic_sample(u, v),
    }
  }

  #[inline]
  fn analytic_sample(&self, u: f32, v: f32) -> Vertex {
    let frame = self.frame(u, v);
    let n = self
      .noise
      .sample(self.noise_point(u, v), self.period, self.phase);

    let displacement = self.amplitude * n.value;
    let position = frame.point + frame.direction * displacement;

    // Chain rule through the frequency scale: d/du noise(u·repeat) = g.x·repeat
    let dn = n.gradient * (self.amplitude * self.repeat);
    let tangent_u = frame.d_point_du + frame.d_direction_du * displacement + frame.direction * dn.x;
    let tangent_v = frame.d_point_dv + frame.direction * dn.y;

    Vertex::new(position, tangent_v.cross(tangent_u).normalize_or_zero())
  }

  #[inline]
  fn finite_difference_normal(&self, u: f32, v: f32) -> Vec3 {
    let e = self.epsilon();
    let (u_minus, u_plus) = if self.is_closed() {
      ((u - e).rem_euclid(1.0), (u + e).rem_euclid(1.0))
    } else {
      (u - e, u + e)
    };

    let tangent_u = self.position(u_plus, v) - self.position(u_minus, v);
    let tangent_v = self.position(u, v + e) - self.position(u, v - e);
    tangent_v.cross(tangent_u).normalize_or_zero()
  }

  /// Fill `out` with every vertex of `layout`.
  ///
  /// `out.len()` must equal `layout.vertex_count()`.
  #[tracing::instrument(skip_all, name = "field::fill", fields(vertices = out.len()))]
  pub fn fill(&self, layout: &GridLayout, out: &mut [Vertex]) {
    debug_assert_eq!(out.len(), layout.vertex_count());

    if layout.faceted {
      self.fill_faceted(layout, out);
      return;
    }

    out
      .par_chunks_mut(BATCH_SIZE)
      .enumerate()
      .for_each(|(batch, chunk)| {
        let base = batch * BATCH_SIZE;
        for (offset, vertex) in chunk.iter_mut().enumerate() {
          let (col, row) = layout.grid_coord((base + offset) as u32);
          let (u, v) = layout.uv(col, row);
          *vertex = self.sample(u, v);
        }
      });
  }

  /// Three private vertices per triangle sharing the face normal.
  fn fill_faceted(&self, layout: &GridLayout, out: &mut [Vertex]) {
    out
      .par_chunks_mut(3)
      .with_min_len(TRIANGLE_BATCH_SIZE)
      .enumerate()
      .for_each(|(t, triangle)| {
        let corners = layout.triangle_corners(t as u32).map(|index| {
          let (col, row) = layout.grid_coord(index);
          let (u, v) = layout.uv(col, row);
          self.position(u, v)
        });

        let normal = (corners[1] - corners[0])
          .cross(corners[2] - corners[0])
          .normalize_or_zero();

        for (vertex, position) in triangle.iter_mut().zip(corners) {
          *vertex = Vertex::new(position, normal);
        }
      });
  }
}

#[cfg(test)]
#[path = "field_test.rs"]
mod field_test;
