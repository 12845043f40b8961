//! Noise field evaluation for vertex displacement.
//!
//! Every evaluator maps a 2D noise-space point plus an animation phase to a
//! scalar and its gradient with respect to both input axes:
//!
//! - [`FlowNoise`]: periodic simplex noise with rotating gradients. Value and
//!   gradient come out of a single analytic pass, and tiling on either axis
//!   makes wrapped shapes seamless.
//! - [`PerlinNoise`]: plain Perlin noise from the `noise` crate, animated
//!   through its third axis. The gradient is a central finite difference, so
//!   one sample costs five evaluations. Not periodic.
//!
//! [`NoiseSampler`] selects between the two without dynamic dispatch in the
//! vertex loop.

use glam::Vec2;

mod flow;
mod perlin;

pub use flow::FlowNoise;
pub use perlin::PerlinNoise;

/// Scalar noise value and its gradient.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct NoiseSample {
  /// Noise value, roughly in [-1, 1].
  pub value: f32,

  /// Partial derivatives with respect to the x and y input axes.
  pub gradient: Vec2,
}

/// A 2D animated noise field with gradient.
///
/// Implementations must be pure: identical inputs give identical output.
pub trait NoiseField: Send + Sync {
  /// Sample the field.
  ///
  /// - `point`: noise-space coordinate
  /// - `period`: tiling period per axis, 0 disables tiling on that axis
  /// - `phase`: animation phase (time scaled by the animation rate)
  fn sample(&self, point: Vec2, period: Vec2, phase: f32) -> NoiseSample;

  /// Value only, for callers that never read the gradient.
  #[inline]
  fn value(&self, point: Vec2, period: Vec2, phase: f32) -> f32 {
    self.sample(point, period, phase).value
  }

  /// True when `period` is honoured.
  fn is_periodic(&self) -> bool;
}

/// Which noise evaluator drives the displacement.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum NoiseKind {
  /// Periodic flow noise with analytic gradient.
  #[default]
  Flow,

  /// Non-periodic Perlin noise with finite-difference gradient.
  Perlin,
}

/// Enum dispatch over the built-in evaluators.
#[derive(Clone, Debug)]
pub enum NoiseSampler {
  Flow(FlowNoise),
  Perlin(PerlinNoise),
}

impl NoiseSampler {
  /// Build the evaluator for a noise kind. `seed` only affects Perlin noise.
  pub fn new(kind: NoiseKind, seed: u32) -> Self {
    match kind {
      NoiseKind::Flow => NoiseSampler::Flow(FlowNoise),
      NoiseKind::Perlin => NoiseSampler::Perlin(PerlinNoise::new(seed)),
    }
  }
}

impl NoiseField for NoiseSampler {
  #[inline]
  fn sample(&self, point: Vec2, period: Vec2, phase: f32) -> NoiseSample {
    match self {
      NoiseSampler::Flow(noise) => noise.sample(point, period, phase),
      NoiseSampler::Perlin(noise) => noise.sample(point, period, phase),
    }
  }

  #[inline]
  fn value(&self, point: Vec2, period: Vec2, phase: f32) -> f32 {
    match self {
      NoiseSampler::Flow(noise) => noise.value(point, period, phase),
      NoiseSampler::Perlin(noise) => noise.value(point, period, phase),
    }
  }

  fn is_periodic(&self) -> bool {
    match self {
      NoiseSampler::Flow(noise) => noise.is_periodic(),
      NoiseSampler::Perlin(noise) => noise.is_periodic(),
    }
  }
}
