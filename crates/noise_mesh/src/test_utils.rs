//! Test utilities shared across module tests.
//!
//! Provides deterministic noise fields with known gradients and configuration
//! fixtures for the scenarios the pipeline is checked against.

use glam::{Vec2, Vec3};

use crate::config::GridConfig;
use crate::noise::{NoiseField, NoiseSample};
use crate::types::NormalMode;

// =============================================================================
// Mock Noise Fields
// =============================================================================

/// Linear ramp `value = slope · point`. Exact gradient, not periodic.
#[derive(Clone, Copy, Debug)]
pub struct RampNoise {
  pub slope: Vec2,
}

impl RampNoise {
  pub fn new(x: f32, y: f32) -> Self {
    Self {
      slope: Vec2::new(x, y),
    }
  }
}

impl NoiseField for RampNoise {
  fn sample(&self, point: Vec2, _period: Vec2, _phase: f32) -> NoiseSample {
    NoiseSample {
      value: self.slope.dot(point),
      gradient: self.slope,
    }
  }

  fn is_periodic(&self) -> bool {
    false
  }
}

/// Constant field with zero gradient.
#[derive(Clone, Copy, Debug)]
pub struct ConstantNoise(pub f32);

impl NoiseField for ConstantNoise {
  fn sample(&self, _point: Vec2, _period: Vec2, _phase: f32) -> NoiseSample {
    NoiseSample {
      value: self.0,
      gradient: Vec2::ZERO,
    }
  }

  fn is_periodic(&self) -> bool {
    true
  }
}

// =============================================================================
// Configuration Fixtures
// =============================================================================

/// Flat 4×4 lattice, 10×10 units, no displacement.
pub fn flat_lattice() -> GridConfig {
  GridConfig::lattice()
    .with_resolution(4, 4)
    .with_extent(10.0, 10.0)
    .with_noise_amplitude(0.0)
    .with_normal_mode(NormalMode::Analytic)
}

/// Undisplaced 8×8 tunnel of radius 1 and depth 10.
pub fn unit_tunnel() -> GridConfig {
  GridConfig::tunnel()
    .with_resolution(8, 8)
    .with_radius(1.0)
    .with_depth(10.0)
    .with_noise_amplitude(0.0)
}

/// Small animated tunnel with visible displacement.
pub fn wavy_tunnel() -> GridConfig {
  GridConfig::tunnel()
    .with_resolution(32, 24)
    .with_radius(2.0)
    .with_depth(8.0)
    .with_noise_repeat(4)
    .with_noise_amplitude(0.05)
}

// =============================================================================
// Assertions
// =============================================================================

/// Assert two vectors agree component-wise within `tolerance`.
#[track_caller]
pub fn assert_vec3_near(actual: Vec3, expected: Vec3, tolerance: f32) {
  assert!(
    (actual - expected).abs().max_element() <= tolerance,
    "expected {:?}, got {:?} (tolerance {})",
    expected,
    actual,
    tolerance
  );
}
