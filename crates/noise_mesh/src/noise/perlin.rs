//! Perlin noise with a finite-difference gradient.

use glam::Vec2;
use noise::{NoiseFn, Perlin};

use super::{NoiseField, NoiseSample};
use crate::constants::NOISE_GRADIENT_STEP;

/// Non-periodic Perlin noise. The phase is used as the third coordinate, so
/// the field morphs over time instead of scrolling.
#[derive(Clone)]
pub struct PerlinNoise {
  perlin: Perlin,
  seed: u32,
}

impl PerlinNoise {
  pub fn new(seed: u32) -> Self {
    Self {
      perlin: Perlin::new(seed),
      seed,
    }
  }

  pub fn seed(&self) -> u32 {
    self.seed
  }

  #[inline(always)]
  fn value_at(&self, x: f64, y: f64, z: f64) -> f64 {
    self.perlin.get([x, y, z])
  }
}

impl std::fmt::Debug for PerlinNoise {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("PerlinNoise").field("seed", &self.seed).finish()
  }
}

impl NoiseField for PerlinNoise {
  fn sample(&self, point: Vec2, _period: Vec2, phase: f32) -> NoiseSample {
    let (x, y, z) = (point.x as f64, point.y as f64, phase as f64);
    let h = NOISE_GRADIENT_STEP;

    let value = self.value_at(x, y, z);
    let dx = (self.value_at(x + h, y, z) - self.value_at(x - h, y, z)) / (2.0 * h);
    let dy = (self.value_at(x, y + h, z) - self.value_at(x, y - h, z)) / (2.0 * h);

    NoiseSample {
      value: value as f32,
      gradient: Vec2::new(dx as f32, dy as f32),
    }
  }

  fn value(&self, point: Vec2, _period: Vec2, phase: f32) -> f32 {
    self.value_at(point.x as f64, point.y as f64, phase as f64) as f32
  }

  fn is_periodic(&self) -> bool {
    false
  }
}
