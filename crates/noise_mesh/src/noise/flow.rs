//! Periodic simplex flow noise with analytic gradient.
//!
//! Based on the tiling, rotating-gradient simplex formulation by Gustavson &
//! McEwan ("psrdnoise", JCGT 2022, MIT licensed). Lattice points are hashed
//! after wrapping them into the period, so samples one period apart hit the
//! same gradients. The phase rotates every gradient vector by the same angle,
//! which animates the field without any visible drift.
//!
//! ```text
//! Skewed simplex grid (2D):
//!
//!     v2 ────── ...        uv = (x + y/2, y)
//!    ╱  ╲                  i0 = floor(uv), f0 = fract(uv)
//!  v0 ── v1                f0.x >= f0.y → lower triangle, else upper
//! ```
//!
//! Periods: any positive integer along x, any positive even integer along y.

use glam::{Vec2, Vec3};

use super::{NoiseField, NoiseSample};

/// Radial falloff start (r² at which a corner stops contributing).
const FALLOFF: f32 = 0.8;

/// Output scale that maps the sum to roughly [-1, 1].
const SCALE: f32 = 10.9;

/// Hash multiplier mapping [0, 289) onto gradient angles.
const ANGLE_STEP: f32 = 0.07482;

/// Periodic flow noise evaluator (stateless).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FlowNoise;

impl NoiseField for FlowNoise {
  #[inline]
  fn sample(&self, point: Vec2, period: Vec2, phase: f32) -> NoiseSample {
    flow_noise(point, period, phase)
  }

  fn is_periodic(&self) -> bool {
    true
  }
}

/// Evaluate flow noise and its gradient at `x`.
pub fn flow_noise(x: Vec2, period: Vec2, alpha: f32) -> NoiseSample {
  // Skew into the axis-aligned simplex grid
  let uv = Vec2::new(x.x + x.y * 0.5, x.y);
  let i0 = uv.floor();
  let f0 = uv - i0;

  let o1 = if f0.x >= f0.y {
    Vec2::new(1.0, 0.0)
  } else {
    Vec2::new(0.0, 1.0)
  };
  let i1 = i0 + o1;
  let i2 = i0 + Vec2::ONE;

  // Simplex corners in unskewed space
  let v0 = Vec2::new(i0.x - i0.y * 0.5, i0.y);
  let v1 = Vec2::new(v0.x + o1.x - o1.y * 0.5, v0.y + o1.y);
  let v2 = Vec2::new(v0.x + 0.5, v0.y + 1.0);

  let x0 = x - v0;
  let x1 = x - v1;
  let x2 = x - v2;

  let (iu, iv) = if period.x > 0.0 || period.y > 0.0 {
    let mut xw = Vec3::new(v0.x, v1.x, v2.x);
    let mut yw = Vec3::new(v0.y, v1.y, v2.y);
    if period.x > 0.0 {
      xw = modulo(xw, period.x);
    }
    if period.y > 0.0 {
      yw = modulo(yw, period.y);
    }
    // Back to integer lattice coordinates after wrapping
    ((xw + 0.5 * yw + 0.5).floor(), (yw + 0.5).floor())
  } else {
    (Vec3::new(i0.x, i1.x, i2.x), Vec3::new(i0.y, i1.y, i2.y))
  };

  // Permutation polynomial hash, exact in f32 for the ranges involved
  let hash = mod289(iu);
  let hash = mod289((hash * 51.0 + 2.0) * hash + iv);
  let hash = mod289((hash * 34.0 + 10.0) * hash);

  let psi = hash * ANGLE_STEP + alpha;
  let g0 = Vec2::from_angle(psi.x);
  let g1 = Vec2::from_angle(psi.y);
  let g2 = Vec2::from_angle(psi.z);

  let w = (FALLOFF - Vec3::new(x0.dot(x0), x1.dot(x1), x2.dot(x2))).max(Vec3::ZERO);
  let w2 = w * w;
  let w4 = w2 * w2;
  let gdotx = Vec3::new(g0.dot(x0), g1.dot(x1), g2.dot(x2));

  let n = w4.dot(gdotx);

  // d/dx of w^4 * (g . x) = w^4 * g - 8 * w^3 * (g . x) * x
  let w3 = w2 * w;
  let dw = -8.0 * w3 * gdotx;
  let dn0 = w4.x * g0 + dw.x * x0;
  let dn1 = w4.y * g1 + dw.y * x1;
  let dn2 = w4.z * g2 + dw.z * x2;

  NoiseSample {
    value: SCALE * n,
    gradient: SCALE * (dn0 + dn1 + dn2),
  }
}

/// Floored modulo (result has the sign of the divisor).
#[inline(always)]
fn modulo(v: Vec3, m: f32) -> Vec3 {
  v - m * (v / m).floor()
}

#[inline(always)]
fn mod289(v: Vec3) -> Vec3 {
  modulo(v, 289.0)
}
