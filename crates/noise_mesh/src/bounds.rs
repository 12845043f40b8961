//! Bounds estimator.
//!
//! The bounding volume comes from configuration alone, never from a reduction
//! over the vertex buffer. Both policies center the box at the origin.
//!
//! ```text
//! Fixed   lattice: LATTICE_BOUNDS_SIZE cube
//!         tunnel:  size (5r, 5r, depth)
//! Padded  lattice: half extents (Ex/2, Ey/2, |A|)
//!         tunnel:  half extents (r + |A|, r + |A|, depth/2)
//! ```
//!
//! Padded bounds assume noise values stay within [-1, 1], which holds for
//! both built-in evaluators.

use glam::Vec3;

use crate::config::{BoundsPolicy, GridConfig, ShapeKind};
use crate::constants::{LATTICE_BOUNDS_SIZE, TUNNEL_BOUNDS_RADIUS_SCALE};
use crate::types::Aabb;

/// Bounding volume for `config` under its bounds policy.
pub fn estimate(config: &GridConfig) -> Aabb {
  match config.bounds_policy() {
    BoundsPolicy::Fixed => fixed(config),
    BoundsPolicy::Padded => padded(config),
  }
}

fn fixed(config: &GridConfig) -> Aabb {
  match config.shape() {
    ShapeKind::Lattice => Aabb::from_size(Vec3::splat(LATTICE_BOUNDS_SIZE)),
    ShapeKind::Tunnel => {
      let width = config.radius() * TUNNEL_BOUNDS_RADIUS_SCALE;
      Aabb::from_size(Vec3::new(width, width, config.depth()))
    }
  }
}

fn padded(config: &GridConfig) -> Aabb {
  let pad = config.noise_amplitude().abs();
  let half_extents = match config.shape() {
    ShapeKind::Lattice => config.extent().extend(0.0) * 0.5 + Vec3::new(0.0, 0.0, pad),
    ShapeKind::Tunnel => {
      let reach = config.radius() + pad;
      Vec3::new(reach, reach, config.depth() * 0.5)
    }
  };
  Aabb::new(Vec3::ZERO, half_extents)
}

#[cfg(test)]
#[path = "bounds_test.rs"]
mod bounds_test;
