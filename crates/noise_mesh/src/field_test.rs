use super::*;
use crate::test_utils::*;

fn filled<N: NoiseField>(field: &VertexField<N>, layout: &GridLayout) -> Vec<Vertex> {
  let mut out = vec![Vertex::default(); layout.vertex_count()];
  field.fill(layout, &mut out);
  out
}

#[test]
fn test_fill_is_deterministic() {
  let config = wavy_tunnel();
  let layout = config.layout().unwrap();

  let first = filled(&VertexField::from_config(&config, 1.25), &layout);
  let second = filled(&VertexField::from_config(&config, 1.25), &layout);

  assert_eq!(bytemuck::cast_slice::<Vertex, u8>(&first), bytemuck::cast_slice::<Vertex, u8>(&second));
}

#[test]
fn test_fill_matches_per_vertex_sample() {
  // 7 × 11 = 77 vertices: one full batch plus a partial one
  let config = GridConfig::lattice()
    .with_resolution(7, 11)
    .with_normal_mode(NormalMode::Analytic);
  let layout = config.layout().unwrap();
  let field = VertexField::from_config(&config, 0.5);

  let out = filled(&field, &layout);
  for (i, vertex) in out.iter().enumerate() {
    let (col, row) = layout.grid_coord(i as u32);
    let (u, v) = layout.uv(col, row);
    assert_eq!(*vertex, field.sample(u, v), "Vertex {} differs", i);
  }
}

#[test]
fn test_flat_lattice_positions_and_normals() {
  let config = flat_lattice();
  let layout = config.layout().unwrap();
  let out = filled(&VertexField::from_config(&config, 3.0), &layout);

  assert_eq!(out.len(), 16);
  for (i, vertex) in out.iter().enumerate() {
    let (col, row) = layout.grid_coord(i as u32);
    let expected = Vec3::new(
      -5.0 + col as f32 * 10.0 / 3.0,
      5.0 - row as f32 * 10.0 / 3.0,
      0.0,
    );
    assert_vec3_near(vertex.position(), expected, 1e-5);
    assert_eq!(vertex.normal(), Vec3::Z);
  }
}

#[test]
fn test_flat_lattice_faceted_normals_face_up() {
  let config = flat_lattice().with_normal_mode(NormalMode::Faceted);
  let layout = config.layout().unwrap();
  let out = filled(&VertexField::from_config(&config, 0.0), &layout);

  assert_eq!(out.len(), 54);
  for vertex in &out {
    assert_vec3_near(vertex.normal(), Vec3::Z, 1e-6);
  }
}

#[test]
fn test_undisplaced_tunnel_lies_on_cylinder() {
  let config = unit_tunnel();
  let layout = config.layout().unwrap();
  let out = filled(&VertexField::from_config(&config, 0.0), &layout);

  assert_eq!(out.len(), 64);
  for vertex in &out {
    let p = vertex.position();
    assert!((p.truncate().length() - 1.0).abs() < 1e-5, "Off cylinder: {:?}", p);
    assert!((-5.0..=5.0).contains(&p.z), "Outside depth: {:?}", p);

    // Normals point toward the axis
    let inward = -Vec3::new(p.x, p.y, 0.0).normalize();
    assert_vec3_near(vertex.normal(), inward, 1e-5);
  }

  // Rows span the full depth
  assert!((out[0].position().z + 5.0).abs() < 1e-5);
  assert!((out[63].position().z - 5.0).abs() < 1e-5);
}

#[test]
fn test_tunnel_seam_is_continuous() {
  let config = wavy_tunnel().with_noise_amplitude(0.2);
  let field = VertexField::from_config(&config, 0.7);

  for step in 0..=10 {
    let v = step as f32 / 10.0;
    let start = field.sample(0.0, v);
    let end = field.sample(1.0, v);
    assert_vec3_near(start.position(), end.position(), 1e-3);
    assert_vec3_near(start.normal(), end.normal(), 1e-3);
  }
}

#[test]
fn test_tunnel_seam_is_continuous_with_finite_differences() {
  let config = wavy_tunnel()
    .with_noise_amplitude(0.2)
    .with_normal_mode(NormalMode::FiniteDifference);
  let field = VertexField::from_config(&config, 0.7);

  for step in 0..=10 {
    let v = step as f32 / 10.0;
    assert_vec3_near(field.sample(0.0, v).normal(), field.sample(1.0, v).normal(), 1e-3);
  }
}

#[test]
fn test_analytic_normals_for_linear_noise() {
  let config = flat_lattice().with_noise_amplitude(0.5).with_noise_repeat(2);
  let field = VertexField::with_noise(&config, 0.0, RampNoise::new(0.3, -0.4));

  // ∂P/∂u = (Ex, 0, A·sx·R), ∂P/∂v = (0, -Ey, A·sy·R)
  let (a, r, e) = (0.5, 2.0, 10.0);
  let expected = Vec3::new(-e * a * 0.3 * r, e * a * -0.4 * r, e * e).normalize();

  for (u, v) in [(0.0, 0.0), (0.3, 0.8), (1.0, 1.0)] {
    assert_vec3_near(field.sample(u, v).normal(), expected, 1e-5);
  }
}

#[test]
fn test_finite_difference_matches_analytic_for_linear_noise() {
  let analytic = flat_lattice().with_noise_amplitude(0.5);
  let fd = analytic.clone().with_normal_mode(NormalMode::FiniteDifference);
  let noise = RampNoise::new(0.7, 0.2);

  let a = VertexField::with_noise(&analytic, 0.0, noise);
  let b = VertexField::with_noise(&fd, 0.0, noise);
  for (u, v) in [(0.1, 0.1), (0.5, 0.5), (0.9, 0.3)] {
    assert_vec3_near(a.sample(u, v).normal(), b.sample(u, v).normal(), 1e-4);
    assert_eq!(a.sample(u, v).position(), b.sample(u, v).position());
  }
}

#[test]
fn test_finite_difference_agrees_with_analytic_on_flow_noise() {
  let analytic = wavy_tunnel();
  let fd = analytic.clone().with_normal_mode(NormalMode::FiniteDifference);
  let layout = analytic.layout().unwrap();

  let a = filled(&VertexField::from_config(&analytic, 2.0), &layout);
  let b = filled(&VertexField::from_config(&fd, 2.0), &layout);

  for (i, (x, y)) in a.iter().zip(&b).enumerate() {
    assert_vec3_near(x.position(), y.position(), 1e-5);
    let agreement = x.normal().dot(y.normal());
    assert!(agreement > 0.99, "Vertex {} normals diverge: {}", i, agreement);
  }
}

#[test]
fn test_epsilon_scales_with_repeat() {
  let coarse = VertexField::from_config(&flat_lattice().with_noise_repeat(1), 0.0);
  let fine = VertexField::from_config(&flat_lattice().with_noise_repeat(8), 0.0);
  assert_eq!(coarse.epsilon(), FD_EPSILON_FRACTION);
  assert_eq!(fine.epsilon(), FD_EPSILON_FRACTION / 8.0);
}

#[test]
fn test_faceted_triangles_share_face_normal() {
  let config = GridConfig::lattice()
    .with_resolution(6, 5)
    .with_noise_amplitude(0.3);
  let layout = config.layout().unwrap();
  let field = VertexField::from_config(&config, 1.0);
  let out = filled(&field, &layout);

  assert_eq!(out.len(), layout.vertex_count());
  for (t, triangle) in out.chunks_exact(3).enumerate() {
    let [a, b, c] = [triangle[0], triangle[1], triangle[2]];
    assert_eq!(a.normal, b.normal);
    assert_eq!(b.normal, c.normal);

    // Corners are the displaced grid points of the triangle
    for (vertex, index) in triangle.iter().zip(layout.triangle_corners(t as u32)) {
      let (col, row) = layout.grid_coord(index);
      let (u, v) = layout.uv(col, row);
      assert_eq!(vertex.position(), field.position(u, v));
    }

    // Face normal is perpendicular to both edges and points up
    let n = a.normal();
    assert!((n.dot(b.position() - a.position())).abs() < 1e-4);
    assert!((n.dot(c.position() - a.position())).abs() < 1e-4);
    assert!(n.z > 0.0);
  }
}

#[test]
fn test_constant_noise_offsets_tunnel_radius() {
  let config = unit_tunnel().with_noise_amplitude(0.5);
  let field = VertexField::with_noise(&config, 0.0, ConstantNoise(1.0));
  let layout = config.layout().unwrap();

  for vertex in filled(&field, &layout) {
    assert!((vertex.position().truncate().length() - 1.5).abs() < 1e-5);
  }
}

#[test]
fn test_phase_animates_displacement() {
  let config = wavy_tunnel();
  let a = VertexField::from_config(&config, 0.0);
  let b = VertexField::from_config(&config, 1.0);

  assert_eq!(b.phase(), config.noise_speed());
  let moved = (0..20).any(|i| {
    let u = i as f32 / 20.0;
    a.position(u, 0.4) != b.position(u, 0.4)
  });
  assert!(moved);
}
