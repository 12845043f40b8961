use super::*;
use crate::test_utils::*;
use crate::types::{NormalMode, Vertex};

#[test]
fn test_advance_returns_current_frame() {
  let mut updater = ImmediateUpdater::new(TaskExecutor::global());
  let config = wavy_tunnel();

  for frame in 0..3 {
    let snapshot = updater.advance(frame as f32 * 0.1, &config).unwrap();
    assert_eq!(snapshot.frame(), frame);
    assert_eq!(snapshot.rebuilt(), frame == 0);
  }
  assert_eq!(updater.frames(), 3);
}

#[test]
fn test_snapshot_matches_direct_fill() {
  let mut updater = ImmediateUpdater::new(TaskExecutor::global());
  let config = wavy_tunnel();
  let layout = config.layout().unwrap();

  let mut expected = vec![Vertex::default(); layout.vertex_count()];
  VertexField::from_config(&config, 1.5).fill(&layout, &mut expected);

  let snapshot = updater.advance(1.5, &config).unwrap();
  assert_eq!(snapshot.vertices(), expected.as_slice());
  assert_eq!(snapshot.layout(), layout);
  assert_eq!(snapshot.submesh().index_count as usize, layout.index_count());
  assert_eq!(snapshot.bounds(), bounds::estimate(&config));
}

#[test]
fn test_resize_between_frames() {
  let mut updater = ImmediateUpdater::new(TaskExecutor::global());
  let big = GridConfig::lattice()
    .with_resolution(128, 128)
    .with_normal_mode(NormalMode::Analytic);
  let small = big.clone().with_resolution(64, 64);

  {
    let snapshot = updater.advance(0.0, &big).unwrap();
    assert_eq!(snapshot.vertices().len(), 128 * 128);
    assert_eq!(snapshot.topology().indices().len(), 2 * 127 * 127 * 3);
  }

  let snapshot = updater.advance(0.016, &small).unwrap();
  assert!(snapshot.rebuilt());
  assert_eq!(snapshot.vertices().len(), 64 * 64);
  assert_eq!(snapshot.topology().indices().len(), 2 * 63 * 63 * 3);
}

#[test]
fn test_dedicated_pool_produces_same_mesh() {
  let config = wavy_tunnel();
  let mut global = ImmediateUpdater::new(TaskExecutor::global());
  let mut pooled = ImmediateUpdater::new(TaskExecutor::with_threads(2).unwrap());

  let a = global.advance(0.3, &config).unwrap().vertices().to_vec();
  let b = pooled.advance(0.3, &config).unwrap().vertices().to_vec();
  assert_eq!(a, b);
}

#[test]
fn test_release_then_advance_rebuilds() {
  let mut updater = ImmediateUpdater::new(TaskExecutor::global());
  let config = flat_lattice();

  updater.advance(0.0, &config).unwrap();
  updater.release();
  assert!(!updater.buffers().is_published());
  assert_eq!(updater.buffers().memory_bytes(), 0);

  let snapshot = updater.advance(0.1, &config).unwrap();
  assert!(snapshot.rebuilt());
  assert_eq!(snapshot.vertices().len(), 16);
}
