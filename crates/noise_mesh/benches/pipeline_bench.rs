//! Update strategy benchmarks.
//!
//! Compares per-frame cost seen by the caller:
//! - **Immediate**: full cycle on the calling thread
//! - **Overlapped**: wait for the previous cycle, launch the next
//!
//! Also measures topology rebuilds, which only happen on layout changes.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use noise_mesh::{create_updater, topology, GridConfig, NormalMode, UpdateStrategy};

fn bench_strategies(c: &mut Criterion) {
  let mut group = c.benchmark_group("advance_tunnel_64x128");
  let base = GridConfig::tunnel().with_normal_mode(NormalMode::Analytic);
  group.throughput(Throughput::Elements(
    base.layout().expect("bench layout").vertex_count() as u64,
  ));

  for strategy in [UpdateStrategy::Immediate, UpdateStrategy::Overlapped] {
    let config = base.clone().with_strategy(strategy);
    let mut updater = create_updater(&config).expect("bench updater");
    let mut time = 0.0f32;

    group.bench_function(format!("{strategy:?}"), |b| {
      b.iter(|| {
        time += 1.0 / 60.0;
        let snapshot = updater.advance(black_box(time), &config).expect("advance");
        black_box(snapshot.vertices().len())
      })
    });

    updater.release();
  }

  group.finish();
}

fn bench_topology_build(c: &mut Criterion) {
  let mut group = c.benchmark_group("topology_build");

  for size in [64u32, 128, 256, 512] {
    let layout = GridConfig::lattice()
      .with_resolution(size, size)
      .with_normal_mode(NormalMode::Analytic)
      .layout()
      .expect("bench layout");
    group.throughput(Throughput::Elements(layout.index_count() as u64));

    group.bench_with_input(BenchmarkId::from_parameter(size), &layout, |b, layout| {
      b.iter(|| black_box(topology::build(layout).expect("topology").triangle_count()))
    });
  }

  group.finish();
}

criterion_group!(benches, bench_strategies, bench_topology_build);
criterion_main!(benches);
