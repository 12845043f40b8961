use super::*;

fn layout(cols: u32, rows: u32, closed: bool) -> GridLayout {
  GridLayout::new(cols, rows, closed, false).unwrap()
}

fn triangles(topology: &Topology) -> Vec<[u32; 3]> {
  let indices: Vec<u32> = topology.indices().iter().collect();
  indices.chunks_exact(3).map(|t| [t[0], t[1], t[2]]).collect()
}

#[test]
fn test_open_triangle_count() {
  for (cols, rows) in [(3, 3), (4, 4), (10, 3), (33, 17)] {
    let topology = build(&layout(cols, rows, false)).unwrap();
    let expected = 2 * (cols - 1) * (rows - 1);
    assert_eq!(topology.triangle_count(), expected as usize);
    assert_eq!(topology.submesh().triangle_count(), expected);
  }
}

#[test]
fn test_closed_triangle_count() {
  for (cols, rows) in [(8, 8), (9, 8), (32, 20)] {
    let topology = build(&layout(cols, rows, true)).unwrap();
    let expected = 2 * cols * (rows - 1);
    assert_eq!(topology.triangle_count(), expected as usize);
  }
}

#[test]
fn test_indices_distinct_and_in_range() {
  for l in [layout(4, 4, false), layout(8, 8, true), layout(17, 9, true)] {
    let topology = build(&l).unwrap();
    let vertex_count = l.vertex_count() as u32;
    for [a, b, c] in triangles(&topology) {
      assert!(a < vertex_count && b < vertex_count && c < vertex_count);
      assert!(a != b && b != c && a != c);
    }
  }
}

#[test]
fn test_rebuild_is_byte_identical() {
  for l in [layout(12, 7, false), layout(8, 8, true), layout(300, 300, false)] {
    let first = build(&l).unwrap();
    let second = build(&l).unwrap();
    assert_eq!(first.indices().as_bytes(), second.indices().as_bytes());
    assert_eq!(first, second);
  }
}

#[test]
fn test_every_vertex_is_referenced() {
  for l in [layout(5, 4, false), layout(8, 3, true)] {
    let topology = build(&l).unwrap();
    let mut used = vec![false; l.vertex_count()];
    for idx in topology.indices().iter() {
      used[idx as usize] = true;
    }
    assert!(used.iter().all(|&u| u), "Unreferenced vertex in {:?}", l);
  }
}

#[test]
fn test_closed_topology_uses_wrapped_edges() {
  let l = layout(8, 4, true);
  let topology = build(&l).unwrap();

  // Every row must contain a triangle spanning column 7 → column 0
  for row in 0..3 {
    let last = l.grid_index(7, row);
    let first = l.grid_index(0, row);
    assert!(
      triangles(&topology)
        .iter()
        .any(|t| t.contains(&last) && t.contains(&first)),
      "Row {} missing wraparound cell",
      row
    );
  }
}

#[test]
fn test_shared_edges_have_opposite_winding() {
  // In a consistently wound manifold each interior edge appears once in each
  // direction.
  use std::collections::HashMap;

  for l in [layout(6, 5, false), layout(8, 5, true)] {
    let topology = build(&l).unwrap();
    let mut edges: HashMap<(u32, u32), u32> = HashMap::new();
    for [a, b, c] in triangles(&topology) {
      for edge in [(a, b), (b, c), (c, a)] {
        *edges.entry(edge).or_default() += 1;
      }
    }
    for (&(a, b), &count) in &edges {
      assert_eq!(count, 1, "Directed edge ({}, {}) used twice", a, b);
    }
  }
}

#[test]
fn test_faceted_indices_are_sequential() {
  let l = GridLayout::new(4, 4, false, true).unwrap();
  let topology = build(&l).unwrap();

  assert_eq!(topology.indices().len(), l.vertex_count());
  for (i, idx) in topology.indices().iter().enumerate() {
    assert_eq!(idx as usize, i);
  }
}

#[test]
fn test_index_width_follows_vertex_count() {
  let small = build(&layout(256, 256, false)).unwrap();
  assert!(matches!(small.indices(), IndexBuffer::U16(_)));
  assert_eq!(small.indices().element_size(), 2);

  let large = build(&layout(257, 256, false)).unwrap();
  assert!(matches!(large.indices(), IndexBuffer::U32(_)));
  assert_eq!(large.indices().as_bytes().len(), large.indices().len() * 4);
}

#[test]
fn test_submesh_covers_all_indices() {
  let l = layout(9, 9, true);
  let topology = build(&l).unwrap();
  let submesh = topology.submesh();

  assert_eq!(submesh.index_start, 0);
  assert_eq!(submesh.index_count as usize, topology.indices().len());
  assert_eq!(submesh.vertex_count as usize, l.vertex_count());
}
