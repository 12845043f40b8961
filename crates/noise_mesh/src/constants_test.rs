use super::*;

#[test]
fn test_coord_to_index_roundtrip() {
  for cols in [3u32, 4, 8, 17, 128] {
    for row in 0..9 {
      for col in 0..cols {
        let idx = coord_to_index(col, row, cols);
        assert_eq!(
          index_to_coord(idx, cols),
          (col, row),
          "Roundtrip failed for ({}, {}) with {} columns",
          col,
          row,
          cols
        );
      }
    }
  }
}

#[test]
fn test_index_roundtrip_from_index() {
  let cols = 7;
  for idx in 0..(cols * 11) {
    let (col, row) = index_to_coord(idx, cols);
    assert_eq!(coord_to_index(col, row, cols), idx);
  }
}

#[test]
fn test_batch_sizes() {
  assert_eq!(BATCH_SIZE, 64);
  assert!(TRIANGLE_BATCH_SIZE > 0);
  assert!(TRIANGLE_BATCH_SIZE * 3 <= BATCH_SIZE);
}

#[test]
fn test_minimum_resolutions() {
  assert!(MIN_LATTICE_RESOLUTION >= 2);
  assert!(MIN_TUNNEL_RESOLUTION >= MIN_LATTICE_RESOLUTION);
}
