use std::collections::HashSet;

use super::*;

#[test]
fn test_neighbor_offsets_are_unique() {
  let unique: HashSet<[i64; 3]> = NEIGHBOR_OFFSETS.iter().copied().collect();
  assert_eq!(unique.len(), NEIGHBOR_COUNT);
}

#[test]
fn test_neighbor_offsets_exclude_center() {
  assert!(!NEIGHBOR_OFFSETS.contains(&[0, 0, 0]));
}

#[test]
fn test_neighbor_offsets_cover_unit_cube() {
  for x in -1..=1 {
    for y in -1..=1 {
      for z in -1..=1 {
        if (x, y, z) == (0, 0, 0) {
          continue;
        }
        assert!(
          NEIGHBOR_OFFSETS.contains(&[x, y, z]),
          "Missing neighbor offset ({}, {}, {})",
          x,
          y,
          z
        );
      }
    }
  }
}

#[test]
fn test_epsilon_value() {
  assert_eq!(OBSERVED_WEIGHT_EPSILON, 1e-6);
}
