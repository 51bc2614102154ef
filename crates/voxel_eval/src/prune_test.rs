use glam::Vec3;

use super::*;
use crate::set_ops::collect_occupied_voxels;
use crate::test_utils::*;
use crate::voxel::{OccupancyVoxel, TsdfVoxel};

fn idx(x: i64, y: i64, z: i64) -> GlobalIndex {
  GlobalIndex::new(x, y, z)
}

// =========================================================================
// Interior pruning
// =========================================================================

#[test]
fn test_prune_interior_removes_only_negative_occupied() {
  let mut layer = tsdf_grid(1.0, 8);
  layer.set_voxel(idx(0, 0, 0), TsdfVoxel::new(-2.0, 1.0)); // inside
  layer.set_voxel(idx(1, 0, 0), TsdfVoxel::new(0.0, 1.0)); // surface
  layer.set_voxel(idx(2, 0, 0), TsdfVoxel::new(-2.0, 0.0)); // unobserved
  layer.set_voxel(idx(3, 0, 0), TsdfVoxel::new(5.0, 1.0)); // free

  let input: IndexSet = (0..5).map(|x| idx(x, 0, 0)).collect();
  let kept = prune_interior_voxels(&layer, &input);

  assert_eq!(kept.len(), 4);
  assert!(!kept.contains(&idx(0, 0, 0)));
  assert!(kept.contains(&idx(4, 0, 0)), "absent voxels are kept");
}

#[test]
fn test_prune_interior_never_grows_and_removals_are_interior() {
  let mut layer = tsdf_grid(1.0, 8);
  // Solid slab: outer layer on the surface, core inside.
  fill_box(&mut layer, [0, 0, 0], [6, 6, 6], TsdfVoxel::new(0.0, 1.0));
  fill_box(&mut layer, [1, 1, 1], [5, 5, 5], TsdfVoxel::new(-1.0, 1.0));

  let occupied = collect_occupied_voxels(&layer);
  let kept = prune_interior_voxels(&layer, &occupied);

  assert!(kept.len() <= occupied.len());
  assert_eq!(occupied.len() - kept.len(), 64);
  for removed in occupied.iter().filter(|i| !kept.contains(i)) {
    let voxel = layer.voxel_at(*removed).unwrap();
    assert_eq!(classify(voxel, 1.0), VoxelState::Occupied);
    assert!(voxel.distance < 0.0);
  }
}

#[test]
fn test_prune_interior_ignores_occupancy_voxels() {
  let mut layer = occupancy_grid(1.0, 8);
  layer.set_voxel(idx(0, 0, 0), OccupancyVoxel::from_probability(0.99, 1.0));
  let input: IndexSet = [idx(0, 0, 0)].into_iter().collect();

  assert_eq!(prune_interior_voxels(&layer, &input), input);
}

// =========================================================================
// Bounding-box pruning
// =========================================================================

fn offset_layer() -> crate::grid::VoxelGrid<TsdfVoxel> {
  // Occupied voxels well away from the origin.
  let mut layer = tsdf_grid(1.0, 8);
  fill_box(&mut layer, [10, 10, 10], [13, 12, 11], SURFACE);
  layer
}

#[test]
fn test_first_occupied_bounds_are_tight() {
  let bounds = occupied_bounds(&offset_layer(), BoundsSeed::FirstOccupied).unwrap();
  assert_eq!(bounds.min, Vec3::new(10.5, 10.5, 10.5));
  assert_eq!(bounds.max, Vec3::new(12.5, 11.5, 10.5));
}

/// Origin seeding always stretches the box to the origin.
#[test]
fn test_origin_seed_includes_origin() {
  let bounds = occupied_bounds(&offset_layer(), BoundsSeed::Origin).unwrap();
  assert_eq!(bounds.min, Vec3::ZERO);
  assert_eq!(bounds.max, Vec3::new(12.5, 11.5, 10.5));
}

/// The two seeds disagree for voxels between the origin and the data.
#[test]
fn test_seed_choice_changes_result() {
  let layer = offset_layer();
  let input: IndexSet = [idx(2, 2, 2), idx(11, 11, 10), idx(20, 0, 0)].into_iter().collect();

  let legacy = prune_out_of_bounds(&layer, &input, BoundsSeed::Origin);
  let tight = prune_out_of_bounds(&layer, &input, BoundsSeed::FirstOccupied);

  assert_eq!(legacy.to_sorted_vec(), vec![idx(2, 2, 2), idx(11, 11, 10)]);
  assert_eq!(tight.to_sorted_vec(), vec![idx(11, 11, 10)]);
}

#[test]
fn test_out_of_bounds_empty_layer_is_deterministic() {
  let layer = tsdf_grid(1.0, 8);
  let input: IndexSet = [idx(0, 0, 0), idx(-1, -1, -1), idx(3, 0, 0)].into_iter().collect();

  // No box at all: everything is pruned.
  assert!(prune_out_of_bounds(&layer, &input, BoundsSeed::FirstOccupied).is_empty());

  // Origin point box: no voxel center sits exactly on the origin.
  let legacy = prune_out_of_bounds(&layer, &input, BoundsSeed::Origin);
  assert!(legacy.is_empty());
  assert_eq!(legacy, prune_out_of_bounds(&layer, &input, BoundsSeed::Origin));
}

#[test]
fn test_out_of_bounds_ignores_free_voxels() {
  let mut layer = offset_layer();
  layer.set_voxel(idx(30, 30, 30), FREE);

  let bounds = occupied_bounds(&layer, BoundsSeed::FirstOccupied).unwrap();
  assert_eq!(bounds.max, Vec3::new(12.5, 11.5, 10.5));
}

// =========================================================================
// Observed / unobserved split
// =========================================================================

#[test]
fn test_split_observed_vs_unobserved() {
  let mut layer = tsdf_grid(1.0, 8);
  layer.set_voxel(idx(0, 0, 0), SURFACE);
  layer.set_voxel(idx(1, 0, 0), FREE);
  layer.set_voxel(idx(2, 0, 0), TsdfVoxel::default());

  let input: IndexSet = [idx(0, 0, 0), idx(1, 0, 0), idx(2, 0, 0), idx(100, 0, 0)]
    .into_iter()
    .collect();
  let split = split_observed_vs_unobserved(&layer, &input);

  assert_eq!(split.observed.to_sorted_vec(), vec![idx(0, 0, 0), idx(1, 0, 0)]);
  assert_eq!(split.unobserved.to_sorted_vec(), vec![idx(2, 0, 0), idx(100, 0, 0)]);
  assert_eq!(split.observed.len() + split.unobserved.len(), input.len());
}
