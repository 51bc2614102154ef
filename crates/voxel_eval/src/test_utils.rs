//! Fixture builders shared by unit tests.

use crate::grid::{GridConfig, VoxelGrid};
use crate::index::GlobalIndex;
use crate::voxel::{OccupancyVoxel, TsdfVoxel};

/// Surface voxel: on the surface with unit weight.
pub const SURFACE: TsdfVoxel = TsdfVoxel {
  distance: 0.0,
  weight: 1.0,
};

/// Observed free voxel far from any surface.
pub const FREE: TsdfVoxel = TsdfVoxel {
  distance: 10.0,
  weight: 1.0,
};

/// Empty TSDF grid with the given resolution.
pub fn tsdf_grid(voxel_size: f32, voxels_per_side: usize) -> VoxelGrid<TsdfVoxel> {
  VoxelGrid::new(GridConfig::new(voxel_size, voxels_per_side)).unwrap()
}

/// Empty occupancy grid with the given resolution.
pub fn occupancy_grid(voxel_size: f32, voxels_per_side: usize) -> VoxelGrid<OccupancyVoxel> {
  VoxelGrid::new(GridConfig::new(voxel_size, voxels_per_side)).unwrap()
}

/// Write `voxel` into every index of the half-open box `[min, max)`.
pub fn fill_box<V: crate::voxel::Voxel>(
  grid: &mut VoxelGrid<V>,
  min: [i64; 3],
  max: [i64; 3],
  voxel: V,
) {
  for x in min[0]..max[0] {
    for y in min[1]..max[1] {
      for z in min[2]..max[2] {
        grid.set_voxel(GlobalIndex::new(x, y, z), voxel);
      }
    }
  }
}

/// Two-block regression fixture.
///
/// Ground truth is occupied over x∈[4,12), y∈[3,6), z=0 (24 voxels across
/// two blocks); observed is occupied over x∈[5,8), y∈[2,4), z=0 (6 voxels).
pub fn regression_grids() -> (VoxelGrid<TsdfVoxel>, VoxelGrid<TsdfVoxel>) {
  let mut ground_truth = tsdf_grid(1.0, 8);
  let mut observed = tsdf_grid(1.0, 8);

  fill_box(&mut ground_truth, [4, 3, 0], [12, 6, 1], SURFACE);
  fill_box(&mut observed, [5, 2, 0], [8, 4, 1], SURFACE);

  (ground_truth, observed)
}

/// Hollow cube of surface voxels enclosing `[min, max)`.
///
/// The shell occupies the layer just outside the box, so the interior is
/// sealed under 26-connectivity.
pub fn sealed_shell(grid: &mut VoxelGrid<TsdfVoxel>, min: [i64; 3], max: [i64; 3]) {
  for x in (min[0] - 1)..=max[0] {
    for y in (min[1] - 1)..=max[1] {
      for z in (min[2] - 1)..=max[2] {
        let on_shell = x == min[0] - 1
          || x == max[0]
          || y == min[1] - 1
          || y == max[1]
          || z == min[2] - 1
          || z == max[2];
        if on_shell {
          grid.set_voxel(GlobalIndex::new(x, y, z), SURFACE);
        }
      }
    }
  }
}
