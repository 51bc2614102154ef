//! Voxel and block addressing on the infinite integer lattice.
//!
//! Three equivalent addresses exist for every voxel:
//!
//! - [`GlobalIndex`]: lattice coordinate, unique across the whole grid
//! - [`BlockIndex`] + [`VoxelIndex`]: owning block and local position
//! - [`BlockIndex`] + linear index: owning block and flattened position
//!
//! All conversions are exact inverses of each other. Block indices use floor
//! division, so negative coordinates map to negative blocks.

use glam::Vec3;

use crate::constants::{MAX_LATTICE_COORD, NEIGHBOR_OFFSETS};

/// Lattice coordinate of a single voxel.
///
/// Ordering is lexicographic (x, then y, then z), which gives index sets a
/// stable iteration order.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default)]
pub struct GlobalIndex {
  pub x: i64,
  pub y: i64,
  pub z: i64,
}

impl GlobalIndex {
  pub const fn new(x: i64, y: i64, z: i64) -> Self {
    Self { x, y, z }
  }

  /// Index shifted by a lattice offset.
  #[inline]
  pub const fn offset(&self, offset: [i64; 3]) -> Self {
    Self {
      x: self.x + offset[0],
      y: self.y + offset[1],
      z: self.z + offset[2],
    }
  }

  /// All 26 neighbors in [`NEIGHBOR_OFFSETS`] order.
  pub fn neighbors(&self) -> impl Iterator<Item = GlobalIndex> + '_ {
    NEIGHBOR_OFFSETS.iter().map(move |offset| self.offset(*offset))
  }
}

impl From<[i64; 3]> for GlobalIndex {
  fn from(v: [i64; 3]) -> Self {
    Self::new(v[0], v[1], v[2])
  }
}

/// Coordinate of a block: the global index floor-divided by the block side.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default)]
pub struct BlockIndex {
  pub x: i64,
  pub y: i64,
  pub z: i64,
}

impl BlockIndex {
  pub const fn new(x: i64, y: i64, z: i64) -> Self {
    Self { x, y, z }
  }

  /// True if every voxel of the block lies within `±MAX_LATTICE_COORD`.
  pub fn is_within_lattice(&self, voxels_per_side: usize) -> bool {
    let Ok(side) = i64::try_from(voxels_per_side) else {
      return false;
    };
    [self.x, self.y, self.z].into_iter().all(|c| {
      c.checked_mul(side)
        .and_then(|min| min.checked_add(side - 1).map(|max| (min, max)))
        .is_some_and(|(min, max)| min >= -MAX_LATTICE_COORD && max <= MAX_LATTICE_COORD)
    })
  }
}

impl From<[i64; 3]> for BlockIndex {
  fn from(v: [i64; 3]) -> Self {
    Self::new(v[0], v[1], v[2])
  }
}

/// Position of a voxel inside its block, each component in `[0, side)`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub struct VoxelIndex {
  pub x: usize,
  pub y: usize,
  pub z: usize,
}

impl VoxelIndex {
  pub const fn new(x: usize, y: usize, z: usize) -> Self {
    Self { x, y, z }
  }
}

/// Flatten a local voxel index. X is the major axis, Z the minor axis.
#[inline(always)]
pub const fn linear_index_from_voxel_index(voxel: VoxelIndex, voxels_per_side: usize) -> usize {
  (voxel.x * voxels_per_side + voxel.y) * voxels_per_side + voxel.z
}

/// Inverse of [`linear_index_from_voxel_index`].
#[inline(always)]
pub const fn voxel_index_from_linear_index(linear: usize, voxels_per_side: usize) -> VoxelIndex {
  VoxelIndex {
    x: linear / (voxels_per_side * voxels_per_side),
    y: (linear / voxels_per_side) % voxels_per_side,
    z: linear % voxels_per_side,
  }
}

/// Split a global index into its owning block and local voxel index.
#[inline]
pub fn block_and_voxel_index_from_global(
  global: GlobalIndex,
  voxels_per_side: usize,
) -> (BlockIndex, VoxelIndex) {
  let side = voxels_per_side as i64;
  let block = BlockIndex::new(
    global.x.div_euclid(side),
    global.y.div_euclid(side),
    global.z.div_euclid(side),
  );
  let voxel = VoxelIndex::new(
    global.x.rem_euclid(side) as usize,
    global.y.rem_euclid(side) as usize,
    global.z.rem_euclid(side) as usize,
  );
  (block, voxel)
}

/// Inverse of [`block_and_voxel_index_from_global`].
#[inline]
pub fn global_index_from_block_and_voxel(
  block: BlockIndex,
  voxel: VoxelIndex,
  voxels_per_side: usize,
) -> GlobalIndex {
  let side = voxels_per_side as i64;
  GlobalIndex::new(
    block.x * side + voxel.x as i64,
    block.y * side + voxel.y as i64,
    block.z * side + voxel.z as i64,
  )
}

/// Voxel containing a world-space point: `floor(point / voxel_size)`.
#[inline]
pub fn grid_index_from_point(point: Vec3, voxel_size: f32) -> GlobalIndex {
  GlobalIndex::new(
    (point.x / voxel_size).floor() as i64,
    (point.y / voxel_size).floor() as i64,
    (point.z / voxel_size).floor() as i64,
  )
}

/// [`grid_index_from_point`] restricted to `±MAX_LATTICE_COORD`.
///
/// `None` for non-finite points and points whose voxel lies outside the
/// lattice.
pub fn checked_grid_index_from_point(point: Vec3, voxel_size: f32) -> Option<GlobalIndex> {
  let scaled = (point / voxel_size).floor();
  if !scaled.is_finite() || scaled.abs().max_element() > MAX_LATTICE_COORD as f32 {
    return None;
  }
  Some(GlobalIndex::new(
    scaled.x as i64,
    scaled.y as i64,
    scaled.z as i64,
  ))
}

/// World-space center of a voxel: `index * voxel_size + voxel_size / 2`.
///
/// Point clouds and bounding boxes depend on this exact expression.
#[inline]
pub fn center_point_from_grid_index(index: GlobalIndex, voxel_size: f32) -> Vec3 {
  Vec3::new(
    index.x as f32 * voxel_size + (voxel_size / 2.0),
    index.y as f32 * voxel_size + (voxel_size / 2.0),
    index.z as f32 * voxel_size + (voxel_size / 2.0),
  )
}

/// World-space minimum corner of a voxel.
#[inline]
pub fn origin_point_from_grid_index(index: GlobalIndex, voxel_size: f32) -> Vec3 {
  Vec3::new(
    index.x as f32 * voxel_size,
    index.y as f32 * voxel_size,
    index.z as f32 * voxel_size,
  )
}

#[cfg(test)]
#[path = "index_test.rs"]
mod index_test;
