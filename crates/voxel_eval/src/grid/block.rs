//! Block - fixed-size cube of voxels, the unit of sparse allocation.

use crate::index::{
  global_index_from_block_and_voxel, linear_index_from_voxel_index,
  voxel_index_from_linear_index, BlockIndex, GlobalIndex, VoxelIndex,
};
use crate::voxel::Voxel;

/// Dense side³ voxel storage for one block.
///
/// Every slot starts at `V::default()` (weight zero, classified Unknown).
#[derive(Clone, Debug)]
pub struct Block<V: Voxel> {
  index: BlockIndex,
  voxels_per_side: usize,
  voxels: Box<[V]>,
}

impl<V: Voxel> Block<V> {
  pub fn new(index: BlockIndex, voxels_per_side: usize) -> Self {
    let count = voxels_per_side * voxels_per_side * voxels_per_side;
    Self {
      index,
      voxels_per_side,
      voxels: vec![V::default(); count].into_boxed_slice(),
    }
  }

  pub fn index(&self) -> BlockIndex {
    self.index
  }

  pub fn voxels_per_side(&self) -> usize {
    self.voxels_per_side
  }

  pub fn num_voxels(&self) -> usize {
    self.voxels.len()
  }

  #[inline]
  pub fn voxel_by_linear_index(&self, linear: usize) -> &V {
    &self.voxels[linear]
  }

  #[inline]
  pub fn voxel_by_linear_index_mut(&mut self, linear: usize) -> &mut V {
    &mut self.voxels[linear]
  }

  #[inline]
  pub fn voxel_by_voxel_index(&self, voxel: VoxelIndex) -> &V {
    &self.voxels[linear_index_from_voxel_index(voxel, self.voxels_per_side)]
  }

  #[inline]
  pub fn voxel_by_voxel_index_mut(&mut self, voxel: VoxelIndex) -> &mut V {
    let linear = linear_index_from_voxel_index(voxel, self.voxels_per_side);
    &mut self.voxels[linear]
  }

  /// Global index of the voxel stored at `linear`.
  #[inline]
  pub fn global_index(&self, linear: usize) -> GlobalIndex {
    let voxel = voxel_index_from_linear_index(linear, self.voxels_per_side);
    global_index_from_block_and_voxel(self.index, voxel, self.voxels_per_side)
  }

  /// Iterate `(global index, voxel)` over every slot in linear order.
  pub fn iter(&self) -> impl Iterator<Item = (GlobalIndex, &V)> + '_ {
    self
      .voxels
      .iter()
      .enumerate()
      .map(move |(linear, voxel)| (self.global_index(linear), voxel))
  }
}
