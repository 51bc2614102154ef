//! VoxelGrid - sparse, block-bucketed voxel storage.
//!
//! Blocks are allocated lazily on first write and only then, so every
//! allocated block holds at least one written voxel. An unallocated block means
//! every voxel inside it is absent and classifies as Unknown. Lookups never
//! allocate, so a grid shared by reference is safe to read from many threads.
//!
//! # Module Structure
//!
//! - [`config`]: `GridConfig` - voxel size and block side length
//! - [`block`]: `Block` - dense side³ storage for one block

pub mod block;
pub mod config;

use std::collections::HashMap;

use glam::Vec3;
use rayon::prelude::*;

pub use block::Block;
pub use config::GridConfig;

use crate::error::EvalError;
use crate::index::{
  block_and_voxel_index_from_global, center_point_from_grid_index, BlockIndex, GlobalIndex,
};
use crate::types::IndexSet;
use crate::voxel::{classify_lookup, Voxel, VoxelState};

/// Sparse voxel grid generic over the stored voxel kind.
///
/// The grid exclusively owns its blocks.
#[derive(Clone, Debug)]
pub struct VoxelGrid<V: Voxel> {
  config: GridConfig,
  blocks: HashMap<BlockIndex, Block<V>>,
}

impl<V: Voxel> VoxelGrid<V> {
  /// Create an empty grid after validating the configuration.
  pub fn new(config: GridConfig) -> Result<Self, EvalError> {
    config.validate()?;
    Ok(Self {
      config,
      blocks: HashMap::new(),
    })
  }

  pub fn config(&self) -> &GridConfig {
    &self.config
  }

  #[inline]
  pub fn voxel_size(&self) -> f32 {
    self.config.voxel_size
  }

  #[inline]
  pub fn voxels_per_side(&self) -> usize {
    self.config.voxels_per_side
  }

  #[inline]
  pub fn voxels_per_block(&self) -> usize {
    self.config.voxels_per_block()
  }

  #[inline]
  pub fn block_size(&self) -> f32 {
    self.config.block_size()
  }

  pub fn num_allocated_blocks(&self) -> usize {
    self.blocks.len()
  }

  /// Indices of every allocated block, sorted for reproducible iteration.
  pub fn allocated_blocks(&self) -> Vec<BlockIndex> {
    let mut indices: Vec<BlockIndex> = self.blocks.keys().copied().collect();
    indices.sort_unstable();
    indices
  }

  pub fn block(&self, index: &BlockIndex) -> Option<&Block<V>> {
    self.blocks.get(index)
  }

  /// Iterate allocated blocks in map order.
  pub fn blocks(&self) -> impl Iterator<Item = &Block<V>> {
    self.blocks.values()
  }

  /// Voxel at a global index, or `None` if its block is not allocated.
  #[inline]
  pub fn voxel_at(&self, index: GlobalIndex) -> Option<&V> {
    let (block_index, voxel_index) =
      block_and_voxel_index_from_global(index, self.config.voxels_per_side);
    self
      .blocks
      .get(&block_index)
      .map(|block| block.voxel_by_voxel_index(voxel_index))
  }

  /// Classification of the voxel at a global index.
  #[inline]
  pub fn state_at(&self, index: GlobalIndex) -> VoxelState {
    classify_lookup(self.voxel_at(index), self.config.voxel_size)
  }

  /// World-space center of a voxel in this grid.
  #[inline]
  pub fn center_of(&self, index: GlobalIndex) -> Vec3 {
    center_point_from_grid_index(index, self.config.voxel_size)
  }

  /// Block at `index`, allocating it if needed. Callers write a voxel next.
  fn allocate_block(&mut self, index: BlockIndex) -> &mut Block<V> {
    let side = self.config.voxels_per_side;
    self
      .blocks
      .entry(index)
      .or_insert_with(|| Block::new(index, side))
  }

  /// Mutable voxel at a global index, allocating its block if needed.
  pub fn voxel_mut(&mut self, index: GlobalIndex) -> &mut V {
    let (block_index, voxel_index) =
      block_and_voxel_index_from_global(index, self.config.voxels_per_side);
    self
      .allocate_block(block_index)
      .voxel_by_voxel_index_mut(voxel_index)
  }

  pub fn set_voxel(&mut self, index: GlobalIndex, voxel: V) {
    *self.voxel_mut(index) = voxel;
  }

  /// Run `f` over every allocated block in parallel.
  ///
  /// Results come back in map order; callers that need determinism merge
  /// them into an ordered collection.
  pub fn par_map_blocks<T, F>(&self, f: F) -> Vec<T>
  where
    T: Send,
    F: Fn(&Block<V>) -> T + Sync,
  {
    self.blocks.par_iter().map(|(_, block)| f(block)).collect()
  }

  /// Collect the global indices of all stored voxels matching `keep`.
  pub fn par_collect_indices<F>(&self, keep: F) -> IndexSet
  where
    F: Fn(GlobalIndex, &V) -> bool + Sync,
  {
    let per_block: Vec<Vec<GlobalIndex>> = self.par_map_blocks(|block| {
      block
        .iter()
        .filter(|(index, voxel)| keep(*index, *voxel))
        .map(|(index, _)| index)
        .collect()
    });

    per_block.into_iter().flatten().collect()
  }
}
