//! GridConfig - voxel resolution and block layout.

use crate::constants::{DEFAULT_VOXELS_PER_SIDE, DEFAULT_VOXEL_SIZE};
use crate::error::EvalError;

/// Resolution and block layout of a voxel grid.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridConfig {
  /// Voxel edge length in world units.
  pub voxel_size: f32,

  /// Voxels along each block edge.
  pub voxels_per_side: usize,
}

impl GridConfig {
  pub fn new(voxel_size: f32, voxels_per_side: usize) -> Self {
    Self {
      voxel_size,
      voxels_per_side,
    }
  }

  pub fn with_voxel_size(mut self, voxel_size: f32) -> Self {
    self.voxel_size = voxel_size;
    self
  }

  pub fn with_voxels_per_side(mut self, voxels_per_side: usize) -> Self {
    self.voxels_per_side = voxels_per_side;
    self
  }

  /// Voxel slots in one block (side³).
  #[inline]
  pub fn voxels_per_block(&self) -> usize {
    self.voxels_per_side * self.voxels_per_side * self.voxels_per_side
  }

  /// Block edge length in world units.
  #[inline]
  pub fn block_size(&self) -> f32 {
    self.voxel_size * self.voxels_per_side as f32
  }

  /// Reject non-positive voxel sizes and empty blocks.
  pub fn validate(&self) -> Result<(), EvalError> {
    if !(self.voxel_size.is_finite() && self.voxel_size > 0.0) {
      return Err(EvalError::InvalidVoxelSize(self.voxel_size));
    }
    if self.voxels_per_side == 0 {
      return Err(EvalError::InvalidVoxelsPerSide(self.voxels_per_side));
    }
    Ok(())
  }
}

impl Default for GridConfig {
  fn default() -> Self {
    Self {
      voxel_size: DEFAULT_VOXEL_SIZE,
      voxels_per_side: DEFAULT_VOXELS_PER_SIDE,
    }
  }
}
