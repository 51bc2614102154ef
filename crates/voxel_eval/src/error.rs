//! Precondition errors raised before any algorithm runs.

use thiserror::Error;

/// Invalid grid configuration or incompatible grid pair.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum EvalError {
  #[error("voxel size must be positive and finite, got {0}")]
  InvalidVoxelSize(f32),

  #[error("voxels per side must be positive, got {0}")]
  InvalidVoxelsPerSide(usize),

  #[error("grids must share a voxel size (reference {reference}, candidate {candidate})")]
  VoxelSizeMismatch { reference: f32, candidate: f32 },

  #[error("frontier seed {0:?} lies outside the addressable voxel lattice")]
  SeedOutOfRange([f32; 3]),
}
