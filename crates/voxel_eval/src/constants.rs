//! Fixed constants shared by every classification and traversal.
//!
//! # Block Layout
//!
//! ```text
//! A block holds side³ voxels, flattened lexicographically (X major, Z minor):
//!
//! Address:  0    1    2   ...  side-1   side  ...
//! Content: [0,0,0][0,0,1]...[0,0,side-1][0,1,0]...
//!
//! linear = x * side² + y * side + z
//! ```
//!
//! # Neighborhood
//!
//! Frontier search uses full 26-connectivity: every face, edge and corner
//! neighbor of a voxel, excluding the voxel itself.

/// Minimum integration weight for a voxel to count as observed.
///
/// Must be identical for every comparison within an evaluation run.
pub const OBSERVED_WEIGHT_EPSILON: f32 = 1e-6;

/// Default edge length of a voxel in world units.
pub const DEFAULT_VOXEL_SIZE: f32 = 0.08;

/// Default number of voxels along each block edge.
pub const DEFAULT_VOXELS_PER_SIDE: usize = 16;

/// Occupancy probability above which a probabilistic voxel is occupied.
pub const OCCUPANCY_PROBABILITY_THRESHOLD: f32 = 0.5;

/// Largest coordinate magnitude a voxel may have on any axis.
///
/// Keeps neighbor offsets and block-to-voxel arithmetic far from `i64`
/// overflow. Loaders and seed conversions reject anything beyond it.
pub const MAX_LATTICE_COORD: i64 = 1 << 48;

/// Number of neighbors in a full 3D neighborhood.
pub const NEIGHBOR_COUNT: usize = 26;

/// Offsets to all 26 neighbors, +X slab first, then the X=0 slab, then -X.
pub const NEIGHBOR_OFFSETS: [[i64; 3]; NEIGHBOR_COUNT] = [
  [1, 0, 0],
  [1, 1, 0],
  [1, -1, 0],
  [1, 0, 1],
  [1, 1, 1],
  [1, -1, 1],
  [1, 0, -1],
  [1, 1, -1],
  [1, -1, -1],
  [0, 1, 0],
  [0, -1, 0],
  [0, 0, 1],
  [0, 1, 1],
  [0, -1, 1],
  [0, 0, -1],
  [0, 1, -1],
  [0, -1, -1],
  [-1, 0, 0],
  [-1, 1, 0],
  [-1, -1, 0],
  [-1, 0, 1],
  [-1, 1, 1],
  [-1, -1, 1],
  [-1, 0, -1],
  [-1, 1, -1],
  [-1, -1, -1],
];

#[cfg(test)]
#[path = "constants_test.rs"]
mod constants_test;
