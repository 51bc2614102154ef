//! voxel_eval - sparse voxel map comparison
//!
//! This crate compares an observed volumetric map against a ground-truth map
//! stored in the same sparse, block-indexed 3-D grid. Each voxel is classified
//! as Unknown, Free or Occupied; set algebra over the occupied voxels yields
//! coverage metrics, and a frontier search explores free and unknown space.
//!
//! # Features
//!
//! - **Sparse grid**: blocks of side³ voxels allocated lazily, generic over
//!   the voxel kind (TSDF or occupancy)
//! - **Set operations**: per-block parallel intersection/difference between
//!   two grids of possibly different kinds
//! - **Pruning**: interior voxels, out-of-bounds false positives,
//!   observed/unobserved splits
//! - **Frontier search**: 26-connected flood fill with an optional limit
//! - **Metrics**: IoU, precision, recall and observed fraction
//!
//! # Example
//!
//! ```ignore
//! use voxel_eval::{evaluate, EvalConfig, GridConfig, TsdfVoxel, VoxelGrid, GlobalIndex};
//!
//! let mut ground_truth = VoxelGrid::<TsdfVoxel>::new(GridConfig::default())?;
//! let mut observed = VoxelGrid::<TsdfVoxel>::new(GridConfig::default())?;
//!
//! ground_truth.set_voxel(GlobalIndex::new(0, 0, 0), TsdfVoxel::new(0.0, 1.0));
//! observed.set_voxel(GlobalIndex::new(0, 0, 0), TsdfVoxel::new(0.0, 1.0));
//!
//! let evaluation = evaluate(&ground_truth, &observed, &EvalConfig::default())?;
//! println!("{}", evaluation.metrics);
//! ```

pub mod constants;
pub mod error;
pub mod index;
pub mod types;
pub mod voxel;

// Re-export commonly used items
pub use constants::{MAX_LATTICE_COORD, NEIGHBOR_OFFSETS, OBSERVED_WEIGHT_EPSILON};
pub use error::EvalError;
pub use index::{BlockIndex, GlobalIndex, VoxelIndex};
pub use types::{IndexSet, MinMaxAABB};
pub use voxel::{classify, OccupancyVoxel, TsdfVoxel, Voxel, VoxelState};

// Sparse block storage
pub mod grid;
pub use grid::{Block, GridConfig, VoxelGrid};

// Set algebra between two grids
pub mod set_ops;
pub use set_ops::{compute_intersection_and_difference, IntersectionDifference};

// Post-processing filters
pub mod prune;
pub use prune::{BoundsSeed, ObservedSplit};

// Flood fill through free and unknown space
pub mod frontier;
pub use frontier::{compute_frontier_candidates, frontier_seed, FrontierConfig, FrontierResult};

pub mod metrics;
pub use metrics::{EvalMetrics, MetricCounts};

// Visualization output
pub mod point_cloud;
pub use point_cloud::{points_from_indices, Color, ColoredPoint};

// End-to-end orchestration
pub mod evaluation;
pub use evaluation::{evaluate, CoverageSummary, EvalConfig, Evaluation, ExplorationSummary};

#[cfg(test)]
pub(crate) mod test_utils;
