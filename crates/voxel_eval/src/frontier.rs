//! Frontier search: flood fill through free and unknown space.
//!
//! Starting from the voxel containing a world-space point, the search expands
//! through every 26-connected neighbor that is not occupied. Occupied
//! neighbors are recorded as obstacles and stop expansion in that direction.
//!
//! ```text
//!   open stack ──pop──► current ──26 neighbors──┬─ visited?  → skip
//!        ▲                                      ├─ Free/Unknown → push + visit
//!        └──────────────────────────────────────┘  Occupied   → record obstacle
//! ```
//!
//! The worklist is an explicit stack (depth-first order), so large regions
//! never hit call-depth limits. Traversal order affects the obstacle list
//! order only, never set membership.
//!
//! Unknown space is traversable, so the region must be enclosed by occupied
//! voxels for the search to end on its own. Use
//! [`FrontierConfig::max_explored`] to bound it otherwise.
//!
//! The seed must map into `±MAX_LATTICE_COORD`; points beyond it are
//! rejected before the search starts.

use std::collections::HashSet;

use glam::Vec3;
use web_time::Instant;

use crate::error::EvalError;
use crate::grid::VoxelGrid;
use crate::index::{checked_grid_index_from_point, GlobalIndex};
use crate::types::IndexSet;
use crate::voxel::{Voxel, VoxelState};

/// Frontier search limits.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrontierConfig {
  /// Stop once this many voxels are explored (`None` = unbounded).
  pub max_explored: Option<usize>,
}

impl FrontierConfig {
  pub fn unbounded() -> Self {
    Self { max_explored: None }
  }

  pub fn with_max_explored(mut self, max_explored: usize) -> Self {
    self.max_explored = Some(max_explored);
    self
  }
}

/// Result of a frontier search.
#[derive(Clone, Debug, Default)]
pub struct FrontierResult {
  /// Free and unknown voxels reached by the flood fill.
  pub explored: IndexSet,
  /// Occupied voxels adjacent to the explored region.
  ///
  /// An obstacle is recorded each time it is reached, so duplicates are
  /// expected.
  pub obstacles: Vec<GlobalIndex>,
  /// True if the search stopped at [`FrontierConfig::max_explored`].
  pub truncated: bool,
}

impl FrontierResult {
  /// Obstacles with duplicates removed.
  pub fn unique_obstacles(&self) -> IndexSet {
    self.obstacles.iter().copied().collect()
  }
}

/// Classification used by the flood fill.
#[inline]
pub fn voxel_state<V: Voxel>(index: GlobalIndex, layer: &VoxelGrid<V>) -> VoxelState {
  layer.state_at(index)
}

/// Voxel containing `start`, if it lies on the addressable lattice.
pub fn frontier_seed(start: Vec3, voxel_size: f32) -> Result<GlobalIndex, EvalError> {
  checked_grid_index_from_point(start, voxel_size)
    .ok_or(EvalError::SeedOutOfRange(start.to_array()))
}

/// Flood fill from the voxel containing `start`.
///
/// The seed voxel itself is expanded but only enters the explored set if a
/// neighbor reaches it.
pub fn compute_frontier_candidates<V: Voxel>(
  layer: &VoxelGrid<V>,
  start: Vec3,
  config: &FrontierConfig,
) -> Result<FrontierResult, EvalError> {
  let t_start = Instant::now();
  let seed = frontier_seed(start, layer.voxel_size())?;

  let mut closed: HashSet<GlobalIndex> = HashSet::new();
  let mut open: Vec<GlobalIndex> = vec![seed];
  let mut obstacles = Vec::new();
  let mut truncated = false;

  'search: while let Some(current) = open.pop() {
    for candidate in current.neighbors() {
      if closed.contains(&candidate) {
        continue;
      }
      if !voxel_state(candidate, layer).is_traversable() {
        obstacles.push(candidate);
        continue;
      }
      if config.max_explored.is_some_and(|max| closed.len() >= max) {
        truncated = true;
        break 'search;
      }
      open.push(candidate);
      closed.insert(candidate);
    }
  }

  if truncated {
    tracing::warn!(
      max_explored = ?config.max_explored,
      "frontier search hit its exploration limit"
    );
  }
  tracing::info!(
    explored = closed.len(),
    obstacles = obstacles.len(),
    seed = ?seed,
    elapsed_us = t_start.elapsed().as_micros() as u64,
    "frontier search finished"
  );

  Ok(FrontierResult {
    explored: closed.into_iter().collect(),
    obstacles,
    truncated,
  })
}

#[cfg(test)]
#[path = "frontier_test.rs"]
mod frontier_test;
