//! Set algebra between two voxel grids.
//!
//! All passes iterate only the allocated blocks of the first grid and look
//! each index up in the second. Voxels that exist only in the second grid are
//! invisible to a pass; call it again with the roles swapped for the
//! symmetric view.
//!
//! The two grids may hold different voxel kinds. Each side is classified with
//! its own kind and its own voxel size.

use crate::grid::VoxelGrid;
use crate::index::GlobalIndex;
use crate::types::IndexSet;
use crate::voxel::{classify, Voxel, VoxelState};

/// Occupied voxels of a reference grid, split by agreement with a candidate.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct IntersectionDifference {
  /// Occupied in both grids.
  pub intersection: IndexSet,
  /// Occupied in the reference, absent or not occupied in the candidate.
  pub difference: IndexSet,
}

impl IntersectionDifference {
  /// Number of occupied voxels in the reference grid.
  pub fn occupied_count(&self) -> usize {
    self.intersection.len() + self.difference.len()
  }

  /// Union of both halves: every occupied voxel of the reference.
  pub fn occupied(&self) -> IndexSet {
    self.intersection.union(&self.difference)
  }
}

/// Split the occupied voxels of `reference` by whether `candidate` also has
/// them occupied.
///
/// Cost is one candidate lookup per occupied reference voxel.
pub fn compute_intersection_and_difference<A: Voxel, B: Voxel>(
  reference: &VoxelGrid<A>,
  candidate: &VoxelGrid<B>,
) -> IntersectionDifference {
  let reference_size = reference.voxel_size();

  let per_block: Vec<(Vec<GlobalIndex>, Vec<GlobalIndex>)> = reference.par_map_blocks(|block| {
    let mut intersection = Vec::new();
    let mut difference = Vec::new();
    for (index, voxel) in block.iter() {
      if classify(voxel, reference_size) != VoxelState::Occupied {
        continue;
      }
      if candidate.state_at(index) == VoxelState::Occupied {
        intersection.push(index);
      } else {
        difference.push(index);
      }
    }
    (intersection, difference)
  });

  let mut result = IntersectionDifference::default();
  for (intersection, difference) in per_block {
    result.intersection.extend(intersection);
    result.difference.extend(difference);
  }

  tracing::debug!(
    intersection = result.intersection.len(),
    difference = result.difference.len(),
    "intersection/difference computed"
  );
  result
}

/// Voxels unknown in `layer` that are also unknown (or absent) in `other`.
///
/// These are never-visited regions that should not count against either grid.
pub fn compute_free_vs_unknown_split<A: Voxel, B: Voxel>(
  layer: &VoxelGrid<A>,
  other: &VoxelGrid<B>,
) -> IndexSet {
  layer.par_collect_indices(|index, voxel| {
    !voxel.is_observed() && other.state_at(index) == VoxelState::Unknown
  })
}

/// Every voxel the layer holds any information about, occupied or free.
pub fn collect_observed_voxels<V: Voxel>(layer: &VoxelGrid<V>) -> IndexSet {
  layer.par_collect_indices(|_, voxel| voxel.is_observed())
}

/// Every occupied voxel of the layer.
pub fn collect_occupied_voxels<V: Voxel>(layer: &VoxelGrid<V>) -> IndexSet {
  let voxel_size = layer.voxel_size();
  layer.par_collect_indices(|_, voxel| classify(voxel, voxel_size) == VoxelState::Occupied)
}

#[cfg(test)]
#[path = "set_ops_test.rs"]
mod set_ops_test;
