//! Post-processing filters over candidate index sets.
//!
//! Every filter returns a new set and leaves its input untouched. None of
//! them can grow a set.

use crate::grid::VoxelGrid;
use crate::index::GlobalIndex;
use crate::types::{IndexSet, MinMaxAABB};
use crate::voxel::{classify, Voxel, VoxelState};

/// How the occupied bounding box is seeded before encapsulating voxels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BoundsSeed {
  /// Start from the world origin, so the box always contains it.
  ///
  /// Reproduces the legacy evaluator. With no occupied voxels the box is the
  /// origin point and everything else is pruned.
  Origin,

  /// Start from the first occupied voxel: a true bounding box.
  ///
  /// With no occupied voxels there is no box and everything is pruned.
  #[default]
  FirstOccupied,
}

/// Remove indices that are occupied and lie strictly inside a solid.
///
/// Voxel kinds without a signed distance are never removed.
pub fn prune_interior_voxels<V: Voxel>(layer: &VoxelGrid<V>, indices: &IndexSet) -> IndexSet {
  let voxel_size = layer.voxel_size();
  let mut kept = indices.clone();
  kept.retain(|index| !is_interior(layer.voxel_at(*index), voxel_size));

  tracing::debug!(
    removed = indices.len() - kept.len(),
    kept = kept.len(),
    "pruned interior voxels"
  );
  kept
}

#[inline]
fn is_interior<V: Voxel>(voxel: Option<&V>, voxel_size: f32) -> bool {
  match voxel {
    Some(v) => {
      classify(v, voxel_size) == VoxelState::Occupied
        && v.signed_distance().is_some_and(|d| d < 0.0)
    }
    None => false,
  }
}

/// Bounding box over the centers of every occupied voxel in `layer`.
///
/// Returns `None` only for [`BoundsSeed::FirstOccupied`] on a layer with no
/// occupied voxels. Blocks are visited in sorted order so the seed voxel is
/// deterministic.
pub fn occupied_bounds<V: Voxel>(layer: &VoxelGrid<V>, seed: BoundsSeed) -> Option<MinMaxAABB> {
  let voxel_size = layer.voxel_size();
  let mut bounds = match seed {
    BoundsSeed::Origin => Some(MinMaxAABB::from_point(glam::Vec3::ZERO)),
    BoundsSeed::FirstOccupied => None,
  };

  for block_index in layer.allocated_blocks() {
    let Some(block) = layer.block(&block_index) else {
      continue;
    };
    for (index, voxel) in block.iter() {
      if classify(voxel, voxel_size) != VoxelState::Occupied {
        continue;
      }
      let center = layer.center_of(index);
      match bounds.as_mut() {
        Some(aabb) => aabb.encapsulate(center),
        None => bounds = Some(MinMaxAABB::from_point(center)),
      }
    }
  }

  bounds
}

/// Remove indices whose voxel center lies outside the occupied bounding box.
pub fn prune_out_of_bounds<V: Voxel>(
  layer: &VoxelGrid<V>,
  indices: &IndexSet,
  seed: BoundsSeed,
) -> IndexSet {
  let Some(bounds) = occupied_bounds(layer, seed) else {
    tracing::warn!(
      candidates = indices.len(),
      "no occupied voxels to bound against, pruning every index"
    );
    return IndexSet::new();
  };

  let mut kept = indices.clone();
  kept.retain(|index| bounds.contains_point(layer.center_of(*index)));

  tracing::debug!(
    removed = indices.len() - kept.len(),
    kept = kept.len(),
    min = ?bounds.min,
    max = ?bounds.max,
    "pruned out-of-bounds voxels"
  );
  kept
}

/// Indices split by whether a layer has observed them.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ObservedSplit {
  /// Weight above epsilon, free or occupied.
  pub observed: IndexSet,
  /// Absent, or weight at or below epsilon.
  pub unobserved: IndexSet,
}

/// Partition `indices` by the observation test of `layer`.
pub fn split_observed_vs_unobserved<V: Voxel>(
  layer: &VoxelGrid<V>,
  indices: &IndexSet,
) -> ObservedSplit {
  let mut split = ObservedSplit::default();
  for index in indices {
    if is_observed_at(layer, *index) {
      split.observed.insert(*index);
    } else {
      split.unobserved.insert(*index);
    }
  }
  split
}

#[inline]
fn is_observed_at<V: Voxel>(layer: &VoxelGrid<V>, index: GlobalIndex) -> bool {
  layer.voxel_at(index).is_some_and(|v| v.is_observed())
}

#[cfg(test)]
#[path = "prune_test.rs"]
mod prune_test;
