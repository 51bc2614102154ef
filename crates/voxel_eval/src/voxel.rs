//! Voxel kinds and the three-way classification rule.
//!
//! Every voxel kind reduces to two capabilities: an integration weight and an
//! occupancy decision. Classification applies the shared weight rule first:
//!
//! ```text
//! weight <= OBSERVED_WEIGHT_EPSILON  -> Unknown
//! is_occupied(voxel_size)            -> Occupied
//! otherwise                          -> Free
//! ```
//!
//! Grids are generic over the voxel kind, so the kind is fixed when a grid is
//! constructed and dispatch is static.

use crate::constants::{OBSERVED_WEIGHT_EPSILON, OCCUPANCY_PROBABILITY_THRESHOLD};

/// Classification outcome of a voxel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum VoxelState {
  /// Absent, or not enough weight to say anything.
  Unknown,
  /// Observed and not occupied.
  Free,
  /// Observed and occupied.
  Occupied,
}

impl VoxelState {
  /// Free and unknown space can both be traversed by frontier search.
  #[inline]
  pub fn is_traversable(&self) -> bool {
    !matches!(self, VoxelState::Occupied)
  }
}

/// Capability every stored voxel kind provides.
///
/// A new kind only needs [`Voxel::weight`] and [`Voxel::is_occupied`].
pub trait Voxel: Copy + Default + Send + Sync + 'static {
  /// Integration weight. Zero for voxels never written.
  fn weight(&self) -> f32;

  /// Occupancy decision for an observed voxel.
  fn is_occupied(&self, voxel_size: f32) -> bool;

  /// Signed distance to the nearest surface, negative inside solids.
  ///
  /// `None` for kinds that carry no distance.
  fn signed_distance(&self) -> Option<f32> {
    None
  }

  /// True when the voxel carries any information.
  #[inline]
  fn is_observed(&self) -> bool {
    self.weight() > OBSERVED_WEIGHT_EPSILON
  }
}

/// Classify a stored voxel.
#[inline]
pub fn classify<V: Voxel>(voxel: &V, voxel_size: f32) -> VoxelState {
  if !voxel.is_observed() {
    VoxelState::Unknown
  } else if voxel.is_occupied(voxel_size) {
    VoxelState::Occupied
  } else {
    VoxelState::Free
  }
}

/// Classify a lookup result. Absent voxels are [`VoxelState::Unknown`].
#[inline]
pub fn classify_lookup<V: Voxel>(voxel: Option<&V>, voxel_size: f32) -> VoxelState {
  voxel.map_or(VoxelState::Unknown, |v| classify(v, voxel_size))
}

// =============================================================================
// TsdfVoxel - truncated signed distance
// =============================================================================

/// Signed-distance voxel.
///
/// Negative distance = inside/solid, positive = outside/air.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TsdfVoxel {
  pub distance: f32,
  pub weight: f32,
}

impl TsdfVoxel {
  pub fn new(distance: f32, weight: f32) -> Self {
    Self { distance, weight }
  }
}

impl Voxel for TsdfVoxel {
  #[inline]
  fn weight(&self) -> f32 {
    self.weight
  }

  /// Occupied when the surface is within one voxel (or the voxel is inside).
  #[inline]
  fn is_occupied(&self, voxel_size: f32) -> bool {
    self.distance <= voxel_size
  }

  #[inline]
  fn signed_distance(&self) -> Option<f32> {
    Some(self.distance)
  }
}

// =============================================================================
// OccupancyVoxel - probabilistic occupancy
// =============================================================================

/// Probabilistic occupancy voxel storing log-odds.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct OccupancyVoxel {
  pub log_odds: f32,
  pub weight: f32,
}

impl OccupancyVoxel {
  pub fn new(log_odds: f32, weight: f32) -> Self {
    Self { log_odds, weight }
  }

  /// Build from an occupancy probability in `(0, 1)`.
  pub fn from_probability(probability: f32, weight: f32) -> Self {
    Self {
      log_odds: (probability / (1.0 - probability)).ln(),
      weight,
    }
  }

  /// Occupancy probability from log-odds.
  #[inline]
  pub fn probability(&self) -> f32 {
    1.0 / (1.0 + (-self.log_odds).exp())
  }
}

impl Voxel for OccupancyVoxel {
  #[inline]
  fn weight(&self) -> f32 {
    self.weight
  }

  #[inline]
  fn is_occupied(&self, _voxel_size: f32) -> bool {
    self.probability() > OCCUPANCY_PROBABILITY_THRESHOLD
  }
}

#[cfg(test)]
#[path = "voxel_test.rs"]
mod voxel_test;
