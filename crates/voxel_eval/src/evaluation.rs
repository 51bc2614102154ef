//! Evaluation orchestrator: ground truth vs observed map.
//!
//! ```text
//!  validate ──► set ops (gt→obs ∥ obs→gt) ──► prune? ──► metrics
//!                                                          │
//!                         coverage counts ◄── explore? ◄───┘
//! ```
//!
//! Each stage runs under its own `tracing` span. Both grids are only read.

use glam::Vec3;
use web_time::Instant;

use crate::error::EvalError;
use crate::frontier::{compute_frontier_candidates, frontier_seed, FrontierConfig};
use crate::grid::VoxelGrid;
use crate::metrics::EvalMetrics;
use crate::prune::{
  prune_interior_voxels, prune_out_of_bounds, split_observed_vs_unobserved, BoundsSeed,
};
use crate::set_ops::{
  collect_observed_voxels, compute_free_vs_unknown_split, compute_intersection_and_difference,
  IntersectionDifference,
};
use crate::types::IndexSet;
use crate::voxel::Voxel;

/// Optional stages of an evaluation run.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct EvalConfig {
  /// Drop occupied voxels strictly inside a solid from all four sets.
  pub prune_interior: bool,
  /// Drop false positives outside the ground-truth occupied bounds.
  pub out_of_bounds: Option<BoundsSeed>,
  /// Run a frontier search on the observed map from this world point.
  pub explore_from: Option<[f32; 3]>,
  pub frontier: FrontierConfig,
}

impl EvalConfig {
  pub fn with_prune_interior(mut self, prune_interior: bool) -> Self {
    self.prune_interior = prune_interior;
    self
  }

  pub fn with_out_of_bounds(mut self, seed: BoundsSeed) -> Self {
    self.out_of_bounds = Some(seed);
    self
  }

  pub fn with_explore_from(mut self, start: [f32; 3]) -> Self {
    self.explore_from = Some(start);
    self
  }

  pub fn with_frontier(mut self, frontier: FrontierConfig) -> Self {
    self.frontier = frontier;
    self
  }
}

/// Frontier search on the observed map, split by observation state.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExplorationSummary {
  pub explored: IndexSet,
  /// Unique occupied voxels bordering the explored region.
  pub obstacles: IndexSet,
  /// Explored voxels the observed map has information about.
  pub observed: IndexSet,
  /// Explored voxels the observed map has never seen.
  pub unobserved: IndexSet,
  pub truncated: bool,
}

/// Observation counts over both grids.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CoverageSummary {
  /// Voxels with weight in the ground truth.
  pub ground_truth_observed: usize,
  /// Voxels with weight in the observed map.
  pub observed_observed: usize,
  /// Allocated observed voxels unknown in both maps.
  pub unknown_in_both: usize,
}

/// Full evaluation output. All index sets are kept for publishing.
#[derive(Clone, Debug)]
pub struct Evaluation {
  /// Ground-truth occupied voxels split by the observed map.
  pub ground_truth: IntersectionDifference,
  /// Observed occupied voxels split by the ground truth.
  pub observed: IntersectionDifference,
  pub metrics: EvalMetrics,
  pub exploration: Option<ExplorationSummary>,
  pub coverage: CoverageSummary,
}

impl Evaluation {
  /// Ground-truth voxels the observed map missed.
  pub fn missed(&self) -> &IndexSet {
    &self.ground_truth.difference
  }

  /// Ground-truth voxels the observed map matched.
  pub fn matched(&self) -> &IndexSet {
    &self.ground_truth.intersection
  }

  /// Observed voxels with no ground-truth counterpart.
  pub fn false_positives(&self) -> &IndexSet {
    &self.observed.difference
  }
}

/// Check that the pair can be compared voxel for voxel.
pub fn validate_pair<A: Voxel, B: Voxel>(
  ground_truth: &VoxelGrid<A>,
  observed: &VoxelGrid<B>,
) -> Result<(), EvalError> {
  ground_truth.config().validate()?;
  observed.config().validate()?;

  let reference = ground_truth.voxel_size();
  let candidate = observed.voxel_size();
  if reference != candidate {
    return Err(EvalError::VoxelSizeMismatch {
      reference,
      candidate,
    });
  }
  Ok(())
}

/// Compare an observed map against ground truth.
pub fn evaluate<A: Voxel, B: Voxel>(
  ground_truth: &VoxelGrid<A>,
  observed: &VoxelGrid<B>,
  config: &EvalConfig,
) -> Result<Evaluation, EvalError> {
  let t_start = Instant::now();
  validate_pair(ground_truth, observed)?;
  if let Some(start) = config.explore_from {
    frontier_seed(Vec3::from_array(start), observed.voxel_size())?;
  }

  let (mut gt_sets, mut obs_sets) = {
    let _span = tracing::info_span!("set_ops").entered();
    rayon::join(
      || compute_intersection_and_difference(ground_truth, observed),
      || compute_intersection_and_difference(observed, ground_truth),
    )
  };

  if config.prune_interior {
    let _span = tracing::info_span!("prune_interior").entered();
    gt_sets = prune_pair(ground_truth, &gt_sets);
    obs_sets = prune_pair(observed, &obs_sets);
  }

  if let Some(seed) = config.out_of_bounds {
    let _span = tracing::info_span!("prune_out_of_bounds").entered();
    obs_sets.difference = prune_out_of_bounds(ground_truth, &obs_sets.difference, seed);
  }

  let metrics = EvalMetrics::from_sets(&gt_sets, &obs_sets);

  let exploration = match config.explore_from {
    Some(start) => {
      let _span = tracing::info_span!("explore").entered();
      Some(explore(observed, Vec3::from_array(start), &config.frontier)?)
    }
    None => None,
  };

  let coverage = {
    let _span = tracing::info_span!("coverage").entered();
    CoverageSummary {
      ground_truth_observed: collect_observed_voxels(ground_truth).len(),
      observed_observed: collect_observed_voxels(observed).len(),
      unknown_in_both: compute_free_vs_unknown_split(observed, ground_truth).len(),
    }
  };

  tracing::info!(
    gt_occupied = metrics.counts.ground_truth_occupied(),
    observed_occupied = metrics.counts.observed_voxels(),
    iou = ?metrics.iou,
    precision = ?metrics.precision,
    recall = ?metrics.recall,
    elapsed_ms = t_start.elapsed().as_millis() as u64,
    "evaluation finished"
  );

  Ok(Evaluation {
    ground_truth: gt_sets,
    observed: obs_sets,
    metrics,
    exploration,
    coverage,
  })
}

fn prune_pair<V: Voxel>(layer: &VoxelGrid<V>, sets: &IntersectionDifference) -> IntersectionDifference {
  IntersectionDifference {
    intersection: prune_interior_voxels(layer, &sets.intersection),
    difference: prune_interior_voxels(layer, &sets.difference),
  }
}

fn explore<V: Voxel>(
  layer: &VoxelGrid<V>,
  start: Vec3,
  config: &FrontierConfig,
) -> Result<ExplorationSummary, EvalError> {
  let frontier = compute_frontier_candidates(layer, start, config)?;
  let split = split_observed_vs_unobserved(layer, &frontier.explored);

  Ok(ExplorationSummary {
    obstacles: frontier.unique_obstacles(),
    explored: frontier.explored,
    observed: split.observed,
    unobserved: split.unobserved,
    truncated: frontier.truncated,
  })
}

#[cfg(test)]
#[path = "evaluation_test.rs"]
mod evaluation_test;
