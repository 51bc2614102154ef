//! Map quality metrics from the two intersection/difference passes.
//!
//! ```text
//! gt  = compute_intersection_and_difference(ground_truth, observed)
//! obs = compute_intersection_and_difference(observed, ground_truth)
//!
//! observed_voxels  = |obs.intersection| + |obs.difference|
//! gt_occupied      = |gt.intersection| + |gt.difference|
//! iou              = |gt.intersection| / (|gt.intersection| + |gt.difference| + |obs.difference|)
//! recall           = |obs.intersection| / gt_occupied
//! precision        = |obs.intersection| / observed_voxels
//! observed_fraction = observed_voxels / gt_occupied
//! ```
//!
//! A zero denominator yields `None` (undefined), never zero.

use std::fmt;

use crate::set_ops::IntersectionDifference;

/// Raw set sizes feeding the metrics.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MetricCounts {
  pub intersection_gt: usize,
  pub difference_gt: usize,
  pub intersection_observed: usize,
  pub difference_observed: usize,
}

impl MetricCounts {
  pub fn from_sets(gt: &IntersectionDifference, observed: &IntersectionDifference) -> Self {
    Self {
      intersection_gt: gt.intersection.len(),
      difference_gt: gt.difference.len(),
      intersection_observed: observed.intersection.len(),
      difference_observed: observed.difference.len(),
    }
  }

  /// Occupied voxels in the observed grid.
  pub fn observed_voxels(&self) -> usize {
    self.intersection_observed + self.difference_observed
  }

  /// Occupied voxels in the ground truth grid.
  pub fn ground_truth_occupied(&self) -> usize {
    self.intersection_gt + self.difference_gt
  }
}

/// Evaluation scalars. `None` marks an undefined ratio.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct EvalMetrics {
  pub counts: MetricCounts,
  pub observed_fraction: Option<f32>,
  pub iou: Option<f32>,
  pub precision: Option<f32>,
  pub recall: Option<f32>,
}

impl EvalMetrics {
  pub fn from_counts(counts: MetricCounts) -> Self {
    let observed_voxels = counts.observed_voxels();
    let gt_occupied = counts.ground_truth_occupied();

    let metrics = Self {
      counts,
      observed_fraction: ratio(observed_voxels, gt_occupied),
      iou: ratio(
        counts.intersection_gt,
        counts.intersection_gt + counts.difference_gt + counts.difference_observed,
      ),
      precision: ratio(counts.intersection_observed, observed_voxels),
      recall: ratio(counts.intersection_observed, gt_occupied),
    };

    if !metrics.is_defined() {
      tracing::warn!(
        gt_occupied,
        observed_voxels,
        "evaluation has undefined metrics (zero denominator)"
      );
    }
    metrics
  }

  pub fn from_sets(gt: &IntersectionDifference, observed: &IntersectionDifference) -> Self {
    Self::from_counts(MetricCounts::from_sets(gt, observed))
  }

  /// True if every metric has a value.
  pub fn is_defined(&self) -> bool {
    self.observed_fraction.is_some()
      && self.iou.is_some()
      && self.precision.is_some()
      && self.recall.is_some()
  }

  /// `observed_fraction,iou,precision,recall`, undefined values as `nan`.
  pub fn csv_line(&self) -> String {
    format!(
      "{},{},{},{}",
      csv_value(self.observed_fraction),
      csv_value(self.iou),
      csv_value(self.precision),
      csv_value(self.recall)
    )
  }
}

/// `numerator / denominator`, or `None` when the denominator is zero.
#[inline]
pub fn ratio(numerator: usize, denominator: usize) -> Option<f32> {
  if denominator == 0 {
    None
  } else {
    Some(numerator as f32 / denominator as f32)
  }
}

fn csv_value(value: Option<f32>) -> String {
  value.map_or_else(|| "nan".to_string(), |v| v.to_string())
}

struct Report(Option<f32>);

impl fmt::Display for Report {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self.0 {
      Some(v) => write!(f, "{:.2}", v),
      None => write!(f, "n/a"),
    }
  }
}

impl fmt::Display for EvalMetrics {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    writeln!(f, "---------- Evaluation -----------")?;
    writeln!(f, "iou: {}", Report(self.iou))?;
    writeln!(f, "precision: {}", Report(self.precision))?;
    writeln!(f, "recall: {}", Report(self.recall))?;
    writeln!(f, "observed: {}", Report(self.observed_fraction))?;
    writeln!(f, "gt_occupied_voxels: {}", self.counts.ground_truth_occupied())?;
    writeln!(f, "observed_voxels: {}", self.counts.observed_voxels())?;
    write!(f, "---------------------------------")
  }
}

#[cfg(test)]
#[path = "metrics_test.rs"]
mod metrics_test;
