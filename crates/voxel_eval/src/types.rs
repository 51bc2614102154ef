//! Core data types shared by the set operations and pruning filters.

use std::collections::btree_set;
use std::collections::BTreeSet;

use glam::Vec3;

use crate::index::GlobalIndex;

/// Duplicate-free collection of global voxel indices.
///
/// Backed by an ordered set, so iteration is deterministic across runs.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct IndexSet {
  indices: BTreeSet<GlobalIndex>,
}

impl IndexSet {
  pub fn new() -> Self {
    Self::default()
  }

  /// Insert an index. Returns false if it was already present.
  pub fn insert(&mut self, index: GlobalIndex) -> bool {
    self.indices.insert(index)
  }

  pub fn contains(&self, index: &GlobalIndex) -> bool {
    self.indices.contains(index)
  }

  pub fn len(&self) -> usize {
    self.indices.len()
  }

  pub fn is_empty(&self) -> bool {
    self.indices.is_empty()
  }

  /// Iterate in ascending lexicographic order.
  pub fn iter(&self) -> impl Iterator<Item = &GlobalIndex> {
    self.indices.iter()
  }

  /// Keep only indices for which `keep` returns true.
  pub fn retain<F: FnMut(&GlobalIndex) -> bool>(&mut self, keep: F) {
    self.indices.retain(keep);
  }

  /// New set holding every index of `self` and `other`.
  pub fn union(&self, other: &IndexSet) -> IndexSet {
    self.indices.union(&other.indices).copied().collect()
  }

  /// New set holding indices present in both `self` and `other`.
  pub fn intersection(&self, other: &IndexSet) -> IndexSet {
    self.indices.intersection(&other.indices).copied().collect()
  }

  pub fn is_disjoint(&self, other: &IndexSet) -> bool {
    self.indices.is_disjoint(&other.indices)
  }

  /// Indices as a sorted vector.
  pub fn to_sorted_vec(&self) -> Vec<GlobalIndex> {
    self.indices.iter().copied().collect()
  }
}

impl FromIterator<GlobalIndex> for IndexSet {
  fn from_iter<I: IntoIterator<Item = GlobalIndex>>(iter: I) -> Self {
    Self {
      indices: iter.into_iter().collect(),
    }
  }
}

impl Extend<GlobalIndex> for IndexSet {
  fn extend<I: IntoIterator<Item = GlobalIndex>>(&mut self, iter: I) {
    self.indices.extend(iter);
  }
}

impl IntoIterator for IndexSet {
  type Item = GlobalIndex;
  type IntoIter = btree_set::IntoIter<GlobalIndex>;

  fn into_iter(self) -> Self::IntoIter {
    self.indices.into_iter()
  }
}

impl<'a> IntoIterator for &'a IndexSet {
  type Item = &'a GlobalIndex;
  type IntoIter = btree_set::Iter<'a, GlobalIndex>;

  fn into_iter(self) -> Self::IntoIter {
    self.indices.iter()
  }
}

/// Axis-aligned bounding box over voxel centers.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MinMaxAABB {
  pub min: Vec3,
  pub max: Vec3,
}

impl MinMaxAABB {
  /// Degenerate AABB holding a single point.
  pub fn from_point(point: Vec3) -> Self {
    Self {
      min: point,
      max: point,
    }
  }

  /// Expand AABB to include a point.
  #[inline]
  pub fn encapsulate(&mut self, point: Vec3) {
    self.min = self.min.min(point);
    self.max = self.max.max(point);
  }

  /// Inclusive containment test on all three axes.
  #[inline]
  pub fn contains_point(&self, point: Vec3) -> bool {
    point.cmpge(self.min).all() && point.cmple(self.max).all()
  }
}

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;
