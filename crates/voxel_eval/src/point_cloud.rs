//! Colored point clouds for visualizing evaluation sets.
//!
//! Each index becomes one point at its voxel center:
//!
//! ```text
//!   difference (gt)        → RED     missed ground truth
//!   intersection (gt)      → GREEN   matched ground truth
//!   difference (observed)  → YELLOW  false positives
//! ```

use glam::Vec3;

use crate::index::center_point_from_grid_index;
use crate::types::IndexSet;

/// RGBA color, one byte per channel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Color {
  pub r: u8,
  pub g: u8,
  pub b: u8,
  pub a: u8,
}

impl Color {
  pub const RED: Color = Color::rgb(255, 0, 0);
  pub const GREEN: Color = Color::rgb(0, 255, 0);
  pub const YELLOW: Color = Color::rgb(255, 255, 0);

  pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
    Self { r, g, b, a: 255 }
  }
}

/// One point of a colored cloud.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColoredPoint {
  pub position: Vec3,
  pub color: Color,
}

/// Voxel centers of `indices`, in sorted index order, all painted `color`.
pub fn points_from_indices(indices: &IndexSet, color: Color, voxel_size: f32) -> Vec<ColoredPoint> {
  indices
    .iter()
    .map(|index| ColoredPoint {
      position: center_point_from_grid_index(*index, voxel_size),
      color,
    })
    .collect()
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::index::GlobalIndex;

  #[test]
  fn test_points_at_voxel_centers() {
    let indices: IndexSet = [GlobalIndex::new(1, 0, -1), GlobalIndex::new(0, 0, 0)]
      .into_iter()
      .collect();
    let points = points_from_indices(&indices, Color::GREEN, 0.5);

    assert_eq!(points.len(), 2);
    assert_eq!(points[0].position, Vec3::new(0.25, 0.25, 0.25));
    assert_eq!(points[1].position, Vec3::new(0.75, 0.25, -0.25));
    assert!(points.iter().all(|p| p.color == Color::GREEN));
  }

  #[test]
  fn test_empty_set_gives_empty_cloud() {
    assert!(points_from_indices(&IndexSet::new(), Color::RED, 1.0).is_empty());
  }

  #[test]
  fn test_palette() {
    assert_eq!(Color::YELLOW, Color { r: 255, g: 255, b: 0, a: 255 });
    assert_ne!(Color::RED, Color::GREEN);
  }
}
