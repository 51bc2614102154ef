//! JSON voxel layer files.
//!
//! ```json
//! {
//!   "voxel_size": 0.08,
//!   "voxels_per_side": 16,
//!   "voxel_kind": "tsdf",
//!   "blocks": [
//!     { "index": [0, 0, 0], "voxels": [{ "index": 5, "distance": 0.0, "weight": 1.0 }] }
//!   ]
//! }
//! ```
//!
//! Occupancy layers use `"voxel_kind": "occupancy"` and voxels carrying
//! `log_odds` instead of `distance`. Voxels not listed stay unobserved, and a
//! block listed without voxels is never allocated.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

use voxel_eval::index::{global_index_from_block_and_voxel, voxel_index_from_linear_index};
use voxel_eval::{BlockIndex, GridConfig, OccupancyVoxel, TsdfVoxel, Voxel, VoxelGrid};

#[derive(Debug, Deserialize)]
#[serde(tag = "voxel_kind", rename_all = "snake_case")]
enum GridFile {
	Tsdf(LayerRecord<TsdfRecord>),
	Occupancy(LayerRecord<OccupancyRecord>),
}

#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "R: Deserialize<'de>"))]
struct LayerRecord<R> {
	voxel_size: f32,
	voxels_per_side: usize,
	#[serde(default)]
	blocks: Vec<BlockRecord<R>>,
}

#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "R: Deserialize<'de>"))]
struct BlockRecord<R> {
	index: [i64; 3],
	#[serde(default)]
	voxels: Vec<R>,
}

#[derive(Debug, Deserialize)]
struct TsdfRecord {
	index: usize,
	distance: f32,
	weight: f32,
}

#[derive(Debug, Deserialize)]
struct OccupancyRecord {
	index: usize,
	log_odds: f32,
	weight: f32,
}

trait VoxelRecord {
	type Voxel: Voxel;

	fn linear_index(&self) -> usize;
	fn to_voxel(&self) -> Self::Voxel;
}

impl VoxelRecord for TsdfRecord {
	type Voxel = TsdfVoxel;

	fn linear_index(&self) -> usize {
		self.index
	}

	fn to_voxel(&self) -> TsdfVoxel {
		TsdfVoxel::new(self.distance, self.weight)
	}
}

impl VoxelRecord for OccupancyRecord {
	type Voxel = OccupancyVoxel;

	fn linear_index(&self) -> usize {
		self.index
	}

	fn to_voxel(&self) -> OccupancyVoxel {
		OccupancyVoxel::new(self.log_odds, self.weight)
	}
}

/// A layer of whichever voxel kind the file declared.
#[derive(Debug)]
pub enum LoadedGrid {
	Tsdf(VoxelGrid<TsdfVoxel>),
	Occupancy(VoxelGrid<OccupancyVoxel>),
}

impl LoadedGrid {
	/// Load a layer from a JSON file.
	pub fn load(path: &Path) -> Result<Self> {
		let content = std::fs::read_to_string(path)
			.with_context(|| format!("Failed to read grid file: {}", path.display()))?;
		Self::parse(&content).with_context(|| format!("Invalid grid file: {}", path.display()))
	}

	pub fn parse(content: &str) -> Result<Self> {
		let file: GridFile = serde_json::from_str(content).context("Failed to parse grid JSON")?;
		Ok(match file {
			GridFile::Tsdf(layer) => LoadedGrid::Tsdf(build_grid(layer)?),
			GridFile::Occupancy(layer) => LoadedGrid::Occupancy(build_grid(layer)?),
		})
	}

	pub fn kind(&self) -> &'static str {
		match self {
			LoadedGrid::Tsdf(_) => "tsdf",
			LoadedGrid::Occupancy(_) => "occupancy",
		}
	}

	pub fn voxel_size(&self) -> f32 {
		match self {
			LoadedGrid::Tsdf(grid) => grid.voxel_size(),
			LoadedGrid::Occupancy(grid) => grid.voxel_size(),
		}
	}

	pub fn num_allocated_blocks(&self) -> usize {
		match self {
			LoadedGrid::Tsdf(grid) => grid.num_allocated_blocks(),
			LoadedGrid::Occupancy(grid) => grid.num_allocated_blocks(),
		}
	}
}

fn build_grid<R: VoxelRecord>(layer: LayerRecord<R>) -> Result<VoxelGrid<R::Voxel>> {
	let config = GridConfig::new(layer.voxel_size, layer.voxels_per_side);
	let mut grid = VoxelGrid::new(config)?;
	let voxels_per_side = grid.voxels_per_side();
	let voxels_per_block = grid.voxels_per_block();

	for block_record in &layer.blocks {
		let block_index = BlockIndex::from(block_record.index);
		if !block_index.is_within_lattice(voxels_per_side) {
			anyhow::bail!(
				"block {:?} lies outside the addressable voxel lattice",
				block_record.index
			);
		}
		for record in &block_record.voxels {
			let linear = record.linear_index();
			if linear >= voxels_per_block {
				anyhow::bail!(
					"voxel index {} out of range in block {:?} (block holds {} voxels)",
					linear,
					block_record.index,
					voxels_per_block
				);
			}
			let voxel_index = voxel_index_from_linear_index(linear, voxels_per_side);
			let global = global_index_from_block_and_voxel(block_index, voxel_index, voxels_per_side);
			grid.set_voxel(global, record.to_voxel());
		}
	}

	Ok(grid)
}

#[cfg(test)]
mod tests {
	use super::*;
	use voxel_eval::{evaluate, EvalConfig, GlobalIndex, VoxelState};

	fn tsdf_layer(blocks: &str) -> VoxelGrid<TsdfVoxel> {
		let json = format!(
			r#"{{ "voxel_size": 1.0, "voxels_per_side": 4, "voxel_kind": "tsdf", "blocks": [{}] }}"#,
			blocks
		);
		match LoadedGrid::parse(&json).unwrap() {
			LoadedGrid::Tsdf(grid) => grid,
			LoadedGrid::Occupancy(_) => panic!("expected a TSDF layer"),
		}
	}

	#[test]
	fn test_parse_tsdf_layer() {
		let grid = LoadedGrid::parse(
			r#"{
				"voxel_size": 0.5,
				"voxels_per_side": 4,
				"voxel_kind": "tsdf",
				"blocks": [
					{ "index": [1, 0, 0], "voxels": [{ "index": 1, "distance": 0.1, "weight": 2.0 }] },
					{ "index": [0, 0, 0] }
				]
			}"#,
		)
		.unwrap();

		let LoadedGrid::Tsdf(grid) = grid else {
			panic!("expected a TSDF layer");
		};
		// Block (0, 0, 0) is listed without voxels and stays unallocated.
		assert_eq!(grid.num_allocated_blocks(), 1);
		// Linear index 1 is local (0, 0, 1) in block (1, 0, 0).
		assert_eq!(grid.state_at(GlobalIndex::new(4, 0, 1)), VoxelState::Occupied);
		assert_eq!(grid.state_at(GlobalIndex::new(0, 0, 0)), VoxelState::Unknown);
	}

	#[test]
	fn test_parse_occupancy_layer() {
		let grid = LoadedGrid::parse(
			r#"{
				"voxel_size": 1.0,
				"voxels_per_side": 2,
				"voxel_kind": "occupancy",
				"blocks": [
					{ "index": [0, 0, 0], "voxels": [
						{ "index": 0, "log_odds": 2.0, "weight": 1.0 },
						{ "index": 7, "log_odds": -2.0, "weight": 1.0 }
					] }
				]
			}"#,
		)
		.unwrap();

		assert_eq!(grid.kind(), "occupancy");
		let LoadedGrid::Occupancy(grid) = grid else {
			panic!("expected an occupancy layer");
		};
		assert_eq!(grid.state_at(GlobalIndex::new(0, 0, 0)), VoxelState::Occupied);
		assert_eq!(grid.state_at(GlobalIndex::new(1, 1, 1)), VoxelState::Free);
	}

	#[test]
	fn test_rejects_invalid_layers() {
		let out_of_range = r#"{
			"voxel_size": 1.0, "voxels_per_side": 2, "voxel_kind": "tsdf",
			"blocks": [{ "index": [0, 0, 0], "voxels": [{ "index": 8, "distance": 0.0, "weight": 1.0 }] }]
		}"#;
		assert!(LoadedGrid::parse(out_of_range).is_err());

		let bad_size = r#"{ "voxel_size": 0.0, "voxels_per_side": 2, "voxel_kind": "tsdf" }"#;
		assert!(LoadedGrid::parse(bad_size).is_err());

		let bad_kind = r#"{ "voxel_size": 1.0, "voxels_per_side": 2, "voxel_kind": "esdf" }"#;
		assert!(LoadedGrid::parse(bad_kind).is_err());
	}

	#[test]
	fn test_rejects_blocks_beyond_lattice() {
		let far_block = r#"{
			"voxel_size": 1.0, "voxels_per_side": 8, "voxel_kind": "tsdf",
			"blocks": [{ "index": [9223372036854775807, 0, 0], "voxels": [{ "index": 0, "distance": 0.0, "weight": 1.0 }] }]
		}"#;
		assert!(LoadedGrid::parse(far_block).is_err());

		let negative_block = r#"{
			"voxel_size": 1.0, "voxels_per_side": 8, "voxel_kind": "tsdf",
			"blocks": [{ "index": [0, -9223372036854775808, 0] }]
		}"#;
		assert!(LoadedGrid::parse(negative_block).is_err());
	}

	#[test]
	fn test_empty_listed_block_adds_no_unknown_voxels() {
		let voxels = r#"{ "index": [0, 0, 0], "voxels": [{ "index": 0, "distance": 0.0, "weight": 1.0 }] }"#;
		let ground_truth = tsdf_layer(voxels);
		let observed = tsdf_layer(voxels);
		let padded = tsdf_layer(&format!(r#"{}, {{ "index": [5, 5, 5] }}"#, voxels));

		assert_eq!(padded.num_allocated_blocks(), 1);
		assert_eq!(padded.allocated_blocks(), observed.allocated_blocks());

		let plain = evaluate(&ground_truth, &observed, &EvalConfig::default()).unwrap();
		let with_empty = evaluate(&ground_truth, &padded, &EvalConfig::default()).unwrap();
		assert_eq!(plain.coverage, with_empty.coverage);
		// One block of 64 voxels, one of them observed in both.
		assert_eq!(with_empty.coverage.unknown_in_both, 63);
	}
}
