//! Optional TOML configuration for an evaluation run.
//!
//! ```toml
//! prune_interior = true
//! out_of_bounds = "first_occupied"   # or "origin"
//! explore_from = [1.0, 2.0, 0.5]
//! max_explored = 1000000
//! ```
//!
//! Unknown space is traversable, so a search from an unenclosed seed only
//! stops at `max_explored`. The driver therefore always sets one.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

use voxel_eval::{BoundsSeed, EvalConfig, FrontierConfig};

/// Frontier search limit used when the config file does not set one.
pub const DEFAULT_MAX_EXPLORED: usize = 5_000_000;

/// Root configuration. Every field is optional.
#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
	/// Drop occupied voxels strictly inside a solid.
	pub prune_interior: bool,
	/// Bounding-box pruning of false positives.
	pub out_of_bounds: Option<BoundsSeedConfig>,
	/// World point to start a frontier search from in the observed map.
	pub explore_from: Option<[f32; 3]>,
	/// Frontier search limit.
	pub max_explored: usize,
}

impl Default for Config {
	fn default() -> Self {
		Self {
			prune_interior: false,
			out_of_bounds: None,
			explore_from: None,
			max_explored: DEFAULT_MAX_EXPLORED,
		}
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoundsSeedConfig {
	Origin,
	FirstOccupied,
}

impl From<BoundsSeedConfig> for BoundsSeed {
	fn from(seed: BoundsSeedConfig) -> Self {
		match seed {
			BoundsSeedConfig::Origin => BoundsSeed::Origin,
			BoundsSeedConfig::FirstOccupied => BoundsSeed::FirstOccupied,
		}
	}
}

impl Config {
	/// Load configuration from a TOML file.
	pub fn load(path: &Path) -> Result<Self> {
		let content = std::fs::read_to_string(path)
			.with_context(|| format!("Failed to read config file: {}", path.display()))?;
		Self::parse(&content)
	}

	pub fn parse(content: &str) -> Result<Self> {
		let config: Config = toml::from_str(content).with_context(|| "Failed to parse config TOML")?;

		if let Some(point) = config.explore_from {
			if point.iter().any(|v| !v.is_finite()) {
				anyhow::bail!("explore_from must be finite, got {:?}", point);
			}
		}
		if config.max_explored == 0 {
			anyhow::bail!("max_explored must be positive");
		}

		Ok(config)
	}

	pub fn to_eval_config(&self) -> EvalConfig {
		EvalConfig {
			prune_interior: self.prune_interior,
			out_of_bounds: self.out_of_bounds.map(BoundsSeed::from),
			explore_from: self.explore_from,
			frontier: FrontierConfig::unbounded().with_max_explored(self.max_explored),
		}
	}
}
