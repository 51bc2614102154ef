//! Voxel map evaluation.
//!
//! Compares an observed voxel layer against a ground-truth layer and prints
//! IoU, precision, recall and observed fraction.
//!
//! Outputs:
//! - stdout: human-readable report
//! - `<output>`: one `observed_fraction,iou,precision,recall` line appended
//! - `--publish <DIR>`: three PLY clouds
//!   - occupancy_pointcloud_diff.ply: missed ground truth (red)
//!   - occupancy_pointcloud_inter.ply: matched ground truth (green)
//!   - false_positive_observations.ply: false positives (yellow)

mod config;
mod grid_file;
mod ply;

use anyhow::{Context, Result};
use clap::Parser;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

use voxel_eval::{evaluate, points_from_indices, Color, EvalConfig, Evaluation, Voxel, VoxelGrid};

use config::Config;
use grid_file::LoadedGrid;

/// Voxel map evaluation against ground truth.
#[derive(Parser, Debug)]
#[command(name = "map_eval")]
#[command(about = "Compares an observed voxel map against ground truth")]
struct Args {
	/// Ground-truth layer (JSON).
	ground_truth: PathBuf,

	/// Observed layer (JSON).
	observed: PathBuf,

	/// CSV file to append the metrics line to.
	output: Option<PathBuf>,

	/// Directory to write the comparison point clouds into.
	#[arg(short, long)]
	publish: Option<PathBuf>,

	/// Path to an optional configuration TOML file.
	#[arg(short, long)]
	config: Option<PathBuf>,

	/// Log per-stage details.
	#[arg(short, long)]
	verbose: bool,
}

fn main() -> Result<()> {
	let args = Args::parse();
	init_logging(args.verbose);

	let config = match &args.config {
		Some(path) => Config::load(path)?,
		None => Config::default(),
	};
	let eval_config = config.to_eval_config();

	let ground_truth = LoadedGrid::load(&args.ground_truth)?;
	let observed = LoadedGrid::load(&args.observed)?;
	tracing::info!(
		ground_truth = %args.ground_truth.display(),
		kind = ground_truth.kind(),
		blocks = ground_truth.num_allocated_blocks(),
		"loaded ground truth"
	);
	tracing::info!(
		observed = %args.observed.display(),
		kind = observed.kind(),
		blocks = observed.num_allocated_blocks(),
		"loaded observed map"
	);

	let voxel_size = ground_truth.voxel_size();
	let evaluation = match (&ground_truth, &observed) {
		(LoadedGrid::Tsdf(gt), LoadedGrid::Tsdf(obs)) => run(gt, obs, &eval_config)?,
		(LoadedGrid::Tsdf(gt), LoadedGrid::Occupancy(obs)) => run(gt, obs, &eval_config)?,
		(LoadedGrid::Occupancy(gt), LoadedGrid::Tsdf(obs)) => run(gt, obs, &eval_config)?,
		(LoadedGrid::Occupancy(gt), LoadedGrid::Occupancy(obs)) => run(gt, obs, &eval_config)?,
	};

	println!("{}", evaluation.metrics);
	print_details(&evaluation);

	if let Some(output) = &args.output {
		append_csv(output, &evaluation.metrics.csv_line())?;
		println!("Appended metrics to: {}", output.display());
	}

	if let Some(dir) = &args.publish {
		publish(dir, &evaluation, voxel_size)?;
		println!("Point clouds written to: {}", dir.display());
	}

	Ok(())
}

fn init_logging(verbose: bool) {
	let default_level = if verbose { "debug" } else { "info" };
	let filter =
		EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.init();
}

fn run<A: Voxel, B: Voxel>(
	ground_truth: &VoxelGrid<A>,
	observed: &VoxelGrid<B>,
	config: &EvalConfig,
) -> Result<Evaluation> {
	evaluate(ground_truth, observed, config).context("Observed and ground-truth layers cannot be compared")
}

fn print_details(evaluation: &Evaluation) {
	let coverage = evaluation.coverage;
	println!(
		"coverage: {} observed in ground truth, {} observed in map, {} unknown in both",
		coverage.ground_truth_observed, coverage.observed_observed, coverage.unknown_in_both
	);

	if let Some(exploration) = &evaluation.exploration {
		println!(
			"exploration: {} explored ({} observed, {} unobserved), {} obstacles{}",
			exploration.explored.len(),
			exploration.observed.len(),
			exploration.unobserved.len(),
			exploration.obstacles.len(),
			if exploration.truncated { ", truncated" } else { "" }
		);
	}
}

/// Append one line to a CSV file, creating it if needed.
fn append_csv(path: &Path, line: &str) -> Result<()> {
	let mut file = OpenOptions::new()
		.create(true)
		.append(true)
		.open(path)
		.with_context(|| format!("Unable to open: {}", path.display()))?;
	writeln!(file, "{}", line).with_context(|| format!("Failed to write: {}", path.display()))?;
	Ok(())
}

fn publish(dir: &Path, evaluation: &Evaluation, voxel_size: f32) -> Result<()> {
	std::fs::create_dir_all(dir)
		.with_context(|| format!("Failed to create output dir: {}", dir.display()))?;

	let clouds = [
		("occupancy_pointcloud_diff.ply", evaluation.missed(), Color::RED),
		("occupancy_pointcloud_inter.ply", evaluation.matched(), Color::GREEN),
		("false_positive_observations.ply", evaluation.false_positives(), Color::YELLOW),
	];

	for (name, indices, color) in clouds {
		let points = points_from_indices(indices, color, voxel_size);
		ply::save_ply(&dir.join(name), &points).with_context(|| format!("Building {}", name))?;
		println!("  ✓ {} ({} points)", name, points.len());
	}
	Ok(())
}
