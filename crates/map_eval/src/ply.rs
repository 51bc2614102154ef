//! ASCII PLY export for colored point clouds.

use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use voxel_eval::ColoredPoint;

/// Write `points` as an ASCII PLY cloud with RGBA vertex colors.
pub fn write_ply<W: Write>(writer: &mut W, points: &[ColoredPoint]) -> std::io::Result<()> {
	writeln!(writer, "ply")?;
	writeln!(writer, "format ascii 1.0")?;
	writeln!(writer, "element vertex {}", points.len())?;
	for axis in ["x", "y", "z"] {
		writeln!(writer, "property float {}", axis)?;
	}
	for channel in ["red", "green", "blue", "alpha"] {
		writeln!(writer, "property uchar {}", channel)?;
	}
	writeln!(writer, "end_header")?;

	for point in points {
		let p = point.position;
		let c = point.color;
		writeln!(writer, "{} {} {} {} {} {} {}", p.x, p.y, p.z, c.r, c.g, c.b, c.a)?;
	}
	Ok(())
}

/// Write a PLY file, replacing any existing one.
pub fn save_ply(path: &Path, points: &[ColoredPoint]) -> Result<()> {
	let file =
		File::create(path).with_context(|| format!("Failed to create: {}", path.display()))?;
	let mut writer = BufWriter::new(file);
	write_ply(&mut writer, points)
		.and_then(|()| writer.flush())
		.with_context(|| format!("Failed to write: {}", path.display()))
}
