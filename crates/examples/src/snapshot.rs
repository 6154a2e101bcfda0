// Copyright 2025 Irreducible Inc.
use std::{
	env, fs,
	path::{Path, PathBuf},
};

use anyhow::{Context, Result};

use crate::ops::OpReport;

/// The `snapshots/` directory of this crate, found through `CARGO_MANIFEST_DIR`.
pub fn default_dir() -> Result<PathBuf> {
	let manifest_dir = env::var("CARGO_MANIFEST_DIR").context(
		"CARGO_MANIFEST_DIR environment variable not set. \
		Please run this command via 'cargo run --bin bigint-stats' or pass --snapshot-dir.",
	)?;
	Ok(PathBuf::from(manifest_dir).join("snapshots"))
}

/// Get the snapshot file path for a report
pub fn snapshot_path(dir: &Path, report: &OpReport) -> PathBuf {
	dir.join(format!("{}.snap", report.name()))
}

/// Check if the report matches its snapshot
pub fn check_snapshot(dir: &Path, report: &OpReport) -> Result<()> {
	let snapshot_path = snapshot_path(dir, report);

	if !snapshot_path.exists() {
		anyhow::bail!(
			"Snapshot file not found at {}\n\
			Run 'bigint-stats --layout {} --op {} bless-snapshot' to create it.",
			snapshot_path.display(),
			report.params.name,
			report.op
		);
	}

	let expected = fs::read_to_string(&snapshot_path)
		.with_context(|| format!("Failed to read snapshot file: {}", snapshot_path.display()))?;

	let actual = report.to_string();

	if expected != actual {
		print_snapshot_diff(&expected, &actual, &report.name());
		anyhow::bail!("Statistics of {} do not match snapshot", report.name());
	}

	println!("✓ {} matches snapshot", report.name());
	Ok(())
}

/// Update the snapshot with the current report
pub fn bless_snapshot(dir: &Path, report: &OpReport) -> Result<()> {
	fs::create_dir_all(dir)
		.with_context(|| format!("Failed to create snapshot directory: {}", dir.display()))?;

	let snapshot_path = snapshot_path(dir, report);
	fs::write(&snapshot_path, report.to_string())
		.with_context(|| format!("Failed to write snapshot file: {}", snapshot_path.display()))?;

	println!("✓ Snapshot updated at {}", snapshot_path.display());
	Ok(())
}

/// Print a diff between expected and actual snapshots
fn print_snapshot_diff(expected: &str, actual: &str, name: &str) {
	eprintln!("Error: statistics of {name} do not match snapshot!");
	eprintln!("\n--- Diff ---");

	let expected_lines: Vec<_> = expected.lines().collect();
	let actual_lines: Vec<_> = actual.lines().collect();

	let max_lines = expected_lines.len().max(actual_lines.len());
	for i in 0..max_lines {
		let exp_line = expected_lines.get(i).unwrap_or(&"");
		let act_line = actual_lines.get(i).unwrap_or(&"");

		if exp_line != act_line {
			eprintln!("Line {}: - {}", i + 1, exp_line);
			eprintln!("Line {}: + {}", i + 1, act_line);
		}
	}
}

#[cfg(test)]
mod tests {
	use std::process;

	use limbo_circuits::bignum::{L384x3, LimbLayout};

	use super::*;
	use crate::ops::{Op, measure};

	fn scratch_dir(name: &str) -> PathBuf {
		env::temp_dir().join(format!("limbo-snapshots-{name}-{}", process::id()))
	}

	#[test]
	fn test_bless_then_check() {
		let dir = scratch_dir("bless");
		let report = measure(&L384x3::params(), Op::Sub).unwrap();

		assert!(check_snapshot(&dir, &report).is_err());
		bless_snapshot(&dir, &report).unwrap();
		check_snapshot(&dir, &report).unwrap();

		fs::write(snapshot_path(&dir, &report), "stale").unwrap();
		assert!(check_snapshot(&dir, &report).is_err());

		fs::remove_dir_all(&dir).unwrap();
	}
}
