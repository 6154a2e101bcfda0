// Copyright 2025 Irreducible Inc.
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use limbo_circuits::bignum::BigIntParams;

use crate::{
	ops::{Op, OpReport, measure},
	snapshot,
};

/// Constraint costs of the bignum gadgets per limb layout.
///
/// Every report builds a fresh circuit with fixed operands, measures what the selected
/// operation emits and renders the statistics of the whole circuit.
#[derive(Debug, Parser)]
#[command(name = "bigint-stats", about = "Constraint costs of the bignum gadgets")]
pub struct Cli {
	#[command(subcommand)]
	command: Option<Commands>,

	/// Layout to report, e.g. `384_6`. Repeat for several; all layouts by default
	#[arg(long = "layout", global = true)]
	layouts: Vec<String>,

	/// Operation to report
	#[arg(long, value_enum, default_value_t = Op::All, global = true)]
	op: Op,

	/// Directory holding the snapshot files
	#[arg(long, global = true)]
	snapshot_dir: Option<PathBuf>,
}

/// Subcommands of `bigint-stats`
#[derive(Debug, Clone, Copy, Subcommand)]
enum Commands {
	/// Display constraint statistics (default)
	Stat,
	/// Verify the statistics against the snapshots
	CheckSnapshot,
	/// Update the snapshots with the current statistics
	BlessSnapshot,
}

impl Cli {
	/// Runs the selected subcommand.
	pub fn run(self) -> Result<()> {
		let layouts = self.layouts()?;
		let command = self.command.unwrap_or(Commands::Stat);
		let snapshot_dir = match (&self.snapshot_dir, command) {
			(Some(dir), _) => Some(dir.clone()),
			(None, Commands::Stat) => None,
			(None, _) => Some(snapshot::default_dir()?),
		};

		let mut mismatches = Vec::new();
		for params in layouts {
			for op in self.op.expand() {
				let report = measure(params, op)
					.with_context(|| format!("failed to measure {op} on layout {}", params.name))?;
				match (command, &snapshot_dir) {
					(Commands::Stat, _) => print_report(&report),
					(Commands::CheckSnapshot, Some(dir)) => {
						if let Err(err) = snapshot::check_snapshot(dir, &report) {
							eprintln!("{err:#}");
							mismatches.push(report.name());
						}
					}
					(Commands::BlessSnapshot, Some(dir)) => snapshot::bless_snapshot(dir, &report)?,
					(_, None) => unreachable!("snapshot commands always resolve a directory"),
				}
			}
		}

		if !mismatches.is_empty() {
			anyhow::bail!("snapshots out of date: {}", mismatches.join(", "));
		}
		Ok(())
	}

	fn layouts(&self) -> Result<Vec<&'static BigIntParams>> {
		if self.layouts.is_empty() {
			return Ok(BigIntParams::all().iter().collect());
		}
		self.layouts
			.iter()
			.map(|name| {
				BigIntParams::by_name(name).with_context(|| {
					let known: Vec<_> = BigIntParams::all().iter().map(|p| p.name).collect();
					format!("unknown layout {name}, expected one of {}", known.join(", "))
				})
			})
			.collect()
	}
}

fn print_report(report: &OpReport) {
	println!("{report}");
}

#[cfg(test)]
mod tests {
	use clap::CommandFactory;

	use super::*;

	#[test]
	fn test_cli_definition() {
		Cli::command().debug_assert();
	}

	#[test]
	fn test_parse_layouts_and_op() {
		let cli = Cli::try_parse_from([
			"bigint-stats",
			"--layout",
			"384_6",
			"--layout",
			"2048_18",
			"--op",
			"mul",
		])
		.unwrap();
		assert_eq!(cli.op, Op::Mul);
		let layouts = cli.layouts().unwrap();
		assert_eq!(layouts.len(), 2);
		assert_eq!(layouts[1].limb_size, 116);
		assert!(cli.command.is_none());
	}

	#[test]
	fn test_default_layouts() {
		let cli = Cli::try_parse_from(["bigint-stats", "stat"]).unwrap();
		assert_eq!(cli.op, Op::All);
		assert_eq!(cli.layouts().unwrap().len(), BigIntParams::all().len());
	}

	#[test]
	fn test_unknown_layout() {
		let cli = Cli::try_parse_from(["bigint-stats", "--layout", "384_5"]).unwrap();
		let err = cli.layouts().unwrap_err();
		assert!(err.to_string().contains("unknown layout 384_5"));
	}

	#[test]
	fn test_subcommand_after_global_args() {
		let cli = Cli::try_parse_from(["bigint-stats", "check-snapshot", "--op", "add"]).unwrap();
		assert!(matches!(cli.command, Some(Commands::CheckSnapshot)));
		assert_eq!(cli.op, Op::Add);
	}
}
