// Copyright 2025 Irreducible Inc.
use anyhow::Result;
use clap::Parser;
use limbo_examples::Cli;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
	tracing_subscriber::fmt()
		.with_env_filter(EnvFilter::from_default_env())
		.with_writer(std::io::stderr)
		.init();

	Cli::parse().run()
}
