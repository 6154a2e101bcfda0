// Copyright 2025 Irreducible Inc.
//! Constraint cost reports for the bignum gadgets.
//!
//! [`ops`] builds one small circuit per layout and operation and measures what the operation
//! emits. [`cli`] exposes the reports as the `bigint-stats` binary, and [`snapshot`] pins them
//! in files under `snapshots/` so cost regressions show up in review.

pub mod cli;
pub mod ops;
pub mod snapshot;

pub use cli::Cli;
