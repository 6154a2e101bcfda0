// Copyright 2025 Irreducible Inc.

//! Circuit construction frontend for limb arithmetic.
//!
//! This crate provides the [`CircuitBuilder`] API for constructing arithmetic circuits over the
//! native field. You describe your computation as operations on field elements, and the
//! frontend records linear, MUL and range constraints.
//!
//! # Usage Flow
//!
//! Use [`CircuitBuilder`] to construct your circuit. Call methods like `add_witness()`
//! and `add_inout()` to create [`Wire`]s. Every wire is created together with its value, so
//! operations like `add()`, `mul()` and `icmp_eq()` compute their outputs immediately and
//! assertions report violations as soon as they are emitted.
//!
//! Off-circuit computations such as quotients and carries are [hints][`hints`]: plain integer
//! functions whose outputs the caller injects as witnesses and then constrains.
//!
//! When you call `build()`, the builder lays out the value vector and produces a [`Circuit`]
//! that holds the constraint system together with the recorded values.
//!
//! Use [`CircuitStat`] to inspect constraint counts, and [`ConstraintCounts`] snapshots to
//! attribute cost to individual operations.

#![warn(missing_docs)]

mod compiler;
pub mod stat;

pub mod util;

pub use compiler::{
	CircuitBuilder, Wire,
	circuit::Circuit,
	error::ConstraintError,
	hints::{self, HintError},
};
pub use stat::{CircuitStat, ConstraintCounts};
