// Copyright 2025 Irreducible Inc.
use limbo_core::{ConstraintSystemError, consts::MAX_PRIMITIVE_RANGE_BITS};

/// Error returned when a constraint does not hold for the values being assigned.
///
/// Names are fully qualified with the sub-circuit path, e.g.
/// `bigint_mul.carry_chain.position[3]`.
#[allow(missing_docs)] // errors are self-documenting
#[derive(Debug, thiserror::Error)]
pub enum ConstraintError {
	#[error("assertion {name} failed: {detail}")]
	AssertionFailed { name: String, detail: String },
	#[error(
		"range check {name} asks for {n_bits} bits, the primitive check supports at most {MAX_PRIMITIVE_RANGE_BITS}"
	)]
	RangeTooWide { name: String, n_bits: u32 },
	#[error("constraint {name} is not satisfied: {source}")]
	Unsatisfied {
		name: String,
		#[source]
		source: ConstraintSystemError,
	},
	#[error(transparent)]
	ConstraintSystem(#[from] ConstraintSystemError),
}
