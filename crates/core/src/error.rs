// Copyright 2025 Irreducible Inc.
//! Hosts error definitions for the core crate.

use crate::consts::MAX_PRIMITIVE_RANGE_BITS;

/// Constraint system related error.
#[allow(missing_docs)] // errors are self-documenting
#[derive(Debug, thiserror::Error)]
pub enum ConstraintSystemError {
	#[error("the data length doesn't match layout. Expected: {expected}, Actual: {actual}")]
	ValueVecLenMismatch { expected: usize, actual: usize },
	#[error("the value vec layout is inconsistent: {reason}")]
	InconsistentLayout { reason: &'static str },
	#[error("the first constant of the constraint system must be one")]
	MissingOneConstant,
	#[error("constant at index {index} does not match the value in the value vec")]
	ConstantMismatch { index: usize },
	#[error(
		"{constraint_type} #{constraint_index} refers to out-of-range value index in {operand_name} operand (index {value_index} >= total length {total_len})"
	)]
	OutOfRangeValueIndex {
		constraint_type: &'static str,
		constraint_index: usize,
		operand_name: &'static str,
		value_index: u32,
		total_len: usize,
	},
	#[error(
		"range #{constraint_index} asserts {n_bits} bits, the primitive check supports at most {MAX_PRIMITIVE_RANGE_BITS}"
	)]
	RangeTooWide { constraint_index: usize, n_bits: u32 },
	#[error("{constraint_type} constraint {constraint_index} failed: {message}")]
	Unsatisfied {
		constraint_type: &'static str,
		constraint_index: usize,
		message: String,
	},
}
