// Copyright 2025 Irreducible Inc.
use limbo_frontend::{ConstraintError, HintError};

use crate::range::RangeCheckError;

/// Errors of the bignum gadgets.
#[allow(missing_docs)] // errors are self-documenting
#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("{value} is negative, layout {layout} holds values in [0, 2^{max_bits} - 1]")]
	Negative {
		layout: &'static str,
		value: num_bigint::BigInt,
		max_bits: u64,
	},
	#[error("{what} has {value_bits} bits and exceeds MAX = 2^{max_bits} - 1 of layout {layout}")]
	ExceedsMax {
		what: &'static str,
		layout: &'static str,
		value_bits: u64,
		max_bits: u64,
	},
	#[error("division by zero")]
	DivisionByZero,
	#[error("layout {layout} has {expected} limbs, got {actual}")]
	LimbCountMismatch {
		layout: &'static str,
		expected: usize,
		actual: usize,
	},
	#[error("range check {name} asks for {n_bits} bits, more than a field element can hold")]
	RangeTooWide { name: String, n_bits: u32 },
	#[error("carry chain {name} has positions of up to {n_bits} bits, which may wrap the field")]
	ChainOverflow { name: String, n_bits: u64 },
	#[error(transparent)]
	Constraint(#[from] ConstraintError),
	#[error(transparent)]
	Hint(HintError),
}

impl From<HintError> for Error {
	fn from(err: HintError) -> Self {
		match err {
			HintError::DivisionByZero => Error::DivisionByZero,
			err => Error::Hint(err),
		}
	}
}

impl From<RangeCheckError> for Error {
	fn from(err: RangeCheckError) -> Self {
		match err {
			RangeCheckError::TooWide { name, n_bits } => Error::RangeTooWide { name, n_bits },
			RangeCheckError::Constraint(err) => Error::Constraint(err),
			RangeCheckError::Hint(err) => err.into(),
		}
	}
}
