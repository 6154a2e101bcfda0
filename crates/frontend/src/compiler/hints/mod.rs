// Copyright 2025 Irreducible Inc.
//! Hint system.
//!
//! Hints are deterministic computations that happen on the prover side.
//!
//! They can be used for operations that require many constraints to compute but few constraints
//! to verify. A hint only ever produces candidate values; the gadget that calls it must tie the
//! outputs back to its operands with constraints.

use num_bigint::BigInt;

mod big_uint_divide;
mod carry_chain;
mod limb_split;

pub use big_uint_divide::BigUintDivideHint;
pub use carry_chain::CarryChainHint;
pub use limb_split::LimbSplitHint;

/// Reasons a hint refuses to produce outputs.
#[allow(missing_docs)] // errors are self-documenting
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HintError {
	#[error("division by zero")]
	DivisionByZero,
	#[error("{hint} expects non-negative inputs, got {value}")]
	NegativeInput { hint: &'static str, value: BigInt },
	#[error("{hint} expects {expected} inputs, got {actual}")]
	ShapeMismatch {
		hint: &'static str,
		expected: usize,
		actual: usize,
	},
	#[error("carry chain leaves residue {residue} at position {position}")]
	CarryResidue { position: usize, residue: BigInt },
}

/// Hint handler trait for off-circuit witness computations.
pub trait Hint {
	/// A short name used in logs and errors.
	fn name(&self) -> &'static str;

	/// Get the shape of this hint (n_inputs, n_outputs)
	fn shape(&self, dimensions: &[usize]) -> (usize, usize);

	/// Execute the hint with given inputs, writing outputs
	fn execute(
		&self,
		dimensions: &[usize],
		inputs: &[BigInt],
		outputs: &mut [BigInt],
	) -> Result<(), HintError>;
}

/// Runs `hint` after checking that `inputs` matches its shape.
pub fn run_hint(
	hint: &dyn Hint,
	dimensions: &[usize],
	inputs: &[BigInt],
) -> Result<Vec<BigInt>, HintError> {
	let (n_inputs, n_outputs) = hint.shape(dimensions);
	if inputs.len() != n_inputs {
		return Err(HintError::ShapeMismatch {
			hint: hint.name(),
			expected: n_inputs,
			actual: inputs.len(),
		});
	}
	let mut outputs = vec![BigInt::ZERO; n_outputs];
	hint.execute(dimensions, inputs, &mut outputs)?;
	Ok(outputs)
}
