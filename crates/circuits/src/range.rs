// Copyright 2025 Irreducible Inc.
//! Range checks of arbitrary width.
//!
//! The primitive range check only accepts widths up to [`MAX_PRIMITIVE_RANGE_BITS`]. Wider
//! checks split the value into pieces, bound every piece with a primitive check and prove with
//! one linear constraint that the pieces recombine to the original value:
//!
//! ```text
//! x = p₀ + p₁·2^w₀ + p₂·2^(w₀+w₁) + ...
//! ```
//!
//! The split is fixed by the asserted width, see [`decomposition`].

use ff::Field;
use limbo_core::{
	Felt,
	consts::{FELT_CAPACITY_BITS, MAX_PRIMITIVE_RANGE_BITS},
	felt::{felt_from_biguint, felt_pow2},
};
use limbo_frontend::{CircuitBuilder, ConstraintError, HintError, Wire};

/// Errors of [`range_check`].
#[allow(missing_docs)]
#[derive(Debug, thiserror::Error)]
pub enum RangeCheckError {
	#[error(
		"range check {name} asks for {n_bits} bits, recombination is only sound up to {FELT_CAPACITY_BITS} bits"
	)]
	TooWide { name: String, n_bits: u32 },
	#[error(transparent)]
	Constraint(#[from] ConstraintError),
	#[error(transparent)]
	Hint(#[from] HintError),
}

/// Returns the widths of the pieces used to range check a value of `n_bits` bits, least
/// significant first.
///
/// The limb widths of the named layouts have fixed splits. Any other width is covered by
/// 64-bit pieces and one remainder piece.
pub fn decomposition(n_bits: u32) -> Vec<u32> {
	match n_bits {
		32 => vec![32],
		48 => vec![32, 16],
		64 => vec![64],
		116 => vec![64, 52],
		128 => vec![64, 64],
		192 => vec![64, 64, 64],
		n if n <= MAX_PRIMITIVE_RANGE_BITS => vec![n],
		n => {
			let mut widths =
				vec![MAX_PRIMITIVE_RANGE_BITS; (n / MAX_PRIMITIVE_RANGE_BITS) as usize];
			if n % MAX_PRIMITIVE_RANGE_BITS != 0 {
				widths.push(n % MAX_PRIMITIVE_RANGE_BITS);
			}
			widths
		}
	}
}

/// Asserts `0 ≤ x < 2^n_bits`.
///
/// Single-piece widths emit one primitive range check named `name`. Otherwise the pieces are
/// checked as `name.piece[i]` and the recombination is asserted as `name.recombine`.
///
/// # Errors
///
/// - [`RangeCheckError::TooWide`] if `n_bits` exceeds the field capacity. Nothing is emitted.
/// - [`RangeCheckError::Constraint`] if the value does not fit.
///
/// # Cost
///
/// One range constraint per piece, plus one linear constraint when there is more than one piece.
pub fn range_check(
	builder: &CircuitBuilder,
	name: impl Into<String>,
	x: Wire,
	n_bits: u32,
) -> Result<(), RangeCheckError> {
	let name = name.into();
	if n_bits > FELT_CAPACITY_BITS {
		return Err(RangeCheckError::TooWide {
			name: builder.qualified_name(&name),
			n_bits,
		});
	}

	let widths = decomposition(n_bits);
	if let [width] = widths[..] {
		builder.range_check_prim(name, x, width)?;
		return Ok(());
	}

	let builder = builder.subcircuit(name);
	let pieces = builder.limb_split_hint(&builder.value_biguint(x), &widths)?;

	let mut terms = Vec::with_capacity(widths.len() + 1);
	let mut shift = 0;
	for (i, (piece, &width)) in pieces.iter().zip(&widths).enumerate() {
		let piece = builder.add_witness(felt_from_biguint(piece));
		builder.range_check_prim(format!("piece[{i}]"), piece, width)?;
		terms.push((felt_pow2(shift), piece));
		shift += width;
	}
	terms.push((-Felt::ONE, x));
	builder.assert_lincomb_zero("recombine", &terms, Felt::ZERO)?;
	Ok(())
}

#[cfg(test)]
mod tests {
	use limbo_frontend::Circuit;
	use num_bigint::BigUint;
	use num_traits::One;
	use rstest::rstest;

	use super::*;

	fn pow2(n: u32) -> BigUint {
		BigUint::one() << n
	}

	fn check(value: &BigUint, n_bits: u32) -> (Result<(), RangeCheckError>, Circuit) {
		let builder = CircuitBuilder::new();
		let x = builder.add_witness(felt_from_biguint(value));
		let result = range_check(&builder, "x", x, n_bits);
		(result, builder.build())
	}

	#[rstest]
	#[case(32, &[32])]
	#[case(48, &[32, 16])]
	#[case(64, &[64])]
	#[case(116, &[64, 52])]
	#[case(128, &[64, 64])]
	#[case(192, &[64, 64, 64])]
	#[case(17, &[17])]
	#[case(134, &[64, 64, 6])]
	#[case(196, &[64, 64, 64, 4])]
	fn test_decomposition(#[case] n_bits: u32, #[case] expected: &[u32]) {
		let widths = decomposition(n_bits);
		assert_eq!(widths, expected);
		assert_eq!(widths.iter().sum::<u32>(), n_bits);
	}

	#[rstest]
	fn test_boundary_values(#[values(32, 48, 64, 116, 128, 192, 70)] n_bits: u32) {
		let max = pow2(n_bits) - 1u32;
		let (result, circuit) = check(&max, n_bits);
		result.unwrap();
		circuit.verify().unwrap();

		let (result, _) = check(&pow2(n_bits), n_bits);
		assert!(matches!(result, Err(RangeCheckError::Constraint(_))));

		let (result, circuit) = check(&BigUint::ZERO, n_bits);
		result.unwrap();
		circuit.verify().unwrap();
	}

	#[test]
	fn test_cost_of_116_bits() {
		let builder = CircuitBuilder::new();
		let x = builder.add_witness(felt_from_biguint(&(pow2(115) + 7u32)));
		let before = builder.counts();
		range_check(&builder, "x", x, 116).unwrap();
		let cost = builder.counts() - before;
		assert_eq!(cost.n_range, 2);
		assert_eq!(cost.range_bits, 116);
		assert_eq!(cost.n_linear, 1);
		assert_eq!(cost.n_hints, 1);
	}

	#[test]
	fn test_failure_names_piece() {
		let (result, _) = check(&pow2(130), 128);
		match result.unwrap_err() {
			RangeCheckError::Constraint(ConstraintError::AssertionFailed { name, .. }) => {
				assert_eq!(name, "x.piece[1]");
			}
			other => panic!("unexpected error: {other}"),
		}
	}

	#[test]
	fn test_too_wide() {
		let (result, circuit) = check(&BigUint::one(), FELT_CAPACITY_BITS + 1);
		assert!(matches!(result, Err(RangeCheckError::TooWide { n_bits: 255, .. })));
		assert_eq!(circuit.constraint_system().n_range_constraints(), 0);
	}

	#[test]
	fn test_tampered_value_rejected() {
		let (result, circuit) = check(&(pow2(128) - 1u32), 128);
		result.unwrap();
		let x_index = circuit
			.constraint_system()
			.range_constraints
			.first()
			.map(|range| range.value_index)
			.unwrap();
		// Moving a piece out of its range breaks its primitive check.
		let mut values = circuit.values().clone();
		values[x_index] = felt_pow2(64);
		assert!(circuit.verify_values(&values).is_err());
	}
}
