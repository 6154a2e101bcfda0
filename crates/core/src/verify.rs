// Copyright 2025 Irreducible Inc.
//! Routines for checking whether the
//! [constraint system][`crate::constraint_system::ConstraintSystem`] is satisfied with the given
//! [value vector][`ValueVec`].

use ff::Field;

use crate::{
	constraint_system::{
		ConstraintSystem, LinearConstraint, MulConstraint, RangeConstraint, Term, ValueVec,
	},
	error::ConstraintSystemError,
	felt::{Felt, felt_bits, felt_to_bigint},
};

/// Evaluates an operand (sum of scaled values) using a ValueVec
pub fn eval_operand(witness: &ValueVec, operand: &[Term]) -> Felt {
	operand.iter().fold(Felt::ZERO, |acc, term| {
		acc + term.coeff * witness[term.value_index]
	})
}

/// Verifies that a linear constraint is satisfied: Σ cᵢ·vᵢ = 0
pub fn verify_linear_constraint(
	witness: &ValueVec,
	constraint: &LinearConstraint,
) -> Result<(), String> {
	let sum = eval_operand(witness, &constraint.terms);
	if bool::from(sum.is_zero()) {
		Ok(())
	} else {
		Err(format!("linear combination evaluates to {} (expected 0)", felt_to_bigint(sum)))
	}
}

/// Verifies that a MUL constraint is satisfied: A * B = C
pub fn verify_mul_constraint(witness: &ValueVec, constraint: &MulConstraint) -> Result<(), String> {
	let a = eval_operand(witness, &constraint.a);
	let b = eval_operand(witness, &constraint.b);
	let c = eval_operand(witness, &constraint.c);

	if a * b == c {
		Ok(())
	} else {
		Err(format!(
			"{} * {} = {} (expected {})",
			felt_to_bigint(a),
			felt_to_bigint(b),
			felt_to_bigint(a * b),
			felt_to_bigint(c),
		))
	}
}

/// Verifies that a range constraint is satisfied: 0 ≤ v < 2^n
pub fn verify_range_constraint(
	witness: &ValueVec,
	constraint: &RangeConstraint,
) -> Result<(), String> {
	let value = witness[constraint.value_index];
	let bits = felt_bits(value);
	if bits <= constraint.n_bits as u64 {
		Ok(())
	} else {
		Err(format!(
			"value {} at index {} needs {bits} bits (expected at most {})",
			felt_to_bigint(value),
			constraint.value_index.0,
			constraint.n_bits,
		))
	}
}

/// Verifies all constraints in a constraint system are satisfied by the witness.
///
/// Returns the first violated constraint. Constraints are checked in the order linear, MUL,
/// range.
pub fn verify_constraints(
	cs: &ConstraintSystem,
	witness: &ValueVec,
) -> Result<(), ConstraintSystemError> {
	cs.validate()?;

	if witness.size() != cs.value_vec_len() {
		return Err(ConstraintSystemError::ValueVecLenMismatch {
			expected: cs.value_vec_len(),
			actual: witness.size(),
		});
	}

	// First check that the witness correctly populated the constants section.
	for (index, constant) in cs.constants.iter().enumerate() {
		if witness.get(index) != *constant {
			return Err(ConstraintSystemError::ConstantMismatch { index });
		}
	}
	for (i, constraint) in cs.linear_constraints.iter().enumerate() {
		verify_linear_constraint(witness, constraint).map_err(|message| {
			ConstraintSystemError::Unsatisfied {
				constraint_type: "linear",
				constraint_index: i,
				message,
			}
		})?;
	}
	for (i, constraint) in cs.mul_constraints.iter().enumerate() {
		verify_mul_constraint(witness, constraint).map_err(|message| {
			ConstraintSystemError::Unsatisfied {
				constraint_type: "mul",
				constraint_index: i,
				message,
			}
		})?;
	}
	for (i, constraint) in cs.range_constraints.iter().enumerate() {
		verify_range_constraint(witness, constraint).map_err(|message| {
			ConstraintSystemError::Unsatisfied {
				constraint_type: "range",
				constraint_index: i,
				message,
			}
		})?;
	}
	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::constraint_system::{ValueIndex, ValueVecLayout};

	// Values: [1, x, y, z] with x * y = z and x + y - 7 = 0.
	fn small_system() -> ConstraintSystem {
		let layout = ValueVecLayout {
			n_const: 1,
			n_inout: 0,
			n_witness: 3,
			n_internal: 0,
			offset_inout: 1,
			offset_witness: 1,
			total_len: 4,
		};
		ConstraintSystem::new(
			vec![Felt::ONE],
			layout,
			vec![LinearConstraint {
				terms: vec![
					Term::plain(ValueIndex(1)),
					Term::plain(ValueIndex(2)),
					Term::new(-Felt::from(7u64), ValueIndex::ONE),
				],
			}],
			vec![MulConstraint {
				a: vec![Term::plain(ValueIndex(1))],
				b: vec![Term::plain(ValueIndex(2))],
				c: vec![Term::plain(ValueIndex(3))],
			}],
			vec![RangeConstraint {
				value_index: ValueIndex(3),
				n_bits: 4,
			}],
		)
	}

	fn values(cs: &ConstraintSystem, x: u64, y: u64, z: u64) -> ValueVec {
		let mut values = cs.new_value_vec();
		values[ValueIndex(1)] = Felt::from(x);
		values[ValueIndex(2)] = Felt::from(y);
		values[ValueIndex(3)] = Felt::from(z);
		values
	}

	#[test]
	fn test_satisfied() {
		let cs = small_system();
		verify_constraints(&cs, &values(&cs, 3, 4, 12)).unwrap();
	}

	#[test]
	fn test_linear_violation() {
		let cs = small_system();
		let err = verify_constraints(&cs, &values(&cs, 3, 5, 15)).unwrap_err();
		assert!(matches!(
			err,
			ConstraintSystemError::Unsatisfied {
				constraint_type: "linear",
				constraint_index: 0,
				..
			}
		));
	}

	#[test]
	fn test_mul_violation() {
		let cs = small_system();
		let err = verify_constraints(&cs, &values(&cs, 3, 4, 11)).unwrap_err();
		assert!(matches!(err, ConstraintSystemError::Unsatisfied { constraint_type: "mul", .. }));
	}

	#[test]
	fn test_range_violation() {
		let mut cs = small_system();
		cs.range_constraints[0].n_bits = 2;
		let err = verify_constraints(&cs, &values(&cs, 1, 6, 6)).unwrap_err();
		assert!(err.to_string().contains("needs 3 bits"));
	}

	#[test]
	fn test_constant_mismatch() {
		let cs = small_system();
		let mut witness = values(&cs, 3, 4, 12);
		witness.set(0, Felt::from(2u64));
		assert!(matches!(
			verify_constraints(&cs, &witness),
			Err(ConstraintSystemError::ConstantMismatch { index: 0 })
		));
	}
}
