// Copyright 2025 Irreducible Inc.
//! BigUint division hint implementation

use num_bigint::{BigInt, Sign};
use num_integer::Integer;

use super::{Hint, HintError};

/// Computes `(dividend / divisor, dividend % divisor)` of two non-negative integers.
pub struct BigUintDivideHint;

impl BigUintDivideHint {
	/// Creates the hint.
	pub fn new() -> Self {
		Self
	}
}

impl Default for BigUintDivideHint {
	fn default() -> Self {
		Self::new()
	}
}

impl Hint for BigUintDivideHint {
	fn name(&self) -> &'static str {
		"biguint_divide"
	}

	fn shape(&self, _dimensions: &[usize]) -> (usize, usize) {
		(2, 2)
	}

	fn execute(
		&self,
		_dimensions: &[usize],
		inputs: &[BigInt],
		outputs: &mut [BigInt],
	) -> Result<(), HintError> {
		let [dividend, divisor] = inputs else {
			panic!("BigUintDivide requires 2 inputs");
		};
		for value in [dividend, divisor] {
			if value.sign() == Sign::Minus {
				return Err(HintError::NegativeInput {
					hint: self.name(),
					value: value.clone(),
				});
			}
		}
		if divisor.sign() == Sign::NoSign {
			return Err(HintError::DivisionByZero);
		}

		let (quotient, remainder) = dividend.div_rem(divisor);
		outputs[0] = quotient;
		outputs[1] = remainder;
		Ok(())
	}
}
