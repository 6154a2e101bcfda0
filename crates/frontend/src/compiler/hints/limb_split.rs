// Copyright 2025 Irreducible Inc.
//! Splits a value into consecutive bit-fields.

use num_bigint::{BigInt, Sign};
use num_traits::One;

use super::{Hint, HintError};

/// Splits a non-negative value into pieces of the given widths, least significant first.
///
/// The last piece receives every bit above the preceding pieces, so a value wider than the sum
/// of the widths produces an oversized last piece rather than being truncated.
pub struct LimbSplitHint {
	widths: Vec<u32>,
}

impl LimbSplitHint {
	/// Creates a hint splitting into pieces of `widths` bits, least significant first.
	pub fn new(widths: impl Into<Vec<u32>>) -> Self {
		let widths = widths.into();
		assert!(!widths.is_empty(), "LimbSplit requires at least one piece");
		Self { widths }
	}
}

impl Hint for LimbSplitHint {
	fn name(&self) -> &'static str {
		"limb_split"
	}

	fn shape(&self, _dimensions: &[usize]) -> (usize, usize) {
		(1, self.widths.len())
	}

	fn execute(
		&self,
		_dimensions: &[usize],
		inputs: &[BigInt],
		outputs: &mut [BigInt],
	) -> Result<(), HintError> {
		let value = &inputs[0];
		if value.sign() == Sign::Minus {
			return Err(HintError::NegativeInput {
				hint: self.name(),
				value: value.clone(),
			});
		}

		let n_low = self.widths.len() - 1;
		let mut rest = value.clone();
		for (out, &width) in outputs[..n_low].iter_mut().zip(&self.widths[..n_low]) {
			let mask = (BigInt::one() << width) - 1;
			*out = &rest & &mask;
			rest >>= width;
		}
		outputs[n_low] = rest;
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::compiler::hints::run_hint;

	#[test]
	fn test_split() {
		let value = (BigInt::from(5) << 64) + 9;
		let out = run_hint(&LimbSplitHint::new([64, 52]), &[], &[value]).unwrap();
		assert_eq!(out, vec![BigInt::from(9), BigInt::from(5)]);
	}

	#[test]
	fn test_oversized_top_piece() {
		let value = BigInt::from(0b1_1111_0110u32);
		let out = run_hint(&LimbSplitHint::new([4, 2]), &[], &[value]).unwrap();
		assert_eq!(out, vec![BigInt::from(0b0110), BigInt::from(0b1_1111)]);
	}
}
