// Copyright 2025 Irreducible Inc.
//! Carries of a limb polynomial that is claimed to evaluate to zero.

use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::Zero;

use super::{Hint, HintError};

/// Computes the carries that absorb a signed limb polynomial `Σ delta[k]·2^(k·limb_size)`.
///
/// With `carry[-1] = 0`, every position must satisfy
/// `delta[k] + carry[k-1] = carry[k]·2^limb_size` and the last position must sum to zero. The
/// outputs are the `n - 1` carries leaving positions `0..n-1`. Carries are signed.
pub struct CarryChainHint {
	limb_size: u32,
}

impl CarryChainHint {
	/// Creates a hint for a polynomial in `2^limb_size`.
	pub fn new(limb_size: u32) -> Self {
		Self { limb_size }
	}
}

impl Hint for CarryChainHint {
	fn name(&self) -> &'static str {
		"carry_chain"
	}

	fn shape(&self, dimensions: &[usize]) -> (usize, usize) {
		let [n_positions] = dimensions else {
			panic!("CarryChain requires 1 dimension");
		};
		(*n_positions, n_positions.saturating_sub(1))
	}

	fn execute(
		&self,
		_dimensions: &[usize],
		inputs: &[BigInt],
		outputs: &mut [BigInt],
	) -> Result<(), HintError> {
		let base = BigInt::from(1) << self.limb_size;
		let mut carry = BigInt::ZERO;
		for (position, delta) in inputs.iter().enumerate() {
			let total = delta + &carry;
			if position == inputs.len() - 1 {
				if !total.is_zero() {
					return Err(HintError::CarryResidue {
						position,
						residue: total,
					});
				}
				break;
			}
			let (next, residue) = total.div_mod_floor(&base);
			if !residue.is_zero() {
				return Err(HintError::CarryResidue { position, residue });
			}
			outputs[position] = next.clone();
			carry = next;
		}
		Ok(())
	}
}
