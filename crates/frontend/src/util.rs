// Copyright 2025 Irreducible Inc.
//! Conversions between integers and little-endian limbs.

use num_bigint::BigUint;
use num_traits::{One, Zero};

/// Returns a BigUint from limbs of `limb_size` bits with little-endian ordering.
///
/// # Panics
/// * If a limb does not fit in `limb_size` bits.
pub fn num_biguint_from_limbs<I>(limbs: I, limb_size: u32) -> BigUint
where
	I: IntoIterator,
	I::Item: std::borrow::Borrow<BigUint>,
	I::IntoIter: DoubleEndedIterator,
{
	use std::borrow::Borrow;

	limbs.into_iter().rev().fold(BigUint::zero(), |acc, limb| {
		let limb = limb.borrow();
		assert!(limb.bits() <= limb_size as u64, "limb {limb} exceeds {limb_size} bits");
		(acc << limb_size) | limb
	})
}

/// Splits `value` into `n_limbs` limbs of `limb_size` bits, least significant first.
///
/// Returns `None` if the value does not fit in `n_limbs * limb_size` bits.
pub fn biguint_to_limbs(value: &BigUint, limb_size: u32, n_limbs: usize) -> Option<Vec<BigUint>> {
	if value.bits() > limb_size as u64 * n_limbs as u64 {
		return None;
	}
	let mask = (BigUint::one() << limb_size) - 1u32;
	let mut rest = value.clone();
	let mut limbs = Vec::with_capacity(n_limbs);
	for _ in 0..n_limbs {
		limbs.push(&rest & &mask);
		rest >>= limb_size;
	}
	Some(limbs)
}

#[cfg(test)]
mod tests {
	use proptest::prelude::*;

	use super::*;

	#[test]
	fn test_limbs_of_small_value() {
		let limbs = biguint_to_limbs(&BigUint::from(0x1_0000_0002u64), 32, 3).unwrap();
		assert_eq!(limbs, vec![BigUint::from(2u32), BigUint::from(1u32), BigUint::zero()]);
		assert_eq!(num_biguint_from_limbs(&limbs, 32), BigUint::from(0x1_0000_0002u64));
	}

	#[test]
	fn test_value_too_wide() {
		let value = BigUint::one() << 96;
		assert!(biguint_to_limbs(&value, 32, 3).is_none());
		assert!(biguint_to_limbs(&(value - 1u32), 32, 3).is_some());
	}

	proptest! {
		#[test]
		fn prop_limbs_recombine(words in proptest::collection::vec(any::<u32>(), 1..8), limb_size in 1u32..130) {
			let value = words.iter().fold(BigUint::zero(), |acc, &w| (acc << 32) + w);
			let n_limbs = (value.bits() as usize).div_ceil(limb_size as usize).max(1);
			let limbs = biguint_to_limbs(&value, limb_size, n_limbs).unwrap();
			prop_assert_eq!(limbs.len(), n_limbs);
			prop_assert!(limbs.iter().all(|limb| limb.bits() <= limb_size as u64));
			prop_assert_eq!(num_biguint_from_limbs(limbs, limb_size), value);
		}
	}
}
