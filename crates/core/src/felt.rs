// Copyright 2025 Irreducible Inc.
//! The native field element and its conversions to and from arbitrary precision integers.

use std::sync::LazyLock;

use ff::{Field, PrimeField};
use num_bigint::{BigInt, BigUint, Sign};
use num_traits::Zero;

/// The native field element.
///
/// Every entry of a [`ValueVec`](crate::ValueVec) is a `Felt`. The field is the Pallas base
/// field; its modulus is a 255-bit prime.
pub type Felt = pasta_curves::Fp;

static MODULUS: LazyLock<BigUint> = LazyLock::new(|| felt_to_biguint(-Felt::ONE) + 1u32);

static HALF_MODULUS: LazyLock<BigUint> = LazyLock::new(|| modulus() >> 1);

/// Returns the modulus of the native field.
pub fn modulus() -> &'static BigUint {
	&MODULUS
}

/// Returns the canonical integer representative of `x`, in `[0, p)`.
pub fn felt_to_biguint(x: Felt) -> BigUint {
	BigUint::from_bytes_le(x.to_repr().as_ref())
}

/// Maps an integer into the field, reducing it modulo `p`.
pub fn felt_from_biguint(x: &BigUint) -> Felt {
	let reduced = x % modulus();
	let bytes = reduced.to_bytes_le();
	let mut repr = <Felt as PrimeField>::Repr::default();
	repr.as_mut()[..bytes.len()].copy_from_slice(&bytes);
	Option::from(Felt::from_repr(repr)).expect("reduced value is below the field modulus")
}

/// Maps a signed integer into the field. Negative values map to `p - |x|`.
pub fn felt_from_bigint(x: &BigInt) -> Felt {
	let magnitude = felt_from_biguint(x.magnitude());
	match x.sign() {
		Sign::Minus => -magnitude,
		Sign::NoSign | Sign::Plus => magnitude,
	}
}

/// Interprets `x` as a signed integer: representatives above `p / 2` are negative.
///
/// Used for carries of the limb arithmetic, which are allowed to go below zero.
pub fn felt_to_bigint(x: Felt) -> BigInt {
	let value = felt_to_biguint(x);
	if value > *HALF_MODULUS {
		BigInt::from_biguint(Sign::Minus, modulus() - value)
	} else {
		BigInt::from(value)
	}
}

/// Returns `2^n` as a field element.
pub fn felt_pow2(n: u32) -> Felt {
	Felt::from(2u64).pow_vartime([n as u64])
}

/// Returns the number of significant bits of the canonical representative of `x`.
pub fn felt_bits(x: Felt) -> u64 {
	let value = felt_to_biguint(x);
	if value.is_zero() { 0 } else { value.bits() }
}

#[cfg(test)]
mod tests {
	use ff::PrimeField;
	use proptest::prelude::*;

	use super::*;
	use crate::consts::FELT_CAPACITY_BITS;

	#[test]
	fn test_capacity_matches_field() {
		assert_eq!(<Felt as PrimeField>::CAPACITY, FELT_CAPACITY_BITS);
		assert_eq!(modulus().bits(), 255);
	}

	#[test]
	fn test_negative_maps_to_field_negation() {
		assert_eq!(felt_from_bigint(&BigInt::from(-1)), -Felt::ONE);
		assert_eq!(felt_to_bigint(-Felt::from(5u64)), BigInt::from(-5));
		assert_eq!(felt_to_bigint(Felt::from(5u64)), BigInt::from(5));
	}

	#[test]
	fn test_reduction_modulo_p() {
		let p = modulus().clone();
		assert_eq!(felt_from_biguint(&p), Felt::ZERO);
		assert_eq!(felt_from_biguint(&(p + 3u32)), Felt::from(3u64));
	}

	#[test]
	fn test_pow2_and_bits() {
		assert_eq!(felt_pow2(0), Felt::ONE);
		assert_eq!(felt_pow2(64), Felt::from(u64::MAX) + Felt::ONE);
		assert_eq!(felt_bits(felt_pow2(200)), 201);
		assert_eq!(felt_bits(Felt::ZERO), 0);
	}

	proptest! {
		#[test]
		fn prop_biguint_conversion(limbs in proptest::collection::vec(any::<u64>(), 0..4)) {
			let x = limbs
				.iter()
				.rev()
				.fold(BigUint::zero(), |acc, &limb| (acc << 64) + limb);
			// Four u64 limbs may exceed the field, compare against the reduced value.
			let expected = &x % modulus();
			prop_assert_eq!(felt_to_biguint(felt_from_biguint(&x)), expected);
		}

		#[test]
		fn prop_signed_conversion(x in any::<i128>()) {
			let x = BigInt::from(x);
			prop_assert_eq!(felt_to_bigint(felt_from_bigint(&x)), x);
		}
	}
}
