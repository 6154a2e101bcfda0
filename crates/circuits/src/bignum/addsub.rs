// Copyright 2025 Irreducible Inc.
use std::iter;

use ff::Field;
use limbo_core::{Felt, felt::felt_pow2};
use limbo_frontend::{CircuitBuilder, Wire};
use num_traits::One;

use super::{
	biguint::{BigInt, split_limb},
	cmp::bigint_lt,
	error::Error,
	params::LimbLayout,
};

impl<L: LimbLayout> BigInt<L> {
	/// Modular addition under the modulus `self`.
	///
	/// Computes `(a + b) mod self`. The raw sum is reduced by subtracting the modulus at most
	/// once, when it carries out of the top limb or is not below the modulus. One subtraction
	/// is exact for reduced operands `a, b < self`; for other operands the result may still be
	/// `≥ self`, which fails the `reduced` assertion.
	///
	/// # Arguments
	/// * `builder` - Circuit builder for constraint generation
	/// * `a` - First summand
	/// * `b` - Second summand
	///
	/// # Returns
	/// The reduced sum, range checked limb by limb.
	///
	/// # Errors
	/// [`Error::Constraint`] naming `bigint_add.reduced` or `bigint_add.borrow_out` if the
	/// operands are not reduced.
	pub fn add(&self, builder: &CircuitBuilder, a: &Self, b: &Self) -> Result<Self, Error> {
		let _span =
			tracing::trace_span!("bigint_add", limbs = L::LIMB_NUM, limb_size = L::LIMB_SIZE)
				.entered();
		let builder = builder.subcircuit("bigint_add");

		let (raw_limbs, carry_out) =
			add_limbs(&builder.subcircuit("sum"), L::LIMB_SIZE, a.limbs(), b.limbs())?;
		let sum = a.shadow() + b.shadow();
		let raw = BigInt::<L>::from_parts(raw_limbs, &sum & L::params().max());

		let below = bigint_lt(&builder, &raw, self)?;
		let need_sub = builder.bor(carry_out, builder.bnot(below));
		let subtrahend: Vec<Wire> = self
			.limbs()
			.iter()
			.map(|&limb| builder.mul(need_sub, limb))
			.collect();
		let (limbs, no_borrow) =
			sub_limbs(&builder.subcircuit("reduce"), L::LIMB_SIZE, raw.limbs(), &subtrahend)?;
		// The borrow out of the reduction cancels the carry out of the sum.
		builder.assert_lincomb_zero(
			"borrow_out",
			&[(Felt::ONE, no_borrow), (Felt::ONE, carry_out)],
			-Felt::ONE,
		)?;

		let shadow = if sum >= *self.shadow() {
			sum - self.shadow()
		} else {
			sum
		};
		let result = BigInt::from_parts(limbs, shadow);
		let reduced = bigint_lt(&builder, &result, self)?;
		builder.assert_true("reduced", reduced)?;
		Ok(result)
	}

	/// Subtraction `a - b` for `a ≥ b`.
	///
	/// # Errors
	/// [`Error::Constraint`] naming `bigint_sub.borrow_out` if `a < b`.
	pub fn sub(builder: &CircuitBuilder, a: &Self, b: &Self) -> Result<Self, Error> {
		let _span =
			tracing::trace_span!("bigint_sub", limbs = L::LIMB_NUM, limb_size = L::LIMB_SIZE)
				.entered();
		let builder = builder.subcircuit("bigint_sub");

		let (limbs, no_borrow) = sub_limbs(&builder, L::LIMB_SIZE, a.limbs(), b.limbs())?;
		builder.assert_true("borrow_out", no_borrow)?;
		Ok(BigInt::from_parts(limbs, a.shadow() - b.shadow()))
	}
}

/// Adds two equally-sized limb vectors with carry propagation.
///
/// # Returns
/// The limbs of the sum modulo `2^(n·limb_size)`, each range checked, and the boolean carry out
/// of the most significant limb.
///
/// # Panics
/// - Panics if `a` and `b` have different number of limbs
fn add_limbs(
	builder: &CircuitBuilder,
	limb_size: u32,
	a: &[Wire],
	b: &[Wire],
) -> Result<(Vec<Wire>, Wire), Error> {
	assert_eq!(a.len(), b.len(), "add_limbs: inputs must have the same number of limbs");

	let base = felt_pow2(limb_size);
	let mut sum = Vec::with_capacity(a.len());
	let mut carry = builder.zero();
	for (i, (&a_limb, &b_limb)) in iter::zip(a, b).enumerate() {
		let builder = builder.subcircuit(format!("limb[{i}]"));
		let total = builder.value_biguint(a_limb)
			+ builder.value_biguint(b_limb)
			+ builder.value_biguint(carry);
		let (limb, carry_out) = split_limb(&builder, &total.into(), limb_size)?;
		// a + b + carry_in = limb + carry_out·2^limb_size
		builder.assert_lincomb_zero(
			"recombine",
			&[
				(Felt::ONE, a_limb),
				(Felt::ONE, b_limb),
				(Felt::ONE, carry),
				(-Felt::ONE, limb),
				(-base, carry_out),
			],
			Felt::ZERO,
		)?;
		sum.push(limb);
		carry = carry_out;
	}
	Ok((sum, carry))
}

/// Subtracts two equally-sized limb vectors with borrow propagation.
///
/// Every position computes `a - b - borrow_in + 2^limb_size` and splits it into the result limb
/// and a bit that is `1` exactly when no borrow leaves the position.
///
/// # Returns
/// The limbs of `a - b` modulo `2^(n·limb_size)`, each range checked, and a boolean that is `1`
/// when no borrow leaves the most significant limb, i.e. when `a ≥ b`.
///
/// # Panics
/// - Panics if `a` and `b` have different number of limbs
fn sub_limbs(
	builder: &CircuitBuilder,
	limb_size: u32,
	a: &[Wire],
	b: &[Wire],
) -> Result<(Vec<Wire>, Wire), Error> {
	assert_eq!(a.len(), b.len(), "sub_limbs: inputs must have the same number of limbs");

	let base = felt_pow2(limb_size);
	let base_int = num_bigint::BigInt::one() << limb_size;
	let mut diff = Vec::with_capacity(a.len());
	let mut no_borrow_in: Option<Wire> = None;
	for (i, (&a_limb, &b_limb)) in iter::zip(a, b).enumerate() {
		let builder = builder.subcircuit(format!("limb[{i}]"));
		let borrow_in = match no_borrow_in {
			Some(wire) => 1u32 - u32::from(builder.value(wire) == Felt::ONE),
			None => 0,
		};
		let total = num_bigint::BigInt::from(builder.value_biguint(a_limb))
			- num_bigint::BigInt::from(builder.value_biguint(b_limb))
			- borrow_in
			+ &base_int;
		let (limb, no_borrow) = split_limb(&builder, &total, limb_size)?;

		// a - b - (1 - no_borrow_in) + 2^limb_size = limb + no_borrow·2^limb_size
		let mut terms = vec![
			(Felt::ONE, a_limb),
			(-Felt::ONE, b_limb),
			(-Felt::ONE, limb),
			(-base, no_borrow),
		];
		let mut constant = base;
		if let Some(wire) = no_borrow_in {
			terms.push((Felt::ONE, wire));
			constant -= Felt::ONE;
		}
		builder.assert_lincomb_zero("recombine", &terms, constant)?;

		diff.push(limb);
		no_borrow_in = Some(no_borrow);
	}
	Ok((diff, no_borrow_in.unwrap_or_else(|| builder.one())))
}
