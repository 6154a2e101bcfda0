// Copyright 2025 Irreducible Inc.
use std::iter;

use ff::Field;
use limbo_core::{Felt, felt::felt_pow2};
use limbo_frontend::{CircuitBuilder, Wire};
use num_traits::One;

use super::{
	biguint::{BigInt, split_limb},
	error::Error,
	params::LimbLayout,
};

/// Less-than comparison.
///
/// Limbs are folded from least to most significant with
/// `result = lt_i OR (eq_i AND result)`, so the most significant differing limb decides.
///
/// # Arguments
/// * `builder` - Circuit builder for constraint generation
/// * `a` - First operand
/// * `b` - Second operand
///
/// # Returns
/// Boolean wire that is true when `a < b`.
///
/// # Cost
/// Per limb: one limb split with its range checks, one linear constraint and four MUL
/// constraints.
pub fn bigint_lt<L: LimbLayout>(
	builder: &CircuitBuilder,
	a: &BigInt<L>,
	b: &BigInt<L>,
) -> Result<Wire, Error> {
	let _span =
		tracing::trace_span!("bigint_lt", limbs = L::LIMB_NUM, limb_size = L::LIMB_SIZE).entered();
	let builder = builder.subcircuit("bigint_lt");

	let mut result = builder.zero();
	for (i, (&a_limb, &b_limb)) in iter::zip(a.limbs(), b.limbs()).enumerate() {
		let lt = limb_lt(&builder.subcircuit(format!("limb[{i}]")), a_limb, b_limb, L::LIMB_SIZE)?;
		let eq = builder.icmp_eq(a_limb, b_limb);
		result = builder.bor(lt, builder.band(eq, result));
	}
	Ok(result)
}

/// Greater-than comparison. Boolean wire that is true when `a > b`.
pub fn bigint_gt<L: LimbLayout>(
	builder: &CircuitBuilder,
	a: &BigInt<L>,
	b: &BigInt<L>,
) -> Result<Wire, Error> {
	bigint_lt(builder, b, a)
}

/// Boolean wire that is true when `a ≤ b`.
pub fn bigint_le<L: LimbLayout>(
	builder: &CircuitBuilder,
	a: &BigInt<L>,
	b: &BigInt<L>,
) -> Result<Wire, Error> {
	let lt = bigint_lt(builder, a, b)?;
	let eq = bigint_eq(builder, a, b);
	Ok(builder.bor(lt, eq))
}

/// Boolean wire that is true when `a ≥ b`.
pub fn bigint_ge<L: LimbLayout>(
	builder: &CircuitBuilder,
	a: &BigInt<L>,
	b: &BigInt<L>,
) -> Result<Wire, Error> {
	let gt = bigint_gt(builder, a, b)?;
	let eq = bigint_eq(builder, a, b);
	Ok(builder.bor(gt, eq))
}

/// Equality check.
///
/// # Returns
/// Boolean wire that is true when `a == b`.
pub fn bigint_eq<L: LimbLayout>(builder: &CircuitBuilder, a: &BigInt<L>, b: &BigInt<L>) -> Wire {
	let mut result = builder.one();
	for (&a_limb, &b_limb) in iter::zip(a.limbs(), b.limbs()) {
		result = builder.band(builder.icmp_eq(a_limb, b_limb), result);
	}
	result
}

/// Less-than on a pair of range checked limbs.
///
/// `y - x - 1 + 2^limb_size` lies in `[0, 2^(limb_size+1))` and its top bit is set exactly when
/// `x < y`.
fn limb_lt(builder: &CircuitBuilder, x: Wire, y: Wire, limb_size: u32) -> Result<Wire, Error> {
	let base = felt_pow2(limb_size);
	let total = num_bigint::BigInt::from(builder.value_biguint(y))
		- num_bigint::BigInt::from(builder.value_biguint(x))
		- 1
		+ (num_bigint::BigInt::one() << limb_size);
	let (lo, lt) = split_limb(builder, &total, limb_size)?;
	builder.assert_lincomb_zero(
		"recombine",
		&[(Felt::ONE, y), (-Felt::ONE, x), (-Felt::ONE, lo), (-base, lt)],
		base - Felt::ONE,
	)?;
	Ok(lt)
}
