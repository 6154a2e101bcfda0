// Copyright 2025 Irreducible Inc.
use limbo_frontend::CircuitBuilder;

use super::{
	biguint::BigInt,
	carry_chain::{ChainWidth, LimbPolynomial},
	cmp::bigint_lt,
	error::Error,
	params::LimbLayout,
};

/// Quotient and remainder of [`BigInt::div`].
#[derive(Clone, Debug)]
pub struct DivRem<L: LimbLayout> {
	/// `⌊a / b⌋`
	pub quotient: BigInt<L>,
	/// `a mod b`
	pub remainder: BigInt<L>,
}

impl<L: LimbLayout> BigInt<L> {
	/// Division with remainder.
	///
	/// The prover supplies `q` and `r`. The circuit proves `q·b + r - a = 0` over the integers
	/// with a carry chain and asserts `r < b`, which makes both unique.
	///
	/// # Errors
	/// - [`Error::DivisionByZero`] if `b` is zero.
	/// - [`Error::Constraint`] if an assertion fails.
	pub fn div(builder: &CircuitBuilder, a: &Self, b: &Self) -> Result<DivRem<L>, Error> {
		let _span =
			tracing::trace_span!("bigint_div", limbs = L::LIMB_NUM, limb_size = L::LIMB_SIZE)
				.entered();
		let builder = builder.subcircuit("bigint_div");

		let (quotient, remainder) = builder.biguint_divide_hint(a.shadow(), b.shadow())?;
		let quotient = Self::witness(&builder.subcircuit("quotient"), "quotient", &quotient)?;
		let remainder = Self::witness(&builder.subcircuit("remainder"), "remainder", &remainder)?;

		let chain = builder.subcircuit("carry_chain");
		let width = ChainWidth::select(L::LIMB_SIZE, L::LIMB_NUM, 1);
		let q_limbs = width.split(&chain.subcircuit("quotient"), quotient.limbs())?;
		let b_limbs = width.split(&chain.subcircuit("b"), b.limbs())?;
		let r_limbs = width.split(&chain.subcircuit("remainder"), remainder.limbs())?;
		let a_limbs = width.split(&chain.subcircuit("a"), a.limbs())?;

		let mut poly = LimbPolynomial::new(width.limb_size, 2 * width.n_limbs(L::LIMB_NUM) - 1);
		poly.add_product(&chain, &q_limbs, &b_limbs);
		poly.add_limbs(&chain, &r_limbs);
		poly.sub_limbs(&chain, &a_limbs);
		poly.assert_zero(&chain)?;

		let below = bigint_lt(&builder, &remainder, b)?;
		builder.assert_true("remainder_below_divisor", below)?;
		Ok(DivRem {
			quotient,
			remainder,
		})
	}

	/// Modular reduction `a mod self`.
	///
	/// # Errors
	/// Same as [`Self::div`].
	pub fn modulo(&self, builder: &CircuitBuilder, a: &Self) -> Result<Self, Error> {
		let builder = builder.subcircuit("bigint_mod");
		Ok(Self::div(&builder, a, self)?.remainder)
	}
}
