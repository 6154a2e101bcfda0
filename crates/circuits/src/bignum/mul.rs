// Copyright 2025 Irreducible Inc.
use limbo_frontend::CircuitBuilder;

use super::{
	biguint::BigInt,
	carry_chain::{ChainWidth, LimbPolynomial},
	cmp::bigint_lt,
	error::Error,
	params::LimbLayout,
};

impl<L: LimbLayout> BigInt<L> {
	/// Modular multiplication `(a·b) mod self`.
	///
	/// The prover supplies `q = ⌊a·b / self⌋` and `r = a·b mod self` as range checked values. The
	/// circuit proves `a·b - q·self - r = 0` over the integers with a carry chain and asserts
	/// `r < self`.
	///
	/// # Arguments
	/// * `builder` - Circuit builder for constraint generation
	/// * `a` - First factor
	/// * `b` - Second factor
	///
	/// # Returns
	/// The remainder `r`.
	///
	/// # Errors
	/// - [`Error::DivisionByZero`] if the modulus is zero.
	/// - [`Error::ExceedsMax`] if the quotient does not fit the layout. This only happens for
	///   operands that are not reduced.
	/// - [`Error::Constraint`] if an assertion fails.
	///
	/// # Cost
	/// `2·LIMB_NUM²` MUL constraints for the limb products, `2·LIMB_NUM - 1` linear constraints
	/// for the carry chain, plus the range checks of `q`, `r` and the carries. Layouts whose limb
	/// products would not fit the field run the chain over sub-limbs, which multiplies the limb
	/// count by the number of parts.
	pub fn mul(&self, builder: &CircuitBuilder, a: &Self, b: &Self) -> Result<Self, Error> {
		let _span =
			tracing::trace_span!("bigint_mul", limbs = L::LIMB_NUM, limb_size = L::LIMB_SIZE)
				.entered();
		let builder = builder.subcircuit("bigint_mul");

		let product = a.shadow() * b.shadow();
		let (quotient, remainder) = builder.biguint_divide_hint(&product, self.shadow())?;
		let quotient = Self::witness(&builder.subcircuit("quotient"), "quotient", &quotient)?;
		let remainder = Self::witness(&builder.subcircuit("remainder"), "remainder", &remainder)?;

		let chain = builder.subcircuit("carry_chain");
		let width = ChainWidth::select(L::LIMB_SIZE, L::LIMB_NUM, 2);
		let a_limbs = width.split(&chain.subcircuit("a"), a.limbs())?;
		let b_limbs = width.split(&chain.subcircuit("b"), b.limbs())?;
		let q_limbs = width.split(&chain.subcircuit("quotient"), quotient.limbs())?;
		let m_limbs = width.split(&chain.subcircuit("modulus"), self.limbs())?;
		let r_limbs = width.split(&chain.subcircuit("remainder"), remainder.limbs())?;

		let mut poly = LimbPolynomial::new(width.limb_size, 2 * width.n_limbs(L::LIMB_NUM) - 1);
		poly.add_product(&chain, &a_limbs, &b_limbs);
		poly.sub_product(&chain, &q_limbs, &m_limbs);
		poly.sub_limbs(&chain, &r_limbs);
		poly.assert_zero(&chain)?;

		let reduced = bigint_lt(&builder, &remainder, self)?;
		builder.assert_true("remainder_reduced", reduced)?;
		Ok(remainder)
	}
}
