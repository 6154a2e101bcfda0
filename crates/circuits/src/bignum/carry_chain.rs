// Copyright 2025 Irreducible Inc.
//! Zero test for limb polynomials.
//!
//! An identity between limb vectors such as `a·b = q·m + r` is a polynomial identity in
//! `B = 2^limb_size`. Coefficient `k` of `lhs - rhs` does not have to vanish by itself, it only
//! has to be absorbed by carries:
//!
//! ```text
//! delta[k] + carry[k-1] = carry[k]·B      for k < n - 1
//! delta[n-1] + carry[n-2] = 0
//! ```
//!
//! The carries come from a hint and are signed. Each is range checked in offset form,
//! `carry + 2^c ∈ [0, 2^(c+1))`, where `2^c` bounds the magnitude of every carry.
//!
//! The position constraints only hold modulo the field prime. They imply the integer identity
//! when `|delta[k]| + |carry[k-1]| + |carry[k]|·B < 2^FELT_CAPACITY_BITS`, which holds as long
//! as every position bound has at most `FELT_CAPACITY_BITS - 2` bits. Wide limbs are therefore
//! split into equal sub-limbs first, see [`ChainWidth`].

use ff::Field;
use limbo_core::{
	Felt,
	consts::FELT_CAPACITY_BITS,
	felt::{felt_from_bigint, felt_from_biguint, felt_pow2},
};
use limbo_frontend::{CircuitBuilder, Wire};
use num_bigint::BigUint;
use num_traits::One;

use super::error::Error;
use crate::range::range_check;

/// The limb width a carry chain runs at.
///
/// Every operand limb of `limb_size` bits is re-expressed as `parts` sub-limbs of
/// `limb_size / parts` bits.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) struct ChainWidth {
	pub limb_size: u32,
	pub parts: u32,
}

impl ChainWidth {
	/// Picks the fewest equal parts per limb that keep every position of an identity with
	/// `n_products` products of `limb_num`-limb operands within the field capacity.
	pub fn select(limb_size: u32, limb_num: usize, n_products: usize) -> Self {
		(1..=limb_size)
			.filter(|parts| limb_size % parts == 0)
			.map(|parts| ChainWidth {
				limb_size: limb_size / parts,
				parts,
			})
			.find(|width| width.fits(limb_num, n_products))
			.unwrap_or(ChainWidth {
				limb_size: 1,
				parts: limb_size,
			})
	}

	/// Returns the number of sub-limbs of an operand with `limb_num` limbs.
	pub fn n_limbs(&self, limb_num: usize) -> usize {
		limb_num * self.parts as usize
	}

	fn fits(&self, limb_num: usize, n_products: usize) -> bool {
		// Every position sums at most `n_limbs` products per pair plus a few limbs, all below
		// 2^(2·limb_size).
		let n_terms = BigUint::from(n_products * self.n_limbs(limb_num) + 1);
		let bound = n_terms << (2 * self.limb_size);
		bound.bits() + 2 <= FELT_CAPACITY_BITS as u64
	}

	/// Re-expresses `limbs`, each already bounded to `parts · limb_size` bits, as sub-limbs,
	/// least significant first.
	///
	/// Sub-limbs are range checked as `limb[i].piece[j]` and recombined as `limb[i].recombine`.
	/// Limbs are returned unchanged when `parts == 1`.
	pub fn split(&self, builder: &CircuitBuilder, limbs: &[Wire]) -> Result<Vec<Wire>, Error> {
		if self.parts == 1 {
			return Ok(limbs.to_vec());
		}
		let widths = vec![self.limb_size; self.parts as usize];
		let mut sub_limbs = Vec::with_capacity(limbs.len() * widths.len());
		for (i, &limb) in limbs.iter().enumerate() {
			let pieces = builder.limb_split_hint(&builder.value_biguint(limb), &widths)?;
			let mut terms = Vec::with_capacity(widths.len() + 1);
			for (j, piece) in pieces.iter().enumerate() {
				let piece = builder.add_witness(felt_from_biguint(piece));
				range_check(builder, format!("limb[{i}].piece[{j}]"), piece, self.limb_size)?;
				terms.push((felt_pow2(j as u32 * self.limb_size), piece));
				sub_limbs.push(piece);
			}
			terms.push((-Felt::ONE, limb));
			builder.assert_lincomb_zero(format!("limb[{i}].recombine"), &terms, Felt::ZERO)?;
		}
		Ok(sub_limbs)
	}
}

/// A polynomial in `2^limb_size` whose coefficients are linear combinations of wires.
pub(super) struct LimbPolynomial {
	limb_size: u32,
	/// The terms summed at every position.
	terms: Vec<Vec<(Felt, Wire)>>,
	/// The integer value of every position.
	values: Vec<num_bigint::BigInt>,
	/// An upper bound on the magnitude of every position.
	bounds: Vec<BigUint>,
}

impl LimbPolynomial {
	pub fn new(limb_size: u32, n_positions: usize) -> Self {
		Self {
			limb_size,
			terms: vec![Vec::new(); n_positions],
			values: vec![num_bigint::BigInt::ZERO; n_positions],
			bounds: vec![BigUint::ZERO; n_positions],
		}
	}

	/// Adds the product `x·y`.
	///
	/// # Cost
	///
	/// One MUL constraint per pair of limbs.
	pub fn add_product(&mut self, builder: &CircuitBuilder, x: &[Wire], y: &[Wire]) {
		self.accumulate_product(builder, false, x, y);
	}

	/// Subtracts the product `x·y`.
	pub fn sub_product(&mut self, builder: &CircuitBuilder, x: &[Wire], y: &[Wire]) {
		self.accumulate_product(builder, true, x, y);
	}

	/// Adds the limbs of `x`.
	pub fn add_limbs(&mut self, builder: &CircuitBuilder, x: &[Wire]) {
		self.accumulate_limbs(builder, false, x);
	}

	/// Subtracts the limbs of `x`.
	pub fn sub_limbs(&mut self, builder: &CircuitBuilder, x: &[Wire]) {
		self.accumulate_limbs(builder, true, x);
	}

	fn accumulate_product(
		&mut self,
		builder: &CircuitBuilder,
		negate: bool,
		x: &[Wire],
		y: &[Wire],
	) {
		let limb_max = (BigUint::one() << self.limb_size) - 1u32;
		let product_max = &limb_max * &limb_max;
		for (i, &x_limb) in x.iter().enumerate() {
			for (j, &y_limb) in y.iter().enumerate() {
				let product = builder.mul(x_limb, y_limb);
				let value = builder.value_biguint(x_limb) * builder.value_biguint(y_limb);
				self.accumulate(i + j, negate, product, value, &product_max);
			}
		}
	}

	fn accumulate_limbs(&mut self, builder: &CircuitBuilder, negate: bool, x: &[Wire]) {
		let limb_max = (BigUint::one() << self.limb_size) - 1u32;
		for (i, &limb) in x.iter().enumerate() {
			self.accumulate(i, negate, limb, builder.value_biguint(limb), &limb_max);
		}
	}

	fn accumulate(
		&mut self,
		position: usize,
		negate: bool,
		wire: Wire,
		value: BigUint,
		bound: &BigUint,
	) {
		let value = num_bigint::BigInt::from(value);
		if negate {
			self.terms[position].push((-Felt::ONE, wire));
			self.values[position] -= value;
		} else {
			self.terms[position].push((Felt::ONE, wire));
			self.values[position] += value;
		}
		self.bounds[position] += bound;
	}

	/// Proves that the polynomial evaluates to zero at `2^limb_size`.
	///
	/// Carries are range checked as `carry[k]` and the positions are asserted as `position[k]`.
	///
	/// # Errors
	///
	/// - [`Error::ChainOverflow`] if a position may not fit the field. Nothing is emitted.
	/// - [`Error::Hint`] if the integer values do not cancel out. This means the identity does
	///   not hold and no carries exist.
	/// - [`Error::Constraint`] if an assertion fails.
	pub fn assert_zero(self, builder: &CircuitBuilder) -> Result<(), Error> {
		let n_positions = self.values.len();
		let bound = self.bounds.iter().max().cloned().unwrap_or_default();
		if bound.bits() + 2 > FELT_CAPACITY_BITS as u64 {
			return Err(Error::ChainOverflow {
				name: builder.scope_name(),
				n_bits: bound.bits(),
			});
		}
		let carries = builder.carry_chain_hint(self.limb_size, &self.values)?;

		// With |delta[k]| ≤ bound at every position, |carry| < 2^(bits(bound) + 1 - limb_size).
		let carry_bits = (bound.bits() as u32 + 1).saturating_sub(self.limb_size).max(1);
		let offset = felt_pow2(carry_bits);
		let carries = carries
			.iter()
			.enumerate()
			.map(|(k, carry)| {
				let carry = builder.add_witness(felt_from_bigint(carry));
				let shifted = builder.add_const(carry, offset);
				range_check(builder, format!("carry[{k}]"), shifted, carry_bits + 1)?;
				Ok(carry)
			})
			.collect::<Result<Vec<_>, Error>>()?;

		let base = felt_pow2(self.limb_size);
		for (k, mut terms) in self.terms.into_iter().enumerate() {
			if k > 0 {
				terms.push((Felt::ONE, carries[k - 1]));
			}
			if k + 1 < n_positions {
				terms.push((-base, carries[k]));
			}
			builder.assert_lincomb_zero(format!("position[{k}]"), &terms, Felt::ZERO)?;
		}
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use limbo_core::felt::modulus;
	use limbo_frontend::{ConstraintError, HintError};
	use rstest::rstest;

	use super::*;
	use crate::bignum::BigIntParams;

	fn witness(builder: &CircuitBuilder, x: &BigUint) -> Wire {
		builder.add_witness(felt_from_biguint(x))
	}

	#[rstest]
	#[case("384_2", 2)]
	#[case("384_3", 2)]
	#[case("384_6", 1)]
	#[case("384_8", 1)]
	#[case("384_12", 1)]
	#[case("2048_16", 2)]
	#[case("2048_18", 1)]
	#[case("2048_32", 1)]
	fn test_chain_width_of_layout(#[case] name: &str, #[case] parts: u32) {
		let params = BigIntParams::by_name(name).unwrap();
		for n_products in [1, 2] {
			let width = ChainWidth::select(params.limb_size, params.limb_num, n_products);
			assert_eq!(width.parts, parts);
			assert_eq!(width.limb_size * width.parts, params.limb_size);
			assert!(width.fits(params.limb_num, n_products));
		}
	}

	#[test]
	fn test_wide_limb_products_are_refused() {
		// x·y - r vanishes modulo the field prime but not over the integers.
		let limb_max = (BigUint::one() << 192) - 1u32;
		let wrapped = (&limb_max * &limb_max) % modulus();
		let low = &wrapped & &limb_max;
		let high = &wrapped >> 192;

		let builder = CircuitBuilder::new();
		let x = witness(&builder, &limb_max);
		let y = witness(&builder, &limb_max);
		let r = [witness(&builder, &low), witness(&builder, &high)];

		let chain = builder.subcircuit("chain");
		let mut poly = LimbPolynomial::new(192, 2);
		poly.add_product(&chain, &[x], &[y]);
		poly.sub_limbs(&chain, &r);
		let before = builder.counts();
		match poly.assert_zero(&chain).unwrap_err() {
			Error::ChainOverflow { name, n_bits } => {
				assert_eq!(name, "chain");
				assert!(n_bits > 252);
			}
			other => panic!("unexpected error: {other}"),
		}
		assert_eq!(builder.counts(), before);
	}

	#[test]
	fn test_sub_limbs_reject_wrapped_identity() {
		let limb_max = (BigUint::one() << 192) - 1u32;
		let product = &limb_max * &limb_max;
		let wrapped = &product % modulus();
		let width = ChainWidth {
			limb_size: 96,
			parts: 2,
		};

		let check = |r: &BigUint| {
			let builder = CircuitBuilder::new();
			let x = witness(&builder, &limb_max);
			let y = witness(&builder, &limb_max);
			let r = [witness(&builder, &(r & &limb_max)), witness(&builder, &(r >> 192))];

			let x = width.split(&builder.subcircuit("x"), &[x]).unwrap();
			let y = width.split(&builder.subcircuit("y"), &[y]).unwrap();
			let r = width.split(&builder.subcircuit("r"), &r).unwrap();
			let mut poly = LimbPolynomial::new(96, 4);
			poly.add_product(&builder, &x, &y);
			poly.sub_limbs(&builder, &r);
			poly.assert_zero(&builder).map(|()| builder.build())
		};

		check(&product).unwrap().verify().unwrap();
		assert!(matches!(
			check(&wrapped),
			Err(Error::Hint(HintError::CarryResidue { .. }))
		));
	}

	#[test]
	fn test_split_names_pieces() {
		let width = ChainWidth {
			limb_size: 64,
			parts: 2,
		};
		let builder = CircuitBuilder::new();
		let limb = witness(&builder, &(BigUint::one() << 100));
		let pieces = width.split(&builder.subcircuit("a"), &[limb]).unwrap();
		assert_eq!(pieces.len(), 2);
		assert_eq!(builder.value_biguint(pieces[0]), BigUint::ZERO);
		assert_eq!(builder.value_biguint(pieces[1]), BigUint::one() << 36);

		// A limb wider than its parts leaves the excess in the top piece.
		let wide = witness(&builder, &(BigUint::one() << 130));
		let err = width.split(&builder.subcircuit("b"), &[wide]).unwrap_err();
		match err {
			Error::Constraint(ConstraintError::AssertionFailed { name, .. }) => {
				assert_eq!(name, "b.limb[0].piece[1]");
			}
			other => panic!("unexpected error: {other}"),
		}
	}
}
