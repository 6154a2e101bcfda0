// Copyright 2025 Irreducible Inc.
use std::{fmt, iter, marker::PhantomData, slice};

use ff::Field;
use limbo_core::{
	Felt,
	felt::{felt_from_bigint, felt_from_biguint},
};
use limbo_frontend::{
	CircuitBuilder, Wire,
	hints::LimbSplitHint,
	util::{biguint_to_limbs, num_biguint_from_limbs},
};

use super::{error::Error, params::LimbLayout};
use crate::range::range_check;

/// An integer wider than a field element, held in `L::LIMB_NUM` limbs of `L::LIMB_SIZE` bits.
///
/// - Limbs are stored in little-endian order (index 0 = least significant), so the value is
///   `Σ limbs[i]·2^(i·LIMB_SIZE)`.
/// - Every limb is a constant or has been range checked to `LIMB_SIZE` bits.
/// - The shadow caches the same value as a plain integer. Gadgets use it to seed their hints;
///   it always equals the recombined limb values.
///
/// Values are immutable. Every operation returns a fresh value whose limbs are constrained
/// before it is returned.
pub struct BigInt<L: LimbLayout> {
	limbs: Vec<Wire>,
	shadow: num_bigint::BigUint,
	_layout: PhantomData<L>,
}

impl<L: LimbLayout> Clone for BigInt<L> {
	fn clone(&self) -> Self {
		Self::from_parts(self.limbs.clone(), self.shadow.clone())
	}
}

impl<L: LimbLayout> fmt::Debug for BigInt<L> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("BigInt")
			.field("layout", &L::NAME)
			.field("limbs", &self.limbs)
			.field("shadow", &self.shadow)
			.finish()
	}
}

impl<L: LimbLayout> BigInt<L> {
	/// Creates a private value holding `x`.
	///
	/// Every limb is range checked and named `limb[i]`.
	///
	/// # Errors
	///
	/// - [`Error::Negative`] if `x < 0`.
	/// - [`Error::ExceedsMax`] if `x` does not fit in `LIMB_NUM·LIMB_SIZE` bits.
	pub fn from_integer(builder: &CircuitBuilder, x: &num_bigint::BigInt) -> Result<Self, Error> {
		let Some(x) = x.to_biguint() else {
			return Err(Error::Negative {
				layout: L::NAME,
				value: x.clone(),
				max_bits: L::params().total_bits(),
			});
		};
		Self::witness(builder, "integer", &x)
	}

	/// Same as [`Self::from_integer`] for an unsigned integer.
	pub fn from_biguint(builder: &CircuitBuilder, x: &num_bigint::BigUint) -> Result<Self, Error> {
		Self::witness(builder, "integer", x)
	}

	/// Creates a constant value. Constant limbs need no range check.
	///
	/// # Errors
	///
	/// [`Error::ExceedsMax`] if `x` does not fit the layout.
	pub fn constant(builder: &CircuitBuilder, x: &num_bigint::BigUint) -> Result<Self, Error> {
		let limbs = Self::split("constant", x)?
			.iter()
			.map(|limb| builder.add_constant_biguint(limb))
			.collect();
		Ok(Self::from_parts(limbs, x.clone()))
	}

	/// The constant `0`.
	pub fn zero(builder: &CircuitBuilder) -> Self {
		Self::from_parts(vec![builder.zero(); L::LIMB_NUM], num_bigint::BigUint::ZERO)
	}

	/// The constant `1`.
	pub fn one(builder: &CircuitBuilder) -> Self {
		let mut limbs = vec![builder.zero(); L::LIMB_NUM];
		limbs[0] = builder.one();
		Self::from_parts(limbs, num_bigint::BigUint::from(1u32))
	}

	/// Wraps existing wires as a value, range checking every limb as `limb[i]`.
	///
	/// # Errors
	///
	/// - [`Error::LimbCountMismatch`] if `limbs` does not have `LIMB_NUM` entries.
	/// - [`Error::Constraint`] if a limb is out of range.
	pub fn from_limbs(builder: &CircuitBuilder, limbs: Vec<Wire>) -> Result<Self, Error> {
		if limbs.len() != L::LIMB_NUM {
			return Err(Error::LimbCountMismatch {
				layout: L::NAME,
				expected: L::LIMB_NUM,
				actual: limbs.len(),
			});
		}
		for (i, &limb) in limbs.iter().enumerate() {
			range_check(builder, format!("limb[{i}]"), limb, L::LIMB_SIZE)?;
		}
		let shadow = recombine::<L>(builder, &limbs);
		Ok(Self::from_parts(limbs, shadow))
	}

	/// Reads the value back from the limbs assigned in `builder`.
	pub fn to_integer(&self, builder: &CircuitBuilder) -> num_bigint::BigUint {
		recombine::<L>(builder, &self.limbs)
	}

	/// The limb wires, least significant first.
	pub fn limbs(&self) -> &[Wire] {
		&self.limbs
	}

	/// The cached plain-integer value.
	pub fn shadow(&self) -> &num_bigint::BigUint {
		&self.shadow
	}

	/// Injects `x` as private limbs, each range checked as `limb[i]`.
	///
	/// `what` names the value in [`Error::ExceedsMax`].
	pub(super) fn witness(
		builder: &CircuitBuilder,
		what: &'static str,
		x: &num_bigint::BigUint,
	) -> Result<Self, Error> {
		let limbs = Self::split(what, x)?
			.iter()
			.enumerate()
			.map(|(i, limb)| {
				let limb = builder.add_witness(felt_from_biguint(limb));
				range_check(builder, format!("limb[{i}]"), limb, L::LIMB_SIZE)?;
				Ok(limb)
			})
			.collect::<Result<Vec<_>, Error>>()?;
		Ok(Self::from_parts(limbs, x.clone()))
	}

	pub(super) fn from_parts(limbs: Vec<Wire>, shadow: num_bigint::BigUint) -> Self {
		debug_assert_eq!(limbs.len(), L::LIMB_NUM);
		Self {
			limbs,
			shadow,
			_layout: PhantomData,
		}
	}

	fn split(what: &'static str, x: &num_bigint::BigUint) -> Result<Vec<num_bigint::BigUint>, Error> {
		biguint_to_limbs(x, L::LIMB_SIZE, L::LIMB_NUM).ok_or_else(|| Error::ExceedsMax {
			what,
			layout: L::NAME,
			value_bits: x.bits(),
			max_bits: L::params().total_bits(),
		})
	}
}

fn recombine<L: LimbLayout>(builder: &CircuitBuilder, limbs: &[Wire]) -> num_bigint::BigUint {
	num_biguint_from_limbs(limbs.iter().map(|&limb| builder.value_biguint(limb)), L::LIMB_SIZE)
}

/// Asserts that two values are equal, limb by limb.
///
/// The limb assertions are named `name[i]`.
pub fn assert_equals<L: LimbLayout>(
	builder: &CircuitBuilder,
	name: impl Into<String>,
	a: &BigInt<L>,
	b: &BigInt<L>,
) -> Result<(), Error> {
	builder.assert_eq_v(name, &a.limbs, &b.limbs)?;
	Ok(())
}

/// Selects `t` if the boolean `cond` is `1` and `f` if it is `0`.
///
/// `cond` must already be constrained to be boolean, e.g. the output of a comparison.
///
/// # Cost
///
/// One MUL constraint per limb.
pub fn select<L: LimbLayout>(
	builder: &CircuitBuilder,
	cond: Wire,
	t: &BigInt<L>,
	f: &BigInt<L>,
) -> BigInt<L> {
	let limbs = iter::zip(&t.limbs, &f.limbs)
		.map(|(&t_limb, &f_limb)| builder.select(cond, t_limb, f_limb))
		.collect();
	let shadow = if builder.value(cond) == Felt::ONE {
		t.shadow.clone()
	} else {
		f.shadow.clone()
	};
	BigInt::from_parts(limbs, shadow)
}

/// Splits `value` into a low part of `limb_size` bits and a one-bit high part.
///
/// Both parts are injected as witnesses and range checked as `lo` and `hi`. The caller asserts
/// how they recombine.
pub(super) fn split_limb(
	builder: &CircuitBuilder,
	value: &num_bigint::BigInt,
	limb_size: u32,
) -> Result<(Wire, Wire), Error> {
	let pieces = builder.call_hint(
		&LimbSplitHint::new([limb_size, 1]),
		&[],
		slice::from_ref(value),
	)?;
	let lo = builder.add_witness(felt_from_bigint(&pieces[0]));
	let hi = builder.add_witness(felt_from_bigint(&pieces[1]));
	range_check(builder, "lo", lo, limb_size)?;
	builder.range_check_prim("hi", hi, 1)?;
	Ok((lo, hi))
}
