// Copyright 2025 Irreducible Inc.
//! Limb layouts.
//!
//! A layout fixes how many limbs a value has and how wide each limb is. Layouts exist twice: as
//! zero-sized marker types implementing [`LimbLayout`], which parameterize
//! [`BigInt`](super::BigInt) at compile time, and as [`BigIntParams`] records in a table that
//! can be searched by name at runtime. [`BigIntParams::visit`] bridges the two.

use num_bigint::BigUint;
use num_traits::One;

/// Compile-time description of a limb layout.
pub trait LimbLayout: 'static {
	/// The table name of the layout, e.g. `"384_6"`.
	const NAME: &'static str;
	/// Number of limbs.
	const LIMB_NUM: usize;
	/// Width of every limb in bits.
	const LIMB_SIZE: u32;

	/// The runtime record of this layout.
	fn params() -> BigIntParams {
		BigIntParams {
			name: Self::NAME,
			limb_num: Self::LIMB_NUM,
			limb_size: Self::LIMB_SIZE,
		}
	}
}

/// Runtime description of a limb layout.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BigIntParams {
	/// The table name, e.g. `"2048_18"`.
	pub name: &'static str,
	/// Number of limbs.
	pub limb_num: usize,
	/// Width of every limb in bits.
	pub limb_size: u32,
}

impl BigIntParams {
	/// Every named layout.
	pub fn all() -> &'static [BigIntParams] {
		LAYOUTS
	}

	/// Looks up a layout by its table name.
	pub fn by_name(name: &str) -> Option<&'static BigIntParams> {
		LAYOUTS.iter().find(|params| params.name == name)
	}

	/// `2^limb_size - 1`, the largest limb.
	pub fn mask(&self) -> BigUint {
		(BigUint::one() << self.limb_size) - 1u32
	}

	/// `2^(limb_num·limb_size) - 1`, the largest representable value.
	pub fn max(&self) -> BigUint {
		(BigUint::one() << self.total_bits()) - 1u32
	}

	/// Number of bits covered by all limbs together.
	pub fn total_bits(&self) -> u64 {
		self.limb_num as u64 * self.limb_size as u64
	}

	/// Calls `visitor` with the marker type of this layout.
	///
	/// Returns `None` for records that are not in the table.
	pub fn visit<V: LayoutVisitor>(&self, visitor: V) -> Option<V::Output> {
		if Self::by_name(self.name) != Some(self) {
			return None;
		}
		visit_by_name(self.name, visitor)
	}
}

/// A computation that is generic over the layout, see [`BigIntParams::visit`].
pub trait LayoutVisitor {
	/// The result of the computation.
	type Output;

	/// Runs the computation for layout `L`.
	fn visit<L: LimbLayout>(self) -> Self::Output;
}

macro_rules! limb_layouts {
	($($(#[$attr:meta])* $ty:ident => $name:literal, $limb_num:literal x $limb_size:literal;)*) => {
		$(
			$(#[$attr])*
			#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
			pub struct $ty;

			impl LimbLayout for $ty {
				const NAME: &'static str = $name;
				const LIMB_NUM: usize = $limb_num;
				const LIMB_SIZE: u32 = $limb_size;
			}
		)*

		const LAYOUTS: &[BigIntParams] = &[
			$(BigIntParams { name: $name, limb_num: $limb_num, limb_size: $limb_size },)*
		];

		fn visit_by_name<V: LayoutVisitor>(name: &str, visitor: V) -> Option<V::Output> {
			match name {
				$($name => Some(visitor.visit::<$ty>()),)*
				_ => None,
			}
		}
	};
}

limb_layouts! {
	/// 384 bits as 2 limbs of 192 bits.
	L384x2 => "384_2", 2 x 192;
	/// 384 bits as 3 limbs of 128 bits.
	L384x3 => "384_3", 3 x 128;
	/// 384 bits as 6 limbs of 64 bits.
	L384x6 => "384_6", 6 x 64;
	/// 384 bits as 8 limbs of 48 bits.
	L384x8 => "384_8", 8 x 48;
	/// 384 bits as 12 limbs of 32 bits.
	L384x12 => "384_12", 12 x 32;
	/// 2048 bits as 16 limbs of 128 bits.
	L2048x16 => "2048_16", 16 x 128;
	/// 2088 bits as 18 limbs of 116 bits.
	L2048x18 => "2048_18", 18 x 116;
	/// 2048 bits as 32 limbs of 64 bits.
	L2048x32 => "2048_32", 32 x 64;
}

#[cfg(test)]
mod tests {
	use super::*;

	struct Describe;

	impl LayoutVisitor for Describe {
		type Output = (usize, u32);

		fn visit<L: LimbLayout>(self) -> Self::Output {
			(L::LIMB_NUM, L::LIMB_SIZE)
		}
	}

	#[test]
	fn test_by_name() {
		let params = BigIntParams::by_name("384_6").unwrap();
		assert_eq!(*params, L384x6::params());
		assert_eq!(params.mask(), BigUint::from(u64::MAX));
		assert_eq!(params.max().bits(), 384);
		assert!(BigIntParams::by_name("384_7").is_none());
	}

	#[test]
	fn test_table_matches_marker_types() {
		for params in BigIntParams::all() {
			assert_eq!(params.visit(Describe), Some((params.limb_num, params.limb_size)));
		}
		assert_eq!(L2048x18::params().total_bits(), 2088);
		assert_eq!(L384x8::params().total_bits(), 384);
	}

	#[test]
	fn test_visit_rejects_unknown_record() {
		let params = BigIntParams {
			name: "384_6",
			limb_num: 4,
			limb_size: 96,
		};
		assert_eq!(params.visit(Describe), None);
	}
}
