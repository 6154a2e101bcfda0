// Copyright 2025 Irreducible Inc.
//! Modular arithmetic on integers wider than a field element.
//!
//! A [`BigInt`] holds a fixed number of limbs of a fixed width, chosen by a [`LimbLayout`]
//! marker type. The representation uses little-endian ordering, meaning the least significant
//! limb is at index 0, and every limb is range checked to its width.
//!
//! Operations follow the same pattern: a hint computes the answer on plain integers, the
//! answer is injected as fresh range checked limbs, and constraints tie it to the operands.
//! Modular operations are methods of the modulus:
//!
//! ```ignore
//! let m = BigInt::<L384x6>::from_biguint(&builder, &modulus)?;
//! let c = m.mul(&builder, &a, &b)?; // (a·b) mod m
//! ```

mod addsub;
mod biguint;
mod carry_chain;
mod cmp;
mod div;
mod error;
mod mul;
mod params;


pub use biguint::{BigInt, assert_equals, select};
pub use cmp::{bigint_eq, bigint_ge, bigint_gt, bigint_le, bigint_lt};
pub use div::DivRem;
pub use error::Error;
pub use params::{
	BigIntParams, L384x2, L384x3, L384x6, L384x8, L384x12, L2048x16, L2048x18, L2048x32,
	LayoutVisitor, LimbLayout,
};
