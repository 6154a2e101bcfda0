// Copyright 2025 Irreducible Inc.
//! Constants of the constraint system.

/// The widest range the primitive [range constraint][`crate::RangeConstraint`] may assert.
///
/// Wider ranges have to be decomposed into pieces of at most this many bits.
pub const MAX_PRIMITIVE_RANGE_BITS: u32 = 64;

/// The number of bits every native field element can hold without wrapping around the field
/// modulus.
///
/// The native field is the 255-bit Pallas base field, so any integer below `2^254` is
/// represented faithfully.
pub const FELT_CAPACITY_BITS: u32 = 254;

/// The index of the constant `1` in every value vector.
///
/// The constants section always starts with `1` so that linear constraints can carry constant
/// terms.
pub const ONE_VALUE_INDEX: u32 = 0;
