// Copyright 2025 Irreducible Inc.
//! Gadgets built on top of the circuit frontend.
//!
//! - [`range`] proves that a native value fits in a given number of bits, for widths beyond the
//!   primitive range check.
//! - [`bignum`] implements modular arithmetic on integers wider than a field element, represented
//!   as fixed-length vectors of range-checked limbs.

pub mod bignum;
pub mod range;
