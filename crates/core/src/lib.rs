// Copyright 2025 Irreducible Inc.
//! Core datatypes of the limb arithmetic constraint system.
//!
//! Most importantly it hosts the definition of a [`ConstraintSystem`] over the native field
//! element [`Felt`], and the routine that checks a [`ValueVec`] against it.

#![warn(missing_docs)]

pub mod constraint_system;
pub mod consts;
pub mod error;
pub mod felt;
pub mod verify;

pub use constraint_system::*;
pub use error::ConstraintSystemError;
pub use felt::Felt;
