// Copyright 2025 Irreducible Inc.
use cranelift_entity::SecondaryMap;
use limbo_core::{
	ConstraintSystemError, Felt,
	constraint_system::{ConstraintSystem, ValueIndex, ValueVec},
	verify::verify_constraints,
};

use crate::compiler::{
	Wire,
	constraint_builder::ConstraintScopes,
	error::ConstraintError,
	scope::{Scope, ScopeTree},
};

/// An artifact that represents a built circuit.
///
/// The difference from [`ConstraintSystem`] is that a circuit retains the values assigned while
/// it was built and the names of the scopes its constraints were emitted in, so failures can be
/// reported by name.
pub struct Circuit {
	constraint_system: ConstraintSystem,
	values: ValueVec,
	wire_mapping: SecondaryMap<Wire, ValueIndex>,
	constraint_scopes: ConstraintScopes,
	scope_tree: ScopeTree,
	n_hints: usize,
}

impl Circuit {
	/// Creates a new circuit. Only used during building by the circuit builder.
	pub(super) fn new(
		constraint_system: ConstraintSystem,
		values: ValueVec,
		wire_mapping: SecondaryMap<Wire, ValueIndex>,
		constraint_scopes: ConstraintScopes,
		scope_tree: ScopeTree,
		n_hints: usize,
	) -> Self {
		assert!(constraint_system.value_vec_layout.validate().is_ok());
		Self {
			constraint_system,
			values,
			wire_mapping,
			constraint_scopes,
			scope_tree,
			n_hints,
		}
	}

	/// For the given wire, returns its index in the value vector.
	#[inline(always)]
	pub fn witness_index(&self, wire: Wire) -> ValueIndex {
		self.wire_mapping[wire]
	}

	/// Returns the value assigned to `wire`.
	pub fn value(&self, wire: Wire) -> Felt {
		self.values[self.witness_index(wire)]
	}

	/// Returns the value vector recorded while building.
	pub fn values(&self) -> &ValueVec {
		&self.values
	}

	/// Returns the constraint system for this circuit.
	pub fn constraint_system(&self) -> &ConstraintSystem {
		&self.constraint_system
	}

	/// Returns the number of hint invocations made while building.
	pub fn n_hints(&self) -> usize {
		self.n_hints
	}

	/// Re-checks every constraint against the values recorded while building.
	pub fn verify(&self) -> Result<(), ConstraintError> {
		self.verify_values(&self.values)
	}

	/// Checks every constraint against `values`.
	///
	/// # Errors
	///
	/// The first unsatisfied constraint is reported together with the qualified name of the
	/// scope it was emitted in.
	pub fn verify_values(&self, values: &ValueVec) -> Result<(), ConstraintError> {
		let Err(err) = verify_constraints(&self.constraint_system, values) else {
			return Ok(());
		};
		let scope = match &err {
			ConstraintSystemError::Unsatisfied {
				constraint_type,
				constraint_index,
				..
			} => self.scope_of(constraint_type, *constraint_index),
			_ => None,
		};
		match scope {
			Some(scope) => Err(ConstraintError::Unsatisfied {
				name: self.scope_tree.qualified_name(scope),
				source: err,
			}),
			None => Err(err.into()),
		}
	}

	fn scope_of(&self, constraint_type: &str, index: usize) -> Option<Scope> {
		let scopes = match constraint_type {
			"linear" => &self.constraint_scopes.linear,
			"mul" => &self.constraint_scopes.mul,
			"range" => &self.constraint_scopes.range,
			_ => return None,
		};
		scopes.get(index).copied()
	}
}
