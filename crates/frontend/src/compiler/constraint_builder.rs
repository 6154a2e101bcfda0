// Copyright 2025 Irreducible Inc.
use cranelift_entity::SecondaryMap;
use ff::Field;
use limbo_core::{
	Felt,
	constraint_system::{LinearConstraint, MulConstraint, RangeConstraint, Term, ValueIndex},
};
use smallvec::SmallVec;

use crate::compiler::{Wire, scope::Scope, wire_store::WireStore};

/// A wire scaled by a field coefficient.
#[derive(Copy, Clone, Debug)]
pub struct WireTerm {
	pub coeff: Felt,
	pub wire: Wire,
}

impl WireTerm {
	pub fn new(coeff: Felt, wire: Wire) -> Self {
		Self { coeff, wire }
	}

	pub fn plain(wire: Wire) -> Self {
		Self::new(Felt::ONE, wire)
	}

	pub fn neg(wire: Wire) -> Self {
		Self::new(-Felt::ONE, wire)
	}
}

/// Operand built from wire terms. Evaluates to the sum of its terms.
pub type WireOperand = SmallVec<[WireTerm; 4]>;

/// Evaluates an operand against the values recorded in the wire store.
pub fn eval_operand(operand: &[WireTerm], wires: &WireStore) -> Felt {
	operand
		.iter()
		.fold(Felt::ZERO, |acc, term| acc + term.coeff * wires.value(term.wire))
}

/// Linear constraint using Wire references: `Σ terms = 0`.
pub struct WireLinearConstraint {
	pub terms: WireOperand,
	pub scope: Scope,
}

/// MUL constraint using Wire references: `A * B = C`.
pub struct WireMulConstraint {
	pub a: WireOperand,
	pub b: WireOperand,
	pub c: WireOperand,
	pub scope: Scope,
}

/// Primitive range constraint using Wire references: `wire < 2^n_bits`.
pub struct WireRangeConstraint {
	pub wire: Wire,
	pub n_bits: u32,
	pub scope: Scope,
}

/// The scope each constraint was emitted in, indexed like the constraint lists.
#[derive(Default)]
pub struct ConstraintScopes {
	pub linear: Vec<Scope>,
	pub mul: Vec<Scope>,
	pub range: Vec<Scope>,
}

/// Append-only store of constraints over wires.
#[derive(Default)]
pub struct ConstraintBuilder {
	pub linear_constraints: Vec<WireLinearConstraint>,
	pub mul_constraints: Vec<WireMulConstraint>,
	pub range_constraints: Vec<WireRangeConstraint>,
	/// Sum of the widths of all range constraints.
	pub range_bits: u64,
}

impl ConstraintBuilder {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn linear(&mut self, scope: Scope, terms: WireOperand) {
		self.linear_constraints
			.push(WireLinearConstraint { terms, scope });
	}

	pub fn mul(&mut self, scope: Scope, a: WireOperand, b: WireOperand, c: WireOperand) {
		self.mul_constraints.push(WireMulConstraint { a, b, c, scope });
	}

	pub fn range(&mut self, scope: Scope, wire: Wire, n_bits: u32) {
		self.range_bits += n_bits as u64;
		self.range_constraints
			.push(WireRangeConstraint { wire, n_bits, scope });
	}

	/// Convert all wire-based constraints to ValueIndex-based constraints.
	pub fn build(
		self,
		wire_mapping: &SecondaryMap<Wire, ValueIndex>,
	) -> (Vec<LinearConstraint>, Vec<MulConstraint>, Vec<RangeConstraint>, ConstraintScopes) {
		let mut scopes = ConstraintScopes::default();

		let linear_constraints = self
			.linear_constraints
			.into_iter()
			.map(|c| {
				scopes.linear.push(c.scope);
				LinearConstraint {
					terms: convert_operand(&c.terms, wire_mapping),
				}
			})
			.collect();

		let mul_constraints = self
			.mul_constraints
			.into_iter()
			.map(|c| {
				scopes.mul.push(c.scope);
				MulConstraint {
					a: convert_operand(&c.a, wire_mapping),
					b: convert_operand(&c.b, wire_mapping),
					c: convert_operand(&c.c, wire_mapping),
				}
			})
			.collect();

		let range_constraints = self
			.range_constraints
			.into_iter()
			.map(|c| {
				scopes.range.push(c.scope);
				RangeConstraint {
					value_index: wire_mapping[c.wire],
					n_bits: c.n_bits,
				}
			})
			.collect();

		(linear_constraints, mul_constraints, range_constraints, scopes)
	}
}

/// Helper function to convert a wire operand into value index terms.
///
/// Terms with a zero coefficient are dropped.
fn convert_operand(operand: &[WireTerm], wire_mapping: &SecondaryMap<Wire, ValueIndex>) -> Vec<Term> {
	operand
		.iter()
		.filter(|term| !bool::from(term.coeff.is_zero()))
		.map(|term| Term::new(term.coeff, wire_mapping[term.wire]))
		.collect()
}
