// Copyright 2025 Irreducible Inc.
use std::{
	cell::{RefCell, RefMut},
	rc::Rc,
};

use ff::Field;
use limbo_core::{
	Felt, ValueVec,
	consts::MAX_PRIMITIVE_RANGE_BITS,
	constraint_system::ConstraintSystem,
	felt::{felt_bits, felt_from_biguint, felt_to_bigint, felt_to_biguint},
};
use num_bigint::{BigInt, BigUint};
use smallvec::smallvec;

use crate::{
	compiler::{
		circuit::Circuit,
		constraint_builder::{ConstraintBuilder, WireOperand, WireTerm, eval_operand},
		error::ConstraintError,
		hints::{BigUintDivideHint, CarryChainHint, Hint, HintError, LimbSplitHint, run_hint},
		scope::Scope,
		wire_store::{WireKind, WireStore},
	},
	stat::ConstraintCounts,
};

pub mod circuit;
mod constraint_builder;
pub mod error;
pub mod hints;
mod scope;
#[cfg(test)]
mod tests;
mod value_vec_alloc;
mod wire_store;

pub use wire_store::Wire;

pub(crate) struct Shared {
	pub(crate) wires: WireStore,
	pub(crate) constraints: ConstraintBuilder,
	pub(crate) n_hints: usize,
}

/// Circuit builder for constructing constraint systems over the native field.
///
/// `CircuitBuilder` is the primary interface for expressing a computation as constraints. Every
/// wire carries a value from the moment it is created, so the builder knows the full
/// assignment while constraints are being emitted.
///
/// # Wire Types
///
/// **Constants** - Values known to everybody. Created with [`add_constant`] and deduplicated.
/// The constant `1` always exists.
///
/// **Public inputs/outputs** - Values visible to both prover and verifier. Created with
/// [`add_inout`].
///
/// **Private witnesses** - Values known only to the prover, typically outputs of hints. Created
/// with [`add_witness`].
///
/// **Internal wires** - Created automatically by operations such as [`add`] and [`mul`].
///
/// # Constraints
///
/// **Linear constraints** - `Σ cᵢ·vᵢ = 0`. Additions, subtractions and scaling cost one linear
/// constraint each.
///
/// **MUL constraints** - `(Σ aᵢ·vᵢ)·(Σ bᵢ·vᵢ) = Σ cᵢ·vᵢ`. Products, boolean connectives and
/// selection cost one each.
///
/// **Range constraints** - `0 ≤ v < 2^n` for `n ≤ 64`. Wider ranges are decomposed by the
/// gadgets in the circuits crate.
///
/// # Assertions
///
/// Assertions take a name and are checked eagerly: the constraint is appended and, if the
/// assigned values violate it, an error naming the full sub-circuit path is returned. Emitted
/// constraints are never removed, even when they fail.
///
/// # Booleans
///
/// Boolean wires hold `0` or `1`. The boolean connectives do not check their inputs;
/// use [`assert_bool`] when a value does not come from a comparison.
///
/// [`build`] consumes internal state and can only be called once per builder instance.
///
/// [`add`]: Self::add
/// [`add_constant`]: Self::add_constant
/// [`add_inout`]: Self::add_inout
/// [`add_witness`]: Self::add_witness
/// [`assert_bool`]: Self::assert_bool
/// [`build`]: Self::build
/// [`mul`]: Self::mul
#[derive(Clone)]
pub struct CircuitBuilder {
	/// Current scope at which this circuit builder is positioned.
	current_scope: Scope,
	shared: Rc<RefCell<Option<Shared>>>,
}

impl Default for CircuitBuilder {
	fn default() -> Self {
		CircuitBuilder::new()
	}
}

#[warn(missing_docs)]
impl CircuitBuilder {
	/// Create a new circuit builder.
	pub fn new() -> Self {
		let wires = WireStore::new();
		let root = wires.scopes.root();
		CircuitBuilder {
			current_scope: root,
			shared: Rc::new(RefCell::new(Some(Shared {
				wires,
				constraints: ConstraintBuilder::new(),
				n_hints: 0,
			}))),
		}
	}

	/// Returns the circuit built by this builder.
	///
	/// Note that cloning the circuit builder only clones the reference and as such is treated
	/// as a shallow copy.
	///
	/// # Preconditions
	///
	/// Must be called only once.
	pub fn build(&self) -> Circuit {
		let shared = self.shared.borrow_mut().take();
		let Some(shared) = shared else {
			panic!("CircuitBuilder::build called twice");
		};
		let Shared {
			wires,
			constraints,
			n_hints,
		} = shared;

		let value_vec_alloc::Assignment {
			wire_mapping,
			value_vec_layout,
			constants,
			values,
		} = {
			let mut value_vec_alloc = value_vec_alloc::Alloc::new();
			for (wire, wire_data) in wires.wires.iter() {
				match wire_data.kind {
					WireKind::Constant => value_vec_alloc.add_constant(wire, wire_data.value),
					WireKind::Inout => value_vec_alloc.add_inout(wire, wire_data.value),
					WireKind::Witness => value_vec_alloc.add_witness(wire, wire_data.value),
					WireKind::Internal => value_vec_alloc.add_internal(wire, wire_data.value),
				}
			}
			value_vec_alloc.into_assignment()
		};

		let (linear_constraints, mul_constraints, range_constraints, constraint_scopes) =
			constraints.build(&wire_mapping);
		let cs = ConstraintSystem::new(
			constants,
			value_vec_layout.clone(),
			linear_constraints,
			mul_constraints,
			range_constraints,
		);
		if cfg!(debug_assertions) {
			// Validate that the resulting constraint system has a good shape.
			cs.validate().unwrap();
		}

		let (public, private) = values.split_at(value_vec_layout.offset_witness);
		let values = ValueVec::new_from_data(value_vec_layout, public.to_vec(), private.to_vec())
			.expect("allocation covers every wire");

		Circuit::new(cs, values, wire_mapping, constraint_scopes, wires.scopes, n_hints)
	}

	/// Creates a reference to the same underlying circuit builder that is namespaced to the
	/// given name.
	///
	/// This is useful for creating subcircuits within a larger circuit.
	///
	/// Note that this is the same builder instance, but with a different namespace, and that means
	/// calling [`Self::build`] on the returned builder is going to build the whole circuit.
	pub fn subcircuit(&self, name: impl Into<String>) -> CircuitBuilder {
		let nested = self
			.shared_mut()
			.wires
			.scopes
			.child(self.current_scope, name);
		CircuitBuilder {
			current_scope: nested,
			shared: self.shared.clone(),
		}
	}

	fn shared_mut(&self) -> RefMut<'_, Shared> {
		RefMut::map(self.shared.borrow_mut(), |shared| {
			shared.as_mut().expect("CircuitBuilder used after build")
		})
	}

	/// Snapshot of the number of constraints, wires and hint calls emitted so far.
	///
	/// Subtract two snapshots to attribute cost to the operations in between.
	pub fn counts(&self) -> ConstraintCounts {
		let shared = self.shared_mut();
		ConstraintCounts {
			n_linear: shared.constraints.linear_constraints.len(),
			n_mul: shared.constraints.mul_constraints.len(),
			n_range: shared.constraints.range_constraints.len(),
			range_bits: shared.constraints.range_bits,
			n_wires: shared.wires.n_wires(),
			n_hints: shared.n_hints,
		}
	}

	/// Returns the dot separated path of the current sub-circuit.
	pub fn scope_name(&self) -> String {
		self.shared_mut()
			.wires
			.scopes
			.qualified_name(self.current_scope)
	}

	/// Returns the fully qualified name of `name` inside the current sub-circuit.
	pub fn qualified_name(&self, name: &str) -> String {
		let prefix = self.scope_name();
		if prefix.is_empty() {
			name.to_string()
		} else {
			format!("{prefix}.{name}")
		}
	}

	/// Returns the value assigned to `wire`.
	pub fn value(&self, wire: Wire) -> Felt {
		self.shared_mut().wires.value(wire)
	}

	/// Returns the value assigned to `wire` as its canonical integer representative.
	pub fn value_biguint(&self, wire: Wire) -> BigUint {
		felt_to_biguint(self.value(wire))
	}

	/// Creates a wire holding a constant.
	///
	/// # Returns
	/// A `Wire` representing the constant value. The wire might be aliased because the constants
	/// are deduplicated.
	///
	/// # Cost
	///
	/// Constants have no constraint cost.
	pub fn add_constant(&self, value: Felt) -> Wire {
		self.shared_mut().wires.add_constant(value)
	}

	/// Creates a constant wire from a 64-bit unsigned integer.
	pub fn add_constant_u64(&self, c: u64) -> Wire {
		self.add_constant(Felt::from(c))
	}

	/// Creates a constant wire from an integer. The integer is reduced modulo the field.
	pub fn add_constant_biguint(&self, c: &BigUint) -> Wire {
		self.add_constant(felt_from_biguint(c))
	}

	/// The constant `0`.
	pub fn zero(&self) -> Wire {
		self.add_constant(Felt::ZERO)
	}

	/// The constant `1`.
	pub fn one(&self) -> Wire {
		self.shared_mut().wires.one()
	}

	/// Creates a public input/output wire holding `value`.
	///
	/// Public wires form part of the statement and are visible to both prover and verifier.
	pub fn add_inout(&self, value: Felt) -> Wire {
		self.shared_mut().wires.add_inout(value)
	}

	/// Creates a private wire holding `value`.
	///
	/// A witness is unconstrained until an operation or assertion refers to it.
	pub fn add_witness(&self, value: Felt) -> Wire {
		self.shared_mut().wires.add_witness(value)
	}

	/// Linear combination.
	///
	/// Returns `z = Σ cᵢ·xᵢ + constant`.
	///
	/// # Cost
	///
	/// 1 linear constraint.
	pub fn lincomb(&self, terms: &[(Felt, Wire)], constant: Felt) -> Wire {
		let mut shared = self.shared_mut();
		let one = shared.wires.one();
		let mut operand: WireOperand = terms
			.iter()
			.map(|&(coeff, wire)| WireTerm::new(coeff, wire))
			.collect();
		operand.push(WireTerm::new(constant, one));
		let value = eval_operand(&operand, &shared.wires);
		let z = shared.wires.add_internal(value);
		operand.push(WireTerm::neg(z));
		shared.constraints.linear(self.current_scope, operand);
		z
	}

	/// Field addition. Returns `z = x + y`.
	///
	/// # Cost
	///
	/// 1 linear constraint.
	pub fn add(&self, x: Wire, y: Wire) -> Wire {
		self.lincomb(&[(Felt::ONE, x), (Felt::ONE, y)], Felt::ZERO)
	}

	/// Field subtraction. Returns `z = x - y`.
	///
	/// # Cost
	///
	/// 1 linear constraint.
	pub fn sub(&self, x: Wire, y: Wire) -> Wire {
		self.lincomb(&[(Felt::ONE, x), (-Felt::ONE, y)], Felt::ZERO)
	}

	/// Field negation. Returns `z = -x`.
	pub fn neg(&self, x: Wire) -> Wire {
		self.lincomb(&[(-Felt::ONE, x)], Felt::ZERO)
	}

	/// Returns `z = x + c`.
	pub fn add_const(&self, x: Wire, c: Felt) -> Wire {
		self.lincomb(&[(Felt::ONE, x)], c)
	}

	/// Returns `z = c·x`.
	pub fn mul_const(&self, x: Wire, c: Felt) -> Wire {
		self.lincomb(&[(c, x)], Felt::ZERO)
	}

	/// Field multiplication. Returns `z = x·y`.
	///
	/// # Cost
	///
	/// 1 MUL constraint.
	pub fn mul(&self, x: Wire, y: Wire) -> Wire {
		let mut shared = self.shared_mut();
		let value = shared.wires.value(x) * shared.wires.value(y);
		let z = shared.wires.add_internal(value);
		shared.constraints.mul(
			self.current_scope,
			smallvec![WireTerm::plain(x)],
			smallvec![WireTerm::plain(y)],
			smallvec![WireTerm::plain(z)],
		);
		z
	}

	/// Asserts that `Σ cᵢ·xᵢ + constant = 0`.
	///
	/// # Cost
	///
	/// 1 linear constraint.
	pub fn assert_lincomb_zero(
		&self,
		name: impl Into<String>,
		terms: &[(Felt, Wire)],
		constant: Felt,
	) -> Result<(), ConstraintError> {
		let operand = {
			let shared = self.shared_mut();
			let mut operand: WireOperand = terms
				.iter()
				.map(|&(coeff, wire)| WireTerm::new(coeff, wire))
				.collect();
			operand.push(WireTerm::new(constant, shared.wires.one()));
			operand
		};
		self.emit_linear_assertion(name.into(), operand, |sum, _| {
			format!("linear combination evaluates to {}", felt_to_bigint(sum))
		})
	}

	/// Asserts that two wires are equal.
	///
	/// If the assertion fails, the error names it and shows both values.
	///
	/// # Cost
	///
	/// 1 linear constraint.
	pub fn assert_eq(
		&self,
		name: impl Into<String>,
		x: Wire,
		y: Wire,
	) -> Result<(), ConstraintError> {
		self.emit_linear_assertion(
			name.into(),
			smallvec![WireTerm::plain(x), WireTerm::neg(y)],
			|_, wires| {
				format!(
					"{} != {}",
					felt_to_bigint(wires.value(x)),
					felt_to_bigint(wires.value(y))
				)
			},
		)
	}

	/// Vector equality assertion.
	///
	/// Each element assertion is named with the base name and index.
	///
	/// # Panics
	///
	/// If `x` and `y` have different lengths.
	pub fn assert_eq_v(
		&self,
		name: impl Into<String>,
		x: &[Wire],
		y: &[Wire],
	) -> Result<(), ConstraintError> {
		assert_eq!(x.len(), y.len(), "assert_eq_v: length mismatch");
		let base_name = name.into();
		for (i, (&x, &y)) in x.iter().zip(y).enumerate() {
			self.assert_eq(format!("{base_name}[{i}]"), x, y)?;
		}
		Ok(())
	}

	/// Asserts that the given wire equals zero.
	pub fn assert_zero(&self, name: impl Into<String>, x: Wire) -> Result<(), ConstraintError> {
		self.emit_linear_assertion(name.into(), smallvec![WireTerm::plain(x)], |value, _| {
			format!("{} != 0", felt_to_bigint(value))
		})
	}

	/// Asserts that the boolean `x` is true, i.e. `x = 1`.
	pub fn assert_true(&self, name: impl Into<String>, x: Wire) -> Result<(), ConstraintError> {
		let one = self.one();
		self.emit_linear_assertion(
			name.into(),
			smallvec![WireTerm::plain(x), WireTerm::neg(one)],
			|_, wires| format!("expected true, got {}", felt_to_bigint(wires.value(x))),
		)
	}

	/// Asserts that the boolean `x` is false, i.e. `x = 0`.
	pub fn assert_false(&self, name: impl Into<String>, x: Wire) -> Result<(), ConstraintError> {
		self.emit_linear_assertion(name.into(), smallvec![WireTerm::plain(x)], |value, _| {
			format!("expected false, got {}", felt_to_bigint(value))
		})
	}

	/// Asserts that `x` is `0` or `1`.
	///
	/// # Cost
	///
	/// 1 MUL constraint (`x·x = x`).
	pub fn assert_bool(&self, name: impl Into<String>, x: Wire) -> Result<(), ConstraintError> {
		let name = name.into();
		let mut shared = self.shared_mut();
		let scope = shared.wires.scopes.child(self.current_scope, name);
		shared.constraints.mul(
			scope,
			smallvec![WireTerm::plain(x)],
			smallvec![WireTerm::plain(x)],
			smallvec![WireTerm::plain(x)],
		);
		let value = shared.wires.value(x);
		if value * value == value {
			return Ok(());
		}
		let name = shared.wires.scopes.qualified_name(scope);
		drop(shared);
		Err(assertion_failed(name, format!("{} is not a boolean", felt_to_bigint(value))))
	}

	/// Primitive range check: asserts `0 ≤ x < 2^n_bits`.
	///
	/// # Errors
	///
	/// [`ConstraintError::RangeTooWide`] if `n_bits` exceeds [`MAX_PRIMITIVE_RANGE_BITS`]; no
	/// constraint is emitted in that case. [`ConstraintError::AssertionFailed`] if the value
	/// does not fit.
	///
	/// # Cost
	///
	/// 1 range constraint.
	pub fn range_check_prim(
		&self,
		name: impl Into<String>,
		x: Wire,
		n_bits: u32,
	) -> Result<(), ConstraintError> {
		let name = name.into();
		let mut shared = self.shared_mut();
		let scope = shared.wires.scopes.child(self.current_scope, name);
		if n_bits > MAX_PRIMITIVE_RANGE_BITS {
			let name = shared.wires.scopes.qualified_name(scope);
			return Err(ConstraintError::RangeTooWide { name, n_bits });
		}
		shared.constraints.range(scope, x, n_bits);
		let value = shared.wires.value(x);
		if felt_bits(value) <= n_bits as u64 {
			return Ok(());
		}
		let name = shared.wires.scopes.qualified_name(scope);
		drop(shared);
		Err(assertion_failed(
			name,
			format!("{} does not fit in {n_bits} bits", felt_to_bigint(value)),
		))
	}

	/// Boolean AND. Returns `z = x·y`.
	pub fn band(&self, x: Wire, y: Wire) -> Wire {
		self.mul(x, y)
	}

	/// Boolean OR. Returns `z = x + y - x·y`.
	///
	/// # Cost
	///
	/// 1 MUL constraint (`(1 - x)·(1 - y) = 1 - z`).
	pub fn bor(&self, x: Wire, y: Wire) -> Wire {
		let mut shared = self.shared_mut();
		let one = shared.wires.one();
		let (xv, yv) = (shared.wires.value(x), shared.wires.value(y));
		let z = shared.wires.add_internal(xv + yv - xv * yv);
		shared.constraints.mul(
			self.current_scope,
			smallvec![WireTerm::plain(one), WireTerm::neg(x)],
			smallvec![WireTerm::plain(one), WireTerm::neg(y)],
			smallvec![WireTerm::plain(one), WireTerm::neg(z)],
		);
		z
	}

	/// Boolean NOT. Returns `z = 1 - x`.
	pub fn bnot(&self, x: Wire) -> Wire {
		self.lincomb(&[(-Felt::ONE, x)], Felt::ONE)
	}

	/// Equality.
	///
	/// Returns `1` if `x == y` and `0` otherwise. The prover supplies the inverse of `x - y`.
	///
	/// # Cost
	///
	/// 2 MUL constraints.
	pub fn icmp_eq(&self, x: Wire, y: Wire) -> Wire {
		let mut shared = self.shared_mut();
		let one = shared.wires.one();
		let diff = shared.wires.value(x) - shared.wires.value(y);
		let inv = Option::<Felt>::from(diff.invert()).unwrap_or(Felt::ZERO);
		let eq = if bool::from(diff.is_zero()) {
			Felt::ONE
		} else {
			Felt::ZERO
		};
		let inv = shared.wires.add_internal(inv);
		let eq = shared.wires.add_internal(eq);
		// (x - y)·inv = 1 - eq
		shared.constraints.mul(
			self.current_scope,
			smallvec![WireTerm::plain(x), WireTerm::neg(y)],
			smallvec![WireTerm::plain(inv)],
			smallvec![WireTerm::plain(one), WireTerm::neg(eq)],
		);
		// (x - y)·eq = 0
		shared.constraints.mul(
			self.current_scope,
			smallvec![WireTerm::plain(x), WireTerm::neg(y)],
			smallvec![WireTerm::plain(eq)],
			smallvec![],
		);
		eq
	}

	/// Selection. Returns `t` if `cond` is `1` and `f` if `cond` is `0`.
	///
	/// # Cost
	///
	/// 1 MUL constraint (`cond·(t - f) = z - f`).
	pub fn select(&self, cond: Wire, t: Wire, f: Wire) -> Wire {
		let mut shared = self.shared_mut();
		let (cv, tv, fv) = (shared.wires.value(cond), shared.wires.value(t), shared.wires.value(f));
		let z = shared.wires.add_internal(fv + cv * (tv - fv));
		shared.constraints.mul(
			self.current_scope,
			smallvec![WireTerm::plain(cond)],
			smallvec![WireTerm::plain(t), WireTerm::neg(f)],
			smallvec![WireTerm::plain(z), WireTerm::neg(f)],
		);
		z
	}

	/// Runs a hint on plain integers.
	///
	/// This is a deterministic computation that happens only on the prover side. The outputs are
	/// not constrained; the caller must inject them as witnesses and tie them to its operands.
	pub fn call_hint(
		&self,
		hint: &dyn Hint,
		dimensions: &[usize],
		inputs: &[BigInt],
	) -> Result<Vec<BigInt>, HintError> {
		self.shared_mut().n_hints += 1;
		run_hint(hint, dimensions, inputs).inspect_err(|err| {
			tracing::debug!(
				hint = hint.name(),
				scope = %self.scope_name(),
				%err,
				"hint rejected its inputs"
			);
		})
	}

	/// BigUint division.
	///
	/// Returns `(quotient, remainder)` of the division of `dividend` by `divisor`.
	///
	/// This is a hint. The result should be additionally constrained to check that
	/// `remainder + divisor * quotient == dividend`.
	pub fn biguint_divide_hint(
		&self,
		dividend: &BigUint,
		divisor: &BigUint,
	) -> Result<(BigUint, BigUint), HintError> {
		let outputs = self.call_hint(
			&BigUintDivideHint::new(),
			&[],
			&[BigInt::from(dividend.clone()), BigInt::from(divisor.clone())],
		)?;
		Ok((outputs[0].magnitude().clone(), outputs[1].magnitude().clone()))
	}

	/// Carries of a signed limb polynomial claimed to be zero.
	///
	/// Returns `deltas.len() - 1` signed carries, see [`CarryChainHint`].
	pub fn carry_chain_hint(
		&self,
		limb_size: u32,
		deltas: &[BigInt],
	) -> Result<Vec<BigInt>, HintError> {
		self.call_hint(&CarryChainHint::new(limb_size), &[deltas.len()], deltas)
	}

	/// Splits `value` into bit-fields of the given widths, least significant first.
	///
	/// The last piece receives all remaining high bits, see [`LimbSplitHint`].
	pub fn limb_split_hint(&self, value: &BigUint, widths: &[u32]) -> Result<Vec<BigUint>, HintError> {
		let outputs =
			self.call_hint(&LimbSplitHint::new(widths), &[], &[BigInt::from(value.clone())])?;
		Ok(outputs.iter().map(|piece| piece.magnitude().clone()).collect())
	}

	/// Appends a named linear constraint and checks it against the assigned values.
	fn emit_linear_assertion(
		&self,
		name: String,
		terms: WireOperand,
		describe: impl FnOnce(Felt, &WireStore) -> String,
	) -> Result<(), ConstraintError> {
		let mut shared = self.shared_mut();
		let scope = shared.wires.scopes.child(self.current_scope, name);
		let sum = eval_operand(&terms, &shared.wires);
		shared.constraints.linear(scope, terms);
		if bool::from(sum.is_zero()) {
			return Ok(());
		}
		let detail = describe(sum, &shared.wires);
		let name = shared.wires.scopes.qualified_name(scope);
		drop(shared);
		Err(assertion_failed(name, detail))
	}
}

fn assertion_failed(name: String, detail: String) -> ConstraintError {
	tracing::debug!(assertion = %name, %detail, "assertion failed");
	ConstraintError::AssertionFailed { name, detail }
}
