// Copyright 2025 Irreducible Inc.
//! Constraint system and related definitions.

use std::ops::{Index, IndexMut};

use ff::Field;

use crate::{
	consts::{MAX_PRIMITIVE_RANGE_BITS, ONE_VALUE_INDEX},
	error::ConstraintSystemError,
	felt::Felt,
};

/// A type safe wrapper over an index into the [`ValueVec`].
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct ValueIndex(pub u32);

impl ValueIndex {
	/// The value index that is not considered to be valid.
	pub const INVALID: ValueIndex = ValueIndex(u32::MAX);

	/// The index of the constant `1`.
	pub const ONE: ValueIndex = ValueIndex(ONE_VALUE_INDEX);
}

/// The most sensible default for a value index is invalid.
impl Default for ValueIndex {
	fn default() -> Self {
		Self::INVALID
	}
}

/// A value from the value vector scaled by a field coefficient.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Term {
	/// The scaling coefficient.
	pub coeff: Felt,
	/// The index of the scaled value.
	pub value_index: ValueIndex,
}

impl Term {
	/// Creates a term `coeff * value`.
	pub fn new(coeff: Felt, value_index: ValueIndex) -> Self {
		Self { coeff, value_index }
	}

	/// Creates a term that refers to the value with coefficient one.
	pub fn plain(value_index: ValueIndex) -> Self {
		Self::new(Felt::ONE, value_index)
	}
}

/// Operand type.
///
/// An operand is a linear combination of values from the value vector, i.e. the sum of its
/// [terms][`Term`]. An empty operand evaluates to zero.
pub type Operand = Vec<Term>;

/// Linear constraint: `Σ cᵢ·vᵢ = 0`.
///
/// Constant terms are expressed through the value at [`ValueIndex::ONE`].
#[derive(Debug, Clone, Default)]
pub struct LinearConstraint {
	/// The combination that must evaluate to zero.
	pub terms: Operand,
}

/// MUL constraint: `A * B = C`.
///
/// Multiplication of two linear combinations in the native field.
#[derive(Debug, Clone, Default)]
pub struct MulConstraint {
	/// A operand.
	pub a: Operand,
	/// B operand.
	pub b: Operand,
	/// C operand, the product.
	pub c: Operand,
}

/// Range constraint: `0 ≤ v < 2^n_bits`.
///
/// This is the primitive fixed-width range check. `n_bits` is at most
/// [`MAX_PRIMITIVE_RANGE_BITS`]; wider ranges are decomposed by the circuit builder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangeConstraint {
	/// The checked value.
	pub value_index: ValueIndex,
	/// The exclusive upper bound of the value as a power of two.
	pub n_bits: u32,
}

/// The ConstraintSystem is the main data structure that describes the relation a value vector
/// must satisfy.
///
/// It consists of the [layout of the value vector][`ValueVecLayout`], the constants known to
/// everybody, and three lists of constraints: linear, multiplication and range.
///
/// # Clone
///
/// While this type is cloneable it may be expensive to do so since big-integer circuits easily
/// reach hundreds of thousands of constraints.
#[derive(Debug, Clone)]
pub struct ConstraintSystem {
	/// Description of the value vector layout expected by this constraint system.
	pub value_vec_layout: ValueVecLayout,
	/// The constants that this constraint system defines.
	///
	/// The first constant is always one.
	pub constants: Vec<Felt>,
	/// List of linear constraints that must be satisfied by the values vector.
	pub linear_constraints: Vec<LinearConstraint>,
	/// List of MUL constraints that must be satisfied by the values vector.
	pub mul_constraints: Vec<MulConstraint>,
	/// List of range constraints that must be satisfied by the values vector.
	pub range_constraints: Vec<RangeConstraint>,
}

impl ConstraintSystem {
	/// Creates a new constraint system.
	pub fn new(
		constants: Vec<Felt>,
		value_vec_layout: ValueVecLayout,
		linear_constraints: Vec<LinearConstraint>,
		mul_constraints: Vec<MulConstraint>,
		range_constraints: Vec<RangeConstraint>,
	) -> Self {
		assert_eq!(constants.len(), value_vec_layout.n_const);
		ConstraintSystem {
			value_vec_layout,
			constants,
			linear_constraints,
			mul_constraints,
			range_constraints,
		}
	}

	/// Ensures that this constraint system is well-formed.
	///
	/// Specifically checks that:
	///
	/// - the value vec layout is [valid][`ValueVecLayout::validate`].
	/// - the first constant is one.
	/// - referenced values indices are in the range.
	/// - range constraints do not exceed the primitive width.
	pub fn validate(&self) -> Result<(), ConstraintSystemError> {
		self.value_vec_layout.validate()?;

		if self.constants.first() != Some(&Felt::ONE) {
			return Err(ConstraintSystemError::MissingOneConstant);
		}

		let layout = &self.value_vec_layout;
		for (i, constraint) in self.linear_constraints.iter().enumerate() {
			validate_operand(&constraint.terms, layout, "linear", i, "terms")?;
		}
		for (i, constraint) in self.mul_constraints.iter().enumerate() {
			validate_operand(&constraint.a, layout, "mul", i, "a")?;
			validate_operand(&constraint.b, layout, "mul", i, "b")?;
			validate_operand(&constraint.c, layout, "mul", i, "c")?;
		}
		for (i, constraint) in self.range_constraints.iter().enumerate() {
			if constraint.n_bits > MAX_PRIMITIVE_RANGE_BITS {
				return Err(ConstraintSystemError::RangeTooWide {
					constraint_index: i,
					n_bits: constraint.n_bits,
				});
			}
			check_index(constraint.value_index, layout, "range", i, "value")?;
		}

		return Ok(());

		fn validate_operand(
			operand: &Operand,
			layout: &ValueVecLayout,
			constraint_type: &'static str,
			constraint_index: usize,
			operand_name: &'static str,
		) -> Result<(), ConstraintSystemError> {
			for term in operand {
				check_index(term.value_index, layout, constraint_type, constraint_index, operand_name)?;
			}
			Ok(())
		}

		fn check_index(
			value_index: ValueIndex,
			layout: &ValueVecLayout,
			constraint_type: &'static str,
			constraint_index: usize,
			operand_name: &'static str,
		) -> Result<(), ConstraintSystemError> {
			if value_index.0 as usize >= layout.total_len {
				return Err(ConstraintSystemError::OutOfRangeValueIndex {
					constraint_type,
					constraint_index,
					operand_name,
					value_index: value_index.0,
					total_len: layout.total_len,
				});
			}
			Ok(())
		}
	}

	/// Returns the number of linear constraints in the system.
	pub fn n_linear_constraints(&self) -> usize {
		self.linear_constraints.len()
	}

	/// Returns the number of MUL constraints in the system.
	pub fn n_mul_constraints(&self) -> usize {
		self.mul_constraints.len()
	}

	/// Returns the number of range constraints in the system.
	pub fn n_range_constraints(&self) -> usize {
		self.range_constraints.len()
	}

	/// The total length of the [`ValueVec`] expected by this constraint system.
	pub fn value_vec_len(&self) -> usize {
		self.value_vec_layout.total_len
	}

	/// Create a new [`ValueVec`] with the size expected by this constraint system.
	///
	/// The constants section is populated, every other value is zero.
	pub fn new_value_vec(&self) -> ValueVec {
		let mut value_vec = ValueVec::new(self.value_vec_layout.clone());
		for (i, constant) in self.constants.iter().enumerate() {
			value_vec.set(i, *constant);
		}
		value_vec
	}
}

/// Description of a layout of the value vector for a particular circuit.
///
/// The sections follow each other without gaps: constants, inout, witness, internal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValueVecLayout {
	/// The number of the constants declared by the circuit.
	pub n_const: usize,
	/// The number of the input output parameters declared by the circuit.
	pub n_inout: usize,
	/// The number of the witness parameters declared by the circuit.
	pub n_witness: usize,
	/// The number of the internal values declared by the circuit.
	///
	/// Those are results of the builder operations and hint outputs.
	pub n_internal: usize,

	/// The offset at which `inout` parameters start.
	pub offset_inout: usize,
	/// The offset at which `witness` parameters start.
	///
	/// Everything below this offset is public.
	pub offset_witness: usize,
	/// The total number of values in the values vector.
	pub total_len: usize,
}

impl ValueVecLayout {
	/// Validates that the value vec layout has a correct shape.
	///
	/// Specifically checks that:
	///
	/// - there is at least one constant, the constant one.
	/// - the sections are contiguous.
	/// - the total length covers every section.
	pub fn validate(&self) -> Result<(), ConstraintSystemError> {
		if self.n_const == 0 {
			return Err(ConstraintSystemError::MissingOneConstant);
		}
		if self.offset_inout != self.n_const {
			return Err(ConstraintSystemError::InconsistentLayout {
				reason: "inout section must follow the constants",
			});
		}
		if self.offset_witness != self.offset_inout + self.n_inout {
			return Err(ConstraintSystemError::InconsistentLayout {
				reason: "witness section must follow the inout section",
			});
		}
		if self.total_len != self.offset_witness + self.n_witness + self.n_internal {
			return Err(ConstraintSystemError::InconsistentLayout {
				reason: "total length must cover every section",
			});
		}
		Ok(())
	}
}

/// The vector of values used in constraint evaluation.
///
/// `ValueVec` is the concrete instantiation of values that satisfy (or should satisfy) a
/// [`ConstraintSystem`]. It follows the layout defined by [`ValueVecLayout`].
#[derive(Clone, Debug)]
pub struct ValueVec {
	layout: ValueVecLayout,
	data: Vec<Felt>,
}

impl ValueVec {
	/// Creates a new value vector with the given layout.
	///
	/// The values are filled with zeros.
	pub fn new(layout: ValueVecLayout) -> ValueVec {
		let size = layout.total_len;
		ValueVec {
			layout,
			data: vec![Felt::ZERO; size],
		}
	}

	/// Creates a new value vector with the given layout and data.
	///
	/// The data is checked to have the correct length.
	pub fn new_from_data(
		layout: ValueVecLayout,
		public: Vec<Felt>,
		private: Vec<Felt>,
	) -> Result<ValueVec, ConstraintSystemError> {
		let len = public.len() + private.len();
		if len != layout.total_len {
			return Err(ConstraintSystemError::ValueVecLenMismatch {
				expected: layout.total_len,
				actual: len,
			});
		}

		let mut data = public;
		data.extend_from_slice(&private);
		Ok(ValueVec { layout, data })
	}

	/// The layout this vector follows.
	pub fn layout(&self) -> &ValueVecLayout {
		&self.layout
	}

	/// The total size of the vector.
	pub fn size(&self) -> usize {
		self.layout.total_len
	}

	/// Returns the value stored at the given index.
	///
	/// Panics if the index is out of bounds.
	pub fn get(&self, index: usize) -> Felt {
		self.data[index]
	}

	/// Sets the value at the given index.
	///
	/// Panics if the index is out of bounds.
	pub fn set(&mut self, index: usize, value: Felt) {
		self.data[index] = value;
	}

	/// Returns the public portion of the values vector.
	pub fn public(&self) -> &[Felt] {
		&self.data[..self.layout.offset_witness]
	}

	/// Return all non-public values (witness + internal).
	pub fn non_public(&self) -> &[Felt] {
		&self.data[self.layout.offset_witness..]
	}

	/// Returns the witness portion of the values vector.
	pub fn witness(&self) -> &[Felt] {
		let start = self.layout.offset_witness;
		let end = start + self.layout.n_witness;
		&self.data[start..end]
	}
}

impl Index<ValueIndex> for ValueVec {
	type Output = Felt;

	fn index(&self, index: ValueIndex) -> &Self::Output {
		&self.data[index.0 as usize]
	}
}

impl IndexMut<ValueIndex> for ValueVec {
	fn index_mut(&mut self, index: ValueIndex) -> &mut Self::Output {
		&mut self.data[index.0 as usize]
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn layout(n_const: usize, n_inout: usize, n_witness: usize, n_internal: usize) -> ValueVecLayout {
		ValueVecLayout {
			n_const,
			n_inout,
			n_witness,
			n_internal,
			offset_inout: n_const,
			offset_witness: n_const + n_inout,
			total_len: n_const + n_inout + n_witness + n_internal,
		}
	}

	#[test]
	fn test_layout_validation() {
		assert!(layout(1, 2, 3, 4).validate().is_ok());
		assert!(matches!(
			layout(0, 2, 3, 4).validate(),
			Err(ConstraintSystemError::MissingOneConstant)
		));

		let mut broken = layout(2, 2, 2, 2);
		broken.total_len += 1;
		assert!(matches!(broken.validate(), Err(ConstraintSystemError::InconsistentLayout { .. })));
	}

	#[test]
	fn test_validate_rejects_out_of_range_index() {
		let cs = ConstraintSystem::new(
			vec![Felt::ONE],
			layout(1, 0, 2, 0),
			vec![LinearConstraint {
				terms: vec![Term::plain(ValueIndex(1)), Term::plain(ValueIndex(3))],
			}],
			vec![],
			vec![],
		);
		match cs.validate() {
			Err(ConstraintSystemError::OutOfRangeValueIndex {
				constraint_type,
				value_index,
				..
			}) => {
				assert_eq!(constraint_type, "linear");
				assert_eq!(value_index, 3);
			}
			other => panic!("unexpected validation result: {other:?}"),
		}
	}

	#[test]
	fn test_validate_rejects_wide_range() {
		let cs = ConstraintSystem::new(
			vec![Felt::ONE],
			layout(1, 0, 1, 0),
			vec![],
			vec![],
			vec![RangeConstraint {
				value_index: ValueIndex(1),
				n_bits: MAX_PRIMITIVE_RANGE_BITS + 1,
			}],
		);
		assert!(matches!(cs.validate(), Err(ConstraintSystemError::RangeTooWide { n_bits: 65, .. })));
	}

	#[test]
	fn test_validate_requires_one_constant() {
		let cs =
			ConstraintSystem::new(vec![Felt::from(2u64)], layout(1, 0, 0, 0), vec![], vec![], vec![]);
		assert!(matches!(cs.validate(), Err(ConstraintSystemError::MissingOneConstant)));
	}

	#[test]
	fn test_value_vec_sections() {
		let cs = ConstraintSystem::new(
			vec![Felt::ONE, Felt::from(7u64)],
			layout(2, 1, 2, 1),
			vec![],
			vec![],
			vec![],
		);
		let mut values = cs.new_value_vec();
		assert_eq!(values.get(1), Felt::from(7u64));
		values[ValueIndex(3)] = Felt::from(9u64);
		assert_eq!(values.public().len(), 3);
		assert_eq!(values.witness(), &[Felt::from(9u64), Felt::ZERO]);
		assert_eq!(values.non_public().len(), 3);

		let err = ValueVec::new_from_data(cs.value_vec_layout.clone(), vec![Felt::ONE], vec![])
			.unwrap_err();
		assert!(matches!(err, ConstraintSystemError::ValueVecLenMismatch { expected: 6, actual: 1 }));
	}
}
