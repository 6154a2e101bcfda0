// Copyright 2025 Irreducible Inc.
use cranelift_entity::SecondaryMap;
use limbo_core::{Felt, ValueIndex, ValueVecLayout};

use crate::compiler::Wire;

pub struct Assignment {
	pub wire_mapping: SecondaryMap<Wire, ValueIndex>,
	pub value_vec_layout: ValueVecLayout,
	pub constants: Vec<Felt>,
	/// The values of all wires in value vector order.
	pub values: Vec<Felt>,
}

/// A structure that provides you assignments of value indices for wires and get a
/// [`ValueVecLayout`].
#[derive(Default)]
pub struct Alloc {
	w_const: Vec<(Wire, Felt)>,
	w_inout: Vec<(Wire, Felt)>,
	w_witness: Vec<(Wire, Felt)>,
	w_internal: Vec<(Wire, Felt)>,
}

impl Alloc {
	pub fn new() -> Self {
		Self::default()
	}

	/// The first constant added must be the constant one.
	pub fn add_constant(&mut self, wire: Wire, value: Felt) {
		self.w_const.push((wire, value));
	}

	pub fn add_inout(&mut self, wire: Wire, value: Felt) {
		self.w_inout.push((wire, value));
	}

	pub fn add_witness(&mut self, wire: Wire, value: Felt) {
		self.w_witness.push((wire, value));
	}

	pub fn add_internal(&mut self, wire: Wire, value: Felt) {
		self.w_internal.push((wire, value));
	}

	pub fn into_assignment(self) -> Assignment {
		// `ValueVec` expects the wires to be in a certain order. Specifically:
		//
		// 1. const
		// 2. inout
		// 3. witness
		// 4. internal
		//
		// Within a section wires keep their creation order.
		let n_const = self.w_const.len();
		let n_inout = self.w_inout.len();
		let n_witness = self.w_witness.len();
		let n_internal = self.w_internal.len();
		let total_len = n_const + n_inout + n_witness + n_internal;

		let mut wire_mapping = SecondaryMap::new();
		let mut values = Vec::with_capacity(total_len);
		let constants = self.w_const.iter().map(|&(_, value)| value).collect();

		let sections = [self.w_const, self.w_inout, self.w_witness, self.w_internal];
		for (wire, value) in sections.into_iter().flatten() {
			wire_mapping[wire] = ValueIndex(values.len() as u32);
			values.push(value);
		}

		let value_vec_layout = ValueVecLayout {
			n_const,
			n_inout,
			n_witness,
			n_internal,
			offset_inout: n_const,
			offset_witness: n_const + n_inout,
			total_len,
		};

		Assignment {
			wire_mapping,
			value_vec_layout,
			constants,
			values,
		}
	}
}

#[cfg(test)]
mod tests {
	use cranelift_entity::EntityRef;
	use ff::Field;

	use super::*;

	fn felt(x: u64) -> Felt {
		Felt::from(x)
	}

	#[test]
	fn test_value_vec_alloc_ordering() {
		let mut alloc = Alloc::new();

		let one = Wire::new(0);
		let witness1 = Wire::new(1);
		let internal1 = Wire::new(2);
		let inout1 = Wire::new(3);
		let witness2 = Wire::new(4);
		let const2 = Wire::new(5);
		let inout2 = Wire::new(6);

		// Add them in mixed order
		alloc.add_constant(one, Felt::ONE);
		alloc.add_witness(witness1, felt(10));
		alloc.add_internal(internal1, felt(11));
		alloc.add_inout(inout1, felt(12));
		alloc.add_witness(witness2, felt(13));
		alloc.add_constant(const2, felt(42));
		alloc.add_inout(inout2, felt(14));

		let assignment = alloc.into_assignment();

		// Constants come first in insertion order, one leads.
		assert_eq!(assignment.wire_mapping[one], ValueIndex::ONE);
		assert_eq!(assignment.wire_mapping[const2], ValueIndex(1));
		assert_eq!(assignment.constants, vec![Felt::ONE, felt(42)]);

		assert_eq!(assignment.wire_mapping[inout1], ValueIndex(2));
		assert_eq!(assignment.wire_mapping[inout2], ValueIndex(3));
		assert_eq!(assignment.wire_mapping[witness1], ValueIndex(4));
		assert_eq!(assignment.wire_mapping[witness2], ValueIndex(5));
		assert_eq!(assignment.wire_mapping[internal1], ValueIndex(6));

		// Values follow the same order.
		assert_eq!(
			assignment.values,
			vec![Felt::ONE, felt(42), felt(12), felt(14), felt(10), felt(13), felt(11)]
		);

		let layout = &assignment.value_vec_layout;
		assert_eq!(layout.n_const, 2);
		assert_eq!(layout.n_inout, 2);
		assert_eq!(layout.n_witness, 2);
		assert_eq!(layout.n_internal, 1);
		assert_eq!(layout.offset_witness, 4);
		assert_eq!(layout.total_len, 7);
		layout.validate().unwrap();
	}
}
