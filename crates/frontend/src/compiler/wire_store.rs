// Copyright 2025 Irreducible Inc.
use cranelift_entity::{PrimaryMap, entity_impl};
use ff::{Field, PrimeField};
use limbo_core::Felt;
use rustc_hash::FxHashMap;

use crate::compiler::scope::ScopeTree;

/// Deduplicates constant wires by value.
#[derive(Default)]
pub struct ConstPool {
	pool: FxHashMap<[u8; 32], Wire>,
}

impl ConstPool {
	pub fn get(&self, value: Felt) -> Option<Wire> {
		self.pool.get(&value.to_repr()).cloned()
	}

	pub fn insert(&mut self, value: Felt, wire: Wire) {
		let prev = self.pool.insert(value.to_repr(), wire);
		assert!(prev.is_none());
	}
}

/// A wire carries one native field element through the circuit.
///
/// The difference from `ValueIndex` is that a wire is abstract: it only receives its place in
/// the value vector when the circuit is built.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, PartialOrd, Ord)]
pub struct Wire(u32);
entity_impl!(Wire);

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum WireKind {
	Constant,
	Inout,
	Witness,
	/// An internal wire holds the result of a builder operation or a hint output.
	Internal,
}

#[derive(Copy, Clone, Debug)]
pub struct WireData {
	pub kind: WireKind,
	/// The value assigned when the wire was created.
	pub value: Felt,
}

/// All wires of a circuit under construction together with their values.
pub struct WireStore {
	pub wires: PrimaryMap<Wire, WireData>,
	pub scopes: ScopeTree,
	const_pool: ConstPool,
	one: Wire,
}

impl WireStore {
	pub fn new() -> Self {
		let mut store = Self {
			wires: PrimaryMap::new(),
			scopes: ScopeTree::new(),
			const_pool: ConstPool::default(),
			one: Wire(0),
		};
		store.one = store.add_constant(Felt::ONE);
		store
	}

	/// The constant `1`. Always the first wire.
	pub fn one(&self) -> Wire {
		self.one
	}

	pub fn add_constant(&mut self, value: Felt) -> Wire {
		if let Some(wire) = self.const_pool.get(value) {
			return wire;
		}
		let wire = self.wires.push(WireData {
			kind: WireKind::Constant,
			value,
		});
		self.const_pool.insert(value, wire);
		wire
	}

	pub fn add_inout(&mut self, value: Felt) -> Wire {
		self.wires.push(WireData {
			kind: WireKind::Inout,
			value,
		})
	}

	pub fn add_witness(&mut self, value: Felt) -> Wire {
		self.wires.push(WireData {
			kind: WireKind::Witness,
			value,
		})
	}

	pub fn add_internal(&mut self, value: Felt) -> Wire {
		self.wires.push(WireData {
			kind: WireKind::Internal,
			value,
		})
	}

	pub fn value(&self, wire: Wire) -> Felt {
		self.wires[wire].value
	}

	pub fn n_wires(&self) -> usize {
		self.wires.len()
	}
}

impl Default for WireStore {
	fn default() -> Self {
		Self::new()
	}
}
