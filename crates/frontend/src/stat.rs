// Copyright 2025 Irreducible Inc.

//! Circuit statistics module for analyzing constraint counts and circuit complexity.

use std::{collections::BTreeMap, fmt, ops::Sub};

use limbo_core::{ConstraintSystem, Operand, ValueIndex};
use rustc_hash::FxHashSet;

use crate::compiler::circuit::Circuit;

/// A snapshot of how much a circuit under construction has emitted so far.
///
/// Taken with [`CircuitBuilder::counts`](crate::CircuitBuilder::counts). The difference of two
/// snapshots is the cost of the operations performed in between.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct ConstraintCounts {
	/// Number of linear constraints.
	pub n_linear: usize,
	/// Number of MUL constraints.
	pub n_mul: usize,
	/// Number of primitive range constraints.
	pub n_range: usize,
	/// Sum of the widths of all primitive range constraints.
	pub range_bits: u64,
	/// Number of wires, constants included.
	pub n_wires: usize,
	/// Number of hint invocations.
	pub n_hints: usize,
}

impl ConstraintCounts {
	/// Total number of constraints of all kinds.
	pub fn n_constraints(&self) -> usize {
		self.n_linear + self.n_mul + self.n_range
	}
}

impl Sub for ConstraintCounts {
	type Output = ConstraintCounts;

	fn sub(self, rhs: Self) -> Self::Output {
		ConstraintCounts {
			n_linear: self.n_linear - rhs.n_linear,
			n_mul: self.n_mul - rhs.n_mul,
			n_range: self.n_range - rhs.n_range,
			range_bits: self.range_bits - rhs.range_bits,
			n_wires: self.n_wires - rhs.n_wires,
			n_hints: self.n_hints - rhs.n_hints,
		}
	}
}

impl fmt::Display for ConstraintCounts {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		write!(
			f,
			"linear={} mul={} range={} range_bits={} wires={} hints={}",
			self.n_linear, self.n_mul, self.n_range, self.range_bits, self.n_wires, self.n_hints
		)
	}
}

/// Various stats of a built circuit.
pub struct CircuitStat {
	/// Number of linear constraints in the circuit.
	pub n_linear_constraints: usize,
	/// Number of MUL constraints in the circuit.
	pub n_mul_constraints: usize,
	/// Number of primitive range constraints in the circuit.
	pub n_range_constraints: usize,
	/// Number of range constraints per asserted width, ascending.
	pub range_widths: BTreeMap<u32, usize>,
	/// Number of distinct value indices referenced by any constraint.
	pub distinct_value_indices: usize,
	/// Length of the value vector.
	pub value_vec_len: usize,
	/// Number of constant values used by the circuit.
	pub n_const: usize,
	/// Number of public input values in the circuit.
	pub n_inout: usize,
	/// Number of private input values in the circuit.
	pub n_witness: usize,
	/// Number of internal values in the circuit.
	///
	/// Internal values are produced by builder operations.
	pub n_internal: usize,
	/// Number of hint invocations made while building.
	pub n_hints: usize,
}

impl CircuitStat {
	/// Creates a new `CircuitStat` instance by collecting statistics from the given circuit.
	pub fn collect(circuit: &Circuit) -> Self {
		let cs = circuit.constraint_system();
		let layout = &cs.value_vec_layout;

		let mut range_widths = BTreeMap::new();
		for range in &cs.range_constraints {
			*range_widths.entry(range.n_bits).or_insert(0) += 1;
		}

		Self {
			n_linear_constraints: cs.n_linear_constraints(),
			n_mul_constraints: cs.n_mul_constraints(),
			n_range_constraints: cs.n_range_constraints(),
			range_widths,
			distinct_value_indices: count_distinct_value_indices(cs),
			value_vec_len: cs.value_vec_len(),
			n_const: layout.n_const,
			n_inout: layout.n_inout,
			n_witness: layout.n_witness,
			n_internal: layout.n_internal,
			n_hints: circuit.n_hints(),
		}
	}
}

impl fmt::Display for CircuitStat {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		// Helper to format numbers with commas
		fn fmt_num(n: usize) -> String {
			let s = n.to_string();
			let mut result = String::new();
			for (i, c) in s.chars().rev().enumerate() {
				if i > 0 && i % 3 == 0 {
					result.push(',');
				}
				result.push(c);
			}
			result.chars().rev().collect()
		}

		let n_constraints =
			self.n_linear_constraints + self.n_mul_constraints + self.n_range_constraints;
		writeln!(f, "Constraints: {}", fmt_num(n_constraints))?;
		writeln!(f, "├─ Linear constraints: {}", fmt_num(self.n_linear_constraints))?;
		writeln!(f, "├─ MUL constraints: {}", fmt_num(self.n_mul_constraints))?;
		writeln!(f, "├─ Range constraints: {}", fmt_num(self.n_range_constraints))?;
		let n_widths = self.range_widths.len();
		for (i, (width, count)) in self.range_widths.iter().enumerate() {
			let branch = if i + 1 == n_widths { "└─" } else { "├─" };
			writeln!(f, "│  {branch} {width:>2} bits: {}", fmt_num(*count))?;
		}
		writeln!(f, "└─ Distinct value indices: {}", fmt_num(self.distinct_value_indices))?;
		writeln!(f)?;

		writeln!(f, "Value Vector: {}", fmt_num(self.value_vec_len))?;
		writeln!(f, "├─ Public Section: {}", fmt_num(self.n_const + self.n_inout))?;
		writeln!(f, "│  ├─ Constants: {}", fmt_num(self.n_const))?;
		writeln!(f, "│  └─ Inout: {}", fmt_num(self.n_inout))?;
		writeln!(f, "└─ Private Section: {}", fmt_num(self.n_witness + self.n_internal))?;
		writeln!(f, "   ├─ Witness: {}", fmt_num(self.n_witness))?;
		writeln!(f, "   └─ Internal: {}", fmt_num(self.n_internal))?;
		writeln!(f)?;

		writeln!(f, "Hint invocations: {}", fmt_num(self.n_hints))?;
		Ok(())
	}
}

/// Traverses the constraint system and returns the number of distinct value indices referenced
/// by its constraints.
fn count_distinct_value_indices(cs: &ConstraintSystem) -> usize {
	let mut seen = FxHashSet::default();
	for linear in &cs.linear_constraints {
		visit_operand(&linear.terms, &mut seen);
	}
	for mul in &cs.mul_constraints {
		visit_operand(&mul.a, &mut seen);
		visit_operand(&mul.b, &mut seen);
		visit_operand(&mul.c, &mut seen);
	}
	for range in &cs.range_constraints {
		seen.insert(range.value_index);
	}
	return seen.len();

	fn visit_operand(operand: &Operand, seen: &mut FxHashSet<ValueIndex>) {
		for term in operand {
			seen.insert(term.value_index);
		}
	}
}

#[cfg(test)]
mod tests {
	use limbo_core::Felt;

	use super::*;
	use crate::CircuitBuilder;

	#[test]
	fn test_counts_difference() {
		let builder = CircuitBuilder::new();
		let x = builder.add_witness(Felt::from(3u64));
		let before = builder.counts();
		let y = builder.mul(x, x);
		builder.range_check_prim("y", y, 8).unwrap();
		let delta = builder.counts() - before;
		assert_eq!(
			delta,
			ConstraintCounts {
				n_linear: 0,
				n_mul: 1,
				n_range: 1,
				range_bits: 8,
				n_wires: 1,
				n_hints: 0,
			}
		);
		assert_eq!(delta.n_constraints(), 2);
	}

	#[test]
	fn test_collect() {
		let builder = CircuitBuilder::new();
		let x = builder.add_witness(Felt::from(3u64));
		let y = builder.add_inout(Felt::from(4u64));
		let z = builder.add(x, y);
		builder.range_check_prim("x", x, 8).unwrap();
		builder.range_check_prim("y", y, 8).unwrap();
		builder.range_check_prim("z", z, 16).unwrap();
		let circuit = builder.build();

		let stat = CircuitStat::collect(&circuit);
		assert_eq!(stat.n_linear_constraints, 1);
		assert_eq!(stat.n_range_constraints, 3);
		assert_eq!(stat.range_widths.get(&8), Some(&2));
		assert_eq!(stat.range_widths.get(&16), Some(&1));
		// The zero constant term of the addition is dropped, leaving x, y and z.
		assert_eq!(stat.distinct_value_indices, 3);
		assert_eq!(stat.n_inout, 1);
		assert_eq!(stat.n_witness, 1);

		let rendered = stat.to_string();
		assert!(rendered.contains("Range constraints: 3"));
		assert!(rendered.contains("16 bits: 1"));
	}
}
