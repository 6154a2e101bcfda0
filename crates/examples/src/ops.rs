// Copyright 2025 Irreducible Inc.
use std::fmt;

use anyhow::Result;
use clap::ValueEnum;
use limbo_circuits::bignum::{BigInt, BigIntParams, LayoutVisitor, LimbLayout, bigint_lt};
use limbo_frontend::{Circuit, CircuitBuilder, CircuitStat, ConstraintCounts};
use num_bigint::BigUint;
use num_traits::One;

/// A bignum operation whose cost can be reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Op {
	/// Modular addition
	Add,
	/// Subtraction
	Sub,
	/// Modular multiplication
	Mul,
	/// Division with remainder
	Div,
	/// Modular reduction
	Mod,
	/// Less-than comparison
	Cmp,
	/// Every operation above
	All,
}

impl Op {
	/// The single operations, in report order.
	pub const SINGLE: [Op; 6] = [Op::Add, Op::Sub, Op::Mul, Op::Div, Op::Mod, Op::Cmp];

	/// Expands [`Op::All`] into the single operations.
	pub fn expand(self) -> Vec<Op> {
		match self {
			Op::All => Self::SINGLE.to_vec(),
			op => vec![op],
		}
	}

	/// Lower-case name used in reports and snapshot file names.
	pub fn name(self) -> &'static str {
		match self {
			Op::Add => "add",
			Op::Sub => "sub",
			Op::Mul => "mul",
			Op::Div => "div",
			Op::Mod => "mod",
			Op::Cmp => "cmp",
			Op::All => "all",
		}
	}
}

impl fmt::Display for Op {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.name())
	}
}

/// The cost of one operation on one layout.
pub struct OpReport {
	/// The layout the operands use.
	pub params: BigIntParams,
	/// The measured operation.
	pub op: Op,
	/// What the operation alone emitted, operand construction excluded.
	pub cost: ConstraintCounts,
	/// The whole circuit, operands included.
	pub circuit: Circuit,
}

impl OpReport {
	/// Name of the report, e.g. `bigint_384_6_mul`.
	pub fn name(&self) -> String {
		format!("bigint_{}_{}", self.params.name, self.op)
	}
}

impl fmt::Display for OpReport {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		writeln!(
			f,
			"{} on layout {} ({} limbs of {} bits)",
			self.op, self.params.name, self.params.limb_num, self.params.limb_size
		)?;
		writeln!(f, "--")?;
		writeln!(f, "Operation cost: {}", self.cost)?;
		writeln!(f, "Operation constraints: {}", self.cost.n_constraints())?;
		writeln!(f)?;
		write!(f, "{}", CircuitStat::collect(&self.circuit))
	}
}

/// Builds and measures `op` on the layout described by `params`.
///
/// The operands are fixed reduced values below a modulus that has the top bit of the layout
/// set. The constraint counts do not depend on the values.
pub fn measure(params: &BigIntParams, op: Op) -> Result<OpReport> {
	anyhow::ensure!(op != Op::All, "measure a single operation, not {op}");
	params
		.visit(Measure { op })
		.ok_or_else(|| anyhow::anyhow!("layout {} is not a named layout", params.name))?
}

struct Measure {
	op: Op,
}

impl LayoutVisitor for Measure {
	type Output = Result<OpReport>;

	fn visit<L: LimbLayout>(self) -> Self::Output {
		let params = L::params();
		let _span = tracing::info_span!("measure", layout = params.name, op = %self.op).entered();

		let modulus = (BigUint::one() << (params.total_bits() - 1)) + 0x1234_5678_9abc_def1u64;
		let a_value = &modulus - 2u32;
		let b_value = (&modulus >> 1u32) + 3u32;

		let builder = CircuitBuilder::new();
		let m = BigInt::<L>::from_biguint(&builder.subcircuit("modulus"), &modulus)?;
		let a = BigInt::<L>::from_biguint(&builder.subcircuit("a"), &a_value)?;
		let b = BigInt::<L>::from_biguint(&builder.subcircuit("b"), &b_value)?;

		let before = builder.counts();
		match self.op {
			Op::Add => {
				m.add(&builder, &a, &b)?;
			}
			Op::Sub => {
				BigInt::sub(&builder, &a, &b)?;
			}
			Op::Mul => {
				m.mul(&builder, &a, &b)?;
			}
			Op::Div => {
				BigInt::div(&builder, &a, &b)?;
			}
			Op::Mod => {
				b.modulo(&builder, &a)?;
			}
			Op::Cmp => {
				bigint_lt(&builder, &a, &b)?;
			}
			Op::All => unreachable!("expanded by the caller"),
		}
		let cost = builder.counts() - before;
		tracing::debug!(%cost, "measured");

		let circuit = builder.build();
		circuit.verify()?;
		Ok(OpReport {
			params,
			op: self.op,
			cost,
			circuit,
		})
	}
}
