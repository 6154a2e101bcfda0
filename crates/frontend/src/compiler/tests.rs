// Copyright 2025 Irreducible Inc.
use limbo_core::{ConstraintSystemError, felt::felt_pow2};
use proptest::prelude::*;
use rand::{Rng, SeedableRng as _, rngs::StdRng};

use super::*;

fn felt(x: u64) -> Felt {
	Felt::from(x)
}

#[test]
fn test_icmp_eq() {
	let mut rng = StdRng::seed_from_u64(42);
	for _ in 0..1000 {
		let builder = CircuitBuilder::new();
		let a_val = rng.random_range(0..4u64);
		let b_val = rng.random_range(0..4u64);
		let a = builder.add_witness(felt(a_val));
		let b = builder.add_witness(felt(b_val));
		let eq = builder.icmp_eq(a, b);
		let expected = if a_val == b_val { Felt::ONE } else { Felt::ZERO };
		assert_eq!(builder.value(eq), expected);
		builder.build().verify().unwrap();
	}
}

#[test]
fn test_icmp_eq_cannot_claim_equality_of_distinct_values() {
	let builder = CircuitBuilder::new();
	let a = builder.add_witness(felt(5));
	let b = builder.add_witness(felt(6));
	let eq = builder.icmp_eq(a, b);
	let circuit = builder.build();
	circuit.verify().unwrap();

	let mut values = circuit.values().clone();
	values[circuit.witness_index(eq)] = Felt::ONE;
	assert!(circuit.verify_values(&values).is_err());
}

#[test]
fn test_boolean_connectives() {
	for (x, y) in [(0u64, 0u64), (0, 1), (1, 0), (1, 1)] {
		let builder = CircuitBuilder::new();
		let a = builder.add_witness(felt(x));
		let b = builder.add_witness(felt(y));
		let and = builder.band(a, b);
		let or = builder.bor(a, b);
		let not = builder.bnot(a);
		assert_eq!(builder.value(and), felt(x & y));
		assert_eq!(builder.value(or), felt(x | y));
		assert_eq!(builder.value(not), felt(1 - x));
		builder.build().verify().unwrap();
	}
}

#[test]
fn test_select() {
	let builder = CircuitBuilder::new();
	let t = builder.add_witness(felt(10));
	let f = builder.add_witness(felt(20));
	let yes = builder.one();
	let no = builder.zero();
	let picked_t = builder.select(yes, t, f);
	let picked_f = builder.select(no, t, f);
	assert_eq!(builder.value(picked_t), felt(10));
	assert_eq!(builder.value(picked_f), felt(20));
	builder.build().verify().unwrap();
}

#[test]
fn test_lincomb() {
	let builder = CircuitBuilder::new();
	let x = builder.add_witness(felt(3));
	let y = builder.add_witness(felt(5));
	let z = builder.lincomb(&[(felt(2), x), (-Felt::ONE, y)], felt(10));
	assert_eq!(builder.value(z), felt(11));
	let w = builder.sub(x, y);
	assert_eq!(builder.value(builder.neg(w)), felt(2));
	assert_eq!(builder.value(builder.mul_const(x, felt(7))), felt(21));
	assert_eq!(builder.value(builder.add_const(x, felt(7))), felt(10));
	builder
		.assert_lincomb_zero("z", &[(Felt::ONE, z)], -felt(11))
		.unwrap();
	builder.build().verify().unwrap();
}

#[test]
fn test_assert_eq_failure_is_named() {
	let builder = CircuitBuilder::new();
	let inner = builder.subcircuit("outer").subcircuit("inner");
	let x = inner.add_witness(felt(42));
	let y = inner.add_witness(felt(100));
	let err = inner.assert_eq("check", x, y).unwrap_err();
	match err {
		ConstraintError::AssertionFailed { name, detail } => {
			assert_eq!(name, "outer.inner.check");
			assert!(detail.contains("42") && detail.contains("100"));
		}
		other => panic!("unexpected error: {other}"),
	}

	// The failing constraint stays in the system.
	assert_eq!(builder.counts().n_linear, 1);
	let circuit = builder.build();
	match circuit.verify().unwrap_err() {
		ConstraintError::Unsatisfied { name, .. } => assert_eq!(name, "outer.inner.check"),
		other => panic!("unexpected error: {other}"),
	}
}

#[test]
fn test_assert_true_false_bool() {
	let builder = CircuitBuilder::new();
	let one = builder.one();
	let zero = builder.zero();
	let two = builder.add_witness(felt(2));
	builder.assert_true("one", one).unwrap();
	builder.assert_false("zero", zero).unwrap();
	builder.assert_bool("zero_is_bool", zero).unwrap();
	assert!(builder.assert_true("zero", zero).is_err());
	assert!(builder.assert_false("one", one).is_err());
	assert!(builder.assert_zero("two", two).is_err());
	let err = builder.assert_bool("two_is_bool", two).unwrap_err();
	assert!(err.to_string().contains("two_is_bool"));
}

#[test]
fn test_range_check_prim() {
	let builder = CircuitBuilder::new();
	let x = builder.add_witness(felt(255));
	builder.range_check_prim("fits", x, 8).unwrap();
	let err = builder.range_check_prim("too_small", x, 7).unwrap_err();
	assert!(err.to_string().contains("does not fit in 7 bits"));

	let err = builder.range_check_prim("too_wide", x, 65).unwrap_err();
	assert!(matches!(err, ConstraintError::RangeTooWide { n_bits: 65, .. }));
	// The rejected width emits nothing.
	assert_eq!(builder.counts().n_range, 2);

	let big = builder.add_witness(felt_pow2(64) - Felt::ONE);
	builder.range_check_prim("u64_max", big, 64).unwrap();
}

#[test]
fn test_tampered_range_value_rejected() {
	let builder = CircuitBuilder::new();
	let x = builder.add_witness(felt(200));
	builder.range_check_prim("byte", x, 8).unwrap();
	let circuit = builder.build();

	let mut values = circuit.values().clone();
	values[circuit.witness_index(x)] = felt(256);
	match circuit.verify_values(&values).unwrap_err() {
		ConstraintError::Unsatisfied { name, source } => {
			assert_eq!(name, "byte");
			assert!(matches!(
				source,
				ConstraintSystemError::Unsatisfied {
					constraint_type: "range",
					..
				}
			));
		}
		other => panic!("unexpected error: {other}"),
	}
}

#[test]
fn test_hint_calls_are_counted() {
	let builder = CircuitBuilder::new();
	let (q, r) = builder
		.biguint_divide_hint(&BigUint::from(17u32), &BigUint::from(5u32))
		.unwrap();
	assert_eq!((q, r), (BigUint::from(3u32), BigUint::from(2u32)));
	assert_eq!(
		builder.biguint_divide_hint(&BigUint::from(17u32), &BigUint::ZERO),
		Err(HintError::DivisionByZero)
	);
	let pieces = builder
		.limb_split_hint(&BigUint::from(0x1234u32), &[8, 8])
		.unwrap();
	assert_eq!(pieces, vec![BigUint::from(0x34u32), BigUint::from(0x12u32)]);
	assert_eq!(builder.counts().n_hints, 3);
	assert_eq!(builder.build().n_hints(), 3);
}

#[test]
#[should_panic(expected = "build called twice")]
fn test_build_twice_panics() {
	let builder = CircuitBuilder::new();
	let _ = builder.build();
	let _ = builder.build();
}

proptest! {
	#[test]
	fn prop_mul_add_values(x in any::<u64>(), y in any::<u64>()) {
		let builder = CircuitBuilder::new();
		let a = builder.add_witness(felt(x));
		let b = builder.add_witness(felt(y));
		let product = builder.mul(a, b);
		let sum = builder.add(a, b);
		prop_assert_eq!(
			builder.value_biguint(product),
			BigUint::from(x) * BigUint::from(y)
		);
		prop_assert_eq!(builder.value_biguint(sum), BigUint::from(x) + BigUint::from(y));
		prop_assert!(builder.build().verify().is_ok());
	}
}
