// Copyright 2025 Irreducible Inc.
use limbo_core::Felt;
use limbo_frontend::{CircuitBuilder, ConstraintError};

#[test]
fn test_assertion_failure_shows_path() {
	// Create a circuit with nested subcircuits to test path reporting
	let builder = CircuitBuilder::new();

	let module_a = builder.subcircuit("module_a");
	let submodule = module_a.subcircuit("submodule");

	let x = submodule.add_witness(Felt::from(42u64));
	let y = submodule.add_witness(Felt::from(100u64));

	// The assertion fails as soon as it is emitted.
	let error_string = submodule
		.assert_eq("test_assertion", x, y)
		.unwrap_err()
		.to_string();
	assert!(
		error_string.contains("module_a.submodule.test_assertion"),
		"Error should contain the path 'module_a.submodule.test_assertion', but got: {error_string}"
	);
	assert!(
		error_string.contains("42") && error_string.contains("100"),
		"Error should contain the values that failed"
	);
}

#[test]
fn test_multiple_assertion_failures_survive_build() {
	let builder = CircuitBuilder::new();

	let module = builder.subcircuit("validator");

	let a = module.add_witness(Felt::from(1u64));
	let b = module.add_witness(Felt::from(2u64));
	let c = module.add_witness(Felt::from(2u64));

	assert!(module.assert_eq("check_a_equals_b", a, b).is_err());
	assert!(module.assert_eq("check_b_equals_c", b, c).is_ok());

	// Verification of the finished circuit reports the first violated constraint.
	let circuit = builder.build();
	match circuit.verify() {
		Err(ConstraintError::Unsatisfied { name, .. }) => {
			assert_eq!(name, "validator.check_a_equals_b");
		}
		other => panic!("unexpected verification result: {other:?}"),
	}
}
