// Copyright 2025 Irreducible Inc.
use cranelift_entity::PrimaryMap;

/// A position in the naming hierarchy of a circuit.
///
/// Sub-circuits and named assertions each get their own scope. Compact, only 32-bit.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Scope(u32);
cranelift_entity::entity_impl!(Scope);

struct ScopeData {
	name: String,
	parent: Option<Scope>,
}

/// The tree of all scopes created while building a circuit.
pub struct ScopeTree {
	root: Scope,
	scopes: PrimaryMap<Scope, ScopeData>,
}

impl ScopeTree {
	pub fn new() -> Self {
		let mut scopes = PrimaryMap::new();
		let root = scopes.push(ScopeData {
			name: String::new(),
			parent: None,
		});
		Self { root, scopes }
	}

	/// Returns the unnamed scope every other scope descends from.
	pub fn root(&self) -> Scope {
		self.root
	}

	/// Creates a scope named `name` nested in `parent`.
	pub fn child(&mut self, parent: Scope, name: impl Into<String>) -> Scope {
		self.scopes.push(ScopeData {
			name: name.into(),
			parent: Some(parent),
		})
	}

	/// Returns the dot separated names from the root down to `scope`.
	///
	/// The root itself has an empty name.
	pub fn qualified_name(&self, scope: Scope) -> String {
		let mut names = Vec::new();
		let mut cursor = Some(scope);
		while let Some(current) = cursor {
			if current != self.root {
				names.push(self.scopes[current].name.as_str());
			}
			cursor = self.scopes[current].parent;
		}
		names.reverse();
		names.join(".")
	}
}

impl Default for ScopeTree {
	fn default() -> Self {
		Self::new()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_qualified_name() {
		let mut tree = ScopeTree::new();
		let root = tree.root();
		let a = tree.child(root, "bigint_mul");
		let b = tree.child(a, "carry[3]");
		assert_eq!(tree.qualified_name(root), "");
		assert_eq!(tree.qualified_name(a), "bigint_mul");
		assert_eq!(tree.qualified_name(b), "bigint_mul.carry[3]");
		// Siblings with equal names are distinct scopes.
		let c = tree.child(a, "carry[3]");
		assert_ne!(b, c);
		assert_eq!(tree.qualified_name(c), tree.qualified_name(b));
	}
}
