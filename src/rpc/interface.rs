// Copyright 2024 The Nop Authors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Interface and method descriptors: the static shape a
//! [`Dispatcher`](crate::rpc::dispatch::Dispatcher) is registered
//! against, built from a fixed interface id and an ordered method name
//! list.

use crate::error::{Error, ErrorKind};
use crate::rpc::selector::method_selector;

/// One method of an [`Interface`]: its name and the selector derived
/// from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Method {
	/// The method's name, as declared on the interface.
	pub name: &'static str,
	/// `sip24(interface_id ++ 0x00 ++ name)`.
	pub selector: u64,
}

/// A named, ordered set of methods. Construction fails if two methods
/// collide on their selector — vanishingly unlikely by accident, but
/// checked so a colliding declaration is caught at startup rather than
/// manifesting as a misrouted call.
#[derive(Debug, Clone)]
pub struct Interface {
	/// The interface's id, the first input to every method's selector.
	pub id: &'static str,
	methods: Vec<Method>,
}

impl Interface {
	/// Builds an interface from its id and method names, computing each
	/// method's selector and rejecting any collision.
	pub fn new(id: &'static str, method_names: &[&'static str]) -> Result<Self, Error> {
		let mut methods = Vec::with_capacity(method_names.len());
		for &name in method_names {
			let selector = method_selector(id, name);
			if methods.iter().any(|m: &Method| m.selector == selector) {
				return Err(ErrorKind::DuplicateMethodHash(selector).into());
			}
			methods.push(Method { name, selector });
		}
		Ok(Interface { id, methods })
	}

	/// The interface's methods, in declaration order.
	pub fn methods(&self) -> &[Method] {
		&self.methods
	}

	/// Looks up a method by name.
	pub fn method(&self, name: &str) -> Option<Method> {
		self.methods.iter().copied().find(|m| m.name == name)
	}
}

/// Declares an [`Interface`] as a `const fn`-free static descriptor,
/// mirroring how `nop_structure!`/`nop_variant!` turn a declaration into
/// generated code rather than runtime configuration.
///
/// ```ignore
/// nop_interface!(CALCULATOR, "nop.Calculator", ["Add", "Subtract"]);
/// ```
#[macro_export]
macro_rules! nop_interface {
	($static_name:ident, $id:expr, [$($method:expr),+ $(,)?]) => {
		/// Generated by `nop_interface!`.
		pub fn $static_name() -> Result<$crate::rpc::interface::Interface, $crate::Error> {
			$crate::rpc::interface::Interface::new($id, &[$($method),+])
		}
	};
}

#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn builds_distinct_selectors_per_method() {
		let iface = Interface::new("nop.Calculator", &["Add", "Subtract"]).unwrap();
		let selectors: Vec<u64> = iface.methods().iter().map(|m| m.selector).collect();
		assert_eq!(selectors.len(), 2);
		assert_ne!(selectors[0], selectors[1]);
	}

	#[test]
	fn looks_up_method_by_name() {
		let iface = Interface::new("nop.Calculator", &["Add"]).unwrap();
		assert!(iface.method("Add").is_some());
		assert!(iface.method("Missing").is_none());
	}
}
