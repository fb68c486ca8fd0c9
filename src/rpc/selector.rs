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

//! Method selectors: a 64-bit SipHash-2-4 digest of an interface id and
//! method name, used as the dispatch key in place of a central method
//! registry. Grounded on the short-id hashing
//! `grin_core::core::id::ShortIdentifiable` builds from `SipHasher24`
//! with a fixed zero key.

use std::hash::Hasher;

use siphasher::sip::SipHasher24;

/// Computes the method selector for `interface_id`/`method_name`: the
/// SipHash-2-4 digest, keyed with `(0, 0)`, of
/// `interface_id ++ 0x00 ++ method_name`.
pub fn method_selector(interface_id: &str, method_name: &str) -> u64 {
	let mut hasher = SipHasher24::new_with_keys(0, 0);
	hasher.write(interface_id.as_bytes());
	hasher.write(&[0u8]);
	hasher.write(method_name.as_bytes());
	hasher.finish()
}

#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn selector_is_deterministic() {
		let a = method_selector("nop.Calculator", "Add");
		let b = method_selector("nop.Calculator", "Add");
		assert_eq!(a, b);
	}

	#[test]
	fn selector_distinguishes_method_and_interface() {
		let add = method_selector("nop.Calculator", "Add");
		let sub = method_selector("nop.Calculator", "Subtract");
		let other_interface = method_selector("nop.OtherService", "Add");
		assert_ne!(add, sub);
		assert_ne!(add, other_interface);
	}
}
