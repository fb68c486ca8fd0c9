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

//! `Optional<T>` and `Result<E, T>`, the two-alternative closed unions
//! built by hand rather than through `nop_variant!` since both carry
//! combinators (`become_at`, `visit`) beyond what the declaration macro
//! generates.

use crate::codec::{Readable, Writeable};
use crate::error::Error;
use crate::grammar;
use crate::io::{Reader, Writer};

/// A value that may be absent, encoded the same way an empty/non-empty
/// two-alternative Variant would be: index `-1` for `None`, index `0`
/// for `Some`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Optional<T> {
	/// No value is present.
	None,
	/// A value is present.
	Some(T),
}

impl<T> Default for Optional<T> {
	fn default() -> Self {
		Optional::None
	}
}

impl<T> Optional<T> {
	/// The alive alternative's index: `-1` if absent, `0` if present.
	pub fn index(&self) -> i64 {
		match self {
			Optional::None => -1,
			Optional::Some(_) => 0,
		}
	}

	/// Converts to `std::option::Option<T>`.
	pub fn into_option(self) -> Option<T> {
		match self {
			Optional::None => None,
			Optional::Some(v) => Some(v),
		}
	}

	/// Borrows the value, if present.
	pub fn get(&self) -> Option<&T> {
		match self {
			Optional::None => None,
			Optional::Some(v) => Some(v),
		}
	}

	/// Replaces the current value, discarding whatever was there before.
	/// Mirrors `Variant::become_at` restricted to the single non-empty
	/// alternative this type has.
	pub fn become_some(&mut self, value: T) {
		*self = Optional::Some(value);
	}

	/// Visits whichever alternative is alive.
	pub fn visit<R>(&self, on_none: impl FnOnce() -> R, on_some: impl FnOnce(&T) -> R) -> R {
		match self {
			Optional::None => on_none(),
			Optional::Some(v) => on_some(v),
		}
	}
}

impl<T> From<Option<T>> for Optional<T> {
	fn from(value: Option<T>) -> Self {
		match value {
			None => Optional::None,
			Some(v) => Optional::Some(v),
		}
	}
}

impl<T: Writeable> Writeable for Optional<T> {
	fn write(&self, writer: &mut dyn Writer) -> Result<(), Error> {
		grammar::write_variant_index(writer, self.index())?;
		match self {
			Optional::None => Ok(()),
			Optional::Some(v) => v.write(writer),
		}
	}
}

impl<T: Readable> Readable for Optional<T> {
	fn read(reader: &mut dyn Reader) -> Result<Self, Error> {
		let index = grammar::read_variant_index(reader)?;
		match index {
			-1 => Ok(Optional::None),
			0 => Ok(Optional::Some(T::read(reader)?)),
			other => Err(crate::error::ErrorKind::UnexpectedEncodingType(other as u8).into()),
		}
	}
}

/// The result of a fallible operation: either an error of type `E` or a
/// success value of type `T`, encoded as a two-alternative Variant with
/// the error at index `0` and the success value at index `1` — there is
/// no empty state; a `NopResult` always carries one or the other.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NopResult<E, T> {
	/// The operation failed, carrying its error value.
	Err(E),
	/// The operation succeeded, carrying its result value.
	Ok(T),
}

impl<E, T> NopResult<E, T> {
	/// The alive alternative's index: `0` for `Err`, `1` for `Ok`.
	pub fn index(&self) -> i64 {
		match self {
			NopResult::Err(_) => 0,
			NopResult::Ok(_) => 1,
		}
	}

	/// Converts to `std::result::Result<T, E>`.
	pub fn into_result(self) -> Result<T, E> {
		match self {
			NopResult::Err(e) => Err(e),
			NopResult::Ok(v) => Ok(v),
		}
	}

	/// Visits whichever alternative is alive.
	pub fn visit<R>(&self, on_err: impl FnOnce(&E) -> R, on_ok: impl FnOnce(&T) -> R) -> R {
		match self {
			NopResult::Err(e) => on_err(e),
			NopResult::Ok(v) => on_ok(v),
		}
	}
}

impl<E, T> From<Result<T, E>> for NopResult<E, T> {
	fn from(value: Result<T, E>) -> Self {
		match value {
			Err(e) => NopResult::Err(e),
			Ok(v) => NopResult::Ok(v),
		}
	}
}

impl<E: Writeable, T: Writeable> Writeable for NopResult<E, T> {
	fn write(&self, writer: &mut dyn Writer) -> Result<(), Error> {
		grammar::write_variant_index(writer, self.index())?;
		match self {
			NopResult::Err(e) => e.write(writer),
			NopResult::Ok(v) => v.write(writer),
		}
	}
}

impl<E: Readable, T: Readable> Readable for NopResult<E, T> {
	fn read(reader: &mut dyn Reader) -> Result<Self, Error> {
		let index = grammar::read_variant_index(reader)?;
		match index {
			0 => Ok(NopResult::Err(E::read(reader)?)),
			1 => Ok(NopResult::Ok(T::read(reader)?)),
			other => Err(crate::error::ErrorKind::UnexpectedEncodingType(other as u8).into()),
		}
	}
}

#[cfg(test)]
mod test {
	use super::*;
	use crate::io::{StdReader, StdWriter};

	#[test]
	fn optional_roundtrips_both_alternatives() {
		for value in [Optional::None, Optional::Some(7u32)] {
			let mut buf = Vec::new();
			{
				let mut w = StdWriter::new(&mut buf);
				value.write(&mut w).unwrap();
			}
			let mut r = StdReader::new(&buf[..]);
			assert_eq!(Optional::<u32>::read(&mut r).unwrap(), value);
		}
	}

	#[test]
	fn result_roundtrips_both_alternatives() {
		let values: Vec<NopResult<String, u32>> = vec![NopResult::Err("bad".to_string()), NopResult::Ok(42)];
		for value in values {
			let mut buf = Vec::new();
			{
				let mut w = StdWriter::new(&mut buf);
				value.write(&mut w).unwrap();
			}
			let mut r = StdReader::new(&buf[..]);
			assert_eq!(NopResult::<String, u32>::read(&mut r).unwrap(), value);
		}
	}
}
