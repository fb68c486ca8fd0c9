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

//! The wire grammar: the prefix byte taxonomy every encoded value opens
//! with, and the handful of grammar-level encodings (member counts,
//! variant indices, container lengths) layered on the compact integer
//! codec in [`crate::varint`].
//!
//! The prefix table is part of this crate's wire ABI — once assigned, a
//! byte value here must never be reassigned to a different meaning.

use std::cell::Cell;

use crate::error::{Error, ErrorKind};
use crate::io::{Reader, Writer};
use crate::varint;

/// Prefix byte constants. `PosFixInt` and `NegFixInt` are ranges rather
/// than single values; every other prefix is exact.
pub mod prefix {
	/// Inclusive lower bound of the positive fixint range (0..=0x7F).
	pub const POS_FIXINT_MIN: u8 = 0x00;
	/// Inclusive upper bound of the positive fixint range.
	pub const POS_FIXINT_MAX: u8 = 0x7F;
	/// Structures: member count followed by each member in order.
	pub const STRUCTURE: u8 = 0xB0;
	/// The absent value.
	pub const NIL: u8 = 0xC0;
	/// Boolean `false`.
	pub const BOOL_FALSE: u8 = 0xC2;
	/// Boolean `true`.
	pub const BOOL_TRUE: u8 = 0xC3;
	/// Binary blob: a byte length followed by that many raw bytes.
	pub const BINARY: u8 = 0xC4;
	/// IEEE-754 single precision float, 4 little-endian bytes.
	pub const F32: u8 = 0xCA;
	/// IEEE-754 double precision float, 8 little-endian bytes.
	pub const F64: u8 = 0xCB;
	/// Unsigned 8-bit size class.
	pub const U8: u8 = 0xCC;
	/// Unsigned 16-bit size class, little-endian.
	pub const U16: u8 = 0xCD;
	/// Unsigned 32-bit size class, little-endian.
	pub const U32: u8 = 0xCE;
	/// Unsigned 64-bit size class, little-endian.
	pub const U64: u8 = 0xCF;
	/// Signed 8-bit size class.
	pub const I8: u8 = 0xD0;
	/// Signed 16-bit size class, little-endian two's complement.
	pub const I16: u8 = 0xD1;
	/// Signed 32-bit size class, little-endian two's complement.
	pub const I32: u8 = 0xD2;
	/// Signed 64-bit size class, little-endian two's complement.
	pub const I64: u8 = 0xD3;
	/// Variant: an index followed by the alive alternative, if any.
	pub const VARIANT: u8 = 0xD4;
	/// An out-of-band handle reference.
	pub const HANDLE: u8 = 0xD5;
	/// UTF-8 string: a byte length followed by that many bytes.
	pub const STRING: u8 = 0xD9;
	/// Array: an element count followed by each element in order.
	pub const ARRAY: u8 = 0xDC;
	/// Map: an entry count followed by each key then value, in order.
	pub const MAP: u8 = 0xDE;
	/// Inclusive lower bound of the negative fixint range (-32..=-1).
	pub const NEG_FIXINT_MIN: u8 = 0xE0;
	/// Inclusive upper bound of the negative fixint range.
	pub const NEG_FIXINT_MAX: u8 = 0xFF;

	/// Whether `b` falls in the positive fixint range.
	pub fn is_pos_fixint(b: u8) -> bool {
		b <= POS_FIXINT_MAX
	}

	/// Whether `b` falls in the negative fixint range.
	pub fn is_neg_fixint(b: u8) -> bool {
		b >= NEG_FIXINT_MIN
	}
}

/// A recursion depth past which nested containers are rejected rather
/// than risking a stack overflow on adversarial or malformed input.
pub const MAX_RECURSION_DEPTH: u32 = 32;

thread_local! {
	static RECURSION_DEPTH: Cell<u32> = Cell::new(0);
}

/// An RAII guard marking one level of nested `read` in progress. Every
/// container/structure/variant read path acquires one around its
/// element reads; acquiring past [`MAX_RECURSION_DEPTH`] fails with
/// `RecursionLimit` instead of recursing further.
pub struct RecursionGuard {
	_private: (),
}

impl RecursionGuard {
	/// Enters one more level of nesting, failing if that would exceed
	/// [`MAX_RECURSION_DEPTH`].
	pub fn enter() -> Result<RecursionGuard, Error> {
		RECURSION_DEPTH.with(|depth| {
			let current = depth.get();
			if current >= MAX_RECURSION_DEPTH {
				return Err(ErrorKind::RecursionLimit.into());
			}
			depth.set(current + 1);
			Ok(RecursionGuard { _private: () })
		})
	}
}

impl Drop for RecursionGuard {
	fn drop(&mut self) {
		RECURSION_DEPTH.with(|depth| depth.set(depth.get() - 1));
	}
}

/// Writes a structure header: the `Structure` prefix followed by its
/// member count as a compact integer.
pub fn write_member_count(writer: &mut dyn Writer, count: u64) -> Result<(), Error> {
	writer.prepare(1)?;
	writer.write_prefix(prefix::STRUCTURE)?;
	varint::write_unsigned(writer, count)
}

/// Reads a structure header, returning its member count.
pub fn read_member_count(reader: &mut dyn Reader) -> Result<u64, Error> {
	let p = reader.read_prefix()?;
	if p != prefix::STRUCTURE {
		return Err(ErrorKind::UnexpectedEncodingType(p).into());
	}
	varint::read_unsigned(reader)
}

/// Writes a variant header: the `Variant` prefix followed by the
/// alive-alternative index, `-1` for the empty state.
pub fn write_variant_index(writer: &mut dyn Writer, index: i64) -> Result<(), Error> {
	writer.prepare(1)?;
	writer.write_prefix(prefix::VARIANT)?;
	varint::write_signed(writer, index)
}

/// Reads a variant header, returning the alive-alternative index.
pub fn read_variant_index(reader: &mut dyn Reader) -> Result<i64, Error> {
	let p = reader.read_prefix()?;
	if p != prefix::VARIANT {
		return Err(ErrorKind::UnexpectedEncodingType(p).into());
	}
	varint::read_signed(reader)
}

/// Writes a container length (array element count, map entry count,
/// binary/string byte length).
pub fn write_container_length(writer: &mut dyn Writer, len: u64) -> Result<(), Error> {
	varint::write_unsigned(writer, len)
}

/// Reads a container length, rejecting a value absurd enough that it
/// could only be a malformed or adversarial encoding.
pub fn read_container_length(reader: &mut dyn Reader) -> Result<u64, Error> {
	let len = varint::read_unsigned(reader)?;
	if len > (u32::MAX as u64) {
		return Err(ErrorKind::InvalidContainerLength(len).into());
	}
	Ok(len)
}

#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn recursion_guard_rejects_past_max_depth() {
		let mut guards = Vec::new();
		for _ in 0..MAX_RECURSION_DEPTH {
			guards.push(RecursionGuard::enter().unwrap());
		}
		let err = RecursionGuard::enter().unwrap_err();
		assert_eq!(err.kind(), ErrorKind::RecursionLimit);

		// dropping one guard frees a slot for the next enter
		guards.pop();
		assert!(RecursionGuard::enter().is_ok());
	}
}
