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

//! Top-level serialize/deserialize entry points, the generalization of
//! `grin_core::ser::{serialize, deserialize, ser_vec}` from grin's fixed
//! protocol-versioned wire format to this crate's self-describing one.

use crate::codec::{Readable, Writeable};
use crate::error::Error;
use crate::io::{StdReader, StdWriter};

/// Writes `value` to `sink` using its [`Writeable`] implementation.
pub fn serialize<W: std::io::Write, T: Writeable>(sink: &mut W, value: &T) -> Result<(), Error> {
	let mut writer = StdWriter::new(sink);
	value.write(&mut writer)
}

/// Serializes `value` into a freshly allocated byte vector.
pub fn ser_vec<T: Writeable>(value: &T) -> Result<Vec<u8>, Error> {
	let mut buf = Vec::new();
	serialize(&mut buf, value)?;
	Ok(buf)
}

/// Reads a `T` from `source` using its [`Readable`] implementation.
pub fn deserialize<R: std::io::Read, T: Readable>(source: &mut R) -> Result<T, Error> {
	let mut reader = StdReader::new(source);
	T::read(&mut reader)
}

/// Deserializes a `T` from a byte slice.
pub fn deserialize_slice<T: Readable>(bytes: &[u8]) -> Result<T, Error> {
	let mut source = bytes;
	deserialize(&mut source)
}

/// A reusable sink for repeated [`serialize`] calls, for callers that
/// want to own their `StdWriter` across several values instead of
/// reconstructing one per call.
pub struct Serializer<W> {
	writer: StdWriter<W>,
}

impl<W: std::io::Write> Serializer<W> {
	/// Wraps `sink`.
	pub fn new(sink: W) -> Self {
		Serializer {
			writer: StdWriter::new(sink),
		}
	}

	/// Writes one value.
	pub fn write<T: Writeable>(&mut self, value: &T) -> Result<(), Error> {
		value.write(&mut self.writer)
	}

	/// Unwraps back to the underlying sink.
	pub fn into_inner(self) -> W {
		self.writer.into_inner()
	}
}

/// A reusable source for repeated [`deserialize`] calls.
pub struct Deserializer<R> {
	reader: StdReader<R>,
}

impl<R: std::io::Read> Deserializer<R> {
	/// Wraps `source`.
	pub fn new(source: R) -> Self {
		Deserializer {
			reader: StdReader::new(source),
		}
	}

	/// Reads one value.
	pub fn read<T: Readable>(&mut self) -> Result<T, Error> {
		T::read(&mut self.reader)
	}

	/// Unwraps back to the underlying source.
	pub fn into_inner(self) -> R {
		self.reader.into_inner()
	}
}

#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn roundtrips_through_a_byte_vector() {
		let encoded = ser_vec(&300u32).unwrap();
		let decoded: u32 = deserialize_slice(&encoded).unwrap();
		assert_eq!(decoded, 300);
	}
}
