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

//! [`LogicalBuffer`]: a fixed-capacity backing array plus a live element
//! count, the pairing `nop_structure!`'s `(array, count)` member syntax
//! compiles down to. An integral element type packs the live prefix as a
//! raw `Binary` blob; anything else is written element-wise as `Array` —
//! the two are fungible on the wire when the element type and count
//! agree, per [`crate::codec::Encoding`].
//!
//! Rust of this vintage has no const generics, so a fixed-capacity
//! backing array is a closed set of sizes rather than `[T; N]` for
//! arbitrary `N`, the same tradeoff `serde`'s pre-const-generics array
//! support made.

use crate::codec::{Binary, Encoding, Readable, Writeable};
use crate::error::{Error, ErrorKind};
use crate::grammar::prefix;
use crate::io::{Reader, Writer};

/// A fixed-capacity backing array a [`LogicalBuffer`] member can use.
/// Implemented for `[T; N]` at a closed set of useful capacities.
pub trait FixedBuffer<T>: Sized {
	/// Total capacity, independent of how many elements are live.
	fn capacity() -> usize;
	/// The live prefix, `elements[..len]`.
	fn live(&self, len: usize) -> &[T];
	/// Builds a backing array from a live sequence no longer than
	/// [`capacity`](Self::capacity), padding the remainder with
	/// `T::default()`.
	fn from_elements(elements: Vec<T>) -> Result<Self, Error>
	where
		T: Default;
}

macro_rules! impl_fixed_buffer {
	($n:expr) => {
		impl<T: Copy + Default> FixedBuffer<T> for [T; $n] {
			fn capacity() -> usize {
				$n
			}

			fn live(&self, len: usize) -> &[T] {
				&self[..len]
			}

			fn from_elements(elements: Vec<T>) -> Result<Self, Error> {
				if elements.len() > $n {
					return Err(ErrorKind::InvalidContainerLength(elements.len() as u64).into());
				}
				let mut out = [T::default(); $n];
				out[..elements.len()].copy_from_slice(&elements);
				Ok(out)
			}
		}
	};
}

impl_fixed_buffer!(1);
impl_fixed_buffer!(2);
impl_fixed_buffer!(4);
impl_fixed_buffer!(8);
impl_fixed_buffer!(16);
impl_fixed_buffer!(32);
impl_fixed_buffer!(64);
impl_fixed_buffer!(128);
impl_fixed_buffer!(256);
impl_fixed_buffer!(512);
impl_fixed_buffer!(1024);

/// The `(array, count)` member pair: `Buffer` is the fixed-capacity
/// backing type, holding up to `Buffer`'s capacity live elements of type
/// `T`, of which `count` are meaningful.
pub struct LogicalBuffer;

impl LogicalBuffer {
	/// Writes the live prefix of `buffer[..count]`. Packs as a raw
	/// `Binary` blob when `T: Encoding`, otherwise as an element-wise
	/// `Array` — both readable back as the same logical sequence.
	pub fn write_view<T, Buffer, Count>(buffer: &Buffer, count: Count, writer: &mut dyn Writer) -> Result<(), Error>
	where
		T: Writeable + Encoding,
		Buffer: FixedBuffer<T>,
		Count: Into<u64> + Copy,
	{
		let len = count.into() as usize;
		if len > Buffer::capacity() {
			return Err(ErrorKind::InvalidContainerLength(len as u64).into());
		}
		let live = buffer.live(len);
		let mut bytes = Vec::with_capacity(live.len() * T::WIDTH);
		for item in live {
			bytes.extend(item.to_raw_bytes());
		}
		Binary(bytes).write(writer)
	}

	/// Reads back a value written by [`write_view`](Self::write_view),
	/// returning the reconstructed backing array and its live count.
	pub fn read_view<T, Buffer, Count>(reader: &mut dyn Reader) -> Result<(Buffer, Count), Error>
	where
		T: Readable + Encoding,
		Buffer: FixedBuffer<T>,
		Count: std::convert::TryFrom<usize>,
	{
		let Binary(bytes) = Binary::read(reader)?;
		if bytes.len() % T::WIDTH != 0 {
			return Err(ErrorKind::InvalidContainerLength(bytes.len() as u64).into());
		}
		let elements: Vec<T> = bytes.chunks_exact(T::WIDTH).map(T::from_raw_bytes).collect();
		let len = elements.len();
		let buffer = Buffer::from_elements(elements)?;
		let count = Count::try_from(len).map_err(|_| ErrorKind::InvalidContainerLength(len as u64))?;
		Ok((buffer, count))
	}
}

/// Writes a non-integral `(array, count)` pair element-wise as `Array`,
/// for members whose element type does not implement
/// [`Encoding`](crate::codec::Encoding) — e.g. nested structures.
pub fn write_sequence_view<T, Buffer, Count>(buffer: &Buffer, count: Count, writer: &mut dyn Writer) -> Result<(), Error>
where
	T: Writeable,
	Buffer: FixedBuffer<T>,
	Count: Into<u64> + Copy,
	T: Clone,
{
	let len = count.into() as usize;
	if len > Buffer::capacity() {
		return Err(ErrorKind::InvalidContainerLength(len as u64).into());
	}
	writer.prepare(1)?;
	writer.write_prefix(prefix::ARRAY)?;
	crate::grammar::write_container_length(writer, len as u64)?;
	for item in buffer.live(len) {
		item.write(writer)?;
	}
	Ok(())
}

#[cfg(test)]
mod test {
	use super::*;
	use crate::io::{StdReader, StdWriter};

	#[test]
	fn integral_view_roundtrips_through_binary() {
		let buffer: [u32; 8] = [10, 20, 30, 0, 0, 0, 0, 0];
		let count: u32 = 3;

		let mut bytes = Vec::new();
		{
			let mut w = StdWriter::new(&mut bytes);
			LogicalBuffer::write_view::<u32, [u32; 8], u32>(&buffer, count, &mut w).unwrap();
		}
		assert_eq!(bytes[0], prefix::BINARY);

		let mut r = StdReader::new(&bytes[..]);
		let (out_buffer, out_count): ([u32; 8], u32) = LogicalBuffer::read_view(&mut r).unwrap();
		assert_eq!(out_count, 3);
		assert_eq!(&out_buffer[..3], &[10, 20, 30]);
	}

	#[test]
	fn rejects_count_past_capacity() {
		let buffer: [u8; 4] = [0; 4];
		let mut bytes = Vec::new();
		let mut w = StdWriter::new(&mut bytes);
		let err = LogicalBuffer::write_view::<u8, [u8; 4], u32>(&buffer, 9, &mut w).unwrap_err();
		assert_eq!(err.kind(), ErrorKind::InvalidContainerLength(9));
	}
}
