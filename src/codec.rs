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

//! The `Writeable`/`Readable` capability every encodable type implements,
//! plus the built-in implementations for the primitive and container
//! types the grammar names directly.
//!
//! A type's `Encoding` is the trio of facts the grammar cares about: which
//! prefix byte(s) introduce it, how its payload is written, and how its
//! payload is read back given the prefix already consumed. `Writeable`/
//! `Readable` are the object-safe surface built from that; `Encoding` is
//! the marker a type opts into to tell [`crate::schema::LogicalBuffer`]
//! whether it may be packed as a raw integral blob instead of an
//! element-wise array.

use std::collections::BTreeMap;

use crate::error::{Error, ErrorKind};
use crate::grammar::prefix;
use crate::handle::HandleReference;
use crate::io::{Reader, Writer};
use crate::varint;

/// Writes `Self` to the wire.
pub trait Writeable {
	/// Emits this value's full encoding, prefix byte(s) included.
	fn write(&self, writer: &mut dyn Writer) -> Result<(), Error>;
}

/// Reads `Self` back from the wire.
pub trait Readable: Sized {
	/// Consumes this value's full encoding, prefix byte(s) included.
	fn read(reader: &mut dyn Reader) -> Result<Self, Error>;
}

/// Marks a type as packable into a raw byte blob rather than an
/// element-wise sequence — the distinction
/// [`LogicalBuffer`](crate::schema::LogicalBuffer) uses to decide between
/// `Binary` and `Array` encoding. Implemented only for the fixed-width
/// integral types the grammar defines a size class for.
pub trait Encoding: Writeable + Readable + Copy {
	/// Width of this type's raw little-endian representation, in bytes.
	const WIDTH: usize;
	/// Packs `self` into its raw little-endian bytes.
	fn to_raw_bytes(self) -> Vec<u8>;
	/// Unpacks `self` from its raw little-endian bytes.
	fn from_raw_bytes(bytes: &[u8]) -> Self;
}

macro_rules! impl_integral {
	($ty:ty, $width:expr, $to_bytes:expr, $from_bytes:expr) => {
		impl Encoding for $ty {
			const WIDTH: usize = $width;

			fn to_raw_bytes(self) -> Vec<u8> {
				let f: fn($ty) -> Vec<u8> = $to_bytes;
				f(self)
			}

			fn from_raw_bytes(bytes: &[u8]) -> Self {
				let f: fn(&[u8]) -> $ty = $from_bytes;
				f(bytes)
			}
		}
	};
}

impl_integral!(u8, 1, |v: u8| vec![v], |b: &[u8]| b[0]);
impl_integral!(i8, 1, |v: i8| vec![v as u8], |b: &[u8]| b[0] as i8);
impl_integral!(u16, 2, |v: u16| v.to_le_bytes().to_vec(), |b: &[u8]| u16::from_le_bytes([
	b[0], b[1]
]));
impl_integral!(i16, 2, |v: i16| v.to_le_bytes().to_vec(), |b: &[u8]| i16::from_le_bytes([
	b[0], b[1]
]));
impl_integral!(u32, 4, |v: u32| v.to_le_bytes().to_vec(), |b: &[u8]| u32::from_le_bytes([
	b[0], b[1], b[2], b[3]
]));
impl_integral!(i32, 4, |v: i32| v.to_le_bytes().to_vec(), |b: &[u8]| i32::from_le_bytes([
	b[0], b[1], b[2], b[3]
]));
impl_integral!(u64, 8, |v: u64| v.to_le_bytes().to_vec(), |b: &[u8]| u64::from_le_bytes([
	b[0], b[1], b[2], b[3], b[4], b[5], b[6], b[7]
]));
impl_integral!(i64, 8, |v: i64| v.to_le_bytes().to_vec(), |b: &[u8]| i64::from_le_bytes([
	b[0], b[1], b[2], b[3], b[4], b[5], b[6], b[7]
]));

impl Writeable for bool {
	fn write(&self, writer: &mut dyn Writer) -> Result<(), Error> {
		writer.prepare(1)?;
		writer.write_prefix(if *self { prefix::BOOL_TRUE } else { prefix::BOOL_FALSE })
	}
}

impl Readable for bool {
	fn read(reader: &mut dyn Reader) -> Result<Self, Error> {
		match reader.read_prefix()? {
			prefix::BOOL_TRUE => Ok(true),
			prefix::BOOL_FALSE => Ok(false),
			other => Err(ErrorKind::UnexpectedEncodingType(other).into()),
		}
	}
}

macro_rules! impl_unsigned {
	($ty:ty, $width:expr) => {
		impl Writeable for $ty {
			fn write(&self, writer: &mut dyn Writer) -> Result<(), Error> {
				varint::write_unsigned(writer, *self as u64)
			}
		}

		impl Readable for $ty {
			fn read(reader: &mut dyn Reader) -> Result<Self, Error> {
				varint::read_unsigned_sized(reader, $width).map(|v| v as $ty)
			}
		}
	};
}

macro_rules! impl_signed {
	($ty:ty, $width:expr) => {
		impl Writeable for $ty {
			fn write(&self, writer: &mut dyn Writer) -> Result<(), Error> {
				varint::write_signed(writer, *self as i64)
			}
		}

		impl Readable for $ty {
			fn read(reader: &mut dyn Reader) -> Result<Self, Error> {
				varint::read_signed_sized(reader, $width).map(|v| v as $ty)
			}
		}
	};
}

impl_unsigned!(u8, 1);
impl_unsigned!(u16, 2);
impl_unsigned!(u32, 4);
impl_unsigned!(u64, 8);
impl_signed!(i8, 1);
impl_signed!(i16, 2);
impl_signed!(i32, 4);
impl_signed!(i64, 8);

impl Writeable for f32 {
	fn write(&self, writer: &mut dyn Writer) -> Result<(), Error> {
		writer.prepare(5)?;
		writer.write_prefix(prefix::F32)?;
		writer.write_raw(&self.to_le_bytes())
	}
}

impl Readable for f32 {
	fn read(reader: &mut dyn Reader) -> Result<Self, Error> {
		match reader.read_prefix()? {
			prefix::F32 => {
				let mut buf = [0u8; 4];
				reader.read_raw(&mut buf)?;
				Ok(f32::from_le_bytes(buf))
			}
			other => Err(ErrorKind::UnexpectedEncodingType(other).into()),
		}
	}
}

impl Writeable for f64 {
	fn write(&self, writer: &mut dyn Writer) -> Result<(), Error> {
		writer.prepare(9)?;
		writer.write_prefix(prefix::F64)?;
		writer.write_raw(&self.to_le_bytes())
	}
}

impl Readable for f64 {
	fn read(reader: &mut dyn Reader) -> Result<Self, Error> {
		match reader.read_prefix()? {
			prefix::F64 => {
				let mut buf = [0u8; 8];
				reader.read_raw(&mut buf)?;
				Ok(f64::from_le_bytes(buf))
			}
			other => Err(ErrorKind::UnexpectedEncodingType(other).into()),
		}
	}
}

impl Writeable for () {
	fn write(&self, writer: &mut dyn Writer) -> Result<(), Error> {
		writer.prepare(1)?;
		writer.write_prefix(prefix::NIL)
	}
}

impl Readable for () {
	fn read(reader: &mut dyn Reader) -> Result<Self, Error> {
		match reader.read_prefix()? {
			prefix::NIL => Ok(()),
			other => Err(ErrorKind::UnexpectedEncodingType(other).into()),
		}
	}
}

impl Writeable for String {
	fn write(&self, writer: &mut dyn Writer) -> Result<(), Error> {
		let bytes = self.as_bytes();
		writer.prepare(1 + bytes.len() as u64)?;
		writer.write_prefix(prefix::STRING)?;
		crate::grammar::write_container_length(writer, bytes.len() as u64)?;
		writer.write_raw(bytes)
	}
}

impl Readable for String {
	fn read(reader: &mut dyn Reader) -> Result<Self, Error> {
		match reader.read_prefix()? {
			prefix::STRING => {
				let len = crate::grammar::read_container_length(reader)?;
				let mut buf = vec![0u8; len as usize];
				reader.read_raw(&mut buf)?;
				String::from_utf8(buf).map_err(|_| ErrorKind::InvalidContainerLength(len).into())
			}
			other => Err(ErrorKind::UnexpectedEncodingType(other).into()),
		}
	}
}

/// A `Vec<T>` is always encoded element-wise as `Array`, `T = u8`
/// included — Rust has no stable specialization to special-case it the
/// way the grammar's `Binary` type would want. Use [`Binary`] when a raw,
/// uninterpreted byte blob is actually meant; [`crate::schema::LogicalBuffer`]
/// picks between the two representations for a fixed-capacity buffer
/// based on [`Encoding`].
impl<T: Writeable> Writeable for Vec<T> {
	fn write(&self, writer: &mut dyn Writer) -> Result<(), Error> {
		writer.prepare(1)?;
		writer.write_prefix(prefix::ARRAY)?;
		crate::grammar::write_container_length(writer, self.len() as u64)?;
		for item in self {
			item.write(writer)?;
		}
		Ok(())
	}
}

impl<T: Readable> Readable for Vec<T> {
	fn read(reader: &mut dyn Reader) -> Result<Self, Error> {
		match reader.read_prefix()? {
			prefix::ARRAY => {
				let _guard = crate::grammar::RecursionGuard::enter()?;
				let len = crate::grammar::read_container_length(reader)?;
				let mut out = Vec::with_capacity(len as usize);
				for _ in 0..len {
					out.push(T::read(reader)?);
				}
				Ok(out)
			}
			other => Err(ErrorKind::UnexpectedEncodingType(other).into()),
		}
	}
}

/// A raw, uninterpreted byte blob — the `Binary` wire type, distinct from
/// `Vec<u8>`'s element-wise `Array` encoding.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Binary(pub Vec<u8>);

impl Writeable for Binary {
	fn write(&self, writer: &mut dyn Writer) -> Result<(), Error> {
		writer.prepare(1 + self.0.len() as u64)?;
		writer.write_prefix(prefix::BINARY)?;
		crate::grammar::write_container_length(writer, self.0.len() as u64)?;
		writer.write_raw(&self.0)
	}
}

impl Readable for Binary {
	fn read(reader: &mut dyn Reader) -> Result<Self, Error> {
		match reader.read_prefix()? {
			prefix::BINARY => {
				let len = crate::grammar::read_container_length(reader)?;
				let mut buf = vec![0u8; len as usize];
				reader.read_raw(&mut buf)?;
				Ok(Binary(buf))
			}
			other => Err(ErrorKind::UnexpectedEncodingType(other).into()),
		}
	}
}

impl<K: Writeable + Ord, V: Writeable> Writeable for BTreeMap<K, V> {
	fn write(&self, writer: &mut dyn Writer) -> Result<(), Error> {
		writer.prepare(1)?;
		writer.write_prefix(prefix::MAP)?;
		crate::grammar::write_container_length(writer, self.len() as u64)?;
		for (k, v) in self {
			k.write(writer)?;
			v.write(writer)?;
		}
		Ok(())
	}
}

impl<K: Readable + Ord, V: Readable> Readable for BTreeMap<K, V> {
	fn read(reader: &mut dyn Reader) -> Result<Self, Error> {
		match reader.read_prefix()? {
			prefix::MAP => {
				let _guard = crate::grammar::RecursionGuard::enter()?;
				let len = crate::grammar::read_container_length(reader)?;
				let mut out = BTreeMap::new();
				for _ in 0..len {
					let k = K::read(reader)?;
					let v = V::read(reader)?;
					out.insert(k, v);
				}
				Ok(out)
			}
			other => Err(ErrorKind::UnexpectedEncodingType(other).into()),
		}
	}
}

impl Writeable for HandleReference {
	fn write(&self, writer: &mut dyn Writer) -> Result<(), Error> {
		writer.prepare(1)?;
		writer.write_prefix(prefix::HANDLE)?;
		varint::write_unsigned(writer, self.0 as u64)
	}
}

impl Readable for HandleReference {
	fn read(reader: &mut dyn Reader) -> Result<Self, Error> {
		match reader.read_prefix()? {
			prefix::HANDLE => {
				let v = varint::read_unsigned_sized(reader, 4)?;
				Ok(HandleReference(v as u32))
			}
			other => Err(ErrorKind::UnexpectedEncodingType(other).into()),
		}
	}
}

impl<T: Writeable> Writeable for &T {
	fn write(&self, writer: &mut dyn Writer) -> Result<(), Error> {
		(*self).write(writer)
	}
}
