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

//! Compact-write, permissive-read integer encoding: a writer always picks
//! the narrowest size class that holds the value; a reader accepts any
//! size class up to the target width and rejects a wider one outright,
//! rather than silently truncating.

use byteorder::{ByteOrder, LittleEndian};

use crate::error::{Error, ErrorKind};
use crate::grammar::prefix;
use crate::io::{Reader, Writer};

/// Writes `value` using the narrowest unsigned size class that holds it:
/// a `PosFixInt` prefix byte for 0..=0x7F, otherwise a size-class prefix
/// followed by that many little-endian bytes.
pub fn write_unsigned(writer: &mut dyn Writer, value: u64) -> Result<(), Error> {
	if value <= 0x7F {
		writer.prepare(1)?;
		return writer.write_prefix(value as u8);
	}
	if value <= u8::MAX as u64 {
		writer.prepare(2)?;
		writer.write_prefix(prefix::U8)?;
		writer.write_raw(&[value as u8])
	} else if value <= u16::MAX as u64 {
		writer.prepare(3)?;
		writer.write_prefix(prefix::U16)?;
		let mut buf = [0u8; 2];
		LittleEndian::write_u16(&mut buf, value as u16);
		writer.write_raw(&buf)
	} else if value <= u32::MAX as u64 {
		writer.prepare(5)?;
		writer.write_prefix(prefix::U32)?;
		let mut buf = [0u8; 4];
		LittleEndian::write_u32(&mut buf, value as u32);
		writer.write_raw(&buf)
	} else {
		writer.prepare(9)?;
		writer.write_prefix(prefix::U64)?;
		let mut buf = [0u8; 8];
		LittleEndian::write_u64(&mut buf, value);
		writer.write_raw(&buf)
	}
}

/// Reads a value written by [`write_unsigned`], accepting any size class
/// that fits in a `u64`.
pub fn read_unsigned(reader: &mut dyn Reader) -> Result<u64, Error> {
	let p = reader.read_prefix()?;
	if prefix::is_pos_fixint(p) {
		return Ok(p as u64);
	}
	match p {
		prefix::U8 => {
			let mut buf = [0u8; 1];
			reader.read_raw(&mut buf)?;
			Ok(buf[0] as u64)
		}
		prefix::U16 => {
			let mut buf = [0u8; 2];
			reader.read_raw(&mut buf)?;
			Ok(LittleEndian::read_u16(&buf) as u64)
		}
		prefix::U32 => {
			let mut buf = [0u8; 4];
			reader.read_raw(&mut buf)?;
			Ok(LittleEndian::read_u32(&buf) as u64)
		}
		prefix::U64 => {
			let mut buf = [0u8; 8];
			reader.read_raw(&mut buf)?;
			Ok(LittleEndian::read_u64(&buf))
		}
		other => Err(ErrorKind::UnexpectedEncodingType(other).into()),
	}
}

/// Writes an unsigned value, rejecting it with `InvalidIntegerClass` if no
/// size class up to `max_bytes` bytes can represent it. Used where the
/// target type narrower than `u64` must reject a value too wide for it.
pub fn write_unsigned_sized(writer: &mut dyn Writer, value: u64, max_bytes: u32) -> Result<(), Error> {
	let bound: u64 = if max_bytes >= 8 {
		u64::MAX
	} else {
		(1u64 << (max_bytes * 8)) - 1
	};
	if value > bound {
		return Err(ErrorKind::InvalidIntegerClass.into());
	}
	write_unsigned(writer, value)
}

/// Reads an unsigned value, rejecting a size class wider than
/// `max_bytes` bytes with `InvalidIntegerClass` rather than truncating.
pub fn read_unsigned_sized(reader: &mut dyn Reader, max_bytes: u32) -> Result<u64, Error> {
	let p = reader.read_prefix()?;
	if prefix::is_pos_fixint(p) {
		return Ok(p as u64);
	}
	let class_bytes: u32 = match p {
		prefix::U8 => 1,
		prefix::U16 => 2,
		prefix::U32 => 4,
		prefix::U64 => 8,
		other => return Err(ErrorKind::UnexpectedEncodingType(other).into()),
	};
	if class_bytes > max_bytes {
		return Err(ErrorKind::InvalidIntegerClass.into());
	}
	match class_bytes {
		1 => {
			let mut buf = [0u8; 1];
			reader.read_raw(&mut buf)?;
			Ok(buf[0] as u64)
		}
		2 => {
			let mut buf = [0u8; 2];
			reader.read_raw(&mut buf)?;
			Ok(LittleEndian::read_u16(&buf) as u64)
		}
		4 => {
			let mut buf = [0u8; 4];
			reader.read_raw(&mut buf)?;
			Ok(LittleEndian::read_u32(&buf) as u64)
		}
		_ => {
			let mut buf = [0u8; 8];
			reader.read_raw(&mut buf)?;
			Ok(LittleEndian::read_u64(&buf))
		}
	}
}

/// ZigZag-free signed counterpart of [`write_unsigned`]: a `NegFixInt`
/// prefix for -32..=-1, a `PosFixInt` prefix for 0..=0x7F, otherwise a
/// size-class prefix followed by that many little-endian two's
/// complement bytes.
pub fn write_signed(writer: &mut dyn Writer, value: i64) -> Result<(), Error> {
	if (0..=0x7F).contains(&value) {
		writer.prepare(1)?;
		return writer.write_prefix(value as u8);
	}
	if (-32..0).contains(&value) {
		writer.prepare(1)?;
		return writer.write_prefix((value as i8) as u8);
	}
	if value >= i8::MIN as i64 && value <= i8::MAX as i64 {
		writer.prepare(2)?;
		writer.write_prefix(prefix::I8)?;
		writer.write_raw(&[(value as i8) as u8])
	} else if value >= i16::MIN as i64 && value <= i16::MAX as i64 {
		writer.prepare(3)?;
		writer.write_prefix(prefix::I16)?;
		let mut buf = [0u8; 2];
		LittleEndian::write_i16(&mut buf, value as i16);
		writer.write_raw(&buf)
	} else if value >= i32::MIN as i64 && value <= i32::MAX as i64 {
		writer.prepare(5)?;
		writer.write_prefix(prefix::I32)?;
		let mut buf = [0u8; 4];
		LittleEndian::write_i32(&mut buf, value as i32);
		writer.write_raw(&buf)
	} else {
		writer.prepare(9)?;
		writer.write_prefix(prefix::I64)?;
		let mut buf = [0u8; 8];
		LittleEndian::write_i64(&mut buf, value);
		writer.write_raw(&buf)
	}
}

/// Reads a value written by [`write_signed`].
pub fn read_signed(reader: &mut dyn Reader) -> Result<i64, Error> {
	let p = reader.read_prefix()?;
	if prefix::is_pos_fixint(p) {
		return Ok(p as i64);
	}
	if prefix::is_neg_fixint(p) {
		return Ok((p as i8) as i64);
	}
	match p {
		prefix::I8 => {
			let mut buf = [0u8; 1];
			reader.read_raw(&mut buf)?;
			Ok((buf[0] as i8) as i64)
		}
		prefix::I16 => {
			let mut buf = [0u8; 2];
			reader.read_raw(&mut buf)?;
			Ok(LittleEndian::read_i16(&buf) as i64)
		}
		prefix::I32 => {
			let mut buf = [0u8; 4];
			reader.read_raw(&mut buf)?;
			Ok(LittleEndian::read_i32(&buf) as i64)
		}
		prefix::I64 => {
			let mut buf = [0u8; 8];
			reader.read_raw(&mut buf)?;
			Ok(LittleEndian::read_i64(&buf))
		}
		other => Err(ErrorKind::UnexpectedEncodingType(other).into()),
	}
}

/// Reads a value written by [`write_signed`], rejecting a size class wider
/// than `max_bytes` bytes with `InvalidIntegerClass` rather than accepting
/// any class whose decoded value happens to fit the narrower target.
pub fn read_signed_sized(reader: &mut dyn Reader, max_bytes: u32) -> Result<i64, Error> {
	let p = reader.read_prefix()?;
	if prefix::is_pos_fixint(p) {
		return Ok(p as i64);
	}
	if prefix::is_neg_fixint(p) {
		return Ok((p as i8) as i64);
	}
	let class_bytes: u32 = match p {
		prefix::I8 => 1,
		prefix::I16 => 2,
		prefix::I32 => 4,
		prefix::I64 => 8,
		other => return Err(ErrorKind::UnexpectedEncodingType(other).into()),
	};
	if class_bytes > max_bytes {
		return Err(ErrorKind::InvalidIntegerClass.into());
	}
	match class_bytes {
		1 => {
			let mut buf = [0u8; 1];
			reader.read_raw(&mut buf)?;
			Ok((buf[0] as i8) as i64)
		}
		2 => {
			let mut buf = [0u8; 2];
			reader.read_raw(&mut buf)?;
			Ok(LittleEndian::read_i16(&buf) as i64)
		}
		4 => {
			let mut buf = [0u8; 4];
			reader.read_raw(&mut buf)?;
			Ok(LittleEndian::read_i32(&buf) as i64)
		}
		_ => {
			let mut buf = [0u8; 8];
			reader.read_raw(&mut buf)?;
			Ok(LittleEndian::read_i64(&buf))
		}
	}
}

#[cfg(test)]
mod test {
	use super::*;
	use crate::io::{StdReader, StdWriter};

	fn roundtrip_unsigned(value: u64) -> u64 {
		let mut buf = Vec::new();
		{
			let mut w = StdWriter::new(&mut buf);
			write_unsigned(&mut w, value).unwrap();
		}
		let mut r = StdReader::new(&buf[..]);
		read_unsigned(&mut r).unwrap()
	}

	#[test]
	fn compacts_300_to_u16_class() {
		let mut buf = Vec::new();
		{
			let mut w = StdWriter::new(&mut buf);
			write_unsigned(&mut w, 300).unwrap();
		}
		assert_eq!(buf, vec![prefix::U16, 0x2C, 0x01]);
	}

	#[test]
	fn unsigned_roundtrips_across_classes() {
		for v in [0u64, 1, 0x7F, 0x80, 0xFF, 0x100, 0xFFFF, 0x1_0000, u32::MAX as u64, u64::MAX] {
			assert_eq!(roundtrip_unsigned(v), v);
		}
	}

	#[test]
	fn signed_roundtrips_negative_fixint() {
		let mut buf = Vec::new();
		{
			let mut w = StdWriter::new(&mut buf);
			write_signed(&mut w, -1).unwrap();
		}
		let mut r = StdReader::new(&buf[..]);
		assert_eq!(read_signed(&mut r).unwrap(), -1);
	}

	#[test]
	fn sized_read_rejects_wider_class() {
		let mut buf = Vec::new();
		{
			let mut w = StdWriter::new(&mut buf);
			write_unsigned(&mut w, 0x1_0000).unwrap();
		}
		let mut r = StdReader::new(&buf[..]);
		let err = read_unsigned_sized(&mut r, 2).unwrap_err();
		assert_eq!(err.kind(), ErrorKind::InvalidIntegerClass);
	}

	#[test]
	fn signed_sized_read_rejects_wider_class() {
		let mut buf = Vec::new();
		{
			let mut w = StdWriter::new(&mut buf);
			write_signed(&mut w, 70_000).unwrap();
		}
		let mut r = StdReader::new(&buf[..]);
		let err = read_signed_sized(&mut r, 2).unwrap_err();
		assert_eq!(err.kind(), ErrorKind::InvalidIntegerClass);
	}

	#[test]
	fn signed_sized_read_rejects_narrow_value_in_wider_class() {
		// A hand-crafted I32 class carrying a value that would fit in
		// an i8 must still be rejected on class width, not accepted
		// because the decoded value happens to be in range.
		let mut buf = Vec::new();
		{
			let mut w = StdWriter::new(&mut buf);
			w.write_prefix(prefix::I32).unwrap();
			w.write_raw(&5i32.to_le_bytes()).unwrap();
		}
		let mut r = StdReader::new(&buf[..]);
		let err = read_signed_sized(&mut r, 1).unwrap_err();
		assert_eq!(err.kind(), ErrorKind::InvalidIntegerClass);
	}

	#[test]
	fn unsigned_roundtrips_across_random_values() {
		use rand::Rng;
		let mut rng = rand::thread_rng();
		for _ in 0..256 {
			let value: u64 = rng.gen();
			assert_eq!(roundtrip_unsigned(value), value);
		}
	}

	#[test]
	fn signed_roundtrips_across_random_values() {
		use rand::Rng;
		let mut rng = rand::thread_rng();
		for _ in 0..256 {
			let value: i64 = rng.gen();
			let mut buf = Vec::new();
			{
				let mut w = StdWriter::new(&mut buf);
				write_signed(&mut w, value).unwrap();
			}
			let mut r = StdReader::new(&buf[..]);
			assert_eq!(read_signed(&mut r).unwrap(), value);
		}
	}
}
