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

//! Request/response framing: a fixed-width selector (requests only)
//! followed by a byte length and that many bytes of body, so a handler
//! reads its argument through a [`BoundedReader`] and can never run past
//! its own frame into whatever follows it on the stream.

use byteorder::{ByteOrder, LittleEndian};

use crate::codec::{Readable, Writeable};
use crate::error::Error;
use crate::grammar;
use crate::io::{BoundedReader, Reader, StdWriter, Writer};
use crate::nop_structure;

/// A dispatch failure reported back to the caller, carrying enough of
/// the server-side [`ErrorKind`](crate::error::ErrorKind) to be useful
/// without exposing its full, implementation-specific shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RpcFault {
	/// The selector that was being dispatched when the failure occurred.
	pub selector: u64,
	/// A human-readable description of the failure.
	pub message: String,
}

nop_structure!(RpcFault, selector, message);

/// Writes a request frame: the method selector as 8 raw little-endian
/// bytes, then the body's byte length, then the body itself.
pub fn write_request_frame<F>(writer: &mut dyn Writer, selector: u64, body: F) -> Result<(), Error>
where
	F: FnOnce(&mut dyn Writer) -> Result<(), Error>,
{
	let mut buf = Vec::new();
	{
		let mut body_writer = StdWriter::new(&mut buf);
		body(&mut body_writer)?;
	}
	let mut selector_buf = [0u8; 8];
	LittleEndian::write_u64(&mut selector_buf, selector);
	writer.prepare(8 + buf.len() as u64)?;
	writer.write_raw(&selector_buf)?;
	grammar::write_container_length(writer, buf.len() as u64)?;
	writer.write_raw(&buf)
}

/// Reads a request frame's header, returning the selector and the
/// body's byte length. The caller wraps `reader` in a [`BoundedReader`]
/// scoped to that length to read the body.
pub fn read_request_header(reader: &mut dyn Reader) -> Result<(u64, u64), Error> {
	let mut selector_buf = [0u8; 8];
	reader.read_raw(&mut selector_buf)?;
	let selector = LittleEndian::read_u64(&selector_buf);
	let len = grammar::read_container_length(reader)?;
	Ok((selector, len))
}

/// Writes a response frame: no selector, just a byte length and the
/// body — a [`crate::variant::NopResult`] of [`RpcFault`] or the
/// method's declared response type.
pub fn write_response_frame<F>(writer: &mut dyn Writer, body: F) -> Result<(), Error>
where
	F: FnOnce(&mut dyn Writer) -> Result<(), Error>,
{
	let mut buf = Vec::new();
	{
		let mut body_writer = StdWriter::new(&mut buf);
		body(&mut body_writer)?;
	}
	writer.prepare(buf.len() as u64)?;
	grammar::write_container_length(writer, buf.len() as u64)?;
	writer.write_raw(&buf)
}

/// Reads a response frame's header, returning the body's byte length.
pub fn read_response_header(reader: &mut dyn Reader) -> Result<u64, Error> {
	grammar::read_container_length(reader)
}

/// Reads `T` from exactly `len` bytes of `reader`, then discards any
/// bytes of the frame `T::read` did not itself consume.
pub fn read_bounded_body<T: Readable>(reader: &mut dyn Reader, len: u64) -> Result<T, Error> {
	let mut bounded = BoundedReader::new(reader, len);
	let value = T::read(&mut bounded)?;
	bounded.read_padding()?;
	Ok(value)
}

#[cfg(test)]
mod test {
	use super::*;
	use crate::io::StdReader;

	#[test]
	fn request_frame_roundtrips_selector_and_body() {
		let mut buf = Vec::new();
		{
			let mut w = StdWriter::new(&mut buf);
			write_request_frame(&mut w, 0xDEAD_BEEF_u64, |w| 42u32.write(w)).unwrap();
		}
		let mut r = StdReader::new(&buf[..]);
		let (selector, len) = read_request_header(&mut r).unwrap();
		assert_eq!(selector, 0xDEAD_BEEF_u64);
		let value: u32 = read_bounded_body(&mut r, len).unwrap();
		assert_eq!(value, 42);
	}
}
