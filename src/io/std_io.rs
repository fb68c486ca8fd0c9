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

//! `Reader`/`Writer` implementations over any `std::io::Read`/`Write`,
//! the generalization of `grin_core::ser`'s `BinReader`/`BinWriter`.

use std::io::{Read, Write};

use super::{Reader, Writer};
use crate::error::Error;
use crate::handle::{HandleReference, HandleTable};

/// Wraps a `std::io::Read` as a [`Reader`], with its own out-of-band
/// handle table.
pub struct StdReader<R> {
	source: R,
	handles: HandleTable,
}

impl<R: Read> StdReader<R> {
	/// Wraps `source`, starting with an empty handle table.
	pub fn new(source: R) -> Self {
		StdReader {
			source,
			handles: HandleTable::new(),
		}
	}

	/// Gives the caller a side channel to populate the handle table before
	/// reading values that carry handles (the out-of-band transport's
	/// responsibility in a real implementation).
	pub fn handles_mut(&mut self) -> &mut HandleTable {
		&mut self.handles
	}

	/// Unwraps back to the underlying reader.
	pub fn into_inner(self) -> R {
		self.source
	}
}

impl<R: Read> Reader for StdReader<R> {
	fn ensure(&mut self, _n: u64) -> Result<(), Error> {
		// A plain std::io::Read cannot peek ahead without consuming; the
		// bound is enforced by BoundedReader instead. Unbounded streams
		// defer the check to the actual read and surface end-of-stream as
		// an IoError.
		Ok(())
	}

	fn read_prefix(&mut self) -> Result<u8, Error> {
		let mut buf = [0u8; 1];
		self.source.read_exact(&mut buf)?;
		Ok(buf[0])
	}

	fn read_raw(&mut self, buf: &mut [u8]) -> Result<(), Error> {
		self.source.read_exact(buf)?;
		Ok(())
	}

	fn skip(&mut self, n: u64) -> Result<(), Error> {
		let mut remaining = n;
		let mut scratch = [0u8; 256];
		while remaining > 0 {
			let take = remaining.min(scratch.len() as u64) as usize;
			self.source.read_exact(&mut scratch[..take])?;
			remaining -= take as u64;
		}
		Ok(())
	}

	fn get_handle(&mut self, reference: HandleReference) -> Result<u32, Error> {
		self.handles.get(reference)
	}
}

/// Wraps a `std::io::Write` as a [`Writer`], with its own out-of-band
/// handle table.
pub struct StdWriter<W> {
	sink: W,
	handles: HandleTable,
}

impl<W: Write> StdWriter<W> {
	/// Wraps `sink`, starting with an empty handle table.
	pub fn new(sink: W) -> Self {
		StdWriter {
			sink,
			handles: HandleTable::new(),
		}
	}

	/// Hands back the handle table a paired reader resolves handle
	/// references against (the out-of-band transport's responsibility in
	/// a real implementation).
	pub fn handles(&self) -> &HandleTable {
		&self.handles
	}

	/// Unwraps back to the underlying writer.
	pub fn into_inner(self) -> W {
		self.sink
	}
}

impl<W: Write> Writer for StdWriter<W> {
	fn prepare(&mut self, _n: u64) -> Result<(), Error> {
		Ok(())
	}

	fn write_prefix(&mut self, b: u8) -> Result<(), Error> {
		self.sink.write_all(&[b])?;
		Ok(())
	}

	fn write_raw(&mut self, buf: &[u8]) -> Result<(), Error> {
		self.sink.write_all(buf)?;
		Ok(())
	}

	fn write_pad(&mut self, n: u64) -> Result<(), Error> {
		const ZEROS: [u8; 256] = [0u8; 256];
		let mut remaining = n;
		while remaining > 0 {
			let take = remaining.min(ZEROS.len() as u64) as usize;
			self.sink.write_all(&ZEROS[..take])?;
			remaining -= take as u64;
		}
		Ok(())
	}

	fn push_handle(&mut self, handle: u32) -> Result<HandleReference, Error> {
		Ok(self.handles.push(handle))
	}
}
