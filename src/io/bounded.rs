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

//! A fixed-budget sub-stream over an existing [`Reader`], the piece that
//! lets request/response framing hand a handler a reader that simply runs
//! out when the framed payload is exhausted, without access to the bytes
//! that follow it.

use super::Reader;
use crate::error::{Error, ErrorKind};
use crate::handle::HandleReference;

/// Wraps a `Reader` and enforces that no more than `capacity` bytes are
/// ever consumed through it. A request that would exceed the remaining
/// budget fails with [`ErrorKind::NoBuffer`] and leaves the inner reader
/// untouched — no partial read occurs on overflow.
pub struct BoundedReader<'a> {
	inner: &'a mut dyn Reader,
	capacity: u64,
	index: u64,
}

impl<'a> BoundedReader<'a> {
	/// Scopes `inner` to exactly `capacity` bytes from its current
	/// position.
	pub fn new(inner: &'a mut dyn Reader, capacity: u64) -> Self {
		BoundedReader {
			inner,
			capacity,
			index: 0,
		}
	}

	/// Bytes consumed through this bound so far.
	pub fn position(&self) -> u64 {
		self.index
	}

	/// Bytes left in the budget.
	pub fn remaining(&self) -> u64 {
		self.capacity - self.index
	}

	fn charge(&mut self, n: u64) -> Result<(), Error> {
		if n > self.remaining() {
			debug!("bound overrun: requested {} bytes, {} remaining", n, self.remaining());
			return Err(ErrorKind::NoBuffer {
				requested: n,
				remaining: self.remaining(),
			}
			.into());
		}
		self.index += n;
		Ok(())
	}

	/// Discards whatever is left of the budget, e.g. a structure whose
	/// declared member count a handler read fewer members than it wrote.
	pub fn read_padding(&mut self) -> Result<(), Error> {
		let left = self.remaining();
		self.skip(left)
	}
}

impl<'a> Reader for BoundedReader<'a> {
	fn ensure(&mut self, n: u64) -> Result<(), Error> {
		if n > self.remaining() {
			return Err(ErrorKind::NoBuffer {
				requested: n,
				remaining: self.remaining(),
			}
			.into());
		}
		self.inner.ensure(n)
	}

	fn read_prefix(&mut self) -> Result<u8, Error> {
		self.charge(1)?;
		self.inner.read_prefix()
	}

	fn read_raw(&mut self, buf: &mut [u8]) -> Result<(), Error> {
		self.charge(buf.len() as u64)?;
		self.inner.read_raw(buf)
	}

	fn skip(&mut self, n: u64) -> Result<(), Error> {
		self.charge(n)?;
		self.inner.skip(n)
	}

	fn get_handle(&mut self, reference: HandleReference) -> Result<u32, Error> {
		self.inner.get_handle(reference)
	}
}

#[cfg(test)]
mod test {
	use super::*;
	use crate::io::StdReader;

	#[test]
	fn charges_budget_and_rejects_overflow() {
		let bytes = [1u8, 2, 3, 4, 5, 6];
		let mut base = StdReader::new(&bytes[..]);
		let mut bounded = BoundedReader::new(&mut base, 4);

		let mut buf = [0u8; 2];
		bounded.read_raw(&mut buf).unwrap();
		assert_eq!(buf, [1, 2]);
		assert_eq!(bounded.remaining(), 2);

		let mut buf2 = [0u8; 4];
		let err = bounded.read_raw(&mut buf2).unwrap_err();
		match err.kind() {
			crate::error::ErrorKind::NoBuffer { requested, remaining } => {
				assert_eq!(requested, 4);
				assert_eq!(remaining, 2);
			}
			other => panic!("unexpected kind: {:?}", other),
		}
		// overflowing attempt must not have consumed anything
		assert_eq!(bounded.remaining(), 2);

		bounded.read_padding().unwrap();
		assert_eq!(bounded.remaining(), 0);
	}
}
