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

//! Byte-stream abstractions the codec is built on: a pull `Reader`, a push
//! `Writer`, and a `BoundedReader` that scopes either to a fixed budget.
//!
//! These mirror `grin_core::ser`'s `Reader`/`Writer`/`BinReader`/`BinWriter`
//! split, generalized from fixed-width numeric accessors to the minimal
//! primitive operations the encoding grammar is built from (prefix byte,
//! raw byte range, skip, handle reference).

mod bounded;
mod std_io;

pub use self::bounded::BoundedReader;
pub use self::std_io::{StdReader, StdWriter};

use crate::error::Error;
use crate::handle::HandleReference;

/// A pull interface producing bytes in order. No seek, no restart.
pub trait Reader {
	/// Asserts that `n` bytes are available without consuming them.
	fn ensure(&mut self, n: u64) -> Result<(), Error>;
	/// Consumes and returns one prefix byte.
	fn read_prefix(&mut self) -> Result<u8, Error>;
	/// Consumes exactly `buf.len()` bytes into `buf`.
	fn read_raw(&mut self, buf: &mut [u8]) -> Result<(), Error>;
	/// Consumes and discards `n` bytes.
	fn skip(&mut self, n: u64) -> Result<(), Error>;
	/// Fetches an out-of-band handle by its wire reference.
	fn get_handle(&mut self, reference: HandleReference) -> Result<u32, Error>;
}

/// Dual of [`Reader`]: a push interface consuming bytes in order.
pub trait Writer {
	/// Hints that `n` more bytes are about to be written.
	fn prepare(&mut self, n: u64) -> Result<(), Error>;
	/// Writes one prefix byte.
	fn write_prefix(&mut self, b: u8) -> Result<(), Error>;
	/// Writes `buf` verbatim.
	fn write_raw(&mut self, buf: &[u8]) -> Result<(), Error>;
	/// Writes `n` zero pad bytes.
	fn write_pad(&mut self, n: u64) -> Result<(), Error>;
	/// Pushes a handle to the out-of-band side table, returning its wire
	/// reference.
	fn push_handle(&mut self, handle: u32) -> Result<HandleReference, Error>;
}
