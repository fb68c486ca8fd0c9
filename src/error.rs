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

//! The closed error taxonomy every codec and RPC operation surfaces.

use failure::{Backtrace, Context, Fail};
use std::fmt::{self, Display};
use std::io;

/// A codec or dispatch failure, wrapping a cloneable [`ErrorKind`].
#[derive(Debug)]
pub struct Error {
	inner: Context<ErrorKind>,
}

/// The closed set of ways a read, write or dispatch can fail.
#[derive(Clone, Debug, Eq, Fail, PartialEq)]
pub enum ErrorKind {
	/// The underlying `Read`/`Write` implementation failed.
	#[fail(display = "io error")]
	IoError,
	/// A `BoundedReader` op would consume more than its remaining budget.
	#[fail(display = "no buffer: requested {} bytes, {} remaining", requested, remaining)]
	NoBuffer {
		/// Bytes the operation asked for.
		requested: u64,
		/// Bytes left in the budget.
		remaining: u64,
	},
	/// The prefix byte read did not match any alternative offered to the
	/// codec dispatch.
	#[fail(display = "unexpected encoding type: prefix byte {:#04x}", _0)]
	UnexpectedEncodingType(u8),
	/// An integer size class wider than the target type was read.
	#[fail(display = "invalid integer class")]
	InvalidIntegerClass,
	/// A declared container length exceeds its capacity, or is malformed.
	#[fail(display = "invalid container length: {}", _0)]
	InvalidContainerLength(u64),
	/// A structure's member count does not match its declaration.
	#[fail(display = "invalid member count: expected {}, found {}", expected, found)]
	InvalidMemberCount {
		/// Member count fixed by the structure's declaration.
		expected: u64,
		/// Member count actually read off the wire.
		found: u64,
	},
	/// An RPC dispatcher received a selector with no bound handler.
	#[fail(display = "invalid interface method: selector {:#018x}", _0)]
	InvalidInterfaceMethod(u64),
	/// Two methods in one interface collided on their SipHash selector.
	#[fail(display = "duplicate method hash: selector {:#018x}", _0)]
	DuplicateMethodHash(u64),
	/// Transport setup failed (pipes, sockets, handle tables).
	#[fail(display = "system error: {}", _0)]
	SystemError(String),
	/// A nested value exceeded the recursion depth guard.
	#[fail(display = "recursion limit exceeded")]
	RecursionLimit,
}

impl Fail for Error {
	fn cause(&self) -> Option<&dyn Fail> {
		self.inner.cause()
	}

	fn backtrace(&self) -> Option<&Backtrace> {
		self.inner.backtrace()
	}
}

impl Display for Error {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		Display::fmt(&self.inner, f)
	}
}

impl Error {
	/// The kind of failure this error carries.
	pub fn kind(&self) -> ErrorKind {
		self.inner.get_context().clone()
	}
}

impl From<ErrorKind> for Error {
	fn from(kind: ErrorKind) -> Error {
		Error {
			inner: Context::new(kind),
		}
	}
}

impl From<Context<ErrorKind>> for Error {
	fn from(inner: Context<ErrorKind>) -> Error {
		Error { inner }
	}
}

impl From<io::Error> for Error {
	fn from(_error: io::Error) -> Error {
		Error {
			inner: Context::new(ErrorKind::IoError),
		}
	}
}
