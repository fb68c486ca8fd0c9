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

//! The out-of-band handle channel. OS handles (file descriptors, sockets,
//! kernel objects) are not byte-serializable: a `Writer` pushes one to a
//! side table and emits the returned reference inline; the paired `Reader`
//! resolves the reference back through its own side table.
//!
//! The real handle-passing transport is an external collaborator (out of
//! scope per the crate's purpose); [`HandleTable`] is the in-process stub
//! the spec explicitly allows implementations without OS handle passing to
//! use instead. It represents a handle as an opaque `u32` — any wider
//! concept (a `RawFd`, a socket) is the embedder's to define and hand in.

use crate::error::{Error, ErrorKind};

/// An integer index into an out-of-band handle table, meaningful only to
/// the `Reader` that produced it. The reference width is transport
/// defined; this crate picks 32 bits when nothing else constrains it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HandleReference(pub u32);

/// An in-process stand-in for the handle-passing transport: a flat vector
/// of opaque handle values, indexed by [`HandleReference`].
///
/// The codec never duplicates or reference-counts the handles it carries;
/// ownership is whichever side most recently pushed or got one.
#[derive(Debug, Default)]
pub struct HandleTable {
	handles: Vec<u32>,
}

impl HandleTable {
	/// An empty handle table.
	pub fn new() -> Self {
		HandleTable { handles: Vec::new() }
	}

	/// Pushes a handle, returning the reference a `Writer` should emit
	/// inline in the byte stream.
	pub fn push(&mut self, handle: u32) -> HandleReference {
		let reference = HandleReference(self.handles.len() as u32);
		self.handles.push(handle);
		reference
	}

	/// Resolves a reference a `Reader` consumed from the byte stream back
	/// to the handle a paired `HandleTable::push` produced.
	pub fn get(&self, reference: HandleReference) -> Result<u32, Error> {
		self.handles
			.get(reference.0 as usize)
			.copied()
			.ok_or_else(|| ErrorKind::SystemError(format!("no handle at reference {}", reference.0)).into())
	}
}
