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

//! Selector-keyed dispatch: the table a [`MethodReceiver`](crate::rpc::server::MethodReceiver)
//! consults to route an incoming request's selector to the handler
//! registered for it.

use std::collections::HashMap;

use crate::error::{Error, ErrorKind};
use crate::io::{BoundedReader, Writer};

/// A registered method handler: reads its argument from the bounded
/// request body and writes its result to the response body.
pub type Handler = Box<dyn for<'a> Fn(&mut BoundedReader<'a>, &mut dyn Writer) -> Result<(), Error> + Send + Sync>;

/// A selector to handler table.
#[derive(Default)]
pub struct Dispatcher {
	handlers: HashMap<u64, Handler>,
}

impl Dispatcher {
	/// An empty dispatcher.
	pub fn new() -> Self {
		Dispatcher {
			handlers: HashMap::new(),
		}
	}

	/// Registers `handler` under `selector`. Rejects a second
	/// registration for the same selector rather than silently
	/// overwriting the first.
	pub fn register(&mut self, selector: u64, handler: Handler) -> Result<(), Error> {
		if self.handlers.contains_key(&selector) {
			return Err(ErrorKind::DuplicateMethodHash(selector).into());
		}
		self.handlers.insert(selector, handler);
		Ok(())
	}

	/// Dispatches a request body to the handler registered for
	/// `selector`.
	pub fn dispatch(&self, selector: u64, body: &mut BoundedReader<'_>, response: &mut dyn Writer) -> Result<(), Error> {
		match self.handlers.get(&selector) {
			Some(handler) => handler(body, response),
			None => Err(ErrorKind::InvalidInterfaceMethod(selector).into()),
		}
	}
}

#[cfg(test)]
mod test {
	use super::*;
	use crate::codec::{Readable, Writeable};
	use crate::io::{StdReader, StdWriter};

	#[test]
	fn dispatches_to_registered_handler() {
		let mut dispatcher = Dispatcher::new();
		dispatcher
			.register(
				7,
				Box::new(|body, response| {
					let n: u32 = Readable::read(body)?;
					Writeable::write(&(n + 1), response)
				}),
			)
			.unwrap();

		let mut request_bytes = Vec::new();
		{
			let mut w = StdWriter::new(&mut request_bytes);
			41u32.write(&mut w).unwrap();
		}
		let mut request_reader = StdReader::new(&request_bytes[..]);
		let mut bounded = BoundedReader::new(&mut request_reader, request_bytes.len() as u64);

		let mut response_bytes = Vec::new();
		{
			let mut w = StdWriter::new(&mut response_bytes);
			dispatcher.dispatch(7, &mut bounded, &mut w).unwrap();
		}
		let mut response_reader = StdReader::new(&response_bytes[..]);
		let out: u32 = Readable::read(&mut response_reader).unwrap();
		assert_eq!(out, 42);
	}

	#[test]
	fn unregistered_selector_is_rejected() {
		let dispatcher = Dispatcher::new();
		let mut request_reader = StdReader::new(&[][..]);
		let mut bounded = BoundedReader::new(&mut request_reader, 0);
		let mut response_bytes = Vec::new();
		let mut w = StdWriter::new(&mut response_bytes);
		let err = dispatcher.dispatch(99, &mut bounded, &mut w).unwrap_err();
		assert_eq!(err.kind(), ErrorKind::InvalidInterfaceMethod(99));
	}
}
