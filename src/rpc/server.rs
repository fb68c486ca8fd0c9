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

//! `MethodReceiver`: the callee side of a duplex RPC connection. Reads
//! one request frame at a time, dispatches it, and writes back a
//! response frame.

use crate::codec::Writeable;
use crate::error::Error;
use crate::io::{BoundedReader, Reader, Writer};
use crate::rpc::dispatch::Dispatcher;
use crate::rpc::frame::{read_request_header, write_response_frame, RpcFault};
use crate::variant::NopResult;

/// Serves requests off a paired `Reader`/`Writer` against a fixed
/// [`Dispatcher`].
pub struct MethodReceiver<'a> {
	reader: &'a mut dyn Reader,
	writer: &'a mut dyn Writer,
	dispatcher: &'a Dispatcher,
}

impl<'a> MethodReceiver<'a> {
	/// Wraps a duplex connection and the dispatcher to serve it against.
	pub fn new(reader: &'a mut dyn Reader, writer: &'a mut dyn Writer, dispatcher: &'a Dispatcher) -> Self {
		MethodReceiver { reader, writer, dispatcher }
	}

	/// Reads one request frame, dispatches it, and writes the response
	/// frame. A handler failure is reported back to the caller as an
	/// [`RpcFault`] rather than propagated — only a failure to read or
	/// write the frames themselves is returned here.
	pub fn serve_one(&mut self) -> Result<(), Error> {
		let (selector, len) = read_request_header(self.reader)?;
		trace!("dispatching selector {:#018x}, {} byte payload", selector, len);
		let mut body = BoundedReader::new(self.reader, len);

		let mut result_bytes = Vec::new();
		let outcome = {
			let mut result_writer = crate::io::StdWriter::new(&mut result_bytes);
			self.dispatcher.dispatch(selector, &mut body, &mut result_writer)
		};
		body.read_padding()?;

		match outcome {
			Ok(()) => write_response_frame(self.writer, |w| {
				w.prepare(result_bytes.len() as u64)?;
				crate::grammar::write_variant_index(w, 1)?;
				w.write_raw(&result_bytes)
			}),
			Err(error) => {
				warn!("selector {:#018x} failed: {}", selector, error);
				let fault = RpcFault {
					selector,
					message: error.to_string(),
				};
				write_response_frame(self.writer, |w| {
					let failed: NopResult<RpcFault, ()> = NopResult::Err(fault.clone());
					match failed {
						NopResult::Err(f) => {
							crate::grammar::write_variant_index(w, 0)?;
							f.write(w)
						}
						NopResult::Ok(_) => unreachable!(),
					}
				})
			}
		}
	}
}
