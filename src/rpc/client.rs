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

//! `MethodSender`: the caller side of a duplex RPC connection. Writes a
//! request frame and blocks for the matching response frame.

use crate::codec::{Readable, Writeable};
use crate::error::{Error, ErrorKind};
use crate::io::{Reader, Writer};
use crate::rpc::frame::{read_bounded_body, read_response_header, write_request_frame, RpcFault};
use crate::variant::NopResult;

/// Sends requests over a paired `Reader`/`Writer` and waits for each
/// response in turn. Calls are not pipelined: a second call must wait
/// for the first response before writing its request.
pub struct MethodSender<'a> {
	reader: &'a mut dyn Reader,
	writer: &'a mut dyn Writer,
}

impl<'a> MethodSender<'a> {
	/// Wraps a duplex connection.
	pub fn new(reader: &'a mut dyn Reader, writer: &'a mut dyn Writer) -> Self {
		MethodSender { reader, writer }
	}

	/// Calls the method identified by `selector` with `request`, blocking
	/// for the response and unwrapping an [`RpcFault`] into `Err`.
	pub fn call<Req: Writeable, Resp: Readable>(&mut self, selector: u64, request: &Req) -> Result<Resp, Error> {
		write_request_frame(self.writer, selector, |w| request.write(w))?;

		let len = read_response_header(self.reader)?;
		let result: NopResult<RpcFault, Resp> = read_bounded_body(self.reader, len)?;
		match result {
			NopResult::Ok(value) => Ok(value),
			NopResult::Err(fault) => Err(ErrorKind::InvalidInterfaceMethod(fault.selector).into()),
		}
	}
}
