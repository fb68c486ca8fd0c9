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

use nop::codec::{Readable, Writeable};
use nop::io::{BoundedReader, StdReader, StdWriter};
use nop::rpc::frame::{read_bounded_body, read_request_header, read_response_header, write_request_frame, write_response_frame, RpcFault};
use nop::rpc::{method_selector, Dispatcher, Interface};
use nop::variant::NopResult;

#[test]
fn a_full_call_dispatches_and_decodes_its_response() {
	let interface = Interface::new("nop.Calculator", &["Add"]).unwrap();
	let selector = interface.method("Add").unwrap().selector;
	assert_eq!(selector, method_selector("nop.Calculator", "Add"));

	let mut dispatcher = Dispatcher::new();
	dispatcher
		.register(
			selector,
			Box::new(|body, response| {
				let (a, b): (u32, u32) = (Readable::read(body)?, Readable::read(body)?);
				Writeable::write(&(a + b), response)
			}),
		)
		.unwrap();

	let mut request_wire = Vec::new();
	{
		let mut w = StdWriter::new(&mut request_wire);
		write_request_frame(&mut w, selector, |w| {
			17u32.write(w)?;
			25u32.write(w)
		})
		.unwrap();
	}

	let mut response_wire = Vec::new();
	{
		let mut request_reader = StdReader::new(&request_wire[..]);
		let (dispatched, len) = read_request_header(&mut request_reader).unwrap();
		assert_eq!(dispatched, selector);
		let mut body = BoundedReader::new(&mut request_reader, len);

		let mut result_bytes = Vec::new();
		{
			let mut result_writer = StdWriter::new(&mut result_bytes);
			dispatcher.dispatch(selector, &mut body, &mut result_writer).unwrap();
		}
		body.read_padding().unwrap();

		let mut w = StdWriter::new(&mut response_wire);
		write_response_frame(&mut w, |w| {
			nop::grammar::write_variant_index(w, 1)?;
			w.write_raw(&result_bytes)
		})
		.unwrap();
	}

	let mut response_reader = StdReader::new(&response_wire[..]);
	let len = read_response_header(&mut response_reader).unwrap();
	let result: NopResult<RpcFault, u32> = read_bounded_body(&mut response_reader, len).unwrap();
	assert_eq!(result, NopResult::Ok(42));
}

#[test]
fn dispatching_an_unknown_selector_reports_a_fault() {
	let dispatcher = Dispatcher::new();
	let selector = method_selector("nop.Calculator", "Divide");

	let mut request_reader = StdReader::new(&[][..]);
	let mut body = BoundedReader::new(&mut request_reader, 0);
	let mut response_bytes = Vec::new();
	let mut w = StdWriter::new(&mut response_bytes);
	let err = dispatcher.dispatch(selector, &mut body, &mut w).unwrap_err();
	assert_eq!(err.kind(), nop::ErrorKind::InvalidInterfaceMethod(selector));
}

#[test]
fn an_interface_rejects_colliding_method_declarations() {
	// Same name twice collides on its own selector deterministically.
	let err = Interface::new("nop.Calculator", &["Add", "Add"]).unwrap_err();
	match err.kind() {
		nop::ErrorKind::DuplicateMethodHash(_) => {}
		other => panic!("unexpected kind: {:?}", other),
	}
}
