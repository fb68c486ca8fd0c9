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
use nop::grammar::prefix;
use nop::io::{BoundedReader, StdReader, StdWriter};
use nop::schema::LogicalBuffer;
use nop::variant::Optional;
use nop::{nop_structure, nop_variant, ser};

#[derive(Debug, Clone, PartialEq)]
struct Point {
	x: i32,
	y: i32,
}

nop_structure!(Point, x, y);

#[derive(Debug, Clone, PartialEq)]
struct Frame {
	data: [u32; 8],
	len: u32,
}

nop_structure!(Frame, (data, len));

nop_variant!(Number {
	AsInt(i64),
	AsFloat(f64),
});

#[test]
fn integer_compaction_picks_the_narrowest_class() {
	let bytes = ser::ser_vec(&300u32).unwrap();
	assert_eq!(bytes, vec![prefix::U16, 0x2C, 0x01]);
}

#[test]
fn small_values_use_fixint_with_no_size_class() {
	let bytes = ser::ser_vec(&5u32).unwrap();
	assert_eq!(bytes, vec![0x05]);
}

#[test]
fn structure_roundtrips_member_by_member() {
	let point = Point { x: 1, y: -1 };
	let bytes = ser::ser_vec(&point).unwrap();
	let decoded: Point = ser::deserialize_slice(&bytes).unwrap();
	assert_eq!(decoded, point);
}

#[test]
fn structure_rejects_a_wrong_member_count() {
	// two members where Point's declaration expects two is fine; verify a
	// genuinely malformed header (wrong declared count) is rejected
	let mut buf = Vec::new();
	{
		let mut w = StdWriter::new(&mut buf);
		nop::grammar::write_member_count(&mut w, 3).unwrap();
		1i32.write(&mut w).unwrap();
		1i32.write(&mut w).unwrap();
		1i32.write(&mut w).unwrap();
	}
	let mut r = StdReader::new(&buf[..]);
	let err = Point::read(&mut r).unwrap_err();
	match err.kind() {
		nop::ErrorKind::InvalidMemberCount { expected, found } => {
			assert_eq!(expected, 2);
			assert_eq!(found, 3);
		}
		other => panic!("unexpected kind: {:?}", other),
	}
}

#[test]
fn logical_buffer_is_fungible_with_a_binary_blob_of_the_same_bytes() {
	let frame = Frame {
		data: [1, 2, 3, 0, 0, 0, 0, 0],
		len: 3,
	};
	let bytes = ser::ser_vec(&frame).unwrap();

	// the LogicalBuffer member packs as a raw Binary blob of 3 * 4 bytes
	let mut r = StdReader::new(&bytes[..]);
	let found = nop::grammar::read_member_count(&mut r).unwrap();
	assert_eq!(found, 1);
	let (buffer, count): ([u32; 8], u32) = LogicalBuffer::read_view(&mut r).unwrap();
	assert_eq!(count, 3);
	assert_eq!(&buffer[..3], &[1, 2, 3]);

	let decoded: Frame = ser::deserialize_slice(&bytes).unwrap();
	assert_eq!(decoded, frame);
}

#[test]
fn variant_roundtrips_each_alternative() {
	for value in [Number::AsInt(-7), Number::AsFloat(2.5), Number::Empty] {
		let bytes = ser::ser_vec(&value).unwrap();
		let decoded: Number = ser::deserialize_slice(&bytes).unwrap();
		assert_eq!(decoded, value);
	}
}

#[test]
fn variant_empty_state_is_distinct_from_any_alternative() {
	let empty = Number::Empty;
	assert_eq!(empty.index(), -1);

	let bytes = ser::ser_vec(&empty).unwrap();
	let decoded: Number = ser::deserialize_slice(&bytes).unwrap();
	assert_eq!(decoded, Number::Empty);

	// visiting the decoded value must take the empty arm, not fall
	// through to an alternative
	let visited = match decoded {
		Number::Empty => "empty",
		Number::AsInt(_) => "int",
		Number::AsFloat(_) => "float",
	};
	assert_eq!(visited, "empty");
}

#[test]
fn optional_empty_state_is_distinct_from_any_alternative() {
	let empty: Optional<u32> = Optional::None;
	let bytes = ser::ser_vec(&empty).unwrap();
	// -1 is written as a NegFixInt, a single byte
	assert_eq!(bytes.len(), 1);
	let decoded: Optional<u32> = ser::deserialize_slice(&bytes).unwrap();
	assert_eq!(decoded, Optional::None);
}

#[test]
fn bounded_reader_rejects_reads_past_its_capacity() {
	use nop::io::Reader;

	let bytes = [1u8, 2, 3, 4, 5, 6, 7, 8];
	let mut base = StdReader::new(&bytes[..]);
	let mut bounded = BoundedReader::new(&mut base, 4);

	let mut buf = [0u8; 4];
	bounded.read_raw(&mut buf).unwrap();
	assert_eq!(buf, [1, 2, 3, 4]);

	let err = bounded.read_raw(&mut [0u8; 1]).unwrap_err();
	match err.kind() {
		nop::ErrorKind::NoBuffer { requested, remaining } => {
			assert_eq!(requested, 1);
			assert_eq!(remaining, 0);
		}
		other => panic!("unexpected kind: {:?}", other),
	}
}
