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

//! Declarative macros that remove the boilerplate of hand-writing a
//! member-by-member codec, the generalization of `ser_multiwrite!`/
//! `ser_multiread!` from "list of reader/writer calls" to "ordered member
//! list of a structure declaration".

/// Declares a [`Writeable`](crate::codec::Writeable) and
/// [`Readable`](crate::codec::Readable) implementation for a struct by
/// naming its members in wire order.
///
/// A member is either a plain field name, or a parenthesized `(array,
/// count)` pair naming a fixed-capacity array field and the count field
/// tracking how much of it is live; that pair is encoded as a single
/// [`LogicalBuffer`](crate::schema::LogicalBuffer) member.
///
/// ```ignore
/// struct Point { x: i32, y: i32 }
/// nop_structure!(Point, x, y);
///
/// struct Frame { data: [u8; 256], len: usize }
/// nop_structure!(Frame, (data, len));
/// ```
#[macro_export]
macro_rules! nop_structure {
	($name:ident, $($member:tt),+ $(,)?) => {
		impl $crate::codec::Writeable for $name {
			fn write(&self, writer: &mut dyn $crate::io::Writer) -> Result<(), $crate::Error> {
				let count: u64 = $crate::__nop_structure_count!(0u64; $($member),+);
				$crate::grammar::write_member_count(writer, count)?;
				$crate::__nop_structure_write!(self, writer; $($member),+);
				Ok(())
			}
		}

		impl $crate::codec::Readable for $name {
			fn read(reader: &mut dyn $crate::io::Reader) -> Result<Self, $crate::Error> {
				let _guard = $crate::grammar::RecursionGuard::enter()?;
				let found = $crate::grammar::read_member_count(reader)?;
				let expected: u64 = $crate::__nop_structure_count!(0u64; $($member),+);
				if found != expected {
					return Err($crate::ErrorKind::InvalidMemberCount { expected, found }.into());
				}
				$crate::__nop_structure_read_bind!(reader; $($member),+);
				Ok($name {
					$( $crate::__nop_structure_read_fields!($member) ),+
				})
			}
		}
	};
}

/// Counts the wire members in a `nop_structure!` member list. A `(array,
/// count)` pair is a single wire member.
#[doc(hidden)]
#[macro_export]
macro_rules! __nop_structure_count {
	($acc:expr;) => { $acc };
	($acc:expr; ($array:ident, $count:ident) $(, $rest:tt)*) => {
		$crate::__nop_structure_count!($acc + 1u64; $($rest),*)
	};
	($acc:expr; $field:ident $(, $rest:tt)*) => {
		$crate::__nop_structure_count!($acc + 1u64; $($rest),*)
	};
}

/// Emits the write statements for a `nop_structure!` member list.
#[doc(hidden)]
#[macro_export]
macro_rules! __nop_structure_write {
	($self:ident, $writer:ident;) => {};
	($self:ident, $writer:ident; ($array:ident, $count:ident) $(, $rest:tt)*) => {
		$crate::schema::LogicalBuffer::write_view(&$self.$array, $self.$count, $writer)?;
		$crate::__nop_structure_write!($self, $writer; $($rest),*);
	};
	($self:ident, $writer:ident; $field:ident $(, $rest:tt)*) => {
		$crate::codec::Writeable::write(&$self.$field, $writer)?;
		$crate::__nop_structure_write!($self, $writer; $($rest),*);
	};
}

/// Reads each member once, in order, into a `let` binding named after its
/// field(s) — a `(array, count)` pair binds both names from a single
/// [`LogicalBuffer::read_view`](crate::schema::LogicalBuffer::read_view)
/// call.
#[doc(hidden)]
#[macro_export]
macro_rules! __nop_structure_read_bind {
	($reader:ident;) => {};
	($reader:ident; ($array:ident, $count:ident) $(, $rest:tt)*) => {
		let ($array, $count) = $crate::schema::LogicalBuffer::read_view($reader)?;
		$crate::__nop_structure_read_bind!($reader; $($rest),*);
	};
	($reader:ident; $field:ident $(, $rest:tt)*) => {
		let $field = $crate::codec::Readable::read($reader)?;
		$crate::__nop_structure_read_bind!($reader; $($rest),*);
	};
}

/// Emits the struct-literal shorthand field name(s) bound by
/// `__nop_structure_read_bind!` for one member.
#[doc(hidden)]
#[macro_export]
macro_rules! __nop_structure_read_fields {
	(($array:ident, $count:ident)) => { $array, $count };
	($field:ident) => { $field };
}

/// Generates a closed tagged union over a fixed, ordered list of
/// alternative types, plus the explicit empty state described in the
/// Variant data model. See [`crate::variant`] for the hand-written
/// `Optional`/`NopResult` façades built the same way.
#[macro_export]
macro_rules! nop_variant {
	($name:ident { $($variant:ident($ty:ty)),+ $(,)? }) => {
		/// Closed tagged union generated by `nop_variant!`.
		#[derive(Debug, Clone, PartialEq)]
		pub enum $name {
			/// No alternative is alive.
			Empty,
			$(
				#[allow(missing_docs)]
				$variant($ty),
			)+
		}

		impl Default for $name {
			fn default() -> Self {
				$name::Empty
			}
		}

		impl $name {
			/// The index of the alive alternative, or `-1` if empty.
			pub fn index(&self) -> i64 {
				match self {
					$name::Empty => -1,
					_ => $crate::__nop_variant_index!(@match self, $name, 0i64, $($variant),+),
				}
			}
		}

		impl $crate::codec::Writeable for $name {
			fn write(&self, writer: &mut dyn $crate::io::Writer) -> Result<(), $crate::Error> {
				$crate::grammar::write_variant_index(writer, self.index())?;
				match self {
					$name::Empty => Ok(()),
					$( $name::$variant(v) => $crate::codec::Writeable::write(v, writer), )+
				}
			}
		}

		impl $crate::codec::Readable for $name {
			fn read(reader: &mut dyn $crate::io::Reader) -> Result<Self, $crate::Error> {
				let _guard = $crate::grammar::RecursionGuard::enter()?;
				let index = $crate::grammar::read_variant_index(reader)?;
				if index == -1 {
					return Ok($name::Empty);
				}
				$crate::__nop_variant_read!(@match reader, index, $name, 0i64, $($variant),+)
			}
		}
	};
}

/// Recursive accumulator computing the position of the currently-alive
/// variant within the declaration's alternative list.
#[doc(hidden)]
#[macro_export]
macro_rules! __nop_variant_index {
	(@match $self:expr, $name:ident, $acc:expr, $head:ident $(, $tail:ident)*) => {
		if let $name::$head(_) = $self {
			$acc
		} else {
			$crate::__nop_variant_index!(@match $self, $name, $acc + 1i64, $($tail),*)
		}
	};
	(@match $self:expr, $name:ident, $acc:expr,) => {
		-1i64
	};
}

/// Recursive accumulator decoding the i-th alternative of a `Variant`.
#[doc(hidden)]
#[macro_export]
macro_rules! __nop_variant_read {
	(@match $reader:expr, $index:expr, $name:ident, $acc:expr, $head:ident $(, $tail:ident)*) => {
		if $index == $acc {
			Ok($name::$head($crate::codec::Readable::read($reader)?))
		} else {
			$crate::__nop_variant_read!(@match $reader, $index, $name, $acc + 1i64, $($tail),*)
		}
	};
	(@match $reader:expr, $index:expr, $name:ident, $acc:expr,) => {
		Err($crate::ErrorKind::UnexpectedEncodingType(0).into())
	};
}
