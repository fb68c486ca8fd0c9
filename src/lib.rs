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

//! Binary object serialization with a reflection-driven schema and RPC
//! framing on top.
//!
//! A value is encoded by a type-directed [`Encoding`](codec::Encoding)
//! implementation into a self-describing, size-prefixed wire form (see
//! [`grammar`]). Structures, logical buffers, tagged unions and handles are
//! schema-level constructs (see [`schema`] and [`variant`]) rather than a
//! separate IDL; an [`rpc`] layer frames method calls on top of the same
//! codec.

#![deny(non_upper_case_globals)]
#![deny(non_camel_case_types)]
#![deny(non_snake_case)]
#![deny(unused_mut)]
#![warn(missing_docs)]

#[macro_use]
extern crate failure_derive;
#[macro_use]
extern crate log;

#[macro_use]
pub mod macros;

pub mod codec;
pub mod error;
pub mod grammar;
pub mod handle;
pub mod io;
pub mod rpc;
pub mod schema;
pub mod ser;
pub mod varint;
pub mod variant;

pub use crate::codec::{Encoding, Readable, Writeable};
pub use crate::error::{Error, ErrorKind};
pub use crate::handle::{HandleReference, HandleTable};
pub use crate::io::{BoundedReader, Reader, Writer};
pub use crate::schema::LogicalBuffer;
pub use crate::ser::{deserialize, serialize, Deserializer, Serializer};
pub use crate::variant::{NopResult, Optional};
