//! Primitive utilities for Michelson values
//!
//! # Overview
//!
//! This library collects the small, exact building blocks that smart-contract
//! code in the Tezos ecosystem keeps re-deriving by hand: exponentiation and
//! median over arbitrary-precision naturals, conversions between strings,
//! byte-sequences and integers, and the originated-contract test on
//! addresses.
//!
//! Several of these conversions are defined in terms of the host's canonical
//! value serialization (`PACK`/`UNPACK`) rather than implemented directly:
//! the raw bytes of a string are the packed string minus its header, and a
//! string is recovered from bytes by rebuilding that header and unpacking.
//! The serializer is abstracted as the [`Packer`] trait and passed into each
//! such helper explicitly. [`MichelsonPacker`] implements it in-process, on
//! top of the [`Encode`] and [`Decode`] traits of this crate and the
//! byte-level [`Parser`] model beneath them.
//!
//! # Layout
//!
//! * [`math`]: `pow` and `median` over [`N`]
//! * [`bytes`], [`string`], [`int`]: the conversion helpers
//! * [`address`]: [`Address`] and `is_kt1`
//! * [`codec`]: the [`Packer`] abstraction and [`Value`]
//! * [`conv`], [`parse`]: binary encoding and decoding of the value types
//! * [`codegen`]: fresh scratch-variable names for code generators
//!
//! # Features
//!
//! * `serde_impls`: `serde::Serialize` for the value types
//! * `lenient_trailing`: ignore bytes left over after a decoded value

pub mod address;
pub mod bytes;
pub mod codec;
pub mod codegen;
pub mod conv;
pub mod error;
pub mod int;
pub mod math;
pub mod parse;
pub mod schema;
pub mod string;
pub mod text;
pub mod util;
pub mod zarith;

pub use crate::address::{is_kt1, Address, AddressKind, KT1_HIGH, KT1_LOW};
pub use crate::codec::{MichelsonPacker, Packer, Ty, Value};
pub use crate::codegen::VarNameGenerator;
pub use crate::conv::{target::Target, Decode, DecodeError, Encode};
pub use crate::error::{EncodingError, Error, ParseIntError, RangeError, Result};
pub use crate::parse::{error::ParseError, ParseResult, Parser, SliceParser};
pub use crate::schema::Bytes;
pub use crate::text::MString;
pub use crate::zarith::{n::N, z::Z};
