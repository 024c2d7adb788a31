//! Canonical value serialization (`PACK` / `UNPACK`)
//!
//! The host environment serializes typed values into a versioned, tagged byte
//! layout:
//!
//! ```text
//! [0x05][node tag][tag-specific header][payload]
//! ```
//!
//! The string and bytes helpers of this crate never build that layout from
//! scratch; they go through a [`Packer`], which is passed in explicitly so that
//! callers can substitute their own implementation (for instance, one that
//! defers to a node RPC, or a fake in tests). [`MichelsonPacker`] is the
//! in-process implementation over the [`Encode`] and [`Decode`] impls of the
//! value types.

use tracing::{debug, trace};

use crate::address::Address;
use crate::conv::{self, target::Target, DecodeResult, Decode, Encode};
use crate::parse::error::{ParseError, TokenError};
use crate::parse::{Parser, SliceParser};
use crate::schema::Bytes;
use crate::text::MString;
use crate::zarith::{n::N, z::Z};

/// Version byte that prefixes every packed value
pub const PACK_VERSION: u8 = 0x05;

/// Length of the header that precedes the raw bytes of a packed string:
/// version, node tag, and 4-byte length
pub const STRING_HEADER_LEN: usize = 6;

/// Length of the header that precedes the zarith payload of a packed natural:
/// version and node tag
pub const NAT_HEADER_LEN: usize = 2;

/// Michelson types whose values can be packed
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Ty {
    Nat,
    Int,
    String,
    Bytes,
    Address,
}

impl std::fmt::Display for Ty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Ty::Nat => "nat",
            Ty::Int => "int",
            Ty::String => "string",
            Ty::Bytes => "bytes",
            Ty::Address => "address",
        })
    }
}

/// A typed Michelson value
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Value {
    Nat(N),
    Int(Z),
    String(MString),
    Bytes(Bytes),
    Address(Address),
}

impl Value {
    /// Returns the Michelson type of this value
    #[must_use]
    pub fn ty(&self) -> Ty {
        match self {
            Value::Nat(_) => Ty::Nat,
            Value::Int(_) => Ty::Int,
            Value::String(_) => Ty::String,
            Value::Bytes(_) => Ty::Bytes,
            Value::Address(_) => Ty::Address,
        }
    }
}

impl Encode for Value {
    fn write_to<U: Target>(&self, buf: &mut U) -> usize {
        match self {
            Value::Nat(x) => x.write_to(buf),
            Value::Int(x) => x.write_to(buf),
            Value::String(x) => x.write_to(buf),
            Value::Bytes(x) => x.write_to(buf),
            Value::Address(x) => x.write_to(buf),
        }
    }
}

macro_rules! impl_value_from {
    ($($variant:ident($t:ty)),* $(,)?) => {
        $(
            impl From<$t> for Value {
                fn from(val: $t) -> Self {
                    Value::$variant(val)
                }
            }
        )*
    };
}

impl_value_from!(
    Nat(N),
    Int(Z),
    String(MString),
    Bytes(Bytes),
    Address(Address),
);

/// Host canonical serialization, injected into the conversion helpers
pub trait Packer {
    /// Serializes `value` into its canonical packed form.
    ///
    /// `value` must not hold a string or byte-sequence of `2^32` bytes or
    /// more; [`MichelsonPacker`] panics rather than truncate its length.
    fn pack(&self, value: &Value) -> Vec<u8>;

    /// Reconstructs a value of type `ty` from its canonical packed form.
    ///
    /// # Errors
    ///
    /// Fails with a [`DecodeError`](crate::conv::DecodeError) if `bytes` is not
    /// a well-formed packed value of type `ty`.
    fn unpack(&self, bytes: &[u8], ty: Ty) -> DecodeResult<Value>;
}

impl<T: Packer + ?Sized> Packer for &T {
    fn pack(&self, value: &Value) -> Vec<u8> {
        (**self).pack(value)
    }

    fn unpack(&self, bytes: &[u8], ty: Ty) -> DecodeResult<Value> {
        (**self).unpack(bytes, ty)
    }
}

/// In-process implementation of Michelson `PACK` and `UNPACK`
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MichelsonPacker;

impl MichelsonPacker {
    fn unpack_value<P: Parser>(p: &mut P, ty: Ty) -> Result<Value, ParseError> {
        match p.consume_byte()? {
            PACK_VERSION => {}
            other => return Err(TokenError::InvalidVersion(other).into()),
        }
        let value = match ty {
            Ty::Nat => Value::Nat(N::parse(p)?),
            Ty::Int => Value::Int(Z::parse(p)?),
            Ty::String => Value::String(MString::parse(p)?),
            Ty::Bytes => Value::Bytes(Bytes::parse(p)?),
            Ty::Address => Value::Address(Address::parse(p)?),
        };
        conv::finish(p)?;
        Ok(value)
    }
}

impl Packer for MichelsonPacker {
    fn pack(&self, value: &Value) -> Vec<u8> {
        let mut buf: Vec<u8> = Vec::with_capacity(1 + value.enc_len());
        let n = buf.push_one(PACK_VERSION) + value.write_to(&mut buf);
        trace!(ty = %value.ty(), len = n, "packed value");
        buf
    }

    fn unpack(&self, bytes: &[u8], ty: Ty) -> DecodeResult<Value> {
        let mut p = SliceParser::new(bytes);
        match Self::unpack_value(&mut p, ty) {
            Ok(value) => {
                trace!(%ty, len = bytes.len(), "unpacked value");
                Ok(value)
            }
            Err(err) => {
                debug!(%ty, len = bytes.len(), offset = p.offset(), error = %err, "unpack failed");
                Err(err.into())
            }
        }
    }
}
