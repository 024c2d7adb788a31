//! Core of the binary-conversion API
//!
//! This module contains definitions for the high-level transcoding traits
//! `Encode` and `Decode`, which convert between Rust-side values and their
//! Micheline binary form: a one-byte node tag followed by the tag-specific
//! payload. The version byte that prefixes a fully packed value is not part
//! of this layer; it is added and checked by [`crate::codec`].
//!
//! An additional submodule, [`target`], offers an abstraction along the lines
//! of [`std::io::Write`], namely the [`target::Target`] trait. This is the dual
//! to [`crate::parse::Parser`], acting as the generic bound for serialization
//! in the [`Encode::write_to`] method.

use crate::parse::{ParseResult, Parser, SliceParser};

use self::target::{ByteCounter, Target};

pub mod error;
pub mod target;

pub use error::{DecodeError, DecodeResult};

/// Micheline node tag for integer literals (shared by `int` and `nat`)
pub const TAG_INT: u8 = 0x00;
/// Micheline node tag for string literals
pub const TAG_STRING: u8 = 0x01;
/// Micheline node tag for byte-sequence literals
pub const TAG_BYTES: u8 = 0x0a;

/// Trait for types that support serialization into Micheline binary form
///
/// Implementing [`Encode`] requires only [`write_to`](Encode::write_to); the
/// other methods are defined in terms of it.
pub trait Encode {
    /// Appends the serialized bytes of this value to a generic buffer,
    /// returning the exact number of bytes written
    fn write_to<U: Target>(&self, buf: &mut U) -> usize;

    /// Creates a new buffer and fills it with the serialized bytes of this value.
    #[must_use]
    #[inline]
    fn encode<U: Target>(&self) -> U {
        let mut buf: U = U::create();
        let _ = self.write_to::<U>(&mut buf);
        buf
    }

    /// Computes, without allocation, the number of bytes in the serialized
    /// form of `self`.
    #[must_use]
    #[inline]
    fn enc_len(&self) -> usize {
        let mut counter: ByteCounter = std::io::sink();
        self.write_to(&mut counter)
    }

    /// Returns a `Vec<u8>` pre-allocated to the exact serialized width of
    /// `self`, holding its serialized bytes.
    #[must_use]
    fn to_bytes(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(self.enc_len());
        let _ = self.write_to(&mut buf);
        buf
    }
}

/// Trait providing methods for deserializing Micheline binary data into values
/// of a certain type
pub trait Decode {
    /// Attempt to consume and interpret a value of type `Self` from an existing
    /// `Parser` object over a binary buffer.
    ///
    /// # Errors
    ///
    /// In most cases, the errors returned by this method will be propogated from
    /// calls made to [`Parser`] methods in the implementation logic. Values
    /// that parse successfully but violate an invariant of `Self` produce
    /// newly minted `ParseError`s.
    fn parse<P: Parser>(p: &mut P) -> ParseResult<Self>
    where
        Self: Sized;

    /// Attempt to decode a value of the `Self` type that spans the entirety
    /// of `input`.
    ///
    /// # Errors
    ///
    /// Propagates any error returned by [`parse`](Decode::parse). Unless the
    /// `lenient_trailing` feature is enabled, bytes left over after the value
    /// are also reported as an error.
    fn try_decode(input: &[u8]) -> DecodeResult<Self>
    where
        Self: Sized,
    {
        let mut p = SliceParser::new(input);
        let ret = Self::parse(&mut p)?;
        finish(&p)?;
        Ok(ret)
    }
}

cfg_if::cfg_if! {
    if #[cfg(feature = "lenient_trailing")] {
        #[inline]
        pub(crate) fn finish<P: Parser>(_p: &P) -> ParseResult<()> {
            Ok(())
        }
    } else {
        #[inline]
        pub(crate) fn finish<P: Parser>(p: &P) -> ParseResult<()> {
            p.finish()
        }
    }
}

/// Returns the 4-byte big-endian length prefix for a payload of `len` bytes.
///
/// # Panics
///
/// Panics if `len` is `2^32` or more, which no length prefix can describe.
fn length_prefix(len: usize) -> [u8; 4] {
    match u32::try_from(len) {
        Ok(len) => len.to_be_bytes(),
        Err(_) => panic!("{len}-byte payload does not fit a 4-byte length prefix"),
    }
}

/// Writes a Micheline node with a 4-byte big-endian length prefix.
///
/// # Panics
///
/// Panics if `payload` is `2^32` bytes or longer.
pub(crate) fn write_sized<U: Target>(tag: u8, payload: &[u8], buf: &mut U) -> usize {
    let prefix = length_prefix(payload.len());
    buf.anticipate(5 + payload.len());
    buf.push_one(tag) + buf.push_many(prefix) + buf.push_all(payload)
}

/// Reads the body of a length-prefixed Micheline node whose tag has
/// already been consumed.
pub(crate) fn parse_sized<'p, P: Parser>(p: &'p mut P) -> ParseResult<&'p [u8]> {
    let len = p.take_u32()?;
    let len = usize::try_from(len)
        .map_err(|_| crate::parse::error::ExternalError::LengthOverflow(len))?;
    p.consume(len)
}
