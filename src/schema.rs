//! Opaque byte-sequences
//!
//! [`Bytes`] is the variable-length byte-sequence of Michelson's `bytes` type.
//! It is packed under its own Micheline node tag with a 4-byte length prefix,
//! and supports the positional `SLICE` and `CONCAT` operations of the host.

use crate::conv::target::Target;
use crate::conv::{parse_sized, write_sized, Decode, Encode, TAG_BYTES};
use crate::parse::{ParseResult, Parser};
use crate::util::write_all_hex;
#[cfg(feature = "serde_impls")]
use serde::Serialize;
use std::fmt::{Debug, LowerHex};
use std::ops::Deref;

/// Opaque sequence of bytes
///
/// Newtype representing opaque, variable-length sequences of bytes, with the
/// slicing semantics of the Michelson `bytes` type.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(transparent)]
pub struct Bytes(Vec<u8>);

#[cfg(feature = "serde_impls")]
impl Serialize for Bytes {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_bytes(&self.0)
    }
}

impl Bytes {
    /// Constructs a new, empty byte-sequence
    ///
    /// As with `Vec::new()`, no allocation is performed until bytes are added
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Constructs a `Bytes` value from a `Vec<u8>`
    pub const fn from_vec(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    /// Destructs a `Bytes` value and returns the actual `Vec<u8>` it contained
    ///
    /// The method name is chosen so as to avoid ambiguity with [`slice::to_vec`]
    /// arising from deref-coercion.
    pub fn into_vec(self) -> Vec<u8> {
        self.0
    }

    /// Returns the `length` bytes starting at `offset`, or `None` if that
    /// range extends past the end of the sequence.
    ///
    /// # Examples
    ///
    /// ```
    /// # use mutils::Bytes;
    /// let b = Bytes::from(vec![0x05, 0x01, 0xff]);
    /// assert_eq!(b.slice(1, 2), Some(&[0x01, 0xff][..]));
    /// assert_eq!(b.slice(2, 2), None);
    /// ```
    #[must_use]
    pub fn slice(&self, offset: usize, length: usize) -> Option<&[u8]> {
        let end = offset.checked_add(length)?;
        self.0.get(offset..end)
    }

    /// Concatenates a series of byte-sequences in order
    pub fn concat<'a, I>(parts: I) -> Self
    where
        I: IntoIterator<Item = &'a [u8]>,
    {
        let mut ret = Vec::new();
        for part in parts {
            ret.extend_from_slice(part);
        }
        Self(ret)
    }
}

impl Debug for Bytes {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Bytes(0x")?;
        write_all_hex(&self.0, f)?;
        write!(f, ")")
    }
}

impl LowerHex for Bytes {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write_all_hex(&self.0, f)
    }
}

impl Deref for Bytes {
    type Target = [u8];

    fn deref(&self) -> &Self::Target {
        self.0.as_slice()
    }
}

impl AsRef<[u8]> for Bytes {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl IntoIterator for Bytes {
    type Item = u8;

    type IntoIter = std::vec::IntoIter<u8>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl std::iter::FromIterator<u8> for Bytes {
    fn from_iter<T: IntoIterator<Item = u8>>(iter: T) -> Self {
        Self(Vec::<u8>::from_iter(iter))
    }
}

impl From<Bytes> for Vec<u8> {
    #[inline]
    fn from(val: Bytes) -> Self {
        val.0
    }
}

impl From<Vec<u8>> for Bytes {
    #[inline]
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

impl<const N: usize> From<[u8; N]> for Bytes {
    #[inline]
    fn from(bytes: [u8; N]) -> Self {
        Self(bytes.to_vec())
    }
}

impl From<&'_ [u8]> for Bytes {
    #[inline]
    fn from(bytes: &'_ [u8]) -> Self {
        Self(bytes.to_vec())
    }
}

impl Encode for Bytes {
    fn write_to<U: Target>(&self, buf: &mut U) -> usize {
        write_sized(TAG_BYTES, &self.0, buf)
    }
}

impl Decode for Bytes {
    fn parse<P: Parser>(p: &mut P) -> ParseResult<Self> {
        let _ = p.take_tagword(&[TAG_BYTES], "bytes")?;
        Ok(Self(parse_sized(p)?.to_vec()))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn slice_bounds() {
        let b = Bytes::from(*b"tezos");
        assert_eq!(b.slice(0, 5), Some(&b"tezos"[..]));
        assert_eq!(b.slice(5, 0), Some(&b""[..]));
        assert_eq!(b.slice(4, 2), None);
        assert_eq!(b.slice(usize::MAX, 2), None);
    }

    #[test]
    fn formatting() {
        let b = Bytes::from(vec![0xca, 0xfe]);
        assert_eq!(format!("{:?}", b), "Bytes(0xcafe)");
        assert_eq!(format!("{:x}", b), "cafe");
        assert_eq!(
            Bytes::concat([&b[..], &[0x00][..]]),
            Bytes::from(vec![0xca, 0xfe, 0x00])
        );
    }
}
