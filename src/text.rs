//! Michelson strings
//!
//! Strings in the Michelson type system are restricted to printable ASCII
//! (`' '..='~'`) and the newline character. [`MString`] enforces that alphabet
//! on construction, which guarantees that every position in the string holds
//! exactly one byte: slicing by position can never split a character, and the
//! byte-length of the string is its length in the host's sense.

use std::convert::TryFrom;
use std::fmt::{Debug, Display};
use std::ops::Deref;
use std::str::FromStr;

#[cfg(feature = "serde_impls")]
use serde::Serialize;

use crate::conv::target::Target;
use crate::conv::{parse_sized, write_sized, Decode, Encode, TAG_STRING};
use crate::parse::error::TokenError;
use crate::parse::{ParseResult, Parser};

/// Returns `true` if `byte` is a legal Michelson string character
#[inline]
#[must_use]
pub const fn is_legal(byte: u8) -> bool {
    matches!(byte, b'\n' | b' '..=b'~')
}

/// Error returned when constructing an [`MString`] from text that contains a
/// character outside of the Michelson string alphabet
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InvalidCharError {
    pub found: char,
    pub position: usize,
}

impl Display for InvalidCharError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "character {:?} at byte {} is not a legal Michelson string character",
            self.found, self.position
        )
    }
}

impl std::error::Error for InvalidCharError {}

/// Validated Michelson string
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(transparent)]
pub struct MString(String);

#[cfg(feature = "serde_impls")]
impl Serialize for MString {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl MString {
    /// Constructs an empty string
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self(String::new())
    }

    /// Validates and wraps an owned `String`.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidCharError`] naming the first offending character.
    pub fn from_string(s: String) -> Result<Self, InvalidCharError> {
        match s.char_indices().find(|&(_, c)| !(c.is_ascii() && is_legal(c as u8))) {
            Some((position, found)) => Err(InvalidCharError { found, position }),
            None => Ok(Self(s)),
        }
    }

    /// Wraps text that is already known to be drawn from the Michelson alphabet,
    /// such as a slice of another `MString`.
    pub(crate) fn from_validated(s: &str) -> Self {
        debug_assert!(s.bytes().all(is_legal));
        Self(s.to_owned())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }

    /// Returns the `length` characters starting at `offset`, or `None` if that
    /// range extends past the end of the string (Michelson `SLICE`).
    ///
    /// # Examples
    ///
    /// ```
    /// # use mutils::MString;
    /// let s: MString = "tezos".parse().unwrap();
    /// assert_eq!(s.slice(1, 3), Some("ezo"));
    /// assert_eq!(s.slice(3, 3), None);
    /// ```
    #[must_use]
    pub fn slice(&self, offset: usize, length: usize) -> Option<&str> {
        let end = offset.checked_add(length)?;
        self.0.get(offset..end)
    }

    /// Owned variant of [`slice`](Self::slice)
    #[must_use]
    pub fn substring(&self, offset: usize, length: usize) -> Option<MString> {
        self.slice(offset, length).map(MString::from_validated)
    }

    /// Returns the single byte at `position`, if any
    #[must_use]
    pub fn byte_at(&self, position: usize) -> Option<u8> {
        self.0.as_bytes().get(position).copied()
    }

    /// Appends another string to the end of this one
    pub fn push_mstr(&mut self, other: &MString) {
        self.0.push_str(&other.0)
    }

    /// Concatenates a series of strings in order (Michelson `CONCAT`)
    pub fn concat<'a, I>(parts: I) -> Self
    where
        I: IntoIterator<Item = &'a MString>,
    {
        let mut ret = Self::new();
        for part in parts {
            ret.push_mstr(part);
        }
        ret
    }
}

impl Debug for MString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        <String as Debug>::fmt(&self.0, f)
    }
}

impl Display for MString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        <String as Display>::fmt(&self.0, f)
    }
}

impl Deref for MString {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AsRef<str> for MString {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for MString {
    type Err = InvalidCharError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_string(s.to_owned())
    }
}

impl TryFrom<&str> for MString {
    type Error = InvalidCharError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl TryFrom<String> for MString {
    type Error = InvalidCharError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_string(value)
    }
}

impl From<MString> for String {
    fn from(value: MString) -> Self {
        value.0
    }
}

impl PartialEq<str> for MString {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for MString {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl Encode for MString {
    fn write_to<U: Target>(&self, buf: &mut U) -> usize {
        write_sized(TAG_STRING, self.0.as_bytes(), buf)
    }
}

impl Decode for MString {
    fn parse<P: Parser>(p: &mut P) -> ParseResult<Self> {
        let _ = p.take_tagword(&[TAG_STRING], "string")?;
        let raw = parse_sized(p)?;
        if let Some(position) = raw.iter().position(|&b| !is_legal(b)) {
            return Err(TokenError::InvalidCharacter {
                byte: raw[position],
                position,
            }
            .into());
        }
        match std::str::from_utf8(raw) {
            Ok(s) => Ok(Self::from_validated(s)),
            Err(err) => {
                let position = err.valid_up_to();
                Err(TokenError::InvalidCharacter {
                    byte: raw[position],
                    position,
                }
                .into())
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::conv::DecodeError;
    use crate::parse::error::ParseError;

    fn ms(s: &str) -> MString {
        s.parse().unwrap()
    }

    #[test]
    fn alphabet() {
        assert!(MString::from_string("multi\nline ~".to_owned()).is_ok());
        assert_eq!(
            "tab\there".parse::<MString>(),
            Err(InvalidCharError { found: '\t', position: 3 })
        );
        assert_eq!(
            "caf\u{e9}".parse::<MString>(),
            Err(InvalidCharError { found: '\u{e9}', position: 3 })
        );
    }

    #[test]
    fn slicing() {
        let s = ms("abc");
        assert_eq!(s.slice(0, 0), Some(""));
        assert_eq!(s.slice(3, 0), Some(""));
        assert_eq!(s.slice(2, 1), Some("c"));
        assert_eq!(s.slice(2, 2), None);
        assert_eq!(s.substring(1, 2), Some(ms("bc")));
        assert_eq!(s.byte_at(1), Some(b'b'));
        assert_eq!(s.byte_at(3), None);
    }

    #[test]
    fn packed_layout() {
        assert_eq!(ms("abc").to_bytes(), hex::decode("0100000003616263").unwrap());
        assert_eq!(
            MString::try_decode(&hex::decode("0100000003616263").unwrap()),
            Ok(ms("abc"))
        );
        assert_eq!(
            MString::try_decode(&hex::decode("01000000026109").unwrap()),
            Err(DecodeError::Parse(ParseError::Token(TokenError::InvalidCharacter {
                byte: 0x09,
                position: 1
            })))
        );
    }

    #[test]
    fn packed_non_ascii_rejected() {
        // "é" as UTF-8
        assert_eq!(
            MString::try_decode(&hex::decode("0100000003c3a961").unwrap()),
            Err(DecodeError::Parse(ParseError::Token(TokenError::InvalidCharacter {
                byte: 0xc3,
                position: 0
            })))
        );
    }

    #[test]
    fn concatenation() {
        let parts = [ms("ipfs://"), ms("42"), ms(".json")];
        assert_eq!(MString::concat(&parts), "ipfs://42.json");
    }
}
