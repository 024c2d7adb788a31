//! Error types used to report failure in low-level parsing
//!
//! This module contains a hierarchy of types representing specific
//! classes of error that may arise as a result of calls to
//! [`Parser`](crate::parse::Parser) methods while unpacking a
//! serialized Michelson value.
//!
//! # Layout
//!
//! This module defines the primary type `ParseError` and the alias
//! `ParseResult<T>`; it additionally defines various type-level refinements of
//! `ParseError`, grouped according to similar provenance or nature.

use std::error::Error;
use std::fmt::{Display, Formatter, Result};

use num_bigint::BigInt;

use crate::util::write_all_hex;

/// Enumeration type over all errors that may be encountered when calling
/// methods on `Parser` types, or when validating the values they yield.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Error class encountered when a read would run past the end of the
    /// buffer, or when bytes are left over after a complete value.
    Window(WindowError),
    /// Error class encountered when low-level parsing is unsuccessful due
    /// to a failure of expectation in terms of the binary-lexical contents
    /// of the buffer.
    ///
    /// This includes invalid version bytes and tags, characters outside of
    /// the Michelson string alphabet, and failure of self-terminating values
    /// to terminate before reaching the end of the buffer.
    Token(TokenError),
    /// Error class encountered when low-level parsing is successful but
    /// the resultant raw value cannot be converted into a legal value of
    /// the type that was requested.
    External(ExternalError),
}

impl Display for ParseError {
    fn fmt(&self, f: &mut Formatter) -> Result {
        match self {
            ParseError::Window(err) => Display::fmt(err, f),
            ParseError::Token(err) => Display::fmt(err, f),
            ParseError::External(err) => Display::fmt(err, f),
        }
    }
}

impl Error for ParseError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ParseError::Window(err) => Some(err),
            ParseError::Token(err) => Some(err),
            ParseError::External(err) => Some(err),
        }
    }
}

/// Type alias for Result with an error type of [`ParseError`]
pub type ParseResult<T> = std::result::Result<T, ParseError>;

/// Errors related to the bounds of the parse-buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowError {
    /// Error case when a method that attempts to consume some number
    /// of bytes from the buffer of a `Parser` would overrun the end of
    /// the buffer in doing so.
    ConsumeWouldExceedLimit {
        offset: usize,
        requested: usize,
        limit: usize,
    },
    /// Error case when a complete value has been parsed but unconsumed
    /// bytes remain in the buffer.
    CloseWithResidue { residual: usize },
}

impl From<WindowError> for ParseError {
    fn from(err: WindowError) -> Self {
        Self::Window(err)
    }
}

impl Display for WindowError {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match *self {
            WindowError::ConsumeWouldExceedLimit {
                limit,
                offset,
                requested,
            } => {
                write!(
                    f,
                    "cannot increment offset by {} bytes (currently at byte {} out of limit {})",
                    requested, offset, limit
                )
            }
            WindowError::CloseWithResidue { residual } => {
                write!(
                    f,
                    "cannot finish parse with {} residual bytes",
                    residual
                )
            }
        }
    }
}

impl Error for WindowError {}

/// Errors arising from unexpected tokens in the buffer
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum TokenError {
    /// Leading byte was not the packed-data version byte
    InvalidVersion(u8),
    /// Byte parsed could not be interpreted as a valid Micheline tag
    /// for the type being unpacked
    InvalidTag(TagError),
    /// Supposedly self-terminating byte-sequence failed to terminate before reaching end of buffer
    NonTerminating(Vec<u8>),
    /// Self-terminating integer ended on a zero-valued continuation group
    NonCanonical(Vec<u8>),
    /// Byte of a string payload outside of the Michelson string alphabet
    InvalidCharacter { byte: u8, position: usize },
}

impl From<TokenError> for ParseError {
    fn from(tok_e: TokenError) -> Self {
        Self::Token(tok_e)
    }
}

impl Display for TokenError {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            Self::InvalidVersion(byte) => {
                write!(f, "expected packed-data version byte 0x05, got 0x{byte:02x}")
            }
            Self::InvalidTag(err) => {
                write!(f, "invalid tag: {}", err)
            }
            Self::NonTerminating(buf) => {
                write!(f, "element failed to terminate: ")?;
                write_all_hex(buf, f)
            }
            Self::NonCanonical(buf) => {
                write!(f, "non-canonical integer encoding: ")?;
                write_all_hex(buf, f)
            }
            Self::InvalidCharacter { byte, position } => {
                write!(
                    f,
                    "byte 0x{byte:02x} at position {position} is not a legal Michelson string character"
                )
            }
        }
    }
}

impl Error for TokenError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            TokenError::InvalidTag(err) => Some(err),
            _ => None,
        }
    }
}

/// Error representing invalid Micheline tag values
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagError {
    actual: u8,
    for_type: &'static str,
    expected: Vec<u8>,
}

impl TagError {
    /// Constructs a `TagError` value with the provided type-name `for_type` and
    /// set of valid values `expected`
    pub fn new(actual: u8, for_type: &'static str, expected: Vec<u8>) -> Self {
        Self {
            actual,
            for_type,
            expected,
        }
    }

    /// Returns the tag value that was rejected
    pub fn actual(&self) -> u8 {
        self.actual
    }
}

impl From<TagError> for ParseError {
    fn from(val: TagError) -> Self {
        TokenError::InvalidTag(val).into()
    }
}

impl Display for TagError {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(
            f,
            "unexpected discriminant {:#04x} for type {}",
            self.actual, self.for_type
        )?;
        if !self.expected.is_empty() {
            write!(f, " (expected one of {:02x?})", self.expected)?;
        }
        Ok(())
    }
}

impl Error for TagError {}

/// Enumerated type representing contextually invalid results obtained from otherwise
/// succesfully executed method calls to a Parser object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExternalError {
    /// A natural number was expected but the packed integer was negative
    NegativeNatural(BigInt),
    /// A length prefix could not be represented on this platform
    LengthOverflow(u32),
    /// A packed address payload did not hold a well-formed binary address
    InvalidAddress(Vec<u8>),
}

impl From<ExternalError> for ParseError {
    fn from(err: ExternalError) -> Self {
        ParseError::External(err)
    }
}

impl Display for ExternalError {
    fn fmt(&self, f: &mut Formatter) -> Result {
        match self {
            ExternalError::NegativeNatural(val) => {
                write!(f, "expected a natural number, found {}", val)
            }
            ExternalError::LengthOverflow(len) => {
                write!(f, "length prefix {} exceeds addressable memory", len)
            }
            ExternalError::InvalidAddress(bytes) => {
                write!(f, "malformed binary address: ")?;
                write_all_hex(bytes, f)
            }
        }
    }
}

impl Error for ExternalError {}

#[cfg(test)]
mod test {
    use super::*;

    fn dummy<T: Send + Sync>() {}

    #[test]
    fn parse_error_threadsafe() {
        dummy::<ParseError>()
    }

    #[test]
    fn display_hex_payloads() {
        let err = ParseError::from(TokenError::NonTerminating(vec![0x80, 0xff]));
        assert_eq!(err.to_string(), "element failed to terminate: 80ff");
        let err = ParseError::from(TagError::new(0x07, "string", vec![0x01]));
        assert_eq!(
            err.to_string(),
            "invalid tag: unexpected discriminant 0x07 for type string (expected one of [01])"
        );
    }
}
