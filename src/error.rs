//! General error types
//!
//! This module contains the errors raised by the conversion helpers in
//! [`crate::bytes`], [`crate::string`] and [`crate::int`]. Failures of the
//! packed-form decoder live in [`crate::conv::error`], and the lower-level
//! parse errors they wrap in [`crate::parse::error`].
//!
//! [`Error`] is the sum of all of them, for operations that can fail in more
//! than one way.

use std::fmt::Display;

use num_bigint::BigUint;

use crate::conv::error::DecodeError;

/// Error raised when a numeric argument violates a documented precondition
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum RangeError {
    /// Natural not strictly below the limit of a single-byte zarith payload
    NatTooLarge { limit: u8, value: BigUint },
}

impl Display for RangeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RangeError::NatTooLarge { limit, value } => write!(
                f,
                "natural {value} is not below {limit}, and has no single-byte packed form"
            ),
        }
    }
}

impl std::error::Error for RangeError {}

/// Error raised when the packed form produced by a [`Packer`](crate::Packer)
/// does not have the layout a helper depends on
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum EncodingError {
    /// Packed form shorter than the header that was to be stripped from it
    TruncatedHeader { header: usize, actual: usize },
    /// Packed form whose header bytes are not the expected version and tag
    Unexpected { expected: Vec<u8>, actual: Vec<u8> },
}

impl Display for EncodingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EncodingError::TruncatedHeader { header, actual } => write!(
                f,
                "packed form of {actual} bytes is shorter than its {header}-byte header"
            ),
            EncodingError::Unexpected { expected, actual } => write!(
                f,
                "packed header {actual:02x?} does not begin with {expected:02x?}"
            ),
        }
    }
}

impl std::error::Error for EncodingError {}

/// Error raised when text cannot be read as a base-10 integer
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct ParseIntError {
    /// Byte offset of the offending character in the input
    pub position: usize,
    /// The offending character
    pub found: char,
}

impl Display for ParseIntError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "invalid decimal digit {:?} at position {}",
            self.found, self.position
        )
    }
}

impl std::error::Error for ParseIntError {}

/// Crate-level error type
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Error {
    Range(RangeError),
    Encoding(EncodingError),
    Decode(DecodeError),
    ParseInt(ParseIntError),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Range(err) => Display::fmt(err, f),
            Error::Encoding(err) => Display::fmt(err, f),
            Error::Decode(err) => Display::fmt(err, f),
            Error::ParseInt(err) => Display::fmt(err, f),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Range(err) => Some(err),
            Error::Encoding(err) => Some(err),
            Error::Decode(err) => Some(err),
            Error::ParseInt(err) => Some(err),
        }
    }
}

impl From<RangeError> for Error {
    fn from(err: RangeError) -> Self {
        Self::Range(err)
    }
}

impl From<EncodingError> for Error {
    fn from(err: EncodingError) -> Self {
        Self::Encoding(err)
    }
}

impl From<DecodeError> for Error {
    fn from(err: DecodeError) -> Self {
        Self::Decode(err)
    }
}

impl From<ParseIntError> for Error {
    fn from(err: ParseIntError) -> Self {
        Self::ParseInt(err)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn threadsafe() {
        fn is_sync<T: Sync + Send>() {}
        is_sync::<Error>();
    }

    #[test]
    fn display() {
        let err = Error::from(RangeError::NatTooLarge {
            limit: 64,
            value: BigUint::from(64u8),
        });
        assert_eq!(
            err.to_string(),
            "natural 64 is not below 64, and has no single-byte packed form"
        );
        let err = EncodingError::TruncatedHeader { header: 6, actual: 2 };
        assert_eq!(
            err.to_string(),
            "packed form of 2 bytes is shorter than its 6-byte header"
        );
        let err = ParseIntError { position: 1, found: 'x' };
        assert_eq!(err.to_string(), "invalid decimal digit 'x' at position 1");
    }
}
