//! Custom parsing model with byte-level precision
//!
//! This module provides the fundamental definitions related to the task
//! of processing a raw sequence of packed bytes into the leaf values of a
//! Michelson data type.
//!
//! For type-aware parsing, see the [`Decode`](crate::conv::Decode) trait,
//! which is a high-level interface built almost entirely around the
//! definitions contained within this module.
//!
//! # Layout
//!
//! The top-level of this module defines the [`Parser`] trait, along with
//! the one implementing type used by this crate, [`SliceParser`], which
//! parses directly from a borrowed byte-slice without copying it.
//!
//! The sub-module `error` defines the hierachy of error cases that can be
//! encountered during a call to a `Parser` method.

pub mod error;

pub use error::ParseResult;
use error::{ParseError, TagError, TokenError, WindowError};

/// Stateful parse-object over an immutable byte-buffer
///
/// All parsing is done in a non-backtracking, zero-lookahead fashion; a byte in
/// the buffer can only be viewed by consuming it, and only after all preceding
/// indices in the buffer have been consumed.
///
/// The following properties should be respected by each implementation:
///
/// * A fresh `p : impl Parser` object should have `p.offset() == 0` and
///   `p.view_len()` equal to the length of the parse-buffer
/// * `self.remainder()` is the largest possible `n` for which `self.consume(n)`
///   returns an `Ok(_)` value
/// * A failed `consume` call leaves the offset unchanged
pub trait Parser {
    /// Computes the length of the Parser's buffer.
    fn view_len(&self) -> usize;

    /// Computes the current value of the offset into the Parser's buffer.
    fn offset(&self) -> usize;

    /// Computes the remaining number of bytes that can be safely consumed.
    fn remainder(&self) -> usize {
        self.view_len() - self.offset()
    }

    /// Attempt to consume and return a slice of length `nbytes`.
    ///
    /// # Errors
    ///
    /// Returns [`WindowError::ConsumeWouldExceedLimit`] if fewer than
    /// `nbytes` bytes remain.
    fn consume(&mut self, nbytes: usize) -> ParseResult<&[u8]>;

    /// Consumes and returns a single byte from the current offset position.
    fn consume_byte(&mut self) -> ParseResult<u8> {
        Ok(self.consume(1)?[0])
    }

    /// Consumes a big-endian `u32`, as used for Micheline length prefixes.
    fn take_u32(&mut self) -> ParseResult<u32> {
        let bytes = self.consume(4)?;
        Ok(u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    /// Consumes `nbytes` bytes into a freshly allocated vector.
    fn take_dynamic(&mut self, nbytes: usize) -> ParseResult<Vec<u8>> {
        Ok(self.consume(nbytes)?.to_vec())
    }

    /// Consumes a single byte and validates it against a set of
    /// acceptable tag-values.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::InvalidTag`] if the byte is not in `valid`.
    fn take_tagword(&mut self, valid: &[u8], for_type: &'static str) -> ParseResult<u8> {
        let tag = self.consume_byte()?;
        if valid.contains(&tag) {
            Ok(tag)
        } else {
            Err(TagError::new(tag, for_type, valid.to_vec()).into())
        }
    }

    /// Consumes bytes up to and including the first byte for which
    /// `is_terminal` holds.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::NonTerminating`] carrying the consumed bytes if
    /// the buffer is exhausted first. No bytes are consumed in that case.
    fn take_self_terminating<F>(&mut self, is_terminal: F) -> ParseResult<Vec<u8>>
    where
        F: Fn(u8) -> bool,
    {
        let start = self.offset();
        let mut ret: Vec<u8> = Vec::new();
        loop {
            if self.remainder() == 0 {
                self.rewind(start);
                return Err(TokenError::NonTerminating(ret).into());
            }
            let byte = self.consume_byte()?;
            ret.push(byte);
            if is_terminal(byte) {
                return Ok(ret);
            }
        }
    }

    /// Resets the offset to an earlier position.
    fn rewind(&mut self, offset: usize);

    /// Checks that the entire buffer has been consumed.
    ///
    /// # Errors
    ///
    /// Returns [`WindowError::CloseWithResidue`] if any bytes remain.
    fn finish(&self) -> ParseResult<()> {
        match self.remainder() {
            0 => Ok(()),
            residual => Err(WindowError::CloseWithResidue { residual }.into()),
        }
    }
}

/// `Parser` implementation over a borrowed byte-slice
#[derive(Debug, Clone)]
pub struct SliceParser<'a> {
    buf: &'a [u8],
    offset: usize,
}

impl<'a> SliceParser<'a> {
    /// Constructs a fresh parser positioned at the start of `buf`
    #[must_use]
    pub const fn new(buf: &'a [u8]) -> Self {
        Self { buf, offset: 0 }
    }
}

impl<'a> From<&'a [u8]> for SliceParser<'a> {
    fn from(buf: &'a [u8]) -> Self {
        Self::new(buf)
    }
}

impl<'a> Parser for SliceParser<'a> {
    fn view_len(&self) -> usize {
        self.buf.len()
    }

    fn offset(&self) -> usize {
        self.offset
    }

    fn consume(&mut self, nbytes: usize) -> ParseResult<&[u8]> {
        let limit = self.buf.len();
        match self.offset.checked_add(nbytes) {
            Some(tgt) if tgt <= limit => {
                let ret = &self.buf[self.offset..tgt];
                self.offset = tgt;
                Ok(ret)
            }
            _ => Err(ParseError::from(WindowError::ConsumeWouldExceedLimit {
                offset: self.offset,
                requested: nbytes,
                limit,
            })),
        }
    }

    fn rewind(&mut self, offset: usize) {
        debug_assert!(offset <= self.offset);
        self.offset = offset;
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn consume_respects_limit() {
        let mut p = SliceParser::new(&[0x05, 0x01, 0x00, 0x00, 0x00, 0x02, b'h', b'i']);
        assert_eq!(p.consume_byte().unwrap(), 0x05);
        assert_eq!(p.take_tagword(&[0x01], "string").unwrap(), 0x01);
        assert_eq!(p.take_u32().unwrap(), 2);
        assert_eq!(
            p.consume(3),
            Err(ParseError::Window(WindowError::ConsumeWouldExceedLimit {
                offset: 6,
                requested: 3,
                limit: 8
            }))
        );
        assert_eq!(p.offset(), 6);
        assert_eq!(p.take_dynamic(2).unwrap(), b"hi".to_vec());
        assert!(p.finish().is_ok());
    }

    #[test]
    fn self_terminating_rewinds_on_failure() {
        let mut p = SliceParser::new(&[0x80, 0x81]);
        assert_eq!(
            p.take_self_terminating(|b| b & 0x80 == 0),
            Err(TokenError::NonTerminating(vec![0x80, 0x81]).into())
        );
        assert_eq!(p.offset(), 0);
        assert_eq!(p.finish(), Err(WindowError::CloseWithResidue { residual: 2 }.into()));
    }

    #[test]
    fn bad_tag_is_reported() {
        let mut p = SliceParser::new(&[0x0a]);
        match p.take_tagword(&[0x00], "int") {
            Err(ParseError::Token(TokenError::InvalidTag(err))) => assert_eq!(err.actual(), 0x0a),
            other => panic!("unexpected result {:?}", other),
        }
    }
}
