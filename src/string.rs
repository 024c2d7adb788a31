//! Text helpers: affix tests, splitting, decimal rendering, and recovery of
//! text from raw bytes through the packed form

use num_bigint::BigUint;
use num_traits::Zero;
use tracing::{debug, trace};

use crate::codec::{Packer, Ty, Value, PACK_VERSION};
use crate::conv::error::{DecodeError, DecodeResult};
use crate::conv::TAG_STRING;
use crate::schema::Bytes;
use crate::text::MString;
use crate::zarith::{n::N, z::Z};

/// Returns `true` if the first `prefix.len()` positions of `text` hold `prefix`.
///
/// A prefix longer than `text` is not an error; the answer is `false`.
#[must_use]
pub fn starts_with(text: &str, prefix: &str) -> bool {
    text.len() >= prefix.len() && text.as_bytes()[..prefix.len()] == *prefix.as_bytes()
}

/// Returns `true` if the last `postfix.len()` positions of `text` hold `postfix`.
#[must_use]
pub fn ends_with(text: &str, postfix: &str) -> bool {
    text.len() >= postfix.len()
        && text.as_bytes()[text.len() - postfix.len()..] == *postfix.as_bytes()
}

/// Splits `s` at every position holding the one-character separator `sep`.
///
/// Pieces are returned left to right, including empty pieces between
/// adjacent separators and at either end. An empty `s` yields no pieces at
/// all. A separator that is not exactly one character long never matches,
/// so a non-empty `s` is then returned whole.
///
/// # Examples
///
/// ```
/// # use mutils::{string::split, MString};
/// let s: MString = "a,b,,c".parse().unwrap();
/// let sep: MString = ",".parse().unwrap();
/// let pieces: Vec<String> = split(&s, &sep).into_iter().map(String::from).collect();
/// assert_eq!(pieces, ["a", "b", "", "c"]);
/// ```
#[must_use]
pub fn split(s: &MString, sep: &MString) -> Vec<MString> {
    let mut ret = Vec::new();
    if s.is_empty() {
        return ret;
    }
    let sep = match sep.as_bytes() {
        &[byte] => Some(byte),
        _ => None,
    };
    let mut boundary = 0;
    for (position, &byte) in s.as_bytes().iter().enumerate() {
        if Some(byte) == sep {
            ret.push(MString::from_validated(&s[boundary..position]));
            boundary = position + 1;
        }
    }
    ret.push(MString::from_validated(&s[boundary..]));
    ret
}

fn decimal(magnitude: &BigUint) -> String {
    if magnitude.is_zero() {
        return String::from("0");
    }
    // least-significant digit first
    let digits = magnitude.to_radix_le(10);
    digits.iter().rev().map(|&d| char::from(b'0' + d)).collect()
}

/// Renders `number` in base 10, with a leading `-` when negative.
///
/// Zero renders as `"0"`, and no other output has a leading zero.
#[must_use]
pub fn of_int(number: &Z) -> MString {
    let mut ret = String::new();
    if number.is_negative() {
        ret.push('-');
    }
    ret.push_str(&decimal(number.magnitude()));
    MString::from_validated(&ret)
}

/// Renders `number` in base 10.
#[must_use]
pub fn of_nat(number: &N) -> MString {
    MString::from_validated(&decimal(number.as_inner()))
}

/// Recovers text from its raw bytes, by rebuilding the packed form of a
/// string around `payload` and unpacking it with `packer`.
///
/// This is the inverse of [`bytes::of_string`](crate::bytes::of_string).
///
/// # Errors
///
/// Returns [`DecodeError::Oversize`] if `payload` is `2^32` bytes or longer,
/// and otherwise propagates the failure of `packer` to unpack the rebuilt
/// form (for instance, when `payload` holds a byte outside the Michelson
/// string alphabet).
pub fn of_bytes<P>(packer: &P, payload: &Bytes) -> DecodeResult<MString>
where
    P: Packer + ?Sized,
{
    let length = match u32::try_from(payload.len()) {
        Ok(length) => length,
        Err(_) => {
            debug!(length = payload.len(), "payload too long for a packed string");
            return Err(DecodeError::Oversize {
                length: payload.len(),
            });
        }
    };
    let mut packed = Vec::with_capacity(6 + payload.len());
    packed.push(PACK_VERSION);
    packed.push(TAG_STRING);
    packed.extend_from_slice(&length.to_be_bytes());
    packed.extend_from_slice(payload);

    match packer.unpack(&packed, Ty::String)? {
        Value::String(text) => {
            trace!(len = text.len(), "string of bytes");
            Ok(text)
        }
        other => Err(DecodeError::Mismatch {
            expected: Ty::String,
            actual: other.ty(),
        }),
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::bytes;
    use crate::codec::MichelsonPacker;
    use crate::parse::error::{ParseError, TokenError};
    use proptest::prelude::*;

    fn ms(s: &str) -> MString {
        s.parse().unwrap()
    }

    /// Packer that unpacks everything as the natural zero
    struct NatOnly;

    impl Packer for NatOnly {
        fn pack(&self, value: &Value) -> Vec<u8> {
            MichelsonPacker.pack(value)
        }

        fn unpack(&self, _: &[u8], _: Ty) -> DecodeResult<Value> {
            Ok(Value::Nat(N::from(0u8)))
        }
    }

    #[test]
    fn affixes() {
        assert!(!starts_with("", "x"));
        assert!(starts_with("x", ""));
        assert!(starts_with("", ""));
        assert!(starts_with("ipfs://Qm", "ipfs://"));
        assert!(ends_with("abc", "bc"));
        assert!(!ends_with("bc", "abc"));
        assert!(ends_with("abc", ""));
        assert!(!ends_with("abc", "ab"));
    }

    #[test]
    fn split_pieces() {
        let comma = ms(",");
        assert_eq!(split(&ms("a,b,,c"), &comma), vec![ms("a"), ms("b"), ms(""), ms("c")]);
        assert_eq!(split(&ms(""), &comma), Vec::<MString>::new());
        assert_eq!(split(&ms(","), &comma), vec![ms(""), ms("")]);
        assert_eq!(split(&ms("abc"), &comma), vec![ms("abc")]);
        assert_eq!(split(&ms("a,,b"), &ms(",,")), vec![ms("a,,b")]);
        assert_eq!(split(&ms("a"), &ms("")), vec![ms("a")]);
    }

    #[test]
    fn decimal_rendering() {
        assert_eq!(of_int(&Z::from(0i8)), "0");
        assert_eq!(of_int(&Z::from(-42i8)), "-42");
        assert_eq!(of_int(&Z::from(1000u16)), "1000");
        assert_eq!(of_nat(&N::from(0u8)), "0");
        assert_eq!(of_nat(&N::from(u64::MAX)), "18446744073709551615");
    }

    #[test]
    fn bytes_to_string() {
        assert_eq!(
            of_bytes(&MichelsonPacker, &Bytes::from(*b"hello")),
            Ok(ms("hello"))
        );
        assert_eq!(of_bytes(&MichelsonPacker, &Bytes::new()), Ok(ms("")));
        assert_eq!(
            of_bytes(&MichelsonPacker, &Bytes::from(vec![b'a', 0xff])),
            Err(DecodeError::Parse(ParseError::Token(
                TokenError::InvalidCharacter { byte: 0xff, position: 1 }
            )))
        );
    }

    #[test]
    fn bytes_to_string_wrong_type() {
        assert_eq!(
            of_bytes(&NatOnly, &Bytes::from(*b"abc")),
            Err(DecodeError::Mismatch {
                expected: Ty::String,
                actual: Ty::Nat
            })
        );
    }

    #[test]
    fn long_payload_round_trip() {
        let text = MString::concat(std::iter::repeat(&ms("0123456789")).take(30));
        let raw = bytes::of_string(&MichelsonPacker, &text).unwrap();
        assert_eq!(raw.len(), 300);
        assert_eq!(of_bytes(&MichelsonPacker, &raw), Ok(text));
    }

    #[test]
    fn token_metadata_uri() {
        let base = ms("ipfs://QmBase/");
        let uri = MString::concat(&[base.clone(), of_nat(&N::from(17u8)), ms(".json")]);
        assert!(starts_with(&uri, &base));
        assert!(ends_with(&uri, ".json"));
        let pieces = split(&uri, &ms("/"));
        assert_eq!(pieces, vec![ms("ipfs:"), ms(""), ms("QmBase"), ms("17.json")]);
    }

    proptest! {
        #[test]
        fn of_bytes_inverts_of_string(s in "[ -~\n]{0,80}") {
            let text = ms(&s);
            let raw = bytes::of_string(&MichelsonPacker, &text).unwrap();
            prop_assert_eq!(of_bytes(&MichelsonPacker, &raw), Ok(text));
        }

        #[test]
        fn of_int_is_canonical_decimal(x in any::<i64>()) {
            let rendered = of_int(&Z::from(x));
            prop_assert_eq!(rendered.as_str(), x.to_string());
        }
    }
}
