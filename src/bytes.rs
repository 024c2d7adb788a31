//! Byte-sequence conversions through the packed form
//!
//! Both helpers pack their argument with the supplied [`Packer`] and strip the
//! header of the packed form, leaving only the payload.

use num_bigint::BigUint;
use tracing::{debug, trace};

use crate::codec::{Packer, Value, NAT_HEADER_LEN, PACK_VERSION, STRING_HEADER_LEN};
use crate::conv::{TAG_INT, TAG_STRING};
use crate::error::{EncodingError, RangeError, Result};
use crate::schema::Bytes;
use crate::text::MString;
use crate::zarith::n::N;

/// Exclusive upper bound on the naturals whose zarith payload is one byte
pub const SINGLE_BYTE_NAT_LIMIT: u8 = 64;

/// Splits `packed` after a header of `header` bytes that must begin with `prefix`.
fn strip_header(
    packed: Vec<u8>,
    header: usize,
    prefix: [u8; 2],
) -> std::result::Result<Bytes, EncodingError> {
    if packed.len() < header {
        debug!(header, actual = packed.len(), "packed form shorter than its header");
        return Err(EncodingError::TruncatedHeader {
            header,
            actual: packed.len(),
        });
    }
    if packed[..2] != prefix {
        debug!(expected = ?prefix, actual = ?&packed[..2], "unexpected packed header");
        return Err(EncodingError::Unexpected {
            expected: prefix.to_vec(),
            actual: packed[..2].to_vec(),
        });
    }
    Ok(Bytes::from(&packed[header..]))
}

/// Returns the raw bytes of `text`: its packed form without the version,
/// tag and length header.
///
/// # Errors
///
/// Returns an [`EncodingError`] if the packed form produced by `packer` is
/// shorter than the header or does not begin with the string header.
///
/// # Examples
///
/// ```
/// # use mutils::{bytes, MichelsonPacker, MString};
/// let text: MString = "ipfs://".parse().unwrap();
/// assert_eq!(&bytes::of_string(&MichelsonPacker, &text).unwrap()[..], b"ipfs://");
/// ```
pub fn of_string<P>(packer: &P, text: &MString) -> std::result::Result<Bytes, EncodingError>
where
    P: Packer + ?Sized,
{
    let packed = packer.pack(&Value::String(text.clone()));
    let ret = strip_header(packed, STRING_HEADER_LEN, [PACK_VERSION, TAG_STRING])?;
    trace!(len = ret.len(), "bytes of string");
    Ok(ret)
}

/// Returns the single-byte zarith payload of `number`: its packed form
/// without the version and tag.
///
/// # Errors
///
/// Returns [`RangeError::NatTooLarge`] if `number` is 64 or more, and an
/// [`EncodingError`] if the packed form produced by `packer` does not have
/// the expected header.
pub fn of_nat<P>(packer: &P, number: &N) -> Result<Bytes>
where
    P: Packer + ?Sized,
{
    let limit = BigUint::from(SINGLE_BYTE_NAT_LIMIT);
    if number.as_inner() >= &limit {
        debug!(value = %number, "natural has no single-byte payload");
        return Err(RangeError::NatTooLarge {
            limit: SINGLE_BYTE_NAT_LIMIT,
            value: number.as_inner().clone(),
        }
        .into());
    }
    let packed = packer.pack(&Value::Nat(number.clone()));
    Ok(strip_header(packed, NAT_HEADER_LEN, [PACK_VERSION, TAG_INT])?)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::codec::{MichelsonPacker, Ty};
    use crate::conv::DecodeResult;
    use crate::error::Error;

    /// Packer that always returns the same bytes
    struct Canned(Vec<u8>);

    impl Packer for Canned {
        fn pack(&self, _: &Value) -> Vec<u8> {
            self.0.clone()
        }

        fn unpack(&self, bytes: &[u8], ty: Ty) -> DecodeResult<Value> {
            MichelsonPacker.unpack(bytes, ty)
        }
    }

    fn ms(s: &str) -> MString {
        s.parse().unwrap()
    }

    #[test]
    fn string_payload() {
        assert_eq!(of_string(&MichelsonPacker, &ms("")).unwrap(), Bytes::new());
        assert_eq!(
            of_string(&MichelsonPacker, &ms("tz")).unwrap(),
            Bytes::from(*b"tz")
        );
    }

    #[test]
    fn nat_payload() {
        assert_eq!(
            of_nat(&MichelsonPacker, &N::from(0u8)).unwrap(),
            Bytes::from([0x00])
        );
        assert_eq!(
            of_nat(&MichelsonPacker, &N::from(63u8)).unwrap(),
            Bytes::from([0x3f])
        );
    }

    #[test]
    fn nat_out_of_range() {
        for value in [64u32, 65, 1 << 20] {
            assert_eq!(
                of_nat(&MichelsonPacker, &N::from(value)),
                Err(Error::Range(RangeError::NatTooLarge {
                    limit: 64,
                    value: BigUint::from(value)
                }))
            );
        }
    }

    #[test]
    fn short_packed_form() {
        let packer = Canned(vec![0x05, 0x01, 0x00]);
        assert_eq!(
            of_string(&packer, &ms("abc")),
            Err(EncodingError::TruncatedHeader { header: 6, actual: 3 })
        );
        let packer = Canned(vec![0x05]);
        assert_eq!(
            of_nat(&packer, &N::from(1u8)),
            Err(Error::Encoding(EncodingError::TruncatedHeader {
                header: 2,
                actual: 1
            }))
        );
    }

    #[test]
    fn foreign_header() {
        let packer = Canned(vec![0x05, 0x0a, 0x00, 0x00, 0x00, 0x01, b'a']);
        assert_eq!(
            of_string(&packer, &ms("a")),
            Err(EncodingError::Unexpected {
                expected: vec![0x05, 0x01],
                actual: vec![0x05, 0x0a]
            })
        );
    }

    #[test]
    fn packer_by_reference() {
        let packer: &dyn Packer = &MichelsonPacker;
        assert_eq!(of_string(packer, &ms("x")).unwrap(), Bytes::from(*b"x"));
    }
}
