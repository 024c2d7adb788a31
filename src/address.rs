//! Account addresses and the originated-contract range check
//!
//! Addresses are kept in their 22-byte binary form, which is also what
//! determines their native ordering: every implicit account (`tz1`..`tz4`)
//! sorts below every originated contract (`KT1`), and within each class
//! addresses are ordered by curve tag and then by hash.
//!
//! The textual form is base58check with a class-specific prefix.

use std::convert::TryFrom;
use std::fmt::Display;
use std::str::FromStr;

#[cfg(feature = "serde_impls")]
use serde::Serialize;
use tracing::debug;

use crate::conv::target::Target;
use crate::conv::{parse_sized, write_sized, Decode, Encode, TAG_BYTES, TAG_STRING};
use crate::parse::error::ExternalError;
use crate::parse::{ParseResult, Parser};

/// Width in bytes of the hash carried by every address class
pub const HASH_LEN: usize = 20;

/// Width in bytes of the binary form of an address
pub const BINARY_LEN: usize = 22;

/// Lowest originated-contract address under the native ordering (all-zero hash)
pub const KT1_LOW_LITERAL: &str = "KT18amZmM5W7qDWVt2pH6uj7sCEd3kbzLrHT";

/// Highest originated-contract address under the native ordering (all-`0xff` hash)
pub const KT1_HIGH_LITERAL: &str = "KT1XvNYseNDJJ6Kw27qhSEDF8ys8JhDopzfG";

/// Decoded form of [`KT1_LOW_LITERAL`]
pub const KT1_LOW: Address = Address::new(AddressKind::Kt1, [0x00; HASH_LEN]);

/// Decoded form of [`KT1_HIGH_LITERAL`]
pub const KT1_HIGH: Address = Address::new(AddressKind::Kt1, [0xff; HASH_LEN]);

/// Address class, in native order
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AddressKind {
    /// Implicit account, ed25519 key
    Tz1,
    /// Implicit account, secp256k1 key
    Tz2,
    /// Implicit account, p256 key
    Tz3,
    /// Implicit account, bls12-381 key
    Tz4,
    /// Originated contract
    Kt1,
}

impl AddressKind {
    const ALL: [AddressKind; 5] = [Self::Tz1, Self::Tz2, Self::Tz3, Self::Tz4, Self::Kt1];

    /// Base58check version prefix of this class
    #[must_use]
    pub const fn b58_prefix(self) -> [u8; 3] {
        match self {
            Self::Tz1 => [6, 161, 159],
            Self::Tz2 => [6, 161, 161],
            Self::Tz3 => [6, 161, 164],
            Self::Tz4 => [6, 161, 166],
            Self::Kt1 => [2, 90, 121],
        }
    }

    /// Returns `true` for the implicit-account classes
    #[must_use]
    pub const fn is_implicit(self) -> bool {
        !matches!(self, Self::Kt1)
    }

    const fn curve_tag(self) -> u8 {
        match self {
            Self::Tz1 | Self::Kt1 => 0x00,
            Self::Tz2 => 0x01,
            Self::Tz3 => 0x02,
            Self::Tz4 => 0x03,
        }
    }
}

/// Failure to interpret text or bytes as an address
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AddressError {
    /// The text is not valid base58check
    Base58(bs58::decode::Error),
    /// The decoded payload does not start with a known prefix, or has the wrong length
    UnknownPrefix(Vec<u8>),
    /// The binary form is malformed
    InvalidBinary(Vec<u8>),
}

impl Display for AddressError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AddressError::Base58(err) => write!(f, "invalid base58check address: {}", err),
            AddressError::UnknownPrefix(payload) => write!(
                f,
                "{}-byte base58 payload is not a known address encoding",
                payload.len()
            ),
            AddressError::InvalidBinary(bytes) => {
                write!(f, "malformed binary address: ")?;
                crate::util::write_all_hex(bytes, f)
            }
        }
    }
}

impl std::error::Error for AddressError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AddressError::Base58(err) => Some(err),
            _ => None,
        }
    }
}

impl From<bs58::decode::Error> for AddressError {
    fn from(err: bs58::decode::Error) -> Self {
        Self::Base58(err)
    }
}

/// Implicit-account or originated-contract address
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Address {
    kind: AddressKind,
    hash: [u8; HASH_LEN],
}

impl Address {
    #[must_use]
    pub const fn new(kind: AddressKind, hash: [u8; HASH_LEN]) -> Self {
        Self { kind, hash }
    }

    #[must_use]
    pub const fn kind(&self) -> AddressKind {
        self.kind
    }

    #[must_use]
    pub const fn hash(&self) -> &[u8; HASH_LEN] {
        &self.hash
    }

    /// Parses the base58check textual form of an address.
    ///
    /// # Errors
    ///
    /// Returns [`AddressError::Base58`] for invalid characters or checksums and
    /// [`AddressError::UnknownPrefix`] for payloads that are not addresses.
    pub fn from_b58check(s: &str) -> Result<Self, AddressError> {
        let payload = bs58::decode(s).with_check(None).into_vec()?;
        if payload.len() == 3 + HASH_LEN {
            for kind in AddressKind::ALL {
                if payload[..3] == kind.b58_prefix() {
                    let mut hash = [0u8; HASH_LEN];
                    hash.copy_from_slice(&payload[3..]);
                    return Ok(Self { kind, hash });
                }
            }
        }
        Err(AddressError::UnknownPrefix(payload))
    }

    /// Renders the base58check textual form of this address
    #[must_use]
    pub fn to_b58check(&self) -> String {
        let mut payload = Vec::with_capacity(3 + HASH_LEN);
        payload.extend_from_slice(&self.kind.b58_prefix());
        payload.extend_from_slice(&self.hash);
        bs58::encode(payload).with_check().into_string()
    }

    /// Returns the 22-byte binary form of this address
    #[must_use]
    pub fn to_binary(&self) -> [u8; BINARY_LEN] {
        let mut ret = [0u8; BINARY_LEN];
        if self.kind.is_implicit() {
            ret[0] = 0x00;
            ret[1] = self.kind.curve_tag();
            ret[2..].copy_from_slice(&self.hash);
        } else {
            ret[0] = 0x01;
            ret[1..=HASH_LEN].copy_from_slice(&self.hash);
            ret[BINARY_LEN - 1] = 0x00;
        }
        ret
    }

    /// Interprets a 22-byte binary address.
    ///
    /// # Errors
    ///
    /// Returns [`AddressError::InvalidBinary`] if `bytes` has the wrong length,
    /// an unknown class or curve tag, or non-zero padding.
    pub fn from_binary(bytes: &[u8]) -> Result<Self, AddressError> {
        let invalid = || AddressError::InvalidBinary(bytes.to_vec());
        if bytes.len() != BINARY_LEN {
            return Err(invalid());
        }
        let mut hash = [0u8; HASH_LEN];
        let kind = match (bytes[0], bytes[1]) {
            (0x00, curve) => {
                hash.copy_from_slice(&bytes[2..]);
                match curve {
                    0x00 => AddressKind::Tz1,
                    0x01 => AddressKind::Tz2,
                    0x02 => AddressKind::Tz3,
                    0x03 => AddressKind::Tz4,
                    _ => return Err(invalid()),
                }
            }
            (0x01, _) if bytes[BINARY_LEN - 1] == 0x00 => {
                hash.copy_from_slice(&bytes[1..=HASH_LEN]);
                AddressKind::Kt1
            }
            _ => return Err(invalid()),
        };
        Ok(Self { kind, hash })
    }
}

/// Returns `true` if `address` lies in the originated-contract range
/// `[KT1_LOW, KT1_HIGH]` of the native address ordering.
///
/// The bounds are the extremal `KT1` addresses of the current address
/// encoding; they do not carry over to other addressing schemes.
#[must_use]
pub fn is_kt1(address: &Address) -> bool {
    KT1_HIGH >= *address && KT1_LOW <= *address
}

impl Display for Address {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_b58check())
    }
}

impl FromStr for Address {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_b58check(s)
    }
}

impl TryFrom<&[u8]> for Address {
    type Error = AddressError;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        Self::from_binary(bytes)
    }
}

#[cfg(feature = "serde_impls")]
impl Serialize for Address {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_b58check())
    }
}

impl Encode for Address {
    fn write_to<U: Target>(&self, buf: &mut U) -> usize {
        write_sized(TAG_BYTES, &self.to_binary(), buf)
    }
}

impl Decode for Address {
    /// Accepts both the optimized (bytes) and the readable (string) packed
    /// forms of an address.
    fn parse<P: Parser>(p: &mut P) -> ParseResult<Self> {
        let tag = p.take_tagword(&[TAG_BYTES, TAG_STRING], "address")?;
        let raw = parse_sized(p)?;
        let res = match tag {
            TAG_BYTES => Address::from_binary(raw),
            _ => match std::str::from_utf8(raw) {
                Ok(s) => Address::from_b58check(s),
                Err(_) => Err(AddressError::InvalidBinary(raw.to_vec())),
            },
        };
        res.map_err(|err| {
            debug!(error = %err, "packed address rejected");
            ExternalError::InvalidAddress(raw.to_vec()).into()
        })
    }
}
