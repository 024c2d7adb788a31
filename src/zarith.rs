//! Arbitrary-precision naturals and integers
//!
//! [`N`] and [`Z`] are newtypes around [`BigUint`] and [`BigInt`] that carry the
//! Micheline binary representation of `nat` and `int` values. Both are packed
//! under the same node tag, followed by a *zarith* integer: the first byte holds
//! a continuation bit (`0x80`), a sign bit (`0x40`) and the six least significant
//! bits of the magnitude; every subsequent byte holds a continuation bit and the
//! next seven bits.
//!
//! A consequence of this layout is that a natural below 64 is serialized as one
//! byte whose value is the natural itself.

use ::num_bigint::{BigInt, BigUint, Sign};

use crate::parse::error::{ParseError, TokenError};
use crate::parse::ParseResult;

trait Zarith: Sized {
    fn deserialize(bytes: &[u8]) -> ParseResult<Self>;

    #[must_use]
    fn serialize(&self) -> Vec<u8>;
}

fn serialize_parts(negative: bool, abs: &BigUint) -> Vec<u8> {
    // We initially shift by one, leaving an offset in the 6-group of
    // LSB in the first serialized byte, which will be corrected on its
    // own rather than require additional upfront BigUint arithmetic
    let shifted: BigUint = abs << 1u8;
    let mut ret = shifted.to_radix_le(0x80);

    if let Some(first) = ret.first_mut() {
        *first >>= 1u8;
        if negative {
            *first |= 0x40u8;
        }
    }

    if let Some((_, init)) = ret.split_last_mut() {
        for byt in init.iter_mut() {
            *byt |= 0x80;
        }
    }

    ret
}

fn deserialize_parts(bytes: &[u8]) -> ParseResult<BigInt> {
    let (&first, rest) = match bytes.split_first() {
        Some(split) => split,
        None => return Err(TokenError::NonTerminating(Vec::new()).into()),
    };

    if rest.last() == Some(&0x00) {
        return Err(TokenError::NonCanonical(bytes.to_vec()).into());
    }

    let sg = match first & 0x40u8 {
        0 => Sign::Plus,
        _ => Sign::Minus,
    };

    let lo7: Vec<u8> = rest.iter().map(|b| b & 0x7f).collect();

    let mut abs = if lo7.is_empty() {
        BigUint::default()
    } else {
        BigUint::from_radix_le(&lo7, 0x80)
            .ok_or_else(|| ParseError::from(TokenError::NonCanonical(bytes.to_vec())))?
    };
    abs <<= 6u8;
    abs |= BigUint::from(first & 0x3fu8);
    Ok(BigInt::from_biguint(sg, abs))
}

macro_rules! impl_zarith {
    ($x:ident, $name:literal) => {
        impl Encode for $x {
            fn write_to<U: Target>(&self, buf: &mut U) -> usize {
                buf.push_one(TAG_INT) + buf.push_all(&<$x as Zarith>::serialize(self))
            }
        }

        impl Decode for $x {
            fn parse<P: Parser>(p: &mut P) -> ParseResult<Self> {
                let _ = p.take_tagword(&[TAG_INT], $name)?;
                let raw = p.take_self_terminating(|byte| byte & 0x80 == 0)?;
                <$x as Zarith>::deserialize(&raw)
            }
        }
    };
}

pub mod n {
    use std::{convert::TryFrom, fmt::Display, ops::Deref};

    use ::num_bigint::{BigInt, BigUint};
    use ::num_traits::Zero;

    use super::{Zarith, deserialize_parts, serialize_parts};
    use crate::conv::{target::Target, Decode, Encode, TAG_INT};
    use crate::parse::error::ExternalError;
    use crate::parse::{ParseResult, Parser};

    /// Arbitrary-precision natural number (Michelson `nat`)
    #[derive(PartialEq, Eq, PartialOrd, Ord, Clone, Hash, Default)]
    #[repr(transparent)]
    pub struct N(pub BigUint);

    impl N {
        pub fn into_inner(self) -> BigUint {
            self.0
        }

        pub const fn as_inner(&self) -> &BigUint {
            &self.0
        }

        pub const fn new(nat: BigUint) -> Self {
            Self(nat)
        }

        /// Returns `true` if this natural is zero
        #[must_use]
        pub fn is_zero(&self) -> bool {
            self.0.is_zero()
        }
    }

    impl std::fmt::Debug for N {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, r#"ℕ({})"#, &self.0.to_string())
        }
    }

    impl Display for N {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> Result<(), std::fmt::Error> {
            <BigUint as Display>::fmt(&self.0, f)
        }
    }

    impl std::str::FromStr for N {
        type Err = ::num_bigint::ParseBigIntError;

        fn from_str(s: &str) -> Result<Self, Self::Err> {
            Ok(Self(s.parse()?))
        }
    }

    #[cfg(feature = "serde_impls")]
    impl serde::Serialize for N {
        fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: serde::Serializer,
        {
            serializer.collect_str(&self.0)
        }
    }

    impl From<N> for BigUint {
        fn from(val: N) -> Self {
            val.0
        }
    }

    impl From<BigUint> for N {
        fn from(value: BigUint) -> Self {
            Self(value)
        }
    }

    impl TryFrom<BigInt> for N {
        type Error = ExternalError;

        fn try_from(value: BigInt) -> Result<Self, Self::Error> {
            match value.to_biguint() {
                Some(nat) => Ok(Self(nat)),
                None => Err(ExternalError::NegativeNatural(value)),
            }
        }
    }

    macro_rules! impl_nat_coerce {
        ($src:ty) => {
            impl TryFrom<N> for $src {
                type Error = <$src as TryFrom<BigUint>>::Error;

                fn try_from(val: N) -> Result<$src, Self::Error> {
                    <$src as TryFrom<BigUint>>::try_from(val.0)
                }
            }

            impl From<$src> for N {
                fn from(val: $src) -> Self {
                    Self(BigUint::from(val))
                }
            }
        };
    }

    impl_nat_coerce!(u8);
    impl_nat_coerce!(u16);
    impl_nat_coerce!(u32);
    impl_nat_coerce!(u64);
    impl_nat_coerce!(usize);

    impl Deref for N {
        type Target = BigUint;

        fn deref(&self) -> &Self::Target {
            &self.0
        }
    }

    impl Zarith for N {
        fn deserialize(bytes: &[u8]) -> ParseResult<Self> {
            Ok(N::try_from(deserialize_parts(bytes)?)?)
        }

        fn serialize(&self) -> Vec<u8> {
            serialize_parts(false, &self.0)
        }
    }

    impl_zarith!(N, "nat");

}

pub mod z {
    use super::{Zarith, deserialize_parts, serialize_parts};
    use std::{convert::TryFrom, fmt::Display, ops::Deref};

    use ::num_bigint::{BigInt, Sign};
    use ::num_traits::{Signed, Zero};

    use super::n::N;
    use crate::conv::{target::Target, Decode, Encode, TAG_INT};
    use crate::parse::{ParseResult, Parser};

    /// Arbitrary-precision signed integer (Michelson `int`)
    #[derive(PartialEq, Eq, PartialOrd, Ord, Clone, Hash, Default)]
    #[repr(transparent)]
    pub struct Z(pub BigInt);

    impl Z {
        pub fn into_inner(self) -> BigInt {
            self.0
        }

        pub const fn as_inner(&self) -> &BigInt {
            &self.0
        }

        pub const fn new(int: BigInt) -> Self {
            Self(int)
        }

        /// Returns `true` if this integer is strictly below zero
        #[must_use]
        pub fn is_negative(&self) -> bool {
            self.0.is_negative()
        }

        /// Returns `true` if this integer is zero
        #[must_use]
        pub fn is_zero(&self) -> bool {
            self.0.is_zero()
        }

        /// Returns the absolute value of this integer as a natural (Michelson `ABS`)
        #[must_use]
        pub fn abs(&self) -> N {
            N(self.0.magnitude().clone())
        }
    }

    impl std::fmt::Debug for Z {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "\u{2124}({})", &self.0.to_string())
        }
    }

    impl Display for Z {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> Result<(), std::fmt::Error> {
            <BigInt as Display>::fmt(&self.0, f)
        }
    }

    impl std::str::FromStr for Z {
        type Err = ::num_bigint::ParseBigIntError;

        fn from_str(s: &str) -> Result<Self, Self::Err> {
            Ok(Self(s.parse()?))
        }
    }

    #[cfg(feature = "serde_impls")]
    impl serde::Serialize for Z {
        fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: serde::Serializer,
        {
            serializer.collect_str(&self.0)
        }
    }

    impl From<Z> for BigInt {
        fn from(val: Z) -> Self {
            val.0
        }
    }

    impl From<BigInt> for Z {
        fn from(value: BigInt) -> Self {
            Self(value)
        }
    }

    impl From<N> for Z {
        fn from(value: N) -> Self {
            Self(BigInt::from_biguint(Sign::Plus, value.into_inner()))
        }
    }

    macro_rules! impl_int_coerce {
        ($src:ty) => {
            impl TryFrom<Z> for $src {
                type Error = <$src as TryFrom<BigInt>>::Error;
                fn try_from(val: Z) -> Result<$src, Self::Error> {
                    <$src as TryFrom<BigInt>>::try_from(val.0)
                }
            }

            impl From<$src> for Z {
                fn from(val: $src) -> Self {
                    Self(BigInt::from(val))
                }
            }
        };
    }
    impl_int_coerce!(i8);
    impl_int_coerce!(i16);
    impl_int_coerce!(i32);
    impl_int_coerce!(i64);

    impl_int_coerce!(u8);
    impl_int_coerce!(u16);
    impl_int_coerce!(u32);
    impl_int_coerce!(u64);

    impl Deref for Z {
        type Target = BigInt;

        fn deref(&self) -> &Self::Target {
            &self.0
        }
    }

    impl Zarith for Z {
        fn deserialize(bytes: &[u8]) -> ParseResult<Self> {
            Ok(Self(deserialize_parts(bytes)?))
        }

        fn serialize(&self) -> Vec<u8> {
            serialize_parts(self.0.is_negative(), self.0.magnitude())
        }
    }

    impl_zarith!(Z, "int");

    #[cfg(test)]
    mod test {
        use super::*;
        use crate::parse::error::{ParseError, TokenError};

        static INT: fn(i32) -> Z = |i: i32| Z(<i32 as Into<BigInt>>::into(i));

        #[test]
        fn int_conv() {
            assert_eq!(INT(0), Z::deserialize(&[0x00]).unwrap());
            assert_eq!(INT(0).serialize(), vec![0x00]);
            assert_eq!(INT(1), Z::deserialize(&[0x01]).unwrap());
            assert_eq!(INT(64), Z::deserialize(&[0x80, 0x01]).unwrap());
            assert_eq!(INT(64).serialize(), vec![0x80, 0x01]);
            assert_eq!(INT(-32), Z::deserialize(&[0x60]).unwrap());
            assert_eq!(INT(-32).serialize(), vec![0x60]);
            assert_eq!(INT(-64).serialize(), vec![0xc0, 0x01]);
        }

        #[test]
        fn int_node() {
            assert_eq!(INT(-42).to_bytes(), hex::decode("006a").unwrap());
            assert_eq!(Z::try_decode(&hex::decode("006a").unwrap()), Ok(INT(-42)));
        }

        #[test]
        fn int_rejects_trailing_zero_group() {
            assert_eq!(
                Z::deserialize(&[0x81, 0x00]),
                Err(ParseError::from(TokenError::NonCanonical(vec![0x81, 0x00])))
            );
        }

        #[test]
        fn decimal_text() {
            assert_eq!("-1000".parse::<Z>().unwrap(), INT(-1000));
            assert!("1e3".parse::<Z>().is_err());
        }

        #[test]
        fn abs_is_magnitude() {
            assert_eq!(INT(-17).abs(), N::from(17u8));
            assert_eq!(Z::from(N::from(9u8)), INT(9));
        }
    }
}
