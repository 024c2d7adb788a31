//! Base-10 parsing of signed integers

use num_bigint::{BigInt, BigUint, Sign};
use tracing::debug;

use crate::error::ParseIntError;
use crate::string::starts_with;
use crate::zarith::z::Z;

/// Reads `s` as a base-10 integer with an optional leading `-`.
///
/// Leading zeros are accepted and dropped, so this is not the exact inverse
/// of [`string::of_int`](crate::string::of_int): `"007"` reads as `7`, which
/// renders back as `"7"`. No digits at all (`""` or `"-"`) reads as zero.
///
/// # Errors
///
/// Returns [`ParseIntError`] at the first character that is not a decimal
/// digit, with its byte position in `s`.
///
/// # Examples
///
/// ```
/// # use mutils::{int, Z};
/// assert_eq!(int::of_string("-42"), Ok(Z::from(-42i8)));
/// assert_eq!(int::of_string("007"), Ok(Z::from(7u8)));
/// assert!(int::of_string("4 2").is_err());
/// ```
pub fn of_string(s: &str) -> Result<Z, ParseIntError> {
    let negative = starts_with(s, "-");
    let start = usize::from(negative);

    let mut magnitude = BigUint::default();
    for (offset, found) in s[start..].char_indices() {
        let digit = match found.to_digit(10) {
            Some(digit) => digit,
            None => {
                let position = start + offset;
                debug!(input = s, position, %found, "not a decimal digit");
                return Err(ParseIntError { position, found });
            }
        };
        magnitude = magnitude * 10u8 + digit;
    }

    let sign = if negative { Sign::Minus } else { Sign::Plus };
    Ok(Z::new(BigInt::from_biguint(sign, magnitude)))
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::string::of_int;
    use proptest::prelude::*;

    #[test]
    fn examples() {
        assert_eq!(of_string("-42"), Ok(Z::from(-42i8)));
        assert_eq!(of_string("007"), Ok(Z::from(7u8)));
        assert_eq!(of_string("0"), Ok(Z::from(0u8)));
        assert_eq!(of_string("-0"), Ok(Z::from(0u8)));
        assert_eq!(of_string(""), Ok(Z::from(0u8)));
        assert_eq!(of_string("-"), Ok(Z::from(0u8)));
        assert_eq!(
            of_string("123456789012345678901234567890").map(|z| z.to_string()),
            Ok(String::from("123456789012345678901234567890"))
        );
    }

    #[test]
    fn rejects_non_digits() {
        assert_eq!(of_string("12a"), Err(ParseIntError { position: 2, found: 'a' }));
        assert_eq!(of_string("--1"), Err(ParseIntError { position: 1, found: '-' }));
        assert_eq!(of_string("+1"), Err(ParseIntError { position: 0, found: '+' }));
        assert_eq!(of_string("-1.5"), Err(ParseIntError { position: 2, found: '.' }));
        assert_eq!(of_string("\u{663}"), Err(ParseIntError { position: 0, found: '\u{663}' }));
    }

    #[test]
    fn leading_zeros_do_not_round_trip() {
        let z = of_string("007").unwrap();
        assert_eq!(of_int(&z), "7");
    }

    proptest! {
        #[test]
        fn canonical_decimal_round_trip(x in any::<i128>()) {
            let z = Z::new(BigInt::from(x));
            prop_assert_eq!(of_string(of_int(&z).as_str()), Ok(z));
        }

        #[test]
        fn matches_std_parse(s in "-?[0-9]{1,30}") {
            let expected: BigInt = s.parse().unwrap();
            prop_assert_eq!(of_string(&s), Ok(Z::new(expected)));
        }
    }
}
