//! Exact arithmetic over naturals
//!
//! Both routines use only the elementary operations the host charges least
//! for (addition, multiplication, halving and comparison), and never
//! approximate.

use std::collections::BTreeMap;

use num_bigint::BigUint;
use num_integer::Integer;
use num_traits::{One, Zero};
use tracing::trace;

use crate::zarith::n::N;

/// Computes `base^exponent` by iterated squaring.
///
/// Each round tests the low bit of the exponent before halving it, and
/// squares the base whether or not that bit was set. `pow(_, 0)` is `1`,
/// including for a zero base.
///
/// # Examples
///
/// ```
/// # use mutils::{math::pow, N};
/// assert_eq!(pow(&N::from(3u8), &N::from(5u8)), N::from(243u8));
/// assert_eq!(pow(&N::from(0u8), &N::from(0u8)), N::from(1u8));
/// ```
#[must_use]
pub fn pow(base: &N, exponent: &N) -> N {
    let mut result = BigUint::one();
    let mut base: BigUint = base.as_inner().clone();
    let mut exponent: BigUint = exponent.as_inner().clone();
    while !exponent.is_zero() {
        if exponent.is_odd() {
            result *= &base;
        }
        exponent >>= 1u8;
        base = &base * &base;
    }
    N(result)
}

/// Computes the median of a sequence of naturals from a histogram of its
/// distinct values, without sorting the sequence itself.
///
/// For an odd number of values this is the value of middle rank. For an even
/// number it is the floored mean of the two middle values, unless both lie in
/// the run of a single repeated value, in which case it is that value.
///
/// Returns `None` for an empty sequence.
///
/// # Examples
///
/// ```
/// # use mutils::{math::median, N};
/// let xs: Vec<N> = [1u8, 2, 3, 4].into_iter().map(N::from).collect();
/// assert_eq!(median(&xs), Some(N::from(2u8)));
/// assert_eq!(median(&[] as &[N]), None);
/// ```
pub fn median<'a, I>(submissions: I) -> Option<N>
where
    I: IntoIterator<Item = &'a N>,
{
    let mut histogram: BTreeMap<&'a BigUint, usize> = BTreeMap::new();
    let mut len: usize = 0;
    for x in submissions {
        *histogram.entry(x.as_inner()).or_insert(0) += 1;
        len += 1;
    }
    if len == 0 {
        return None;
    }

    let half = len / 2;
    let averaging = half * 2 == len;
    let mut i: usize = 0;
    let mut result = BigUint::zero();

    for (&key, &count) in &histogram {
        if averaging {
            if i < half {
                result = key.clone();
                i += count;
                if i > half {
                    // both middle ranks fall in this run
                    break;
                }
            } else {
                result = (result + key) >> 1u8;
                break;
            }
        } else if i <= half {
            result = key.clone();
            i += count;
        } else {
            break;
        }
    }

    trace!(len, distinct = histogram.len(), median = %result, "computed median");
    Some(N(result))
}

#[cfg(test)]
mod test {
    use super::*;
    use proptest::prelude::*;

    fn nats(xs: &[u64]) -> Vec<N> {
        xs.iter().copied().map(N::from).collect()
    }

    fn nat(x: u64) -> N {
        N::from(x)
    }

    #[test]
    fn pow_examples() {
        assert_eq!(pow(&nat(0), &nat(0)), nat(1));
        assert_eq!(pow(&nat(7), &nat(0)), nat(1));
        assert_eq!(pow(&nat(0), &nat(3)), nat(0));
        assert_eq!(pow(&nat(2), &nat(10)), nat(1024));
        assert_eq!(pow(&nat(3), &nat(5)), nat(243));
        assert_eq!(pow(&nat(10), &nat(18)), nat(1_000_000_000_000_000_000));
    }

    #[test]
    fn pow_beyond_machine_width() {
        let two_to_200 = pow(&nat(2), &nat(200));
        assert_eq!(two_to_200.bits(), 201);
        assert_eq!(*two_to_200, BigUint::one() << 200u32);
    }

    #[test]
    fn median_examples() {
        assert_eq!(median(&nats(&[5])), Some(nat(5)));
        assert_eq!(median(&nats(&[1, 2, 3])), Some(nat(2)));
        assert_eq!(median(&nats(&[1, 2, 3, 4])), Some(nat(2)));
        assert_eq!(median(&nats(&[1, 1, 1, 2])), Some(nat(1)));
        assert_eq!(median(&nats(&[2, 2, 2, 2, 2, 2])), Some(nat(2)));
    }

    #[test]
    fn median_ignores_input_order() {
        assert_eq!(median(&nats(&[9, 1, 5, 3, 7])), Some(nat(5)));
        assert_eq!(median(&nats(&[4, 1, 4, 1])), Some(nat(2)));
        assert_eq!(median(&nats(&[10, 3])), Some(nat(6)));
    }

    #[test]
    fn median_of_nothing() {
        assert_eq!(median(&Vec::<N>::new()), None);
    }

    fn sorted_median(xs: &[u64]) -> u64 {
        let mut xs = xs.to_vec();
        xs.sort_unstable();
        let half = xs.len() / 2;
        if xs.len() % 2 == 1 {
            xs[half]
        } else {
            ((u128::from(xs[half - 1]) + u128::from(xs[half])) / 2) as u64
        }
    }

    proptest! {
        #[test]
        fn pow_matches_biguint(base in 0u32..1000, exponent in 0u32..64) {
            let expected = BigUint::from(base).pow(exponent);
            prop_assert_eq!(pow(&N::from(base), &N::from(exponent)), N(expected));
        }

        #[test]
        fn median_matches_sorting(xs in proptest::collection::vec(0u64..20, 1..40)) {
            prop_assert_eq!(median(&nats(&xs)), Some(nat(sorted_median(&xs))));
        }

        #[test]
        fn median_of_wide_values(xs in proptest::collection::vec(any::<u64>(), 1..12)) {
            prop_assert_eq!(median(&nats(&xs)), Some(nat(sorted_median(&xs))));
        }
    }
}
