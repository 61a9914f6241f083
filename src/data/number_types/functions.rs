//! # Integer helpers
//!
//! Small number theoretic functions used by the derivation algorithms.
use num::{BigInt, Integer, One, Signed, Zero};

/// Greatest common divisor, always non-negative.
pub fn gcd(left: &BigInt, right: &BigInt) -> BigInt {
    left.gcd(right)
}

/// Least common multiple, always non-negative.
pub fn lcm(left: &BigInt, right: &BigInt) -> BigInt {
    left.lcm(right)
}

/// All positive divisors of a number.
///
/// # Arguments
///
/// * `value`: Number to factor, the sign is ignored.
///
/// # Return value
///
/// Divisors in ascending order, including `1` and `|value|`. Empty if `value` is zero.
pub fn divisors_of(value: &BigInt) -> Vec<BigInt> {
    let value = value.abs();
    if value.is_zero() {
        return Vec::new();
    }

    let mut small = Vec::new();
    let mut large = Vec::new();
    let mut candidate = BigInt::one();
    while &candidate * &candidate <= value {
        let (quotient, remainder) = value.div_rem(&candidate);
        if remainder.is_zero() {
            if quotient != candidate {
                large.push(quotient);
            }
            small.push(candidate.clone());
        }
        candidate += 1;
    }

    small.extend(large.into_iter().rev());
    small
}
