//! # Mixed fractions
//!
//! An exact rational number that can be viewed as an integer part plus a proper fraction, like
//! "365 1/4". It wraps `num::BigRational`, following the newtype pattern, so the numerator and
//! denominator are always fully reduced, the denominator is positive and the sign is carried by
//! the numerator.
use std::fmt;
use std::str::FromStr;

use num::{BigInt, BigRational, Signed, Zero};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{CalendarError, Result};
use crate::io::number::text_to_fraction;

mod wrapping;

/// An arbitrary precision rational number with an integer and a fraction part.
#[derive(Clone, Ord, PartialOrd, Eq, PartialEq, Hash, Debug)]
pub struct MixedFraction(BigRational);

impl MixedFraction {
    /// Create a number from an integer part and a fraction part.
    ///
    /// A negative denominator flips the sign of the numerator. When the integer part is
    /// non-zero, a negative numerator negates the whole number, so that `(1, -1, 2)` is `-1 1/2`.
    ///
    /// # Arguments
    ///
    /// * `integer`: Whole part.
    /// * `numerator`: Numerator of the fraction part.
    /// * `denominator`: Denominator of the fraction part, can't be zero.
    ///
    /// # Errors
    ///
    /// `InvalidRational` if the denominator is zero.
    pub fn new(
        integer: impl Into<BigInt>,
        numerator: impl Into<BigInt>,
        denominator: impl Into<BigInt>,
    ) -> Result<Self> {
        let integer = integer.into();
        let mut numerator = numerator.into();
        let mut denominator = denominator.into();

        if denominator.is_zero() {
            return Err(CalendarError::InvalidRational);
        }
        if denominator.is_negative() {
            numerator = -numerator;
            denominator = -denominator;
        }

        let mut integer_is_negative = integer.is_negative();
        if !integer.is_zero() && numerator.is_negative() {
            integer_is_negative = !integer_is_negative;
            numerator = -numerator;
        }

        let magnitude = BigRational::new(numerator, denominator)
            + BigRational::from_integer(integer.abs());
        Ok(Self(if integer_is_negative { -magnitude } else { magnitude }))
    }

    /// Create a proper or improper fraction without integer part.
    ///
    /// # Errors
    ///
    /// `InvalidRational` if the denominator is zero.
    pub fn from_fraction(
        numerator: impl Into<BigInt>,
        denominator: impl Into<BigInt>,
    ) -> Result<Self> {
        Self::new(0, numerator, denominator)
    }

    /// A whole number.
    pub fn from_integer(value: impl Into<BigInt>) -> Self {
        Self(BigRational::from_integer(value.into()))
    }

    /// The value one half, used as threshold by several algorithms.
    pub fn one_half() -> Self {
        Self(BigRational::new(1.into(), 2.into()))
    }

    /// Integer part, truncated towards zero.
    pub fn integer(&self) -> BigInt {
        self.0.to_integer()
    }

    /// Fraction part, with the same sign as the number itself.
    pub fn fraction(&self) -> Self {
        Self(self.0.fract())
    }

    /// Whether the absolute value is at least one.
    pub fn has_integer_part(&self) -> bool {
        self.0.numer().abs() >= *self.0.denom()
    }

    /// Whether the number is not a whole number.
    pub fn has_fraction_part(&self) -> bool {
        !self.0.is_integer()
    }

    /// Numerator of the improper fraction, including the integer part.
    pub fn true_numerator(&self) -> &BigInt {
        self.0.numer()
    }

    /// Numerator of the fraction part, signed like the number.
    pub fn numerator(&self) -> BigInt {
        self.0.numer() % self.0.denom()
    }

    /// Positive denominator of the reduced fraction.
    pub fn denominator(&self) -> &BigInt {
        self.0.denom()
    }

    /// Whether this number is smaller than zero.
    pub fn is_negative(&self) -> bool {
        self.0.is_negative()
    }

    /// Absolute value.
    #[must_use]
    pub fn abs(&self) -> Self {
        Self(self.0.abs())
    }

    /// Largest integer not greater than this number.
    pub fn floor(&self) -> BigInt {
        self.0.floor().to_integer()
    }

    /// Smallest integer not less than this number.
    pub fn ceil(&self) -> BigInt {
        self.0.ceil().to_integer()
    }

    /// Division that reports a zero divisor instead of panicking.
    ///
    /// # Errors
    ///
    /// `InvalidRational` if `other` is zero.
    pub fn checked_div(&self, other: &Self) -> Result<Self> {
        if other.is_zero() {
            Err(CalendarError::InvalidRational)
        } else {
            Ok(Self(&self.0 / &other.0))
        }
    }

    /// Multiply by a whole number.
    #[must_use]
    pub fn scale(&self, factor: impl Into<BigInt>) -> Self {
        Self(&self.0 * BigRational::from_integer(factor.into()))
    }
}

/// Prints as "I N/D", leaving out the parts that are zero.
///
/// The minus sign is printed once, in front of the integer part if there is one.
impl fmt::Display for MixedFraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let integer = self.integer();
        let numerator = self.numerator();

        match (integer.is_zero(), numerator.is_zero()) {
            (true, true) => write!(f, "0"),
            (false, true) => write!(f, "{}", integer),
            (true, false) => write!(f, "{}/{}", numerator, self.denominator()),
            (false, false) => write!(f, "{} {}/{}", integer, numerator.abs(), self.denominator()),
        }
    }
}

impl FromStr for MixedFraction {
    type Err = CalendarError;

    fn from_str(text: &str) -> Result<Self> {
        text_to_fraction(text)
    }
}

impl Serialize for MixedFraction {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for MixedFraction {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}

/// Shorthand for creating a mixed fraction in tests.
#[macro_export]
macro_rules! MF {
    ($integer:expr) => {
        $crate::data::number_types::fraction::MixedFraction::from_integer($integer)
    };
    ($numerator:expr, $denominator:expr) => {
        $crate::data::number_types::fraction::MixedFraction::from_fraction($numerator, $denominator)
            .unwrap()
    };
    ($integer:expr, $numerator:expr, $denominator:expr) => {
        $crate::data::number_types::fraction::MixedFraction::new($integer, $numerator, $denominator)
            .unwrap()
    };
}
