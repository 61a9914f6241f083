//! # Number text
//!
//! Reading and writing lengths of time in three notations:
//!
//! * fraction text, like "365 97/400", the `Display` form of `MixedFraction`;
//! * decimal text with an optional repeating period, like "29.5(3)";
//! * day, hour, minute and second text, like "29 12h 44m 3s", for a day of any subdivision.
//!
//! Every notation reads back exactly what it writes.
use std::collections::HashMap;
use std::str::FromStr;

use num::{BigInt, Integer, One, Zero};
use serde::{Deserialize, Serialize};

use crate::data::number_types::fraction::MixedFraction;
use crate::error::{CalendarError, Result};

const FRACTION: &str = "fraction";
const DECIMAL: &str = "decimal";
const DHMS: &str = "day-hour-minute-second";

/// How a day is subdivided.
///
/// These are scaling factors rather than wall clock values: a day has `hours` hours of `minutes`
/// minutes of `seconds` seconds each.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Serialize, Deserialize)]
pub struct DayLength {
    #[allow(missing_docs)]
    pub hours: u32,
    #[allow(missing_docs)]
    pub minutes: u32,
    #[allow(missing_docs)]
    pub seconds: u32,
}

impl DayLength {
    #[allow(missing_docs)]
    pub fn minutes_in_day(&self) -> u64 {
        u64::from(self.hours) * u64::from(self.minutes)
    }

    #[allow(missing_docs)]
    pub fn seconds_in_day(&self) -> u64 {
        self.minutes_in_day() * u64::from(self.seconds)
    }
}

/// An Earth day.
impl Default for DayLength {
    fn default() -> Self {
        Self { hours: 24, minutes: 60, seconds: 60 }
    }
}

/// One of the supported notations.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Notation {
    /// "I N/D"
    Fraction,
    /// "I.F(P)"
    Decimal,
    /// "D Hh Mm Ss"
    DayHourMinuteSecond(DayLength),
}

impl Notation {
    /// Read a number in this notation.
    ///
    /// # Errors
    ///
    /// `UnparseableNumber` if the text doesn't match the notation, `InvalidRational` for a zero
    /// denominator or a day without subdivisions.
    pub fn parse(&self, text: &str) -> Result<MixedFraction> {
        match self {
            Self::Fraction => text_to_fraction(text),
            Self::Decimal => decimal_text_to_fraction(text),
            Self::DayHourMinuteSecond(day) => dhms_text_to_fraction(text, day),
        }
    }

    /// Write a number in this notation.
    pub fn format(&self, value: &MixedFraction) -> String {
        match self {
            Self::Fraction => value.to_string(),
            Self::Decimal => fraction_to_decimal_text(value),
            Self::DayHourMinuteSecond(day) => fraction_to_dhms_text(value, day),
        }
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
enum Sign {
    Positive,
    Negative,
}

impl Sign {
    fn split(text: &str) -> (Self, &str) {
        match text.strip_prefix('-') {
            Some(rest) => (Self::Negative, rest),
            None => (Self::Positive, text),
        }
    }

    fn apply(self, value: MixedFraction) -> MixedFraction {
        match self {
            Self::Positive => value,
            Self::Negative => -value,
        }
    }
}

/// Parse a non-empty string of ASCII digits.
fn digits(text: &str, original: &str, format: &'static str) -> Result<BigInt> {
    if text.is_empty() || !text.bytes().all(|byte| byte.is_ascii_digit()) {
        return Err(CalendarError::unparseable(original, format));
    }

    BigInt::from_str(text).map_err(|_| CalendarError::unparseable(original, format))
}

fn power_of_ten(exponent: usize) -> BigInt {
    num::pow(BigInt::from(10), exponent)
}

/// Read fraction text, "I", "N/D" or "I N/D", each optionally preceded by a minus sign.
///
/// # Errors
///
/// `UnparseableNumber` if the text is malformed, `InvalidRational` if the denominator is zero.
pub fn text_to_fraction(text: &str) -> Result<MixedFraction> {
    let original = text;
    let (sign, text) = Sign::split(text.trim());

    let (integer, fraction) = match text.split_once('/') {
        None => (text, None),
        Some((left, denominator)) => match left.split_once(' ') {
            None => ("", Some((left, denominator))),
            Some((integer, numerator)) => (integer, Some((numerator.trim_start(), denominator))),
        },
    };

    let integer = if integer.is_empty() && fraction.is_some() {
        BigInt::zero()
    } else {
        digits(integer, original, FRACTION)?
    };
    let (numerator, denominator) = match fraction {
        None => (BigInt::zero(), BigInt::one()),
        Some((numerator, denominator)) => (
            digits(numerator, original, FRACTION)?,
            digits(denominator, original, FRACTION)?,
        ),
    };

    MixedFraction::new(integer, numerator, denominator).map(|value| sign.apply(value))
}

/// Intermediate form of decimal text.
#[derive(Eq, PartialEq, Clone, Debug)]
struct RawDecimal<'a> {
    sign: Sign,
    integer: &'a str,
    fixed: &'a str,
    period: Option<&'a str>,
}

impl<'a> TryFrom<&'a str> for RawDecimal<'a> {
    type Error = CalendarError;

    fn try_from(original: &'a str) -> Result<Self> {
        let error = || CalendarError::unparseable(original, DECIMAL);
        let is_digits = |text: &str| text.bytes().all(|byte| byte.is_ascii_digit());

        let (sign, text) = Sign::split(original.trim());
        let (integer, mantissa) = match text.split_once('.') {
            None => (text, None),
            Some((integer, mantissa)) => (integer, Some(mantissa)),
        };
        if integer.is_empty() || !is_digits(integer) {
            return Err(error());
        }

        let (fixed, period) = match mantissa {
            None => ("", None),
            Some(mantissa) => match mantissa.split_once('(') {
                None if !mantissa.is_empty() => (mantissa, None),
                None => return Err(error()),
                Some((fixed, period)) => {
                    let period = period.strip_suffix(')').ok_or_else(error)?;
                    if period.is_empty() || !is_digits(period) {
                        return Err(error());
                    }
                    (fixed, Some(period))
                }
            },
        };
        if !is_digits(fixed) {
            return Err(error());
        }

        Ok(Self { sign, integer, fixed, period })
    }
}

impl TryFrom<RawDecimal<'_>> for MixedFraction {
    type Error = CalendarError;

    fn try_from(value: RawDecimal<'_>) -> Result<Self> {
        let RawDecimal { sign, integer, fixed, period } = value;
        let original = || format!("{integer}.{fixed}");

        let mut result = MixedFraction::from_integer(digits(integer, &original(), DECIMAL)?);

        let fixed_denominator = power_of_ten(fixed.len());
        if !fixed.is_empty() {
            let numerator = digits(fixed, &original(), DECIMAL)?;
            result += MixedFraction::from_fraction(numerator, fixed_denominator.clone())?;
        }
        if let Some(period) = period {
            let numerator = digits(period, &original(), DECIMAL)?;
            let denominator = (power_of_ten(period.len()) - 1) * fixed_denominator;
            result += MixedFraction::from_fraction(numerator, denominator)?;
        }

        Ok(sign.apply(result))
    }
}

/// Read decimal text, like "-0.125" or "0.4(3)" where the digits in parentheses repeat forever.
///
/// # Errors
///
/// `UnparseableNumber` if the text is malformed.
pub fn decimal_text_to_fraction(text: &str) -> Result<MixedFraction> {
    RawDecimal::try_from(text)?.try_into()
}

/// Write decimal text, putting a repeating period in parentheses.
///
/// Long division keeps track of the position at which each remainder was first seen; when a
/// remainder comes back, the digits written since that position repeat.
pub fn fraction_to_decimal_text(value: &MixedFraction) -> String {
    let mut text = String::new();
    if value.is_negative() {
        text.push('-');
    }
    let value = value.abs();
    text.push_str(&value.integer().to_string());

    let numerator = value.numerator();
    if numerator.is_zero() {
        return text;
    }
    text.push('.');

    let denominator = value.denominator();
    let mut first_seen = HashMap::new();
    let mut remainder: BigInt = numerator * 10;
    while !remainder.is_zero() {
        if let Some(&start) = first_seen.get(&remainder) {
            text.insert(start, '(');
            text.push(')');
            return text;
        }
        first_seen.insert(remainder.clone(), text.len());

        let (digit, rest) = remainder.div_rem(denominator);
        text.push_str(&digit.to_string());
        remainder = rest * 10;
    }

    text
}

/// Read day, hour, minute and second text, like "45 0h 30m" or "-0 12h".
///
/// Only the day count is required. Hours and minutes are whole numbers, seconds are decimal text.
/// The parts have to appear in this order, separated by whitespace; letters are case insensitive.
///
/// # Errors
///
/// `UnparseableNumber` if the text is malformed, `InvalidRational` if the day length has a zero
/// component.
pub fn dhms_text_to_fraction(text: &str, day: &DayLength) -> Result<MixedFraction> {
    let lowered = text.trim().to_lowercase();
    let error = || CalendarError::unparseable(text, DHMS);

    let mut tokens = lowered.split_whitespace();
    let (sign, days) = Sign::split(tokens.next().ok_or_else(error)?);
    let mut result = MixedFraction::from_integer(digits(days, text, DHMS)?);

    let units = [
        ('h', MixedFraction::from(day.hours)),
        ('m', MixedFraction::from(day.minutes_in_day())),
        ('s', MixedFraction::from(day.seconds_in_day())),
    ];
    let mut next_unit = 0;
    for token in tokens {
        let suffix = token.chars().last().ok_or_else(error)?;
        let value = &token[..token.len() - suffix.len_utf8()];
        let position = units[next_unit..]
            .iter()
            .position(|(unit, _)| *unit == suffix)
            .ok_or_else(error)?;
        let (unit, per_day) = &units[next_unit + position];
        next_unit += position + 1;

        let amount = if *unit == 's' {
            decimal_text_to_fraction(value).map_err(|_| error())?
        } else {
            MixedFraction::from_integer(digits(value, text, DHMS)?)
        };
        if amount.is_negative() {
            return Err(error());
        }
        result += amount.checked_div(per_day)?;
    }

    Ok(sign.apply(result))
}

/// Write day, hour, minute and second text.
///
/// Parts are written from days downwards until nothing remains; the seconds carry any fraction
/// left as decimal text. The day count is always written, so that half a day is "0 12h".
pub fn fraction_to_dhms_text(value: &MixedFraction, day: &DayLength) -> String {
    if value.is_zero() {
        return "0".to_string();
    }

    let mut text = String::new();
    if value.is_negative() {
        text.push('-');
    }
    let value = value.abs();
    text.push_str(&value.integer().to_string());

    let mut rest = value.fraction();
    for (factor, unit) in [(day.hours, 'h'), (day.minutes, 'm')] {
        if rest.is_zero() {
            return text;
        }
        rest = rest.scale(factor);
        text.push_str(&format!(" {}{unit}", rest.integer()));
        rest = rest.fraction();
    }

    if !rest.is_zero() {
        let seconds = rest.scale(day.seconds);
        text.push_str(&format!(" {}s", fraction_to_decimal_text(&seconds)));
    }

    text
}
