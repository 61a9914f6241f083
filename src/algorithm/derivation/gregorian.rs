//! # Divisor rules
//!
//! Leap rules like those of the Gregorian calendar: every 4th year is a leap year, except every
//! 100th, except every 400th.
//!
//! The fraction of a day that a year is longer than a whole number of days, the surplus, is
//! repeatedly approximated by `1 / d` for a divisor `d` of its denominator. A positive surplus
//! gives a leap rule and subtracts `1 / d`, a negative one gives an exception rule and adds it
//! back, until nothing remains.
use std::collections::HashSet;

use num::{BigInt, One, Signed, Zero};
use tracing::{debug, warn};

use crate::algorithm::derivation::{CalendarCreator, day_count};
use crate::data::calendar::{Calendar, IntercalationType, Rule, SpecialFeature};
use crate::data::number_types::fraction::MixedFraction;
use crate::data::number_types::functions::divisors_of;

/// Maximum number of rules before the search gives up.
pub const MAX_ITERATIONS: usize = 64;

/// Largest denominator of the surplus that is searched; its divisors are found by trial division.
pub const MAX_DENOMINATOR: u64 = 1_000_000_000_000;

/// Leap rules for a solar year.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct Gregorian {
    /// The rules in the order they are applied, or `None` if the search didn't converge.
    pub rules: Option<Vec<Rule>>,
}

impl Gregorian {
    /// Search rules for a year length.
    pub fn new(year_length: &MixedFraction) -> Self {
        let rules = rules_for(year_length);
        match &rules {
            Some(rules) => debug!(%year_length, rule_count = rules.len(), "derived leap rules"),
            None => warn!(%year_length, "leap rule search did not converge"),
        }

        Self { rules }
    }

    /// Whether the search gave up.
    pub fn unable_to_compute(&self) -> bool {
        self.rules.is_none()
    }
}

/// Find the rules that account for the fraction part of a number of days.
///
/// # Return value
///
/// An empty list for a whole number, `None` if the denominator is above `MAX_DENOMINATOR`, the
/// surplus starts repeating or the search takes more than `MAX_ITERATIONS` rules.
pub(crate) fn rules_for(length: &MixedFraction) -> Option<Vec<Rule>> {
    search_rules(length, MAX_ITERATIONS)
}

/// Search with a maximum number of rules.
///
/// Every surplus is a multiple of `1 / denominator` below one, so the repeat check alone ends the
/// search. The rule limit is a safety net on top of that.
pub(crate) fn search_rules(length: &MixedFraction, max_rules: usize) -> Option<Vec<Rule>> {
    let mut surplus = length.fraction();
    if surplus.is_zero() {
        return Some(Vec::new());
    }
    if surplus.denominator() > &BigInt::from(MAX_DENOMINATOR) {
        debug!(denominator = %surplus.denominator(), "surplus denominator too large");
        return None;
    }

    let divisors = divisors_of(surplus.denominator());
    let mut seen = HashSet::new();
    let mut rules = Vec::new();

    while !surplus.is_zero() {
        if rules.len() >= max_rules || !seen.insert(surplus.clone()) {
            return None;
        }

        let kind = if surplus.is_negative() {
            IntercalationType::Normal
        } else {
            IntercalationType::Leap
        };
        let each_year = closest_divisor(&divisors, &surplus.abs())?;
        let step = MixedFraction::from_fraction(1, each_year.clone()).ok()?;
        match kind {
            IntercalationType::Leap => surplus -= step,
            IntercalationType::Normal => surplus += step,
        }
        rules.push(Rule { each_year, kind });
    }

    Some(rules)
}

/// The divisor `d` for which `1 / d` best approximates the magnitude from below.
///
/// This is the divisor before the first one that makes `magnitude * d` reach one, or that divisor
/// itself if it hits one exactly.
fn closest_divisor(divisors: &[BigInt], magnitude: &MixedFraction) -> Option<BigInt> {
    let mut last = BigInt::one();
    for divisor in divisors {
        let scaled = magnitude.scale(divisor.clone());
        if scaled.integer().is_positive() {
            if scaled == MixedFraction::from_integer(1) {
                last = divisor.clone();
            }
            return Some(last);
        }
        last = divisor.clone();
    }

    None
}

/// Months of equal length, with the leftover days of the year spread over them round robin from
/// the first month.
pub(crate) fn spread_months(
    calendar: &mut Calendar,
    month_length: &MixedFraction,
    whole_year: &BigInt,
    month_count: usize,
) -> Option<()> {
    let short_month = month_length.floor();
    let mut extra_days = whole_year - &short_month * BigInt::from(month_count);
    let short_month = day_count(&short_month)?;

    let year = calendar.year_mut();
    for month in 1..=month_count {
        year.add_month(format!("#{month}"), short_month, 0);
    }
    let mut index = 0;
    while extra_days.is_positive() {
        year.month_mut(index)?.normal_days += 1;
        extra_days -= 1;
        index = (index + 1) % month_count;
    }

    Some(())
}

impl CalendarCreator for Gregorian {
    fn make_example_calendar(
        &self,
        year_length: &MixedFraction,
        month_length: &MixedFraction,
        month_count: usize,
    ) -> Option<Calendar> {
        let rules = self.rules.as_ref()?;
        if month_count == 0 {
            return None;
        }

        let mut calendar = Calendar::new(SpecialFeature::None);
        spread_months(&mut calendar, month_length, &year_length.floor(), month_count)?;

        if !rules.is_empty() {
            calendar.setup_leap_rules(rules.clone());
            let last = calendar.year().last_month_index()?;
            calendar.year_mut().month_mut(last)?.leap_days += 1;
        }

        Some(calendar)
    }
}

#[cfg(test)]
mod test {
    use crate::MF;
    use crate::algorithm::derivation::CalendarCreator;
    use crate::algorithm::derivation::gregorian::{
        Gregorian, MAX_DENOMINATOR, MAX_ITERATIONS, rules_for, search_rules,
    };
    use crate::data::calendar::{IntercalationType, Rule};
    use crate::data::number_types::fraction::MixedFraction;

    #[test]
    fn gregorian_year() {
        let result = Gregorian::new(&MF!(365, 2425, 10000));
        assert_eq!(result.rules, Some(vec![
            Rule::new(4, IntercalationType::Leap),
            Rule::new(100, IntercalationType::Normal),
            Rule::new(400, IntercalationType::Leap),
        ]));
        assert!(!result.unable_to_compute());
    }

    #[test]
    fn tropical_year() {
        let result = Gregorian::new(&MF!(365, 2422, 10000));
        assert_eq!(result.rules, Some(vec![
            Rule::new(4, IntercalationType::Leap),
            Rule::new(125, IntercalationType::Normal),
            Rule::new(5000, IntercalationType::Leap),
        ]));
    }

    #[test]
    fn whole_year() {
        assert_eq!(Gregorian::new(&MF!(360)).rules, Some(Vec::new()));
        assert_eq!(rules_for(&MF!(1, 4)), Some(vec![Rule::new(4, IntercalationType::Leap)]));
    }

    #[test]
    fn repeating_surplus() {
        // 9/25 falls back to 1/1 in both directions.
        let result = Gregorian::new(&MF!(354, 9, 25));
        assert!(result.unable_to_compute());
        assert_eq!(
            result.make_example_calendar(&MF!(354, 9, 25), &MF!(29, 53, 100), 12),
            None,
        );
    }

    #[test]
    fn bounded() {
        for denominator in 2..200 {
            for numerator in 1..denominator {
                if let Some(rules) = rules_for(&MF!(numerator, denominator)) {
                    assert!(rules.len() <= MAX_ITERATIONS);
                    let total: MixedFraction = rules.iter()
                        .map(|rule| match rule.kind {
                            IntercalationType::Leap => MF!(1, rule.each_year.clone()),
                            IntercalationType::Normal => -MF!(1, rule.each_year.clone()),
                        })
                        .sum();
                    assert_eq!(MF!(numerator, denominator), total);
                }
            }
        }
    }

    #[test]
    fn rule_limit() {
        let year_length = MF!(365, 2425, 10000);
        assert_eq!(search_rules(&year_length, 2), None);
        assert_eq!(search_rules(&year_length, 3).map(|rules| rules.len()), Some(3));
    }

    #[test]
    fn large_denominator() {
        // A prime just above the limit.
        let year_length = MF!(365, 1, 1_000_000_000_039_u64);
        assert!(Gregorian::new(&year_length).unable_to_compute());

        let at_limit = MF!(365, 1, MAX_DENOMINATOR);
        assert_eq!(rules_for(&at_limit), Some(vec![
            Rule::new(MAX_DENOMINATOR, IntercalationType::Leap),
        ]));
    }

    #[test]
    fn example_calendar() {
        let year_length = MF!(365, 2425, 10000);
        let calendar = Gregorian::new(&year_length)
            .make_example_calendar(&year_length, &MF!(29, 53, 100), 12)
            .unwrap();

        let year = calendar.year();
        assert_eq!(year.month_count(), 12);
        let days = year.months().iter().map(|month| month.normal_days).collect::<Vec<_>>();
        assert_eq!(days, vec![31, 31, 31, 31, 31, 30, 30, 30, 30, 30, 30, 30]);
        assert_eq!(year.month(11).unwrap().leap_days, 1);
        assert_eq!(year.month(11).unwrap().name, "#12");
        assert_eq!(calendar.rules().map(<[_]>::len), Some(3));
        assert!(calendar.is_rule_turned_on(2));
        assert_eq!(year.year_lengths()[IntercalationType::Normal], 365);
    }
}
