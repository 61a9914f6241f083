//! # Pure lunar calendar
//!
//! A year of a fixed number of lunar months, ignoring the sun. The fraction of a day by which
//! those months overshoot a whole number of days is handled by divisor rules, as for a solar
//! year.
use num::{BigInt, Signed};
use tracing::debug;

use crate::algorithm::derivation::gregorian::rules_for;
use crate::algorithm::derivation::{CalendarCreator, day_count};
use crate::data::calendar::{Calendar, Rule, SpecialFeature};
use crate::data::number_types::fraction::MixedFraction;

/// Leap rules for a year of lunar months.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct PureLunar {
    /// Whole days in a lunar year.
    pub lunar_year: BigInt,
    /// Leap rules, `None` if the search didn't converge.
    pub rules: Option<Vec<Rule>>,
}

impl PureLunar {
    #[allow(missing_docs)]
    pub fn new(month_length: &MixedFraction, months_in_year: usize) -> Self {
        let year_length = month_length.scale(months_in_year);
        let rules = rules_for(&year_length);
        debug!(%year_length, converged = rules.is_some(), "derived lunar leap rules");

        Self { lunar_year: year_length.integer(), rules }
    }

    /// Whether the rule search gave up.
    pub fn unable_to_compute(&self) -> bool {
        self.rules.is_none()
    }
}

impl CalendarCreator for PureLunar {
    fn make_example_calendar(
        &self,
        _year_length: &MixedFraction,
        month_length: &MixedFraction,
        month_count: usize,
    ) -> Option<Calendar> {
        let rules = self.rules.as_ref()?;

        let hollow_month = month_length.floor();
        let mut extra_days = &self.lunar_year - &hollow_month * BigInt::from(month_count);
        let hollow_days = day_count(&hollow_month)?;

        let mut calendar = Calendar::new(SpecialFeature::None);
        let year = calendar.year_mut();
        for month in 1..=month_count {
            let mut days = hollow_days;
            if extra_days.is_positive() {
                days += 1;
                extra_days -= 1;
            }
            year.add_month(format!("#{month}"), days, 0);
        }

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
    use num::BigInt;

    use crate::MF;
    use crate::algorithm::derivation::CalendarCreator;
    use crate::algorithm::derivation::pure_lunar::PureLunar;
    use crate::data::calendar::{IntercalationType, Rule};

    #[test]
    fn one_rule() {
        let result = PureLunar::new(&MF!(1057, 36), 12);
        assert_eq!(result.lunar_year, BigInt::from(352));
        assert_eq!(result.rules, Some(vec![Rule::new(3, IntercalationType::Leap)]));
    }

    #[test]
    fn many_rules() {
        let result = PureLunar::new(&MF!(35_436_707, 1_200_000), 12);
        assert_eq!(result.lunar_year, BigInt::from(354));
        let divisors = result.rules.unwrap()
            .into_iter()
            .map(|rule| rule.each_year)
            .collect::<Vec<_>>();
        assert_eq!(
            divisors,
            [2, 5, 10, 25, 125, 1000, 12500, 100_000].map(BigInt::from).to_vec(),
        );
    }

    #[test]
    fn unable() {
        let result = PureLunar::new(&MF!(29, 53, 100), 12);
        assert!(result.unable_to_compute());
        assert_eq!(result.make_example_calendar(&MF!(365), &MF!(29, 53, 100), 12), None);
    }

    #[test]
    fn example_calendar() {
        let month_length = MF!(29, 1, 2);
        let calendar = PureLunar::new(&month_length, 12)
            .make_example_calendar(&MF!(365), &month_length, 12)
            .unwrap();
        let days = calendar.year().months().iter()
            .map(|month| month.normal_days)
            .collect::<Vec<_>>();
        assert_eq!(days, vec![30, 30, 30, 30, 30, 30, 29, 29, 29, 29, 29, 29]);
        assert!(!calendar.has_leap_rules());

        let month_length = MF!(1057, 36);
        let calendar = PureLunar::new(&month_length, 12)
            .make_example_calendar(&MF!(365), &month_length, 12)
            .unwrap();
        assert_eq!(calendar.year().year_lengths()[IntercalationType::Normal], 352);
        assert_eq!(calendar.year().year_lengths()[IntercalationType::Leap], 353);
    }
}
