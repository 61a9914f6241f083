//! # Epagomenal days
//!
//! Like the ancient Egyptian calendar: months of a fixed whole number of days, followed by a short
//! month holding the days that are left in the year. The fraction part of the year length is
//! made up by leap days in that short month.
use num::{BigInt, One, Signed, Zero};
use tracing::debug;

use crate::algorithm::derivation::{CalendarCreator, day_count};
use crate::data::calendar::{Calendar, IntercalationType, Rule, SpecialFeature};
use crate::data::number_types::fraction::MixedFraction;

/// Name of the month of leftover days.
pub const EPAGOMENAL_MONTH_NAME: &str = "--";

/// Fixed months and leftover days.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct Egyptian {
    /// Days in every ordinary month, the month length rounded up.
    pub days_in_month: BigInt,
    /// Days in all ordinary months together.
    pub days_in_year: BigInt,
    /// Whole days of the year that are not in an ordinary month.
    pub epagomenal_days: BigInt,
    /// Period of the leap rule, in years.
    pub every_year: BigInt,
    /// Days added to the epagomenal month in a leap year.
    pub add_leap_days: BigInt,
}

impl Egyptian {
    #[allow(missing_docs)]
    pub fn new(
        year_length: &MixedFraction,
        month_length: &MixedFraction,
        month_count: usize,
    ) -> Self {
        let days_in_month = month_length.ceil();
        let days_in_year = &days_in_month * BigInt::from(month_count);
        let epagomenal_days = year_length.floor() - &days_in_year;

        let surplus = year_length.fraction();
        let (every_year, add_leap_days) = if surplus.is_zero() {
            (BigInt::one(), BigInt::zero())
        } else {
            (surplus.denominator().clone(), surplus.numerator())
        };
        debug!(
            %days_in_month,
            %epagomenal_days,
            %every_year,
            %add_leap_days,
            "derived epagomenal scheme",
        );

        Self { days_in_month, days_in_year, epagomenal_days, every_year, add_leap_days }
    }
}

impl CalendarCreator for Egyptian {
    /// Without any leftover days there is no epagomenal month; the leap days then go to the last
    /// ordinary month. There is no calendar when the ordinary months don't fit in the year.
    fn make_example_calendar(
        &self,
        _year_length: &MixedFraction,
        _month_length: &MixedFraction,
        month_count: usize,
    ) -> Option<Calendar> {
        if self.epagomenal_days.is_negative() {
            return None;
        }
        let days_in_month = day_count(&self.days_in_month)?;
        let leap_days = day_count(&self.add_leap_days)?;
        let has_epagomenal_month = self.epagomenal_days.is_positive();

        let mut calendar = Calendar::new(if has_epagomenal_month {
            SpecialFeature::Epagomenal
        } else {
            SpecialFeature::None
        });
        if !self.add_leap_days.is_zero() {
            calendar.setup_leap_rules(vec![Rule {
                each_year: self.every_year.clone(),
                kind: IntercalationType::Leap,
            }]);
        }

        let year = calendar.year_mut();
        for month in 1..=month_count {
            year.add_month(format!("#{month}"), days_in_month, 0);
        }
        if has_epagomenal_month {
            year.add_month(EPAGOMENAL_MONTH_NAME, day_count(&self.epagomenal_days)?, leap_days);
            let last = year.last_month_index()?;
            year.set_feature_month(last);
        } else if leap_days > 0 {
            let last = year.last_month_index()?;
            year.month_mut(last)?.leap_days += leap_days;
        }

        Some(calendar)
    }
}

#[cfg(test)]
mod test {
    use num::BigInt;

    use crate::MF;
    use crate::algorithm::derivation::CalendarCreator;
    use crate::algorithm::derivation::egyptian::Egyptian;
    use crate::data::calendar::{IntercalationType, SpecialFeature};

    #[test]
    fn julian_year() {
        let result = Egyptian::new(&MF!(365, 1, 4), &MF!(29, 1, 2), 12);
        assert_eq!(result.days_in_month, BigInt::from(30));
        assert_eq!(result.days_in_year, BigInt::from(360));
        assert_eq!(result.epagomenal_days, BigInt::from(5));
        assert_eq!(result.every_year, BigInt::from(4));
        assert_eq!(result.add_leap_days, BigInt::from(1));
    }

    #[test]
    fn whole_year() {
        let result = Egyptian::new(&MF!(365), &MF!(30), 12);
        assert_eq!(result.every_year, BigInt::from(1));
        assert_eq!(result.add_leap_days, BigInt::from(0));

        let calendar = result.make_example_calendar(&MF!(365), &MF!(30), 12).unwrap();
        assert!(!calendar.has_leap_rules());
        assert_eq!(calendar.year().month_count(), 13);
    }

    #[test]
    fn example_calendar() {
        let (year_length, month_length) = (MF!(365, 1, 4), MF!(29, 1, 2));
        let calendar = Egyptian::new(&year_length, &month_length, 12)
            .make_example_calendar(&year_length, &month_length, 12)
            .unwrap();

        let year = calendar.year();
        assert_eq!(year.feature(), SpecialFeature::Epagomenal);
        assert_eq!(year.month_count(), 13);
        assert!(year.is_month_feature(12));
        assert_eq!(year.month(12).unwrap().name, "--");
        assert_eq!(year.month(12).unwrap().normal_days, 5);
        assert_eq!(year.month(12).unwrap().leap_days, 1);
        assert_eq!(year.year_lengths()[IntercalationType::Normal], 365);
        assert_eq!(year.year_lengths()[IntercalationType::Leap], 366);
        assert_eq!(calendar.rules().unwrap()[0].rule.each_year, BigInt::from(4));
        assert!(calendar.validate().is_ok());
    }

    #[test]
    fn months_longer_than_year() {
        // Twelve months of 30 days take 360 days of a 354 day year.
        let (year_length, month_length) = (MF!(354, 11, 30), MF!(29, 1, 2));
        let result = Egyptian::new(&year_length, &month_length, 12);
        assert_eq!(result.epagomenal_days, BigInt::from(-6));
        assert_eq!(result.make_example_calendar(&year_length, &month_length, 12), None);
    }

    #[test]
    fn no_leftover_days() {
        let (year_length, month_length) = (MF!(360, 1, 4), MF!(30));
        let calendar = Egyptian::new(&year_length, &month_length, 12)
            .make_example_calendar(&year_length, &month_length, 12)
            .unwrap();

        assert_eq!(calendar.year().feature(), SpecialFeature::None);
        assert_eq!(calendar.year().month(11).unwrap().leap_days, 1);
        assert!(calendar.validate().is_ok());
    }
}
