//! # Tabular lunar cycle
//!
//! Like the tabular Islamic calendar: months alternate between a hollow month and a full month
//! of one day more, and the fraction of a day the lunar year is longer is made up by leap days on
//! a cycle of years. A year becomes a leap year when the accumulated surplus exceeds half a day.
use num::{BigInt, One, ToPrimitive, Zero};
use tracing::{debug, warn};

use crate::algorithm::derivation::{CalendarCreator, day_count};
use crate::data::calendar::{Calendar, IntercalationType, SpecialFeature};
use crate::data::number_types::fraction::MixedFraction;

/// Longest cycle, in years, that is computed.
pub const MAX_CYCLE_LENGTH: u64 = 1_000_000;

/// Hollow and full months with a cycle of leap years.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct Islamic {
    /// Leap days needed in one cycle.
    pub days_to_add: BigInt,
    /// Days in a normal year.
    pub days_in_year: BigInt,
    /// Kind of each year of the cycle, `None` if the cycle would be too long.
    pub cycle: Option<Vec<IntercalationType>>,
}

impl Islamic {
    #[allow(missing_docs)]
    pub fn new(month_length: &MixedFraction, months_in_year: usize) -> Self {
        let hollow_month = month_length.floor();
        let days_in_year = (1..=months_in_year)
            .map(|month| {
                if month % 2 == 0 {
                    &hollow_month + BigInt::one()
                } else {
                    hollow_month.clone()
                }
            })
            .fold(BigInt::zero(), |total, days| total + days);

        let lunar_year = month_length.scale(months_in_year);
        let surplus = lunar_year.fraction();
        let days_to_add = surplus.numerator();

        let cycle = surplus
            .denominator()
            .to_u64()
            .filter(|&length| length <= MAX_CYCLE_LENGTH)
            .map(|length| leap_cycle(&lunar_year, &days_in_year, length));
        match &cycle {
            Some(cycle) => debug!(
                %days_in_year,
                %days_to_add,
                cycle_length = cycle.len(),
                "derived lunar cycle",
            ),
            None => warn!(%lunar_year, "lunar cycle too long"),
        }

        Self { days_to_add, days_in_year, cycle }
    }
}

/// Mark a year as leap whenever the lunar years so far exceed the calendar years so far by more
/// than half a day.
fn leap_cycle(
    lunar_year: &MixedFraction,
    days_in_year: &BigInt,
    length: u64,
) -> Vec<IntercalationType> {
    let one_half = MixedFraction::one_half();
    let one = MixedFraction::from_integer(1);

    let mut cumulative = MixedFraction::from_integer(0);
    (1..=length)
        .map(|year| {
            cumulative += lunar_year;
            let surplus = &cumulative - MixedFraction::from(days_in_year * BigInt::from(year));
            if surplus > one_half {
                cumulative -= &one;
                IntercalationType::Leap
            } else {
                IntercalationType::Normal
            }
        })
        .collect()
}

impl CalendarCreator for Islamic {
    fn make_example_calendar(
        &self,
        _year_length: &MixedFraction,
        month_length: &MixedFraction,
        month_count: usize,
    ) -> Option<Calendar> {
        let cycle = self.cycle.as_ref()?;
        let hollow_month = day_count(&month_length.floor())?;

        let mut calendar = Calendar::new(SpecialFeature::None);
        let year = calendar.year_mut();
        for month in 1..=month_count {
            let full = if month % 2 == 0 { 1 } else { 0 };
            year.add_month(format!("#{month}"), hollow_month + full, 0);
        }

        if !cycle.is_empty() {
            calendar.setup_cycle(cycle.clone());
            let last = calendar.year().last_month_index()?;
            calendar.year_mut().month_mut(last)?.leap_days += 1;
        }

        Some(calendar)
    }
}
