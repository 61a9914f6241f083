//! # Metonic cycle
//!
//! A lunisolar calendar: months follow the moon, and a leap month now and then keeps the year in
//! line with the sun. The cycle is the smallest number of years that is within a day of a whole
//! number of months, like the 19 years and 235 months of the Hebrew calendar.
//!
//! The leap years within the cycle are placed greedily. For the Earth this puts leap years at
//! positions 3, 6, 9, 11, 14, 17 and 19, where the traditional cycle has 8 instead of 9; the
//! placement is kept as is for compatibility with existing projects.
use tracing::{debug, warn};

use crate::algorithm::derivation::{CalendarCreator, day_count};
use crate::data::calendar::{Calendar, IntercalationType, SpecialFeature};
use crate::data::number_types::fraction::MixedFraction;

/// Most months that are tried before the cycle search gives up.
pub const MAX_MONTHS: u64 = 1_000_000;

/// Cycle of years with a leap month.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct Metonic {
    /// Years in the cycle.
    pub years: u64,
    /// Months in the cycle.
    pub months: u64,
    /// Kind of each year of the cycle, `None` if the search gave up.
    pub cycle: Option<Vec<IntercalationType>>,
}

impl Metonic {
    /// Search the cycle and place its leap years.
    ///
    /// # Arguments
    ///
    /// * `year_length`: Days in a solar year.
    /// * `month_length`: Days in a lunar month.
    /// * `expected_months`: Months in a normal year.
    pub fn new(
        year_length: &MixedFraction,
        month_length: &MixedFraction,
        expected_months: usize,
    ) -> Self {
        match cycle_size(year_length, month_length) {
            Some((years, months)) => {
                let cycle = leap_years(year_length, month_length, expected_months, years);
                debug!(years, months, "derived metonic cycle");
                Self { years, months, cycle: Some(cycle) }
            }
            None => {
                warn!(%year_length, %month_length, "metonic cycle search did not converge");
                Self { years: 0, months: 0, cycle: None }
            }
        }
    }

    /// Whether the search gave up.
    pub fn unable_to_compute(&self) -> bool {
        self.cycle.is_none()
    }
}

/// Add months one at a time, and a year whenever the months overtake the years, until the two
/// are within a day of each other.
///
/// A year gets added at most once per month, so the years only keep up when a month is no longer
/// than a year. With months of at least a day, some count of at most `⌈year_length⌉` months ends
/// within a day of a whole number of years.
fn cycle_size(year_length: &MixedFraction, month_length: &MixedFraction) -> Option<(u64, u64)> {
    let stop_margin = MixedFraction::from_integer(1);
    if (year_length - month_length).abs() <= stop_margin {
        return Some((1, 0));
    }
    if month_length > year_length || month_length < &stop_margin {
        return None;
    }

    let mut margin = (year_length - month_length).abs();
    let mut years = 1;
    let mut months = 0;
    let mut year_days = year_length.clone();
    while margin > stop_margin {
        if months >= MAX_MONTHS {
            return None;
        }
        months += 1;

        let month_days = month_length.scale(months);
        margin = (&year_days - &month_days).abs();
        if year_days < month_days && margin > stop_margin {
            years += 1;
            year_days = year_length.scale(years);
        }
    }

    Some((years, months))
}

/// Months alternate between short and long ones. A year gets a leap month when the days still
/// missing compared to the solar years reach at least the length of the next month.
fn leap_years(
    year_length: &MixedFraction,
    month_length: &MixedFraction,
    expected_months: usize,
    years: u64,
) -> Vec<IntercalationType> {
    let mut next_month = month_length.floor();
    let mut month_after = month_length.ceil();
    let mut month_days = MixedFraction::from_integer(0);

    (1..=years)
        .map(|year| {
            for _ in 0..expected_months {
                month_days += month_length;
                std::mem::swap(&mut next_month, &mut month_after);
            }

            let missing = year_length.scale(year) - &month_days;
            if missing >= MixedFraction::from(&next_month) {
                month_days += month_length;
                std::mem::swap(&mut next_month, &mut month_after);
                IntercalationType::Leap
            } else {
                IntercalationType::Normal
            }
        })
        .collect()
}

impl CalendarCreator for Metonic {
    /// Months alternate between short and long, and the last month is the leap month.
    fn make_example_calendar(
        &self,
        _year_length: &MixedFraction,
        month_length: &MixedFraction,
        month_count: usize,
    ) -> Option<Calendar> {
        let cycle = self.cycle.as_ref()?;
        let mut lengths = [
            day_count(&month_length.floor())?,
            day_count(&month_length.ceil())?,
        ];

        let total_months = if cycle.is_empty() { month_count } else { month_count + 1 };
        let mut calendar = Calendar::new(SpecialFeature::Leap);
        let year = calendar.year_mut();
        for month in 1..=total_months {
            year.add_month(format!("#{month}"), lengths[0], 0);
            lengths.swap(0, 1);
        }

        if !cycle.is_empty() {
            let last = year.last_month_index()?;
            year.set_feature_month(last);
            calendar.setup_cycle(cycle.clone());
        }

        Some(calendar)
    }
}

#[cfg(test)]
mod test {
    use itertools::Itertools;

    use crate::MF;
    use crate::algorithm::derivation::CalendarCreator;
    use crate::algorithm::derivation::metonic::{Metonic, cycle_size};
    use crate::data::calendar::IntercalationType;

    fn earth() -> Metonic {
        Metonic::new(&MF!(365, 2422, 10000), &MF!(29, 53059, 100_000), 12)
    }

    #[test]
    fn earth_cycle() {
        let result = earth();
        assert_eq!(result.years, 19);
        assert_eq!(result.months, 235);

        let leap_years = result.cycle.unwrap()
            .into_iter()
            .positions(|kind| kind == IntercalationType::Leap)
            .map(|index| index + 1)
            .collect::<Vec<_>>();
        assert_eq!(leap_years, vec![3, 6, 9, 11, 14, 17, 19]);
    }

    #[test]
    fn close_lengths() {
        assert_eq!(cycle_size(&MF!(30), &MF!(29, 1, 2)), Some((1, 0)));
        assert_eq!(cycle_size(&MF!(59), &MF!(29, 1, 2)), Some((1, 2)));
    }

    #[test]
    fn month_longer_than_year() {
        assert_eq!(cycle_size(&MF!(10), &MF!(29)), None);
        let result = Metonic::new(&MF!(10), &MF!(29), 12);
        assert!(result.unable_to_compute());
        assert_eq!(result.make_example_calendar(&MF!(10), &MF!(29), 12), None);

        assert_eq!(cycle_size(&MF!(30), &MF!(1, 2)), None);
        assert!(!earth().unable_to_compute());
    }

    #[test]
    fn example_calendar() {
        let calendar = earth()
            .make_example_calendar(&MF!(365, 2422, 10000), &MF!(29, 53059, 100_000), 12)
            .unwrap();

        let year = calendar.year();
        assert_eq!(year.month_count(), 13);
        assert!(year.is_month_feature(12));
        let days = year.months().iter().map(|month| month.normal_days).collect::<Vec<_>>();
        assert_eq!(days, vec![29, 30, 29, 30, 29, 30, 29, 30, 29, 30, 29, 30, 29]);
        assert_eq!(year.year_lengths()[IntercalationType::Normal], 354);
        assert_eq!(year.year_lengths()[IntercalationType::Leap], 383);
        assert_eq!(calendar.cycle().map(<[_]>::len), Some(19));
        assert!(calendar.validate().is_ok());
    }
}
