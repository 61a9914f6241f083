//! # Day simulation
//!
//! Walks through a calendar month by month, in both directions from the epoch, and lays out the
//! days of the current month in weeks.
//!
//! Internally, years are counted from the epoch: internal year 1 starts on absolute day 0 and the
//! years before it are 0, -1, and so on. The era year that users see is the internal year plus
//! the epoch.
use std::sync::Arc;

use enum_map::EnumMap;
use num::{BigInt, Integer, One, Signed, ToPrimitive, Zero};
use tracing::trace;

use crate::algorithm::simulation::leap_calculator::{Calculator, LeapCalculator};
use crate::algorithm::simulation::reals::{MoonPhase, RealsCalculator, Season};
use crate::data::calendar::{Calendar, IntercalationType, SpecialFeature};
use crate::error::Result;

pub mod leap_calculator;
pub mod reals;
pub mod settings;

/// A day of the current month as it is shown in a week.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct DayInMonth {
    /// Day of the month, starting at 1.
    pub day: u32,
    /// Moon phase starting on this day, if the moon is tracked.
    pub moon: Option<MoonPhase>,
    /// Season starting on this day, if the sun is tracked.
    pub season: Option<Season>,
}

/// A cursor over the months of a calendar.
///
/// Cloning keeps the cursor position; [`Simulation::copy`] starts over.
#[derive(Clone, Debug)]
pub struct Simulation {
    calendar: Arc<Calendar>,
    week_shift: u32,
    epoch: BigInt,
    year_lengths: EnumMap<IntercalationType, u64>,
    calculator: Calculator,
    reals: Option<RealsCalculator>,

    year: BigInt,
    month: usize,
}

impl Simulation {
    /// Start a simulation at the first month of internal year 1.
    ///
    /// # Arguments
    ///
    /// * `calendar`: The calendar to simulate, shared with other simulations.
    /// * `week_shift`: Weekday of the first day of internal year 1.
    /// * `epoch`: Era year of internal year 0.
    /// * `reals`: Moon phase and season annotation, if any.
    ///
    /// # Errors
    ///
    /// `InvalidCalendarState` if the calendar can't be simulated.
    pub fn new(
        calendar: Arc<Calendar>,
        week_shift: u32,
        epoch: BigInt,
        reals: Option<RealsCalculator>,
    ) -> Result<Self> {
        calendar.validate()?;

        let year_lengths = calendar.year().year_lengths();
        let calculator = Calculator::for_scheme(calendar.scheme());
        let mut simulation = Self {
            calendar,
            week_shift,
            epoch,
            year_lengths,
            calculator,
            reals,
            year: BigInt::one(),
            month: 0,
        };
        simulation.calculator.set_era_year(&simulation.year);
        simulation.goto_first_month();

        Ok(simulation)
    }

    /// An independent simulation with the same configuration, at the first month of internal
    /// year 1.
    #[must_use]
    pub fn copy(&self) -> Self {
        let mut copy = self.clone();
        copy.year = BigInt::one();
        copy.calculator.set_era_year(&copy.year);
        copy.goto_first_month();
        copy
    }

    #[allow(missing_docs)]
    pub fn calendar(&self) -> &Calendar {
        &self.calendar
    }

    #[allow(missing_docs)]
    pub fn reals(&self) -> Option<&RealsCalculator> {
        self.reals.as_ref()
    }

    #[allow(missing_docs)]
    pub fn week_length(&self) -> u32 {
        self.calendar.week().length
    }

    #[allow(missing_docs)]
    pub fn week_shift(&self) -> u32 {
        self.week_shift
    }

    #[allow(missing_docs)]
    pub fn epoch(&self) -> &BigInt {
        &self.epoch
    }

    /// Current year counted from the epoch.
    pub fn year(&self) -> &BigInt {
        &self.year
    }

    /// Current year as users see it.
    pub fn era_year(&self) -> BigInt {
        &self.year + &self.epoch
    }

    /// Move to a year as users see it, keeping the month if it exists in that year.
    pub fn set_era_year(&mut self, era_year: &BigInt) {
        self.year = era_year - &self.epoch;
        self.sync_year();
    }

    #[allow(missing_docs)]
    pub fn goto_next_year(&mut self) {
        self.year += 1;
        self.sync_year();
    }

    #[allow(missing_docs)]
    pub fn goto_previous_year(&mut self) {
        self.year -= 1;
        self.sync_year();
    }

    fn sync_year(&mut self) {
        self.calculator.set_era_year(&self.year);
        self.settle_month();
        trace!(year = %self.year, month = self.month, "moved to year");
    }

    /// Whether the current year is a leap year.
    pub fn is_leap_year(&self) -> bool {
        self.calculator.is_leap_year()
    }

    fn kind(&self) -> IntercalationType {
        self.calculator.kind()
    }

    fn last_month(&self) -> usize {
        self.calendar.year().last_month_index().unwrap_or_default()
    }

    fn is_skipped(&self, month: usize) -> bool {
        self.calendar.year().is_skipped(month, self.kind())
    }

    /// Move off a month that doesn't exist in the current year, staying within the year.
    ///
    /// Only the leap month is ever skipped, and it is never the only month.
    fn settle_month(&mut self) {
        if self.is_skipped(self.month) {
            if self.month > 0 {
                self.month -= 1;
            } else {
                self.month += 1;
            }
        }
    }

    /// Index of the current month.
    pub fn month(&self) -> usize {
        self.month
    }

    /// Move to a month of the current year.
    ///
    /// Indices past the last month select the last month. A leap month in a normal year selects
    /// the month before it.
    pub fn set_month(&mut self, month: usize) {
        self.month = month.min(self.last_month());
        self.settle_month();
    }

    #[allow(missing_docs)]
    pub fn goto_first_month(&mut self) {
        self.month = 0;
        self.settle_month();
    }

    #[allow(missing_docs)]
    pub fn goto_last_month(&mut self) {
        self.month = self.last_month();
        self.settle_month();
    }

    /// Move to the next month that exists, possibly in the next year.
    pub fn goto_next_month(&mut self) {
        loop {
            if self.month < self.last_month() {
                self.month += 1;
            } else {
                self.month = 0;
                self.year += 1;
                self.calculator.set_era_year(&self.year);
            }

            if !self.is_skipped(self.month) {
                break;
            }
        }
        trace!(year = %self.year, month = self.month, "moved to next month");
    }

    /// Move to the previous month that exists, possibly in the previous year.
    pub fn goto_previous_month(&mut self) {
        loop {
            if self.month > 0 {
                self.month -= 1;
            } else {
                self.month = self.last_month();
                self.year -= 1;
                self.calculator.set_era_year(&self.year);
            }

            if !self.is_skipped(self.month) {
                break;
            }
        }
        trace!(year = %self.year, month = self.month, "moved to previous month");
    }

    /// Name of the current month.
    pub fn month_name(&self) -> &str {
        self.calendar
            .year()
            .month(self.month)
            .map_or("", |month| month.name.as_str())
    }

    /// Role of the current month, `None` for an ordinary month.
    pub fn month_feature(&self) -> SpecialFeature {
        let year = self.calendar.year();
        if year.is_month_feature(self.month) {
            year.feature()
        } else {
            SpecialFeature::None
        }
    }

    /// Days in the current month, leap days included in a leap year.
    pub fn days_in_current_month(&self) -> u32 {
        self.calendar.year().month_days(self.month, self.kind())
    }

    /// Absolute day of the first day of the current month.
    ///
    /// Day 0 is the first day of internal year 1; days before it are negative.
    pub fn days_so_far(&self) -> BigInt {
        let kind = self.kind();
        let year = self.calendar.year();
        let before_month = (0..self.month)
            .map(|index| u64::from(year.month_days(index, kind)))
            .sum::<u64>();

        self.days_before_year(&self.year) + before_month
    }

    /// Absolute day of the first day of a year.
    fn days_before_year(&self, year: &BigInt) -> BigInt {
        let normal = BigInt::from(self.year_lengths[IntercalationType::Normal]);
        let leap = BigInt::from(self.year_lengths[IntercalationType::Leap]);

        if year.is_positive() {
            // Years 1 up to, but not including, this year.
            let years: BigInt = year - 1;
            let leap_years = if years.is_positive() {
                self.calculator.leap_years_until(&years)
            } else {
                BigInt::zero()
            };
            (years - &leap_years) * normal + leap_years * leap
        } else {
            // Years from this year up to and including year 0.
            let years = BigInt::one() - year;
            let leap_years = self.calculator.leap_years_until(year);
            -((years - &leap_years) * normal + leap_years * leap)
        }
    }

    /// Weekday of the first day of the current month.
    pub fn first_week_day(&self) -> usize {
        let week = self.calendar.week();
        if week.starts_with_month {
            0
        } else {
            let length = BigInt::from(week.length);
            let shifted = self.days_so_far() + self.week_shift;
            shifted.mod_floor(&length).to_usize().unwrap_or_default()
        }
    }

    /// The days of the current month, week by week.
    ///
    /// Every week has a slot for each weekday; slots before the first and after the last day of
    /// the month are empty.
    pub fn get_days_in_month(&self) -> Vec<Vec<Option<DayInMonth>>> {
        let week_length = self.calendar.week().length as usize;
        let first_day = self.days_so_far();

        let mut weeks = Vec::new();
        let mut week = vec![None; week_length];
        let mut week_day = self.first_week_day();
        for day in 1..=self.days_in_current_month() {
            let absolute = &first_day + (day - 1);
            week[week_day] = Some(DayInMonth {
                day,
                moon: self.reals.as_ref().and_then(|reals| reals.border_moon(&absolute)),
                season: self.reals.as_ref().and_then(|reals| reals.border_season(&absolute)),
            });

            week_day += 1;
            if week_day == week_length {
                weeks.push(std::mem::replace(&mut week, vec![None; week_length]));
                week_day = 0;
            }
        }
        if week.iter().any(Option::is_some) {
            weeks.push(week);
        }

        weeks
    }
}
