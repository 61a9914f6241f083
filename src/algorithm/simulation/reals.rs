//! # Moon phases and seasons
//!
//! A coarse linear model of the real moon and sun: every day falls in one of eight phases of the
//! real month and one of four seasons of the real year. Only the day on which the phase or season
//! changes carries a label.
use std::fmt;

use enum_map::Enum;
use num::{BigInt, One, Signed, ToPrimitive};
use serde::{Deserialize, Serialize};

use crate::data::number_types::fraction::MixedFraction;
use crate::error::{CalendarError, Result};

/// One eighth of the real month.
#[derive(Enum, Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[allow(missing_docs)]
pub enum MoonPhase {
    NewMoon,
    WaxingCrescent,
    FirstQuarter,
    WaxingGibbous,
    FullMoon,
    WaningGibbous,
    LastQuarter,
    WaningCrescent,
}

/// One quarter of the real year.
#[derive(Enum, Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[allow(missing_docs)]
pub enum Season {
    Winter,
    Spring,
    Summer,
    Fall,
}

impl fmt::Display for MoonPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::NewMoon => "new moon",
            Self::WaxingCrescent => "waxing crescent",
            Self::FirstQuarter => "first quarter",
            Self::WaxingGibbous => "waxing gibbous",
            Self::FullMoon => "full moon",
            Self::WaningGibbous => "waning gibbous",
            Self::LastQuarter => "last quarter",
            Self::WaningCrescent => "waning crescent",
        })
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Winter => "winter",
            Self::Spring => "spring",
            Self::Summer => "summer",
            Self::Fall => "fall",
        })
    }
}

/// Lengths of the real month and year, and the days on which they start.
#[derive(Clone, Eq, PartialEq, Debug, Serialize, Deserialize)]
pub struct RealsSettings {
    /// Days in the real month.
    pub month_length: MixedFraction,
    /// Days in the real year.
    pub year_length: MixedFraction,
    /// Day on which a real month starts with a new moon.
    pub month_shift: MixedFraction,
    /// Day on which a real year starts with winter.
    pub year_shift: MixedFraction,
}

impl RealsSettings {
    /// # Errors
    ///
    /// `InvalidCalendarState` if one of the lengths isn't positive.
    pub fn validate(&self) -> Result<()> {
        if self.month_length.is_negative() || self.month_length == MixedFraction::from(0) {
            return Err(CalendarError::invalid_state("real month length must be positive"));
        }
        if self.year_length.is_negative() || self.year_length == MixedFraction::from(0) {
            return Err(CalendarError::invalid_state("real year length must be positive"));
        }

        Ok(())
    }
}

/// Labels days with the moon phase and season that start on them.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct RealsCalculator {
    settings: RealsSettings,
}

impl RealsCalculator {
    /// # Errors
    ///
    /// `InvalidCalendarState` if one of the lengths isn't positive.
    pub fn new(settings: RealsSettings) -> Result<Self> {
        settings.validate()?;
        Ok(Self { settings })
    }

    #[allow(missing_docs)]
    pub fn settings(&self) -> &RealsSettings {
        &self.settings
    }

    /// Phase of the moon on an absolute day.
    pub fn moon_phase(&self, day: &BigInt) -> MoonPhase {
        let settings = &self.settings;
        let index = bucket(day, &settings.month_shift, &settings.month_length, MoonPhase::LENGTH);
        MoonPhase::from_usize(index)
    }

    /// Season on an absolute day.
    pub fn season(&self, day: &BigInt) -> Season {
        let settings = &self.settings;
        let index = bucket(day, &settings.year_shift, &settings.year_length, Season::LENGTH);
        Season::from_usize(index)
    }

    /// The moon phase, if it differs from that of the day before.
    pub fn border_moon(&self, day: &BigInt) -> Option<MoonPhase> {
        let phase = self.moon_phase(day);
        (phase != self.moon_phase(&(day - 1))).then_some(phase)
    }

    /// The season, if it differs from that of the day before.
    pub fn border_season(&self, day: &BigInt) -> Option<Season> {
        let season = self.season(day);
        (season != self.season(&(day - 1))).then_some(season)
    }
}

/// Which of `count` equal parts of the period the shifted day falls in.
///
/// The position within the period is `x/p - floor(x/p)`, which lies in `[0, 1)` for negative
/// days as well.
fn bucket(day: &BigInt, shift: &MixedFraction, period: &MixedFraction, count: usize) -> usize {
    let shifted = MixedFraction::from(day) - shift;
    let periods = shifted / period;
    let position = &periods - MixedFraction::from(periods.floor());
    debug_assert!(!position.is_negative() && position < MixedFraction::from(BigInt::one()));

    let index = position.scale(count).floor();
    debug_assert!(!index.is_negative());
    index.to_usize().map_or(0, |index| index.min(count - 1))
}
