//! # Leap scheme derivation
//!
//! Given the length of a year, the length of a month and the number of months in a year, each of
//! the algorithms in this module derives an intercalation scheme and an example calendar that
//! uses it. An algorithm may fail to find a scheme; that is reported as a value, not a panic.
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::data::calendar::Calendar;
use crate::data::number_types::fraction::MixedFraction;
use crate::error::{CalendarError, Result};
use crate::io::number::DayLength;

pub use self::egyptian::Egyptian;
pub use self::gregorian::Gregorian;
pub use self::islamic::Islamic;
pub use self::metonic::Metonic;
pub use self::pure_lunar::PureLunar;

pub mod egyptian;
pub mod gregorian;
pub mod islamic;
pub mod metonic;
pub mod pure_lunar;

/// Builds a calendar skeleton for the scheme it derived.
pub trait CalendarCreator {
    /// Create a calendar with numbered months, day counts that add up to the year length and the
    /// derived intercalation scheme.
    ///
    /// # Arguments
    ///
    /// * `year_length`: Days in a year.
    /// * `month_length`: Days in a month.
    /// * `month_count`: Number of ordinary months in a year.
    ///
    /// # Return value
    ///
    /// `None` if no scheme could be derived for this input.
    fn make_example_calendar(
        &self,
        year_length: &MixedFraction,
        month_length: &MixedFraction,
        month_count: usize,
    ) -> Option<Calendar>;
}

/// Selects one of the derivation algorithms.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Serialize, Deserialize)]
pub enum Solution {
    /// Divisor rules on a solar year.
    Gregorian,
    /// Fixed months plus a month of leftover days.
    Egyptian,
    /// Leap months on a cycle of years.
    Metonic,
    /// Divisor rules on a year of whole lunar months.
    PureLunar,
    /// Leap days on a cycle of lunar years.
    Islamic,
}

impl Solution {
    /// All algorithms, in the order they are usually offered.
    pub const ALL: [Solution; 5] = [
        Solution::Gregorian,
        Solution::Egyptian,
        Solution::Metonic,
        Solution::PureLunar,
        Solution::Islamic,
    ];

    fn name(self) -> &'static str {
        match self {
            Self::Gregorian => "gregorian",
            Self::Egyptian => "egyptian",
            Self::Metonic => "metonic",
            Self::PureLunar => "pure lunar",
            Self::Islamic => "islamic",
        }
    }
}

impl fmt::Display for Solution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Accepts the display name, with a dash or underscore in place of the space.
impl FromStr for Solution {
    type Err = CalendarError;

    fn from_str(text: &str) -> Result<Self> {
        let normalized = text.trim().to_lowercase().replace(['-', '_'], " ");
        Self::ALL
            .into_iter()
            .find(|solution| solution.name() == normalized)
            .ok_or_else(|| CalendarError::invalid_state(format!("unknown solution \"{text}\"")))
    }
}

/// Which celestial bodies a calendar follows.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum BodyTracked {
    #[allow(missing_docs)]
    Sun,
    #[allow(missing_docs)]
    SunAndMoon,
    #[allow(missing_docs)]
    Moon,
}

impl BodyTracked {
    /// The algorithms that make sense for a calendar following these bodies.
    pub fn solutions(self) -> &'static [Solution] {
        match self {
            Self::Sun => &[Solution::Gregorian, Solution::Egyptian],
            Self::SunAndMoon => &[Solution::Metonic],
            Self::Moon => &[Solution::PureLunar, Solution::Islamic],
        }
    }
}

/// The lengths a calendar is derived from.
#[derive(Clone, Eq, PartialEq, Debug, Serialize, Deserialize)]
pub struct LengthInput {
    /// Days in a year.
    pub year_length: MixedFraction,
    /// Days in a month.
    pub month_length: MixedFraction,
    /// Ordinary months in a year.
    pub months_in_year: usize,
    /// Subdivision of a day, only used for displaying lengths.
    pub day_length: DayLength,
}

impl LengthInput {
    /// Check that the lengths describe a calendar.
    ///
    /// # Errors
    ///
    /// `InvalidCalendarState` if a length is not positive or there are no months.
    pub fn validate(&self) -> Result<()> {
        let zero = MixedFraction::from_integer(0);
        if self.year_length <= zero {
            return Err(CalendarError::invalid_state("the year length must be positive"));
        }
        if self.month_length <= zero {
            return Err(CalendarError::invalid_state("the month length must be positive"));
        }
        if self.months_in_year == 0 {
            return Err(CalendarError::invalid_state("a year needs at least one month"));
        }
        Ok(())
    }
}

/// One derivation algorithm together with the scheme it computed.
#[derive(Clone, Eq, PartialEq, Debug)]
#[allow(missing_docs)]
pub enum Derivation {
    Gregorian(Gregorian),
    Egyptian(Egyptian),
    Metonic(Metonic),
    PureLunar(PureLunar),
    Islamic(Islamic),
}

impl Derivation {
    /// Run an algorithm on some lengths.
    pub fn new(solution: Solution, input: &LengthInput) -> Self {
        let LengthInput { year_length, month_length, months_in_year, .. } = input;
        match solution {
            Solution::Gregorian => Self::Gregorian(Gregorian::new(year_length)),
            Solution::Egyptian => {
                Self::Egyptian(Egyptian::new(year_length, month_length, *months_in_year))
            }
            Solution::Metonic => {
                Self::Metonic(Metonic::new(year_length, month_length, *months_in_year))
            }
            Solution::PureLunar => Self::PureLunar(PureLunar::new(month_length, *months_in_year)),
            Solution::Islamic => Self::Islamic(Islamic::new(month_length, *months_in_year)),
        }
    }

    /// Which algorithm this is.
    pub fn solution(&self) -> Solution {
        match self {
            Self::Gregorian(_) => Solution::Gregorian,
            Self::Egyptian(_) => Solution::Egyptian,
            Self::Metonic(_) => Solution::Metonic,
            Self::PureLunar(_) => Solution::PureLunar,
            Self::Islamic(_) => Solution::Islamic,
        }
    }
}

impl CalendarCreator for Derivation {
    fn make_example_calendar(
        &self,
        year_length: &MixedFraction,
        month_length: &MixedFraction,
        month_count: usize,
    ) -> Option<Calendar> {
        match self {
            Self::Gregorian(creator) => {
                creator.make_example_calendar(year_length, month_length, month_count)
            }
            Self::Egyptian(creator) => {
                creator.make_example_calendar(year_length, month_length, month_count)
            }
            Self::Metonic(creator) => {
                creator.make_example_calendar(year_length, month_length, month_count)
            }
            Self::PureLunar(creator) => {
                creator.make_example_calendar(year_length, month_length, month_count)
            }
            Self::Islamic(creator) => {
                creator.make_example_calendar(year_length, month_length, month_count)
            }
        }
    }
}

/// Derive an example calendar.
///
/// # Errors
///
/// `InvalidCalendarState` if the input is not usable, `UnableToComputeScheme` if the algorithm
/// found no scheme.
pub fn derive(solution: Solution, input: &LengthInput) -> Result<Calendar> {
    input.validate()?;

    Derivation::new(solution, input)
        .make_example_calendar(&input.year_length, &input.month_length, input.months_in_year)
        .ok_or_else(|| {
            warn!(
                %solution,
                year_length = %input.year_length,
                month_length = %input.month_length,
                "no leap scheme found",
            );
            CalendarError::UnableToComputeScheme { solution }
        })
}

/// Convert a day count to the width used in months.
fn day_count(value: &num::BigInt) -> Option<u32> {
    u32::try_from(value).ok()
}

#[cfg(test)]
mod test {
    use crate::MF;
    use crate::algorithm::derivation::{derive, BodyTracked, LengthInput, Solution};
    use crate::data::calendar::{IntercalationType, SpecialFeature};
    use crate::data::number_types::fraction::MixedFraction;
    use crate::error::CalendarError;
    use crate::io::number::DayLength;

    fn input(
        year_length: MixedFraction,
        month_length: MixedFraction,
        months_in_year: usize,
    ) -> LengthInput {
        LengthInput { year_length, month_length, months_in_year, day_length: DayLength::default() }
    }

    #[test]
    fn solution_names() {
        assert_eq!("Pure-Lunar".parse::<Solution>(), Ok(Solution::PureLunar));
        assert_eq!("metonic".parse::<Solution>(), Ok(Solution::Metonic));
        assert!("julian".parse::<Solution>().is_err());
        for solution in Solution::ALL {
            assert_eq!(solution.to_string().parse::<Solution>(), Ok(solution));
        }
    }

    #[test]
    fn bodies() {
        assert_eq!(BodyTracked::Sun.solutions(), &[Solution::Gregorian, Solution::Egyptian]);
        assert_eq!(BodyTracked::SunAndMoon.solutions(), &[Solution::Metonic]);
        assert_eq!(BodyTracked::Moon.solutions(), &[Solution::PureLunar, Solution::Islamic]);
    }

    #[test]
    fn derive_each() {
        let earth = input(MF!(365, 2422, 10000), MF!(29, 53059, 100_000), 12);

        let gregorian = derive(Solution::Gregorian, &earth).unwrap();
        assert!(gregorian.has_leap_rules());
        assert_eq!(gregorian.year().year_lengths()[IntercalationType::Normal], 365);

        let egyptian = derive(Solution::Egyptian, &earth).unwrap();
        assert_eq!(egyptian.year().feature(), SpecialFeature::Epagomenal);

        let metonic = derive(Solution::Metonic, &earth).unwrap();
        assert_eq!(metonic.cycle().map(<[_]>::len), Some(19));

        let islamic = derive(Solution::Islamic, &earth).unwrap();
        assert!(islamic.has_cycle());

        assert!(derive(Solution::PureLunar, &earth).is_ok());
    }

    #[test]
    fn derive_invalid() {
        assert!(matches!(
            derive(Solution::Gregorian, &input(MF!(0), MF!(29), 12)),
            Err(CalendarError::InvalidCalendarState(_)),
        ));
        assert!(matches!(
            derive(Solution::Gregorian, &input(MF!(365), MF!(-29), 12)),
            Err(CalendarError::InvalidCalendarState(_)),
        ));
        assert!(matches!(
            derive(Solution::Gregorian, &input(MF!(365), MF!(29), 0)),
            Err(CalendarError::InvalidCalendarState(_)),
        ));
        assert_eq!(
            derive(Solution::PureLunar, &input(MF!(365), MF!(29, 53, 100), 12)),
            Err(CalendarError::UnableToComputeScheme { solution: Solution::PureLunar }),
        );
    }

    #[test]
    fn derive_unfitting_lengths() {
        assert_eq!(
            derive(Solution::Egyptian, &input(MF!(354, 11, 30), MF!(29, 1, 2), 12)),
            Err(CalendarError::UnableToComputeScheme { solution: Solution::Egyptian }),
        );
        assert_eq!(
            derive(Solution::Metonic, &input(MF!(10), MF!(29), 12)),
            Err(CalendarError::UnableToComputeScheme { solution: Solution::Metonic }),
        );
        assert_eq!(
            derive(Solution::Gregorian, &input(MF!(365, 1, 1_000_000_000_039_u64), MF!(30), 12)),
            Err(CalendarError::UnableToComputeScheme { solution: Solution::Gregorian }),
        );
    }
}
