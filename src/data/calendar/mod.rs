//! # Calendar structure
//!
//! The static description of a calendar: which months a year has, how many days each of them
//! has in normal and leap years, how weeks line up with them, and which years are leap years.
//!
//! A calendar carries at most one intercalation scheme. Tabular calendars list the kind of every
//! year in a repeating cycle, divisor based calendars list rules like "every 4th year is a leap
//! year, except every 100th".
use std::fmt;

use enum_map::Enum;
use num::{BigInt, Signed, Zero};
use serde::{Deserialize, Serialize};

use crate::error::{CalendarError, Result};

pub use self::week::Week;
pub use self::year::{Month, Year};

mod week;
mod year;

/// Whether a year, or a rule about years, is normal or leap.
#[derive(Enum, Copy, Clone, Eq, PartialEq, Hash, Debug, Serialize, Deserialize)]
pub enum IntercalationType {
    #[allow(missing_docs)]
    Normal,
    #[allow(missing_docs)]
    Leap,
}

impl IntercalationType {
    /// The other kind.
    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Self::Normal => Self::Leap,
            Self::Leap => Self::Normal,
        }
    }
}

impl fmt::Display for IntercalationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Normal => "normal",
            Self::Leap => "leap",
        })
    }
}

/// Which role the one special month of a year plays, if any.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default, Serialize, Deserialize)]
pub enum SpecialFeature {
    /// All months are ordinary.
    #[default]
    None,
    /// The feature month only exists in leap years.
    Leap,
    /// The feature month collects the days left over after the ordinary months.
    Epagomenal,
}

/// A year is affected by a rule when its number is a multiple of `each_year`.
///
/// When multiple rules match, the last one in the list decides.
#[derive(Clone, Eq, PartialEq, Hash, Debug, Serialize, Deserialize)]
pub struct Rule {
    /// Positive divisor.
    #[serde(with = "big_int_text")]
    pub each_year: BigInt,
    /// What a matching year becomes.
    pub kind: IntercalationType,
}

impl Rule {
    /// Create a new rule.
    pub fn new(each_year: impl Into<BigInt>, kind: IntercalationType) -> Self {
        Self { each_year: each_year.into(), kind }
    }

    /// Whether the rule says something about this year.
    pub fn applies_to(&self, year: &BigInt) -> bool {
        (year % &self.each_year).is_zero()
    }
}

/// A rule together with its on/off switch.
#[derive(Clone, Eq, PartialEq, Hash, Debug, Serialize, Deserialize)]
pub struct RuleEntry {
    #[allow(missing_docs)]
    pub rule: Rule,
    /// Inactive rules are kept in the calendar, but ignored when counting leap years.
    pub active: bool,
}

/// How leap years are determined.
#[derive(Clone, Eq, PartialEq, Debug, Default, Serialize, Deserialize)]
pub enum IntercalationScheme {
    /// Every year is a normal year.
    #[default]
    None,
    /// The kind of each year in a repeating cycle; year 1 is the first element.
    Cycle(Vec<IntercalationType>),
    /// Divisor rules, later rules override earlier ones.
    Rules(Vec<RuleEntry>),
}

/// A complete calendar description.
#[derive(Clone, Eq, PartialEq, Debug, Serialize, Deserialize)]
pub struct Calendar {
    year: Year,
    week: Week,
    scheme: IntercalationScheme,
}

impl Calendar {
    /// An empty calendar without months and without leap years.
    pub fn new(feature: SpecialFeature) -> Self {
        Self {
            year: Year::new(feature),
            week: Week::default(),
            scheme: IntercalationScheme::None,
        }
    }

    #[allow(missing_docs)]
    pub fn year(&self) -> &Year {
        &self.year
    }

    #[allow(missing_docs)]
    pub fn year_mut(&mut self) -> &mut Year {
        &mut self.year
    }

    #[allow(missing_docs)]
    pub fn week(&self) -> &Week {
        &self.week
    }

    #[allow(missing_docs)]
    pub fn week_mut(&mut self) -> &mut Week {
        &mut self.week
    }

    #[allow(missing_docs)]
    pub fn scheme(&self) -> &IntercalationScheme {
        &self.scheme
    }

    /// Replace the scheme by a cycle, dropping any rules.
    pub fn setup_cycle(&mut self, cycle: Vec<IntercalationType>) {
        self.scheme = IntercalationScheme::Cycle(cycle);
    }

    /// Replace the scheme by rules that are all turned on, dropping any cycle.
    pub fn setup_leap_rules(&mut self, rules: Vec<Rule>) {
        self.scheme = IntercalationScheme::Rules(
            rules.into_iter().map(|rule| RuleEntry { rule, active: true }).collect(),
        );
    }

    /// Replace the scheme by rules with a given activity each, dropping any cycle.
    pub fn setup_rule_entries(&mut self, entries: Vec<RuleEntry>) {
        self.scheme = IntercalationScheme::Rules(entries);
    }

    /// Remove the scheme, making every year a normal year.
    pub fn clear_scheme(&mut self) {
        self.scheme = IntercalationScheme::None;
    }

    #[allow(missing_docs)]
    pub fn has_cycle(&self) -> bool {
        matches!(self.scheme, IntercalationScheme::Cycle(_))
    }

    #[allow(missing_docs)]
    pub fn has_leap_rules(&self) -> bool {
        matches!(self.scheme, IntercalationScheme::Rules(_))
    }

    /// The cycle, if the scheme is one.
    pub fn cycle(&self) -> Option<&[IntercalationType]> {
        match &self.scheme {
            IntercalationScheme::Cycle(cycle) => Some(cycle),
            _ => None,
        }
    }

    /// The rules, if the scheme consists of them.
    pub fn rules(&self) -> Option<&[RuleEntry]> {
        match &self.scheme {
            IntercalationScheme::Rules(entries) => Some(entries),
            _ => None,
        }
    }

    /// Turn a rule on or off. Out of range indices and calendars without rules are ignored.
    pub fn switch_rule(&mut self, index: usize, active: bool) {
        if let IntercalationScheme::Rules(entries) = &mut self.scheme {
            if let Some(entry) = entries.get_mut(index) {
                entry.active = active;
            }
        }
    }

    #[allow(missing_docs)]
    pub fn is_rule_turned_on(&self, index: usize) -> bool {
        self.rules()
            .and_then(|entries| entries.get(index))
            .is_some_and(|entry| entry.active)
    }

    /// Change the kind of one year in the cycle. Out of range indices are ignored.
    pub fn switch_cycle_on(&mut self, index: usize, kind: IntercalationType) {
        if let IntercalationScheme::Cycle(cycle) = &mut self.scheme {
            if let Some(year) = cycle.get_mut(index) {
                *year = kind;
            }
        }
    }

    #[allow(missing_docs)]
    pub fn is_cycle_of(&self, index: usize, kind: IntercalationType) -> bool {
        self.cycle()
            .and_then(|cycle| cycle.get(index))
            .is_some_and(|&year| year == kind)
    }

    /// Whether two calendars have the same shape.
    ///
    /// Compares the kind and length of the scheme, the special feature and the day counts of all
    /// months. Month names, the week, the feature month position and the contents of the cycle
    /// or rules are ignored.
    pub fn is_similar_to(&self, other: &Self) -> bool {
        let same_scheme = match (&self.scheme, &other.scheme) {
            (IntercalationScheme::None, IntercalationScheme::None) => true,
            (IntercalationScheme::Cycle(left), IntercalationScheme::Cycle(right)) => {
                left.len() == right.len()
            }
            (IntercalationScheme::Rules(left), IntercalationScheme::Rules(right)) => {
                left.len() == right.len()
            }
            _ => false,
        };

        same_scheme && self.year.is_similar_to(&other.year)
    }

    /// Check that the calendar can be simulated and stored.
    ///
    /// # Errors
    ///
    /// `InvalidCalendarState` when a special feature has no month assigned, the week is empty,
    /// a rule has a non-positive divisor or the cycle is empty.
    pub fn validate(&self) -> Result<()> {
        if self.year.month_count() == 0 {
            return Err(CalendarError::invalid_state("the year has no months"));
        }
        if self.year.feature() != SpecialFeature::None && self.year.feature_month().is_none() {
            return Err(CalendarError::invalid_state("no feature month assigned"));
        }
        if self.year.feature_month().is_some_and(|index| index >= self.year.month_count()) {
            return Err(CalendarError::invalid_state("the feature month does not exist"));
        }
        if self.year.feature() == SpecialFeature::Leap && self.year.month_count() == 1 {
            return Err(CalendarError::invalid_state("a leap month can't be the only month"));
        }
        if self.week.length == 0 {
            return Err(CalendarError::invalid_state("a week needs at least one day"));
        }
        match &self.scheme {
            IntercalationScheme::Cycle(cycle) if cycle.is_empty() => {
                Err(CalendarError::invalid_state("the cycle is empty"))
            }
            IntercalationScheme::Rules(entries)
                if entries.iter().any(|entry| !entry.rule.each_year.is_positive()) =>
            {
                Err(CalendarError::invalid_state("rule divisors must be positive"))
            }
            _ => Ok(()),
        }
    }
}

/// Big integers are stored as their decimal text.
mod big_int_text {
    use num::BigInt;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &BigInt, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(value)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<BigInt, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}
