//! # Leap year counting
//!
//! Answers which years are leap years, and how many leap years there are between the start of
//! the calendar and a given year, for years both after and before it.
//!
//! Years are numbered from the start of the calendar: year 1 is the first year, year 0 the one
//! before it, and so on.
use std::collections::BTreeMap;

use num::{BigInt, Integer, One, Signed, ToPrimitive, Zero};

use crate::data::calendar::{IntercalationScheme, IntercalationType, Rule};
use crate::data::number_types::functions::lcm;

/// Leap year oracle with a current year.
pub trait LeapCalculator {
    /// Move to a year.
    fn set_era_year(&mut self, year: &BigInt);

    /// The current year.
    fn year(&self) -> &BigInt;

    /// Whether a year is a leap year.
    fn is_leap(&self, year: &BigInt) -> bool;

    /// Count leap years.
    ///
    /// # Return value
    ///
    /// The number of leap years in `[1, year]` if `year` is positive, or in `[year, 0]` otherwise.
    fn leap_years_until(&self, year: &BigInt) -> BigInt;

    /// Whether the current year is a leap year.
    fn is_leap_year(&self) -> bool {
        self.is_leap(self.year())
    }

    /// Kind of the current year.
    fn kind(&self) -> IntercalationType {
        if self.is_leap_year() {
            IntercalationType::Leap
        } else {
            IntercalationType::Normal
        }
    }
}

/// Every year is a normal year.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct NeverLeapCalculator {
    year: BigInt,
}

impl NeverLeapCalculator {
    #[allow(missing_docs)]
    pub fn new() -> Self {
        Self { year: BigInt::one() }
    }
}

impl Default for NeverLeapCalculator {
    fn default() -> Self {
        Self::new()
    }
}

impl LeapCalculator for NeverLeapCalculator {
    fn set_era_year(&mut self, year: &BigInt) {
        self.year.clone_from(year);
    }

    fn year(&self) -> &BigInt {
        &self.year
    }

    fn is_leap(&self, _year: &BigInt) -> bool {
        false
    }

    fn leap_years_until(&self, _year: &BigInt) -> BigInt {
        BigInt::zero()
    }
}

/// Leap years follow a repeating cycle; year 1 is the first position of the cycle.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct CycleLeapCalculator {
    cycle: Vec<IntercalationType>,
    leap_years_in_cycle: BigInt,
    year: BigInt,
}

impl CycleLeapCalculator {
    /// Create a calculator for a non-empty cycle.
    pub fn new(cycle: Vec<IntercalationType>) -> Self {
        debug_assert!(!cycle.is_empty());

        let leap_years_in_cycle = BigInt::from(count_leap(&cycle));
        Self { cycle, leap_years_in_cycle, year: BigInt::one() }
    }

    fn length(&self) -> BigInt {
        BigInt::from(self.cycle.len())
    }

    /// Position within the cycle, from 0.
    fn position(&self, year: &BigInt) -> usize {
        (year - BigInt::one())
            .mod_floor(&self.length())
            .to_usize()
            .unwrap_or_default()
    }
}

fn count_leap(years: &[IntercalationType]) -> usize {
    years.iter().filter(|&&kind| kind == IntercalationType::Leap).count()
}

impl LeapCalculator for CycleLeapCalculator {
    fn set_era_year(&mut self, year: &BigInt) {
        self.year.clone_from(year);
    }

    fn year(&self) -> &BigInt {
        &self.year
    }

    fn is_leap(&self, year: &BigInt) -> bool {
        self.cycle[self.position(year)] == IntercalationType::Leap
    }

    fn leap_years_until(&self, year: &BigInt) -> BigInt {
        let length = self.length();
        if year.is_positive() {
            let (full_cycles, rest) = year.div_rem(&length);
            let rest = rest.to_usize().unwrap_or_default();
            full_cycles * &self.leap_years_in_cycle + count_leap(&self.cycle[..rest])
        } else {
            // Years 0, -1, ... walk backwards from the end of the cycle.
            let (full_cycles, rest) = (BigInt::one() - year).div_rem(&length);
            let rest = rest.to_usize().unwrap_or_default();
            let start = self.cycle.len() - rest;
            full_cycles * &self.leap_years_in_cycle + count_leap(&self.cycle[start..])
        }
    }
}

/// Leap years follow divisor rules, the last matching rule decides.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct RulesLeapCalculator {
    rules: Vec<Rule>,
    year: BigInt,
}

impl RulesLeapCalculator {
    /// Create a calculator for the active rules, in order, with positive divisors.
    pub fn new(rules: Vec<Rule>) -> Self {
        Self { rules, year: BigInt::one() }
    }

    /// Count the leap years in `[1, n]` for `n >= 0`.
    ///
    /// Going through the rules in order, the leap indicator of a year is kept as a sum
    /// `Σ c_m [m divides the year]`. A rule with divisor `d` overrides the earlier ones on the
    /// multiples of `d`, so every term `c_m [m]` gains a `-c_m [lcm(m, d)]` term, and a leap rule
    /// adds `[d]`. Terms with equal multiples merge, and a multiple above `n` counts nothing in
    /// `[1, n]`, so it is dropped. The count is then `Σ c_m ⌊n / m⌋`.
    fn count_until(&self, n: &BigInt) -> BigInt {
        let mut coefficients = BTreeMap::<BigInt, BigInt>::new();
        for rule in &self.rules {
            let mut next = coefficients.clone();
            for (multiple, coefficient) in &coefficients {
                let combined = lcm(multiple, &rule.each_year);
                if &combined <= n {
                    *next.entry(combined).or_default() -= coefficient;
                }
            }
            if rule.kind == IntercalationType::Leap && &rule.each_year <= n {
                *next.entry(rule.each_year.clone()).or_default() += BigInt::one();
            }
            next.retain(|_, coefficient| !coefficient.is_zero());
            coefficients = next;
        }

        coefficients
            .iter()
            .fold(BigInt::zero(), |total, (multiple, coefficient)| {
                total + coefficient * (n / multiple)
            })
    }

    fn decides_year_zero(&self) -> bool {
        self.rules.last().is_some_and(|rule| rule.kind == IntercalationType::Leap)
    }
}

impl LeapCalculator for RulesLeapCalculator {
    fn set_era_year(&mut self, year: &BigInt) {
        self.year.clone_from(year);
    }

    fn year(&self) -> &BigInt {
        &self.year
    }

    fn is_leap(&self, year: &BigInt) -> bool {
        self.rules
            .iter()
            .rev()
            .find(|rule| rule.applies_to(year))
            .is_some_and(|rule| rule.kind == IntercalationType::Leap)
    }

    fn leap_years_until(&self, year: &BigInt) -> BigInt {
        if year.is_positive() {
            self.count_until(year)
        } else {
            let year_zero = if self.decides_year_zero() { BigInt::one() } else { BigInt::zero() };
            self.count_until(&year.abs()) + year_zero
        }
    }
}

/// The calculator matching an intercalation scheme.
#[derive(Clone, Eq, PartialEq, Debug)]
#[allow(missing_docs)]
pub enum Calculator {
    Never(NeverLeapCalculator),
    Cycle(CycleLeapCalculator),
    Rules(RulesLeapCalculator),
}

impl Calculator {
    /// Only active rules are used. An empty cycle, or a scheme without active rules, never leaps.
    pub fn for_scheme(scheme: &IntercalationScheme) -> Self {
        match scheme {
            IntercalationScheme::Cycle(cycle) if !cycle.is_empty() => {
                Self::Cycle(CycleLeapCalculator::new(cycle.clone()))
            }
            IntercalationScheme::Rules(entries) if entries.iter().any(|entry| entry.active) => {
                Self::Rules(RulesLeapCalculator::new(
                    entries
                        .iter()
                        .filter(|entry| entry.active)
                        .map(|entry| entry.rule.clone())
                        .collect(),
                ))
            }
            _ => Self::Never(NeverLeapCalculator::new()),
        }
    }

    fn inner(&self) -> &dyn LeapCalculator {
        match self {
            Self::Never(calculator) => calculator,
            Self::Cycle(calculator) => calculator,
            Self::Rules(calculator) => calculator,
        }
    }
}

impl LeapCalculator for Calculator {
    fn set_era_year(&mut self, year: &BigInt) {
        match self {
            Self::Never(calculator) => calculator.set_era_year(year),
            Self::Cycle(calculator) => calculator.set_era_year(year),
            Self::Rules(calculator) => calculator.set_era_year(year),
        }
    }

    fn year(&self) -> &BigInt {
        self.inner().year()
    }

    fn is_leap(&self, year: &BigInt) -> bool {
        self.inner().is_leap(year)
    }

    fn leap_years_until(&self, year: &BigInt) -> BigInt {
        self.inner().leap_years_until(year)
    }
}

#[cfg(test)]
mod test {
    use num::BigInt;

    use crate::algorithm::simulation::leap_calculator::{
        Calculator, CycleLeapCalculator, LeapCalculator, RulesLeapCalculator,
    };
    use crate::data::calendar::{IntercalationScheme, IntercalationType, Rule, RuleEntry};

    use IntercalationType::{Leap, Normal};

    fn gregorian() -> RulesLeapCalculator {
        RulesLeapCalculator::new(vec![
            Rule::new(4, Leap),
            Rule::new(100, Normal),
            Rule::new(400, Leap),
        ])
    }

    /// Count by asking every year.
    fn brute_force(calculator: &impl LeapCalculator, year: i64) -> BigInt {
        let years = if year > 0 { 1..=year } else { year..=0 };
        BigInt::from(years.filter(|&y| calculator.is_leap(&BigInt::from(y))).count())
    }

    #[test]
    fn gregorian_rules() {
        let calculator = gregorian();
        let years = [
            (1900, false),
            (2000, true),
            (2004, true),
            (2023, false),
            (0, true),
            (-4, true),
            (-100, false),
        ];
        for (year, leap) in years {
            assert_eq!(calculator.is_leap(&BigInt::from(year)), leap, "year {year}");
        }
        assert_eq!(calculator.leap_years_until(&BigInt::from(400)), BigInt::from(97));
        assert_eq!(calculator.leap_years_until(&BigInt::from(0)), BigInt::from(1));
        assert_eq!(calculator.leap_years_until(&BigInt::from(-1)), BigInt::from(1));
        assert_eq!(calculator.leap_years_until(&BigInt::from(-4)), BigInt::from(2));
    }

    #[test]
    fn rules_match_brute_force() {
        let calculators = [
            gregorian(),
            RulesLeapCalculator::new(vec![
                Rule::new(4, Leap),
                Rule::new(125, Normal),
                Rule::new(5000, Leap),
            ]),
            RulesLeapCalculator::new(vec![
                Rule::new(2, Leap),
                Rule::new(5, Normal),
                Rule::new(10, Leap),
                Rule::new(25, Normal),
                Rule::new(125, Leap),
            ]),
            RulesLeapCalculator::new(vec![Rule::new(6, Normal), Rule::new(3, Leap)]),
        ];
        for calculator in &calculators {
            for year in (-1200..=1200).step_by(7) {
                assert_eq!(
                    calculator.leap_years_until(&BigInt::from(year)),
                    brute_force(calculator, year),
                    "year {year}, rules {calculator:?}",
                );
            }
        }
    }

    #[test]
    fn many_nested_rules() {
        // Every 2nd year is a leap year, except every 4th, except every 8th, and so on.
        let divisors = (1..=24).map(|power| 1_u64 << power).collect::<Vec<_>>();
        let rules = divisors.iter()
            .enumerate()
            .map(|(index, &divisor)| Rule::new(divisor, if index % 2 == 0 { Leap } else { Normal }))
            .collect::<Vec<_>>();
        let calculator = RulesLeapCalculator::new(rules);

        let year = 1_u64 << 26;
        let expected = divisors.iter()
            .enumerate()
            .filter(|(index, _)| index % 2 == 0)
            .map(|(index, &divisor)| {
                let overridden = divisors.get(index + 1).map_or(0, |&next| year / next);
                year / divisor - overridden
            })
            .sum::<u64>();
        assert_eq!(calculator.leap_years_until(&BigInt::from(year)), BigInt::from(expected));
        assert_eq!(expected, 22_369_620);

        for year in (-600..=600).step_by(11) {
            assert_eq!(
                calculator.leap_years_until(&BigInt::from(year)),
                brute_force(&calculator, year),
                "year {year}",
            );
        }
    }

    #[test]
    fn cycle() {
        let calculator = CycleLeapCalculator::new(vec![Normal, Normal, Leap, Normal, Leap]);
        assert!(calculator.is_leap(&BigInt::from(3)));
        assert!(calculator.is_leap(&BigInt::from(8)));
        assert!(calculator.is_leap(&BigInt::from(0)));
        assert!(!calculator.is_leap(&BigInt::from(-1)));
        assert!(calculator.is_leap(&BigInt::from(-2)));

        for year in -40..=40 {
            assert_eq!(
                calculator.leap_years_until(&BigInt::from(year)),
                brute_force(&calculator, year),
                "year {year}",
            );
        }
    }

    #[test]
    fn current_year() {
        let mut calculator = Calculator::for_scheme(&IntercalationScheme::Rules(vec![
            RuleEntry { rule: Rule::new(4, Leap), active: true },
            RuleEntry { rule: Rule::new(2, Leap), active: false },
        ]));
        calculator.set_era_year(&BigInt::from(4));
        assert!(calculator.is_leap_year());
        assert_eq!(calculator.kind(), Leap);
        calculator.set_era_year(&BigInt::from(2));
        assert!(!calculator.is_leap_year());
        assert_eq!(calculator.year(), &BigInt::from(2));
    }

    #[test]
    fn no_scheme() {
        let inactive = IntercalationScheme::Rules(vec![
            RuleEntry { rule: Rule::new(4, Leap), active: false },
        ]);
        let schemes = [IntercalationScheme::None, IntercalationScheme::Cycle(Vec::new()), inactive];
        for scheme in schemes {
            let calculator = Calculator::for_scheme(&scheme);
            assert!(matches!(calculator, Calculator::Never(_)));
            assert!(!calculator.is_leap_year());
            assert_eq!(calculator.leap_years_until(&BigInt::from(-10)), BigInt::from(0));
        }
    }
}
