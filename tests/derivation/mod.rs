use std::sync::Arc;

use num::BigInt;

use intercalate::algorithm::derivation::{BodyTracked, Solution, derive};
use intercalate::algorithm::simulation::Simulation;
use intercalate::data::calendar::{Calendar, IntercalationType, Rule, SpecialFeature};
use intercalate::error::CalendarError;

use crate::input;

/// Days from the start of the calendar to the start of a year.
fn days_until_year(calendar: Calendar, year: i64) -> BigInt {
    let mut simulation = Simulation::new(Arc::new(calendar), 0, BigInt::from(0), None).unwrap();
    simulation.set_era_year(&BigInt::from(year));
    simulation.goto_first_month();
    simulation.days_so_far()
}

fn leap_years(calendar: &Calendar) -> Vec<usize> {
    calendar
        .cycle()
        .unwrap()
        .iter()
        .enumerate()
        .filter(|&(_, &kind)| kind == IntercalationType::Leap)
        .map(|(index, _)| index + 1)
        .collect()
}

#[test]
fn gregorian() {
    let calendar = derive(Solution::Gregorian, &input("365 2425/10000", "29 1/2", 12)).unwrap();
    let rules = calendar
        .rules()
        .unwrap()
        .iter()
        .map(|entry| entry.rule.clone())
        .collect::<Vec<_>>();
    assert_eq!(
        rules,
        vec![
            Rule::new(4, IntercalationType::Leap),
            Rule::new(100, IntercalationType::Normal),
            Rule::new(400, IntercalationType::Leap),
        ],
    );
    assert_eq!(days_until_year(calendar, 401), BigInt::from(146_097));
}

#[test]
fn egyptian() {
    let calendar = derive(Solution::Egyptian, &input("365 1/4", "29 1/2", 12)).unwrap();
    let year = calendar.year();
    assert_eq!(year.month_count(), 13);
    assert_eq!(year.feature(), SpecialFeature::Epagomenal);
    assert!(year.months()[..12].iter().all(|month| month.normal_days == 30));
    assert_eq!(year.months()[12].normal_days, 5);
    assert_eq!(year.months()[12].leap_days, 1);
    assert_eq!(days_until_year(calendar, 5), BigInt::from(1461));
}

#[test]
fn islamic() {
    let calendar = derive(Solution::Islamic, &input("365", "29 191/360", 12)).unwrap();
    assert_eq!(calendar.year().year_lengths()[IntercalationType::Normal], 354);
    assert_eq!(leap_years(&calendar), vec![2, 5, 7, 10, 13, 16, 18, 21, 24, 26, 29]);
    assert_eq!(days_until_year(calendar, 31), BigInt::from(30 * 354 + 11));
}

#[test]
fn pure_lunar() {
    let calendar = derive(Solution::PureLunar, &input("365", "29 31/60", 12)).unwrap();
    assert_eq!(calendar.year().year_lengths()[IntercalationType::Normal], 354);
    assert_eq!(calendar.rules().unwrap().len(), 1);
    assert_eq!(days_until_year(calendar, 6), BigInt::from(5 * 354 + 1));
}

#[test]
fn metonic() {
    let calendar =
        derive(Solution::Metonic, &input("365 2422/10000", "29 53059/100000", 12)).unwrap();
    assert_eq!(calendar.year().feature(), SpecialFeature::Leap);
    assert_eq!(leap_years(&calendar).len(), 7);
    assert_eq!(days_until_year(calendar, 20), BigInt::from(19 * 354 + 7 * 29));
}

#[test]
fn offered_solutions_derive() {
    let earth = input("365 2422/10000", "29 53059/100000", 12);
    for body in [BodyTracked::Sun, BodyTracked::SunAndMoon] {
        for &solution in body.solutions() {
            let calendar = derive(solution, &earth).unwrap();
            assert!(calendar.validate().is_ok(), "{solution}");
        }
    }
    assert!(derive(Solution::Islamic, &earth).is_ok());
}

#[test]
fn unable_to_compute() {
    assert_eq!(
        derive(Solution::PureLunar, &input("365", "29 53/100", 12)),
        Err(CalendarError::UnableToComputeScheme { solution: Solution::PureLunar }),
    );
}
