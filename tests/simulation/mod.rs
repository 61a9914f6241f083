//! Stepping through derived calendars month by month must agree with the day count computed
//! directly from the year.
use std::sync::Arc;

use num::BigInt;

use intercalate::algorithm::derivation::{Solution, derive};
use intercalate::algorithm::simulation::Simulation;
use intercalate::algorithm::simulation::reals::{MoonPhase, RealsSettings, Season};
use intercalate::algorithm::simulation::settings::{SimulationSettings, channel};
use intercalate::data::calendar::Calendar;
use intercalate::data::number_types::fraction::MixedFraction;

use crate::input;

fn calendars() -> Vec<(Solution, Calendar)> {
    [
        (Solution::Gregorian, input("365 97/400", "30", 12)),
        (Solution::Egyptian, input("365 1/4", "29 1/2", 12)),
        (Solution::Metonic, input("365 2422/10000", "29 53059/100000", 12)),
        (Solution::PureLunar, input("365", "29 31/60", 12)),
        (Solution::Islamic, input("365", "29 191/360", 12)),
    ]
    .into_iter()
    .map(|(solution, input)| (solution, derive(solution, &input).unwrap()))
    .collect()
}

/// Walk from `from` up to the start of `until`, checking the running total of days.
fn walk(simulation: &mut Simulation, from: i64, until: i64) {
    simulation.set_era_year(&BigInt::from(from));
    simulation.goto_first_month();

    let start = simulation.days_so_far();
    let mut total = BigInt::from(0);
    let mut months = Vec::new();
    while simulation.year() < &BigInt::from(until) {
        let days = simulation.days_in_current_month();
        let in_grid = simulation.get_days_in_month().iter().flatten().flatten().count();
        assert_eq!(in_grid, days as usize);

        months.push((simulation.year().clone(), simulation.month()));
        total += days;
        simulation.goto_next_month();
        assert_eq!(simulation.days_so_far(), &start + &total);
    }

    while let Some((year, month)) = months.pop() {
        simulation.goto_previous_month();
        assert_eq!((simulation.year(), simulation.month()), (&year, month));
        total -= simulation.days_in_current_month();
        assert_eq!(simulation.days_so_far(), &start + &total);
    }
    assert_eq!(total, BigInt::from(0));
}

#[test]
fn day_count_around_epoch() {
    for (solution, calendar) in calendars() {
        let mut simulation = Simulation::new(Arc::new(calendar), 0, BigInt::from(0), None).unwrap();
        let span = match solution {
            Solution::Gregorian => 401,
            _ => 61,
        };
        walk(&mut simulation, -span, span);

        simulation.set_era_year(&BigInt::from(1));
        simulation.goto_first_month();
        assert_eq!(simulation.days_so_far(), BigInt::from(0), "{solution}");
    }
}

#[test]
fn weeks_continue() {
    let calendar = derive(Solution::Metonic, &input("365 2422/10000", "29 53059/100000", 12))
        .unwrap();
    let mut simulation = Simulation::new(Arc::new(calendar), 4, BigInt::from(1000), None).unwrap();
    let length = simulation.week_length() as usize;
    simulation.set_era_year(&BigInt::from(990));

    for _ in 0..500 {
        let first = simulation.first_week_day();
        let days = simulation.days_in_current_month() as usize;
        simulation.goto_next_month();
        assert_eq!(simulation.first_week_day(), (first + days) % length);
    }
}

#[test]
fn published_settings() {
    let calendar = derive(Solution::Gregorian, &input("365 97/400", "29 1/2", 12)).unwrap();
    let mut settings = SimulationSettings::new(Arc::new(calendar));
    let (feed, mut reader) = channel();

    settings.set_era_year(BigInt::from(1969));
    settings.set_era_week_day(3);
    settings.set_reals(Some(RealsSettings {
        month_length: "29 1/2".parse::<MixedFraction>().unwrap(),
        year_length: "365 1/4".parse::<MixedFraction>().unwrap(),
        month_shift: MixedFraction::from(0),
        year_shift: MixedFraction::from(0),
    }));
    assert!(feed.publish_if_needed(&mut settings).unwrap());

    let simulation = reader.latest().unwrap();
    assert_eq!(simulation.era_year(), BigInt::from(1970));
    assert_eq!(simulation.first_week_day(), 3);
    let days = simulation.get_days_in_month().into_iter().flatten().flatten().collect::<Vec<_>>();
    assert_eq!(days[0].moon, Some(MoonPhase::NewMoon));
    assert_eq!(days[0].season, Some(Season::Winter));
    assert_eq!(days.iter().filter(|day| day.season.is_some()).count(), 1);
    let moons = days.iter().filter(|day| day.moon.is_some()).count();
    assert!((8..=9).contains(&moons));

    simulation.goto_next_year();
    let snapshot = reader.snapshot().unwrap();
    assert_eq!(snapshot.era_year(), BigInt::from(1970));
    assert_eq!(reader.latest().unwrap().era_year(), BigInt::from(1971));
}
