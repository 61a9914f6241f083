//! # Calendar summaries
//!
//! A summary describes a finished calendar in prose. The facts are handed to a [`SummaryWriter`]
//! one call at a time, always in the same order; the writer decides how to render them.
use itertools::Itertools;

use crate::algorithm::derivation::Solution;
use crate::data::calendar::{IntercalationType, Month, Rule, SpecialFeature, Week};
use crate::data::number_types::fraction::MixedFraction;
use crate::io::number::{DayLength, fraction_to_decimal_text};
use crate::io::project::Project;

/// Receives the facts of a calendar.
pub trait SummaryWriter {
    /// Subdivision of a day.
    fn write_day_length(&mut self, day_length: &DayLength);

    /// Lengths the calendar was derived from.
    fn write_year_month_length(&mut self, year: &MixedFraction, month: &MixedFraction);

    /// Days in a normal year, and the days a leap year adds to them.
    fn write_day_count(&mut self, normal_days: u64, leap_days: u64);

    /// Algorithm the calendar was derived with.
    fn write_used_solution(&mut self, solution: Solution);

    /// Kind of each year of the leap cycle.
    fn write_cycle(&mut self, cycle: &[IntercalationType]);

    /// The rules that are turned on, in order.
    fn write_leap_rules(&mut self, rules: &[&Rule]);

    /// A month, numbered from 1, with the role it plays if it is the feature month.
    fn write_about_month(&mut self, month: &Month, number: usize, feature: SpecialFeature);

    #[allow(missing_docs)]
    fn write_about_week(&mut self, week: &Week);
}

/// Hand all facts of a project to a writer.
///
/// A leap month counts entirely towards the leap days.
pub fn fill_writer(writer: &mut impl SummaryWriter, project: &Project) {
    let calendar = &project.calendar;
    let year = calendar.year();

    writer.write_day_length(&project.day_length);
    writer.write_year_month_length(&project.year_length, &project.month_length);

    let lengths = year.year_lengths();
    let normal_days = lengths[IntercalationType::Normal];
    let leap_days = lengths[IntercalationType::Leap].saturating_sub(normal_days);
    writer.write_day_count(normal_days, leap_days);

    writer.write_used_solution(project.solution);

    if let Some(cycle) = calendar.cycle() {
        writer.write_cycle(cycle);
    } else if let Some(entries) = calendar.rules() {
        let active = entries
            .iter()
            .filter(|entry| entry.active)
            .map(|entry| &entry.rule)
            .collect::<Vec<_>>();
        writer.write_leap_rules(&active);
    }

    for (index, month) in year.months().iter().enumerate() {
        let feature = if year.is_month_feature(index) {
            year.feature()
        } else {
            SpecialFeature::None
        };
        writer.write_about_month(month, index + 1, feature);
    }

    writer.write_about_week(calendar.week());
}

/// Renders a summary as plain English text.
#[derive(Clone, Eq, PartialEq, Debug, Default)]
pub struct TextWriter {
    header: String,
    day_count: String,
    scheme: String,
    week: String,
    lengths: String,
    months: Vec<String>,
}

impl TextWriter {
    /// A writer with an optional title above the summary.
    pub fn new(title: Option<&str>) -> Self {
        let header = title
            .map(|title| format!("###\t{}\t###\n\n\n", title.to_uppercase()))
            .unwrap_or_default();
        Self { header, ..Self::default() }
    }

    /// The summary so far.
    pub fn result(&self) -> String {
        let mut result = String::new();
        result.push_str(&self.header);
        result.push_str(&self.day_count);
        result.push_str(&self.scheme);
        result.push_str(&self.week);
        result.push_str(&self.lengths);
        result.push_str("Months:\n\n");
        for month in &self.months {
            result.push_str(month);
        }

        result
    }
}

impl SummaryWriter for TextWriter {
    fn write_day_length(&mut self, _day_length: &DayLength) {}

    fn write_year_month_length(&mut self, year: &MixedFraction, month: &MixedFraction) {
        self.lengths = format!(
            "The calendar follows a year of {} days and a month of {} days.\n\n",
            fraction_to_decimal_text(year),
            fraction_to_decimal_text(month),
        );
    }

    fn write_day_count(&mut self, normal_days: u64, leap_days: u64) {
        self.day_count = if leap_days == 0 {
            format!("Every year has {normal_days} days. ")
        } else {
            format!(
                "A normal year has {normal_days} days and a leap year has {} days. ",
                normal_days + leap_days,
            )
        };
    }

    fn write_used_solution(&mut self, _solution: Solution) {}

    fn write_cycle(&mut self, cycle: &[IntercalationType]) {
        let leap_years = cycle
            .iter()
            .positions(|&kind| kind == IntercalationType::Leap)
            .map(|index| index + 1)
            .join(", ");
        let leap_years = if leap_years.is_empty() { "none".to_string() } else { leap_years };
        self.scheme = format!(
            "Leap years follow a cycle of {} years. The leap years of the cycle are: {}.\n\n",
            cycle.len(),
            leap_years,
        );
    }

    fn write_leap_rules(&mut self, rules: &[&Rule]) {
        let mut text = "Leap years follow these rules:\n\n".to_string();
        for rule in rules {
            let line = format!(" * every {}th year is a {} year\n", rule.each_year, rule.kind);
            text.push_str(&line);
        }
        text.push_str("\n\n");
        self.scheme = text;
    }

    fn write_about_month(&mut self, month: &Month, number: usize, feature: SpecialFeature) {
        let mut text = format!("{number}. {}\n", month.name);
        if month.leap_days == 0 {
            text.push_str(&format!("\t\t{} days\n", month.normal_days));
        } else {
            text.push_str(&format!(
                "\t\t{} days, {} more in a leap year\n",
                month.normal_days,
                month.leap_days,
            ));
        }
        match feature {
            SpecialFeature::None => {}
            SpecialFeature::Leap => text.push_str("\t\tThis month only exists in leap years.\n"),
            SpecialFeature::Epagomenal => {
                text.push_str("\t\tThese days are outside of the ordinary months.\n");
            }
        }
        text.push('\n');
        self.months.push(text);
    }

    fn write_about_week(&mut self, week: &Week) {
        let policy = if week.starts_with_month {
            "Every month starts with a new week."
        } else {
            "Weeks continue across months and years."
        };
        self.week = format!("A week has {} days. {policy}\n\n", week.length);
    }
}
